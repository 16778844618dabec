//! Credential storage.

mod file;
mod memory;
mod traits;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;
pub use traits::TokenStore;
