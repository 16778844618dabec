//! Token store trait definitions.

use crate::error::Result;
use crate::models::Credential;

/// Trait for credential storage backends.
///
/// Writes are synchronous: a `set` or `clear` is visible to the very next
/// `get`. Nothing here tracks expiry; a stale token is only discovered by
/// asking the server.
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Read the stored credential, if any.
    fn get(&self) -> Result<Option<Credential>>;

    /// Replace the stored credential.
    fn set(&self, credential: &Credential) -> Result<()>;

    /// Remove the stored credential. Clearing an empty store is a no-op.
    fn clear(&self) -> Result<()>;

    /// Check if a credential is present.
    fn is_present(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }
}
