//! In-memory token store.

use std::sync::RwLock;

use super::traits::TokenStore;
use crate::error::{Error, Result};
use crate::models::Credential;

/// Token store that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<Credential>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a credential.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(Credential::new(token))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<Credential>> {
        let slot = self
            .slot
            .read()
            .map_err(|_| Error::storage("token slot poisoned"))?;
        Ok(slot.clone())
    }

    fn set(&self, credential: &Credential) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| Error::storage("token slot poisoned"))?;
        *slot = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| Error::storage("token slot poisoned"))?;
        *slot = None;
        Ok(())
    }
}
