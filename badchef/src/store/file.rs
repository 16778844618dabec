//! File-backed token store.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::traits::TokenStore;
use crate::error::{Error, Result};
use crate::models::Credential;

/// On-disk layout: a TOML table with a single `token` key.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    token: Option<Credential>,
}

/// Token store persisted to a small TOML file.
///
/// A missing file, a missing `token` key and a blank token all read as
/// logged out.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Use the given file as the session slot.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<Credential>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let file: SessionFile = toml::from_str(&content).map_err(|e| {
            Error::storage(format!("failed to parse {}: {}", self.path.display(), e))
        })?;

        Ok(file.token.filter(|t| !t.is_empty()))
    }

    fn set(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::storage(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let content = toml::to_string(&SessionFile {
            token: Some(credential.clone()),
        })
        .map_err(|e| Error::storage(format!("failed to serialize session: {}", e)))?;

        fs::write(&self.path, content).map_err(|e| {
            Error::storage(format!("failed to write {}: {}", self.path.display(), e))
        })
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::storage(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
