// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed session store.
//!
//! The credential is kept as one JSON object on disk so a restarted client
//! stays logged in. The file is read once when the store is opened; after
//! that the in-memory copy is authoritative and every change is written
//! through.

use crate::error::ApiError;
use crate::models::Credential;
use crate::session::SessionStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    credential: RwLock<Option<Credential>>,
}

impl FileSessionStore {
    /// Open the store, loading any credential already saved at `path`.
    ///
    /// A missing file means logged out. An unreadable or corrupt file is
    /// logged and treated the same way rather than failing startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let credential = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Credential>(&bytes) {
                Ok(credential) => Some(credential),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt session file");
                    None
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read session file");
                None
            }
        };

        Self {
            path,
            credential: RwLock::new(credential),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Credential> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, credential: &Credential) -> Result<(), ApiError> {
        let bytes = serde_json::to_vec_pretty(credential)
            .map_err(|e| ApiError::Session(format!("Failed to encode credential: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ApiError::Session(format!("Failed to create {}: {}", parent.display(), e)))?;
            }
        }
        std::fs::write(&self.path, bytes)
            .map_err(|e| ApiError::Session(format!("Failed to write {}: {}", self.path.display(), e)))?;

        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;

        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Session(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
