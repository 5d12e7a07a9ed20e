// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session credential storage and the session-expired collaborator.
//!
//! The store holds at most one credential. It is read before every request,
//! written at login and cleared at logout or when the backend answers 401.

pub mod file;

pub use file::FileSessionStore;

use crate::error::ApiError;
use crate::models::Credential;
use std::sync::{PoisonError, RwLock};

/// Key-value store persisting one credential.
pub trait SessionStore: Send + Sync {
    /// Current credential, if logged in.
    fn load(&self) -> Option<Credential>;

    fn save(&self, credential: &Credential) -> Result<(), ApiError>;

    fn clear(&self) -> Result<(), ApiError>;
}

/// Notified when the backend rejects the stored credential.
///
/// The adapter never navigates itself; the application decides what showing
/// the login entry point means (a redirect, a prompt, exiting a CLI).
pub trait SessionListener: Send + Sync {
    fn session_expired(&self, login_path: &str);
}

impl<F> SessionListener for F
where
    F: Fn(&str) + Send + Sync,
{
    fn session_expired(&self, login_path: &str) {
        self(login_path)
    }
}

/// In-process store, lost on exit.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    credential: RwLock<Option<Credential>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: RwLock::new(Some(credential)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Credential> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, credential: &Credential) -> Result<(), ApiError> {
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
        Ok(())
    }
}
