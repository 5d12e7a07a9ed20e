// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitCoach client: the fetch, cache and mutate layer behind the coaching
//! dashboards.
//!
//! Every admin, trainer and user screen reads and writes the backend
//! through the resource handles in [`resources`]. Reads go through one shared
//! [`cache::QueryCache`]; every acknowledged write marks the affected cache
//! families stale so the next read re-fetches.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod resources;
pub mod session;

use api::ApiClient;
use cache::QueryCache;
use config::Config;
use error::ApiError;
use models::Credential;
use session::SessionStore;
use std::sync::Arc;

/// Shared client state: the adapter plus the process-wide cache.
///
/// Cheap to clone; clones share the cache and the session store.
#[derive(Clone)]
pub struct FitCoach {
    client: ApiClient,
    cache: Arc<QueryCache>,
}

impl FitCoach {
    pub fn new(client: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self { client, cache }
    }

    /// Build the adapter and a fresh cache from configuration.
    pub fn from_config(config: &Config, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let client = ApiClient::new(config, session)?;
        Ok(Self::new(client, Arc::new(QueryCache::new(config.stale_after))))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Credential currently in the session store.
    pub fn credential(&self) -> Option<Credential> {
        self.client.session().load()
    }
}
