// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resource handles: one per backend entity family.
//!
//! Reads go through the shared cache (fresh hit, or one de-duplicated
//! fetch per key). Writes run on their own task so that the request and the
//! invalidation that follows it complete even if the caller is dropped.

pub mod assignments;
pub mod auth;
pub mod dashboard;
pub mod me;
pub mod metrics;
pub mod nutrition;
pub mod routines;
pub mod trainers;
pub mod users;

pub use assignments::Assignments;
pub use auth::Auth;
pub use dashboard::TrainerDashboard;
pub use me::Me;
pub use metrics::Metrics;
pub use nutrition::NutritionPlans;
pub use routines::Routines;
pub use trainers::Trainers;
pub use users::Users;

use crate::api::ApiRequest;
use crate::cache::{stale_families, QueryKey, Write};
use crate::error::ApiError;
use crate::models::Role;
use crate::FitCoach;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use validator::Validate;

/// Management namespace of the backend (`/admin/...` or `/trainer/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Admin,
    Trainer,
}

impl Scope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Scope::Admin => "admin",
            Scope::Trainer => "trainer",
        }
    }

    pub const fn prefix(self) -> &'static str {
        match self {
            Scope::Admin => "/admin",
            Scope::Trainer => "/trainer",
        }
    }

    /// Collection path for workout routines; admins and trainers name it differently.
    pub const fn routines_path(self) -> &'static str {
        match self {
            Scope::Admin => "/admin/routines/",
            Scope::Trainer => "/trainer/workout-plans/",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<Role> for Scope {
    type Error = ApiError;

    fn try_from(role: Role) -> Result<Self, Self::Error> {
        match role {
            Role::Admin => Ok(Scope::Admin),
            Role::Trainer => Ok(Scope::Trainer),
            Role::User => Err(ApiError::Forbidden(
                "users have no management scope".to_string(),
            )),
        }
    }
}

impl FitCoach {
    pub fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    pub fn users(&self, scope: Scope) -> Users<'_> {
        Users::new(self, scope)
    }

    pub fn trainers(&self) -> Trainers<'_> {
        Trainers::new(self)
    }

    pub fn routines(&self, scope: Scope) -> Routines<'_> {
        Routines::new(self, scope)
    }

    pub fn nutrition_plans(&self, scope: Scope) -> NutritionPlans<'_> {
        NutritionPlans::new(self, scope)
    }

    pub fn assignments(&self, scope: Scope) -> Assignments<'_> {
        Assignments::new(self, scope)
    }

    pub fn metrics(&self) -> Metrics<'_> {
        Metrics::new(self)
    }

    pub fn me(&self) -> Me<'_> {
        Me::new(self)
    }

    pub fn dashboard(&self) -> TrainerDashboard<'_> {
        TrainerDashboard::new(self)
    }

    /// Cached read of `key`, fetching with `request` on a miss.
    pub(crate) async fn read<T: DeserializeOwned>(
        &self,
        key: QueryKey,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        self.cache
            .fetch(key, || async move {
                let mut request = request;
                self.client.send(&mut request).await
            })
            .await
    }

    /// Issue a write and, once the backend acknowledges it, invalidate the
    /// families the policy lists for `write`. A failed write leaves the cache
    /// untouched.
    pub(crate) async fn write<T: DeserializeOwned>(
        &self,
        write: Write,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let client = self.client.clone();
        let cache = Arc::clone(&self.cache);

        let task = tokio::spawn(async move {
            let mut request = request;
            let result = client.send(&mut request).await;
            match &result {
                Ok(_) => {
                    cache.invalidate_families(stale_families(write));
                }
                Err(e) => {
                    tracing::warn!(
                        write = ?write,
                        path = %request.path,
                        error = %e,
                        "Write failed, cache left untouched"
                    );
                }
            }
            result
        });

        let value = task
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Write task failed: {}", e)))??;

        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Write whose response body is not needed.
    pub(crate) async fn write_discard(&self, write: Write, request: ApiRequest) -> Result<(), ApiError> {
        self.write::<Value>(write, request).await.map(|_| ())
    }
}

/// Check a payload locally; an invalid one never reaches the network.
pub(crate) fn validate(payload: &impl Validate) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))
}
