// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side query cache and its invalidation policy.
//!
//! Key schema (first segment is the family):
//!
//! | Key | Read |
//! |---|---|
//! | `["users", scope]`, `["users", scope, id]` | user list / detail |
//! | `["trainers"]`, `["trainers", id]` | trainer list / detail |
//! | `["routines", scope]`, `["routines", scope, id]` | workout plans |
//! | `["nutrition-plans", scope]`, `["nutrition-plans", scope, id]` | nutrition plans |
//! | `["user-plans", user_id]`, `["user-plans", "me"]` | assigned plans |
//! | `["user-metrics", user_id, range]` | metric history |
//! | `["user-progress", user_id]` | progress figures |
//! | `["user-report", user_id]` | progress report |
//! | `["user-profile"]`, `["user-profile", "goals"]` | own profile and goals |
//! | `["progress-stats", range]` | own progress chart |
//! | `["trainer-stats"]` | trainer dashboard |

pub mod key;
pub mod policy;
pub mod query_cache;

pub use key::{Family, QueryKey};
pub use policy::{stale_families, Write};
pub use query_cache::{QueryCache, QueryState};
