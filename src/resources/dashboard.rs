// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::api::ApiRequest;
use crate::cache::{Family, QueryState};
use crate::error::ApiError;
use crate::models::TrainerStats;
use crate::FitCoach;

/// Aggregates shown on the trainer dashboard.
pub struct TrainerDashboard<'a> {
    fc: &'a FitCoach,
}

impl<'a> TrainerDashboard<'a> {
    pub(crate) fn new(fc: &'a FitCoach) -> Self {
        Self { fc }
    }

    pub async fn stats(&self) -> Result<TrainerStats, ApiError> {
        self.fc
            .read(
                Family::TrainerStats.key(),
                ApiRequest::get("/trainer/dashboard/stats"),
            )
            .await
    }

    pub fn state(&self) -> QueryState<TrainerStats> {
        self.fc.cache().state(&Family::TrainerStats.key())
    }
}
