// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Self-service endpoints for the signed-in user.

use crate::api::ApiRequest;
use crate::cache::{Family, QueryKey, Write};
use crate::error::ApiError;
use crate::models::{Goals, ProgressStats, TimeRange, User, UserPayload, UserPlans};
use crate::FitCoach;

const PROFILE_PATH: &str = "/user/profile/";
const GOALS_PATH: &str = "/goals/user/goals/";

pub struct Me<'a> {
    fc: &'a FitCoach,
}

impl<'a> Me<'a> {
    pub(crate) fn new(fc: &'a FitCoach) -> Self {
        Self { fc }
    }

    pub fn profile_key(&self) -> QueryKey {
        Family::UserProfile.key()
    }

    pub fn goals_key(&self) -> QueryKey {
        Family::UserProfile.key().with("goals")
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        self.fc
            .read(self.profile_key(), ApiRequest::get(PROFILE_PATH))
            .await
    }

    pub async fn update_profile(&self, payload: &UserPayload) -> Result<User, ApiError> {
        let request = ApiRequest::put(PROFILE_PATH).json(payload)?;
        self.fc.write(Write::UpdateProfile, request).await
    }

    /// Plans assigned to the signed-in user (`["user-plans", "me"]`).
    pub async fn plans(&self) -> Result<UserPlans, ApiError> {
        self.fc
            .read(
                Family::UserPlans.key().with("me"),
                ApiRequest::get("/user/plans/"),
            )
            .await
    }

    pub async fn progress_stats(&self, range: TimeRange) -> Result<ProgressStats, ApiError> {
        let request = ApiRequest::get("/user/progress/stats").query("range", range.as_str());
        self.fc
            .read(Family::ProgressStats.key().with(range), request)
            .await
    }

    pub async fn goals(&self) -> Result<Goals, ApiError> {
        self.fc
            .read(self.goals_key(), ApiRequest::get(GOALS_PATH))
            .await
    }

    pub async fn update_goals(&self, goals: &Goals) -> Result<Goals, ApiError> {
        let request = ApiRequest::put(GOALS_PATH).json(goals)?;
        self.fc.write(Write::UpdateGoals, request).await
    }
}
