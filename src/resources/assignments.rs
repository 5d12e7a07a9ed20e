// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Which workout and nutrition plans a user follows.
//!
//! Trainers assign and unassign their own plans to their own clients. Admins
//! can only view a user's plans. Re-assigning a plan the user already has is
//! rejected by the backend, so a user never holds the same plan twice.

use crate::api::ApiRequest;
use crate::cache::{Family, QueryKey, QueryState, Write};
use crate::error::ApiError;
use crate::models::{AssignmentAck, NutritionPlan, PlanType, Routine, UserPlans};
use crate::resources::Scope;
use crate::FitCoach;

pub struct Assignments<'a> {
    fc: &'a FitCoach,
    scope: Scope,
}

impl<'a> Assignments<'a> {
    pub(crate) fn new(fc: &'a FitCoach, scope: Scope) -> Self {
        Self { fc, scope }
    }

    /// `["user-plans", user_id]`
    pub fn plans_key(&self, user_id: u64) -> QueryKey {
        Family::UserPlans.key().with(user_id)
    }

    /// Plans currently assigned to `user_id`.
    pub async fn plans_for(&self, user_id: u64) -> Result<UserPlans, ApiError> {
        let key = self.plans_key(user_id);
        match self.scope {
            Scope::Admin => {
                let request = ApiRequest::get(format!("/admin/users/{}/plans", user_id));
                self.fc.read(key, request).await
            }
            Scope::Trainer => {
                let client = self.fc.client();
                self.fc
                    .cache()
                    .fetch(key, || async move {
                        let workout = client.execute::<Vec<Routine>>(ApiRequest::get(format!(
                            "/trainer/users/{}/workout-plans/",
                            user_id
                        )));
                        let nutrition = client.execute::<Vec<NutritionPlan>>(ApiRequest::get(
                            format!("/trainer/users/{}/nutritional-plans/", user_id),
                        ));
                        let (workout_plans, nutrition_plans) =
                            tokio::try_join!(workout, nutrition)?;
                        serde_json::to_value(UserPlans {
                            workout_plans,
                            nutrition_plans,
                        })
                        .map_err(|e| ApiError::Decode(e.to_string()))
                    })
                    .await
            }
        }
    }

    /// Assign `plan_id` of `plan_type` to `user_id`.
    pub async fn assign(
        &self,
        user_id: u64,
        plan_type: PlanType,
        plan_id: u64,
    ) -> Result<AssignmentAck, ApiError> {
        self.require_trainer()?;
        let request =
            ApiRequest::post(format!("/trainer/assign-{}/{}/{}", plan_type, user_id, plan_id));
        let ack: AssignmentAck = self.fc.write(Write::AssignPlan, request).await?;
        tracing::info!(user_id, plan_type = %plan_type, plan_id, "Plan assigned");
        Ok(ack)
    }

    pub async fn unassign(
        &self,
        user_id: u64,
        plan_type: PlanType,
        plan_id: u64,
    ) -> Result<AssignmentAck, ApiError> {
        self.require_trainer()?;
        let request = ApiRequest::delete(format!(
            "/trainer/unassign-{}/{}/{}",
            plan_type, user_id, plan_id
        ));
        self.fc.write(Write::UnassignPlan, request).await
    }

    pub fn state(&self, user_id: u64) -> QueryState<UserPlans> {
        self.fc.cache().state(&self.plans_key(user_id))
    }

    fn require_trainer(&self) -> Result<(), ApiError> {
        match self.scope {
            Scope::Trainer => Ok(()),
            Scope::Admin => Err(ApiError::Forbidden(
                "plans are assigned by the user's trainer".to_string(),
            )),
        }
    }
}
