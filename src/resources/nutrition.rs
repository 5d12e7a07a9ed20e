// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use crate::api::ApiRequest;
use crate::cache::{Family, QueryKey, QueryState, Write};
use crate::error::ApiError;
use crate::models::{NutritionPlan, NutritionPlanPayload};
use crate::resources::{validate, Scope};
use crate::FitCoach;

/// Nutrition plans under `{scope}/nutrition-plans/`.
pub struct NutritionPlans<'a> {
    fc: &'a FitCoach,
    scope: Scope,
}

impl<'a> NutritionPlans<'a> {
    pub(crate) fn new(fc: &'a FitCoach, scope: Scope) -> Self {
        Self { fc, scope }
    }

    pub fn list_key(&self) -> QueryKey {
        Family::NutritionPlans.key().with(self.scope)
    }

    fn collection(&self) -> String {
        format!("{}/nutrition-plans/", self.scope.prefix())
    }

    fn item(&self, id: u64) -> String {
        format!("{}/nutrition-plans/{}", self.scope.prefix(), id)
    }

    pub async fn list(&self) -> Result<Vec<NutritionPlan>, ApiError> {
        self.fc
            .read(self.list_key(), ApiRequest::get(self.collection()))
            .await
    }

    pub async fn get(&self, id: u64) -> Result<NutritionPlan, ApiError> {
        self.fc
            .read(self.list_key().with(id), ApiRequest::get(self.item(id)))
            .await
    }

    pub async fn create(&self, payload: &NutritionPlanPayload) -> Result<NutritionPlan, ApiError> {
        validate(payload)?;
        let request = ApiRequest::post(self.collection()).json(payload)?;
        self.fc.write(Write::CreateNutritionPlan, request).await
    }

    pub async fn update(
        &self,
        id: u64,
        payload: &NutritionPlanPayload,
    ) -> Result<NutritionPlan, ApiError> {
        validate(payload)?;
        let request = ApiRequest::put(self.item(id)).json(payload)?;
        self.fc.write(Write::UpdateNutritionPlan, request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.fc
            .write_discard(Write::DeleteNutritionPlan, ApiRequest::delete(self.item(id)))
            .await
    }

    pub fn state(&self) -> QueryState<Vec<NutritionPlan>> {
        self.fc.cache().state(&self.list_key())
    }
}
