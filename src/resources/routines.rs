// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout routines.
//!
//! Admins see every routine under `/admin/routines/`; trainers see their
//! own under `/trainer/workout-plans/`. Both share the `routines` family.

use crate::api::ApiRequest;
use crate::cache::{Family, QueryKey, QueryState, Write};
use crate::error::ApiError;
use crate::models::{Routine, RoutinePayload};
use crate::resources::{validate, Scope};
use crate::FitCoach;

pub struct Routines<'a> {
    fc: &'a FitCoach,
    scope: Scope,
}

impl<'a> Routines<'a> {
    pub(crate) fn new(fc: &'a FitCoach, scope: Scope) -> Self {
        Self { fc, scope }
    }

    /// `["routines", scope]`
    pub fn list_key(&self) -> QueryKey {
        Family::Routines.key().with(self.scope)
    }

    fn item(&self, id: u64) -> String {
        format!("{}{}", self.scope.routines_path(), id)
    }

    pub async fn list(&self) -> Result<Vec<Routine>, ApiError> {
        self.fc
            .read(self.list_key(), ApiRequest::get(self.scope.routines_path()))
            .await
    }

    pub async fn get(&self, id: u64) -> Result<Routine, ApiError> {
        self.fc
            .read(self.list_key().with(id), ApiRequest::get(self.item(id)))
            .await
    }

    /// Create a routine. The payload is validated locally first; an invalid
    /// payload never reaches the backend.
    pub async fn create(&self, payload: &RoutinePayload) -> Result<Routine, ApiError> {
        validate(payload)?;
        let request = ApiRequest::post(self.scope.routines_path()).json(payload)?;
        self.fc.write(Write::CreateRoutine, request).await
    }

    pub async fn update(&self, id: u64, payload: &RoutinePayload) -> Result<Routine, ApiError> {
        validate(payload)?;
        let request = ApiRequest::put(self.item(id)).json(payload)?;
        self.fc.write(Write::UpdateRoutine, request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.fc
            .write_discard(Write::DeleteRoutine, ApiRequest::delete(self.item(id)))
            .await
    }

    pub fn state(&self) -> QueryState<Vec<Routine>> {
        self.fc.cache().state(&self.list_key())
    }
}
