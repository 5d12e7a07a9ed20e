// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trainer accounts (admin only).

use crate::api::ApiRequest;
use crate::cache::{Family, QueryKey, QueryState, Write};
use crate::error::ApiError;
use crate::models::{Trainer, TrainerPayload};
use crate::FitCoach;

const TRAINERS_PATH: &str = "/admin/trainers/";

pub struct Trainers<'a> {
    fc: &'a FitCoach,
}

impl<'a> Trainers<'a> {
    pub(crate) fn new(fc: &'a FitCoach) -> Self {
        Self { fc }
    }

    pub fn list_key(&self) -> QueryKey {
        Family::Trainers.key()
    }

    pub async fn list(&self) -> Result<Vec<Trainer>, ApiError> {
        self.fc
            .read(self.list_key(), ApiRequest::get(TRAINERS_PATH))
            .await
    }

    pub async fn get(&self, id: u64) -> Result<Trainer, ApiError> {
        self.fc
            .read(
                self.list_key().with(id),
                ApiRequest::get(format!("{}{}", TRAINERS_PATH, id)),
            )
            .await
    }

    pub async fn create(&self, payload: &TrainerPayload) -> Result<Trainer, ApiError> {
        let request = ApiRequest::post(TRAINERS_PATH).json(payload)?;
        self.fc.write(Write::CreateTrainer, request).await
    }

    pub async fn update(&self, id: u64, payload: &TrainerPayload) -> Result<Trainer, ApiError> {
        let request = ApiRequest::put(format!("{}{}", TRAINERS_PATH, id)).json(payload)?;
        self.fc.write(Write::UpdateTrainer, request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let request = ApiRequest::delete(format!("{}{}", TRAINERS_PATH, id));
        self.fc.write_discard(Write::DeleteTrainer, request).await
    }

    pub fn state(&self) -> QueryState<Vec<Trainer>> {
        self.fc.cache().state(&self.list_key())
    }
}
