// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in, trainer self-registration and sign-out.

use crate::api::{ApiRequest, TOKEN_PATH};
use crate::cache::Write;
use crate::error::ApiError;
use crate::models::{Credential, Trainer, TrainerPayload};
use crate::FitCoach;

pub struct Auth<'a> {
    fc: &'a FitCoach,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(fc: &'a FitCoach) -> Self {
        Self { fc }
    }

    /// Exchange email and password for a bearer credential and store it.
    ///
    /// Everything cached under a previous session is dropped.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        let request = ApiRequest::post(TOKEN_PATH).form([("username", email), ("password", password)]);
        let credential: Credential = self.fc.client().execute(request).await?;

        self.fc.client().session().save(&credential)?;
        self.fc.cache().clear();

        tracing::info!(
            email = %email,
            role = ?credential.role,
            "Logged in"
        );
        Ok(credential)
    }

    /// Public trainer sign-up (`POST /register/trainer`).
    pub async fn register_trainer(&self, payload: &TrainerPayload) -> Result<Trainer, ApiError> {
        let request = ApiRequest::post("/register/trainer").json(payload)?;
        self.fc.write(Write::CreateTrainer, request).await
    }

    /// Drop the stored credential and every cached read.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.fc.client().session().clear()?;
        self.fc.cache().clear();
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn current(&self) -> Option<Credential> {
        self.fc.credential()
    }
}
