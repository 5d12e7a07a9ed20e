// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trainee accounts, managed by admins (all users) or trainers (their own clients).

use crate::api::ApiRequest;
use crate::cache::{Family, QueryKey, QueryState, Write};
use crate::error::ApiError;
use crate::models::{User, UserPayload};
use crate::resources::Scope;
use crate::FitCoach;

pub struct Users<'a> {
    fc: &'a FitCoach,
    scope: Scope,
}

impl<'a> Users<'a> {
    pub(crate) fn new(fc: &'a FitCoach, scope: Scope) -> Self {
        Self { fc, scope }
    }

    /// `["users", scope]`
    pub fn list_key(&self) -> QueryKey {
        Family::Users.key().with(self.scope)
    }

    /// `["users", scope, id]`
    pub fn item_key(&self, id: u64) -> QueryKey {
        self.list_key().with(id)
    }

    fn collection(&self) -> String {
        format!("{}/users/", self.scope.prefix())
    }

    fn item(&self, id: u64) -> String {
        format!("{}/users/{}", self.scope.prefix(), id)
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.fc
            .read(self.list_key(), ApiRequest::get(self.collection()))
            .await
    }

    pub async fn get(&self, id: u64) -> Result<User, ApiError> {
        self.fc
            .read(self.item_key(id), ApiRequest::get(self.item(id)))
            .await
    }

    pub async fn create(&self, payload: &UserPayload) -> Result<User, ApiError> {
        let request = ApiRequest::post(self.collection()).json(payload)?;
        self.fc.write(Write::CreateUser, request).await
    }

    pub async fn update(&self, id: u64, payload: &UserPayload) -> Result<User, ApiError> {
        let request = ApiRequest::put(self.item(id)).json(payload)?;
        self.fc.write(Write::UpdateUser, request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.fc
            .write_discard(Write::DeleteUser, ApiRequest::delete(self.item(id)))
            .await
    }

    /// View state of the user list.
    pub fn state(&self) -> QueryState<Vec<User>> {
        self.fc.cache().state(&self.list_key())
    }
}
