// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Validation failures surface verbatim and never touch the cache.

use fitcoach_client::error::ApiError;
use fitcoach_client::forms::RoutineDraft;
use fitcoach_client::models::{RoutinePayload, UserPayload};
use fitcoach_client::resources::Scope;

mod common;
use common::MockBackend;

#[tokio::test]
async fn test_backend_422_detail_is_verbatim() {
    let backend = MockBackend::start().await;
    let fc = backend.fitcoach();
    let users = fc.users(Scope::Admin);

    let before = users.list().await.unwrap();

    let payload = UserPayload {
        full_name: Some("No Email".to_string()),
        ..UserPayload::default()
    };
    let err = users.create(&payload).await.unwrap_err();

    assert!(err.is_validation_error());
    assert_eq!(err.detail(), Some("email required"));
    assert_eq!(err.message(), "email required");

    // Cached list still fresh and unchanged.
    assert!(!fc.cache().is_stale(&users.list_key()));
    let after = users.list().await.unwrap();
    assert_eq!(before, after);
    assert_eq!(backend.hits("GET", "/admin/users/"), 1);
}

#[tokio::test]
async fn test_invalid_routine_rejected_locally() {
    let backend = MockBackend::start().await;
    let fc = backend.fitcoach();

    let payload = RoutinePayload {
        name: String::new(),
        description: None,
        trainer_id: None,
        exercises: Vec::new(),
    };
    let err = fc.routines(Scope::Trainer).create(&payload).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(backend.hits("POST", "/trainer/workout-plans/"), 0);
}

#[tokio::test]
async fn test_blank_draft_never_reaches_backend() {
    let draft = RoutineDraft::default();
    let errors = draft.into_payload().unwrap_err();
    assert!(errors.field_errors().contains_key("name"));
}
