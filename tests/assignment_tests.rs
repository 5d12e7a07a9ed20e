// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fitcoach_client::error::ApiError;
use fitcoach_client::models::PlanType;
use fitcoach_client::resources::Scope;

mod common;
use common::MockBackend;

#[tokio::test]
async fn test_assign_twice_keeps_one_assignment() {
    let backend = MockBackend::start().await;
    let fc = backend.fitcoach();
    let assignments = fc.assignments(Scope::Trainer);

    assignments.assign(42, PlanType::Workout, 1).await.unwrap();
    let plans = assignments.plans_for(42).await.unwrap();
    assert_eq!(plans.count(PlanType::Workout), 1);

    let err = assignments
        .assign(42, PlanType::Workout, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(err.detail(), Some("El plan ya está asignado a este usuario"));

    // The rejected write leaves the cached plan view fresh.
    assert!(!fc.cache().is_stale(&assignments.plans_key(42)));
    let plans = assignments.plans_for(42).await.unwrap();
    assert_eq!(backend.hits("GET", "/trainer/users/42/workout-plans/"), 1);
    assert_eq!(plans.count(PlanType::Workout), 1);
    assert_eq!(plans.workout_plans[0].name, "Leg Day");
    assert_eq!(backend.assignment_count(42, "workout"), 1);
}

#[tokio::test]
async fn test_assignment_refreshes_plan_view() {
    let backend = MockBackend::start().await;
    let fc = backend.fitcoach();
    let assignments = fc.assignments(Scope::Trainer);

    let plans = assignments.plans_for(42).await.unwrap();
    assert_eq!(plans.count(PlanType::Nutrition), 0);

    let ack = assignments.assign(42, PlanType::Nutrition, 5).await.unwrap();
    assert!(!ack.message.is_empty());

    let plans = assignments.plans_for(42).await.unwrap();
    assert_eq!(plans.count(PlanType::Nutrition), 1);
    assert_eq!(backend.hits("GET", "/trainer/users/42/nutritional-plans/"), 2);
    assert_eq!(backend.hits("GET", "/trainer/users/42/workout-plans/"), 2);
}

#[tokio::test]
async fn test_unassign() {
    let backend = MockBackend::start().await;
    let fc = backend.fitcoach();
    let assignments = fc.assignments(Scope::Trainer);

    assignments.assign(42, PlanType::Workout, 2).await.unwrap();
    assignments.unassign(42, PlanType::Workout, 2).await.unwrap();
    assert_eq!(backend.assignment_count(42, "workout"), 0);

    let err = assignments
        .unassign(42, PlanType::Workout, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_admin_cannot_assign() {
    let backend = MockBackend::start().await;
    let fc = backend.fitcoach();

    let err = fc
        .assignments(Scope::Admin)
        .assign(42, PlanType::Workout, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    assert!(backend.seen().is_empty());
}
