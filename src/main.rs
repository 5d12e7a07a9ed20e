// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitCoach command-line client
//!
//! Signs in (when `FITCOACH_EMAIL` and `FITCOACH_PASSWORD` are set) and logs
//! a summary of the dashboard for the session's role.

use anyhow::Context;
use fitcoach_client::{
    api::ApiClient,
    cache::QueryCache,
    config::Config,
    models::{PlanType, Role, TimeRange},
    resources::Scope,
    session::{FileSessionStore, MemorySessionStore, SessionStore},
    FitCoach,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(api_url = %config.api_url, "Starting FitCoach client");

    let session: Arc<dyn SessionStore> = match &config.session_file {
        Some(path) => {
            let store = FileSessionStore::open(path);
            tracing::info!(path = %store.path().display(), "Using file session store");
            Arc::new(store)
        }
        None => Arc::new(MemorySessionStore::new()),
    };

    let client = ApiClient::new(&config, session)?.with_listener(Arc::new(|login_path: &str| {
        tracing::warn!(login_path, "Session expired, sign in again");
    }));
    let fc = FitCoach::new(client, Arc::new(QueryCache::new(config.stale_after)));

    if let (Ok(email), Ok(password)) = (
        std::env::var("FITCOACH_EMAIL"),
        std::env::var("FITCOACH_PASSWORD"),
    ) {
        fc.auth()
            .login(&email, &password)
            .await
            .context("Login failed")?;
    }

    let Some(credential) = fc.credential() else {
        tracing::info!(
            login_path = %config.login_path,
            "Not signed in; set FITCOACH_EMAIL and FITCOACH_PASSWORD"
        );
        return Ok(());
    };

    tracing::info!(
        role = ?credential.role,
        home = credential.role.unwrap_or(Role::User).home_path(),
        "Signed in"
    );

    match credential.role {
        Some(Role::Admin) => {
            let users = fc.users(Scope::Admin).list().await?;
            let trainers = fc.trainers().list().await?;
            let routines = fc.routines(Scope::Admin).list().await?;
            let plans = fc.nutrition_plans(Scope::Admin).list().await?;
            tracing::info!(
                users = users.len(),
                trainers = trainers.len(),
                routines = routines.len(),
                nutrition_plans = plans.len(),
                "Admin dashboard"
            );
        }
        Some(Role::Trainer) => {
            let stats = fc.dashboard().stats().await?;
            tracing::info!(
                users = stats.total_stats.users,
                active_users = stats.total_stats.active_users,
                workout_plans = stats.total_stats.workout_plans,
                nutrition_plans = stats.total_stats.nutrition_plans,
                workout_completion = stats.completion_rates.workout,
                nutrition_completion = stats.completion_rates.nutrition,
                "Trainer dashboard"
            );
        }
        Some(Role::User) | None => {
            let me = fc.me();
            let profile = me.profile().await?;
            let plans = me.plans().await?;
            let summary = fc.metrics().summary(profile.id, TimeRange::Month).await?;
            tracing::info!(
                email = %profile.email,
                workout_plans = plans.count(PlanType::Workout),
                nutrition_plans = plans.count(PlanType::Nutrition),
                weight_change = ?summary.as_ref().and_then(|s| s.weight_change),
                days_tracked = ?summary.as_ref().map(|s| s.days_tracked),
                "User dashboard"
            );
        }
    }

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitcoach_client=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
