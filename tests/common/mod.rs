// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the coaching backend.
//!
//! Serves a small fixed data set on 127.0.0.1 and records every request
//! (method, path, Authorization and Content-Type headers) so tests can count
//! network calls per path.

use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Form, Json, Router};
use dashmap::DashMap;
use fitcoach_client::config::Config;
use fitcoach_client::models::Credential;
use fitcoach_client::session::{MemorySessionStore, SessionStore};
use fitcoach_client::FitCoach;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Token the mock accepts as a valid session.
#[allow(dead_code)]
pub const VALID_TOKEN: &str = "abc";

/// Password the mock accepts at `/token`.
#[allow(dead_code)]
pub const VALID_PASSWORD: &str = "secret";

/// One request as seen by the mock.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
pub struct MockState {
    hits: DashMap<String, usize>,
    seen: Mutex<Vec<SeenRequest>>,
    delay: Mutex<Duration>,
    routines: Mutex<Vec<Value>>,
    users: Mutex<Vec<Value>>,
    metrics: Mutex<Vec<Value>>,
    /// Status every route answers with instead of its normal response
    failure: Mutex<Option<StatusCode>>,
    /// (user, plan type, plan); assigning a pair twice is rejected
    assignments: Mutex<HashSet<(u64, &'static str, u64)>>,
}

pub struct MockBackend {
    pub url: String,
    pub state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        seed(&state);

        let app = Router::new()
            .route("/token", post(token))
            .route("/admin/routines/", get(list_routines))
            .route("/admin/routines/{id}", delete(delete_routine))
            .route("/trainer/workout-plans/", get(list_routines))
            .route("/admin/users/", get(list_users).post(create_user))
            .route("/user/profile/", get(profile))
            .route(
                "/metrics/user/{id}/metrics",
                get(list_metrics).post(record_metrics),
            )
            .route("/metrics/user/{id}/progress", get(progress))
            .route("/metrics/user/{id}/report", get(report))
            .route("/trainer/assign-workout/{user}/{plan}", post(assign_workout))
            .route(
                "/trainer/assign-nutrition/{user}/{plan}",
                post(assign_nutrition),
            )
            .route(
                "/trainer/unassign-workout/{user}/{plan}",
                delete(unassign_workout),
            )
            .route("/trainer/users/{id}/workout-plans/", get(user_workout_plans))
            .route(
                "/trainer/users/{id}/nutritional-plans/",
                get(user_nutrition_plans),
            )
            .route("/trainer/dashboard/stats", get(dashboard_stats))
            .layer(axum::middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("No local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend failed");
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self) -> Config {
        Config::for_base_url(self.url.clone())
    }

    /// Client with a fresh cache and the given session store.
    pub fn fitcoach_with(&self, session: Arc<dyn SessionStore>) -> FitCoach {
        FitCoach::from_config(&self.config(), session).expect("Failed to build client")
    }

    /// Client already holding the valid token.
    pub fn fitcoach(&self) -> FitCoach {
        self.fitcoach_with(Arc::new(MemorySessionStore::with_credential(
            Credential::bearer(VALID_TOKEN),
        )))
    }

    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.state
            .hits
            .get(&format!("{} {}", method, path))
            .map(|h| *h)
            .unwrap_or(0)
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }

    pub fn last_request(&self, path: &str) -> Option<SeenRequest> {
        self.seen().into_iter().rev().find(|r| r.path == path)
    }

    /// Delay applied to every response.
    pub fn set_delay(&self, delay: Duration) {
        *self.state.delay.lock().unwrap() = delay;
    }

    /// Answer every request with `status` (after any delay).
    pub fn set_failure(&self, status: Option<StatusCode>) {
        *self.state.failure.lock().unwrap() = status;
    }

    /// Active assignments for `user` and plan type (`"workout"`/`"nutrition"`).
    pub fn assignment_count(&self, user: u64, plan_type: &str) -> usize {
        self.state
            .assignments
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, t, _)| *u == user && *t == plan_type)
            .count()
    }
}

fn seed(state: &MockState) {
    *state.routines.lock().unwrap() = vec![
        json!({"id": 1, "name": "Leg Day", "exercises": [
            {"id": 10, "name": "Squat", "sets": 5, "reps": 5, "rest_time": 180}
        ]}),
        json!({"id": 2, "name": "Push Day", "exercises": []}),
    ];
    *state.users.lock().unwrap() = vec![json!({"id": 42, "email": "ana@example.com", "trainer_id": 7})];
    *state.metrics.lock().unwrap() = vec![
        json!({"id": 2, "user_id": 42, "date": "2026-02-01", "weight": 78.4, "body_fat": 18.0, "height": 1.8}),
        json!({"id": 1, "user_id": 42, "date": "2026-01-01", "weight": 80.0, "body_fat": 20.5, "height": 1.8, "bmi": 24.69}),
    ];
}

async fn record(State(state): State<Arc<MockState>>, req: Request, next: Next) -> Response {
    // Request borrows must end before the first await: Body is !Sync.
    let seen = {
        let header_str = |name: header::HeaderName| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        SeenRequest {
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            authorization: header_str(header::AUTHORIZATION),
            content_type: header_str(header::CONTENT_TYPE),
        }
    };
    *state
        .hits
        .entry(format!("{} {}", seen.method, seen.path))
        .or_insert(0) += 1;
    state.seen.lock().unwrap().push(seen);

    let delay = *state.delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let failure = *state.failure.lock().unwrap();
    if let Some(status) = failure {
        return detail(status, "Error interno del servidor");
    }
    next.run(req).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", VALID_TOKEN))
}

async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
    if form.get("password").map(String::as_str) != Some(VALID_PASSWORD) {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect email or password");
    }
    Json(json!({
        "access_token": VALID_TOKEN,
        "token_type": "bearer",
        "role": "trainer",
        "user": {"id": 7, "email": form.get("username"), "full_name": "Coach Carter"}
    }))
    .into_response()
}

async fn list_routines(State(state): State<Arc<MockState>>) -> Json<Vec<Value>> {
    Json(state.routines.lock().unwrap().clone())
}

async fn delete_routine(State(state): State<Arc<MockState>>, Path(id): Path<u64>) -> Response {
    let mut routines = state.routines.lock().unwrap();
    let before = routines.len();
    routines.retain(|r| r["id"] != json!(id));
    if routines.len() == before {
        return detail(StatusCode::NOT_FOUND, "Rutina no encontrada");
    }
    Json(json!({"message": "Rutina eliminada"})).into_response()
}

async fn list_users(State(state): State<Arc<MockState>>) -> Json<Vec<Value>> {
    Json(state.users.lock().unwrap().clone())
}

async fn create_user(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    if body.get("email").and_then(Value::as_str).is_none() {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "email required");
    }
    let mut users = state.users.lock().unwrap();
    let mut user = body;
    user["id"] = json!(100 + users.len());
    if let Some(obj) = user.as_object_mut() {
        obj.remove("password");
    }
    users.push(user.clone());
    Json(user).into_response()
}

async fn profile(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }
    Json(json!({"id": 42, "email": "ana@example.com", "full_name": "Ana"})).into_response()
}

async fn list_metrics(State(state): State<Arc<MockState>>, Path(id): Path<u64>) -> Json<Vec<Value>> {
    Json(
        state
            .metrics
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m["user_id"] == json!(id))
            .cloned()
            .collect(),
    )
}

async fn record_metrics(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut metrics = state.metrics.lock().unwrap();
    let mut snapshot = body;
    snapshot["id"] = json!(metrics.len() + 1);
    snapshot["user_id"] = json!(id);
    snapshot["date"] = json!("2026-03-01");
    metrics.insert(0, snapshot.clone());
    Json(snapshot)
}

async fn progress(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({
        "user_id": id,
        "total_workouts": 10,
        "completed_workouts": 7,
        "completion_rate": 70.0,
        "initial_weight": 80.0,
        "current_weight": 78.4,
        "weight_change": -1.6
    }))
}

async fn report() -> Response {
    (
        [(header::CONTENT_TYPE, "application/pdf")],
        b"%PDF-1.4 mock report".to_vec(),
    )
        .into_response()
}

fn assign(state: &MockState, user: u64, plan_type: &'static str, plan: u64) -> Response {
    if !state
        .assignments
        .lock()
        .unwrap()
        .insert((user, plan_type, plan))
    {
        return detail(
            StatusCode::BAD_REQUEST,
            "El plan ya está asignado a este usuario",
        );
    }
    Json(json!({"message": "Plan asignado exitosamente"})).into_response()
}

async fn assign_workout(
    State(state): State<Arc<MockState>>,
    Path((user, plan)): Path<(u64, u64)>,
) -> Response {
    assign(&state, user, "workout", plan)
}

async fn assign_nutrition(
    State(state): State<Arc<MockState>>,
    Path((user, plan)): Path<(u64, u64)>,
) -> Response {
    assign(&state, user, "nutrition", plan)
}

async fn unassign_workout(
    State(state): State<Arc<MockState>>,
    Path((user, plan)): Path<(u64, u64)>,
) -> Response {
    if !state
        .assignments
        .lock()
        .unwrap()
        .remove(&(user, "workout", plan))
    {
        return detail(StatusCode::NOT_FOUND, "Plan no asignado");
    }
    Json(json!({"message": "Plan desasignado exitosamente"})).into_response()
}

async fn user_workout_plans(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
) -> Json<Vec<Value>> {
    let plans = assigned(&state, id, "workout");
    let routines = state.routines.lock().unwrap();
    Json(
        routines
            .iter()
            .filter(|r| plans.iter().any(|p| r["id"] == json!(p)))
            .cloned()
            .collect(),
    )
}

async fn user_nutrition_plans(
    State(state): State<Arc<MockState>>,
    Path(id): Path<u64>,
) -> Json<Vec<Value>> {
    Json(
        assigned(&state, id, "nutrition")
            .into_iter()
            .map(|p| json!({"id": p, "name": format!("Plan {}", p), "meals": []}))
            .collect(),
    )
}

fn assigned(state: &MockState, user: u64, plan_type: &str) -> Vec<u64> {
    let mut plans: Vec<u64> = state
        .assignments
        .lock()
        .unwrap()
        .iter()
        .filter(|(u, t, _)| *u == user && *t == plan_type)
        .map(|(_, _, p)| *p)
        .collect();
    plans.sort_unstable();
    plans
}

async fn dashboard_stats(State(state): State<Arc<MockState>>) -> Json<Value> {
    let assigned = state.assignments.lock().unwrap().len();
    Json(json!({
        "total_stats": {
            "users": state.users.lock().unwrap().len(),
            "workout_plans": state.routines.lock().unwrap().len(),
            "nutrition_plans": 0,
            "active_users": assigned
        },
        "completion_rates": {"workout": 70.0, "nutrition": 50.0}
    }))
}
