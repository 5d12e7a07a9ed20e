// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer injection, content types and 401 session expiry in the adapter.

use fitcoach_client::api::{ApiClient, ApiRequest};
use fitcoach_client::error::ApiError;
use fitcoach_client::models::{Credential, Role, UserPayload};
use fitcoach_client::resources::Scope;
use fitcoach_client::session::{MemorySessionStore, SessionStore};
use fitcoach_client::FitCoach;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

mod common;
use common::{MockBackend, VALID_PASSWORD, VALID_TOKEN};

/// Adapter with a listener that records each login path it is sent.
fn client_with_listener(
    backend: &MockBackend,
    session: Arc<dyn SessionStore>,
) -> (ApiClient, Arc<Mutex<Vec<String>>>) {
    let redirects = Arc::new(Mutex::new(Vec::new()));
    let seen = redirects.clone();
    let client = ApiClient::new(&backend.config(), session)
        .unwrap()
        .with_listener(Arc::new(move |login_path: &str| {
            seen.lock().unwrap().push(login_path.to_string());
        }));
    (client, redirects)
}

#[tokio::test]
async fn test_stored_credential_sent_as_bearer() {
    let backend = MockBackend::start().await;
    let session = Arc::new(MemorySessionStore::with_credential(Credential::bearer("abc")));
    let fc = backend.fitcoach_with(session);

    fc.routines(Scope::Admin).list().await.unwrap();

    let seen = backend.last_request("/admin/routines/").unwrap();
    assert_eq!(seen.authorization.as_deref(), Some("Bearer abc"));
}

#[tokio::test]
async fn test_no_credential_no_auth_header() {
    let backend = MockBackend::start().await;
    let fc = backend.fitcoach_with(Arc::new(MemorySessionStore::new()));

    fc.routines(Scope::Trainer).list().await.unwrap();

    let seen = backend.last_request("/trainer/workout-plans/").unwrap();
    assert!(seen.authorization.is_none());
}

#[tokio::test]
async fn test_token_endpoint_is_form_encoded() {
    let backend = MockBackend::start().await;
    let fc = backend.fitcoach_with(Arc::new(MemorySessionStore::new()));

    let credential = fc
        .auth()
        .login("coach@example.com", VALID_PASSWORD)
        .await
        .unwrap();
    assert_eq!(credential.access_token, VALID_TOKEN);
    assert_eq!(credential.role, Some(Role::Trainer));
    assert_eq!(fc.credential(), Some(credential));

    let seen = backend.last_request("/token").unwrap();
    assert_eq!(
        seen.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
}

#[tokio::test]
async fn test_other_writes_are_json() {
    let backend = MockBackend::start().await;
    let fc = backend.fitcoach();

    let payload = UserPayload {
        email: Some("new@example.com".to_string()),
        password: Some("pw".to_string()),
        ..UserPayload::default()
    };
    let user = fc.users(Scope::Admin).create(&payload).await.unwrap();
    assert_eq!(user.email, "new@example.com");

    let seen = backend.last_request("/admin/users/").unwrap();
    assert_eq!(seen.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_401_clears_session_and_notifies_once() {
    let backend = MockBackend::start().await;
    let session: Arc<dyn SessionStore> =
        Arc::new(MemorySessionStore::with_credential(Credential::bearer("expired")));
    let (client, redirects) = client_with_listener(&backend, session.clone());

    let mut request = ApiRequest::get("/user/profile/");
    let err = client.send(&mut request).await.unwrap_err();

    assert!(matches!(err, ApiError::SessionExpired));
    assert!(request.is_retried());
    assert!(session.load().is_none());
    assert_eq!(*redirects.lock().unwrap(), vec!["/login".to_string()]);

    // The same call failing again must not loop back into expiry handling.
    session.save(&Credential::bearer("still-bad")).unwrap();
    let err = client.send(&mut request).await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert_eq!(redirects.lock().unwrap().len(), 1);
    assert_eq!(session.load(), Some(Credential::bearer("still-bad")));
}

#[tokio::test]
async fn test_each_new_call_gets_own_expiry() {
    let backend = MockBackend::start().await;
    let (client, redirects) =
        client_with_listener(&backend, Arc::new(MemorySessionStore::new()));

    for _ in 0..2 {
        let err = client
            .execute::<serde_json::Value>(ApiRequest::get("/user/profile/"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::SessionExpired));
    }
    assert_eq!(redirects.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_rejected_login_expires_stored_session() {
    let backend = MockBackend::start().await;
    let session: Arc<dyn SessionStore> =
        Arc::new(MemorySessionStore::with_credential(Credential::bearer("old")));
    let (client, redirects) = client_with_listener(&backend, session.clone());
    let fc = FitCoach::new(client, Arc::default());

    let err = fc
        .auth()
        .login("coach@example.com", "wrong")
        .await
        .unwrap_err();

    // A 401 from /token is handled like any other first 401.
    assert!(matches!(err, ApiError::SessionExpired));
    assert!(session.load().is_none());
    assert_eq!(*redirects.lock().unwrap(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn test_logout_clears_session_and_cache() {
    let backend = MockBackend::start().await;
    let fc = backend.fitcoach();

    fc.routines(Scope::Admin).list().await.unwrap();
    assert!(!fc.cache().is_empty());

    fc.auth().logout().unwrap();
    assert!(fc.credential().is_none());
    assert!(fc.cache().is_empty());
}

#[tokio::test]
async fn test_listener_closure_counts() {
    let backend = MockBackend::start().await;
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let client = ApiClient::new(&backend.config(), Arc::new(MemorySessionStore::new()))
        .unwrap()
        .with_listener(Arc::new(move |_: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
    let fc = FitCoach::new(client, Arc::default());

    let err = fc.me().profile().await.unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
