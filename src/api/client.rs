// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client adapter for the coaching backend.
//!
//! Handles:
//! - Base URL and default headers
//! - Bearer credential injection from the session store
//! - Form encoding for the credential-exchange endpoint
//! - Session expiry on 401 (once per call)
//! - Mapping error statuses to `ApiError` with the backend's detail

use crate::api::request::{ApiRequest, RequestBody};
use crate::config::Config;
use crate::error::ApiError;
use crate::session::{SessionListener, SessionStore};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Credential-exchange endpoint; the only form-encoded path.
pub const TOKEN_PATH: &str = "/token";

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Single request-issuing object every resource handle routes through.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    login_path: String,
    session: Arc<dyn SessionStore>,
    listener: Option<Arc<dyn SessionListener>>,
}

impl ApiClient {
    /// Create a client for `config.api_url` reading credentials from `session`.
    pub fn new(config: &Config, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                ApiError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            login_path: config.login_path.clone(),
            session,
            listener: None,
        })
    }

    /// Register the collaborator told about expired sessions.
    pub fn with_listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issue `request` and return the decoded JSON body (`null` if empty).
    ///
    /// Takes the request mutably because the 401 handler records on it that
    /// the call has been through session expiry; a second 401 on the same
    /// request returns `Unauthorized` without clearing or notifying again.
    pub async fn send(&self, request: &mut ApiRequest) -> Result<Value, ApiError> {
        let response = self.dispatch(request).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("{} {}: {}", request.method, request.path, e)))
    }

    /// Issue `request` and return the raw body, for binary downloads.
    pub async fn download(&self, request: &mut ApiRequest) -> Result<Vec<u8>, ApiError> {
        let response = self.dispatch(request).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Send `request`, returning the response only if its status is 2xx.
    async fn dispatch(&self, request: &mut ApiRequest) -> Result<reqwest::Response, ApiError> {
        let url = self.url(&request.path);
        let form_encoded = is_credential_exchange(&request.path)
            || matches!(request.body, Some(RequestBody::Form(_)));

        let mut builder = self.http.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(credential) = self.session.load() {
            builder = builder.bearer_auth(&credential.access_token);
        }

        builder = match (&request.body, form_encoded) {
            (Some(body), true) => builder.form(&body.to_form_fields()),
            (Some(RequestBody::Json(value)), false) => builder.json(value),
            _ => builder,
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(if form_encoded {
                FORM_CONTENT_TYPE
            } else {
                JSON_CONTENT_TYPE
            }),
        );
        for (name, value) in &request.headers {
            headers.insert(name.clone(), value.clone());
        }
        builder = builder.headers(headers);

        tracing::debug!(method = %request.method, path = %request.path, "Sending request");

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(path = %request.path, error = %e, "Request failed");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(self.handle_unauthorized(request));
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);

        if err.is_validation_error() {
            tracing::warn!(path = %request.path, detail = ?err.detail(), "Validation error");
        } else {
            tracing::debug!(path = %request.path, status = %status, "Backend returned error");
        }

        Err(err)
    }

    /// Issue `request` and decode the body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<T, ApiError> {
        let value = self.send(&mut request).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn handle_unauthorized(&self, request: &mut ApiRequest) -> ApiError {
        if request.is_retried() {
            tracing::debug!(path = %request.path, "401 on retried call, not expiring session again");
            return ApiError::Unauthorized;
        }
        request.mark_retried();

        tracing::warn!(path = %request.path, "Session expired, clearing credential");
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "Failed to clear session credential");
        }

        if let Some(listener) = &self.listener {
            listener.session_expired(&self.login_path);
        }

        ApiError::SessionExpired
    }
}

/// True for the form-encoded credential-exchange endpoint.
pub fn is_credential_exchange(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    path.trim_end_matches('/') == TOKEN_PATH
}
