// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP adapter layer.

pub mod client;
pub mod request;

pub use client::{is_credential_exchange, ApiClient, TOKEN_PATH};
pub use request::{ApiRequest, RequestBody};
