// SPDX-License-Identifier: MIT OR Apache-2.0
//! REST API handler for login.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::auth;
use crate::rest::error::{ApiError, ApiResult};
use crate::rest::types::{LoginRequest, LoginResponse};
use crate::rest::ApiContext;

/// Authenticate a user and issue a bearer token.
///
/// When administrator credentials are configured, the supplied pair must
/// match exactly. Otherwise any non-empty pair is accepted: open demo mode,
/// a deliberate relaxation documented in the configuration module.
pub async fn login(
    State(ctx): State<Arc<ApiContext>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) =
        payload.map_err(|_| ApiError::bad_request("invalid request body"))?;

    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("username and password are required"));
    }

    if let Some(admin) = &ctx.config.admin {
        if !admin.matches(&request.username, &request.password) {
            return Err(ApiError::unauthorized("invalid username or password"));
        }
    }

    let token = auth::issue_token(&request.username, &ctx.config.jwt_secret).map_err(|e| {
        tracing::error!("Failed to generate token: {e}");
        ApiError::internal("failed to generate token")
    })?;

    Ok(Json(LoginResponse { token }))
}
