// SPDX-License-Identifier: MIT OR Apache-2.0
//! REST API handlers for health and QR factorization.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::auth::{self, Claims};
use crate::config::ServerConfig;
use crate::matrix;
use crate::rest::error::{ApiError, ApiResult};
use crate::rest::types::{HealthResponse, QrRequest, QrResponse};
use crate::rest::{ApiContext, SERVICE_NAME};

fn authorize(headers: &HeaderMap, config: &ServerConfig) -> Result<Claims, ApiError> {
    let token =
        auth::bearer_token(headers).map_err(|e| ApiError::unauthorized(e.to_string()))?;
    auth::verify_token(token, &config.jwt_secret)
        .map_err(|e| ApiError::unauthorized(e.to_string()))
}

/// Health check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// Validate and factorize a matrix, forwarding the factors downstream.
///
/// Requires a valid bearer token. The downstream statistics call is best
/// effort: any failure is logged and the `statistics` field omitted.
pub async fn factorize(
    State(ctx): State<Arc<ApiContext>>,
    headers: HeaderMap,
    payload: Result<Json<QrRequest>, JsonRejection>,
) -> ApiResult<QrResponse> {
    let claims = authorize(&headers, &ctx.config)?;

    let Json(request) =
        payload.map_err(|_| ApiError::bad_request("invalid request format"))?;

    matrix::validate(&request.matrix).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let (q, r) =
        matrix::qr_factorize(&request.matrix).map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::debug!(
        username = %claims.username,
        rows = request.matrix.len(),
        cols = request.matrix[0].len(),
        "computed QR factorization"
    );

    // Forward the caller's raw Authorization header to the collaborator.
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let statistics = match ctx.stats.post_statistics(&q, &r, auth_header).await {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::warn!("Failed to get statistics: {e}");
            None
        },
    };

    Ok(Json(QrResponse {
        original: request.matrix,
        q,
        r,
        statistics,
    }))
}
