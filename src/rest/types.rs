// SPDX-License-Identifier: MIT OR Apache-2.0
//! REST API request and response types.

use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;
use crate::stats::StatisticsResponse;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service health status.
    pub status: String,
    /// Service name.
    pub service: String,
}

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Login response carrying the issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token, valid for 24 hours.
    pub token: String,
}

/// QR factorization request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrRequest {
    /// Input matrix, row-major.
    pub matrix: Matrix,
}

/// QR factorization response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrResponse {
    /// The input matrix, echoed back.
    pub original: Matrix,
    /// Orthonormal factor, rows×cols.
    #[serde(rename = "Q")]
    pub q: Matrix,
    /// Upper-triangular factor, cols×cols.
    #[serde(rename = "R")]
    pub r: Matrix,
    /// Downstream statistics, omitted when the collaborator is unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<StatisticsResponse>,
}
