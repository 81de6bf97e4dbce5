// SPDX-License-Identifier: MIT OR Apache-2.0
//! Outbound client for the downstream statistics service.
//!
//! The collaborator receives the computed factors and returns aggregate
//! statistics over them. Every transport or decoding failure is surfaced as
//! an error here; callers degrade gracefully by omitting statistics from the
//! response rather than failing the request.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};
use crate::matrix::Matrix;

/// Statistics request payload: the two computed factors.
#[derive(Debug, Serialize)]
struct StatisticsRequest<'a> {
    #[serde(rename = "Q")]
    q: &'a Matrix,
    #[serde(rename = "R")]
    r: &'a Matrix,
}

/// Per-factor diagonality flags reported by the statistics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsDiagonal {
    /// Whether Q is diagonal.
    #[serde(rename = "Q")]
    pub q: bool,
    /// Whether R is diagonal.
    #[serde(rename = "R")]
    pub r: bool,
}

/// Aggregate statistics over the factor entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResponse {
    /// Largest entry.
    pub max: f64,
    /// Smallest entry.
    pub min: f64,
    /// Mean of all entries.
    pub average: f64,
    /// Sum of all entries.
    pub sum: f64,
    /// Diagonality of each factor.
    #[serde(rename = "isDiagonal")]
    pub is_diagonal: IsDiagonal,
}

/// HTTP client for the statistics collaborator.
#[derive(Debug, Clone)]
pub struct StatisticsClient {
    client: reqwest::Client,
    base_url: String,
}

impl StatisticsClient {
    /// Create a client for the given base URL with a bounded request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Statistics` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServerError::Statistics(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Post the computed factors and the caller's authorization header to the
    /// statistics service.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Statistics` on connect failure, timeout,
    /// non-success status, or an undecodable response body.
    pub async fn post_statistics(
        &self,
        q: &Matrix,
        r: &Matrix,
        auth_header: &str,
    ) -> Result<StatisticsResponse> {
        let url = format!("{}/api/v1/statistics", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", auth_header)
            .json(&StatisticsRequest { q, r })
            .send()
            .await
            .map_err(|e| ServerError::Statistics(format!("failed to send request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServerError::Statistics(format!(
                "statistics API returned status {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ServerError::Statistics(format!("failed to decode response: {e}")))
    }
}
