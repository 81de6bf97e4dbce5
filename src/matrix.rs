// SPDX-License-Identifier: MIT OR Apache-2.0
//! Matrix validation and economic QR factorization.
//!
//! The validator and factorizer are pure functions with no I/O or shared
//! state, safe to call concurrently from any number of request handlers.

use faer::Mat;

use crate::error::{Result, ServerError};

/// Row-major matrix of 64-bit floats. Immutable once validated.
pub type Matrix = Vec<Vec<f64>>;

/// Validate a candidate matrix for QR factorization.
///
/// # Errors
///
/// Returns `ServerError::InvalidMatrix` when the matrix is empty, has an
/// empty first row, is jagged, or has fewer rows than columns.
pub fn validate(matrix: &Matrix) -> Result<()> {
    if matrix.is_empty() {
        return Err(ServerError::InvalidMatrix(
            "matrix cannot be empty".to_string(),
        ));
    }

    if matrix[0].is_empty() {
        return Err(ServerError::InvalidMatrix(
            "matrix rows cannot be empty".to_string(),
        ));
    }

    let cols = matrix[0].len();
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != cols {
            return Err(ServerError::InvalidMatrix(format!(
                "row {i} has {} columns, expected {cols}",
                row.len()
            )));
        }
    }

    let rows = matrix.len();
    if rows < cols {
        return Err(ServerError::InvalidMatrix(format!(
            "matrix must have at least as many rows as columns (got {rows}x{cols})"
        )));
    }

    Ok(())
}

/// Compute the economic QR factorization of a validated rows×cols matrix.
///
/// Returns `(Q, R)` where Q is rows×cols with orthonormal columns and R is
/// cols×cols upper-triangular, with `Q·R` reconstructing the input. The
/// library's full rows×rows orthogonal factor is truncated to its first
/// `cols` columns, and the trapezoidal factor to its first `cols` rows.
///
/// Rank-deficient inputs are not rejected; the factorization proceeds and
/// may yield a degenerate R.
///
/// # Errors
///
/// Returns `ServerError::Factorization` if the matrix shape does not admit
/// an economic factorization (callers are expected to run [`validate`]
/// first).
pub fn qr_factorize(matrix: &Matrix) -> Result<(Matrix, Matrix)> {
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 || rows < cols {
        return Err(ServerError::Factorization(format!(
            "cannot factorize a {rows}x{cols} matrix"
        )));
    }

    let a = Mat::from_fn(rows, cols, |i, j| matrix[i][j]);
    let qr = a.qr();

    // Full rows×rows orthogonal factor and rows×cols trapezoidal factor.
    let q_full = qr.compute_Q();
    let r_full = qr.R();

    let q = (0..rows)
        .map(|i| (0..cols).map(|j| q_full[(i, j)]).collect())
        .collect();
    let r = (0..cols)
        .map(|i| (0..cols).map(|j| r_full[(i, j)]).collect())
        .collect();

    Ok((q, r))
}
