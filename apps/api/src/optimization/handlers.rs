//! Axum route handler for the Optimization API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::optimization::{OptimizationResult, OptimizeRequest};
use crate::state::AppState;

/// POST /api/v1/optimize
///
/// Rewrites the résumé at the requested level. Enhancement failures degrade
/// to deterministic text; only invalid input is reported as an error.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<OptimizationResult>, AppError> {
    let result = state.optimizer.optimize(&req).await?;
    Ok(Json(result))
}
