//! Axum route handlers for the Match and Compliance APIs.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::compliance::{check_compliance, ComplianceCheck};
use crate::errors::AppError;
use crate::matching::MatchResult;
use crate::models::{validate_candidate, validate_job, CandidateProfile, JobPostingProfile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfilePairRequest {
    pub candidate: CandidateProfile,
    pub job: JobPostingProfile,
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<ProfilePairRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let result = state.engine.match_profiles(&req.candidate, &req.job)?;
    Ok(Json(result))
}

/// POST /api/v1/compliance
///
/// Runs the four ATS checks against the submitted résumé as-is.
pub async fn handle_compliance(
    Json(req): Json<ProfilePairRequest>,
) -> Result<Json<ComplianceCheck>, AppError> {
    validate_job(&req.job)?;
    validate_candidate(&req.candidate)?;
    Ok(Json(check_compliance(&req.candidate, &req.job)))
}
