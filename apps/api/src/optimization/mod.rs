//! Optimization pipeline: produces an ATS-tuned copy of a résumé.
//!
//! Flow: validate → deep copy → BASIC → ADVANCED → COMPREHENSIVE (cumulative,
//!       up to the requested level) → track changes → re-match → compliance.
//!
//! The input profile is never touched; every tier mutates the copy only.
//! Prose rewriting goes through the injected `TextEnhancer`, and every call
//! site has a deterministic fallback, so enhancement failure never fails
//! `optimize`.

pub mod advanced;
pub mod basic;
pub mod changes;
pub mod comprehensive;
pub mod enhancer;
pub mod handlers;
pub mod prompts;
pub mod rewrite;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::compliance::{check_compliance, ComplianceCheck};
use crate::errors::EngineError;
use crate::matching::{MatchEngine, MatchResult};
use crate::models::{validate_candidate, validate_job, CandidateProfile, JobPostingProfile, Section};
use crate::optimization::changes::{enhanced_sections, track_changes, Change};
use crate::optimization::enhancer::TextEnhancer;

/// Highest score the heuristic estimate may report.
const ESTIMATE_CEILING: u32 = 95;
const ESTIMATE_POINTS_PER_CHANGE: u32 = 3;
const ESTIMATE_MAX_GAIN: u32 = 20;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Optimization intensity. Each level includes everything below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizationLevel {
    Basic,
    Advanced,
    Comprehensive,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRequest {
    pub candidate: CandidateProfile,
    pub job: JobPostingProfile,
    pub match_result: MatchResult,
    pub level: OptimizationLevel,
    /// Sections to enhance individually at COMPREHENSIVE level.
    #[serde(default)]
    pub target_sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub id: Uuid,
    pub match_result_id: Uuid,
    pub level: OptimizationLevel,
    pub original_cv: CandidateProfile,
    pub optimized_cv: CandidateProfile,
    pub changes: Vec<Change>,
    pub enhanced_sections: Vec<Section>,
    pub before_score: u32,
    pub after_score: u32,
    pub improvement_percentage: f64,
    /// True when `after_score` is the heuristic estimate, not a real re-match.
    pub score_estimated: bool,
    pub compliance: ComplianceCheck,
    pub created_at: DateTime<Utc>,
}

/// Read-only inputs shared by the tier passes.
pub struct TierContext<'a> {
    pub job: &'a JobPostingProfile,
    pub match_result: &'a MatchResult,
    pub enhancer: &'a dyn TextEnhancer,
    pub target_sections: &'a [Section],
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Optimizer {
    engine: MatchEngine,
    enhancer: Arc<dyn TextEnhancer>,
}

impl Optimizer {
    pub fn new(engine: MatchEngine, enhancer: Arc<dyn TextEnhancer>) -> Self {
        Self { engine, enhancer }
    }

    /// Runs the tiers up to `request.level` on a copy of the candidate.
    ///
    /// Fails only on invalid input, including a match result computed for
    /// a different posting.
    pub async fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizationResult, EngineError> {
        validate_job(&request.job)?;
        validate_candidate(&request.candidate)?;
        if request.match_result.job_id != request.job.id {
            return Err(EngineError::InvalidInput(format!(
                "match result {} belongs to job '{}', not '{}'",
                request.match_result.id, request.match_result.job_id, request.job.id
            )));
        }

        let ctx = TierContext {
            job: &request.job,
            match_result: &request.match_result,
            enhancer: self.enhancer.as_ref(),
            target_sections: &request.target_sections,
        };

        let mut optimized = request.candidate.clone();
        basic::apply(&mut optimized, &ctx).await;
        if request.level >= OptimizationLevel::Advanced {
            advanced::apply(&mut optimized, &ctx).await;
        }
        if request.level >= OptimizationLevel::Comprehensive {
            comprehensive::apply(&mut optimized, &ctx).await;
        }

        let changes = track_changes(&request.candidate, &optimized, &request.job);
        let enhanced_sections = enhanced_sections(&changes);

        let before_score = request.match_result.overall_score;
        let rematch = self.engine.match_profiles(&optimized, &request.job);
        let (after_score, score_estimated) = resolve_after_score(before_score, rematch, changes.len());
        let improvement_percentage = improvement_percentage(before_score, after_score);

        let compliance = check_compliance(&optimized, &request.job);

        let result = OptimizationResult {
            id: Uuid::new_v4(),
            match_result_id: request.match_result.id,
            level: request.level,
            original_cv: request.candidate.clone(),
            optimized_cv: optimized,
            changes,
            enhanced_sections,
            before_score,
            after_score,
            improvement_percentage,
            score_estimated,
            compliance,
            created_at: Utc::now(),
        };

        info!(
            "Optimization {} ({:?}) for job {}: {} -> {} ({:+.1}%), {} changes, compliance {}/100",
            result.id,
            result.level,
            request.job.id,
            result.before_score,
            result.after_score,
            result.improvement_percentage,
            result.changes.len(),
            result.compliance.score
        );

        Ok(result)
    }
}

/// Takes the re-match score, or the bounded estimate when re-matching failed.
fn resolve_after_score(
    before: u32,
    rematch: Result<MatchResult, EngineError>,
    change_count: usize,
) -> (u32, bool) {
    match rematch {
        Ok(result) => (result.overall_score, false),
        Err(e) => {
            warn!("Re-evaluation of optimized profile failed, estimating score: {e}");
            (estimate_after_score(before, change_count), true)
        }
    }
}

/// `min(95, before + min(3 * changes, 20))`, never below `before`.
fn estimate_after_score(before: u32, change_count: usize) -> u32 {
    let changes = u32::try_from(change_count).unwrap_or(u32::MAX);
    let gain = changes
        .saturating_mul(ESTIMATE_POINTS_PER_CHANGE)
        .min(ESTIMATE_MAX_GAIN);
    (before + gain).min(ESTIMATE_CEILING).max(before)
}

/// Relative improvement in percent, rounded to one decimal.
fn improvement_percentage(before: u32, after: u32) -> f64 {
    if before == 0 {
        return if after > 0 { 100.0 } else { 0.0 };
    }
    let pct = (after as f64 - before as f64) / before as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::enhancer::testing::FixedEnhancer;
    use super::enhancer::UnavailableEnhancer;
    use super::*;
    use crate::models::fixtures::{make_candidate, make_job};

    fn make_request(level: OptimizationLevel) -> OptimizeRequest {
        let candidate = make_candidate();
        let job = make_job();
        let match_result = MatchEngine::default().match_profiles(&candidate, &job).unwrap();
        OptimizeRequest {
            candidate,
            job,
            match_result,
            level,
            target_sections: vec![],
        }
    }

    fn offline() -> Optimizer {
        Optimizer::new(MatchEngine::default(), Arc::new(UnavailableEnhancer))
    }

    fn change_keys(result: &OptimizationResult) -> HashSet<(Section, String)> {
        result
            .changes
            .iter()
            .map(|c| (c.section, c.field.clone()))
            .collect()
    }

    #[test]
    fn test_estimate_is_bounded() {
        assert_eq!(estimate_after_score(50, 2), 56);
        assert_eq!(estimate_after_score(50, 100), 70);
        assert_eq!(estimate_after_score(90, 10), 95);
        assert_eq!(estimate_after_score(98, 10), 98);
        assert_eq!(estimate_after_score(0, 0), 0);
    }

    #[test]
    fn test_resolve_after_score_flags_estimate() {
        let err = EngineError::InvalidInput("boom".to_string());
        assert_eq!(resolve_after_score(60, Err(err), 1), (63, true));
    }

    #[test]
    fn test_improvement_percentage() {
        assert_eq!(improvement_percentage(60, 75), 25.0);
        assert_eq!(improvement_percentage(70, 80), 14.3);
        assert_eq!(improvement_percentage(80, 70), -12.5);
        assert_eq!(improvement_percentage(0, 10), 100.0);
        assert_eq!(improvement_percentage(0, 0), 0.0);
    }

    #[test]
    fn test_level_ordering() {
        assert!(OptimizationLevel::Basic < OptimizationLevel::Advanced);
        assert!(OptimizationLevel::Advanced < OptimizationLevel::Comprehensive);
    }

    #[tokio::test]
    async fn test_optimize_never_mutates_input() {
        let request = make_request(OptimizationLevel::Comprehensive);
        let snapshot = request.candidate.clone();
        let result = offline().optimize(&request).await.unwrap();
        assert_eq!(request.candidate, snapshot);
        assert_eq!(result.original_cv, snapshot);
        assert_ne!(result.optimized_cv, snapshot);
    }

    #[tokio::test]
    async fn test_optimize_improves_fixture_offline() {
        let request = make_request(OptimizationLevel::Basic);
        let result = offline().optimize(&request).await.unwrap();
        assert!(!result.score_estimated);
        assert!(result.after_score >= result.before_score);
        assert!(result.optimized_cv.skills.contains(&"Node.js".to_string()));
        assert!(result.optimized_cv.objective.contains("Agile"));
        assert_eq!(result.match_result_id, request.match_result.id);
    }

    #[tokio::test]
    async fn test_changes_grow_with_level() {
        let optimizer = offline();
        let basic = optimizer
            .optimize(&make_request(OptimizationLevel::Basic))
            .await
            .unwrap();
        let advanced = optimizer
            .optimize(&make_request(OptimizationLevel::Advanced))
            .await
            .unwrap();
        let comprehensive = optimizer
            .optimize(&make_request(OptimizationLevel::Comprehensive))
            .await
            .unwrap();

        assert!(change_keys(&basic).is_subset(&change_keys(&advanced)));
        assert!(change_keys(&advanced).is_subset(&change_keys(&comprehensive)));
        assert!(advanced.changes.len() > basic.changes.len());
    }

    #[tokio::test]
    async fn test_job_mismatch_is_rejected() {
        let mut request = make_request(OptimizationLevel::Basic);
        request.match_result.job_id = "another-job".to_string();
        let err = offline().optimize(&request).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_enhancer_output_is_used_when_keywords_present() {
        let enhancer = Arc::new(FixedEnhancer::new(
            "Agile frontend engineer building accessible React applications.",
        ));
        let optimizer = Optimizer::new(MatchEngine::default(), enhancer.clone());
        let result = optimizer
            .optimize(&make_request(OptimizationLevel::Basic))
            .await
            .unwrap();
        assert_eq!(
            result.optimized_cv.objective,
            "Agile frontend engineer building accessible React applications."
        );
        assert_eq!(enhancer.call_count(), 1);
    }

    #[test]
    fn test_request_deserializes_without_target_sections() {
        let request = make_request(OptimizationLevel::Basic);
        let json = serde_json::json!({
            "candidate": request.candidate,
            "job": request.job,
            "match_result": request.match_result,
            "level": "ADVANCED",
        });
        let parsed: OptimizeRequest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.level, OptimizationLevel::Advanced);
        assert!(parsed.target_sections.is_empty());
    }
}
