//! Match engine: runs the four matchers, aggregates, classifies, recommends.
//!
//! Everything in here is synchronous and pure apart from reading the clock
//! (and `match_profiles_at` takes the date explicitly for deterministic use).

pub mod aggregate;
pub mod education;
pub mod experience;
pub mod handlers;
pub mod keywords;
pub mod recommendations;
pub mod skills;
pub mod text;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::EngineError;
use crate::matching::aggregate::{
    classify_strength_areas, classify_weak_areas, overall_score, AreaThresholds, ScoringWeights,
    StrengthArea, SubScores, WeakArea,
};
use crate::matching::education::{match_education, EducationAnalysis};
use crate::matching::experience::{match_experience, ExperienceAnalysis};
use crate::matching::keywords::{match_keywords, KeywordAnalysis};
use crate::matching::recommendations::{generate_recommendations, Recommendation, RecommendationInput};
use crate::matching::skills::{match_skills, SkillsAnalysis};
use crate::models::{validate_candidate, validate_job, CandidateProfile, JobPostingProfile};

/// Result of one match invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: Uuid,
    pub job_id: String,
    pub overall_score: u32,
    pub skills_analysis: SkillsAnalysis,
    pub experience_analysis: ExperienceAnalysis,
    pub education_analysis: EducationAnalysis,
    pub keyword_analysis: KeywordAnalysis,
    pub missing_skills: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub weak_areas: Vec<WeakArea>,
    pub strength_areas: Vec<StrengthArea>,
    pub recommendations: Vec<Recommendation>,
    pub created_at: DateTime<Utc>,
}

/// Stateless scorer. Cheap to clone and safe to share across tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEngine {
    weights: ScoringWeights,
    thresholds: AreaThresholds,
}

impl MatchEngine {
    pub fn new(weights: ScoringWeights, thresholds: AreaThresholds) -> Self {
        Self {
            weights,
            thresholds,
        }
    }

    pub fn match_profiles(
        &self,
        candidate: &CandidateProfile,
        job: &JobPostingProfile,
    ) -> Result<MatchResult, EngineError> {
        self.match_profiles_at(candidate, job, Utc::now().date_naive())
    }

    /// Same as `match_profiles`, with current roles ending on `today`.
    pub fn match_profiles_at(
        &self,
        candidate: &CandidateProfile,
        job: &JobPostingProfile,
        today: NaiveDate,
    ) -> Result<MatchResult, EngineError> {
        validate_job(job)?;
        validate_candidate(candidate)?;

        let skills_analysis = match_skills(candidate, job);
        let experience_analysis = match_experience(candidate, job, today);
        let education_analysis = match_education(candidate, job);
        let keyword_analysis = match_keywords(candidate, job);

        let scores = SubScores {
            skills: skills_analysis.score,
            experience: experience_analysis.score,
            education: education_analysis.score,
            keywords: keyword_analysis.score,
        };
        debug!("Sub-scores for job {}: {:?}", job.id, scores);

        let overall_score = overall_score(&scores, &self.weights);
        let weak_areas = classify_weak_areas(&scores, &self.thresholds);
        let strength_areas = classify_strength_areas(&scores, &self.thresholds);

        let missing_skills = skills_analysis.missing();
        let missing_keywords = keyword_analysis.missing_keywords.clone();

        let recommendations = generate_recommendations(&RecommendationInput {
            candidate,
            missing_skills: &missing_skills,
            keywords: &keyword_analysis,
            education: &education_analysis,
            weak_areas: &weak_areas,
        });

        let result = MatchResult {
            id: Uuid::new_v4(),
            job_id: job.id.clone(),
            overall_score,
            skills_analysis,
            experience_analysis,
            education_analysis,
            keyword_analysis,
            missing_skills,
            missing_keywords,
            weak_areas,
            strength_areas,
            recommendations,
            created_at: Utc::now(),
        };

        info!(
            "Match {} for job {}: overall {}/100 ({} weak, {} strong, {} recommendations)",
            result.id,
            job.id,
            result.overall_score,
            result.weak_areas.len(),
            result.strength_areas.len(),
            result.recommendations.len()
        );

        Ok(result)
    }
}
