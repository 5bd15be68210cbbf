pub mod candidate;
pub mod job;

pub use candidate::{CandidateProfile, Section};
pub use job::JobPostingProfile;

use crate::errors::EngineError;

/// Rejects postings the engine cannot score.
pub fn validate_job(job: &JobPostingProfile) -> Result<(), EngineError> {
    if job.id.trim().is_empty() {
        return Err(EngineError::InvalidInput("job id is required".to_string()));
    }
    for req in &job.experience_requirements {
        if !req.minimum_years.is_finite() || req.minimum_years < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "minimum_years for '{}' must be a non-negative number",
                req.skill_area
            )));
        }
    }
    Ok(())
}

/// Rejects résumés with impossible date ranges.
pub fn validate_candidate(candidate: &CandidateProfile) -> Result<(), EngineError> {
    for (i, exp) in candidate.experiences.iter().enumerate() {
        if let Some(end) = exp.end_date {
            if !exp.is_current && end < exp.start_date {
                return Err(EngineError::InvalidInput(format!(
                    "experience {i} ('{}') ends before it starts",
                    exp.title
                )));
            }
        }
    }
    Ok(())
}
