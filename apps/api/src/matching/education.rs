//! Education matcher: degree level on an ordinal scale plus field similarity.

use serde::{Deserialize, Serialize};

use crate::matching::text::{normalize, similarity, PARTIAL_MATCH_THRESHOLD};
use crate::models::job::EducationLevel;
use crate::models::{CandidateProfile, JobPostingProfile};

const LEVEL_POINTS: u32 = 60;
const FIELD_POINTS: u32 = 30;
const CERTIFICATE_POINTS: u32 = 10;
/// Partial credit when the posting states no requirement and the candidate lists no education.
const NO_EDUCATION_SCORE: u32 = 70;

const PHD_MARKERS: &[&str] = &["phd", "doctorate", "doctor", "doctoral"];
const MASTER_MARKERS: &[&str] = &["master", "masters", "msc", "ms", "mba", "meng", "mphil"];
const ASSOCIATE_MARKERS: &[&str] = &["associate", "associates", "aa"];
/// Abbreviations that are also English words; only trusted as the leading token.
const LEADING_MASTER_MARKERS: &[&str] = &["ma"];
const LEADING_ASSOCIATE_MARKERS: &[&str] = &["as"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRequirementResult {
    pub level: EducationLevel,
    pub field: String,
    pub level_met: bool,
    pub field_met: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationAnalysis {
    pub score: u32,
    pub highest_level: Option<EducationLevel>,
    pub level_match: bool,
    pub field_match: bool,
    pub has_certificates: bool,
    pub requirements: Vec<EducationRequirementResult>,
}

/// Maps a free-text degree to a canonical level. Ambiguous text is a bachelor.
pub fn degree_level(degree: &str) -> EducationLevel {
    let normalized = normalize(degree);
    let has = |markers: &[&str]| {
        normalized
            .split_whitespace()
            .any(|w| markers.contains(&w))
    };
    let leads = |markers: &[&str]| {
        normalized
            .split_whitespace()
            .next()
            .is_some_and(|w| markers.contains(&w))
    };
    if has(PHD_MARKERS) {
        EducationLevel::Phd
    } else if has(MASTER_MARKERS) || leads(LEADING_MASTER_MARKERS) {
        EducationLevel::Master
    } else if has(ASSOCIATE_MARKERS) || leads(LEADING_ASSOCIATE_MARKERS) {
        EducationLevel::Associate
    } else {
        EducationLevel::Bachelor
    }
}

pub fn match_education(candidate: &CandidateProfile, job: &JobPostingProfile) -> EducationAnalysis {
    let levels: Vec<EducationLevel> = candidate
        .education
        .iter()
        .map(|e| degree_level(&e.degree))
        .collect();
    let highest_level = levels.iter().copied().max();
    let has_certificates = !candidate.certificates.is_empty();

    let requirements: Vec<EducationRequirementResult> = job
        .education_requirements
        .iter()
        .map(|req| {
            let level_met = levels.iter().any(|&l| l >= req.level);
            let field_met = req.field.trim().is_empty()
                || candidate
                    .education
                    .iter()
                    .any(|e| similarity(&e.field, &req.field) >= PARTIAL_MATCH_THRESHOLD);
            EducationRequirementResult {
                level: req.level,
                field: req.field.clone(),
                level_met,
                field_met,
            }
        })
        .collect();

    let level_match = requirements.iter().any(|r| r.level_met);
    let field_match = requirements.iter().any(|r| r.field_met);

    let score = if requirements.is_empty() {
        if candidate.education.is_empty() {
            NO_EDUCATION_SCORE
        } else {
            100
        }
    } else {
        let mut points = 0;
        if level_match {
            points += LEVEL_POINTS;
        }
        if field_match {
            points += FIELD_POINTS;
        }
        if has_certificates {
            points += CERTIFICATE_POINTS;
        }
        points.min(100)
    };

    EducationAnalysis {
        score,
        highest_level,
        level_match,
        field_match,
        has_certificates,
        requirements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::{Certificate, EducationEntry};
    use crate::models::job::EducationRequirement;

    fn make_candidate(degrees: &[(&str, &str)], certificates: usize) -> CandidateProfile {
        CandidateProfile {
            education: degrees
                .iter()
                .map(|(degree, field)| EducationEntry {
                    degree: degree.to_string(),
                    field: field.to_string(),
                    institution: "Uni".to_string(),
                })
                .collect(),
            certificates: (0..certificates)
                .map(|i| Certificate {
                    name: format!("Cert {i}"),
                    issuer: "Issuer".to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn make_job(level: EducationLevel, field: &str) -> JobPostingProfile {
        JobPostingProfile {
            id: "job".to_string(),
            education_requirements: vec![EducationRequirement {
                level,
                field: field.to_string(),
                required: true,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_degree_level_heuristics() {
        assert_eq!(degree_level("Ph.D. in Physics"), EducationLevel::Phd);
        assert_eq!(degree_level("M.S."), EducationLevel::Master);
        assert_eq!(degree_level("Master of Science"), EducationLevel::Master);
        assert_eq!(degree_level("MBA"), EducationLevel::Master);
        assert_eq!(degree_level("Associate of Arts"), EducationLevel::Associate);
        assert_eq!(degree_level("B.Sc."), EducationLevel::Bachelor);
        assert_eq!(degree_level("Some degree"), EducationLevel::Bachelor);
    }

    #[test]
    fn test_degree_abbreviations_that_are_words() {
        assert_eq!(degree_level("M.A. in History"), EducationLevel::Master);
        assert_eq!(degree_level("A.S."), EducationLevel::Associate);
        assert_eq!(
            degree_level("Bachelor of Science as double major"),
            EducationLevel::Bachelor
        );
        assert_eq!(degree_level("BA with a minor in Drama"), EducationLevel::Bachelor);
    }

    #[test]
    fn test_no_requirements_with_education_is_100() {
        let job = JobPostingProfile {
            id: "job".to_string(),
            ..Default::default()
        };
        assert_eq!(match_education(&make_candidate(&[("BSc", "CS")], 0), &job).score, 100);
    }

    #[test]
    fn test_no_requirements_without_education_is_partial_credit() {
        let job = JobPostingProfile {
            id: "job".to_string(),
            ..Default::default()
        };
        assert_eq!(match_education(&make_candidate(&[], 0), &job).score, 70);
    }

    #[test]
    fn test_level_and_field_match_is_90() {
        let analysis = match_education(
            &make_candidate(&[("Master of Science", "Computer Science")], 0),
            &make_job(EducationLevel::Bachelor, "Computer Science"),
        );
        assert!(analysis.level_match);
        assert!(analysis.field_match);
        assert_eq!(analysis.score, 90);
    }

    #[test]
    fn test_certificates_add_ten_capped() {
        let analysis = match_education(
            &make_candidate(&[("PhD", "Computer Science")], 2),
            &make_job(EducationLevel::Master, "Computer Science"),
        );
        assert_eq!(analysis.score, 100);
    }

    #[test]
    fn test_level_below_requirement() {
        let analysis = match_education(
            &make_candidate(&[("Associate of Science", "Biology")], 1),
            &make_job(EducationLevel::Bachelor, "Computer Science"),
        );
        assert!(!analysis.level_match);
        assert!(!analysis.field_match);
        assert_eq!(analysis.score, 10);
    }

    #[test]
    fn test_empty_required_field_is_met() {
        let analysis = match_education(
            &make_candidate(&[("BA", "History")], 0),
            &make_job(EducationLevel::Bachelor, ""),
        );
        assert_eq!(analysis.score, 90);
    }
}
