//! Experience matcher: years per required skill area plus per-role relevance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::matching::text::{contains_ignore_case, percent, token_set, tokenize};
use crate::models::candidate::WorkExperience;
use crate::models::{CandidateProfile, JobPostingProfile};

/// Relevance above which an experience is surfaced as relevant.
const RELEVANCE_THRESHOLD: f64 = 0.3;
const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaExperience {
    pub skill_area: String,
    pub required_years: f64,
    pub candidate_years: f64,
    pub score: u32,
    pub is_matched: bool,
    /// Indices into the candidate's experiences that mention the area.
    pub matching_experiences: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevantExperience {
    pub index: usize,
    pub title: String,
    pub company: String,
    pub relevance: f64,
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAnalysis {
    pub score: u32,
    pub total_years: f64,
    pub required_years: f64,
    pub areas: Vec<AreaExperience>,
    pub relevant_experiences: Vec<RelevantExperience>,
}

pub fn match_experience(
    candidate: &CandidateProfile,
    job: &JobPostingProfile,
    today: NaiveDate,
) -> ExperienceAnalysis {
    let durations: Vec<f64> = candidate
        .experiences
        .iter()
        .map(|exp| years_in_role(exp, today))
        .collect();
    let total_years: f64 = durations.iter().sum();

    let areas: Vec<AreaExperience> = job
        .experience_requirements
        .iter()
        .map(|req| {
            let matching_experiences: Vec<usize> = candidate
                .experiences
                .iter()
                .enumerate()
                .filter(|(_, exp)| {
                    contains_ignore_case(&exp.title, &req.skill_area)
                        || contains_ignore_case(&exp.description, &req.skill_area)
                })
                .map(|(i, _)| i)
                .collect();
            let candidate_years: f64 = matching_experiences.iter().map(|&i| durations[i]).sum();
            let score = if req.minimum_years <= 0.0 {
                100
            } else {
                percent(candidate_years, req.minimum_years)
            };
            AreaExperience {
                skill_area: req.skill_area.clone(),
                required_years: req.minimum_years,
                candidate_years: round_years(candidate_years),
                score,
                is_matched: candidate_years >= req.minimum_years,
                matching_experiences,
            }
        })
        .collect();

    let (score, required_years) = if areas.is_empty() {
        let required = job.seniority_level.implied_years();
        (percent(total_years, required), required)
    } else {
        let mean = areas.iter().map(|a| a.score as f64).sum::<f64>() / areas.len() as f64;
        let required = areas.iter().map(|a| a.required_years).sum();
        (mean.round().clamp(0.0, 100.0) as u32, required)
    };

    let relevant_experiences = candidate
        .experiences
        .iter()
        .enumerate()
        .filter_map(|(index, exp)| {
            let relevance = relevance_score(exp, &job.required_skills);
            (relevance > RELEVANCE_THRESHOLD).then(|| RelevantExperience {
                index,
                title: exp.title.clone(),
                company: exp.company.clone(),
                relevance,
                years: round_years(durations[index]),
            })
        })
        .collect();

    ExperienceAnalysis {
        score,
        total_years: round_years(total_years),
        required_years,
        areas,
        relevant_experiences,
    }
}

/// Fractional years between start and end; current roles (or roles with no
/// end date) run until `today`.
pub fn years_in_role(exp: &WorkExperience, today: NaiveDate) -> f64 {
    let end = if exp.is_current {
        today
    } else {
        exp.end_date.unwrap_or(today)
    };
    let days = (end - exp.start_date).num_days().max(0);
    days as f64 / DAYS_PER_YEAR
}

/// Fraction of required skills whose every token appears in the role's
/// title and description.
pub fn relevance_score(exp: &WorkExperience, required_skills: &[String]) -> f64 {
    let skills: Vec<Vec<String>> = required_skills
        .iter()
        .map(|s| tokenize(s))
        .filter(|tokens| !tokens.is_empty())
        .collect();
    if skills.is_empty() {
        return 0.0;
    }
    let text_tokens = token_set(&format!("{} {}", exp.title, exp.description));
    let hits = skills
        .iter()
        .filter(|tokens| tokens.iter().all(|t| text_tokens.contains(t)))
        .count();
    hits as f64 / skills.len() as f64
}

fn round_years(years: f64) -> f64 {
    (years * 10.0).round() / 10.0
}
