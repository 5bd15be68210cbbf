//! ATS compliance checker: structural and content heuristics, independent of
//! the match score.

use serde::{Deserialize, Serialize};

use crate::matching::text::{contains_ignore_case, percent};
use crate::models::{CandidateProfile, JobPostingProfile};

pub const CHECK_CONTACT: &str = "Contact Information";
pub const CHECK_OBJECTIVE_LENGTH: &str = "Objective Length";
pub const CHECK_KEYWORD_DENSITY: &str = "Keyword Density";
pub const CHECK_EXPERIENCE_DETAILS: &str = "Experience Details";

const MIN_OBJECTIVE_CHARS: usize = 50;
const MIN_DESCRIPTION_CHARS: usize = 30;
/// Share of required skills that must appear somewhere in the résumé.
const MIN_REQUIRED_COVERAGE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    Format,
    Keyword,
    Structure,
    Length,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    pub issue_type: IssueType,
    pub severity: Severity,
    pub description: String,
    pub fix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub score: u32,
    pub issues: Vec<ComplianceIssue>,
    pub recommendations: Vec<String>,
    pub passed_checks: Vec<String>,
    pub failed_checks: Vec<String>,
}

type CheckFn = fn(&CandidateProfile, &JobPostingProfile) -> Option<ComplianceIssue>;

/// Each check returns the issue it found, or `None` when it passes.
const CHECKS: &[(&str, CheckFn)] = &[
    (CHECK_CONTACT, check_contact),
    (CHECK_OBJECTIVE_LENGTH, check_objective_length),
    (CHECK_KEYWORD_DENSITY, check_keyword_density),
    (CHECK_EXPERIENCE_DETAILS, check_experience_details),
];

pub fn check_compliance(candidate: &CandidateProfile, job: &JobPostingProfile) -> ComplianceCheck {
    let mut issues = Vec::new();
    let mut passed_checks = Vec::new();
    let mut failed_checks = Vec::new();

    for (name, check) in CHECKS {
        match check(candidate, job) {
            None => passed_checks.push(name.to_string()),
            Some(issue) => {
                failed_checks.push(name.to_string());
                issues.push(issue);
            }
        }
    }

    let score = percent(passed_checks.len() as f64, CHECKS.len() as f64);

    let recommendations = if issues.is_empty() {
        Vec::new()
    } else {
        vec![format!(
            "Resolve the {} ATS compliance issue(s) ({}) so automated screeners can parse and rank this résumé.",
            issues.len(),
            failed_checks.join(", ")
        )]
    };

    ComplianceCheck {
        score,
        issues,
        recommendations,
        passed_checks,
        failed_checks,
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn check_contact(candidate: &CandidateProfile, _job: &JobPostingProfile) -> Option<ComplianceIssue> {
    let info = &candidate.personal_info;
    let missing: Vec<&str> = [("phone number", &info.phone), ("email address", &info.email)]
        .into_iter()
        .filter(|(_, value)| !present(value))
        .map(|(label, _)| label)
        .collect();
    if missing.is_empty() {
        return None;
    }
    Some(ComplianceIssue {
        issue_type: IssueType::Structure,
        severity: Severity::High,
        description: format!("Contact section is missing: {}", missing.join(", ")),
        fix: Some("Add a phone number and email address in plain text at the top of the résumé.".to_string()),
    })
}

fn check_objective_length(candidate: &CandidateProfile, _job: &JobPostingProfile) -> Option<ComplianceIssue> {
    let length = candidate.objective.trim().chars().count();
    if length >= MIN_OBJECTIVE_CHARS {
        return None;
    }
    Some(ComplianceIssue {
        issue_type: IssueType::Length,
        severity: Severity::Medium,
        description: format!(
            "Objective is {length} characters; at least {MIN_OBJECTIVE_CHARS} are expected"
        ),
        fix: Some("Expand the objective to 2-3 sentences naming the target role and core skills.".to_string()),
    })
}

fn check_keyword_density(candidate: &CandidateProfile, job: &JobPostingProfile) -> Option<ComplianceIssue> {
    let required: Vec<&String> = job
        .required_skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    if required.is_empty() {
        return None;
    }

    let text = candidate.full_text();
    let absent: Vec<&str> = required
        .iter()
        .filter(|s| !contains_ignore_case(&text, s))
        .map(|s| s.as_str())
        .collect();
    let covered = (required.len() - absent.len()) as f64 / required.len() as f64;
    if covered >= MIN_REQUIRED_COVERAGE {
        return None;
    }
    Some(ComplianceIssue {
        issue_type: IssueType::Keyword,
        severity: Severity::High,
        description: format!(
            "Only {}% of required skills appear in the résumé; missing: {}",
            percent(covered, 1.0),
            absent.join(", ")
        ),
        fix: Some("Mention the required skills you have in your skills list and role descriptions.".to_string()),
    })
}

fn check_experience_details(candidate: &CandidateProfile, _job: &JobPostingProfile) -> Option<ComplianceIssue> {
    let thin: Vec<String> = candidate
        .experiences
        .iter()
        .filter(|e| e.description.trim().chars().count() < MIN_DESCRIPTION_CHARS)
        .map(|e| format!("{} at {}", e.title, e.company))
        .collect();
    if thin.is_empty() {
        return None;
    }
    Some(ComplianceIssue {
        issue_type: IssueType::Content,
        severity: Severity::Medium,
        description: format!(
            "{} role(s) have descriptions under {MIN_DESCRIPTION_CHARS} characters: {}",
            thin.len(),
            thin.join("; ")
        ),
        fix: Some("Describe responsibilities and measurable results for each role.".to_string()),
    })
}
