//! Skills matcher: partitions posting skills into exact, partial, and missing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::text::{normalize, percent, similarity, PARTIAL_MATCH_THRESHOLD};
use crate::models::{CandidateProfile, JobPostingProfile};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub job_skill: String,
    pub candidate_skill: String,
    pub similarity: f64,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsAnalysis {
    pub score: u32,
    pub exact_matches: Vec<SkillMatch>,
    pub partial_matches: Vec<SkillMatch>,
    pub missing_required: Vec<String>,
    pub missing_preferred: Vec<String>,
    /// Candidate skills the posting never mentions.
    pub extra_skills: Vec<String>,
    pub matched_required: usize,
    pub total_required: usize,
}

impl SkillsAnalysis {
    /// Missing skills, required first, in the posting's spelling.
    pub fn missing(&self) -> Vec<String> {
        self.missing_required
            .iter()
            .chain(&self.missing_preferred)
            .cloned()
            .collect()
    }
}

enum Outcome {
    Exact(SkillMatch),
    Partial(SkillMatch),
    Missing,
}

pub fn match_skills(candidate: &CandidateProfile, job: &JobPostingProfile) -> SkillsAnalysis {
    let candidate_skills = dedup_skills(candidate.all_skills());

    let required = dedup_skills(job.required_skills.iter());
    let required_norm: HashSet<String> = required.iter().map(|s| normalize(s)).collect();
    let preferred: Vec<String> = dedup_skills(job.preferred_skills.iter())
        .into_iter()
        .filter(|s| !required_norm.contains(&normalize(s)))
        .collect();

    let mut exact_matches = Vec::new();
    let mut partial_matches = Vec::new();
    let mut missing_required = Vec::new();
    let mut missing_preferred = Vec::new();
    let mut used_candidate: HashSet<String> = HashSet::new();
    let mut matched_required = 0usize;

    let job_skills = required
        .iter()
        .map(|s| (s, true))
        .chain(preferred.iter().map(|s| (s, false)));

    for (job_skill, is_required) in job_skills {
        match classify(job_skill, is_required, &candidate_skills) {
            Outcome::Exact(m) => {
                used_candidate.insert(normalize(&m.candidate_skill));
                if is_required {
                    matched_required += 1;
                }
                exact_matches.push(m);
            }
            Outcome::Partial(m) => {
                used_candidate.insert(normalize(&m.candidate_skill));
                if is_required {
                    matched_required += 1;
                }
                partial_matches.push(m);
            }
            Outcome::Missing if is_required => missing_required.push(job_skill.clone()),
            Outcome::Missing => missing_preferred.push(job_skill.clone()),
        }
    }

    let extra_skills = candidate_skills
        .iter()
        .filter(|s| !used_candidate.contains(&normalize(s)))
        .cloned()
        .collect();

    let total_required = required.len();
    let score = if total_required == 0 {
        100
    } else {
        percent(matched_required as f64, total_required as f64)
    };

    SkillsAnalysis {
        score,
        exact_matches,
        partial_matches,
        missing_required,
        missing_preferred,
        extra_skills,
        matched_required,
        total_required,
    }
}

fn classify(job_skill: &str, required: bool, candidate_skills: &[String]) -> Outcome {
    let job_norm = normalize(job_skill);

    if let Some(hit) = candidate_skills.iter().find(|c| normalize(c) == job_norm) {
        return Outcome::Exact(SkillMatch {
            job_skill: job_skill.to_string(),
            candidate_skill: hit.clone(),
            similarity: 1.0,
            required,
        });
    }

    let best = candidate_skills
        .iter()
        .map(|c| (c, similarity(job_skill, c)))
        .filter(|(_, s)| *s >= PARTIAL_MATCH_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    match best {
        Some((hit, s)) => Outcome::Partial(SkillMatch {
            job_skill: job_skill.to_string(),
            candidate_skill: hit.clone(),
            similarity: s,
            required,
        }),
        None => Outcome::Missing,
    }
}

/// Drops blanks and normalized duplicates, keeping first spelling and order.
fn dedup_skills<'a>(skills: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .filter(|s| {
            let n = normalize(s);
            !n.is_empty() && seen.insert(n)
        })
        .map(|s| s.trim().to_string())
        .collect()
}
