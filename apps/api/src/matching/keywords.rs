//! Keyword matcher: counts posting keywords across every section of the résumé.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::text::{count_occurrences, percent};
use crate::models::job::{Importance, JobKeyword, KeywordCategory};
use crate::models::{CandidateProfile, JobPostingProfile};

/// Where in the résumé a keyword was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", content = "index", rename_all = "snake_case")]
pub enum KeywordLocation {
    Objective,
    Experience(usize),
    Skills,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub importance: Importance,
    pub count: usize,
    pub locations: Vec<KeywordLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub score: u32,
    pub total_keywords: usize,
    pub matched: Vec<KeywordHit>,
    pub missing_keywords: Vec<String>,
    pub missing_high_priority: Vec<String>,
    pub missing_medium_priority: Vec<String>,
}

/// Job keywords followed by ATS hints not already present (case-insensitive).
pub fn collect_keywords(job: &JobPostingProfile) -> Vec<JobKeyword> {
    let mut seen = HashSet::new();
    let hints = job.ats_keywords.iter().map(|k| JobKeyword {
        keyword: k.clone(),
        category: KeywordCategory::Other,
        importance: Importance::Medium,
    });
    job.keywords
        .iter()
        .cloned()
        .chain(hints)
        .filter(|k| {
            let key = k.keyword.trim().to_lowercase();
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}

pub fn match_keywords(candidate: &CandidateProfile, job: &JobPostingProfile) -> KeywordAnalysis {
    let keywords = collect_keywords(job);

    let mut corpus: Vec<(KeywordLocation, String)> =
        vec![(KeywordLocation::Objective, candidate.objective.clone())];
    corpus.extend(candidate.experiences.iter().enumerate().map(|(i, exp)| {
        (
            KeywordLocation::Experience(i),
            format!("{} {}", exp.title, exp.description),
        )
    }));
    corpus.push((
        KeywordLocation::Skills,
        candidate
            .all_skills()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" | "),
    ));

    let mut matched = Vec::new();
    let mut missing_keywords = Vec::new();
    let mut missing_high_priority = Vec::new();
    let mut missing_medium_priority = Vec::new();

    for kw in &keywords {
        let mut count = 0;
        let mut locations = Vec::new();
        for (location, text) in &corpus {
            let n = count_occurrences(text, &kw.keyword);
            if n > 0 {
                count += n;
                locations.push(*location);
            }
        }

        if count > 0 {
            matched.push(KeywordHit {
                keyword: kw.keyword.clone(),
                importance: kw.importance,
                count,
                locations,
            });
            continue;
        }

        missing_keywords.push(kw.keyword.clone());
        match kw.importance {
            Importance::High => missing_high_priority.push(kw.keyword.clone()),
            Importance::Medium => missing_medium_priority.push(kw.keyword.clone()),
            Importance::Low => {}
        }
    }

    let total_keywords = keywords.len();
    let score = if total_keywords == 0 {
        100
    } else {
        percent(matched.len() as f64, total_keywords as f64)
    };

    KeywordAnalysis {
        score,
        total_keywords,
        matched,
        missing_keywords,
        missing_high_priority,
        missing_medium_priority,
    }
}
