//! Turns gaps into an ordered list of concrete action items.

use serde::{Deserialize, Serialize};

use crate::matching::aggregate::{Impact, MatchArea, WeakArea};
use crate::matching::education::EducationAnalysis;
use crate::matching::keywords::KeywordAnalysis;
use crate::models::CandidateProfile;

/// Descriptions shorter than this are flagged for expansion.
const SHORT_DESCRIPTION_CHARS: usize = 50;
const SHORT_OBJECTIVE_CHARS: usize = 50;
const TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    SkillGap,
    KeywordMissing,
    ContentEnhancement,
    ExperienceGap,
    EducationGap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendation_type: RecommendationType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
    /// Estimated overall-score points gained by acting on it.
    pub estimated_impact: u32,
    pub difficulty: Difficulty,
    pub time_to_implement: String,
}

pub struct RecommendationInput<'a> {
    pub candidate: &'a CandidateProfile,
    pub missing_skills: &'a [String],
    pub keywords: &'a KeywordAnalysis,
    pub education: &'a EducationAnalysis,
    pub weak_areas: &'a [WeakArea],
}

pub fn generate_recommendations(input: &RecommendationInput<'_>) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if !input.missing_skills.is_empty() {
        recs.push(skill_gap(input.missing_skills));
    }

    if !input.keywords.missing_keywords.is_empty() {
        recs.push(keyword_missing(input.keywords));
    }

    let short_roles: Vec<String> = input
        .candidate
        .experiences
        .iter()
        .filter(|e| e.description.trim().chars().count() < SHORT_DESCRIPTION_CHARS)
        .map(|e| format!("{} at {}", e.title, e.company))
        .collect();
    if !short_roles.is_empty() {
        recs.push(Recommendation {
            recommendation_type: RecommendationType::ContentEnhancement,
            priority: Priority::Medium,
            title: "Expand experience descriptions".to_string(),
            description: format!(
                "{} role description(s) are too brief for ATS parsers to extract achievements.",
                short_roles.len()
            ),
            action_items: short_roles
                .iter()
                .map(|r| format!("Add 2-3 achievement-focused sentences for {r}"))
                .chain(std::iter::once(
                    "Quantify results with numbers, percentages, or time saved".to_string(),
                ))
                .collect(),
            estimated_impact: 8,
            difficulty: Difficulty::Medium,
            time_to_implement: "1-2 hours".to_string(),
        });
    }

    if input.candidate.objective.trim().chars().count() < SHORT_OBJECTIVE_CHARS {
        recs.push(Recommendation {
            recommendation_type: RecommendationType::ContentEnhancement,
            priority: Priority::Medium,
            title: "Strengthen your professional summary".to_string(),
            description: "Your objective is too short to convey fit for this role.".to_string(),
            action_items: vec![
                "Write 2-3 sentences summarizing your experience and focus".to_string(),
                "Mention the target role and your strongest matching skills".to_string(),
            ],
            estimated_impact: 5,
            difficulty: Difficulty::Easy,
            time_to_implement: "15-30 minutes".to_string(),
        });
    }

    if let Some(weak) = input
        .weak_areas
        .iter()
        .find(|w| w.area == MatchArea::Experience)
    {
        recs.push(Recommendation {
            recommendation_type: RecommendationType::ExperienceGap,
            priority: match weak.impact {
                Impact::High => Priority::High,
                Impact::Medium => Priority::Medium,
                Impact::Low => Priority::Low,
            },
            title: "Highlight relevant experience".to_string(),
            description: format!(
                "Your experience score is {} (target {}). Make relevant work easier to find.",
                weak.score, weak.threshold
            ),
            action_items: weak.suggestions.clone(),
            estimated_impact: 10,
            difficulty: Difficulty::Hard,
            time_to_implement: "2-4 hours".to_string(),
        });
    }

    if !input.education.requirements.is_empty() && !input.education.level_match {
        recs.push(Recommendation {
            recommendation_type: RecommendationType::EducationGap,
            priority: Priority::Low,
            title: "Offset the education requirement".to_string(),
            description: "Your listed degrees are below the level the posting asks for."
                .to_string(),
            action_items: vec![
                "List relevant certifications and completed coursework".to_string(),
                "Emphasize equivalent practical experience in your summary".to_string(),
            ],
            estimated_impact: 4,
            difficulty: Difficulty::Hard,
            time_to_implement: "Varies".to_string(),
        });
    }

    // Stable: insertion order is kept within a priority.
    recs.sort_by_key(|r| r.priority);
    recs
}

fn skill_gap(missing: &[String]) -> Recommendation {
    let top: Vec<&str> = missing.iter().take(TOP_N).map(String::as_str).collect();
    Recommendation {
        recommendation_type: RecommendationType::SkillGap,
        priority: Priority::High,
        title: "Add missing skills".to_string(),
        description: format!("The posting asks for skills your résumé does not list: {}.", top.join(", ")),
        action_items: top
            .iter()
            .map(|s| format!("Add {s} to your skills section if you have used it"))
            .collect(),
        estimated_impact: (missing.len() as u32 * 5).min(20),
        difficulty: Difficulty::Medium,
        time_to_implement: "30 minutes".to_string(),
    }
}

fn keyword_missing(keywords: &KeywordAnalysis) -> Recommendation {
    let ordered: Vec<&str> = keywords
        .missing_high_priority
        .iter()
        .chain(keywords.missing_medium_priority.iter())
        .chain(keywords.missing_keywords.iter())
        .map(String::as_str)
        .fold(Vec::new(), |mut acc, k| {
            if !acc.contains(&k) {
                acc.push(k);
            }
            acc
        });
    let top: Vec<&str> = ordered.into_iter().take(TOP_N).collect();
    let priority = if keywords.missing_high_priority.is_empty() {
        Priority::Medium
    } else {
        Priority::High
    };

    Recommendation {
        recommendation_type: RecommendationType::KeywordMissing,
        priority,
        title: "Include missing keywords".to_string(),
        description: format!(
            "{} posting keyword(s) do not appear in your résumé. Start with: {}.",
            keywords.missing_keywords.len(),
            top.join(", ")
        ),
        action_items: top
            .iter()
            .map(|k| format!("Use \"{k}\" in your summary or a relevant role description"))
            .collect(),
        estimated_impact: (keywords.missing_keywords.len() as u32 * 3).min(15),
        difficulty: Difficulty::Easy,
        time_to_implement: "15-30 minutes".to_string(),
    }
}
