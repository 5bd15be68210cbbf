//! Score aggregation and weak/strength area classification.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchArea {
    Skills,
    Experience,
    Education,
    Keywords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    /// Tier by how far the score fell below its threshold.
    pub fn from_gap(gap: u32) -> Self {
        match gap {
            g if g >= 30 => Impact::High,
            g if g >= 15 => Impact::Medium,
            _ => Impact::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakArea {
    pub area: MatchArea,
    pub score: u32,
    pub threshold: u32,
    pub impact: Impact,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthArea {
    pub area: MatchArea,
    pub score: u32,
    pub advantages: Vec<String>,
}

/// Weighted contribution of each sub-score to the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub keywords: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.35,
            experience: 0.25,
            education: 0.15,
            keywords: 0.25,
        }
    }
}

/// Weak-area cutoffs (strictly below) and the strength cutoff (at or above).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaThresholds {
    pub weak_skills: u32,
    pub weak_experience: u32,
    pub weak_keywords: u32,
    pub strength: u32,
}

impl Default for AreaThresholds {
    fn default() -> Self {
        Self {
            weak_skills: 70,
            weak_experience: 60,
            weak_keywords: 60,
            strength: 80,
        }
    }
}

/// The four sub-scores, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub skills: u32,
    pub experience: u32,
    pub education: u32,
    pub keywords: u32,
}

impl SubScores {
    fn areas(&self) -> [(MatchArea, u32); 4] {
        [
            (MatchArea::Skills, self.skills),
            (MatchArea::Experience, self.experience),
            (MatchArea::Education, self.education),
            (MatchArea::Keywords, self.keywords),
        ]
    }
}

pub fn overall_score(scores: &SubScores, weights: &ScoringWeights) -> u32 {
    let weighted = scores.skills as f64 * weights.skills
        + scores.experience as f64 * weights.experience
        + scores.education as f64 * weights.education
        + scores.keywords as f64 * weights.keywords;
    weighted.round().clamp(0.0, 100.0) as u32
}

pub fn classify_weak_areas(scores: &SubScores, thresholds: &AreaThresholds) -> Vec<WeakArea> {
    let checks = [
        (MatchArea::Skills, scores.skills, thresholds.weak_skills),
        (MatchArea::Experience, scores.experience, thresholds.weak_experience),
        (MatchArea::Keywords, scores.keywords, thresholds.weak_keywords),
    ];

    checks
        .into_iter()
        .filter(|(_, score, threshold)| score < threshold)
        .map(|(area, score, threshold)| WeakArea {
            area,
            score,
            threshold,
            impact: Impact::from_gap(threshold - score),
            suggestions: weak_area_suggestions(area),
        })
        .collect()
}

pub fn classify_strength_areas(scores: &SubScores, thresholds: &AreaThresholds) -> Vec<StrengthArea> {
    scores
        .areas()
        .into_iter()
        .filter(|(_, score)| *score >= thresholds.strength)
        .map(|(area, score)| StrengthArea {
            area,
            score,
            advantages: strength_advantages(area),
        })
        .collect()
}

fn weak_area_suggestions(area: MatchArea) -> Vec<String> {
    let items: &[&str] = match area {
        MatchArea::Skills => &[
            "List every required skill you have genuinely used in the skills section",
            "Mirror the posting's exact skill names so ATS parsers recognize them",
            "Pursue a short course or certification for the most critical missing skill",
        ],
        MatchArea::Experience => &[
            "Describe how each role used the technologies the posting asks for",
            "Include side projects or freelance work that demonstrate the required areas",
            "State durations clearly so years of experience can be computed",
        ],
        MatchArea::Keywords => &[
            "Work the posting's high-priority keywords into your summary",
            "Repeat key terms naturally in experience descriptions",
            "Avoid synonyms where the posting uses a specific term",
        ],
        MatchArea::Education => &[
            "Highlight coursework and certifications relevant to the role",
        ],
    };
    items.iter().map(|s| s.to_string()).collect()
}

fn strength_advantages(area: MatchArea) -> Vec<String> {
    let items: &[&str] = match area {
        MatchArea::Skills => &[
            "Your skill set covers the posting's core requirements",
            "Lead with these skills in your summary",
        ],
        MatchArea::Experience => &[
            "Your experience meets or exceeds the required years",
            "Quantify outcomes from these roles to stand out further",
        ],
        MatchArea::Education => &[
            "Your education satisfies the posting's requirements",
        ],
        MatchArea::Keywords => &[
            "Your résumé already speaks the posting's language",
            "ATS keyword filters are likely to rank you highly",
        ],
    };
    items.iter().map(|s| s.to_string()).collect()
}
