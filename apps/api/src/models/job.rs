use serde::{Deserialize, Serialize};

/// Ordinal education scale. Derive order is the comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EducationLevel {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Phd,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeniorityLevel {
    Entry,
    Junior,
    #[default]
    Mid,
    Senior,
    Lead,
    Executive,
}

impl SeniorityLevel {
    /// Years of experience implied by the seniority when the posting lists
    /// no explicit experience requirements.
    pub fn implied_years(self) -> f64 {
        match self {
            SeniorityLevel::Entry => 0.0,
            SeniorityLevel::Junior => 1.0,
            SeniorityLevel::Mid => 3.0,
            SeniorityLevel::Senior => 5.0,
            SeniorityLevel::Lead => 7.0,
            SeniorityLevel::Executive => 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Importance {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeywordCategory {
    Technical,
    Soft,
    Industry,
    Certification,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRequirement {
    pub skill_area: String,
    pub minimum_years: f64,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRequirement {
    pub level: EducationLevel,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobKeyword {
    pub keyword: String,
    #[serde(default)]
    pub category: KeywordCategory,
    #[serde(default)]
    pub importance: Importance,
}

/// Structured extraction of a job advertisement. Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPostingProfile {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub experience_requirements: Vec<ExperienceRequirement>,
    #[serde(default)]
    pub education_requirements: Vec<EducationRequirement>,
    #[serde(default)]
    pub keywords: Vec<JobKeyword>,
    /// ATS-specific keyword hints, matched as MEDIUM importance.
    #[serde(default)]
    pub ats_keywords: Vec<String>,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub seniority_level: SeniorityLevel,
}
