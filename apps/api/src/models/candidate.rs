use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Résumé sections, used for ordering, change tracking, and targeted enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    Objective,
    Contact,
    Experience,
    Education,
    Skills,
    TechnicalSkills,
    Projects,
    Certificates,
    SoftSkills,
}

impl Section {
    /// Order used when the candidate has not specified one.
    pub const DEFAULT_ORDER: [Section; 7] = [
        Section::Objective,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::TechnicalSkills,
        Section::Projects,
        Section::Certificates,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub institution: String,
}

/// Technical skills split into the buckets ATS parsers look for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSkills {
    #[serde(default)]
    pub frontend: Vec<String>,
    #[serde(default)]
    pub backend: Vec<String>,
    #[serde(default)]
    pub database: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

impl TechnicalSkills {
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.frontend
            .iter()
            .chain(&self.backend)
            .chain(&self.database)
            .chain(&self.tools)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub name: String,
    #[serde(default)]
    pub issuer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub url: Option<String>,
}

/// Free-text narratives for soft skills. `None` means the section is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoftSkills {
    pub communication: Option<String>,
    pub leadership: Option<String>,
}

/// Structured résumé owned by the caller.
///
/// All fields are owned values, so `clone()` yields a fully independent
/// copy; the optimizer relies on that to diff the two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub experiences: Vec<WorkExperience>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub technical_skills: TechnicalSkills,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub soft_skills: SoftSkills,
    #[serde(default)]
    pub section_order: Vec<Section>,
}

impl CandidateProfile {
    /// Flat skills followed by every categorized technical skill.
    pub fn all_skills(&self) -> impl Iterator<Item = &String> {
        self.skills.iter().chain(self.technical_skills.iter())
    }

    /// Every piece of free text on the profile joined into one string.
    pub fn full_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.objective.as_str()];
        for exp in &self.experiences {
            parts.push(&exp.title);
            parts.push(&exp.description);
        }
        parts.extend(self.all_skills().map(String::as_str));
        for project in &self.projects {
            parts.push(&project.description);
            parts.extend(project.technologies.iter().map(String::as_str));
        }
        parts.join(" ")
    }
}
