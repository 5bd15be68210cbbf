//! Change tracker: field-by-field diff of the original and optimized profiles.
//!
//! Output order is fixed (contact, objective, skills, technical buckets,
//! experiences by index, soft skills, projects, section order), so the same
//! pair of profiles always yields the same list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::keywords::collect_keywords;
use crate::matching::text::{contains_ignore_case, normalize};
use crate::models::{CandidateProfile, JobPostingProfile, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Added,
    Modified,
    Enhanced,
    Reordered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub section: Section,
    /// Dotted path of the field, e.g. `experiences[1].description`.
    pub field: String,
    pub change_type: ChangeType,
    pub before: Option<String>,
    pub after: Option<String>,
    pub reason: String,
    /// Posting keywords present after the change but not before.
    pub keywords: Vec<String>,
}

struct Tracker {
    keywords: Vec<String>,
    changes: Vec<Change>,
}

impl Tracker {
    fn tags(&self, before: &str, after: &str) -> Vec<String> {
        self.keywords
            .iter()
            .filter(|k| contains_ignore_case(after, k) && !contains_ignore_case(before, k))
            .cloned()
            .collect()
    }

    fn push(
        &mut self,
        section: Section,
        field: impl Into<String>,
        change_type: ChangeType,
        before: Option<&str>,
        after: Option<&str>,
        reason: &str,
    ) {
        let keywords = self.tags(before.unwrap_or(""), after.unwrap_or(""));
        self.changes.push(Change {
            section,
            field: field.into(),
            change_type,
            before: before.map(str::to_string),
            after: after.map(str::to_string),
            reason: reason.to_string(),
            keywords,
        });
    }

    /// ADDED when the old text was blank, otherwise `otherwise`.
    fn text(
        &mut self,
        section: Section,
        field: impl Into<String>,
        before: Option<&str>,
        after: Option<&str>,
        otherwise: ChangeType,
        reason: &str,
    ) {
        let blank = |s: Option<&str>| s.map_or(true, |s| s.trim().is_empty());
        if before.map(str::trim) == after.map(str::trim) || (blank(before) && blank(after)) {
            return;
        }
        let change_type = if blank(before) {
            ChangeType::Added
        } else {
            otherwise
        };
        self.push(section, field, change_type, before, after, reason);
    }

    /// One ADDED change per item of `after` missing from `before`.
    fn additions(
        &mut self,
        section: Section,
        field: &str,
        before: &[String],
        after: &[String],
        reason: &str,
    ) {
        let existing: HashSet<String> = before.iter().map(|s| normalize(s)).collect();
        let context = before.join(" | ");
        for item in after {
            if existing.contains(&normalize(item)) {
                continue;
            }
            let keywords = self.tags(&context, item);
            self.changes.push(Change {
                section,
                field: field.to_string(),
                change_type: ChangeType::Added,
                before: None,
                after: Some(item.clone()),
                reason: reason.to_string(),
                keywords,
            });
        }
    }
}

pub fn track_changes(
    original: &CandidateProfile,
    optimized: &CandidateProfile,
    job: &JobPostingProfile,
) -> Vec<Change> {
    let mut tracker = Tracker {
        keywords: collect_keywords(job).into_iter().map(|k| k.keyword).collect(),
        changes: Vec::new(),
    };

    let (a, b) = (&original.personal_info, &optimized.personal_info);
    let contact = [
        ("email", &a.email, &b.email),
        ("phone", &a.phone, &b.phone),
        ("location", &a.location, &b.location),
        ("linkedin", &a.linkedin, &b.linkedin),
        ("website", &a.website, &b.website),
        ("github", &a.github, &b.github),
    ];
    for (name, before, after) in contact {
        tracker.text(
            Section::Contact,
            format!("personal_info.{name}"),
            before.as_deref(),
            after.as_deref(),
            ChangeType::Modified,
            "Normalized contact details for ATS parsing",
        );
    }

    tracker.text(
        Section::Objective,
        "objective",
        Some(original.objective.as_str()),
        Some(optimized.objective.as_str()),
        ChangeType::Enhanced,
        "Aligned the objective with the posting's keywords",
    );

    tracker.additions(
        Section::Skills,
        "skills",
        &original.skills,
        &optimized.skills,
        "Added a skill the posting asks for",
    );
    if kept_order_changed(&original.skills, &optimized.skills) {
        tracker.push(
            Section::Skills,
            "skills",
            ChangeType::Reordered,
            Some(original.skills.join(", ").as_str()),
            Some(optimized.skills.join(", ").as_str()),
            "Moved required skills to the front",
        );
    }

    let (a, b) = (&original.technical_skills, &optimized.technical_skills);
    let buckets = [
        ("frontend", &a.frontend, &b.frontend),
        ("backend", &a.backend, &b.backend),
        ("database", &a.database, &b.database),
        ("tools", &a.tools, &b.tools),
    ];
    for (name, before, after) in buckets {
        tracker.additions(
            Section::TechnicalSkills,
            &format!("technical_skills.{name}"),
            before,
            after,
            "Grouped the skill under its technical category",
        );
    }

    for (i, exp) in optimized.experiences.iter().enumerate() {
        let before = original.experiences.get(i).map(|e| e.description.as_str());
        tracker.text(
            Section::Experience,
            format!("experiences[{i}].description"),
            before,
            Some(exp.description.as_str()),
            ChangeType::Enhanced,
            "Expanded the role description with relevant keywords",
        );
    }

    let (a, b) = (&original.soft_skills, &optimized.soft_skills);
    for (name, before, after) in [
        ("communication", &a.communication, &b.communication),
        ("leadership", &a.leadership, &b.leadership),
    ] {
        tracker.text(
            Section::SoftSkills,
            format!("soft_skills.{name}"),
            before.as_deref(),
            after.as_deref(),
            ChangeType::Enhanced,
            "Strengthened the soft-skill narrative",
        );
    }

    for (i, project) in optimized.projects.iter().enumerate() {
        match original.projects.get(i) {
            None => tracker.push(
                Section::Projects,
                format!("projects[{i}]"),
                ChangeType::Added,
                None,
                Some(project.description.as_str()),
                "Added a project entry to complete the résumé",
            ),
            Some(before) => tracker.text(
                Section::Projects,
                format!("projects[{i}].description"),
                Some(before.description.as_str()),
                Some(project.description.as_str()),
                ChangeType::Enhanced,
                "Rewrote the project description for the target role",
            ),
        }
    }

    if original.section_order != optimized.section_order {
        let describe = |order: &Vec<Section>| {
            order
                .iter()
                .map(|s| format!("{s:?}"))
                .collect::<Vec<_>>()
                .join(" > ")
        };
        tracker.push(
            Section::TechnicalSkills,
            "section_order",
            ChangeType::Reordered,
            Some(describe(&original.section_order).as_str()),
            Some(describe(&optimized.section_order).as_str()),
            "Placed technical sections ahead of experience",
        );
    }

    tracker.changes
}

/// True when the items present in both lists appear in a different order.
/// Items added or dropped between the two do not count.
fn kept_order_changed(before: &[String], after: &[String]) -> bool {
    let keys = |items: &[String]| items.iter().map(|s| normalize(s)).collect::<Vec<_>>();
    let (before, after) = (keys(before), keys(after));
    let in_after: HashSet<&String> = after.iter().collect();
    let in_before: HashSet<&String> = before.iter().collect();
    let kept_before: Vec<&String> = before.iter().filter(|k| in_after.contains(k)).collect();
    let kept_after: Vec<&String> = after.iter().filter(|k| in_before.contains(k)).collect();
    kept_before != kept_after
}

/// Distinct sections touched by `changes`, in first-seen order.
pub fn enhanced_sections(changes: &[Change]) -> Vec<Section> {
    let mut sections = Vec::new();
    for change in changes {
        if !sections.contains(&change.section) {
            sections.push(change.section);
        }
    }
    sections
}
