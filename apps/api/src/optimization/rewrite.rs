//! Prompt builders and the deterministic text fallbacks shared by all tiers.

use crate::llm_client::prompts::NO_FABRICATION_INSTRUCTION;
use crate::matching::keywords::collect_keywords;
use crate::matching::text::{contains_ignore_case, token_set, tokenize};
use crate::models::candidate::{Project, WorkExperience};
use crate::models::JobPostingProfile;
use crate::optimization::prompts::{
    EXPERIENCE_PROMPT_TEMPLATE, OBJECTIVE_PROMPT_TEMPLATE, PROJECT_PROMPT_TEMPLATE,
};

/// Joins as "a", "a and b", "a, b and c".
pub fn join_natural<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [init @ .., last] => format!(
            "{} and {}",
            init.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", "),
            last.as_ref()
        ),
    }
}

/// Appends `"{lead} {keywords}."` for every keyword the text lacks.
/// Returns the text unchanged when nothing is missing.
pub fn ensure_keywords(text: &str, keywords: &[String], lead: &str) -> String {
    let missing: Vec<&String> = keywords
        .iter()
        .filter(|k| !contains_ignore_case(text, k))
        .collect();
    let text = text.trim();
    if missing.is_empty() {
        return text.to_string();
    }
    let sentence = format!("{lead} {}.", join_natural(&missing));
    if text.is_empty() {
        sentence
    } else if text.ends_with(['.', '!', '?']) {
        format!("{text} {sentence}")
    } else {
        format!("{text}. {sentence}")
    }
}

/// Up to `limit` posting keywords tied to this role, most important first.
///
/// A keyword is relevant when it appears in the title or company, or when
/// one of its significant tokens is a title/company token.
pub fn relevant_keywords(exp: &WorkExperience, job: &JobPostingProfile, limit: usize) -> Vec<String> {
    let role = format!("{} {}", exp.title, exp.company);
    let role_tokens = token_set(&role);
    let mut keywords = collect_keywords(job);
    keywords.sort_by_key(|k| k.importance);
    keywords
        .into_iter()
        .filter(|k| {
            contains_ignore_case(&role, &k.keyword)
                || tokenize(&k.keyword)
                    .iter()
                    .any(|t| t.chars().count() >= 3 && role_tokens.contains(t))
        })
        .map(|k| k.keyword)
        .take(limit)
        .collect()
}

fn role_title(job: &JobPostingProfile) -> &str {
    if job.title.trim().is_empty() {
        "target"
    } else {
        job.title.trim()
    }
}

pub fn objective_prompt(objective: &str, keywords: &[String], job: &JobPostingProfile) -> String {
    OBJECTIVE_PROMPT_TEMPLATE
        .replace("{job_title}", role_title(job))
        .replace("{keywords}", &join_natural(keywords))
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{objective}", objective)
}

pub fn experience_prompt(exp: &WorkExperience, keywords: &[String], job: &JobPostingProfile) -> String {
    let keywords = if keywords.is_empty() {
        "none".to_string()
    } else {
        join_natural(keywords)
    };
    EXPERIENCE_PROMPT_TEMPLATE
        .replace("{job_title}", role_title(job))
        .replace("{title}", &exp.title)
        .replace("{company}", &exp.company)
        .replace("{keywords}", &keywords)
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{description}", &exp.description)
}

pub fn project_prompt(project: &Project, job: &JobPostingProfile) -> String {
    PROJECT_PROMPT_TEMPLATE
        .replace("{job_title}", role_title(job))
        .replace("{name}", &project.name)
        .replace("{technologies}", &join_natural(&project.technologies))
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{description}", &project.description)
}

/// Descriptions shorter than this are treated as thin.
pub const MIN_DESCRIPTION_CHARS: usize = 100;

/// Closing sentences appended in order until a description is long enough.
const FILLER_SENTENCES: &[&str] = &[
    "Collaborated with cross-functional teams to deliver measurable improvements for {company}.",
    "Took ownership of tasks from planning through release and production support.",
];

/// Deterministic description used when a short role cannot be rewritten.
///
/// The result always has at least `MIN_DESCRIPTION_CHARS` characters.
pub fn expand_description(exp: &WorkExperience, keywords: &[String]) -> String {
    let base = exp.description.trim();
    let mut text = if base.is_empty() {
        let opening = format!(
            "As {} at {}, delivered features end to end and collaborated with cross-functional teams to meet business goals.",
            exp.title.trim(),
            exp.company.trim()
        );
        ensure_keywords(&opening, keywords, "Applied")
    } else {
        ensure_keywords(base, keywords, "Applied")
    };
    for sentence in FILLER_SENTENCES {
        if text.chars().count() >= MIN_DESCRIPTION_CHARS {
            break;
        }
        let sentence = sentence.replace("{company}", exp.company.trim());
        text = if text.ends_with(['.', '!', '?']) {
            format!("{text} {sentence}")
        } else {
            format!("{text}. {sentence}")
        };
    }
    text
}
