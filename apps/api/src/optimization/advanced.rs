//! ADVANCED tier: short role descriptions, skill buckets, soft-skill narratives.

use std::collections::HashSet;

use tracing::debug;

use crate::matching::text::{normalize, tokenize};
use crate::models::candidate::{SoftSkills, TechnicalSkills};
use crate::models::CandidateProfile;
use crate::optimization::enhancer::enhance_or_else;
use crate::optimization::rewrite::{
    ensure_keywords, expand_description, experience_prompt, relevant_keywords, MIN_DESCRIPTION_CHARS,
};
use crate::optimization::TierContext;

const MAX_ROLE_KEYWORDS: usize = 3;

const DATABASE_SKILLS: &[&str] = &[
    "sql", "postgresql", "postgres", "mysql", "mariadb", "sqlite", "oracle", "mongodb",
    "redis", "dynamodb", "cassandra", "elasticsearch", "firebase", "supabase",
];
const FRONTEND_SKILLS: &[&str] = &[
    "react", "angular", "vue", "svelte", "html", "html5", "css", "css3", "javascript",
    "typescript", "nextjs", "redux", "tailwind", "sass", "jquery", "webpack", "vite",
];
const BACKEND_SKILLS: &[&str] = &[
    "nodejs", "node", "express", "python", "django", "flask", "fastapi", "java", "spring",
    "kotlin", "scala", "go", "golang", "rust", "ruby", "rails", "php", "laravel", "c#",
    "net", "dotnet", "c++", "graphql", "rest",
];
const TOOL_SKILLS: &[&str] = &[
    "git", "github", "gitlab", "docker", "kubernetes", "k8s", "jenkins", "aws", "azure",
    "gcp", "terraform", "ansible", "linux", "jira", "figma", "cicd", "ci", "cd",
];

pub async fn apply(cv: &mut CandidateProfile, ctx: &TierContext<'_>) {
    rewrite_short_descriptions(cv, ctx).await;
    recategorize_skills(cv);
    backfill_soft_skills(cv);
}

/// Rewrites every description under 100 characters, one role at a time.
async fn rewrite_short_descriptions(cv: &mut CandidateProfile, ctx: &TierContext<'_>) {
    for i in 0..cv.experiences.len() {
        let exp = &cv.experiences[i];
        if exp.description.trim().chars().count() >= MIN_DESCRIPTION_CHARS {
            continue;
        }
        let keywords = relevant_keywords(exp, ctx.job, MAX_ROLE_KEYWORDS);
        let prompt = experience_prompt(exp, &keywords, ctx.job);
        let what = format!("experience {i} description");
        let rewritten = enhance_or_else(ctx.enhancer, &prompt, &what, || {
            expand_description(exp, &keywords)
        })
        .await;
        cv.experiences[i].description = ensure_keywords(&rewritten, &keywords, "Applied");
    }
}

fn bucket_for(skill: &str) -> Option<Bucket> {
    let key = normalize(skill);
    let tokens = tokenize(skill);
    let listed = |list: &[&str]| {
        list.contains(&key.as_str()) || tokens.iter().any(|t| list.contains(&t.as_str()))
    };
    if listed(DATABASE_SKILLS) {
        Some(Bucket::Database)
    } else if listed(FRONTEND_SKILLS) {
        Some(Bucket::Frontend)
    } else if listed(BACKEND_SKILLS) {
        Some(Bucket::Backend)
    } else if listed(TOOL_SKILLS) {
        Some(Bucket::Tools)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Frontend,
    Backend,
    Database,
    Tools,
}

impl Bucket {
    fn of(self, skills: &mut TechnicalSkills) -> &mut Vec<String> {
        match self {
            Bucket::Frontend => &mut skills.frontend,
            Bucket::Backend => &mut skills.backend,
            Bucket::Database => &mut skills.database,
            Bucket::Tools => &mut skills.tools,
        }
    }
}

/// Files every recognized flat skill into its technical bucket.
/// Existing bucket entries stay where they are.
fn recategorize_skills(cv: &mut CandidateProfile) {
    let mut filed: HashSet<String> = cv.technical_skills.iter().map(|s| normalize(s)).collect();
    let mut technical = cv.technical_skills.clone();
    for skill in &cv.skills {
        let Some(bucket) = bucket_for(skill) else {
            continue;
        };
        if filed.insert(normalize(skill)) {
            bucket.of(&mut technical).push(skill.clone());
        }
    }
    debug!(
        "Skill buckets: {} frontend, {} backend, {} database, {} tools",
        technical.frontend.len(),
        technical.backend.len(),
        technical.database.len(),
        technical.tools.len()
    );
    cv.technical_skills = technical;
}

fn is_blank(narrative: &Option<String>) -> bool {
    narrative.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn backfill_soft_skills(cv: &mut CandidateProfile) {
    let latest = cv.experiences.first();
    let SoftSkills {
        communication,
        leadership,
    } = &mut cv.soft_skills;

    if is_blank(communication) {
        *communication = Some(
            "Communicated technical decisions clearly to engineers, designers and business stakeholders, \
             keeping documentation and status updates current."
                .to_string(),
        );
    }
    if is_blank(leadership) {
        *leadership = Some(match latest {
            Some(exp) => format!(
                "Took ownership of deliverables and mentored teammates as {} at {}.",
                exp.title.trim(),
                exp.company.trim()
            ),
            None => "Took ownership of deliverables and supported teammates in reaching shared goals."
                .to_string(),
        });
    }
}
