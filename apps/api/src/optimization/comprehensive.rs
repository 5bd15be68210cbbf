//! COMPREHENSIVE tier: section order, targeted rewrites, placeholder project,
//! industry terminology and quantified leadership.

use tracing::debug;

use crate::matching::keywords::collect_keywords;
use crate::matching::text::{normalize, similarity, tokenize, PARTIAL_MATCH_THRESHOLD};
use crate::models::candidate::Project;
use crate::models::{CandidateProfile, JobPostingProfile, Section};
use crate::optimization::enhancer::enhance_or_else;
use crate::optimization::rewrite::{
    ensure_keywords, expand_description, experience_prompt, join_natural, objective_prompt,
    project_prompt, relevant_keywords,
};
use crate::optimization::TierContext;

const TECHNICAL_ROLE_TERMS: &[&str] = &[
    "engineer",
    "developer",
    "programmer",
    "architect",
    "devops",
    "software",
    "data scientist",
];

/// Acronyms matched as whole title tokens.
const TECHNICAL_ROLE_ACRONYMS: &[&str] = &["sre"];

const LEADERSHIP_ACHIEVEMENT: &str =
    "Led cross-functional initiatives that improved delivery speed by [X]% across [N] team members.";

const MAX_TARGET_KEYWORDS: usize = 3;
const MAX_ROLE_KEYWORDS: usize = 3;

pub async fn apply(cv: &mut CandidateProfile, ctx: &TierContext<'_>) {
    if is_technical_role(&ctx.job.title) {
        promote_technical_sections(cv);
    }
    enhance_target_sections(cv, ctx).await;
    if cv.projects.is_empty() {
        cv.projects.push(placeholder_project(ctx.job));
    }
    inject_industry_terms(cv, &ctx.job.industry);
    quantify_leadership(cv);
}

pub fn is_technical_role(title: &str) -> bool {
    let lower = title.to_lowercase();
    TECHNICAL_ROLE_TERMS.iter().any(|term| lower.contains(term))
        || tokenize(title)
            .iter()
            .any(|t| TECHNICAL_ROLE_ACRONYMS.contains(&t.as_str()))
}

/// Moves technical skills, then skills, directly after the objective.
fn promote_technical_sections(cv: &mut CandidateProfile) {
    let mut order: Vec<Section> = if cv.section_order.is_empty() {
        Section::DEFAULT_ORDER.to_vec()
    } else {
        cv.section_order.clone()
    };
    order.retain(|s| !matches!(s, Section::TechnicalSkills | Section::Skills));
    let at = order
        .iter()
        .position(|s| *s == Section::Objective)
        .map_or(0, |p| p + 1);
    order.insert(at, Section::Skills);
    order.insert(at, Section::TechnicalSkills);
    cv.section_order = order;
}

async fn enhance_target_sections(cv: &mut CandidateProfile, ctx: &TierContext<'_>) {
    let mut seen = Vec::new();
    for &section in ctx.target_sections {
        if seen.contains(&section) {
            continue;
        }
        seen.push(section);
        match section {
            Section::Objective => enhance_objective(cv, ctx).await,
            Section::Experience => enhance_experiences(cv, ctx).await,
            Section::Skills => prioritize_required_skills(cv, ctx.job),
            Section::Projects => enhance_projects(cv, ctx).await,
            other => debug!("No targeted enhancement for {:?}, skipping", other),
        }
    }
}

async fn enhance_objective(cv: &mut CandidateProfile, ctx: &TierContext<'_>) {
    let mut keywords = collect_keywords(ctx.job);
    keywords.sort_by_key(|k| k.importance);
    let keywords: Vec<String> = keywords
        .into_iter()
        .map(|k| k.keyword)
        .take(MAX_TARGET_KEYWORDS)
        .collect();

    let prompt = objective_prompt(&cv.objective, &keywords, ctx.job);
    let rewritten = enhance_or_else(ctx.enhancer, &prompt, "target objective", || {
        ensure_keywords(&cv.objective, &keywords, "Experienced in")
    })
    .await;
    cv.objective = ensure_keywords(&rewritten, &keywords, "Experienced in");
}

async fn enhance_experiences(cv: &mut CandidateProfile, ctx: &TierContext<'_>) {
    for i in 0..cv.experiences.len() {
        let exp = &cv.experiences[i];
        let keywords = relevant_keywords(exp, ctx.job, MAX_ROLE_KEYWORDS);
        let prompt = experience_prompt(exp, &keywords, ctx.job);
        let what = format!("target experience {i}");
        let rewritten = enhance_or_else(ctx.enhancer, &prompt, &what, || {
            if exp.description.trim().is_empty() {
                expand_description(exp, &keywords)
            } else {
                ensure_keywords(&exp.description, &keywords, "Applied")
            }
        })
        .await;
        cv.experiences[i].description = ensure_keywords(&rewritten, &keywords, "Applied");
    }
}

/// Stable partition: skills matching a required skill come first.
fn prioritize_required_skills(cv: &mut CandidateProfile, job: &JobPostingProfile) {
    let is_required = |skill: &String| {
        job.required_skills.iter().any(|r| {
            normalize(r) == normalize(skill) || similarity(r, skill) >= PARTIAL_MATCH_THRESHOLD
        })
    };
    let (mut first, rest): (Vec<String>, Vec<String>) =
        cv.skills.iter().cloned().partition(|s| is_required(s));
    first.extend(rest);
    cv.skills = first;
}

async fn enhance_projects(cv: &mut CandidateProfile, ctx: &TierContext<'_>) {
    for i in 0..cv.projects.len() {
        let project = &cv.projects[i];
        let prompt = project_prompt(project, ctx.job);
        let what = format!("project '{}'", project.name);
        let rewritten = enhance_or_else(ctx.enhancer, &prompt, &what, || {
            ensure_keywords(&project.description, &project.technologies, "Built with")
        })
        .await;
        cv.projects[i].description = rewritten;
    }
}

fn placeholder_project(job: &JobPostingProfile) -> Project {
    let technologies: Vec<String> = job.required_skills.iter().take(3).cloned().collect();
    let applied = if technologies.is_empty() {
        "the skills this role calls for".to_string()
    } else {
        join_natural(&technologies)
    };
    Project {
        name: "Portfolio Project".to_string(),
        description: format!(
            "Placeholder: describe a project where you applied {applied}, including the problem, your role and a measurable result."
        ),
        technologies,
        url: None,
    }
}

fn industry_terms(industry: &str) -> &'static [&'static str] {
    let industry = industry.to_lowercase();
    if industry.contains("tech") || industry.contains("software") {
        &["scalable systems", "the software development lifecycle"]
    } else if industry.contains("financ") || industry.contains("bank") {
        &["regulatory compliance", "risk management"]
    } else if industry.contains("health") || industry.contains("medic") {
        &["HIPAA compliance", "patient outcomes"]
    } else if industry.contains("commerce") || industry.contains("retail") {
        &["conversion optimization", "customer experience"]
    } else if industry.contains("educat") {
        &["learning outcomes", "curriculum development"]
    } else {
        &["industry best practices", "stakeholder management"]
    }
}

fn inject_industry_terms(cv: &mut CandidateProfile, industry: &str) {
    let terms: Vec<String> = industry_terms(industry).iter().map(|t| t.to_string()).collect();
    cv.objective = ensure_keywords(&cv.objective, &terms, "Focused on");
}

/// Adds the achievement template unless the narrative already has a figure.
fn quantify_leadership(cv: &mut CandidateProfile) {
    let current = cv.soft_skills.leadership.as_deref().unwrap_or("").trim();
    if current.contains("[X]") || current.chars().any(|c| c.is_ascii_digit()) {
        return;
    }
    let updated = if current.is_empty() {
        LEADERSHIP_ACHIEVEMENT.to_string()
    } else {
        format!("{current} {LEADERSHIP_ACHIEVEMENT}")
    };
    cv.soft_skills.leadership = Some(updated);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchEngine;
    use crate::models::fixtures::{make_candidate, make_job, strings};
    use crate::optimization::enhancer::testing::FixedEnhancer;
    use crate::optimization::enhancer::UnavailableEnhancer;

    #[test]
    fn test_is_technical_role() {
        assert!(is_technical_role("Senior Frontend Developer"));
        assert!(is_technical_role("Lead Data Scientist"));
        assert!(!is_technical_role("Account Manager"));
        assert!(is_technical_role("SRE, Payments"));
        assert!(!is_technical_role("Misrepresentation Investigator"));
    }

    #[test]
    fn test_promote_technical_sections_from_default_order() {
        let mut cv = make_candidate();
        promote_technical_sections(&mut cv);
        assert_eq!(
            cv.section_order,
            vec![
                Section::Objective,
                Section::TechnicalSkills,
                Section::Skills,
                Section::Experience,
                Section::Education,
                Section::Projects,
                Section::Certificates,
            ]
        );
    }

    #[test]
    fn test_promote_without_objective_goes_first() {
        let mut cv = make_candidate();
        cv.section_order = vec![Section::Experience, Section::Skills];
        promote_technical_sections(&mut cv);
        assert_eq!(
            cv.section_order,
            vec![Section::TechnicalSkills, Section::Skills, Section::Experience]
        );
    }

    #[test]
    fn test_prioritize_required_skills_is_stable() {
        let mut cv = make_candidate();
        cv.skills = strings(&["CSS", "Docker", "TypeScript", "React.js"]);
        prioritize_required_skills(&mut cv, &make_job());
        assert_eq!(cv.skills, strings(&["TypeScript", "React.js", "CSS", "Docker"]));
    }

    #[test]
    fn test_placeholder_project_names_required_skills() {
        let project = placeholder_project(&make_job());
        assert!(project
            .description
            .starts_with("Placeholder: describe a project where you applied React, TypeScript and Node.js"));
        assert_eq!(project.technologies, strings(&["React", "TypeScript", "Node.js"]));
    }

    #[test]
    fn test_industry_terms_appended_once() {
        let mut cv = make_candidate();
        inject_industry_terms(&mut cv, "Technology");
        let once = cv.objective.clone();
        assert!(once.ends_with("Focused on scalable systems and the software development lifecycle."));
        inject_industry_terms(&mut cv, "Technology");
        assert_eq!(cv.objective, once);
    }

    #[test]
    fn test_industry_default_terms() {
        assert_eq!(
            industry_terms("Agriculture"),
            &["industry best practices", "stakeholder management"]
        );
    }

    #[test]
    fn test_quantify_leadership() {
        let mut cv = make_candidate();
        cv.soft_skills.leadership = Some("Mentored two interns.".to_string());
        quantify_leadership(&mut cv);
        assert_eq!(cv.soft_skills.leadership.as_deref(), Some("Mentored two interns. Led cross-functional initiatives that improved delivery speed by [X]% across [N] team members."));

        cv.soft_skills.leadership = Some("Grew the team to 6 engineers.".to_string());
        quantify_leadership(&mut cv);
        assert_eq!(cv.soft_skills.leadership.as_deref(), Some("Grew the team to 6 engineers."));
    }

    #[tokio::test]
    async fn test_apply_with_targets_offline() {
        let candidate = make_candidate();
        let job = make_job();
        let match_result = MatchEngine::default().match_profiles(&candidate, &job).unwrap();
        let targets = [Section::Skills, Section::Education, Section::Skills];
        let ctx = TierContext {
            job: &job,
            match_result: &match_result,
            enhancer: &UnavailableEnhancer,
            target_sections: &targets,
        };

        let mut cv = candidate.clone();
        apply(&mut cv, &ctx).await;

        assert_eq!(cv.section_order[1], Section::TechnicalSkills);
        assert_eq!(cv.projects.len(), 1);
        assert!(cv.projects[0].description.starts_with("Placeholder:"));
        assert!(cv.objective.contains("scalable systems"));
        assert_eq!(
            cv.soft_skills.leadership.as_deref(),
            Some(LEADERSHIP_ACHIEVEMENT)
        );
        // Education has no targeted rewrite.
        assert_eq!(cv.education, candidate.education);
    }

    #[tokio::test]
    async fn test_target_projects_use_enhancer() {
        let mut candidate = make_candidate();
        candidate.projects = vec![Project {
            name: "Dash".to_string(),
            description: "A dashboard.".to_string(),
            technologies: strings(&["React"]),
            url: None,
        }];
        let job = make_job();
        let match_result = MatchEngine::default().match_profiles(&candidate, &job).unwrap();
        let enhancer = FixedEnhancer::new("Built a React dashboard used by 300 analysts.");
        let targets = [Section::Projects];
        let ctx = TierContext {
            job: &job,
            match_result: &match_result,
            enhancer: &enhancer,
            target_sections: &targets,
        };

        let mut cv = candidate.clone();
        enhance_target_sections(&mut cv, &ctx).await;
        assert_eq!(
            cv.projects[0].description,
            "Built a React dashboard used by 300 analysts."
        );
        assert_eq!(enhancer.call_count(), 1);
    }
}
