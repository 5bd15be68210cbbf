//! BASIC tier: missing skills, keyword-bearing objective, contact normalization.

use std::collections::HashSet;

use tracing::debug;

use crate::matching::text::{contains_ignore_case, normalize};
use crate::models::candidate::PersonalInfo;
use crate::models::CandidateProfile;
use crate::optimization::enhancer::enhance_or_else;
use crate::optimization::rewrite::{ensure_keywords, objective_prompt};
use crate::optimization::TierContext;

const MAX_ADDED_SKILLS: usize = 5;
const MAX_OBJECTIVE_KEYWORDS: usize = 3;

pub async fn apply(cv: &mut CandidateProfile, ctx: &TierContext<'_>) {
    add_missing_skills(cv, &ctx.match_result.missing_skills);
    rewrite_objective(cv, ctx).await;
    normalize_contact(&mut cv.personal_info);
}

/// Appends up to five missing skills the profile does not already list.
fn add_missing_skills(cv: &mut CandidateProfile, missing: &[String]) {
    let mut present: HashSet<String> = cv.all_skills().map(|s| normalize(s)).collect();
    let additions: Vec<String> = missing
        .iter()
        .filter(|s| {
            let key = normalize(s);
            !key.is_empty() && present.insert(key)
        })
        .take(MAX_ADDED_SKILLS)
        .cloned()
        .collect();
    debug!("Adding {} missing skills", additions.len());
    cv.skills.extend(additions);
}

async fn rewrite_objective(cv: &mut CandidateProfile, ctx: &TierContext<'_>) {
    let keywords: Vec<String> = ctx
        .match_result
        .keyword_analysis
        .missing_high_priority
        .iter()
        .filter(|k| !contains_ignore_case(&cv.objective, k))
        .take(MAX_OBJECTIVE_KEYWORDS)
        .cloned()
        .collect();
    if keywords.is_empty() {
        return;
    }

    let prompt = objective_prompt(&cv.objective, &keywords, ctx.job);
    let rewritten = enhance_or_else(ctx.enhancer, &prompt, "objective", || {
        ensure_keywords(&cv.objective, &keywords, "Experienced in")
    })
    .await;
    // The enhancer may drop a keyword; the result must carry all of them.
    cv.objective = ensure_keywords(&rewritten, &keywords, "Experienced in");
}

fn normalize_contact(info: &mut PersonalInfo) {
    if let Some(email) = info.email.as_mut() {
        *email = email.trim().to_string();
    }
    if let Some(phone) = info.phone.as_mut() {
        *phone = format_phone(phone);
    }
    for url in [&mut info.linkedin, &mut info.website, &mut info.github]
        .into_iter()
        .flatten()
    {
        *url = format_url(url);
    }
}

/// `(555) 123-4567` for ten digits, `+1 (555) 123-4567` for eleven starting
/// with 1, `+<digits>` for other numbers written with a leading `+`.
/// Anything else is only trimmed.
pub fn format_phone(raw: &str) -> String {
    let raw = raw.trim();
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let us = |d: &str| format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..]);
    match digits.len() {
        10 => us(&digits),
        11 if digits.starts_with('1') => format!("+1 {}", us(&digits[1..])),
        n if n > 0 && raw.starts_with('+') => format!("+{digits}"),
        _ => raw.to_string(),
    }
}

/// Ensures an `https://` scheme and drops trailing slashes.
pub fn format_url(raw: &str) -> String {
    let url = raw.trim().trim_end_matches('/');
    if url.is_empty() {
        return String::new();
    }
    let lower = url.to_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::{check_compliance, CHECK_EXPERIENCE_DETAILS};
    use crate::matching::MatchEngine;
    use crate::models::fixtures::{make_candidate, make_experience, make_job, strings};
    use crate::optimization::enhancer::testing::FixedEnhancer;
    use crate::optimization::enhancer::UnavailableEnhancer;

    #[test]
    fn test_format_phone_us() {
        assert_eq!(format_phone("555.123.4567"), "(555) 123-4567");
        assert_eq!(format_phone(" 1-555-123-4567 "), "+1 (555) 123-4567");
    }

    #[test]
    fn test_format_phone_international_and_unknown() {
        assert_eq!(format_phone("+44 20 7946 0958"), "+442079460958");
        assert_eq!(format_phone("ext. 12"), "ext. 12");
    }

    #[test]
    fn test_format_url() {
        assert_eq!(format_url("linkedin.com/in/sam/"), "https://linkedin.com/in/sam");
        assert_eq!(format_url("http://example.com"), "http://example.com");
        assert_eq!(format_url("  "), "");
    }

    #[test]
    fn test_add_missing_skills_dedups_and_caps() {
        let mut cv = make_candidate();
        let missing = strings(&["react", "Go", "Rust", "go", "Kafka", "Redis", "Docker", "K8s"]);
        add_missing_skills(&mut cv, &missing);
        assert_eq!(
            cv.skills,
            strings(&["React", "TypeScript", "CSS", "Go", "Rust", "Kafka", "Redis", "Docker"])
        );
    }

    #[tokio::test]
    async fn test_apply_offline_fixture() {
        let candidate = make_candidate();
        let job = make_job();
        let match_result = MatchEngine::default().match_profiles(&candidate, &job).unwrap();
        let ctx = TierContext {
            job: &job,
            match_result: &match_result,
            enhancer: &UnavailableEnhancer,
            target_sections: &[],
        };

        let mut cv = candidate.clone();
        apply(&mut cv, &ctx).await;

        assert_eq!(
            cv.skills,
            strings(&["React", "TypeScript", "CSS", "Node.js", "GraphQL"])
        );
        assert_eq!(
            cv.objective,
            "Frontend engineer focused on accessibility and fast React applications. Experienced in Agile."
        );
        assert_eq!(cv.personal_info.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(
            cv.personal_info.linkedin.as_deref(),
            Some("https://linkedin.com/in/samrivera")
        );
        // BASIC never touches descriptions.
        assert_eq!(cv.experiences, candidate.experiences);
    }

    #[tokio::test]
    async fn test_empty_description_is_left_alone() {
        let mut candidate = make_candidate();
        candidate.experiences = vec![make_experience("Engineer", "Initech", "")];
        let job = make_job();

        let check = check_compliance(&candidate, &job);
        assert!(check.failed_checks.contains(&CHECK_EXPERIENCE_DETAILS.to_string()));

        let match_result = MatchEngine::default().match_profiles(&candidate, &job).unwrap();
        let ctx = TierContext {
            job: &job,
            match_result: &match_result,
            enhancer: &UnavailableEnhancer,
            target_sections: &[],
        };
        let mut cv = candidate.clone();
        apply(&mut cv, &ctx).await;
        assert_eq!(cv.experiences.len(), 1);
        assert_eq!(cv.experiences[0].description, "");
    }

    #[tokio::test]
    async fn test_enhanced_objective_gets_missing_keyword_appended() {
        let candidate = make_candidate();
        let job = make_job();
        let match_result = MatchEngine::default().match_profiles(&candidate, &job).unwrap();
        let enhancer = FixedEnhancer::new("Frontend engineer shipping React apps.");
        let ctx = TierContext {
            job: &job,
            match_result: &match_result,
            enhancer: &enhancer,
            target_sections: &[],
        };

        let mut cv = candidate.clone();
        apply(&mut cv, &ctx).await;
        assert_eq!(
            cv.objective,
            "Frontend engineer shipping React apps. Experienced in Agile."
        );
    }

    #[tokio::test]
    async fn test_no_missing_keywords_skips_enhancer() {
        let mut candidate = make_candidate();
        candidate.objective.push_str(" Agile practitioner.");
        let job = make_job();
        let match_result = MatchEngine::default().match_profiles(&candidate, &job).unwrap();
        let enhancer = FixedEnhancer::new("unused");
        let ctx = TierContext {
            job: &job,
            match_result: &match_result,
            enhancer: &enhancer,
            target_sections: &[],
        };

        let mut cv = candidate.clone();
        apply(&mut cv, &ctx).await;
        assert_eq!(cv.objective, candidate.objective);
        assert_eq!(enhancer.call_count(), 0);
    }
}
