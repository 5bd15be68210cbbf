//! Lexical normalization and token-overlap similarity shared by every matcher.

use std::collections::HashSet;

/// Similarity at or above which two distinct strings count as a partial match.
pub const PARTIAL_MATCH_THRESHOLD: f64 = 0.6;

/// Similarity assigned when one token set strictly contains the other.
const CONTAINMENT_SIMILARITY: f64 = 0.8;

/// `+` and `#` carry meaning in skill names (C++, C#, F#).
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// Lowercases, trims, strips punctuation and collapses whitespace.
///
/// `Node.js`, `node.js` and `NodeJS` all normalize to `nodejs`.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .split_whitespace()
        .map(|word| word.chars().filter(|&c| is_word_char(c)).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits on whitespace and punctuation into lowercase tokens.
pub fn tokenize(s: &str) -> Vec<String> {
    s.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn token_set(s: &str) -> HashSet<String> {
    tokenize(s).into_iter().collect()
}

/// Token Jaccard similarity in `[0.0, 1.0]`.
///
/// Normalized equality scores 1.0. A strict subset relation between the token
/// sets (`React.js` vs `React`) scores at least 0.8, so abbreviations and
/// suffixed variants land in the partial band.
pub fn similarity(a: &str, b: &str) -> f64 {
    let (na, nb) = (normalize(a), normalize(b));
    if na.is_empty() || nb.is_empty() {
        return 0.0;
    }
    if na == nb {
        return 1.0;
    }

    let ta = token_set(a);
    let tb = token_set(b);
    let intersection = ta.intersection(&tb).count();
    let union = ta.union(&tb).count();
    if union == 0 {
        return 0.0;
    }
    let jaccard = intersection as f64 / union as f64;

    let contained = intersection > 0 && (intersection == ta.len() || intersection == tb.len());
    if contained {
        // Equal token sets with different spelling stay below exact.
        jaccard.max(CONTAINMENT_SIMILARITY).min(0.99)
    } else {
        jaccard
    }
}

/// Needles this short only count as whole tokens ("Go" is not in "Good").
const SHORT_NEEDLE_CHARS: usize = 2;

/// Case-insensitive, non-overlapping substring count.
///
/// Needles of one or two characters match whole tokens only.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    if needle.chars().count() <= SHORT_NEEDLE_CHARS {
        return tokenize(haystack).iter().filter(|t| **t == needle).count();
    }
    haystack.to_lowercase().matches(needle.as_str()).count()
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    count_occurrences(haystack, needle) > 0
}

/// Rounds a ratio to an integer percentage clamped to `0..=100`.
pub fn percent(numerator: f64, denominator: f64) -> u32 {
    if denominator <= 0.0 {
        return 100;
    }
    ((numerator / denominator) * 100.0).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  Node.js "), "nodejs");
        assert_eq!(normalize("NodeJS"), "nodejs");
        assert_eq!(normalize("C++"), "c++");
        assert_eq!(normalize("Machine   Learning!"), "machine learning");
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        assert_eq!(tokenize("React.js"), vec!["react", "js"]);
        assert_eq!(tokenize("CI/CD pipelines"), vec!["ci", "cd", "pipelines"]);
        assert!(tokenize("...").is_empty());
    }

    #[test]
    fn test_similarity_exact_is_one() {
        assert_eq!(similarity("Node.js", "nodejs"), 1.0);
    }

    #[test]
    fn test_similarity_react_variants_are_partial() {
        let s = similarity("React.js", "React");
        assert!(s >= PARTIAL_MATCH_THRESHOLD && s < 1.0, "got {s}");
    }

    #[test]
    fn test_similarity_java_javascript_is_not_partial() {
        assert!(similarity("Java", "JavaScript") < PARTIAL_MATCH_THRESHOLD);
    }

    #[test]
    fn test_similarity_field_with_suffix() {
        let s = similarity("Computer Science", "Computer Science and Engineering");
        assert!(s >= PARTIAL_MATCH_THRESHOLD);
    }

    #[test]
    fn test_similarity_disjoint_is_zero() {
        assert_eq!(similarity("Rust", "Python"), 0.0);
        assert_eq!(similarity("", "Python"), 0.0);
    }

    #[test]
    fn test_count_occurrences_case_insensitive() {
        assert_eq!(count_occurrences("Agile team, agile ceremonies", "AGILE"), 2);
        assert_eq!(count_occurrences("anything", "  "), 0);
    }

    #[test]
    fn test_short_keywords_match_whole_tokens_only() {
        let text = "Good communicator with a strong record";
        assert!(!contains_ignore_case(text, "Go"));
        assert!(!contains_ignore_case(text, "C"));
        assert_eq!(count_occurrences("Services in Go; go tooling", "Go"), 2);
        assert!(contains_ignore_case("Wrote C and C# daily", "C#"));
        assert_eq!(count_occurrences("C++ and C", "C"), 1);
    }

    #[test]
    fn test_percent_bounds() {
        assert_eq!(percent(1.0, 2.0), 50);
        assert_eq!(percent(3.0, 2.0), 100);
        assert_eq!(percent(0.0, 0.0), 100);
        assert_eq!(percent(2.0, 3.0), 67);
    }
}
