// Shared prompt constants for every rewrite request.
// Section-specific templates live in optimization/prompts.rs.

/// System prompt for résumé rewriting: plain prose only.
pub const PLAIN_TEXT_SYSTEM: &str = "You are an expert résumé writer optimizing for \
    Applicant Tracking Systems. Respond with the rewritten text only. \
    Do NOT add headings, bullet markers, quotes, or markdown. \
    Do NOT include explanations or apologies.";

/// Common instruction appended to all rewrite prompts.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Do not invent employers, titles, dates, degrees, or metrics that are not \
    implied by the original text. Weave keywords in naturally; never list them verbatim \
    as a keyword dump.";
