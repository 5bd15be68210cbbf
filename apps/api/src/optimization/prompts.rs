// Rewrite prompt templates for the optimization tiers.
// Placeholders are filled with `str::replace`.

pub const OBJECTIVE_PROMPT_TEMPLATE: &str = "\
Rewrite the following professional objective for a {job_title} position.
Naturally include these keywords: {keywords}.
Keep it to 2-3 sentences and under 400 characters.

{no_fabrication}

Current objective:
{objective}";

pub const EXPERIENCE_PROMPT_TEMPLATE: &str = "\
Rewrite the description of this role so it reads as concrete, achievement-focused \
résumé prose for a {job_title} application.
Role: {title} at {company}
Relevant keywords to weave in where truthful: {keywords}
Write 2-3 sentences, at least 100 characters, starting with a strong action verb.

{no_fabrication}

Current description:
{description}";

pub const PROJECT_PROMPT_TEMPLATE: &str = "\
Rewrite this project description for a résumé targeting a {job_title} role.
Project: {name}
Technologies: {technologies}
Keep it to 1-2 sentences that state what was built and the outcome.

{no_fabrication}

Current description:
{description}";
