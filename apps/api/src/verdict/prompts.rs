// All LLM prompt constants for the Verdict module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, RECRUITER_FORMAT_INSTRUCTION};

/// Score prompt template. Replace `{job_description}`, `{resume_text}` and
/// `{json_only}` before sending.
pub const SCORE_PROMPT_TEMPLATE: &str = r#"Given the job description and resume, rate the resume's relevance on a 0-10 scale and provide a brief summary of strengths/weaknesses.
Respond as JSON: {"score": <score>, "summary": "<summary>"}
{json_only}

Job Description:
{job_description}

Resume:
{resume_text}
"#;

/// Verdict prompt template. Replace `{job_description}`, `{resume_text}` and
/// `{format}` before sending.
pub const VERDICT_PROMPT_TEMPLATE: &str = r#"You are an expert HR Analyst.

Compare the following Job Description and Resume.

- Give a final assessment (Strong Match, Moderate Match, Not a Match, etc.) for shortlisting, and explain why.
- Create a table: "Key Matching Areas" with columns [JD Requirement, Candidate Experience] (show at least 5 points).
- Create a table: "Minor Gaps (if any)" with columns [Gap, Mitigation] (show up to 3 points, or say "None").
- {format}

Job Description:
{job_description}

Candidate Resume:
{resume_text}
"#;

pub const SCORE_TEMPERATURE: f32 = 0.1;
pub const SCORE_MAX_TOKENS: u32 = 350;
pub const VERDICT_TEMPERATURE: f32 = 0.2;
pub const VERDICT_MAX_TOKENS: u32 = 800;

pub fn build_score_prompt(job_description: &str, resume_text: &str) -> String {
    fill_template(
        SCORE_PROMPT_TEMPLATE,
        &[
            ("{json_only}", JSON_ONLY_INSTRUCTION),
            ("{job_description}", job_description),
            ("{resume_text}", resume_text),
        ],
    )
}

pub fn build_verdict_prompt(job_description: &str, resume_text: &str) -> String {
    fill_template(
        VERDICT_PROMPT_TEMPLATE,
        &[
            ("{format}", RECRUITER_FORMAT_INSTRUCTION),
            ("{job_description}", job_description),
            ("{resume_text}", resume_text),
        ],
    )
}

/// Substitutes placeholders in one left-to-right pass over the template.
/// Inserted values are never scanned again.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|(key, value)| rest.find(*key).map(|at| (at, *key, *value)))
            .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, key, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + key.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
