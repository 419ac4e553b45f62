// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction appended to prompts whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with the JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Instruction appended to prompts whose answer is shown to a recruiter as-is.
pub const RECRUITER_FORMAT_INSTRUCTION: &str = "\
    Keep it brief, professional, and formatted for direct use (using markdown for tables).";
