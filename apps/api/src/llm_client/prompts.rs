// Shared prompt constants and prompt-building utilities.
// Each module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Recruiter persona shared by every field extraction prompt.
pub const RESUME_EXPERT_ROLE: &str = "You are an expert technical recruiter \
    with 10+ years of experience analyzing resumes and identifying \
    professional skills, qualifications, and competencies.";
