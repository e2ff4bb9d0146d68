//! Field-specific instruction templates for the delegated strategies.
//!
//! Every prompt pins the response to a single raw JSON value so the typed
//! parsing in `delegated.rs` can validate the shape directly. Header fields
//! (phone) only need the top of the document; list fields (education,
//! experience) get the full text.

use crate::llm_client::prompts::RESUME_EXPERT_ROLE;

/// Contact details live near the top of a resume.
const PHONE_TRUNCATION_CHARS: usize = 1000;
/// Skills sections can appear anywhere in the first pages.
const SKILLS_TRUNCATION_CHARS: usize = 3000;

pub fn phone_prompt(resume_text: &str) -> String {
    let text = truncate_chars(resume_text, PHONE_TRUNCATION_CHARS);
    format!(
        r#"{RESUME_EXPERT_ROLE}

I need you to identify the phone number of the candidate from the following resume text.

Look for formats like: +1 (123) 456-7890, +1-123-456-7890, (123) 456-7890, 123-456-7890, etc.

IMPORTANT: Your response must be a single, valid, raw JSON object with the phone field.
Do not add any comments, introductory text, or markdown formatting.
If no phone number is found, return {{"phone": null}}

JSON format:
{{"phone": "+1 (123) 456-7890"}}

Resume text:
{text}

Please place your answer here (JSON object only):"#
    )
}

pub fn skills_prompt(resume_text: &str) -> String {
    let text = truncate_chars(resume_text, SKILLS_TRUNCATION_CHARS);
    format!(
        r#"{RESUME_EXPERT_ROLE}

I need you to analyze the following resume text and extract ALL relevant professional skills EXPLICITLY mentioned in the resume.

ONLY extract skills that are clearly listed or mentioned. Do NOT infer or add generic skills.

Focus on identifying:
- Programming languages (Python, JavaScript, C++, Java, etc.)
- Frameworks and libraries (FastAPI, Django, React, PyTorch, TensorFlow, etc.)
- Tools and technologies (Docker, Git, AWS, Azure, Kubernetes, etc.)
- Databases (PostgreSQL, MySQL, MongoDB, Redis, etc.)
- Machine learning / AI technologies (LLMs, RAG, computer vision, NLP, etc.)
- Certifications mentioned

IMPORTANT:
- Your response must be a single, valid, raw JSON array of strings
- Do NOT add any comments, introductory text, or markdown formatting
- Only include skills EXPLICITLY mentioned in the resume text

JSON format:
["skill1", "skill2", "skill3"]

Resume text:
{text}

Please place your answer here (JSON array only):"#
    )
}

pub fn education_prompt(resume_text: &str) -> String {
    format!(
        r#"{RESUME_EXPERT_ROLE}

I need you to extract ALL education entries from the following resume text.

For each education entry, extract:
- institution: University/College name
- degree: Degree type (BSc, MSc, PhD, etc.)
- field_of_study: Field of study
- graduation_date: Graduation year (or "Present" if ongoing)

IMPORTANT:
- Your response must be a single, valid, raw JSON array of objects
- Do not add any comments, introductory text, or markdown formatting
- Extract ALL education entries, not just the most recent
- Use null for values not present in the text
- If no education is found, return []

JSON format:
[
  {{
    "institution": "University Name",
    "degree": "BSc",
    "field_of_study": "Computer Science",
    "graduation_date": "2020"
  }}
]

Resume text:
{resume_text}

Please place your answer here (JSON array only):"#
    )
}

pub fn experience_prompt(resume_text: &str) -> String {
    format!(
        r#"{RESUME_EXPERT_ROLE}

I need you to extract ALL work experience entries from the following resume text.

For each experience entry, extract:
- company: Company name
- title: Job title/position
- start_date: Start date (e.g., "May 2025", "Nov 2023")
- end_date: End date (or "Present" if current)
- description: Brief summary of responsibilities (1-2 sentences max)

IMPORTANT:
- Your response must be a single, valid, raw JSON array of objects
- Do not add any comments, introductory text, or markdown formatting
- Extract ALL experience entries in reverse chronological order
- Keep descriptions brief and factual
- Use null for values not present in the text
- If no experience is found, return []

JSON format:
[
  {{
    "company": "Company Name",
    "title": "Job Title",
    "start_date": "Jan 2023",
    "end_date": "Present",
    "description": "Brief description of role and responsibilities"
  }}
]

Resume text:
{resume_text}

Please place your answer here (JSON array only):"#
    )
}

/// Truncates on a character boundary so multibyte text never splits.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
