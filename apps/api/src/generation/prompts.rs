//! Prompt Builder: turns free-text task fields into deterministic instruction
//! strings. Templates are consts with `{placeholder}` tokens substituted via
//! `.replace`; input fields are interpolated verbatim with no escaping.
//!
//! JSON-producing templates spell out the exact key set and nesting expected,
//! and every template forbids inventing facts or metrics.

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::models::resume::ResumeFields;

/// System prompt for resume generation.
pub const GENERATE_SYSTEM: &str = "You are a professional resume writer \
    producing clean, ATS-friendly resumes. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

const GENERATE_PROMPT_TEMPLATE: &str = r#"Convert the following information into a clean, ATS-friendly resume.

RULES:
- Use strong action verbs (Led, Built, Designed, Implemented)
- Write concise bullet points
- Keep formatting clean and professional
- {no_fabrication}

INPUT:
Name: {name}
Email: {email}
Phone: {phone}
Location: {location}

Education:
{education}

Experience:
{experience}

Projects:
{projects}

Skills:
{skills}

Certifications:
{certifications}

Return ONLY a JSON object with this exact structure:
{
    "name": "...",
    "email": "...",
    "phone": "...",
    "location": "...",
    "summary": "A 2-3 sentence professional summary",
    "education": [
        {"degree": "...", "school": "...", "year": "...", "details": "..."}
    ],
    "experience": [
        {"title": "...", "company": "...", "duration": "...", "bullets": ["...", "..."]}
    ],
    "projects": [
        {"name": "...", "description": "...", "tech": "..."}
    ],
    "skills": ["skill1", "skill2"],
    "certifications": ["cert1", "cert2"]
}"#;

/// Appended to the generation prompt when a target job description is supplied.
const GENERATE_TAILORING_TEMPLATE: &str = r#"

TARGET JOB DESCRIPTION:
{job_description}

Tailor the keyword choices and the professional summary to this job description.
Do NOT invent experience or skills to match it."#;

/// System prompt for resume optimization.
pub const OPTIMIZE_SYSTEM: &str = JSON_ONLY_SYSTEM;

const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"You are an expert resume optimizer. Analyze this resume against the job description and improve it.

RULES:
- Identify weak, vague, or passive bullet points
- Rewrite bullets to be clear and impactful
- Align phrasing with keywords from the job description
- Explain WHAT you changed and WHY
- {no_fabrication}

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Return ONLY a JSON object:
{
    "optimized_resume": "The full optimized resume text",
    "changes": [
        {"original": "old bullet", "improved": "new bullet", "reason": "why this is better"}
    ],
    "ats_score": 75,
    "suggestions": ["suggestion 1", "suggestion 2"]
}"#;

/// System prompt for ATS scoring.
pub const ATS_SYSTEM: &str = JSON_ONLY_SYSTEM;

const ATS_PROMPT_TEMPLATE: &str = r#"You are an ATS (Applicant Tracking System) analyzer. Compare this resume against the job description.

{no_fabrication}

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Analyze and return ONLY a JSON object:
{
    "score": 72,
    "keyword_match": {
        "found": ["keyword1", "keyword2"],
        "missing": ["keyword3", "keyword4"]
    },
    "format_issues": ["issue 1", "issue 2"],
    "content_feedback": ["feedback 1", "feedback 2"],
    "section_scores": {
        "keyword_match": 70,
        "formatting": 80,
        "content_clarity": 65
    },
    "overall_feedback": "Summary of what to improve"
}"#;

/// System prompt for cover letters. Plain text output, no JSON.
pub const COVER_LETTER_SYSTEM: &str = "You are a professional career writer. \
    Respond with the cover letter text only. \
    No JSON, no markdown fences, no commentary before or after the letter.";

const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional 1-page cover letter based on this resume and job description.

RULES:
- Be role-specific and mention the company/role
- Do NOT repeat resume bullet points word-for-word
- Show enthusiasm and fit for the role
- Keep it to 3-4 paragraphs
- Be professional but not robotic
- {no_fabrication}

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Return ONLY the cover letter text, no JSON."#;

/// Builds the resume-generation prompt. Fields are substituted verbatim;
/// a tailoring clause is appended only when a job description is present.
pub fn build_generate_prompt(fields: &ResumeFields) -> String {
    let mut prompt = GENERATE_PROMPT_TEMPLATE
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{name}", &fields.name)
        .replace("{email}", &fields.email)
        .replace("{phone}", &fields.phone)
        .replace("{location}", &fields.location)
        .replace("{education}", &fields.education)
        .replace("{experience}", &fields.experience)
        .replace("{projects}", &fields.projects)
        .replace("{skills}", &fields.skills)
        .replace("{certifications}", &fields.certifications);

    if let Some(jd) = fields.job_description.as_deref().filter(|jd| !jd.trim().is_empty()) {
        prompt.push_str(&GENERATE_TAILORING_TEMPLATE.replace("{job_description}", jd));
    }

    prompt
}

pub fn build_optimize_prompt(resume_text: &str, job_description: &str) -> String {
    OPTIMIZE_PROMPT_TEMPLATE
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}

pub fn build_ats_prompt(resume_text: &str, job_description: &str) -> String {
    ATS_PROMPT_TEMPLATE
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}

pub fn build_cover_letter_prompt(resume_text: &str, job_description: &str) -> String {
    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> ResumeFields {
        ResumeFields {
            name: "Ava Lin".to_string(),
            email: "ava@x.com".to_string(),
            skills: "Go, SQL, Docker".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_prompt_interpolates_fields_verbatim() {
        let prompt = build_generate_prompt(&sample_fields());
        assert!(prompt.contains("Name: Ava Lin"));
        assert!(prompt.contains("Email: ava@x.com"));
        assert!(prompt.contains("Go, SQL, Docker"));
    }

    #[test]
    fn test_generate_prompt_states_output_contract() {
        let prompt = build_generate_prompt(&sample_fields());
        for key in ["\"summary\"", "\"education\"", "\"experience\"", "\"projects\"", "\"skills\"", "\"certifications\""] {
            assert!(prompt.contains(key), "contract missing {key}");
        }
    }

    #[test]
    fn test_generate_prompt_forbids_fabrication() {
        let prompt = build_generate_prompt(&sample_fields());
        assert!(prompt.contains("Do NOT fabricate"));
    }

    #[test]
    fn test_generate_prompt_without_jd_has_no_tailoring_clause() {
        let prompt = build_generate_prompt(&sample_fields());
        assert!(!prompt.contains("TARGET JOB DESCRIPTION"));
    }

    #[test]
    fn test_generate_prompt_with_jd_appends_tailoring_clause() {
        let mut fields = sample_fields();
        fields.job_description = Some("Backend engineer, Go and Postgres".to_string());
        let prompt = build_generate_prompt(&fields);
        assert!(prompt.contains("TARGET JOB DESCRIPTION"));
        assert!(prompt.contains("Backend engineer, Go and Postgres"));
        assert!(prompt.contains("Tailor the keyword choices"));
    }

    #[test]
    fn test_generate_prompt_ignores_blank_jd() {
        let mut fields = sample_fields();
        fields.job_description = Some("   ".to_string());
        let prompt = build_generate_prompt(&fields);
        assert!(!prompt.contains("TARGET JOB DESCRIPTION"));
    }

    #[test]
    fn test_generate_prompt_accepts_empty_fields() {
        let prompt = build_generate_prompt(&ResumeFields::default());
        assert!(prompt.contains("Name: \n"));
    }

    #[test]
    fn test_optimize_prompt_contains_both_inputs_and_contract() {
        let prompt = build_optimize_prompt("my resume text", "the job description");
        assert!(prompt.contains("my resume text"));
        assert!(prompt.contains("the job description"));
        assert!(prompt.contains("\"optimized_resume\""));
        assert!(prompt.contains("\"changes\""));
        assert!(prompt.contains("Do NOT fabricate"));
    }

    #[test]
    fn test_ats_prompt_states_section_scores_contract() {
        let prompt = build_ats_prompt("resume", "jd");
        assert!(prompt.contains("\"keyword_match\""));
        assert!(prompt.contains("\"section_scores\""));
        assert!(prompt.contains("\"content_clarity\""));
    }

    #[test]
    fn test_cover_letter_prompt_requests_plain_text() {
        let prompt = build_cover_letter_prompt("resume", "jd");
        assert!(prompt.contains("Return ONLY the cover letter text, no JSON."));
    }
}
