// LLM prompt constants for the pipeline stages.
// Reuses cross-cutting fragments from llm_client::prompts.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Role for the ATS analysis system prompt.
pub const ATS_ROLE: &str = "You are an experienced Applicant Tracking System (ATS) analyst \
    with deep knowledge of software engineering, data science, full stack web development, \
    cloud engineering, DevOps and big data engineering. \
    You evaluate resumes against job descriptions for candidates in a competitive market.";

/// ATS analysis prompt. Replace: {schema_instruction}, {resume}, {job_description}
pub const ATS_PROMPT_TEMPLATE: &str = r#"Analyze the resume against the job description. Assign a percentage match based on the key criteria of the role and identify the keywords the resume is missing.

{schema_instruction}
{
  "company_name": "Name of the company the job is for, or \"<null>\" if not mentioned",
  "job_ID": "Job ID if mentioned in the job description, or \"<null>\"",
  "job_description_match_score": 72,
  "missing_keywords": ["keywords present in the job description but missing from the resume"],
  "matching_keywords": ["keywords present in both the resume and the job description"],
  "resume_edit_suggestions": "Markdown suggestions for working the job description's keywords into the resume with a natural flow, without keyword stuffing"
}

RULES:
1. job_description_match_score is an integer from 0 to 100
2. Keywords are technologies, tools, methods and domain terms, not filler words
3. Never invent a company name or job ID that the job description does not state

RESUME:
{resume}

JOB DESCRIPTION:
{job_description}"#;

/// Role for the cold mail system prompt.
pub const COLD_MAIL_ROLE: &str = "You are a professional job applicant writing a cold email \
    to a hiring manager.";

/// Cold mail prompt. Replace: {schema_instruction}, {resume}, {job_description}
pub const COLD_MAIL_PROMPT_TEMPLATE: &str = r#"Read both documents carefully, then write a concise, compelling cold email to the hiring team.

RESUME:
{resume}

JOB DESCRIPTION:
{job_description}

STRUCTURE:
1. A brief, professional subject line naming the specific position
2. A formal greeting (no specific name unless one is provided)
3. An opening of 1-2 sentences showing enthusiasm for the specific role
4. A middle paragraph with 3-4 qualifications from the resume that directly match requirements in the job description, using concrete achievements with metrics where the resume has them
5. A closing paragraph with a clear call to action requesting an interview
6. A professional sign-off and signature

HARD RULES:
- 50 to 100 words in total
- Only experience that actually appears in the resume
- Confident, never arrogant
- NO placeholder text such as "[Company Name]" or "[specific achievement]"
- State at the end that the resume is attached

{schema_instruction}
{
  "subject": "Subject line of the email",
  "main_body": "Ready-to-send email: greeting, body paragraphs and signature"
}"#;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(schema_instruction|resume|job_description)\}").expect("valid regex")
});

/// Fills a stage prompt template in a single pass; inserted text is never
/// scanned for placeholders.
pub fn render(template: &str, schema_instruction: &str, resume: &str, job_description: &str) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "schema_instruction" => schema_instruction,
            "resume" => resume,
            _ => job_description,
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::prompts::SCHEMA_INSTRUCTION;

    #[test]
    fn test_render_fills_every_placeholder() {
        for template in [ATS_PROMPT_TEMPLATE, COLD_MAIL_PROMPT_TEMPLATE] {
            let prompt = render(template, SCHEMA_INSTRUCTION, "RESUME TEXT", "JD TEXT");
            assert!(prompt.contains("RESUME TEXT"));
            assert!(prompt.contains("JD TEXT"));
            assert!(prompt.contains(SCHEMA_INSTRUCTION));
            assert!(!prompt.contains("{resume}"));
            assert!(!prompt.contains("{job_description}"));
            assert!(!prompt.contains("{schema_instruction}"));
        }
    }

    #[test]
    fn test_render_does_not_expand_placeholders_inside_inputs() {
        let prompt = render(
            "R:{resume}|J:{job_description}|S:{schema_instruction}",
            "{job_description}",
            "RESUME_TEXT {job_description}",
            "We use {resume} templates",
        );
        assert_eq!(
            prompt,
            "R:RESUME_TEXT {job_description}|J:We use {resume} templates|S:{job_description}"
        );
    }

    #[test]
    fn test_render_keeps_schema_braces() {
        let prompt = render(ATS_PROMPT_TEMPLATE, SCHEMA_INSTRUCTION, "R", "J");
        assert!(prompt.contains("{\n  \"company_name\""));
    }

    #[test]
    fn test_ats_schema_names_every_field() {
        for field in [
            "company_name",
            "job_ID",
            "job_description_match_score",
            "missing_keywords",
            "matching_keywords",
            "resume_edit_suggestions",
        ] {
            assert!(ATS_PROMPT_TEMPLATE.contains(field), "missing {field}");
        }
    }
}
