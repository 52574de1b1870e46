//! Prompt construction
//!
//! Deterministic template substitution per tool: the same validated input
//! always produces byte-identical prompt text. User-supplied text is
//! neutralized before interpolation so it cannot terminate the prompt's own
//! section delimiters.

use crate::models::requests::{CoverLetterInput, LeadershipAssessmentInput, SalaryAnalysisInput};

/// System and user halves of one upstream call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPrompt {
    pub system: &'static str,
    pub user: String,
}

/// System prompt for cover-letter generation
pub const COVER_LETTER_SYSTEM: &str = "You are an expert career writer. \
    Write a cover letter tailored to the candidate's resume and the job description. \
    Respond with a single JSON object: {\"coverLetter\": string}. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// System prompt for salary analysis
pub const SALARY_SYSTEM: &str = "You are a compensation analyst. \
    Estimate the annual salary range for the given role. \
    Respond with a single JSON object: \
    {\"currency\": string, \"p25\": number, \"median\": number, \"p75\": number, \
    \"confidence\": number (0-100), \"factors\": [string]}. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// System prompt for the leadership assessment
pub const LEADERSHIP_SYSTEM: &str = "You are a leadership coach. \
    Score the candidate's leadership readiness from their self-assessment. \
    Respond with a single JSON object: \
    {\"overallScore\": number (0-100), \
    \"dimensions\": [{\"name\": string, \"score\": number (0-100)}], \
    \"summary\": string, \"recommendations\": [string]}. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Neutralize user text before interpolating it into a prompt
///
/// Strips control characters (newlines kept) and breaks code fences so
/// pasted text cannot be mistaken for prompt structure.
pub fn neutralize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect();
    cleaned.replace("```", "` ` `")
}

/// Build the cover-letter prompt
pub fn build_cover_letter_prompt(input: &CoverLetterInput) -> ToolPrompt {
    let user = format!(
        "TONE: {tone}\n\nRESUME:\n{resume}\n\nJOB DESCRIPTION:\n{job_description}",
        tone = input.tone.as_str(),
        resume = neutralize(&input.resume),
        job_description = neutralize(&input.job_description),
    );
    ToolPrompt {
        system: COVER_LETTER_SYSTEM,
        user,
    }
}

/// Build the salary-analysis prompt
pub fn build_salary_prompt(input: &SalaryAnalysisInput) -> ToolPrompt {
    let industry = input
        .industry
        .map(|i| i.as_str())
        .unwrap_or("unspecified");
    let user = format!(
        "JOB TITLE: {title}\nLOCATION: {location}\nYEARS OF EXPERIENCE: {years}\nINDUSTRY: {industry}",
        title = neutralize(&input.job_title),
        location = neutralize(&input.location),
        years = input.years_experience,
        industry = industry,
    );
    ToolPrompt {
        system: SALARY_SYSTEM,
        user,
    }
}

/// Build the leadership-assessment prompt
pub fn build_leadership_prompt(input: &LeadershipAssessmentInput) -> ToolPrompt {
    let answers = input
        .answers
        .iter()
        .enumerate()
        .map(|(i, rating)| format!("Q{}: {}/5", i + 1, rating))
        .collect::<Vec<_>>()
        .join("\n");
    let user = format!(
        "ROLE LEVEL: {level}\n\nSELF-ASSESSMENT RATINGS:\n{answers}",
        level = input.role_level.as_str(),
        answers = answers,
    );
    ToolPrompt {
        system: LEADERSHIP_SYSTEM,
        user,
    }
}
