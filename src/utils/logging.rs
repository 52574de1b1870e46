//! Logging utilities
//!
//! Log-safe summaries of tool payloads. Submitted content (resume text,
//! job descriptions, assessment answers) is never logged; summaries carry
//! field sizes and enum choices only.

use crate::models::requests::{
    CoverLetterRequest, LeadershipAssessmentRequest, SalaryAnalysisRequest,
};

fn len_of(value: &Option<String>) -> usize {
    value.as_deref().map(str::len).unwrap_or(0)
}

/// Summary of a cover-letter request for debug logs
pub fn cover_letter_log_summary(request: &CoverLetterRequest) -> serde_json::Value {
    serde_json::json!({
        "resume_chars": len_of(&request.resume),
        "job_description_chars": len_of(&request.job_description),
        "tone": request.tone,
    })
}

/// Summary of a salary-analysis request for debug logs
///
/// Job title and location are low-sensitivity, but the same redaction rule
/// is applied across every tool.
pub fn salary_log_summary(request: &SalaryAnalysisRequest) -> serde_json::Value {
    serde_json::json!({
        "job_title_chars": len_of(&request.job_title),
        "location_chars": len_of(&request.location),
        "years_experience": request.years_experience,
        "industry": request.industry,
    })
}

/// Summary of a leadership-assessment request for debug logs
pub fn leadership_log_summary(request: &LeadershipAssessmentRequest) -> serde_json::Value {
    serde_json::json!({
        "answer_count": request.answers.as_ref().map(Vec::len).unwrap_or(0),
        "role_level": request.role_level,
    })
}
