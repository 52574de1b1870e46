//! Request validation
//!
//! Pure per-tool validators over the raw payloads. Each check fails fast
//! with the offending field and the violated constraint; the client-side
//! pre-checks are a UX nicety, these are authoritative.

use crate::models::requests::*;
use crate::utils::error::{helpers::validation_error, AppResult};

/// Resume size bounds
pub const RESUME_MAX_CHARS: usize = 15_000;
pub const RESUME_MAX_WORDS: usize = 2_500;
/// Job description size bound
pub const JOB_DESCRIPTION_MAX_CHARS: usize = 4_000;
/// Short-field size bound (job title, location)
pub const SHORT_FIELD_MAX_CHARS: usize = 120;
/// Experience bound in years
pub const YEARS_EXPERIENCE_MAX: i64 = 50;
/// Number of assessment questions
pub const ASSESSMENT_QUESTIONS: usize = 12;
/// Rating scale bounds
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;

fn required_text(
    field: &'static str,
    value: Option<String>,
    max_chars: usize,
) -> AppResult<String> {
    let value = value.unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(validation_error(field, "is required".to_string()));
    }
    if trimmed.chars().count() > max_chars {
        return Err(validation_error(
            field,
            format!("must be at most {} characters", max_chars),
        ));
    }
    Ok(trimmed.to_string())
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Validate a cover-letter request
pub fn validate_cover_letter(raw: CoverLetterRequest) -> AppResult<CoverLetterInput> {
    let resume = required_text("resume", raw.resume, RESUME_MAX_CHARS)?;
    if word_count(&resume) > RESUME_MAX_WORDS {
        return Err(validation_error(
            "resume",
            format!("must be at most {} words", RESUME_MAX_WORDS),
        ));
    }

    let job_description = required_text(
        "jobDescription",
        raw.job_description,
        JOB_DESCRIPTION_MAX_CHARS,
    )?;

    let tone = match raw.tone.as_deref().map(str::trim) {
        None | Some("") => Tone::Professional,
        Some(value) => Tone::parse(value).ok_or_else(|| {
            validation_error("tone", format!("must be one of {}", Tone::ALL.join(", ")))
        })?,
    };

    Ok(CoverLetterInput {
        resume,
        job_description,
        tone,
    })
}

/// Validate a salary-analysis request
pub fn validate_salary_analysis(raw: SalaryAnalysisRequest) -> AppResult<SalaryAnalysisInput> {
    let job_title = required_text("jobTitle", raw.job_title, SHORT_FIELD_MAX_CHARS)?;
    let location = required_text("location", raw.location, SHORT_FIELD_MAX_CHARS)?;

    let years_experience = match raw.years_experience {
        None => return Err(validation_error("yearsExperience", "is required".to_string())),
        Some(years) if !(0..=YEARS_EXPERIENCE_MAX).contains(&years) => {
            return Err(validation_error(
                "yearsExperience",
                format!("must be between 0 and {}", YEARS_EXPERIENCE_MAX),
            ))
        }
        Some(years) => years as u32,
    };

    let industry = match raw.industry.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(Industry::parse(value).ok_or_else(|| {
            validation_error(
                "industry",
                format!("must be one of {}", Industry::ALL.join(", ")),
            )
        })?),
    };

    Ok(SalaryAnalysisInput {
        job_title,
        location,
        years_experience,
        industry,
    })
}

/// Validate a leadership-assessment request
pub fn validate_leadership_assessment(
    raw: LeadershipAssessmentRequest,
) -> AppResult<LeadershipAssessmentInput> {
    let answers = raw
        .answers
        .ok_or_else(|| validation_error("answers", "is required".to_string()))?;

    if answers.len() != ASSESSMENT_QUESTIONS {
        return Err(validation_error(
            "answers",
            format!("must contain exactly {} ratings", ASSESSMENT_QUESTIONS),
        ));
    }

    let mut ratings = Vec::with_capacity(answers.len());
    for (index, answer) in answers.iter().enumerate() {
        if !(RATING_MIN..=RATING_MAX).contains(answer) {
            return Err(validation_error(
                "answers",
                format!(
                    "rating {} must be between {} and {}",
                    index + 1,
                    RATING_MIN,
                    RATING_MAX
                ),
            ));
        }
        ratings.push(*answer as u8);
    }

    let role_level = match raw.role_level.as_deref().map(str::trim) {
        None | Some("") => return Err(validation_error("roleLevel", "is required".to_string())),
        Some(value) => RoleLevel::parse(value).ok_or_else(|| {
            validation_error(
                "roleLevel",
                format!("must be one of {}", RoleLevel::ALL.join(", ")),
            )
        })?,
    };

    Ok(LeadershipAssessmentInput {
        answers: ratings,
        role_level,
    })
}
