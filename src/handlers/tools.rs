//! Tool endpoint handlers
//!
//! One POST handler per interactive tool. Each handler derives the caller's
//! quota identity and runs the shared generation pipeline with its tool's
//! validator, prompt template, and result parser.

use crate::handlers::AppState;
use crate::middleware::client_identity;
use crate::models::requests::*;
use crate::models::results::*;
use crate::models::ToolKind;
use crate::services::{parser, pipeline, prompt, validate};
use crate::utils::error::AppResult;
use crate::utils::logging as log_summary;
use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;
use tracing::debug;

/// Handle cover-letter generation
///
/// POST /api/tools/cover-letter
pub async fn generate_cover_letter(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CoverLetterRequest>,
) -> AppResult<Json<CoverLetterResult>> {
    debug!(
        "Received cover-letter request: {}",
        log_summary::cover_letter_log_summary(&payload)
    );
    let identity = client_identity(&headers);

    let result = pipeline::run(
        state.quotas.for_tool(ToolKind::CoverLetter),
        state.provider.as_ref(),
        &identity,
        ToolKind::CoverLetter,
        || validate::validate_cover_letter(payload),
        prompt::build_cover_letter_prompt,
        parser::parse_cover_letter,
    )
    .await?;

    Ok(Json(result))
}

/// Handle salary analysis
///
/// POST /api/tools/salary-analysis
pub async fn analyze_salary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<SalaryAnalysisRequest>,
) -> AppResult<Json<SalaryAnalysisResult>> {
    debug!(
        "Received salary-analysis request: {}",
        log_summary::salary_log_summary(&payload)
    );
    let identity = client_identity(&headers);

    let result = pipeline::run(
        state.quotas.for_tool(ToolKind::SalaryAnalysis),
        state.provider.as_ref(),
        &identity,
        ToolKind::SalaryAnalysis,
        || validate::validate_salary_analysis(payload),
        prompt::build_salary_prompt,
        parser::parse_salary_analysis,
    )
    .await?;

    Ok(Json(result))
}

/// Handle leadership-readiness assessment
///
/// POST /api/tools/leadership-assessment
pub async fn assess_leadership(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<LeadershipAssessmentRequest>,
) -> AppResult<Json<LeadershipReport>> {
    debug!(
        "Received leadership-assessment request: {}",
        log_summary::leadership_log_summary(&payload)
    );
    let identity = client_identity(&headers);

    let result = pipeline::run(
        state.quotas.for_tool(ToolKind::LeadershipAssessment),
        state.provider.as_ref(),
        &identity,
        ToolKind::LeadershipAssessment,
        || validate::validate_leadership_assessment(payload),
        prompt::build_leadership_prompt,
        parser::parse_leadership_report,
    )
    .await?;

    Ok(Json(result))
}
