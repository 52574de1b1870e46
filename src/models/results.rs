//! Tool result structures
//!
//! Results conform exactly to each tool's declared schema; the UI renders
//! these bodies without further validation. Keys serialize in camelCase to
//! match the endpoint contract.

use serde::{Deserialize, Serialize};

/// Cover-letter generation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResult {
    /// The generated letter text
    pub cover_letter: String,
    /// Word count of `cover_letter`
    pub word_count: usize,
}

/// Salary analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryAnalysisResult {
    /// ISO currency code, defaults to USD when the model omits it
    pub currency: String,
    /// 25th percentile annual salary
    pub p25: u64,
    /// Median annual salary
    pub median: u64,
    /// 75th percentile annual salary
    pub p75: u64,
    /// Estimate confidence, 0-100
    pub confidence: u8,
    /// Factors influencing the estimate; may be empty
    pub factors: Vec<String>,
}

/// Leadership-readiness report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadershipReport {
    /// Overall readiness score, 0-100
    pub overall_score: u8,
    /// Per-dimension breakdown; never empty
    pub dimensions: Vec<DimensionScore>,
    /// Narrative summary; may be empty
    pub summary: String,
    /// Suggested next steps; may be empty
    pub recommendations: Vec<String>,
}

/// One scored leadership dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore {
    pub name: String,
    /// 0-100
    pub score: u8,
}

/// Error body returned by every failing endpoint
///
/// The `error` discriminant is the contract the UI keys its messaging on;
/// the HTTP status alone is not enough to distinguish the service's own
/// rate limit from an upstream one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine-readable error code, e.g. "RATE_LIMIT_EXCEEDED"
    pub error: String,
    /// Human-readable message with enough specificity to act on
    pub message: String,
    /// Seconds until the caller's quota window rolls over; rate limit only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}
