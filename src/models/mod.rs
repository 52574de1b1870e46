//! Data models module
//!
//! Defines tool request/result structures and the provider wire types

use serde::{Deserialize, Serialize};

pub mod provider;
pub mod requests;
pub mod results;

/// The interactive tools served by this API
///
/// Each tool has its own endpoint, quota, prompt template, and result schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    /// Cover-letter generation from a resume and job description
    CoverLetter,
    /// Salary range analysis for a role/location/experience combination
    SalaryAnalysis,
    /// Leadership-readiness scoring from assessment answers
    LeadershipAssessment,
}

impl ToolKind {
    /// Stable name used in routes, logs, and quota bucketing
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::CoverLetter => "cover-letter",
            ToolKind::SalaryAnalysis => "salary-analysis",
            ToolKind::LeadershipAssessment => "leadership-assessment",
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kind_names() {
        assert_eq!(ToolKind::CoverLetter.as_str(), "cover-letter");
        assert_eq!(ToolKind::SalaryAnalysis.as_str(), "salary-analysis");
        assert_eq!(
            ToolKind::LeadershipAssessment.as_str(),
            "leadership-assessment"
        );
    }

    #[test]
    fn test_tool_kind_display_matches_name() {
        for tool in [
            ToolKind::CoverLetter,
            ToolKind::SalaryAnalysis,
            ToolKind::LeadershipAssessment,
        ] {
            assert_eq!(tool.to_string(), tool.as_str());
        }
    }
}
