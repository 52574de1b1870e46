//! Tool request payloads
//!
//! Raw payloads keep every field optional so that missing or malformed
//! fields surface as field-named validation errors instead of opaque
//! deserialization failures. The validated forms carry trimmed text and
//! closed enums.

use serde::Deserialize;

/// Raw cover-letter request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    /// Resume text pasted by the user
    #[serde(default)]
    pub resume: Option<String>,
    /// Target job description text
    #[serde(default)]
    pub job_description: Option<String>,
    /// Requested tone of voice
    #[serde(default)]
    pub tone: Option<String>,
}

/// Raw salary-analysis request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryAnalysisRequest {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub years_experience: Option<i64>,
    #[serde(default)]
    pub industry: Option<String>,
}

/// Raw leadership-assessment request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadershipAssessmentRequest {
    /// Self-assessment ratings, one per question
    #[serde(default)]
    pub answers: Option<Vec<i64>>,
    #[serde(default)]
    pub role_level: Option<String>,
}

/// Cover-letter tone, closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Professional,
    Conversational,
    Enthusiastic,
}

impl Tone {
    pub const ALL: [&'static str; 3] = ["professional", "conversational", "enthusiastic"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "professional" => Some(Tone::Professional),
            "conversational" => Some(Tone::Conversational),
            "enthusiastic" => Some(Tone::Enthusiastic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Conversational => "conversational",
            Tone::Enthusiastic => "enthusiastic",
        }
    }
}

/// Industry segment, closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Industry {
    Technology,
    Healthcare,
    Finance,
    Education,
    Manufacturing,
    Retail,
    Other,
}

impl Industry {
    pub const ALL: [&'static str; 7] = [
        "technology",
        "healthcare",
        "finance",
        "education",
        "manufacturing",
        "retail",
        "other",
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "technology" => Some(Industry::Technology),
            "healthcare" => Some(Industry::Healthcare),
            "finance" => Some(Industry::Finance),
            "education" => Some(Industry::Education),
            "manufacturing" => Some(Industry::Manufacturing),
            "retail" => Some(Industry::Retail),
            "other" => Some(Industry::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::Healthcare => "healthcare",
            Industry::Finance => "finance",
            Industry::Education => "education",
            Industry::Manufacturing => "manufacturing",
            Industry::Retail => "retail",
            Industry::Other => "other",
        }
    }
}

/// Role seniority for the leadership assessment, closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleLevel {
    IndividualContributor,
    Manager,
    Director,
    Executive,
}

impl RoleLevel {
    pub const ALL: [&'static str; 4] = [
        "individual_contributor",
        "manager",
        "director",
        "executive",
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "individual_contributor" => Some(RoleLevel::IndividualContributor),
            "manager" => Some(RoleLevel::Manager),
            "director" => Some(RoleLevel::Director),
            "executive" => Some(RoleLevel::Executive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleLevel::IndividualContributor => "individual_contributor",
            RoleLevel::Manager => "manager",
            RoleLevel::Director => "director",
            RoleLevel::Executive => "executive",
        }
    }
}

/// Validated cover-letter input
#[derive(Debug, Clone)]
pub struct CoverLetterInput {
    pub resume: String,
    pub job_description: String,
    pub tone: Tone,
}

/// Validated salary-analysis input
#[derive(Debug, Clone)]
pub struct SalaryAnalysisInput {
    pub job_title: String,
    pub location: String,
    pub years_experience: u32,
    pub industry: Option<Industry>,
}

/// Validated leadership-assessment input
#[derive(Debug, Clone)]
pub struct LeadershipAssessmentInput {
    pub answers: Vec<u8>,
    pub role_level: RoleLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_round_trip() {
        for name in Tone::ALL {
            let tone = Tone::parse(name).expect("known tone");
            assert_eq!(tone.as_str(), name);
        }
        assert!(Tone::parse("sarcastic").is_none());
    }

    #[test]
    fn test_industry_round_trip() {
        for name in Industry::ALL {
            let industry = Industry::parse(name).expect("known industry");
            assert_eq!(industry.as_str(), name);
        }
        assert!(Industry::parse("piracy").is_none());
    }

    #[test]
    fn test_role_level_round_trip() {
        for name in RoleLevel::ALL {
            let level = RoleLevel::parse(name).expect("known level");
            assert_eq!(level.as_str(), name);
        }
        assert!(RoleLevel::parse("intern").is_none());
    }

    #[test]
    fn test_raw_payload_tolerates_missing_fields() {
        let request: CoverLetterRequest = serde_json::from_str("{}").unwrap();
        assert!(request.resume.is_none());
        assert!(request.job_description.is_none());
        assert!(request.tone.is_none());
    }

    #[test]
    fn test_raw_payload_camel_case_keys() {
        let request: SalaryAnalysisRequest = serde_json::from_str(
            r#"{"jobTitle": "Data Engineer", "location": "Austin, TX", "yearsExperience": 4}"#,
        )
        .unwrap();
        assert_eq!(request.job_title.as_deref(), Some("Data Engineer"));
        assert_eq!(request.years_experience, Some(4));
    }
}
