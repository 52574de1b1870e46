//! Model output parsing
//!
//! Extracts structured results from untrusted model output and validates
//! them against each tool's closed schema. Required fields that are missing
//! or mistyped fail the request; optional fields coerce to defaults.
//! Scores clamp to their declared range instead of rejecting, since model
//! output is usually near-correct.

use serde_json::Value;

use crate::models::results::*;
use crate::utils::error::{helpers::parse_error, AppResult};

/// Strip ```json ... ``` or ``` ... ``` code fences from model output
fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match stripped {
        Some(inner) => inner
            .trim_start()
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or_else(|| inner.trim_start()),
        None => text,
    }
}

/// Extract the outermost JSON object from possibly-prose-wrapped output
fn extract_json(text: &str) -> Option<Value> {
    let text = strip_fences(text);
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Clamp a raw score into 0..=100
fn clamp_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

fn required_number(object: &Value, key: &str) -> AppResult<f64> {
    object
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| parse_error(format!("missing or non-numeric field '{key}'")))
}

fn required_salary(object: &Value, key: &str) -> AppResult<u64> {
    let value = required_number(object, key)?;
    if value < 0.0 {
        return Err(parse_error(format!("field '{key}' cannot be negative")));
    }
    Ok(value.round() as u64)
}

fn optional_string(object: &Value, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn optional_string_array(object: &Value, key: &str) -> Vec<String> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a cover-letter completion
///
/// Accepts `{"coverLetter": ...}` (snake_case variant tolerated); falls
/// back to treating non-empty plain text as the letter itself, since some
/// models answer in prose despite the JSON instruction.
pub fn parse_cover_letter(raw: &str) -> AppResult<CoverLetterResult> {
    let letter = match extract_json(raw) {
        Some(object) => optional_string(&object, "coverLetter")
            .or_else(|| optional_string(&object, "cover_letter"))
            .ok_or_else(|| parse_error("missing field 'coverLetter'"))?,
        None => {
            let text = strip_fences(raw).trim().to_string();
            if text.is_empty() {
                return Err(parse_error("model returned empty output"));
            }
            text
        }
    };

    let word_count = letter.split_whitespace().count();
    Ok(CoverLetterResult {
        cover_letter: letter,
        word_count,
    })
}

/// Parse a salary-analysis completion
pub fn parse_salary_analysis(raw: &str) -> AppResult<SalaryAnalysisResult> {
    let object =
        extract_json(raw).ok_or_else(|| parse_error("no JSON object in model output"))?;

    let p25 = required_salary(&object, "p25")?;
    let median = required_salary(&object, "median")?;
    let p75 = required_salary(&object, "p75")?;

    let confidence = object
        .get("confidence")
        .and_then(Value::as_f64)
        .map(clamp_score)
        .unwrap_or(50);

    Ok(SalaryAnalysisResult {
        currency: optional_string(&object, "currency").unwrap_or_else(|| "USD".to_string()),
        p25,
        median,
        p75,
        confidence,
        factors: optional_string_array(&object, "factors"),
    })
}

/// Parse a leadership-assessment completion
///
/// `dimensions` must be present and non-empty: the report page cannot
/// render without at least one scored dimension.
pub fn parse_leadership_report(raw: &str) -> AppResult<LeadershipReport> {
    let object =
        extract_json(raw).ok_or_else(|| parse_error("no JSON object in model output"))?;

    let overall_score = clamp_score(required_number(&object, "overallScore")?);

    let raw_dimensions = object
        .get("dimensions")
        .and_then(Value::as_array)
        .ok_or_else(|| parse_error("missing or non-array field 'dimensions'"))?;

    let mut dimensions = Vec::with_capacity(raw_dimensions.len());
    for entry in raw_dimensions {
        let name = optional_string(entry, "name")
            .ok_or_else(|| parse_error("dimension entry missing 'name'"))?;
        let score = clamp_score(required_number(entry, "score")?);
        dimensions.push(DimensionScore { name, score });
    }

    if dimensions.is_empty() {
        return Err(parse_error("field 'dimensions' must not be empty"));
    }

    Ok(LeadershipReport {
        overall_score,
        dimensions,
        summary: optional_string(&object, "summary").unwrap_or_default(),
        recommendations: optional_string_array(&object, "recommendations"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_with_json_tag() {
        assert_eq!(strip_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fences_without_tag() {
        assert_eq!(strip_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fences_no_fences() {
        assert_eq!(strip_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_from_prose() {
        let value = extract_json("Here you go: {\"a\": 1} hope that helps").unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_cover_letter_from_json() {
        let result =
            parse_cover_letter(r#"{"coverLetter": "Dear hiring manager, I am writing."}"#).unwrap();
        assert_eq!(result.word_count, 6);
    }

    #[test]
    fn test_cover_letter_plain_text_fallback() {
        let result = parse_cover_letter("Dear hiring manager, consider me.").unwrap();
        assert_eq!(result.cover_letter, "Dear hiring manager, consider me.");
        assert_eq!(result.word_count, 5);
    }

    #[test]
    fn test_cover_letter_empty_output_fails() {
        assert!(parse_cover_letter("   \n ").is_err());
    }

    #[test]
    fn test_cover_letter_json_missing_field_fails() {
        // A JSON object without the letter must not fall back to raw text.
        assert!(parse_cover_letter(r#"{"letter": "wrong key"}"#).is_err());
    }

    #[test]
    fn test_salary_happy_path() {
        let raw = r#"{"currency": "EUR", "p25": 60000, "median": 75000, "p75": 90000,
                      "confidence": 80, "factors": ["market demand"]}"#;
        let result = parse_salary_analysis(raw).unwrap();
        assert_eq!(result.currency, "EUR");
        assert_eq!(result.median, 75000);
        assert_eq!(result.confidence, 80);
        assert_eq!(result.factors, vec!["market demand".to_string()]);
    }

    #[test]
    fn test_salary_defaults_for_optional_fields() {
        let result =
            parse_salary_analysis(r#"{"p25": 50000, "median": 60000, "p75": 70000}"#).unwrap();
        assert_eq!(result.currency, "USD");
        assert_eq!(result.confidence, 50);
        assert!(result.factors.is_empty());
    }

    #[test]
    fn test_salary_missing_required_field_fails() {
        let error =
            parse_salary_analysis(r#"{"p25": 50000, "p75": 70000}"#).unwrap_err();
        assert!(error.to_string().contains("median"));
    }

    #[test]
    fn test_salary_string_number_fails() {
        assert!(
            parse_salary_analysis(r#"{"p25": "fifty", "median": 60000, "p75": 70000}"#).is_err()
        );
    }

    #[test]
    fn test_confidence_clamped_not_rejected() {
        let raw = r#"{"p25": 1, "median": 2, "p75": 3, "confidence": 150}"#;
        assert_eq!(parse_salary_analysis(raw).unwrap().confidence, 100);

        let raw = r#"{"p25": 1, "median": 2, "p75": 3, "confidence": -20}"#;
        assert_eq!(parse_salary_analysis(raw).unwrap().confidence, 0);
    }

    #[test]
    fn test_leadership_happy_path() {
        let raw = r#"{"overallScore": 72,
                      "dimensions": [{"name": "communication", "score": 85}],
                      "summary": "Solid base.",
                      "recommendations": ["Lead a project"]}"#;
        let report = parse_leadership_report(raw).unwrap();
        assert_eq!(report.overall_score, 72);
        assert_eq!(report.dimensions[0].score, 85);
    }

    #[test]
    fn test_leadership_scores_clamped() {
        let raw = r#"{"overallScore": 150,
                      "dimensions": [{"name": "vision", "score": -5}]}"#;
        let report = parse_leadership_report(raw).unwrap();
        assert_eq!(report.overall_score, 100);
        assert_eq!(report.dimensions[0].score, 0);
        assert_eq!(report.summary, "");
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_leadership_empty_dimensions_fails() {
        let raw = r#"{"overallScore": 70, "dimensions": []}"#;
        assert!(parse_leadership_report(raw).is_err());
    }

    #[test]
    fn test_leadership_missing_dimensions_fails() {
        assert!(parse_leadership_report(r#"{"overallScore": 70}"#).is_err());
    }

    #[test]
    fn test_fenced_output_parses() {
        let raw = "```json\n{\"p25\": 10, \"median\": 20, \"p75\": 30}\n```";
        assert_eq!(parse_salary_analysis(raw).unwrap().median, 20);
    }
}
