//! Response Interpreter: extracts a structured result from untrusted model
//! output. Models prepend and append commentary around JSON, so extraction
//! scans for the first balanced top-level `{...}` span rather than decoding
//! the whole response.
//!
//! Failure here is an expected outcome, not an exception: every function
//! returns `ParseFailure` in the error position and never panics.

use serde::de::DeserializeOwned;

use thiserror::Error;

use crate::models::resume::{AtsReport, OptimizationResult, ResumePayload};

/// Model output carried no extractable, decodable, shape-plausible JSON
/// (or, for plain-text tasks, no text at all).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparsable model output: {reason}")]
pub struct ParseFailure {
    pub reason: String,
}

impl ParseFailure {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Returns the first balanced top-level `{...}` span in `text`, or `None`.
///
/// Bounded brace-matching scan: tracks nesting depth and skips over string
/// literals (including escapes), so braces inside JSON strings and trailing
/// JSON-like fragments never confuse the match.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extracts and strictly decodes the JSON object, then checks superficial
/// validity: the object must carry at least one of the shape's expected
/// top-level keys. Individual missing keys are tolerated by serde defaults.
fn decode_shaped<T: DeserializeOwned>(
    text: &str,
    shape: &str,
    marker_keys: &[&str],
) -> Result<T, ParseFailure> {
    let span = extract_json_object(text)
        .ok_or_else(|| ParseFailure::new(format!("no JSON object found in {shape} output")))?;

    let value: serde_json::Value = serde_json::from_str(span)
        .map_err(|e| ParseFailure::new(format!("invalid JSON in {shape} output: {e}")))?;

    let has_marker = value
        .as_object()
        .is_some_and(|obj| marker_keys.iter().any(|k| obj.contains_key(*k)));
    if !has_marker {
        return Err(ParseFailure::new(format!(
            "JSON object does not look like a {shape} result"
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| ParseFailure::new(format!("{shape} object has incompatible fields: {e}")))
}

pub fn interpret_resume(text: &str) -> Result<ResumePayload, ParseFailure> {
    decode_shaped(
        text,
        "resume",
        &["name", "summary", "education", "experience", "skills"],
    )
}

pub fn interpret_optimization(text: &str) -> Result<OptimizationResult, ParseFailure> {
    decode_shaped(
        text,
        "optimization",
        &["optimized_resume", "changes", "ats_score", "suggestions"],
    )
}

pub fn interpret_ats(text: &str) -> Result<AtsReport, ParseFailure> {
    decode_shaped(
        text,
        "ats_score",
        &["score", "keyword_match", "section_scores", "overall_feedback"],
    )
}

/// Plain-text shape (cover letters): the raw text, trimmed.
pub fn interpret_text(text: &str) -> Result<String, ParseFailure> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseFailure::new("model returned empty text"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_object() {
        let text = r#"{"score": 72}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_extract_object_surrounded_by_prose() {
        let text = "Sure! Here is the result:\n{\"score\": 72, \"overall_feedback\": \"ok\"}\nLet me know if you need anything else.";
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"score": 72, "overall_feedback": "ok"}"#)
        );
    }

    #[test]
    fn test_extract_nested_object() {
        let text = r#"prefix {"a": {"b": {"c": 1}}, "d": [1, 2]} suffix"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"a": {"b": {"c": 1}}, "d": [1, 2]}"#)
        );
    }

    #[test]
    fn test_extract_ignores_braces_inside_strings() {
        let text = r#"{"summary": "uses {braces} and a \" quote"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_extract_takes_first_balanced_span_of_many() {
        let text = r#"{"first": 1} and also {"second": 2}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"first": 1}"#));
    }

    #[test]
    fn test_extract_none_without_braces() {
        assert_eq!(extract_json_object("no json here at all"), None);
    }

    #[test]
    fn test_extract_none_when_unbalanced() {
        assert_eq!(extract_json_object(r#"{"unclosed": true"#), None);
    }

    // Property: the extracted span decodes byte-for-byte as the substring would.
    #[test]
    fn test_extracted_span_decodes_identically_to_substring() {
        let inner = r#"{"name": "Ava Lin", "skills": ["Go", "SQL"]}"#;
        let wrapped = format!("Here you go:\n{inner}\nHope that helps!");
        let span = extract_json_object(&wrapped).unwrap();
        assert_eq!(span, inner);
        let from_span: serde_json::Value = serde_json::from_str(span).unwrap();
        let from_inner: serde_json::Value = serde_json::from_str(inner).unwrap();
        assert_eq!(from_span, from_inner);
    }

    #[test]
    fn test_interpret_resume_happy_path() {
        let text = r#"Here is your resume: {"name": "Ava Lin", "skills": ["Go"]}"#;
        let payload = interpret_resume(text).unwrap();
        assert_eq!(payload.name, "Ava Lin");
        assert_eq!(payload.skills, vec!["Go"]);
    }

    #[test]
    fn test_interpret_resume_rejects_unrelated_object() {
        let text = r#"{"apology": "I cannot help with that"}"#;
        assert!(interpret_resume(text).is_err());
    }

    #[test]
    fn test_interpret_resume_no_json_is_parse_failure() {
        let err = interpret_resume("I am unable to produce a resume.").unwrap_err();
        assert!(err.reason.contains("no JSON object"));
    }

    #[test]
    fn test_interpret_resume_malformed_json_is_parse_failure() {
        let err = interpret_resume(r#"{"name": "Ava", }"#).unwrap_err();
        assert!(err.reason.contains("invalid JSON"));
    }

    #[test]
    fn test_interpret_optimization_happy_path() {
        let text = r#"{"optimized_resume": "better text", "ats_score": 81}"#;
        let result = interpret_optimization(text).unwrap();
        assert_eq!(result.optimized_resume, "better text");
        assert_eq!(result.ats_score, Some(81));
        assert!(result.changes.is_empty());
    }

    #[test]
    fn test_interpret_ats_happy_path() {
        let text = r#"noise before {"score": 64, "section_scores": {"formatting": 70}} noise after"#;
        let report = interpret_ats(text).unwrap();
        assert_eq!(report.score, 64);
        assert_eq!(report.section_scores.formatting, 70);
        assert_eq!(report.section_scores.keyword_match, 0);
    }

    #[test]
    fn test_interpret_text_trims_whitespace() {
        assert_eq!(interpret_text("  Dear Hiring Manager,\n").unwrap(), "Dear Hiring Manager,");
    }

    #[test]
    fn test_interpret_text_rejects_blank() {
        assert!(interpret_text("   \n\t ").is_err());
    }
}
