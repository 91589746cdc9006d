//! Data models for resume versions and the structured payloads the model produces.
//!
//! Payload structs decode permissively: every field carries a serde default so
//! any subset may be missing from model output. Encoding is canonical (all keys
//! always present).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume version. Version numbers are assigned per user, starting
/// at 1, and are never reused even after deletion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub version: i32,
    pub label: Option<String>,
    pub template: String,
    pub content: Value,
    pub job_description: Option<String>,
    pub ats_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// A stored cover letter, optionally linked to the resume it was written for.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CoverLetterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub content: String,
    pub job_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Free-text input fields for resume generation, exactly as the user typed them.
/// No validation happens here; empty strings are accepted and interpolated as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub education: String,
    pub experience: String,
    pub projects: String,
    pub skills: String,
    pub certifications: String,
    /// When present, generation tailors keyword choices and the summary to it.
    pub job_description: Option<String>,
}

/// The structured resume the model is asked to produce.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumePayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub year: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub tech: String,
}

/// Result of optimizing an existing resume against a job description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationResult {
    pub optimized_resume: String,
    pub changes: Vec<ResumeChange>,
    /// 0 - 100, as estimated by the model.
    pub ats_score: Option<i32>,
    pub suggestions: Vec<String>,
}

/// A single before/after rewrite with the model's justification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeChange {
    pub original: String,
    pub improved: String,
    pub reason: String,
}

/// ATS compatibility report for a resume against a job description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AtsReport {
    /// 0 - 100 overall.
    pub score: i32,
    pub keyword_match: KeywordMatch,
    pub format_issues: Vec<String>,
    pub content_feedback: Vec<String>,
    pub section_scores: SectionScores,
    pub overall_feedback: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordMatch {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionScores {
    pub keyword_match: i32,
    pub formatting: i32,
    pub content_clarity: i32,
}
