//! Axum route handlers for the four AI tasks.
//!
//! Each JSON-producing task persists its result as a new resume version for
//! the requesting user; the ATS check is read-only.

use anyhow::anyhow;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{AtsReport, OptimizationResult, ResumeChange, ResumeFields, ResumePayload};
use crate::state::AppState;
use crate::store::resumes::{save_cover_letter, save_resume, SaveParams};

#[derive(Debug, Deserialize)]
pub struct BuildResumeRequest {
    pub user_id: Uuid,
    pub template: Option<String>,
    #[serde(flatten)]
    pub fields: ResumeFields,
}

#[derive(Debug, Serialize)]
pub struct BuildResumeResponse {
    pub resume: ResumePayload,
    pub resume_id: Uuid,
    pub version: i32,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub user_id: Uuid,
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub result: OptimizationResult,
    pub resume_id: Uuid,
    pub version: i32,
}

#[derive(Debug, Deserialize)]
pub struct AtsCheckRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub user_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplyChangesRequest {
    pub user_id: Uuid,
    pub resume_text: String,
    pub changes: Vec<ResumeChange>,
}

#[derive(Debug, Serialize)]
pub struct SavedVersionResponse {
    pub resume_id: Uuid,
    pub version: i32,
}

fn require_nonempty(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// POST /api/v1/resumes/build
///
/// Generates a structured resume from the input fields and stores it as the
/// user's next version.
pub async fn handle_build_resume(
    State(state): State<AppState>,
    Json(request): Json<BuildResumeRequest>,
) -> Result<Json<BuildResumeResponse>, AppError> {
    let resume = state.engine.generate_resume(&request.fields).await?;

    let content = serde_json::to_value(&resume)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize resume payload: {e}")))?;
    let (resume_id, version) = save_resume(
        &state.db,
        SaveParams {
            user_id: request.user_id,
            content: &content,
            template: request.template.as_deref(),
            job_description: None,
            ats_score: None,
            label: None,
        },
    )
    .await?;

    Ok(Json(BuildResumeResponse {
        resume,
        resume_id,
        version,
    }))
}

/// POST /api/v1/resumes/optimize
///
/// Optimizes resume text against a job description and stores the result as a
/// new version tagged with the JD and the model's ATS estimate.
pub async fn handle_optimize_resume(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    require_nonempty(&request.resume_text, "resume_text")?;
    require_nonempty(&request.job_description, "job_description")?;

    let result = state
        .engine
        .optimize_resume(&request.resume_text, &request.job_description)
        .await?;

    let content = serde_json::to_value(&result)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize optimization: {e}")))?;
    let (resume_id, version) = save_resume(
        &state.db,
        SaveParams {
            user_id: request.user_id,
            content: &content,
            template: None,
            job_description: Some(&request.job_description),
            ats_score: result.ats_score,
            label: None,
        },
    )
    .await?;

    Ok(Json(OptimizeResponse {
        result,
        resume_id,
        version,
    }))
}

/// POST /api/v1/resumes/ats-check
///
/// Scores ATS compatibility. Read-only: nothing is persisted.
pub async fn handle_ats_check(
    State(state): State<AppState>,
    Json(request): Json<AtsCheckRequest>,
) -> Result<Json<AtsReport>, AppError> {
    require_nonempty(&request.resume_text, "resume_text")?;
    require_nonempty(&request.job_description, "job_description")?;

    let report = state
        .engine
        .check_ats(&request.resume_text, &request.job_description)
        .await?;
    Ok(Json(report))
}

/// POST /api/v1/resumes/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    require_nonempty(&request.resume_text, "resume_text")?;
    require_nonempty(&request.job_description, "job_description")?;

    let letter = state
        .engine
        .generate_cover_letter(&request.resume_text, &request.job_description)
        .await?;

    save_cover_letter(
        &state.db,
        request.user_id,
        request.resume_id,
        &letter,
        Some(&request.job_description),
    )
    .await?;

    Ok(Json(CoverLetterResponse {
        cover_letter: letter,
    }))
}

/// POST /api/v1/resumes/apply-changes
///
/// Applies accepted `original → improved` rewrites to the resume text in
/// order and stores the edited text as a new version.
pub async fn handle_apply_changes(
    State(state): State<AppState>,
    Json(request): Json<ApplyChangesRequest>,
) -> Result<Json<SavedVersionResponse>, AppError> {
    require_nonempty(&request.resume_text, "resume_text")?;

    let mut text = request.resume_text.clone();
    for change in &request.changes {
        if !change.original.is_empty() {
            text = text.replace(&change.original, &change.improved);
        }
    }

    let content = json!({ "text": text });
    let (resume_id, version) = save_resume(
        &state.db,
        SaveParams {
            user_id: request.user_id,
            content: &content,
            template: Some("text"),
            job_description: None,
            ats_score: None,
            label: Some("Optimized"),
        },
    )
    .await?;

    Ok(Json(SavedVersionResponse { resume_id, version }))
}
