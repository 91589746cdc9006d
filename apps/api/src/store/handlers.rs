//! Axum route handlers for the user directory and resume persistence API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{CoverLetterRow, ResumeRow};
use crate::models::user::{User, UserOverview};
use crate::state::AppState;
use crate::store::resumes::{
    delete_resume, get_resume, list_cover_letters, list_resumes, rename_resume,
};
use crate::store::users::{get_or_create_user, list_users_with_counts};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub user_id: Uuid,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct AdminUsersResponse {
    pub users: Vec<UserOverview>,
}

/// POST /api/v1/users/login
///
/// Resolves the (name, email) pair to a stable user identity, creating it on
/// first appearance. Session handling is the web layer's concern; this just
/// returns the identity.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let name = request.name.trim();
    let email = request.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(AppError::Validation(
            "name and email cannot be empty".to_string(),
        ));
    }

    let user = get_or_create_user(&state.db, name, email).await?;
    Ok(Json(user))
}

/// GET /api/v1/resumes?user_id=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let resumes = list_resumes(&state.db, params.user_id).await?;
    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = get_resume(&state.db, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id?user_id=
///
/// Succeeds whether or not the (id, owner) pair matched a row; a cross-user
/// id is indistinguishable from a missing one.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    delete_resume(&state.db, resume_id, params.user_id).await?;
    Ok(Json(json!({ "success": true })))
}

/// PATCH /api/v1/resumes/:id/label
pub async fn handle_rename_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<Value>, AppError> {
    rename_resume(&state.db, resume_id, request.user_id, &request.label).await?;
    Ok(Json(json!({ "success": true })))
}

/// GET /api/v1/cover-letters?user_id=
pub async fn handle_list_cover_letters(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CoverLetterRow>>, AppError> {
    let letters = list_cover_letters(&state.db, params.user_id).await?;
    Ok(Json(letters))
}

/// GET /api/v1/admin/users
pub async fn handle_admin_users(
    State(state): State<AppState>,
) -> Result<Json<AdminUsersResponse>, AppError> {
    let users = list_users_with_counts(&state.db).await?;
    Ok(Json(AdminUsersResponse { users }))
}
