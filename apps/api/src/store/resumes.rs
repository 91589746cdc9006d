//! Resume Store: append-only versioned persistence of resume content.
//!
//! Every save gets `1 + max(existing versions for the user)`. Assignment runs
//! inside a transaction that first locks the owning user row, so two
//! concurrent saves for one user serialize instead of racing the MAX read;
//! UNIQUE(user_id, version) backstops the invariant at the storage layer.
//! Deletion never renumbers surviving versions.

use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{CoverLetterRow, ResumeRow};

/// Parameters for saving a new resume version.
pub struct SaveParams<'a> {
    pub user_id: Uuid,
    pub content: &'a Value,
    pub template: Option<&'a str>,
    pub job_description: Option<&'a str>,
    pub ats_score: Option<i32>,
    pub label: Option<&'a str>,
}

/// Inserts a new resume version and returns (resume_id, version).
/// Fails with `UnknownUser` when `user_id` matches no user.
pub async fn save_resume(pool: &PgPool, params: SaveParams<'_>) -> Result<(Uuid, i32), AppError> {
    let mut tx = pool.begin().await?;

    // Locking the owner row serializes version assignment per user and
    // doubles as the existence check.
    let owner: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
        .bind(params.user_id)
        .fetch_optional(&mut *tx)
        .await?;
    if owner.is_none() {
        return Err(AppError::UnknownUser(params.user_id));
    }

    let current_max: Option<i32> =
        sqlx::query_scalar("SELECT MAX(version) FROM resumes WHERE user_id = $1")
            .bind(params.user_id)
            .fetch_one(&mut *tx)
            .await?;
    let version = current_max.unwrap_or(0) + 1;

    let resume_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO resumes
            (id, user_id, version, label, template, content, job_description, ats_score)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(resume_id)
    .bind(params.user_id)
    .bind(version)
    .bind(params.label)
    .bind(params.template.unwrap_or("classic"))
    .bind(params.content)
    .bind(params.job_description)
    .bind(params.ats_score)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Saved resume {resume_id} version {version} for user {}",
        params.user_id
    );

    Ok((resume_id, version))
}

/// All versions for a user, newest creation first.
pub async fn list_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError> {
    Ok(sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC, version DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_resume(pool: &PgPool, resume_id: Uuid) -> Result<Option<ResumeRow>, AppError> {
    Ok(
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(resume_id)
            .fetch_optional(pool)
            .await?,
    )
}

/// Owner-scoped delete. A miss (wrong owner or no such id) is a no-op, not an
/// error, so callers cannot probe for other users' resume ids.
pub async fn delete_resume(pool: &PgPool, resume_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        info!("Deleted resume {resume_id} for user {user_id}");
    }

    Ok(())
}

/// Owner-scoped label update, same no-op semantics as delete.
pub async fn rename_resume(
    pool: &PgPool,
    resume_id: Uuid,
    user_id: Uuid,
    label: &str,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE resumes SET label = $1 WHERE id = $2 AND user_id = $3")
        .bind(label)
        .bind(resume_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        info!("Renamed resume {resume_id} for user {user_id}");
    }

    Ok(())
}

/// Persists a generated cover letter, optionally linked to a resume version.
pub async fn save_cover_letter(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Option<Uuid>,
    content: &str,
    job_description: Option<&str>,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO cover_letters (id, user_id, resume_id, content, job_description)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(resume_id)
    .bind(content)
    .bind(job_description)
    .execute(pool)
    .await?;

    info!("Saved cover letter {id} for user {user_id}");
    Ok(id)
}

pub async fn list_cover_letters(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<CoverLetterRow>, AppError> {
    Ok(sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}
