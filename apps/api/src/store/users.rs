//! User Directory: maps a (name, contact) pair to a stable identity.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{User, UserOverview};

/// Looks up a user by (name, contact), inserting first if absent.
///
/// Idempotent under concurrent identical calls: the insert is
/// `ON CONFLICT DO NOTHING` against the UNIQUE(name, contact) index, and the
/// re-read returns whichever row won.
pub async fn get_or_create_user(
    pool: &PgPool,
    name: &str,
    contact: &str,
) -> Result<User, AppError> {
    let inserted = sqlx::query(
        "INSERT INTO users (id, name, contact) VALUES ($1, $2, $3) \
         ON CONFLICT (name, contact) DO NOTHING",
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(contact)
    .execute(pool)
    .await?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE name = $1 AND contact = $2")
        .bind(name)
        .bind(contact)
        .fetch_one(pool)
        .await?;

    if inserted.rows_affected() > 0 {
        info!("Created user {} ({name})", user.id);
    }

    Ok(user)
}

/// Per-user resume counts for the admin overview, newest users first.
pub async fn list_users_with_counts(pool: &PgPool) -> Result<Vec<UserOverview>, AppError> {
    Ok(sqlx::query_as::<_, UserOverview>(
        r#"
        SELECT users.id, users.name, users.contact, users.created_at,
               COUNT(resumes.id) AS resume_count
        FROM users
        LEFT JOIN resumes ON users.id = resumes.user_id
        GROUP BY users.id, users.name, users.contact, users.created_at
        ORDER BY users.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?)
}
