use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Bootstraps the schema. Idempotent; runs at every startup.
///
/// The UNIQUE constraints carry real semantics: (name, contact) makes
/// get_or_create_user idempotent under concurrent identical calls, and
/// (user_id, version) backstops the transactional version assignment.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            contact TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (name, contact)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resumes (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users(id),
            version INTEGER NOT NULL,
            label TEXT,
            template TEXT NOT NULL DEFAULT 'classic',
            content JSONB NOT NULL,
            job_description TEXT,
            ats_score INTEGER,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (user_id, version)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cover_letters (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users(id),
            resume_id UUID REFERENCES resumes(id) ON DELETE SET NULL,
            content TEXT NOT NULL,
            job_description TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema ready");
    Ok(())
}
