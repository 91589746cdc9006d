use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user identity. Keyed by the (name, contact) pair — created on first
/// appearance, immutable afterwards, never deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

/// One row of the admin overview: a user plus how many resume versions they hold.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserOverview {
    pub id: Uuid,
    pub name: String,
    pub contact: String,
    pub created_at: DateTime<Utc>,
    pub resume_count: i64,
}
