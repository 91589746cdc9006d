pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::generation::handlers as task_handlers;
use crate::state::AppState;
use crate::store::handlers as store_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // User directory
        .route("/api/v1/users/login", post(store_handlers::handle_login))
        // AI tasks
        .route(
            "/api/v1/resumes/build",
            post(task_handlers::handle_build_resume),
        )
        .route(
            "/api/v1/resumes/optimize",
            post(task_handlers::handle_optimize_resume),
        )
        .route(
            "/api/v1/resumes/ats-check",
            post(task_handlers::handle_ats_check),
        )
        .route(
            "/api/v1/resumes/cover-letter",
            post(task_handlers::handle_cover_letter),
        )
        .route(
            "/api/v1/resumes/apply-changes",
            post(task_handlers::handle_apply_changes),
        )
        // Versioned resume store
        .route("/api/v1/resumes", get(store_handlers::handle_list_resumes))
        .route(
            "/api/v1/resumes/:id",
            get(store_handlers::handle_get_resume).delete(store_handlers::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/label",
            patch(store_handlers::handle_rename_resume),
        )
        .route(
            "/api/v1/cover-letters",
            get(store_handlers::handle_list_cover_letters),
        )
        // Admin overview
        .route("/api/v1/admin/users", get(store_handlers::handle_admin_users))
        .with_state(state)
}
