pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::portal::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session
        .route("/api/v1/session", get(handlers::handle_get_session))
        .route("/api/v1/session/sign-in", post(handlers::handle_sign_in))
        .route("/api/v1/session/sign-out", post(handlers::handle_sign_out))
        .route(
            "/api/v1/session/switch-role",
            post(handlers::handle_switch_role),
        )
        // Seeker
        .route(
            "/api/v1/seeker/dashboard",
            get(handlers::handle_seeker_dashboard),
        )
        .route("/api/v1/seeker/jobs/:id/apply", post(handlers::handle_apply))
        .route(
            "/api/v1/seeker/jobs/:id/insight",
            get(handlers::handle_match_insight),
        )
        .route(
            "/api/v1/seeker/recommendations",
            get(handlers::handle_recommendations),
        )
        // Employer
        .route(
            "/api/v1/employer/dashboard",
            get(handlers::handle_employer_dashboard),
        )
        .route(
            "/api/v1/employer/post-job-form/open",
            post(handlers::handle_open_post_job_form),
        )
        .route(
            "/api/v1/employer/post-job-form/close",
            post(handlers::handle_close_post_job_form),
        )
        .route(
            "/api/v1/employer/post-job-form/describe",
            post(handlers::handle_describe),
        )
        .route("/api/v1/employer/jobs", post(handlers::handle_post_job))
        // Admin
        .route(
            "/api/v1/admin/dashboard",
            get(handlers::handle_admin_dashboard),
        )
        .route(
            "/api/v1/admin/companies/:id/verify",
            post(handlers::handle_verify_company),
        )
        .route("/api/v1/admin/jobs/:id", delete(handlers::handle_moderate_job))
        .with_state(state)
}
