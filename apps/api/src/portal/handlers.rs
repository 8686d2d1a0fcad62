//! Axum route handlers for the portal dashboards.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::job::{split_requirements, Job, JobDraft};
use crate::portal::services::{self, DescriptionAssist};
use crate::state::AppState;
use crate::store::views::{AdminView, EmployerView, SeekerView, SessionView};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    /// Screening question id → answer.
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct DescriptionAssistRequest {
    pub title: String,
    /// Comma-separated, as typed into the form.
    #[serde(default)]
    pub requirements: String,
}

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub insight: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub jobs: Vec<Job>,
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(services::session(&state.store).await)
}

/// POST /api/v1/session/sign-in
pub async fn handle_sign_in(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(services::sign_in(&state.store).await?))
}

/// POST /api/v1/session/sign-out
pub async fn handle_sign_out(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(services::sign_out(&state.store).await?))
}

/// POST /api/v1/session/switch-role
///
/// Demo-only: cycles SEEKER → EMPLOYER → ADMIN → SEEKER.
pub async fn handle_switch_role(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(services::switch_role(&state.store).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Seeker
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/seeker/dashboard
pub async fn handle_seeker_dashboard(
    State(state): State<AppState>,
) -> Result<Json<SeekerView>, AppError> {
    Ok(Json(services::seeker_dashboard(&state.store).await?))
}

/// POST /api/v1/seeker/jobs/:id/apply
///
/// Waits for AI scoring, then returns the new application. The body is optional.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    request: Option<Json<ApplyRequest>>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let answers = request.map(|Json(r)| r.answers).unwrap_or_default();
    let application =
        services::submit_application(&state.store, &state.ai, &job_id, answers).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/seeker/jobs/:id/insight
pub async fn handle_match_insight(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<InsightResponse>, AppError> {
    let insight = services::match_insight(&state.store, &state.ai, &job_id).await?;
    Ok(Json(InsightResponse { insight }))
}

/// GET /api/v1/seeker/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let jobs = services::recommendations(&state.store, &state.ai).await?;
    Ok(Json(RecommendationsResponse { jobs }))
}

// ────────────────────────────────────────────────────────────────────────────
// Employer
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/employer/dashboard
pub async fn handle_employer_dashboard(
    State(state): State<AppState>,
) -> Result<Json<EmployerView>, AppError> {
    Ok(Json(services::employer_dashboard(&state.store).await?))
}

/// POST /api/v1/employer/post-job-form/open
pub async fn handle_open_post_job_form(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(services::open_post_job_modal(&state.store).await?))
}

/// POST /api/v1/employer/post-job-form/close
pub async fn handle_close_post_job_form(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(services::close_post_job_modal(&state.store).await?))
}

/// POST /api/v1/employer/post-job-form/describe
pub async fn handle_describe(
    State(state): State<AppState>,
    Json(request): Json<DescriptionAssistRequest>,
) -> Result<Json<DescriptionAssist>, AppError> {
    let requirements = split_requirements(&request.requirements);
    let assist =
        services::assist_description(&state.store, &state.ai, &request.title, &requirements)
            .await?;
    Ok(Json(assist))
}

/// POST /api/v1/employer/jobs
pub async fn handle_post_job(
    State(state): State<AppState>,
    Json(draft): Json<JobDraft>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = services::post_job(&state.store, draft).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

// ────────────────────────────────────────────────────────────────────────────
// Admin
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/admin/dashboard
pub async fn handle_admin_dashboard(
    State(state): State<AppState>,
) -> Result<Json<AdminView>, AppError> {
    Ok(Json(services::admin_dashboard(&state.store).await?))
}

/// POST /api/v1/admin/companies/:id/verify
pub async fn handle_verify_company(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<StatusCode, AppError> {
    services::verify_company(&state.store, &company_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/jobs/:id
pub async fn handle_moderate_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<StatusCode, AppError> {
    services::moderate_job(&state.store, &job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
