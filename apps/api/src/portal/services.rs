//! Portal operations.
//!
//! Synchronous operations decide ids and dates, then dispatch a single intent.
//! AI-backed operations read what they need, release the store, await the
//! adapter, then dispatch the outcome. While they wait, the control that
//! started them is marked busy so the view can show it and a second click
//! is refused.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::anyhow;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ai::adapter::{AiAdapter, MAX_RECOMMENDATIONS};
use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::job::{Job, JobDraft};
use crate::models::user::{User, UserRole};
use crate::store::reducer::require_role;
use crate::store::views::{
    admin_view, employer_company_label, employer_view, seeker_view, session_view, AdminView,
    EmployerView, SeekerView, SessionView,
};
use crate::store::{BusyKey, Intent, Store, StoreError};

/// Stand-in resume graded on every application until seekers can upload their own.
pub const PLACEHOLDER_RESUME: &str = "Experienced software engineer with skills in React and Node.js. Worked at GlobalTech for 3 years.";

/// Result of the post-job form's "AI assist" button.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionAssist {
    /// `None` when the form was closed before the draft arrived.
    pub description: Option<String>,
    pub discarded: bool,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Marks a control busy for as long as the guard lives.
///
/// `release` clears the mark in line. If the guard is dropped instead (the
/// request future was cancelled mid-call) the mark is cleared on a spawned task.
struct BusyGuard {
    store: Store,
    key: Option<BusyKey>,
}

impl BusyGuard {
    async fn acquire(store: &Store, key: BusyKey) -> Result<Self, StoreError> {
        store.dispatch(Intent::MarkBusy(key.clone())).await?;
        Ok(Self {
            store: store.clone(),
            key: Some(key),
        })
    }

    async fn release(mut self) {
        if let Some(key) = self.key.take() {
            // ClearBusy cannot fail
            let _ = self.store.dispatch(Intent::ClearBusy(key)).await;
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let Some(key) = self.key.take() else {
            return;
        };
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let store = self.store.clone();
            runtime.spawn(async move {
                let _ = store.dispatch(Intent::ClearBusy(key)).await;
            });
        }
    }
}

async fn require_user(store: &Store, role: UserRole) -> Result<User, AppError> {
    let user = store.read(|s| require_role(s, role).cloned()).await?;
    Ok(user)
}

async fn read_job(store: &Store, job_id: &str) -> Result<Job, AppError> {
    store
        .read(|s| s.job(job_id).cloned())
        .await
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

pub async fn session(store: &Store) -> SessionView {
    store.read(session_view).await
}

pub async fn sign_in(store: &Store) -> Result<SessionView, AppError> {
    store.dispatch(Intent::SignIn).await?;
    Ok(session(store).await)
}

pub async fn sign_out(store: &Store) -> Result<SessionView, AppError> {
    store.dispatch(Intent::SignOut).await?;
    info!("Signed out of demo session");
    Ok(session(store).await)
}

pub async fn switch_role(store: &Store) -> Result<SessionView, AppError> {
    store.dispatch(Intent::SwitchRole).await?;
    let view = session(store).await;
    if let Some(user) = &view.current_user {
        info!("Switched demo session to {} ({})", user.name, user.role);
    }
    Ok(view)
}

// ────────────────────────────────────────────────────────────────────────────
// Seeker
// ────────────────────────────────────────────────────────────────────────────

pub async fn seeker_dashboard(store: &Store) -> Result<SeekerView, AppError> {
    let view = store
        .read(|s| require_role(s, UserRole::Seeker).map(|seeker| seeker_view(s, seeker)))
        .await?;
    Ok(view)
}

/// Applies the signed-in seeker to `job_id`.
///
/// Scoring never blocks the application: on adapter failure the neutral
/// fallback grade is attached instead.
pub async fn submit_application(
    store: &Store,
    ai: &AiAdapter,
    job_id: &str,
    answers: BTreeMap<String, String>,
) -> Result<Application, AppError> {
    let seeker = require_user(store, UserRole::Seeker).await?;
    let job = read_job(store, job_id).await?;

    let guard = BusyGuard::acquire(
        store,
        BusyKey::Apply {
            job_id: job.id.clone(),
        },
    )
    .await?;

    let analysis = ai
        .score_application(PLACEHOLDER_RESUME, &job.description)
        .await;
    let score = analysis.score;

    let application_id = new_id();
    let committed = store
        .dispatch(Intent::SubmitApplication {
            seeker_id: seeker.id.clone(),
            job_id: job.id.clone(),
            application_id: application_id.clone(),
            applied_at: today(),
            analysis,
            answers,
        })
        .await;
    guard.release().await;

    if let Err(err) = committed {
        debug!("Discarding application to job {}: {err}", job.id);
        return Err(err.into());
    }

    info!(
        "Application {application_id} by {} to job {} submitted (AI score {score})",
        seeker.id, job.id
    );

    store
        .read(|s| s.application(&application_id).cloned())
        .await
        .ok_or_else(|| AppError::Internal(anyhow!("application {application_id} vanished")))
}

/// One-sentence compatibility insight, fetched once per job and then cached.
pub async fn match_insight(store: &Store, ai: &AiAdapter, job_id: &str) -> Result<String, AppError> {
    let seeker = require_user(store, UserRole::Seeker).await?;
    let job = read_job(store, job_id).await?;

    if let Some(cached) = store.read(|s| s.insights.get(job_id).cloned()).await {
        return Ok(cached);
    }
    if seeker.skills.is_empty() {
        return Err(AppError::Validation(
            "Add skills to your profile to get match insights".to_string(),
        ));
    }

    let guard = BusyGuard::acquire(
        store,
        BusyKey::Insight {
            job_id: job.id.clone(),
        },
    )
    .await?;
    let insight = ai.match_insights(&seeker.skills, &job.requirements).await;
    let cached = store
        .dispatch(Intent::CacheInsight {
            job_id: job.id.clone(),
            insight: insight.clone(),
        })
        .await;
    guard.release().await;
    cached?;

    Ok(insight)
}

/// Up to `MAX_RECOMMENDATIONS` jobs the AI ranks best for the seeker, best first.
/// Ids that do not resolve to a live job are skipped before the cut.
pub async fn recommendations(store: &Store, ai: &AiAdapter) -> Result<Vec<Job>, AppError> {
    let seeker = require_user(store, UserRole::Seeker).await?;
    let catalog = store.read(|s| catalog_text(&s.jobs)).await;

    let ids = ai
        .smart_recommendations(&profile_text(&seeker), &catalog)
        .await;

    let mut seen = BTreeSet::new();
    let jobs: Vec<Job> = store
        .read(|s| {
            ids.iter()
                .filter(|id| seen.insert(id.as_str()))
                .filter_map(|id| s.job(id).cloned())
                .take(MAX_RECOMMENDATIONS)
                .collect()
        })
        .await;
    Ok(jobs)
}

fn profile_text(seeker: &User) -> String {
    let mut profile = format!("{}. Skills: {}.", seeker.name, seeker.skills.join(", "));
    if let Some(bio) = &seeker.bio {
        profile.push(' ');
        profile.push_str(bio);
    }
    profile
}

fn catalog_text(jobs: &[Job]) -> String {
    jobs.iter()
        .map(|j| format!("{}: {} ({})", j.id, j.title, j.requirements.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

// ────────────────────────────────────────────────────────────────────────────
// Employer
// ────────────────────────────────────────────────────────────────────────────

pub async fn employer_dashboard(store: &Store) -> Result<EmployerView, AppError> {
    let view = store
        .read(|s| require_role(s, UserRole::Employer).map(|employer| employer_view(s, employer)))
        .await?;
    Ok(view)
}

pub async fn open_post_job_modal(store: &Store) -> Result<SessionView, AppError> {
    store.dispatch(Intent::OpenPostJobModal).await?;
    Ok(session(store).await)
}

pub async fn close_post_job_modal(store: &Store) -> Result<SessionView, AppError> {
    store.dispatch(Intent::ClosePostJobModal).await?;
    Ok(session(store).await)
}

/// Drafts a description for the open post-job form.
///
/// If the form is closed or reopened before the draft arrives, the draft is dropped.
pub async fn assist_description(
    store: &Store,
    ai: &AiAdapter,
    title: &str,
    requirements: &[String],
) -> Result<DescriptionAssist, AppError> {
    let employer = require_user(store, UserRole::Employer).await?;
    if title.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter a job title first".to_string(),
        ));
    }

    let (modal, company) = store
        .read(|s| (s.post_job_modal, employer_company_label(s, &employer)))
        .await;
    if !modal.open {
        return Err(AppError::Validation(
            "Open the post-job form first".to_string(),
        ));
    }

    let guard = BusyGuard::acquire(store, BusyKey::DescriptionAssist).await?;
    let description = ai
        .generate_description(title.trim(), &company, requirements)
        .await;
    guard.release().await;

    let current = store.read(|s| s.post_job_modal).await;
    if !current.open || current.epoch != modal.epoch {
        debug!("Post-job form closed during description assist; dropping draft");
        return Ok(DescriptionAssist {
            description: None,
            discarded: true,
        });
    }

    Ok(DescriptionAssist {
        description: Some(description),
        discarded: false,
    })
}

pub async fn post_job(store: &Store, draft: JobDraft) -> Result<Job, AppError> {
    let employer = require_user(store, UserRole::Employer).await?;
    if let Some(field) = draft.first_blank_field() {
        return Err(AppError::Validation(format!("{field} is required")));
    }

    let job_id = new_id();
    store
        .dispatch(Intent::PostJob {
            draft,
            job_id: job_id.clone(),
            posted_at: today(),
        })
        .await?;

    let job = read_job(store, &job_id).await?;
    info!(
        "Job {} \"{}\" posted by {} for {}",
        job.id, job.title, employer.id, job.company_name
    );
    Ok(job)
}

// ────────────────────────────────────────────────────────────────────────────
// Admin
// ────────────────────────────────────────────────────────────────────────────

pub async fn admin_dashboard(store: &Store) -> Result<AdminView, AppError> {
    require_user(store, UserRole::Admin).await?;
    Ok(store.read(admin_view).await)
}

/// Marks a company verified. Unknown ids are ignored.
pub async fn verify_company(store: &Store, company_id: &str) -> Result<(), AppError> {
    require_user(store, UserRole::Admin).await?;
    store
        .dispatch(Intent::VerifyCompany {
            company_id: company_id.to_string(),
        })
        .await?;
    info!("Company {company_id} verified");
    Ok(())
}

/// Removes a job. Its applications are left in place.
pub async fn moderate_job(store: &Store, job_id: &str) -> Result<(), AppError> {
    require_user(store, UserRole::Admin).await?;
    store
        .dispatch(Intent::ModerateJob {
            job_id: job_id.to_string(),
        })
        .await?;
    info!("Job {job_id} removed by moderation");
    Ok(())
}
