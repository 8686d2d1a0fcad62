//! Pure state transitions: `(state, intent) -> new state`.
//!
//! Everything non-deterministic (ids, dates, AI output) is decided by the
//! caller and carried in the intent, so every transition is replayable in tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::ai::adapter::ApplicationAnalysis;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::job::{Job, JobDraft};
use crate::models::user::{User, UserRole};
use crate::seed;
use crate::store::state::{BusyKey, PortalState};

/// Company name stamped on a job whose employer has no matching company.
pub const UNKNOWN_COMPANY: &str = "Unknown";

#[derive(Debug, Clone)]
pub enum Intent {
    /// "Get started": sign in as the demo seeker.
    SignIn,
    SignOut,
    /// Cycle SEEKER → EMPLOYER → ADMIN → SEEKER.
    SwitchRole,
    OpenPostJobModal,
    ClosePostJobModal,
    MarkBusy(BusyKey),
    ClearBusy(BusyKey),
    SubmitApplication {
        seeker_id: String,
        job_id: String,
        application_id: String,
        applied_at: NaiveDate,
        analysis: ApplicationAnalysis,
        answers: BTreeMap<String, String>,
    },
    PostJob {
        draft: JobDraft,
        job_id: String,
        posted_at: NaiveDate,
    },
    VerifyCompany {
        company_id: String,
    },
    ModerateJob {
        job_id: String,
    },
    CacheInsight {
        job_id: String,
        insight: String,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("No user is signed in")]
    NoSession,

    #[error("This action requires role {expected}, current role is {actual}")]
    WrongRole { expected: UserRole, actual: UserRole },

    #[error("The signed-in user changed before the action completed")]
    SessionChanged,

    #[error("Job {0} not found")]
    JobNotFound(String),

    #[error("Identifier {0} is already in use")]
    DuplicateId(String),

    #[error("Already busy: {0}")]
    Busy(BusyKey),
}

pub fn reduce(state: &PortalState, intent: Intent) -> Result<PortalState, StoreError> {
    let mut next = state.clone();

    match intent {
        Intent::SignIn => {
            next.current_user_id = Some(seed::SEEKER_ID.to_string());
        }
        Intent::SignOut => {
            next.current_user_id = None;
            next.post_job_modal.open = false;
        }
        Intent::SwitchRole => {
            let next_role = state
                .current_user()
                .map(|u| u.role.next())
                .unwrap_or(UserRole::Seeker);
            next.current_user_id = Some(seed::demo_user_id(next_role).to_string());
            next.post_job_modal.open = false;
        }
        Intent::OpenPostJobModal => {
            require_role(state, UserRole::Employer)?;
            next.post_job_modal.open = true;
            next.post_job_modal.epoch += 1;
        }
        Intent::ClosePostJobModal => {
            next.post_job_modal.open = false;
        }
        Intent::MarkBusy(key) => {
            if !next.busy.insert(key.clone()) {
                return Err(StoreError::Busy(key));
            }
        }
        Intent::ClearBusy(key) => {
            next.busy.remove(&key);
        }
        Intent::SubmitApplication {
            seeker_id,
            job_id,
            application_id,
            applied_at,
            analysis,
            answers,
        } => {
            let seeker = require_role(state, UserRole::Seeker)?;
            if seeker.id != seeker_id {
                return Err(StoreError::SessionChanged);
            }
            if state.job(&job_id).is_none() {
                return Err(StoreError::JobNotFound(job_id));
            }
            if state.application(&application_id).is_some() {
                return Err(StoreError::DuplicateId(application_id));
            }

            let application = Application {
                id: application_id,
                job_id,
                seeker_id: seeker.id.clone(),
                seeker_name: seeker.name.clone(),
                seeker_email: seeker.email.clone(),
                status: ApplicationStatus::Pending,
                applied_at,
                ai_score: Some(analysis.score),
                ai_feedback: Some(analysis.feedback),
                answers,
            };
            next.applications.insert(0, application);
        }
        Intent::PostJob {
            draft,
            job_id,
            posted_at,
        } => {
            let employer = require_role(state, UserRole::Employer)?;
            if state.job(&job_id).is_some() {
                return Err(StoreError::DuplicateId(job_id));
            }

            let company_id = employer.company_id.clone().unwrap_or_default();
            let company_name = state
                .company(&company_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNKNOWN_COMPANY.to_string());

            let job = Job {
                id: job_id,
                title: draft.title,
                company_id,
                company_name,
                location: draft.location,
                job_type: draft.job_type,
                salary: draft.salary,
                description: draft.description,
                posted_at,
                employer_id: employer.id.clone(),
                category: draft.category,
                requirements: draft.requirements,
                experience_level: draft.experience_level,
                screening_questions: draft.screening_questions,
                is_featured: draft.is_featured,
            };
            next.jobs.insert(0, job);
            next.post_job_modal.open = false;
        }
        Intent::VerifyCompany { company_id } => {
            if let Some(company) = next.companies.iter_mut().find(|c| c.id == company_id) {
                company.is_verified = true;
            }
        }
        Intent::ModerateJob { job_id } => {
            // Applications are kept; readers treat their job as missing.
            next.jobs.retain(|j| j.id != job_id);
            next.insights.remove(&job_id);
        }
        Intent::CacheInsight { job_id, insight } => {
            if state.job(&job_id).is_some() {
                next.insights.insert(job_id, insight);
            }
        }
    }

    Ok(next)
}

/// The signed-in user, provided they hold `expected`.
pub fn require_role(state: &PortalState, expected: UserRole) -> Result<&User, StoreError> {
    let user = state.current_user().ok_or(StoreError::NoSession)?;
    if user.role != expected {
        return Err(StoreError::WrongRole {
            expected,
            actual: user.role,
        });
    }
    Ok(user)
}
