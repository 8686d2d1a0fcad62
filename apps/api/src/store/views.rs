//! Read-only projections of `PortalState` for each role's dashboard.
//!
//! Views never fail on dangling references: an application whose job has
//! been removed shows up with `job: None` for the seeker and drops out of
//! the employer's list.

use serde::Serialize;

use crate::models::application::Application;
use crate::models::company::Company;
use crate::models::job::Job;
use crate::models::user::{User, UserRole};
use crate::store::state::{BusyKey, PortalState};

/// Company label shown to an employer whose company can't be found.
pub const FALLBACK_COMPANY_LABEL: &str = "Your Company";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub current_user: Option<User>,
    pub post_job_modal_open: bool,
    pub busy: Vec<BusyKey>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub company_name: String,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company_name: job.company_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerJobCard {
    pub job: Job,
    pub is_applied: bool,
    pub is_applying: bool,
    pub is_loading_insight: bool,
    pub insight: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerApplicationRow {
    pub application: Application,
    /// `None` once the job has been moderated away.
    pub job: Option<JobSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerView {
    pub profile: User,
    pub jobs: Vec<SeekerJobCard>,
    pub applications: Vec<SeekerApplicationRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerJobRow {
    pub job: Job,
    pub application_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerApplicationRow {
    pub application: Application,
    pub job_title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerView {
    pub company_name: String,
    pub jobs: Vec<EmployerJobRow>,
    pub applications: Vec<EmployerApplicationRow>,
    pub post_job_modal_open: bool,
    pub is_generating_description: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: usize,
    pub total_jobs: usize,
    pub total_companies: usize,
    pub verified_companies: usize,
    /// Companies still awaiting admin verification.
    pub pending_companies: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    pub users: Vec<User>,
    pub jobs: Vec<Job>,
    pub companies: Vec<Company>,
    pub stats: AdminStats,
}

pub fn session_view(state: &PortalState) -> SessionView {
    SessionView {
        current_user: state.current_user().cloned(),
        post_job_modal_open: state.post_job_modal.open,
        busy: state.busy.iter().cloned().collect(),
    }
}

pub fn seeker_view(state: &PortalState, seeker: &User) -> SeekerView {
    let own: Vec<&Application> = state
        .applications
        .iter()
        .filter(|a| a.seeker_id == seeker.id)
        .collect();

    let jobs = state
        .jobs
        .iter()
        .map(|job| SeekerJobCard {
            job: job.clone(),
            is_applied: own.iter().any(|a| a.job_id == job.id),
            is_applying: state.is_busy(&BusyKey::Apply {
                job_id: job.id.clone(),
            }),
            is_loading_insight: state.is_busy(&BusyKey::Insight {
                job_id: job.id.clone(),
            }),
            insight: state.insights.get(&job.id).cloned(),
        })
        .collect();

    let applications = own
        .into_iter()
        .map(|a| SeekerApplicationRow {
            application: a.clone(),
            job: state.job(&a.job_id).map(JobSummary::from),
        })
        .collect();

    SeekerView {
        profile: seeker.clone(),
        jobs,
        applications,
    }
}

/// Name of the employer's company, or `FALLBACK_COMPANY_LABEL`.
pub fn employer_company_label(state: &PortalState, employer: &User) -> String {
    employer
        .company_id
        .as_deref()
        .and_then(|id| state.company(id))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| FALLBACK_COMPANY_LABEL.to_string())
}

pub fn employer_view(state: &PortalState, employer: &User) -> EmployerView {
    let company_name = employer_company_label(state, employer);

    let jobs = state
        .jobs
        .iter()
        .filter(|j| j.employer_id == employer.id)
        .map(|job| EmployerJobRow {
            job: job.clone(),
            application_count: state
                .applications
                .iter()
                .filter(|a| a.job_id == job.id)
                .count(),
        })
        .collect();

    let applications = state
        .applications
        .iter()
        .filter_map(|a| {
            let job = state.job(&a.job_id)?;
            (job.employer_id == employer.id).then(|| EmployerApplicationRow {
                application: a.clone(),
                job_title: job.title.clone(),
            })
        })
        .collect();

    EmployerView {
        company_name,
        jobs,
        applications,
        post_job_modal_open: state.post_job_modal.open,
        is_generating_description: state.is_busy(&BusyKey::DescriptionAssist),
    }
}

pub fn admin_view(state: &PortalState) -> AdminView {
    let users: Vec<User> = state
        .users
        .iter()
        .filter(|u| u.role != UserRole::Admin)
        .cloned()
        .collect();

    let verified_companies = state.companies.iter().filter(|c| c.is_verified).count();
    let stats = AdminStats {
        total_users: users.len(),
        total_jobs: state.jobs.len(),
        total_companies: state.companies.len(),
        verified_companies,
        pending_companies: state.companies.len() - verified_companies,
    };

    AdminView {
        users,
        jobs: state.jobs.clone(),
        companies: state.companies.clone(),
        stats,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::ai::adapter::ApplicationAnalysis;
    use crate::store::reducer::{reduce, Intent};

    fn applied(state: &PortalState, job_id: &str, application_id: &str) -> PortalState {
        reduce(
            state,
            Intent::SubmitApplication {
                seeker_id: "s1".to_string(),
                job_id: job_id.to_string(),
                application_id: application_id.to_string(),
                applied_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                analysis: ApplicationAnalysis::fallback(),
                answers: BTreeMap::new(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_employer_views_only_see_their_own_applications() {
        let state = applied(&PortalState::seeded(), "1", "a1");

        let e1 = state.user("e1").unwrap();
        let e2 = state.user("e2").unwrap();
        let e1_view = employer_view(&state, e1);
        let e2_view = employer_view(&state, e2);

        assert_eq!(e1_view.applications.len(), 1);
        assert_eq!(e1_view.applications[0].application.job_id, "1");
        assert_eq!(e1_view.applications[0].application.seeker_id, "s1");
        assert_eq!(e1_view.applications[0].job_title, "Senior Frontend Engineer");
        assert!(e2_view.applications.is_empty());
    }

    #[test]
    fn test_employer_job_rows_count_applications() {
        let state = applied(&PortalState::seeded(), "1", "a1");
        let view = employer_view(&state, state.user("e1").unwrap());
        assert_eq!(view.company_name, "TechFlow Systems");
        assert_eq!(view.jobs.len(), 1);
        assert_eq!(view.jobs[0].application_count, 1);
    }

    #[test]
    fn test_employer_without_company_gets_fallback_label() {
        let mut state = PortalState::seeded();
        state.companies.clear();
        let view = employer_view(&state, state.user("e1").unwrap());
        assert_eq!(view.company_name, FALLBACK_COMPANY_LABEL);
    }

    #[test]
    fn test_seeker_view_marks_applied_jobs() {
        let state = applied(&PortalState::seeded(), "1", "a1");
        let view = seeker_view(&state, state.user("s1").unwrap());
        let applied: Vec<_> = view
            .jobs
            .iter()
            .map(|c| (c.job.id.as_str(), c.is_applied))
            .collect();
        assert_eq!(applied, vec![("1", true), ("2", false)]);
        assert_eq!(view.applications.len(), 1);
        assert_eq!(
            view.applications[0].job.as_ref().unwrap().title,
            "Senior Frontend Engineer"
        );
    }

    #[test]
    fn test_seeker_view_shows_applying_state() {
        let state = reduce(
            &PortalState::seeded(),
            Intent::MarkBusy(BusyKey::Apply {
                job_id: "2".to_string(),
            }),
        )
        .unwrap();
        let view = seeker_view(&state, state.user("s1").unwrap());
        assert!(!view.jobs[0].is_applying);
        assert!(view.jobs[1].is_applying);
    }

    #[test]
    fn test_orphaned_application_survives_in_both_views() {
        let state = applied(&PortalState::seeded(), "1", "a1");
        let state = reduce(
            &state,
            Intent::ModerateJob {
                job_id: "1".to_string(),
            },
        )
        .unwrap();

        let seeker = seeker_view(&state, state.user("s1").unwrap());
        assert_eq!(seeker.applications.len(), 1);
        assert!(seeker.applications[0].job.is_none());

        let employer = employer_view(&state, state.user("e1").unwrap());
        assert!(employer.jobs.is_empty());
        assert!(employer.applications.is_empty());
    }

    #[test]
    fn test_admin_view_counts_pending_companies() {
        let state = PortalState::seeded();
        let view = admin_view(&state);
        assert_eq!(view.stats.verified_companies, 1);
        assert_eq!(view.stats.pending_companies, 1);

        let state = reduce(
            &state,
            Intent::VerifyCompany {
                company_id: "c2".to_string(),
            },
        )
        .unwrap();
        assert_eq!(admin_view(&state).stats.pending_companies, 0);
    }

    #[test]
    fn test_admin_view_counts() {
        let state = reduce(
            &PortalState::seeded(),
            Intent::VerifyCompany {
                company_id: "c2".to_string(),
            },
        )
        .unwrap();
        let view = admin_view(&state);
        assert!(view.users.iter().all(|u| u.role != UserRole::Admin));
        assert_eq!(view.stats.total_users, 3);
        assert_eq!(view.stats.total_jobs, 2);
        assert_eq!(view.stats.total_companies, 2);
        assert_eq!(view.stats.verified_companies, 2);
    }

    #[test]
    fn test_session_view_reflects_sign_out() {
        let state = reduce(&PortalState::seeded(), Intent::SignOut).unwrap();
        let view = session_view(&state);
        assert!(view.current_user.is_none());
        assert!(view.busy.is_empty());
    }
}
