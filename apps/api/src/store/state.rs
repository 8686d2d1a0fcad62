use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::application::Application;
use crate::models::company::Company;
use crate::models::job::Job;
use crate::models::user::User;
use crate::seed;

/// A control that is waiting on the AI adapter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BusyKey {
    #[serde(rename_all = "camelCase")]
    Apply { job_id: String },
    #[serde(rename_all = "camelCase")]
    Insight { job_id: String },
    DescriptionAssist,
}

impl fmt::Display for BusyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusyKey::Apply { job_id } => write!(f, "apply to job {job_id}"),
            BusyKey::Insight { job_id } => write!(f, "match insight for job {job_id}"),
            BusyKey::DescriptionAssist => f.write_str("description assist"),
        }
    }
}

/// Visibility of the post-job form. `epoch` increases on every open, so a
/// late result can tell whether it belongs to the form that is showing now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalState {
    pub open: bool,
    pub epoch: u64,
}

/// Everything the demo session knows.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalState {
    pub current_user_id: Option<String>,
    /// Fixed after seeding.
    pub users: Vec<User>,
    /// Most recent first.
    pub jobs: Vec<Job>,
    /// Most recent first.
    pub applications: Vec<Application>,
    pub companies: Vec<Company>,
    pub post_job_modal: ModalState,
    pub busy: BTreeSet<BusyKey>,
    /// Match insights already fetched this session, by job id.
    pub insights: BTreeMap<String, String>,
}

impl PortalState {
    pub fn seeded() -> Self {
        Self {
            current_user_id: Some(seed::SEEKER_ID.to_string()),
            users: seed::users(),
            jobs: seed::jobs(),
            applications: vec![],
            companies: seed::companies(),
            post_job_modal: ModalState::default(),
            busy: BTreeSet::new(),
            insights: BTreeMap::new(),
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        let id = self.current_user_id.as_deref()?;
        self.user(id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// `None` for removed jobs; applications may still point at them.
    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn is_busy(&self, key: &BusyKey) -> bool {
        self.busy.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;

    #[test]
    fn test_seeded_session_starts_as_seeker() {
        let state = PortalState::seeded();
        assert_eq!(state.current_user().unwrap().role, UserRole::Seeker);
        assert!(state.applications.is_empty());
        assert!(!state.post_job_modal.open);
    }

    #[test]
    fn test_lookups_miss_cleanly() {
        let state = PortalState::seeded();
        assert!(state.job("missing").is_none());
        assert!(state.company("missing").is_none());
        assert!(state.application("missing").is_none());
    }

    #[test]
    fn test_busy_key_serializes_with_kind_tag() {
        let json = serde_json::to_value(BusyKey::Apply {
            job_id: "1".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"kind": "apply", "jobId": "1"}));
    }
}
