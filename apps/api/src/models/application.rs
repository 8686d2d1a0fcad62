use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Hired,
}

/// A seeker's application to a job.
///
/// The seeker fields are a snapshot taken at submission time. `ai_score` and
/// `ai_feedback` are attached once during submission and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub seeker_id: String,
    pub seeker_name: String,
    pub seeker_email: String,
    pub status: ApplicationStatus,
    pub applied_at: NaiveDate,
    pub ai_score: Option<u8>,
    pub ai_feedback: Option<String>,
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}
