//! AI Adapter — the four generative operations the portal uses.
//!
//! None of these return `Result`. Each one logs the underlying failure and
//! substitutes a documented fallback, so callers can always proceed:
//!
//! | operation               | on failure                                   |
//! |-------------------------|----------------------------------------------|
//! | `generate_description`  | `DESCRIPTION_ERROR` (`DESCRIPTION_EMPTY` if the model returned nothing) |
//! | `score_application`     | score 50, `"Analysis unavailable."`, no missing skills |
//! | `smart_recommendations` | empty list                                   |
//! | `match_insights`        | `INSIGHT_ERROR` (`INSIGHT_EMPTY` if the model returned nothing) |
//!
//! A malformed JSON body is treated exactly like a network failure.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::prompts::{
    description_prompt, insight_prompt, recommendation_prompt, recommendation_schema,
    scoring_prompt, scoring_schema, DESCRIPTION_TEMPERATURE, INSIGHT_TEMPERATURE,
};
use crate::llm_client::{
    complete_json, CompletionBackend, CompletionRequest, LlmError, SCORING_MODEL, TEXT_MODEL,
};

pub const DESCRIPTION_EMPTY: &str = "Failed to generate description.";
pub const DESCRIPTION_ERROR: &str = "Error generating content.";
pub const FALLBACK_SCORE: u8 = 50;
pub const FALLBACK_FEEDBACK: &str = "Analysis unavailable.";
pub const INSIGHT_EMPTY: &str = "Your profile shows great potential for this role.";
pub const INSIGHT_ERROR: &str = "Analyzing your compatibility with this role...";
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Recruiter-style grading of one application against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAnalysis {
    /// 0 – 100
    pub score: u8,
    pub feedback: String,
    pub missing_skills: Vec<String>,
}

impl ApplicationAnalysis {
    /// The neutral grade used whenever scoring fails.
    pub fn fallback() -> Self {
        Self {
            score: FALLBACK_SCORE,
            feedback: FALLBACK_FEEDBACK.to_string(),
            missing_skills: vec![],
        }
    }
}

/// The model's JSON before range checking.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    score: f64,
    feedback: String,
    missing_skills: Vec<String>,
}

impl TryFrom<RawAnalysis> for ApplicationAnalysis {
    type Error = LlmError;

    fn try_from(raw: RawAnalysis) -> Result<Self, Self::Error> {
        if !raw.score.is_finite() || !(0.0..=100.0).contains(&raw.score) {
            return Err(LlmError::Schema(format!("score {} outside 0-100", raw.score)));
        }
        Ok(Self {
            score: raw.score.round() as u8,
            feedback: raw.feedback,
            missing_skills: raw.missing_skills,
        })
    }
}

/// Cheap to clone; shares the underlying backend.
#[derive(Clone)]
pub struct AiAdapter {
    backend: Arc<dyn CompletionBackend>,
}

impl AiAdapter {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Drafts a job description. The result is a starting point the employer can edit.
    pub async fn generate_description(
        &self,
        title: &str,
        company: &str,
        requirements: &[String],
    ) -> String {
        let prompt = description_prompt(title, company, requirements);
        let request =
            CompletionRequest::text(TEXT_MODEL, prompt).with_temperature(DESCRIPTION_TEMPERATURE);

        match self.backend.complete(&request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) | Err(LlmError::EmptyContent) => DESCRIPTION_EMPTY.to_string(),
            Err(e) => {
                warn!("Description generation failed, using fallback: {e}");
                DESCRIPTION_ERROR.to_string()
            }
        }
    }

    /// Grades a resume against a job description.
    pub async fn score_application(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> ApplicationAnalysis {
        let prompt = scoring_prompt(resume_text, job_description);
        let request = CompletionRequest::text(SCORING_MODEL, prompt).with_schema(scoring_schema());

        let result = complete_json::<RawAnalysis>(self.backend.as_ref(), &request)
            .await
            .and_then(ApplicationAnalysis::try_from);

        match result {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Application scoring failed, using neutral score: {e}");
                ApplicationAnalysis::fallback()
            }
        }
    }

    /// Ranks the catalog for a profile and returns job ids best first, without repeats.
    ///
    /// The model may name ids that are not in the catalog, so the list is not cut
    /// here; callers drop unknown ids and then keep `MAX_RECOMMENDATIONS`.
    pub async fn smart_recommendations(&self, profile: &str, catalog: &str) -> Vec<String> {
        let prompt = recommendation_prompt(profile, catalog);
        let request =
            CompletionRequest::text(TEXT_MODEL, prompt).with_schema(recommendation_schema());

        match complete_json::<Vec<String>>(self.backend.as_ref(), &request).await {
            Ok(ids) => {
                let mut seen = HashSet::new();
                ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
            }
            Err(e) => {
                warn!("Recommendations failed, returning none: {e}");
                vec![]
            }
        }
    }

    /// One encouraging sentence on how a seeker's skills line up with a job.
    pub async fn match_insights(&self, skills: &[String], requirements: &[String]) -> String {
        let prompt = insight_prompt(skills, requirements);
        let request =
            CompletionRequest::text(TEXT_MODEL, prompt).with_temperature(INSIGHT_TEMPERATURE);

        match self.backend.complete(&request).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) | Err(LlmError::EmptyContent) => INSIGHT_EMPTY.to_string(),
            Err(e) => {
                warn!("Match insight failed, using fallback: {e}");
                INSIGHT_ERROR.to_string()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{CompletionBackend, CompletionRequest, LlmError};

    /// Answers every request with the same text and remembers what it was asked.
    #[derive(Default)]
    pub struct StubBackend {
        reply: Option<String>,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl StubBackend {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                requests: Mutex::new(vec![]),
            }
        }

        /// A backend whose every call fails like an unreachable endpoint.
        pub fn failing() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(LlmError::Api {
                    status: 503,
                    message: "service unavailable".to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubBackend;
    use super::*;

    fn adapter(backend: StubBackend) -> (AiAdapter, Arc<StubBackend>) {
        let backend = Arc::new(backend);
        (AiAdapter::new(backend.clone()), backend)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_description_prompt_carries_title_company_and_requirements() {
        let (ai, backend) = adapter(StubBackend::replying("## Role Overview\nBuild things."));
        let text = ai
            .generate_description("SRE", "TechFlow Systems", &strings(&["Linux", "Go"]))
            .await;
        assert_eq!(text, "## Role Overview\nBuild things.");

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests[0].model, TEXT_MODEL);
        assert!(requests[0].prompt.contains("\"SRE\" at \"TechFlow Systems\""));
        assert!(requests[0].prompt.contains("Requirements: Linux, Go."));
        assert_eq!(requests[0].temperature, Some(DESCRIPTION_TEMPERATURE));
    }

    #[tokio::test]
    async fn test_description_title_with_braces_reaches_model_unchanged() {
        let (ai, backend) = adapter(StubBackend::replying("Draft"));
        ai.generate_description("Head of {requirements}", "Acme", &strings(&["Rust"]))
            .await;

        let requests = backend.requests.lock().unwrap();
        assert!(requests[0]
            .prompt
            .contains("for a \"Head of {requirements}\" at \"Acme\". Requirements: Rust."));
    }

    #[tokio::test]
    async fn test_description_failure_returns_error_string() {
        let (ai, _) = adapter(StubBackend::failing());
        let text = ai.generate_description("SRE", "Acme", &[]).await;
        assert_eq!(text, DESCRIPTION_ERROR);
    }

    #[tokio::test]
    async fn test_description_blank_output_returns_empty_string_marker() {
        let (ai, _) = adapter(StubBackend::replying("   "));
        let text = ai.generate_description("SRE", "Acme", &[]).await;
        assert_eq!(text, DESCRIPTION_EMPTY);
    }

    #[tokio::test]
    async fn test_score_parses_structured_output() {
        let (ai, backend) = adapter(StubBackend::replying(
            r#"{"score": 87.4, "feedback": "Strong React match.", "missingSkills": ["Tailwind CSS"]}"#,
        ));
        let analysis = ai.score_application("resume", "job").await;
        assert_eq!(analysis.score, 87);
        assert_eq!(analysis.feedback, "Strong React match.");
        assert_eq!(analysis.missing_skills, vec!["Tailwind CSS"]);

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests[0].model, SCORING_MODEL);
        assert!(requests[0].response_schema.is_some());
    }

    #[tokio::test]
    async fn test_score_falls_back_on_network_failure() {
        let (ai, _) = adapter(StubBackend::failing());
        assert_eq!(
            ai.score_application("resume", "job").await,
            ApplicationAnalysis::fallback()
        );
    }

    #[tokio::test]
    async fn test_score_falls_back_on_malformed_json() {
        let (ai, _) = adapter(StubBackend::replying("{\"score\": \"high\"}"));
        let analysis = ai.score_application("resume", "job").await;
        assert_eq!(analysis.score, FALLBACK_SCORE);
        assert_eq!(analysis.feedback, FALLBACK_FEEDBACK);
    }

    #[tokio::test]
    async fn test_score_out_of_range_is_a_schema_mismatch() {
        let (ai, _) = adapter(StubBackend::replying(
            r#"{"score": 140, "feedback": "Wow", "missingSkills": []}"#,
        ));
        assert_eq!(
            ai.score_application("resume", "job").await,
            ApplicationAnalysis::fallback()
        );
    }

    #[tokio::test]
    async fn test_recommendations_keep_rank_order_without_repeats() {
        let (ai, _) = adapter(StubBackend::replying(r#"["4", "2", "4", "1", "3"]"#));
        let ids = ai.smart_recommendations("profile", "catalog").await;
        assert_eq!(ids, vec!["4", "2", "1", "3"]);
    }

    #[tokio::test]
    async fn test_recommendations_fail_to_empty() {
        let (ai, _) = adapter(StubBackend::failing());
        assert!(ai.smart_recommendations("profile", "catalog").await.is_empty());

        let (ai, _) = adapter(StubBackend::replying("{\"ids\": []}"));
        assert!(ai.smart_recommendations("profile", "catalog").await.is_empty());
    }

    #[tokio::test]
    async fn test_insight_trims_model_output() {
        let (ai, backend) = adapter(StubBackend::replying("  You already know React.\n"));
        let text = ai
            .match_insights(&strings(&["React"]), &strings(&["React", "Figma"]))
            .await;
        assert_eq!(text, "You already know React.");
        let requests = backend.requests.lock().unwrap();
        assert!(requests[0]
            .prompt
            .starts_with("Candidate skills: React. Job requirements: React, Figma."));
    }

    #[tokio::test]
    async fn test_insight_fallbacks() {
        let (ai, _) = adapter(StubBackend::failing());
        assert_eq!(ai.match_insights(&[], &[]).await, INSIGHT_ERROR);

        let (ai, _) = adapter(StubBackend::replying(""));
        assert_eq!(ai.match_insights(&[], &[]).await, INSIGHT_EMPTY);
    }
}
