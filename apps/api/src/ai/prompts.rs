// All LLM prompts for the AI adapter.
// Each prompt is rendered in a single `format!`, so caller text is inserted verbatim.

use serde_json::{json, Value};

pub const DESCRIPTION_TEMPERATURE: f32 = 0.7;
pub const INSIGHT_TEMPERATURE: f32 = 0.5;

pub fn description_prompt(title: &str, company: &str, requirements: &[String]) -> String {
    format!(
        "Generate a high-end job description for a \"{title}\" at \"{company}\". \
        Requirements: {requirements}. \
        Include sections: Role Overview, Key Responsibilities, Benefits. Max 300 words.",
        requirements = requirements.join(", ")
    )
}

pub fn scoring_prompt(resume: &str, job: &str) -> String {
    format!(
        "Act as an expert recruiter. Grade this application based on the job description.
Resume: {resume}
Job: {job}

Return a match score (0-100) and brief feedback for the employer."
    )
}

pub fn recommendation_prompt(profile: &str, jobs: &str) -> String {
    format!(
        "Profile: {profile}
Jobs: {jobs}
Rank the top 3 jobs for this user by ID. Return just the IDs as a JSON array."
    )
}

pub fn insight_prompt(skills: &[String], requirements: &[String]) -> String {
    format!(
        "Candidate skills: {skills}. Job requirements: {requirements}. \
        Provide a short, encouraging one-sentence insight about the candidate's compatibility.",
        skills = skills.join(", "),
        requirements = requirements.join(", ")
    )
}

/// Strict output shape for application grading.
pub fn scoring_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER" },
            "feedback": { "type": "STRING" },
            "missingSkills": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["score", "feedback", "missingSkills"]
    })
}

/// Strict output shape for job ranking: an array of job ids.
pub fn recommendation_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_prompt_keeps_braces_in_caller_text() {
        let prompt = description_prompt(
            "Head of {requirements}",
            "{title} Labs",
            &["Rust".to_string(), "{company}".to_string()],
        );
        assert!(prompt.contains("for a \"Head of {requirements}\" at \"{title} Labs\"."));
        assert!(prompt.contains("Requirements: Rust, {company}."));
    }

    #[test]
    fn test_scoring_prompt_keeps_braces_in_caller_text() {
        let prompt = scoring_prompt("Knows {job} well", "Build {resume} tooling");
        assert!(prompt.contains("Resume: Knows {job} well\nJob: Build {resume} tooling\n"));
    }

    #[test]
    fn test_insight_prompt_joins_lists() {
        let prompt = insight_prompt(
            &["{requirements}".to_string()],
            &["React".to_string(), "Figma".to_string()],
        );
        assert!(prompt.starts_with(
            "Candidate skills: {requirements}. Job requirements: React, Figma. Provide"
        ));
    }
}
