//! Fixed demo catalog the session starts from.

use chrono::NaiveDate;

use crate::models::company::Company;
use crate::models::job::{ExperienceLevel, Job, JobType};
use crate::models::user::{User, UserRole};

pub const SEEKER_ID: &str = "s1";
pub const EMPLOYER_ID: &str = "e1";
pub const ADMIN_ID: &str = "admin1";

pub fn companies() -> Vec<Company> {
    vec![
        Company {
            id: "c1".to_string(),
            name: "TechFlow Systems".to_string(),
            logo: "https://api.dicebear.com/7.x/initials/svg?seed=TF".to_string(),
            description: "Leading the future of cloud computing and developer tools.".to_string(),
            industry: "Technology".to_string(),
            website: "https://techflow.example".to_string(),
            is_verified: true,
        },
        Company {
            id: "c2".to_string(),
            name: "CreativePulse".to_string(),
            logo: "https://api.dicebear.com/7.x/initials/svg?seed=CP".to_string(),
            description: "A global agency focused on high-end digital experiences.".to_string(),
            industry: "Design".to_string(),
            website: "https://creativepulse.example".to_string(),
            // Pending admin review.
            is_verified: false,
        },
    ]
}

pub fn jobs() -> Vec<Job> {
    vec![
        Job {
            id: "1".to_string(),
            title: "Senior Frontend Engineer".to_string(),
            company_id: "c1".to_string(),
            company_name: "TechFlow Systems".to_string(),
            location: "San Francisco, CA".to_string(),
            job_type: JobType::FullTime,
            salary: "$140k - $180k".to_string(),
            description: "Lead our dashboard transformation using React and TypeScript."
                .to_string(),
            posted_at: date(2024, 5, 15),
            employer_id: EMPLOYER_ID.to_string(),
            category: "Engineering".to_string(),
            requirements: strings(&["React", "TypeScript", "Tailwind CSS"]),
            experience_level: ExperienceLevel::Senior,
            screening_questions: vec![],
            is_featured: true,
        },
        Job {
            id: "2".to_string(),
            title: "Product Designer".to_string(),
            company_id: "c2".to_string(),
            company_name: "CreativePulse".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::Remote,
            salary: "$110k - $150k".to_string(),
            description: "Create user-centric designs for our mobile and web platforms."
                .to_string(),
            posted_at: date(2024, 5, 18),
            employer_id: "e2".to_string(),
            category: "Design".to_string(),
            requirements: strings(&["Figma", "Prototyping"]),
            experience_level: ExperienceLevel::Mid,
            screening_questions: vec![],
            is_featured: false,
        },
    ]
}

/// Every seeded account: the three role demo users plus the CreativePulse
/// employer that owns job "2".
pub fn users() -> Vec<User> {
    vec![
        User {
            id: SEEKER_ID.to_string(),
            name: "Alex Rivera".to_string(),
            email: "alex@example.com".to_string(),
            role: UserRole::Seeker,
            skills: strings(&["React", "TypeScript", "Node.js"]),
            bio: Some("Frontend enthusiast with 4 years experience.".to_string()),
            company_id: None,
            saved_job_ids: strings(&["2"]),
            is_verified: false,
        },
        User {
            id: EMPLOYER_ID.to_string(),
            name: "Sarah Connor".to_string(),
            email: "sarah@techflow.com".to_string(),
            role: UserRole::Employer,
            skills: vec![],
            bio: None,
            company_id: Some("c1".to_string()),
            saved_job_ids: vec![],
            is_verified: false,
        },
        User {
            id: ADMIN_ID.to_string(),
            name: "Platform Admin".to_string(),
            email: "admin@careerstream.ai".to_string(),
            role: UserRole::Admin,
            skills: vec![],
            bio: None,
            company_id: None,
            saved_job_ids: vec![],
            is_verified: false,
        },
        User {
            id: "e2".to_string(),
            name: "Jordan Lee".to_string(),
            email: "jordan@creativepulse.example".to_string(),
            role: UserRole::Employer,
            skills: vec![],
            bio: None,
            company_id: Some("c2".to_string()),
            saved_job_ids: vec![],
            is_verified: false,
        },
    ]
}

/// Id of the demo account that represents `role` when switching views.
pub fn demo_user_id(role: UserRole) -> &'static str {
    match role {
        UserRole::Seeker => SEEKER_ID,
        UserRole::Employer => EMPLOYER_ID,
        UserRole::Admin => ADMIN_ID,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_seed_job_has_an_employer_account() {
        let users = users();
        for job in jobs() {
            let owner = users.iter().find(|u| u.id == job.employer_id);
            assert!(
                matches!(owner, Some(u) if u.role == UserRole::Employer),
                "job {} has no employer account",
                job.id
            );
        }
    }

    #[test]
    fn test_seed_company_names_match_jobs() {
        let companies = companies();
        for job in jobs() {
            let company = companies.iter().find(|c| c.id == job.company_id).unwrap();
            assert_eq!(company.name, job.company_name);
        }
    }

    #[test]
    fn test_demo_users_cover_each_role() {
        let users = users();
        for role in [UserRole::Seeker, UserRole::Employer, UserRole::Admin] {
            let user = users.iter().find(|u| u.id == demo_user_id(role)).unwrap();
            assert_eq!(user.role, role);
        }
    }

    #[test]
    fn test_seed_dates_are_real() {
        assert_eq!(jobs()[0].posted_at.to_string(), "2024-05-15");
    }
}
