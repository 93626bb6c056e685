use crate::domain::company::Company;
use crate::domain::model::{closed_enum, Id, Timestamp};
use crate::domain::user::{Skill, User};
use crate::utils::error::{Result, SchemaError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use crate::domain::model::ExperienceLevel;

closed_enum! {
    pub enum WorkplaceType as "workplace_type" {
        Remote => "remote",
        OnSite => "on_site",
        Hybrid => "hybrid",
    }
}

closed_enum! {
    pub enum JobType as "job_type" {
        FullTime => "full_time",
        PartTime => "part_time",
        Contract => "contract",
        Internship => "internship",
    }
}

closed_enum! {
    /// Period a salary figure refers to.
    pub enum SalaryType as "salary_type" {
        Yearly => "yearly",
        Monthly => "monthly",
        Hourly => "hourly",
    }
}

closed_enum! {
    /// Lifecycle of a job application.
    ///
    /// `submitted → under_review → interviewed → {hired | rejected}`, and
    /// `withdrawn` from any state that is not yet terminal.
    pub enum ApplicationStatus as "status" {
        Submitted => "submitted",
        UnderReview => "under_review",
        Interviewed => "interviewed",
        Hired => "hired",
        Rejected => "rejected",
        Withdrawn => "withdrawn",
    }
}

impl ApplicationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Hired | ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
        )
    }

    pub fn next_states(&self) -> &'static [ApplicationStatus] {
        use self::ApplicationStatus::*;
        match self {
            Submitted => &[UnderReview, Withdrawn],
            UnderReview => &[Interviewed, Withdrawn],
            Interviewed => &[Hired, Rejected, Withdrawn],
            Hired | Rejected | Withdrawn => &[],
        }
    }

    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        self.next_states().contains(&next)
    }
}

/// Checks a recorded status sequence: it must open with `submitted` and every
/// step must be an allowed transition.
pub fn validate_status_history(history: &[ApplicationStatus]) -> Result<()> {
    let Some(first) = history.first() else {
        return Ok(());
    };
    if *first != ApplicationStatus::Submitted {
        return Err(SchemaError::ContractViolation {
            count: 1,
            summary: format!("application history starts at '{}' instead of 'submitted'", first),
        });
    }

    for pair in history.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if !from.can_transition_to(to) {
            return Err(SchemaError::ContractViolation {
                count: 1,
                summary: format!("application status cannot move from '{}' to '{}'", from, to),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCategory {
    pub id: Id,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryRange<'a> {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub currency: Option<&'a str>,
    pub period: Option<SalaryType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Id,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
    pub company: Company,
    pub location: String,
    pub workplace_type: WorkplaceType,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<JobCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_type: Option<SalaryType>,
    pub skills_required: Vec<Skill>,
    pub skills_preferred: Vec<Skill>,
    pub is_active: bool,
    pub is_featured: bool,
    pub posted_by: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<NaiveDate>,
    pub view_count: u64,
    pub application_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Populated only for authenticated requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_saved: Option<bool>,
    /// Populated only for authenticated requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_applied: Option<bool>,
}

impl Job {
    pub fn salary_range(&self) -> Option<SalaryRange<'_>> {
        if self.salary_min.is_none() && self.salary_max.is_none() {
            return None;
        }
        Some(SalaryRange {
            min: self.salary_min,
            max: self.salary_max,
            currency: self.salary_currency.as_deref(),
            period: self.salary_type,
        })
    }

    pub fn is_open_on(&self, day: NaiveDate) -> bool {
        self.is_active && self.application_deadline.map_or(true, |deadline| day <= deadline)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Id,
    pub job: Job,
    pub applicant: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    pub status: ApplicationStatus,
    pub applied_date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_updated_at: Option<Timestamp>,
}
