use crate::domain::model::{Id, Timestamp};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use crate::domain::model::ExperienceLevel;

/// Upper bound the backend applies to `/users/search/` results.
pub const MAX_USER_SEARCH_RESULTS: usize = 20;

/// Identity and profile. Embedded copies are point-in-time snapshots; refetch
/// the profile when freshness matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub date_joined: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_company_user: Option<bool>,
    /// Only present on full profile responses, not on list/search entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiences: Option<Vec<Experience>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_skills: Option<Vec<UserSkill>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_public_profile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_show_connections: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        match &self.full_name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSkill {
    pub id: Id,
    pub skill: Skill,
    pub user: User,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Id,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: Id,
    pub school: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    pub start_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial profile update (`PATCH /users/{id}/`). Counters and identity fields
/// are server-owned and not part of this payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_public_profile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_show_connections: Option<bool>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ProfileUpdate::default()
    }
}

impl Validate for ProfileUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(first_name) = &self.first_name {
            validate_non_empty_string("first_name", first_name)?;
        }
        if let Some(last_name) = &self.last_name {
            validate_non_empty_string("last_name", last_name)?;
        }
        if let Some(website) = &self.website {
            validate_url("website", website)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSearchQuery {
    pub q: String,
}

impl UserSearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self { q: q.into() }
    }

    /// The backend answers a blank query with an empty list.
    pub fn is_blank(&self) -> bool {
        self.q.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_user() -> serde_json::Value {
        json!({
            "id": 7,
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "date_joined": "2024-01-15T10:30:00Z"
        })
    }

    #[test]
    fn test_minimal_user_omits_optionals() {
        let user: User = serde_json::from_value(minimal_user()).unwrap();
        assert_eq!(user.display_name(), "Ada Lovelace");
        assert!(user.experiences.is_none());

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back, minimal_user());
    }

    #[test]
    fn test_null_optionals_are_accepted() {
        let mut value = minimal_user();
        value["headline"] = serde_json::Value::Null;
        value["experience_level"] = serde_json::Value::Null;
        let user: User = serde_json::from_value(value).unwrap();
        assert!(user.headline.is_none());
        assert!(user.experience_level.is_none());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let mut value = minimal_user();
        value.as_object_mut().unwrap().remove("email");
        assert!(serde_json::from_value::<User>(value).is_err());
    }

    #[test]
    fn test_full_name_preferred() {
        let mut value = minimal_user();
        value["full_name"] = json!("Augusta Ada King");
        let user: User = serde_json::from_value(value).unwrap();
        assert_eq!(user.display_name(), "Augusta Ada King");
    }

    #[test]
    fn test_experience_dates() {
        let exp: Experience = serde_json::from_value(json!({
            "id": 1,
            "title": "Engineer",
            "company": "Analytical Engines Ltd",
            "start_date": "2021-03-01",
            "is_current": true
        }))
        .unwrap();
        assert_eq!(exp.start_date, NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        assert!(exp.end_date.is_none());
    }

    #[test]
    fn test_profile_update_is_partial() {
        let update = ProfileUpdate {
            headline: Some("Rustacean".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"headline": "Rustacean"}));
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_profile_update_validation() {
        let ok = ProfileUpdate {
            website: Some("https://ada.dev".to_string()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let blank_name = ProfileUpdate {
            first_name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank_name.validate().is_err());

        let bad_site = ProfileUpdate {
            website: Some("ada.dev".to_string()),
            ..Default::default()
        };
        assert!(bad_site.validate().is_err());
    }

    #[test]
    fn test_blank_search() {
        assert!(UserSearchQuery::new("   ").is_blank());
        assert!(!UserSearchQuery::new("ada").is_blank());
    }
}
