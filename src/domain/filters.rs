//! Query parameter shapes for the list endpoints. Every field is optional and
//! unset fields never reach the query string.

use crate::domain::feed::PostType;
use crate::domain::jobs::{JobType, WorkplaceType};
use crate::domain::model::{ExperienceLevel, Id};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub job_type: Vec<JobType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workplace_type: Vec<WorkplaceType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experience_level: Vec<ExperienceLevel>,
    /// Comma separated skill names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_after: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    /// Field name, `-` prefixed for descending, e.g. `-created_at`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl JobFilters {
    pub fn is_empty(&self) -> bool {
        *self == JobFilters::default()
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "search", self.search.as_deref());
        push_text(&mut pairs, "location", self.location.as_deref());
        push_text(&mut pairs, "company_name", self.company_name.as_deref());
        push_list(&mut pairs, "job_type", self.job_type.iter().map(|t| t.as_str()));
        push_list(&mut pairs, "workplace_type", self.workplace_type.iter().map(|t| t.as_str()));
        push_list(&mut pairs, "experience_level", self.experience_level.iter().map(|l| l.as_str()));
        push_text(&mut pairs, "skills", self.skills.as_deref());
        if let Some(min) = self.salary_min {
            pairs.push(("salary_min", min.to_string()));
        }
        if let Some(max) = self.salary_max {
            pairs.push(("salary_max", max.to_string()));
        }
        if let Some(date) = self.posted_after {
            pairs.push(("posted_after", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(featured) = self.is_featured {
            pairs.push(("is_featured", featured.to_string()));
        }
        push_text(&mut pairs, "ordering", self.ordering.as_deref());
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }

    pub fn apply_to(&self, url: &mut Url) {
        append_pairs(url, &self.to_query_pairs());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_type: Option<PostType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtag: Option<String>,
    /// Author user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl PostFilters {
    pub fn is_empty(&self) -> bool {
        *self == PostFilters::default()
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "search", self.search.as_deref());
        if let Some(post_type) = self.post_type {
            pairs.push(("post_type", post_type.as_str().to_string()));
        }
        push_text(
            &mut pairs,
            "hashtag",
            self.hashtag.as_deref().map(|tag| tag.trim_start_matches('#')),
        );
        if let Some(author) = self.author {
            pairs.push(("author", author.to_string()));
        }
        push_text(&mut pairs, "ordering", self.ordering.as_deref());
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }

    pub fn apply_to(&self, url: &mut Url) {
        append_pairs(url, &self.to_query_pairs());
    }
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_string()));
    }
}

fn push_list<'a>(
    pairs: &mut Vec<(&'static str, String)>,
    key: &'static str,
    values: impl Iterator<Item = &'a str>,
) {
    let joined = values.collect::<Vec<_>>().join(",");
    if !joined.is_empty() {
        pairs.push((key, joined));
    }
}

fn append_pairs(url: &mut Url, pairs: &[(&'static str, String)]) {
    if pairs.is_empty() {
        return;
    }
    let mut query = url.query_pairs_mut();
    for (key, value) in pairs {
        query.append_pair(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filters_leave_url_alone() {
        let mut url = Url::parse("https://api.example.com/jobs/").unwrap();
        JobFilters::default().apply_to(&mut url);
        assert_eq!(url.as_str(), "https://api.example.com/jobs/");
        assert!(JobFilters::default().is_empty());
        assert!(PostFilters::default().to_query_pairs().is_empty());
    }

    #[test]
    fn test_job_filters_join_lists() {
        let filters = JobFilters {
            search: Some("rust".to_string()),
            job_type: vec![JobType::FullTime, JobType::Contract],
            workplace_type: vec![WorkplaceType::Remote],
            salary_min: Some(90000.0),
            posted_after: NaiveDate::from_ymd_opt(2024, 5, 1),
            page: Some(2),
            ..Default::default()
        };

        let pairs = filters.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("search", "rust".to_string()),
                ("job_type", "full_time,contract".to_string()),
                ("workplace_type", "remote".to_string()),
                ("salary_min", "90000".to_string()),
                ("posted_after", "2024-05-01".to_string()),
                ("page", "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_text_is_skipped() {
        let filters = PostFilters {
            search: Some("   ".to_string()),
            hashtag: Some("#rustlang".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.to_query_pairs(), vec![("hashtag", "rustlang".to_string())]);
    }

    #[test]
    fn test_post_filters_encode_into_url() {
        let filters = PostFilters {
            search: Some("open source".to_string()),
            post_type: Some(PostType::Article),
            author: Some(42),
            ordering: Some("-created_at".to_string()),
            ..Default::default()
        };
        let mut url = Url::parse("https://api.example.com/posts/").unwrap();
        filters.apply_to(&mut url);
        assert_eq!(
            url.query(),
            Some("search=open+source&post_type=article&author=42&ordering=-created_at")
        );
    }

    #[test]
    fn test_filters_reject_unknown_enum_literal() {
        let parsed = serde_json::from_value::<JobFilters>(serde_json::json!({
            "job_type": ["full_time", "gig"]
        }));
        assert!(parsed.is_err());
    }
}
