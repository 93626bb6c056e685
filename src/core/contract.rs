//! Executable forms of the invariants the backend promises but the wire shapes
//! cannot express. Checks never fail fast: every broken rule in a payload is
//! recorded so one run shows the whole picture.

use crate::core::comment_tree::{self, DEFAULT_MAX_COMMENT_DEPTH};
use crate::core::pagination::{self, DEFAULT_PAGE_SIZE};
use crate::domain::auth::AuthResponse;
use crate::domain::company::{Company, Industry};
use crate::domain::envelope::{ApiError, PaginatedResponse};
use crate::domain::feed::{Comment, Hashtag, Post, PostLike, PostShare, SavedPost};
use crate::domain::filters::{JobFilters, PostFilters};
use crate::domain::jobs::{Job, JobApplication, JobCategory};
use crate::domain::model::Id;
use crate::domain::network::{
    Connection, ConnectionRequest, ConnectionRequestStatus, Follow, NetworkMetrics,
    UserRecommendation,
};
use crate::domain::notification::Notification;
use crate::domain::stats::{FeedStats, JobStats};
use crate::domain::user::{
    Education, Experience, Skill, User, UserSearchQuery, UserSkill, MAX_USER_SEARCH_RESULTS,
};
use crate::utils::error::{Result, SchemaError};
use crate::utils::validation::{is_http_url, is_valid_currency_code, is_valid_email, is_valid_slug};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractRules {
    pub max_comment_depth: usize,
    pub page_size: usize,
}

impl Default for ContractRules {
    fn default() -> Self {
        Self {
            max_comment_depth: DEFAULT_MAX_COMMENT_DEPTH,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub entity: &'static str,
    pub id: Option<Id>,
    pub field: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}#{}.{}: {}", self.entity, id, self.field, self.message),
            None => write!(f, "{}.{}: {}", self.entity, self.field, self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractReport {
    violations: Vec<Violation>,
}

impl ContractReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        entity: &'static str,
        id: Option<Id>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.violations.push(Violation {
            entity,
            id,
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_result(self) -> Result<()> {
        if self.violations.is_empty() {
            return Ok(());
        }
        let summary = self
            .violations
            .iter()
            .map(Violation::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(SchemaError::ContractViolation {
            count: self.violations.len(),
            summary,
        })
    }
}

pub trait Contract {
    const ENTITY: &'static str;

    fn entity_id(&self) -> Option<Id> {
        None
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport);
}

/// Runs the checks for one value and returns what they found.
pub fn check<T: Contract>(value: &T, rules: &ContractRules) -> ContractReport {
    let mut report = ContractReport::new();
    value.check(rules, &mut report);
    report
}

fn check_url(
    report: &mut ContractReport,
    entity: &'static str,
    id: Id,
    field: &str,
    value: Option<&str>,
) {
    if let Some(url) = value {
        if !is_http_url(url) {
            report.record(entity, Some(id), field, format!("'{}' is not an http(s) URL", url));
        }
    }
}

fn check_non_negative(report: &mut ContractReport, entity: &'static str, id: Option<Id>, field: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        report.record(entity, id, field, format!("{} must be a finite, non-negative number", value));
    }
}

fn check_distinct_users(report: &mut ContractReport, entity: &'static str, id: Id, a: &User, b: &User, field: &str) {
    if a.id == b.id {
        report.record(entity, Some(id), field, format!("both sides are user {}", a.id));
    }
}

impl Contract for User {
    const ENTITY: &'static str = "user";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        if !is_valid_email(&self.email) {
            report.record(Self::ENTITY, Some(self.id), "email", format!("'{}' is not an email address", self.email));
        }
        check_url(report, Self::ENTITY, self.id, "website", self.website.as_deref());
        check_url(report, Self::ENTITY, self.id, "profile_picture_url", self.profile_picture_url.as_deref());

        for experience in self.experiences.iter().flatten() {
            experience.check(rules, report);
        }
        for education in self.education.iter().flatten() {
            education.check(rules, report);
        }
        for user_skill in self.user_skills.iter().flatten() {
            user_skill.check(rules, report);
        }
    }
}

impl Contract for Skill {
    const ENTITY: &'static str = "skill";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, _rules: &ContractRules, report: &mut ContractReport) {
        if self.name.trim().is_empty() {
            report.record(Self::ENTITY, Some(self.id), "name", "skill name is empty");
        }
    }
}

impl Contract for UserSkill {
    const ENTITY: &'static str = "user_skill";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        self.skill.check(rules, report);
        self.user.check(rules, report);
    }
}

impl Contract for Experience {
    const ENTITY: &'static str = "experience";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, _rules: &ContractRules, report: &mut ContractReport) {
        if let Some(end) = self.end_date {
            if end < self.start_date {
                report.record(
                    Self::ENTITY,
                    Some(self.id),
                    "end_date",
                    format!("ends {} before it starts {}", end, self.start_date),
                );
            }
            if self.is_current {
                report.record(Self::ENTITY, Some(self.id), "end_date", "current position has an end date");
            }
        }
    }
}

impl Contract for Education {
    const ENTITY: &'static str = "education";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, _rules: &ContractRules, report: &mut ContractReport) {
        if let Some(end) = self.end_year {
            if end < self.start_year {
                report.record(
                    Self::ENTITY,
                    Some(self.id),
                    "end_year",
                    format!("ends {} before it starts {}", end, self.start_year),
                );
            }
        }
    }
}

impl Contract for Hashtag {
    const ENTITY: &'static str = "hashtag";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, _rules: &ContractRules, report: &mut ContractReport) {
        if self.name.trim().is_empty() {
            report.record(Self::ENTITY, Some(self.id), "name", "hashtag name is empty");
        } else if self.name.starts_with('#') {
            report.record(Self::ENTITY, Some(self.id), "name", "hashtag names are stored without '#'");
        }
    }
}

impl Contract for Comment {
    const ENTITY: &'static str = "comment";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        comment_tree::check_thread(self, rules, report);
    }
}

impl Contract for Post {
    const ENTITY: &'static str = "post";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        self.author.check(rules, report);
        check_url(report, Self::ENTITY, self.id, "article_url", self.article_url.as_deref());
        check_non_negative(report, Self::ENTITY, Some(self.id), "engagement_rate", self.engagement_rate);
        check_non_negative(report, Self::ENTITY, Some(self.id), "engagement_score", self.engagement_score);

        if let Some(job) = &self.shared_job {
            job.check(rules, report);
        }

        let mut seen = HashSet::new();
        for tag in &self.hashtags {
            if !seen.insert(tag.id) {
                report.record(Self::ENTITY, Some(self.id), "hashtags", format!("hashtag {} listed twice", tag.id));
            }
            tag.check(rules, report);
        }
        for user in &self.mentioned_users {
            user.check(rules, report);
        }

        for comment in self.top_comments.iter().flatten() {
            if comment.post != self.id {
                report.record(
                    Self::ENTITY,
                    Some(self.id),
                    "top_comments",
                    format!("comment {} belongs to post {}", comment.id, comment.post),
                );
            }
            comment.check(rules, report);
        }
    }
}

impl Contract for PostLike {
    const ENTITY: &'static str = "post_like";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        self.user.check(rules, report);
        self.post.check(rules, report);
    }
}

impl Contract for PostShare {
    const ENTITY: &'static str = "post_share";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        self.user.check(rules, report);
        self.post.check(rules, report);
    }
}

impl Contract for SavedPost {
    const ENTITY: &'static str = "saved_post";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        self.user.check(rules, report);
        self.post.check(rules, report);
    }
}

impl Contract for Notification {
    const ENTITY: &'static str = "notification";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        self.recipient.check(rules, report);
        self.sender.check(rules, report);

        if let Some(url) = &self.action_url {
            if !(url.starts_with('/') || is_http_url(url)) {
                report.record(
                    Self::ENTITY,
                    Some(self.id),
                    "action_url",
                    format!("'{}' is neither an absolute URL nor a client route", url),
                );
            }
        }

        if let (Some(post), Some(comment)) = (&self.post, &self.comment) {
            if comment.post != post.id {
                report.record(
                    Self::ENTITY,
                    Some(self.id),
                    "comment",
                    format!("comment {} is on post {}, not on post {}", comment.id, comment.post, post.id),
                );
            }
        }
        if let Some(post) = &self.post {
            post.check(rules, report);
        }
        if let Some(comment) = &self.comment {
            comment.check(rules, report);
        }
    }
}

impl Contract for Industry {
    const ENTITY: &'static str = "industry";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, _rules: &ContractRules, report: &mut ContractReport) {
        if self.name.trim().is_empty() {
            report.record(Self::ENTITY, Some(self.id), "name", "industry name is empty");
        }
    }
}

impl Contract for Company {
    const ENTITY: &'static str = "company";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        if !is_valid_slug(&self.slug) {
            report.record(Self::ENTITY, Some(self.id), "slug", format!("'{}' is not a slug", self.slug));
        }
        check_url(report, Self::ENTITY, self.id, "website", self.website.as_deref());
        if let Some(industry) = &self.industry {
            industry.check(rules, report);
        }
    }
}

impl Contract for JobCategory {
    const ENTITY: &'static str = "job_category";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, _rules: &ContractRules, report: &mut ContractReport) {
        if !is_valid_slug(&self.slug) {
            report.record(Self::ENTITY, Some(self.id), "slug", format!("'{}' is not a slug", self.slug));
        }
    }
}

impl Contract for Job {
    const ENTITY: &'static str = "job";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        if !is_valid_slug(&self.slug) {
            report.record(Self::ENTITY, Some(self.id), "slug", format!("'{}' is not a slug", self.slug));
        }

        if let Some(min) = self.salary_min {
            check_non_negative(report, Self::ENTITY, Some(self.id), "salary_min", min);
        }
        if let Some(max) = self.salary_max {
            check_non_negative(report, Self::ENTITY, Some(self.id), "salary_max", max);
        }
        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                report.record(
                    Self::ENTITY,
                    Some(self.id),
                    "salary_max",
                    format!("salary range {}..{} is inverted", min, max),
                );
            }
        }
        if let Some(currency) = &self.salary_currency {
            if !is_valid_currency_code(currency) {
                report.record(
                    Self::ENTITY,
                    Some(self.id),
                    "salary_currency",
                    format!("'{}' is not a three-letter currency code", currency),
                );
            }
        }

        self.company.check(rules, report);
        self.posted_by.check(rules, report);
        if let Some(category) = &self.category {
            category.check(rules, report);
        }
        for skill in self.skills_required.iter().chain(&self.skills_preferred) {
            skill.check(rules, report);
        }
    }
}

impl Contract for JobApplication {
    const ENTITY: &'static str = "job_application";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        if let Some(updated) = self.status_updated_at {
            if updated < self.applied_date {
                report.record(
                    Self::ENTITY,
                    Some(self.id),
                    "status_updated_at",
                    format!("status changed at {} before the application at {}", updated, self.applied_date),
                );
            }
        }
        check_url(report, Self::ENTITY, self.id, "portfolio_url", self.portfolio_url.as_deref());
        self.job.check(rules, report);
        self.applicant.check(rules, report);
    }
}

impl Contract for ConnectionRequest {
    const ENTITY: &'static str = "connection_request";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        check_distinct_users(report, Self::ENTITY, self.id, &self.sender, &self.receiver, "receiver");
        if self.status == ConnectionRequestStatus::Pending && self.responded_at.is_some() {
            report.record(Self::ENTITY, Some(self.id), "responded_at", "pending request has a response time");
        }
        self.sender.check(rules, report);
        self.receiver.check(rules, report);
    }
}

impl Contract for Connection {
    const ENTITY: &'static str = "connection";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        check_distinct_users(report, Self::ENTITY, self.id, &self.user1, &self.user2, "user2");

        let request = &self.connection_request;
        if request.status != ConnectionRequestStatus::Accepted {
            report.record(
                Self::ENTITY,
                Some(self.id),
                "connection_request",
                format!("request {} is '{}', not 'accepted'", request.id, request.status),
            );
        }

        let request_pair = {
            let (a, b) = (request.sender.id, request.receiver.id);
            (a.min(b), a.max(b))
        };
        if request_pair != self.pair_key() {
            report.record(
                Self::ENTITY,
                Some(self.id),
                "connection_request",
                format!(
                    "request is between users {:?} but the connection is between {:?}",
                    request_pair,
                    self.pair_key()
                ),
            );
        }

        request.check(rules, report);
        self.user1.check(rules, report);
        self.user2.check(rules, report);
    }
}

impl Contract for Follow {
    const ENTITY: &'static str = "follow";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        check_distinct_users(report, Self::ENTITY, self.id, &self.follower, &self.following, "following");
        self.follower.check(rules, report);
        self.following.check(rules, report);
    }
}

impl Contract for UserRecommendation {
    const ENTITY: &'static str = "user_recommendation";

    fn entity_id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        check_distinct_users(report, Self::ENTITY, self.id, &self.user, &self.recommended_user, "recommended_user");
        check_non_negative(report, Self::ENTITY, Some(self.id), "score", self.score);
        if self.dismissed_at.is_some() && !self.is_dismissed {
            report.record(Self::ENTITY, Some(self.id), "dismissed_at", "set while is_dismissed is false");
        }
        if self.viewed_at.is_some() && !self.is_viewed {
            report.record(Self::ENTITY, Some(self.id), "viewed_at", "set while is_viewed is false");
        }
        self.user.check(rules, report);
        self.recommended_user.check(rules, report);
    }
}

impl Contract for NetworkMetrics {
    const ENTITY: &'static str = "network_metrics";

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        let pct = self.industry_connection_percentage;
        if !(0.0..=100.0).contains(&pct) {
            report.record(
                Self::ENTITY,
                None,
                "industry_connection_percentage",
                format!("{} is outside 0..=100", pct),
            );
        }
        check_non_negative(report, Self::ENTITY, None, "post_engagement_rate", self.post_engagement_rate);
        check_non_negative(report, Self::ENTITY, None, "avg_connections_per_month", self.avg_connections_per_month);
        self.user.check(rules, report);
    }
}

impl Contract for JobStats {
    const ENTITY: &'static str = "job_stats";

    fn check(&self, _rules: &ContractRules, report: &mut ContractReport) {
        let open = self
            .applications_pending
            .saturating_add(self.applications_under_review);
        if open > self.applications_sent {
            report.record(
                Self::ENTITY,
                None,
                "applications_sent",
                format!("{} open applications but only {} sent", open, self.applications_sent),
            );
        }
        if self.active_jobs_posted > self.jobs_posted {
            report.record(
                Self::ENTITY,
                None,
                "active_jobs_posted",
                format!("{} active of {} posted", self.active_jobs_posted, self.jobs_posted),
            );
        }
    }
}

impl Contract for FeedStats {
    const ENTITY: &'static str = "feed_stats";

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        if self.posts_today > self.posts_this_week {
            report.record(
                Self::ENTITY,
                None,
                "posts_today",
                format!("{} today but {} this week", self.posts_today, self.posts_this_week),
            );
        }
        check_non_negative(report, Self::ENTITY, None, "engagement_rate", self.engagement_rate);
        if let Some(post) = &self.top_performing_post {
            post.check(rules, report);
        }
    }
}

impl Contract for ApiError {
    const ENTITY: &'static str = "api_error";

    fn check(&self, _rules: &ContractRules, report: &mut ContractReport) {
        if self.message.trim().is_empty() {
            report.record(Self::ENTITY, None, "message", "error message is empty");
        }
        for (field, messages) in self.errors.iter().flatten() {
            if messages.is_empty() {
                report.record(Self::ENTITY, None, format!("errors.{}", field), "field listed without messages");
            }
        }
    }
}

impl Contract for AuthResponse {
    const ENTITY: &'static str = "auth_response";

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        if self.access.is_empty() {
            report.record(Self::ENTITY, None, "access", "access token is empty");
        }
        if self.refresh.is_empty() {
            report.record(Self::ENTITY, None, "refresh", "refresh token is empty");
        }
        self.user.check(rules, report);
    }
}

impl Contract for JobFilters {
    const ENTITY: &'static str = "job_filters";

    fn check(&self, _rules: &ContractRules, report: &mut ContractReport) {
        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                report.record(Self::ENTITY, None, "salary_max", format!("salary range {}..{} is inverted", min, max));
            }
        }
        if self.page == Some(0) {
            report.record(Self::ENTITY, None, "page", "pages are numbered from 1");
        }
    }
}

impl Contract for PostFilters {
    const ENTITY: &'static str = "post_filters";

    fn check(&self, _rules: &ContractRules, report: &mut ContractReport) {
        if self.page == Some(0) {
            report.record(Self::ENTITY, None, "page", "pages are numbered from 1");
        }
    }
}

impl<T: Contract> Contract for PaginatedResponse<T> {
    const ENTITY: &'static str = "page";

    fn check(&self, rules: &ContractRules, report: &mut ContractReport) {
        pagination::check_page_consistency(self, rules.page_size, report);

        let mut seen = HashSet::new();
        for item in &self.results {
            if let Some(id) = item.entity_id() {
                if !seen.insert(id) {
                    report.record(
                        Self::ENTITY,
                        None,
                        "results",
                        format!("{} {} appears twice", T::ENTITY, id),
                    );
                }
            }
            item.check(rules, report);
        }
    }
}

/// Checks a `/users/search/` answer against the query that produced it.
pub fn check_user_search(
    query: &UserSearchQuery,
    results: &[User],
    rules: &ContractRules,
    report: &mut ContractReport,
) {
    const ENTITY: &str = "user_search";

    if query.is_blank() && !results.is_empty() {
        report.record(ENTITY, None, "results", format!("blank query returned {} user(s)", results.len()));
    }
    if results.len() > MAX_USER_SEARCH_RESULTS {
        report.record(
            ENTITY,
            None,
            "results",
            format!("{} users returned, at most {} expected", results.len(), MAX_USER_SEARCH_RESULTS),
        );
    }

    let mut seen = HashSet::new();
    for user in results {
        if !seen.insert(user.id) {
            report.record(ENTITY, None, "results", format!("user {} appears twice", user.id));
        }
        user.check(rules, report);
    }
}
