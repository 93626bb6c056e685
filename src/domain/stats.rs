use crate::domain::feed::Post;
use serde::{Deserialize, Serialize};

/// Job dashboard counters for the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStats {
    pub applications_sent: u64,
    pub applications_pending: u64,
    pub applications_under_review: u64,
    pub saved_jobs: u64,
    pub jobs_posted: u64,
    pub active_jobs_posted: u64,
    /// Only for users who post jobs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_applications_received: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_applications: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedStats {
    pub posts_today: u64,
    pub posts_this_week: u64,
    pub total_likes_received: u64,
    pub total_comments_received: u64,
    pub total_shares_received: u64,
    pub engagement_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_performing_post: Option<Post>,
}

impl FeedStats {
    pub fn total_interactions(&self) -> u64 {
        self.total_likes_received
            .saturating_add(self.total_comments_received)
            .saturating_add(self.total_shares_received)
    }
}
