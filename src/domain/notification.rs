use crate::domain::feed::{Comment, Post};
use crate::domain::model::{closed_enum, Id, Timestamp};
use crate::domain::user::User;
use serde::{Deserialize, Serialize};

closed_enum! {
    pub enum NotificationType as "notification_type" {
        Like => "like",
        Comment => "comment",
        Share => "share",
        Mention => "mention",
        Follow => "follow",
        ConnectionRequest => "connection_request",
        JobApplication => "job_application",
        JobMatch => "job_match",
    }
}

impl NotificationType {
    /// Types raised by activity on a post.
    pub fn concerns_post(&self) -> bool {
        matches!(
            self,
            NotificationType::Like
                | NotificationType::Comment
                | NotificationType::Share
                | NotificationType::Mention
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Id,
    pub recipient: User,
    pub sender: User,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    /// Absolute URL or a client route such as `/posts/12`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    pub is_read: bool,
    pub created_at: Timestamp,
}
