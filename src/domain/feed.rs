use crate::domain::jobs::Job;
use crate::domain::model::{closed_enum, Id, Timestamp};
use crate::domain::user::User;
use serde::{Deserialize, Serialize};

closed_enum! {
    pub enum PostType as "post_type" {
        Text => "text",
        Image => "image",
        Video => "video",
        Article => "article",
        Poll => "poll",
        JobShare => "job_share",
        Achievement => "achievement",
    }
}

closed_enum! {
    pub enum Visibility as "visibility" {
        Public => "public",
        Connections => "connections",
        Private => "private",
    }
}

closed_enum! {
    pub enum ReactionType as "reaction_type" {
        Like => "like",
        Love => "love",
        Celebrate => "celebrate",
        Support => "support",
        Funny => "funny",
        Angry => "angry",
        Sad => "sad",
        Dislike => "dislike",
    }
}

closed_enum! {
    pub enum ShareType as "share_type" {
        Share => "share",
        Repost => "repost",
    }
}

/// A feed item. Counters and engagement figures are computed by the server
/// and read-only on the client.
///
/// The `user_*` and `can_*` fields are populated only when the request
/// carries an authenticated session; `None` means "unknown", not `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
    pub author: User,
    pub content: String,
    pub post_type: PostType,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_image: Option<String>,
    /// Set on `job_share` posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_job: Option<Job>,
    pub hashtags: Vec<Hashtag>,
    pub mentioned_users: Vec<User>,
    pub likes_count: u64,
    pub comments_count: u64,
    pub shares_count: u64,
    pub views_count: u64,
    pub is_pinned: bool,
    pub is_featured: bool,
    pub is_reported: bool,
    pub is_approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_has_liked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_has_saved: Option<bool>,
    /// Free-form on the wire; usually one of the [`ReactionType`] literals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_reaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_edit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_delete: Option<bool>,
    pub engagement_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_comments: Option<Vec<Comment>>,
    pub engagement_score: f64,
}

impl Post {
    /// The viewer's reaction, when it is one of the declared literals.
    pub fn reaction(&self) -> Option<ReactionType> {
        self.user_reaction.as_deref().and_then(|r| r.parse().ok())
    }

    pub fn has_hashtag(&self, name: &str) -> bool {
        let wanted = name.trim_start_matches('#');
        self.hashtags
            .iter()
            .any(|tag| tag.name.eq_ignore_ascii_case(wanted))
    }
}

/// A comment on a post. `parent` links a reply to the comment it answers and
/// `replies` may embed the next level of the thread. Walk the tree with
/// [`crate::core::comment_tree`], which does not recurse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Id,
    pub post: Id,
    pub author: User,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Id>,
    pub likes_count: u64,
    pub replies_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_has_liked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_edit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<Comment>>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent.is_some()
    }

    pub fn replies(&self) -> &[Comment] {
        self.replies.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostLike {
    pub id: Id,
    pub user: User,
    pub post: Post,
    pub reaction_type: ReactionType,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostShare {
    pub id: Id,
    pub user: User,
    pub post: Post,
    pub share_type: ShareType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPost {
    pub id: Id,
    pub user: User,
    pub post: Post,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashtag {
    pub id: Id,
    /// Stored without the leading `#`.
    pub name: String,
    pub posts_count: u64,
    pub is_trending: bool,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_type_literals() {
        assert_eq!(PostType::ALL.len(), 7);
        assert_eq!("job_share".parse::<PostType>().unwrap(), PostType::JobShare);
        assert!(serde_json::from_str::<PostType>("\"story\"").is_err());
    }

    #[test]
    fn test_reaction_literals() {
        assert_eq!(ReactionType::ALL.len(), 8);
        assert!(serde_json::from_str::<ReactionType>("\"wow\"").is_err());
        assert_eq!(serde_json::to_string(&ReactionType::Celebrate).unwrap(), "\"celebrate\"");
    }

    #[test]
    fn test_visibility_is_lowercase_only() {
        assert!(serde_json::from_str::<Visibility>("\"Public\"").is_err());
        assert_eq!(serde_json::from_str::<Visibility>("\"public\"").unwrap(), Visibility::Public);
    }
}
