use crate::domain::model::{closed_enum, Id, Timestamp};
use crate::domain::user::User;
use serde::{Deserialize, Serialize};

closed_enum! {
    pub enum ConnectionRequestStatus as "status" {
        Pending => "pending",
        Accepted => "accepted",
        Declined => "declined",
        Withdrawn => "withdrawn",
    }
}

impl ConnectionRequestStatus {
    /// Only a pending request can be answered or withdrawn.
    pub fn can_transition_to(&self, next: ConnectionRequestStatus) -> bool {
        *self == ConnectionRequestStatus::Pending && next != ConnectionRequestStatus::Pending
    }

    pub fn is_resolved(&self) -> bool {
        *self != ConnectionRequestStatus::Pending
    }
}

closed_enum! {
    pub enum RecommendationType as "recommendation_type" {
        MutualConnections => "mutual_connections",
        SameCompany => "same_company",
        SameSchool => "same_school",
        SimilarSkills => "similar_skills",
        LocationBased => "location_based",
        IndustryBased => "industry_based",
        EmailContact => "email_contact",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    pub id: Id,
    pub sender: User,
    pub receiver: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: ConnectionRequestStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<Timestamp>,
}

/// Mutual link between two users. `user1`/`user2` carry no direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: Id,
    pub user1: User,
    pub user2: User,
    pub connection_request: ConnectionRequest,
    pub interaction_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_interaction: Option<Timestamp>,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn involves(&self, user_id: Id) -> bool {
        self.user1.id == user_id || self.user2.id == user_id
    }

    pub fn other_party(&self, user_id: Id) -> Option<&User> {
        if self.user1.id == user_id {
            Some(&self.user2)
        } else if self.user2.id == user_id {
            Some(&self.user1)
        } else {
            None
        }
    }

    /// Order-independent key for the pair, `(lower id, higher id)`.
    pub fn pair_key(&self) -> (Id, Id) {
        let (a, b) = (self.user1.id, self.user2.id);
        (a.min(b), a.max(b))
    }
}

/// Directional: `follower` sees `following`'s activity, not the reverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Follow {
    pub id: Id,
    pub follower: User,
    pub following: User,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecommendation {
    pub id: Id,
    pub user: User,
    pub recommended_user: User,
    pub recommendation_type: RecommendationType,
    pub score: f64,
    pub is_dismissed: bool,
    pub is_viewed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewed_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Server-computed snapshot; refreshed at `last_calculated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub user: User,
    pub connection_count: u64,
    pub follower_count: u64,
    pub following_count: u64,
    pub mutual_connection_count: u64,
    pub industry_connection_percentage: f64,
    pub profile_views_count: u64,
    pub search_appearances_count: u64,
    pub post_engagement_rate: f64,
    pub avg_connections_per_month: f64,
    pub last_calculated: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_transitions() {
        use super::ConnectionRequestStatus::*;
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Declined));
        assert!(Pending.can_transition_to(Withdrawn));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Accepted.can_transition_to(Declined));
        assert!(!Declined.can_transition_to(Accepted));
        assert!(Accepted.is_resolved());
    }

    #[test]
    fn test_recommendation_literals() {
        assert_eq!(RecommendationType::ALL.len(), 7);
        assert_eq!(
            "email_contact".parse::<RecommendationType>().unwrap(),
            RecommendationType::EmailContact
        );
        assert!(serde_json::from_str::<RecommendationType>("\"random\"").is_err());
    }
}
