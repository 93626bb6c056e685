use chrono::NaiveDate;
use prolink_schema::domain::auth::AuthResponse;
use prolink_schema::domain::feed::{Comment, Post, PostType};
use prolink_schema::domain::filters::{JobFilters, PostFilters};
use prolink_schema::domain::jobs::{
    validate_status_history, ApplicationStatus, Job, JobApplication, JobType, SalaryType, WorkplaceType,
};
use prolink_schema::domain::network::Connection;
use prolink_schema::domain::notification::{Notification, NotificationType};
use prolink_schema::{check, ApiError, ContractRules, PaginatedResponse};
use serde_json::{json, Value};
use url::Url;

fn user(id: u64) -> Value {
    json!({
        "id": id,
        "email": format!("member{}@prolink.dev", id),
        "first_name": "Member",
        "last_name": format!("No{}", id),
        "headline": "Backend engineer",
        "experience_level": "senior",
        "date_joined": "2023-05-10T08:30:00Z"
    })
}

fn company() -> Value {
    json!({
        "id": 7,
        "name": "Acme Robotics",
        "slug": "acme-robotics",
        "website": "https://acme.example.com",
        "industry": {"id": 3, "name": "Manufacturing"},
        "company_size": "51-200",
        "is_verified": true,
        "follower_count": 1200,
        "created_at": "2020-01-01T00:00:00Z"
    })
}

fn job() -> Value {
    json!({
        "id": 42,
        "title": "Rust Engineer",
        "slug": "rust-engineer",
        "description": "Build the robot fleet controller.",
        "company": company(),
        "location": "Berlin",
        "workplace_type": "hybrid",
        "job_type": "full_time",
        "experience_level": "mid",
        "category": {"id": 1, "name": "Engineering", "slug": "engineering"},
        "salary_min": 70000.0,
        "salary_max": 90000.0,
        "salary_currency": "EUR",
        "salary_type": "yearly",
        "skills_required": [{"id": 1, "name": "Rust"}],
        "skills_preferred": [{"id": 2, "name": "Tokio"}],
        "is_active": true,
        "is_featured": false,
        "posted_by": user(1),
        "application_deadline": "2024-12-31",
        "view_count": 311,
        "application_count": 12,
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-02T10:00:00Z"
    })
}

fn comment(id: u64, post: u64) -> Value {
    json!({
        "id": id,
        "post": post,
        "author": user(2),
        "content": "Congrats!",
        "likes_count": 1,
        "replies_count": 0,
        "created_at": "2024-03-05T12:00:00Z",
        "updated_at": "2024-03-05T12:00:00Z"
    })
}

fn post(id: u64) -> Value {
    json!({
        "id": id,
        "author": user(1),
        "content": "We are hiring! #rust",
        "post_type": "job_share",
        "visibility": "public",
        "shared_job": job(),
        "hashtags": [{"id": 9, "name": "rust", "posts_count": 120, "is_trending": true, "created_at": "2022-01-01T00:00:00Z"}],
        "mentioned_users": [user(3)],
        "likes_count": 5,
        "comments_count": 1,
        "shares_count": 0,
        "views_count": 80,
        "is_pinned": false,
        "is_featured": false,
        "is_reported": false,
        "is_approved": true,
        "created_at": "2024-03-05T09:00:00Z",
        "updated_at": "2024-03-05T09:00:00Z",
        "user_has_liked": true,
        "user_reaction": "celebrate",
        "engagement_rate": 0.075,
        "top_comments": [comment(100, id)],
        "engagement_score": 12.5
    })
}

#[test]
fn test_post_fixture_round_trip() {
    let parsed: Post = serde_json::from_value(post(11)).unwrap();
    assert_eq!(parsed.post_type, PostType::JobShare);
    assert!(parsed.has_hashtag("#Rust"));
    assert_eq!(parsed.user_has_saved, None);

    let again: Post = serde_json::from_str(&serde_json::to_string(&parsed).unwrap()).unwrap();
    assert_eq!(again, parsed);
    assert!(check(&parsed, &ContractRules::default()).is_clean());
}

#[test]
fn test_job_salary_and_deadline() {
    let parsed: Job = serde_json::from_value(job()).unwrap();
    let range = parsed.salary_range().unwrap();
    assert_eq!(range.min, Some(70000.0));
    assert_eq!(range.max, Some(90000.0));
    assert_eq!(range.currency, Some("EUR"));
    assert_eq!(range.period, Some(SalaryType::Yearly));

    let deadline = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    assert!(parsed.is_open_on(deadline));
    assert!(!parsed.is_open_on(deadline.succ_opt().unwrap()));

    let mut unpaid = job();
    unpaid["salary_min"] = Value::Null;
    unpaid["salary_max"] = Value::Null;
    unpaid["is_active"] = json!(false);
    let unpaid: Job = serde_json::from_value(unpaid).unwrap();
    assert!(unpaid.salary_range().is_none());
    assert!(!unpaid.is_open_on(deadline));
}

#[test]
fn test_unknown_enum_literals_rejected() {
    let mut bad_post = post(11);
    bad_post["post_type"] = json!("story");
    assert!(serde_json::from_value::<Post>(bad_post).is_err());

    let mut bad_job = job();
    bad_job["workplace_type"] = json!("Remote");
    assert!(serde_json::from_value::<Job>(bad_job).is_err());

    let notification = json!({
        "id": 1,
        "recipient": user(1),
        "sender": user(2),
        "notification_type": "birthday",
        "title": "t",
        "message": "m",
        "is_read": false,
        "created_at": "2024-03-05T09:00:00Z"
    });
    assert!(serde_json::from_value::<Notification>(notification).is_err());
}

#[test]
fn test_notification_with_post_and_comment() {
    let notification: Notification = serde_json::from_value(json!({
        "id": 1,
        "recipient": user(1),
        "sender": user(2),
        "notification_type": "comment",
        "title": "New comment",
        "message": "Member No2 commented on your post",
        "post": post(11),
        "comment": comment(100, 11),
        "action_url": "/posts/11",
        "is_read": false,
        "created_at": "2024-03-05T12:01:00Z"
    }))
    .unwrap();

    assert_eq!(notification.notification_type, NotificationType::Comment);
    assert!(check(&notification, &ContractRules::default()).is_clean());

    let mut mismatched = notification.clone();
    if let Some(c) = mismatched.comment.as_mut() {
        c.post = 12;
    }
    let report = check(&mismatched, &ContractRules::default());
    assert!(report.violations().iter().any(|v| v.field == "comment"));
}

#[test]
fn test_job_application_history() {
    let application: JobApplication = serde_json::from_value(json!({
        "id": 5,
        "job": job(),
        "applicant": user(4),
        "portfolio_url": "https://member4.dev",
        "status": "under_review",
        "applied_date": "2024-03-10T10:00:00Z",
        "status_updated_at": "2024-03-11T10:00:00Z"
    }))
    .unwrap();
    assert_eq!(application.job.job_type, JobType::FullTime);
    assert_eq!(application.job.workplace_type, WorkplaceType::Hybrid);
    assert!(check(&application, &ContractRules::default()).is_clean());

    use ApplicationStatus::*;
    assert!(validate_status_history(&[Submitted, application.status, Interviewed, Hired]).is_ok());
    assert!(validate_status_history(&[Submitted, UnderReview, Interviewed, Hired, Submitted]).is_err());
}

#[test]
fn test_application_updated_before_applied() {
    let application: JobApplication = serde_json::from_value(json!({
        "id": 5,
        "job": job(),
        "applicant": user(4),
        "status": "rejected",
        "applied_date": "2024-03-10T10:00:00Z",
        "status_updated_at": "2024-03-09T10:00:00Z"
    }))
    .unwrap();
    let report = check(&application, &ContractRules::default());
    assert_eq!(report.len(), 1);
    assert_eq!(report.violations()[0].field, "status_updated_at");
}

#[test]
fn test_connection_fixture() {
    let fixture = json!({
        "id": 77,
        "user1": user(1),
        "user2": user(2),
        "connection_request": {
            "id": 8,
            "sender": user(2),
            "receiver": user(1),
            "message": "Let's connect",
            "status": "accepted",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z",
            "responded_at": "2024-01-02T00:00:00Z"
        },
        "interaction_count": 3,
        "connected_at": "2024-01-02T00:00:00Z"
    });

    let connection: Connection = serde_json::from_value(fixture.clone()).unwrap();
    assert_eq!(connection.other_party(1).map(|u| u.id), Some(2));
    assert!(connection.involves(2));
    assert!(!connection.involves(3));
    assert!(check(&connection, &ContractRules::default()).is_clean());

    let mut pending = fixture;
    pending["connection_request"]["status"] = json!("pending");
    pending["connection_request"]["responded_at"] = Value::Null;
    let connection: Connection = serde_json::from_value(pending).unwrap();
    assert!(!check(&connection, &ContractRules::default()).is_clean());
}

#[test]
fn test_comment_page_consistency() {
    let rules = ContractRules {
        page_size: 2,
        ..ContractRules::default()
    };

    let page: PaginatedResponse<Comment> = serde_json::from_value(json!({
        "count": 5,
        "next": "https://api.prolink.dev/api/posts/11/comments/?page=3",
        "previous": "https://api.prolink.dev/api/posts/11/comments/",
        "results": [comment(101, 11), comment(102, 11)]
    }))
    .unwrap();
    assert!(check(&page, &rules).is_clean(), "{:?}", check(&page, &rules).violations());

    let short: PaginatedResponse<Comment> = serde_json::from_value(json!({
        "count": 5,
        "next": "/api/posts/11/comments/?page=2",
        "previous": null,
        "results": [comment(101, 11)]
    }))
    .unwrap();
    let report = check(&short, &rules);
    assert_eq!(report.len(), 1);
    assert_eq!(report.violations()[0].field, "results");

    let duplicated: PaginatedResponse<Comment> = serde_json::from_value(json!({
        "count": 2,
        "next": null,
        "previous": null,
        "results": [comment(101, 11), comment(101, 11)]
    }))
    .unwrap();
    assert!(check(&duplicated, &rules)
        .violations()
        .iter()
        .any(|v| v.message.contains("appears twice")));
}

#[test]
fn test_filters_build_query() {
    let filters = JobFilters {
        search: Some("  rust ".to_string()),
        job_type: vec![JobType::FullTime, JobType::Contract],
        is_featured: Some(true),
        page: Some(2),
        ..JobFilters::default()
    };

    let mut url = Url::parse("https://api.prolink.dev/api/jobs/").unwrap();
    filters.apply_to(&mut url);
    assert_eq!(url.query(), Some("search=rust&job_type=full_time%2Ccontract&is_featured=true&page=2"));

    let posts = PostFilters {
        hashtag: Some("#hiring".to_string()),
        ..PostFilters::default()
    };
    assert_eq!(posts.to_query_pairs(), vec![("hashtag", "hiring".to_string())]);
    assert!(PostFilters::default().is_empty());
}

#[test]
fn test_api_error_and_auth_response() {
    let error: ApiError = serde_json::from_value(json!({
        "message": "Validation failed",
        "errors": {"email": ["A user with that email already exists."]}
    }))
    .unwrap();
    assert!(error.has_field_errors());
    assert_eq!(error.field_errors("email").len(), 1);
    assert!(error.field_errors("password").is_empty());

    let auth: AuthResponse = serde_json::from_value(json!({
        "user": user(1),
        "refresh": "refresh-token",
        "access": "access-token",
        "message": "Login successful"
    }))
    .unwrap();
    assert_eq!(auth.tokens().access, "access-token");
    assert!(!format!("{:?}", auth).contains("access-token"));
}
