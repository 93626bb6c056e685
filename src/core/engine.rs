use crate::core::contract::{Contract, ContractReport, ContractRules};
use crate::core::Storage;
use crate::domain::auth::AuthResponse;
use crate::domain::company::{Company, Industry};
use crate::domain::envelope::{ApiError, PaginatedResponse};
use crate::domain::feed::{Comment, Hashtag, Post, PostLike, PostShare, SavedPost};
use crate::domain::filters::{JobFilters, PostFilters};
use crate::domain::jobs::{Job, JobApplication, JobCategory};
use crate::domain::network::{Connection, ConnectionRequest, Follow, NetworkMetrics, UserRecommendation};
use crate::domain::notification::Notification;
use crate::domain::stats::{FeedStats, JobStats};
use crate::domain::user::{Education, Experience, Skill, User, UserSkill};
use crate::utils::error::{Result, SchemaError};
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::path::Path;

/// Which shape a fixture document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum EntityKind {
    User,
    Post,
    Comment,
    PostLike,
    PostShare,
    SavedPost,
    Hashtag,
    Notification,
    Job,
    JobCategory,
    JobApplication,
    Company,
    Industry,
    Skill,
    UserSkill,
    Experience,
    Education,
    ConnectionRequest,
    Connection,
    Follow,
    UserRecommendation,
    NetworkMetrics,
    JobStats,
    FeedStats,
    ApiError,
    JobFilters,
    PostFilters,
    AuthResponse,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Post => "post",
            EntityKind::Comment => "comment",
            EntityKind::PostLike => "post-like",
            EntityKind::PostShare => "post-share",
            EntityKind::SavedPost => "saved-post",
            EntityKind::Hashtag => "hashtag",
            EntityKind::Notification => "notification",
            EntityKind::Job => "job",
            EntityKind::JobCategory => "job-category",
            EntityKind::JobApplication => "job-application",
            EntityKind::Company => "company",
            EntityKind::Industry => "industry",
            EntityKind::Skill => "skill",
            EntityKind::UserSkill => "user-skill",
            EntityKind::Experience => "experience",
            EntityKind::Education => "education",
            EntityKind::ConnectionRequest => "connection-request",
            EntityKind::Connection => "connection",
            EntityKind::Follow => "follow",
            EntityKind::UserRecommendation => "user-recommendation",
            EntityKind::NetworkMetrics => "network-metrics",
            EntityKind::JobStats => "job-stats",
            EntityKind::FeedStats => "feed-stats",
            EntityKind::ApiError => "api-error",
            EntityKind::JobFilters => "job-filters",
            EntityKind::PostFilters => "post-filters",
            EntityKind::AuthResponse => "auth-response",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Clean,
    Violations(Vec<String>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn clean(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Clean)
            .count()
    }

    pub fn violations(&self) -> usize {
        self.files
            .iter()
            .map(|f| match &f.outcome {
                FileOutcome::Violations(v) => v.len(),
                _ => 0,
            })
            .sum()
    }

    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Failed(_)))
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.clean() == self.files.len()
    }

    /// One JSON object per file, for CI jobs that archive the run.
    pub fn write_json_lines(&self, path: &Path) -> Result<()> {
        let mut out = String::new();
        for file in &self.files {
            let line = match &file.outcome {
                FileOutcome::Clean => serde_json::json!({"path": file.path, "status": "clean"}),
                FileOutcome::Violations(v) => {
                    serde_json::json!({"path": file.path, "status": "violations", "violations": v})
                }
                FileOutcome::Failed(reason) => {
                    serde_json::json!({"path": file.path, "status": "failed", "reason": reason})
                }
            };
            out.push_str(&serde_json::to_string(&line)?);
            out.push('\n');
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, out)?;
        Ok(())
    }
}

pub struct FixtureEngine<S: Storage> {
    storage: S,
    rules: ContractRules,
}

impl<S: Storage> FixtureEngine<S> {
    pub fn new(storage: S, rules: ContractRules) -> Self {
        Self { storage, rules }
    }

    pub fn rules(&self) -> &ContractRules {
        &self.rules
    }

    /// Parses one JSON document as `kind` (or a page of `kind`) and checks it.
    pub fn check_bytes(&self, kind: EntityKind, paginated: bool, bytes: &[u8]) -> Result<ContractReport> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        tracing::debug!("Parsed {} bytes as JSON for {}", bytes.len(), kind);

        match kind {
            EntityKind::User => self.check_value::<User>(kind, paginated, value),
            EntityKind::Post => self.check_value::<Post>(kind, paginated, value),
            EntityKind::Comment => self.check_value::<Comment>(kind, paginated, value),
            EntityKind::PostLike => self.check_value::<PostLike>(kind, paginated, value),
            EntityKind::PostShare => self.check_value::<PostShare>(kind, paginated, value),
            EntityKind::SavedPost => self.check_value::<SavedPost>(kind, paginated, value),
            EntityKind::Hashtag => self.check_value::<Hashtag>(kind, paginated, value),
            EntityKind::Notification => self.check_value::<Notification>(kind, paginated, value),
            EntityKind::Job => self.check_value::<Job>(kind, paginated, value),
            EntityKind::JobCategory => self.check_value::<JobCategory>(kind, paginated, value),
            EntityKind::JobApplication => self.check_value::<JobApplication>(kind, paginated, value),
            EntityKind::Company => self.check_value::<Company>(kind, paginated, value),
            EntityKind::Industry => self.check_value::<Industry>(kind, paginated, value),
            EntityKind::Skill => self.check_value::<Skill>(kind, paginated, value),
            EntityKind::UserSkill => self.check_value::<UserSkill>(kind, paginated, value),
            EntityKind::Experience => self.check_value::<Experience>(kind, paginated, value),
            EntityKind::Education => self.check_value::<Education>(kind, paginated, value),
            EntityKind::ConnectionRequest => self.check_value::<ConnectionRequest>(kind, paginated, value),
            EntityKind::Connection => self.check_value::<Connection>(kind, paginated, value),
            EntityKind::Follow => self.check_value::<Follow>(kind, paginated, value),
            EntityKind::UserRecommendation => self.check_value::<UserRecommendation>(kind, paginated, value),
            EntityKind::NetworkMetrics => self.check_value::<NetworkMetrics>(kind, paginated, value),
            EntityKind::JobStats => self.check_value::<JobStats>(kind, paginated, value),
            EntityKind::FeedStats => self.check_value::<FeedStats>(kind, paginated, value),
            EntityKind::ApiError => self.check_value::<ApiError>(kind, paginated, value),
            EntityKind::JobFilters => self.check_value::<JobFilters>(kind, paginated, value),
            EntityKind::PostFilters => self.check_value::<PostFilters>(kind, paginated, value),
            EntityKind::AuthResponse => self.check_value::<AuthResponse>(kind, paginated, value),
        }
    }

    fn check_value<T>(&self, kind: EntityKind, paginated: bool, value: serde_json::Value) -> Result<ContractReport>
    where
        T: DeserializeOwned + Contract,
    {
        if paginated {
            let page: PaginatedResponse<T> = from_value(kind, value)?;
            tracing::debug!("Page holds {} of {} {} item(s)", page.results.len(), page.count, kind);
            Ok(crate::core::contract::check(&page, &self.rules))
        } else {
            let entity: T = from_value(kind, value)?;
            Ok(crate::core::contract::check(&entity, &self.rules))
        }
    }

    /// Checks each file in turn. A file that cannot be read or parsed is
    /// recorded as failed and the run carries on with the next one.
    pub async fn run(&self, kind: EntityKind, paginated: bool, paths: &[String]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for path in paths {
            tracing::info!("Checking {} as {}{}", path, if paginated { "page of " } else { "" }, kind);

            let outcome = match self.storage.read_file(path).await {
                Ok(bytes) => match self.check_bytes(kind, paginated, &bytes) {
                    Ok(report) if report.is_clean() => FileOutcome::Clean,
                    Ok(report) => {
                        for violation in report.violations() {
                            tracing::warn!("{}: {}", path, violation);
                        }
                        FileOutcome::Violations(report.violations().iter().map(|v| v.to_string()).collect())
                    }
                    Err(e) => {
                        tracing::error!("{}: {}", path, e);
                        FileOutcome::Failed(e.user_friendly_message())
                    }
                },
                Err(e) => {
                    tracing::error!("{}: {}", path, e);
                    FileOutcome::Failed(e.user_friendly_message())
                }
            };

            summary.files.push(FileReport {
                path: path.clone(),
                outcome,
            });
        }

        tracing::info!(
            "Checked {} file(s): {} clean, {} violation(s), {} failed",
            summary.files.len(),
            summary.clean(),
            summary.violations(),
            summary.failed()
        );
        Ok(summary)
    }
}

fn from_value<T: DeserializeOwned>(kind: EntityKind, value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| SchemaError::Deserialize {
        kind: kind.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockStorage {
        files: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Mutex::new(HashMap::new()),
            }
        }

        fn with_file(self, path: &str, data: &str) -> Self {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.as_bytes().to_vec());
            self
        }
    }

    #[async_trait::async_trait]
    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| SchemaError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string())))
        }
    }

    const FOLLOW: &str = r#"{
        "id": 1,
        "follower": {"id": 1, "email": "a@example.com", "first_name": "A", "last_name": "A", "date_joined": "2024-01-01T00:00:00Z"},
        "following": {"id": 2, "email": "b@example.com", "first_name": "B", "last_name": "B", "date_joined": "2024-01-01T00:00:00Z"},
        "created_at": "2024-02-01T00:00:00Z"
    }"#;

    const SELF_FOLLOW: &str = r#"{
        "id": 2,
        "follower": {"id": 1, "email": "a@example.com", "first_name": "A", "last_name": "A", "date_joined": "2024-01-01T00:00:00Z"},
        "following": {"id": 1, "email": "a@example.com", "first_name": "A", "last_name": "A", "date_joined": "2024-01-01T00:00:00Z"},
        "created_at": "2024-02-01T00:00:00Z"
    }"#;

    #[test]
    fn test_check_bytes_clean() {
        let engine = FixtureEngine::new(MockStorage::new(), ContractRules::default());
        let report = engine.check_bytes(EntityKind::Follow, false, FOLLOW.as_bytes()).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_check_bytes_wrong_shape() {
        let engine = FixtureEngine::new(MockStorage::new(), ContractRules::default());
        let err = engine.check_bytes(EntityKind::Post, false, FOLLOW.as_bytes()).unwrap_err();
        match err {
            SchemaError::Deserialize { kind, .. } => assert_eq!(kind, "post"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_check_bytes_not_json() {
        let engine = FixtureEngine::new(MockStorage::new(), ContractRules::default());
        let err = engine.check_bytes(EntityKind::Follow, false, b"{not json").unwrap_err();
        assert!(matches!(err, SchemaError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_run_collects_every_file() {
        let storage = MockStorage::new()
            .with_file("ok.json", FOLLOW)
            .with_file("self.json", SELF_FOLLOW);
        let engine = FixtureEngine::new(storage, ContractRules::default());

        let paths = vec!["ok.json".to_string(), "self.json".to_string(), "missing.json".to_string()];
        let summary = engine.run(EntityKind::Follow, false, &paths).await.unwrap();

        assert_eq!(summary.files.len(), 3);
        assert_eq!(summary.clean(), 1);
        assert_eq!(summary.violations(), 1);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.is_clean());
        assert_eq!(summary.files[0].outcome, FileOutcome::Clean);
    }

    #[test]
    fn test_write_summary_json_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("reports").join("summary.jsonl");
        let summary = RunSummary {
            files: vec![
                FileReport {
                    path: "a.json".to_string(),
                    outcome: FileOutcome::Clean,
                },
                FileReport {
                    path: "b.json".to_string(),
                    outcome: FileOutcome::Failed("bad".to_string()),
                },
            ],
        };

        summary.write_json_lines(&out).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<serde_json::Value> = written.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["status"], "clean");
        assert_eq!(lines[1]["reason"], "bad");
    }
}
