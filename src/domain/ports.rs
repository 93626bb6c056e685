use crate::utils::error::Result;
use async_trait::async_trait;

/// Where fixture documents come from.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>>;
}
