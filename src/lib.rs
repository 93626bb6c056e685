pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::toml_config::TomlConfig;

pub use crate::core::contract::{check, Contract, ContractReport, ContractRules, Violation};
pub use crate::core::engine::{EntityKind, FileOutcome, FixtureEngine, RunSummary};
pub use crate::domain::envelope::{ApiError, PaginatedResponse};
pub use crate::utils::error::{Result, SchemaError};
