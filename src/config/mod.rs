pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::engine::EntityKind;
#[cfg(feature = "cli")]
use crate::core::contract::ContractRules;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, validate_range, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::{TomlConfig, MAX_PAGE_SIZE};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "prolink-schema")]
#[command(about = "Checks ProLink API payloads against the client data contract")]
pub struct CliConfig {
    /// Entity shape every input file is expected to hold
    #[arg(long, value_enum)]
    pub kind: EntityKind,

    /// Inputs are paginated envelopes of `kind`
    #[arg(long)]
    pub paginated: bool,

    #[arg(long)]
    pub page_size: Option<usize>,

    #[arg(long)]
    pub max_comment_depth: Option<usize>,

    /// TOML file with [contract] and [logging] sections
    #[arg(long)]
    pub config: Option<String>,

    /// Write one JSON line per checked file to this path
    #[arg(long)]
    pub summary: Option<String>,

    #[arg(long, default_value = ".")]
    pub base_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(required = true)]
    pub files: Vec<String>,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Flags win over the TOML file, which wins over the defaults.
    pub fn resolve_rules(&self, toml: Option<&TomlConfig>) -> Result<ContractRules> {
        let base = toml.map(TomlConfig::rules).unwrap_or_default();
        let rules = ContractRules {
            max_comment_depth: self.max_comment_depth.unwrap_or(base.max_comment_depth),
            page_size: self.page_size.unwrap_or(base.page_size),
        };

        validate_positive_number("max_comment_depth", rules.max_comment_depth, 1)?;
        validate_range("page_size", rules.page_size, 1, MAX_PAGE_SIZE)?;
        Ok(rules)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("base_path", &self.base_path)?;
        for file in &self.files {
            validate_non_empty_string("files", file)?;
        }
        if let Some(path) = &self.config {
            validate_non_empty_string("config", path)?;
        }
        if let Some(path) = &self.summary {
            validate_non_empty_string("summary", path)?;
        }
        self.resolve_rules(None).map(|_| ())
    }
}
