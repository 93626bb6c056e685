use crate::core::contract::ContractRules;
use crate::utils::error::{Result, SchemaError};
use crate::utils::validation::{validate_positive_number, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_PAGE_SIZE: usize = 1000;

const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub contract: Option<ContractSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractSection {
    pub max_comment_depth: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads a config file, substituting `${VAR}` references.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SchemaError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SchemaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left
    /// as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SchemaError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(contract) = &self.contract {
            if let Some(depth) = contract.max_comment_depth {
                validate_positive_number("contract.max_comment_depth", depth, 1)?;
            }
            if let Some(size) = contract.page_size {
                validate_range("contract.page_size", size, 1, MAX_PAGE_SIZE)?;
            }
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if !LOG_FORMATS.contains(&format) {
                return Err(SchemaError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: format!("Unsupported format. Valid formats: {}", LOG_FORMATS.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn max_comment_depth(&self) -> Option<usize> {
        self.contract.as_ref().and_then(|c| c.max_comment_depth)
    }

    pub fn page_size(&self) -> Option<usize> {
        self.contract.as_ref().and_then(|c| c.page_size)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.format.as_deref()) == Some("json")
    }

    /// Rules from this file, defaults for anything it leaves out.
    pub fn rules(&self) -> ContractRules {
        let defaults = ContractRules::default();
        ContractRules {
            max_comment_depth: self.max_comment_depth().unwrap_or(defaults.max_comment_depth),
            page_size: self.page_size().unwrap_or(defaults.page_size),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
