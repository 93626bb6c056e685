use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Payload does not match the {kind} shape: {source}")]
    Deserialize {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("'{value}' is not a permitted {field} value")]
    InvalidEnumValue { field: &'static str, value: String },

    #[error("Unreadable page cursor '{cursor}': {reason}")]
    InvalidCursor { cursor: String, reason: String },

    #[error("{count} contract violation(s): {summary}")]
    ContractViolation { count: usize, summary: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Config,
    Contract,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SchemaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SchemaError::IoError(_) => ErrorCategory::System,
            SchemaError::SerializationError(_)
            | SchemaError::Deserialize { .. }
            | SchemaError::InvalidEnumValue { .. }
            | SchemaError::InvalidCursor { .. } => ErrorCategory::Input,
            SchemaError::ConfigValidationError { .. }
            | SchemaError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            SchemaError::ContractViolation { .. } => ErrorCategory::Contract,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Contract => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Config | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SchemaError::IoError(_) => "Check that the fixture path exists and is readable",
            SchemaError::SerializationError(_) => "Make sure the file contains valid JSON",
            SchemaError::Deserialize { .. } => {
                "Compare the payload with the entity shape; enum fields only accept the declared literals"
            }
            SchemaError::InvalidEnumValue { .. } => "Use one of the declared enum literals",
            SchemaError::InvalidCursor { .. } => {
                "Cursors must be URLs whose optional `page` parameter is a positive integer"
            }
            SchemaError::ConfigValidationError { .. }
            | SchemaError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or the command line flags"
            }
            SchemaError::ContractViolation { .. } => {
                "Fix the fixture, or report the backend response that produced it"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SchemaError::IoError(e) => format!("Could not read input: {}", e),
            SchemaError::Deserialize { kind, source } => {
                format!("Payload is not a valid {} (line {}, column {})", kind, source.line(), source.column())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
