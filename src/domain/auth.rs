//! Authentication handshake payloads. Token refresh and session handling live
//! in the caller; these are shapes only.

use crate::domain::user::User;
use crate::utils::error::{Result, SchemaError};
use crate::utils::validation::{is_valid_email, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

const REDACTED: &str = "<redacted>";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access", &REDACTED)
            .field("refresh", &REDACTED)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterData {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
}

impl RegisterData {
    pub fn passwords_match(&self) -> bool {
        self.password == self.password_confirm
    }
}

impl Validate for RegisterData {
    fn validate(&self) -> Result<()> {
        if !is_valid_email(&self.email) {
            return Err(SchemaError::InvalidConfigValueError {
                field: "email".to_string(),
                value: self.email.clone(),
                reason: "Not an email address".to_string(),
            });
        }
        validate_non_empty_string("first_name", &self.first_name)?;
        validate_non_empty_string("last_name", &self.last_name)?;
        if !self.passwords_match() {
            // never echo the password back
            return Err(SchemaError::InvalidConfigValueError {
                field: "password_confirm".to_string(),
                value: REDACTED.to_string(),
                reason: "Passwords do not match".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for RegisterData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterData")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &REDACTED)
            .field("password_confirm", &REDACTED)
            .finish()
    }
}

/// Body of a successful register or login call.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub access: String,
    pub refresh: String,
    pub message: String,
}

impl AuthResponse {
    pub fn tokens(&self) -> AuthTokens {
        AuthTokens {
            access: self.access.clone(),
            refresh: self.refresh.clone(),
        }
    }
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("user", &self.user)
            .field("access", &REDACTED)
            .field("refresh", &REDACTED)
            .field("message", &self.message)
            .finish()
    }
}

/// Logout blacklists the given refresh token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh: String,
}

impl fmt::Debug for LogoutRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogoutRequest")
            .field("refresh", &REDACTED)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("old_password", &REDACTED)
            .field("new_password", &REDACTED)
            .finish()
    }
}

/// Ad-hoc acknowledgement bodies (`{"message": ...}` or `{"error": ...}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_debug_hides_secrets() {
        let creds = LoginCredentials {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{:?}", creds);
        assert!(printed.contains("ada@example.com"));
        assert!(!printed.contains("hunter2"));

        let tokens = AuthTokens {
            access: "aaa.bbb.ccc".to_string(),
            refresh: "ddd.eee.fff".to_string(),
        };
        assert!(!format!("{:?}", tokens).contains("aaa.bbb.ccc"));
    }

    #[test]
    fn test_register_passwords_match() {
        let mut data = RegisterData {
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password: "correct horse".to_string(),
            password_confirm: "correct horse".to_string(),
        };
        assert!(data.passwords_match());
        assert!(data.validate().is_ok());

        data.password_confirm = "battery staple".to_string();
        assert!(!data.passwords_match());
        let err = data.validate().unwrap_err();
        assert!(!err.to_string().contains("battery staple"));

        data.password_confirm = data.password.clone();
        data.email = "ada".to_string();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_auth_response_tokens() {
        let response: AuthResponse = serde_json::from_value(json!({
            "user": {
                "id": 1,
                "email": "ada@example.com",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "date_joined": "2024-01-15T10:30:00Z"
            },
            "access": "access-token",
            "refresh": "refresh-token",
            "message": "Login successful"
        }))
        .unwrap();

        let tokens = response.tokens();
        assert_eq!(tokens.access, "access-token");
        assert_eq!(tokens.refresh, "refresh-token");
    }

    #[test]
    fn test_message_response_variants() {
        let ok: MessageResponse = serde_json::from_value(json!({"message": "Logout successful"})).unwrap();
        assert!(!ok.is_error());
        let failed: MessageResponse = serde_json::from_value(json!({"error": "Invalid token"})).unwrap();
        assert!(failed.is_error());
    }
}
