/// Error types for field-intake
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for field-intake operations
#[derive(Error, Debug)]
pub enum IntakeError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Empty or missing required input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Registration attempted with an email that already has an account
    #[error("Email already exists")]
    DuplicateAccount,

    /// Login with an unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Export requested before the database file exists on disk
    #[error("Database file not found: {}", .0.display())]
    DatabaseFileMissing(PathBuf),

    /// Password hashing or verification failed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for field-intake operations
pub type Result<T> = std::result::Result<T, IntakeError>;

/// Convert IntakeError to a user-friendly error message
impl IntakeError {
    pub fn user_message(&self) -> String {
        match self {
            IntakeError::Database(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            IntakeError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            IntakeError::Validation(msg) => msg.clone(),
            IntakeError::DuplicateAccount => "Email already exists".to_string(),
            IntakeError::InvalidCredentials => "Invalid credentials".to_string(),
            IntakeError::DatabaseFileMissing(path) => {
                format!("Database file not found at {}. Nothing to export yet.", path.display())
            }
            IntakeError::PasswordHash(msg) => {
                format!("Could not process password: {}", msg)
            }
            IntakeError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            IntakeError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = IntakeError::Validation("Email and password are required.".to_string());
        assert!(err.user_message().contains("required"));

        let err = IntakeError::InvalidCredentials;
        assert_eq!(err.user_message(), "Invalid credentials");

        let err = IntakeError::DatabaseFileMissing(PathBuf::from("/tmp/intake.db"));
        assert!(err.user_message().contains("/tmp/intake.db"));
    }

    #[test]
    fn test_error_display() {
        let err = IntakeError::DuplicateAccount;
        let display = format!("{}", err);
        assert_eq!(display, "Email already exists");

        let err = IntakeError::InvalidCredentials;
        assert_eq!(format!("{}", err), "Invalid credentials");
    }
}
