use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed for {field}: {}", unmet.join(", "))]
    Validation { field: String, unmet: Vec<String> },

    #[error("User not found with id: {0}")]
    UserNotFound(String),

    #[error("Content not found with id: {0}")]
    ContentNotFound(String),

    #[error("This email is already registered: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Credential not found for uid: {0}")]
    CredentialNotFound(String),

    #[error("Directory error: {0}")]
    DirectoryError(String),

    #[error("Auth provider error: {0}")]
    AuthError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Delete was not confirmed")]
    DeleteNotConfirmed,

    #[error("A submission is already in flight")]
    SubmissionInFlight,
}

impl DomainError {
    pub fn validation(field: &str, unmet: Vec<String>) -> Self {
        DomainError::Validation {
            field: field.to_string(),
            unmet,
        }
    }
}
