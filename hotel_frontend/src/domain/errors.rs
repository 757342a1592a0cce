use crate::domain::signup::FieldErrors;

// Failures crossing the backend port. Adapters map transport and status details into these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthorized,
    #[error("not found")]
    NotFound(Option<String>),
    #[error("backend rejected the request ({status})")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("response decode error: {0}")]
    Decode(String),
}

impl ApiError {
    // Message supplied by the backend, when it sent one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound(message) => message.as_deref(),
            ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

// Failures of the local key/value store holding tokens and preferences.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("Location is required")]
    LocationRequired,
}
