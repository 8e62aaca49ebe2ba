use thiserror::Error;

/// Local input rejection. Never reaches the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("List title is required")]
    EmptyTitle,

    #[error("Item name is required")]
    EmptyItemName,

    #[error("Name is required")]
    EmptyName,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Add at least one item before finding shops")]
    EmptyList,

    #[error("No shop selected")]
    NoSelection,
}

/// Network or backend failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned {status}{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl RequestError {
    /// Whether the backend rejected the session token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RequestError::Status { status: 401 | 403, .. })
    }

    /// Message supplied by the backend's error body, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RequestError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
