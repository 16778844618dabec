//! Error types.

use thiserror::Error;

/// Message shown when the backend cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str = "Server unreachable. Please try again later.";

/// The main error type for badchef operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No response from the server.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Login or sign-up was rejected (400/401 on the credential exchange).
    #[error("Authentication failed [{status}]: {detail}")]
    Authentication { status: u16, detail: String },

    /// An authenticated call was rejected with 401; the stored token is stale.
    #[error("Session expired: {0}")]
    Expired(String),

    /// The server answered 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response.
    #[error("API error [{status}]: {detail}")]
    Api { status: u16, detail: String },

    /// Operation requires authentication but no token is stored.
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid argument passed to an API method.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request was cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// Token storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Failed to parse response data.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// The finite set of failures a page has to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input, caught before any request.
    Validation,
    /// Credential exchange rejected.
    Authentication,
    /// Stored credential no longer accepted.
    Expired,
    /// Resource missing.
    NotFound,
    /// Server unreachable.
    Network,
    /// Unexpected status from the server.
    Api,
    /// Request abandoned by its owner.
    Cancelled,
    /// Local token storage failed.
    Storage,
    /// Malformed response or other internal failure.
    Internal,
}

impl Error {
    /// Create an authentication error.
    pub fn authentication(status: u16, detail: impl Into<String>) -> Self {
        Error::Authentication {
            status,
            detail: detail.into(),
        }
    }

    /// Create a generic API error.
    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        Error::Api {
            status,
            detail: detail.into(),
        }
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network(e) if e.is_decode() => ErrorKind::Internal,
            Error::Network(_) => ErrorKind::Network,
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::Expired(_) | Error::AuthRequired => ErrorKind::Expired,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Api { .. } => ErrorKind::Api,
            Error::InvalidArgument(_) => ErrorKind::Validation,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Storage(_) => ErrorKind::Storage,
            Error::Parse(_) | Error::Json(_) | Error::Url(_) => ErrorKind::Internal,
        }
    }

    /// Server-provided detail, or a description of the failure.
    pub fn detail(&self) -> String {
        match self {
            Error::Authentication { detail, .. } | Error::Api { detail, .. } => detail.clone(),
            Error::Expired(detail) | Error::NotFound(detail) => detail.clone(),
            Error::InvalidArgument(msg) | Error::Storage(msg) | Error::Parse(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { status, .. } | Error::Api { status, .. } => Some(*status),
            Error::Expired(_) => Some(401),
            Error::NotFound(_) => Some(404),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The string a page displays for this error.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Network => UNREACHABLE_MESSAGE.to_owned(),
            ErrorKind::Expired => "Your session has expired. Please log in again.".to_owned(),
            ErrorKind::Cancelled => String::new(),
            _ => self.detail(),
        }
    }

    /// Check if this error means the user must log in again.
    pub fn is_auth_error(&self) -> bool {
        self.kind() == ErrorKind::Expired
    }
}

/// Result type alias for badchef operations.
pub type Result<T> = std::result::Result<T, Error>;
