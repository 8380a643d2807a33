/// Coarse failure taxonomy surfaced to callers.
///
/// Every [`ActivityError`] maps onto exactly one kind via
/// [`ActivityError::kind`]. A dashboard only needs to tell `NotFound` apart
/// from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NotFound,
    Upstream,
    InvalidArgument,
}

#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ActivityError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ActivityError::NotFound(_) => FailureKind::NotFound,
            ActivityError::InvalidArgument(_) => FailureKind::InvalidArgument,
            ActivityError::Upstream { .. }
            | ActivityError::Http(_)
            | ActivityError::Io(_)
            | ActivityError::Json(_) => FailureKind::Upstream,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == FailureKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, ActivityError>;
