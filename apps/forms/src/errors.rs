use thiserror::Error;

/// Failure of a remote update (or fetch) against the persistence API.
///
/// The `Display` output is what the user sees in the failure notification,
/// so variants carrying a server message render it verbatim.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Rejection reported by an `EntityApi` implementation without an HTTP status.
    #[error("{0}")]
    Rejected(String),

    #[error("Nothing to update: the entity has not been loaded yet")]
    NotLoaded,

    /// The server accepted the update but sent no entity back, and the
    /// follow-up read failed too.
    #[error("Saved, but the updated entity could not be reloaded: {0}")]
    Unconfirmed(Box<MutationError>),

    #[error("The update task stopped before it settled: {0}")]
    Interrupted(#[from] tokio::task::JoinError),
}

impl MutationError {
    pub fn rejected(message: impl Into<String>) -> Self {
        MutationError::Rejected(message.into())
    }
}

/// Input rejected at the binding level, before it reaches the draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("'{input}' is not a whole number ({field} accepts digits only)")]
    NonNumeric { field: &'static str, input: String },

    #[error("{field} is read-only")]
    ReadOnly { field: &'static str },

    #[error("{field} expects a {expected} value")]
    KindMismatch {
        field: &'static str,
        expected: &'static str,
    },
}
