//! Error types for the subscription gate

use thiserror::Error;

use crate::protocol::ChatId;

/// Result type alias for the subscription gate
pub type Result<T> = std::result::Result<T, Error>;

/// Subscription gate errors
#[derive(Error, Debug)]
pub enum Error {
    /// User is not a member of the required channel. By the time this is
    /// returned the gate has already delivered the join prompt; the caller
    /// must not proceed with the triggering action.
    #[error("user not joined: {code}")]
    UserNotJoined {
        /// Machine-readable code, always [`codes::USER_NOT_JOINED`]
        code: &'static str,
    },

    /// Rate limit exceeded for the requesting user. Transient and
    /// caller-retriable; never masked by the notification path.
    #[error("time limit exceeded for {user}")]
    TimeLimitExceeded {
        /// The rate-limited user
        user: ChatId,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Participant lookup rejected (non-membership, permission, or network)
    #[error("participant lookup failed: {0}")]
    Lookup(String),

    /// Translation lookup failure
    #[error("translation error: {0}")]
    Translation(String),

    /// Outbound message delivery failure
    #[error("message delivery failed: {0}")]
    Delivery(String),

    /// Protocol-layer fault
    #[error("protocol error: {0}")]
    Protocol(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create the user-not-joined sentinel with its fixed machine code
    #[must_use]
    pub fn user_not_joined() -> Self {
        Self::UserNotJoined {
            code: codes::USER_NOT_JOINED,
        }
    }

    /// Whether this is the rate-limit condition, which always bypasses the
    /// notification path
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::TimeLimitExceeded { .. })
    }
}

/// Machine-readable gate rejection codes
pub mod codes {
    /// Membership check failed and the join prompt has been sent
    pub const USER_NOT_JOINED: &str = "USER_NOT_JOINED";
}
