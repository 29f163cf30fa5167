//! Error types for the persistence gateway.

use thiserror::Error;

/// Failures talking to the hosted backend.
///
/// These never escape past the panel/page boundary: callers convert them
/// into transient status banners or empty-section rendering.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("unexpected backend payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("invalid backend url: {0}")]
    BadUrl(#[from] url::ParseError),
}

/// Failures signing an admin in.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The backend connection values are absent; there is nothing to
    /// sign in to.
    #[error("backend is not configured")]
    NotConfigured,

    /// Wrong email or password. Deliberately silent about which, and
    /// about whether the account exists.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("sign-in failed: {0}")]
    Other(String),
}
