use thiserror::Error;

pub const MISSING_CREDENTIAL_REPLY: &str = "Server error: API key missing.";
pub const UPSTREAM_FAILURE_REPLY: &str = "AI service is currently unavailable. Please try again.";
pub const GENERIC_FAILURE_REPLY: &str = "Server error. Please try again later.";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("completion api credential is not configured")]
    MissingCredential,
    #[error("upstream completion failed: {0:#}")]
    Upstream(anyhow::Error),
}

impl RelayError {
    /// Fixed text shown to the chat user. Details stay in the server log.
    pub fn user_reply(&self) -> &'static str {
        match self {
            RelayError::MissingCredential => MISSING_CREDENTIAL_REPLY,
            RelayError::Upstream(_) => UPSTREAM_FAILURE_REPLY,
        }
    }
}
