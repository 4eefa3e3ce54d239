pub mod config;
pub mod error;
pub mod prompt;
pub mod relay;
pub mod stage;
pub mod templates;

pub use config::{RelayConfig, ServerConfig, TranscriptConfig, UpstreamConfig};
pub use error::{
    RelayError, GENERIC_FAILURE_REPLY, MISSING_CREDENTIAL_REPLY, UPSTREAM_FAILURE_REPLY,
};
pub use prompt::{build_system_prompt, SKIP_EMAIL_MARKER};
pub use relay::{ChatOutcome, ChatRelay, RelaySettings};
pub use stage::{classify, Classification};
