//! Append-only transcript log of relayed chat exchanges.
//!
//! Every exchange becomes one [`ConversationLog`] appended to a single JSON
//! document on disk. The document is read in full and rewritten in full on
//! each append.

pub mod record;
pub mod stats;
pub mod store;

pub use record::{new_conversation_log, ExchangeRecord};
pub use smartrelay_schema::{ConversationLog, ConversationStore};
pub use stats::ConversationStats;
pub use store::TranscriptStore;
