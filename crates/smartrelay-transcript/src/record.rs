use std::time::Duration;

use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};
use smartrelay_schema::{ChatTurn, ConversationLog, LogMetadata, Stage, UserInfo};

use crate::stats::round_to;

/// Everything known about one completed exchange.
#[derive(Debug, Clone)]
pub struct ExchangeRecord<'a> {
    pub history: &'a [ChatTurn],
    pub user_message: &'a str,
    pub reply: &'a str,
    pub user_info: &'a UserInfo,
    pub stage: Stage,
    pub response_time: Duration,
    pub model: &'a str,
}

/// Conversation ids are `conv_<unix seconds>_<n>` with `n < 10000` taken from
/// a digest of the message. Two identical messages in the same second collide.
pub fn conversation_id(now: DateTime<Local>, user_message: &str) -> String {
    format!(
        "conv_{}_{}",
        now.timestamp(),
        message_digest(user_message) % 10_000
    )
}

fn message_digest(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

pub fn new_conversation_log(record: &ExchangeRecord<'_>, now: DateTime<Local>) -> ConversationLog {
    let stamp = now.to_rfc3339();

    let mut full_history = Vec::with_capacity(record.history.len() + 2);
    full_history.extend_from_slice(record.history);
    full_history.push(ChatTurn::user(record.user_message).at(stamp.clone()));
    full_history.push(ChatTurn::assistant(record.reply).at(stamp.clone()));

    ConversationLog {
        id: conversation_id(now, record.user_message),
        timestamp: stamp,
        user_info: record.user_info.clone(),
        stage: record.stage,
        message_count: record.history.len() + 1,
        last_user_message: record.user_message.to_string(),
        last_ai_response: record.reply.to_string(),
        full_history,
        metadata: LogMetadata {
            response_time_seconds: round_to(record.response_time.as_secs_f64(), 2),
            model_used: record.model.to_string(),
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M:%S").to_string(),
        },
    }
}
