use std::fmt;

use serde::{Deserialize, Serialize};

/// Author of a chat turn.
///
/// The web widget labels assistant turns `bot`, so that spelling is accepted
/// on input and normalized to `assistant`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(alias = "bot")]
    Assistant,
}

impl Role {
    /// Role name as understood by chat-completion APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Onboarding details mined from a conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "query_type")]
    pub query_type: Option<String>,
}

/// How far onboarding has progressed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Greeting,
    CollectEmail,
    /// A service question arrived before onboarding finished. Never reported
    /// to chat clients, only recorded in transcripts.
    ServiceFirst,
    Assistance,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::CollectEmail => "collect_email",
            Stage::ServiceFirst => "service_first",
            Stage::Assistance => "assistance",
        }
    }

    /// Stage as shown to chat clients.
    pub fn reported(self) -> Stage {
        match self {
            Stage::ServiceFirst => Stage::Greeting,
            other => other,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogMetadata {
    #[serde(alias = "response_time_seconds")]
    pub response_time_seconds: f64,
    #[serde(alias = "model_used")]
    pub model_used: String,
    pub date: String,
    pub time: String,
}

/// One recorded exchange. Written once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationLog {
    #[serde(alias = "conversation_id")]
    pub id: String,
    pub timestamp: String,
    #[serde(alias = "user_info")]
    pub user_info: UserInfo,
    #[serde(alias = "conversation_stage")]
    pub stage: Stage,
    #[serde(alias = "message_count")]
    pub message_count: usize,
    #[serde(alias = "last_user_message")]
    pub last_user_message: String,
    #[serde(alias = "last_ai_response")]
    pub last_ai_response: String,
    #[serde(alias = "full_history")]
    pub full_history: Vec<ChatTurn>,
    pub metadata: LogMetadata,
}

/// On-disk document holding every recorded exchange in append order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConversationStore {
    #[serde(default)]
    pub conversations: Vec<ConversationLog>,
}
