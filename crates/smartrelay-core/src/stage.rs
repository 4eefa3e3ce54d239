//! Conversation-stage inference.
//!
//! Name and email are mined from the user's own earlier turns with plain
//! pattern matching. The first hit for each wins and later turns are never
//! reconsidered. The current message is only inspected for service keywords.

use std::sync::LazyLock;

use regex::Regex;
use smartrelay_schema::{ChatTurn, Stage, UserInfo};

/// "I'm X", "I am X", "my name is X", "call me X" with one or two words for X.
static INTRODUCTION_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:i'm|i am|my name is|call me)\s+([a-z]+(?:\s+[a-z]+)?)").ok()
});

/// A turn consisting of nothing but one or two capitalized words.
static BARE_NAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)$").ok());

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").ok()
});

/// Substring → query category. Order decides which category wins when a
/// message mentions several.
const SERVICE_KEYWORDS: &[(&str, &str)] = &[
    ("services", "services"),
    ("pricing", "pricing"),
    ("price", "pricing"),
    ("contact", "contact"),
    ("support", "support"),
    ("hours", "hours"),
    ("quote", "quote"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub user_info: UserInfo,
    /// Stage used to pick the prompt and recorded in transcripts.
    pub stage: Stage,
}

impl Classification {
    /// Stage shown to chat clients; hides `service_first`.
    pub fn reported_stage(&self) -> Stage {
        self.stage.reported()
    }
}

pub fn classify(history: &[ChatTurn], message: &str) -> Classification {
    let mut user_info = extract_user_info(history);
    user_info.query_type = detect_query_type(message).map(str::to_string);

    let mut stage = determine_stage(&user_info);
    if user_info.query_type.is_some() && matches!(stage, Stage::Greeting | Stage::CollectEmail) {
        tracing::debug!("service query detected during {stage} stage");
        stage = Stage::ServiceFirst;
    }

    Classification { user_info, stage }
}

pub fn extract_user_info(history: &[ChatTurn]) -> UserInfo {
    let mut info = UserInfo::default();

    for turn in history.iter().filter(|t| t.is_user()) {
        if info.name.is_none() {
            info.name = extract_name(&turn.text);
        }
        if info.email.is_none() {
            info.email = extract_email(&turn.text);
        }
        if info.name.is_some() && info.email.is_some() {
            break;
        }
    }

    info
}

pub fn determine_stage(info: &UserInfo) -> Stage {
    match (&info.name, &info.email) {
        (None, _) => Stage::Greeting,
        (Some(_), None) => Stage::CollectEmail,
        (Some(_), Some(_)) => Stage::Assistance,
    }
}

/// Category of the first service keyword found in `message`, if any.
pub fn detect_query_type(message: &str) -> Option<&'static str> {
    let lowered = message.to_lowercase();
    SERVICE_KEYWORDS
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, category)| *category)
}

pub fn is_skip_request(message: &str) -> bool {
    message.to_lowercase().contains("skip")
}

fn extract_name(text: &str) -> Option<String> {
    let text = text.trim();

    let introduced = INTRODUCTION_PATTERN
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1));
    let bare = || {
        BARE_NAME_PATTERN
            .as_ref()
            .and_then(|re| re.captures(text))
            .and_then(|caps| caps.get(1))
    };

    introduced.or_else(bare).map(|m| title_case(m.as_str()))
}

fn extract_email(text: &str) -> Option<String> {
    EMAIL_PATTERN
        .as_ref()
        .and_then(|re| re.find(text))
        .map(|m| m.as_str().to_string())
}

fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
