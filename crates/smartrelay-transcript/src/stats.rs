use std::collections::BTreeMap;

use serde::Serialize;
use smartrelay_schema::ConversationLog;

/// Aggregate view over every recorded exchange. Recomputed on each request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStats {
    pub total_conversations: usize,
    pub users_with_name: usize,
    pub users_with_email: usize,
    pub average_messages_per_conversation: f64,
    pub stage_distribution: BTreeMap<String, usize>,
    pub email_capture_rate: String,
}

impl ConversationStats {
    pub fn compute(logs: &[ConversationLog]) -> Self {
        let total = logs.len();
        let mut stage_distribution = BTreeMap::new();
        let mut users_with_name = 0;
        let mut users_with_email = 0;
        let mut message_sum = 0usize;

        for log in logs {
            *stage_distribution
                .entry(log.stage.as_str().to_string())
                .or_insert(0) += 1;
            if has_value(log.user_info.name.as_deref()) {
                users_with_name += 1;
            }
            if has_value(log.user_info.email.as_deref()) {
                users_with_email += 1;
            }
            message_sum += log.message_count;
        }

        let (average, rate) = if total == 0 {
            (0.0, "0%".to_string())
        } else {
            let average = round_to(message_sum as f64 / total as f64, 2);
            let rate = round_to(users_with_email as f64 / total as f64 * 100.0, 1);
            (average, format!("{rate:.1}%"))
        };

        Self {
            total_conversations: total,
            users_with_name,
            users_with_email,
            average_messages_per_conversation: average,
            stage_distribution,
            email_capture_rate: rate,
        }
    }
}

fn has_value(field: Option<&str>) -> bool {
    field.is_some_and(|v| !v.is_empty())
}

/// Round to `places` decimals, ties to even.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
