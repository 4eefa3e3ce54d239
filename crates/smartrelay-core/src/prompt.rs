use smartrelay_schema::{Stage, UserInfo};

use crate::stage::is_skip_request;
use crate::templates;

/// Marker present only in the variant used when the user declines to share an email.
pub const SKIP_EMAIL_MARKER: &str = "want to skip providing email";

/// System prompt for the given stage. Pure: same inputs, same text.
pub fn build_system_prompt(stage: Stage, user_info: &UserInfo, message: &str) -> String {
    let name = user_info.name.as_deref().unwrap_or_default();

    let instructions = match stage {
        Stage::Greeting => templates::GREETING.to_string(),
        Stage::ServiceFirst => templates::SERVICE_FIRST.to_string(),
        Stage::CollectEmail if is_skip_request(message) => {
            templates::COLLECT_EMAIL_SKIPPED.replace("{name}", name)
        }
        Stage::CollectEmail => templates::COLLECT_EMAIL.replace("{name}", name),
        Stage::Assistance => {
            let email = user_info.email.as_deref().unwrap_or("Not provided");
            templates::ASSISTANCE
                .replace("{name}", name)
                .replace("{email}", email)
        }
    };

    format!("{}{}", templates::KNOWLEDGE_BASE, instructions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> UserInfo {
        UserInfo {
            name: Some(name.into()),
            ..UserInfo::default()
        }
    }

    #[test]
    fn every_stage_carries_knowledge_base() {
        for stage in [
            Stage::Greeting,
            Stage::CollectEmail,
            Stage::ServiceFirst,
            Stage::Assistance,
        ] {
            let prompt = build_system_prompt(stage, &named("Bob"), "hi");
            assert!(prompt.starts_with(templates::KNOWLEDGE_BASE));
            assert!(prompt.contains("Business Hours: Monday-Friday"));
        }
    }

    #[test]
    fn greeting_asks_for_name() {
        let prompt = build_system_prompt(Stage::Greeting, &UserInfo::default(), "hello");
        assert!(prompt.contains("ask for their name"));
        assert!(!prompt.contains("{name}"));
    }

    #[test]
    fn collect_email_uses_name() {
        let prompt = build_system_prompt(Stage::CollectEmail, &named("Bob"), "ok");
        assert!(prompt.contains("Great to meet you, Bob!"));
        assert!(prompt.contains("collect their email address"));
        assert!(!prompt.contains(SKIP_EMAIL_MARKER));
    }

    #[test]
    fn collect_email_skip_variant() {
        let prompt = build_system_prompt(Stage::CollectEmail, &named("Bob"), "skip for now please");
        assert!(prompt.contains(SKIP_EMAIL_MARKER));
        assert!(prompt.contains("No problem, Bob!"));
        assert!(!prompt.contains("collect their email address"));
    }

    #[test]
    fn skip_only_matters_while_collecting_email() {
        let prompt = build_system_prompt(Stage::Greeting, &UserInfo::default(), "skip");
        assert!(!prompt.contains(SKIP_EMAIL_MARKER));
    }

    #[test]
    fn service_first_answers_before_onboarding() {
        let prompt = build_system_prompt(Stage::ServiceFirst, &UserInfo::default(), "pricing?");
        assert!(prompt.contains("Answer their question FIRST"));
    }

    #[test]
    fn assistance_lists_collected_info() {
        let info = UserInfo {
            name: Some("Ann".into()),
            email: Some("ann@example.com".into()),
            query_type: None,
        };
        let prompt = build_system_prompt(Stage::Assistance, &info, "help");
        assert!(prompt.contains("- Name: Ann"));
        assert!(prompt.contains("- Email: ann@example.com"));
        assert!(prompt.contains("Use their name (Ann)"));
    }

    #[test]
    fn assistance_without_email_says_not_provided() {
        let prompt = build_system_prompt(Stage::Assistance, &named("Ann"), "help");
        assert!(prompt.contains("- Email: Not provided"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let info = named("Zed");
        assert_eq!(
            build_system_prompt(Stage::CollectEmail, &info, "x"),
            build_system_prompt(Stage::CollectEmail, &info, "x")
        );
    }
}
