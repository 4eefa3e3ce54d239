use std::sync::Arc;
use std::time::Instant;

use smartrelay_provider::{LlmMessage, LlmProvider, LlmRequest, OpenAiProvider};
use smartrelay_schema::{ChatTurn, Role};
use smartrelay_transcript::{new_conversation_log, ExchangeRecord, TranscriptStore};

use crate::config::UpstreamConfig;
use crate::error::RelayError;
use crate::prompt::build_system_prompt;
use crate::stage::{classify, Classification};

#[derive(Debug, Clone, PartialEq)]
pub struct RelaySettings {
    pub model: String,
    pub temperature: f32,
}

impl From<&UpstreamConfig> for RelaySettings {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    pub classification: Classification,
}

/// One chat exchange end to end: classify, build prompt, call upstream, record.
pub struct ChatRelay {
    provider: Option<Arc<dyn LlmProvider>>,
    transcripts: Arc<TranscriptStore>,
    settings: RelaySettings,
}

impl ChatRelay {
    /// `provider` is `None` when no credential was configured; chat requests
    /// then fail with [`RelayError::MissingCredential`].
    pub fn new(
        provider: Option<Arc<dyn LlmProvider>>,
        transcripts: Arc<TranscriptStore>,
        settings: RelaySettings,
    ) -> Self {
        Self {
            provider,
            transcripts,
            settings,
        }
    }

    pub fn from_config(
        upstream: &UpstreamConfig,
        api_key: Option<String>,
        transcripts: Arc<TranscriptStore>,
    ) -> Self {
        let provider = api_key.map(|key| {
            Arc::new(OpenAiProvider::new(key, &upstream.base_url).with_timeout(upstream.timeout()))
                as Arc<dyn LlmProvider>
        });
        Self::new(provider, transcripts, RelaySettings::from(upstream))
    }

    pub fn transcripts(&self) -> &Arc<TranscriptStore> {
        &self.transcripts
    }

    pub async fn handle(
        &self,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<ChatOutcome, RelayError> {
        let Some(provider) = self.provider.as_ref() else {
            tracing::error!("completion api credential is missing");
            return Err(RelayError::MissingCredential);
        };

        let classification = classify(history, message);
        tracing::info!(
            "chat request: history={} stage={} name_known={} email_known={}",
            history.len(),
            classification.stage,
            classification.user_info.name.is_some(),
            classification.user_info.email.is_some()
        );

        let system = build_system_prompt(classification.stage, &classification.user_info, message);
        let request = build_request(&self.settings, system, history, message);

        let started = Instant::now();
        let response = provider.chat(request).await.map_err(|err| {
            tracing::error!("completion api call failed: {err:#}");
            RelayError::Upstream(err)
        })?;
        let response_time = started.elapsed();
        tracing::info!(
            "completion api responded in {:.2}s: input_tokens={:?} output_tokens={:?} stop_reason={:?}",
            response_time.as_secs_f64(),
            response.input_tokens,
            response.output_tokens,
            response.stop_reason.as_deref()
        );

        let record = ExchangeRecord {
            history,
            user_message: message,
            reply: &response.text,
            user_info: &classification.user_info,
            stage: classification.stage,
            response_time,
            model: &self.settings.model,
        };
        let log = new_conversation_log(&record, chrono::Local::now());
        if let Err(err) = self.transcripts.append(log).await {
            tracing::error!("failed to record conversation: {err:#}");
        }

        Ok(ChatOutcome {
            reply: response.text,
            classification,
        })
    }
}

fn build_request(
    settings: &RelaySettings,
    system: String,
    history: &[ChatTurn],
    message: &str,
) -> LlmRequest {
    let mut messages: Vec<LlmMessage> = history
        .iter()
        .map(|turn| match turn.role {
            Role::User => LlmMessage::user(turn.text.as_str()),
            Role::Assistant => LlmMessage::assistant(turn.text.as_str()),
        })
        .collect();
    messages.push(LlmMessage::user(message));

    LlmRequest {
        model: settings.model.clone(),
        system: Some(system),
        messages,
        temperature: Some(settings.temperature),
        max_tokens: None,
    }
}
