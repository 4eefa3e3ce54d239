use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_base_url() -> String {
    smartrelay_provider::OPENROUTER_BASE_URL.to_string()
}

fn default_model() -> String {
    "openai/gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    25
}

fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}

fn default_transcript_path() -> PathBuf {
    PathBuf::from("conversation_logs/conversations.json")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Name of the environment variable holding the bearer token.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Credential from the environment. Unset and blank are both "missing".
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptConfig {
    #[serde(default = "default_transcript_path")]
    pub path: PathBuf,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            path: default_transcript_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

/// Expand `${VAR}` placeholders from the environment. Unset variables expand
/// to nothing; an unterminated `${` is kept as written.
fn expand_placeholders(raw: &str) -> String {
    let mut expanded = String::with_capacity(raw.len());
    let mut remaining = raw;

    loop {
        let Some((literal, tail)) = remaining.split_once("${") else {
            expanded.push_str(remaining);
            break;
        };
        expanded.push_str(literal);
        match tail.split_once('}') {
            Some((name, after)) => {
                if let Ok(value) = std::env::var(name) {
                    expanded.push_str(&value);
                }
                remaining = after;
            }
            None => {
                expanded.push_str("${");
                expanded.push_str(tail);
                break;
            }
        }
    }

    expanded
}

impl RelayConfig {
    /// Read a YAML config file. A missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read config file: {}", path.display()))
            }
        };
        Self::from_yaml(&content)
            .with_context(|| format!("failed to parse yaml file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut config: RelayConfig = serde_yaml::from_str(content)?;
        config.resolve_env();
        Ok(config)
    }

    fn resolve_env(&mut self) {
        self.server.bind = expand_placeholders(&self.server.bind);
        self.upstream.base_url = expand_placeholders(&self.upstream.base_url);
        self.upstream.model = expand_placeholders(&self.upstream.model);
        self.upstream.api_key_env = expand_placeholders(&self.upstream.api_key_env);
        let path = self.transcript.path.to_string_lossy().into_owned();
        self.transcript.path = PathBuf::from(expand_placeholders(&path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_contract() {
        let config = RelayConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:5000");
        assert_eq!(config.upstream.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.upstream.model, "openai/gpt-3.5-turbo");
        assert_eq!(config.upstream.temperature, 0.7);
        assert_eq!(config.upstream.timeout(), Duration::from_secs(25));
        assert_eq!(config.upstream.api_key_env, "OPENROUTER_API_KEY");
        assert_eq!(
            config.transcript.path,
            PathBuf::from("conversation_logs/conversations.json")
        );
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config = RelayConfig::from_yaml("upstream:\n  model: mistralai/mistral-7b\n").unwrap();
        assert_eq!(config.upstream.model, "mistralai/mistral-7b");
        assert_eq!(config.upstream.temperature, 0.7);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn yaml_placeholders_are_resolved() {
        let home = std::env::var("HOME").unwrap_or_default();
        let config =
            RelayConfig::from_yaml("transcript:\n  path: \"${HOME}/conversations.json\"\n").unwrap();
        assert_eq!(
            config.transcript.path,
            PathBuf::from(format!("{home}/conversations.json"))
        );
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = RelayConfig::load_or_default(&tmp.path().join("relay.yaml")).unwrap();
        assert_eq!(config, RelayConfig::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("relay.yaml");
        std::fs::write(&path, "upstream: [not, a, map]").unwrap();
        let err = RelayConfig::load_or_default(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse yaml file"));
    }

    #[test]
    fn unset_api_key_env_is_missing() {
        let upstream = UpstreamConfig {
            api_key_env: "SMARTRELAY_NONEXISTENT_KEY_XYZ".into(),
            ..UpstreamConfig::default()
        };
        assert_eq!(upstream.api_key(), None);
    }

    #[test]
    fn placeholders_leave_plain_text_alone() {
        assert_eq!(expand_placeholders("127.0.0.1:5000"), "127.0.0.1:5000");
    }

    #[test]
    fn unterminated_placeholder_is_kept_verbatim() {
        assert_eq!(
            expand_placeholders("logs/${SMARTRELAY_DIR"),
            "logs/${SMARTRELAY_DIR"
        );
    }

    #[test]
    fn unset_placeholder_expands_to_nothing() {
        assert_eq!(
            expand_placeholders("${SMARTRELAY_UNSET_DIR_XYZ}/conversations.json"),
            "/conversations.json"
        );
    }
}
