use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use smartrelay_core::{ChatRelay, RelayConfig};
use smartrelay_server::state::AppState;
use smartrelay_transcript::TranscriptStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "smartrelay-server",
    version,
    about = "Chat relay with onboarding-aware prompts and a transcript log"
)]
struct Cli {
    #[arg(long, default_value = "relay.yaml", help = "YAML config file (optional)")]
    config: PathBuf,

    #[arg(long, env = "SMARTRELAY_BIND", help = "Listen address, overrides the config file")]
    bind: Option<String>,

    #[arg(long, default_value = "logs", help = "Directory for rolling server logs")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    std::fs::create_dir_all(&cli.log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&cli.log_dir, "smartrelay-server.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("smartrelay_server=info,smartrelay_core=info,smartrelay_transcript=info,tower_http=debug")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    let config = RelayConfig::load_or_default(&cli.config)?;
    let addr = cli.bind.unwrap_or_else(|| config.server.bind.clone());

    let api_key = config.upstream.api_key();
    if api_key.is_none() {
        tracing::warn!(
            "{} is not set; /chat will answer with an error until it is",
            config.upstream.api_key_env
        );
    }
    tracing::info!(
        "upstream: {} model={} credential={}",
        config.upstream.base_url,
        config.upstream.model,
        if api_key.is_some() { "yes" } else { "no" }
    );
    tracing::info!("transcript store: {}", config.transcript.path.display());

    let transcripts = Arc::new(TranscriptStore::new(&config.transcript.path));
    let relay = ChatRelay::from_config(&config.upstream, api_key, transcripts);

    smartrelay_server::serve(AppState::new(relay), &addr).await
}
