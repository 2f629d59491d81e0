use std::sync::Arc;

use clap::Parser;

use clipchat_llm::{OpenAiProvider, ProviderConfig};
use clipchat_server::conversation::ConversationManager;
use clipchat_server::logging::init_logging;
use clipchat_server::server::{run_server, AppState, ServerConfig};
use clipchat_session::{SessionStore, SessionStoreConfig};
use clipchat_transcript::{TranscriptFetcher, YouTubeCaptionSource};

#[derive(Parser, Debug, Clone)]
#[command(name = "clipchat-server")]
#[command(about = "Clipchat backend - YouTube video Q&A over HTTP")]
#[command(version)]
struct Cli {
    /// Bind address
    #[arg(long, env = "CLIPCHAT_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(long, env = "CLIPCHAT_PORT", default_value = "8000")]
    port: u16,

    /// Chat completion model
    #[arg(long, env = "CLIPCHAT_MODEL", default_value = clipchat_llm::DEFAULT_MODEL)]
    model: String,

    /// Chat API base URL (any OpenAI-compatible endpoint)
    #[arg(long, env = "CLIPCHAT_BASE_URL", default_value = clipchat_llm::DEFAULT_BASE_URL)]
    base_url: String,

    /// Chat API key
    #[arg(long, env = "OPENAI_API_KEY")]
    api_key: Option<String>,

    /// Maximum conversation sessions kept in memory
    #[arg(long, env = "CLIPCHAT_MAX_SESSIONS", default_value = "256")]
    max_sessions: usize,

    /// Log level filter (overrides RUST_LOG)
    #[arg(long, env = "CLIPCHAT_LOG")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    // Missing credential is a warning, not a startup failure: transcript
    // fetching still works, and chat requests report the auth failure.
    match &cli.api_key {
        Some(_) => tracing::info!("chat API key found in environment"),
        None => tracing::warn!("OPENAI_API_KEY not set; chat completions will fail until it is"),
    }

    let mut provider_config = ProviderConfig::new(cli.base_url).with_model(cli.model.clone());
    if let Some(key) = cli.api_key {
        provider_config = provider_config.with_api_key(key);
    }
    let provider = Arc::new(OpenAiProvider::new(provider_config)?);

    let source = Arc::new(YouTubeCaptionSource::new()?);
    let fetcher = Arc::new(TranscriptFetcher::new(source));

    let store = SessionStore::new(SessionStoreConfig::default().with_max_sessions(cli.max_sessions));
    let conversations = Arc::new(ConversationManager::new(provider, store, cli.model));

    let state = AppState {
        fetcher,
        conversations,
    };
    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
    };

    run_server(config, state).await
}
