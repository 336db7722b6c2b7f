//! TalentScout server binary.
//!
//! Loads configuration, wires the completion client and file stores into the
//! interview router, and serves it until interrupted.

use std::error::Error;
use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use talent_scout::adapters::{
    interview_router, FileCandidateRepository, FileTranscriptStore, InterviewAppState,
    OpenAIConfig, OpenAIProvider,
};
use talent_scout::application::{CompletionSettings, SessionRegistry};
use talent_scout::config::{AppConfig, ServerConfig};
use talent_scout::domain::foundation::Timestamp;
use talent_scout::ports::{AIProvider, CandidateRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    let provider = OpenAIProvider::new(OpenAIConfig::from(&config.ai))?;
    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, base_url = %config.ai.base_url, "completion backend configured");

    let transcripts = Arc::new(FileTranscriptStore::new(&config.storage.exports_dir));
    let candidates = Arc::new(FileCandidateRepository::new(&config.storage.data_dir));

    match candidates.purge_expired(&Timestamp::now()).await {
        Ok(removed) => tracing::info!(removed, "retention sweep finished"),
        Err(e) => tracing::warn!(error = %e, "retention sweep failed"),
    }

    let registry = SessionRegistry::new(Arc::new(provider), CompletionSettings::from(&config.ai));
    let state = InterviewAppState::new(
        registry,
        transcripts,
        candidates,
        config.storage.retention_days,
        config.server.max_message_length,
    );

    let app = interview_router()
        .with_state(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "talent-scout listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// JSON lines in production, human-readable output elsewhere. `RUST_LOG`
/// overrides the configured level.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        if server.is_production() {
            return CorsLayer::new();
        }
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
