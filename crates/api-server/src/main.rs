use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use api_server::http::{AppState, build_router};
use shared::config::{ApiConfig, load_dotenv};
use shared::llm::{GeminiGateway, GeminiGatewayConfig};
use shared::session::SessionStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "api_server=debug,shared=info,axum=info";

#[tokio::main]
async fn main() {
    let dotenv_result = load_dotenv();
    init_tracing();
    if let Err(err) = dotenv_result {
        error!("failed to load .env file: {err}");
        std::process::exit(1);
    }

    let config = match ApiConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("failed to read config: {err}");
            std::process::exit(1);
        }
    };

    let gemini_config = match GeminiGatewayConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("failed to read gemini config: {err}");
            std::process::exit(1);
        }
    };

    let gateway = match GeminiGateway::new(gemini_config) {
        Ok(gateway) => gateway,
        Err(err) => {
            error!("failed to initialize gemini gateway: {err}");
            std::process::exit(1);
        }
    };
    info!(model = gateway.primary_model(), "gemini gateway ready");

    let app = build_router(AppState {
        sessions: SessionStore::new(Duration::from_secs(config.session_ttl_seconds)),
        llm_gateway: Arc::new(gateway),
        max_upload_bytes: config.max_upload_bytes,
    });

    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(err) => {
            error!("invalid API_BIND_ADDR '{}': {err}", config.bind_addr);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };

    info!(
        "api server listening on {}",
        listener.local_addr().unwrap_or(addr)
    );
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server exited with error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format.trim() == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        return;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    use super::DEFAULT_LOG_FILTER;

    #[test]
    fn default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
