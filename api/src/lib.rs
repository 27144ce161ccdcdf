//! HTTP gateway for the persona chat backend.
//!
//! Routes:
//! - `GET /` liveness message
//! - `OPTIONS /` answers `{}` (CORS preflights get the usual empty 200)
//! - `POST /` `{"question"}` → `{"response"}`
//! - `POST /store-text` `{"content"}` → `{"message", "file_path"}`

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

pub use crate::core::app_state::{AppState, ConfigError, DEFAULT_PORT, ServerConfig};
pub use crate::core::http::response_envelope::{DetailBody, MessageBody};
pub use crate::error_handler::{AppError, AppResult};
pub use crate::routes::{root_route::WELCOME_MESSAGE, store_text::store_text_route::STORED_MESSAGE};

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use tokio::signal;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    middleware_layer::{json_extractor::json_error_mapper, options_body::bare_options_body},
    routes::{
        ask::ask_route::ask_route,
        root_route::root,
        store_text::store_text_route::store_text_route,
    },
};

/// Reduces a configured frontend URL to the bare origin browsers send,
/// e.g. `https://me.example.com/chat/` → `https://me.example.com`.
fn normalize_origin(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let (scheme, rest) = trimmed
        .split_once("://")
        .ok_or_else(|| ConfigError::InvalidOrigin(raw.to_string()))?;
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidOrigin(raw.to_string()));
    }
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() {
        return Err(ConfigError::InvalidOrigin(raw.to_string()));
    }
    Ok(format!("{scheme}://{host}"))
}

/// CORS policy: any origin, or exactly `frontend_url` when configured.
/// Methods and headers are unrestricted.
pub fn cors_layer(frontend_url: Option<&str>) -> Result<CorsLayer, ConfigError> {
    let origin = match frontend_url {
        Some(url) => {
            let origin = normalize_origin(url)?;
            let value = HeaderValue::from_str(&origin)
                .map_err(|_| ConfigError::InvalidOrigin(url.to_string()))?;
            AllowOrigin::exact(value)
        }
        None => AllowOrigin::from(Any),
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Builds the full router. Exposed so tests can drive it without a socket.
pub fn app_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root).post(ask_route))
        .route("/store-text", post(store_text_route))
        .layer(middleware::from_fn(json_error_mapper))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(bare_options_body))
        .with_state(state)
}

/// Loads configuration, indexes the stored text and serves until Ctrl+C or
/// SIGTERM.
pub async fn start() -> Result<(), AppError> {
    let server_cfg = ServerConfig::from_env()?;
    let cors = cors_layer(server_cfg.frontend_url.as_deref())?;
    let state = Arc::new(AppState::from_env().await?);

    let app = app_router(state, cors);

    let addr = server_cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(%addr, frontend = ?server_cfg.frontend_url, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("gateway stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
