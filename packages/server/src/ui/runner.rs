//! Router construction and server lifecycle.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handler::{health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};
use crate::{config::ServerConfig, error::ServerError};

/// Build the application router
pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(websocket_handler))
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid allowed origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true)
}

/// Serve on an already bound listener until a shutdown signal arrives
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    allowed_origins: &[String],
) -> Result<(), ServerError> {
    let app = build_router(state, allowed_origins);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Bind to the configured address and run the relay
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Relay listening on ws://{}/ws", addr);
    tracing::info!("Allowed origins: {}", config.allowed_origins.join(", "));

    serve(listener, Arc::new(AppState::in_memory()), &config.allowed_origins).await?;

    tracing::info!("Relay stopped");
    Ok(())
}
