//! HTTP surface for the referral and testing utilities.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /s/{code}` | `307` to `/auth/signup?ref={code}`, or to `/auth/signup` when the code is invalid |
//! | `GET /api/referral/generate` | a fresh code with its share links |
//! | `GET /api/referral/{code}` | share links for `code`, `400` when invalid |
//! | `GET /api/testing-config` | the resolved testing flags |
//! | `GET /health` | `{"status":"ok"}` |

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod routes;
pub mod state;

use crate::utils::error::{Result, ScribeError};
use routes::{
    generate_handler, health_handler, referral_handler, short_link_handler,
    testing_config_handler,
};
pub use state::State;

pub fn router(state: Arc<State>) -> Router {
    Router::new()
        .route("/s/{code}", get(short_link_handler))
        .route("/api/referral/generate", get(generate_handler))
        .route("/api/referral/{code}", get(referral_handler))
        .route("/api/testing-config", get(testing_config_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn bind(address: &str) -> Result<TcpListener> {
    TcpListener::bind(address)
        .await
        .map_err(|e| ScribeError::ServerError {
            message: format!("Failed to bind {}: {}", address, e),
        })
}

/// Serves until the listener fails or `shutdown` resolves.
pub async fn serve_with_shutdown<F>(listener: TcpListener, state: Arc<State>, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    if let Ok(address) = listener.local_addr() {
        info!("Server running on {address}");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ScribeError::ServerError {
            message: e.to_string(),
        })?;

    info!("Server shut down");
    Ok(())
}

pub async fn start_server(state: Arc<State>) -> Result<()> {
    let address = state.config.bind_address.clone();
    info!("Binding to {address}");

    let listener = bind(&address).await?;
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
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
}
