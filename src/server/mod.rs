//! HTTP endpoint.
//!
//! Routes, relative to the configured base path (default `/summarize`):
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | POST | `{base}` | `{"text": ...}` → `{"output": ...}` |
//! | POST | `{base}/invoke` | `{"input": {"text": ...}}` → `{"output": ..., "metadata": {"run_id": ...}}` |
//! | POST | `{base}/batch` | `{"inputs": [...]}` → `{"output": [...], "metadata": {"run_ids": [...]}}` |
//! | GET | `{base}/input_schema` | JSON Schema of the input |
//! | GET | `{base}/output_schema` | JSON Schema of the output |
//! | GET | `/healthz` | liveness |
//!
//! CORS is fully permissive.

mod error;
mod handlers;

pub use error::{ApiError, ErrorBody};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::chain::SummarizeChain;
use crate::config::ServerConfig;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    chain: Arc<SummarizeChain>,
}

impl AppState {
    /// Wraps the pipeline.
    pub fn new(chain: Arc<SummarizeChain>) -> Self {
        Self { chain }
    }
}

/// Builds the application router.
pub fn router(chain: Arc<SummarizeChain>, config: &ServerConfig) -> Router {
    let base = config.route_path.trim_end_matches('/');

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route(base, post(handlers::summarize))
        .route(&format!("{}/invoke", base), post(handlers::invoke))
        .route(&format!("{}/batch", base), post(handlers::batch))
        .route(
            &format!("{}/input_schema", base),
            get(handlers::get_input_schema),
        )
        .route(
            &format!("{}/output_schema", base),
            get(handlers::get_output_schema),
        )
        .with_state(AppState::new(chain))
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
