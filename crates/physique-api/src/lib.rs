//! physique-api - HTTP API layer for the physique analysis service
//!
//! Exposes a single endpoint, `POST /analyze`, which stages an uploaded image
//! in the scratch directory, runs the configured analyzer on it and returns
//! the [`AnalysisResult`](physique_core::AnalysisResult) as JSON.
//!
//! # Usage
//!
//! ```ignore
//! use physique_api::{create_router, AppState};
//! use physique_core::ScratchDir;
//!
//! let scratch = ScratchDir::open("uploads")?;
//! let router = create_router(AppState::new(scratch));
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::{AppState, UploadLimits};

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Create the API router with the given application state
pub fn create_router(state: AppState) -> Router {
    // Development posture: every origin, method and header is allowed
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let limits = state.limits();
    let body_limit = match limits.max_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    let mut router = Router::new()
        .route("/analyze", post(handlers::analyze::analyze_image))
        .layer(body_limit);

    if let Some(timeout) = limits.request_timeout {
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
