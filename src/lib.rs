//! # quire
//!
//! HTTP export service for books written in the Quire authoring app.
//!
//! - `GET /api/export/:id/pdf`: paginated PDF, streamed
//! - `GET /api/export/:id/doc`: `.docx` package with a known length
//! - `GET /health`: liveness, unauthenticated
//!
//! Rendering itself lives in the `quire-core` workspace crate; this crate
//! adds configuration, authentication, book storage and the HTTP surface.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod state;
pub mod storage;

use axum::{Router, middleware as axum_middleware, routing::get};
use state::AppState;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    // Export routes (with auth)
    let api_routes = Router::new()
        .route("/api/export/:id/pdf", get(api::export_pdf))
        .route("/api/export/:id/doc", get(api::export_doc))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(api::health_check))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
