//! Prediction API router.
//!
//! Layers (outermost → innermost): CORS → body limit → handler.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Headroom on top of the file limit for multipart boundaries and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 16 * 1024;

/// Build the prediction router.
///
/// CORS is permissive: the UI is served from a different origin during
/// development and the API holds no credentials.
pub fn prediction_router(ctx: ApiContext) -> Router {
    let body_limit = ctx.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/predict", post(endpoints::predict::predict))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
}
