//! HTTP transport for the prediction core.
//!
//! The browser UI posts a CSV file to `/predict` and renders the JSON it gets
//! back. This layer only moves bytes: validation of the upload, then a single
//! synchronous call into `prediction`.
//!
//! `prediction_router()` returns a `Router` that can be mounted on any axum
//! server instance; `server` owns the listener lifecycle.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::prediction_router;
pub use server::{PredictionServer, ServerSession};
pub use types::ApiContext;
