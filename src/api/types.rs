//! Shared types for the HTTP layer.

use crate::config::ServerConfig;
use crate::prediction::PredictionAssembler;

/// Shared context for all routes. Cheap to clone: the assembler holds its
/// model behind an `Arc` and carries no per-request state.
#[derive(Clone)]
pub struct ApiContext {
    pub assembler: PredictionAssembler,
    pub max_upload_bytes: usize,
}

impl ApiContext {
    pub fn new(assembler: PredictionAssembler, max_upload_bytes: usize) -> Self {
        Self {
            assembler,
            max_upload_bytes,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            PredictionAssembler::with_strategy(config.factor_strategy),
            config.max_upload_bytes,
        )
    }
}
