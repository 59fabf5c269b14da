//! Sentiment Server - HTTP inference service for binary sentiment
//! classification
//!
//! This crate wraps a pretrained DistilBERT SST-2 checkpoint behind a small
//! HTTP API: the model is loaded once at startup, bound to a compute device,
//! and every request runs a single inference-only forward pass.

use std::fmt;

// Public modules
pub mod config;
pub mod engine;
pub mod error;
pub mod server;
pub mod types;
pub mod utils;

// Internal modules
mod model;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-exports for public API
pub use config::{ModelConfig, ServerConfig, ServiceConfig};
pub use engine::{EngineBuilder, Predictor, SentimentEngine};
pub use error::{ApiError, EngineError, Result};
pub use server::AppState;
pub use types::{HealthResponse, PredictRequest, PredictResponse, Prediction, Sentiment};

/// Feature detection for supported backends
pub struct Features {
    /// Whether a CUDA device is usable at runtime
    pub cuda: bool,
}

impl Features {
    /// Detect available features at runtime
    pub fn detect() -> Self {
        Self {
            cuda: candle_core::utils::cuda_is_available(),
        }
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CUDA support: {}", if self.cuda { "yes" } else { "no" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_detection() {
        let features = Features::detect();
        println!("Detected features: {}", features);
        #[cfg(not(feature = "cuda"))]
        assert!(!features.cuda);
    }

    #[test]
    fn test_version_number() {
        assert!(!VERSION.is_empty());
    }
}
