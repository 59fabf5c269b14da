//! Engine module providing the loaded model holder and its build path

mod builder;
mod engine;

pub use builder::{device_label, select_device, EngineBuilder};
pub use engine::SentimentEngine;

use crate::error::Result;
use crate::types::Prediction;

/// Capability the request handlers depend on, implemented by the loaded
/// engine and by test doubles.
#[async_trait::async_trait]
pub trait Predictor: Send + Sync {
    /// Classify one text into sentiment scores
    async fn predict(&self, text: &str) -> Result<Prediction>;

    /// Compute device the model is bound to
    fn device_label(&self) -> &str;
}
