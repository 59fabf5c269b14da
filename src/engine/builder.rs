use candle_core::Device;
use tracing::info;

use super::engine::SentimentEngine;
use crate::config::ModelConfig;
use crate::error::{EngineError, Result};
use crate::model::{ModelArtifacts, SentimentClassifier, SentimentTokenizer};

/// Builder for constructing a loaded [`SentimentEngine`].
pub struct EngineBuilder {
    config: Option<ModelConfig>,
    device: Option<Device>,
}

impl EngineBuilder {
    /// Create a new builder instance
    pub fn new() -> Self {
        Self {
            config: None,
            device: None,
        }
    }

    /// Set the model configuration
    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Pin the compute device instead of auto-selecting one
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = Some(device);
        self
    }

    /// Fetch artifacts, assemble tokenizer and classifier, and return a
    /// ready engine. Any failure here is fatal to startup.
    pub async fn build(self) -> Result<SentimentEngine> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let device = match self.device {
            Some(device) => device,
            None => select_device()?,
        };
        let label = device_label(&device);
        info!(model = %config.model_id, device = %label, "loading model");

        let load_device = device.clone();
        let (tokenizer, classifier) = tokio::task::spawn_blocking(move || {
            let artifacts = ModelArtifacts::fetch(&config)?;
            let tokenizer =
                SentimentTokenizer::from_file(&artifacts.tokenizer_path, config.max_input_tokens)?;
            let vb = artifacts.var_builder(&load_device)?;
            let classifier = SentimentClassifier::load(
                vb,
                &artifacts.config,
                artifacts.hidden_dim,
                artifacts.labels,
            )?;
            Ok::<_, EngineError>((tokenizer, classifier))
        })
        .await
        .map_err(|e| EngineError::Model(format!("Load task panicked: {e}")))??;

        info!("model loaded");
        Ok(SentimentEngine::new(classifier, tokenizer, device, label))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the compute device: CUDA 0 when available, otherwise CPU.
pub fn select_device() -> Result<Device> {
    let device = Device::cuda_if_available(0)
        .map_err(|e| EngineError::Device(format!("Device probe failed: {e}")))?;
    Ok(device)
}

/// Identifier reported by the health endpoint.
pub fn device_label(device: &Device) -> String {
    match device {
        Device::Cpu => "cpu".to_string(),
        Device::Cuda(_) => "cuda:0".to_string(),
        Device::Metal(_) => "metal".to_string(),
    }
}
