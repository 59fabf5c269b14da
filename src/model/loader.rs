use std::collections::HashMap;
use std::path::PathBuf;

use candle_core::Device;
use candle_nn::VarBuilder;
use candle_transformers::models::distilbert::{Config as BertConfig, DTYPE};
use hf_hub::api::sync::{Api, ApiBuilder};
use hf_hub::{Repo, RepoType};
use serde::Deserialize;
use tracing::info;

use crate::config::ModelConfig;
use crate::error::{EngineError, Result};

/// Which logit index carries which sentiment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelLayout {
    pub positive: usize,
    pub negative: usize,
}

impl Default for LabelLayout {
    /// SST-2 convention: index 0 is negative, index 1 is positive.
    fn default() -> Self {
        Self {
            positive: 1,
            negative: 0,
        }
    }
}

impl LabelLayout {
    /// Derive the layout from a checkpoint's `id2label` table, falling back
    /// to the SST-2 convention when the table is absent.
    pub fn from_id2label(id2label: &HashMap<String, String>) -> Result<Self> {
        if id2label.is_empty() {
            return Ok(Self::default());
        }

        let mut positive = None;
        let mut negative = None;
        for (id, label) in id2label {
            let index: usize = id.parse().map_err(|_| {
                EngineError::Model(format!("Non-numeric label id '{id}' in id2label"))
            })?;
            match label.to_ascii_uppercase().as_str() {
                "POSITIVE" => positive = Some(index),
                "NEGATIVE" => negative = Some(index),
                other => {
                    return Err(EngineError::Model(format!(
                        "Unexpected classifier label '{other}'"
                    )))
                }
            }
        }

        match (positive, negative) {
            (Some(positive), Some(negative))
                if positive != negative && positive < 2 && negative < 2 =>
            {
                Ok(Self { positive, negative })
            }
            _ => Err(EngineError::Model(
                "Checkpoint labels do not describe a binary sentiment head".to_string(),
            )),
        }
    }
}

/// Classifier-specific fields of `config.json` that the backbone config
/// does not expose.
#[derive(Debug, Deserialize)]
struct ClassifierConfigJson {
    /// Hidden dimension, reused by the classification head
    dim: usize,
    #[serde(default)]
    id2label: HashMap<String, String>,
}

/// Model files resolved from the Hub cache plus their parsed configuration.
pub struct ModelArtifacts {
    pub config: BertConfig,
    pub hidden_dim: usize,
    pub labels: LabelLayout,
    pub tokenizer_path: PathBuf,
    pub weights_path: PathBuf,
}

impl ModelArtifacts {
    /// Download (or reuse from cache) everything needed to assemble the
    /// classifier: config, tokenizer and weights.
    pub fn fetch(config: &ModelConfig) -> Result<Self> {
        let api = match &config.cache_dir {
            Some(dir) => ApiBuilder::new().with_cache_dir(dir.clone()).build()?,
            None => Api::new()?,
        };
        let repo = api.repo(Repo::new(config.model_id.clone(), RepoType::Model));

        let config_path = repo.get("config.json")?;
        let tokenizer_path = repo.get("tokenizer.json")?;
        let weights_path = repo
            .get("model.safetensors")
            .or_else(|_| repo.get("pytorch_model.bin"))?;
        info!(weights = %weights_path.display(), "model artifacts resolved");

        let config_str = std::fs::read_to_string(&config_path)?;
        let bert_config: BertConfig = serde_json::from_str(&config_str)?;
        let classifier_config: ClassifierConfigJson = serde_json::from_str(&config_str)?;
        let labels = LabelLayout::from_id2label(&classifier_config.id2label)?;

        Ok(Self {
            config: bert_config,
            hidden_dim: classifier_config.dim,
            labels,
            tokenizer_path,
            weights_path,
        })
    }

    /// Map the weight file into a `VarBuilder` on the target device.
    pub fn var_builder(&self, device: &Device) -> Result<VarBuilder<'static>> {
        let vb = if self
            .weights_path
            .extension()
            .is_some_and(|ext| ext == "safetensors")
        {
            unsafe {
                VarBuilder::from_mmaped_safetensors(
                    std::slice::from_ref(&self.weights_path),
                    DTYPE,
                    device,
                )?
            }
        } else {
            VarBuilder::from_pth(&self.weights_path, DTYPE, device)?
        };
        Ok(vb)
    }
}
