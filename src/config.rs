use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the listener to
    pub host: String,

    /// Port to bind the listener to
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hub identifier of the classification checkpoint
    pub model_id: String,

    /// Token budget per input; longer texts are truncated
    pub max_input_tokens: usize,

    /// Override for the Hub artifact cache (None uses the default cache)
    pub cache_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: "distilbert-base-uncased-finetuned-sst-2-english".to_string(),
            max_input_tokens: 512,
            cache_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Build the configuration from defaults plus environment overrides.
    ///
    /// Only the bind address is environment-tunable (`SENTIMENT_HOST`,
    /// `SENTIMENT_PORT`); the model identifier is fixed.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            model: ModelConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.model.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("SENTIMENT_HOST").unwrap_or(defaults.host);
        let port = std::env::var("SENTIMENT_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.port);
        Self { host, port }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(EngineError::Configuration {
                parameter: "host".to_string(),
                message: "Bind host cannot be empty".to_string(),
            });
        }
        if self.port == 0 {
            return Err(EngineError::Configuration {
                parameter: "port".to_string(),
                message: "Bind port cannot be zero".to_string(),
            });
        }
        Ok(())
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<()> {
        if self.model_id.is_empty() {
            return Err(EngineError::Configuration {
                parameter: "model_id".to_string(),
                message: "Model identifier cannot be empty".to_string(),
            });
        }
        if self.max_input_tokens == 0 {
            return Err(EngineError::Configuration {
                parameter: "max_input_tokens".to_string(),
                message: "Token budget must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
