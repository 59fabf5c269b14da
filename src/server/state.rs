use std::sync::Arc;

use crate::engine::Predictor;

/// Shared per-request state.
///
/// The predictor is absent until the model holder has been constructed;
/// handlers observe that through [`AppState::model_loaded`] instead of
/// touching a half-initialized engine.
pub struct AppState {
    predictor: Option<Arc<dyn Predictor>>,
    device: String,
    model_id: String,
}

impl AppState {
    /// State for a fully loaded service.
    pub fn loaded(predictor: Arc<dyn Predictor>, model_id: impl Into<String>) -> Self {
        let device = predictor.device_label().to_string();
        Self {
            predictor: Some(predictor),
            device,
            model_id: model_id.into(),
        }
    }

    /// State for a service whose model has not (yet) been loaded.
    pub fn unloaded(device: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            predictor: None,
            device: device.into(),
            model_id: model_id.into(),
        }
    }

    pub fn predictor(&self) -> Option<&Arc<dyn Predictor>> {
        self.predictor.as_ref()
    }

    pub fn model_loaded(&self) -> bool {
        self.predictor.is_some()
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unloaded_state() {
        let state = AppState::unloaded("cpu", "some-model");
        assert!(!state.model_loaded());
        assert!(state.predictor().is_none());
        assert_eq!(state.device(), "cpu");
        assert_eq!(state.model_id(), "some-model");
    }
}
