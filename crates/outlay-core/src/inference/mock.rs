//! Mock inference backend for testing

use super::artifact::ModelMetadata;
use super::InferenceBackend;
use crate::error::Result;
use crate::features::FeatureVector;

/// What the mock returns for each predict call
#[derive(Debug, Clone, Copy)]
enum MockResponse {
    /// Echo the input's log amount. Denormalizing the result then
    /// reconstructs the raw amount, which makes the whole pipeline an
    /// identity a test can assert against.
    LogIdentity,
    /// Always return this value
    Fixed(f32),
}

/// Deterministic backend for tests and offline development
#[derive(Debug, Clone)]
pub struct MockBackend {
    response: MockResponse,
    meta: ModelMetadata,
}

impl MockBackend {
    /// Mock that echoes the log amount back out
    pub fn identity() -> Self {
        Self {
            response: MockResponse::LogIdentity,
            meta: ModelMetadata::default(),
        }
    }

    /// Mock that answers every call with `value`
    pub fn fixed(value: f32) -> Self {
        Self {
            response: MockResponse::Fixed(value),
            meta: ModelMetadata::default(),
        }
    }

    /// Override the metadata scale (default is the bundled artifact's)
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.meta.scale = scale;
        self
    }
}

impl InferenceBackend for MockBackend {
    fn predict(&self, features: &FeatureVector) -> Result<f32> {
        Ok(match self.response {
            MockResponse::LogIdentity => features.log_amount(),
            MockResponse::Fixed(value) => value,
        })
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.meta
    }
}
