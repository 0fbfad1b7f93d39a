//! Pluggable inference over a pre-trained forecast artifact
//!
//! A `ForecastSession` owns the loaded model for its lifetime: loading
//! happens once and fails fast, predictions are serialized internally, and
//! dropping the session releases the backend's resources. Backends are
//! swappable so tests run against a deterministic mock instead of the real
//! net.
//!
//! # Architecture
//!
//! - `InferenceBackend` trait: the predict interface every backend serves
//! - `ForecastSession` enum: concrete wrapper providing compile-time
//!   dispatch across backends
//! - Backend implementations: `DenseBackend` (candle, CPU), `MockBackend`

mod artifact;
mod dense;
mod mock;

pub use artifact::{ModelMetadata, DEFAULT_SCALE, METADATA_FILE, WEIGHTS_FILE};
pub use dense::DenseBackend;
pub use mock::MockBackend;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::features::FeatureVector;

/// Trait defining the interface all inference backends serve
pub trait InferenceBackend {
    /// Run one forward pass over a built feature vector. The returned
    /// value lives in the model's log space; the caller denormalizes it.
    fn predict(&self, features: &FeatureVector) -> Result<f32>;

    /// Metadata the artifact shipped with
    fn metadata(&self) -> &ModelMetadata;
}

/// Concrete session enum
///
/// Provides compile-time dispatch without Box<dyn> overhead. All variants
/// implement the same InferenceBackend operations.
#[derive(Debug)]
pub enum ForecastSession {
    /// Candle net loaded from a model directory
    Dense(DenseBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl ForecastSession {
    /// Load the artifact from a model directory. Fails fast; a session
    /// either holds a fully loaded net or does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self::Dense(DenseBackend::load(dir)?))
    }

    /// Mock session echoing log amounts (pipeline becomes an identity)
    pub fn mock_identity() -> Self {
        Self::Mock(MockBackend::identity())
    }

    /// Mock session answering every call with `value`
    pub fn mock_fixed(value: f32) -> Self {
        Self::Mock(MockBackend::fixed(value))
    }
}

// Implement InferenceBackend for ForecastSession by delegating to the
// inner backend, after checking the input against the artifact's shape.
impl InferenceBackend for ForecastSession {
    fn predict(&self, features: &FeatureVector) -> Result<f32> {
        let expected = self.metadata().input_len;
        let got = features.as_slice().len();
        if got != expected {
            return Err(Error::ShapeMismatch { expected, got });
        }
        match self {
            ForecastSession::Dense(b) => b.predict(features),
            ForecastSession::Mock(b) => b.predict(features),
        }
    }

    fn metadata(&self) -> &ModelMetadata {
        match self {
            ForecastSession::Dense(b) => b.metadata(),
            ForecastSession::Mock(b) => b.metadata(),
        }
    }
}

/// Resolve the model directory from the environment: `OUTLAY_MODEL` if
/// set, otherwise `./model`
pub fn model_dir_from_env() -> PathBuf {
    std::env::var("OUTLAY_MODEL")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("model"))
}
