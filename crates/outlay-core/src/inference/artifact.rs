//! Model artifact metadata
//!
//! A trained artifact is a directory holding a safetensors weight file and
//! this JSON sidecar. The sidecar carries everything the runtime needs to
//! rebuild the net and to scale amounts the way training did.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::FEATURE_LEN;

/// Weight file name inside a model directory
pub const WEIGHTS_FILE: &str = "forecast.safetensors";

/// Metadata sidecar name inside a model directory
pub const METADATA_FILE: &str = "forecast.meta.json";

/// Amount scale the bundled artifact was trained against
pub const DEFAULT_SCALE: f64 = 187.85;

/// Sidecar metadata describing a trained forecast artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub version: u32,
    /// Amount scale used during training. Feature construction and
    /// denormalization must both use this value or forecasts drift.
    pub scale: f64,
    /// Feature vector length the net was trained on
    pub input_len: usize,
    /// Width of the hidden layer
    pub hidden_len: usize,
}

impl ModelMetadata {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::ModelLoad(format!("{}: {}", path.display(), e)))?;
        let meta: ModelMetadata = serde_json::from_str(&raw)
            .map_err(|e| Error::ModelLoad(format!("{}: {}", path.display(), e)))?;
        meta.validate()?;
        Ok(meta)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Reject metadata this build cannot serve. An `input_len` that does
    /// not match the feature builder is configuration skew, not data.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::ModelLoad(format!(
                "artifact scale must be positive, got {}",
                self.scale
            )));
        }
        if self.input_len != FEATURE_LEN {
            return Err(Error::ModelLoad(format!(
                "artifact expects {} inputs but this build produces {}",
                self.input_len, FEATURE_LEN
            )));
        }
        if self.hidden_len == 0 {
            return Err(Error::ModelLoad(
                "artifact hidden layer width must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            version: 1,
            scale: DEFAULT_SCALE,
            input_len: FEATURE_LEN,
            hidden_len: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metadata_is_valid() {
        assert!(ModelMetadata::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_scale() {
        let meta = ModelMetadata {
            scale: 0.0,
            ..ModelMetadata::default()
        };
        assert!(matches!(meta.validate(), Err(Error::ModelLoad(_))));

        let meta = ModelMetadata {
            scale: f64::NAN,
            ..ModelMetadata::default()
        };
        assert!(matches!(meta.validate(), Err(Error::ModelLoad(_))));
    }

    #[test]
    fn test_rejects_input_len_skew() {
        let meta = ModelMetadata {
            input_len: FEATURE_LEN + 1,
            ..ModelMetadata::default()
        };
        assert!(matches!(meta.validate(), Err(Error::ModelLoad(_))));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelMetadata::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(METADATA_FILE);

        let meta = ModelMetadata::default();
        meta.save(&path).unwrap();

        let loaded = ModelMetadata::load(&path).unwrap();
        assert_eq!(loaded.scale, meta.scale);
        assert_eq!(loaded.input_len, meta.input_len);
        assert_eq!(loaded.hidden_len, meta.hidden_len);
    }
}
