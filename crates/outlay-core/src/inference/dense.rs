//! CPU inference backend over candle
//!
//! Rebuilds the trained regression net from a safetensors file and runs
//! the forward pass in-process. One forward pass at a time: calls go
//! through a mutex because the net holds no per-call state but is not
//! assumed reentrant.

use std::path::Path;
use std::sync::Mutex;

use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::{linear, Linear, Module, VarBuilder};
use tracing::info;

use super::artifact::{ModelMetadata, METADATA_FILE, WEIGHTS_FILE};
use super::InferenceBackend;
use crate::error::{Error, Result};
use crate::features::FeatureVector;

/// Two-layer regression net: Linear -> ReLU -> Linear
#[derive(Debug)]
struct DenseNet {
    hidden: Linear,
    output: Linear,
}

impl DenseNet {
    fn build(meta: &ModelMetadata, vb: VarBuilder) -> candle_core::Result<Self> {
        let hidden = linear(meta.input_len, meta.hidden_len, vb.pp("hidden"))?;
        let output = linear(meta.hidden_len, 1, vb.pp("output"))?;
        Ok(Self { hidden, output })
    }
}

impl Module for DenseNet {
    fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        let xs = self.hidden.forward(xs)?.relu()?;
        self.output.forward(&xs)
    }
}

/// Backend running a loaded artifact on CPU
#[derive(Debug)]
pub struct DenseBackend {
    net: Mutex<DenseNet>,
    meta: ModelMetadata,
    device: Device,
}

impl DenseBackend {
    /// Load weights and metadata from a model directory.
    ///
    /// A missing or malformed artifact fails here, once, and the failure
    /// is fatal for the session; callers never retry into a half-loaded
    /// net.
    pub fn load(dir: &Path) -> Result<Self> {
        let meta = ModelMetadata::load(&dir.join(METADATA_FILE))?;
        let weights_path = dir.join(WEIGHTS_FILE);
        let device = Device::Cpu;

        let tensors = candle_core::safetensors::load(&weights_path, &device)
            .map_err(|e| Error::ModelLoad(format!("{}: {}", weights_path.display(), e)))?;
        let vb = VarBuilder::from_tensors(tensors, DType::F32, &device);
        let net = DenseNet::build(&meta, vb)
            .map_err(|e| Error::ModelLoad(format!("{}: {}", weights_path.display(), e)))?;

        info!(
            dir = %dir.display(),
            inputs = meta.input_len,
            hidden = meta.hidden_len,
            scale = meta.scale,
            "Loaded forecast model"
        );

        Ok(Self {
            net: Mutex::new(net),
            meta,
            device,
        })
    }
}

impl InferenceBackend for DenseBackend {
    fn predict(&self, features: &FeatureVector) -> Result<f32> {
        let net = self
            .net
            .lock()
            .map_err(|_| Error::Inference("model mutex poisoned".to_string()))?;

        let input = Tensor::from_vec(features.to_vec(), (1, self.meta.input_len), &self.device)
            .map_err(|e| Error::Inference(e.to_string()))?;
        let output = net
            .forward(&input)
            .map_err(|e| Error::Inference(e.to_string()))?;

        output
            .i((0, 0))
            .and_then(|t| t.to_scalar::<f32>())
            .map_err(|e| Error::Inference(e.to_string()))
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.meta
    }
}
