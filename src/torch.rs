//! TorchScript-backed classifier, behind the `torch` feature so the default
//! build does not pull libtorch.

use crate::classifier::Classifier;
use crate::error::Error;
use crate::preprocess::NormalizedTensor;
use anyhow::Result;
use tch::{no_grad, CModule, Kind, Tensor};
use tracing::info;

/// Loads and runs a TorchScript export of the screening model.
#[derive(Debug)]
pub struct TorchClassifier {
    model: CModule,
}

impl TorchClassifier {
    /// Load the artifact, failing explicitly. There is no silent fallback; a
    /// caller that wants one substitutes its own [`Classifier`] on error.
    pub fn load(path: &str) -> Result<Self, Error> {
        let model = CModule::load(path).map_err(|e| Error::ModelLoad(e.to_string()))?;
        info!(path, "loaded TorchScript classifier");
        Ok(TorchClassifier { model })
    }
}

impl Classifier for TorchClassifier {
    fn infer(&self, input: &NormalizedTensor) -> Result<Vec<f32>> {
        let shape: Vec<i64> = input.shape().iter().map(|&d| d as i64).collect();
        let data: Vec<f32> = input.view().iter().copied().collect();
        let tensor = Tensor::from_slice(&data).view(shape.as_slice());

        let output = no_grad(|| self.model.forward_ts(&[tensor]))?;
        let flat = output.to_kind(Kind::Float).view([-1]);
        let scores: Vec<f32> = (&flat).try_into()?;
        Ok(scores)
    }
}
