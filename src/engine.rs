//! The screening engine: the two operations exposed to the transport
//! collaborator, with the classifier injected as an explicit dependency
//! rather than hidden process-wide state.

use crate::analysis;
use crate::classifier::Classifier;
use crate::error::Error;
use crate::interpret::OutputVariant;
use crate::preprocess::Normalizer;
use crate::protocol::{CaseRequest, Report, ScanResult};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Stateless screening core. Cheap to clone and share across request
/// handlers; every call is independent and synchronous, so no coordination
/// is needed between concurrent requests.
#[derive(Clone)]
pub struct Engine {
    classifier: Arc<dyn Classifier>,
    normalizer: Normalizer,
    variant: OutputVariant,
}

impl Engine {
    pub fn new(classifier: Arc<dyn Classifier>, variant: OutputVariant) -> Self {
        Engine {
            classifier,
            normalizer: Normalizer::new(),
            variant,
        }
    }

    /// Build an engine from settings, loading the TorchScript artifact.
    /// Loading failures surface as [`Error::ModelLoad`]; nothing falls back
    /// silently.
    #[cfg(feature = "torch")]
    pub fn from_settings(settings: &crate::config::Settings) -> Result<Self, Error> {
        let classifier = crate::torch::TorchClassifier::load(&settings.model_path)?;
        Ok(Engine::new(Arc::new(classifier), settings.output))
    }

    /// Classify one fundus image: normalize, infer, interpret.
    pub fn classify_image(&self, image_bytes: &[u8]) -> Result<ScanResult, Error> {
        let tensor = self.normalizer.normalize_bytes(image_bytes)?;
        let raw = self
            .classifier
            .infer(&tensor)
            .map_err(|e| Error::Inference(e.to_string()))?;
        let result = self.variant.interpret(&raw)?;
        info!(
            diagnosis = %result.diagnosis,
            confidence = result.confidence,
            "classified fundus image"
        );
        Ok(result)
    }

    /// Analyze a case against its supplied history and synthesize the
    /// report. The wall clock is read only for the report header.
    pub fn analyze_case(&self, request: &CaseRequest) -> Result<Report, Error> {
        analysis::analyze_case(request, Utc::now().date_naive())
    }
}
