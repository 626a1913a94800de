//! The classifier seam: an opaque function from normalized tensor to raw
//! scores. Loaded once at process start, injected everywhere it is needed,
//! never reloaded or mutated by this crate.

use crate::preprocess::NormalizedTensor;
use anyhow::Result;

/// Black-box classifier contract.
///
/// The number of returned values depends on the deployed artifact and must
/// match the configured [`OutputVariant`](crate::interpret::OutputVariant);
/// the core validates the shape at interpretation time, so implementations
/// just return whatever the model produced.
pub trait Classifier: Send + Sync {
    fn infer(&self, input: &NormalizedTensor) -> Result<Vec<f32>>;
}
