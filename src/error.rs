//! Error taxonomy of the screening core. Every failure here is deterministic
//! given the same input; callers report a category and do not retry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The uploaded bytes could not be decoded into a usable image.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Classifier output shape does not match the configured output head.
    #[error("malformed classifier output: expected {expected} value(s), got {got}")]
    MalformedOutput { expected: usize, got: usize },

    /// Case data lacks a field required for report generation.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The classifier artifact could not be loaded.
    #[error("model load failed: {0}")]
    ModelLoad(String),

    /// The classifier failed while computing inference.
    #[error("inference failed: {0}")]
    Inference(String),
}

impl Error {
    /// Coarse category for the transport collaborator. Internal detail stays
    /// on this side of the boundary.
    pub fn category(&self) -> &'static str {
        match self {
            Error::InvalidImage(_) => "invalid_image",
            Error::MalformedOutput { .. } => "malformed_output",
            Error::MissingField(_) => "missing_field",
            Error::ModelLoad(_) => "model_load",
            Error::Inference(_) => "inference",
        }
    }
}
