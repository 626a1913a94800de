//! Deterministic core of a diabetic-retinopathy screening service: fundus
//! image normalization ahead of a black-box classifier, interpretation of
//! the classifier's raw output, longitudinal trend assessment and clinical
//! report synthesis.
//!
//! Transport, model training and the classifier artifact itself are external
//! collaborators; this crate owns only the decision logic between them. All
//! components are pure, synchronous and stateless, so an [`Engine`] can be
//! shared freely across request handlers.

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod interpret;
pub mod preprocess;
pub mod protocol;
pub mod stats;
#[cfg(feature = "torch")]
pub mod torch;

pub use engine::Engine;
pub use error::Error;
