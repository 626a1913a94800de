//! Service configuration: which classifier artifact is deployed and which
//! output head it carries. The head is a deployment decision, fixed at
//! startup; requests never negotiate it.

use crate::interpret::OutputVariant;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path to the TorchScript artifact.
    pub model_path: String,
    /// Output head of the deployed artifact; selects the interpreter.
    pub output: OutputVariant,
}

impl Settings {
    /// Defaults, overridden by `retinascan.toml`, overridden by
    /// `RETINASCAN_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("model_path", "models/retinascan.pt")?
            .set_default("output", "multiclass")?
            .add_source(File::with_name("retinascan").required(false))
            .add_source(Environment::with_prefix("RETINASCAN"))
            .build()?
            .try_deserialize()
    }
}
