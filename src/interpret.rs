//! Interpretation of raw classifier output into a clinical label and
//! confidence. Three incompatible output heads exist across deployed
//! artifacts; the variant is fixed by configuration at startup and never
//! negotiated per request.

use crate::error::Error;
use crate::protocol::{ClassScore, ScanResult, SeverityLevel};
use serde::{Deserialize, Serialize};

pub const PATHOLOGY_LABEL: &str = "pathology detected";
pub const HEALTHY_LABEL: &str = "healthy eye";

/// Which output head the deployed classifier artifact carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputVariant {
    /// One sigmoid-activated probability, already in [0, 1].
    BinaryRaw,
    /// One pre-activation logit; the logistic is applied here.
    BinarySigmoid,
    /// Five softmax probabilities over the severity grades.
    Multiclass,
}

impl OutputVariant {
    /// Number of values the classifier must return for this head.
    pub fn expected_len(self) -> usize {
        match self {
            OutputVariant::BinaryRaw | OutputVariant::BinarySigmoid => 1,
            OutputVariant::Multiclass => 5,
        }
    }

    pub fn interpret(self, raw: &[f32]) -> Result<ScanResult, Error> {
        if raw.len() != self.expected_len() {
            return Err(Error::MalformedOutput {
                expected: self.expected_len(),
                got: raw.len(),
            });
        }
        Ok(match self {
            OutputVariant::BinaryRaw => binary(raw[0] as f64),
            OutputVariant::BinarySigmoid => binary(sigmoid(raw[0] as f64)),
            OutputVariant::Multiclass => multiclass(raw),
        })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Canonical confidence convention: fraction in [0, 1] at 4 decimal places,
/// fixed here at the interface. Presentation layers format percentages.
fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

fn binary(p: f64) -> ScanResult {
    // Strict threshold: 0.5 itself is the healthy branch.
    let (diagnosis, confidence) = if p > 0.5 {
        (PATHOLOGY_LABEL, p)
    } else {
        (HEALTHY_LABEL, 1.0 - p)
    };
    ScanResult {
        diagnosis: diagnosis.to_string(),
        confidence: round4(confidence),
        details: None,
    }
}

fn multiclass(raw: &[f32]) -> ScanResult {
    // First occurrence of the maximum wins the tie-break.
    let mut best = 0;
    for (i, &p) in raw.iter().enumerate() {
        if p > raw[best] {
            best = i;
        }
    }

    let details = SeverityLevel::ALL
        .iter()
        .zip(raw)
        .map(|(level, &p)| ClassScore {
            label: level.label().to_string(),
            probability: p as f64,
        })
        .collect();

    ScanResult {
        diagnosis: SeverityLevel::ALL[best].label().to_string(),
        confidence: round4(raw[best] as f64),
        details: Some(details),
    }
}
