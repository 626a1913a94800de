//! Plain data structures exchanged with the transport collaborator. The core
//! owns none of the caller's data: histories and scan records arrive
//! wholesale per request and are only read.

use crate::error::Error;
use base64::{engine::general_purpose, Engine as _};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scored class out of the multiclass head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub label: String,
    pub probability: f64,
}

/// Outcome of classifying a single fundus image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub diagnosis: String,
    /// Fraction in [0, 1], rounded to 4 decimal places.
    pub confidence: f64,
    /// Per-class breakdown, present for multiclass output only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ClassScore>>,
}

/// Ordinal diabetic-retinopathy grade, 0 (healthy) through 4 (proliferative).
/// Serialized as its integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SeverityLevel {
    Healthy = 0,
    Mild = 1,
    Moderate = 2,
    Severe = 3,
    Proliferative = 4,
}

impl SeverityLevel {
    /// Grades in ordinal order; also the multiclass output class order.
    pub const ALL: [SeverityLevel; 5] = [
        SeverityLevel::Healthy,
        SeverityLevel::Mild,
        SeverityLevel::Moderate,
        SeverityLevel::Severe,
        SeverityLevel::Proliferative,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SeverityLevel::Healthy => "Healthy",
            SeverityLevel::Mild => "Mild",
            SeverityLevel::Moderate => "Moderate",
            SeverityLevel::Severe => "Severe",
            SeverityLevel::Proliferative => "Proliferative",
        }
    }

    /// Recover a grade from a stored diagnosis label by substring match.
    /// Binary labels ("pathology detected", "healthy eye") map only where a
    /// grade name actually appears.
    pub fn from_label(label: &str) -> Option<SeverityLevel> {
        let text = label.to_lowercase();
        SeverityLevel::ALL
            .iter()
            .rev()
            .find(|level| text.contains(&level.label().to_lowercase()))
            .copied()
    }
}

impl TryFrom<u8> for SeverityLevel {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(SeverityLevel::Healthy),
            1 => Ok(SeverityLevel::Mild),
            2 => Ok(SeverityLevel::Moderate),
            3 => Ok(SeverityLevel::Severe),
            4 => Ok(SeverityLevel::Proliferative),
            other => Err(format!("severity level out of range: {other}")),
        }
    }
}

impl From<SeverityLevel> for u8 {
    fn from(level: SeverityLevel) -> u8 {
        level as u8
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One prior scan in a patient's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDateTime,
    pub severity_level: SeverityLevel,
}

/// Current scan data supplied for case analysis. Optional fields are
/// validated at report generation, not on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseScan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    pub severity_level: SeverityLevel,
    /// Diagnosis label; the legacy collaborator sends this as `prediction`.
    #[serde(default, alias = "prediction")]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub symptoms: Option<String>,
}

/// Case-analysis request. The caller owns the history and supplies it
/// wholesale; the core never stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRequest {
    #[serde(rename = "patientName")]
    pub patient_name: String,
    pub current: CaseScan,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Generated clinical recommendation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub report: String,
}

/// An image as carried by the JSON transport, base64-encoded.
#[derive(Serialize, Deserialize)]
pub struct B64Image {
    pub image: String,
}

impl fmt::Debug for B64Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B64Image {{ image: <{} b64 chars> }}", self.image.len())
    }
}

impl B64Image {
    /// Decode to raw bytes. Malformed base64 is an invalid image, not an
    /// empty one.
    pub fn decode(&self) -> Result<Vec<u8>, Error> {
        general_purpose::STANDARD
            .decode(&self.image)
            .map_err(|e| Error::InvalidImage(e.to_string()))
    }
}

/// Minimal scan row consumed by cohort statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub date: NaiveDateTime,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub symptoms: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_is_ordered_by_grade() {
        assert!(SeverityLevel::Healthy < SeverityLevel::Mild);
        assert!(SeverityLevel::Severe < SeverityLevel::Proliferative);
    }

    #[test]
    fn severity_rejects_out_of_range() {
        assert!(SeverityLevel::try_from(5u8).is_err());
        assert_eq!(SeverityLevel::try_from(4u8).unwrap(), SeverityLevel::Proliferative);
    }

    #[test]
    fn severity_from_label_matches_substrings() {
        assert_eq!(
            SeverityLevel::from_label("Moderate retinopathy"),
            Some(SeverityLevel::Moderate)
        );
        assert_eq!(SeverityLevel::from_label("healthy eye"), Some(SeverityLevel::Healthy));
        assert_eq!(SeverityLevel::from_label("pathology detected"), None);
    }

    #[test]
    fn case_request_parses_legacy_wire_shape() {
        // Shape produced by the upstream record system: camelCase envelope,
        // snake_case scan fields, `prediction` for the diagnosis label, and
        // extra fields on history entries.
        let json = r#"{
            "patientName": "A. Martin",
            "current": {
                "severity_level": 3,
                "prediction": "Severe",
                "confidence": 0.91,
                "symptoms": "blurred vision"
            },
            "history": [
                {"date": "2025-01-10T09:30:00", "severity_level": 1, "prediction": "Mild", "confidence": 0.8},
                {"date": "2025-04-02T14:00:00", "severity_level": 2}
            ]
        }"#;
        let request: CaseRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.patient_name, "A. Martin");
        assert_eq!(request.current.diagnosis.as_deref(), Some("Severe"));
        assert_eq!(request.current.severity_level, SeverityLevel::Severe);
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.history[1].severity_level, SeverityLevel::Moderate);
    }

    #[test]
    fn severity_out_of_range_fails_deserialization() {
        let err = serde_json::from_str::<HistoryEntry>(
            r#"{"date": "2025-01-10T09:30:00", "severity_level": 9}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn scan_result_omits_empty_details() {
        let result = ScanResult {
            diagnosis: "healthy eye".into(),
            confidence: 0.97,
            details: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("details"));
    }

    #[test]
    fn b64_decode_round_trips() {
        let img = B64Image { image: "aGVsbG8=".into() };
        assert_eq!(img.decode().unwrap(), b"hello");
    }

    #[test]
    fn b64_garbage_is_invalid_image() {
        let img = B64Image { image: "!!not base64!!".into() };
        assert!(matches!(img.decode().unwrap_err(), Error::InvalidImage(_)));
    }
}
