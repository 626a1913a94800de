//! Cohort statistics over caller-supplied scan records, for clinician
//! dashboards. Pure aggregation: the caller owns the rows and nothing here
//! stores or mutates them.

use crate::protocol::{ScanRecord, SeverityLevel};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Days of trailing scan volume reported.
const VOLUME_WINDOW_DAYS: u64 = 7;

/// Bucket shown for scans with no diagnosis attached.
const UNANALYZED: &str = "Unanalyzed";

#[derive(Debug, Clone, Serialize)]
pub struct CohortStats {
    pub total_scans: u64,
    /// Scans graded Severe or Proliferative.
    pub urgent_cases: u64,
    /// Mean confidence over analyzed scans, rounded to 2 decimal places.
    pub avg_confidence: f64,
    pub severity_distribution: BTreeMap<String, u64>,
    pub symptom_frequency: BTreeMap<String, u64>,
    pub scans_last_7_days: BTreeMap<NaiveDate, u64>,
}

/// Summarize a cohort of scans as of `today` (a parameter, so the function
/// stays pure and the trailing window is testable).
pub fn summarize(records: &[ScanRecord], today: NaiveDate) -> CohortStats {
    let mut severity_distribution: BTreeMap<String, u64> = BTreeMap::new();
    let mut symptom_frequency: BTreeMap<String, u64> = BTreeMap::new();
    let mut volume: BTreeMap<NaiveDate, u64> = (0..VOLUME_WINDOW_DAYS)
        .map(|back| (today - Days::new(back), 0))
        .collect();

    let mut urgent = 0u64;
    let mut confidence_sum = 0.0f64;
    let mut confidence_count = 0u64;

    for record in records {
        let label = record.diagnosis.as_deref().unwrap_or(UNANALYZED);
        *severity_distribution.entry(label.to_string()).or_insert(0) += 1;

        if matches!(SeverityLevel::from_label(label), Some(level) if level >= SeverityLevel::Severe)
        {
            urgent += 1;
        }

        if let Some(confidence) = record.confidence {
            confidence_sum += confidence;
            confidence_count += 1;
        }

        if let Some(symptoms) = record.symptoms.as_deref() {
            *symptom_frequency
                .entry(symptom_bucket(symptoms).to_string())
                .or_insert(0) += 1;
        }

        if let Some(count) = volume.get_mut(&record.date.date()) {
            *count += 1;
        }
    }

    let avg_confidence = if confidence_count == 0 {
        0.0
    } else {
        (confidence_sum / confidence_count as f64 * 100.0).round() / 100.0
    };

    CohortStats {
        total_scans: records.len() as u64,
        urgent_cases: urgent,
        avg_confidence,
        severity_distribution,
        symptom_frequency,
        scans_last_7_days: volume,
    }
}

/// Coarse symptom buckets for dashboard frequency counts.
fn symptom_bucket(symptoms: &str) -> &'static str {
    let text = symptoms.to_lowercase();
    if text.contains("blur") {
        "Blurred vision"
    } else if text.contains("spot") {
        "Spots"
    } else if text.contains("pain") {
        "Pain"
    } else if text.contains("diabet") {
        "Diabetes"
    } else {
        "Other"
    }
}
