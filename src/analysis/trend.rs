//! Longitudinal severity trend across a patient's recent scans.

use crate::protocol::HistoryEntry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Entries examined from the end of the date-sorted history.
const WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    InsufficientData,
    Worsening,
    Improving,
    Stable,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::InsufficientData => "insufficient data",
            Trend::Worsening => "worsening",
            Trend::Improving => "improving",
            Trend::Stable => "stable",
        }
    }
}

/// Compare the latest of the last three scans against the earliest of them.
/// The input may arrive in any order; it is sorted by date first, so the
/// result is invariant under reordering.
pub fn assess(history: &[HistoryEntry]) -> Trend {
    if history.len() < 2 {
        return Trend::InsufficientData;
    }

    let mut ordered: Vec<&HistoryEntry> = history.iter().collect();
    ordered.sort_by_key(|entry| entry.date);

    let window = &ordered[ordered.len().saturating_sub(WINDOW)..];
    let earliest = window[0].severity_level;
    let latest = window[window.len() - 1].severity_level;

    match latest.cmp(&earliest) {
        Ordering::Greater => Trend::Worsening,
        Ordering::Less => Trend::Improving,
        Ordering::Equal => Trend::Stable,
    }
}
