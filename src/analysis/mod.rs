//! Case analysis: longitudinal trend, risk stratification and report
//! synthesis over caller-supplied scan history.

pub mod report;
pub mod trend;
pub mod triage;

pub use report::generate;
pub use trend::{assess, Trend};
pub use triage::{recommendation, stratify, RiskTier};

use crate::error::Error;
use crate::protocol::{CaseRequest, Report};
use chrono::NaiveDate;

/// Analyze a case: assess the trend over the supplied history, then compose
/// the report for the current scan. Pure; the engine passes the generation
/// date after reading the clock once.
pub fn analyze_case(request: &CaseRequest, generated_on: NaiveDate) -> Result<Report, Error> {
    let trend = trend::assess(&request.history);
    report::generate(
        &request.patient_name,
        &request.current,
        trend,
        request.current.severity_level,
        generated_on,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{CaseScan, HistoryEntry, SeverityLevel};
    use chrono::NaiveDate;

    fn entry(month: u32, level: u8) -> HistoryEntry {
        HistoryEntry {
            date: NaiveDate::from_ymd_opt(2025, month, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            severity_level: SeverityLevel::try_from(level).unwrap(),
        }
    }

    fn request(history: Vec<HistoryEntry>) -> CaseRequest {
        CaseRequest {
            patient_name: "M. Okafor".into(),
            current: CaseScan {
                date: None,
                severity_level: SeverityLevel::Moderate,
                diagnosis: Some("Moderate".into()),
                confidence: Some(0.74),
                symptoms: Some("dark spots".into()),
            },
            history,
        }
    }

    #[test]
    fn worsening_history_flows_into_the_report() {
        let report = analyze_case(
            &request(vec![entry(1, 0), entry(3, 1), entry(5, 2)]),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
        .unwrap();
        assert!(report.report.contains("worsening"));
        assert!(report.report.contains("ALERT:"));
    }

    #[test]
    fn empty_history_reads_as_insufficient_data() {
        let report = analyze_case(&request(vec![]), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .unwrap();
        assert!(report.report.contains("insufficient data"));
    }

    #[test]
    fn incomplete_current_scan_is_rejected() {
        let mut bad = request(vec![]);
        bad.current.symptoms = None;
        let err = analyze_case(&bad, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()).unwrap_err();
        assert!(matches!(err, Error::MissingField("symptoms")));
    }
}
