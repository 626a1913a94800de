//! Clinical report synthesis: a fixed four-section template composed from
//! current-scan data, the trend assessment and the severity-chosen
//! recommendation. Advisory output for clinicians, not a diagnosis.

use super::trend::Trend;
use super::triage;
use crate::error::Error;
use crate::protocol::{CaseScan, Report, SeverityLevel};
use chrono::NaiveDate;

/// Compose the report. Pure: the generation date is a parameter, never read
/// from the clock here.
///
/// Required case fields (diagnosis, confidence, symptoms) are validated up
/// front so an incomplete request fails with a named field instead of a
/// template substitution error.
pub fn generate(
    patient_name: &str,
    current: &CaseScan,
    trend: Trend,
    severity: SeverityLevel,
    generated_on: NaiveDate,
) -> Result<Report, Error> {
    let diagnosis = current
        .diagnosis
        .as_deref()
        .ok_or(Error::MissingField("diagnosis"))?;
    let confidence = current.confidence.ok_or(Error::MissingField("confidence"))?;
    let symptoms = current.symptoms.as_deref().ok_or(Error::MissingField("symptoms"))?;

    let percent = (confidence * 100.0).round() as i64;
    let tier = triage::stratify(severity);

    let mut text = format!(
        "RETINOPATHY SCREENING REPORT\n\
         Patient: {patient_name}\n\
         Generated: {date}\n\n",
        date = generated_on.format("%Y-%m-%d"),
    );

    text.push_str(&format!(
        "CURRENT SCAN\n\
         Diagnosis: {diagnosis}\n\
         Confidence: {percent}%\n\
         Reported symptoms: {symptoms}\n\n"
    ));

    text.push_str(&format!(
        "DISEASE COURSE\nTrend over recent scans: {}\n",
        trend.label()
    ));
    match trend {
        Trend::Worsening => text.push_str(
            "ALERT: severity has increased across the recent scans; prioritize clinical review.\n",
        ),
        Trend::Improving => text.push_str(
            "Note: severity has decreased across the recent scans; current management appears effective.\n",
        ),
        Trend::Stable | Trend::InsufficientData => {}
    }
    text.push('\n');

    text.push_str(&format!(
        "RECOMMENDATION\n\
         Risk tier: {}\n\
         {}\n\n",
        tier.label(),
        triage::recommendation(severity),
    ));
    text.push_str("This automated assessment is advisory and does not replace clinical judgment.\n");

    Ok(Report { report: text })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(severity: SeverityLevel) -> CaseScan {
        CaseScan {
            date: None,
            severity_level: severity,
            diagnosis: Some(severity.label().to_string()),
            confidence: Some(0.87),
            symptoms: Some("blurred vision".to_string()),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn report_has_all_four_sections_in_order() {
        let report = generate("J. Rivera", &scan(SeverityLevel::Mild), Trend::Stable, SeverityLevel::Mild, date())
            .unwrap()
            .report;

        let header = report.find("Patient: J. Rivera").unwrap();
        let current = report.find("CURRENT SCAN").unwrap();
        let course = report.find("DISEASE COURSE").unwrap();
        let reco = report.find("RECOMMENDATION").unwrap();
        assert!(header < current && current < course && course < reco);
        assert!(report.contains("Generated: 2025-06-01"));
    }

    #[test]
    fn confidence_renders_as_integer_percent() {
        let report = generate("P", &scan(SeverityLevel::Healthy), Trend::Stable, SeverityLevel::Healthy, date())
            .unwrap()
            .report;
        assert!(report.contains("Confidence: 87%"));
    }

    #[test]
    fn proliferative_always_gets_urgent_referral() {
        for trend in [Trend::InsufficientData, Trend::Worsening, Trend::Improving, Trend::Stable] {
            let report = generate(
                "P",
                &scan(SeverityLevel::Proliferative),
                trend,
                SeverityLevel::Proliferative,
                date(),
            )
            .unwrap()
            .report;
            assert!(report.contains("URGENT"), "missing urgent text for {trend:?}");
            assert!(report.contains("Risk tier: CRITICAL"));
        }
    }

    #[test]
    fn alert_line_appears_only_when_worsening() {
        let worsening = generate("P", &scan(SeverityLevel::Moderate), Trend::Worsening, SeverityLevel::Moderate, date())
            .unwrap()
            .report;
        assert!(worsening.contains("ALERT:"));

        let stable = generate("P", &scan(SeverityLevel::Moderate), Trend::Stable, SeverityLevel::Moderate, date())
            .unwrap()
            .report;
        assert!(!stable.contains("ALERT:"));
        assert!(!stable.contains("Note: severity has decreased"));
    }

    #[test]
    fn improving_adds_the_positive_note() {
        let report = generate("P", &scan(SeverityLevel::Mild), Trend::Improving, SeverityLevel::Mild, date())
            .unwrap()
            .report;
        assert!(report.contains("Note: severity has decreased"));
        assert!(!report.contains("ALERT:"));
    }

    #[test]
    fn missing_fields_fail_by_name() {
        let mut incomplete = scan(SeverityLevel::Mild);
        incomplete.symptoms = None;
        let err = generate("P", &incomplete, Trend::Stable, SeverityLevel::Mild, date()).unwrap_err();
        assert!(matches!(err, Error::MissingField("symptoms")));

        let mut incomplete = scan(SeverityLevel::Mild);
        incomplete.confidence = None;
        let err = generate("P", &incomplete, Trend::Stable, SeverityLevel::Mild, date()).unwrap_err();
        assert!(matches!(err, Error::MissingField("confidence")));
    }
}
