//! Severity-driven risk tier and the clinical action recommended for it.

use crate::protocol::SeverityLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Moderate,
    Critical,
}

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Moderate => "MODERATE",
            RiskTier::Critical => "CRITICAL",
        }
    }
}

pub fn stratify(level: SeverityLevel) -> RiskTier {
    match level {
        SeverityLevel::Healthy | SeverityLevel::Mild => RiskTier::Low,
        SeverityLevel::Moderate => RiskTier::Moderate,
        SeverityLevel::Severe | SeverityLevel::Proliferative => RiskTier::Critical,
    }
}

/// Recommendation text, chosen purely as a function of the severity grade.
pub fn recommendation(level: SeverityLevel) -> &'static str {
    match level {
        SeverityLevel::Healthy => "Routine annual screening; no intervention required.",
        SeverityLevel::Mild => {
            "Reinforce monitoring and glycemic control; re-examine in 6 months."
        }
        SeverityLevel::Moderate => {
            "Consider advanced imaging (fluorescein angiography); re-examine in 3 months."
        }
        SeverityLevel::Severe | SeverityLevel::Proliferative => {
            "URGENT: therapeutic intervention required; immediate referral to a retinal specialist."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_the_grade_bands() {
        assert_eq!(stratify(SeverityLevel::Healthy), RiskTier::Low);
        assert_eq!(stratify(SeverityLevel::Mild), RiskTier::Low);
        assert_eq!(stratify(SeverityLevel::Moderate), RiskTier::Moderate);
        assert_eq!(stratify(SeverityLevel::Severe), RiskTier::Critical);
        assert_eq!(stratify(SeverityLevel::Proliferative), RiskTier::Critical);
    }

    #[test]
    fn top_grades_share_the_urgent_recommendation() {
        let severe = recommendation(SeverityLevel::Severe);
        assert_eq!(severe, recommendation(SeverityLevel::Proliferative));
        assert!(severe.contains("URGENT"));
    }

    #[test]
    fn lower_grades_each_get_their_own_text() {
        let texts = [
            recommendation(SeverityLevel::Healthy),
            recommendation(SeverityLevel::Mild),
            recommendation(SeverityLevel::Moderate),
        ];
        assert!(texts[0].contains("annual"));
        assert!(texts[1].contains("6 months"));
        assert!(texts[2].contains("3 months"));
    }
}
