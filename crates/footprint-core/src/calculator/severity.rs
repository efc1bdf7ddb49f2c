use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Severity;

const CRITICAL_THRESHOLD: Decimal = dec!(50);
const HIGH_THRESHOLD: Decimal = dec!(25);
const MEDIUM_THRESHOLD: Decimal = dec!(10);

impl Severity {
    /// Classify a hotspot's share of total emissions (0-100 scale).
    /// Pure — the only input is the percentage.
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage >= CRITICAL_THRESHOLD {
            Severity::Critical
        } else if percentage >= HIGH_THRESHOLD {
            Severity::High
        } else if percentage >= MEDIUM_THRESHOLD {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// High and Critical hotspots drive strategy selection.
    pub fn warrants_mitigation(self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Severity-toned recommendation text, parameterized by activity type.
pub fn recommendation(severity: Severity, activity_type: &str) -> String {
    match severity {
        Severity::Critical => format!(
            "Immediate action required. {activity_type} represents over 50% of total emissions."
        ),
        Severity::High => format!(
            "High priority for mitigation. Consider alternative approaches for {activity_type}."
        ),
        Severity::Medium => {
            format!("Moderate priority. Review {activity_type} for optimization opportunities.")
        }
        Severity::Low => format!("Low priority. Monitor {activity_type} for future optimization."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn boundary_values_classify_exactly() {
        assert_eq!(Severity::from_percentage(dec!(9.999)), Severity::Low);
        assert_eq!(Severity::from_percentage(dec!(10.0)), Severity::Medium);
        assert_eq!(Severity::from_percentage(dec!(24.999)), Severity::Medium);
        assert_eq!(Severity::from_percentage(dec!(25.0)), Severity::High);
        assert_eq!(Severity::from_percentage(dec!(49.999)), Severity::High);
        assert_eq!(Severity::from_percentage(dec!(50.0)), Severity::Critical);
        assert_eq!(Severity::from_percentage(dec!(100)), Severity::Critical);
        assert_eq!(Severity::from_percentage(Decimal::ZERO), Severity::Low);
    }

    #[test]
    fn only_high_and_critical_warrant_mitigation() {
        assert!(Severity::Critical.warrants_mitigation());
        assert!(Severity::High.warrants_mitigation());
        assert!(!Severity::Medium.warrants_mitigation());
        assert!(!Severity::Low.warrants_mitigation());
    }

    #[test]
    fn recommendation_names_the_activity() {
        let text = recommendation(Severity::Critical, "Equipment Usage");
        assert!(text.contains("Equipment Usage"));
        assert!(text.starts_with("Immediate action required"));
    }
}
