use rust_decimal::Decimal;
use std::collections::HashSet;
use std::time::Instant;

use crate::calculator::severity::recommendation;
use crate::error::FootprintError;
use crate::factors::FactorCatalog;
use crate::mitigation::StrategyCatalog;
use crate::runtime::{Clock, IdSource};
use crate::types::{
    with_metadata, ActivityBreakdown, CalculationRequest, CalculationResult, CalculationStatus,
    ComputationOutput, Hotspot, RecommendedStrategy, Severity, EMISSIONS_UNIT,
};
use crate::FootprintResult;

/// Top mitigation strategies fetched per High/Critical hotspot.
const STRATEGIES_PER_HOTSPOT: usize = 2;

/// Run the full footprint pipeline for one request: resolve factors,
/// aggregate emissions, rank hotspots, and attach deduplicated mitigation
/// strategies. All-or-nothing — an unresolvable factor aborts the whole
/// calculation and no partial result is produced.
pub fn calculate_footprint(
    request: &CalculationRequest,
    factors: &impl FactorCatalog,
    strategies: &impl StrategyCatalog,
    ids: &impl IdSource,
    clock: &impl Clock,
) -> FootprintResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // -- Validation ----------------------------------------------------------
    validate_request(request)?;

    // -- Resolve factors and aggregate (input order) --------------------------
    let mut breakdown: Vec<ActivityBreakdown> = Vec::with_capacity(request.activities.len());
    let mut total_emissions = Decimal::ZERO;

    for activity in &request.activities {
        let factor = factors
            .find_active(&activity.activity_type, &activity.unit)
            .ok_or_else(|| FootprintError::FactorNotFound {
                activity_type: activity.activity_type.clone(),
                unit: activity.unit.clone(),
            })?;

        if activity.quantity.is_zero() {
            warnings.push(format!(
                "Activity '{}' has zero quantity and contributes no emissions.",
                activity.activity_type
            ));
        }

        let calculated_emissions = activity.quantity * factor.value;
        total_emissions += calculated_emissions;

        breakdown.push(ActivityBreakdown {
            activity_type: activity.activity_type.clone(),
            quantity: activity.quantity,
            unit: activity.unit.clone(),
            emission_factor: factor.value,
            calculated_emissions,
            percentage: Decimal::ZERO,
            description: activity.description.clone(),
        });
    }

    // -- Percentages ----------------------------------------------------------
    if total_emissions.is_zero() {
        warnings.push("Total emissions are zero; all percentages reported as 0.".to_string());
    } else {
        for entry in &mut breakdown {
            entry.percentage = entry.calculated_emissions / total_emissions * Decimal::ONE_HUNDRED;
        }
    }

    // -- Hotspots (one per activity, ranked by share) --------------------------
    let mut hotspots: Vec<Hotspot> = breakdown
        .iter()
        .map(|entry| {
            let severity = Severity::from_percentage(entry.percentage);
            Hotspot {
                activity_type: entry.activity_type.clone(),
                emissions: entry.calculated_emissions,
                percentage: entry.percentage,
                severity,
                recommendation: recommendation(severity, &entry.activity_type),
            }
        })
        .collect();
    // Stable: ties keep input order
    hotspots.sort_by(|a, b| b.percentage.cmp(&a.percentage));

    // -- Strategies for High/Critical hotspots, deduplicated ------------------
    let recommended = collect_strategies(&hotspots, strategies);

    // -- Assemble -------------------------------------------------------------
    let calculated_at = clock.now();
    let result = CalculationResult {
        calculation_id: ids.next_calculation_id(),
        trial_id: request.trial_id.clone(),
        user_id: request.user_id.clone(),
        calculation_name: request
            .calculation_name
            .clone()
            .unwrap_or_else(|| format!("Calculation {}", calculated_at.format("%Y-%m-%d"))),
        total_emissions,
        unit: EMISSIONS_UNIT.to_string(),
        calculated_at,
        status: CalculationStatus::Completed,
        breakdown,
        hotspots,
        strategies: recommended,
        error_message: None,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "emissions_unit": EMISSIONS_UNIT,
        "severity_thresholds": { "critical": 50, "high": 25, "medium": 10 },
        "strategies_per_hotspot": STRATEGIES_PER_HOTSPOT,
        "factor_matching": "exact (activity_type, unit) among active factors",
        "activity_count": request.activities.len()
    });

    Ok(with_metadata(
        "Activity-based carbon footprint (factor × quantity aggregation)",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

fn validate_request(request: &CalculationRequest) -> FootprintResult<()> {
    if request.trial_id.trim().is_empty() {
        return Err(FootprintError::InvalidInput {
            field: "trial_id".into(),
            reason: "Trial id must not be empty.".into(),
        });
    }
    if request.user_id.trim().is_empty() {
        return Err(FootprintError::InvalidInput {
            field: "user_id".into(),
            reason: "User id must not be empty.".into(),
        });
    }
    if request.activities.is_empty() {
        return Err(FootprintError::InvalidInput {
            field: "activities".into(),
            reason: "At least one activity is required.".into(),
        });
    }
    for (index, activity) in request.activities.iter().enumerate() {
        if activity.activity_type.trim().is_empty() {
            return Err(FootprintError::InvalidInput {
                field: format!("activities[{index}].activity_type"),
                reason: "Activity type must not be empty.".into(),
            });
        }
        if activity.unit.trim().is_empty() {
            return Err(FootprintError::InvalidInput {
                field: format!("activities[{index}].unit"),
                reason: "Unit must not be empty.".into(),
            });
        }
        if activity.quantity < Decimal::ZERO {
            return Err(FootprintError::InvalidInput {
                field: format!("activities[{index}].quantity"),
                reason: "Quantity must be non-negative.".into(),
            });
        }
    }
    Ok(())
}

/// Fetch the top strategies for each High/Critical hotspot in ranked order
/// and deduplicate by strategy identity. First occurrence wins, so a
/// strategy stays attached to the highest-percentage hotspot it serves.
fn collect_strategies(
    hotspots: &[Hotspot],
    catalog: &impl StrategyCatalog,
) -> Vec<RecommendedStrategy> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut recommended: Vec<RecommendedStrategy> = Vec::new();

    for hotspot in hotspots.iter().filter(|h| h.severity.warrants_mitigation()) {
        for strategy in catalog
            .find_for_activity(&hotspot.activity_type)
            .into_iter()
            .take(STRATEGIES_PER_HOTSPOT)
        {
            if seen.insert(strategy.strategy_name.clone()) {
                recommended.push(RecommendedStrategy {
                    strategy_name: strategy.strategy_name,
                    category: strategy.category,
                    description: strategy.description,
                    potential_reduction_pct: Some(strategy.potential_reduction_pct),
                    implementation_steps: strategy.implementation_steps,
                });
            }
        }
    }

    recommended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::InMemoryFactorCatalog;
    use crate::mitigation::InMemoryStrategyCatalog;
    use crate::runtime::{FixedClock, FixedIdSource};
    use crate::types::{Activity, EmissionFactor, MitigationStrategy};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn factor(activity_type: &str, unit: &str, value: Decimal) -> EmissionFactor {
        EmissionFactor {
            category: "Clinical".into(),
            sub_category: "General".into(),
            activity_type: activity_type.into(),
            value,
            unit: unit.into(),
            description: None,
            source: None,
            is_active: true,
            last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn strategy(name: &str, reduction: Decimal, applies_to: &[&str]) -> MitigationStrategy {
        MitigationStrategy {
            strategy_name: name.into(),
            category: "Transport".into(),
            description: Some("desc".into()),
            implementation_steps: None,
            potential_reduction_pct: reduction,
            cost_category: "Low".into(),
            implementation_difficulty: "Easy".into(),
            applicable_activities: applies_to.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    fn request(activities: Vec<Activity>) -> CalculationRequest {
        CalculationRequest {
            trial_id: "trial-1".into(),
            user_id: "user-1".into(),
            calculation_name: None,
            activities,
        }
    }

    fn activity(activity_type: &str, quantity: Decimal, unit: &str) -> Activity {
        Activity {
            activity_type: activity_type.into(),
            quantity,
            unit: unit.into(),
            description: None,
        }
    }

    fn fixtures() -> (InMemoryFactorCatalog, InMemoryStrategyCatalog, FixedIdSource, FixedClock) {
        let factors = InMemoryFactorCatalog::new(vec![
            factor("Patient Travel", "km", dec!(0.192)),
            factor("Equipment Usage", "hour", dec!(15.0)),
        ]);
        let strategies = InMemoryStrategyCatalog::new(vec![
            strategy("Remote consultations", dec!(40), &["Patient Travel"]),
            strategy("Equipment scheduling", dec!(25), &["Equipment Usage"]),
            strategy("Low-power mode", dec!(10), &["Equipment Usage"]),
        ]);
        let ids = FixedIdSource("calc-test-1".into());
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap());
        (factors, strategies, ids, clock)
    }

    #[test]
    fn reference_example_two_activities() {
        let (factors, strategies, ids, clock) = fixtures();
        let req = request(vec![
            activity("Patient Travel", dec!(100), "km"),
            activity("Equipment Usage", dec!(2), "hour"),
        ]);

        let output = calculate_footprint(&req, &factors, &strategies, &ids, &clock).unwrap();
        let result = output.result;

        assert_eq!(result.calculation_id, "calc-test-1");
        assert_eq!(result.total_emissions, dec!(49.2));
        assert_eq!(result.unit, "kg CO2e");
        assert_eq!(result.status, CalculationStatus::Completed);

        // Breakdown keeps input order; emissions are exact products
        assert_eq!(result.breakdown[0].calculated_emissions, dec!(19.2));
        assert_eq!(result.breakdown[1].calculated_emissions, dec!(30.0));

        // Hotspots ranked by share: Equipment Usage ~60.98%,
        // Patient Travel ~39.02%, both in the High band
        assert_eq!(result.hotspots[0].activity_type, "Equipment Usage");
        assert_eq!(result.hotspots[0].severity, Severity::High);
        assert_eq!(result.hotspots[1].activity_type, "Patient Travel");
        assert_eq!(result.hotspots[1].severity, Severity::High);

        let pct_sum: Decimal = result.breakdown.iter().map(|b| b.percentage).sum();
        assert!((pct_sum - dec!(100)).abs() < dec!(0.0001), "sum was {pct_sum}");
    }

    #[test]
    fn breakdown_sum_equals_total_exactly() {
        let (factors, strategies, ids, clock) = fixtures();
        let req = request(vec![
            activity("Patient Travel", dec!(33.33), "km"),
            activity("Equipment Usage", dec!(7.77), "hour"),
            activity("Patient Travel", dec!(0.01), "km"),
        ]);

        let result = calculate_footprint(&req, &factors, &strategies, &ids, &clock)
            .unwrap()
            .result;
        let sum: Decimal = result.breakdown.iter().map(|b| b.calculated_emissions).sum();
        assert_eq!(sum, result.total_emissions);
    }

    #[test]
    fn missing_factor_aborts_whole_calculation() {
        let (factors, strategies, ids, clock) = fixtures();
        let req = request(vec![
            activity("Patient Travel", dec!(100), "km"),
            activity("Anaesthetic Gases", dec!(3), "litre"),
        ]);

        let err = calculate_footprint(&req, &factors, &strategies, &ids, &clock).unwrap_err();
        match err {
            FootprintError::FactorNotFound { activity_type, unit } => {
                assert_eq!(activity_type, "Anaesthetic Gases");
                assert_eq!(unit, "litre");
            }
            other => panic!("expected FactorNotFound, got {other:?}"),
        }
    }

    #[test]
    fn empty_activity_list_rejected_before_computation() {
        let (factors, strategies, ids, clock) = fixtures();
        let req = request(vec![]);
        let err = calculate_footprint(&req, &factors, &strategies, &ids, &clock).unwrap_err();
        assert!(matches!(err, FootprintError::InvalidInput { ref field, .. } if field == "activities"));
    }

    #[test]
    fn negative_quantity_rejected() {
        let (factors, strategies, ids, clock) = fixtures();
        let req = request(vec![activity("Patient Travel", dec!(-1), "km")]);
        let err = calculate_footprint(&req, &factors, &strategies, &ids, &clock).unwrap_err();
        assert!(matches!(err, FootprintError::InvalidInput { .. }));
    }

    #[test]
    fn zero_quantity_yields_zero_total_and_low_severity() {
        let (factors, strategies, ids, clock) = fixtures();
        let req = request(vec![activity("Patient Travel", dec!(0), "km")]);

        let output = calculate_footprint(&req, &factors, &strategies, &ids, &clock).unwrap();
        let result = output.result;

        assert_eq!(result.total_emissions, Decimal::ZERO);
        assert_eq!(result.breakdown[0].percentage, Decimal::ZERO);
        assert_eq!(result.hotspots[0].severity, Severity::Low);
        assert!(result.strategies.is_empty());
        assert!(!output.warnings.is_empty());
    }

    #[test]
    fn hotspot_count_matches_activity_count_and_order_is_non_increasing() {
        let (factors, strategies, ids, clock) = fixtures();
        let req = request(vec![
            activity("Patient Travel", dec!(5), "km"),
            activity("Equipment Usage", dec!(10), "hour"),
            activity("Patient Travel", dec!(500), "km"),
        ]);

        let result = calculate_footprint(&req, &factors, &strategies, &ids, &clock)
            .unwrap()
            .result;
        assert_eq!(result.hotspots.len(), 3);
        for pair in result.hotspots.windows(2) {
            assert!(pair[0].percentage >= pair[1].percentage);
        }
    }

    #[test]
    fn strategies_deduplicated_across_hotspots() {
        let factors = InMemoryFactorCatalog::new(vec![
            factor("Patient Travel", "km", dec!(1)),
            factor("Staff Commuting", "km", dec!(1)),
        ]);
        // One strategy applies to both activity types
        let strategies = InMemoryStrategyCatalog::new(vec![strategy(
            "Shared shuttle",
            dec!(30),
            &["Patient Travel", "Staff Commuting"],
        )]);
        let ids = FixedIdSource("calc-test-2".into());
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap());

        // Both activities at 50% => both Critical => both fetch the strategy
        let req = request(vec![
            activity("Patient Travel", dec!(10), "km"),
            activity("Staff Commuting", dec!(10), "km"),
        ]);

        let result = calculate_footprint(&req, &factors, &strategies, &ids, &clock)
            .unwrap()
            .result;
        assert_eq!(result.strategies.len(), 1);
        assert_eq!(result.strategies[0].strategy_name, "Shared shuttle");
    }

    #[test]
    fn at_most_two_strategies_per_hotspot() {
        let factors = InMemoryFactorCatalog::new(vec![factor("Patient Travel", "km", dec!(1))]);
        let strategies = InMemoryStrategyCatalog::new(vec![
            strategy("A", dec!(50), &["Patient Travel"]),
            strategy("B", dec!(40), &["Patient Travel"]),
            strategy("C", dec!(30), &["Patient Travel"]),
        ]);
        let ids = FixedIdSource("calc-test-3".into());
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap());

        let req = request(vec![activity("Patient Travel", dec!(1), "km")]);
        let result = calculate_footprint(&req, &factors, &strategies, &ids, &clock)
            .unwrap()
            .result;

        // Single activity is 100% => Critical; top 2 by reduction
        let names: Vec<&str> = result.strategies.iter().map(|s| s.strategy_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn medium_and_low_hotspots_fetch_no_strategies() {
        let (factors, _, ids, clock) = fixtures();
        // Strategy applies to the dominant activity only; minor activity
        // never triggers a fetch even though it matches
        let strategies = InMemoryStrategyCatalog::new(vec![
            strategy("Minor fix", dec!(20), &["Patient Travel"]),
        ]);
        let req = request(vec![
            activity("Equipment Usage", dec!(100), "hour"), // dominates
            activity("Patient Travel", dec!(10), "km"),     // ~0.1%
        ]);

        let result = calculate_footprint(&req, &factors, &strategies, &ids, &clock)
            .unwrap()
            .result;
        assert!(result.strategies.is_empty());
    }

    #[test]
    fn calculation_name_defaults_from_clock_date() {
        let (factors, strategies, ids, clock) = fixtures();
        let req = request(vec![activity("Patient Travel", dec!(1), "km")]);
        let result = calculate_footprint(&req, &factors, &strategies, &ids, &clock)
            .unwrap()
            .result;
        assert_eq!(result.calculation_name, "Calculation 2024-06-15");
    }

    #[test]
    fn supplied_calculation_name_is_kept() {
        let (factors, strategies, ids, clock) = fixtures();
        let mut req = request(vec![activity("Patient Travel", dec!(1), "km")]);
        req.calculation_name = Some("Q2 clinic audit".into());
        let result = calculate_footprint(&req, &factors, &strategies, &ids, &clock)
            .unwrap()
            .result;
        assert_eq!(result.calculation_name, "Q2 clinic audit");
    }
}
