use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use footprint_core::calculator::calculate_footprint;
use footprint_core::factors::InMemoryFactorCatalog;
use footprint_core::mitigation::InMemoryStrategyCatalog;
use footprint_core::runtime::{SystemClock, TimestampIdSource};
use footprint_core::types::{CalculationRequest, EmissionFactor, MitigationStrategy, Severity};

use crate::input;

/// Self-contained calculation input: the request plus the factor and
/// strategy catalogs to resolve it against.
#[derive(Debug, Deserialize)]
pub struct CalculateInput {
    pub request: CalculationRequest,
    pub emission_factors: Vec<EmissionFactor>,
    #[serde(default)]
    pub mitigation_strategies: Vec<MitigationStrategy>,
}

/// Arguments for footprint calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for severity classification
#[derive(Args)]
pub struct SeverityArgs {
    /// Percentage share of total emissions (0-100)
    #[arg(long)]
    pub percentage: Decimal,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input: CalculateInput =
        input::read_input(args.input.as_deref(), "footprint calculation")?;

    let factors = InMemoryFactorCatalog::new(calc_input.emission_factors);
    let strategies = InMemoryStrategyCatalog::new(calc_input.mitigation_strategies);
    let ids = TimestampIdSource::new();
    let clock = SystemClock;

    let result = calculate_footprint(&calc_input.request, &factors, &strategies, &ids, &clock)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_severity(args: SeverityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let severity = Severity::from_percentage(args.percentage);
    Ok(serde_json::json!({
        "percentage": args.percentage.to_string(),
        "severity": severity.as_str(),
        "warrants_mitigation": severity.warrants_mitigation(),
    }))
}
