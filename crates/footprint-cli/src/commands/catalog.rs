use clap::Args;
use serde_json::Value;

use footprint_core::factors::{FactorCatalog, InMemoryFactorCatalog};
use footprint_core::mitigation::{InMemoryStrategyCatalog, StrategyCatalog};
use footprint_core::types::{EmissionFactor, MitigationStrategy};

use crate::input;

/// Arguments for listing emission factors
#[derive(Args)]
pub struct FactorsArgs {
    /// Path to a JSON file holding an array of emission factors
    #[arg(long)]
    pub input: Option<String>,

    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by exact activity type
    #[arg(long)]
    pub activity_type: Option<String>,
}

/// Arguments for listing mitigation strategies
#[derive(Args)]
pub struct StrategiesArgs {
    /// Path to a JSON file holding an array of mitigation strategies
    #[arg(long)]
    pub input: Option<String>,

    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by cost category
    #[arg(long)]
    pub cost_category: Option<String>,

    /// Filter by implementation difficulty
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Query applicability for one activity type instead of listing;
    /// results come back ordered by potential reduction
    #[arg(long)]
    pub activity_type: Option<String>,
}

pub fn run_factors(args: FactorsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let factors: Vec<EmissionFactor> =
        input::read_input(args.input.as_deref(), "factor listing")?;
    let catalog = InMemoryFactorCatalog::new(factors);

    let listed = catalog.list(args.category.as_deref(), args.activity_type.as_deref());
    Ok(serde_json::to_value(listed)?)
}

pub fn run_strategies(args: StrategiesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let strategies: Vec<MitigationStrategy> =
        input::read_input(args.input.as_deref(), "strategy listing")?;
    let catalog = InMemoryStrategyCatalog::new(strategies);

    let listed = match args.activity_type.as_deref() {
        Some(activity_type) => catalog.find_for_activity(activity_type),
        None => catalog.list(
            args.category.as_deref(),
            args.cost_category.as_deref(),
            args.difficulty.as_deref(),
        ),
    };
    Ok(serde_json::to_value(listed)?)
}
