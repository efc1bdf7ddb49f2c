use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use footprint_core::calculator::calculate_footprint;
use footprint_core::factors::{FactorCatalog, InMemoryFactorCatalog};
use footprint_core::mitigation::{InMemoryStrategyCatalog, StrategyCatalog};
use footprint_core::runtime::{SystemClock, TimestampIdSource};
use footprint_core::types::{CalculationRequest, EmissionFactor, MitigationStrategy, Severity};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Request plus the catalogs to resolve it against. The JS side keeps the
/// factor and strategy tables; the engine stays stateless.
#[derive(Deserialize)]
struct CalculateInput {
    request: CalculationRequest,
    emission_factors: Vec<EmissionFactor>,
    #[serde(default)]
    mitigation_strategies: Vec<MitigationStrategy>,
}

#[derive(Deserialize)]
struct StrategiesForActivityInput {
    activity_type: String,
    mitigation_strategies: Vec<MitigationStrategy>,
}

#[derive(Deserialize)]
struct FactorListInput {
    emission_factors: Vec<EmissionFactor>,
    category: Option<String>,
    activity_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_footprint_json(input_json: String) -> NapiResult<String> {
    let input: CalculateInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let factors = InMemoryFactorCatalog::new(input.emission_factors);
    let strategies = InMemoryStrategyCatalog::new(input.mitigation_strategies);
    let ids = TimestampIdSource::new();

    let output = calculate_footprint(&input.request, &factors, &strategies, &ids, &SystemClock)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn classify_severity(percentage: String) -> NapiResult<String> {
    let pct: rust_decimal::Decimal = percentage.parse().map_err(to_napi_error)?;
    Ok(Severity::from_percentage(pct).as_str().to_string())
}

// ---------------------------------------------------------------------------
// Catalog queries
// ---------------------------------------------------------------------------

#[napi]
pub fn strategies_for_activity(input_json: String) -> NapiResult<String> {
    let input: StrategiesForActivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let catalog = InMemoryStrategyCatalog::new(input.mitigation_strategies);
    let matched = catalog.find_for_activity(&input.activity_type);
    serde_json::to_string(&matched).map_err(to_napi_error)
}

#[napi]
pub fn list_emission_factors(input_json: String) -> NapiResult<String> {
    let input: FactorListInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let catalog = InMemoryFactorCatalog::new(input.emission_factors);
    let listed = catalog.list(input.category.as_deref(), input.activity_type.as_deref());
    serde_json::to_string(&listed).map_err(to_napi_error)
}
