use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Activity quantities (km, kWh, hours...). Wraps Decimal to prevent
/// accidental f64 usage.
pub type Quantity = Decimal;

/// Emissions in kg CO2e.
pub type Emissions = Decimal;

/// Percentages expressed on a 0-100 scale.
pub type Percentage = Decimal;

/// Per-unit emission rate (kg CO2e per unit-quantity).
pub type Factor = Decimal;

/// Reporting unit for every calculation total.
pub const EMISSIONS_UNIT: &str = "kg CO2e";

/// A single user-supplied activity. Transient — it has no identity of its
/// own and is discarded once the calculation is assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub activity_type: String,
    pub quantity: Quantity,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A per-unit emission rate keyed by (activity_type, unit).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmissionFactor {
    pub category: String,
    pub sub_category: String,
    pub activity_type: String,
    /// kg CO2e per unit-quantity
    pub value: Factor,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Provenance of the rate, e.g. "DEFRA 2024"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// A recommended action expected to reduce emissions for one or more
/// activity types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MitigationStrategy {
    pub strategy_name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_steps: Option<String>,
    /// Expected reduction as a percentage (0-100)
    pub potential_reduction_pct: Percentage,
    /// "Low", "Medium", "High"
    pub cost_category: String,
    /// "Easy", "Moderate", "Complex"
    pub implementation_difficulty: String,
    /// Exact activity-type tokens this strategy applies to. Matching is
    /// set membership, never substring containment.
    pub applicable_activities: Vec<String>,
}

/// Severity bucket of a hotspot's share of total emissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// Per-activity slice of the footprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityBreakdown {
    pub activity_type: String,
    pub quantity: Quantity,
    pub unit: String,
    pub emission_factor: Factor,
    /// quantity * emission_factor
    pub calculated_emissions: Emissions,
    /// Share of total emissions (0-100); 0 when the total is 0
    pub percentage: Percentage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An activity ranked by its contribution to total emissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotspot {
    pub activity_type: String,
    pub emissions: Emissions,
    pub percentage: Percentage,
    pub severity: Severity,
    pub recommendation: String,
}

/// Projection of a catalog strategy attached to one calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedStrategy {
    pub strategy_name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_reduction_pct: Option<Percentage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_steps: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationStatus {
    Completed,
    Failed,
}

/// Input to one footprint calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub trial_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation_name: Option<String>,
    pub activities: Vec<Activity>,
}

/// Aggregate root produced once per calculation. Owns its breakdown,
/// hotspot, and strategy lists by value; immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    pub calculation_id: String,
    pub trial_id: String,
    pub user_id: String,
    pub calculation_name: String,
    pub total_emissions: Emissions,
    /// Always "kg CO2e"
    pub unit: String,
    pub calculated_at: DateTime<Utc>,
    pub status: CalculationStatus,
    pub breakdown: Vec<ActivityBreakdown>,
    pub hotspots: Vec<Hotspot>,
    pub strategies: Vec<RecommendedStrategy>,
    /// Populated only when status is Failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl CalculationResult {
    /// Record of a run that failed after admission. Carries the failure
    /// reason so a collaborator never stores a misleading Completed row.
    pub fn failed(
        calculation_id: String,
        request: &CalculationRequest,
        calculated_at: DateTime<Utc>,
        error_message: String,
    ) -> Self {
        Self {
            calculation_id,
            trial_id: request.trial_id.clone(),
            user_id: request.user_id.clone(),
            calculation_name: request
                .calculation_name
                .clone()
                .unwrap_or_else(|| format!("Calculation {}", calculated_at.format("%Y-%m-%d"))),
            total_emissions: Decimal::ZERO,
            unit: EMISSIONS_UNIT.to_string(),
            calculated_at,
            status: CalculationStatus::Failed,
            breakdown: Vec::new(),
            hotspots: Vec::new(),
            strategies: Vec::new(),
            error_message: Some(error_message),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
