use serde::Serialize;

use crate::calculator::calculate_footprint;
use crate::factors::FactorCatalog;
use crate::mitigation::StrategyCatalog;
use crate::runtime::{Clock, IdSource};
use crate::store::CalculationStore;
use crate::types::{CalculationRequest, CalculationResult, ComputationOutput};
use crate::FootprintResult;

/// Outcome of a calculate-and-persist round trip. A storage failure does
/// not discard the computed result; it is flagged here instead so the
/// caller can distinguish computation errors from persistence errors.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationOutcome {
    pub output: ComputationOutput<CalculationResult>,
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_error: Option<String>,
}

/// Facade bundling the calculator's collaborators: factor and strategy
/// catalogs, the persistence gateway, and the id/clock capabilities.
pub struct FootprintService<F, S, St, I, C>
where
    F: FactorCatalog,
    S: StrategyCatalog,
    St: CalculationStore,
    I: IdSource,
    C: Clock,
{
    pub factors: F,
    pub strategies: S,
    pub store: St,
    pub ids: I,
    pub clock: C,
}

impl<F, S, St, I, C> FootprintService<F, S, St, I, C>
where
    F: FactorCatalog,
    S: StrategyCatalog,
    St: CalculationStore,
    I: IdSource,
    C: Clock,
{
    pub fn new(factors: F, strategies: S, store: St, ids: I, clock: C) -> Self {
        Self {
            factors,
            strategies,
            store,
            ids,
            clock,
        }
    }

    /// Run the pipeline and persist the result. Validation and lookup
    /// failures return `Err` and persist nothing; storage failures are
    /// flagged on the outcome while the in-memory result is still returned.
    pub fn calculate(&self, request: &CalculationRequest) -> FootprintResult<CalculationOutcome> {
        let output = calculate_footprint(
            request,
            &self.factors,
            &self.strategies,
            &self.ids,
            &self.clock,
        )?;

        match self.store.persist(&output.result) {
            Ok(()) => Ok(CalculationOutcome {
                output,
                persisted: true,
                storage_error: None,
            }),
            Err(e) => Ok(CalculationOutcome {
                output,
                persisted: false,
                storage_error: Some(e.to_string()),
            }),
        }
    }

    pub fn get_calculation(&self, calculation_id: &str) -> FootprintResult<Option<CalculationResult>> {
        self.store.get(calculation_id)
    }

    pub fn list_calculations(
        &self,
        trial_id: Option<&str>,
        user_id: Option<&str>,
    ) -> FootprintResult<Vec<CalculationResult>> {
        self.store.list(trial_id, user_id)
    }
}
