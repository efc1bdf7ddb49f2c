use std::sync::RwLock;

use super::CalculationStore;
use crate::error::FootprintError;
use crate::types::CalculationResult;
use crate::FootprintResult;

/// Thread-safe in-memory store. Concurrent calculations only ever touch
/// shared state here, behind the lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<CalculationResult>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CalculationStore for InMemoryStore {
    fn persist(&self, result: &CalculationResult) -> FootprintResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| FootprintError::StorageFailure(format!("store lock poisoned: {e}")))?;
        if records
            .iter()
            .any(|r| r.calculation_id == result.calculation_id)
        {
            return Err(FootprintError::StorageFailure(format!(
                "calculation '{}' already persisted",
                result.calculation_id
            )));
        }
        records.push(result.clone());
        Ok(())
    }

    fn get(&self, calculation_id: &str) -> FootprintResult<Option<CalculationResult>> {
        let records = self
            .records
            .read()
            .map_err(|e| FootprintError::StorageFailure(format!("store lock poisoned: {e}")))?;
        Ok(records
            .iter()
            .find(|r| r.calculation_id == calculation_id)
            .cloned())
    }

    fn list(
        &self,
        trial_id: Option<&str>,
        user_id: Option<&str>,
    ) -> FootprintResult<Vec<CalculationResult>> {
        let records = self
            .records
            .read()
            .map_err(|e| FootprintError::StorageFailure(format!("store lock poisoned: {e}")))?;
        let mut result: Vec<CalculationResult> = records
            .iter()
            .filter(|r| trial_id.map_or(true, |t| r.trial_id == t))
            .filter(|r| user_id.map_or(true, |u| r.user_id == u))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.calculated_at.cmp(&a.calculated_at));
        Ok(result)
    }
}
