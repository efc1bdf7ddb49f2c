pub mod memory;

pub use memory::InMemoryStore;

use crate::types::CalculationResult;
use crate::FootprintResult;

/// Persistence gateway for calculation records. The core treats this as an
/// external collaborator: it owns id uniqueness and atomicity of the full
/// result graph.
pub trait CalculationStore {
    /// Write-once. Persisting a second record with the same calculation id
    /// is a storage failure.
    fn persist(&self, result: &CalculationResult) -> FootprintResult<()>;

    fn get(&self, calculation_id: &str) -> FootprintResult<Option<CalculationResult>>;

    /// History, optionally filtered by trial and/or user, newest first.
    fn list(
        &self,
        trial_id: Option<&str>,
        user_id: Option<&str>,
    ) -> FootprintResult<Vec<CalculationResult>>;
}
