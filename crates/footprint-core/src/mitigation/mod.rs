pub mod catalog;

pub use catalog::InMemoryStrategyCatalog;

use crate::types::MitigationStrategy;

/// Read access to the mitigation strategy catalog.
pub trait StrategyCatalog {
    /// Strategies applicable to one activity type, ordered by potential
    /// reduction descending. Applicability is exact token membership in
    /// `applicable_activities` — "Travel" does not match "Patient Travel".
    /// Returns an empty list, never an error, when nothing matches.
    fn find_for_activity(&self, activity_type: &str) -> Vec<MitigationStrategy>;

    /// Catalog listing with optional filters, ordered by
    /// (category, strategy_name).
    fn list(
        &self,
        category: Option<&str>,
        cost_category: Option<&str>,
        difficulty: Option<&str>,
    ) -> Vec<MitigationStrategy>;
}
