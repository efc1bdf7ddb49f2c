pub mod catalog;

pub use catalog::InMemoryFactorCatalog;

use crate::types::EmissionFactor;

/// Read access to active emission factors.
///
/// Lookups are exact on both `activity_type` and `unit`. Absence is a
/// `None`, never a defaulted value — the calculator decides what a missing
/// factor means.
pub trait FactorCatalog {
    /// Find the active factor for (activity_type, unit). When more than
    /// one active row matches (a data-integrity issue), the first by
    /// (category, activity_type) ordering wins, deterministically.
    fn find_active(&self, activity_type: &str, unit: &str) -> Option<EmissionFactor>;

    /// Active factors, optionally filtered, ordered by
    /// (category, activity_type).
    fn list(&self, category: Option<&str>, activity_type: Option<&str>) -> Vec<EmissionFactor>;
}
