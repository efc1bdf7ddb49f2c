use super::FactorCatalog;
use crate::types::EmissionFactor;

/// Owned, in-memory factor table. Backs tests, the CLI, and the bindings;
/// a relational store can implement [`FactorCatalog`] the same way.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFactorCatalog {
    factors: Vec<EmissionFactor>,
}

impl InMemoryFactorCatalog {
    pub fn new(factors: Vec<EmissionFactor>) -> Self {
        Self { factors }
    }

    pub fn add(&mut self, factor: EmissionFactor) {
        self.factors.push(factor);
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

fn by_category_then_type(a: &EmissionFactor, b: &EmissionFactor) -> std::cmp::Ordering {
    a.category
        .cmp(&b.category)
        .then_with(|| a.activity_type.cmp(&b.activity_type))
}

impl FactorCatalog for InMemoryFactorCatalog {
    fn find_active(&self, activity_type: &str, unit: &str) -> Option<EmissionFactor> {
        let mut matches: Vec<&EmissionFactor> = self
            .factors
            .iter()
            .filter(|f| f.is_active && f.activity_type == activity_type && f.unit == unit)
            .collect();
        // Deterministic winner when duplicates exist
        matches.sort_by(|a, b| by_category_then_type(a, b));
        matches.first().map(|f| (*f).clone())
    }

    fn list(&self, category: Option<&str>, activity_type: Option<&str>) -> Vec<EmissionFactor> {
        let mut result: Vec<EmissionFactor> = self
            .factors
            .iter()
            .filter(|f| f.is_active)
            .filter(|f| category.map_or(true, |c| f.category == c))
            .filter(|f| activity_type.map_or(true, |t| f.activity_type == t))
            .cloned()
            .collect();
        result.sort_by(by_category_then_type);
        result
    }
}
