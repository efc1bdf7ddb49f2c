use super::StrategyCatalog;
use crate::types::MitigationStrategy;

/// Owned, in-memory strategy table.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStrategyCatalog {
    strategies: Vec<MitigationStrategy>,
}

impl InMemoryStrategyCatalog {
    pub fn new(strategies: Vec<MitigationStrategy>) -> Self {
        Self { strategies }
    }

    pub fn add(&mut self, strategy: MitigationStrategy) {
        self.strategies.push(strategy);
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl StrategyCatalog for InMemoryStrategyCatalog {
    fn find_for_activity(&self, activity_type: &str) -> Vec<MitigationStrategy> {
        let mut matches: Vec<MitigationStrategy> = self
            .strategies
            .iter()
            .filter(|s| {
                s.applicable_activities
                    .iter()
                    .any(|a| a == activity_type)
            })
            .cloned()
            .collect();
        // Stable: equal reductions keep catalog order
        matches.sort_by(|a, b| b.potential_reduction_pct.cmp(&a.potential_reduction_pct));
        matches
    }

    fn list(
        &self,
        category: Option<&str>,
        cost_category: Option<&str>,
        difficulty: Option<&str>,
    ) -> Vec<MitigationStrategy> {
        let mut result: Vec<MitigationStrategy> = self
            .strategies
            .iter()
            .filter(|s| category.map_or(true, |c| s.category == c))
            .filter(|s| cost_category.map_or(true, |c| s.cost_category == c))
            .filter(|s| difficulty.map_or(true, |d| s.implementation_difficulty == d))
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.strategy_name.cmp(&b.strategy_name))
        });
        result
    }
}
