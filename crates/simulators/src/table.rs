use crate::{SimulatedOutcome, compliance, documents, liquidity, pricing, trading};
use fleet_core::{Bot, BotCategory, OperationKind};
use fleet_ports::{RandomSource, SimulationResult};
use std::collections::HashMap;

/// Signature every domain simulator implements
pub type SimulatorFn =
    fn(&Bot, OperationKind, &mut dyn RandomSource) -> SimulationResult<SimulatedOutcome>;

/// Category -> simulator lookup
///
/// `SimulatorTable::default()` registers the built-in simulator for every
/// category. Tests and extensions can register replacements.
#[derive(Clone)]
pub struct SimulatorTable {
    simulators: HashMap<BotCategory, SimulatorFn>,
}

impl SimulatorTable {
    /// Table with nothing registered
    pub fn empty() -> Self {
        Self {
            simulators: HashMap::new(),
        }
    }

    /// Register (or replace) the simulator for a category
    ///
    /// Returns the previously registered simulator, if any.
    pub fn register(
        &mut self,
        category: BotCategory,
        simulator: SimulatorFn,
    ) -> Option<SimulatorFn> {
        self.simulators.insert(category, simulator)
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, category: BotCategory, simulator: SimulatorFn) -> Self {
        self.register(category, simulator);
        self
    }

    pub fn get(&self, category: BotCategory) -> Option<SimulatorFn> {
        self.simulators.get(&category).copied()
    }

    pub fn contains(&self, category: BotCategory) -> bool {
        self.simulators.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.simulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulators.is_empty()
    }
}

impl Default for SimulatorTable {
    fn default() -> Self {
        Self::empty()
            .with(BotCategory::CreditTrader, trading::simulate)
            .with(BotCategory::LiquidityProvider, liquidity::simulate)
            .with(BotCategory::ComplianceMonitor, compliance::simulate)
            .with(BotCategory::PriceOracle, pricing::simulate)
            .with(BotCategory::DocumentProcessor, documents::simulate)
    }
}

impl std::fmt::Debug for SimulatorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut categories: Vec<_> = self.simulators.keys().collect();
        categories.sort();
        f.debug_struct("SimulatorTable")
            .field("categories", &categories)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeededRandom;
    use fleet_core::BotConfiguration;

    #[test]
    fn test_default_covers_every_category() {
        let table = SimulatorTable::default();
        assert_eq!(table.len(), BotCategory::ALL.len());

        let mut rng = SeededRandom::from_seed(42);
        for category in BotCategory::ALL {
            let bot = Bot::new(
                format!("{category}-bot"),
                "Bot",
                category,
                60,
                0.9,
                BotConfiguration::for_category(category),
            );
            let simulate = table.get(category).unwrap();
            for (kind, _) in category.operation_weights() {
                let outcome = simulate(&bot, *kind, &mut rng).unwrap();
                assert!(outcome.latency.as_millis() > 0);
            }
        }
    }

    #[test]
    fn test_register_replaces() {
        fn always_fails(
            bot: &Bot,
            _kind: OperationKind,
            _rng: &mut dyn RandomSource,
        ) -> SimulationResult<SimulatedOutcome> {
            Err(fleet_ports::SimulationError::Internal(format!("{} broke", bot.id)))
        }

        let mut table = SimulatorTable::default();
        let previous = table.register(BotCategory::PriceOracle, always_fails);
        assert!(previous.is_some());
        assert_eq!(table.len(), 5);

        let empty = SimulatorTable::empty();
        assert!(empty.is_empty());
        assert!(!empty.contains(BotCategory::PriceOracle));
    }
}
