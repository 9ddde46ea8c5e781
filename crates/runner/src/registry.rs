//! Bot registry
//!
//! Holds the fleet in registration order. Apart from counter bookkeeping by
//! the orchestrator, `configure` and the activation toggles are the only
//! mutation paths.

use fleet_core::{Bot, BotId, ConfigPatch, OperationKind, Timestamp};
use fleet_ports::RandomSource;

use crate::config::BotDefinition;

#[derive(Debug, Clone, Default)]
pub struct BotRegistry {
    bots: Vec<Bot>,
}

impl BotRegistry {
    pub fn new(bots: Vec<Bot>) -> Self {
        Self { bots }
    }

    pub fn from_definitions(definitions: &[BotDefinition]) -> Self {
        Self::new(definitions.iter().map(BotDefinition::to_bot).collect())
    }

    pub fn get(&self, bot_id: &str) -> Option<&Bot> {
        self.bots.iter().find(|b| b.id == bot_id)
    }

    pub fn get_mut(&mut self, bot_id: &str) -> Option<&mut Bot> {
        self.bots.iter_mut().find(|b| b.id == bot_id)
    }

    /// All bots, in registration order
    pub fn bots(&self) -> &[Bot] {
        &self.bots
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    /// Merge the patch into the bot's configuration
    ///
    /// Returns false (and changes nothing) for an unknown id.
    pub fn configure(&mut self, bot_id: &str, patch: &ConfigPatch) -> bool {
        match self.get_mut(bot_id) {
            Some(bot) => {
                bot.configuration.apply(patch);
                true
            }
            None => false,
        }
    }

    pub fn set_active(&mut self, bot_id: &str, active: bool) -> bool {
        match self.get_mut(bot_id) {
            Some(bot) => {
                bot.is_active = active;
                true
            }
            None => false,
        }
    }

    pub fn activate_all(&mut self) {
        self.bots.iter_mut().for_each(|b| b.is_active = true);
    }

    pub fn deactivate_all(&mut self) {
        self.bots.iter_mut().for_each(|b| b.is_active = false);
    }

    /// Ids of active bots whose interval has elapsed at `now`
    pub fn due_bots(&self, now: Timestamp) -> Vec<BotId> {
        self.bots
            .iter()
            .filter(|b| b.is_active && b.is_due(now))
            .map(|b| b.id.clone())
            .collect()
    }

    pub fn reset_counters(&mut self) {
        self.bots.iter_mut().for_each(Bot::reset_counters);
    }
}

/// Weighted draw over the bot category's operation table
pub fn select_operation_kind(bot: &Bot, rng: &mut dyn RandomSource) -> OperationKind {
    let weights = bot.category.operation_weights();
    let total: u32 = weights.iter().map(|(_, w)| w).sum();

    let mut roll = rng.next_f64() * total as f64;
    for (kind, weight) in weights {
        if roll < *weight as f64 {
            return *kind;
        }
        roll -= *weight as f64;
    }

    // Rounding at the top of the range lands on the last entry
    weights[weights.len() - 1].0
}
