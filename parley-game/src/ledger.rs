//! Player resource counters and the single clamped mutation path.

use serde::{Deserialize, Serialize};

use crate::constants::{FOOD_MAX, RESOURCE_FLOOR, WATER_MAX};

/// The player's bounded resource counters for one negotiation session.
///
/// Food and water are percentages clamped to `[0, 100]`; gold and strength
/// have no upper cap but never drop below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub gold: i32,
    pub food: i32,
    pub water: i32,
    pub strength: i32,
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self {
            gold: 100,
            food: 50,
            water: 50,
            strength: 10,
        }
    }
}

/// A signed adjustment applied to the ledger in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResourceDelta {
    #[serde(default)]
    pub gold: i32,
    #[serde(default)]
    pub food: i32,
    #[serde(default)]
    pub water: i32,
    #[serde(default)]
    pub strength: i32,
}

impl ResourceLedger {
    /// Construct a ledger from host-supplied starting values, clamped into
    /// bounds.
    #[must_use]
    pub fn seeded(gold: i32, food: i32, water: i32, strength: i32) -> Self {
        let mut ledger = Self {
            gold,
            food,
            water,
            strength,
        };
        ledger.clamp();
        ledger
    }

    /// Apply a delta field-wise. Each counter saturates at its bounds;
    /// overdraws are absorbed, never signaled.
    pub fn apply(&mut self, delta: &ResourceDelta) {
        self.gold = self.gold.saturating_add(delta.gold);
        self.food = self.food.saturating_add(delta.food);
        self.water = self.water.saturating_add(delta.water);
        self.strength = self.strength.saturating_add(delta.strength);
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.gold = self.gold.max(RESOURCE_FLOOR);
        self.food = self.food.clamp(RESOURCE_FLOOR, FOOD_MAX);
        self.water = self.water.clamp(RESOURCE_FLOOR, WATER_MAX);
        self.strength = self.strength.max(RESOURCE_FLOOR);
    }
}
