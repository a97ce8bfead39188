//! Probabilistic outcome evaluation for theft and hostility escalation.
//!
//! Every function here is total over its declared domain and takes the
//! random source as a parameter so sessions stay isolated and tests can
//! substitute a fixed-seed generator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ESCALATION_ROLL_CHANCE, PROBABILITY_FLOOR, PROBABILITY_MAX, THEFT_NOTICE_CHANCE,
    THEFT_STRENGTH_DIVISOR,
};
use crate::data::TraderConfigError;

/// Effective theft chance: base rate scaled by player strength, clamped to
/// a probability.
#[must_use]
pub fn theft_chance(steal_success_rate: f64, player_strength: i32) -> f64 {
    let scaled = steal_success_rate * (f64::from(player_strength) / THEFT_STRENGTH_DIVISOR);
    scaled.clamp(PROBABILITY_FLOOR, PROBABILITY_MAX)
}

/// Roll a theft attempt against the effective chance.
pub fn theft_succeeds<R: Rng>(
    steal_success_rate: f64,
    player_strength: i32,
    rng: &mut R,
) -> bool {
    rng.r#gen::<f64>() < theft_chance(steal_success_rate, player_strength)
}

/// Independent "trader noticed" roll after a successful theft.
///
/// Must stay a separate draw from the success check; folding the two
/// together changes the distribution.
pub fn theft_noticed<R: Rng>(chance: f64, rng: &mut R) -> bool {
    probability_roll(chance, rng)
}

fn probability_roll<R: Rng>(chance: f64, rng: &mut R) -> bool {
    let chance = chance.clamp(PROBABILITY_FLOOR, PROBABILITY_MAX);
    rng.r#gen::<f64>() < chance
}

/// How repeated rejection turns into hostility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EscalationRule {
    /// Hostility triggers once the rejection count reaches the trader's
    /// threshold. Deterministic and auditable.
    #[default]
    Threshold,
    /// Hostility is rolled on every rejection beyond the first.
    RandomRoll { chance: f64 },
}

/// Evaluate whether a rejection escalates into hostility.
///
/// `aggro_on_max_reject = false` vetoes escalation under either rule.
pub fn hostility_triggered<R: Rng>(
    rule: EscalationRule,
    aggro_on_max_reject: bool,
    rejection_count: i32,
    threshold: i32,
    rng: &mut R,
) -> bool {
    if !aggro_on_max_reject {
        return false;
    }
    match rule {
        EscalationRule::Threshold => rejection_count >= threshold,
        EscalationRule::RandomRoll { chance } => {
            rejection_count > 1 && probability_roll(chance, rng)
        }
    }
}

/// Session-level tuning for the configurable rule variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NegotiationCfg {
    #[serde(default)]
    pub escalation: EscalationRule,
    /// Chance that a trader notices a successful theft; `0.0` disables the
    /// second roll.
    #[serde(default = "NegotiationCfg::default_theft_notice_chance")]
    pub theft_notice_chance: f64,
}

impl NegotiationCfg {
    const fn default_theft_notice_chance() -> f64 {
        THEFT_NOTICE_CHANCE
    }

    /// A random-roll escalation config matching the classic 30% variant.
    #[must_use]
    pub const fn random_roll_variant() -> Self {
        Self {
            escalation: EscalationRule::RandomRoll {
                chance: ESCALATION_ROLL_CHANCE,
            },
            theft_notice_chance: Self::default_theft_notice_chance(),
        }
    }

    /// Validate configuration invariants before sanitization.
    ///
    /// # Errors
    ///
    /// Returns `TraderConfigError` when a probability leaves `[0.0, 1.0]`.
    pub fn validate(&self) -> Result<(), TraderConfigError> {
        if !(0.0..=1.0).contains(&self.theft_notice_chance) {
            return Err(TraderConfigError::RangeViolation {
                field: "cfg.theft_notice_chance",
                min: 0.0,
                max: 1.0,
                value: self.theft_notice_chance,
            });
        }
        if let EscalationRule::RandomRoll { chance } = self.escalation {
            if !(0.0..=1.0).contains(&chance) {
                return Err(TraderConfigError::RangeViolation {
                    field: "cfg.escalation.chance",
                    min: 0.0,
                    max: 1.0,
                    value: chance,
                });
            }
        }
        Ok(())
    }

    pub fn sanitize(&mut self) {
        if !self.theft_notice_chance.is_finite() {
            self.theft_notice_chance = Self::default_theft_notice_chance();
        }
        self.theft_notice_chance = self
            .theft_notice_chance
            .clamp(PROBABILITY_FLOOR, PROBABILITY_MAX);
        if let EscalationRule::RandomRoll { chance } = &mut self.escalation {
            if !chance.is_finite() {
                *chance = ESCALATION_ROLL_CHANCE;
            }
            *chance = chance.clamp(PROBABILITY_FLOOR, PROBABILITY_MAX);
        }
    }
}

impl Default for NegotiationCfg {
    fn default() -> Self {
        Self {
            escalation: EscalationRule::default(),
            theft_notice_chance: Self::default_theft_notice_chance(),
        }
    }
}
