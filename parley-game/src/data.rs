//! Trader and trade-item definitions consumed at session start.
//!
//! The editor/persistence layer produces these values from its own flat-file
//! format; the engine only sees the parsed shapes below.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single tradeable good in a trader's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeItem {
    pub name: String,
    #[serde(default)]
    pub gold_cost: i32,
    #[serde(default)]
    pub food_restore: i32,
    #[serde(default)]
    pub water_restore: i32,
}

/// The five canned lines a trader can speak.
///
/// Every trader always carries all five; an empty string is a valid, if
/// unhelpful, value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DialogueSet {
    #[serde(default)]
    pub encounter: String,
    #[serde(default)]
    pub trade_event: String,
    #[serde(default)]
    pub positive: String,
    #[serde(default)]
    pub leave_trade: String,
    #[serde(default)]
    pub aggro: String,
}

/// Key selecting one of the trader's canned dialogue lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueTag {
    Encounter,
    TradeEvent,
    Positive,
    LeaveTrade,
    Aggro,
}

impl DialogueTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Encounter => "encounter",
            Self::TradeEvent => "trade_event",
            Self::Positive => "positive",
            Self::LeaveTrade => "leave_trade",
            Self::Aggro => "aggro",
        }
    }
}

impl fmt::Display for DialogueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialogueTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "encounter" => Ok(Self::Encounter),
            "trade_event" => Ok(Self::TradeEvent),
            "positive" => Ok(Self::Positive),
            "leave_trade" => Ok(Self::LeaveTrade),
            "aggro" => Ok(Self::Aggro),
            _ => Err(()),
        }
    }
}

impl DialogueSet {
    /// Pure lookup; no fallback logic is needed because all five lines
    /// always exist.
    #[must_use]
    pub fn line(&self, tag: DialogueTag) -> &str {
        match tag {
            DialogueTag::Encounter => &self.encounter,
            DialogueTag::TradeEvent => &self.trade_event,
            DialogueTag::Positive => &self.positive,
            DialogueTag::LeaveTrade => &self.leave_trade,
            DialogueTag::Aggro => &self.aggro,
        }
    }
}

/// Behavioral tuning for one trader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderBehavior {
    /// Consecutive rejections tolerated before hostility may trigger.
    #[serde(default = "TraderBehavior::default_max_offers_before_decline")]
    pub max_offers_before_decline: i32,
    #[serde(default)]
    pub aggro_on_max_reject: bool,
    /// Base theft success rate in `[0.0, 1.0]`; scaled by player strength.
    #[serde(default = "TraderBehavior::default_steal_success_rate")]
    pub steal_success_rate: f64,
    #[serde(default)]
    pub strength_penalty: i32,
    #[serde(default)]
    pub water_penalty: i32,
    #[serde(default)]
    pub food_penalty: i32,
    /// Whether the trader starts the session already hostile.
    #[serde(default)]
    pub is_aggro: bool,
}

impl TraderBehavior {
    const fn default_max_offers_before_decline() -> i32 {
        3
    }

    const fn default_steal_success_rate() -> f64 {
        0.25
    }

    /// Validate behavioral invariants before sanitization.
    ///
    /// # Errors
    ///
    /// Returns `TraderConfigError` when any field violates the documented
    /// bounds.
    pub fn validate(&self) -> Result<(), TraderConfigError> {
        if self.max_offers_before_decline < 1 {
            return Err(TraderConfigError::MinViolation {
                field: "behavior.max_offers_before_decline",
                min: 1.0,
                value: f64::from(self.max_offers_before_decline),
            });
        }
        if !(0.0..=1.0).contains(&self.steal_success_rate) {
            return Err(TraderConfigError::RangeViolation {
                field: "behavior.steal_success_rate",
                min: 0.0,
                max: 1.0,
                value: self.steal_success_rate,
            });
        }
        for (field, value) in [
            ("behavior.strength_penalty", self.strength_penalty),
            ("behavior.water_penalty", self.water_penalty),
            ("behavior.food_penalty", self.food_penalty),
        ] {
            if value < 0 {
                return Err(TraderConfigError::MinViolation {
                    field,
                    min: 0.0,
                    value: f64::from(value),
                });
            }
        }
        Ok(())
    }

    pub fn sanitize(&mut self) {
        self.max_offers_before_decline = self.max_offers_before_decline.max(1);
        if !self.steal_success_rate.is_finite() {
            self.steal_success_rate = Self::default_steal_success_rate();
        }
        self.steal_success_rate = self.steal_success_rate.clamp(0.0, 1.0);
        self.strength_penalty = self.strength_penalty.max(0);
        self.water_penalty = self.water_penalty.max(0);
        self.food_penalty = self.food_penalty.max(0);
    }
}

impl Default for TraderBehavior {
    fn default() -> Self {
        Self {
            max_offers_before_decline: Self::default_max_offers_before_decline(),
            aggro_on_max_reject: false,
            steal_success_rate: Self::default_steal_success_rate(),
            strength_penalty: 0,
            water_penalty: 0,
            food_penalty: 0,
            is_aggro: false,
        }
    }
}

/// Immutable trader snapshot consumed at session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trader {
    pub name: String,
    #[serde(default)]
    pub dialogue: DialogueSet,
    #[serde(default)]
    pub behavior: TraderBehavior,
    #[serde(default)]
    pub items: Vec<TradeItem>,
}

impl Trader {
    /// Select one of the trader's canned dialogue lines.
    #[must_use]
    pub fn line(&self, tag: DialogueTag) -> &str {
        self.dialogue.line(tag)
    }

    /// Validate the trader definition, including its catalog.
    ///
    /// # Errors
    ///
    /// Returns `TraderConfigError` on out-of-range behavior parameters,
    /// negative item values, or duplicate item names.
    pub fn validate(&self) -> Result<(), TraderConfigError> {
        self.behavior.validate()?;
        for (idx, item) in self.items.iter().enumerate() {
            for (field, value) in [
                ("gold_cost", item.gold_cost),
                ("food_restore", item.food_restore),
                ("water_restore", item.water_restore),
            ] {
                if value < 0 {
                    return Err(TraderConfigError::ItemMinViolation {
                        item: item.name.clone(),
                        field,
                        value,
                    });
                }
            }
            if self.items[..idx].iter().any(|other| other.name == item.name) {
                return Err(TraderConfigError::DuplicateItem {
                    trader: self.name.clone(),
                    item: item.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Container for all trader definitions known to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TraderData {
    pub traders: Vec<Trader>,
}

impl TraderData {
    /// Create empty trader data (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            traders: Vec::new(),
        }
    }

    /// Load trader data from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid trader data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create trader data from pre-parsed traders
    #[must_use]
    pub fn from_traders(traders: Vec<Trader>) -> Self {
        Self { traders }
    }

    /// Look a trader up by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Trader> {
        self.traders.iter().find(|trader| trader.name == name)
    }
}

/// Errors raised when a trader definition violates its invariants.
///
/// These indicate a bug in the authoring layer, never a player action.
#[derive(Debug, Error, PartialEq)]
pub enum TraderConfigError {
    #[error("{field} must be at least {min:.2} (got {value:.2})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("item {item} field {field} must be non-negative (got {value})")]
    ItemMinViolation {
        item: String,
        field: &'static str,
        value: i32,
    },
    #[error("trader {trader} lists item {item} more than once")]
    DuplicateItem { trader: String, item: String },
    #[error("no trader named {name}")]
    UnknownTrader { name: String },
}
