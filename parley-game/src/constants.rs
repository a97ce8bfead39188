//! Centralized balance and tuning constants for Parley negotiation logic.
//!
//! These values define the deterministic math for the core exchange rules.
//! Keeping them together ensures that trading balance can only be adjusted
//! via code changes reviewed in version control, rather than through
//! external JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const DEBUG_ENV_VAR: &str = "PARLEY_DEBUG_LOGS";
pub(crate) const LOG_TRADE_BOUGHT: &str = "log.trade.bought";
pub(crate) const LOG_TRADE_INSUFFICIENT_GOLD: &str = "log.trade.insufficient-gold";
pub(crate) const LOG_TRADE_NO_OFFERS: &str = "log.trade.no-offers";
pub(crate) const LOG_TRADE_DECLINED: &str = "log.trade.declined";
pub(crate) const LOG_TRADE_AGGRO: &str = "log.trade.aggro";
pub(crate) const LOG_TRADE_HOSTILE_REFUSAL: &str = "log.trade.hostile-refusal";
pub(crate) const LOG_TRADE_LEFT: &str = "log.trade.left";
pub(crate) const LOG_OFFER_NEXT: &str = "log.offer.next";
pub(crate) const LOG_THEFT_SUCCESS: &str = "log.theft.success";
pub(crate) const LOG_THEFT_NOTICED: &str = "log.theft.noticed";
pub(crate) const LOG_THEFT_CAUGHT: &str = "log.theft.caught";
pub(crate) const LOG_SESSION_ENDED: &str = "log.session.ended";

// Event tags ---------------------------------------------------------------
pub(crate) const TAG_PENALTY: &str = "penalty";
pub(crate) const TAG_THEFT: &str = "theft";

// Ledger bounds ------------------------------------------------------------
pub(crate) const FOOD_MAX: i32 = 100;
pub(crate) const WATER_MAX: i32 = 100;
pub(crate) const RESOURCE_FLOOR: i32 = 0;

// Theft tuning -------------------------------------------------------------
pub(crate) const THEFT_STRENGTH_DIVISOR: f64 = 10.0;
pub(crate) const THEFT_NOTICE_CHANCE: f64 = 0.30;
pub(crate) const ESCALATION_ROLL_CHANCE: f64 = 0.30;

// Probability bounds -------------------------------------------------------
pub(crate) const PROBABILITY_FLOOR: f64 = 0.0;
pub(crate) const PROBABILITY_MAX: f64 = 1.0;

#[cfg(test)]
pub(crate) const FLOAT_EPSILON: f64 = 1e-9;
