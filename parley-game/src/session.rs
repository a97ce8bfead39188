//! The negotiation state machine orchestrating one player/trader exchange.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::OfferCatalog;
use crate::constants::{
    DEBUG_ENV_VAR, LOG_OFFER_NEXT, LOG_SESSION_ENDED, LOG_THEFT_CAUGHT, LOG_THEFT_NOTICED,
    LOG_THEFT_SUCCESS, LOG_TRADE_AGGRO, LOG_TRADE_BOUGHT, LOG_TRADE_DECLINED,
    LOG_TRADE_HOSTILE_REFUSAL, LOG_TRADE_INSUFFICIENT_GOLD, LOG_TRADE_LEFT, LOG_TRADE_NO_OFFERS,
    TAG_PENALTY, TAG_THEFT,
};
use crate::data::{DialogueTag, Trader, TraderConfigError};
use crate::journal::{EventTag, LogEntry, SessionLog};
use crate::ledger::{ResourceDelta, ResourceLedger};
use crate::resolver::{self, NegotiationCfg};
use crate::rng::SessionRng;

#[cfg(debug_assertions)]
fn debug_log_enabled() -> bool {
    matches!(std::env::var(DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
const fn debug_log_enabled() -> bool {
    false
}

/// Where the exchange currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationState {
    /// Trader is willing to trade and not hostile.
    Offering,
    /// Trader is permanently aggro for the remainder of the session.
    Hostile,
    /// Player has left; terminal.
    Ended,
}

impl NegotiationState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Offering => "offering",
            Self::Hostile => "hostile",
            Self::Ended => "ended",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NegotiationState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offering" => Ok(Self::Offering),
            "hostile" => Ok(Self::Hostile),
            "ended" => Ok(Self::Ended),
            _ => Err(()),
        }
    }
}

/// A player action submitted to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Accept,
    Decline,
    Steal,
    Leave,
    NextOffer,
}

impl Intent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Decline => "decline",
            Self::Steal => "steal",
            Self::Leave => "leave",
            Self::NextOffer => "next_offer",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(Self::Accept),
            "decline" => Ok(Self::Decline),
            "steal" => Ok(Self::Steal),
            "leave" => Ok(Self::Leave),
            "next_offer" => Ok(Self::NextOffer),
            _ => Err(()),
        }
    }
}

/// How the session resolved one submitted intent.
///
/// Expected rejections (insufficient gold, no offers, hostile refusal,
/// session ended) are valid game-state outcomes, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentResolution {
    Traded,
    InsufficientGold,
    NoOffers,
    Declined,
    Escalated,
    TheftSucceeded,
    TheftNoticed,
    TheftFailed,
    HostileRefusal,
    OfferAdvanced,
    Left,
    SessionEnded,
}

/// Result returned to the caller for each submitted intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub resolution: IntentResolution,
    pub state: NegotiationState,
    /// Snapshot of the ledger after the intent was applied.
    pub ledger: ResourceLedger,
    /// The trader line for the caller to render.
    pub dialogue: String,
    /// The narrative event recorded for this intent, if any.
    pub log: Option<LogEntry>,
}

/// One player/trader exchange. Created fresh each time a trader is engaged
/// and discarded when the caller transitions away; never reused across
/// traders.
#[derive(Debug, Clone)]
pub struct NegotiationSession {
    trader: Trader,
    cfg: NegotiationCfg,
    catalog: OfferCatalog,
    ledger: ResourceLedger,
    log: SessionLog,
    rng: SessionRng,
    state: NegotiationState,
    rejection_count: i32,
}

impl NegotiationSession {
    /// Construct a session with default rule configuration.
    ///
    /// # Errors
    ///
    /// Returns `TraderConfigError` when the trader definition violates its
    /// invariants; this indicates an authoring-layer bug, not a player
    /// action.
    pub fn new(
        trader: Trader,
        ledger: ResourceLedger,
        seed: u64,
    ) -> Result<Self, TraderConfigError> {
        Self::with_config(trader, ledger, NegotiationCfg::default(), seed)
    }

    /// Construct a session with explicit rule configuration.
    ///
    /// # Errors
    ///
    /// Returns `TraderConfigError` when the trader definition or the rule
    /// configuration violates validation.
    pub fn with_config(
        trader: Trader,
        ledger: ResourceLedger,
        cfg: NegotiationCfg,
        seed: u64,
    ) -> Result<Self, TraderConfigError> {
        trader.validate()?;
        cfg.validate()?;
        let mut trader = trader;
        trader.behavior.sanitize();
        let mut cfg = cfg;
        cfg.sanitize();
        let mut ledger = ledger;
        ledger.clamp();
        let state = if trader.behavior.is_aggro {
            NegotiationState::Hostile
        } else {
            NegotiationState::Offering
        };
        let catalog = OfferCatalog::new(trader.items.clone());
        Ok(Self {
            trader,
            cfg,
            catalog,
            ledger,
            log: SessionLog::new(),
            rng: SessionRng::from_user_seed(seed),
            state,
            rejection_count: 0,
        })
    }

    #[must_use]
    pub const fn state(&self) -> NegotiationState {
        self.state
    }

    #[must_use]
    pub const fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    #[must_use]
    pub fn log(&self) -> &[LogEntry] {
        self.log.entries()
    }

    #[must_use]
    pub const fn rejection_count(&self) -> i32 {
        self.rejection_count
    }

    #[must_use]
    pub const fn trader(&self) -> &Trader {
        &self.trader
    }

    #[must_use]
    pub const fn catalog(&self) -> &OfferCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn config(&self) -> &NegotiationCfg {
        &self.cfg
    }

    /// The trader's opening line, for the caller to render at session start.
    #[must_use]
    pub fn greeting(&self) -> &str {
        self.trader.line(DialogueTag::Encounter)
    }

    /// Submit a player intent and advance the state machine.
    ///
    /// Invalid intents degrade to logged no-ops; the negotiation is
    /// player-facing and must never abort the session.
    pub fn submit(&mut self, intent: Intent) -> Outcome {
        let outcome = match self.state {
            NegotiationState::Ended => self.refuse_ended(),
            NegotiationState::Hostile => match intent {
                Intent::Leave => self.leave(),
                Intent::Accept | Intent::Decline | Intent::Steal | Intent::NextOffer => {
                    self.refuse_hostile()
                }
            },
            NegotiationState::Offering => match intent {
                Intent::Accept => self.accept(),
                Intent::Decline => self.decline(),
                Intent::Steal => self.steal(),
                Intent::Leave => self.leave(),
                Intent::NextOffer => self.next_offer(),
            },
        };
        if debug_log_enabled() {
            println!(
                "Negotiation | trader:{} intent:{} -> {} ({:?})",
                self.trader.name, intent, outcome.state, outcome.resolution
            );
        }
        outcome
    }

    fn accept(&mut self) -> Outcome {
        let picked = {
            let mut offer_rng = self.rng.offer();
            self.catalog.selected_or_random(&mut *offer_rng)
        };
        let Some(item) = picked else {
            return self.no_offers();
        };
        if self.ledger.gold < item.gold_cost {
            let entry = LogEntry::with_subject(LOG_TRADE_INSUFFICIENT_GOLD, &item.name);
            return self.record(IntentResolution::InsufficientGold, DialogueTag::TradeEvent, entry);
        }
        self.ledger.apply(&ResourceDelta {
            gold: -item.gold_cost,
            food: item.food_restore,
            water: item.water_restore,
            strength: 0,
        });
        let entry = LogEntry::with_subject(LOG_TRADE_BOUGHT, &item.name);
        self.record(IntentResolution::Traded, DialogueTag::Positive, entry)
    }

    fn decline(&mut self) -> Outcome {
        if self.catalog.is_empty() {
            return self.no_offers();
        }
        self.rejection_count = self.rejection_count.saturating_add(1);
        let aggro_on_max_reject = self.trader.behavior.aggro_on_max_reject;
        let threshold = self.trader.behavior.max_offers_before_decline;
        let escalated = {
            let mut temper_rng = self.rng.temper();
            resolver::hostility_triggered(
                self.cfg.escalation,
                aggro_on_max_reject,
                self.rejection_count,
                threshold,
                &mut *temper_rng,
            )
        };
        if escalated {
            self.state = NegotiationState::Hostile;
            let mut entry = LogEntry::with_subject(LOG_TRADE_AGGRO, &self.trader.name);
            self.apply_hostility_penalties(&mut entry);
            return self.record(IntentResolution::Escalated, DialogueTag::Aggro, entry);
        }
        let _ = self.catalog.next();
        let entry = LogEntry::new(LOG_TRADE_DECLINED);
        self.record(IntentResolution::Declined, DialogueTag::TradeEvent, entry)
    }

    fn steal(&mut self) -> Outcome {
        let picked = {
            let mut offer_rng = self.rng.offer();
            self.catalog.selected_or_random(&mut *offer_rng)
        };
        let Some(item) = picked else {
            return self.no_offers();
        };
        let succeeded = {
            let mut theft_rng = self.rng.theft();
            resolver::theft_succeeds(
                self.trader.behavior.steal_success_rate,
                self.ledger.strength,
                &mut *theft_rng,
            )
        };
        if !succeeded {
            self.state = NegotiationState::Hostile;
            let mut entry = LogEntry::with_subject(LOG_THEFT_CAUGHT, &item.name);
            entry.push_tag(EventTag::new(TAG_THEFT));
            self.apply_hostility_penalties(&mut entry);
            return self.record(IntentResolution::TheftFailed, DialogueTag::Aggro, entry);
        }
        // Theft bypasses cost: restores are credited, gold is untouched.
        self.ledger.apply(&ResourceDelta {
            gold: 0,
            food: item.food_restore,
            water: item.water_restore,
            strength: 0,
        });
        let noticed = {
            let mut notice_rng = self.rng.notice();
            resolver::theft_noticed(self.cfg.theft_notice_chance, &mut *notice_rng)
        };
        if noticed {
            self.state = NegotiationState::Hostile;
            let mut entry = LogEntry::with_subject(LOG_THEFT_NOTICED, &item.name);
            entry.push_tag(EventTag::new(TAG_THEFT));
            return self.record(IntentResolution::TheftNoticed, DialogueTag::Aggro, entry);
        }
        let mut entry = LogEntry::with_subject(LOG_THEFT_SUCCESS, &item.name);
        entry.push_tag(EventTag::new(TAG_THEFT));
        self.record(IntentResolution::TheftSucceeded, DialogueTag::Positive, entry)
    }

    fn leave(&mut self) -> Outcome {
        self.state = NegotiationState::Ended;
        let entry = LogEntry::with_subject(LOG_TRADE_LEFT, &self.trader.name);
        self.record(IntentResolution::Left, DialogueTag::LeaveTrade, entry)
    }

    fn next_offer(&mut self) -> Outcome {
        let Some(item) = self.catalog.next().cloned() else {
            return self.no_offers();
        };
        let entry = LogEntry::with_subject(LOG_OFFER_NEXT, &item.name);
        self.record(IntentResolution::OfferAdvanced, DialogueTag::TradeEvent, entry)
    }

    fn no_offers(&mut self) -> Outcome {
        let entry = LogEntry::new(LOG_TRADE_NO_OFFERS);
        self.record(IntentResolution::NoOffers, DialogueTag::TradeEvent, entry)
    }

    fn refuse_hostile(&mut self) -> Outcome {
        let entry = LogEntry::new(LOG_TRADE_HOSTILE_REFUSAL);
        self.record(IntentResolution::HostileRefusal, DialogueTag::Aggro, entry)
    }

    /// Terminal no-op: nothing is mutated and nothing is appended to the
    /// log, so repeated submits against an ended session are idempotent.
    fn refuse_ended(&self) -> Outcome {
        self.outcome(
            IntentResolution::SessionEnded,
            DialogueTag::LeaveTrade,
            Some(LogEntry::new(LOG_SESSION_ENDED)),
        )
    }

    /// The one shared penalty path, used by both rejection escalation and
    /// failed theft.
    fn apply_hostility_penalties(&mut self, entry: &mut LogEntry) {
        let behavior = &self.trader.behavior;
        let delta = ResourceDelta {
            gold: 0,
            food: -behavior.food_penalty,
            water: -behavior.water_penalty,
            strength: -behavior.strength_penalty,
        };
        self.ledger.apply(&delta);
        entry.push_tag(EventTag::new(TAG_PENALTY));
    }

    fn record(
        &mut self,
        resolution: IntentResolution,
        tag: DialogueTag,
        entry: LogEntry,
    ) -> Outcome {
        self.log.push(entry.clone());
        self.outcome(resolution, tag, Some(entry))
    }

    fn outcome(
        &self,
        resolution: IntentResolution,
        tag: DialogueTag,
        log: Option<LogEntry>,
    ) -> Outcome {
        Outcome {
            resolution,
            state: self.state,
            ledger: self.ledger,
            dialogue: self.trader.line(tag).to_string(),
            log,
        }
    }
}
