//! Parley Negotiation Engine
//!
//! Platform-agnostic core logic for the Parley trade negotiation system.
//! This crate provides the full player/trader exchange mechanics without UI
//! or platform-specific dependencies.

pub mod catalog;
pub mod constants;
pub mod data;
pub mod journal;
pub mod ledger;
pub mod resolver;
pub mod rng;
pub mod session;

// Re-export commonly used types
pub use catalog::OfferCatalog;
pub use data::{
    DialogueSet, DialogueTag, TradeItem, Trader, TraderBehavior, TraderConfigError, TraderData,
};
pub use journal::{EventTag, EventTagSet, LogEntry, SessionLog};
pub use ledger::{ResourceDelta, ResourceLedger};
pub use resolver::{
    EscalationRule, NegotiationCfg, hostility_triggered, theft_chance, theft_noticed,
    theft_succeeds,
};
pub use rng::{CountingRng, SessionRng};
pub use session::{Intent, IntentResolution, NegotiationSession, NegotiationState, Outcome};

/// Trait for abstracting trader-definition loading
/// Platform-specific implementations should provide this
pub trait TraderSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load trader definitions from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the trader data cannot be loaded.
    fn load_trader_data(&self) -> Result<TraderData, Self::Error>;

    /// Load configuration data for a specific system
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Main engine for constructing negotiation sessions from named traders
pub struct NegotiationEngine<S>
where
    S: TraderSource,
{
    source: S,
}

impl<S> NegotiationEngine<S>
where
    S: TraderSource,
{
    /// Create a new engine with the provided trader source
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Engage the named trader with default rule configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the trader data cannot be loaded, the trader is
    /// unknown, or its definition fails validation.
    pub fn engage(
        &self,
        trader_name: &str,
        ledger: ResourceLedger,
        seed: u64,
    ) -> Result<NegotiationSession, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        self.engage_with_config(trader_name, ledger, NegotiationCfg::default(), seed)
    }

    /// Engage the named trader with explicit rule configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the trader data cannot be loaded, the trader is
    /// unknown, or the definition or configuration fails validation.
    pub fn engage_with_config(
        &self,
        trader_name: &str,
        ledger: ResourceLedger,
        cfg: NegotiationCfg,
        seed: u64,
    ) -> Result<NegotiationSession, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let data = self.source.load_trader_data().map_err(Into::into)?;
        let trader = data
            .find(trader_name)
            .cloned()
            .ok_or_else(|| TraderConfigError::UnknownTrader {
                name: trader_name.to_string(),
            })?;
        let session = NegotiationSession::with_config(trader, ledger, cfg, seed)?;
        Ok(session)
    }
}
