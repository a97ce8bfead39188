use parley_game::{
    DialogueSet, EscalationRule, Intent, IntentResolution, NegotiationCfg, NegotiationSession,
    NegotiationState, ResourceLedger, TradeItem, Trader, TraderBehavior,
};

fn dialogue() -> DialogueSet {
    DialogueSet {
        encounter: "Step right up.".to_string(),
        trade_event: "Suit yourself.".to_string(),
        positive: "Pleasure doing business.".to_string(),
        leave_trade: "Off with you, then.".to_string(),
        aggro: "Thief! Away with you!".to_string(),
    }
}

fn item(name: &str, cost: i32, food: i32, water: i32) -> TradeItem {
    TradeItem {
        name: name.to_string(),
        gold_cost: cost,
        food_restore: food,
        water_restore: water,
    }
}

fn trader(items: Vec<TradeItem>, behavior: TraderBehavior) -> Trader {
    Trader {
        name: "Vasquez".to_string(),
        dialogue: dialogue(),
        behavior,
        items,
    }
}

fn quiet_cfg() -> NegotiationCfg {
    // Notice roll disabled so successful theft stays deterministic.
    NegotiationCfg {
        theft_notice_chance: 0.0,
        ..NegotiationCfg::default()
    }
}

#[test]
fn insufficient_gold_leaves_ledger_untouched() {
    let trader = trader(vec![item("Lantern", 50, 0, 0)], TraderBehavior::default());
    let ledger = ResourceLedger::seeded(30, 40, 40, 5);
    let mut session = NegotiationSession::new(trader, ledger, 11).expect("valid trader");

    let outcome = session.submit(Intent::Accept);
    assert_eq!(outcome.resolution, IntentResolution::InsufficientGold);
    assert_eq!(outcome.state, NegotiationState::Offering);
    assert_eq!(outcome.ledger, ledger);
    assert!(
        session
            .log()
            .iter()
            .any(|entry| entry.key == "log.trade.insufficient-gold")
    );
}

#[test]
fn second_decline_escalates_and_applies_penalties_once() {
    let behavior = TraderBehavior {
        max_offers_before_decline: 2,
        aggro_on_max_reject: true,
        strength_penalty: 2,
        water_penalty: 10,
        food_penalty: 5,
        ..TraderBehavior::default()
    };
    let trader = trader(vec![item("Boots", 12, 0, 0), item("Rope", 4, 0, 0)], behavior);
    let ledger = ResourceLedger::seeded(60, 50, 50, 8);
    let mut session = NegotiationSession::new(trader, ledger, 5).expect("valid trader");

    let first = session.submit(Intent::Decline);
    assert_eq!(first.resolution, IntentResolution::Declined);
    assert_eq!(first.state, NegotiationState::Offering);
    assert_eq!(first.ledger, ledger, "no penalty before the threshold");

    let second = session.submit(Intent::Decline);
    assert_eq!(second.resolution, IntentResolution::Escalated);
    assert_eq!(second.state, NegotiationState::Hostile);
    assert_eq!(second.ledger.strength, 6);
    assert_eq!(second.ledger.water, 40);
    assert_eq!(second.ledger.food, 45);
    assert_eq!(second.ledger.gold, 60);
    assert_eq!(session.rejection_count(), 2);

    // Further intents are refused without touching the ledger again.
    let refused = session.submit(Intent::Decline);
    assert_eq!(refused.resolution, IntentResolution::HostileRefusal);
    assert_eq!(refused.ledger, second.ledger);
}

#[test]
fn guaranteed_theft_credits_restores_without_gold() {
    let behavior = TraderBehavior {
        steal_success_rate: 1.0,
        ..TraderBehavior::default()
    };
    let trader = trader(vec![item("Salted pork", 25, 30, 10)], behavior);
    let ledger = ResourceLedger::seeded(40, 20, 20, 100);
    let mut session =
        NegotiationSession::with_config(trader, ledger, quiet_cfg(), 23).expect("valid trader");

    let outcome = session.submit(Intent::Steal);
    assert_eq!(outcome.resolution, IntentResolution::TheftSucceeded);
    assert_eq!(outcome.state, NegotiationState::Offering);
    assert_eq!(outcome.ledger.gold, 40, "theft bypasses cost");
    assert_eq!(outcome.ledger.food, 50);
    assert_eq!(outcome.ledger.water, 30);
    assert!(
        session
            .log()
            .iter()
            .any(|entry| entry.key == "log.theft.success")
    );
}

#[test]
fn noticed_theft_turns_hostile_without_penalties() {
    let behavior = TraderBehavior {
        steal_success_rate: 1.0,
        strength_penalty: 3,
        water_penalty: 8,
        food_penalty: 8,
        ..TraderBehavior::default()
    };
    let trader = trader(vec![item("Salted pork", 25, 30, 10)], behavior);
    let cfg = NegotiationCfg {
        theft_notice_chance: 1.0,
        ..NegotiationCfg::default()
    };
    let ledger = ResourceLedger::seeded(40, 20, 20, 100);
    let mut session =
        NegotiationSession::with_config(trader, ledger, cfg, 23).expect("valid trader");

    let outcome = session.submit(Intent::Steal);
    assert_eq!(outcome.resolution, IntentResolution::TheftNoticed);
    assert_eq!(outcome.state, NegotiationState::Hostile);
    // The goods were still taken; no penalty applies on a noticed success.
    assert_eq!(outcome.ledger.food, 50);
    assert_eq!(outcome.ledger.water, 30);
    assert_eq!(outcome.ledger.strength, 100);
    assert_eq!(outcome.ledger.gold, 40);
}

#[test]
fn failed_theft_is_caught_and_penalized() {
    let behavior = TraderBehavior {
        steal_success_rate: 0.0,
        strength_penalty: 4,
        water_penalty: 12,
        food_penalty: 6,
        ..TraderBehavior::default()
    };
    let trader = trader(vec![item("Salted pork", 25, 30, 10)], behavior);
    let ledger = ResourceLedger::seeded(40, 20, 20, 9);
    let mut session =
        NegotiationSession::with_config(trader, ledger, quiet_cfg(), 29).expect("valid trader");

    let outcome = session.submit(Intent::Steal);
    assert_eq!(outcome.resolution, IntentResolution::TheftFailed);
    assert_eq!(outcome.state, NegotiationState::Hostile);
    assert_eq!(outcome.ledger.strength, 5);
    assert_eq!(outcome.ledger.water, 8);
    assert_eq!(outcome.ledger.food, 14);
    assert_eq!(outcome.ledger.gold, 40);
    assert!(
        session
            .log()
            .iter()
            .any(|entry| entry.key == "log.theft.caught")
    );
}

#[test]
fn empty_catalog_degrades_every_offer_intent() {
    let trader = trader(Vec::new(), TraderBehavior::default());
    let ledger = ResourceLedger::seeded(40, 20, 20, 9);
    let mut session = NegotiationSession::new(trader, ledger, 31).expect("valid trader");

    for intent in [
        Intent::Accept,
        Intent::Decline,
        Intent::Steal,
        Intent::NextOffer,
    ] {
        let outcome = session.submit(intent);
        assert_eq!(outcome.resolution, IntentResolution::NoOffers);
        assert_eq!(outcome.state, NegotiationState::Offering);
        assert_eq!(outcome.ledger, ledger);
    }
    assert_eq!(
        session.rejection_count(),
        0,
        "declining nothing rejects nothing"
    );
    assert!(
        session
            .log()
            .iter()
            .all(|entry| entry.key == "log.trade.no-offers")
    );
}

#[test]
fn leave_is_idempotent() {
    let trader = trader(vec![item("Rope", 4, 0, 0)], TraderBehavior::default());
    let mut session =
        NegotiationSession::new(trader, ResourceLedger::default(), 37).expect("valid trader");

    let first = session.submit(Intent::Leave);
    assert_eq!(first.state, NegotiationState::Ended);
    let log_len = session.log().len();

    let second = session.submit(Intent::Leave);
    assert_eq!(second.state, NegotiationState::Ended);
    assert_eq!(second.resolution, IntentResolution::SessionEnded);
    assert_eq!(session.log().len(), log_len);
    assert_eq!(second.ledger, first.ledger);
}

#[test]
fn patient_traders_never_escalate() {
    let behavior = TraderBehavior {
        max_offers_before_decline: 1,
        aggro_on_max_reject: false,
        strength_penalty: 5,
        ..TraderBehavior::default()
    };
    let trader = trader(vec![item("Boots", 12, 0, 0)], behavior);
    let mut session =
        NegotiationSession::new(trader, ResourceLedger::default(), 41).expect("valid trader");

    for round in 1..=20 {
        let outcome = session.submit(Intent::Decline);
        assert_eq!(outcome.resolution, IntentResolution::Declined);
        assert_eq!(outcome.state, NegotiationState::Offering);
        assert_eq!(session.rejection_count(), round);
    }
}

#[test]
fn hostility_is_monotonic_until_leave() {
    let behavior = TraderBehavior {
        is_aggro: true,
        ..TraderBehavior::default()
    };
    let trader = trader(vec![item("Boots", 12, 0, 0)], behavior);
    let mut session =
        NegotiationSession::new(trader, ResourceLedger::default(), 43).expect("valid trader");

    for intent in [
        Intent::Accept,
        Intent::Steal,
        Intent::Decline,
        Intent::NextOffer,
        Intent::Accept,
    ] {
        let outcome = session.submit(intent);
        assert_eq!(outcome.state, NegotiationState::Hostile);
    }
    let outcome = session.submit(Intent::Leave);
    assert_eq!(outcome.state, NegotiationState::Ended);
}

#[test]
fn browsing_returns_to_the_first_offer_after_a_full_pass() {
    let items = vec![
        item("Boots", 12, 0, 0),
        item("Rope", 4, 0, 0),
        item("Lantern", 20, 0, 0),
    ];
    let trader = trader(items, TraderBehavior::default());
    let mut session =
        NegotiationSession::new(trader, ResourceLedger::default(), 47).expect("valid trader");

    let start = session.submit(Intent::NextOffer);
    let start_subject = start.log.as_ref().and_then(|entry| entry.subject.clone());
    let mut last_subject = None;
    for _ in 0..session.catalog().len() {
        let wrapped = session.submit(Intent::NextOffer);
        last_subject = wrapped.log.as_ref().and_then(|entry| entry.subject.clone());
    }
    // A full pass beyond the starting point lands on the same offer again.
    assert_eq!(last_subject, start_subject);
}

#[test]
fn repeated_purchases_keep_ledger_within_bounds() {
    let behavior = TraderBehavior::default();
    let trader = trader(vec![item("Stew", 7, 25, 25)], behavior);
    let ledger = ResourceLedger::seeded(50, 90, 90, 5);
    let mut session = NegotiationSession::new(trader, ledger, 53).expect("valid trader");

    let mut previous_gold = session.ledger().gold;
    for _ in 0..12 {
        let outcome = session.submit(Intent::Accept);
        assert!(outcome.ledger.gold <= previous_gold, "gold never increases");
        assert!((0..=100).contains(&outcome.ledger.food));
        assert!((0..=100).contains(&outcome.ledger.water));
        assert!(outcome.ledger.gold >= 0);
        previous_gold = outcome.ledger.gold;
        match outcome.resolution {
            IntentResolution::Traded | IntentResolution::InsufficientGold => {}
            other => panic!("unexpected resolution {other:?}"),
        }
    }
    // 50 gold buys exactly seven 7-gold stews.
    assert_eq!(session.ledger().gold, 1);
    assert_eq!(session.ledger().food, 100);
    assert_eq!(session.ledger().water, 100);
}

#[test]
fn random_roll_variant_spares_the_first_rejection() {
    let behavior = TraderBehavior {
        aggro_on_max_reject: true,
        max_offers_before_decline: 99,
        ..TraderBehavior::default()
    };
    let trader = trader(vec![item("Boots", 12, 0, 0)], behavior);
    let cfg = NegotiationCfg {
        escalation: EscalationRule::RandomRoll { chance: 1.0 },
        ..NegotiationCfg::default()
    };
    let mut session =
        NegotiationSession::with_config(trader, ResourceLedger::default(), cfg, 59)
            .expect("valid trader");

    let first = session.submit(Intent::Decline);
    assert_eq!(first.resolution, IntentResolution::Declined);
    let second = session.submit(Intent::Decline);
    assert_eq!(second.resolution, IntentResolution::Escalated);
    assert_eq!(second.state, NegotiationState::Hostile);
}
