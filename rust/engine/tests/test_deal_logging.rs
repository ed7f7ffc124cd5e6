use cardeck_engine::engine::DeckOfCards;
use cardeck_engine::errors::ListenerError;
use cardeck_engine::events::CARD_DEALT;
use cardeck_engine::logging::LogCapture;
use cardeck_engine::rules::Rules;
use tracing::Level;

#[test]
fn under_supply_is_logged_as_warning() {
    let capture = LogCapture::new();
    capture.scoped(|| {
        let mut deck = DeckOfCards::new_with_seed(1);
        deck.deck(Rules::new(4, 13, "face-down"), false, 4).unwrap();
        deck.deal().unwrap();
    });

    let entries = capture.entries();
    let warning = entries
        .iter()
        .find(|e| e.level == Level::WARN)
        .expect("warning logged");
    assert!(warning.message.contains("deck too small"));
    assert_eq!(warning.field("requested"), Some("52"));
    assert_eq!(warning.field("available"), Some("4"));
}

#[test]
fn full_deal_logs_no_warning() {
    let capture = LogCapture::new();
    capture.scoped(|| {
        let mut deck = DeckOfCards::new_with_seed(1);
        deck.deck(Rules::default(), false, 52).unwrap();
        deck.deal().unwrap();
    });

    let entries = capture.entries();
    assert!(entries.iter().all(|e| e.level != Level::WARN));
    let done = entries
        .iter()
        .find(|e| e.message.contains("deal complete"))
        .expect("deal summary logged");
    assert_eq!(done.field("dealt"), Some("52"));
}

#[test]
fn listener_failure_is_logged() {
    let capture = LogCapture::new();
    capture.scoped(|| {
        let mut deck = DeckOfCards::new_with_seed(1);
        deck.deck(Rules::new(1, 1, "face-down"), false, 1).unwrap();
        deck.subscribe(CARD_DEALT, |_| Err(ListenerError::new("nope")));
        assert!(deck.deal().is_err());
    });

    assert!(capture
        .entries()
        .iter()
        .any(|e| e.level == Level::WARN && e.message.contains("listener failed")));
}
