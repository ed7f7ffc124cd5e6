use std::collections::HashSet;

use cardeck_engine::cards::{Card, CardKey};
use cardeck_engine::engine::DeckOfCards;
use cardeck_engine::hand::Hands;
use cardeck_engine::rules::Rules;

fn all_keys(hands: &Hands) -> HashSet<CardKey> {
    hands
        .iter()
        .flat_map(|(_, h)| h.iter().map(Card::key))
        .collect()
}

#[test]
fn four_players_receive_thirteen_cards_each() {
    let mut deck = DeckOfCards::new_with_seed(2024);
    let cards = deck.deck(Rules::new(4, 13, "face-down"), true, 52).unwrap();
    let hands = deck.deal().unwrap();

    assert_eq!(hands.players(), vec!["player1", "player2", "player3", "player4"]);
    for (player, hand) in hands.iter() {
        assert_eq!(hand.len(), 13, "{} has wrong hand size", player);
    }

    let dealt: Vec<CardKey> = hands
        .iter()
        .flat_map(|(_, h)| h.iter().map(Card::key))
        .collect();
    let unique: HashSet<CardKey> = dealt.iter().copied().collect();
    let generated: HashSet<CardKey> = cards.iter().map(Card::key).collect();
    assert_eq!(dealt.len(), 52);
    assert_eq!(unique, generated, "hands must cover the slice exactly");
}

#[test]
fn deal_takes_the_tail_of_the_deck() {
    let mut deck = DeckOfCards::new_with_seed(77);
    let cards = deck.deck(Rules::new(2, 3, "face-up"), false, 20).unwrap();
    let hands = deck.deal().unwrap();

    let tail: Vec<CardKey> = cards[14..].iter().map(Card::key).collect();
    // popped from the end: seat 1 gets the last card, seat 2 the one before
    let p1: Vec<CardKey> = hands.get("player1").unwrap().iter().map(Card::key).collect();
    let p2: Vec<CardKey> = hands.get("player2").unwrap().iter().map(Card::key).collect();
    assert_eq!(p1, vec![tail[5], tail[3], tail[1]]);
    assert_eq!(p2, vec![tail[4], tail[2], tail[0]]);
}

#[test]
fn dealt_cards_carry_the_rules_snapshot() {
    let mut deck = DeckOfCards::new_with_seed(5);
    let rules = Rules::new(2, 1, "face-up");
    deck.deck(rules.clone(), false, 2).unwrap();
    deck.deal().unwrap();
    deck.set_rules(Rules::new(2, 1, "face-down")).unwrap();

    let hand = deck.hands().get("player1").unwrap();
    assert_eq!(hand[0].state, "face-up");
    assert_eq!(hand[0].rules, rules);
    assert_eq!(hand[0].symbol, hand[0].suit.symbol());
}

#[test]
fn under_supplied_deck_gives_at_most_one_card_each() {
    let mut deck = DeckOfCards::new_with_seed(8);
    deck.deck(Rules::new(4, 13, "face-down"), false, 4).unwrap();
    let hands = deck.deal().unwrap();
    assert_eq!(hands.len(), 4);
    for (player, hand) in hands.iter() {
        assert!(hand.len() <= 1, "{} got {} cards", player, hand.len());
    }
    assert_eq!(hands.total_cards(), 4);
}

#[test]
fn uneven_supply_leaves_later_seats_short() {
    let mut deck = DeckOfCards::new_with_seed(8);
    deck.deck(Rules::new(4, 2, "face-down"), false, 6).unwrap();
    let hands = deck.deal().unwrap();
    let sizes: Vec<usize> = hands.iter().map(|(_, h)| h.len()).collect();
    assert_eq!(sizes, vec![2, 2, 1, 1]);
}

#[test]
fn deal_before_generation_leaves_hands_empty() {
    let mut deck = DeckOfCards::new_with_seed(1);
    let hands = deck.deal().unwrap();
    assert!(hands.is_empty());
    assert!(deck.dealt().is_empty());
}

#[test]
fn hands_accumulate_across_deals() {
    let mut deck = DeckOfCards::new_with_seed(31);
    deck.deck(Rules::new(2, 2, "face-down"), false, 10).unwrap();
    deck.deal().unwrap();
    let hands = deck.deal().unwrap();
    assert_eq!(hands.get("player1").unwrap().len(), 4);
    assert_eq!(hands.total_cards(), 8);

    deck.deck(Rules::new(2, 2, "face-down"), false, 20).unwrap();
    let hands = deck.deal().unwrap();
    assert_eq!(hands.total_cards(), 12);
    assert_eq!(all_keys(&hands).len(), 12, "no card dealt twice");
}

#[test]
fn repeated_deals_take_successive_tail_slices() {
    let mut deck = DeckOfCards::new_with_seed(52);
    let cards = deck.deck(Rules::new(2, 2, "face-down"), false, 52).unwrap();
    let generated: Vec<CardKey> = cards.iter().map(Card::key).collect();

    let first = all_keys(&deck.deal().unwrap());
    assert_eq!(first, generated[48..].iter().copied().collect::<HashSet<_>>());
    let both = all_keys(&deck.deal().unwrap());
    let second: HashSet<CardKey> = both.difference(&first).copied().collect();
    assert_eq!(second, generated[44..48].iter().copied().collect::<HashSet<_>>());
    assert_eq!(deck.hands().total_cards(), 8);
    assert_eq!(deck.remaining(), 44);
}

#[test]
fn dealing_runs_dry_once_every_card_is_dealt() {
    let mut deck = DeckOfCards::new_with_seed(8);
    deck.deck(Rules::new(2, 2, "face-down"), false, 6).unwrap();
    deck.deal().unwrap();
    // two undealt cards left: an under-supplied deal
    assert_eq!(deck.deal().unwrap().total_cards(), 6);
    assert_eq!(deck.remaining(), 0);
    assert_eq!(deck.deal().unwrap().total_cards(), 6);
}

#[test]
fn new_deck_flag_makes_dealt_cards_dealable_again() {
    let mut deck = DeckOfCards::new_with_seed(19);
    deck.deck(Rules::new(2, 2, "face-down"), false, 4).unwrap();
    let first = all_keys(&deck.deal().unwrap());
    assert_eq!(deck.deal().unwrap().total_cards(), 4);

    deck.deck(Rules::new(2, 2, "face-down"), true, 0).unwrap();
    deck.clear_hands();
    let again = all_keys(&deck.deal().unwrap());
    assert_eq!(again, first);
}

#[test]
fn clear_hands_starts_a_fresh_round() {
    let mut deck = DeckOfCards::new_with_seed(31);
    deck.deck(Rules::new(2, 2, "face-down"), false, 10).unwrap();
    deck.deal().unwrap();
    deck.clear_hands();
    assert!(deck.hands().is_empty());
    let hands = deck.deal().unwrap();
    assert_eq!(hands.total_cards(), 4);
}

#[test]
fn dealt_record_tracks_unique_cards() {
    let mut deck = DeckOfCards::new_with_seed(31);
    deck.deck(Rules::new(3, 2, "face-down"), false, 12).unwrap();
    deck.deal().unwrap();
    deck.deal().unwrap();
    deck.deal().unwrap();
    assert_eq!(deck.dealt().len(), 12);
    let dealt: HashSet<CardKey> = deck.dealt().iter().copied().collect();
    assert_eq!(dealt, all_keys(deck.hands()));
}
