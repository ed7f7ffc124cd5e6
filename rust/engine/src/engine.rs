use serde_json::Value;

use crate::cards::{Card, CardKey, MAX_CARDS};
use crate::config::DeckConfig;
use crate::deck::{check_capacity, Generator, KeyStore};
use crate::errors::{DeckError, ListenerError};
use crate::events::{DeckEvent, EventBus, SubscriptionId};
use crate::hand::{player_id, round_robin, Hands};
use crate::rules::Rules;

/// A deck of cards that generates unique cards, deals them into hands and
/// notifies listeners along the way.
///
/// # Examples
///
/// ```
/// use cardeck_engine::engine::DeckOfCards;
/// use cardeck_engine::events::CARD_DEALT;
/// use cardeck_engine::rules::Rules;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let mut deck = DeckOfCards::new_with_seed(12345);
/// let dealt = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&dealt);
/// deck.subscribe(CARD_DEALT, move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
///     Ok(())
/// });
///
/// let cards = deck.deck(Rules::default(), true, 52).unwrap();
/// assert_eq!(cards.len(), 52);
///
/// let hands = deck.deal().unwrap();
/// assert_eq!(hands.len(), 4);
/// assert_eq!(hands.get("player1").unwrap().len(), 13);
/// assert_eq!(dealt.load(Ordering::SeqCst), 52);
/// ```
#[derive(Debug)]
pub struct DeckOfCards {
    /// Active rules, replaced wholesale by the setter
    rules: Rules,
    /// Every key generated since the last reset
    deck: KeyStore,
    /// Every key dealt since the last new-deck request
    dealt: KeyStore,
    hands: Hands,
    bus: EventBus,
    generator: Generator,
    /// Cards added per call to [`Self::generate`]
    max_cards: usize,
}

impl Default for DeckOfCards {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckOfCards {
    /// Creates an empty deck with a randomly chosen seed.
    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rules: Rules::default(),
            deck: KeyStore::new(),
            dealt: KeyStore::new(),
            hands: Hands::new(),
            bus: EventBus::new(),
            generator: Generator::new_with_seed(seed),
            max_cards: MAX_CARDS,
        }
    }

    /// Creates an empty deck using the configured rules, seed and per-call
    /// card count.
    pub fn from_config(config: &DeckConfig) -> Result<Self, DeckError> {
        let mut deck = match config.seed {
            Some(seed) => Self::new_with_seed(seed),
            None => Self::new(),
        };
        deck.set_rules(config.rules.clone())?;
        check_capacity(&KeyStore::new(), config.max_cards)?;
        deck.max_cards = config.max_cards;
        Ok(deck)
    }

    /// [`Self::deck`] with the active rules and the configured card count.
    pub fn generate(&mut self, new_deck: bool) -> Result<Vec<Card>, DeckError> {
        self.deck(self.rules.clone(), new_deck, self.max_cards)
    }

    /// Generates `max_cards` cards that are new to the deck, and returns
    /// every card in the deck in generation order.
    ///
    /// `rules` replaces the active rules. `new_deck` clears the record of
    /// dealt cards, making every generated card dealable again; the deck
    /// itself is only emptied by [`Self::reset`]. Publishes `DECK_END` when
    /// this call completes the deck.
    ///
    /// # Errors
    ///
    /// - [`DeckError::MaxCardsExceeded`] if fewer than `max_cards` distinct
    ///   cards are left to generate
    /// - [`DeckError::InvalidRules`] if `rules` fails validation
    /// - [`DeckError::Listener`] if a `DECK_END` listener fails; the
    ///   generated cards are kept
    ///
    /// Nothing is modified when the arguments are rejected.
    pub fn deck(
        &mut self,
        rules: Rules,
        new_deck: bool,
        max_cards: usize,
    ) -> Result<Vec<Card>, DeckError> {
        check_capacity(&self.deck, max_cards)?;
        self.set_rules(rules)?;
        if new_deck {
            self.dealt.clear();
        }

        let was_full = self.deck.len() == MAX_CARDS;
        let added = self.generator.fill(&mut self.deck, max_cards)?;
        tracing::debug!(
            added,
            deck_size = self.deck.len(),
            max_cards,
            new_deck,
            "generated cards"
        );

        if !was_full && self.deck.len() == MAX_CARDS {
            self.emit(DeckEvent::DeckEnd {
                cards: self.deck.len(),
            })?;
        }
        Ok(self.cards())
    }

    /// Deals the most recently generated undealt cards round-robin into the
    /// hands.
    ///
    /// Takes the last `players * cards_per_player` cards of the deck that
    /// have not been dealt yet (fewer if not enough remain), publishes one `CARD_DEALT` per card placed and
    /// then a single `DEAL_END` carrying all hands. Hands accumulate across
    /// deals until [`Self::clear_hands`].
    ///
    /// # Errors
    ///
    /// [`DeckError::Listener`] if a listener fails. All cards of the deal
    /// are already in the hands by then; the remaining events of this deal
    /// are not published.
    pub fn deal(&mut self) -> Result<Hands, DeckError> {
        let cards_to_deal = self.rules.cards_to_deal();
        let slice = self.deck.tail_without(cards_to_deal, &self.dealt);
        if slice.len() < cards_to_deal {
            tracing::warn!(
                requested = cards_to_deal,
                available = slice.len(),
                "deck too small for a full deal"
            );
        }

        let placements = round_robin(&slice, self.rules.players as usize);
        let mut events = Vec::with_capacity(placements.len() + 1);
        for p in &placements {
            self.hands.push(p.seat, p.key.to_card(&self.rules));
            self.dealt.insert(p.key);
            events.push(DeckEvent::CardDealt {
                player: player_id(p.seat),
                index: p.index,
            });
        }
        tracing::debug!(
            dealt = placements.len(),
            players = self.rules.players,
            total_in_hands = self.hands.total_cards(),
            "deal complete"
        );

        events.push(DeckEvent::DealEnd {
            hands: self.hands.clone(),
        });
        for event in events {
            self.emit(event)?;
        }
        Ok(self.hands.clone())
    }

    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Replaces the active rules.
    ///
    /// # Errors
    ///
    /// [`DeckError::InvalidRules`] for zero players or zero cards per
    /// player; the previous rules stay active.
    pub fn set_rules(&mut self, rules: Rules) -> Result<(), DeckError> {
        rules.validate()?;
        self.rules = rules;
        Ok(())
    }

    /// Every card in the deck, materialized with the current rules.
    pub fn cards(&self) -> Vec<Card> {
        self.deck
            .keys()
            .iter()
            .map(|k| k.to_card(&self.rules))
            .collect()
    }

    /// Number of distinct cards generated since the last reset.
    pub fn size(&self) -> usize {
        self.deck.len()
    }

    /// Number of generated cards not dealt yet.
    pub fn remaining(&self) -> usize {
        self.deck.len() - self.dealt.len()
    }

    pub fn dealt(&self) -> &[CardKey] {
        self.dealt.keys()
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Empties the deck and the dealt record so every card can be generated
    /// again. Hands are kept.
    pub fn reset(&mut self) {
        tracing::info!(
            deck_size = self.deck.len(),
            dealt = self.dealt.len(),
            "resetting deck"
        );
        self.deck.clear();
        self.dealt.clear();
    }

    pub fn clear_hands(&mut self) {
        self.hands.clear();
    }

    pub fn subscribe<F>(&mut self, event: &str, listener: F) -> SubscriptionId
    where
        F: FnMut(&Value) -> Result<(), ListenerError> + Send + 'static,
    {
        self.bus.subscribe(event, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn publish(&mut self, event: &str, payload: &Value) -> Result<(), DeckError> {
        self.bus.publish(event, payload)
    }

    fn emit(&mut self, event: DeckEvent) -> Result<(), DeckError> {
        let payload = event.payload()?;
        self.bus.publish(event.name(), &payload)
    }
}
