//! # cardeck-engine: Card Deck Generation and Dealing
//!
//! Generates a de-duplicated, randomized deck of standard playing cards under
//! configurable rules, deals it round-robin across a fixed number of players,
//! and publishes lifecycle notifications to synchronous listeners.
//!
//! ## Core Modules
//!
//! - [`cards`] - Suits, ranks, card keys (`suit::rank`) and the card value object
//! - [`rules`] - Rules record: players, cards per player, face state, metadata
//! - [`deck`] - Ordered key stores and the rejection-sampling generator
//! - [`hand`] - Hands and the round-robin distribution
//! - [`events`] - Publish/subscribe bus and the `CARD_DEALT` / `DEAL_END` / `DECK_END` events
//! - [`engine`] - [`engine::DeckOfCards`], the deck object tying it all together
//! - [`config`] - Configuration from TOML files and environment variables
//! - [`logging`] - Log setup and in-memory log capture
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use cardeck_engine::engine::DeckOfCards;
//! use cardeck_engine::rules::Rules;
//!
//! let mut deck = DeckOfCards::new_with_seed(42);
//! let rules = Rules::new(4, 13, "face-down");
//!
//! let cards = deck.deck(rules, true, 52).expect("52 cards exist");
//! assert_eq!(cards.len(), 52);
//!
//! let hands = deck.deal().expect("no failing listeners");
//! for (player, cards) in hands.iter() {
//!     assert_eq!(cards.len(), 13, "{} short", player);
//! }
//! ```
//!
//! ## Deterministic Dealing
//!
//! Card selection is random but reproducible from a seed:
//!
//! ```rust
//! use cardeck_engine::engine::DeckOfCards;
//! use cardeck_engine::rules::Rules;
//!
//! let mut a = DeckOfCards::new_with_seed(7);
//! let mut b = DeckOfCards::new_with_seed(7);
//! assert_eq!(
//!     a.deck(Rules::default(), false, 52).unwrap(),
//!     b.deck(Rules::default(), false, 52).unwrap(),
//! );
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod hand;
pub mod logging;
pub mod rules;
