use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{CardKey, Rank, Suit, MAX_CARDS};
use crate::errors::DeckError;

/// Insertion-ordered set of card keys.
///
/// Backs both the deck store (every key generated since the last reset) and
/// the dealt store (every key handed to a player since the last clear).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyStore {
    order: Vec<CardKey>,
    seen: HashSet<CardKey>,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key` at the end. Returns false if it was already present.
    pub fn insert(&mut self, key: CardKey) -> bool {
        if !self.seen.insert(key) {
            return false;
        }
        self.order.push(key);
        true
    }

    pub fn contains(&self, key: &CardKey) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }

    pub fn keys(&self) -> &[CardKey] {
        &self.order
    }

    /// Keys not present in `exclude`, in insertion order.
    pub fn without(&self, exclude: &KeyStore) -> Vec<CardKey> {
        self.order
            .iter()
            .filter(|k| !exclude.contains(k))
            .copied()
            .collect()
    }

    /// The last `n` keys not present in `exclude`, or all of them if fewer
    /// exist. Insertion order is kept.
    pub fn tail_without(&self, n: usize, exclude: &KeyStore) -> Vec<CardKey> {
        let mut keys = self.without(exclude);
        let start = keys.len().saturating_sub(n);
        keys.drain(..start);
        keys
    }
}

/// Random card source using independent suit and rank draws.
#[derive(Debug)]
pub struct Generator {
    seed: u64,
    rng: ChaCha20Rng,
}

impl Generator {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a uniformly random suit and, independently, a uniformly random rank.
    pub fn draw(&mut self) -> CardKey {
        let suit = Suit::ALL[self.rng.random_range(0..Suit::ALL.len())];
        let rank = Rank::ALL[self.rng.random_range(0..Rank::ALL.len())];
        CardKey::new(suit, rank)
    }

    /// Rejection-samples `count` keys that are new to `store` and appends
    /// them. Returns the number added, which is always `count`.
    ///
    /// # Errors
    ///
    /// [`DeckError::MaxCardsExceeded`] if the store cannot take `count` more
    /// distinct cards; the store is left untouched.
    pub fn fill(&mut self, store: &mut KeyStore, count: usize) -> Result<usize, DeckError> {
        check_capacity(store, count)?;
        let mut added = 0;
        let mut draws = 0u64;
        while added < count {
            draws += 1;
            if store.insert(self.draw()) {
                added += 1;
            }
        }
        tracing::trace!(added, draws, "deck store filled");
        Ok(added)
    }
}

/// Fails when `store` has fewer than `count` distinct cards left to generate.
pub fn check_capacity(store: &KeyStore, count: usize) -> Result<(), DeckError> {
    let available = MAX_CARDS.saturating_sub(store.len());
    if count > available {
        return Err(DeckError::MaxCardsExceeded {
            requested: count,
            available,
        });
    }
    Ok(())
}
