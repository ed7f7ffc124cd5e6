use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::cards::{Card, CardKey};

/// Formats the identifier of a 1-based seat, e.g. `player3`.
pub fn player_id(seat: usize) -> String {
    format!("player{}", seat)
}

fn parse_player_id(id: &str) -> Option<usize> {
    id.strip_prefix("player")?.parse().ok()
}

/// Cards held by each seat, in the order they were dealt.
///
/// Seats iterate in numeric order (`player2` before `player10`) and
/// serialize as a JSON object keyed by player id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hands {
    seats: BTreeMap<usize, Vec<Card>>,
}

impl Hands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, seat: usize, card: Card) {
        self.seats.entry(seat).or_default().push(card);
    }

    /// Looks a hand up by player id (`player1`, `player2`, ...).
    pub fn get(&self, player: &str) -> Option<&[Card]> {
        parse_player_id(player).and_then(|seat| self.seat(seat))
    }

    pub fn seat(&self, seat: usize) -> Option<&[Card]> {
        self.seats.get(&seat).map(Vec::as_slice)
    }

    /// Number of seats holding at least one card.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn total_cards(&self) -> usize {
        self.seats.values().map(Vec::len).sum()
    }

    pub fn players(&self) -> Vec<String> {
        self.seats.keys().map(|&s| player_id(s)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (String, &[Card])> + '_ {
        self.seats
            .iter()
            .map(|(&seat, cards)| (player_id(seat), cards.as_slice()))
    }

    pub fn clear(&mut self) {
        self.seats.clear();
    }
}

impl Serialize for Hands {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.seats.len()))?;
        for (seat, cards) in &self.seats {
            map.serialize_entry(&player_id(*seat), cards)?;
        }
        map.end()
    }
}

/// One card placed during a deal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Placement {
    /// 1-based seat receiving the card
    pub seat: usize,
    /// Outer round-robin step; shared by every seat served in that step
    pub index: usize,
    pub key: CardKey,
}

/// Distributes `slice` round-robin over `players` seats.
///
/// Cards are taken from the tail of the slice. At each outer step every seat,
/// in order, receives one card while any remain, so an under-supplied slice
/// leaves the later seats short rather than failing.
pub fn round_robin(slice: &[CardKey], players: usize) -> Vec<Placement> {
    let mut remaining = slice.to_vec();
    let mut placements = Vec::with_capacity(slice.len());
    for index in 0..slice.len() {
        if remaining.is_empty() {
            break;
        }
        for seat in 1..=players {
            match remaining.pop() {
                Some(key) => placements.push(Placement { seat, index, key }),
                None => break,
            }
        }
    }
    placements
}
