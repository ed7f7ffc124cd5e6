use serde::{Deserialize, Serialize};

use crate::errors::DeckError;

/// Card face orientation for cards dealt face down.
pub const FACE_DOWN: &str = "face-down";
/// Card face orientation for cards dealt face up.
pub const FACE_UP: &str = "face-up";

/// Configuration read by both the generator and the dealer.
///
/// Writing rules on a deck replaces the whole record; there is no partial
/// merge. Every [`crate::cards::Card`] carries a copy of the rules that were
/// active when it was materialized.
///
/// # Examples
///
/// ```
/// use cardeck_engine::rules::Rules;
///
/// let rules = Rules::new(2, 5, "face-up");
/// assert_eq!(rules.cards_to_deal(), 10);
/// assert!(rules.validate().is_ok());
///
/// let json = serde_json::to_value(&rules).unwrap();
/// assert_eq!(json["cardsPerPlayer"], 5);
/// assert!(json.get("deckType").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rules {
    /// Number of seats receiving cards
    pub players: u32,
    /// Cards each seat receives per deal
    pub cards_per_player: u32,
    /// Face orientation copied onto every card (e.g. `face-down`)
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_card: Option<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            players: 4,
            cards_per_player: 13,
            state: FACE_DOWN.to_string(),
            deck_type: None,
            dealer: None,
            last_card: None,
        }
    }
}

impl Rules {
    pub fn new(players: u32, cards_per_player: u32, state: impl Into<String>) -> Self {
        Self {
            players,
            cards_per_player,
            state: state.into(),
            ..Self::default()
        }
    }

    pub fn with_deck_type(mut self, deck_type: impl Into<String>) -> Self {
        self.deck_type = Some(deck_type.into());
        self
    }

    pub fn with_dealer(mut self, dealer: bool) -> Self {
        self.dealer = Some(dealer);
        self
    }

    pub fn with_last_card(mut self, last_card: impl Into<String>) -> Self {
        self.last_card = Some(last_card.into());
        self
    }

    /// Total number of cards a single deal tries to place.
    pub fn cards_to_deal(&self) -> usize {
        (self.players as usize).saturating_mul(self.cards_per_player as usize)
    }

    /// Rejects rules that could only produce degenerate deals.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidRules`] when `players` or
    /// `cards_per_player` is zero.
    pub fn validate(&self) -> Result<(), DeckError> {
        if self.players == 0 {
            return Err(DeckError::InvalidRules(
                "players must be greater than 0".to_string(),
            ));
        }
        if self.cards_per_player == 0 {
            return Err(DeckError::InvalidRules(
                "cards_per_player must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_deal_a_full_deck() {
        let rules = Rules::default();
        assert_eq!(rules.players, 4);
        assert_eq!(rules.cards_per_player, 13);
        assert_eq!(rules.state, FACE_DOWN);
        assert_eq!(rules.cards_to_deal(), 52);
    }

    #[test]
    fn zero_players_rejected() {
        let rules = Rules::new(0, 13, FACE_DOWN);
        assert!(matches!(rules.validate(), Err(DeckError::InvalidRules(_))));
    }

    #[test]
    fn zero_cards_per_player_rejected() {
        let rules = Rules::new(4, 0, FACE_DOWN);
        assert!(matches!(rules.validate(), Err(DeckError::InvalidRules(_))));
    }

    #[test]
    fn optional_metadata_deserializes_from_camel_case() {
        let rules: Rules = serde_json::from_str(
            r#"{"players":2,"cardsPerPlayer":3,"state":"face-up","deckType":"standard","dealer":true,"lastCard":"spades::A"}"#,
        )
        .expect("parse rules");
        assert_eq!(
            rules,
            Rules::new(2, 3, FACE_UP)
                .with_deck_type("standard")
                .with_dealer(true)
                .with_last_card("spades::A")
        );
    }
}
