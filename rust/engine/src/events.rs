//! Synchronous publish/subscribe bus and the deck's lifecycle events.
//!
//! Listeners are keyed by a plain event name. [`EventBus::publish`] runs every
//! listener registered for that name, in subscription order, before it
//! returns. Nothing is buffered: a listener added after a publish never sees
//! that event.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::{DeckError, ListenerError};
use crate::hand::Hands;

/// Emitted once per card placed in a hand.
pub const CARD_DEALT: &str = "CARD_DEALT";
/// Emitted once at the end of every deal.
pub const DEAL_END: &str = "DEAL_END";
/// Emitted when the deck store holds every distinct card.
pub const DECK_END: &str = "DECK_END";

pub const EVENT_NAMES: [&str; 3] = [CARD_DEALT, DEAL_END, DECK_END];

pub type Listener = Box<dyn FnMut(&Value) -> Result<(), ListenerError> + Send>;

/// Handle returned by [`EventBus::subscribe`], used to deregister.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SubscriptionId(usize);

#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<String, Vec<(SubscriptionId, Listener)>>,
    next_id: usize,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .listeners
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("listeners", &counts)
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, event: &str, listener: F) -> SubscriptionId
    where
        F: FnMut(&Value) -> Result<(), ListenerError> + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event.to_string())
            .or_default()
            .push((id, Box::new(listener)));

        tracing::debug!(event, subscriber_id = id.0, "listener subscribed");
        id
    }

    /// Removes a listener. Returns false if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let mut removed = false;
        self.listeners.retain(|_, list| {
            let before = list.len();
            list.retain(|(sid, _)| *sid != id);
            removed |= list.len() != before;
            !list.is_empty()
        });
        if removed {
            tracing::debug!(subscriber_id = id.0, "listener unsubscribed");
        }
        removed
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }

    /// Delivers `payload` to every listener of `event`.
    ///
    /// # Errors
    ///
    /// The first listener failure stops delivery of this event and is
    /// returned as [`DeckError::Listener`]; later listeners do not run.
    pub fn publish(&mut self, event: &str, payload: &Value) -> Result<(), DeckError> {
        let Some(list) = self.listeners.get_mut(event) else {
            tracing::trace!(event, "no listeners for event");
            return Ok(());
        };

        tracing::debug!(event, listener_count = list.len(), "publishing event");
        for (id, listener) in list.iter_mut() {
            if let Err(e) = listener(payload) {
                tracing::warn!(
                    event,
                    subscriber_id = id.0,
                    error = %e,
                    "listener failed"
                );
                return Err(DeckError::Listener {
                    event: event.to_string(),
                    message: e.0,
                });
            }
        }
        Ok(())
    }
}

/// Lifecycle notifications published by [`crate::engine::DeckOfCards`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent {
    CardDealt { player: String, index: usize },
    DealEnd { hands: Hands },
    DeckEnd { cards: usize },
}

#[derive(Serialize)]
struct DealEndPayload<'a> {
    hands: &'a Hands,
}

impl DeckEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DeckEvent::CardDealt { .. } => CARD_DEALT,
            DeckEvent::DealEnd { .. } => DEAL_END,
            DeckEvent::DeckEnd { .. } => DECK_END,
        }
    }

    pub fn payload(&self) -> Result<Value, DeckError> {
        match self {
            DeckEvent::CardDealt { player, index } => Ok(json!({
                "player": player,
                "index": index,
            })),
            DeckEvent::DealEnd { hands } => serde_json::to_value(DealEndPayload { hands })
                .map_err(|e| DeckError::Payload(e.to_string())),
            DeckEvent::DeckEnd { cards } => Ok(json!({ "cards": cards })),
        }
    }
}
