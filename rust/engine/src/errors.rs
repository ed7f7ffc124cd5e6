use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Requested {requested} unique cards, but only {available} exist")]
    MaxCardsExceeded { requested: usize, available: usize },
    #[error("Invalid rules: {0}")]
    InvalidRules(String),
    #[error("Invalid card key: {0}")]
    InvalidCardKey(String),
    #[error("Listener for {event} failed: {message}")]
    Listener { event: String, message: String },
    #[error("Failed to build event payload: {0}")]
    Payload(String),
}

/// Error returned by a notification listener.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&str> for ListenerError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for ListenerError {
    fn from(message: String) -> Self {
        Self(message)
    }
}
