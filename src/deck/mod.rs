//! Showcase deck loading.
//!
//! A deck is the JSON document the page renders: a hero banner, one or
//! more card galleries, and an optional contact section. Parsing happens
//! once at startup and again on live reload; the carousel layer only ever
//! sees slide counts and renderable card handles.

mod parser;
mod types;

pub use parser::{DeckError, parse_deck};
pub use types::{Card, ContactInfo, Deck, Gallery};

use std::path::Path;

impl Deck {
    /// Load a deck from a file.
    ///
    /// Files ending in `.json5` go through the JSON5 parser so hand-written
    /// decks may carry comments and trailing commas; everything else is
    /// strict JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`DeckError`] if the file cannot be read, fails to parse,
    /// or fails validation.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let relaxed = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json5"));
        parse_deck(&text, relaxed)
    }

    /// Parse a deck from strict JSON text.
    ///
    /// # Errors
    ///
    /// Returns a [`DeckError`] if the text fails to parse or validate.
    pub fn parse(text: &str) -> Result<Self, DeckError> {
        parse_deck(text, false)
    }
}
