use thiserror::Error;

use super::types::Deck;

/// Everything that can go wrong loading a deck file.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read deck file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid deck JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid deck JSON5: {0}")]
    Json5(#[from] json5::Error),

    #[error("gallery {index} has an empty id")]
    EmptyGalleryId { index: usize },

    #[error("gallery '{id}' has a zero autoplay delay")]
    InvalidDelay { id: String },
}

/// Parse and validate deck text.
///
/// `relaxed` routes the text through the JSON5 parser instead of strict
/// JSON.
///
/// # Errors
///
/// Returns a [`DeckError`] on parse failure, an empty gallery id, or a
/// zero autoplay delay.
pub fn parse_deck(text: &str, relaxed: bool) -> Result<Deck, DeckError> {
    let deck: Deck = if relaxed {
        json5::from_str(text)?
    } else {
        serde_json::from_str(text)?
    };
    validate(&deck)?;
    Ok(deck)
}

fn validate(deck: &Deck) -> Result<(), DeckError> {
    for (index, gallery) in deck.galleries.iter().enumerate() {
        if gallery.id.trim().is_empty() {
            return Err(DeckError::EmptyGalleryId { index });
        }
        if gallery.autoplay_delay_ms == 0 {
            return Err(DeckError::InvalidDelay {
                id: gallery.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::types::DEFAULT_AUTOPLAY_DELAY_MS;
    use super::*;
    use crate::deck::Deck;

    const MINIMAL: &str = r#"{
        "title": "Open Studio",
        "galleries": [
            {
                "id": "workshops",
                "title": "Workshops",
                "autoplay": true,
                "autoplay_delay_ms": 5000,
                "cards": [
                    {"title": "Clay basics", "summary": "Wheel throwing for beginners", "tag": "Hands-on"},
                    {"title": "Glaze lab", "summary": "Mixing and layering glazes"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_minimal_deck() {
        let deck = Deck::parse(MINIMAL).unwrap();
        assert_eq!(deck.title, "Open Studio");
        assert_eq!(deck.galleries.len(), 1);
        assert_eq!(deck.card_count(), 2);

        let gallery = deck.gallery("workshops").unwrap();
        assert!(gallery.autoplay);
        assert_eq!(gallery.autoplay_delay_ms, 5000);
        assert!(gallery.show_dots);
        assert!(gallery.show_navigation);
    }

    #[test]
    fn test_defaults_fill_omitted_fields() {
        let deck = Deck::parse(
            r#"{"title": "T", "galleries": [{"id": "g", "title": "G"}]}"#,
        )
        .unwrap();
        let gallery = &deck.galleries[0];
        assert!(gallery.cards.is_empty());
        assert!(!gallery.autoplay);
        assert_eq!(gallery.autoplay_delay_ms, DEFAULT_AUTOPLAY_DELAY_MS);
        assert!(deck.contact.is_none());
        assert_eq!(deck.tagline, "");
    }

    #[test]
    fn test_empty_card_list_is_not_an_error() {
        let deck = Deck::parse(
            r#"{"title": "T", "galleries": [{"id": "g", "title": "G", "cards": []}]}"#,
        )
        .unwrap();
        assert_eq!(deck.card_count(), 0);
    }

    #[test]
    fn test_zero_delay_is_rejected() {
        let err = Deck::parse(
            r#"{"title": "T", "galleries": [{"id": "g", "title": "G", "autoplay_delay_ms": 0}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DeckError::InvalidDelay { .. }));
    }

    #[test]
    fn test_blank_gallery_id_is_rejected() {
        let err = Deck::parse(
            r#"{"title": "T", "galleries": [{"id": "  ", "title": "G"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DeckError::EmptyGalleryId { index: 0 }));
    }

    #[test]
    fn test_malformed_json_reports_parse_error() {
        let err = Deck::parse("{\"title\": ").unwrap_err();
        assert!(matches!(err, DeckError::Json(_)));
    }

    #[test]
    fn test_json5_accepts_comments() {
        let text = r"{
            // hand-written deck
            title: 'Studio',
            galleries: [],
        }";
        let deck = parse_deck(text, true).unwrap();
        assert_eq!(deck.title, "Studio");
    }

    #[test]
    fn test_from_path_picks_parser_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let strict = dir.path().join("deck.json");
        std::fs::write(&strict, r#"{"title": "Strict"}"#).unwrap();
        assert_eq!(Deck::from_path(&strict).unwrap().title, "Strict");

        let relaxed = dir.path().join("deck.json5");
        std::fs::write(&relaxed, "{title: 'Relaxed' /* ok */}").unwrap();
        assert_eq!(Deck::from_path(&relaxed).unwrap().title, "Relaxed");
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let err = Deck::from_path("definitely-not-here.json").unwrap_err();
        assert!(matches!(err, DeckError::Io(_)));
    }
}
