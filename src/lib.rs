// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. deck::DeckError)
    clippy::module_name_repetitions
)]

//! # Vitrine
//!
//! A terminal carousel viewer for showcase card decks.
//!
//! Vitrine presents a deck file (hero banner, card galleries, contact
//! form) as a scrollable terminal page:
//! - Carousel galleries with dot indicators, arrows, and autoplay
//! - Keyboard, mouse, and swipe navigation
//! - Contact form with inline validation and simulated submission
//! - Deck file watching for live reload
//!
//! ## Architecture
//!
//! Vitrine uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`carousel`]: The carousel state machine and autoplay timer
//! - [`deck`]: Deck file parsing
//! - [`form`]: Contact form validation and submission lifecycle
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: Deck file watching

pub mod app;
pub mod carousel;
pub mod config;
pub mod deck;
pub mod form;
pub mod perf;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::carousel::{Autoplay, Carousel};
    pub use crate::deck::Deck;
    pub use crate::ui::scroll::PageScroll;
}
