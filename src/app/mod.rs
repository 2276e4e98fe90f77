//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Focus, GalleryState, Model, ToastLevel, WidgetOptions};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    deck_path: PathBuf,
    watch_enabled: bool,
    options: WidgetOptions,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application for the given deck file.
    pub fn new(deck_path: PathBuf) -> Self {
        Self {
            deck_path,
            watch_enabled: false,
            options: WidgetOptions::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable deck file watching.
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Globally enable or disable autoplay, overriding the deck.
    pub const fn with_autoplay(mut self, enabled: bool) -> Self {
        self.options.autoplay = enabled;
        self
    }

    /// Override every gallery's autoplay cadence, in milliseconds.
    pub const fn with_autoplay_delay(mut self, delay_ms: Option<u64>) -> Self {
        self.options.autoplay_delay_ms = delay_ms;
        self
    }

    /// Show or hide dot indicators for all galleries.
    pub const fn with_dots(mut self, show: bool) -> Self {
        self.options.show_dots = show;
        self
    }

    /// Show or hide the previous/next arrows for all galleries.
    pub const fn with_navigation(mut self, show: bool) -> Self {
        self.options.show_navigation = show;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
