//! Deck file watching for live reload.
//!
//! Uses the notify crate for cross-platform file system events. Editors
//! save through renames and temp files on some platforms, so the watch
//! covers the deck's parent directory and filters events down to the
//! deck file itself, debounced to a quiet period.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches one deck file and reports debounced change notifications.
pub struct DeckWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    deck_path: PathBuf,
    deck_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl DeckWatcher {
    /// Create a watcher for the deck at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the watcher cannot be created or the parent
    /// directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Canonicalize so OS-reported event paths match the stored path.
        let deck_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let deck_name = deck_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = deck_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            deck_path,
            deck_name,
            debounce,
            pending_since: None,
        })
    }

    /// The canonical path of the watched deck.
    pub fn deck_path(&self) -> &Path {
        &self.deck_path
    }

    /// Drain pending events; returns true once a debounced change is ready.
    pub fn take_change_ready(&mut self) -> bool {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => {
                    self.pending_since = Some(Instant::now());
                }
                Ok(_) => {}
                Err(err) => {
                    crate::perf::log_event("watcher.error", format!("{err}"));
                }
            }
        }

        let Some(pending_since) = self.pending_since else {
            return false;
        };
        if pending_since.elapsed() >= self.debounce {
            self.pending_since = None;
            return true;
        }
        false
    }

    // Some backends report only the directory, so directory-level events
    // count as relevant too.
    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.deck_path
                || self
                    .deck_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}
