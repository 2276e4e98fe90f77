use std::io::{Write, stdout};
use std::time::Duration;

use base64::Engine;

use crate::app::{App, Message, Model, ToastLevel};
use crate::watcher::DeckWatcher;

const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);

impl App {
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        file_watcher: &mut Option<DeckWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::ToggleWatch => {
                if model.watch_enabled {
                    match DeckWatcher::new(&model.deck_path, WATCH_DEBOUNCE) {
                        Ok(watcher) => {
                            *file_watcher = Some(watcher);
                            model.show_toast(ToastLevel::Info, "Watching deck changes");
                        }
                        Err(err) => {
                            model.watch_enabled = false;
                            *file_watcher = None;
                            model.show_toast(
                                ToastLevel::Warning,
                                format!("Watch unavailable: {err}"),
                            );
                            crate::perf::log_event(
                                "watcher.error",
                                format!("failed path={} err={err}", model.deck_path.display()),
                            );
                        }
                    }
                } else {
                    *file_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
            }
            Message::ForceReload | Message::DeckChanged => {
                if let Err(err) = model.reload_deck() {
                    model.show_toast(ToastLevel::Error, format!("Reload failed: {err}"));
                    crate::perf::log_event(
                        "reload.error",
                        format!("failed path={} err={err}", model.deck_path.display()),
                    );
                } else if matches!(msg, Message::ForceReload) {
                    model.show_toast(ToastLevel::Info, "Deck reloaded");
                }
            }
            Message::CopyCardLink => {
                Self::copy_focused_card_link(model);
            }
            _ => {}
        }
    }

    /// Copy the focused card's link to the system clipboard via OSC 52.
    fn copy_focused_card_link(model: &mut Model) {
        let Some(card) = model.focused_card() else {
            return;
        };
        let Some(link) = card.link.clone() else {
            model.show_toast(ToastLevel::Warning, "Card has no link");
            return;
        };
        match write_osc52(&link) {
            Ok(()) => model.show_toast(ToastLevel::Info, format!("Copied {link}")),
            Err(err) => {
                model.show_toast(ToastLevel::Warning, format!("Copy failed: {err}"));
            }
        }
    }
}

// OSC 52 works through SSH and most terminal emulators; there is no
// display-server clipboard dependency.
fn write_osc52(text: &str) -> std::io::Result<()> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    let mut out = stdout();
    write!(out, "\x1b]52;c;{encoded}\x07")?;
    out.flush()
}
