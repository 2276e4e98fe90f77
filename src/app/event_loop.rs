use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::deck::Deck;
use crate::watcher::DeckWatcher;

use super::input::SwipeTracker;

/// Quiet period after the last resize event before layout reflows.
pub(super) const RESIZE_DEBOUNCE_MS: u64 = 250;
/// Deck watcher debounce.
const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);
/// Idle poll ceiling when no deadline is armed.
const IDLE_POLL_MS: u64 = 250;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, deck parsing, or the
    /// event loop encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let load_scope = crate::perf::scope("app.load_deck");
        let deck = Deck::from_path(&self.deck_path)
            .with_context(|| format!("Failed to load deck {}", self.deck_path.display()))?;
        drop(load_scope);

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; vitrine requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        let mut model = Model::new(
            deck,
            self.deck_path.clone(),
            self.options,
            (size.width, size.height),
        );
        model.watch_enabled = self.watch_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model.start_autoplay(Instant::now());

        execute!(stdout(), EnableMouseCapture)?;

        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(RESIZE_DEBOUNCE_MS);
        let mut swipe = SwipeTracker::new();
        let mut file_watcher = if model.watch_enabled {
            match DeckWatcher::new(&model.deck_path, WATCH_DEBOUNCE) {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    model.watch_enabled = false;
                    model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                    None
                }
            }
        } else {
            None
        };
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            // Clock-driven state: autoplay fires, form lifecycle, toasts.
            if model.tick(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if model.watch_enabled
                && file_watcher
                    .as_mut()
                    .is_some_and(DeckWatcher::take_change_ready)
            {
                *model = update(std::mem::take(model), Message::DeckChanged);
                Self::handle_message_side_effects(model, &mut file_watcher, &Message::DeckChanged);
                needs_render = true;
            }

            let poll_ms = poll_timeout_ms(model, &resize_debouncer, needs_render);
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh timestamp after the poll wait so the debouncer
                // uses accurate times.
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let msg = Self::handle_event(
                    &event::read()?,
                    model,
                    event_ms,
                    &mut resize_debouncer,
                    &mut swipe,
                );
                if let Some(msg) = msg {
                    crate::perf::log_event("event.message", format!("frame={frame_idx} msg={msg:?}"));
                    let side_msg = msg.clone();
                    *model = update(std::mem::take(model), msg);
                    Self::handle_message_side_effects(model, &mut file_watcher, &side_msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg = Self::handle_event(
                        &event::read()?,
                        model,
                        drain_ms,
                        &mut resize_debouncer,
                        &mut swipe,
                    );
                    if let Some(msg) = msg {
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &mut file_watcher, &side_msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0
                    ),
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}

/// Bound the poll timeout by the soonest armed deadline so autoplay and
/// form transitions fire close to on time without busy-waiting.
fn poll_timeout_ms(model: &Model, resize_debouncer: &ResizeDebouncer, needs_render: bool) -> u64 {
    if needs_render {
        return 0;
    }
    if resize_debouncer.is_pending() {
        return 10;
    }
    model.next_timer_deadline().map_or(IDLE_POLL_MS, |deadline| {
        let until = deadline.saturating_duration_since(Instant::now());
        u64::try_from(until.as_millis())
            .unwrap_or(IDLE_POLL_MS)
            .min(IDLE_POLL_MS)
    })
}
