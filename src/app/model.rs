use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::carousel::{Autoplay, Carousel};
use crate::deck::{Deck, DeckError};
use crate::form::ContactForm;
use crate::ui::CHROME_ROWS;
use crate::ui::page::{PageLayout, SectionKind, active_section, build_page};
use crate::ui::scroll::PageScroll;

/// How long a toast stays on screen.
const TOAST_VISIBLE: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which part of the page receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    Gallery(usize),
    Form,
}

/// Page-level overrides for the carousel widgets, resolved from config
/// and CLI flags before the model is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetOptions {
    pub autoplay: bool,
    pub autoplay_delay_ms: Option<u64>,
    pub show_dots: bool,
    pub show_navigation: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_delay_ms: None,
            show_dots: true,
            show_navigation: true,
        }
    }
}

/// One gallery's widget instance, addressed by the gallery id.
///
/// The model owns this mapping and is the sole caller of
/// [`Carousel::refresh_layout`]; widgets are never looked up through any
/// global registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    pub id: String,
    pub carousel: Carousel,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The loaded deck document
    pub deck: Deck,
    /// Path to the deck file
    pub deck_path: PathBuf,
    /// Carousel instances, parallel to `deck.galleries`
    pub galleries: Vec<GalleryState>,
    /// Contact form state
    pub form: ContactForm,
    /// Scroll window over the laid-out page
    pub scroll: PageScroll,
    /// The laid-out page and its hit-test spans
    pub layout: PageLayout,
    /// Terminal width the page was laid out for
    pub width: u16,
    /// Current input focus
    pub focus: Focus,
    /// Gallery currently under the pointer (autoplay pause)
    pub hovered_gallery: Option<usize>,
    /// Whether deck file watching is enabled
    pub watch_enabled: bool,
    /// Global dot-indicator override
    pub show_dots: bool,
    /// Global navigation-arrow override
    pub show_navigation: bool,
    /// Global autoplay kill switch
    pub autoplay_enabled: bool,
    autoplay_delay_override: Option<u64>,
    toast: Option<Toast>,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("deck_path", &self.deck_path)
            .field("focus", &self.focus)
            .field("watch_enabled", &self.watch_enabled)
            .field("galleries", &self.galleries.len())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model for a parsed deck.
    pub fn new(
        deck: Deck,
        deck_path: PathBuf,
        options: WidgetOptions,
        terminal_size: (u16, u16),
    ) -> Self {
        let (width, height) = terminal_size;
        let galleries = build_gallery_states(&deck, options, width);
        let mut model = Self {
            deck,
            deck_path,
            galleries,
            form: ContactForm::new(),
            scroll: PageScroll::new(height.saturating_sub(CHROME_ROWS), 0),
            layout: PageLayout::default(),
            width,
            focus: Focus::Page,
            hovered_gallery: None,
            watch_enabled: false,
            show_dots: options.show_dots,
            show_navigation: options.show_navigation,
            autoplay_enabled: options.autoplay,
            autoplay_delay_override: options.autoplay_delay_ms,
            toast: None,
            help_visible: false,
            should_quit: false,
            config_global_path: None,
            config_local_path: None,
        };
        model.refresh_page();
        model
    }

    /// Arm every configured autoplay timer.
    pub fn start_autoplay(&mut self, now: Instant) {
        for gallery in &mut self.galleries {
            gallery.carousel.autoplay_mut().start(now);
        }
    }

    /// Re-lay the page out for the current state and width.
    pub fn refresh_page(&mut self) {
        let layout = build_page(self, self.width);
        self.scroll.set_total_lines(layout.lines.len());
        self.layout = layout;
    }

    /// Apply a debounced terminal resize: refresh every carousel's
    /// layout, then re-lay the page out.
    pub fn apply_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.scroll.resize(height.saturating_sub(CHROME_ROWS));
        for gallery in &mut self.galleries {
            gallery.carousel.refresh_layout(width);
        }
        self.refresh_page();
    }

    /// Advance all clock-driven state. Returns true when a repaint is
    /// needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.expire_toast(now);

        for (index, gallery) in self.galleries.iter_mut().enumerate() {
            if gallery.carousel.autoplay_mut().take_fire(now) {
                gallery.carousel.next();
                crate::perf::log_event(
                    "autoplay.fire",
                    format!("gallery={index} index={}", gallery.carousel.current()),
                );
                changed = true;
            }
        }

        let was_busy = self.form.is_busy();
        if self.form.tick(now) {
            if was_busy && self.form.success_visible() {
                self.show_toast(ToastLevel::Info, "Message sent");
            }
            changed = true;
        }

        if changed {
            self.refresh_page();
        }
        changed
    }

    /// The soonest armed deadline across autoplay timers, the form
    /// lifecycle, and the toast. Bounds the event loop's poll timeout.
    pub fn next_timer_deadline(&self) -> Option<Instant> {
        let mut soonest: Option<Instant> = None;
        let mut consider = |deadline: Option<Instant>| {
            if let Some(deadline) = deadline {
                soonest = Some(soonest.map_or(deadline, |s| s.min(deadline)));
            }
        };
        for gallery in &self.galleries {
            consider(gallery.carousel.autoplay().next_deadline());
        }
        consider(self.form.next_deadline());
        consider(self.toast.as_ref().map(|t| t.expires_at));
        soonest
    }

    /// Track the gallery under the pointer, pausing its autoplay and
    /// resuming the one the pointer left.
    pub(super) fn set_hovered_gallery(&mut self, hovered: Option<usize>, now: Instant) {
        if self.hovered_gallery == hovered {
            return;
        }
        if let Some(old) = self.hovered_gallery
            && let Some(gallery) = self.galleries.get_mut(old)
        {
            gallery.carousel.autoplay_mut().resume(now);
        }
        if let Some(new) = hovered
            && let Some(gallery) = self.galleries.get_mut(new)
        {
            gallery.carousel.autoplay_mut().pause();
        }
        self.hovered_gallery = hovered;
    }

    /// Cycle focus: page, each non-empty gallery, then the form.
    pub(super) fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let current = order
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        let len = order.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.focus = order[next];
        self.scroll_focus_into_view();
    }

    fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Page];
        for (index, gallery) in self.galleries.iter().enumerate() {
            // An empty gallery exposes no navigation.
            if !gallery.carousel.is_empty() {
                order.push(Focus::Gallery(index));
            }
        }
        if self.deck.contact.is_some() {
            order.push(Focus::Form);
        }
        order
    }

    /// Scroll the focused section to the top of the window.
    pub(super) fn scroll_focus_into_view(&mut self) {
        let target = match self.focus {
            Focus::Page => None,
            Focus::Gallery(index) => self
                .layout
                .sections
                .iter()
                .find(|s| s.kind == SectionKind::Gallery(index)),
            Focus::Form => self
                .layout
                .sections
                .iter()
                .find(|s| s.kind == SectionKind::Contact),
        };
        if let Some(section) = target {
            let line = section.lines.start;
            self.scroll.go_to_line(line);
        }
    }

    /// Index of the section the scroll window currently rests on.
    pub fn active_section_index(&self) -> Option<usize> {
        active_section(&self.layout.sections, self.scroll.offset())
    }

    /// The focused gallery's current card, if focus is on a gallery.
    pub fn focused_card(&self) -> Option<&crate::deck::Card> {
        let Focus::Gallery(index) = self.focus else {
            return None;
        };
        let carousel = &self.galleries.get(index)?.carousel;
        if carousel.is_empty() {
            return None;
        }
        self.deck.galleries.get(index)?.cards.get(carousel.current())
    }

    /// Re-read the deck from disk, rebuilding widget instances.
    ///
    /// Carousel indices reset because slide counts may have changed; the
    /// form keeps whatever the user has typed.
    ///
    /// # Errors
    ///
    /// Returns a [`DeckError`] and leaves the previous deck in place if
    /// the file cannot be read or parsed.
    pub(super) fn reload_deck(&mut self) -> Result<(), DeckError> {
        let deck = Deck::from_path(&self.deck_path)?;
        let options = WidgetOptions {
            autoplay: self.autoplay_enabled,
            autoplay_delay_ms: self.autoplay_delay_override,
            show_dots: self.show_dots,
            show_navigation: self.show_navigation,
        };
        self.galleries = build_gallery_states(&deck, options, self.width);
        self.deck = deck;
        self.hovered_gallery = None;
        self.start_autoplay(Instant::now());

        // Focus may point at a gallery that no longer exists.
        match self.focus {
            Focus::Gallery(index) if index >= self.galleries.len() => {
                self.focus = Focus::Page;
            }
            Focus::Form if self.deck.contact.is_none() => {
                self.focus = Focus::Page;
            }
            _ => {}
        }
        self.refresh_page();
        Ok(())
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_VISIBLE,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

fn build_gallery_states(deck: &Deck, options: WidgetOptions, width: u16) -> Vec<GalleryState> {
    deck.galleries
        .iter()
        .map(|gallery| {
            let delay_ms = options
                .autoplay_delay_ms
                .unwrap_or(gallery.autoplay_delay_ms);
            let autoplay = Autoplay::new(
                gallery.autoplay && options.autoplay,
                Duration::from_millis(delay_ms),
            );
            GalleryState {
                id: gallery.id.clone(),
                carousel: Carousel::new(gallery.cards.len(), width, autoplay),
            }
        })
        .collect()
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        let deck = Deck {
            title: String::new(),
            tagline: String::new(),
            galleries: Vec::new(),
            contact: None,
        };
        Self::new(deck, PathBuf::new(), WidgetOptions::default(), (80, 24))
    }
}
