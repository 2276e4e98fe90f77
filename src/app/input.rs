use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Focus, Message, Model};
use crate::form::Field;
use crate::ui::page::{ARROW_GUTTER, dot_hit};
use crate::ui::{NAV_BAR_ROWS, nav_spans};

use super::event_loop::ResizeDebouncer;

/// Minimum horizontal drag, in columns, for a release to count as a
/// swipe rather than a click.
pub(super) const SWIPE_THRESHOLD_COLS: u16 = 5;

/// Tracks an in-flight pointer drag over a gallery's card row.
#[derive(Debug, Default)]
pub(super) struct SwipeTracker {
    start: Option<(u16, usize)>,
}

impl SwipeTracker {
    pub(super) const fn new() -> Self {
        Self { start: None }
    }

    pub(super) const fn begin(&mut self, col: u16, gallery: usize) {
        self.start = Some((col, gallery));
    }

    /// Close the drag, reporting the gallery and the signed displacement
    /// (positive = leftward drag).
    pub(super) const fn finish(&mut self, col: u16) -> Option<(usize, i32)> {
        let Some((start_col, gallery)) = self.start else {
            return None;
        };
        self.start = None;
        Some((gallery, start_col as i32 - col as i32))
    }
}

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
        swipe: &mut SwipeTracker,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model, swipe),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Quit);
        }

        match model.focus {
            Focus::Form => return handle_form_key(key),
            Focus::Gallery(index) => {
                if let Some(msg) = handle_gallery_key(key, index) {
                    return Some(msg);
                }
            }
            Focus::Page => {
                if let KeyCode::Char(c @ '1'..='9') = key.code {
                    let index = c as usize - '1' as usize;
                    return Some(Message::GoToSection(index));
                }
            }
        }

        // Shared page navigation
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if model.scroll.can_scroll_down() {
                    Some(Message::ScrollDown(1))
                } else {
                    None
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if model.scroll.can_scroll_up() {
                    Some(Message::ScrollUp(1))
                } else {
                    None
                }
            }
            KeyCode::Char(' ') | KeyCode::PageDown => {
                if model.scroll.can_scroll_down() {
                    Some(Message::PageDown)
                } else {
                    None
                }
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                if model.scroll.can_scroll_up() {
                    Some(Message::PageUp)
                } else {
                    None
                }
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            KeyCode::Tab => Some(Message::FocusNext),
            KeyCode::BackTab => Some(Message::FocusPrevious),
            KeyCode::Esc => Some(Message::FocusPage),

            KeyCode::Char('w') => Some(Message::ToggleWatch),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Message::ForceReload),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            KeyCode::Char('q') => Some(Message::Quit),

            _ => None,
        }
    }

    fn handle_mouse(mouse: MouseEvent, model: &Model, swipe: &mut SwipeTracker) -> Option<Message> {
        if model.help_visible {
            if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
                return Some(Message::HideHelp);
            }
            return None;
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => return Some(Message::ScrollDown(3)),
            MouseEventKind::ScrollUp => return Some(Message::ScrollUp(3)),
            _ => {}
        }

        // Navigation bar row
        if mouse.row < NAV_BAR_ROWS {
            if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
                let col = mouse.column as usize;
                return nav_spans(&model.layout.sections)
                    .iter()
                    .position(|(_, span)| span.contains(&col))
                    .map(Message::GoToSection);
            }
            if matches!(mouse.kind, MouseEventKind::Moved) && model.hovered_gallery.is_some() {
                return Some(Message::HoverGallery(None));
            }
            return None;
        }

        // A release always closes an in-flight drag, even off the page
        // window; only the horizontal displacement matters.
        if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left))
            && let Some((gallery, delta)) = swipe.finish(mouse.column)
        {
            if delta > i32::from(SWIPE_THRESHOLD_COLS) {
                return Some(Message::NextSlide(gallery));
            }
            if delta < -i32::from(SWIPE_THRESHOLD_COLS) {
                return Some(Message::PreviousSlide(gallery));
            }
            // At or below threshold the release is an ordinary click.
        }

        let page_line = page_line_for_row(model, mouse.row)?;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(span) = model.layout.gallery_at_line(page_line)
                    && span.card_rows.contains(&page_line)
                {
                    swipe.begin(mouse.column, span.gallery);
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                resolve_click(model, mouse.column, page_line)
            }
            MouseEventKind::Moved => {
                let hovered = model
                    .layout
                    .gallery_at_line(page_line)
                    .map(|span| span.gallery);
                if hovered == model.hovered_gallery {
                    None
                } else {
                    Some(Message::HoverGallery(hovered))
                }
            }
            _ => None,
        }
    }
}

fn handle_form_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::FocusPage),
        KeyCode::Tab | KeyCode::Down => Some(Message::FormNextField),
        KeyCode::BackTab | KeyCode::Up => Some(Message::FormPreviousField),
        KeyCode::Enter => Some(Message::FormSubmit),
        KeyCode::Backspace => Some(Message::FormBackspace),
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            Some(Message::FormInput(c))
        }
        _ => None,
    }
}

fn handle_gallery_key(key: KeyEvent, index: usize) -> Option<Message> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Message::PreviousSlide(index)),
        KeyCode::Right | KeyCode::Char('l') => Some(Message::NextSlide(index)),
        KeyCode::Char(c @ '1'..='9') => Some(Message::GoToPage {
            gallery: index,
            page: c as usize - '1' as usize,
        }),
        KeyCode::Char('y') => Some(Message::CopyCardLink),
        _ => None,
    }
}

/// Map a terminal row inside the page window to a page line.
fn page_line_for_row(model: &Model, row: u16) -> Option<usize> {
    let rel = row.checked_sub(NAV_BAR_ROWS)?;
    if rel >= model.scroll.height() {
        return None;
    }
    let line = model.scroll.offset() + rel as usize;
    (line < model.layout.lines.len()).then_some(line)
}

/// Resolve a plain click against the layout's hit-test spans.
fn resolve_click(model: &Model, col: u16, page_line: usize) -> Option<Message> {
    if let Some(span) = model.layout.gallery_at_line(page_line) {
        if span.card_rows.contains(&page_line) {
            let arrows = model.show_navigation
                && model
                    .deck
                    .galleries
                    .get(span.gallery)
                    .is_some_and(|g| g.show_navigation);
            if arrows && col < ARROW_GUTTER {
                return Some(Message::PreviousSlide(span.gallery));
            }
            if arrows && col >= model.width.saturating_sub(ARROW_GUTTER) {
                return Some(Message::NextSlide(span.gallery));
            }
            return Some(Message::FocusGallery(span.gallery));
        }
        if span.dots_row == Some(page_line) {
            if let Some(page) = dot_hit(model.width, span.dot_count, col) {
                return Some(Message::GoToPage {
                    gallery: span.gallery,
                    page,
                });
            }
        }
        return Some(Message::FocusGallery(span.gallery));
    }

    if let Some(form) = model.layout.form.as_ref()
        && form.lines.contains(&page_line)
    {
        for (slot, field) in Field::ALL.into_iter().enumerate() {
            if form.field_rows[slot] == Some(page_line) {
                return Some(Message::FocusFormField(field));
            }
        }
        return Some(Message::FocusFormField(Field::Name));
    }

    None
}
