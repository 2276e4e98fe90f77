use std::time::Instant;

use crate::app::{Focus, Model};
use crate::form::Field;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Page navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one window
    PageUp,
    /// Scroll down one window
    PageDown,
    /// Go to the top of the page
    GoToTop,
    /// Go to the bottom of the page
    GoToBottom,
    /// Jump to a section by index (nav bar entry)
    GoToSection(usize),

    // Focus
    /// Cycle focus forward: page, galleries, form
    FocusNext,
    /// Cycle focus backward
    FocusPrevious,
    /// Return focus to the page
    FocusPage,
    /// Focus a specific gallery
    FocusGallery(usize),
    /// Focus the form on a specific field
    FocusFormField(Field),

    // Carousel
    /// Advance a gallery by one slide
    NextSlide(usize),
    /// Step a gallery back one slide
    PreviousSlide(usize),
    /// Jump a gallery to a dot page
    GoToPage { gallery: usize, page: usize },
    /// Pointer entered/left a gallery (autoplay pause/resume)
    HoverGallery(Option<usize>),

    // Form
    /// Move form focus to the next field (blur-validates)
    FormNextField,
    /// Move form focus to the previous field (blur-validates)
    FormPreviousField,
    /// Type a character into the focused field
    FormInput(char),
    /// Delete the last character of the focused field
    FormBackspace,
    /// Validate everything and start the simulated submission
    FormSubmit,

    // Deck file
    /// Toggle deck file watching
    ToggleWatch,
    /// Force reload the deck
    ForceReload,
    /// Deck changed externally, reload
    DeckChanged,
    /// Copy the focused card's link
    CopyCardLink,

    // Window
    /// Terminal resized (already debounced)
    Resize(u16, u16),

    // Application
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Side effects (clipboard, reload, watcher) run afterwards in
/// `handle_message_side_effects`.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Page navigation
        Message::ScrollUp(n) => model.scroll.scroll_up(n),
        Message::ScrollDown(n) => model.scroll.scroll_down(n),
        Message::PageUp => model.scroll.page_up(),
        Message::PageDown => model.scroll.page_down(),
        Message::GoToTop => model.scroll.go_to_top(),
        Message::GoToBottom => model.scroll.go_to_bottom(),
        Message::GoToSection(index) => {
            if let Some(section) = model.layout.sections.get(index) {
                let line = section.lines.start;
                model.scroll.go_to_line(line);
            }
        }

        // Focus
        Message::FocusNext => model.cycle_focus(true),
        Message::FocusPrevious => model.cycle_focus(false),
        Message::FocusPage => model.focus = Focus::Page,
        Message::FocusGallery(index) => {
            if model
                .galleries
                .get(index)
                .is_some_and(|g| !g.carousel.is_empty())
            {
                model.focus = Focus::Gallery(index);
            }
        }
        Message::FocusFormField(field) => {
            if model.deck.contact.is_some() {
                model.focus = Focus::Form;
                model.form.focus(field);
            }
        }

        // Carousel
        Message::NextSlide(index) => {
            if let Some(gallery) = model.galleries.get_mut(index) {
                gallery.carousel.next();
            }
        }
        Message::PreviousSlide(index) => {
            if let Some(gallery) = model.galleries.get_mut(index) {
                gallery.carousel.previous();
            }
        }
        Message::GoToPage { gallery, page } => {
            if let Some(state) = model.galleries.get_mut(gallery) {
                // The dot caller honors the page-aligned go_to contract.
                let carousel = &mut state.carousel;
                if page < carousel.page_count() {
                    carousel.go_to(page * carousel.visible_count());
                }
            }
        }
        Message::HoverGallery(hovered) => {
            model.set_hovered_gallery(hovered, Instant::now());
        }

        // Form
        Message::FormNextField => model.form.focus_next(),
        Message::FormPreviousField => model.form.focus_previous(),
        Message::FormInput(c) => model.form.input(c),
        Message::FormBackspace => model.form.backspace(),
        Message::FormSubmit => {
            model.form.submit(Instant::now());
        }

        // Deck file
        Message::ToggleWatch => model.watch_enabled = !model.watch_enabled,
        // Reload and copy are pure no-ops here; they run as side effects.
        Message::ForceReload | Message::DeckChanged | Message::CopyCardLink => {}

        // Window
        Message::Resize(width, height) => {
            model.apply_resize(width, height);
        }

        // Application
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Quit => model.should_quit = true,
    }

    model.refresh_page();
    model
}
