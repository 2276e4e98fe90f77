use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::app::{Focus, Message, Model, WidgetOptions, update};
use crate::deck::Deck;

use super::page::{
    CARD_ROWS, SCROLL_SPY_BIAS, SectionKind, active_section, build_page, center_pad, dot_hit,
    dots_line, truncate_to_width, wrap_to_width,
};
use super::{nav_spans, render};

const DECK: &str = r#"{
    "title": "Open Studio",
    "tagline": "Ceramics courses and residencies",
    "galleries": [
        {
            "id": "courses",
            "title": "Courses",
            "cards": [
                {"title": "Clay basics", "summary": "Wheel throwing for beginners", "tag": "Hands-on", "link": "https://example.org/clay"},
                {"title": "Glaze lab", "summary": "Mixing and layering glazes"},
                {"title": "Raku firing", "summary": "Outdoor firing weekend"},
                {"title": "Sculpture", "summary": "Hand building at scale"},
                {"title": "Porcelain", "summary": "Thin walled vessels"},
                {"title": "Tile making", "summary": "Pattern and repetition"}
            ]
        },
        {"id": "empty", "title": "Coming Soon", "cards": []}
    ],
    "contact": {"heading": "Contact", "blurb": "Questions? Write to us."}
}"#;

fn test_model(size: (u16, u16)) -> Model {
    Model::new(
        Deck::parse(DECK).unwrap(),
        PathBuf::from("deck.json"),
        WidgetOptions::default(),
        size,
    )
}

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).unwrap()
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

#[test]
fn test_sections_tile_the_page() {
    let model = test_model((120, 40));
    let page = build_page(&model, 120);

    assert_eq!(page.sections.len(), 4);
    assert_eq!(page.sections[0].kind, SectionKind::Hero);
    assert_eq!(page.sections[0].lines.start, 0);
    for pair in page.sections.windows(2) {
        assert_eq!(pair[0].lines.end, pair[1].lines.start);
    }
    assert_eq!(
        page.sections.last().unwrap().lines.end,
        page.lines.len()
    );
}

#[test]
fn test_gallery_span_geometry() {
    let model = test_model((120, 40));
    let page = build_page(&model, 120);

    let span = &page.galleries[0];
    assert_eq!(span.card_rows.len(), CARD_ROWS);
    let dots_row = span.dots_row.unwrap();
    assert_eq!(dots_row, span.card_rows.end);
    // 6 cards at two-up: 3 dots.
    assert_eq!(span.dot_count, 3);
}

#[test]
fn test_empty_gallery_renders_no_widget() {
    let model = test_model((120, 40));
    let page = build_page(&model, 120);

    let span = &page.galleries[1];
    assert!(span.card_rows.is_empty());
    assert!(span.dots_row.is_none());
    assert_eq!(span.dot_count, 0);
}

#[test]
fn test_active_section_tracks_scroll_with_bias() {
    let model = test_model((120, 40));
    let page = build_page(&model, 120);

    assert_eq!(active_section(&page.sections, 0), Some(0));

    let gallery_start = page.sections[1].lines.start;
    assert_eq!(
        active_section(&page.sections, gallery_start - SCROLL_SPY_BIAS),
        Some(1)
    );
    assert_eq!(active_section(&page.sections, gallery_start + 1), Some(1));
}

#[test]
fn test_active_section_empty_page() {
    assert_eq!(active_section(&[], 0), None);
}

#[test]
fn test_dots_line_marks_active_page() {
    assert_eq!(dots_line(3, 0), "\u{25cf} \u{25cb} \u{25cb}");
    assert_eq!(dots_line(3, 2), "\u{25cb} \u{25cb} \u{25cf}");
}

#[test]
fn test_dot_hit_maps_centered_columns() {
    // 2 dots at width 80: row is 3 wide, starting at column 38.
    assert_eq!(dot_hit(80, 2, 37), None);
    assert_eq!(dot_hit(80, 2, 38), Some(0));
    assert_eq!(dot_hit(80, 2, 40), Some(1));
    assert_eq!(dot_hit(80, 2, 41), None);
    assert_eq!(dot_hit(80, 0, 40), None);
}

#[test]
fn test_truncate_to_width_ellipsizes() {
    assert_eq!(truncate_to_width("short", 10), "short");
    assert_eq!(truncate_to_width("a longer title", 8), "a longe\u{2026}");
}

#[test]
fn test_wrap_to_width_breaks_on_words() {
    let lines = wrap_to_width("wheel throwing for beginners", 14, 2);
    assert_eq!(lines, vec!["wheel throwing", "for beginners"]);

    let capped = wrap_to_width("one two three four five six seven", 8, 2);
    assert_eq!(capped.len(), 2);
}

#[test]
fn test_center_pad_centers_text() {
    let padded = center_pad("abc", 9);
    assert_eq!(padded, "   abc");
}

#[test]
fn test_nav_spans_are_ordered_and_disjoint() {
    let model = test_model((120, 40));
    let spans = nav_spans(&model.layout.sections);

    assert_eq!(spans.len(), 4);
    for pair in spans.windows(2) {
        assert!(pair[0].1.end <= pair[1].1.start);
    }
}

#[test]
fn test_render_shows_hero_and_cards() {
    let mut model = test_model((120, 40));
    let mut terminal = create_test_terminal(120, 40);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("Open Studio"));
    assert!(content.contains("Courses"));
    assert!(content.contains("Clay basics"));
    assert!(content.contains("\u{25cf}"), "active dot should render");
    assert!(content.contains("\u{276e}"), "prev arrow should render");
}

#[test]
fn test_render_marks_focused_gallery() {
    let mut model = test_model((120, 40));
    model = update(model, Message::FocusGallery(0));
    assert_eq!(model.focus, Focus::Gallery(0));

    let mut terminal = create_test_terminal(120, 40);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();
    assert!(buffer_text(&terminal).contains("> Courses"));
}

#[test]
fn test_render_shows_field_errors_after_blur() {
    let mut model = test_model((120, 40));
    model = update(model, Message::FocusFormField(crate::form::Field::Name));
    model = update(model, Message::FormInput('A'));
    model = update(model, Message::FormNextField);

    // Scroll the contact section into view before drawing.
    let contact = model
        .layout
        .sections
        .iter()
        .position(|s| s.kind == SectionKind::Contact)
        .unwrap();
    model = update(model, Message::GoToSection(contact));

    let mut terminal = create_test_terminal(120, 40);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();
    assert!(buffer_text(&terminal).contains("Enter a name of at least 2 characters"));
}

#[test]
fn test_render_without_dots_when_disabled() {
    let options = WidgetOptions {
        show_dots: false,
        ..WidgetOptions::default()
    };
    let mut model = Model::new(
        Deck::parse(DECK).unwrap(),
        PathBuf::from("deck.json"),
        options,
        (120, 40),
    );
    let mut terminal = create_test_terminal(120, 40);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(!content.contains('\u{25cf}'));
    assert!(!content.contains('\u{25cb}'));
}

#[test]
fn test_render_tiny_terminal_is_a_no_op() {
    let mut model = test_model((20, 2));
    let mut terminal = create_test_terminal(20, 2);
    // Must not panic or slice out of bounds.
    terminal.draw(|frame| render(&mut model, frame)).unwrap();
}
