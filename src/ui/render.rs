use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::Model;

use super::page::SectionSpan;
use super::{CHROME_ROWS, overlays, status};

/// Brand label at the left edge of the navigation bar.
pub const NAV_BRAND: &str = " vitrine ";

/// Render the complete UI: navigation bar, page window, toast, status.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    if area.height < CHROME_ROWS + 1 {
        return;
    }

    let nav_area = Rect::new(area.x, area.y, area.width, 1);
    let page_area = Rect::new(
        area.x,
        area.y + 1,
        area.width,
        area.height - CHROME_ROWS,
    );
    let status_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

    render_nav_bar(model, frame, nav_area);
    render_page(model, frame, page_area);

    // The toast overlays the bottom page row rather than reflowing it.
    let toast_area = Rect::new(area.x, status_area.y.saturating_sub(1), area.width, 1);
    status::render_toast_bar(model, frame, toast_area);
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

/// Column extents of each navigation entry, in section order.
///
/// The renderer and the mouse hit-test both derive geometry from this,
/// so a click always lands on the entry that was drawn.
pub fn nav_spans(sections: &[SectionSpan]) -> Vec<(String, Range<usize>)> {
    let mut out = Vec::new();
    let mut col = NAV_BRAND.width();
    for section in sections {
        col += 1; // separator
        let text = format!(" {} ", section.title);
        let width = text.width();
        out.push((text, col..col + width));
        col += width;
    }
    out
}

fn render_nav_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let active = model.active_section_index();

    let mut spans = vec![Span::styled(
        NAV_BRAND,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    for (index, (text, _)) in nav_spans(&model.layout.sections).into_iter().enumerate() {
        spans.push(Span::styled(
            "\u{2502}",
            Style::default().fg(Color::Indexed(240)),
        ));
        let style = if active == Some(index) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(text, style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_page(model: &Model, frame: &mut Frame, area: Rect) {
    let range = model.scroll.visible_range();
    let lines: Vec<Line> = model.layout.lines[range].to_vec();
    frame.render_widget(Paragraph::new(lines), area);
}
