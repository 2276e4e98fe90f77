use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn help_rect(area: Rect) -> Rect {
    let popup_width = area.width.saturating_sub(16).clamp(40, 64);
    let popup_height = area.height.saturating_sub(4).clamp(12, 22);
    centered_popup_rect(popup_width, popup_height, area)
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup = help_rect(area);

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let entry = |key: &str, what: &str| {
        Line::from(vec![
            Span::raw("   "),
            Span::styled(format!("{key:<12}"), key_style),
            Span::raw(what.to_string()),
        ])
    };

    let mut lines = vec![
        Line::raw(" "),
        entry("j/k \u{2191}/\u{2193}", "scroll the page"),
        entry("g / G", "top / bottom"),
        entry("Tab", "focus next gallery or the form"),
        entry("\u{2190}/\u{2192}", "previous / next slide in the focused gallery"),
        entry("1-9", "jump to a dot page (or a section from the page)"),
        entry("y", "copy the focused card's link"),
        entry("w", "toggle deck watching"),
        entry("r", "reload the deck"),
        entry("Esc", "back to page focus / close this help"),
        entry("q", "quit"),
        Line::raw(" "),
    ];

    if let Some(path) = &model.config_global_path {
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled("config: ", Style::default().fg(Color::Indexed(245))),
            Span::styled(path.display().to_string(), Style::default().fg(Color::Cyan)),
        ]));
    }
    if let Some(path) = &model.config_local_path {
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled("local:  ", Style::default().fg(Color::Indexed(245))),
            Span::styled(path.display().to_string(), Style::default().fg(Color::Cyan)),
        ]));
    }

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
