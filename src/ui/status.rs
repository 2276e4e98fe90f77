use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Focus, Model};

use super::page::BACK_TO_TOP_THRESHOLD;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let percent = model.scroll.scroll_percent();

    let focus_info = match model.focus {
        Focus::Page => String::new(),
        Focus::Gallery(index) => {
            let carousel = &model.galleries[index].carousel;
            let autoplay = if carousel.autoplay().is_armed() {
                " \u{25b6}"
            } else if carousel.autoplay().is_enabled() {
                " \u{23f8}"
            } else {
                ""
            };
            format!(
                "  slide {}/{}{}",
                carousel.current() + 1,
                carousel.slide_count(),
                autoplay
            )
        }
        Focus::Form => "  form".to_string(),
    };

    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };
    let top_hint = if model.scroll.offset() > BACK_TO_TOP_THRESHOLD {
        "  g:top"
    } else {
        ""
    };

    let status = format!(
        " {}  [{}%]{}{}{}  ?:help",
        model.deck.title, percent, focus_info, watch_indicator, top_hint
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
