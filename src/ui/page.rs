//! Page layout: deck and widget state rendered to styled lines.
//!
//! The page is a vertical sequence of sections (hero, one block per
//! gallery, contact) laid out for the current terminal width. The
//! builder also records line-range spans for every section, card row,
//! dot row, and form field so mouse input can be hit-tested against the
//! same geometry the renderer drew.

use std::ops::Range;

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::app::{Focus, Model};
use crate::form::{Field, SubmitState};

use super::style::{Element, style_for};

/// Columns reserved on each side of the card row for the prev/next arrows.
pub const ARROW_GUTTER: u16 = 3;
/// Blank columns between adjacent cards.
pub const CARD_GAP: u16 = 2;
/// Rows inside a card frame: title, tag, two summary rows, link.
pub const CARD_INNER_ROWS: usize = 5;
/// Total card frame height including borders.
pub const CARD_ROWS: usize = CARD_INNER_ROWS + 2;
/// Rows of look-ahead when deciding which section is active.
pub const SCROLL_SPY_BIAS: usize = 2;
/// Scroll offset past which the back-to-top hint appears.
pub const BACK_TO_TOP_THRESHOLD: usize = 12;

/// What a page section is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Gallery(usize),
    Contact,
}

/// One section's navigation title and line extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub kind: SectionKind,
    pub title: String,
    pub lines: Range<usize>,
}

/// Hit-test geometry for one gallery block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySpan {
    pub gallery: usize,
    pub lines: Range<usize>,
    /// The card frame rows, which double as the swipe and arrow zone.
    pub card_rows: Range<usize>,
    pub dots_row: Option<usize>,
    pub dot_count: usize,
}

/// Hit-test geometry for the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpan {
    pub lines: Range<usize>,
    /// Page line of each field's input row, in [`Field::ALL`] order.
    pub field_rows: [Option<usize>; 3],
}

/// The laid-out page.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub lines: Vec<Line<'static>>,
    pub sections: Vec<SectionSpan>,
    pub galleries: Vec<GallerySpan>,
    pub form: Option<FormSpan>,
}

impl PageLayout {
    /// The gallery span containing `line`, if any.
    pub fn gallery_at_line(&self, line: usize) -> Option<&GallerySpan> {
        self.galleries.iter().find(|g| g.lines.contains(&line))
    }
}

/// The section whose extent contains the scroll offset, biased a couple
/// of rows ahead so a heading becomes active as it approaches the top.
pub fn active_section(sections: &[SectionSpan], offset: usize) -> Option<usize> {
    let probe = offset + SCROLL_SPY_BIAS;
    sections.iter().rposition(|s| s.lines.start <= probe)
}

/// Lay the whole page out for `width` columns.
pub fn build_page(model: &Model, width: u16) -> PageLayout {
    let mut page = PageLayout::default();

    build_hero(model, width, &mut page);
    for index in 0..model.deck.galleries.len() {
        build_gallery(model, width, index, &mut page);
    }
    if model.deck.contact.is_some() {
        build_contact(model, width, &mut page);
    }

    page
}

fn build_hero(model: &Model, width: u16, page: &mut PageLayout) {
    let start = page.lines.len();
    let w = width as usize;

    page.lines.push(Line::default());
    page.lines.push(Line::styled(
        center_pad(&model.deck.title, w),
        style_for(Element::HeroTitle),
    ));
    if !model.deck.tagline.is_empty() {
        page.lines.push(Line::styled(
            center_pad(&model.deck.tagline, w),
            style_for(Element::Tagline),
        ));
    }
    page.lines.push(Line::default());

    page.sections.push(SectionSpan {
        kind: SectionKind::Hero,
        title: "Home".to_string(),
        lines: start..page.lines.len(),
    });
}

fn build_gallery(model: &Model, width: u16, index: usize, page: &mut PageLayout) {
    let gallery = &model.deck.galleries[index];
    let carousel = &model.galleries[index].carousel;
    let focused = model.focus == Focus::Gallery(index);
    let start = page.lines.len();

    page.lines.push(Line::default());
    let heading_style = if focused {
        style_for(Element::SectionHeadingFocused)
    } else {
        style_for(Element::SectionHeading)
    };
    let marker = if focused { ">" } else { " " };
    page.lines
        .push(Line::styled(format!("{marker} {}", gallery.title), heading_style));
    page.lines.push(Line::default());

    // An empty gallery renders no widget at all.
    let mut card_rows = page.lines.len()..page.lines.len();
    let mut dots_row = None;
    let mut dot_count = 0;
    if !carousel.is_empty() {
        let rows_start = page.lines.len();
        for row in card_row_lines(model, width, index, focused) {
            page.lines.push(row);
        }
        card_rows = rows_start..page.lines.len();

        if gallery.show_dots && model.show_dots {
            dot_count = carousel.page_count();
            let dots = dots_line(dot_count, carousel.active_page());
            dots_row = Some(page.lines.len());
            page.lines.push(Line::styled(
                center_pad(&dots, width as usize),
                style_for(Element::DotInactive),
            ));
        }
    }
    page.lines.push(Line::default());

    let lines = start..page.lines.len();
    page.galleries.push(GallerySpan {
        gallery: index,
        lines: lines.clone(),
        card_rows,
        dots_row,
        dot_count,
    });
    page.sections.push(SectionSpan {
        kind: SectionKind::Gallery(index),
        title: gallery.title.clone(),
        lines,
    });
}

/// Render the visible card window as [`CARD_ROWS`] styled lines, with
/// the arrow gutters on the outside.
fn card_row_lines(model: &Model, width: u16, index: usize, focused: bool) -> Vec<Line<'static>> {
    let gallery = &model.deck.galleries[index];
    let carousel = &model.galleries[index].carousel;

    let content_width = width.saturating_sub(ARROW_GUTTER * 2) as usize;
    let slots = carousel.visible_count();
    let gaps = (slots - 1) * CARD_GAP as usize;
    let card_width = content_width.saturating_sub(gaps) / slots.max(1);
    let show_arrows = gallery.show_navigation && model.show_navigation;

    let border = if focused {
        style_for(Element::CardBorderFocused)
    } else {
        style_for(Element::CardBorder)
    };

    let mut lines = Vec::with_capacity(CARD_ROWS);
    for row in 0..CARD_ROWS {
        let mut spans: Vec<Span<'static>> = Vec::new();

        let arrow_row = row == CARD_ROWS / 2;
        let (left, right) = if show_arrows && arrow_row {
            ("\u{276e}  ", "  \u{276f}")
        } else {
            ("   ", "   ")
        };
        spans.push(Span::styled(left.to_string(), style_for(Element::NavArrow)));

        let mut rendered = 0;
        for (slot, card_index) in carousel.visible_range().enumerate() {
            if slot > 0 {
                spans.push(Span::raw(" ".repeat(CARD_GAP as usize)));
            }
            let card = &gallery.cards[card_index];
            spans.extend(card_row_spans(card, row, card_width, border));
            rendered += 1;
        }
        // Keep the right gutter at the page edge even when the last
        // window holds fewer cards than the layout has slots for.
        for _ in rendered..slots {
            spans.push(Span::raw(" ".repeat(card_width + CARD_GAP as usize)));
        }

        spans.push(Span::styled(right.to_string(), style_for(Element::NavArrow)));
        lines.push(Line::from(spans));
    }
    lines
}

fn card_row_spans(
    card: &crate::deck::Card,
    row: usize,
    card_width: usize,
    border: ratatui::style::Style,
) -> Vec<Span<'static>> {
    if card_width < 6 {
        return vec![Span::raw(" ".repeat(card_width))];
    }
    let inner = card_width - 4;

    if row == 0 {
        return vec![Span::styled(
            format!("\u{250c}{}\u{2510}", "\u{2500}".repeat(card_width - 2)),
            border,
        )];
    }
    if row == CARD_ROWS - 1 {
        return vec![Span::styled(
            format!("\u{2514}{}\u{2518}", "\u{2500}".repeat(card_width - 2)),
            border,
        )];
    }

    let (text, element) = match row - 1 {
        0 => (truncate_to_width(&card.title, inner), Element::CardTitle),
        1 => (
            card.tag
                .as_deref()
                .map(|tag| truncate_to_width(tag, inner))
                .unwrap_or_default(),
            Element::CardTag,
        ),
        2 | 3 => {
            let wrapped = wrap_to_width(&card.summary, inner, 2);
            (
                wrapped.get(row - 3).cloned().unwrap_or_default(),
                Element::CardSummary,
            )
        }
        _ => (
            card.link
                .as_deref()
                .map(|link| truncate_to_width(link, inner))
                .unwrap_or_default(),
            Element::CardLink,
        ),
    };

    let pad = inner.saturating_sub(text.width());
    vec![
        Span::styled("\u{2502} ".to_string(), border),
        Span::styled(text, style_for(element)),
        Span::raw(" ".repeat(pad)),
        Span::styled(" \u{2502}".to_string(), border),
    ]
}

fn build_contact(model: &Model, width: u16, page: &mut PageLayout) {
    let Some(contact) = model.deck.contact.as_ref() else {
        return;
    };
    let focused = model.focus == Focus::Form;
    let start = page.lines.len();
    let w = width as usize;

    page.lines.push(Line::default());
    let heading_style = if focused {
        style_for(Element::SectionHeadingFocused)
    } else {
        style_for(Element::SectionHeading)
    };
    let marker = if focused { ">" } else { " " };
    page.lines.push(Line::styled(
        format!("{marker} {}", contact.heading),
        heading_style,
    ));
    page.lines.push(Line::default());
    if !contact.blurb.is_empty() {
        for row in wrap_to_width(&contact.blurb, w.saturating_sub(4).max(10), 3) {
            page.lines
                .push(Line::styled(format!("  {row}"), style_for(Element::Hint)));
        }
        page.lines.push(Line::default());
    }

    let mut field_rows = [None, None, None];
    for (slot, field) in Field::ALL.into_iter().enumerate() {
        let field_focused = focused && model.form.focused() == field;
        let marker = if field_focused { ">" } else { " " };
        let value_style = if field_focused {
            style_for(Element::FieldValueFocused)
        } else {
            ratatui::style::Style::default()
        };
        field_rows[slot] = Some(page.lines.len());
        page.lines.push(Line::from(vec![
            Span::raw(format!("  {marker} ")),
            Span::styled(format!("{:<9}", field.label()), style_for(Element::FieldLabel)),
            Span::styled(model.form.value(field).to_string(), value_style),
        ]));
        if let Some(error) = model.form.error(field) {
            page.lines.push(Line::styled(
                format!("      {error}"),
                style_for(Element::ErrorText),
            ));
        }
    }

    page.lines.push(Line::default());
    let submit_line = match model.form.state() {
        SubmitState::Editing => {
            Line::styled("    [ Enter to send ]", style_for(Element::Hint))
        }
        SubmitState::Submitting { .. } => {
            Line::styled("    Sending\u{2026}", style_for(Element::Tagline))
        }
        SubmitState::Success { .. } => Line::styled(
            "    \u{2713} Message sent \u{2014} thanks for reaching out",
            style_for(Element::SuccessText),
        ),
    };
    page.lines.push(submit_line);
    page.lines.push(Line::default());

    let lines = start..page.lines.len();
    page.form = Some(FormSpan {
        lines: lines.clone(),
        field_rows,
    });
    page.sections.push(SectionSpan {
        kind: SectionKind::Contact,
        title: contact.heading.clone(),
        lines,
    });
}

/// Render dot indicators, active page filled.
pub fn dots_line(count: usize, active: usize) -> String {
    let mut out = String::new();
    for page in 0..count {
        if page > 0 {
            out.push(' ');
        }
        out.push(if page == active { '\u{25cf}' } else { '\u{25cb}' });
    }
    out
}

/// Map a click column on a centered dots row back to a page index.
pub fn dot_hit(width: u16, count: usize, col: u16) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let row_width = 2 * count - 1;
    let start = (width as usize).saturating_sub(row_width) / 2;
    let col = col as usize;
    if col < start || col >= start + row_width {
        return None;
    }
    Some((col - start) / 2)
}

/// Truncate to `width` columns, ellipsized.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('\u{2026}');
    out
}

/// Greedy word wrap to at most `max_lines` lines; content past the last
/// line is dropped.
pub fn wrap_to_width(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let sep = usize::from(!current.is_empty());
        if current.width() + sep + word.width() <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if lines.len() == max_lines {
                break;
            }
            current = truncate_to_width(word, width);
        }
    }
    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
    }
    lines
}

/// Center `text` in a field of `width` columns.
pub fn center_pad(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return truncate_to_width(text, width);
    }
    let left = (width - text_width) / 2;
    format!("{}{}", " ".repeat(left), text)
}
