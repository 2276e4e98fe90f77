//! Theming and color definitions.
//!
//! Semantic ANSI colors that respect the terminal's palette; no RGB
//! values, so the page inherits the user's scheme.

use ratatui::style::{Color, Modifier, Style};

/// The visual elements the page is composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    HeroTitle,
    Tagline,
    SectionHeading,
    SectionHeadingFocused,
    CardBorder,
    CardBorderFocused,
    CardTitle,
    CardTag,
    CardSummary,
    CardLink,
    DotActive,
    DotInactive,
    NavArrow,
    FieldLabel,
    FieldValueFocused,
    ErrorText,
    SuccessText,
    Hint,
}

/// Style for a page element.
pub fn style_for(element: Element) -> Style {
    match element {
        Element::HeroTitle => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        Element::Tagline => Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        Element::SectionHeading => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Element::SectionHeadingFocused => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Element::CardBorder => Style::default().fg(Color::Indexed(240)),
        Element::CardBorderFocused => Style::default().fg(Color::Yellow),
        Element::CardTitle => Style::default().add_modifier(Modifier::BOLD),
        Element::CardTag => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::ITALIC),
        Element::CardSummary => Style::default(),
        Element::CardLink => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),
        Element::DotActive => Style::default().fg(Color::Cyan),
        Element::DotInactive => Style::default().fg(Color::Indexed(240)),
        Element::NavArrow => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        Element::FieldLabel => Style::default().add_modifier(Modifier::BOLD),
        Element::FieldValueFocused => Style::default().fg(Color::Yellow),
        Element::ErrorText => Style::default().fg(Color::Red),
        Element::SuccessText => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Element::Hint => Style::default().add_modifier(Modifier::DIM),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focused_variants_differ_from_base() {
        assert_ne!(
            style_for(Element::SectionHeading),
            style_for(Element::SectionHeadingFocused)
        );
        assert_ne!(
            style_for(Element::CardBorder),
            style_for(Element::CardBorderFocused)
        );
        assert_ne!(
            style_for(Element::DotActive),
            style_for(Element::DotInactive)
        );
    }
}
