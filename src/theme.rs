//! Theme system for the TUI.
//!
//! `ThemeVariant` selects between Dark and Light palettes; `ColorPalette`
//! maps every semantic UI role to a ratatui `Style`.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Styles for every semantic UI role.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Tab bar --
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub header: Style,

    // -- Article cards --
    pub card_source_badge: Style,
    pub card_title: Style,
    pub card_title_selected: Style,
    pub card_description: Style,
    pub card_image: Style,
    pub card_meta: Style,
    pub card_placeholder: Style,

    // -- Chrome --
    pub progress_filled: Style,
    pub progress_unfilled: Style,
    pub status_bar: Style,
    pub spinner: Style,
    pub error: Style,
    pub panel_border: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            header: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            card_source_badge: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_title_selected: Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            card_description: Style::default(),
            card_image: Style::default().fg(Color::Blue),
            card_meta: Style::default().fg(Color::DarkGray),
            card_placeholder: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            progress_filled: Style::default().fg(Color::Red),
            progress_unfilled: Style::default().fg(Color::DarkGray),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            spinner: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),
            panel_border: Style::default().fg(Color::DarkGray),
        }
    }

    fn light() -> Self {
        Self {
            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            header: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            card_source_badge: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_title_selected: Style::default()
                .bg(Color::Gray)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_description: Style::default().fg(Color::Black),
            card_image: Style::default().fg(Color::Blue),
            card_meta: Style::default().fg(Color::Gray),
            card_placeholder: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),

            progress_filled: Style::default().fg(Color::Red),
            progress_unfilled: Style::default().fg(Color::Gray),
            status_bar: Style::default().bg(Color::Gray).fg(Color::Black),
            spinner: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red),
            panel_border: Style::default().fg(Color::Gray),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names_round_trip() {
        assert_eq!(ThemeVariant::from_str_name("dark"), Some(ThemeVariant::Dark));
        assert_eq!(ThemeVariant::from_str_name("LIGHT"), Some(ThemeVariant::Light));
        assert_eq!(ThemeVariant::from_str_name("solarized"), None);
    }

    #[test]
    fn cycle_alternates() {
        assert_eq!(ThemeVariant::Dark.next(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Light.next(), ThemeVariant::Dark);
    }
}
