//! Leaf-themed color palette and styles.
//!
//! The gauge colors match the web client's confidence bands so screenshots
//! from both read the same.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::GaugeLevel;

/// Leaf theme color palette.
pub struct LeafTheme;

impl LeafTheme {
    // === Primary Colors ===

    /// Forest green - Primary
    pub const PRIMARY: Color = Color::Rgb(45, 106, 79); // #2D6A4F

    /// Fresh leaf green for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(149, 213, 178); // #95D5B2

    /// Deep green for header bars
    pub const PRIMARY_DARK: Color = Color::Rgb(27, 67, 50); // #1B4332

    /// Soil brown for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(168, 162, 158); // #A8A29E

    // === Confidence Gauge ===

    pub const SUCCESS: Color = Color::Rgb(76, 149, 108); // #4C956C
    pub const WARNING: Color = Color::Rgb(240, 173, 78); // #F0AD4E
    pub const DANGER: Color = Color::Rgb(217, 83, 79); // #D9534F

    // === Text Colors ===

    pub const BG_DARK: Color = Color::Rgb(20, 30, 24); // #141E18
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(163, 177, 168); // #A3B1A8
    pub const TEXT_MUTED: Color = Color::Rgb(107, 124, 113); // #6B7C71

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Active tab / enabled button
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled button
    #[must_use]
    pub fn disabled() -> Style {
        Style::default()
            .fg(Self::TEXT_MUTED)
            .add_modifier(Modifier::DIM)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Fill color of the confidence gauge
    #[must_use]
    pub fn gauge_color(level: GaugeLevel) -> Color {
        match level {
            GaugeLevel::Success => Self::SUCCESS,
            GaugeLevel::Warning => Self::WARNING,
            GaugeLevel::Danger => Self::DANGER,
        }
    }

    #[must_use]
    pub fn gauge(level: GaugeLevel) -> Style {
        Style::default()
            .fg(Self::gauge_color(level))
            .bg(Self::BG_DARK)
    }
}
