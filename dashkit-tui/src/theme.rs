//! Slate/neon theme tokens for the Dashkit gallery.
//!
//! # Color Palette
//! - **Background**: Deep slate (base layer)
//! - **Accent**: Electric cyan (primary highlights, focus, primary sliders)
//! - **Positive**: Neon green (success accent, upward trends, finished uploads)
//! - **Negative**: Hot pink (danger accent, failures, downward trends)
//! - **Warning**: Neon orange (warning accent, rejected input)
//! - **Neutral**: Cool purple (section headings, secondary info)
//! - **Muted**: Steel blue (disabled controls, hints, unfilled track)

use ratatui::style::{Color, Modifier, Style};

use dashkit_core::cards::Trend;
use dashkit_core::slider::SliderAccent;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    /// Heatmap ramp, coolest first.
    pub heat: [Color; 5],
}

impl Default for Theme {
    fn default() -> Self {
        Self::slate_neon()
    }
}

impl Theme {
    pub fn slate_neon() -> Self {
        Self {
            background: Color::Rgb(17, 20, 28),
            accent: Color::Rgb(0, 229, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
            heat: [
                Color::Rgb(30, 38, 56),
                Color::Rgb(24, 78, 119),
                Color::Rgb(26, 133, 160),
                Color::Rgb(52, 196, 170),
                Color::Rgb(170, 255, 120),
            ],
        }
    }

    pub fn accent_color(&self, accent: SliderAccent) -> Color {
        match accent {
            SliderAccent::Primary => self.accent,
            SliderAccent::Success => self.positive,
            SliderAccent::Warning => self.warning,
            SliderAccent::Danger => self.negative,
        }
    }

    pub fn trend_color(&self, trend: Trend) -> Color {
        match trend {
            Trend::Up => self.positive,
            Trend::Down => self.negative,
            Trend::Flat => self.neutral,
        }
    }

    /// Out-of-range buckets clamp to the hottest color.
    pub fn heat_color(&self, bucket: usize) -> Color {
        self.heat[bucket.min(self.heat.len() - 1)]
    }
}

fn theme() -> Theme {
    Theme::default()
}

pub fn accent() -> Style {
    Style::default().fg(theme().accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(theme().positive)
}

pub fn negative() -> Style {
    Style::default().fg(theme().negative)
}

pub fn warning() -> Style {
    Style::default().fg(theme().warning)
}

pub fn neutral() -> Style {
    Style::default().fg(theme().neutral)
}

pub fn muted() -> Style {
    Style::default().fg(theme().muted)
}

pub fn text() -> Style {
    Style::default().fg(theme().text_primary)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Cursor row in lists, trees and tables.
pub fn cursor() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}
