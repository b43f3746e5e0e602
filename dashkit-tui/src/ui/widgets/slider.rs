//! Slider widget plus the track geometry that mouse hit-testing shares.
//!
//! A horizontal slider occupies three rows (title, track, ticks) and a fourth
//! when it carries marks. A vertical slider is a column: title on top, value
//! on the bottom, track in between.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use dashkit_core::slider::{Orientation, PointerPos, Slider, SliderSize, Thumb, TrackRect};

use crate::theme::{self, Theme};

/// Rows a horizontal slider needs.
pub fn height_for(slider: &Slider) -> u16 {
    if slider.props().marks.is_empty() {
        3
    } else {
        4
    }
}

/// Cells the track occupies inside the widget area.
pub fn track_area(area: Rect, orientation: Orientation) -> Rect {
    match orientation {
        Orientation::Horizontal => Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.min(2).saturating_sub(1),
        },
        Orientation::Vertical => Rect {
            x: area.x + area.width.min(2) / 2,
            y: area.y + 1,
            width: area.width.min(1),
            height: area.height.saturating_sub(2),
        },
    }
}

/// Track box in cell coordinates. The first and last cell map to 0% and 100%.
pub fn track_rect(track: Rect, orientation: Orientation) -> TrackRect {
    let x = f64::from(track.x);
    let y = f64::from(track.y);
    match orientation {
        Orientation::Horizontal => TrackRect::new(x, y, f64::from(track.width.saturating_sub(1)), 0.0),
        Orientation::Vertical => TrackRect::new(x, y, 0.0, f64::from(track.height.saturating_sub(1))),
    }
}

/// Cells that accept presses: the track plus the tick row below it, or one
/// column either side of a vertical track.
pub fn hit_zone(track: Rect, orientation: Orientation) -> Rect {
    match orientation {
        Orientation::Horizontal => Rect {
            height: track.height + 1,
            ..track
        },
        Orientation::Vertical => Rect {
            x: track.x.saturating_sub(1),
            width: track.width + 2,
            ..track
        },
    }
}

/// One cell, in percent. Thumb grabs use it as their tolerance.
pub fn cell_tolerance(track: Rect, orientation: Orientation) -> f64 {
    let len = match orientation {
        Orientation::Horizontal => track.width,
        Orientation::Vertical => track.height,
    };
    if len <= 1 {
        100.0
    } else {
        100.0 / f64::from(len - 1)
    }
}

/// Terminal cell a percent lands on.
pub fn cell_at(track: Rect, orientation: Orientation, percent: f64) -> Position {
    let rect = track_rect(track, orientation);
    let offset = rect.offset_of(percent, orientation).round();
    match orientation {
        Orientation::Horizontal => Position::new(offset as u16, track.y),
        Orientation::Vertical => Position::new(track.x, offset as u16),
    }
}

pub fn pointer(column: u16, row: u16) -> PointerPos {
    PointerPos::new(f64::from(column), f64::from(row))
}

fn thumb_glyph(size: SliderSize, disabled: bool) -> &'static str {
    if disabled {
        return "○";
    }
    match size {
        SliderSize::Small => "•",
        SliderSize::Medium => "●",
        SliderSize::Large => "◉",
    }
}

pub struct SliderWidget<'a> {
    slider: &'a Slider,
    title: &'a str,
    hint: &'a str,
    focused: bool,
    /// Thumb the keyboard acts on, underlined when focused.
    keyboard_thumb: Thumb,
    theme: Theme,
}

impl<'a> SliderWidget<'a> {
    pub fn new(slider: &'a Slider, title: &'a str) -> Self {
        Self {
            slider,
            title,
            hint: "",
            focused: false,
            keyboard_thumb: Thumb::Single,
            theme: Theme::default(),
        }
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = hint;
        self
    }

    pub fn focused(mut self, focused: bool, thumb: Thumb) -> Self {
        self.focused = focused;
        self.keyboard_thumb = thumb;
        self
    }

    fn fill_style(&self) -> Style {
        if self.slider.is_disabled() {
            theme::muted()
        } else {
            Style::default().fg(self.theme.accent_color(self.slider.props().accent))
        }
    }

    fn thumb_style(&self, thumb: Thumb) -> Style {
        let mut style = self.fill_style().add_modifier(Modifier::BOLD);
        if self.slider.active_thumb() == Some(thumb) {
            style = style.add_modifier(Modifier::REVERSED);
        } else if self.focused && self.keyboard_thumb == thumb {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    fn title_style(&self) -> Style {
        if self.slider.is_disabled() {
            theme::muted()
        } else if self.focused {
            theme::accent_bold()
        } else {
            theme::text()
        }
    }

    fn render_horizontal(&self, area: Rect, buf: &mut Buffer) {
        let orientation = Orientation::Horizontal;
        let label = self.slider.label();
        let marker = if self.focused { "▸ " } else { "  " };
        buf.set_string(area.x, area.y, format!("{marker}{}", self.title), self.title_style());
        let title_end = area.x + 2 + self.title.chars().count() as u16;
        if !self.hint.is_empty() {
            buf.set_string(title_end, area.y, format!("  {}", self.hint), theme::muted());
        }
        let label_width = label.chars().count() as u16;
        if label_width < area.width {
            buf.set_string(
                area.right() - label_width,
                area.y,
                &label,
                self.fill_style().add_modifier(Modifier::BOLD),
            );
        }

        let track = track_area(area, orientation);
        if track.width == 0 || track.height == 0 {
            return;
        }
        let rect = track_rect(track, orientation);
        let fill = self.slider.fill();
        let disabled = self.slider.is_disabled();
        for col in track.left()..track.right() {
            let pct = rect.percent_at(pointer(col, track.y), orientation);
            let (glyph, style) = if disabled {
                ("┄", theme::muted())
            } else if fill.is_filled(pct) {
                ("━", self.fill_style())
            } else {
                ("─", theme::muted())
            };
            buf.set_string(col, track.y, glyph, style);
        }
        self.draw_thumbs(track, orientation, buf);

        let tick_row = track.y + 1;
        if tick_row >= area.bottom() {
            return;
        }
        for tick in self.slider.ticks() {
            let cell = cell_at(track, orientation, tick.percent);
            let style = if tick.in_range && !disabled {
                self.fill_style()
            } else {
                theme::muted()
            };
            buf.set_string(cell.x, tick_row, "╵", style);
        }

        let marks = self.slider.marks();
        let label_row = tick_row + 1;
        for mark in &marks {
            let cell = cell_at(track, orientation, mark.percent);
            let style = if mark.active && !disabled {
                self.fill_style()
            } else {
                theme::muted()
            };
            buf.set_string(cell.x, tick_row, "┴", style);
            if label_row < area.bottom() {
                let width = mark.label.chars().count() as u16;
                let x = cell
                    .x
                    .saturating_sub(width / 2)
                    .max(area.x)
                    .min(area.right().saturating_sub(width));
                buf.set_string(x, label_row, &mark.label, style);
            }
        }
    }

    fn render_vertical(&self, area: Rect, buf: &mut Buffer) {
        let orientation = Orientation::Vertical;
        let title: String = self.title.chars().take(area.width as usize).collect();
        buf.set_string(area.x, area.y, title, self.title_style());

        let track = track_area(area, orientation);
        if track.height == 0 || track.width == 0 {
            return;
        }
        let rect = track_rect(track, orientation);
        let fill = self.slider.fill();
        let disabled = self.slider.is_disabled();
        for row in track.top()..track.bottom() {
            let pct = rect.percent_at(pointer(track.x, row), orientation);
            let (glyph, style) = if disabled {
                ("┆", theme::muted())
            } else if fill.is_filled(pct) {
                ("┃", self.fill_style())
            } else {
                ("│", theme::muted())
            };
            buf.set_string(track.x, row, glyph, style);
        }
        let tick_col = track.x + 1;
        if tick_col < area.right() {
            for tick in self.slider.ticks() {
                let cell = cell_at(track, orientation, tick.percent);
                let style = if tick.in_range && !disabled {
                    self.fill_style()
                } else {
                    theme::muted()
                };
                buf.set_string(tick_col, cell.y, "╴", style);
            }
        }
        self.draw_thumbs(track, orientation, buf);

        if area.height > 1 {
            let label: String = self.slider.label().chars().take(area.width as usize).collect();
            buf.set_string(
                area.x,
                area.bottom() - 1,
                label,
                self.fill_style().add_modifier(Modifier::BOLD),
            );
        }
    }

    fn draw_thumbs(&self, track: Rect, orientation: Orientation, buf: &mut Buffer) {
        let glyph = thumb_glyph(self.slider.props().size, self.slider.is_disabled());
        for &thumb in self.slider.value().thumbs() {
            let Some(pct) = self.slider.thumb_percent(thumb) else {
                continue;
            };
            let cell = cell_at(track, orientation, pct);
            buf.set_string(cell.x, cell.y, glyph, self.thumb_style(thumb));
        }
    }
}

impl Widget for SliderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 2 {
            return;
        }
        match self.slider.props().orientation {
            Orientation::Horizontal => self.render_horizontal(area, buf),
            Orientation::Vertical => self.render_vertical(area, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashkit_core::slider::{
        CaptureOwner, PointerDocument, SliderBounds, SliderProps, SliderValue, ValueFormat,
        ValueSource,
    };

    fn slider(value: SliderValue, orientation: Orientation) -> Slider {
        Slider::mount(
            CaptureOwner(1),
            SliderProps::new(SliderBounds::sanitized(0.0, 100.0, 1.0))
                .orientation(orientation)
                .format(ValueFormat::Percent),
            ValueSource::Uncontrolled(value),
            &PointerDocument::new(),
        )
    }

    #[test]
    fn horizontal_track_maps_end_cells_to_bounds() {
        let area = Rect::new(10, 5, 42, 3);
        let track = track_area(area, Orientation::Horizontal);
        assert_eq!(track, Rect::new(11, 6, 40, 1));
        let rect = track_rect(track, Orientation::Horizontal);
        assert_eq!(rect.percent_at(pointer(11, 6), Orientation::Horizontal), 0.0);
        assert_eq!(rect.percent_at(pointer(50, 6), Orientation::Horizontal), 100.0);
        assert_eq!(cell_at(track, Orientation::Horizontal, 100.0), Position::new(50, 6));
    }

    #[test]
    fn vertical_track_is_inverted() {
        let area = Rect::new(0, 0, 8, 12);
        let track = track_area(area, Orientation::Vertical);
        assert_eq!(track, Rect::new(1, 1, 1, 10));
        let rect = track_rect(track, Orientation::Vertical);
        assert_eq!(rect.percent_at(pointer(1, 1), Orientation::Vertical), 100.0);
        assert_eq!(rect.percent_at(pointer(1, 10), Orientation::Vertical), 0.0);
        assert_eq!(cell_at(track, Orientation::Vertical, 0.0), Position::new(1, 10));
    }

    #[test]
    fn tolerance_is_one_cell() {
        let track = Rect::new(0, 0, 51, 1);
        assert!((cell_tolerance(track, Orientation::Horizontal) - 2.0).abs() < 1e-9);
        assert_eq!(cell_tolerance(Rect::new(0, 0, 1, 1), Orientation::Horizontal), 100.0);
    }

    #[test]
    fn renders_thumb_and_label() {
        let s = slider(SliderValue::Single(50.0), Orientation::Horizontal);
        let area = Rect::new(0, 0, 23, 3);
        let mut buf = Buffer::empty(area);
        SliderWidget::new(&s, "Volume").render(area, &mut buf);
        // Track spans x = 1..=21, so 50% lands on x = 11.
        assert_eq!(buf[(11, 1)].symbol(), "●");
        assert_eq!(buf[(1, 1)].symbol(), "━");
        assert_eq!(buf[(21, 1)].symbol(), "─");
        let top: String = (0..23).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(top.starts_with("  Volume"));
        assert!(top.trim_end().ends_with("50%"));
    }

    #[test]
    fn range_draws_two_thumbs() {
        let s = slider(SliderValue::range(0.0, 100.0), Orientation::Horizontal);
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        SliderWidget::new(&s, "R").render(area, &mut buf);
        assert_eq!(buf[(1, 1)].symbol(), "●");
        assert_eq!(buf[(10, 1)].symbol(), "●");
        assert_eq!(buf[(5, 1)].symbol(), "━");
    }

    #[test]
    fn tiny_area_is_skipped() {
        let s = slider(SliderValue::Single(10.0), Orientation::Horizontal);
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        SliderWidget::new(&s, "x").render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
