//! Stat cards: headline number, change against the previous period, sparkline.

/// Changes smaller than this (in percent) read as flat.
const FLAT_THRESHOLD_PCT: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Flat => "■",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: String,
    pub value: f64,
    pub previous: f64,
    pub unit: String,
    pub history: Vec<u64>,
}

impl StatCard {
    pub fn new(title: impl Into<String>, value: f64, previous: f64) -> Self {
        Self {
            title: title.into(),
            value,
            previous,
            unit: String::new(),
            history: Vec::new(),
        }
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn history(mut self, history: Vec<u64>) -> Self {
        self.history = history;
        self
    }

    /// Percent change against `previous`. `None` when there is no baseline.
    pub fn delta_pct(&self) -> Option<f64> {
        if self.previous == 0.0 || !self.previous.is_finite() || !self.value.is_finite() {
            return None;
        }
        Some((self.value - self.previous) / self.previous.abs() * 100.0)
    }

    pub fn trend(&self) -> Trend {
        match self.delta_pct() {
            Some(d) if d >= FLAT_THRESHOLD_PCT => Trend::Up,
            Some(d) if d <= -FLAT_THRESHOLD_PCT => Trend::Down,
            _ => Trend::Flat,
        }
    }

    pub fn display_value(&self) -> String {
        let body = if self.value.abs() >= 1_000_000.0 {
            format!("{:.1}M", self.value / 1_000_000.0)
        } else if self.value.abs() >= 10_000.0 {
            format!("{:.1}k", self.value / 1_000.0)
        } else if self.value.fract() == 0.0 {
            format!("{:.0}", self.value)
        } else {
            format!("{:.2}", self.value)
        };
        match self.unit.as_str() {
            "" => body,
            "$" => format!("${body}"),
            unit => format!("{body}{unit}"),
        }
    }
}

/// The four cards shown on the overview and cards pages.
pub fn sample_deck() -> Vec<StatCard> {
    vec![
        StatCard::new("Revenue", 48_250.0, 42_100.0)
            .unit("$")
            .history(vec![31, 35, 33, 38, 41, 40, 44, 47, 45, 48]),
        StatCard::new("Active users", 2_318.0, 2_410.0)
            .history(vec![25, 24, 26, 25, 24, 23, 24, 23, 24, 23]),
        StatCard::new("Conversion", 3.42, 3.42)
            .unit("%")
            .history(vec![3, 4, 3, 3, 4, 3, 4, 3, 3, 3]),
        StatCard::new("Open tickets", 17.0, 29.0)
            .history(vec![29, 27, 26, 24, 22, 21, 20, 19, 18, 17]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_and_trend() {
        let card = StatCard::new("x", 110.0, 100.0);
        assert!((card.delta_pct().unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(card.trend(), Trend::Up);

        let card = StatCard::new("x", 90.0, 100.0);
        assert_eq!(card.trend(), Trend::Down);

        let card = StatCard::new("x", 100.01, 100.0);
        assert_eq!(card.trend(), Trend::Flat);
    }

    #[test]
    fn no_baseline_no_delta() {
        let card = StatCard::new("x", 5.0, 0.0);
        assert_eq!(card.delta_pct(), None);
        assert_eq!(card.trend(), Trend::Flat);
    }

    #[test]
    fn negative_baseline_uses_magnitude() {
        let card = StatCard::new("x", -50.0, -100.0);
        assert!((card.delta_pct().unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn display_value_units() {
        assert_eq!(StatCard::new("r", 48_310.0, 1.0).unit("$").display_value(), "$48.3k");
        assert_eq!(StatCard::new("c", 3.42, 1.0).unit("%").display_value(), "3.42%");
        assert_eq!(StatCard::new("t", 17.0, 1.0).display_value(), "17");
        assert_eq!(StatCard::new("b", 2_500_000.0, 1.0).display_value(), "2.5M");
    }

    #[test]
    fn sample_deck_has_four_cards() {
        let deck = sample_deck();
        assert_eq!(deck.len(), 4);
        assert!(deck.iter().all(|c| !c.history.is_empty()));
    }
}
