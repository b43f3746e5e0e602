//! Row-major heatmap with bucketed intensities.

use rand::Rng;

use crate::rng::SeedTree;

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
}

impl Heatmap {
    /// `None` when `values.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Option<Self> {
        if values.len() != rows * cols {
            return None;
        }
        Some(Self {
            rows,
            cols,
            values,
            row_labels: (0..rows).map(|r| r.to_string()).collect(),
            col_labels: (0..cols).map(|c| c.to_string()).collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values.get(row * self.cols + col).copied()
    }

    /// `(min, max)` over finite values.
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Bucket in `0..buckets`. A flat map and non-finite cells give 0.
    pub fn intensity(&self, row: usize, col: usize, buckets: usize) -> Option<usize> {
        let v = self.get(row, col)?;
        if buckets == 0 {
            return Some(0);
        }
        let (lo, hi) = self.extent()?;
        if !v.is_finite() || hi - lo <= f64::EPSILON {
            return Some(0);
        }
        let norm = (v - lo) / (hi - lo);
        Some(((norm * buckets as f64) as usize).min(buckets - 1))
    }

    /// Sum per row.
    pub fn row_totals(&self) -> Vec<f64> {
        self.values
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|r| r.iter().filter(|v| v.is_finite()).sum())
            .collect()
    }
}

/// Weekday × hour activity with a working-hours bump and quiet weekends.
pub fn sample_activity(seeds: &SeedTree) -> Heatmap {
    let mut rng = seeds.rng_for("heatmap", 0);
    let mut values = Vec::with_capacity(7 * 24);
    for day in 0..7 {
        let weekend = day >= 5;
        for hour in 0..24 {
            let base: f64 = match hour {
                9..=11 | 14..=17 => 40.0,
                12..=13 => 25.0,
                7..=8 | 18..=20 => 15.0,
                _ => 3.0,
            };
            let scale = if weekend { 0.3 } else { 1.0 };
            values.push((base * scale + rng.gen_range(0.0..10.0_f64)).round());
        }
    }
    Heatmap {
        rows: 7,
        cols: 24,
        values,
        row_labels: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
        col_labels: (0..24).map(|h| format!("{h:02}")).collect(),
    }
}
