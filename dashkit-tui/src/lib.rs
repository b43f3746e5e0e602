//! Dashkit TUI - terminal gallery of admin-dashboard components
//!
//! Every component page is drawn with ratatui and driven by keyboard and mouse:
//! - Sliders with pointer drags that keep tracking outside the track
//! - Data grid with sorting, paging, selection and CSV export
//! - Searchable single and multi selects
//! - Tree view, simulated upload queue, activity heatmap
//! - Breadcrumbs, stat cards, modals and drawers

pub mod app;
pub mod gallery;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use theme::Theme;
pub use input::{handle_key, handle_mouse};
