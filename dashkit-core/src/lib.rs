//! Dashkit Core — headless logic behind the admin-dashboard component gallery.
//!
//! Everything here is terminal-agnostic:
//! - Value/range slider engine with pointer-capture drag tracking
//! - Data grid (sort, paginate, select, CSV export)
//! - Searchable select, expandable tree, simulated upload queue, heatmap
//! - Page catalog, breadcrumbs, stat cards
//! - TOML configuration and a seeded RNG tree for the simulations

pub mod breadcrumb;
pub mod cards;
pub mod catalog;
pub mod config;
pub mod grid;
pub mod heatmap;
pub mod rng;
pub mod select;
pub mod slider;
pub mod tree;
pub mod upload;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: component state other than the slider is `Send + Sync`.
    ///
    /// `Slider` and `PointerDocument` share an `Rc` registry and are not.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<slider::SliderBounds>();
        require_sync::<slider::SliderBounds>();
        require_send::<slider::SliderValue>();
        require_sync::<slider::SliderValue>();
        require_send::<slider::SliderProps>();
        require_sync::<slider::SliderProps>();
        require_send::<slider::SliderEvent>();
        require_sync::<slider::SliderEvent>();

        require_send::<grid::DataGrid>();
        require_sync::<grid::DataGrid>();
        require_send::<select::Select>();
        require_sync::<select::Select>();
        require_send::<tree::TreeView>();
        require_sync::<tree::TreeView>();
        require_send::<upload::UploadQueue>();
        require_sync::<upload::UploadQueue>();
        require_send::<heatmap::Heatmap>();
        require_sync::<heatmap::Heatmap>();

        require_send::<config::ShowcaseConfig>();
        require_sync::<config::ShowcaseConfig>();
        require_send::<rng::SeedTree>();
        require_sync::<rng::SeedTree>();
    }
}
