//! App state persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use dashkit_core::catalog::Page;

use crate::app::{AppState, Overlay};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub active_page: Page,
    pub welcome_dismissed: bool,
    pub single_value: f64,
    pub range_value: (f64, f64),
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            active_page: Page::Overview,
            welcome_dismissed: false,
            single_value: 40.0,
            range_value: (200.0, 750.0),
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "ignoring corrupt state file");
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        active_page: app.page,
        welcome_dismissed: app.overlay != Overlay::Welcome,
        single_value: app.sliders.single_value(),
        range_value: app.sliders.range_value(),
    }
}

pub fn apply(app: &mut AppState, state: PersistedState) {
    app.page = state.active_page;
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
    app.sliders.restore(state.single_value, state.range_value);
}
