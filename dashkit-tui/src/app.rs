//! Application state — single-owner, main-thread only.
//!
//! All gallery state lives here. Input handlers mutate it, the UI reads it.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDateTime;
use ratatui::layout::Rect;

use dashkit_core::cards::{sample_deck, StatCard};
use dashkit_core::catalog::Page;
use dashkit_core::config::ShowcaseConfig;
use dashkit_core::grid::{sample_users, DataGrid};
use dashkit_core::heatmap::{sample_activity, Heatmap};
use dashkit_core::rng::SeedTree;
use dashkit_core::select::{sample_countries, sample_tags, Select};
use dashkit_core::slider::PointerDocument;
use dashkit_core::tree::{sample_tree, TreeView};
use dashkit_core::upload::{UploadEvent, UploadQueue, UploadStatus, SAMPLE_FILES};

use crate::gallery::SliderGallery;

const ERROR_HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upload,
    Config,
    Export,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Upload => "UPL",
            ErrorCategory::Config => "CFG",
            ErrorCategory::Export => "EXP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Confirm,
    Form,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerSide {
    Left,
    Right,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Help,
    ErrorHistory,
    Modal(ModalKind),
    Drawer(DrawerSide),
}

/// Data grid page state.
#[derive(Debug)]
pub struct GridPageState {
    pub grid: DataGrid,
    /// Column the keyboard sort acts on.
    pub column: usize,
}

/// Select page: a single and a multi select side by side.
#[derive(Debug)]
pub struct SelectPageState {
    pub country: Select,
    pub tags: Select,
    /// 0 = country, 1 = tags.
    pub focus: usize,
}

impl SelectPageState {
    pub fn focused_mut(&mut self) -> &mut Select {
        if self.focus == 0 {
            &mut self.country
        } else {
            &mut self.tags
        }
    }

    /// An open dropdown takes every printable key as query text.
    pub fn is_capturing_text(&self) -> bool {
        self.country.is_open() || self.tags.is_open()
    }

    pub fn close_all(&mut self) {
        self.country.close();
        self.tags.close();
    }
}

#[derive(Debug)]
pub struct UploadPageState {
    pub queue: UploadQueue,
    pub cursor: usize,
    /// Next entry of `SAMPLE_FILES` offered by "add file".
    pub next_sample: usize,
}

#[derive(Debug)]
pub struct HeatmapPageState {
    pub map: Heatmap,
    pub row: usize,
    pub col: usize,
}

/// Modal and drawer demo state.
#[derive(Debug, Default)]
pub struct OverlayDemoState {
    pub form_input: String,
    pub last_action: Option<String>,
    pub drawer_cursor: usize,
    pub settings: [bool; 4],
}

pub const DRAWER_SETTINGS: [&str; 4] = ["Dark mode", "Compact rows", "Email alerts", "Beta features"];

/// Project named by the confirm modal.
pub const CONFIRM_SUBJECT: &str = "Apollo";

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub page: Page,
    pub running: bool,
    pub overlay: Overlay,

    // Terminal area of the last frame; mouse hit-testing uses it.
    pub viewport: Rect,

    // Components
    pub document: PointerDocument,
    pub sliders: SliderGallery,
    pub cards: Vec<StatCard>,
    pub grid: GridPageState,
    pub selects: SelectPageState,
    pub tree: TreeView,
    pub uploads: UploadPageState,
    pub heatmap: HeatmapPageState,
    pub demo: OverlayDemoState,
    pub breadcrumb_max: usize,

    // Cross-cutting
    pub config: ShowcaseConfig,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,

    // Paths
    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new(config: ShowcaseConfig, export_dir: PathBuf) -> Self {
        let seeds = SeedTree::new(config.seed);
        let document = PointerDocument::new();
        let sliders = SliderGallery::new(&document, &config.sliders);
        let queue = UploadQueue::new(config.upload.clone(), seeds.rng_for("upload", 0));
        Self {
            page: Page::Overview,
            running: true,
            overlay: Overlay::None,
            viewport: Rect::new(0, 0, 100, 30),
            document,
            sliders,
            cards: sample_deck(),
            grid: GridPageState {
                grid: sample_users(),
                column: 0,
            },
            selects: SelectPageState {
                country: sample_countries(),
                tags: sample_tags(),
                focus: 0,
            },
            tree: sample_tree(),
            uploads: UploadPageState {
                queue,
                cursor: 0,
                next_sample: 0,
            },
            heatmap: HeatmapPageState {
                map: sample_activity(&seeds),
                row: 0,
                col: 9,
            },
            demo: OverlayDemoState::default(),
            breadcrumb_max: 3,
            config,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            export_dir,
        }
    }

    /// Switch pages. Hidden sliders lose any drag in progress.
    pub fn set_page(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        self.sliders.teardown_all();
        self.selects.close_all();
        tracing::info!(from = self.page.slug(), to = page.slug(), "page change");
        self.page = page;
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        tracing::warn!(category = category.label(), %message, %context, "error recorded");
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Advance the upload simulation.
    pub fn tick(&mut self, elapsed: Duration) {
        for event in self.uploads.queue.tick(elapsed) {
            let Some(item) = self.uploads.queue.get(event_id(event)) else {
                continue;
            };
            let (name, status) = (item.name.clone(), item.status.clone());
            match (event, status) {
                (UploadEvent::Completed(_), _) => self.set_status(format!("Uploaded {name}")),
                (UploadEvent::Failed(_), UploadStatus::Failed(reason)) => {
                    self.push_error(
                        ErrorCategory::Upload,
                        format!("{name}: {reason}"),
                        "press r to retry".into(),
                    );
                }
                _ => {}
            }
        }
    }

    /// Queue the next sample file. Rejections land in the error history.
    pub fn add_sample_upload(&mut self) {
        let (name, size) = SAMPLE_FILES[self.uploads.next_sample % SAMPLE_FILES.len()];
        self.uploads.next_sample += 1;
        match self.uploads.queue.enqueue(name, size) {
            Ok(_) => self.set_status(format!("Queued {name}")),
            Err(err) => self.push_error(ErrorCategory::Upload, err.to_string(), "drop zone".into()),
        }
    }

    /// Write the grid, in its current sort order, to `users.csv` in the export directory.
    pub fn export_grid(&mut self) {
        let path = self.export_dir.join("users.csv");
        let result = std::fs::create_dir_all(&self.export_dir)
            .map_err(anyhow::Error::from)
            .and_then(|_| std::fs::File::create(&path).map_err(anyhow::Error::from))
            .and_then(|file| self.grid.grid.write_csv(file).map_err(anyhow::Error::from));
        match result {
            Ok(()) => {
                let rows = self.grid.grid.row_count();
                self.set_status(format!("Exported {rows} rows to {}", path.display()));
            }
            Err(err) => {
                self.push_error(ErrorCategory::Export, err.to_string(), path.display().to_string());
            }
        }
    }
}

fn event_id(event: UploadEvent) -> u64 {
    match event {
        UploadEvent::Started(id) | UploadEvent::Completed(id) | UploadEvent::Failed(id) => id,
    }
}
