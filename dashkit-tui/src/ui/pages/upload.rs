//! File upload page: drop zone, overall progress and the queue.

use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use dashkit_core::upload::{UploadItem, UploadStatus, SAMPLE_FILES};

use crate::app::AppState;
use crate::theme;
use crate::ui::pages::scroll_offset;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadHit {
    DropZone,
    Row(usize),
}

pub fn drop_zone(area: Rect) -> Rect {
    Rect {
        height: area.height.min(3),
        ..area
    }
}

pub fn rows_area(area: Rect) -> Rect {
    Rect {
        y: area.y + 5,
        height: area.height.saturating_sub(5),
        ..area
    }
}

pub fn hit(area: Rect, app: &AppState, pos: Position) -> Option<UploadHit> {
    if drop_zone(area).contains(pos) {
        return Some(UploadHit::DropZone);
    }
    let rows = rows_area(area);
    if !rows.contains(pos) {
        return None;
    }
    let len = app.uploads.queue.items().len();
    let offset = scroll_offset(app.uploads.cursor, len, rows.height as usize);
    let row = offset + usize::from(pos.y - rows.y);
    (row < len).then_some(UploadHit::Row(row))
}

/// `1.2 MB`, `220 KB`, `12 B`.
pub fn human_bytes(bytes: u64) -> String {
    const KB: f64 = 1000.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.0} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

fn bar(progress: f64) -> String {
    let filled = (progress.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn item_line(item: &UploadItem, is_cursor: bool) -> Line<'static> {
    let status_style = match &item.status {
        UploadStatus::Queued => theme::muted(),
        UploadStatus::Uploading => theme::accent(),
        UploadStatus::Done => theme::positive(),
        UploadStatus::Failed(_) => theme::negative(),
    };
    let name_style = if is_cursor { theme::cursor() } else { theme::text() };
    let status = match &item.status {
        UploadStatus::Failed(reason) => format!("failed: {reason}"),
        other => other.label().to_string(),
    };
    Line::from(vec![
        Span::styled(format!(" {:<22}", item.name), name_style),
        Span::styled(format!("{:>9}  ", human_bytes(item.size_bytes)), theme::muted()),
        Span::styled(bar(item.progress), status_style),
        Span::styled(format!(" {:>3.0}%  ", item.progress * 100.0), theme::muted()),
        Span::styled(status, status_style),
    ])
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let q = &app.uploads.queue;
    let next = SAMPLE_FILES[app.uploads.next_sample % SAMPLE_FILES.len()].0;

    let zone = drop_zone(area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Drop zone ")
        .title_style(theme::accent_bold());
    let inner = block.inner(zone);
    f.render_widget(block, zone);
    let limit = human_bytes(app.config.upload.max_file_bytes);
    let allowed = app.config.upload.allowed_extensions.join(", ");
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Click or press [a] to add ", theme::muted()),
            Span::styled(next, theme::accent()),
            Span::styled(format!("   max {limit}, {allowed}"), theme::muted()),
        ])),
        inner,
    );

    if area.height > 3 {
        let gauge_area = Rect {
            y: area.y + 3,
            height: 1,
            ..area
        };
        let label = format!(
            "{} done, {} uploading, {} failed",
            q.done_count(),
            q.uploading_count(),
            q.failed_count()
        );
        let gauge = Gauge::default()
            .gauge_style(theme::positive())
            .ratio(q.overall_progress().clamp(0.0, 1.0))
            .label(label);
        f.render_widget(gauge, gauge_area);
    }

    let rows = rows_area(area);
    let items = q.items();
    let lines: Vec<Line> = if items.is_empty() {
        vec![Line::from(Span::styled(" Queue is empty.", theme::muted()))]
    } else {
        let offset = scroll_offset(app.uploads.cursor, items.len(), rows.height as usize);
        items
            .iter()
            .enumerate()
            .skip(offset)
            .take(rows.height as usize)
            .map(|(i, item)| item_line(item, i == app.uploads.cursor))
            .collect()
    };
    f.render_widget(Paragraph::new(lines), rows);
}
