//! Simulated file-upload queue.
//!
//! Progress and failures are drawn from a seeded RNG so a given seed replays
//! the same session. Nothing touches the network or the filesystem.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;

use crate::config::UploadConfig;

/// Simulated throughput before jitter.
const BYTES_PER_SEC: f64 = 4.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("file name is empty")]
    EmptyName,
    #[error("{name} is {size} bytes, limit is {limit}")]
    TooLarge { name: String, size: u64, limit: u64 },
    #[error("{name}: extension .{ext} is not allowed")]
    ExtensionNotAllowed { name: String, ext: String },
    #[error("no upload with id {0}")]
    NotFound(u64),
    #[error("upload {0} has not failed")]
    NotRetryable(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    Queued,
    Uploading,
    Done,
    Failed(String),
}

impl UploadStatus {
    pub fn label(&self) -> &str {
        match self {
            UploadStatus::Queued => "queued",
            UploadStatus::Uploading => "uploading",
            UploadStatus::Done => "done",
            UploadStatus::Failed(_) => "failed",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, UploadStatus::Done | UploadStatus::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadItem {
    pub id: u64,
    pub name: String,
    pub size_bytes: u64,
    /// Fraction in `[0, 1]`.
    pub progress: f64,
    pub status: UploadStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadEvent {
    Started(u64),
    Completed(u64),
    Failed(u64),
}

const FAILURE_REASONS: [&str; 3] = ["connection reset", "server returned 503", "checksum mismatch"];

#[derive(Debug, Clone)]
pub struct UploadQueue {
    items: Vec<UploadItem>,
    next_id: u64,
    rng: StdRng,
    config: UploadConfig,
}

impl UploadQueue {
    pub fn new(config: UploadConfig, rng: StdRng) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            rng,
            config,
        }
    }

    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&UploadItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Validate and queue a file. Returns the new item's id.
    pub fn enqueue(&mut self, name: &str, size_bytes: u64) -> Result<u64, UploadError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UploadError::EmptyName);
        }
        if size_bytes > self.config.max_file_bytes {
            return Err(UploadError::TooLarge {
                name: name.to_string(),
                size: size_bytes,
                limit: self.config.max_file_bytes,
            });
        }
        if !self.config.allowed_extensions.is_empty() {
            let ext = name
                .rsplit_once('.')
                .map(|(_, e)| e.to_ascii_lowercase())
                .unwrap_or_default();
            if !self.config.allowed_extensions.iter().any(|a| a.eq_ignore_ascii_case(&ext)) {
                return Err(UploadError::ExtensionNotAllowed {
                    name: name.to_string(),
                    ext,
                });
            }
        }
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(UploadItem {
            id,
            name: name.to_string(),
            size_bytes,
            progress: 0.0,
            status: UploadStatus::Queued,
        });
        tracing::debug!(id, name, size_bytes, "upload queued");
        Ok(id)
    }

    pub fn uploading_count(&self) -> usize {
        self.count(|s| matches!(s, UploadStatus::Uploading))
    }

    pub fn done_count(&self) -> usize {
        self.count(|s| matches!(s, UploadStatus::Done))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, UploadStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&UploadStatus) -> bool) -> usize {
        self.items.iter().filter(|i| pred(&i.status)).count()
    }

    /// Byte-weighted progress over every item that has not failed.
    pub fn overall_progress(&self) -> f64 {
        let (sent, total) = self
            .items
            .iter()
            .filter(|i| !matches!(i.status, UploadStatus::Failed(_)))
            .fold((0.0, 0.0), |(sent, total), i| {
                let size = i.size_bytes.max(1) as f64;
                (sent + i.progress * size, total + size)
            });
        if total == 0.0 {
            0.0
        } else {
            sent / total
        }
    }

    /// Advance the simulation. Starts queued items up to the concurrency
    /// limit, then moves every uploading item forward.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<UploadEvent> {
        let mut events = Vec::new();
        let mut active = self.uploading_count();
        for item in self.items.iter_mut() {
            if active >= self.config.max_concurrent {
                break;
            }
            if item.status == UploadStatus::Queued {
                item.status = UploadStatus::Uploading;
                active += 1;
                events.push(UploadEvent::Started(item.id));
            }
        }

        let secs = elapsed.as_secs_f64();
        let failure_rate = self.config.failure_rate.clamp(0.0, 1.0);
        for item in self.items.iter_mut() {
            if item.status != UploadStatus::Uploading {
                continue;
            }
            let jitter: f64 = self.rng.gen_range(0.5..1.5);
            let delta = (secs * BYTES_PER_SEC * jitter / item.size_bytes.max(1) as f64).min(1.0);
            // `failure_rate` is the chance of failing over a whole upload,
            // spread across ticks in proportion to progress.
            if self.rng.gen_bool((failure_rate * delta).clamp(0.0, 1.0)) {
                let reason = FAILURE_REASONS[self.rng.gen_range(0..FAILURE_REASONS.len())];
                tracing::info!(id = item.id, name = %item.name, reason, "upload failed");
                item.status = UploadStatus::Failed(reason.to_string());
                events.push(UploadEvent::Failed(item.id));
                continue;
            }
            item.progress = (item.progress + delta).min(1.0);
            if item.progress >= 1.0 {
                item.status = UploadStatus::Done;
                tracing::info!(id = item.id, name = %item.name, "upload complete");
                events.push(UploadEvent::Completed(item.id));
            }
        }
        events
    }

    /// Put a failed item back in the queue from zero.
    pub fn retry(&mut self, id: u64) -> Result<(), UploadError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(UploadError::NotFound(id))?;
        if !matches!(item.status, UploadStatus::Failed(_)) {
            return Err(UploadError::NotRetryable(id));
        }
        item.status = UploadStatus::Queued;
        item.progress = 0.0;
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> Result<UploadItem, UploadError> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(UploadError::NotFound(id))?;
        Ok(self.items.remove(pos))
    }

    pub fn clear_finished(&mut self) {
        self.items.retain(|i| !i.status.is_finished());
    }
}

/// Files offered by the upload page's "add file" action, in rotation.
pub const SAMPLE_FILES: [(&str, u64); 6] = [
    ("quarterly-report.pdf", 3_400_000),
    ("avatar.png", 220_000),
    ("customers.csv", 9_800_000),
    ("notes.txt", 12_000),
    ("installer.exe", 48_000_000),
    ("banner.jpg", 1_750_000),
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn queue(failure_rate: f64, max_concurrent: usize) -> UploadQueue {
        let config = UploadConfig {
            failure_rate,
            max_concurrent,
            ..UploadConfig::default()
        };
        UploadQueue::new(config, StdRng::seed_from_u64(1))
    }

    #[test]
    fn enqueue_validates() {
        let mut q = queue(0.0, 2);
        assert_eq!(q.enqueue("  ", 10), Err(UploadError::EmptyName));
        assert!(matches!(
            q.enqueue("big.pdf", u64::MAX),
            Err(UploadError::TooLarge { .. })
        ));
        assert_eq!(
            q.enqueue("setup.EXE", 10),
            Err(UploadError::ExtensionNotAllowed {
                name: "setup.EXE".into(),
                ext: "exe".into()
            })
        );
        assert!(matches!(
            q.enqueue("Makefile", 10),
            Err(UploadError::ExtensionNotAllowed { .. })
        ));
        assert_eq!(q.enqueue("Photo.PNG", 10), Ok(1));
        assert_eq!(q.enqueue("a.txt", 10), Ok(2));
    }

    #[test]
    fn concurrency_is_capped() {
        let mut q = queue(0.0, 2);
        for name in ["a.txt", "b.txt", "c.txt"] {
            q.enqueue(name, 100 * 1024 * 1024 / 10).unwrap();
        }
        let events = q.tick(Duration::from_millis(1));
        assert_eq!(events, vec![UploadEvent::Started(1), UploadEvent::Started(2)]);
        assert_eq!(q.uploading_count(), 2);
        assert_eq!(q.get(3).unwrap().status, UploadStatus::Queued);
    }

    #[test]
    fn uploads_finish_without_failures() {
        let mut q = queue(0.0, 1);
        q.enqueue("a.txt", 1_000_000).unwrap();
        q.enqueue("b.txt", 1_000_000).unwrap();
        for _ in 0..50 {
            q.tick(Duration::from_millis(250));
        }
        assert_eq!(q.done_count(), 2);
        assert!((q.overall_progress() - 1.0).abs() < 1e-12);
        assert!(q.items().iter().all(|i| i.progress == 1.0));
    }

    #[test]
    fn certain_failure_then_retry() {
        let mut q = queue(1.0, 1);
        q.enqueue("a.txt", 1).unwrap();
        let events = q.tick(Duration::from_secs(1));
        assert_eq!(events, vec![UploadEvent::Started(1), UploadEvent::Failed(1)]);
        assert_eq!(q.failed_count(), 1);
        assert_eq!(q.overall_progress(), 0.0);

        q.retry(1).unwrap();
        assert_eq!(q.get(1).unwrap().status, UploadStatus::Queued);
        assert_eq!(q.retry(1), Err(UploadError::NotRetryable(1)));
        assert_eq!(q.retry(9), Err(UploadError::NotFound(9)));
    }

    #[test]
    fn same_seed_same_session() {
        let run = || {
            let mut q = queue(0.3, 2);
            for (name, size) in SAMPLE_FILES.iter().filter(|(n, _)| !n.ends_with(".exe")) {
                q.enqueue(name, *size).unwrap();
            }
            for _ in 0..20 {
                q.tick(Duration::from_millis(250));
            }
            q.items().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn remove_and_clear() {
        let mut q = queue(0.0, 1);
        q.enqueue("a.txt", 1).unwrap();
        q.enqueue("b.txt", 1).unwrap();
        q.tick(Duration::from_secs(1));
        assert_eq!(q.done_count(), 1);
        q.clear_finished();
        assert_eq!(q.items().len(), 1);
        assert_eq!(q.remove(2).unwrap().name, "b.txt");
        assert_eq!(q.remove(2), Err(UploadError::NotFound(2)));
    }
}
