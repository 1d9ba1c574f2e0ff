//! All-or-nothing sequence preloader with a worker pool
//!
//! **Why**: Scrubbing must never wait on disk or the decoder, so the whole
//! sequence is decoded before the first draw. Completion is all-or-nothing:
//! the first failed frame aborts the preload, successes already collected are
//! discarded, and the scrubber stays "not ready" permanently. No retry.
//!
//! **Used by**: Scrubber (polls per tick until Ready/Failed)
//!
//! # Concurrency
//!
//! Jobs are fanned out to `num_cpus * 3/4` worker threads over a
//! crossbeam channel; results come back over a second channel and are
//! drained on the UI thread by `poll()`. Dropping the job sender after
//! enqueueing lets workers exit once the queue runs dry.

use crossbeam_channel::{Receiver, unbounded};
use log::{debug, error, info};
use std::path::PathBuf;
use std::thread;

use crate::frame::{FrameError, LoadedFrame};

/// One decode job for a worker thread
struct LoadJob {
    index: usize,
    path: PathBuf,
}

/// One decode result back from a worker
struct LoadResult {
    index: usize,
    result: Result<LoadedFrame, FrameError>,
}

/// Aggregate preload status
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreloadPhase {
    Loading,
    Ready,
    Failed,
}

/// Background preloader for one frame sequence
pub struct Preloader {
    total: usize,
    slots: Vec<Option<LoadedFrame>>,
    loaded_count: usize,
    phase: PreloadPhase,
    failed_path: Option<PathBuf>,
    result_rx: Receiver<LoadResult>,
    _handles: Vec<thread::JoinHandle<()>>, // Keep handles to prevent premature drop
}

impl Preloader {
    /// Start decoding all paths on a worker pool
    pub fn spawn(paths: Vec<PathBuf>) -> Self {
        let total = paths.len();
        let workers = (num_cpus::get() * 3 / 4).clamp(1, total.max(1));

        let (job_tx, job_rx) = unbounded::<LoadJob>();
        let (result_tx, result_rx) = unbounded::<LoadResult>();

        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();

            let handle = thread::Builder::new()
                .name(format!("scrolla-worker-{}", worker_id))
                .spawn(move || {
                    debug!("Worker {} started", worker_id);
                    while let Ok(job) = job_rx.recv() {
                        let result = LoadedFrame::load(&job.path);
                        let _ = result_tx.send(LoadResult {
                            index: job.index,
                            result,
                        });
                    }
                    debug!("Worker {} stopped", worker_id);
                })
                .expect("Failed to spawn worker thread");
            handles.push(handle);
        }

        for (index, path) in paths.into_iter().enumerate() {
            let _ = job_tx.send(LoadJob { index, path });
        }
        // Closing the job channel ends the worker loops after the queue drains
        drop(job_tx);

        info!("Preloading {} frames on {} workers", total, workers);

        let phase = if total == 0 {
            PreloadPhase::Ready
        } else {
            PreloadPhase::Loading
        };

        Self {
            total,
            slots: (0..total).map(|_| None).collect(),
            loaded_count: 0,
            phase,
            failed_path: None,
            result_rx,
            _handles: handles,
        }
    }

    /// Drain finished decodes. Call once per UI tick.
    pub fn poll(&mut self) -> PreloadPhase {
        while let Ok(done) = self.result_rx.try_recv() {
            match done.result {
                Ok(frame) => {
                    if self.phase != PreloadPhase::Loading {
                        continue; // Late success after a failure: discarded
                    }
                    if self.slots[done.index].is_none() {
                        self.slots[done.index] = Some(frame);
                        self.loaded_count += 1;
                    }
                    if self.loaded_count == self.total {
                        info!("Preload complete: {} frames", self.total);
                        self.phase = PreloadPhase::Ready;
                    }
                }
                Err(err) => {
                    if self.phase == PreloadPhase::Loading {
                        // First failure wins: abort and drop partial results
                        error!("Preload aborted: {}", err);
                        self.failed_path = Some(err.path().to_path_buf());
                        self.slots.clear();
                        self.loaded_count = 0;
                        self.phase = PreloadPhase::Failed;
                    }
                }
            }
        }
        self.phase
    }

    pub fn phase(&self) -> PreloadPhase {
        self.phase
    }

    /// (loaded, total) for the loading indicator
    pub fn progress(&self) -> (usize, usize) {
        (self.loaded_count, self.total)
    }

    /// Locator of the frame that aborted the preload
    pub fn failed_path(&self) -> Option<&PathBuf> {
        self.failed_path.as_ref()
    }

    /// Take the ordered frames once Ready. None while Loading or after Failed.
    pub fn take_frames(&mut self) -> Option<Vec<LoadedFrame>> {
        if self.phase != PreloadPhase::Ready {
            return None;
        }
        let slots = std::mem::take(&mut self.slots);
        // Every slot is filled once the phase is Ready
        Some(slots.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    /// Write `count` tiny valid PNGs into a fresh temp dir
    fn write_sequence(tag: &str, count: usize) -> (PathBuf, Vec<PathBuf>) {
        let dir = std::env::temp_dir().join(format!("scrolla-pre-{}-{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut paths = Vec::new();
        for i in 0..count {
            let path = dir.join(format!("frame_{:03}.png", i));
            image::RgbaImage::from_pixel(2, 2, image::Rgba([i as u8, 0, 0, 255]))
                .save(&path)
                .unwrap();
            paths.push(path);
        }
        (dir, paths)
    }

    /// Poll until the preloader leaves Loading (bounded wait)
    fn wait_settled(pre: &mut Preloader) -> PreloadPhase {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            let phase = pre.poll();
            if phase != PreloadPhase::Loading || Instant::now() > deadline {
                return phase;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_preload_all_frames_in_order() {
        let (dir, paths) = write_sequence("ok", 8);
        let mut pre = Preloader::spawn(paths.clone());

        assert_eq!(wait_settled(&mut pre), PreloadPhase::Ready);
        assert_eq!(pre.progress(), (8, 8));

        let frames = pre.take_frames().unwrap();
        assert_eq!(frames.len(), 8);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.path(), paths[i]);
            assert!(frame.is_ready());
            // First channel of the fill color encodes the frame number
            assert_eq!(frame.pixels()[0], i as u8);
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_single_failure_aborts_everything() {
        let (dir, mut paths) = write_sequence("fail", 29);
        // One locator that cannot load
        paths.insert(13, dir.join("missing_frame.png"));
        assert_eq!(paths.len(), 30);

        let mut pre = Preloader::spawn(paths);
        assert_eq!(wait_settled(&mut pre), PreloadPhase::Failed);

        // Partial successes are discarded; never reaches Ready
        assert_eq!(pre.progress().0, 0);
        assert!(pre.take_frames().is_none());
        assert_eq!(pre.poll(), PreloadPhase::Failed);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_sequence_is_ready_immediately() {
        let mut pre = Preloader::spawn(Vec::new());
        assert_eq!(pre.phase(), PreloadPhase::Ready);
        assert_eq!(pre.take_frames().unwrap().len(), 0);
    }
}
