//! Scrubbing engine: preload gate, redraw gating, overlay transitions
//!
//! **Why**: Ties the pieces together on the UI thread. Scroll geometry goes
//! into a single pending slot; each tick applies the newest geometry, maps it
//! to a frame index, and redraws only when the index actually changed. The
//! loaded flag (state being `Ready`) is the sole gate for every draw, resize
//! and overlay transition.
//!
//! **Used by**: App (`on_scroll`/`resize` from layout, `tick` once per repaint)
//!
//! # State
//!
//! `Loading(preloader) -> Ready { frames, current, overlay, surface }`, or
//! `Loading -> Failed` on the first decode error (terminal, by design: no
//! retry, no partial-sequence playback).

use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

use crate::events::{ScrubEvent, ScrubEventSender};
use crate::frame::LoadedFrame;
use crate::overlay::Overlay;
use crate::preload::{PreloadPhase, Preloader};
use crate::scroll::{PendingScroll, ScrollMetrics, frame_for_progress};
use crate::surface::Surface;

/// Scrubber lifecycle state
pub enum ScrubberState {
    /// Frames still decoding; nothing is drawn
    Loading(Preloader),
    /// All frames decoded, scrubbing live
    Ready(ReadyState),
    /// Preload aborted; terminal
    Failed,
}

/// Live scrubbing state once the sequence is fully decoded
pub struct ReadyState {
    frames: Vec<LoadedFrame>,
    current_frame: Option<usize>,
    overlay: Overlay,
    surface: Surface,
}

impl ReadyState {
    /// Draw `index`, skipping redundant draws and out-of-range indices.
    /// Returns the old index on an actual change.
    fn set_frame(&mut self, index: usize, now: Instant) -> Option<(Option<usize>, bool)> {
        if self.current_frame == Some(index) {
            return None; // Idempotence: same frame is a no-op
        }
        let Some(frame) = self.frames.get(index) else {
            warn!("Frame {} out of range (0..{})", index, self.frames.len());
            return None;
        };

        self.surface.draw_frame(frame);
        let old = self.current_frame;
        self.current_frame = Some(index);

        let overlay_changed = self.overlay.on_frame(index, now);
        Some((old, overlay_changed))
    }

    /// Redraw the current frame in place (after a surface resize)
    fn redraw(&mut self) {
        if let Some(index) = self.current_frame
            && let Some(frame) = self.frames.get(index)
        {
            self.surface.draw_frame(frame);
        }
    }
}

/// Scroll-driven frame scrubber
pub struct Scrubber {
    state: ScrubberState,
    pending: PendingScroll,
    events: ScrubEventSender,
    trigger_frame: usize,
}

impl Scrubber {
    /// Start scrubbing `paths`: spawns the preloader immediately
    pub fn new(paths: Vec<PathBuf>, trigger_frame: usize, events: ScrubEventSender) -> Self {
        Self {
            state: ScrubberState::Loading(Preloader::spawn(paths)),
            pending: PendingScroll::new(),
            events,
            trigger_frame,
        }
    }

    /// Build directly from decoded frames (tests, embedding)
    pub fn from_frames(frames: Vec<LoadedFrame>, overlay: Overlay, events: ScrubEventSender) -> Self {
        let trigger_frame = overlay.trigger_frame();
        Self {
            state: ScrubberState::Ready(ReadyState {
                frames,
                current_frame: None,
                overlay,
                surface: Surface::new(0, 0),
            }),
            pending: PendingScroll::new(),
            events,
            trigger_frame,
        }
    }

    /// Record the newest scroll geometry. Cheap; call on every scroll event.
    /// Processed at most once per `tick`.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        self.pending.replace(metrics);
    }

    /// Resync the surface to its host element's size and redraw.
    /// Ignored until loaded (nothing to size before the gate opens).
    pub fn resize(&mut self, width: usize, height: usize) {
        if let ScrubberState::Ready(ready) = &mut self.state
            && ready.surface.resize(width, height)
        {
            ready.redraw();
        }
    }

    /// One repaint tick: poll the preloader, apply the pending scroll,
    /// promote the overlay settle timer.
    pub fn tick(&mut self, now: Instant) {
        self.poll_preload();

        let ScrubberState::Ready(ready) = &mut self.state else {
            return;
        };

        if let Some(metrics) = self.pending.take() {
            let index = frame_for_progress(metrics.progress(), ready.frames.len());
            if let Some((old, overlay_changed)) = ready.set_frame(index, now) {
                self.events.emit(ScrubEvent::FrameChanged {
                    old_frame: old,
                    new_frame: index,
                });
                if overlay_changed {
                    self.events.emit(ScrubEvent::OverlayChanged {
                        primary: ready.overlay.primary_visible(),
                        secondary: ready.overlay.secondary_visible(),
                    });
                }
            }
        }

        if ready.overlay.tick(now) {
            self.events.emit(ScrubEvent::OverlayChanged {
                primary: ready.overlay.primary_visible(),
                secondary: ready.overlay.secondary_visible(),
            });
        }
    }

    /// Loading -> Ready/Failed transition
    fn poll_preload(&mut self) {
        let ScrubberState::Loading(preloader) = &mut self.state else {
            return;
        };

        match preloader.poll() {
            PreloadPhase::Loading => {}
            PreloadPhase::Ready => {
                let frames = preloader.take_frames().unwrap_or_default();
                info!("Scrubber ready: {} frames", frames.len());
                self.events.emit(ScrubEvent::SequenceLoaded {
                    frame_count: frames.len(),
                });
                self.state = ScrubberState::Ready(ReadyState {
                    frames,
                    current_frame: None,
                    overlay: Overlay::new(self.trigger_frame),
                    surface: Surface::new(0, 0),
                });
            }
            PreloadPhase::Failed => {
                let path = preloader
                    .failed_path()
                    .cloned()
                    .unwrap_or_default();
                self.events.emit(ScrubEvent::LoadFailed { path });
                self.state = ScrubberState::Failed;
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ScrubberState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, ScrubberState::Failed)
    }

    /// (loaded, total) while still preloading
    pub fn loading_progress(&self) -> Option<(usize, usize)> {
        match &self.state {
            ScrubberState::Loading(pre) => Some(pre.progress()),
            _ => None,
        }
    }

    pub fn frame_count(&self) -> usize {
        match &self.state {
            ScrubberState::Ready(ready) => ready.frames.len(),
            _ => 0,
        }
    }

    /// Last drawn frame index
    pub fn current_frame(&self) -> Option<usize> {
        match &self.state {
            ScrubberState::Ready(ready) => ready.current_frame,
            _ => None,
        }
    }

    /// Drawable surface, present only once loaded
    pub fn surface(&self) -> Option<&Surface> {
        match &self.state {
            ScrubberState::Ready(ready) => Some(&ready.surface),
            _ => None,
        }
    }

    pub fn primary_visible(&self) -> bool {
        match &self.state {
            ScrubberState::Ready(ready) => ready.overlay.primary_visible(),
            _ => false,
        }
    }

    pub fn secondary_visible(&self) -> bool {
        match &self.state {
            ScrubberState::Ready(ready) => ready.overlay.secondary_visible(),
            _ => false,
        }
    }

    /// Armed settle deadline, for repaint scheduling
    pub fn settle_deadline(&self) -> Option<Instant> {
        match &self.state {
            ScrubberState::Ready(ready) => ready.overlay.settle_deadline(),
            _ => None,
        }
    }
}
