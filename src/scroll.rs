//! Scroll-to-frame mapping
//!
//! **Why**: The whole animation is a function of scroll position. Progress is
//! derived from the track's geometry relative to the viewport, clamped to
//! [0,1], then mapped linearly onto the frame sequence with nearest-frame
//! rounding. No easing, no inter-frame blending.
//!
//! **Used by**: Scrubber (per-tick recompute), App (feeds geometry per repaint)
//!
//! # Coalescing
//!
//! Scroll events are high-frequency. [`PendingScroll`] is a single-slot
//! "latest pending work" queue: every event overwrites the slot, the tick
//! takes it at most once per repaint. Bursts collapse to the newest value;
//! intermediate positions are discarded, never queued.

/// Viewport geometry of the scroll track at one instant
///
/// `container_top` is the track's top edge relative to the viewport top
/// (negative once scrolled past). Heights are in the same pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub container_top: f32,
    pub container_height: f32,
    pub viewport_height: f32,
}

impl ScrollMetrics {
    pub fn new(container_top: f32, container_height: f32, viewport_height: f32) -> Self {
        Self {
            container_top,
            container_height,
            viewport_height,
        }
    }

    /// Normalized scroll progress through the track, in [0,1]
    ///
    /// Positions outside the track's scroll span saturate rather than
    /// extrapolate. A non-positive scrollable range yields 0.
    pub fn progress(&self) -> f32 {
        let scrollable = self.container_height - self.viewport_height;
        if scrollable > 0.0 {
            ((-self.container_top) / scrollable).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Map progress in [0,1] to a frame index in [0, frame_count-1]
///
/// Nearest-frame rounding (ties away from zero), so progress 0.5 over 30
/// frames selects round(14.5) = 15.
pub fn frame_for_progress(progress: f32, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    let exact = progress.clamp(0.0, 1.0) * (frame_count - 1) as f32;
    (exact.round() as usize).min(frame_count - 1)
}

/// Single-slot latest-pending-work queue for scroll updates
#[derive(Debug, Default)]
pub struct PendingScroll {
    slot: Option<ScrollMetrics>,
}

impl PendingScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the newest scroll geometry, replacing any unprocessed one
    pub fn replace(&mut self, metrics: ScrollMetrics) {
        self.slot = Some(metrics);
    }

    /// Take the pending geometry, leaving the slot empty
    pub fn take(&mut self) -> Option<ScrollMetrics> {
        self.slot.take()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamped_to_unit_range() {
        // Scrolled far past the track end
        let m = ScrollMetrics::new(-10_000.0, 3000.0, 800.0);
        assert_eq!(m.progress(), 1.0);

        // Track still below the viewport
        let m = ScrollMetrics::new(500.0, 3000.0, 800.0);
        assert_eq!(m.progress(), 0.0);

        // Mid-track
        let m = ScrollMetrics::new(-1100.0, 3000.0, 800.0);
        assert_eq!(m.progress(), 0.5);
    }

    #[test]
    fn test_progress_zero_when_range_not_scrollable() {
        // Track shorter than viewport: nothing to scrub
        let m = ScrollMetrics::new(-100.0, 500.0, 800.0);
        assert_eq!(m.progress(), 0.0);

        let m = ScrollMetrics::new(-100.0, 800.0, 800.0);
        assert_eq!(m.progress(), 0.0);
    }

    #[test]
    fn test_frame_mapping_boundaries() {
        assert_eq!(frame_for_progress(0.0, 30), 0);
        assert_eq!(frame_for_progress(1.0, 30), 29);
        assert_eq!(frame_for_progress(0.5, 30), 15); // round(14.5)
    }

    #[test]
    fn test_frame_mapping_monotone() {
        let mut last = 0;
        for i in 0..=1000 {
            let p = i as f32 / 1000.0;
            let frame = frame_for_progress(p, 30);
            assert!(frame >= last, "mapping decreased at p={}", p);
            assert!(frame < 30);
            last = frame;
        }
    }

    #[test]
    fn test_frame_mapping_degenerate_counts() {
        assert_eq!(frame_for_progress(0.7, 0), 0);
        assert_eq!(frame_for_progress(0.7, 1), 0);
        // Out-of-range progress saturates
        assert_eq!(frame_for_progress(2.0, 30), 29);
        assert_eq!(frame_for_progress(-1.0, 30), 0);
    }

    #[test]
    fn test_pending_scroll_collapses_to_latest() {
        let mut pending = PendingScroll::new();
        assert!(pending.take().is_none());

        pending.replace(ScrollMetrics::new(-100.0, 3000.0, 800.0));
        pending.replace(ScrollMetrics::new(-200.0, 3000.0, 800.0));
        pending.replace(ScrollMetrics::new(-300.0, 3000.0, 800.0));

        let taken = pending.take().unwrap();
        assert_eq!(taken.container_top, -300.0);
        // Slot is emptied by take
        assert!(!pending.is_pending());
        assert!(pending.take().is_none());
    }
}
