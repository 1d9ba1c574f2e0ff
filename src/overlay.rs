//! Two-stage text overlay state machine
//!
//! **Why**: The page reveals a headline when the scrub crosses a configured
//! trigger frame, then a secondary line once the user has settled above the
//! trigger for 800 ms. Dropping back below the trigger hides both at once
//! and cancels the pending reveal.
//!
//! **Used by**: Scrubber (transitions on frame change, promotion on tick)
//!
//! # States
//!
//! `Below -> Pending -> Settled`, with any downward crossing resetting to
//! `Below`. The tagged enum makes re-arming impossible: a crossing while
//! already `Pending` or `Settled` is a no-op.

use log::debug;
use std::time::{Duration, Instant};

/// Delay between the primary reveal and the secondary reveal
pub const SETTLE_DELAY: Duration = Duration::from_millis(800);

/// Overlay visibility state relative to the trigger frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayState {
    /// Frame below trigger: nothing visible
    Below,
    /// Crossed the trigger: primary visible, settle timer armed
    Pending { armed_at: Instant },
    /// Settle timer elapsed: primary and secondary visible
    Settled,
}

/// Overlay controller owning the trigger threshold and settle timer
#[derive(Debug)]
pub struct Overlay {
    trigger_frame: usize,
    settle_delay: Duration,
    state: OverlayState,
}

impl Overlay {
    pub fn new(trigger_frame: usize) -> Self {
        Self {
            trigger_frame,
            settle_delay: SETTLE_DELAY,
            state: OverlayState::Below,
        }
    }

    /// Override the settle delay (deterministic tests)
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn trigger_frame(&self) -> usize {
        self.trigger_frame
    }

    /// Primary text: visible from the moment the trigger is crossed
    pub fn primary_visible(&self) -> bool {
        !matches!(self.state, OverlayState::Below)
    }

    /// Secondary text: visible only after the settle timer fires
    pub fn secondary_visible(&self) -> bool {
        matches!(self.state, OverlayState::Settled)
    }

    /// Deadline of the armed settle timer, if any (repaint scheduling)
    pub fn settle_deadline(&self) -> Option<Instant> {
        match self.state {
            OverlayState::Pending { armed_at } => Some(armed_at + self.settle_delay),
            _ => None,
        }
    }

    /// Apply a frame-index change. Only called when the index actually
    /// changed; redundant calls with the same crossing direction must not
    /// re-arm the timer (guaranteed by the state match).
    ///
    /// Returns true if visibility changed.
    pub fn on_frame(&mut self, frame_index: usize, now: Instant) -> bool {
        if frame_index >= self.trigger_frame {
            match self.state {
                OverlayState::Below => {
                    debug!("Overlay trigger crossed at frame {}", frame_index);
                    self.state = OverlayState::Pending { armed_at: now };
                    true
                }
                // Already revealed or settling: keep the timer as-is
                OverlayState::Pending { .. } | OverlayState::Settled => false,
            }
        } else {
            match self.state {
                OverlayState::Below => false,
                _ => {
                    debug!("Overlay reset below trigger at frame {}", frame_index);
                    self.state = OverlayState::Below;
                    true
                }
            }
        }
    }

    /// Promote `Pending` to `Settled` once the delay has elapsed.
    ///
    /// Returns true if visibility changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let OverlayState::Pending { armed_at } = self.state
            && now.duration_since(armed_at) >= self.settle_delay
        {
            debug!("Overlay settled");
            self.state = OverlayState::Settled;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> Overlay {
        Overlay::new(26).with_settle_delay(Duration::from_millis(800))
    }

    #[test]
    fn test_below_trigger_nothing_visible() {
        let mut ov = overlay();
        let now = Instant::now();
        assert!(!ov.on_frame(25, now));
        assert!(!ov.primary_visible());
        assert!(!ov.secondary_visible());
    }

    #[test]
    fn test_crossing_reveals_primary_immediately() {
        let mut ov = overlay();
        let now = Instant::now();
        assert!(ov.on_frame(26, now));
        assert!(ov.primary_visible());
        assert!(!ov.secondary_visible());
        assert!(ov.settle_deadline().is_some());
    }

    #[test]
    fn test_secondary_after_settle_delay() {
        let mut ov = overlay();
        let t0 = Instant::now();
        ov.on_frame(26, t0);

        // Before the deadline: still pending
        assert!(!ov.tick(t0 + Duration::from_millis(799)));
        assert!(!ov.secondary_visible());

        // At the deadline: settled
        assert!(ov.tick(t0 + Duration::from_millis(800)));
        assert!(ov.primary_visible());
        assert!(ov.secondary_visible());
    }

    #[test]
    fn test_downward_crossing_cancels_timer_and_hides_both() {
        let mut ov = overlay();
        let t0 = Instant::now();
        ov.on_frame(26, t0);

        // Drop to frame 20 before the 800 ms elapse
        assert!(ov.on_frame(20, t0 + Duration::from_millis(300)));
        assert!(!ov.primary_visible());
        assert!(!ov.secondary_visible());
        assert!(ov.settle_deadline().is_none());

        // The old deadline passing must not resurrect the reveal
        assert!(!ov.tick(t0 + Duration::from_secs(2)));
        assert!(!ov.secondary_visible());
    }

    #[test]
    fn test_redundant_crossing_does_not_rearm() {
        let mut ov = overlay();
        let t0 = Instant::now();
        ov.on_frame(26, t0);
        let deadline = ov.settle_deadline().unwrap();

        // Further movement above the trigger keeps the original deadline
        assert!(!ov.on_frame(28, t0 + Duration::from_millis(500)));
        assert_eq!(ov.settle_deadline().unwrap(), deadline);
    }

    #[test]
    fn test_settled_survives_movement_above_trigger() {
        let mut ov = overlay();
        let t0 = Instant::now();
        ov.on_frame(26, t0);
        ov.tick(t0 + Duration::from_millis(900));
        assert!(ov.secondary_visible());

        assert!(!ov.on_frame(29, t0 + Duration::from_secs(1)));
        assert!(ov.secondary_visible());
    }
}
