//! Event notifications for scrub state changes.
//!
//! Events are emitted when significant state changes occur (sequence loaded,
//! frame changed, overlay toggled) and drained by the app each repaint to
//! drive logging and the status line.

use crossbeam_channel::Sender;
use std::path::PathBuf;

/// Events emitted by the scrubber
#[derive(Debug, Clone)]
pub enum ScrubEvent {
    /// Preload finished; all frames decoded
    SequenceLoaded { frame_count: usize },

    /// Preload aborted on its first failure
    LoadFailed { path: PathBuf },

    /// The drawn frame index changed
    FrameChanged { old_frame: Option<usize>, new_frame: usize },

    /// Overlay visibility changed
    OverlayChanged { primary: bool, secondary: bool },
}

/// Event sender wrapper for the scrubber
///
/// The scrubber holds this sender to emit events when its state changes.
#[derive(Clone, Debug, Default)]
pub struct ScrubEventSender {
    sender: Option<Sender<ScrubEvent>>,
}

impl ScrubEventSender {
    /// Create event sender (connected to channel)
    pub fn new(sender: Sender<ScrubEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Create dummy sender (for tests or when events not needed)
    pub fn dummy() -> Self {
        Self { sender: None }
    }

    /// Emit event (silent if no receiver)
    pub fn emit(&self, event: ScrubEvent) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(event); // Ignore send errors (receiver might be dropped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let sender = ScrubEventSender::new(tx);
        sender.emit(ScrubEvent::SequenceLoaded { frame_count: 30 });

        match rx.try_recv().unwrap() {
            ScrubEvent::SequenceLoaded { frame_count } => assert_eq!(frame_count, 30),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_dummy_sender_is_silent() {
        let sender = ScrubEventSender::dummy();
        // Must not panic or block
        sender.emit(ScrubEvent::OverlayChanged {
            primary: true,
            secondary: false,
        });
    }
}
