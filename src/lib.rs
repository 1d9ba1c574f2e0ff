//! SCROLLA - Scroll-driven image sequence scrubber
//!
//! Re-exports all modules for use by the binary target.

// Core engine (preload, scroll mapping, surface, overlay, scrubber)
pub mod events;
pub mod frame;
pub mod overlay;
pub mod preload;
pub mod scroll;
pub mod scrubber;
pub mod sequence;
pub mod surface;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod hero;

// Re-export commonly used types
pub use config::PageConfig;
pub use events::{ScrubEvent, ScrubEventSender};
pub use frame::{FrameError, LoadedFrame};
pub use overlay::{Overlay, OverlayState};
pub use scroll::{PendingScroll, ScrollMetrics, frame_for_progress};
pub use scrubber::Scrubber;
pub use sequence::FrameSequence;
pub use surface::{CoverFit, Surface};
