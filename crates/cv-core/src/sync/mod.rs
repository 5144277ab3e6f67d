//! Cross-view synchronization
//!
//! Hover over an element in one view is turned into a delayed, coalesced
//! highlight broadcast to every view. The timing logic is a plain state machine
//! driven by explicit timestamps so it can run against a virtual clock.

mod clock;
mod highlight;

pub use clock::{Clock, ManualClock, SystemClock};
pub use highlight::{HighlightCommand, HighlightProtocol, HoverPhase, LiveHighlight};

use std::time::Duration;

/// Delay before a settled hover is broadcast
pub const DEFAULT_APPLY_DELAY: Duration = Duration::from_millis(100);

/// Delay before a hover leave clears the broadcast
pub const DEFAULT_CLEAR_DELAY: Duration = Duration::from_millis(50);

/// Timer windows of the highlight protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightTiming {
    pub apply_delay: Duration,
    pub clear_delay: Duration,
}

impl Default for HighlightTiming {
    fn default() -> Self {
        Self {
            apply_delay: DEFAULT_APPLY_DELAY,
            clear_delay: DEFAULT_CLEAR_DELAY,
        }
    }
}
