//! Frame sink that bridges the animation engine to structured logging.
//!
//! A real front end would repaint on every frame; the headless demo
//! instead logs each frame at `trace` and a progress line at `debug`
//! every so often, which is enough to watch a run from a terminal with
//! `RUST_LOG=sortviz_engine=debug`.

use sortviz_core::emitter::FrameSink;
use sortviz_types::Frame;
use tracing::{debug, trace};

/// How many frames pass between `debug`-level progress lines.
const PROGRESS_EVERY: u64 = 250;

/// A [`FrameSink`] that writes frames to the tracing subscriber.
pub struct TracingSink {
    frames_seen: u64,
}

impl TracingSink {
    /// Create a sink with its frame counter at zero.
    pub const fn new() -> Self {
        Self { frames_seen: 0 }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for TracingSink {
    fn on_frame(&mut self, frame: &Frame) {
        self.frames_seen = self.frames_seen.saturating_add(1);
        trace!(
            frame = self.frames_seen,
            active = ?frame.active,
            comparing = ?frame.comparing,
            "frame"
        );
        if self.frames_seen.checked_rem(PROGRESS_EVERY) == Some(0) {
            debug!(
                frames = self.frames_seen,
                len = frame.values.len(),
                "run in progress"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_frames() {
        let mut sink = TracingSink::new();
        let frame = Frame {
            values: vec![1, 2, 3],
            active: Some(0),
            comparing: Some(1),
        };
        sink.on_frame(&frame);
        sink.on_frame(&frame);
        assert_eq!(sink.frames_seen, 2);
    }
}
