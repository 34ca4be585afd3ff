//! Frame snapshots and run summaries.
//!
//! A [`Frame`] is one discrete visual snapshot of the array emitted during
//! a sort; a [`RunSummary`] is the record of one finished run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Algorithm, RunStatus};
use crate::ids::RunId;

/// One discrete visual snapshot emitted during a sort.
///
/// The renderer draws `values` as bars and may color the two highlighted
/// positions distinctly (the classic red "active" cursor and yellow
/// "comparing" cursor). Highlight indices, when present, always lie
/// within `0..values.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Frame {
    /// The full array contents at the moment of the step.
    pub values: Vec<u32>,
    /// Position the algorithm is currently working at, if any.
    pub active: Option<usize>,
    /// Position the algorithm is currently comparing against, if any.
    pub comparing: Option<usize>,
}

impl Frame {
    /// Whether any highlight is set on this frame.
    pub const fn is_highlighted(&self) -> bool {
        self.active.is_some() || self.comparing.is_some()
    }
}

/// Record of one finished sort run.
///
/// Produced by the controller when a run reaches a terminal status and
/// logged for operators; also returned to callers awaiting completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RunSummary {
    /// Identifier of the run.
    pub run_id: RunId,
    /// The algorithm that executed.
    pub algorithm: Algorithm,
    /// The terminal status the run reached.
    pub status: RunStatus,
    /// Number of frames emitted to the sink.
    pub steps: u64,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
    /// When the run started.
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn frame_highlight_presence() {
        let mut frame = Frame {
            values: vec![3, 1, 2],
            active: None,
            comparing: None,
        };
        assert!(!frame.is_highlighted());
        frame.active = Some(0);
        assert!(frame.is_highlighted());
    }

    #[test]
    fn summary_round_trips_through_serde() {
        let summary = RunSummary {
            run_id: RunId::new(),
            algorithm: Algorithm::Merge,
            status: RunStatus::Completed,
            steps: 42,
            elapsed_ms: 517,
            started_at: Utc::now(),
        };
        let json = serde_json::to_string(&summary).unwrap();
        let back: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
