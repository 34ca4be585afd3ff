//! Enumeration types for the Sortviz animation engine.
//!
//! [`Algorithm`] is the closed set of sorting algorithm variants a front
//! end can select, and [`RunStatus`] is the lifecycle state machine of a
//! single run.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Algorithm selection
// ---------------------------------------------------------------------------

/// A sorting algorithm variant the animation engine can execute.
///
/// This is a closed set selected by name at start time, not a plugin
/// mechanism: every variant shares the same execution contract against
/// the array state and step emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Algorithm {
    /// Adjacent compare-and-swap passes, O(n^2).
    Bubble,
    /// Find-minimum scan with one swap per outer pass.
    Selection,
    /// Shift-based insertion into the sorted prefix.
    Insertion,
    /// Recursive stable merge with a temporary buffer.
    Merge,
    /// Lomuto-partition quicksort, last element as pivot.
    Quick,
}

impl Algorithm {
    /// All variants in menu order, for front-end listings.
    pub const ALL: [Self; 5] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
    ];

    /// Resolve an algorithm from a human-facing name.
    ///
    /// Matching is case-insensitive and accepts both the bare name
    /// ("bubble") and the menu label ("Bubble Sort"). Returns `None`
    /// for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "bubble" | "bubble sort" => Some(Self::Bubble),
            "selection" | "selection sort" => Some(Self::Selection),
            "insertion" | "insertion sort" => Some(Self::Insertion),
            "merge" | "merge sort" => Some(Self::Merge),
            "quick" | "quick sort" | "quicksort" => Some(Self::Quick),
            _ => None,
        }
    }

    /// The menu label for this variant.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
        }
    }
}

impl core::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Run lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle state of a sort run.
///
/// Transitions: `Idle -> Running -> {Completed | Stopped}`. Both
/// `Completed` and `Stopped` are terminal; generating a new array resets
/// the machine to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum RunStatus {
    /// No run has started against the current array.
    Idle,
    /// An algorithm task is executing.
    Running,
    /// A stop request was observed before natural completion.
    Stopped,
    /// The algorithm ran to natural completion.
    Completed,
}

impl RunStatus {
    /// Whether this status is a terminal state of the run machine.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Stopped | Self::Completed)
    }
}
