//! The sorting algorithm variants and their shared execution contract.
//!
//! Every variant is a free `run` function against a [`StepContext`]:
//! straight-line (or recursive) comparison logic that calls
//! [`StepContext::step`] after each unit of visible work and checks
//! cancellation at every loop and recursion boundary. A cancelled run
//! returns early and leaves the array in whatever partial order it
//! reached; there is no rollback, by design — stopping mid-sort leaves a
//! partially sorted array visible.
//!
//! # Modules
//!
//! - [`bubble`] -- Adjacent compare-and-swap passes
//! - [`selection`] -- Find-minimum scan with one swap per pass
//! - [`insertion`] -- Shift-based insertion into the sorted prefix
//! - [`merge`] -- Recursive stable merge with a temporary buffer
//! - [`quick`] -- Lomuto-partition quicksort

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

use sortviz_types::Algorithm;
use tracing::debug;

use crate::array::ArrayError;
use crate::emitter::StepContext;

/// Errors that can occur while an algorithm executes.
///
/// The only failure mode is an array access fault, which signals a bug
/// in an algorithm implementation rather than a recoverable condition.
#[derive(Debug, thiserror::Error)]
pub enum SortError {
    /// An array mutation primitive rejected an index.
    #[error("array access fault: {source}")]
    Array {
        /// The underlying array error.
        #[from]
        source: ArrayError,
    },
}

/// Execute the chosen algorithm variant against the given context.
///
/// # Errors
///
/// Returns [`SortError`] if an array access faults (a programming error
/// in the variant, never expected at runtime).
pub async fn run(algorithm: Algorithm, ctx: &mut StepContext) -> Result<(), SortError> {
    debug!(%algorithm, "dispatching sort algorithm");
    match algorithm {
        Algorithm::Bubble => bubble::run(ctx).await,
        Algorithm::Selection => selection::run(ctx).await,
        Algorithm::Insertion => insertion::run(ctx).await,
        Algorithm::Merge => merge::run(ctx).await,
        Algorithm::Quick => quick::run(ctx).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testutil {
    //! Shared helpers for algorithm tests.

    use std::sync::Arc;

    use tokio::sync::RwLock;

    use crate::array::ArrayState;
    use crate::emitter::{NoOpSink, StepContext, StepEmitter};

    /// Build an unpaced context over explicit values, returning the
    /// emitter and shared array for inspection.
    pub(crate) fn context(
        values: &[u32],
        step_delay_ms: u64,
    ) -> (StepContext, Arc<StepEmitter>, Arc<RwLock<ArrayState>>) {
        let array = Arc::new(RwLock::new(
            ArrayState::from_values(values.to_vec()).unwrap(),
        ));
        let emitter = Arc::new(StepEmitter::new(step_delay_ms));
        let ctx = StepContext::new(Arc::clone(&array), Arc::clone(&emitter), Box::new(NoOpSink));
        (ctx, emitter, array)
    }

    /// Snapshot the current values of a shared array.
    pub(crate) async fn values_of(array: &Arc<RwLock<ArrayState>>) -> Vec<u32> {
        array.read().await.values().to_vec()
    }

    /// Whether `candidate` is a permutation of `original`.
    pub(crate) fn is_permutation_of(candidate: &[u32], original: &[u32]) -> bool {
        let mut a = candidate.to_vec();
        let mut b = original.to_vec();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}
