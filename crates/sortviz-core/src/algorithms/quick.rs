//! Quicksort with the Lomuto partition scheme.
//!
//! The pivot is the last element of the range. `boundary` is the first
//! slot not known to hold a value below the pivot; the final swap places
//! the pivot there, and the recursion excludes it on both sides, so
//! all-equal input terminates without degenerate recursion.

use std::cmp::Ordering;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::algorithms::SortError;
use crate::emitter::StepContext;

/// Sort the array with quicksort.
///
/// # Errors
///
/// Returns [`SortError`] on an array access fault.
pub async fn run(ctx: &mut StepContext) -> Result<(), SortError> {
    let len = ctx.len().await;
    if len < 2 {
        return Ok(());
    }
    sort_range(ctx, 0, len.saturating_sub(1)).await
}

/// Recursively sort the inclusive range `[low, high]`.
// Index arithmetic stays inside the range: the pivot lands in
// [low, high], and both recursive calls exclude it.
#[allow(clippy::arithmetic_side_effects)]
fn sort_range<'a>(
    ctx: &'a mut StepContext,
    low: usize,
    high: usize,
) -> BoxFuture<'a, Result<(), SortError>> {
    async move {
        if low >= high || ctx.is_cancelled() {
            return Ok(());
        }
        let pivot_at = partition(ctx, low, high).await?;
        if pivot_at > low {
            sort_range(ctx, low, pivot_at - 1).await?;
        }
        if pivot_at < high {
            sort_range(ctx, pivot_at + 1, high).await?;
        }
        Ok(())
    }
    .boxed()
}

/// Lomuto partition of `[low, high]` around the last element.
///
/// Returns the pivot's final position. A cancelled partition returns the
/// current boundary without the final pivot swap; the caller unwinds
/// immediately, so the half-partitioned range is simply left visible.
// boundary <= probe < high throughout the scan, so boundary + 1 and the
// final swap target stay in range.
#[allow(clippy::arithmetic_side_effects)]
async fn partition(ctx: &mut StepContext, low: usize, high: usize) -> Result<usize, SortError> {
    let mut boundary = low;
    for probe in low..high {
        if ctx.is_cancelled() {
            return Ok(boundary);
        }
        if ctx.compare(probe, high).await? == Ordering::Less {
            ctx.swap(boundary, probe).await?;
            boundary += 1;
        }
        ctx.step().await;
    }
    ctx.swap(boundary, high).await?;
    ctx.step().await;
    Ok(boundary)
}
