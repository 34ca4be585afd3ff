//! Merge sort: recursive midpoint split with a stable merge.
//!
//! The merge of a range has three visible phases — merge-compare,
//! drain-left, drain-right — followed by per-element copy-back steps.
//! Ties take the left element first, so equal values keep their
//! left-to-right order (stability toward the left half).

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::algorithms::SortError;
use crate::emitter::StepContext;

/// Sort the array with merge sort.
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

/// Recursively sort the inclusive range `[left, right]`.
///
/// Recursion through an async fn needs a boxed future; the depth is
/// log2(len) so the allocation cost is negligible next to step pacing.
// Index arithmetic stays inside the range: left <= mid < right holds
// whenever the function recurses, so mid + 1 <= right.
#[allow(clippy::arithmetic_side_effects)]
fn sort_range<'a>(
    ctx: &'a mut StepContext,
    left: usize,
    right: usize,
) -> BoxFuture<'a, Result<(), SortError>> {
    async move {
        if left >= right || ctx.is_cancelled() {
            return Ok(());
        }
        let mid = left + (right - left) / 2;
        sort_range(ctx, left, mid).await?;
        sort_range(ctx, mid + 1, right).await?;
        merge(ctx, left, mid, right).await
    }
    .boxed()
}

/// Merge the sorted halves `[left, mid]` and `[mid + 1, right]`.
// Cursor arithmetic stays inside the range: i <= mid and j <= right are
// loop conditions, and the buffer holds exactly right - left + 1 values.
#[allow(clippy::arithmetic_side_effects)]
async fn merge(
    ctx: &mut StepContext,
    left: usize,
    mid: usize,
    right: usize,
) -> Result<(), SortError> {
    if ctx.is_cancelled() {
        return Ok(());
    }

    let mut buffer: Vec<u32> = Vec::with_capacity(right - left + 1);
    let mut i = left;
    let mut j = mid + 1;

    // Phase 1: merge-compare. Ties take the left element (stability).
    while i <= mid && j <= right {
        if ctx.is_cancelled() {
            return Ok(());
        }
        ctx.mark_compare(i, j).await?;
        ctx.step().await;
        let a = ctx.get(i).await?;
        let b = ctx.get(j).await?;
        if a <= b {
            buffer.push(a);
            i += 1;
        } else {
            buffer.push(b);
            j += 1;
        }
    }

    // Phase 2: drain-left.
    while i <= mid {
        if ctx.is_cancelled() {
            return Ok(());
        }
        ctx.mark_active(i).await?;
        buffer.push(ctx.get(i).await?);
        i += 1;
        ctx.step().await;
    }

    // Phase 3: drain-right.
    while j <= right {
        if ctx.is_cancelled() {
            return Ok(());
        }
        ctx.mark_comparing(j).await?;
        buffer.push(ctx.get(j).await?);
        j += 1;
        ctx.step().await;
    }

    // Copy-back. The buffer holds copies of the whole range, so once the
    // write-back begins it must finish: aborting between writes would
    // leave the range holding merged and unmerged copies of the same
    // elements. step() is already a no-op after cancellation, so a stop
    // still lands without further visible pacing.
    for (offset, value) in buffer.iter().enumerate() {
        ctx.mark_active(left + offset).await?;
        ctx.overwrite(left + offset, *value).await?;
        ctx.step().await;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use crate::algorithms::testutil::{context, is_permutation_of, values_of};

    #[tokio::test]
    async fn sorts_the_reference_input() {
        let (mut ctx, _emitter, array) = context(&[5, 3, 8, 1], 0);
        super::run(&mut ctx).await.unwrap();
        assert_eq!(values_of(&array).await, vec![1, 3, 5, 8]);
    }

    #[tokio::test]
    async fn sorts_odd_lengths_and_duplicates() {
        let (mut ctx, _emitter, array) = context(&[9, 2, 7, 2, 5, 9, 1], 0);
        super::run(&mut ctx).await.unwrap();
        assert_eq!(values_of(&array).await, vec![1, 2, 2, 5, 7, 9, 9]);
    }

    #[tokio::test]
    async fn two_elements_merge_cleanly() {
        let (mut ctx, _emitter, array) = context(&[2, 1], 0);
        super::run(&mut ctx).await.unwrap();
        assert_eq!(values_of(&array).await, vec![1, 2]);
    }

    #[tokio::test]
    async fn stop_mid_run_never_duplicates_elements() {
        // The dangerous window is the copy-back: a stop there must not
        // leave the range half-overwritten with buffered copies.
        let original: Vec<u32> = (1..=64).rev().collect();
        let (mut ctx, emitter, array) = context(&original, 2);
        let handle = tokio::spawn(async move { super::run(&mut ctx).await });
        tokio::time::sleep(Duration::from_millis(30)).await;
        emitter.request_stop();
        handle.await.unwrap().unwrap();

        let values = values_of(&array).await;
        assert!(is_permutation_of(&values, &original));
    }
}
