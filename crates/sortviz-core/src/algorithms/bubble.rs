//! Bubble sort: adjacent compare-and-swap passes.
//!
//! Runs the full `n - 1` passes without the early-exit optimization so
//! the animation shows the classic O(n^2) sweep shrinking from the right.

use std::cmp::Ordering;

use crate::algorithms::SortError;
use crate::emitter::StepContext;

/// Sort the array with bubble sort, one visible step per comparison.
///
/// # Errors
///
/// Returns [`SortError`] on an array access fault.
// Index arithmetic stays inside 0..len by the loop bounds: the inner
// index never exceeds len - 2, so j + 1 is always in range.
#[allow(clippy::arithmetic_side_effects)]
pub async fn run(ctx: &mut StepContext) -> Result<(), SortError> {
    let len = ctx.len().await;
    if len < 2 {
        return Ok(());
    }
    for pass in 0..len - 1 {
        if ctx.is_cancelled() {
            return Ok(());
        }
        for j in 0..len - 1 - pass {
            if ctx.is_cancelled() {
                return Ok(());
            }
            if ctx.compare(j, j + 1).await? == Ordering::Greater {
                ctx.swap(j, j + 1).await?;
            }
            ctx.step().await;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use crate::algorithms::testutil::{context, is_permutation_of, values_of};

    #[tokio::test]
    async fn sorts_to_completion() {
        let (mut ctx, _emitter, array) = context(&[5, 1, 4, 2, 8], 0);
        super::run(&mut ctx).await.unwrap();
        assert_eq!(values_of(&array).await, vec![1, 2, 4, 5, 8]);
    }

    #[tokio::test]
    async fn already_sorted_input_is_untouched() {
        let (mut ctx, _emitter, array) = context(&[1, 2, 3, 4], 0);
        super::run(&mut ctx).await.unwrap();
        assert_eq!(values_of(&array).await, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn single_element_is_a_no_op() {
        let (mut ctx, emitter, array) = context(&[7], 0);
        super::run(&mut ctx).await.unwrap();
        assert_eq!(values_of(&array).await, vec![7]);
        assert_eq!(emitter.steps_emitted(), 0);
    }

    #[tokio::test]
    async fn stop_mid_run_leaves_a_permutation() {
        let original: Vec<u32> = (1..=40).rev().collect();
        let (mut ctx, emitter, array) = context(&original, 5);
        let handle = tokio::spawn(async move {
            super::run(&mut ctx).await
        });
        tokio::time::sleep(Duration::from_millis(40)).await;
        emitter.request_stop();
        handle.await.unwrap().unwrap();

        let values = values_of(&array).await;
        assert!(is_permutation_of(&values, &original));
    }
}
