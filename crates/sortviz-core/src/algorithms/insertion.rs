//! Insertion sort: shift-based insertion into the sorted prefix.
//!
//! Each shift of an element one slot to the right is a visible mutation
//! step, and placing the held key is one more.

use crate::algorithms::SortError;
use crate::emitter::StepContext;

/// Sort the array with insertion sort.
///
/// # Errors
///
/// Returns [`SortError`] on an array access fault.
// Index arithmetic stays inside 0..len: the shift cursor only moves
// left while strictly positive, so cursor - 1 never underflows.
#[allow(clippy::arithmetic_side_effects)]
pub async fn run(ctx: &mut StepContext) -> Result<(), SortError> {
    let len = ctx.len().await;
    for i in 1..len {
        if ctx.is_cancelled() {
            return Ok(());
        }
        let key = ctx.get(i).await?;
        let mut cursor = i;
        while cursor > 0 && !ctx.is_cancelled() {
            let above = ctx.get(cursor - 1).await?;
            if above <= key {
                break;
            }
            ctx.mark_compare(cursor - 1, cursor).await?;
            ctx.overwrite(cursor, above).await?;
            ctx.step().await;
            cursor -= 1;
        }
        // The key is held outside the array while its slot is shifted
        // over; it is re-inserted even when a stop lands mid-shift, so
        // the array stays a permutation of its input.
        ctx.overwrite(cursor, key).await?;
        ctx.mark_active(cursor).await?;
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
    async fn sorts_to_completion() {
        let (mut ctx, _emitter, array) = context(&[12, 11, 13, 5, 6], 0);
        super::run(&mut ctx).await.unwrap();
        assert_eq!(values_of(&array).await, vec![5, 6, 11, 12, 13]);
    }

    #[tokio::test]
    async fn handles_duplicates() {
        let (mut ctx, _emitter, array) = context(&[4, 2, 4, 1, 2], 0);
        super::run(&mut ctx).await.unwrap();
        assert_eq!(values_of(&array).await, vec![1, 2, 2, 4, 4]);
    }

    #[tokio::test]
    async fn stop_mid_shift_preserves_the_held_key() {
        let original: Vec<u32> = (1..=40).rev().collect();
        let (mut ctx, emitter, array) = context(&original, 5);
        let handle = tokio::spawn(async move { super::run(&mut ctx).await });
        tokio::time::sleep(Duration::from_millis(40)).await;
        emitter.request_stop();
        handle.await.unwrap().unwrap();

        let values = values_of(&array).await;
        assert!(is_permutation_of(&values, &original));
    }
}
