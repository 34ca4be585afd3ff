//! Selection sort: find-minimum scan with one swap per outer pass.
//!
//! Each probe of the scan is a visible comparison step (probe against
//! the current minimum); the single swap per pass is its own step.

use std::cmp::Ordering;

use crate::algorithms::SortError;
use crate::emitter::StepContext;

/// Sort the array with selection sort.
///
/// # Errors
///
/// Returns [`SortError`] on an array access fault.
// Index arithmetic stays inside 0..len: the outer index stops at
// len - 2 and the scan starts at pass + 1 <= len - 1.
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
        let mut min_at = pass;
        for probe in pass + 1..len {
            if ctx.is_cancelled() {
                return Ok(());
            }
            if ctx.compare(probe, min_at).await? == Ordering::Less {
                min_at = probe;
            }
            ctx.step().await;
        }
        if min_at != pass {
            ctx.swap(pass, min_at).await?;
            ctx.step().await;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::algorithms::testutil::{context, values_of};

    #[tokio::test]
    async fn sorts_to_completion() {
        let (mut ctx, _emitter, array) = context(&[64, 25, 12, 22, 11], 0);
        super::run(&mut ctx).await.unwrap();
        assert_eq!(values_of(&array).await, vec![11, 12, 22, 25, 64]);
    }

    #[tokio::test]
    async fn handles_duplicates() {
        let (mut ctx, _emitter, array) = context(&[3, 1, 3, 1, 2], 0);
        super::run(&mut ctx).await.unwrap();
        assert_eq!(values_of(&array).await, vec![1, 1, 2, 3, 3]);
    }

    #[tokio::test]
    async fn one_swap_per_pass_on_reversed_input() {
        // Reversed [3,2,1] needs exactly one swap (3<->1); the middle
        // element is already in place, so pass 2 swaps nothing. Steps:
        // pass 1 scans 2 + swaps 1, pass 2 scans 1.
        let (mut ctx, emitter, array) = context(&[3, 2, 1], 0);
        super::run(&mut ctx).await.unwrap();
        assert_eq!(values_of(&array).await, vec![1, 2, 3]);
        assert_eq!(emitter.steps_emitted(), 4);
    }
}
