//! Step emission, pacing, and cancellation for the animation engine.
//!
//! A sorting algorithm runs as straight-line comparison logic against a
//! [`StepContext`]; after every unit of visible work it calls
//! [`StepContext::step`], which snapshots a frame for the renderer and
//! suspends for the step delay. The [`StepEmitter`] underneath is the
//! shared coordination primitive: a one-way cancellation flag and a
//! runtime-adjustable delay, shared between the algorithm task and
//! whatever front end issues the stop.
//!
//! # Architecture
//!
//! All control fields use [`std::sync::atomic`] types wrapped in [`Arc`]
//! so the front end can signal the algorithm task without locks on the
//! hot path. Suspension is interruptible: the pacing wait races the
//! delay timer against a [`Notify`] that [`StepEmitter::request_stop`]
//! fires, so a stop lands immediately rather than after the sleep.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use sortviz_types::Frame;
use tokio::sync::{Notify, RwLock};

use crate::array::{ArrayError, ArrayState};

/// Default per-step delay in milliseconds.
pub const DEFAULT_STEP_DELAY_MS: u64 = 10;

/// Observer of frames emitted during a sort run.
///
/// This is the renderer seam: a GUI repaints, a web front end pushes the
/// frame over a socket, a test collects it. The core produces frames and
/// expects nothing back.
pub trait FrameSink: Send + Sync {
    /// Called with the current frame after each visible step, and once
    /// more with a clean (highlight-free) frame when the run ends.
    fn on_frame(&mut self, frame: &Frame);
}

/// A frame sink that discards everything, for tests and headless runs.
pub struct NoOpSink;

impl FrameSink for NoOpSink {
    fn on_frame(&mut self, _frame: &Frame) {}
}

/// Cancellation flag and pacing clock for one sort run.
///
/// Created fresh per run and shared between the algorithm task and the
/// controller. The flag is monotonic: once set by
/// [`request_stop`](Self::request_stop) it never clears.
#[derive(Debug)]
pub struct StepEmitter {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Notification used to interrupt an in-flight pacing wait.
    cancel_notify: Notify,

    /// Current per-step delay in milliseconds (runtime-adjustable).
    step_delay_ms: AtomicU64,

    /// Number of frames emitted so far.
    steps_emitted: AtomicU64,
}

impl StepEmitter {
    /// Create an emitter with the given per-step delay.
    pub fn new(step_delay_ms: u64) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            cancel_notify: Notify::new(),
            step_delay_ms: AtomicU64::new(step_delay_ms),
            steps_emitted: AtomicU64::new(0),
        }
    }

    /// Request cancellation of the run.
    ///
    /// Idempotent and safe to call from any task at any time, including
    /// after natural completion (a no-op then). The permit semantics of
    /// [`Notify::notify_one`] mean a stop that lands before the pacing
    /// wait registers is still observed.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.cancel_notify.notify_one();
    }

    /// Check whether a stop has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Get the current per-step delay in milliseconds.
    pub fn step_delay_ms(&self) -> u64 {
        self.step_delay_ms.load(Ordering::Acquire)
    }

    /// Set the per-step delay in milliseconds, returning the previous
    /// value. A delay of 0 disables pacing (the step still yields to the
    /// scheduler so cancellation is observed).
    pub fn set_step_delay_ms(&self, ms: u64) -> u64 {
        self.step_delay_ms.swap(ms, Ordering::AcqRel)
    }

    /// Number of frames emitted so far.
    pub fn steps_emitted(&self) -> u64 {
        self.steps_emitted.load(Ordering::Acquire)
    }

    /// Suspend for the step delay or until cancellation, whichever
    /// arrives first. Returns immediately when already cancelled.
    pub async fn pace(&self) {
        if self.is_cancelled() {
            return;
        }
        let delay = self.step_delay_ms();
        if delay == 0 {
            // Still a scheduler yield so stop requests are observed
            // promptly even at full speed.
            tokio::task::yield_now().await;
            return;
        }
        tokio::select! {
            () = tokio::time::sleep(Duration::from_millis(delay)) => {}
            () = self.cancel_notify.notified() => {}
        }
    }

    fn record_step(&self) {
        self.steps_emitted.fetch_add(1, Ordering::AcqRel);
    }
}

/// The execution context a sorting algorithm runs inside.
///
/// Binds the shared array state, the run's emitter, and the frame sink.
/// Algorithms express themselves entirely through these operations; how
/// suspension and cancellation actually happen stays out of their code.
pub struct StepContext {
    array: Arc<RwLock<ArrayState>>,
    emitter: Arc<StepEmitter>,
    sink: Box<dyn FrameSink>,
}

impl StepContext {
    /// Create a context for one run.
    pub const fn new(
        array: Arc<RwLock<ArrayState>>,
        emitter: Arc<StepEmitter>,
        sink: Box<dyn FrameSink>,
    ) -> Self {
        Self {
            array,
            emitter,
            sink,
        }
    }

    /// Whether cancellation has been requested for this run.
    pub fn is_cancelled(&self) -> bool {
        self.emitter.is_cancelled()
    }

    /// Current array length.
    pub async fn len(&self) -> usize {
        self.array.read().await.len()
    }

    /// Read one element.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] on a bad index.
    pub async fn get(&self, index: usize) -> Result<u32, ArrayError> {
        self.array.read().await.get(index)
    }

    /// Compare two elements, setting both as highlights.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] on a bad index.
    pub async fn compare(&self, i: usize, j: usize) -> Result<std::cmp::Ordering, ArrayError> {
        self.array.write().await.compare(i, j)
    }

    /// Exchange two elements, setting both as highlights.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] on a bad index.
    pub async fn swap(&self, i: usize, j: usize) -> Result<(), ArrayError> {
        self.array.write().await.swap(i, j)
    }

    /// Overwrite one element without touching highlights.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] on a bad index.
    pub async fn overwrite(&self, index: usize, value: u32) -> Result<(), ArrayError> {
        self.array.write().await.overwrite(index, value)
    }

    /// Set both highlights.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] on a bad index.
    pub async fn mark_compare(&self, i: usize, j: usize) -> Result<(), ArrayError> {
        self.array.write().await.mark_compare(i, j)
    }

    /// Set the active highlight only.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] on a bad index.
    pub async fn mark_active(&self, index: usize) -> Result<(), ArrayError> {
        self.array.write().await.mark_active(index)
    }

    /// Set the comparing highlight only.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] on a bad index.
    pub async fn mark_comparing(&self, index: usize) -> Result<(), ArrayError> {
        self.array.write().await.mark_comparing(index)
    }

    /// Emit the current frame to the sink and suspend for the step delay.
    ///
    /// Becomes a no-op that returns immediately once cancellation has
    /// been requested; the algorithm also checks cancellation at loop
    /// boundaries to terminate promptly.
    pub async fn step(&mut self) {
        if self.emitter.is_cancelled() {
            return;
        }
        let frame = self.array.read().await.frame();
        self.sink.on_frame(&frame);
        self.emitter.record_step();
        self.emitter.pace().await;
    }

    /// Clear highlights and emit one final clean frame, regardless of
    /// cancellation. Called once when the run reaches a terminal status.
    pub async fn emit_clean_frame(&mut self) {
        let frame = {
            let mut array = self.array.write().await;
            array.clear_highlights();
            array.frame()
        };
        self.sink.on_frame(&frame);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Instant;

    /// A frame sink that records every frame it receives.
    pub(crate) struct CollectSink {
        frames: Arc<Mutex<Vec<Frame>>>,
    }

    impl CollectSink {
        pub(crate) fn new() -> (Self, Arc<Mutex<Vec<Frame>>>) {
            let frames = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    frames: Arc::clone(&frames),
                },
                frames,
            )
        }
    }

    impl FrameSink for CollectSink {
        fn on_frame(&mut self, frame: &Frame) {
            if let Ok(mut frames) = self.frames.lock() {
                frames.push(frame.clone());
            }
        }
    }

    fn context(values: &[u32], delay_ms: u64) -> (StepContext, Arc<StepEmitter>) {
        let array = ArrayState::from_values(values.to_vec()).unwrap();
        let emitter = Arc::new(StepEmitter::new(delay_ms));
        let ctx = StepContext::new(
            Arc::new(RwLock::new(array)),
            Arc::clone(&emitter),
            Box::new(NoOpSink),
        );
        (ctx, emitter)
    }

    #[test]
    fn stop_is_one_way_and_idempotent() {
        let emitter = StepEmitter::new(10);
        assert!(!emitter.is_cancelled());
        emitter.request_stop();
        assert!(emitter.is_cancelled());
        emitter.request_stop();
        assert!(emitter.is_cancelled());
    }

    #[test]
    fn delay_is_adjustable() {
        let emitter = StepEmitter::new(10);
        assert_eq!(emitter.step_delay_ms(), 10);
        let prev = emitter.set_step_delay_ms(25);
        assert_eq!(prev, 10);
        assert_eq!(emitter.step_delay_ms(), 25);
    }

    #[tokio::test]
    async fn pace_returns_immediately_when_cancelled() {
        let emitter = StepEmitter::new(5_000);
        emitter.request_stop();
        let before = Instant::now();
        emitter.pace().await;
        assert!(before.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn stop_interrupts_an_in_flight_pace() {
        let emitter = Arc::new(StepEmitter::new(30_000));
        let waiter = Arc::clone(&emitter);
        let handle = tokio::spawn(async move {
            let before = Instant::now();
            waiter.pace().await;
            before.elapsed()
        });
        // Give the pace a moment to register, then stop.
        tokio::time::sleep(Duration::from_millis(50)).await;
        emitter.request_stop();
        let waited = handle.await.unwrap();
        assert!(waited < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn step_emits_frames_and_counts() {
        let array = ArrayState::from_values(vec![3, 1, 2]).unwrap();
        let emitter = Arc::new(StepEmitter::new(0));
        let (sink, frames) = CollectSink::new();
        let mut ctx = StepContext::new(
            Arc::new(RwLock::new(array)),
            Arc::clone(&emitter),
            Box::new(sink),
        );

        ctx.compare(0, 1).await.unwrap();
        ctx.step().await;
        ctx.swap(0, 1).await.unwrap();
        ctx.step().await;

        assert_eq!(emitter.steps_emitted(), 2);
        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames.first().unwrap().values, vec![3, 1, 2]);
        assert_eq!(frames.get(1).unwrap().values, vec![1, 3, 2]);
    }

    #[tokio::test]
    async fn step_is_a_no_op_after_cancellation() {
        let array = ArrayState::from_values(vec![3, 1, 2]).unwrap();
        let emitter = Arc::new(StepEmitter::new(0));
        let (sink, frames) = CollectSink::new();
        let mut ctx = StepContext::new(
            Arc::new(RwLock::new(array)),
            Arc::clone(&emitter),
            Box::new(sink),
        );

        emitter.request_stop();
        ctx.step().await;
        ctx.step().await;

        assert_eq!(emitter.steps_emitted(), 0);
        assert!(frames.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn clean_frame_clears_highlights_even_when_cancelled() {
        let (mut ctx, emitter) = context(&[3, 1, 2], 0);
        ctx.mark_compare(0, 2).await.unwrap();
        emitter.request_stop();
        ctx.emit_clean_frame().await;

        let frame = ctx.array.read().await.frame();
        assert_eq!(frame.active, None);
        assert_eq!(frame.comparing, None);
    }
}
