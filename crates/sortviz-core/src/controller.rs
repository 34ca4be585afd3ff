//! Run lifecycle orchestration: generate, start, stop, observe.
//!
//! [`SortController`] owns the shared array state and the record of the
//! current run. Exactly one algorithm task is alive at a time; `start`
//! while one is running is rejected, not queued. The controller and any
//! renderer only read the array; the spawned algorithm task is the sole
//! writer for the duration of its run.
//!
//! # Lock order
//!
//! `generate_array` is the only operation that holds the run-state lock
//! and the array lock at the same time. The algorithm task takes them
//! one at a time (array during steps, run state only for its terminal
//! transition, after its last array write), so no ordering cycle exists.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sortviz_types::{Algorithm, Frame, RunId, RunStatus, RunSummary};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::algorithms;
use crate::array::{ArrayError, ArrayState};
use crate::config::{ArrayConfig, VisualizerConfig};
use crate::emitter::{FrameSink, StepContext, StepEmitter};

/// Errors that can occur during controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// A run is active; start and generate are rejected, not queued.
    #[error("a sort run is already in progress")]
    RunInProgress,

    /// An array operation failed.
    #[error("array error: {source}")]
    Array {
        /// The underlying array error.
        #[from]
        source: ArrayError,
    },

    /// The algorithm task could not be joined.
    #[error("sort task failed to join: {source}")]
    Join {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },
}

/// Mutable record of the current (or most recent) run.
struct RunState {
    status: RunStatus,
    run_id: Option<RunId>,
    algorithm: Option<Algorithm>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    emitter: Option<Arc<StepEmitter>>,
    handle: Option<JoinHandle<RunSummary>>,
    rng: StdRng,
}

/// Orchestrates sort runs over one shared array.
///
/// Cheap to share behind an [`Arc`]; all methods take `&self`.
pub struct SortController {
    array: Arc<RwLock<ArrayState>>,
    state: Arc<Mutex<RunState>>,
    array_config: ArrayConfig,
    step_delay_ms: AtomicU64,
}

impl SortController {
    /// Create a controller with a freshly generated array.
    ///
    /// The RNG is seeded from `config.array.seed` when present (making
    /// array generation reproducible across restarts) and from the OS
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Array`] if the configured size or
    /// value range is invalid.
    pub fn new(config: &VisualizerConfig) -> Result<Self, ControllerError> {
        let mut rng = match config.array.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let array = ArrayState::generate(
            config.array.size,
            config.array.min_value,
            config.array.max_value,
            &mut rng,
        )?;
        Ok(Self {
            array: Arc::new(RwLock::new(array)),
            state: Arc::new(Mutex::new(RunState {
                status: RunStatus::Idle,
                run_id: None,
                algorithm: None,
                started_at: None,
                finished_at: None,
                emitter: None,
                handle: None,
                rng,
            })),
            array_config: config.array.clone(),
            step_delay_ms: AtomicU64::new(config.pacing.step_delay_ms),
        })
    }

    /// Replace the array with freshly generated values and reset the run
    /// machine to [`RunStatus::Idle`] with elapsed time zero.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::RunInProgress`] while a run is active,
    /// or [`ControllerError::Array`] if `size` is zero.
    pub async fn generate_array(&self, size: usize) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        if state.status == RunStatus::Running {
            return Err(ControllerError::RunInProgress);
        }
        {
            let mut array = self.array.write().await;
            array.regenerate(
                size,
                self.array_config.min_value,
                self.array_config.max_value,
                &mut state.rng,
            )?;
        }
        state.status = RunStatus::Idle;
        state.run_id = None;
        state.algorithm = None;
        state.started_at = None;
        state.finished_at = None;
        state.emitter = None;
        state.handle = None;
        info!(size, "array regenerated");
        Ok(())
    }

    /// Start the chosen algorithm on an independent task.
    ///
    /// Frames flow to `sink` as the run progresses. Returns the new
    /// run's ID without blocking on the sort itself.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::RunInProgress`] while a run is active;
    /// the in-progress run is not disturbed.
    pub async fn start(
        &self,
        algorithm: Algorithm,
        sink: Box<dyn FrameSink>,
    ) -> Result<RunId, ControllerError> {
        let mut state = self.state.lock().await;
        if state.status == RunStatus::Running {
            return Err(ControllerError::RunInProgress);
        }

        let run_id = RunId::new();
        let emitter = Arc::new(StepEmitter::new(self.step_delay_ms.load(Ordering::Acquire)));
        let started_at = Utc::now();

        state.status = RunStatus::Running;
        state.run_id = Some(run_id);
        state.algorithm = Some(algorithm);
        state.started_at = Some(started_at);
        state.finished_at = None;
        state.emitter = Some(Arc::clone(&emitter));

        let task_array = Arc::clone(&self.array);
        let task_state = Arc::clone(&self.state);
        let task_emitter = Arc::clone(&emitter);
        state.handle = Some(tokio::spawn(async move {
            execute_run(
                task_array,
                task_emitter,
                task_state,
                sink,
                run_id,
                algorithm,
                started_at,
            )
            .await
        }));

        info!(%run_id, %algorithm, "sort run started");
        Ok(run_id)
    }

    /// Request cancellation of the active run and wait for the algorithm
    /// task to acknowledge it and return.
    ///
    /// Once this returns, no further visible mutation occurs. A stop
    /// while no run is active (including after natural completion) is a
    /// no-op returning `None`; calling twice is safe.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Join`] if the task cannot be joined.
    pub async fn stop(&self) -> Result<Option<RunSummary>, ControllerError> {
        let handle = {
            let mut state = self.state.lock().await;
            if state.status != RunStatus::Running {
                debug!(status = ?state.status, "stop requested while not running (no-op)");
                return Ok(None);
            }
            if let Some(emitter) = state.emitter.as_ref() {
                emitter.request_stop();
            }
            state.handle.take()
        };
        match handle {
            Some(handle) => Ok(Some(handle.await?)),
            // Another caller holds the join handle via wait(); the stop
            // signal is delivered and that caller observes the end.
            None => Ok(None),
        }
    }

    /// Wait for the active run to reach a terminal status.
    ///
    /// Returns the run's summary, or `None` if no joinable run exists
    /// (never started, or already claimed by `stop`/another waiter).
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Join`] if the task cannot be joined.
    pub async fn wait(&self) -> Result<Option<RunSummary>, ControllerError> {
        let handle = self.state.lock().await.handle.take();
        match handle {
            Some(handle) => Ok(Some(handle.await?)),
            None => Ok(None),
        }
    }

    /// Current run status.
    pub async fn status(&self) -> RunStatus {
        self.state.lock().await.status
    }

    /// ID of the current (or most recent) run, if any.
    pub async fn run_id(&self) -> Option<RunId> {
        self.state.lock().await.run_id
    }

    /// Algorithm of the current (or most recent) run, if any.
    pub async fn algorithm(&self) -> Option<Algorithm> {
        self.state.lock().await.algorithm
    }

    /// Elapsed wall-clock time of the current run.
    ///
    /// Grows monotonically while running, stays frozen at the value it
    /// had when the run reached a terminal status, and is zero while
    /// idle.
    pub async fn elapsed(&self) -> Duration {
        let state = self.state.lock().await;
        match (state.started_at, state.finished_at) {
            (Some(start), None) => Utc::now()
                .signed_duration_since(start)
                .to_std()
                .unwrap_or_default(),
            (Some(start), Some(end)) => end
                .signed_duration_since(start)
                .to_std()
                .unwrap_or_default(),
            _ => Duration::ZERO,
        }
    }

    /// Snapshot the current array as a renderer-facing [`Frame`].
    ///
    /// Safe to call from any task at any time; the running algorithm
    /// only blocks for the duration of the clone.
    pub async fn snapshot(&self) -> Frame {
        self.array.read().await.frame()
    }

    /// Adjust the per-step delay, applying it to the active run (if any)
    /// and to all future runs.
    pub async fn set_step_delay_ms(&self, ms: u64) {
        self.step_delay_ms.store(ms, Ordering::Release);
        if let Some(emitter) = self.state.lock().await.emitter.as_ref() {
            let prev = emitter.set_step_delay_ms(ms);
            debug!(prev, ms, "step delay adjusted mid-run");
        }
    }
}

/// Body of the spawned algorithm task.
///
/// Runs the variant, emits the final clean frame, then performs the
/// terminal transition. The terminal transition happens after the last
/// array write, so observers that see a terminal status see a settled
/// array.
async fn execute_run(
    array: Arc<RwLock<ArrayState>>,
    emitter: Arc<StepEmitter>,
    state: Arc<Mutex<RunState>>,
    sink: Box<dyn FrameSink>,
    run_id: RunId,
    algorithm: Algorithm,
    started_at: DateTime<Utc>,
) -> RunSummary {
    let mut ctx = StepContext::new(array, Arc::clone(&emitter), sink);
    let result = algorithms::run(algorithm, &mut ctx).await;
    ctx.emit_clean_frame().await;

    let status = match result {
        Ok(()) if !emitter.is_cancelled() => RunStatus::Completed,
        Ok(()) => RunStatus::Stopped,
        Err(ref error) => {
            // An array fault means a bug in the variant; contain it by
            // landing the run in Stopped rather than unwinding.
            error!(%run_id, %algorithm, %error, "algorithm task faulted");
            RunStatus::Stopped
        }
    };

    let finished_at = Utc::now();
    {
        let mut guard = state.lock().await;
        guard.status = status;
        guard.finished_at = Some(finished_at);
    }

    let elapsed = finished_at.signed_duration_since(started_at);
    let elapsed_ms = u64::try_from(elapsed.num_milliseconds().max(0)).unwrap_or(u64::MAX);
    let summary = RunSummary {
        run_id,
        algorithm,
        status,
        steps: emitter.steps_emitted(),
        elapsed_ms,
        started_at,
    };
    info!(
        %run_id,
        %algorithm,
        status = ?status,
        steps = summary.steps,
        elapsed_ms,
        "sort run finished"
    );
    summary
}
