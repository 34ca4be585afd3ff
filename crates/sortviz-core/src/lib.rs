//! Animation engine for classic in-memory sorting algorithms.
//!
//! This crate owns everything between "a sequential sorting algorithm"
//! and "a renderer painting bars": the mutable array with its highlight
//! cursors, the pacing/cancellation machinery that turns nested loops
//! into a replayable sequence of frames, the five algorithm variants,
//! and the run controller.
//!
//! # Modules
//!
//! - [`array`] -- [`ArrayState`](array::ArrayState): values, highlights,
//!   and checked mutation primitives.
//! - [`emitter`] -- [`StepEmitter`](emitter::StepEmitter) pacing and
//!   cancellation, the [`FrameSink`](emitter::FrameSink) renderer seam,
//!   and the [`StepContext`](emitter::StepContext) algorithms run inside.
//! - [`algorithms`] -- Bubble, selection, insertion, merge, and quick
//!   variants behind one execution contract.
//! - [`controller`] -- [`SortController`](controller::SortController)
//!   run lifecycle: generate, start, stop, elapsed, snapshot.
//! - [`config`] -- Configuration loading from `sortviz-config.yaml`.

pub mod algorithms;
pub mod array;
pub mod config;
pub mod controller;
pub mod emitter;
