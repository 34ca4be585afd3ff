//! Array state and mutation primitives for the animation engine.
//!
//! [`ArrayState`] is the single source of truth for the values being
//! sorted and the two highlight indices a renderer may color distinctly.
//! All changes to values and highlights go through the checked mutation
//! primitives here; nothing else in the workspace touches the backing
//! vector directly.
//!
//! # Design Principles
//!
//! - All element access is bounds-checked and returns typed errors
//!   (no indexing, no panics).
//! - Highlight indices, when present, always lie in `0..len`. The
//!   mutation primitives uphold this; readers never need to re-check.
//! - Exactly one execution context mutates the state during a run;
//!   readers take snapshots via [`ArrayState::frame`].

use std::cmp::Ordering;

use rand::Rng;
use sortviz_types::Frame;

/// Errors that can occur during array state operations.
#[derive(Debug, thiserror::Error)]
pub enum ArrayError {
    /// Requested array size is zero.
    #[error("array size must be at least 1 (got {size})")]
    InvalidSize {
        /// The rejected size.
        size: usize,
    },

    /// Generation range is inverted.
    #[error("invalid value range: min {min} exceeds max {max}")]
    InvalidRange {
        /// Lower bound of the rejected range.
        min: u32,
        /// Upper bound of the rejected range.
        max: u32,
    },

    /// An index fell outside the array. This signals a programming fault
    /// in an algorithm implementation, not a recoverable condition.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The array length at the time of the access.
        len: usize,
    },
}

/// The mutable integer array under animation plus its highlight cursors.
///
/// `active` is the position the algorithm is currently working at and
/// `comparing` is the position it is comparing against; a renderer
/// typically paints them red and yellow respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayState {
    /// The values being sorted.
    values: Vec<u32>,

    /// Highlight: position the algorithm is working at.
    active: Option<usize>,

    /// Highlight: position the algorithm is comparing against.
    comparing: Option<usize>,
}

impl ArrayState {
    /// Create an array state with freshly generated random values.
    ///
    /// Values are drawn uniformly from `min..=max`. Highlights start
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidSize`] if `size` is zero, or
    /// [`ArrayError::InvalidRange`] if `min > max`.
    pub fn generate<R: Rng>(
        size: usize,
        min: u32,
        max: u32,
        rng: &mut R,
    ) -> Result<Self, ArrayError> {
        if size == 0 {
            return Err(ArrayError::InvalidSize { size });
        }
        if min > max {
            return Err(ArrayError::InvalidRange { min, max });
        }
        let values = (0..size).map(|_| rng.random_range(min..=max)).collect();
        Ok(Self {
            values,
            active: None,
            comparing: None,
        })
    }

    /// Create an array state from explicit values (useful for testing
    /// and deterministic demos).
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidSize`] if `values` is empty.
    pub fn from_values(values: Vec<u32>) -> Result<Self, ArrayError> {
        if values.is_empty() {
            return Err(ArrayError::InvalidSize { size: 0 });
        }
        Ok(Self {
            values,
            active: None,
            comparing: None,
        })
    }

    /// Regenerate the values in place, clearing highlights.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidSize`] or [`ArrayError::InvalidRange`]
    /// on invalid parameters; the existing state is untouched on error.
    pub fn regenerate<R: Rng>(
        &mut self,
        size: usize,
        min: u32,
        max: u32,
        rng: &mut R,
    ) -> Result<(), ArrayError> {
        let fresh = Self::generate(size, min, max, rng)?;
        *self = fresh;
        Ok(())
    }

    /// Number of elements in the array.
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array is empty. Never true for a generated state.
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The full value slice, for read-only observers.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Current active highlight, if any.
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// Current comparing highlight, if any.
    pub const fn comparing(&self) -> Option<usize> {
        self.comparing
    }

    /// Read one element.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<u32, ArrayError> {
        self.values
            .get(index)
            .copied()
            .ok_or(ArrayError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    /// Exchange two elements and set both positions as highlights.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] if either index is out of
    /// bounds; the state is untouched on error.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), ArrayError> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.values.swap(i, j);
        self.active = Some(i);
        self.comparing = Some(j);
        Ok(())
    }

    /// Compare two elements, setting both positions as highlights.
    ///
    /// No mutation of values occurs; this exists so a renderer can show
    /// a comparison that did not lead to a swap.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] if either index is out of
    /// bounds.
    pub fn compare(&mut self, i: usize, j: usize) -> Result<Ordering, ArrayError> {
        let a = self.get(i)?;
        let b = self.get(j)?;
        self.active = Some(i);
        self.comparing = Some(j);
        Ok(a.cmp(&b))
    }

    /// Overwrite one element with a new value.
    ///
    /// Highlights are not changed; callers mark the write-back position
    /// explicitly when it should be visible. Merge's copy-back phase uses
    /// this per element so each write is its own visible step.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] if `index >= len`.
    pub fn overwrite(&mut self, index: usize, value: u32) -> Result<(), ArrayError> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(ArrayError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Set both highlight positions.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] if either index is out of
    /// bounds.
    pub fn mark_compare(&mut self, i: usize, j: usize) -> Result<(), ArrayError> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.active = Some(i);
        self.comparing = Some(j);
        Ok(())
    }

    /// Set the active highlight only, leaving the comparing highlight.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] if the index is out of
    /// bounds.
    pub fn mark_active(&mut self, index: usize) -> Result<(), ArrayError> {
        self.check_index(index)?;
        self.active = Some(index);
        Ok(())
    }

    /// Set the comparing highlight only, leaving the active highlight.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfRange`] if the index is out of
    /// bounds.
    pub fn mark_comparing(&mut self, index: usize) -> Result<(), ArrayError> {
        self.check_index(index)?;
        self.comparing = Some(index);
        Ok(())
    }

    /// Clear both highlights. Called on entering a terminal run status
    /// so the renderer shows a clean final frame.
    pub const fn clear_highlights(&mut self) {
        self.active = None;
        self.comparing = None;
    }

    /// Snapshot the current state as a renderer-facing [`Frame`].
    pub fn frame(&self) -> Frame {
        Frame {
            values: self.values.clone(),
            active: self.active,
            comparing: self.comparing,
        }
    }

    const fn check_index(&self, index: usize) -> Result<(), ArrayError> {
        if index < self.values.len() {
            Ok(())
        } else {
            Err(ArrayError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
        }
    }
}
