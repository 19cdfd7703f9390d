//! Breakpoint tables and resolution.
//!
//! A [`BreakpointTable`] maps width thresholds (pixels, unique, `u32`) to
//! values of any type. [`resolve`] picks the value for a given viewport width
//! by ordered threshold comparison:
//!
//! - thresholds are walked in ascending numeric order,
//! - a threshold activates once the width *exceeds* it (strict `<`, the
//!   boundary itself does not activate),
//! - with no activated threshold the smallest threshold's value applies,
//! - an empty table always yields the caller-supplied default.
//!
//! Thresholds are numeric by type, so the lexical-sort ambiguity of
//! string-keyed tables cannot arise. Duplicate thresholds are rejected at
//! construction time.

use std::collections::BTreeMap;

use crate::error::LayoutError;

// =============================================================================
// Breakpoint Table
// =============================================================================

/// Width-keyed table of breakpoint values.
///
/// Backed by a `BTreeMap` so ascending-threshold iteration is structural
/// rather than a sort performed at resolution time.
///
/// # Example
///
/// ```
/// use masonry_responsive::breakpoints::{resolve, BreakpointTable};
///
/// let columns = BreakpointTable::from_pairs([(350, 1u32), (750, 2), (900, 3)])?;
/// assert_eq!(resolve(&columns, 1, 800), 2);
/// # Ok::<(), masonry_responsive::LayoutError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointTable<T> {
    entries: BTreeMap<u32, T>,
}

impl<T> BreakpointTable<T> {
    /// Create an empty table. Resolution against it always yields the default.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a table from `(threshold, value)` pairs.
    ///
    /// Fails with [`LayoutError::DuplicateThreshold`] if the same threshold
    /// appears twice.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = (u32, T)>,
    {
        let mut entries = BTreeMap::new();
        for (threshold, value) in pairs {
            if entries.insert(threshold, value).is_some() {
                return Err(LayoutError::DuplicateThreshold { threshold });
            }
        }
        Ok(Self { entries })
    }

    /// Insert or replace the value at a threshold.
    ///
    /// Returns the previous value when the threshold was already present.
    pub fn insert(&mut self, threshold: u32, value: T) -> Option<T> {
        self.entries.insert(threshold, value)
    }

    /// Value stored at an exact threshold.
    pub fn get(&self, threshold: u32) -> Option<&T> {
        self.entries.get(&threshold)
    }

    /// Number of thresholds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no thresholds.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Thresholds in ascending order.
    pub fn thresholds(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }
}

impl<T> Default for BreakpointTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve the active value for `width`.
///
/// Pure function of `(table, default_value, width)`: no state, no memory of
/// prior calls. Returns the value at the largest threshold strictly less than
/// `width`; the value at the smallest threshold when none is; `default_value`
/// when the table is empty.
pub fn resolve<T: Clone>(table: &BreakpointTable<T>, default_value: T, width: u32) -> T {
    let mut value = match table.entries.values().next() {
        Some(seed) => seed.clone(),
        None => return default_value,
    };

    for (threshold, candidate) in &table.entries {
        if *threshold < width {
            value = candidate.clone();
        } else {
            // Ascending order: nothing further can activate.
            break;
        }
    }

    value
}

// =============================================================================
// Tests
// =============================================================================
