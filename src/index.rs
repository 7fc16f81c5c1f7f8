use std::ops::Range;
use std::sync::Arc;

use bitvec::prelude::*;

use crate::error::{Error, Result};

/// Largest number of rows a table can hold; positions are stored as `u32`.
pub const MAX_ROWS: usize = u32::MAX as usize;

/// An ordered sequence of row positions into column storage.
///
/// An index never owns column data, it only says which rows a table view
/// visits and in what order. Positions may repeat or be omitted. The
/// positions live in a shared buffer so that slicing and cloning are O(1);
/// [`Index::copy`] is the only way to obtain a buffer that can be reordered.
#[derive(Debug, Clone)]
pub struct Index {
    positions: Arc<[u32]>,
    range: Range<usize>,
}

impl Index {
    /// Creates the identity index `0..n`. `n` must not exceed [MAX_ROWS].
    pub fn ascending(n: usize) -> Self {
        debug_assert!(n <= MAX_ROWS);
        (0..n).map(|pos| pos as u32).collect::<Vec<_>>().into()
    }

    /// Keeps the positions whose mask bit is set, preserving their relative order.
    ///
    /// The mask is aligned with this index: bit `i` decides position `i`.
    pub fn from_mask(&self, mask: &BitSlice) -> Self {
        debug_assert_eq!(mask.len(), self.len());
        let positions = self.as_slice();
        mask.iter_ones().map(|i| positions[i]).collect::<Vec<_>>().into()
    }

    /// Returns the sub-index `start..end`, sharing the underlying buffer.
    ///
    /// # Errors
    /// Returns [Error::Range] if `start > end` or `end > len`.
    pub fn slice(&self, start: usize, end: usize) -> Result<Self> {
        if start > end || end > self.len() {
            return Err(Error::Range {
                start,
                end,
                len: self.len(),
            });
        }
        Ok(Self {
            positions: Arc::clone(&self.positions),
            range: self.range.start + start..self.range.start + end,
        })
    }

    /// Deep duplicate of the visited positions, free to be reordered in place.
    pub fn copy(&self) -> Vec<u32> {
        self.as_slice().to_vec()
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Row position visited at `i`, if `i` is in bounds.
    pub fn get(&self, i: usize) -> Option<usize> {
        self.as_slice().get(i).map(|&pos| pos as usize)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.positions[self.range.clone()]
    }

    /// Iterates over the visited row positions in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.as_slice().iter().map(|&pos| pos as usize)
    }
}

impl From<Vec<u32>> for Index {
    fn from(positions: Vec<u32>) -> Self {
        let len = positions.len();
        Self {
            positions: positions.into(),
            range: 0..len,
        }
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
