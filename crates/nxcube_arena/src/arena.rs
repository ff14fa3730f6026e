//! Append-only storage indexed by a handle type.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut, Range};

use itertools::Itertools;

use crate::{Handle, HandleOutOfRange, HandleOverflow};

/// Append-only vector indexed by a [`Handle`].
///
/// Elements are never removed, so a handle returned by [`Arena::push()`] stays
/// valid for the lifetime of the arena.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Arena<H, T> {
    values: Vec<T>,
    _phantom: PhantomData<H>,
}

impl<H, T: fmt::Debug> fmt::Debug for Arena<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contents = self.values.iter().map(|v| format!("{v:?}")).join(", ");
        write!(f, "[{contents}]")
    }
}

impl<H, T> Default for Arena<H, T> {
    fn default() -> Self {
        Self {
            values: vec![],
            _phantom: PhantomData,
        }
    }
}

impl<H: Handle, T> Index<H> for Arena<H, T> {
    type Output = T;

    fn index(&self, handle: H) -> &Self::Output {
        &self.values[handle.to_index()]
    }
}

impl<H: Handle, T> IndexMut<H> for Arena<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        &mut self.values[handle.to_index()]
    }
}

impl<H: Handle, T> Arena<H, T> {
    /// Constructs a new empty arena.
    pub const fn new() -> Self {
        Self {
            values: vec![],
            _phantom: PhantomData,
        }
    }

    /// Adds an element and returns its handle.
    pub fn push(&mut self, value: T) -> Result<H, HandleOverflow> {
        let handle = H::try_from_index(self.values.len())?;
        self.values.push(value);
        Ok(handle)
    }

    /// Returns whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    /// Returns the number of elements in the arena.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns a reference to the element at `handle`, or an error if the
    /// handle is out of range.
    pub fn get(&self, handle: H) -> Result<&T, HandleOutOfRange> {
        self.values.get(handle.to_index()).ok_or(HandleOutOfRange {
            type_name: H::TYPE_NAME,
            index: handle.to_index(),
        })
    }

    /// Returns an iterator over all handles in the arena.
    pub fn keys(&self) -> HandleIter<H> {
        HandleIter {
            range: 0..self.values.len(),
            _phantom: PhantomData,
        }
    }
    /// Returns an iterator over the values in the arena.
    pub fn values(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }
    /// Returns an iterator over handle-value pairs.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (H, &T)> {
        self.keys().zip(&self.values)
    }

    /// Returns the first handle for which a predicate returns `true`.
    pub fn find(&self, mut pred: impl FnMut(H, &T) -> bool) -> Option<H> {
        self.iter().find(|(h, v)| pred(*h, v)).map(|(h, _)| h)
    }
}

/// Iterator over the handles of an [`Arena`].
#[derive(Debug, Clone)]
pub struct HandleIter<H> {
    range: Range<usize>,
    _phantom: PhantomData<fn() -> H>,
}

impl<H: Handle> Iterator for HandleIter<H> {
    type Item = H;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(handle_from_index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<H: Handle> DoubleEndedIterator for HandleIter<H> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(handle_from_index)
    }
}

impl<H: Handle> ExactSizeIterator for HandleIter<H> {}

fn handle_from_index<H: Handle>(index: usize) -> H {
    // Every index below `len` was produced by `push()`, which checked it.
    H::try_from_index(index).expect("arena index exceeds handle range")
}
