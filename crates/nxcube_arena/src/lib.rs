//! Stable handles into fixed arenas.
//!
//! Every part, slice, and sticker of a cube lives in an [`Arena`] for the
//! lifetime of the cube. Other structures refer to them only through small
//! [`Handle`] newtypes, which avoids reference cycles between faces, edges,
//! and the parts they share.

#[macro_use]
mod macros;
mod arena;
pub mod error;

pub use arena::{Arena, HandleIter};
pub use error::{HandleOutOfRange, HandleOverflow};

/// Stable handle into an [`Arena`].
///
/// Instead of implementing this trait manually, use the macro
/// [`handle_struct!`].
pub trait Handle:
    'static
    + std::fmt::Debug
    + std::fmt::Display
    + Default
    + Copy
    + Eq
    + std::hash::Hash
    + Ord
    + Send
    + Sync
{
    /// Largest index representable by the handle.
    const MAX_INDEX: usize;
    /// User-friendly type name.
    const TYPE_NAME: &'static str;

    /// Returns the handle as a `usize` index.
    fn to_index(self) -> usize;
    /// Returns a handle from a `usize` index, or an error if it does not fit.
    fn try_from_index(index: usize) -> Result<Self, HandleOverflow>;
}
