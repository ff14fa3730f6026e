//! Error types.

use thiserror::Error;

use crate::{Color, FaceName, FaceSet, PartEdgeId, PartId};

/// Rejected geometry request.
///
/// These are always detected before any sticker moves, so the cube is left
/// unchanged and the caller may retry with corrected input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Unknown face name
    #[error("unknown face {0:?}")]
    UnknownFace(String),
    /// Unknown rotation or slice axis name
    #[error("unknown axis {0:?}")]
    UnknownAxis(String),
    /// Direction is not a nonzero number of quarter turns
    #[error("invalid direction {0}; expected a nonzero quarter-turn count from -3 to 3")]
    InvalidDirection(i32),
    /// Cube size out of range
    #[error("cube size {size} out of range {min}..={max}")]
    InvalidSize {
        /// Requested size.
        size: u16,
        /// Minimum supported size.
        min: u16,
        /// Maximum supported size.
        max: u16,
    },
    /// Layer range is empty or exceeds the layers available
    #[error("layers {first}..={last} out of range for {target}, which has {count} layers")]
    LayerOutOfRange {
        /// Face or axis being turned.
        target: String,
        /// First requested layer.
        first: u16,
        /// Last requested layer.
        last: u16,
        /// Number of layers available.
        count: u16,
    },
    /// Two distinct faces were required
    #[error("expected two distinct faces, got {0} twice")]
    SameFace(FaceName),
    /// Faces do not share an edge
    #[error("faces {0} and {1} are opposite and share no edge")]
    NotAdjacent(FaceName, FaceName),
    /// Face does not border the edge being queried
    #[error("face {face} does not border the {f1}{f2} edge")]
    FaceNotOnEdge {
        /// Face that was queried.
        face: FaceName,
        /// First face of the edge.
        f1: FaceName,
        /// Second face of the edge.
        f2: FaceName,
    },
    /// Coordinate out of range
    #[error("{what} {value} out of range; expected less than {limit}")]
    IndexOutOfRange {
        /// Kind of coordinate.
        what: &'static str,
        /// Requested value.
        value: u16,
        /// Exclusive upper bound.
        limit: u16,
    },
}

/// Broken internal invariant.
///
/// This indicates a bug in the rotation engine or coordinate translator, never
/// bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyViolation {
    /// A color appears on the wrong number of stickers
    #[error("color {color:?} appears on {count} stickers; expected {expected}")]
    ColorCount {
        /// Color being counted.
        color: Color,
        /// Number of stickers with the color.
        count: usize,
        /// Number of stickers each color should have.
        expected: usize,
    },
    /// A physical piece shows two stickers of the same or opposite colors
    #[error("{a:?} and {b:?} share a piece but show {color_a:?} and {color_b:?}")]
    ImpossiblePiece {
        /// First sticker.
        a: PartEdgeId,
        /// Second sticker.
        b: PartEdgeId,
        /// Color of the first sticker.
        color_a: Color,
        /// Color of the second sticker.
        color_b: Color,
    },
    /// Two faces disagree about where a slice sits along their shared edge
    #[error(
        "slice misaligned across {from}{to} edge: ltr {from_ltr} on {from} \
         translates to {expected} on {to}, but the sticker is at {actual}"
    )]
    SliceAlignment {
        /// Face the slice was located on.
        from: FaceName,
        /// Face the slice was translated to.
        to: FaceName,
        /// Coordinate on `from`.
        from_ltr: u16,
        /// Coordinate on `to` according to the translator.
        expected: u16,
        /// Coordinate on `to` where the sticker actually is.
        actual: u16,
    },
    /// A part's stickers no longer lie on the faces of its slot
    #[error("part {part:?} has fixed id {expected:?} but its stickers lie on {actual:?}")]
    FixedIdMismatch {
        /// Part whose slot disagrees with its stickers.
        part: PartId,
        /// Faces recorded for the slot.
        expected: FaceSet,
        /// Faces the stickers are on.
        actual: FaceSet,
    },
    /// A face's color assignment repeats a color
    #[error("color {0:?} assigned to more than one face")]
    DuplicateFaceColor(Color),
}

/// Error produced when opening a face color tracking session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// Cube has no center cells to mark
    #[error("a {0}x{0} cube has no center cells to track")]
    NoCenters(u16),
}
