//! Geometric core of an NxNxN Rubik's cube engine.
//!
//! A [`Cube`] is a fixed graph of parts, slices, and stickers. Rotations move
//! colors and per-sticker attributes through that graph; nothing is ever
//! reallocated. Even cubes have no fixed centers, so [`FaceColorTracker`]
//! decides and then follows which color belongs on each face.

#[macro_use]
extern crate lazy_static;

mod attributes;
mod color;
mod config;
mod consistency;
mod cube;
mod error;
mod geometry;
mod notation;
pub mod orientation;
mod parts;
mod rotation;
#[cfg(test)]
mod tests;
mod tracker;
mod translate;

pub use crate::attributes::{AttrValue, AttributeBag};
pub use crate::color::{Color, ColorCounts, ColorScheme, ColorSet, SchemeError};
pub use crate::config::CubeConfig;
pub use crate::cube::{Cube, Face, MAX_SIZE, MIN_SIZE};
pub use crate::error::{ConsistencyViolation, GeometryError, TrackerError};
pub use crate::geometry::{Axis, FaceName, FaceSet, FaceSide, PerFace, Sign};
pub use crate::notation::{Algorithm, Move, ParseMoveError};
pub use crate::parts::{
    Part, PartEdge, PartEdgeId, PartId, PartKind, PartRef, PartSlice, PartSliceId, SliceRef,
};
pub use crate::rotation::{CubeAxis, Direction, LayerRange, RotationEvent, RotationKind, SliceAxis};
pub use crate::tracker::FaceColorTracker;
pub use crate::translate::{Edge, EdgeId, EdgeSide};
