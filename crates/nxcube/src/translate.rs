//! Coordinate translation across the edge shared by two faces.
//!
//! Each face numbers positions along each of its sides left-to-right (ltr):
//! 0 is the leftmost position of a horizontal side and the bottommost
//! position of a vertical side, seen from outside the cube. An [`Edge`]
//! stores its slices in the ltr order of its first face `f1`; `same_direction`
//! records whether the second face `f2` counts the same way or in reverse.

use crate::{FaceName, FaceSide, GeometryError, PartId};

nxcube_arena::handle_struct! {
    /// Handle to an [`Edge`].
    pub struct EdgeId(pub u8);
}

/// Which of an edge's two faces a coordinate is expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EdgeSide {
    /// The face whose ltr order is the edge's internal order.
    F1,
    /// The other face.
    F2,
}

/// Boundary between two adjacent faces, and the edge part along it.
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) f1: FaceName,
    pub(crate) f2: FaceName,
    pub(crate) same_direction: bool,
    pub(crate) slice_count: u16,
    pub(crate) part: Option<PartId>,
}
impl Edge {
    /// Constructs the edge between `f1` and `f2`, which must be adjacent.
    pub(crate) fn new(f1: FaceName, f2: FaceName, size: u16) -> Result<Self, GeometryError> {
        if f1 == f2 {
            return Err(GeometryError::SameFace(f1));
        }
        let (Some(side1), Some(side2)) = (f1.side_toward(f2), f2.side_toward(f1)) else {
            return Err(GeometryError::NotAdjacent(f1, f2));
        };
        Ok(Self {
            f1,
            f2,
            same_direction: side1.ltr_direction(f1) == side2.ltr_direction(f2),
            slice_count: size.saturating_sub(2),
            part: None,
        })
    }

    /// Returns the face whose ltr order is the edge's internal order.
    pub fn f1(&self) -> FaceName {
        self.f1
    }
    /// Returns the other face.
    pub fn f2(&self) -> FaceName {
        self.f2
    }
    /// Returns both faces, `f1` first.
    pub fn faces(&self) -> [FaceName; 2] {
        [self.f1, self.f2]
    }
    /// Returns whether `f2` sees the slices in the same order as `f1`.
    pub fn same_direction(&self) -> bool {
        self.same_direction
    }
    /// Returns the number of slices in the edge part, excluding the corners.
    pub fn slice_count(&self) -> u16 {
        self.slice_count
    }
    /// Returns the edge part, or `None` on a cube too small to have one.
    pub fn part(&self) -> Option<PartId> {
        self.part
    }
    /// Returns whether `face` borders this edge.
    pub fn touches(&self, face: FaceName) -> bool {
        face == self.f1 || face == self.f2
    }

    /// Returns which side of the edge `face` is on.
    pub fn side_of(&self, face: FaceName) -> Result<EdgeSide, GeometryError> {
        if face == self.f1 {
            Ok(EdgeSide::F1)
        } else if face == self.f2 {
            Ok(EdgeSide::F2)
        } else {
            Err(GeometryError::FaceNotOnEdge {
                face,
                f1: self.f1,
                f2: self.f2,
            })
        }
    }
    /// Returns the face on the other side of the edge from `face`.
    pub fn other_face(&self, face: FaceName) -> Result<FaceName, GeometryError> {
        Ok(match self.side_of(face)? {
            EdgeSide::F1 => self.f2,
            EdgeSide::F2 => self.f1,
        })
    }
    /// Returns the side of `face` that lies along this edge.
    pub fn face_side(&self, face: FaceName) -> Result<FaceSide, GeometryError> {
        let other = self.other_face(face)?;
        face.side_toward(other)
            .ok_or(GeometryError::NotAdjacent(face, other))
    }

    /// Returns the internal slice index of the slice at `ltr` as seen from
    /// `face`.
    pub fn slice_index_from_ltr(&self, face: FaceName, ltr: u16) -> Result<u16, GeometryError> {
        let side = self.side_of(face)?;
        check_coordinate("ltr", ltr, self.slice_count)?;
        Ok(self.map_coordinate(side, ltr, self.slice_count))
    }
    /// Returns the ltr coordinate, as seen from `face`, of the slice with
    /// internal index `index`. This is the inverse of
    /// [`Edge::slice_index_from_ltr()`].
    pub fn ltr_from_slice_index(
        &self,
        face: FaceName,
        index: u16,
    ) -> Result<u16, GeometryError> {
        let side = self.side_of(face)?;
        check_coordinate("slice index", index, self.slice_count)?;
        Ok(self.map_coordinate(side, index, self.slice_count))
    }

    /// Translates an ltr coordinate along the full edge line (corners
    /// included, `width` positions) from one face of the edge to the other.
    ///
    /// `from` must border the edge.
    pub(crate) fn translate_line(&self, from: FaceName, ltr: u16, width: u16) -> u16 {
        let side = match self.side_of(from) {
            Ok(side) => side,
            Err(e) => unreachable!("{e}"),
        };
        // Going through the internal order is its own inverse, so the same
        // mapping works in both directions.
        let index = self.map_coordinate(side, ltr, width);
        let other_side = match side {
            EdgeSide::F1 => EdgeSide::F2,
            EdgeSide::F2 => EdgeSide::F1,
        };
        self.map_coordinate(other_side, index, width)
    }

    /// Maps between a face's ltr coordinate and the internal order over a
    /// line of `len` positions. The mapping is an involution.
    fn map_coordinate(&self, side: EdgeSide, value: u16, len: u16) -> u16 {
        match side {
            EdgeSide::F1 => value,
            EdgeSide::F2 if self.same_direction => value,
            EdgeSide::F2 => len - 1 - value,
        }
    }
}

fn check_coordinate(what: &'static str, value: u16, limit: u16) -> Result<(), GeometryError> {
    if value < limit {
        Ok(())
    } else {
        Err(GeometryError::IndexOutOfRange { what, value, limit })
    }
}
