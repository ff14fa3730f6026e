//! Parts, part slices, and part edges (stickers).
//!
//! Everything here is created once when a [`Cube`] is constructed and never
//! reallocated. Only the color and attribute bag of each [`PartEdge`] change,
//! and only the rotation engine changes them.

use std::fmt;

use smallvec::SmallVec;

use crate::{AttributeBag, Color, ColorSet, Cube, FaceName, FaceSet};

nxcube_arena::handle_struct! {
    /// Handle to a [`PartEdge`], which is a single sticker.
    pub struct PartEdgeId(pub u32);
    /// Handle to a [`PartSlice`].
    pub struct PartSliceId(pub u32);
    /// Handle to a [`Part`].
    pub struct PartId(pub u16);
}

/// Kind of physical piece.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartKind {
    /// Piece touching three faces.
    Corner,
    /// Piece touching two faces, split into `N-2` slices.
    Edge,
    /// Piece touching one face, split into `(N-2)^2` slices.
    Center,
}
impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartKind::Corner => write!(f, "corner"),
            PartKind::Edge => write!(f, "edge"),
            PartKind::Center => write!(f, "center"),
        }
    }
}

/// Single sticker: a fixed slot on a face plus the color and attributes
/// currently occupying it.
#[derive(Debug, Clone)]
pub struct PartEdge {
    pub(crate) face: FaceName,
    pub(crate) row: u16,
    pub(crate) col: u16,
    pub(crate) slice: PartSliceId,

    pub(crate) color: Color,
    pub(crate) attributes: AttributeBag,
}
impl PartEdge {
    /// Returns the face this sticker slot is on.
    pub fn face(&self) -> FaceName {
        self.face
    }
    /// Returns the row of this sticker slot, counted from the bottom of its
    /// face.
    pub fn row(&self) -> u16 {
        self.row
    }
    /// Returns the column of this sticker slot, counted from the left of its
    /// face.
    pub fn col(&self) -> u16 {
        self.col
    }
    /// Returns the slice this sticker slot belongs to.
    pub fn slice(&self) -> PartSliceId {
        self.slice
    }
    /// Returns the color currently in this slot.
    pub fn color(&self) -> Color {
        self.color
    }
    /// Returns the attributes currently in this slot.
    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }
}

/// One sub-unit of a part. Corners have a single slice.
#[derive(Debug, Clone)]
pub struct PartSlice {
    pub(crate) part: PartId,
    pub(crate) index: u16,
    pub(crate) fixed_id: FaceSet,
    pub(crate) edges: SmallVec<[PartEdgeId; 3]>,
}

/// Physical piece occupying a fixed structural slot.
#[derive(Debug, Clone)]
pub struct Part {
    pub(crate) kind: PartKind,
    pub(crate) fixed_id: FaceSet,
    pub(crate) slices: Vec<PartSliceId>,
}

/// Read-only view of a [`Part`] within its cube.
#[derive(Debug, Copy, Clone)]
pub struct PartRef<'a> {
    pub(crate) cube: &'a Cube,
    pub(crate) id: PartId,
}
impl<'a> PartRef<'a> {
    fn part(self) -> &'a Part {
        &self.cube.parts[self.id]
    }

    /// Returns the handle of the part.
    pub fn id(self) -> PartId {
        self.id
    }
    /// Returns the kind of the part.
    pub fn kind(self) -> PartKind {
        self.part().kind
    }
    /// Returns the set of faces the part's slot touches. This never changes.
    pub fn fixed_id(self) -> FaceSet {
        self.part().fixed_id
    }
    /// Returns an iterator over the slices of the part, in internal order.
    pub fn slices(self) -> impl Iterator<Item = SliceRef<'a>> {
        let cube = self.cube;
        self.part()
            .slices
            .iter()
            .map(move |&id| SliceRef { cube, id })
    }
    /// Returns the number of slices.
    pub fn slice_count(self) -> usize {
        self.part().slices.len()
    }
    /// Returns an iterator over every sticker of the part.
    pub fn stickers(self) -> impl Iterator<Item = PartEdgeId> {
        self.slices().flat_map(|slice| slice.stickers())
    }

    /// Returns the slice whose colors stand for the whole part: the middle
    /// slice of a center on an odd cube, otherwise the first slice.
    pub fn representative_slice(self) -> SliceRef<'a> {
        let part = self.part();
        let index = match part.kind {
            PartKind::Center if part.slices.len() % 2 == 1 => part.slices.len() / 2,
            _ => 0,
        };
        SliceRef {
            cube: self.cube,
            id: part.slices[index],
        }
    }

    /// Returns the set of colors currently on the part.
    ///
    /// Only meaningful when [`PartRef::is_uniform()`] is true.
    pub fn colors_id(self) -> ColorSet {
        self.representative_slice().colors_id()
    }
    /// Returns the set of face colors bordering the part's slot. This changes
    /// under slice and whole-cube rotations but not under face rotations.
    pub fn position_id(self) -> ColorSet {
        self.fixed_id()
            .faces()
            .map(|face| self.cube.face_color(face))
            .collect()
    }

    /// Returns whether every slice shows the same color on each face.
    pub fn is_uniform(self) -> bool {
        let reference = self.representative_slice();
        self.slices().all(|slice| {
            slice.stickers().all(|sticker| {
                let edge = &self.cube.part_edges[sticker];
                reference.color_on(edge.face) == Some(edge.color)
            })
        })
    }
    /// Returns whether the correct piece occupies this slot, regardless of
    /// its orientation.
    pub fn in_position(self) -> bool {
        self.position_id() == self.colors_id()
    }
    /// Returns whether every sticker matches the color of its face.
    pub fn is_solved(self) -> bool {
        self.stickers().all(|sticker| {
            let edge = &self.cube.part_edges[sticker];
            edge.color == self.cube.face_color(edge.face)
        })
    }
}

/// Read-only view of a [`PartSlice`] within its cube.
#[derive(Debug, Copy, Clone)]
pub struct SliceRef<'a> {
    pub(crate) cube: &'a Cube,
    pub(crate) id: PartSliceId,
}
impl<'a> SliceRef<'a> {
    fn slice(self) -> &'a PartSlice {
        &self.cube.slices[self.id]
    }

    /// Returns the handle of the slice.
    pub fn id(self) -> PartSliceId {
        self.id
    }
    /// Returns the part the slice belongs to.
    pub fn part(self) -> PartRef<'a> {
        PartRef {
            cube: self.cube,
            id: self.slice().part,
        }
    }
    /// Returns the index of the slice within its part.
    pub fn index(self) -> u16 {
        self.slice().index
    }
    /// Returns the set of faces the slice's slot touches. This never changes.
    pub fn fixed_id(self) -> FaceSet {
        self.slice().fixed_id
    }
    /// Returns an iterator over the stickers of the slice.
    pub fn stickers(self) -> impl Iterator<Item = PartEdgeId> {
        self.slice().edges.iter().copied()
    }
    /// Returns the set of colors currently on the slice.
    pub fn colors_id(self) -> ColorSet {
        self.stickers()
            .map(|sticker| self.cube.part_edges[sticker].color)
            .collect()
    }
    /// Returns the color of the slice's sticker on `face`, if it has one.
    pub fn color_on(self, face: FaceName) -> Option<Color> {
        self.stickers()
            .map(|sticker| &self.cube.part_edges[sticker])
            .find(|edge| edge.face == face)
            .map(|edge| edge.color)
    }
}
