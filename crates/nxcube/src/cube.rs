//! The cube: six faces and the part graph beneath them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;

use itertools::Itertools;
use nxcube_arena::{Arena, Handle};
use smallvec::SmallVec;
use strum::IntoEnumIterator;

use crate::geometry::{Vec3, add, scale};
use crate::{
    AttrValue, AttributeBag, Color, ColorCounts, ColorScheme, CubeConfig, Edge, EdgeId,
    FaceName, FaceSet, FaceSide, GeometryError, Part, PartEdge, PartEdgeId, PartId, PartKind,
    PartRef, PartSlice, PartSliceId, PerFace, RotationEvent,
};

/// Smallest supported cube size.
pub const MIN_SIZE: u16 = 2;
/// Largest supported cube size.
pub const MAX_SIZE: u16 = 32;

static NEXT_CUBE_ID: AtomicU64 = AtomicU64::new(0);

fn next_cube_id() -> u64 {
    NEXT_CUBE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identifies one state of one cube. Equal keys mean equal colors and
/// attributes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct StateKey {
    pub(crate) cube: u64,
    pub(crate) rotations: u64,
    pub(crate) attribute_edits: u64,
}

pub(crate) fn check_size(size: u16) -> Result<(), GeometryError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(GeometryError::InvalidSize {
            size,
            min: MIN_SIZE,
            max: MAX_SIZE,
        })
    }
}

/// One of the six face slots and its grid of stickers.
#[derive(Debug, Clone)]
pub struct Face {
    name: FaceName,
    size: u16,
    grid: Vec<PartEdgeId>,
    center: Option<PartId>,
}
impl Face {
    /// Returns the structural name of the face.
    pub fn name(&self) -> FaceName {
        self.name
    }
    /// Returns the sticker at `(row, col)`, with row 0 at the bottom and col
    /// 0 at the left as seen from outside.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not less than the cube size.
    pub fn sticker(&self, row: u16, col: u16) -> PartEdgeId {
        assert!(row < self.size && col < self.size, "({row}, {col}) out of range");
        self.grid[(row * self.size + col) as usize]
    }
    /// Returns an iterator over the stickers of the face, row by row from the
    /// bottom.
    pub fn stickers(&self) -> impl Iterator<Item = PartEdgeId> {
        self.grid.iter().copied()
    }
    /// Returns the center part of the face, or `None` on a 2x2x2 cube.
    pub fn center(&self) -> Option<PartId> {
        self.center
    }
}

/// NxNxN cube.
///
/// Parts, slices, and stickers are allocated once in [`Cube::new()`] and never
/// move; rotations move colors and attribute bags between them.
pub struct Cube {
    size: u16,
    scheme: ColorScheme,

    pub(crate) part_edges: Arena<PartEdgeId, PartEdge>,
    pub(crate) slices: Arena<PartSliceId, PartSlice>,
    pub(crate) parts: Arena<PartId, Part>,
    pub(crate) faces: PerFace<Face>,
    pub(crate) edges: Arena<EdgeId, Edge>,

    corners: Vec<PartId>,
    edge_parts: Vec<PartId>,
    centers: Vec<PartId>,

    /// Unique per instance, including clones.
    id: u64,
    pub(crate) modification_count: u64,
    attribute_edits: u64,
    pub(crate) subscribers: Vec<mpsc::Sender<RotationEvent>>,
}
impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cube")
            .field("size", &self.size)
            .field("scheme", &self.scheme.name())
            .field("modification_count", &self.modification_count)
            .finish_non_exhaustive()
    }
}
impl Clone for Cube {
    /// Clones the cube state. Subscribers are not cloned, and the clone
    /// counts as a different cube for caching.
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            scheme: self.scheme.clone(),
            part_edges: self.part_edges.clone(),
            slices: self.slices.clone(),
            parts: self.parts.clone(),
            faces: self.faces.clone(),
            edges: self.edges.clone(),
            corners: self.corners.clone(),
            edge_parts: self.edge_parts.clone(),
            centers: self.centers.clone(),
            id: next_cube_id(),
            modification_count: self.modification_count,
            attribute_edits: self.attribute_edits,
            subscribers: vec![],
        }
    }
}

impl Cube {
    /// Constructs a solved cube using the default color scheme.
    pub fn new(size: u16) -> Result<Self, GeometryError> {
        Self::with_scheme(size, ColorScheme::default())
    }
    /// Constructs a solved cube from a configuration.
    pub fn from_config(config: &CubeConfig) -> Result<Self, GeometryError> {
        Self::with_scheme(config.size, config.scheme.clone())
    }
    /// Constructs a solved cube using `scheme`.
    pub fn with_scheme(size: u16, scheme: ColorScheme) -> Result<Self, GeometryError> {
        check_size(size)?;
        let mut builder = Builder {
            size,
            part_edges: Arena::new(),
            slices: Arena::new(),
            parts: Arena::new(),
        };

        let grids = PerFace::from_fn(|face| builder.face_grid(face, scheme.color(face)));
        let corners = builder.corners(&grids);
        let mut edges: Arena<EdgeId, Edge> = Arena::new();
        let mut edge_parts = vec![];
        for face in FaceName::iter() {
            for side in FaceSide::CYCLE {
                let other = face.neighbor(side);
                if edges.values().any(|e| e.touches(face) && e.touches(other)) {
                    continue;
                }
                let mut edge = Edge::new(face, other, size)?;
                edge.part = builder.edge_part(&edge, &grids);
                edge_parts.extend(edge.part);
                alloc(&mut edges, edge);
            }
        }
        let centers = PerFace::from_fn(|face| builder.center_part(face, &grids[face]));

        let faces = grids.map(|name, grid| Face {
            name,
            size,
            grid,
            center: centers[name],
        });

        log::trace!(
            "Built {size}x{size}x{size} cube with {} parts and {} stickers",
            builder.parts.len(),
            builder.part_edges.len(),
        );

        Ok(Self {
            size,
            scheme,
            part_edges: builder.part_edges,
            slices: builder.slices,
            parts: builder.parts,
            faces,
            edges,
            corners,
            edge_parts,
            centers: centers.values().flatten().copied().collect(),
            id: next_cube_id(),
            modification_count: 0,
            attribute_edits: 0,
            subscribers: vec![],
        })
    }

    /// Returns the number of layers along each axis.
    pub fn size(&self) -> u16 {
        self.size
    }
    /// Returns whether the cube has an even number of layers, and therefore
    /// no fixed center sticker.
    pub fn is_even(&self) -> bool {
        self.size % 2 == 0
    }
    /// Returns the color scheme the cube was built with.
    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }
    /// Returns the number of rotations applied so far.
    ///
    /// This only ever increases, so caches derived from sticker colors can
    /// compare it against the value they were built at.
    pub fn modification_count(&self) -> u64 {
        self.modification_count
    }
    /// Returns a key that changes whenever any sticker color or attribute
    /// changes, and differs between clones.
    pub(crate) fn state_key(&self) -> StateKey {
        StateKey {
            cube: self.id,
            rotations: self.modification_count,
            attribute_edits: self.attribute_edits,
        }
    }

    /// Returns a face.
    pub fn face(&self, face: FaceName) -> &Face {
        &self.faces[face]
    }
    /// Returns the sticker at `(row, col)` on `face`, or an error if the
    /// coordinates are out of range.
    pub fn try_sticker(&self, face: FaceName, row: u16, col: u16) -> Result<PartEdgeId, GeometryError> {
        for (what, value) in [("row", row), ("col", col)] {
            if value >= self.size {
                return Err(GeometryError::IndexOutOfRange {
                    what,
                    value,
                    limit: self.size,
                });
            }
        }
        Ok(self.faces[face].sticker(row, col))
    }
    /// Returns the color at `(row, col)` on `face`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not less than the cube size.
    pub fn sticker_color(&self, face: FaceName, row: u16, col: u16) -> Color {
        self.part_edges[self.faces[face].sticker(row, col)].color
    }
    /// Returns a sticker.
    pub fn part_edge(&self, id: PartEdgeId) -> &PartEdge {
        &self.part_edges[id]
    }
    /// Returns an iterator over every sticker.
    pub fn part_edges(&self) -> impl Iterator<Item = (PartEdgeId, &PartEdge)> {
        self.part_edges.iter()
    }
    /// Returns the color of every sticker, in handle order.
    pub fn color_state(&self) -> Vec<Color> {
        self.part_edges.values().map(|e| e.color).collect()
    }

    /// Returns a part.
    pub fn part(&self, id: PartId) -> PartRef<'_> {
        PartRef { cube: self, id }
    }
    /// Returns an iterator over every part.
    pub fn all_parts(&self) -> impl Iterator<Item = PartRef<'_>> {
        self.parts.keys().map(|id| self.part(id))
    }
    /// Returns an iterator over the 8 corners.
    pub fn all_corners(&self) -> impl Iterator<Item = PartRef<'_>> {
        self.corners.iter().map(|&id| self.part(id))
    }
    /// Returns an iterator over the 12 edges, or nothing on a 2x2x2 cube.
    pub fn all_edges(&self) -> impl Iterator<Item = PartRef<'_>> {
        self.edge_parts.iter().map(|&id| self.part(id))
    }
    /// Returns an iterator over the 6 centers, or nothing on a 2x2x2 cube.
    pub fn all_centers(&self) -> impl Iterator<Item = PartRef<'_>> {
        self.centers.iter().map(|&id| self.part(id))
    }

    /// Returns an iterator over the 12 edge boundaries between faces.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }
    /// Returns the edge between two adjacent faces.
    pub fn edge_between(&self, a: FaceName, b: FaceName) -> Result<&Edge, GeometryError> {
        if a == b {
            return Err(GeometryError::SameFace(a));
        }
        self.edges
            .values()
            .find(|e| e.touches(a) && e.touches(b))
            .ok_or(GeometryError::NotAdjacent(a, b))
    }
    /// Returns the edge between two faces that are known to be adjacent.
    pub(crate) fn adjacent_edge(&self, a: FaceName, b: FaceName) -> &Edge {
        self.edge_between(a, b)
            .expect("rotation rings only cross adjacent faces")
    }

    /// Returns the stickers of the center cells of `face`: every sticker not
    /// on the border. On a 2x2x2 cube this is empty.
    pub fn center_cells(&self, face: FaceName) -> impl Iterator<Item = PartEdgeId> {
        let inner = 1..self.size.saturating_sub(1);
        let face = &self.faces[face];
        inner
            .clone()
            .cartesian_product(inner)
            .map(move |(row, col)| face.sticker(row, col))
    }

    /// Returns the color a face is judged against.
    ///
    /// On odd cubes this is the color of the middle center sticker. On even
    /// cubes it is the most common color among the center cells (ties go to
    /// the first color in color order), or among all stickers of the face on a
    /// 2x2x2 cube. Solvers that need a stable answer on scrambled even cubes
    /// should use a [`crate::FaceColorTracker`] instead.
    pub fn face_color(&self, face: FaceName) -> Color {
        let n = self.size;
        if n % 2 == 1 {
            return self.sticker_color(face, n / 2, n / 2);
        }
        let counts: ColorCounts = if n == 2 {
            self.faces[face]
                .stickers()
                .map(|s| self.part_edges[s].color)
                .collect()
        } else {
            self.center_cells(face)
                .map(|s| self.part_edges[s].color)
                .collect()
        };
        counts.majority().0
    }
    /// Returns whether every sticker matches its face's color.
    pub fn is_solved(&self) -> bool {
        FaceName::iter().all(|face| {
            let color = self.face_color(face);
            self.faces[face]
                .stickers()
                .all(|s| self.part_edges[s].color == color)
        })
    }

    /// Sets an attribute on a sticker, returning the old value. The attribute
    /// travels with the sticker's color through every rotation.
    pub fn set_attribute(
        &mut self,
        sticker: PartEdgeId,
        key: impl Into<String>,
        value: AttrValue,
    ) -> Option<AttrValue> {
        self.attribute_edits += 1;
        self.part_edges[sticker].attributes.insert(key, value)
    }
    /// Removes an attribute from a sticker, returning it.
    pub fn remove_attribute(&mut self, sticker: PartEdgeId, key: &str) -> Option<AttrValue> {
        let old = self.part_edges[sticker].attributes.remove(key);
        if old.is_some() {
            self.attribute_edits += 1;
        }
        old
    }
    /// Returns the stickers that currently carry attribute `key`.
    pub fn find_attribute<'a>(
        &'a self,
        key: &'a str,
    ) -> impl 'a + Iterator<Item = (PartEdgeId, &'a AttrValue)> {
        self.part_edges
            .iter()
            .filter_map(move |(id, e)| Some((id, e.attributes.get(key)?)))
    }

    /// Returns a receiver that gets one [`RotationEvent`] per completed
    /// rotation. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::Receiver<RotationEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }
}

/// Renders the cube as an unfolded net, `U` above `L F R B` above `D`.
impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FaceName::*;

        let n = self.size;
        let row_string = |face: FaceName, row: u16| -> String {
            (0..n).map(|col| self.sticker_color(face, row, col).letter()).collect()
        };
        let pad = " ".repeat(n as usize + 1);
        for row in (0..n).rev() {
            writeln!(f, "{pad}{}", row_string(U, row))?;
        }
        for row in (0..n).rev() {
            let line = [L, F, R, B].map(|face| row_string(face, row)).join(" ");
            writeln!(f, "{line}")?;
        }
        for row in (0..n).rev() {
            writeln!(f, "{pad}{}", row_string(D, row))?;
        }
        Ok(())
    }
}

fn alloc<H: Handle, T>(arena: &mut Arena<H, T>, value: T) -> H {
    arena
        .push(value)
        .expect("cube size bound keeps handles in range")
}

/// Scratch state for laying out the part graph.
struct Builder {
    size: u16,
    part_edges: Arena<PartEdgeId, PartEdge>,
    slices: Arena<PartSliceId, PartSlice>,
    parts: Arena<PartId, Part>,
}
impl Builder {
    /// Allocates every sticker of a face, row by row from the bottom.
    fn face_grid(&mut self, face: FaceName, color: Color) -> Vec<PartEdgeId> {
        let n = self.size;
        (0..n)
            .cartesian_product(0..n)
            .map(|(row, col)| {
                alloc(
                    &mut self.part_edges,
                    PartEdge {
                        face,
                        row,
                        col,
                        // Assigned when the owning slice is allocated.
                        slice: PartSliceId::default(),
                        color,
                        attributes: AttributeBag::new(),
                    },
                )
            })
            .collect()
    }

    fn add_part(
        &mut self,
        kind: PartKind,
        fixed_id: FaceSet,
        slices: impl IntoIterator<Item = SmallVec<[PartEdgeId; 3]>>,
    ) -> PartId {
        let part = alloc(
            &mut self.parts,
            Part {
                kind,
                fixed_id,
                slices: vec![],
            },
        );
        for (index, edges) in slices.into_iter().enumerate() {
            let slice_fixed_id = edges.iter().map(|&e| self.part_edges[e].face).collect();
            let slice = alloc(
                &mut self.slices,
                PartSlice {
                    part,
                    index: index as u16,
                    fixed_id: slice_fixed_id,
                    edges: edges.clone(),
                },
            );
            for e in edges {
                self.part_edges[e].slice = slice;
            }
            self.parts[part].slices.push(slice);
        }
        part
    }

    /// Position of the center of the piece a sticker belongs to, in units of
    /// half a piece with the origin at the center of the cube.
    fn piece_position(&self, sticker: PartEdgeId) -> Vec3 {
        let e = &self.part_edges[sticker];
        let far = self.size as i32 - 1;
        let face = e.face;
        add(
            scale(face.normal(), far),
            add(
                scale(face.right(), 2 * e.col as i32 - far),
                scale(face.up(), 2 * e.row as i32 - far),
            ),
        )
    }

    /// Groups the stickers at the 8 corners of the cube into corner parts.
    fn corners(&mut self, grids: &PerFace<Vec<PartEdgeId>>) -> Vec<PartId> {
        let far = self.size - 1;
        let mut by_position = BTreeMap::<Vec3, SmallVec<[PartEdgeId; 3]>>::new();
        for grid in grids.values() {
            for &sticker in grid {
                let e = &self.part_edges[sticker];
                let is_corner = (e.row == 0 || e.row == far) && (e.col == 0 || e.col == far);
                if is_corner {
                    let position = self.piece_position(sticker);
                    by_position.entry(position).or_default().push(sticker);
                }
            }
        }
        by_position
            .into_values()
            .map(|stickers| {
                let fixed_id = stickers.iter().map(|&s| self.part_edges[s].face).collect();
                self.add_part(PartKind::Corner, fixed_id, [stickers])
            })
            .collect()
    }

    /// Allocates the edge part along `edge`, with slices in `f1` ltr order.
    fn edge_part(&mut self, edge: &Edge, grids: &PerFace<Vec<PartEdgeId>>) -> Option<PartId> {
        let n = self.size;
        if n < 3 {
            return None;
        }
        let side1 = edge.f1.side_toward(edge.f2)?;
        let side2 = edge.f2.side_toward(edge.f1)?;
        let sticker_at = |face: FaceName, (row, col): (u16, u16)| grids[face][(row * n + col) as usize];
        let slices = (1..n - 1)
            .map(|ltr1| {
                let ltr2 = edge.translate_line(edge.f1, ltr1, n);
                let s1 = sticker_at(edge.f1, side1.cell(n, 0, ltr1));
                let s2 = sticker_at(edge.f2, side2.cell(n, 0, ltr2));
                SmallVec::from_slice(&[s1, s2])
            })
            .collect_vec();
        let fixed_id = FaceSet::from(edge.f1) | FaceSet::from(edge.f2);
        Some(self.add_part(PartKind::Edge, fixed_id, slices))
    }

    /// Allocates the center part of a face, with slices in row-major order
    /// from the bottom-left inner cell.
    fn center_part(&mut self, face: FaceName, grid: &[PartEdgeId]) -> Option<PartId> {
        let n = self.size;
        if n < 3 {
            return None;
        }
        let slices = (1..n - 1)
            .cartesian_product(1..n - 1)
            .map(|(row, col)| SmallVec::from_slice(&[grid[(row * n + col) as usize]]))
            .collect_vec();
        Some(self.add_part(PartKind::Center, face.into(), slices))
    }
}
