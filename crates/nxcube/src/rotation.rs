//! Rotation engine: the only code that moves colors between stickers.
//!
//! Every rotation is reduced to a twist of a block of layers against a twist
//! frame (a face and a sign). One quarter turn of the frame is built as a
//! permutation of sticker slots, composed with itself for half and
//! counterclockwise turns, and then applied in one step. Validation happens
//! before anything moves.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use itertools::Itertools;
use nxcube_arena::Handle;

use crate::{
    ConsistencyViolation, Cube, FaceName, FaceSide, GeometryError, PartEdgeId, Sign,
};

/// Amount and sense of a turn, seen from outside the face or reference face
/// being turned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Quarter turn clockwise.
    Cw,
    /// Half turn.
    Half,
    /// Quarter turn counterclockwise.
    Ccw,
}
impl TryFrom<i32> for Direction {
    type Error = GeometryError;

    /// Converts a signed number of clockwise quarter turns. `-1` is
    /// counterclockwise; `2`, `-2`, `3`, and `-3` are also accepted.
    fn try_from(quarter_turns: i32) -> Result<Self, Self::Error> {
        if quarter_turns == 0 || !(-3..=3).contains(&quarter_turns) {
            return Err(GeometryError::InvalidDirection(quarter_turns));
        }
        Ok(match quarter_turns.rem_euclid(4) {
            1 => Direction::Cw,
            2 => Direction::Half,
            _ => Direction::Ccw,
        })
    }
}
impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Cw => Ok(()),
            Direction::Half => write!(f, "2"),
            Direction::Ccw => write!(f, "'"),
        }
    }
}
impl Direction {
    /// Returns the number of clockwise quarter turns, from 1 to 3.
    pub fn quarter_turns(self) -> u8 {
        match self {
            Direction::Cw => 1,
            Direction::Half => 2,
            Direction::Ccw => 3,
        }
    }
    /// Returns the direction that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Direction::Cw => Direction::Ccw,
            Direction::Half => Direction::Half,
            Direction::Ccw => Direction::Cw,
        }
    }
    /// Returns the direction as seen from the other end of the axis when
    /// `sign` is negative.
    fn signed(self, sign: Sign) -> Self {
        match sign {
            Sign::Pos => self,
            Sign::Neg => self.inverse(),
        }
    }
    /// Returns this direction applied `count` times, or `None` if that is the
    /// identity.
    pub fn repeated(self, count: u32) -> Option<Self> {
        let total = (self.quarter_turns() as u32 * (count % 4)) % 4;
        match total {
            0 => None,
            1 => Some(Direction::Cw),
            2 => Some(Direction::Half),
            _ => Some(Direction::Ccw),
        }
    }
}

/// Whole-cube rotation axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CubeAxis {
    /// Rotation following `R`.
    X,
    /// Rotation following `U`.
    Y,
    /// Rotation following `F`.
    Z,
}
impl fmt::Display for CubeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl FromStr for CubeAxis {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(CubeAxis::X),
            "y" => Ok(CubeAxis::Y),
            "z" => Ok(CubeAxis::Z),
            _ => Err(GeometryError::UnknownAxis(s.to_owned())),
        }
    }
}
impl CubeAxis {
    /// Returns the lowercase notation symbol for the axis.
    pub fn symbol(self) -> char {
        match self {
            CubeAxis::X => 'x',
            CubeAxis::Y => 'y',
            CubeAxis::Z => 'z',
        }
    }
    /// Returns the face whose clockwise turn the rotation follows.
    pub fn face(self) -> FaceName {
        match self {
            CubeAxis::X => FaceName::R,
            CubeAxis::Y => FaceName::U,
            CubeAxis::Z => FaceName::F,
        }
    }
}

/// Axis of inner-slice rotations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SliceAxis {
    /// Slices between `L` and `R`, turning like `L`.
    M,
    /// Slices between `D` and `U`, turning like `D`.
    E,
    /// Slices between `F` and `B`, turning like `F`.
    S,
}
impl fmt::Display for SliceAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl FromStr for SliceAxis {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(SliceAxis::M),
            "E" => Ok(SliceAxis::E),
            "S" => Ok(SliceAxis::S),
            _ => Err(GeometryError::UnknownAxis(s.to_owned())),
        }
    }
}
impl SliceAxis {
    /// Returns the uppercase notation symbol for the axis.
    pub fn symbol(self) -> char {
        match self {
            SliceAxis::M => 'M',
            SliceAxis::E => 'E',
            SliceAxis::S => 'S',
        }
    }
    /// Returns the face that slice layers are counted from and whose
    /// direction they follow.
    pub fn reference_face(self) -> FaceName {
        match self {
            SliceAxis::M => FaceName::L,
            SliceAxis::E => FaceName::D,
            SliceAxis::S => FaceName::F,
        }
    }
    /// Returns the twist frame of the axis.
    fn frame(self) -> TwistFrame {
        match self {
            SliceAxis::M => TwistFrame::new(FaceName::R, Sign::Neg),
            SliceAxis::E => TwistFrame::new(FaceName::U, Sign::Neg),
            SliceAxis::S => TwistFrame::new(FaceName::F, Sign::Pos),
        }
    }
}

/// Contiguous block of layers, inclusive at both ends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerRange {
    /// First layer.
    pub first: u16,
    /// Last layer.
    pub last: u16,
}
impl fmt::Display for LayerRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}..={}", self.first, self.last)
        }
    }
}
impl From<RangeInclusive<u16>> for LayerRange {
    fn from(range: RangeInclusive<u16>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}
impl LayerRange {
    /// Constructs a layer range.
    pub const fn new(first: u16, last: u16) -> Self {
        Self { first, last }
    }
    /// Constructs a range containing one layer.
    pub const fn single(layer: u16) -> Self {
        Self::new(layer, layer)
    }
    /// Returns whether the range contains `layer`.
    pub fn contains(self, layer: u16) -> bool {
        (self.first..=self.last).contains(&layer)
    }
    /// Returns an iterator over the layers in the range.
    pub fn iter(self) -> RangeInclusive<u16> {
        self.first..=self.last
    }

    pub(crate) fn check(self, target: impl fmt::Display, count: u16) -> Result<(), GeometryError> {
        if self.first <= self.last && self.last < count {
            Ok(())
        } else {
            Err(GeometryError::LayerOutOfRange {
                target: target.to_string(),
                first: self.first,
                last: self.last,
                count,
            })
        }
    }
    /// Returns the layers counted from the other end of an axis with `count`
    /// layers.
    fn flipped(self, count: u16) -> Self {
        Self::new(count - 1 - self.last, count - 1 - self.first)
    }
}

/// Positive-axis face and sign that a layer turn is expressed against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct TwistFrame {
    face: FaceName,
    sign: Sign,
}
impl TwistFrame {
    const fn new(face: FaceName, sign: Sign) -> Self {
        Self { face, sign }
    }
}

/// What was turned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RotationKind {
    /// Block of layers counted from a face. Layer 0 alone is a plain face
    /// turn.
    Face {
        /// Face turned.
        face: FaceName,
        /// Layers, counted from `face`.
        layers: LayerRange,
    },
    /// Block of inner slices.
    Slice {
        /// Slice axis.
        axis: SliceAxis,
        /// Slices, counted from the axis's reference face starting at 0.
        layers: LayerRange,
    },
    /// Whole cube.
    WholeCube {
        /// Rotation axis.
        axis: CubeAxis,
    },
}
impl fmt::Display for RotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationKind::Face { face, layers } => write!(f, "{face}[{layers}]"),
            RotationKind::Slice { axis, layers } => write!(f, "{axis}[{layers}]"),
            RotationKind::WholeCube { axis } => write!(f, "{axis}"),
        }
    }
}

/// Notification sent to subscribers after each completed rotation.
///
/// Carries the rotation both as requested and as resolved to a twist frame,
/// so an animation layer can turn the right stickers about the right axis
/// without re-deriving the geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RotationEvent {
    /// Rotation as requested.
    pub kind: RotationKind,
    /// Direction as requested.
    pub direction: Direction,
    /// Face the twist is expressed against.
    pub frame_face: FaceName,
    /// Direction seen from outside `frame_face`.
    pub frame_direction: Direction,
    /// Layers turned, counted from `frame_face`.
    pub depths: LayerRange,
    /// Modification count of the cube after the rotation.
    pub modification_count: u64,
}

/// Permutation of sticker slots: `source[dst]` is the slot whose contents
/// move into `dst`.
#[derive(Debug, Clone)]
struct StickerPermutation {
    source: Vec<PartEdgeId>,
}
impl StickerPermutation {
    fn identity(cube: &Cube) -> Self {
        Self {
            source: cube.part_edges.keys().collect(),
        }
    }
    fn send(&mut self, src: PartEdgeId, dst: PartEdgeId) {
        self.source[dst.to_index()] = src;
    }
    /// Returns `self` followed by `next`.
    fn then(&self, next: &Self) -> Self {
        Self {
            source: next
                .source
                .iter()
                .map(|&mid| self.source[mid.to_index()])
                .collect(),
        }
    }
    /// Returns `(src, dst)` for every slot whose contents change.
    fn moved<'a>(
        &'a self,
        cube: &'a Cube,
    ) -> impl 'a + Iterator<Item = (PartEdgeId, PartEdgeId)> {
        cube.part_edges
            .keys()
            .zip(&self.source)
            .filter(|&(dst, &src)| dst != src)
            .map(|(dst, &src)| (src, dst))
    }
}

impl Cube {
    /// Returns the number of inner slices along each axis, `N-2`.
    pub fn slice_layer_count(&self) -> u16 {
        self.size() - 2
    }

    /// Turns the outer layer of `face`.
    pub fn rotate_face(&mut self, face: FaceName, direction: Direction) {
        // Layer 0 exists on every cube.
        let kind = RotationKind::Face {
            face,
            layers: LayerRange::single(0),
        };
        let frame = TwistFrame::new(face, Sign::Pos);
        self.twist(kind, frame, LayerRange::single(0), direction);
    }

    /// Turns a block of layers counted from `face`, where layer 0 is the face
    /// itself. Turning layers `0..=1` is a wide turn.
    pub fn rotate_face_layers(
        &mut self,
        face: FaceName,
        layers: LayerRange,
        direction: Direction,
    ) -> Result<(), GeometryError> {
        layers.check(face, self.size())?;
        let kind = RotationKind::Face { face, layers };
        self.twist(kind, TwistFrame::new(face, Sign::Pos), layers, direction);
        Ok(())
    }

    /// Turns a block of inner slices. Slices are numbered from 0 starting
    /// next to the axis's reference face (`L` for `M`, `D` for `E`, `F` for
    /// `S`) and turn in the same direction as that face.
    pub fn rotate_slice(
        &mut self,
        axis: SliceAxis,
        layers: LayerRange,
        direction: Direction,
    ) -> Result<(), GeometryError> {
        layers.check(axis, self.slice_layer_count())?;
        let frame = axis.frame();
        // Depth from the reference face is one more than the slice index.
        let from_reference = LayerRange::new(layers.first + 1, layers.last + 1);
        let depths = if frame.face == axis.reference_face() {
            from_reference
        } else {
            from_reference.flipped(self.size())
        };
        self.twist(RotationKind::Slice { axis, layers }, frame, depths, direction);
        Ok(())
    }

    /// Rotates the whole cube.
    pub fn rotate_whole_cube(&mut self, axis: CubeAxis, direction: Direction) {
        let frame = TwistFrame::new(axis.face(), Sign::Pos);
        let depths = LayerRange::new(0, self.size() - 1);
        self.twist(RotationKind::WholeCube { axis }, frame, depths, direction);
    }

    /// Moves colors for an already-validated rotation, then bumps the
    /// modification count and notifies subscribers.
    fn twist(
        &mut self,
        kind: RotationKind,
        frame: TwistFrame,
        depths: LayerRange,
        direction: Direction,
    ) {
        let frame_direction = direction.signed(frame.sign);
        log::trace!("Rotating {kind}{direction} as {}[{depths}]{frame_direction}", frame.face);

        let quarter = self.quarter_turn(frame.face, depths);
        let mut total = quarter.clone();
        for _ in 1..frame_direction.quarter_turns() {
            total = total.then(&quarter);
        }
        self.apply_permutation(&total);

        self.modification_count += 1;
        let event = RotationEvent {
            kind,
            direction,
            frame_face: frame.face,
            frame_direction,
            depths,
            modification_count: self.modification_count,
        };
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    fn apply_permutation(&mut self, perm: &StickerPermutation) {
        let moves = perm.moved(self).collect_vec();
        let contents = moves
            .iter()
            .map(|&(src, _)| {
                let e = &mut self.part_edges[src];
                (e.color, std::mem::take(&mut e.attributes))
            })
            .collect_vec();
        for (&(_, dst), (color, attributes)) in std::iter::zip(&moves, contents) {
            let e = &mut self.part_edges[dst];
            e.color = color;
            e.attributes = attributes;
        }
    }

    /// Builds the permutation for one clockwise quarter turn, seen from
    /// `face`, of the layers at `depths`.
    fn quarter_turn(&self, face: FaceName, depths: LayerRange) -> StickerPermutation {
        let n = self.size();
        let mut perm = StickerPermutation::identity(self);

        if depths.contains(0) {
            let grid = &self.faces[face];
            for (row, col) in (0..n).cartesian_product(0..n) {
                perm.send(grid.sticker(row, col), grid.sticker(n - 1 - col, row));
            }
        }
        if depths.contains(n - 1) {
            // Clockwise from `face` is counterclockwise from its opposite.
            let grid = &self.faces[face.opposite()];
            for (row, col) in (0..n).cartesian_product(0..n) {
                perm.send(grid.sticker(row, col), grid.sticker(col, n - 1 - row));
            }
        }

        for depth in depths.iter() {
            let strips = FaceSide::CYCLE.map(|side| self.ring_strip(face, side, depth));
            self.check_ring_alignment(face, &strips);
            for (i, side) in FaceSide::CYCLE.into_iter().enumerate() {
                let next = &strips[(i + 1) % 4];
                for (ltr, &src) in strips[i].iter().enumerate() {
                    let dst = next[side.ltr_after_cw(ltr as u16, n) as usize];
                    perm.send(src, dst);
                }
            }
        }

        perm
    }

    /// Returns the stickers on the neighbor across `side` of `face` that lie
    /// `depth` layers in from `face`, indexed by `face`'s own ltr along
    /// `side`.
    fn ring_strip(&self, face: FaceName, side: FaceSide, depth: u16) -> Vec<PartEdgeId> {
        let n = self.size();
        let neighbor = face.neighbor(side);
        let edge = self.adjacent_edge(face, neighbor);
        let neighbor_side = match neighbor.side_toward(face) {
            Some(s) => s,
            None => unreachable!("{neighbor} borders {face}"),
        };
        let grid = &self.faces[neighbor];
        (0..n)
            .map(|ltr| {
                let (row, col) = neighbor_side.cell(n, depth, edge.translate_line(face, ltr, n));
                grid.sticker(row, col)
            })
            .collect()
    }

    /// Checks that consecutive strips of a ring meet across the edge between
    /// their faces. Panics with a dump of the cube if they do not.
    fn check_ring_alignment(&self, face: FaceName, strips: &[Vec<PartEdgeId>; 4]) {
        let n = self.size();
        let far = (n - 1) as usize;
        // Index of the end of each strip that touches the next strip, and of
        // the start of the next strip that touches it.
        let meeting_points = [(far, 0), (far, far), (0, far), (0, 0)];
        for (i, side) in FaceSide::CYCLE.into_iter().enumerate() {
            let from = face.neighbor(side);
            let to = face.neighbor(side.next_cw());
            let (out_index, in_index) = meeting_points[i];
            let a = &self.part_edges[strips[i][out_index]];
            let b = &self.part_edges[strips[(i + 1) % 4][in_index]];

            let edge = self.adjacent_edge(from, to);
            let (Some(side_a), Some(side_b)) = (from.side_toward(to), to.side_toward(from))
            else {
                unreachable!("{from} and {to} are adjacent");
            };
            let from_ltr = side_a.ltr_of(a.row, a.col);
            let expected = edge.translate_line(from, from_ltr, n);
            let actual = side_b.ltr_of(b.row, b.col);
            if expected != actual {
                let violation = ConsistencyViolation::SliceAlignment {
                    from,
                    to,
                    from_ltr,
                    expected,
                    actual,
                };
                panic!("{violation}\n{self}");
            }
        }
    }
}
