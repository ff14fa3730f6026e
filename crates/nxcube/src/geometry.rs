//! Faces, face sides, and the fixed 3D frame that every face-local coordinate
//! is derived from.
//!
//! The cube sits in a right-handed frame: +X points right, +Y points up, and
//! +Z points toward the viewer. Each face has a `right` and `up` vector as seen
//! from outside the cube; its sticker grid is indexed `(row, col)` with row 0
//! at the bottom and col 0 at the left.

use std::fmt;
use std::ops::{Index, IndexMut, Neg};
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::GeometryError;

/// Integer 3D vector.
pub(crate) type Vec3 = [i32; 3];

pub(crate) fn dot(a: Vec3, b: Vec3) -> i32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
pub(crate) fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
pub(crate) fn scale(v: Vec3, s: i32) -> Vec3 {
    v.map(|x| x * s)
}
pub(crate) fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Positive or negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    Pos = 1,
}
impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Sign {
    /// Returns an integer representation of the sign (either -1 or 1).
    pub const fn int(self) -> i32 {
        self as i32
    }
}

/// 3-dimensional axis.
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl Axis {
    /// Returns the unit vector along this axis.
    pub(crate) fn unit(self) -> Vec3 {
        let mut ret = [0; 3];
        ret[self as usize] = 1;
        ret
    }
    /// Returns the face on the positive end of this axis.
    pub fn positive_face(self) -> FaceName {
        match self {
            Axis::X => FaceName::R,
            Axis::Y => FaceName::U,
            Axis::Z => FaceName::F,
        }
    }
}

/// Structural name of one of the six face slots.
///
/// Faces are never identified by color; a face keeps its name no matter what
/// stickers are on it.
#[derive(
    EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum FaceName {
    /// Right face (+X).
    #[serde(rename = "right")]
    R = 0,
    /// Left face (-X).
    #[serde(rename = "left")]
    L = 1,
    /// Up face (+Y).
    #[serde(rename = "up")]
    U = 2,
    /// Down face (-Y).
    #[serde(rename = "down")]
    D = 3,
    /// Front face (+Z).
    #[serde(rename = "front")]
    F = 4,
    /// Back face (-Z).
    #[serde(rename = "back")]
    B = 5,
}
impl fmt::Display for FaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl FromStr for FaceName {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FaceName::iter()
            .find(|face| {
                s.eq_ignore_ascii_case(face.name()) || s == face.symbol().to_string()
            })
            .ok_or_else(|| GeometryError::UnknownFace(s.to_owned()))
    }
}
impl FaceName {
    /// Number of faces on a cube.
    pub const COUNT: usize = 6;

    /// Returns the index of the face, from 0 to 5.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        use FaceName::*;

        match self {
            R | L => Axis::X,
            U | D => Axis::Y,
            F | B => Axis::Z,
        }
    }
    /// Returns which end of its axis the face is on.
    pub fn sign(self) -> Sign {
        use FaceName::*;

        match self {
            R | U | F => Sign::Pos,
            L | D | B => Sign::Neg,
        }
    }
    /// Returns the face on the other end of the same axis.
    #[must_use]
    pub fn opposite(self) -> Self {
        use FaceName::*;

        match self {
            R => L,
            L => R,
            U => D,
            D => U,
            F => B,
            B => F,
        }
    }

    /// Returns the single-letter symbol for the face.
    pub fn symbol(self) -> char {
        use FaceName::*;

        match self {
            R => 'R',
            L => 'L',
            U => 'U',
            D => 'D',
            F => 'F',
            B => 'B',
        }
    }
    /// Returns the lowercase name of the face.
    pub fn name(self) -> &'static str {
        use FaceName::*;

        match self {
            R => "right",
            L => "left",
            U => "up",
            D => "down",
            F => "front",
            B => "back",
        }
    }

    /// Returns the outward unit normal of the face.
    pub(crate) fn normal(self) -> Vec3 {
        scale(self.axis().unit(), self.sign().int())
    }
    /// Returns the direction of increasing column, seen from outside.
    pub(crate) fn right(self) -> Vec3 {
        use FaceName::*;

        match self {
            R => [0, 0, -1],
            L => [0, 0, 1],
            U | D | F => [1, 0, 0],
            B => [-1, 0, 0],
        }
    }
    /// Returns the direction of increasing row, seen from outside.
    pub(crate) fn up(self) -> Vec3 {
        use FaceName::*;

        match self {
            R | L | F | B => [0, 1, 0],
            U => [0, 0, -1],
            D => [0, 0, 1],
        }
    }

    /// Returns the face whose outward normal is `v`, if any.
    pub(crate) fn from_normal(v: Vec3) -> Option<Self> {
        FaceName::iter().find(|face| face.normal() == v)
    }

    /// Returns the face across the given side of this one.
    pub fn neighbor(self, side: FaceSide) -> FaceName {
        FaceName::from_normal(side.outward(self)).expect("face frames are orthonormal")
    }
    /// Returns the side of this face that borders `other`, or `None` if the
    /// faces are equal or opposite.
    pub fn side_toward(self, other: FaceName) -> Option<FaceSide> {
        FaceSide::CYCLE
            .into_iter()
            .find(|&side| self.neighbor(side) == other)
    }
}

/// One of the four sides of a face, seen from outside the cube.
///
/// Sides are listed in clockwise order starting from the left, which is the
/// order stickers travel in under a clockwise face turn.
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaceSide {
    /// Column 0.
    Left,
    /// Row `N-1`.
    Top,
    /// Column `N-1`.
    Right,
    /// Row 0.
    Bottom,
}
impl FaceSide {
    /// All sides in clockwise order.
    pub const CYCLE: [FaceSide; 4] = [
        FaceSide::Left,
        FaceSide::Top,
        FaceSide::Right,
        FaceSide::Bottom,
    ];

    /// Returns the side that stickers on this side move to under a
    /// clockwise turn.
    #[must_use]
    pub fn next_cw(self) -> FaceSide {
        match self {
            FaceSide::Left => FaceSide::Top,
            FaceSide::Top => FaceSide::Right,
            FaceSide::Right => FaceSide::Bottom,
            FaceSide::Bottom => FaceSide::Left,
        }
    }

    /// Returns whether the side runs left-to-right (top and bottom), so that
    /// its ltr coordinate is a column index.
    pub fn is_horizontal(self) -> bool {
        matches!(self, FaceSide::Top | FaceSide::Bottom)
    }

    /// Returns the direction pointing out of `face` across this side.
    pub(crate) fn outward(self, face: FaceName) -> Vec3 {
        match self {
            FaceSide::Left => scale(face.right(), -1),
            FaceSide::Top => face.up(),
            FaceSide::Right => face.right(),
            FaceSide::Bottom => scale(face.up(), -1),
        }
    }
    /// Returns the direction of increasing ltr along this side of `face`.
    pub(crate) fn ltr_direction(self, face: FaceName) -> Vec3 {
        if self.is_horizontal() {
            face.right()
        } else {
            face.up()
        }
    }

    /// Returns the `(row, col)` of the cell at `depth` rows or columns in from
    /// this side and at position `ltr` along it.
    pub fn cell(self, size: u16, depth: u16, ltr: u16) -> (u16, u16) {
        let far = size - 1;
        match self {
            FaceSide::Left => (ltr, depth),
            FaceSide::Top => (far - depth, ltr),
            FaceSide::Right => (ltr, far - depth),
            FaceSide::Bottom => (depth, ltr),
        }
    }
    /// Returns the ltr coordinate of `(row, col)` along this side.
    pub fn ltr_of(self, row: u16, col: u16) -> u16 {
        if self.is_horizontal() { col } else { row }
    }

    /// Returns the ltr, along [`Self::next_cw()`], of the sticker at `ltr`
    /// along this side after a clockwise quarter turn of a face of width
    /// `size`.
    ///
    /// Left to top and right to bottom keep the coordinate; top to right and
    /// bottom to left reverse it.
    pub fn ltr_after_cw(self, ltr: u16, size: u16) -> u16 {
        match self {
            FaceSide::Left | FaceSide::Right => ltr,
            FaceSide::Top | FaceSide::Bottom => size - 1 - ltr,
        }
    }
}

/// Array with one value per face, indexed by [`FaceName`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PerFace<T>(pub(crate) [T; FaceName::COUNT]);
impl<T> Index<FaceName> for PerFace<T> {
    type Output = T;

    fn index(&self, face: FaceName) -> &Self::Output {
        &self.0[face.index()]
    }
}
impl<T> IndexMut<FaceName> for PerFace<T> {
    fn index_mut(&mut self, face: FaceName) -> &mut Self::Output {
        &mut self.0[face.index()]
    }
}
impl<T> PerFace<T> {
    /// Constructs a value for each face using `f`.
    pub fn from_fn(mut f: impl FnMut(FaceName) -> T) -> Self {
        Self(std::array::from_fn(|i| f(face_from_index(i))))
    }
    /// Returns an iterator over face-value pairs, in face order.
    pub fn iter(&self) -> impl Iterator<Item = (FaceName, &T)> {
        FaceName::iter().zip(&self.0)
    }
    /// Returns an iterator over the values, in face order.
    pub fn values(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
    /// Applies a function to each value.
    pub fn map<U>(self, mut f: impl FnMut(FaceName, T) -> U) -> PerFace<U> {
        let mut i = 0;
        PerFace(self.0.map(|value| {
            let face = face_from_index(i);
            i += 1;
            f(face, value)
        }))
    }
}

fn face_from_index(i: usize) -> FaceName {
    FaceName::iter()
        .nth(i)
        .expect("per-face index out of range")
}

bitflags! {
    /// Set of faces, used as a part's structural identity.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct FaceSet: u8 {
        /// Right face.
        const R = 1 << 0;
        /// Left face.
        const L = 1 << 1;
        /// Up face.
        const U = 1 << 2;
        /// Down face.
        const D = 1 << 3;
        /// Front face.
        const F = 1 << 4;
        /// Back face.
        const B = 1 << 5;
    }
}
impl From<FaceName> for FaceSet {
    fn from(face: FaceName) -> Self {
        FaceSet::from_bits_retain(1 << face as u8)
    }
}
impl FromIterator<FaceName> for FaceSet {
    fn from_iter<I: IntoIterator<Item = FaceName>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FaceSet::empty(), |set, face| set | FaceSet::from(face))
    }
}
impl FaceSet {
    /// Returns whether the set contains `face`.
    pub fn has(self, face: FaceName) -> bool {
        self.contains(face.into())
    }
    /// Returns an iterator over the faces in the set, in face order.
    pub fn faces(self) -> impl Iterator<Item = FaceName> {
        FaceName::iter().filter(move |&face| self.has(face))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_face_frames_are_right_handed() {
        for face in FaceName::iter() {
            assert_eq!(cross(face.right(), face.up()), face.normal(), "{face}");
        }
    }

    #[test]
    fn test_neighbors() {
        use FaceName::*;

        let f_neighbors = FaceSide::CYCLE.map(|side| F.neighbor(side));
        assert_eq!(f_neighbors, [L, U, R, D]);
        assert_eq!(U.neighbor(FaceSide::Top), B);
        assert_eq!(U.neighbor(FaceSide::Bottom), F);
        assert_eq!(D.neighbor(FaceSide::Top), F);
        assert_eq!(B.neighbor(FaceSide::Left), R);
        for face in FaceName::iter() {
            assert_eq!(face.side_toward(face), None);
            assert_eq!(face.side_toward(face.opposite()), None);
            for side in FaceSide::CYCLE {
                let other = face.neighbor(side);
                assert_eq!(face.side_toward(other), Some(side));
                assert!(other.side_toward(face).is_some());
            }
        }
    }

    #[test]
    fn test_cell_roundtrips_through_ltr() {
        let size = 5;
        for side in FaceSide::CYCLE {
            for depth in 0..size {
                for ltr in 0..size {
                    let (row, col) = side.cell(size, depth, ltr);
                    assert_eq!(side.ltr_of(row, col), ltr);
                }
            }
        }
    }

    #[test]
    fn test_parse_face_name() {
        assert_eq!("R".parse::<FaceName>(), Ok(FaceName::R));
        assert_eq!("front".parse::<FaceName>(), Ok(FaceName::F));
        assert_eq!("Down".parse::<FaceName>(), Ok(FaceName::D));
        assert_eq!(
            "sideways".parse::<FaceName>(),
            Err(GeometryError::UnknownFace("sideways".to_owned())),
        );
    }

    #[test]
    fn test_face_set() {
        let set: FaceSet = [FaceName::U, FaceName::F, FaceName::R].into_iter().collect();
        assert_eq!(
            set.faces().collect::<Vec<_>>(),
            vec![FaceName::R, FaceName::U, FaceName::F],
        );
        assert!(set.has(FaceName::U));
        assert!(!set.has(FaceName::D));
    }
}
