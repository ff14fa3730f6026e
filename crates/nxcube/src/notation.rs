//! Move notation.
//!
//! Supported syntax, separated by whitespace in an algorithm:
//!
//! - Face turns: `R`, `U'`, `F2`
//! - Wide turns: `Rw` (two layers), `3Rw'` (three layers), `2-3Rw` (layers 2
//!   through 3)
//! - Single inner layers: `2R` (the second layer from `R`)
//! - Slices: `M`, `E2`, `S'` (the middle slice or slices), `2M` (the second
//!   slice from `L`), `1-2M`
//! - Whole-cube rotations: `x`, `y'`, `z2`
//!
//! Layer numbers in notation start at 1.

use std::fmt;
use std::str::FromStr;

use chumsky::prelude::*;
use itertools::Itertools;
use thiserror::Error;

use crate::{CubeAxis, Cube, Direction, FaceName, GeometryError, LayerRange, SliceAxis};

type ParseExtra<'src> = extra::Err<Rich<'src, char>>;

/// Trait alias for parser.
trait NotationParser<'src, O>: Clone + Parser<'src, &'src str, O, ParseExtra<'src>> {}
impl<'src, O, T> NotationParser<'src, O> for T where
    T: Clone + Parser<'src, &'src str, O, ParseExtra<'src>>
{
}

/// Error produced while parsing a move or algorithm.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    /// Input does not match the notation grammar
    #[error("syntax error at position {position}: {message}")]
    Syntax {
        /// Byte offset of the error.
        position: usize,
        /// Description from the parser.
        message: String,
    },
    /// Layer numbers start at 1
    #[error("layer 0 does not exist; layers are numbered from 1")]
    ZeroLayer,
    /// Layer range runs backwards
    #[error("layer range {first}-{last} runs backwards")]
    BackwardsRange {
        /// First layer as written.
        first: u16,
        /// Last layer as written.
        last: u16,
    },
    /// Whole-cube rotations always turn every layer
    #[error("cube rotation {0} does not take a layer prefix")]
    RotationWithLayers(CubeAxis),
    /// Invalid face, axis, or amount
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Single move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    /// Block of layers counted from a face, starting at 0.
    Face {
        /// Face turned.
        face: FaceName,
        /// Layers, counted from `face` starting at 0.
        layers: LayerRange,
        /// Direction seen from outside `face`.
        direction: Direction,
    },
    /// Block of inner slices.
    Slice {
        /// Slice axis.
        axis: SliceAxis,
        /// Slices counted from the axis's reference face starting at 0, or
        /// `None` for the middle slice (or two middle slices on an even
        /// cube).
        layers: Option<LayerRange>,
        /// Direction seen from outside the axis's reference face.
        direction: Direction,
    },
    /// Whole-cube rotation.
    Rotation {
        /// Rotation axis.
        axis: CubeAxis,
        /// Direction seen from outside the axis's face.
        direction: Direction,
    },
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Face {
                face,
                layers,
                direction,
            } => {
                match (layers.first, layers.last) {
                    (0, 0) => write!(f, "{face}")?,
                    (0, 1) => write!(f, "{face}w")?,
                    (0, last) => write!(f, "{}{face}w", last + 1)?,
                    (first, last) if first == last => write!(f, "{}{face}", first + 1)?,
                    (first, last) => write!(f, "{}-{}{face}w", first + 1, last + 1)?,
                }
                write!(f, "{direction}")
            }
            Move::Slice {
                axis,
                layers,
                direction,
            } => {
                match layers {
                    None => (),
                    Some(l) if l.first == l.last => write!(f, "{}", l.first + 1)?,
                    Some(l) => write!(f, "{}-{}", l.first + 1, l.last + 1)?,
                }
                write!(f, "{axis}{direction}")
            }
            Move::Rotation { axis, direction } => write!(f, "{axis}{direction}"),
        }
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = raw_move()
            .padded()
            .parse(s)
            .into_result()
            .map_err(first_syntax_error)?;
        raw.resolve()
    }
}

impl Move {
    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Move::Face {
                face,
                layers,
                direction,
            } => Move::Face {
                face,
                layers,
                direction: direction.inverse(),
            },
            Move::Slice {
                axis,
                layers,
                direction,
            } => Move::Slice {
                axis,
                layers,
                direction: direction.inverse(),
            },
            Move::Rotation { axis, direction } => Move::Rotation {
                axis,
                direction: direction.inverse(),
            },
        }
    }

    /// Returns the direction of the move.
    pub fn direction(self) -> Direction {
        match self {
            Move::Face { direction, .. }
            | Move::Slice { direction, .. }
            | Move::Rotation { direction, .. } => direction,
        }
    }

    /// Checks that the move's layers exist on `cube`.
    pub fn check(self, cube: &Cube) -> Result<(), GeometryError> {
        match self {
            Move::Face { face, layers, .. } => layers.check(face, cube.size()),
            Move::Slice { axis, layers, .. } => {
                let count = cube.slice_layer_count();
                layers.unwrap_or(middle_slices(count)).check(axis, count)
            }
            Move::Rotation { .. } => Ok(()),
        }
    }
}

/// Returns the middle slice, or the two middle slices when there is an even
/// number of them.
fn middle_slices(count: u16) -> LayerRange {
    match count {
        0 => LayerRange::single(0),
        _ if count % 2 == 1 => LayerRange::single(count / 2),
        _ => LayerRange::new(count / 2 - 1, count / 2),
    }
}

impl Cube {
    /// Applies a move.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GeometryError> {
        match mv {
            Move::Face {
                face,
                layers,
                direction,
            } => self.rotate_face_layers(face, layers, direction),
            Move::Slice {
                axis,
                layers,
                direction,
            } => {
                let layers = layers.unwrap_or(middle_slices(self.slice_layer_count()));
                self.rotate_slice(axis, layers, direction)
            }
            Move::Rotation { axis, direction } => {
                self.rotate_whole_cube(axis, direction);
                Ok(())
            }
        }
    }
}

/// Sequence of moves.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Algorithm(pub Vec<Move>);

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl FromStr for Algorithm {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw_moves = raw_move()
            .separated_by(text::whitespace().at_least(1))
            .collect::<Vec<_>>()
            .padded()
            .parse(s)
            .into_result()
            .map_err(first_syntax_error)?;
        raw_moves
            .into_iter()
            .map(RawMove::resolve)
            .collect::<Result<_, _>>()
            .map(Algorithm)
    }
}

impl Algorithm {
    /// Returns the number of moves.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns whether there are no moves.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the algorithm that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self(self.0.iter().rev().map(|mv| mv.inverse()).collect())
    }
    /// Returns this algorithm repeated `count` times.
    #[must_use]
    pub fn repeated(&self, count: usize) -> Self {
        Self(self.0.repeat(count))
    }

    /// Applies every move to `cube`. Every move is checked first, so the cube
    /// is unchanged if any move is invalid for it.
    pub fn apply(&self, cube: &mut Cube) -> Result<(), GeometryError> {
        for &mv in &self.0 {
            mv.check(cube)?;
        }
        for &mv in &self.0 {
            cube.apply_move(mv)?;
        }
        Ok(())
    }
}

fn first_syntax_error(errors: Vec<Rich<'_, char>>) -> ParseMoveError {
    match errors.into_iter().next() {
        Some(e) => ParseMoveError::Syntax {
            position: e.span().start,
            message: e.to_string(),
        },
        None => ParseMoveError::Syntax {
            position: 0,
            message: "invalid notation".to_owned(),
        },
    }
}

/// Move as written, before layer numbers are checked.
#[derive(Debug, Clone)]
struct RawMove {
    layers: Option<(u16, Option<u16>)>,
    body: RawBody,
    count: Option<u16>,
    prime: bool,
}

#[derive(Debug, Copy, Clone)]
enum RawBody {
    Face { face: char, wide: bool },
    Slice(char),
    Rotation(char),
}

impl RawMove {
    fn resolve(self) -> Result<Move, ParseMoveError> {
        let turns = i32::from(self.count.unwrap_or(1)) * if self.prime { -1 } else { 1 };
        let direction = Direction::try_from(turns)?;

        let layers = match self.layers {
            None => None,
            Some((0, _)) | Some((_, Some(0))) => return Err(ParseMoveError::ZeroLayer),
            Some((first, Some(last))) if first > last => {
                return Err(ParseMoveError::BackwardsRange { first, last });
            }
            Some((first, last)) => Some((first - 1, last.map(|l| l - 1))),
        };

        Ok(match self.body {
            RawBody::Face { face, wide } => {
                let face = face.to_string().parse::<FaceName>()?;
                let layers = match (layers, wide) {
                    (None, false) => LayerRange::single(0),
                    (None, true) => LayerRange::new(0, 1),
                    (Some((layer, None)), false) => LayerRange::single(layer),
                    (Some((depth, None)), true) => LayerRange::new(0, depth),
                    (Some((first, Some(last))), _) => LayerRange::new(first, last),
                };
                Move::Face {
                    face,
                    layers,
                    direction,
                }
            }
            RawBody::Slice(axis) => Move::Slice {
                axis: axis.to_string().parse::<SliceAxis>()?,
                layers: layers.map(|(first, last)| LayerRange::new(first, last.unwrap_or(first))),
                direction,
            },
            RawBody::Rotation(axis) => {
                let axis = axis.to_string().parse::<CubeAxis>()?;
                if layers.is_some() {
                    return Err(ParseMoveError::RotationWithLayers(axis));
                }
                Move::Rotation { axis, direction }
            }
        })
    }
}

fn raw_move<'src>() -> impl NotationParser<'src, RawMove> {
    let layer_prefix = uint().then(just('-').ignore_then(uint()).or_not());

    let body = choice((
        one_of("RLUDFB")
            .then(just('w').or_not())
            .map(|(face, w)| RawBody::Face {
                face,
                wide: w.is_some(),
            }),
        one_of("MES").map(RawBody::Slice),
        one_of("xyz").map(RawBody::Rotation),
    ))
    .labelled("face, slice, or rotation");

    let amount = uint().or_not().then(just('\'').or_not());

    layer_prefix
        .or_not()
        .then(body)
        .then(amount)
        .map(|((layers, body), (count, prime))| RawMove {
            layers,
            body,
            count,
            prime: prime.is_some(),
        })
        .labelled("move")
}

/// Unsigned integer parser
fn uint<'src>() -> impl NotationParser<'src, u16> {
    one_of('0'..='9')
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map_with(|s: &str, e| s.parse().map_err(|err| Rich::custom(e.span(), err)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::FaceName::*;

    fn face_move(face: FaceName, first: u16, last: u16, direction: Direction) -> Move {
        Move::Face {
            face,
            layers: LayerRange::new(first, last),
            direction,
        }
    }

    #[test]
    fn test_parse_moves() {
        let cases = [
            ("R", face_move(R, 0, 0, Direction::Cw)),
            ("U'", face_move(U, 0, 0, Direction::Ccw)),
            ("F2", face_move(F, 0, 0, Direction::Half)),
            ("F2'", face_move(F, 0, 0, Direction::Half)),
            ("Rw", face_move(R, 0, 1, Direction::Cw)),
            ("3Rw'", face_move(R, 0, 2, Direction::Ccw)),
            ("2R", face_move(R, 1, 1, Direction::Cw)),
            ("2-3Lw2", face_move(L, 1, 2, Direction::Half)),
            (
                "M",
                Move::Slice {
                    axis: SliceAxis::M,
                    layers: None,
                    direction: Direction::Cw,
                },
            ),
            (
                "2E2",
                Move::Slice {
                    axis: SliceAxis::E,
                    layers: Some(LayerRange::single(1)),
                    direction: Direction::Half,
                },
            ),
            (
                "y'",
                Move::Rotation {
                    axis: CubeAxis::Y,
                    direction: Direction::Ccw,
                },
            ),
        ];
        for (s, expected) in cases {
            assert_eq!(s.parse::<Move>(), Ok(expected), "{s}");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("0R".parse::<Move>(), Err(ParseMoveError::ZeroLayer));
        assert_eq!(
            "3-2Rw".parse::<Move>(),
            Err(ParseMoveError::BackwardsRange { first: 3, last: 2 }),
        );
        assert_eq!(
            "2x".parse::<Move>(),
            Err(ParseMoveError::RotationWithLayers(CubeAxis::X)),
        );
        assert_eq!(
            "R4".parse::<Move>(),
            Err(ParseMoveError::Geometry(GeometryError::InvalidDirection(4))),
        );
        assert!(matches!("Q".parse::<Move>(), Err(ParseMoveError::Syntax { .. })));
        assert!(matches!(
            "R U Q".parse::<Algorithm>(),
            Err(ParseMoveError::Syntax { .. }),
        ));
    }

    #[test]
    fn test_algorithm_inverse() {
        let alg: Algorithm = "R U2 3Rw' M x".parse().unwrap();
        assert_eq!(alg.len(), 5);
        assert_eq!(alg.inverse().to_string(), "x' M' 3Rw U2 R'");
        assert_eq!(alg.repeated(2).len(), 10);
        assert_eq!(" ".parse::<Algorithm>(), Ok(Algorithm::default()));
    }

    #[test]
    fn test_algorithm_then_inverse_is_identity() {
        let mut cube = Cube::new(5).unwrap();
        let alg: Algorithm = "R U' 2-3Fw M2 E S' y 2L z' Bw".parse().unwrap();
        let before = cube.color_state();
        alg.apply(&mut cube).unwrap();
        assert_ne!(cube.color_state(), before);
        alg.inverse().apply(&mut cube).unwrap();
        assert_eq!(cube.color_state(), before);
    }

    #[test]
    fn test_invalid_algorithm_leaves_cube_unchanged() {
        let mut cube = Cube::new(3).unwrap();
        let alg: Algorithm = "R U 4Rw".parse().unwrap();
        assert!(alg.apply(&mut cube).is_err());
        assert!(cube.is_solved());
        assert_eq!(cube.modification_count(), 0);
    }

    #[test]
    fn test_middle_slices() {
        assert_eq!(middle_slices(3), LayerRange::single(1));
        assert_eq!(middle_slices(4), LayerRange::new(1, 2));
        assert_eq!(middle_slices(1), LayerRange::single(0));
    }

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Cw), Just(Direction::Half), Just(Direction::Ccw)]
    }

    fn arb_layers() -> impl Strategy<Value = LayerRange> {
        (0..8_u16, 0..4_u16).prop_map(|(first, extra)| LayerRange::new(first, first + extra))
    }

    fn arb_move() -> impl Strategy<Value = Move> {
        prop_oneof![
            (0..6_usize, arb_layers(), arb_direction()).prop_map(|(i, layers, direction)| {
                Move::Face {
                    face: [R, L, U, D, F, B][i],
                    layers,
                    direction,
                }
            }),
            (0..3_usize, proptest::option::of(arb_layers()), arb_direction()).prop_map(
                |(i, layers, direction)| Move::Slice {
                    axis: [SliceAxis::M, SliceAxis::E, SliceAxis::S][i],
                    layers,
                    direction,
                }
            ),
            (0..3_usize, arb_direction()).prop_map(|(i, direction)| Move::Rotation {
                axis: [CubeAxis::X, CubeAxis::Y, CubeAxis::Z][i],
                direction,
            }),
        ]
    }

    proptest! {
        #[test]
        fn proptest_move_notation_roundtrip(mv in arb_move()) {
            prop_assert_eq!(mv.to_string().parse::<Move>(), Ok(mv));
        }

        #[test]
        fn proptest_algorithm_notation_roundtrip(moves in proptest::collection::vec(arb_move(), 0..12)) {
            let alg = Algorithm(moves);
            prop_assert_eq!(alg.to_string().parse::<Algorithm>(), Ok(alg));
        }
    }
}
