use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{CubeAxis, Direction, FaceName, LayerRange, Move, SliceAxis};

mod scenarios;
mod tracking;

const FACES: [FaceName; 6] = [
    FaceName::R,
    FaceName::L,
    FaceName::U,
    FaceName::D,
    FaceName::F,
    FaceName::B,
];
const DIRECTIONS: [Direction; 3] = [Direction::Cw, Direction::Half, Direction::Ccw];
const CUBE_AXES: [CubeAxis; 3] = [CubeAxis::X, CubeAxis::Y, CubeAxis::Z];
const SLICE_AXES: [SliceAxis; 3] = [SliceAxis::M, SliceAxis::E, SliceAxis::S];

fn init_logging() {
    // Fails if another test already installed the logger.
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn random_direction(rng: &mut impl Rng) -> Direction {
    DIRECTIONS[rng.random_range(0..DIRECTIONS.len())]
}

fn random_layers(rng: &mut impl Rng, count: u16) -> LayerRange {
    let first = rng.random_range(0..count);
    let last = rng.random_range(first..count);
    LayerRange::new(first, last)
}

/// Returns a random move that is valid on a cube of `size`.
fn random_move(rng: &mut impl Rng, size: u16) -> Move {
    let direction = random_direction(rng);
    match rng.random_range(0..3) {
        0 => Move::Face {
            face: FACES[rng.random_range(0..FACES.len())],
            layers: random_layers(rng, size),
            direction,
        },
        1 if size > 2 => Move::Slice {
            axis: SLICE_AXES[rng.random_range(0..SLICE_AXES.len())],
            layers: Some(random_layers(rng, size - 2)),
            direction,
        },
        _ => random_rotation_or_slice(rng, size),
    }
}

/// Returns a random whole-cube rotation or, on cubes with inner slices, a
/// random slice turn.
fn random_rotation_or_slice(rng: &mut impl Rng, size: u16) -> Move {
    let direction = random_direction(rng);
    if size > 2 && rng.random_bool(0.5) {
        Move::Slice {
            axis: SLICE_AXES[rng.random_range(0..SLICE_AXES.len())],
            layers: Some(random_layers(rng, size - 2)),
            direction,
        }
    } else {
        Move::Rotation {
            axis: CUBE_AXES[rng.random_range(0..CUBE_AXES.len())],
            direction,
        }
    }
}
