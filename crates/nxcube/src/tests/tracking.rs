use itertools::Itertools;
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;

use super::*;
use crate::{Color, Cube, FaceColorTracker};

fn scrambled(size: u16, seed: u64) -> Cube {
    let mut rng = rng(seed);
    let mut cube = Cube::new(size).unwrap();
    for _ in 0..40 {
        cube.apply_move(random_move(&mut rng, size)).unwrap();
    }
    cube
}

fn assert_all_colors_distinct(tracker: &FaceColorTracker, cube: &Cube) {
    let colors = tracker.face_colors(cube);
    let distinct = colors.values().copied().sorted().dedup().collect_vec();
    assert_eq!(distinct, Color::iter().collect_vec(), "{colors:?}");
}

#[test]
fn test_tracker_is_stable_under_slices_and_rotations() {
    init_logging();
    for n in [4, 5, 6] {
        let mut rng = rng(50 + n as u64);
        let mut cube = scrambled(n, n as u64);
        let tracker = FaceColorTracker::track(&mut cube).unwrap();
        assert_all_colors_distinct(&tracker, &cube);

        for _ in 0..50 {
            let mv = random_rotation_or_slice(&mut rng, n);
            cube.apply_move(mv).unwrap();
            assert_all_colors_distinct(&tracker, &cube);
        }
    }
}

#[test]
fn test_outer_turns_keep_face_colors() {
    let mut cube = scrambled(4, 9);
    let tracker = FaceColorTracker::track(&mut cube).unwrap();
    let before = tracker.face_colors(&cube);
    for face in FACES {
        cube.rotate_face(face, Direction::Cw);
        assert_eq!(tracker.face_colors(&cube), before, "after {face}");
    }
}

#[test]
fn test_whole_cube_rotation_permutes_face_colors() {
    let mut cube = scrambled(6, 3);
    let tracker = FaceColorTracker::track(&mut cube).unwrap();
    let before = tracker.face_colors(&cube);

    cube.rotate_whole_cube(CubeAxis::Y, Direction::Cw);
    let after = tracker.face_colors(&cube);
    assert_eq!(after[FaceName::F], before[FaceName::R]);
    assert_eq!(after[FaceName::L], before[FaceName::F]);
    assert_eq!(after[FaceName::U], before[FaceName::U]);
    assert_eq!(after[FaceName::D], before[FaceName::D]);
}

#[test]
fn test_solved_parts_match_target_after_rotations() {
    let mut rng = rng(1);
    let mut cube = Cube::new(4).unwrap();
    let tracker = FaceColorTracker::track(&mut cube).unwrap();
    for _ in 0..20 {
        let mv = Move::Rotation {
            axis: CUBE_AXES[rng.random_range(0..CUBE_AXES.len())],
            direction: random_direction(&mut rng),
        };
        cube.apply_move(mv).unwrap();
        let parts = cube.all_parts().map(|p| p.id()).collect_vec();
        assert!(parts.into_iter().all(|p| tracker.part_matches_target(&cube, p)));
    }
    tracker.release(&mut cube);
    assert!(cube.part_edges().all(|(_, e)| e.attributes().is_empty()));
}
