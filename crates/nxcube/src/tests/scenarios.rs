use pretty_assertions::assert_eq;

use super::*;
use crate::{Algorithm, AttrValue, Color, Cube};

#[test]
fn test_front_face_stickers_turn_clockwise() {
    let mut cube = Cube::new(3).unwrap();
    for row in 0..3 {
        for col in 0..3 {
            let sticker = cube.face(FaceName::F).sticker(row, col);
            cube.set_attribute(sticker, "cell", AttrValue::Uint((row * 3 + col) as u64));
        }
    }

    cube.rotate_face(FaceName::F, Direction::Cw);

    for row in 0..3 {
        for col in 0..3 {
            // Bottom-left moves to top-left.
            let sticker = cube.face(FaceName::F).sticker(2 - col, row);
            assert_eq!(
                cube.part_edge(sticker).attributes().get("cell"),
                Some(&AttrValue::Uint((row * 3 + col) as u64)),
                "from ({row}, {col})",
            );
        }
    }
    assert_eq!(cube.find_attribute("cell").count(), 9);
}

#[test]
fn test_middle_slice_moves_one_column() {
    let mut cube = Cube::new(5).unwrap();
    cube.rotate_slice(SliceAxis::M, LayerRange::single(1), Direction::Cw)
        .unwrap();

    let expected = [
        (FaceName::U, Color::White, Color::Blue),
        (FaceName::F, Color::Green, Color::White),
        (FaceName::D, Color::Yellow, Color::Green),
        (FaceName::B, Color::Blue, Color::Yellow),
    ];
    for (face, outer, middle) in expected {
        for row in 0..5 {
            for col in 0..5 {
                let color = if col == 2 { middle } else { outer };
                assert_eq!(cube.sticker_color(face, row, col), color, "{face} ({row}, {col})");
            }
        }
    }
    for face in [FaceName::R, FaceName::L] {
        let color = cube.scheme().color(face);
        assert!(cube.face(face).stickers().all(|s| cube.part_edge(s).color() == color));
    }
    assert_eq!(cube.check_consistency(), Ok(()));
}

#[test]
fn test_wide_turn_is_opposite_wide_turn_plus_rotation() {
    let mut a = Cube::new(4).unwrap();
    let scramble: Algorithm = "R U2 Fw' 2L D B'".parse().unwrap();
    scramble.apply(&mut a).unwrap();
    let mut b = a.clone();

    a.apply_move("Rw".parse().unwrap()).unwrap();
    let alg: Algorithm = "Lw x".parse().unwrap();
    alg.apply(&mut b).unwrap();
    assert_eq!(a.color_state(), b.color_state());
}

#[test]
fn test_wide_turn_is_sum_of_layers() {
    let mut a = Cube::new(6).unwrap();
    let mut b = a.clone();
    a.rotate_face_layers(FaceName::U, LayerRange::new(0, 2), Direction::Ccw)
        .unwrap();
    for layer in 0..3 {
        b.rotate_face_layers(FaceName::U, LayerRange::single(layer), Direction::Ccw)
            .unwrap();
    }
    assert_eq!(a.color_state(), b.color_state());
    assert_eq!(b.modification_count(), 3);
}

#[test]
fn test_slices_and_faces_make_a_rotation() {
    for n in [3, 4, 7] {
        let mut a = Cube::new(n).unwrap();
        let mut b = a.clone();
        let inner = LayerRange::new(0, n - 3);
        a.rotate_face(FaceName::U, Direction::Cw);
        a.rotate_slice(SliceAxis::E, inner, Direction::Ccw).unwrap();
        a.rotate_face(FaceName::D, Direction::Ccw);
        b.rotate_whole_cube(CubeAxis::Y, Direction::Cw);
        assert_eq!(a.color_state(), b.color_state(), "{n}x{n}");
    }
}

#[test]
fn test_even_cube_face_color_follows_rotation() {
    let mut cube = Cube::new(4).unwrap();
    cube.rotate_whole_cube(CubeAxis::X, Direction::Cw);
    assert_eq!(cube.face_color(FaceName::U), Color::Green);
    assert_eq!(cube.face_color(FaceName::F), Color::Yellow);
    assert!(cube.is_solved());

    let mut cube = Cube::new(2).unwrap();
    cube.rotate_whole_cube(CubeAxis::Z, Direction::Half);
    assert_eq!(cube.face_color(FaceName::U), Color::Yellow);
    assert_eq!(cube.face_color(FaceName::R), Color::Orange);
    assert!(cube.is_solved());
}

#[test]
fn test_display_after_turn() {
    let mut cube = Cube::new(2).unwrap();
    cube.rotate_face(FaceName::R, Direction::Cw);
    assert_eq!(
        cube.to_string(),
        "   WG\n   WG\nOO GY RR WB\nOO GY RR WB\n   YB\n   YB\n",
    );
}
