//! Whole-cube orientations of a color scheme.
//!
//! A solved cube can be held in 24 ways. Each one assigns the scheme's six
//! colors to the six faces while keeping opposite colors opposite and keeping
//! the scheme's handedness, so the list doubles as the set of face-to-color
//! maps that a physical cube can show.

use std::collections::VecDeque;

use crate::{Color, ColorScheme, FaceName, FaceSide, PerFace};

/// Number of rotational orientations of a cube.
pub const ORIENTATION_COUNT: usize = 24;

/// Returns the face-to-color map after rotating a cube showing `colors`
/// clockwise about `axis_face`.
pub(crate) fn rotate_assignment(colors: &PerFace<Color>, axis_face: FaceName) -> PerFace<Color> {
    let mut ret = *colors;
    for side in FaceSide::CYCLE {
        ret[axis_face.neighbor(side.next_cw())] = colors[axis_face.neighbor(side)];
    }
    ret
}

/// Returns every orientation of `scheme`, starting with its home orientation.
///
/// The order is deterministic: breadth-first from home using clockwise
/// rotations about `R`, `U`, and `F`.
pub fn orientations(scheme: &ColorScheme) -> Vec<PerFace<Color>> {
    let mut seen = vec![*scheme.home()];
    let mut queue = VecDeque::from([*scheme.home()]);
    while let Some(colors) = queue.pop_front() {
        for axis_face in [FaceName::R, FaceName::U, FaceName::F] {
            let next = rotate_assignment(&colors, axis_face);
            if !seen.contains(&next) {
                seen.push(next);
                queue.push_back(next);
            }
        }
    }
    debug_assert_eq!(seen.len(), ORIENTATION_COUNT);
    seen
}

/// Returns whether `colors` agrees with every `(face, color)` claim.
pub(crate) fn consistent(colors: &PerFace<Color>, claims: &[(FaceName, Color)]) -> bool {
    claims.iter().all(|&(face, color)| colors[face] == color)
}

/// Returns the first orientation of `scheme` that agrees with every claim.
pub(crate) fn first_consistent(
    orientations: &[PerFace<Color>],
    claims: &[(FaceName, Color)],
) -> Option<PerFace<Color>> {
    orientations
        .iter()
        .find(|colors| consistent(colors, claims))
        .copied()
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_orientations_are_distinct_rotations() {
        let scheme = ColorScheme::default();
        let all = orientations(&scheme);
        assert_eq!(all.len(), ORIENTATION_COUNT);
        assert_eq!(all[0], *scheme.home());
        assert!(all.iter().all_unique());
        for colors in &all {
            assert!(colors.values().all_unique());
            for face in FaceName::iter() {
                assert_eq!(colors[face.opposite()], scheme.opposite(colors[face]));
            }
        }
    }

    #[test]
    fn test_mirror_image_is_not_an_orientation() {
        let scheme = ColorScheme::default();
        let mut mirrored = *scheme.home();
        mirrored[FaceName::R] = scheme.color(FaceName::L);
        mirrored[FaceName::L] = scheme.color(FaceName::R);
        assert!(!orientations(&scheme).contains(&mirrored));
    }

    #[test]
    fn test_two_adjacent_claims_fix_orientation() {
        let scheme = ColorScheme::default();
        let all = orientations(&scheme);
        let claims = [(FaceName::F, Color::White), (FaceName::U, Color::Blue)];
        let matching = all.iter().filter(|c| consistent(c, &claims)).count();
        assert_eq!(matching, 1);
        let colors = first_consistent(&all, &claims).unwrap();
        assert_eq!(colors[FaceName::B], Color::Yellow);
        assert_eq!(colors[FaceName::D], Color::Green);
    }

    #[test]
    fn test_rotation_moves_side_colors_clockwise() {
        let scheme = ColorScheme::default();
        let rotated = rotate_assignment(scheme.home(), FaceName::U);
        // `y` brings the right face's color to the front.
        assert_eq!(rotated[FaceName::F], Color::Red);
        assert_eq!(rotated[FaceName::U], Color::White);
    }
}
