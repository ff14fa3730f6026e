//! Whole-cube invariant audit.

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::{Color, ColorCounts, ConsistencyViolation, Cube, FaceSet};

impl Cube {
    /// Checks every structural invariant of the cube, returning the first
    /// violation found.
    ///
    /// Rotations cannot break these invariants, so a violation means a bug in
    /// the rotation engine or coordinate translator.
    pub fn check_consistency(&self) -> Result<(), ConsistencyViolation> {
        self.check_color_counts()?;
        self.check_fixed_ids()?;
        self.check_pieces()?;
        self.check_edge_alignment()
    }

    fn check_color_counts(&self) -> Result<(), ConsistencyViolation> {
        let expected = (self.size() as usize).pow(2);
        let counts: ColorCounts = self.part_edges.values().map(|e| e.color).collect();
        match Color::iter().find(|&c| counts.count(c) != expected) {
            Some(color) => Err(ConsistencyViolation::ColorCount {
                color,
                count: counts.count(color),
                expected,
            }),
            None => Ok(()),
        }
    }

    fn check_fixed_ids(&self) -> Result<(), ConsistencyViolation> {
        for part in self.all_parts() {
            let actual: FaceSet = part
                .stickers()
                .map(|s| self.part_edges[s].face)
                .collect();
            if actual != part.fixed_id() {
                return Err(ConsistencyViolation::FixedIdMismatch {
                    part: part.id(),
                    expected: part.fixed_id(),
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Checks that no slice shows the same color twice or two opposite
    /// colors.
    fn check_pieces(&self) -> Result<(), ConsistencyViolation> {
        let scheme = self.scheme();
        for slice in self.slices.values() {
            for (&a, &b) in slice.edges.iter().tuple_combinations() {
                let color_a = self.part_edges[a].color;
                let color_b = self.part_edges[b].color;
                if color_a == color_b || scheme.opposite(color_a) == color_b {
                    return Err(ConsistencyViolation::ImpossiblePiece {
                        a,
                        b,
                        color_a,
                        color_b,
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks that both stickers of every edge slice sit at the same place
    /// along the edge as seen through the translator.
    fn check_edge_alignment(&self) -> Result<(), ConsistencyViolation> {
        let n = self.size();
        for edge in self.edges() {
            let Some(part) = edge.part() else { continue };
            let [side1, side2] = [edge.f1(), edge.f2()].map(|face| edge.face_side(face));
            let (Ok(side1), Ok(side2)) = (side1, side2) else {
                continue;
            };
            for slice in self.part(part).slices() {
                let stickers = slice.stickers().map(|s| &self.part_edges[s]).collect_vec();
                let on = |face| stickers.iter().find(|e| e.face == face);
                let (Some(a), Some(b)) = (on(edge.f1()), on(edge.f2())) else {
                    continue;
                };
                let from_ltr = side1.ltr_of(a.row, a.col);
                let expected = edge.translate_line(edge.f1(), from_ltr, n);
                let actual = side2.ltr_of(b.row, b.col);
                if expected != actual {
                    return Err(ConsistencyViolation::SliceAlignment {
                        from: edge.f1(),
                        to: edge.f2(),
                        from_ltr,
                        expected,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Algorithm, FaceName};

    #[test]
    fn test_scrambled_cube_is_consistent() {
        for n in 2..=6 {
            let mut cube = Cube::new(n).unwrap();
            assert_eq!(cube.check_consistency(), Ok(()));
            let alg: Algorithm = "R U' F2 Rw x D' L2 y' B z2".parse().unwrap();
            alg.apply(&mut cube).unwrap();
            assert_eq!(cube.check_consistency(), Ok(()), "{n}x{n}");
        }
    }

    #[test]
    fn test_detects_impossible_piece() {
        let mut cube = Cube::new(3).unwrap();
        let a = cube.face(FaceName::U).sticker(0, 1);
        let b = cube.face(FaceName::F).sticker(2, 1);
        cube.part_edges[b].color = Color::White;
        assert_eq!(
            cube.check_pieces(),
            Err(ConsistencyViolation::ImpossiblePiece {
                a,
                b,
                color_a: Color::White,
                color_b: Color::White,
            }),
        );
        cube.part_edges[b].color = Color::Yellow;
        assert!(cube.check_pieces().is_err());
    }

    #[test]
    fn test_detects_wrong_color_count() {
        let mut cube = Cube::new(4).unwrap();
        let s = cube.face(FaceName::R).sticker(1, 2);
        cube.part_edges[s].color = Color::Blue;
        assert_eq!(
            cube.check_consistency(),
            Err(ConsistencyViolation::ColorCount {
                color: Color::Blue,
                count: 17,
                expected: 16,
            }),
        );
    }
}
