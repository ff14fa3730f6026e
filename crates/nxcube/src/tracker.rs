//! Face color tracking for cubes without fixed centers.
//!
//! On an even cube no sticker is pinned to the middle of a face, so "the color
//! of a face" is a choice. A tracking session makes that choice once, marks one
//! center cell per face with the chosen color, and from then on reads face
//! colors back from wherever the rotation engine has carried the markers.

use std::sync::atomic::{AtomicU64, Ordering};

use itertools::Itertools;
use parking_lot::Mutex;
use strum::IntoEnumIterator;

use crate::cube::StateKey;
use crate::orientation::{self, first_consistent};
use crate::{
    AttrValue, Color, ColorCounts, ConsistencyViolation, Cube, FaceName, PartEdgeId, PartId,
    PerFace, TrackerError,
};

const MARKER_KEY_PREFIX: &str = "nxcube.tracker.";

static NEXT_SESSION: AtomicU64 = AtomicU64::new(0);

/// One marker: a face and the color it was assigned when the session opened.
type Claim = (FaceName, Color);

/// Tracking session mapping each face to a target color.
///
/// Markers live in the attribute bags of center stickers under a key unique to
/// the session, so several sessions can track the same cube independently.
#[derive(Debug)]
pub struct FaceColorTracker {
    key: String,
    /// Target colors in priority order. Earlier claims win when markers
    /// disagree.
    priority: Vec<Color>,
    orientations: Vec<PerFace<Color>>,
    cache: Mutex<Option<(StateKey, PerFace<Color>)>>,
}

impl FaceColorTracker {
    /// Opens a tracking session on `cube`.
    ///
    /// On odd cubes each face is assigned the color of its middle center
    /// sticker. On even cubes, the two faces with the strongest center color
    /// majority are assigned that color, their opposite faces are assigned the
    /// opposite colors, and the last two faces follow from the handedness of
    /// the color scheme.
    pub fn track(cube: &mut Cube) -> Result<Self, TrackerError> {
        let n = cube.size();
        if n < 3 {
            return Err(TrackerError::NoCenters(n));
        }
        let orientations = orientation::orientations(cube.scheme());

        let claims = if cube.is_even() {
            even_claims(cube, &orientations)
        } else {
            FaceName::iter()
                .map(|face| (face, cube.face_color(face)))
                .collect()
        };

        let session = NEXT_SESSION.fetch_add(1, Ordering::Relaxed);
        let key = format!("{MARKER_KEY_PREFIX}{session}");
        log::debug!("Opening face color tracker {key:?} with claims {claims:?}");

        for &(face, color) in &claims {
            let marker = marker_cell(cube, face, color);
            cube.set_attribute(marker, key.clone(), AttrValue::Color(color));
        }

        Ok(Self {
            key,
            priority: claims.iter().map(|&(_, color)| color).collect(),
            orientations,
            cache: Mutex::new(None),
        })
    }

    /// Returns the attribute key that this session's markers are stored
    /// under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the target color of every face.
    ///
    /// The result is always a rotation of the cube's color scheme, so every
    /// color appears exactly once. It is cached until the cube is rotated or
    /// its attributes are edited, or until it is queried with another cube.
    pub fn face_colors(&self, cube: &Cube) -> PerFace<Color> {
        let key = cube.state_key();
        if let Some((cached_at, colors)) = *self.cache.lock()
            && cached_at == key
        {
            return colors;
        }
        let colors = self.resolve(cube);
        *self.cache.lock() = Some((key, colors));
        colors
    }

    /// Returns the target color of `face`.
    pub fn face_color(&self, cube: &Cube, face: FaceName) -> Color {
        self.face_colors(cube)[face]
    }

    /// Returns whether every sticker of a part shows its face's target color.
    pub fn part_matches_target(&self, cube: &Cube, part: PartId) -> bool {
        let colors = self.face_colors(cube);
        cube.part(part).stickers().all(|sticker| {
            let e = cube.part_edge(sticker);
            e.color() == colors[e.face()]
        })
    }

    /// Ends the session, removing its markers from the cube.
    pub fn release(self, cube: &mut Cube) {
        let marked = cube.find_attribute(&self.key).map(|(id, _)| id).collect_vec();
        for sticker in marked {
            cube.remove_attribute(sticker, &self.key);
        }
        log::debug!("Released face color tracker {:?}", self.key);
    }

    fn resolve(&self, cube: &Cube) -> PerFace<Color> {
        let mut markers = cube
            .find_attribute(&self.key)
            .filter_map(|(sticker, value)| match value {
                AttrValue::Color(color) => Some((cube.part_edge(sticker).face(), *color)),
                _ => None,
            })
            .collect_vec();
        markers.sort_by_key(|&(_, color)| self.priority.iter().position(|&c| c == color));

        let mut accepted: Vec<Claim> = vec![];
        for claim in markers {
            accepted.push(claim);
            if first_consistent(&self.orientations, &accepted).is_none() {
                log::debug!("Tracker {:?} skipping claim {claim:?}", self.key);
                accepted.pop();
            }
        }

        let colors = first_consistent(&self.orientations, &accepted)
            .or_else(|| self.orientations.first().copied())
            .unwrap_or(*cube.scheme().home());

        if let Some(color) = colors.values().copied().duplicates().next() {
            panic!("{}\n{cube}", ConsistencyViolation::DuplicateFaceColor(color));
        }
        colors
    }
}

/// Chooses the four strongest face-color majorities on an even cube, two at a
/// time with their opposites, then completes them to a scheme orientation.
fn even_claims(cube: &Cube, orientations: &[PerFace<Color>]) -> Vec<Claim> {
    let scheme = cube.scheme();
    let counts = PerFace::from_fn(|face| {
        cube.center_cells(face)
            .map(|s| cube.part_edge(s).color())
            .collect::<ColorCounts>()
    });

    let mut claims: Vec<Claim> = vec![];
    for _ in 0..2 {
        let strongest = FaceName::iter()
            .filter(|face| claims.iter().all(|&(f, _)| f != *face))
            .cartesian_product(Color::iter())
            .filter(|(_, color)| claims.iter().all(|&(_, c)| c != *color))
            // Highest count, then color order, then face order.
            .min_by_key(|&(face, color)| (std::cmp::Reverse(counts[face].count(color)), color, face));
        let Some((face, color)) = strongest else {
            break;
        };
        claims.push((face, color));
        claims.push((face.opposite(), scheme.opposite(color)));
    }

    if let Some(colors) = first_consistent(orientations, &claims) {
        for face in FaceName::iter() {
            if claims.iter().all(|&(f, _)| f != face) {
                claims.push((face, colors[face]));
            }
        }
    }
    claims
}

/// Returns the center cell of `face` to mark for `color`: the first one
/// already showing that color, or else the first center cell.
fn marker_cell(cube: &Cube, face: FaceName, color: Color) -> PartEdgeId {
    let mut cells = cube.center_cells(face).peekable();
    let first = *cells
        .peek()
        .expect("cubes with at least 3 layers have center cells");
    cells
        .find(|&s| cube.part_edge(s).color() == color)
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CubeAxis, Direction, LayerRange, SliceAxis};

    #[test]
    fn test_no_centers_on_2x2() {
        let mut cube = Cube::new(2).unwrap();
        assert_eq!(
            FaceColorTracker::track(&mut cube).unwrap_err(),
            TrackerError::NoCenters(2),
        );
    }

    #[test]
    fn test_solved_cube_tracks_home_colors() {
        for n in 3..=6 {
            let mut cube = Cube::new(n).unwrap();
            let tracker = FaceColorTracker::track(&mut cube).unwrap();
            assert_eq!(tracker.face_colors(&cube), *cube.scheme().home());
            assert!(cube.all_parts().all(|p| tracker.part_matches_target(&cube, p.id())));
        }
    }

    #[test]
    fn test_tracker_follows_whole_cube_rotation() {
        let mut cube = Cube::new(4).unwrap();
        let tracker = FaceColorTracker::track(&mut cube).unwrap();
        cube.rotate_whole_cube(CubeAxis::Y, Direction::Cw);
        let colors = tracker.face_colors(&cube);
        assert_eq!(colors[FaceName::F], Color::Red);
        assert_eq!(colors[FaceName::L], Color::Green);
        assert_eq!(colors[FaceName::U], Color::White);
        assert!(cube.all_parts().all(|p| tracker.part_matches_target(&cube, p.id())));
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut cube = Cube::new(4).unwrap();
        let a = FaceColorTracker::track(&mut cube).unwrap();
        let b = FaceColorTracker::track(&mut cube).unwrap();
        assert_ne!(a.key(), b.key());
        assert_eq!(cube.find_attribute(a.key()).count(), 6);
        a.release(&mut cube);
        assert_eq!(cube.find_attribute(b.key()).count(), 6);
        cube.rotate_slice(SliceAxis::E, LayerRange::single(0), Direction::Cw)
            .unwrap();
        assert!(b.face_colors(&cube).values().all_unique());
    }

    #[test]
    fn test_cache_tracks_modification_count() {
        let mut cube = Cube::new(5).unwrap();
        let tracker = FaceColorTracker::track(&mut cube).unwrap();
        let before = tracker.face_colors(&cube);
        assert_eq!(tracker.cache.lock().map(|(key, _)| key.rotations), Some(0));
        cube.rotate_whole_cube(CubeAxis::X, Direction::Half);
        let after = tracker.face_colors(&cube);
        assert_eq!(tracker.cache.lock().map(|(key, _)| key.rotations), Some(1));
        assert_eq!(after[FaceName::U], before[FaceName::D]);
        assert_eq!(after[FaceName::F], before[FaceName::B]);
    }

    #[test]
    fn test_cache_distinguishes_clones() {
        let mut a = Cube::new(4).unwrap();
        let tracker = FaceColorTracker::track(&mut a).unwrap();
        let mut b = a.clone();
        a.rotate_whole_cube(CubeAxis::Y, Direction::Cw);
        b.rotate_whole_cube(CubeAxis::X, Direction::Cw);
        assert_eq!(a.modification_count(), b.modification_count());

        let colors_a = tracker.face_colors(&a);
        let colors_b = tracker.face_colors(&b);
        assert_eq!(colors_b, tracker.resolve(&b));
        assert_ne!(colors_a, colors_b);
        assert_eq!(colors_b[FaceName::U], Color::Green);
        assert_eq!(tracker.face_colors(&a), tracker.resolve(&a));
    }

    #[test]
    fn test_cache_sees_marker_edits() {
        let mut cube = Cube::new(4).unwrap();
        let tracker = FaceColorTracker::track(&mut cube).unwrap();
        cube.rotate_whole_cube(CubeAxis::Y, Direction::Cw);
        let rotated = tracker.face_colors(&cube);
        assert_eq!(rotated[FaceName::F], Color::Red);

        let markers = cube
            .find_attribute(tracker.key())
            .map(|(id, _)| id)
            .collect_vec();
        for sticker in markers {
            cube.remove_attribute(sticker, tracker.key());
        }
        let colors = tracker.face_colors(&cube);
        assert_eq!(colors, tracker.resolve(&cube));
        assert_eq!(colors, *cube.scheme().home());
    }

    #[test]
    fn test_even_claims_prefer_strongest_majority() {
        use FaceName::*;

        let mut cube = Cube::new(4).unwrap();
        // One inner `M` slice puts a foreign column on the centers of `U`,
        // `F`, `D`, and `B`, leaving `R` and `L` as the only unanimous faces.
        cube.rotate_slice(SliceAxis::M, LayerRange::single(0), Direction::Cw)
            .unwrap();
        let orientations = orientation::orientations(cube.scheme());
        let claims = even_claims(&cube, &orientations);
        assert_eq!(claims.len(), 6);
        // Orange sorts before red.
        assert_eq!(claims[0], (L, Color::Orange));
        assert_eq!(claims[1], (R, Color::Red));
        // Every remaining face has a 2-2 split; blue is the first color and
        // `U` the first face showing it.
        assert_eq!(claims[2], (U, Color::Blue));
        assert_eq!(claims[3], (D, Color::Green));
        assert!(claims.iter().map(|&(f, _)| f).all_unique());
        assert!(claims.iter().map(|&(_, c)| c).all_unique());
    }
}
