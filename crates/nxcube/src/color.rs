//! Sticker colors and color schemes.

use std::collections::BTreeMap;
use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::{FaceName, PerFace};

/// Sticker color.
///
/// Variants are declared in alphabetical order, so the derived [`Ord`] is the
/// lexicographic order used to break ties deterministically.
#[derive(
    EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    /// Blue.
    Blue = 0,
    /// Green.
    Green = 1,
    /// Orange.
    Orange = 2,
    /// Red.
    Red = 3,
    /// White.
    White = 4,
    /// Yellow.
    Yellow = 5,
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
impl Color {
    /// Number of distinct colors.
    pub const COUNT: usize = 6;

    /// Returns a single uppercase letter for the color.
    pub fn letter(self) -> char {
        match self {
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Orange => 'O',
            Color::Red => 'R',
            Color::White => 'W',
            Color::Yellow => 'Y',
        }
    }
}

bitflags! {
    /// Set of colors, used for a part's color and position identities.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ColorSet: u8 {
        /// Blue.
        const BLUE = 1 << 0;
        /// Green.
        const GREEN = 1 << 1;
        /// Orange.
        const ORANGE = 1 << 2;
        /// Red.
        const RED = 1 << 3;
        /// White.
        const WHITE = 1 << 4;
        /// Yellow.
        const YELLOW = 1 << 5;
    }
}
impl From<Color> for ColorSet {
    fn from(color: Color) -> Self {
        ColorSet::from_bits_retain(1 << color as u8)
    }
}
impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ColorSet::empty(), |set, color| set | ColorSet::from(color))
    }
}
impl ColorSet {
    /// Returns an iterator over the colors in the set, in color order.
    pub fn colors(self) -> impl Iterator<Item = Color> {
        Color::iter().filter(move |&c| self.contains(c.into()))
    }
}

/// Number of stickers of each color in some collection.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ColorCounts([usize; Color::COUNT]);
impl FromIterator<Color> for ColorCounts {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut ret = Self::default();
        for color in iter {
            ret.0[color as usize] += 1;
        }
        ret
    }
}
impl ColorCounts {
    /// Returns the number of stickers with `color`.
    pub fn count(&self, color: Color) -> usize {
        self.0[color as usize]
    }
    /// Returns the most common color and its count. Ties go to the color that
    /// comes first in color order.
    pub fn majority(&self) -> (Color, usize) {
        let mut best = (Color::Blue, self.count(Color::Blue));
        for color in Color::iter() {
            if self.count(color) > best.1 {
                best = (color, self.count(color));
            }
        }
        best
    }
}

/// Error produced when validating a color scheme.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemeError {
    /// A face has no color assigned.
    #[error("color scheme {scheme:?} has no color for face {face}")]
    MissingFace {
        /// Scheme name.
        scheme: String,
        /// Face without a color.
        face: FaceName,
    },
    /// Two faces share a color.
    #[error("color scheme {scheme:?} assigns {color:?} to both {} and {}", .faces[0], .faces[1])]
    DuplicateColor {
        /// Scheme name.
        scheme: String,
        /// Repeated color.
        color: Color,
        /// Faces sharing the color.
        faces: [FaceName; 2],
    },
}

/// Assignment of one color to each face of a solved cube.
///
/// Opposite-color pairs and the handedness of the scheme are facts of this
/// assignment; nothing derives them from sticker state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorScheme {
    name: String,
    home: PerFace<Color>,
}
impl Default for ColorScheme {
    fn default() -> Self {
        crate::config::DEFAULT_CONFIG.scheme.clone()
    }
}
impl ColorScheme {
    /// Constructs a color scheme, checking that every color is used once.
    pub fn new(name: impl Into<String>, home: PerFace<Color>) -> Result<Self, SchemeError> {
        let name = name.into();
        let mut seen = BTreeMap::new();
        for (face, &color) in home.iter() {
            if let Some(&other) = seen.get(&color) {
                return Err(SchemeError::DuplicateColor {
                    scheme: name,
                    color,
                    faces: [other, face],
                });
            }
            seen.insert(color, face);
        }
        Ok(Self { name, home })
    }

    /// Constructs a color scheme from a face-to-color map, which must
    /// contain every face.
    pub fn from_map(
        name: impl Into<String>,
        map: &BTreeMap<FaceName, Color>,
    ) -> Result<Self, SchemeError> {
        let name = name.into();
        let mut home = PerFace([Color::White; FaceName::COUNT]);
        for face in FaceName::iter() {
            home[face] = *map.get(&face).ok_or_else(|| SchemeError::MissingFace {
                scheme: name.clone(),
                face,
            })?;
        }
        Self::new(name, home)
    }

    /// Returns the human-friendly name of the scheme.
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Returns the color of each face on a solved cube in the default
    /// orientation.
    pub fn home(&self) -> &PerFace<Color> {
        &self.home
    }
    /// Returns the color of `face` on a solved cube in the default
    /// orientation.
    pub fn color(&self, face: FaceName) -> Color {
        self.home[face]
    }
    /// Returns the face that has `color` on a solved cube in the default
    /// orientation.
    pub fn home_face(&self, color: Color) -> FaceName {
        self.home
            .iter()
            .find(|&(_, &c)| c == color)
            .map(|(face, _)| face)
            .expect("color scheme uses every color")
    }
    /// Returns the color opposite `color` in this scheme.
    pub fn opposite(&self, color: Color) -> Color {
        self.home[self.home_face(color).opposite()]
    }
}
