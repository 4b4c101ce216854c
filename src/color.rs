//! Color types and the category color table.
//!
//! Marks are filled by looking up their category in a [`ColorMap`]. The map is static
//! configuration, not derived from data, so every lookup has to resolve to *some* color:
//! categories without an entry fall back to a neutral gray instead of an invisible fill.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Neutral gray used for categories missing from the color map.
    pub const FALLBACK_GRAY: Self = Self::rgb(0x99, 0x99, 0x99);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse a CSS hex literal: `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for any other length or a non-hex digit.
    pub fn from_hex(literal: &str) -> Result<Self> {
        let hex = literal.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(literal.to_string()));
        }

        let channel =
            |s: &str| u8::from_str_radix(s, 16).map_err(|_| Error::InvalidColor(literal.to_string()));

        match hex.len() {
            3 => {
                let mut c = [0u8; 3];
                for (i, slot) in c.iter_mut().enumerate() {
                    *slot = channel(&hex[i..=i])? * 17;
                }
                Ok(Self::rgb(c[0], c[1], c[2]))
            }
            6 => Ok(Self::rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            8 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(Error::InvalidColor(literal.to_string())),
        }
    }

    /// Uppercase hex form, `#RRGGBB` when opaque and `#RRGGBBAA` otherwise.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

/// Category -> color table with an explicit fallback.
///
/// Entry order is preserved; the legend lists categories in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMap {
    entries: IndexMap<String, Rgba>,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::pokemon_types()
    }
}

impl ColorMap {
    /// Build a map from `(category, color)` pairs, keeping their order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Rgba)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// The fifteen primary-type colors of the Pokémon chart.
    #[must_use]
    pub fn pokemon_types() -> Self {
        Self::new([
            ("Bug", Rgba::rgb(0x4E, 0x79, 0xA7)),
            ("Dark", Rgba::rgb(0xA0, 0xCB, 0xE8)),
            ("Electric", Rgba::rgb(0xF2, 0x8E, 0x2B)),
            ("Fairy", Rgba::rgb(0xFF, 0xBE, 0x7D)),
            ("Fighting", Rgba::rgb(0x59, 0xA1, 0x4F)),
            ("Fire", Rgba::rgb(0x8C, 0xD1, 0x7D)),
            ("Ghost", Rgba::rgb(0xB6, 0x99, 0x2D)),
            ("Grass", Rgba::rgb(0x49, 0x98, 0x94)),
            ("Ground", Rgba::rgb(0x86, 0xBC, 0xB6)),
            ("Ice", Rgba::rgb(0x86, 0xBC, 0xB6)),
            ("Normal", Rgba::rgb(0xE1, 0x57, 0x59)),
            ("Poison", Rgba::rgb(0xFF, 0x9D, 0x9A)),
            ("Psychic", Rgba::rgb(0x79, 0x70, 0x6E)),
            ("Steel", Rgba::rgb(0xBA, 0xB0, 0xAC)),
            ("Water", Rgba::rgb(0xD3, 0x72, 0x95)),
        ])
    }

    /// Exact lookup; `None` for unmapped categories.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<Rgba> {
        self.entries.get(category).copied()
    }

    /// Lookup that always yields a color, using `fallback` for unmapped categories.
    #[must_use]
    pub fn resolve(&self, category: &str, fallback: Rgba) -> Rgba {
        self.get(category).unwrap_or(fallback)
    }

    /// Iterate entries in legend order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgba)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
