// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Visual weight class of a font, on a scale from 1.0 to 1000.0.
///
/// This uses an `f32` so that it can represent the full range of the `wght` axis of variable
/// fonts.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FontWeight(f32);

impl FontWeight {
    /// Weight value of 100.
    pub const THIN: Self = Self(100.0);

    /// Weight value of 200.
    pub const ULTRA_LIGHT: Self = Self(200.0);

    /// Weight value of 300.
    pub const LIGHT: Self = Self(300.0);

    /// Weight value of 350.
    pub const DEMI_LIGHT: Self = Self(350.0);

    /// Weight value of 400. This is the default value.
    pub const NORMAL: Self = Self(400.0);

    /// Weight value of 500.
    pub const MEDIUM: Self = Self(500.0);

    /// Weight value of 600.
    pub const DEMI_BOLD: Self = Self(600.0);

    /// Weight value of 700.
    pub const BOLD: Self = Self(700.0);

    /// Weight value of 800.
    pub const ULTRA_BOLD: Self = Self(800.0);

    /// Weight value of 900.
    pub const BLACK: Self = Self(900.0);

    /// Creates a new weight value.
    pub fn new(weight: f32) -> Self {
        Self(weight)
    }

    /// Returns the underlying weight value.
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns a matching penalty between this requested weight and an available one.
    ///
    /// Lighter faces are preferred for light requests and heavier faces for bold requests,
    /// which is the usual font matching order.
    pub fn distance(self, available: Self) -> f32 {
        let delta = available.0 - self.0;
        let wrong_side = if self.0 <= Self::NORMAL.0 {
            delta > 0.0
        } else {
            delta < 0.0
        };
        if wrong_side {
            delta.abs() + 1000.0
        } else {
            delta.abs()
        }
    }

    /// Parses a weight keyword or number.
    ///
    /// ```
    /// use text_primitives::FontWeight;
    ///
    /// assert_eq!(FontWeight::parse("normal"), Some(FontWeight::NORMAL));
    /// assert_eq!(FontWeight::parse("demiBold"), Some(FontWeight::DEMI_BOLD));
    /// assert_eq!(FontWeight::parse("850"), Some(FontWeight::new(850.0)));
    /// assert_eq!(FontWeight::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Some(match s {
            "thin" => Self::THIN,
            "ultraLight" | "extraLight" => Self::ULTRA_LIGHT,
            "light" => Self::LIGHT,
            "demiLight" | "semiLight" => Self::DEMI_LIGHT,
            "normal" | "regular" | "book" => Self::NORMAL,
            "medium" => Self::MEDIUM,
            "demiBold" | "semiBold" => Self::DEMI_BOLD,
            "bold" => Self::BOLD,
            "ultraBold" | "extraBold" => Self::ULTRA_BOLD,
            "black" | "heavy" => Self::BLACK,
            _ => Self(s.parse::<f32>().ok()?),
        })
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual width of a font as a ratio of the normal aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FontWidth(f32);

impl FontWidth {
    /// Width that is 50% of normal.
    pub const ULTRA_CONDENSED: Self = Self(0.5);

    /// Width that is 62.5% of normal.
    pub const EXTRA_CONDENSED: Self = Self(0.625);

    /// Width that is 75% of normal.
    pub const CONDENSED: Self = Self(0.75);

    /// Width that is 87.5% of normal.
    pub const SEMI_CONDENSED: Self = Self(0.875);

    /// Width that is 100% of normal. This is the default value.
    pub const NORMAL: Self = Self(1.0);

    /// Width that is 112.5% of normal.
    pub const SEMI_EXPANDED: Self = Self(1.125);

    /// Width that is 125% of normal.
    pub const EXPANDED: Self = Self(1.25);

    /// Width that is 150% of normal.
    pub const EXTRA_EXPANDED: Self = Self(1.5);

    /// Width that is 200% of normal.
    pub const ULTRA_EXPANDED: Self = Self(2.0);

    /// Creates a new width value with the given ratio.
    pub fn from_ratio(ratio: f32) -> Self {
        Self(ratio)
    }

    /// Returns the width value as a ratio, with `1.0` being normal width.
    pub fn ratio(self) -> f32 {
        self.0
    }

    /// Returns a matching penalty between this requested width and an available one.
    pub fn distance(self, available: Self) -> f32 {
        let delta = available.0 - self.0;
        // Narrower faces first for normal and condensed requests.
        let wrong_side = if self.0 <= Self::NORMAL.0 {
            delta > 0.0
        } else {
            delta < 0.0
        };
        if wrong_side {
            delta.abs() + 10.0
        } else {
            delta.abs()
        }
    }

    /// Parses a width keyword.
    ///
    /// ```
    /// use text_primitives::FontWidth;
    ///
    /// assert_eq!(FontWidth::parse("semiCondensed"), Some(FontWidth::SEMI_CONDENSED));
    /// assert_eq!(FontWidth::parse("wideload"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "ultraCondensed" => Self::ULTRA_CONDENSED,
            "extraCondensed" => Self::EXTRA_CONDENSED,
            "condensed" => Self::CONDENSED,
            "semiCondensed" => Self::SEMI_CONDENSED,
            "normal" => Self::NORMAL,
            "semiExpanded" => Self::SEMI_EXPANDED,
            "expanded" => Self::EXPANDED,
            "extraExpanded" => Self::EXTRA_EXPANDED,
            "ultraExpanded" => Self::ULTRA_EXPANDED,
            _ => return None,
        })
    }
}

impl Default for FontWidth {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Slope of a font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FontSlant {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Cursive italic glyphs.
    Italic,
    /// Slanted upright glyphs.
    Oblique,
}

impl FontSlant {
    /// Parses a slant keyword.
    ///
    /// ```
    /// use text_primitives::FontSlant;
    ///
    /// assert_eq!(FontSlant::parse("roman"), Some(FontSlant::Normal));
    /// assert_eq!(FontSlant::parse("oblique"), Some(FontSlant::Oblique));
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim() {
            "normal" | "roman" => Self::Normal,
            "italic" => Self::Italic,
            "oblique" => Self::Oblique,
            _ => return None,
        })
    }

    /// Returns a matching penalty between this requested slant and an available one.
    ///
    /// Italic and oblique faces substitute for each other before falling back to upright.
    pub fn distance(self, available: Self) -> f32 {
        match (self, available) {
            (a, b) if a == b => 0.0,
            (Self::Italic, Self::Oblique) | (Self::Oblique, Self::Italic) => 1.0,
            _ => 2.0,
        }
    }
}

impl fmt::Display for FontSlant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
        })
    }
}
