// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index and geometry primitives shared by every stage.

/// A UTF-32 code point of the character buffer.
pub type Character = char;

/// Index into the character buffer.
pub type CharacterIndex = usize;

/// Index into the glyph buffer.
pub type GlyphIndex = usize;

/// Number of characters or glyphs.
pub type Length = usize;

/// Index into the line buffer.
pub type LineIndex = usize;

/// Identifier of a font handed out by a [`FontClient`](crate::FontClient).
///
/// `0` is never a valid font.
pub type FontId = u32;

/// Index of a glyph inside its font.
pub type GlyphId = u32;

/// Point size in 26.6 fixed point; `768` is 12pt.
pub type PointSize26Dot6 = u32;

/// Index into the color palette of the visual model; `0` is the default text color.
pub type ColorIndex = u16;

/// The default point size, 12pt.
pub const DEFAULT_POINT_SIZE: PointSize26Dot6 = 768;

/// A 2D vector or point in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component, growing downward.
    pub y: f32,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new vector.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension cannot hold any content.
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Direction of a character: `true` is right to left.
pub type CharacterDirection = bool;
