// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborators the text engine queries for fonts, shaping and hyphenation.
//!
//! The engine never reaches for process-wide state: every pipeline entry point receives a
//! [`TextServices`] bundle. Implementations are treated as read-mostly shared caches, so all
//! methods take `&self`.

#[cfg(feature = "font-backend")]
mod collection;
#[cfg(feature = "hyphenation")]
mod hyphenation;

#[cfg(feature = "font-backend")]
pub use collection::FontCollection;
#[cfg(feature = "hyphenation")]
pub use hyphenation::HypherHyphenator;

use core::fmt;

use icu_properties::props::Script;

use crate::inputs::FontDescription;
use crate::{Character, FontId, GlyphId, PointSize26Dot6};

/// A glyph and its metrics in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphInfo {
    /// The font the glyph belongs to.
    pub font_id: FontId,
    /// Index of the glyph inside its font.
    pub index: GlyphId,
    /// Width of the glyph's bounding box.
    pub width: f32,
    /// Height of the glyph's bounding box.
    pub height: f32,
    /// Distance from the pen position to the left edge of the bounding box.
    pub x_bearing: f32,
    /// Distance from the baseline to the top edge of the bounding box.
    pub y_bearing: f32,
    /// Distance the pen moves after the glyph.
    pub advance: f32,
}

impl GlyphInfo {
    /// Creates a glyph with no metrics yet.
    pub fn new(font_id: FontId, index: GlyphId) -> Self {
        Self {
            font_id,
            index,
            ..Default::default()
        }
    }
}

/// Vertical metrics of a font in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the line, positive.
    pub ascender: f32,
    /// Distance from the baseline to the bottom of the line, negative.
    pub descender: f32,
    /// Recommended distance between baselines.
    pub height: f32,
    /// Offset of the underline below the baseline, positive downward.
    pub underline_position: f32,
    /// Thickness of the underline.
    pub underline_thickness: f32,
}

/// The output of shaping one run of characters with one font.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapedRun {
    /// Glyphs in logical order, with their advance and positioning offset in the bearings.
    pub glyphs: Vec<GlyphInfo>,
    /// For each glyph, the offset inside the shaped text of the first character it represents.
    ///
    /// Offsets never decrease and the first one is `0`.
    pub clusters: Vec<usize>,
}

/// Font lookup and metrics.
pub trait FontClient {
    /// Returns the font that best matches `description` at `point_size`.
    ///
    /// Must always return a usable font, falling back to a default one.
    fn font_id(&self, description: &FontDescription, point_size: PointSize26Dot6) -> FontId;

    /// Returns `true` if `font_id` has a glyph for `character`.
    fn has_glyph(&self, font_id: FontId, character: Character) -> bool;

    /// Finds another font able to render `character`, preferring one close to `preferred`.
    fn find_fallback_font(
        &self,
        character: Character,
        preferred: &FontDescription,
        point_size: PointSize26Dot6,
    ) -> Option<FontId> {
        let _ = (character, preferred, point_size);
        None
    }

    /// Returns the vertical metrics of `font_id`.
    fn font_metrics(&self, font_id: FontId) -> FontMetrics;

    /// Fills the width, height and bearings of every glyph in place.
    ///
    /// The font and glyph index of each entry are read. Bearings are added to the positioning
    /// offsets the shaper stored in them, and the shaped advance is kept.
    fn glyph_metrics(&self, glyphs: &mut [GlyphInfo]);

    /// Sets the resolution used to convert point sizes to pixels.
    fn set_dpi(&self, horizontal: u32, vertical: u32);
}

/// Text shaping.
pub trait Shaper {
    /// Shapes `text`, which uses a single font and script, into glyphs in logical order.
    fn shape(
        &self,
        text: &[Character],
        font_id: FontId,
        script: Script,
        is_right_to_left: bool,
    ) -> ShapedRun;
}

/// Hyphenation point lookup.
pub trait Hyphenator {
    /// Returns one flag per character of `word`; `true` allows a hyphenated break after it.
    fn word_hyphens(&self, word: &[Character]) -> Vec<bool>;
}

/// The collaborators every pipeline stage receives.
#[derive(Clone, Copy)]
pub struct TextServices<'a> {
    /// Font lookup and metrics.
    pub fonts: &'a dyn FontClient,
    /// Text shaping.
    pub shaper: &'a dyn Shaper,
    /// Hyphenation, when available.
    pub hyphenator: Option<&'a dyn Hyphenator>,
}

impl<'a> TextServices<'a> {
    /// Bundles a font client and a shaper.
    pub fn new(fonts: &'a dyn FontClient, shaper: &'a dyn Shaper) -> Self {
        Self {
            fonts,
            shaper,
            hyphenator: None,
        }
    }

    /// Adds a hyphenator.
    pub fn with_hyphenator(mut self, hyphenator: &'a dyn Hyphenator) -> Self {
        self.hyphenator = Some(hyphenator);
        self
    }
}

impl fmt::Debug for TextServices<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextServices")
            .field("hyphenator", &self.hyphenator.is_some())
            .finish_non_exhaustive()
    }
}
