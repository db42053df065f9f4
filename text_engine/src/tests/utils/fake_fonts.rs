// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic font, shaping and hyphenation collaborators.
//!
//! Every glyph is ten pixels wide with an eight pixel box starting one pixel after the pen.
//! White space has no box. Every font has an ascender of 8 and a descender of -2, so lines are
//! ten pixels tall.

use core::cell::Cell;

use icu_properties::props::Script;

use crate::font::{FontClient, FontMetrics, GlyphInfo, Hyphenator, ShapedRun, Shaper};
use crate::inputs::FontDescription;
use crate::{Character, FontId, GlyphId, PointSize26Dot6};

pub(crate) const LATIN_FONT: FontId = 1;
pub(crate) const LATIN_BOLD_FONT: FontId = 2;
pub(crate) const RTL_FONT: FontId = 3;

pub(crate) const ADVANCE: f32 = 10.0;
pub(crate) const LINE_HEIGHT: f32 = 10.0;
pub(crate) const LIGATURE_FI: GlyphId = 0xFB01;

const COMBINING_ACUTE: char = '\u{0301}';

fn is_right_to_left_character(ch: Character) -> bool {
    ('\u{0590}'..='\u{06FF}').contains(&ch)
}

fn is_latin_character(ch: Character) -> bool {
    u32::from(ch) <= 0xFF || matches!(ch, '\u{2026}' | COMBINING_ACUTE)
}

/// Font client and shaper with one Latin family (regular and bold) and one right-to-left
/// family covering Hebrew and Arabic.
#[derive(Default)]
pub(crate) struct FakeFonts {
    ligatures: bool,
    font_queries: Cell<usize>,
    shape_calls: Cell<usize>,
}

impl FakeFonts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Shapes "fi" into a single glyph.
    pub(crate) fn with_ligatures() -> Self {
        Self {
            ligatures: true,
            ..Self::default()
        }
    }

    /// Number of times any collaborator method was called.
    pub(crate) fn calls(&self) -> usize {
        self.font_queries.get() + self.shape_calls.get()
    }

    pub(crate) fn shape_calls(&self) -> usize {
        self.shape_calls.get()
    }

    fn count(&self) {
        self.font_queries.set(self.font_queries.get() + 1);
    }
}

impl FontClient for FakeFonts {
    fn font_id(&self, description: &FontDescription, _point_size: PointSize26Dot6) -> FontId {
        self.count();
        if description.family == "Rtl" {
            RTL_FONT
        } else if description.weight.value() >= 600.0 {
            LATIN_BOLD_FONT
        } else {
            LATIN_FONT
        }
    }

    fn has_glyph(&self, font_id: FontId, character: Character) -> bool {
        self.count();
        match font_id {
            LATIN_FONT | LATIN_BOLD_FONT => is_latin_character(character),
            RTL_FONT => is_right_to_left_character(character),
            _ => false,
        }
    }

    fn find_fallback_font(
        &self,
        character: Character,
        preferred: &FontDescription,
        _point_size: PointSize26Dot6,
    ) -> Option<FontId> {
        self.count();
        if is_right_to_left_character(character) {
            Some(RTL_FONT)
        } else if is_latin_character(character) && preferred.weight.value() >= 600.0 {
            Some(LATIN_BOLD_FONT)
        } else if is_latin_character(character) {
            Some(LATIN_FONT)
        } else {
            None
        }
    }

    fn font_metrics(&self, _font_id: FontId) -> FontMetrics {
        self.count();
        FontMetrics {
            ascender: 8.0,
            descender: -2.0,
            height: LINE_HEIGHT,
            underline_position: 1.0,
            underline_thickness: 1.0,
        }
    }

    fn glyph_metrics(&self, glyphs: &mut [GlyphInfo]) {
        self.count();
        for glyph in glyphs {
            let is_blank = char::from_u32(glyph.index).is_some_and(char::is_whitespace);
            if is_blank {
                glyph.width = 0.0;
                glyph.height = 0.0;
            } else {
                glyph.width = 8.0;
                glyph.height = 8.0;
                glyph.x_bearing += 1.0;
                glyph.y_bearing += 8.0;
            }
        }
    }

    fn set_dpi(&self, _horizontal: u32, _vertical: u32) {
        self.count();
    }
}

impl Shaper for FakeFonts {
    fn shape(
        &self,
        text: &[Character],
        font_id: FontId,
        _script: Script,
        _is_right_to_left: bool,
    ) -> ShapedRun {
        self.shape_calls.set(self.shape_calls.get() + 1);
        let mut run = ShapedRun::default();
        let mut index = 0;
        while index < text.len() {
            let ch = text[index];
            if self.ligatures && ch == 'f' && text.get(index + 1) == Some(&'i') {
                run.glyphs.push(GlyphInfo {
                    advance: ADVANCE,
                    ..GlyphInfo::new(font_id, LIGATURE_FI)
                });
                run.clusters.push(index);
                index += 2;
                continue;
            }
            if ch == COMBINING_ACUTE {
                if let Some(&cluster) = run.clusters.last() {
                    // The mark joins the cluster of its base.
                    run.glyphs.push(GlyphInfo::new(font_id, u32::from(ch)));
                    run.clusters.push(cluster);
                    index += 1;
                    continue;
                }
            }
            run.glyphs.push(GlyphInfo {
                advance: ADVANCE,
                ..GlyphInfo::new(font_id, u32::from(ch))
            });
            run.clusters.push(index);
            index += 1;
        }
        run
    }
}

/// Allows a hyphen after every third character of a word.
#[derive(Default)]
pub(crate) struct EveryThirdHyphenator {
    calls: Cell<usize>,
}

impl EveryThirdHyphenator {
    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Hyphenator for EveryThirdHyphenator {
    fn word_hyphens(&self, word: &[Character]) -> Vec<bool> {
        self.calls.set(self.calls.get() + 1);
        (0..word.len()).map(|i| (i + 1) % 3 == 0).collect()
    }
}
