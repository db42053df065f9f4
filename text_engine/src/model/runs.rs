// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use icu_properties::props::Script;
use unicode_bidi::Level;

use crate::{CharacterDirection, CharacterIndex, FontId, GlyphIndex, Length};

/// A contiguous range of characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CharacterRun {
    /// Index of the first character.
    pub character_index: CharacterIndex,
    /// Number of characters in the run.
    pub number_of_characters: Length,
}

impl CharacterRun {
    /// Creates a run covering `number_of_characters` characters from `character_index`.
    pub const fn new(character_index: CharacterIndex, number_of_characters: Length) -> Self {
        Self {
            character_index,
            number_of_characters,
        }
    }

    /// One past the last character of the run.
    pub fn end(&self) -> CharacterIndex {
        self.character_index + self.number_of_characters
    }

    /// The run as a range of character indices.
    pub fn range(&self) -> Range<CharacterIndex> {
        self.character_index..self.end()
    }

    /// Returns `true` if `index` is inside the run.
    pub fn contains(&self, index: CharacterIndex) -> bool {
        self.range().contains(&index)
    }

    /// Returns `true` if the run covers no character.
    pub fn is_empty(&self) -> bool {
        self.number_of_characters == 0
    }
}

/// A contiguous range of glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GlyphRun {
    /// Index of the first glyph.
    pub glyph_index: GlyphIndex,
    /// Number of glyphs in the run.
    pub number_of_glyphs: Length,
}

impl GlyphRun {
    /// Creates a run covering `number_of_glyphs` glyphs from `glyph_index`.
    pub const fn new(glyph_index: GlyphIndex, number_of_glyphs: Length) -> Self {
        Self {
            glyph_index,
            number_of_glyphs,
        }
    }

    /// One past the last glyph of the run.
    pub fn end(&self) -> GlyphIndex {
        self.glyph_index + self.number_of_glyphs
    }

    /// The run as a range of glyph indices.
    pub fn range(&self) -> Range<GlyphIndex> {
        self.glyph_index..self.end()
    }

    /// Returns `true` if `index` is inside the run.
    pub fn contains(&self, index: GlyphIndex) -> bool {
        self.range().contains(&index)
    }
}

/// Characters sharing one Unicode script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptRun {
    /// The characters of the run.
    pub character_run: CharacterRun,
    /// The detected script.
    pub script: Script,
    /// Whether the script is written right to left.
    pub is_right_to_left: bool,
}

/// Characters rendered with one resolved font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontRun {
    /// The characters of the run.
    pub character_run: CharacterRun,
    /// The font able to render every character of the run.
    pub font_id: FontId,
}

/// Bidirectional state of one paragraph that contains right-to-left text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidirectionalParagraphInfoRun {
    /// The characters of the paragraph, including its terminating separator.
    pub character_run: CharacterRun,
    /// The resolved paragraph direction.
    pub direction: CharacterDirection,
    pub(crate) levels: Vec<Level>,
}

impl BidirectionalParagraphInfoRun {
    /// The resolved embedding level of every character of the paragraph.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }
}

/// Visual order of the characters of one laid out line of a bidirectional paragraph.
///
/// The conversion table is owned by the run and released with it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BidirectionalLineInfoRun {
    /// The characters of the line.
    pub character_run: CharacterRun,
    /// For each visual position of the line, the logical character index.
    pub visual_to_logical_map: Vec<CharacterIndex>,
    /// The direction of the paragraph the line belongs to.
    pub direction: CharacterDirection,
    /// Whether visual order equals logical order.
    pub is_identity: bool,
}

/// Runs addressed by a character range.
pub(crate) trait RunRange {
    fn character_run(&self) -> &CharacterRun;
    fn character_run_mut(&mut self) -> &mut CharacterRun;
}

macro_rules! impl_run_range {
    ($($ty:ty),*) => {
        $(
            impl RunRange for $ty {
                fn character_run(&self) -> &CharacterRun {
                    &self.character_run
                }
                fn character_run_mut(&mut self) -> &mut CharacterRun {
                    &mut self.character_run
                }
            }
        )*
    };
}

impl_run_range!(
    ScriptRun,
    FontRun,
    BidirectionalParagraphInfoRun,
    BidirectionalLineInfoRun
);

/// Returns the run that contains `index` in a sorted, non-overlapping run list.
pub(crate) fn find_run<R: RunRange>(runs: &[R], index: CharacterIndex) -> Option<&R> {
    let pos = runs.partition_point(|run| run.character_run().end() <= index);
    runs.get(pos).filter(|run| run.character_run().contains(index))
}

/// Drops every run from `index` onward, shortening the run that straddles it.
pub(crate) fn truncate_runs<R: RunRange>(runs: &mut Vec<R>, index: CharacterIndex) {
    runs.retain(|run| run.character_run().character_index < index);
    if let Some(last) = runs.last_mut() {
        let run = last.character_run_mut();
        if run.end() > index {
            run.number_of_characters = index - run.character_index;
        }
    }
}

/// Returns `true` if the runs cover `[0, total)` in order with no gap or overlap.
pub(crate) fn covers<R: RunRange>(runs: &[R], total: Length) -> bool {
    let mut next = 0;
    for run in runs {
        let run = run.character_run();
        if run.character_index != next || run.is_empty() {
            return false;
        }
        next = run.end();
    }
    next == total
}

/// Adjusts sparse markup runs after `count` characters were inserted at `index`.
pub(crate) fn shift_for_insert<R: RunRange>(runs: &mut [R], index: CharacterIndex, count: Length) {
    for run in runs {
        let run = run.character_run_mut();
        if run.character_index >= index {
            run.character_index += count;
        } else if run.end() > index {
            run.number_of_characters += count;
        }
    }
}

/// Adjusts sparse markup runs after the characters in `removed` were deleted.
pub(crate) fn shift_for_remove<R: RunRange>(runs: &mut Vec<R>, removed: Range<CharacterIndex>) {
    let count = removed.len();
    for run in runs.iter_mut() {
        let run = run.character_run_mut();
        let start = run.character_index;
        let end = run.end();
        let cut_start = start.clamp(removed.start, removed.end);
        let cut_end = end.clamp(removed.start, removed.end);
        run.number_of_characters -= cut_end - cut_start;
        if start >= removed.end {
            run.character_index -= count;
        } else if start > removed.start {
            run.character_index = removed.start;
        }
    }
    runs.retain(|run| !run.character_run().is_empty());
}
