// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

use super::{CharacterRun, GlyphRun};
use crate::font::GlyphInfo;
use crate::inputs::{UnderlineProperties, UnderlineType};
use crate::shape::ShapedGlyphs;
use crate::{
    CharacterDirection, CharacterIndex, ColorIndex, GlyphIndex, Length, LineIndex, Size, Vector2,
};

/// One laid out line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineRun {
    /// Glyphs of the line. With a middle ellipsis, the glyphs before it.
    pub glyph_run: GlyphRun,
    /// Characters of the line. With a middle ellipsis, the characters before it.
    pub character_run: CharacterRun,
    /// Advance of the line, excluding trailing white space.
    pub width: f32,
    /// Largest ascender of the fonts in the line, positive.
    pub ascender: f32,
    /// Lowest descender of the fonts in the line, negative.
    pub descender: f32,
    /// Ink of the last glyph reaching past its advance.
    pub extra_length: f32,
    /// Horizontal offset from the layout box edge, set by alignment.
    pub alignment_offset: f32,
    /// Direction of the paragraph the line belongs to.
    pub direction: CharacterDirection,
    /// The line ends, or for middle ellipsis is split, by an ellipsis.
    pub ellipsis: bool,
    /// The line shows two separate glyph ranges around a middle ellipsis.
    pub is_split_to_two_halves: bool,
    /// Glyphs after a middle ellipsis.
    pub glyph_run_second_half: GlyphRun,
    /// Characters after a middle ellipsis.
    pub character_run_second_half: CharacterRun,
    /// Extra space below the line.
    pub line_spacing: f32,
}

impl LineRun {
    /// Distance from the top of the line to the top of the next one.
    pub fn height(&self) -> f32 {
        self.ascender - self.descender + self.line_spacing
    }
}

/// Hyphen glyphs drawn at the end of lines broken at a hyphenation point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HyphenInfo {
    /// The hyphen glyphs.
    pub glyphs: Vec<GlyphInfo>,
    /// Pen position of each hyphen, in the same space as glyph positions.
    pub positions: Vec<Vector2>,
    /// The glyph each hyphen follows.
    pub indices: Vec<GlyphIndex>,
}

impl HyphenInfo {
    fn clear(&mut self) {
        self.glyphs.clear();
        self.positions.clear();
        self.indices.clear();
    }
}

/// The ellipsis glyph of elided text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EllipsisInfo {
    /// The ellipsis glyph.
    pub glyph: GlyphInfo,
    /// Its position, in the same space as glyph positions.
    pub position: Vector2,
    /// The line it belongs to.
    pub line_index: LineIndex,
}

/// An underlined glyph range.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnderlinedGlyphRun {
    /// The underlined glyphs.
    pub glyph_run: GlyphRun,
    /// How the underline is drawn.
    pub properties: UnderlineProperties,
}

/// A struck through glyph range.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrikethroughGlyphRun {
    /// The struck through glyphs.
    pub glyph_run: GlyphRun,
    /// Color of the line; the text color when unset.
    pub color: Option<Color>,
    /// Thickness in pixels; the font's strikeout thickness when unset.
    pub height: Option<f32>,
}

/// Rendering attributes stored with the visual model. The engine does not interpret them.
#[derive(Clone, Copy, Debug)]
pub struct Presentation {
    /// Default text color.
    pub text_color: Color,
    /// Shadow offset; zero disables the shadow.
    pub shadow_offset: Vector2,
    /// Shadow color.
    pub shadow_color: Color,
    /// Shadow blur radius.
    pub shadow_blur_radius: f32,
    /// Underline the whole text.
    pub underline_enabled: bool,
    /// Default underline color.
    pub underline_color: Color,
    /// Default underline thickness; zero uses the font's.
    pub underline_height: f32,
    /// Default underline shape.
    pub underline_type: UnderlineType,
    /// Dash length of dashed underlines.
    pub dashed_underline_width: f32,
    /// Gap between dashes of dashed underlines.
    pub dashed_underline_gap: f32,
    /// Strike through the whole text.
    pub strikethrough_enabled: bool,
    /// Default strikethrough color.
    pub strikethrough_color: Color,
    /// Default strikethrough thickness; zero uses the font's.
    pub strikethrough_height: f32,
    /// Outline color.
    pub outline_color: Color,
    /// Outline width; zero disables the outline.
    pub outline_width: u16,
    /// Draw a background behind the text.
    pub background_enabled: bool,
    /// Background color.
    pub background_color: Color,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            shadow_offset: Vector2::ZERO,
            shadow_color: Color::BLACK,
            shadow_blur_radius: 0.0,
            underline_enabled: false,
            underline_color: Color::BLACK,
            underline_height: 0.0,
            underline_type: UnderlineType::Solid,
            dashed_underline_width: 2.0,
            dashed_underline_gap: 1.0,
            strikethrough_enabled: false,
            strikethrough_color: Color::BLACK,
            strikethrough_height: 0.0,
            outline_color: Color::WHITE,
            outline_width: 0,
            background_enabled: false,
            background_color: Color::TRANSPARENT,
        }
    }
}

/// Glyphs, their positions and the lines of a laid out text.
///
/// This is what a renderer reads. Glyph positions are relative to the line start: add the
/// line's [`alignment_offset`](LineRun::alignment_offset) horizontally and
/// [`vertical_offset`](Self::vertical_offset) vertically, then scale by
/// [`text_scale`](Self::text_scale) for glyph sizes.
#[derive(Clone, Debug)]
pub struct VisualModel {
    pub(crate) shaped: ShapedGlyphs,
    pub(crate) characters_to_glyph: Vec<GlyphIndex>,
    pub(crate) glyphs_per_character: Vec<Length>,
    pub(crate) glyph_positions: Vec<Vector2>,
    pub(crate) lines: Vec<LineRun>,
    pub(crate) colors: Vec<Color>,
    pub(crate) color_indices: Vec<ColorIndex>,
    pub(crate) underline_runs: Vec<UnderlinedGlyphRun>,
    pub(crate) strikethrough_runs: Vec<StrikethroughGlyphRun>,
    pub(crate) hyphen: HyphenInfo,
    pub(crate) ellipsis: Option<EllipsisInfo>,
    pub(crate) text_elided: bool,
    pub(crate) start_index_of_elided_glyphs: GlyphIndex,
    pub(crate) end_index_of_elided_glyphs: GlyphIndex,
    pub(crate) first_middle_index_of_elided_glyphs: GlyphIndex,
    pub(crate) second_middle_index_of_elided_glyphs: GlyphIndex,
    pub(crate) text_scale: f32,
    pub(crate) layout_size: Size,
    pub(crate) natural_size: Size,
    pub(crate) vertical_offset: f32,
    /// Rendering attributes.
    pub presentation: Presentation,
}

impl Default for VisualModel {
    fn default() -> Self {
        Self {
            shaped: ShapedGlyphs::default(),
            characters_to_glyph: Vec::new(),
            glyphs_per_character: Vec::new(),
            glyph_positions: Vec::new(),
            lines: Vec::new(),
            colors: Vec::new(),
            color_indices: Vec::new(),
            underline_runs: Vec::new(),
            strikethrough_runs: Vec::new(),
            hyphen: HyphenInfo::default(),
            ellipsis: None,
            text_elided: false,
            start_index_of_elided_glyphs: 0,
            end_index_of_elided_glyphs: 0,
            first_middle_index_of_elided_glyphs: 0,
            second_middle_index_of_elided_glyphs: 0,
            text_scale: 1.0,
            layout_size: Size::ZERO,
            natural_size: Size::ZERO,
            vertical_offset: 0.0,
            presentation: Presentation::default(),
        }
    }
}

impl VisualModel {
    /// All glyphs in logical order.
    pub fn glyphs(&self) -> &[GlyphInfo] {
        &self.shaped.glyphs
    }

    /// Number of glyphs.
    pub fn number_of_glyphs(&self) -> Length {
        self.shaped.glyphs.len()
    }

    /// Position of every glyph's bounding box origin; empty before layout.
    pub fn glyph_positions(&self) -> &[Vector2] {
        &self.glyph_positions
    }

    /// For each glyph, the first character it represents.
    pub fn glyphs_to_characters(&self) -> &[CharacterIndex] {
        &self.shaped.glyphs_to_characters
    }

    /// For each glyph, the number of characters it represents.
    pub fn characters_per_glyph(&self) -> &[Length] {
        &self.shaped.characters_per_glyph
    }

    /// For each character, the first glyph of its group.
    pub fn characters_to_glyph(&self) -> &[GlyphIndex] {
        &self.characters_to_glyph
    }

    /// For each character, the number of glyphs it produces.
    pub fn glyphs_per_character(&self) -> &[Length] {
        &self.glyphs_per_character
    }

    /// Glyphs of paragraph separators, which have no footprint.
    pub fn new_paragraph_glyphs(&self) -> &[GlyphIndex] {
        &self.shaped.new_paragraph_glyphs
    }

    /// Laid out lines, top to bottom.
    pub fn lines(&self) -> &[LineRun] {
        &self.lines
    }

    /// Number of laid out lines.
    pub fn total_number_of_lines(&self) -> Length {
        self.lines.len()
    }

    /// The first line touching `glyph_run` and the number of lines it spans.
    pub fn number_of_lines(&self, glyph_run: GlyphRun) -> (LineIndex, Length) {
        let mut first = None;
        let mut count = 0;
        for (index, line) in self.lines.iter().enumerate() {
            let line_end = line.glyph_run.end().max(line.glyph_run_second_half.end());
            let intersects = line.glyph_run.glyph_index < glyph_run.end()
                && glyph_run.glyph_index < line_end;
            if intersects {
                first.get_or_insert(index);
                count += 1;
            }
        }
        (first.unwrap_or(0), count)
    }

    /// The line showing `glyph_index`.
    pub fn line_of_glyph(&self, glyph_index: GlyphIndex) -> Option<LineIndex> {
        self.lines.iter().position(|line| {
            line.glyph_run.contains(glyph_index)
                || (line.is_split_to_two_halves && line.glyph_run_second_half.contains(glyph_index))
        })
    }

    /// The line containing `character_index`.
    pub fn line_of_character(&self, character_index: CharacterIndex) -> Option<LineIndex> {
        self.lines.iter().position(|line| {
            line.character_run.contains(character_index)
                || (line.is_split_to_two_halves
                    && line.character_run_second_half.contains(character_index))
        })
    }

    /// Color palette referenced by [`color_indices`](Self::color_indices).
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Per glyph color index: `0` is the default text color, `n` is `colors()[n - 1]`.
    ///
    /// Empty when the text has no color runs.
    pub fn color_indices(&self) -> &[ColorIndex] {
        &self.color_indices
    }

    /// The color of `glyph_index`.
    pub fn glyph_color(&self, glyph_index: GlyphIndex) -> Color {
        self.color_indices
            .get(glyph_index)
            .and_then(|&index| usize::from(index).checked_sub(1))
            .and_then(|index| self.colors.get(index))
            .copied()
            .unwrap_or(self.presentation.text_color)
    }

    /// Underlined glyph ranges.
    pub fn underline_runs(&self) -> &[UnderlinedGlyphRun] {
        &self.underline_runs
    }

    /// Underlined glyph ranges intersecting `glyph_run`.
    pub fn underline_runs_in(&self, glyph_run: GlyphRun) -> impl Iterator<Item = &UnderlinedGlyphRun> {
        self.underline_runs.iter().filter(move |run| {
            run.glyph_run.glyph_index < glyph_run.end() && glyph_run.glyph_index < run.glyph_run.end()
        })
    }

    /// Struck through glyph ranges.
    pub fn strikethrough_runs(&self) -> &[StrikethroughGlyphRun] {
        &self.strikethrough_runs
    }

    /// Hyphens inserted by layout.
    pub fn hyphen(&self) -> &HyphenInfo {
        &self.hyphen
    }

    /// The ellipsis of elided text.
    pub fn ellipsis(&self) -> Option<&EllipsisInfo> {
        self.ellipsis.as_ref()
    }

    /// Whether layout cut the text.
    pub fn is_text_elided(&self) -> bool {
        self.text_elided
    }

    /// First displayed glyph of elided text.
    pub fn start_index_of_elided_glyphs(&self) -> GlyphIndex {
        self.start_index_of_elided_glyphs
    }

    /// Last displayed glyph of elided text.
    pub fn end_index_of_elided_glyphs(&self) -> GlyphIndex {
        self.end_index_of_elided_glyphs
    }

    /// Last displayed glyph before a middle ellipsis.
    pub fn first_middle_index_of_elided_glyphs(&self) -> GlyphIndex {
        self.first_middle_index_of_elided_glyphs
    }

    /// First displayed glyph after a middle ellipsis.
    pub fn second_middle_index_of_elided_glyphs(&self) -> GlyphIndex {
        self.second_middle_index_of_elided_glyphs
    }

    /// Scale applied by shrink-to-fit; `1.0` otherwise.
    pub fn text_scale(&self) -> f32 {
        self.text_scale
    }

    /// Size of the laid out text.
    pub fn layout_size(&self) -> Size {
        self.layout_size
    }

    /// Size of the text laid out without width constraint.
    pub fn natural_size(&self) -> Size {
        self.natural_size
    }

    /// Vertical offset of the text block from vertical alignment.
    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    /// Drops glyphs from `glyph_index` and character tables from `character_index`.
    pub(crate) fn truncate(&mut self, glyph_index: GlyphIndex, character_index: CharacterIndex) {
        self.shaped.truncate(glyph_index);
        self.characters_to_glyph.truncate(character_index);
        self.glyphs_per_character.truncate(character_index);
        self.color_indices.clear();
        self.colors.clear();
        self.underline_runs.clear();
        self.strikethrough_runs.clear();
        self.clear_layout();
    }

    /// Drops everything layout produced.
    pub(crate) fn clear_layout(&mut self) {
        self.glyph_positions.clear();
        self.lines.clear();
        self.hyphen.clear();
        self.ellipsis = None;
        self.text_elided = false;
        self.start_index_of_elided_glyphs = 0;
        self.end_index_of_elided_glyphs = 0;
        self.first_middle_index_of_elided_glyphs = 0;
        self.second_middle_index_of_elided_glyphs = 0;
        self.text_scale = 1.0;
        self.layout_size = Size::ZERO;
        self.vertical_offset = 0.0;
    }

    /// Drops every glyph and layout result, keeping presentation attributes.
    pub(crate) fn clear(&mut self) {
        self.truncate(0, 0);
        self.natural_size = Size::ZERO;
    }
}
