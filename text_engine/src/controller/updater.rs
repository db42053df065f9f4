// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The model construction stages, run in order over the pending range.

use bitflags::bitflags;
use peniko::Color;

use crate::analysis::{
    set_hyphenation_info, set_line_break_info, set_scripts, set_word_break_info, validate_fonts,
};
use crate::bidi::{characters_direction, mirrored_text, set_bidirectional_info};
use crate::font::TextServices;
use crate::inputs::{FontDescription, LayoutOptions};
use crate::model::runs::covers;
use crate::model::{
    CharacterRun, GlyphRun, LogicalModel, StrikethroughGlyphRun, UnderlinedGlyphRun, VisualModel,
};
use crate::shape::{
    create_character_to_glyph_table, create_glyphs_per_character_table, shape_text,
    tables_are_consistent, update_glyph_metrics,
};
use crate::{CharacterIndex, ColorIndex, PointSize26Dot6};

bitflags! {
    /// Model construction stages.
    ///
    /// Each stage reads what the stages before it produced, so a stage only runs once every
    /// earlier stage is up to date.
    #[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
    pub struct Operations: u16 {
        /// Line and word break opportunities, and hyphenation points when enabled.
        const GET_LINE_BREAKS = 1 << 0;
        /// Script runs.
        const GET_SCRIPTS = 1 << 1;
        /// Font runs.
        const VALIDATE_FONTS = 1 << 2;
        /// Bidirectional paragraphs and character directions.
        const BIDI_INFO = 1 << 3;
        /// Glyphs and the glyph/character conversion tables.
        const SHAPE_TEXT = 1 << 4;
        /// Glyph metrics.
        const GET_GLYPH_METRICS = 1 << 5;
        /// Per glyph colors and decoration runs.
        const COLOR = 1 << 6;
        /// Every stage.
        const ALL = (1 << 7) - 1;
    }
}

/// What the stages read besides the models.
pub(crate) struct UpdateContext<'a> {
    pub(crate) services: TextServices<'a>,
    pub(crate) options: &'a LayoutOptions,
    pub(crate) default_font: &'a FontDescription,
    pub(crate) default_point_size: PointSize26Dot6,
}

/// Runs the stages of `operations` over `[start, len)`, appending to buffers truncated at
/// `start`. Returns the stages that ran.
///
/// A stage whose predecessors are still in `pending` is skipped.
pub(crate) fn update(
    ctx: &UpdateContext<'_>,
    logical: &mut LogicalModel,
    visual: &mut VisualModel,
    start: CharacterIndex,
    operations: Operations,
    pending: Operations,
) -> Operations {
    let count = logical.text.len() - start;
    let mut done = Operations::empty();
    let mut remaining = pending;
    let runs = |stage: Operations, remaining: Operations| {
        let earlier = Operations::from_bits_truncate(stage.bits() - 1);
        operations.contains(stage) && remaining.contains(stage) && !remaining.intersects(earlier)
    };

    if runs(Operations::GET_LINE_BREAKS, remaining) {
        log::trace!("line breaks of [{start}, {})", start + count);
        set_line_break_info(&logical.text, start, count, &mut logical.line_break_info);
        set_word_break_info(&logical.text, start, count, &mut logical.word_break_info);
        if let Some(hyphenator) = ctx.services.hyphenator.filter(|_| ctx.options.hyphenation) {
            set_hyphenation_info(
                hyphenator,
                &logical.text,
                start,
                count,
                &mut logical.line_break_info,
            );
        }
        remaining.remove(Operations::GET_LINE_BREAKS);
        done |= Operations::GET_LINE_BREAKS;
    }

    if runs(Operations::GET_SCRIPTS, remaining) {
        set_scripts(&logical.text, start, count, &mut logical.script_runs);
        debug_assert!(
            covers(&logical.script_runs, logical.text.len()),
            "script runs leave a gap"
        );
        remaining.remove(Operations::GET_SCRIPTS);
        done |= Operations::GET_SCRIPTS;
    }

    if runs(Operations::VALIDATE_FONTS, remaining) {
        validate_fonts(
            ctx.services.fonts,
            &logical.text,
            &logical.script_runs,
            &logical.markup.font_description_runs,
            ctx.default_font,
            ctx.default_point_size,
            start,
            count,
            &mut logical.font_runs,
        );
        debug_assert!(
            covers(&logical.font_runs, logical.text.len()),
            "font runs leave a gap"
        );
        remaining.remove(Operations::VALIDATE_FONTS);
        done |= Operations::VALIDATE_FONTS;
    }

    if runs(Operations::BIDI_INFO, remaining) {
        set_bidirectional_info(
            &logical.text,
            &logical.script_runs,
            &logical.line_break_info,
            start,
            count,
            ctx.options.base_direction,
            &mut logical.bidirectional_paragraph_info,
        );
        characters_direction(
            &logical.bidirectional_paragraph_info,
            start,
            count,
            &mut logical.character_directions,
        );
        remaining.remove(Operations::BIDI_INFO);
        done |= Operations::BIDI_INFO;
    }

    if runs(Operations::SHAPE_TEXT, remaining) {
        let text = mirrored_text(
            &logical.text,
            &logical.character_directions,
            &logical.bidirectional_paragraph_info,
            start,
            count,
        );
        let start_glyph = visual.shaped.glyphs.len();
        shape_text(
            ctx.services.shaper,
            &text,
            &logical.line_break_info,
            &logical.script_runs,
            &logical.font_runs,
            start,
            count,
            &mut visual.shaped,
        );
        create_glyphs_per_character_table(
            &visual.shaped.characters_per_glyph,
            start_glyph,
            &mut visual.glyphs_per_character,
        );
        create_character_to_glyph_table(
            &visual.shaped.characters_per_glyph,
            start_glyph,
            &mut visual.characters_to_glyph,
        );
        debug_assert!(
            tables_are_consistent(
                &visual.shaped.glyphs_to_characters,
                &visual.shaped.characters_per_glyph,
                &visual.characters_to_glyph,
                &visual.glyphs_per_character,
            ),
            "glyph and character tables disagree"
        );
        remaining.remove(Operations::SHAPE_TEXT);
        done |= Operations::SHAPE_TEXT;
    }

    if runs(Operations::GET_GLYPH_METRICS, remaining) {
        let start_glyph = visual
            .characters_to_glyph
            .get(start)
            .copied()
            .unwrap_or(visual.shaped.glyphs.len());
        update_glyph_metrics(
            ctx.services.fonts,
            &mut visual.shaped,
            start_glyph,
            &visual.characters_to_glyph,
            &logical.markup.embedded_items,
        );
        remaining.remove(Operations::GET_GLYPH_METRICS);
        done |= Operations::GET_GLYPH_METRICS;
    }

    if runs(Operations::COLOR, remaining) {
        set_color_segmentation(logical, visual);
        set_decoration_runs(logical, visual);
        done |= Operations::COLOR;
    }
    done
}

/// The glyphs representing `run`.
fn glyph_run_of(visual: &VisualModel, run: CharacterRun) -> GlyphRun {
    let glyphs = visual.shaped.glyphs.len();
    let Some(&first) = visual.characters_to_glyph.get(run.character_index) else {
        return GlyphRun::new(glyphs, 0);
    };
    if run.is_empty() {
        return GlyphRun::new(first, 0);
    }
    // The last character may share its glyphs with earlier characters of its group; the group's
    // glyph count is stored on its first character.
    let group = visual.characters_to_glyph[run.end() - 1];
    let group_first_character = visual.shaped.glyphs_to_characters[group];
    let end = group + visual.glyphs_per_character[group_first_character];
    GlyphRun::new(first, end - first)
}

/// Builds the color palette and the color index of every glyph from the color runs.
fn set_color_segmentation(logical: &LogicalModel, visual: &mut VisualModel) {
    visual.colors.clear();
    visual.color_indices.clear();
    if logical.markup.color_runs.is_empty() {
        return;
    }
    let mut palette: Vec<Color> = Vec::new();
    let mut indices: Vec<ColorIndex> = vec![0; visual.shaped.glyphs.len()];
    for run in &logical.markup.color_runs {
        let position = palette
            .iter()
            .position(|color| color.components == run.color.components)
            .unwrap_or_else(|| {
                palette.push(run.color);
                palette.len() - 1
            });
        let Ok(index) = ColorIndex::try_from(position + 1) else {
            log::warn!("color palette is full, ignoring color run");
            continue;
        };
        for glyph in glyph_run_of(visual, run.character_run).range() {
            indices[glyph] = index;
        }
    }
    visual.colors = palette;
    visual.color_indices = indices;
}

/// Converts underline and strikethrough character runs to glyph runs.
fn set_decoration_runs(logical: &LogicalModel, visual: &mut VisualModel) {
    let underline_runs = logical
        .markup
        .underlined_runs
        .iter()
        .map(|run| UnderlinedGlyphRun {
            glyph_run: glyph_run_of(visual, run.character_run),
            properties: run.properties,
        })
        .collect();
    let strikethrough_runs = logical
        .markup
        .strikethrough_runs
        .iter()
        .map(|run| StrikethroughGlyphRun {
            glyph_run: glyph_run_of(visual, run.character_run),
            color: run.color,
            height: run.height,
        })
        .collect();
    visual.underline_runs = underline_runs;
    visual.strikethrough_runs = strikethrough_runs;
}
