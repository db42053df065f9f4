// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaping and the glyph to character conversion tables.

use crate::analysis::is_new_paragraph;
use crate::font::{FontClient, GlyphInfo, ShapedRun, Shaper};
use crate::inputs::EmbeddedItem;
use crate::model::{FontRun, LineBreakInfo, ScriptRun};
use crate::{Character, CharacterIndex, GlyphIndex, Length};

/// Glyph buffers produced by [`shape_text`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapedGlyphs {
    /// Glyphs in logical order.
    pub glyphs: Vec<GlyphInfo>,
    /// For each glyph, the first character it represents.
    pub glyphs_to_characters: Vec<CharacterIndex>,
    /// For each glyph, the number of characters it represents.
    pub characters_per_glyph: Vec<Length>,
    /// Glyphs of paragraph separators.
    pub new_paragraph_glyphs: Vec<GlyphIndex>,
}

impl ShapedGlyphs {
    /// Drops every glyph from `glyph_index` onward.
    pub(crate) fn truncate(&mut self, glyph_index: GlyphIndex) {
        self.glyphs.truncate(glyph_index);
        self.glyphs_to_characters.truncate(glyph_index);
        self.characters_per_glyph.truncate(glyph_index);
        self.new_paragraph_glyphs.retain(|&index| index < glyph_index);
    }
}

/// Makes the cluster offsets of a shaped run usable: one per glyph, starting at zero, never
/// decreasing and inside the run. A run without glyphs gets one missing glyph.
fn sanitize(mut run: ShapedRun, font_id: crate::FontId, length: Length) -> ShapedRun {
    if run.glyphs.is_empty() {
        log::warn!("shaper produced no glyph for {length} characters");
        run.glyphs.push(GlyphInfo::new(font_id, 0));
        run.clusters.clear();
        run.clusters.push(0);
        return run;
    }
    let valid = run.clusters.len() == run.glyphs.len()
        && run.clusters.first() == Some(&0)
        && run.clusters.windows(2).all(|pair| pair[0] <= pair[1])
        && run.clusters.last().is_some_and(|&last| last < length);
    if !valid {
        log::warn!("shaper returned an inconsistent cluster map, clamping it");
        run.clusters.resize(run.glyphs.len(), length - 1);
        let mut previous = 0;
        for cluster in &mut run.clusters {
            *cluster = (*cluster).clamp(previous, length - 1);
            previous = *cluster;
        }
        run.clusters[0] = 0;
    }
    run
}

/// Shapes `text[start..start + count]` and appends the glyphs to `shaped`.
///
/// The text is split wherever the script, the font or the paragraph changes; each piece is
/// shaped on its own. Glyphs stay in logical order for right-to-left pieces as well.
pub fn shape_text(
    shaper: &dyn Shaper,
    text: &[Character],
    line_break_info: &[LineBreakInfo],
    script_runs: &[ScriptRun],
    font_runs: &[FontRun],
    start: CharacterIndex,
    count: Length,
    shaped: &mut ShapedGlyphs,
) {
    let end = start + count;
    let mut script_index = script_runs.partition_point(|run| run.character_run.end() <= start);
    let mut font_index = font_runs.partition_point(|run| run.character_run.end() <= start);
    let mut index = start;

    while index < end {
        while script_runs
            .get(script_index)
            .is_some_and(|run| run.character_run.end() <= index)
        {
            script_index += 1;
        }
        while font_runs
            .get(font_index)
            .is_some_and(|run| run.character_run.end() <= index)
        {
            font_index += 1;
        }
        let (Some(script_run), Some(font_run)) =
            (script_runs.get(script_index), font_runs.get(font_index))
        else {
            debug_assert!(false, "script and font runs must cover the shaped text");
            break;
        };

        let paragraph_end = line_break_info[index..end]
            .iter()
            .position(|&info| info == LineBreakInfo::MustBreak)
            .map_or(end, |offset| index + offset + 1);
        let segment_end = script_run
            .character_run
            .end()
            .min(font_run.character_run.end())
            .min(paragraph_end);
        let segment = &text[index..segment_end];

        let run = shaper.shape(
            segment,
            font_run.font_id,
            script_run.script,
            script_run.is_right_to_left,
        );
        let run = sanitize(run, font_run.font_id, segment.len());

        let first_glyph = shaped.glyphs.len();
        let separator = (segment_end == paragraph_end && is_new_paragraph(text, segment_end - 1))
            .then_some(segment.len() - 1);
        for (i, glyph) in run.glyphs.iter().enumerate() {
            let cluster = run.clusters[i];
            let next = run.clusters.get(i + 1).copied().unwrap_or(segment.len());
            shaped.glyphs.push(*glyph);
            shaped.glyphs_to_characters.push(index + cluster);
            shaped.characters_per_glyph.push(next - cluster);
            if Some(cluster) == separator {
                shaped.new_paragraph_glyphs.push(first_glyph + i);
            }
        }
        index = segment_end;
    }
}

/// Fills glyph metrics from the font client for every glyph from `start_glyph`, then gives
/// paragraph separators no footprint and embedded items their own size.
pub fn update_glyph_metrics(
    fonts: &dyn FontClient,
    shaped: &mut ShapedGlyphs,
    start_glyph: GlyphIndex,
    characters_to_glyph: &[GlyphIndex],
    embedded_items: &[EmbeddedItem],
) {
    fonts.glyph_metrics(&mut shaped.glyphs[start_glyph..]);
    for &index in &shaped.new_paragraph_glyphs {
        if index < start_glyph {
            continue;
        }
        let glyph = &mut shaped.glyphs[index];
        glyph.x_bearing = 0.0;
        glyph.width = 0.0;
        glyph.advance = 0.0;
    }
    for item in embedded_items {
        let Some(&index) = characters_to_glyph.get(item.character_index) else {
            continue;
        };
        if index < start_glyph {
            continue;
        }
        let glyph = &mut shaped.glyphs[index];
        glyph.width = item.size.width;
        glyph.advance = item.size.width;
        glyph.height = item.size.height;
        glyph.x_bearing = 0.0;
        glyph.y_bearing = item.size.height;
    }
}

/// Appends, for every character covered by the glyphs from `start_glyph`, how many glyphs it
/// produces. A group of glyphs covering several characters is credited to its first character;
/// the others produce zero glyphs.
pub fn create_glyphs_per_character_table(
    characters_per_glyph: &[Length],
    start_glyph: GlyphIndex,
    glyphs_per_character: &mut Vec<Length>,
) {
    let mut group_glyphs = 0;
    for &characters in &characters_per_glyph[start_glyph..] {
        group_glyphs += 1;
        if characters > 0 {
            glyphs_per_character.push(group_glyphs);
            glyphs_per_character.extend(core::iter::repeat_n(0, characters - 1));
            group_glyphs = 0;
        }
    }
}

/// Appends, for every character covered by the glyphs from `start_glyph`, the first glyph of
/// the group representing it.
pub fn create_character_to_glyph_table(
    characters_per_glyph: &[Length],
    start_glyph: GlyphIndex,
    characters_to_glyph: &mut Vec<GlyphIndex>,
) {
    let mut group_start = start_glyph;
    for (offset, &characters) in characters_per_glyph[start_glyph..].iter().enumerate() {
        if characters > 0 {
            characters_to_glyph.extend(core::iter::repeat_n(group_start, characters));
            group_start = start_glyph + offset + 1;
        }
    }
}

/// Returns `true` if the four conversion tables describe the same glyph/character partition.
pub fn tables_are_consistent(
    glyphs_to_characters: &[CharacterIndex],
    characters_per_glyph: &[Length],
    characters_to_glyph: &[GlyphIndex],
    glyphs_per_character: &[Length],
) -> bool {
    let number_of_characters = characters_to_glyph.len();
    if glyphs_to_characters.len() != characters_per_glyph.len()
        || glyphs_per_character.len() != number_of_characters
        || characters_per_glyph.iter().sum::<Length>() != number_of_characters
        || glyphs_per_character.iter().sum::<Length>() != glyphs_to_characters.len()
    {
        return false;
    }
    // Walk groups from the glyph side and check the character side agrees.
    let mut group_start = 0;
    let mut next_character = 0;
    for (glyph, &characters) in characters_per_glyph.iter().enumerate() {
        if glyphs_to_characters[glyph] != next_character {
            return false;
        }
        if characters == 0 {
            continue;
        }
        let group = next_character..next_character + characters;
        if glyphs_per_character[group.start] != glyph + 1 - group_start {
            return false;
        }
        for character in group.clone() {
            if characters_to_glyph[character] != group_start
                || (character != group.start && glyphs_per_character[character] != 0)
            {
                return false;
            }
        }
        next_character = group.end;
        group_start = glyph + 1;
    }
    true
}
