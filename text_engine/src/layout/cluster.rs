// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::model::{CharacterRun, GlyphRun, LineBreakInfo};
use crate::shape::ShapedGlyphs;
use crate::{Character, CharacterDirection, FontId};

/// The smallest unit layout places: characters and the glyphs they shape to, which can't be
/// separated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Cluster {
    pub(crate) characters: CharacterRun,
    pub(crate) glyphs: GlyphRun,
    pub(crate) advance: f32,
    pub(crate) is_whitespace: bool,
    /// Break opportunity after the last character.
    pub(crate) break_info: LineBreakInfo,
    pub(crate) is_right_to_left: bool,
    /// Font of the last glyph, used for hyphens and ellipses following the cluster.
    pub(crate) font_id: FontId,
}

/// Groups the shaped glyphs into clusters, in logical order.
pub(crate) fn build_clusters(
    text: &[Character],
    line_break_info: &[LineBreakInfo],
    directions: &[CharacterDirection],
    shaped: &ShapedGlyphs,
) -> Vec<Cluster> {
    let mut clusters = Vec::new();
    let mut glyph_start = 0;
    let mut advance = 0.0;
    for (glyph, &characters) in shaped.characters_per_glyph.iter().enumerate() {
        advance += shaped.glyphs[glyph].advance;
        if characters == 0 {
            continue;
        }
        let first = shaped.glyphs_to_characters[glyph];
        let run = CharacterRun::new(first, characters);
        clusters.push(Cluster {
            characters: run,
            glyphs: GlyphRun::new(glyph_start, glyph + 1 - glyph_start),
            advance,
            is_whitespace: text[run.range()].iter().all(|ch| ch.is_whitespace()),
            break_info: line_break_info[run.end() - 1],
            is_right_to_left: directions.get(first).copied().unwrap_or(false),
            font_id: shaped.glyphs[glyph].font_id,
        });
        glyph_start = glyph + 1;
        advance = 0.0;
    }
    clusters
}

/// Index of the cluster containing character `index`.
pub(crate) fn cluster_of_character(clusters: &[Cluster], index: usize) -> usize {
    clusters.partition_point(|cluster| cluster.characters.end() <= index)
}
