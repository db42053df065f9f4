// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

use super::line_break::BreakReason;
use crate::inputs::LayoutOptions;
use crate::model::VisualModel;
use crate::{Character, Size};

/// What the alignment pass needs to know about a line beyond its [`LineRun`](crate::LineRun).
#[derive(Clone, Copy, Debug)]
pub(crate) struct LineAlignmentInfo {
    pub(crate) break_reason: BreakReason,
    /// Advance of the white space hanging at the end of the line.
    pub(crate) trailing_whitespace: f32,
}

pub(crate) fn align(
    text: &[Character],
    visual: &mut VisualModel,
    lines_info: &[LineAlignmentInfo],
    options: &LayoutOptions,
    box_size: Size,
) {
    let layout_size = visual.layout_size;
    let alignment_width = if box_size.width.is_finite() {
        box_size.width
    } else {
        layout_size.width
    };

    for (line_index, info) in lines_info.iter().enumerate() {
        let line = visual.lines[line_index];
        let free_space = alignment_width - line.width;
        let is_rtl = line.direction;

        // Justification doesn't apply to the last line of a paragraph or to elided lines.
        let justifies = options.justify
            && free_space > 0.0
            && !line.ellipsis
            && !matches!(info.break_reason, BreakReason::None | BreakReason::Explicit);
        let mut offset = if justifies && justify(text, visual, line_index, free_space) {
            visual.lines[line_index].width = alignment_width;
            0.0
        } else {
            free_space.max(0.0) * options.horizontal_alignment.free_space_factor(is_rtl)
        };

        if is_rtl {
            // In RTL text, trailing whitespace is on the left. As we hang that whitespace, offset
            // the line to the left.
            offset -= info.trailing_whitespace;
        }
        visual.lines[line_index].alignment_offset = offset;
    }

    visual.vertical_offset = if box_size.height.is_finite() {
        (box_size.height - layout_size.height).max(0.0)
            * options.vertical_alignment.free_space_factor()
    } else {
        0.0
    };
}

/// Spreads `free_space` over the white space between the glyphs of a line.
///
/// Every glyph moves right by the extra space of the gaps visually left of it. Returns `false`
/// when the line has no gap to stretch.
fn justify(text: &[Character], visual: &mut VisualModel, line_index: usize, free_space: f32) -> bool {
    let line = visual.lines[line_index];
    let glyphs = line.glyph_run.range();
    let is_whitespace = |glyph: usize| {
        let character = visual.shaped.glyphs_to_characters[glyph];
        text[character].is_whitespace()
    };

    // Hanging white space does not stretch.
    let Some(last_visible) = glyphs.clone().rev().find(|&glyph| !is_whitespace(glyph)) else {
        return false;
    };
    let mut gaps: SmallVec<[f32; 16]> = (glyphs.start..last_visible)
        .filter(|&glyph| is_whitespace(glyph))
        .map(|glyph| visual.glyph_positions[glyph].x)
        .collect();
    if gaps.is_empty() {
        return false;
    }
    gaps.sort_by(f32::total_cmp);
    let adjustment = free_space / gaps.len() as f32;
    let shift = |x: f32| gaps.partition_point(|&gap| gap < x) as f32 * adjustment;

    for glyph in glyphs.clone() {
        let x = visual.glyph_positions[glyph].x;
        visual.glyph_positions[glyph].x += shift(x);
    }
    let hyphen = &mut visual.hyphen;
    for (position, &glyph) in hyphen.positions.iter_mut().zip(&hyphen.indices) {
        if line.glyph_run.contains(glyph) {
            position.x += shift(position.x);
        }
    }
    true
}
