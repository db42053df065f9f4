// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing and cursor geometry over a laid out text.
//!
//! Coordinates are relative to the top left corner of the laid out text: line alignment offsets
//! are included and the vertical alignment offset is not.

use core::ops::Range;

use icu_properties::props::Script;

use super::Controller;
use crate::analysis::is_new_paragraph;
use crate::font::TextServices;
use crate::model::runs::find_run;
use crate::model::{LineRun, LogicalModel, VisualModel, WordBreakInfo};
use crate::{CharacterIndex, GlyphIndex, Length, LineIndex, Vector2};

/// Where to draw the cursor at a logical position.
///
/// At the boundary of two runs with different directions the position has two visual
/// locations: the primary cursor follows the paragraph direction and the secondary cursor marks
/// the other one. Both then take half the font height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorInfo {
    /// Top of the line holding the cursor.
    pub line_offset: f32,
    /// Ascender minus descender of that line.
    pub line_height: f32,
    /// Top of the primary cursor.
    pub primary_position: Vector2,
    /// Height of the primary cursor.
    pub primary_cursor_height: f32,
    /// The position has a second visual location.
    pub is_secondary_cursor: bool,
    /// Top of the secondary cursor.
    pub secondary_position: Vector2,
    /// Height of the secondary cursor.
    pub secondary_cursor_height: f32,
}

/// The glyphs one group of characters was shaped into.
#[derive(Clone, Copy, Debug)]
struct GlyphGroup {
    first_glyph: GlyphIndex,
    glyphs: Length,
    characters: Length,
    /// Pen position at the group's left edge.
    left: f32,
    advance: f32,
}

impl GlyphGroup {
    /// The laid out group containing `glyph`.
    fn of(visual: &VisualModel, glyph: GlyphIndex) -> Option<Self> {
        let first_character = *visual.shaped.glyphs_to_characters.get(glyph)?;
        let first_glyph = *visual.characters_to_glyph.get(first_character)?;
        let glyphs = visual
            .glyphs_per_character
            .get(first_character)
            .copied()
            .unwrap_or(1)
            .max(1);
        let scale = visual.text_scale;
        let mut group = Self {
            first_glyph,
            glyphs,
            characters: 0,
            left: f32::INFINITY,
            advance: 0.0,
        };
        for index in first_glyph..first_glyph + glyphs {
            let info = visual.shaped.glyphs.get(index)?;
            let position = visual.glyph_positions.get(index)?;
            group.left = group.left.min(position.x - info.x_bearing * scale);
            group.advance += info.advance * scale;
            group.characters += visual.shaped.characters_per_glyph[index];
        }
        Some(group)
    }
}

/// Whether cursors may stop inside a ligature of `script`.
fn ligature_splits(script: Option<Script>) -> bool {
    matches!(script, Some(Script::Latin | Script::Arabic))
}

impl Controller {
    /// The line at height `y`; the last line when `y` is below the text.
    pub fn closest_line(&self, y: f32) -> LineIndex {
        let mut bottom = 0.0;
        for (index, line) in self.visual.lines.iter().enumerate() {
            bottom += line.height();
            if y < bottom {
                return index;
            }
        }
        self.visual.lines.len().saturating_sub(1)
    }

    /// Distance from the top of the text to the top of `line`.
    pub fn line_offset(&self, line: LineIndex) -> f32 {
        let lines = &self.visual.lines;
        lines[..line.min(lines.len())].iter().map(LineRun::height).sum()
    }

    /// The logical cursor index closest to the point `(x, y)`.
    ///
    /// Inside a line, the cursor goes before the first glyph whose center lies right of `x`.
    /// Past the end of a line that is not the last one, the cursor stays before the character
    /// the line wraps or breaks after.
    pub fn closest_cursor_index(&self, x: f32, y: f32) -> CharacterIndex {
        let (logical, visual) = (&self.logical, &self.visual);
        if visual.shaped.glyphs.is_empty() || visual.lines.is_empty() {
            return 0;
        }
        let line_index = self.closest_line(y);
        let line = &visual.lines[line_index];
        let last_line = line_index + 1 == visual.lines.len();
        let x = x - line.alignment_offset;
        let start = line.character_run.character_index;
        let end = line.character_run.end();

        let mut cursor = end;
        let mut previous_group = None;
        'characters: for visual_index in start..end {
            let character = logical.visual_to_logical(visual_index);
            let Some(&glyph) = visual.characters_to_glyph.get(character) else {
                break;
            };
            // The other characters of a group follow its first one in visual order.
            if previous_group.replace(glyph) == Some(glyph) {
                continue;
            }
            let Some(group) = GlyphGroup::of(visual, glyph) else {
                continue;
            };
            let blocks = if group.characters > group.glyphs
                && ligature_splits(logical.script(character))
            {
                group.characters
            } else {
                1
            };
            let block_advance = group.advance / blocks as f32;
            for block in 0..blocks {
                if x < group.left + (block as f32 + 0.5) * block_advance {
                    cursor = visual_index + block;
                    break 'characters;
                }
            }
        }

        if cursor != logical.text.len() {
            if !line.direction {
                if cursor == end && end > start {
                    cursor -= 1;
                }
            } else if !last_line && cursor == start {
                cursor += 1;
            }
        } else if !last_line && cursor > 0 && is_new_paragraph(&logical.text, cursor - 1) {
            cursor -= 1;
        }
        log::trace!("closest cursor of ({x}, {y}) is visual {cursor} on line {line_index}");
        logical_cursor(logical, line, cursor)
    }

    /// Where to draw the cursor at logical cursor index `index`.
    ///
    /// Returns `None` before layout, for an index past the text and for characters removed by
    /// elision.
    pub fn cursor_position(
        &self,
        services: &TextServices<'_>,
        index: CharacterIndex,
    ) -> Option<CursorInfo> {
        let (logical, visual) = (&self.logical, &self.visual);
        let text = &logical.text;
        if text.is_empty() || index > text.len() || visual.lines.is_empty() {
            return None;
        }
        let is_last_position = index == text.len();
        let character_of_line = if is_last_position { index - 1 } else { index };
        let line_index = visual.line_of_character(character_of_line)?;
        let line = &visual.lines[line_index];
        let scale = visual.text_scale;

        if is_last_position && is_new_paragraph(text, character_of_line) {
            // The cursor starts the empty line after the final paragraph separator.
            let line_offset = self.line_offset(line_index + 1);
            let line_height = visual
                .lines
                .get(line_index + 1)
                .map_or(line.ascender - line.descender, |next| next.ascender - next.descender);
            let x = if line.direction {
                visual.layout_size.width
            } else {
                0.0
            };
            return Some(CursorInfo {
                line_offset,
                line_height,
                primary_position: Vector2::new(x, line_offset),
                primary_cursor_height: line_height,
                ..CursorInfo::default()
            });
        }

        let line_start = line.character_run.character_index;
        let line_end = line.character_run.end();
        let is_first_of_line = index == line_start;
        let is_last_of_line = index == line_end;
        let character = if is_first_of_line { index } else { index - 1 };
        let next_character = if is_last_of_line { character } else { index };
        let current_rtl = logical.character_direction(character);
        let next_rtl = logical.character_direction(next_character);
        let rtl_paragraph = line.direction;

        let is_secondary_cursor = (!is_last_of_line && current_rtl != next_rtl)
            || ((is_first_of_line || is_last_of_line) && rtl_paragraph != current_rtl);
        let line_offset = self.line_offset(line_index);
        let line_height = line.ascender - line.descender;

        let primary_character = if !is_secondary_cursor {
            character
        } else if is_last_of_line {
            let edge = if rtl_paragraph { line_start } else { line_end - 1 };
            logical.visual_to_logical(edge)
        } else if is_first_of_line {
            let edge = if rtl_paragraph { line_end - 1 } else { line_start };
            logical.visual_to_logical(edge)
        } else if rtl_paragraph == current_rtl {
            character
        } else {
            next_character
        };

        let glyph = *visual.characters_to_glyph.get(primary_character)?;
        let group = GlyphGroup::of(visual, glyph)?;
        let font = services
            .fonts
            .font_metrics(visual.shaped.glyphs[group.first_glyph].font_id);
        let font_height = font.height * scale;
        let font_ascender = font.ascender * scale;

        let add_advance = (is_last_of_line && !rtl_paragraph)
            || (is_first_of_line && rtl_paragraph)
            || (!is_first_of_line && !is_last_position && !current_rtl);
        let mut advance = if add_advance { group.advance } else { 0.0 };
        let characters = visual.shaped.characters_per_glyph[glyph];
        let inside = character
            .checked_sub(visual.shaped.glyphs_to_characters[glyph])
            .filter(|&inside| inside < characters);
        if let Some(inside) = inside.filter(|_| !is_last_of_line && characters > 1) {
            // Inside a ligature, the cursor stops at an even share of its advance.
            let mut before = usize::from(!is_first_of_line) + inside;
            if logical.character_direction(primary_character) {
                before = characters - before;
            }
            advance = before as f32 * group.advance / characters as f32;
        }

        let half_height = 0.5 * font_height;
        let mut info = CursorInfo {
            line_offset,
            line_height,
            primary_position: Vector2::new(
                group.left + advance + line.alignment_offset,
                line_offset + line.ascender - font_ascender,
            ),
            primary_cursor_height: if is_secondary_cursor {
                half_height
            } else {
                font_height
            },
            is_secondary_cursor,
            ..CursorInfo::default()
        };

        if is_secondary_cursor {
            let secondary_character = if is_last_of_line || rtl_paragraph != current_rtl {
                character
            } else {
                next_character
            };
            let glyph = *visual.characters_to_glyph.get(secondary_character)?;
            let group = GlyphGroup::of(visual, glyph)?;
            let font = services
                .fonts
                .font_metrics(visual.shaped.glyphs[group.first_glyph].font_id);
            let add_advance = (!is_first_of_line && !current_rtl)
                || (is_first_of_line && !rtl_paragraph);
            let advance = if add_advance { group.advance } else { 0.0 };
            info.secondary_cursor_height = half_height;
            info.secondary_position = Vector2::new(
                group.left + advance + line.alignment_offset,
                line_offset + line_height - half_height - line.descender
                    - (font.height - font.ascender) * scale,
            );
        }
        Some(info)
    }

    /// The characters a double tap at `(x, y)` selects: the word or the run of white space
    /// under the point.
    ///
    /// Returns `None` for an empty text.
    pub fn selection_indices(&self, x: f32, y: f32) -> Option<Range<CharacterIndex>> {
        let len = self.logical.text.len();
        if len == 0 {
            return None;
        }
        let hit = self.closest_cursor_index(x, y).min(len - 1);
        let info = &self.logical.word_break_info;
        let ends_word = |index: CharacterIndex| info.get(index) != Some(&WordBreakInfo::NoBreak);
        let start = (0..hit).rev().find(|&index| ends_word(index)).map_or(0, |index| index + 1);
        let end = (hit..len).find(|&index| ends_word(index)).map_or(len, |index| index + 1);
        Some(start..end)
    }
}

/// The logical cursor index at visual cursor index `visual_cursor` of `line`.
///
/// Between two characters of different directions, the one following the paragraph direction
/// decides.
fn logical_cursor(
    logical: &LogicalModel,
    line: &LineRun,
    visual_cursor: CharacterIndex,
) -> CharacterIndex {
    let start = line.character_run.character_index;
    let end = line.character_run.end();
    if find_run(&logical.bidirectional_line_info, start).is_none() {
        return visual_cursor;
    }
    if visual_cursor == start {
        return if line.direction { end } else { start };
    }
    if visual_cursor >= end {
        return if line.direction { start } else { end };
    }
    let left = logical.visual_to_logical(visual_cursor - 1);
    let right = logical.visual_to_logical(visual_cursor);
    let left_rtl = logical.character_direction(left);
    let right_rtl = logical.character_direction(right);
    if left_rtl == right_rtl || left_rtl == line.direction {
        // A cursor right of a right to left character sits before it.
        if left_rtl {
            left
        } else {
            left + 1
        }
    } else if right_rtl {
        right + 1
    } else {
        right
    }
}
