// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidirectional text: paragraph levels, character directions, mirroring and per-line
//! visual order.

use alloc::borrow::Cow;

use icu_properties::props::BidiMirroringGlyph;
use icu_properties::CodePointMapData;
use smallvec::SmallVec;
use text_primitives::BaseDirection;
use unicode_bidi::{bidi_class, BidiClass, BidiInfo, Level};

use crate::model::{
    BidirectionalLineInfoRun, BidirectionalParagraphInfoRun, CharacterRun, LineBreakInfo,
    ScriptRun,
};
use crate::{Character, CharacterDirection, CharacterIndex, Length};

fn default_level(base_direction: BaseDirection) -> Option<Level> {
    match base_direction {
        BaseDirection::Ltr => Some(Level::ltr()),
        BaseDirection::Rtl => Some(Level::rtl()),
        _ => None,
    }
}

fn paragraph_info(
    characters: &[Character],
    paragraph: CharacterRun,
    base_direction: BaseDirection,
) -> BidirectionalParagraphInfoRun {
    let text: String = characters[paragraph.range()].iter().collect();
    let info = BidiInfo::new(&text, default_level(base_direction));
    let levels = text
        .char_indices()
        .map(|(byte_pos, _)| info.levels[byte_pos])
        .collect();
    let direction = info
        .paragraphs
        .first()
        .is_some_and(|paragraph| paragraph.level.is_rtl());
    BidirectionalParagraphInfoRun {
        character_run: paragraph,
        direction,
        levels,
    }
}

/// Resolves the embedding levels of every paragraph of `characters[start..start + count]` that
/// contains right-to-left script runs, appending one run per such paragraph.
///
/// A paragraph ends with the script run whose last character must break. Paragraphs with only
/// left-to-right scripts produce nothing.
pub fn set_bidirectional_info(
    characters: &[Character],
    script_runs: &[ScriptRun],
    line_break_info: &[LineBreakInfo],
    start: CharacterIndex,
    count: Length,
    base_direction: BaseDirection,
    bidirectional_info: &mut Vec<BidirectionalParagraphInfoRun>,
) {
    let end = start + count;
    let first_run = script_runs.partition_point(|run| run.character_run.end() <= start);
    let mut paragraph_start = start;
    let mut has_right_to_left = false;

    for run in script_runs[first_run..]
        .iter()
        .take_while(|run| run.character_run.character_index < end)
    {
        has_right_to_left |= run.is_right_to_left;
        let last = run.character_run.end() - 1;
        if line_break_info[last] != LineBreakInfo::MustBreak {
            continue;
        }
        if has_right_to_left {
            let paragraph = CharacterRun::new(paragraph_start, run.character_run.end() - paragraph_start);
            log::trace!("bidi paragraph {:?}", paragraph.range());
            bidirectional_info.push(paragraph_info(characters, paragraph, base_direction));
        }
        paragraph_start = run.character_run.end();
        has_right_to_left = false;
    }
}

/// Writes the direction of every character of `[start, start + count)` into `directions`.
///
/// Characters outside bidirectional paragraphs are left to right. The buffer stays empty
/// while no paragraph has bidirectional info.
pub fn characters_direction(
    bidirectional_info: &[BidirectionalParagraphInfoRun],
    start: CharacterIndex,
    count: Length,
    directions: &mut Vec<CharacterDirection>,
) {
    if bidirectional_info.is_empty() {
        directions.clear();
        return;
    }
    directions.truncate(start);
    directions.resize(start + count, false);
    for paragraph in bidirectional_info {
        let run = paragraph.character_run;
        let from = run.character_index.max(start);
        let to = run.end().min(start + count);
        for index in from..to {
            directions[index] = paragraph.levels[index - run.character_index].is_rtl();
        }
    }
}

/// Replaces mirrorable characters of right-to-left text inside bidirectional paragraphs with
/// their mirrored counterparts.
///
/// The original buffer is returned borrowed when nothing needed mirroring.
pub fn mirrored_text<'a>(
    characters: &'a [Character],
    directions: &[CharacterDirection],
    bidirectional_info: &[BidirectionalParagraphInfoRun],
    start: CharacterIndex,
    count: Length,
) -> Cow<'a, [Character]> {
    let mirroring = CodePointMapData::<BidiMirroringGlyph>::new();
    let mut text = Cow::Borrowed(characters);
    for paragraph in bidirectional_info {
        let run = paragraph.character_run;
        let from = run.character_index.max(start);
        let to = run.end().min(start + count);
        for index in from..to {
            if !directions.get(index).copied().unwrap_or(false) {
                continue;
            }
            if let Some(mirrored) = mirroring.get(characters[index]).mirroring_glyph {
                text.to_mut()[index] = mirrored;
            }
        }
    }
    text
}

fn is_removed_or_white_space(class: BidiClass) -> bool {
    use BidiClass::*;
    matches!(
        class,
        WS | FSI | LRI | RLI | PDI | BN | LRE | RLE | LRO | RLO | PDF
    )
}

/// Computes the visual order of the characters of `line`, which lies inside `paragraph`.
///
/// White space at the end of the line and before separators takes the paragraph level, then
/// runs are reversed from the highest level down to the lowest odd level.
pub fn reorder_line(
    characters: &[Character],
    paragraph: &BidirectionalParagraphInfoRun,
    line: CharacterRun,
) -> BidirectionalLineInfoRun {
    let paragraph_level = if paragraph.direction { 1 } else { 0 };
    let offset = line.character_index - paragraph.character_run.character_index;
    let mut levels: SmallVec<[u8; 64]> = paragraph.levels[offset..offset + line.number_of_characters]
        .iter()
        .map(|level| level.number())
        .collect();

    let mut at_line_end_or_separator = true;
    for (i, &ch) in characters[line.range()].iter().enumerate().rev() {
        let class = bidi_class(ch);
        if matches!(class, BidiClass::S | BidiClass::B) {
            levels[i] = paragraph_level;
            at_line_end_or_separator = true;
        } else if is_removed_or_white_space(class) {
            if at_line_end_or_separator {
                levels[i] = paragraph_level;
            }
        } else {
            at_line_end_or_separator = false;
        }
    }

    let mut visual_to_logical_map: Vec<CharacterIndex> = line.range().collect();
    reverse_by_levels(&levels, &mut visual_to_logical_map);
    let is_identity = visual_to_logical_map
        .iter()
        .zip(line.range())
        .all(|(&visual, logical)| visual == logical);

    BidirectionalLineInfoRun {
        character_run: line,
        visual_to_logical_map,
        direction: paragraph.direction,
        is_identity,
    }
}

/// Reverses every maximal sequence at or above each level, from the highest level down to the
/// lowest odd one.
fn reverse_by_levels(levels: &[u8], order: &mut [CharacterIndex]) {
    let mut max_level = 0;
    let mut lowest_odd_level = u8::MAX;
    for &level in levels {
        max_level = max_level.max(level);
        if level & 1 != 0 {
            lowest_odd_level = lowest_odd_level.min(level);
        }
    }
    if lowest_odd_level == u8::MAX {
        return;
    }

    // `order` is permuted while `levels` stays in logical order, so track levels alongside.
    let mut visual_levels: SmallVec<[u8; 64]> = levels.iter().copied().collect();
    for level in (lowest_odd_level..=max_level).rev() {
        let mut i = 0;
        while i < visual_levels.len() {
            if visual_levels[i] >= level {
                let mut end = i + 1;
                while end < visual_levels.len() && visual_levels[end] >= level {
                    end += 1;
                }
                order[i..end].reverse();
                visual_levels[i..end].reverse();
                i = end;
            }
            i += 1;
        }
    }
}
