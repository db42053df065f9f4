// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;
use icu_properties::props::Script;
use smallvec::SmallVec;
use text_primitives::FontSlant;

use super::script::is_new_paragraph;
use crate::font::FontClient;
use crate::inputs::{FontDescription, FontDescriptionRun, RequestedFonts};
use crate::model::{CharacterRun, FontRun, ScriptRun};
use crate::{Character, CharacterIndex, FontId, Length, PointSize26Dot6};

#[derive(Clone, PartialEq, Eq, Hash)]
struct DescriptionKey {
    family: String,
    weight: u32,
    width: u32,
    slant: FontSlant,
    size: PointSize26Dot6,
}

impl DescriptionKey {
    fn new(description: &FontDescription, size: PointSize26Dot6) -> Self {
        Self {
            family: description.family.clone(),
            weight: description.weight.value().to_bits(),
            width: description.width.ratio().to_bits(),
            slant: description.slant,
            size,
        }
    }
}

/// A range of characters sharing one merged font description.
struct DescriptionSegment {
    end: CharacterIndex,
    description: FontDescription,
    size: PointSize26Dot6,
    font_id: FontId,
}

/// Splits `[start, end)` at every description run edge and resolves the requested font of
/// each piece. Later runs override earlier ones.
fn description_segments(
    fonts: &dyn FontClient,
    font_description_runs: &[FontDescriptionRun],
    default_description: &FontDescription,
    default_point_size: PointSize26Dot6,
    start: CharacterIndex,
    end: CharacterIndex,
) -> Vec<DescriptionSegment> {
    let mut boundaries: SmallVec<[CharacterIndex; 16]> = SmallVec::new();
    boundaries.push(start);
    boundaries.push(end);
    for run in font_description_runs {
        for edge in [run.character_run.character_index, run.character_run.end()] {
            if edge > start && edge < end {
                boundaries.push(edge);
            }
        }
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let requested = RequestedFonts {
        default_description,
        default_point_size,
        runs: font_description_runs,
    };
    let mut cache: HashMap<DescriptionKey, FontId> = HashMap::new();
    boundaries
        .windows(2)
        .map(|pair| {
            let (description, size) = requested.at(pair[0]);
            let font_id = *cache
                .entry(DescriptionKey::new(&description, size))
                .or_insert_with(|| fonts.font_id(&description, size));
            DescriptionSegment {
                end: pair[1],
                description,
                size,
                font_id,
            }
        })
        .collect()
}

fn push_or_extend(font_runs: &mut Vec<FontRun>, index: CharacterIndex, font_id: FontId) {
    if let Some(last) = font_runs.last_mut() {
        if last.font_id == font_id && last.character_run.end() == index {
            last.character_run.number_of_characters += 1;
            return;
        }
    }
    font_runs.push(FontRun {
        character_run: CharacterRun::new(index, 1),
        font_id,
    });
}

/// Resolves a font for every character of `characters[start..start + count]`.
///
/// The requested font comes from the default description merged with the description runs.
/// Characters the requested font cannot render try fonts already chosen for the same script,
/// then a fallback from the font client, then the default font. Adjacent characters sharing a
/// font are coalesced, including with the last run already in `font_runs`.
pub fn validate_fonts(
    fonts: &dyn FontClient,
    characters: &[Character],
    script_runs: &[ScriptRun],
    font_description_runs: &[FontDescriptionRun],
    default_description: &FontDescription,
    default_point_size: PointSize26Dot6,
    start: CharacterIndex,
    count: Length,
    font_runs: &mut Vec<FontRun>,
) {
    let end = start + count;
    if start == end {
        return;
    }
    let default_font = fonts.font_id(default_description, default_point_size);
    let segments = description_segments(
        fonts,
        font_description_runs,
        default_description,
        default_point_size,
        start,
        end,
    );

    let mut valid_fonts_per_script: HashMap<Script, SmallVec<[FontId; 4]>> = HashMap::new();
    let mut segment_iter = segments.iter().peekable();
    let mut segment_start = start;
    let mut script_index = script_runs.partition_point(|run| run.character_run.end() <= start);

    for index in start..end {
        while let Some(segment) = segment_iter.next_if(|segment| segment.end <= index) {
            segment_start = segment.end;
        }
        let Some(segment) = segment_iter.peek() else {
            break;
        };
        while script_runs
            .get(script_index)
            .is_some_and(|run| run.character_run.end() <= index)
        {
            script_index += 1;
        }
        let script_run = script_runs.get(script_index);
        let script = script_run.map_or(Script::Common, |run| run.script);
        // The previous character shares the script run and the requested font.
        let continues_run = segment_start < index
            && script_run.is_some_and(|run| run.character_run.character_index < index);

        let ch = characters[index];
        let requested = segment.font_id;
        let font_id = if is_new_paragraph(characters, index) {
            requested
        } else if ch.is_whitespace() || ch.is_control() {
            // Spaces stay in the font of the word they follow.
            font_runs
                .last()
                .filter(|run| continues_run && run.character_run.end() == index)
                .map_or(requested, |run| run.font_id)
        } else if fonts.has_glyph(requested, ch) {
            requested
        } else {
            let cached = valid_fonts_per_script.entry(script).or_default();
            if let Some(&font_id) = cached.iter().find(|&&id| fonts.has_glyph(id, ch)) {
                font_id
            } else if let Some(font_id) = fonts
                .find_fallback_font(ch, &segment.description, segment.size)
                .filter(|&id| fonts.has_glyph(id, ch))
            {
                cached.push(font_id);
                font_id
            } else {
                if !fonts.has_glyph(default_font, ch) {
                    log::warn!(
                        "no font can render U+{:04X}, substituting the default font",
                        u32::from(ch)
                    );
                }
                default_font
            }
        };
        push_or_extend(font_runs, index, font_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::set_scripts;
    use crate::tests::utils::{FakeFonts, LATIN_FONT, RTL_FONT};

    fn validate(
        fonts: &FakeFonts,
        text: &str,
        description_runs: &[FontDescriptionRun],
    ) -> Vec<FontRun> {
        let characters: Vec<char> = text.chars().collect();
        let mut scripts = Vec::new();
        set_scripts(&characters, 0, characters.len(), &mut scripts);
        let mut runs = Vec::new();
        validate_fonts(
            fonts,
            &characters,
            &scripts,
            description_runs,
            &FontDescription::default(),
            crate::DEFAULT_POINT_SIZE,
            0,
            characters.len(),
            &mut runs,
        );
        runs
    }

    #[test]
    fn single_font_is_one_run() {
        let fonts = FakeFonts::new();
        let runs = validate(&fonts, "Hello world", &[]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].font_id, LATIN_FONT);
        assert_eq!(runs[0].character_run, CharacterRun::new(0, 11));
    }

    #[test]
    fn uncovered_characters_use_fallback_and_coalesce_back() {
        let fonts = FakeFonts::new();
        let runs = validate(&fonts, "ab \u{05D0}\u{05D1} cd", &[]);
        assert!(crate::model::runs::covers(&runs, 8));
        for pair in runs.windows(2) {
            assert_ne!(pair[0].font_id, pair[1].font_id, "runs must coalesce");
        }
        assert_eq!(runs.len(), 3);
    }

    #[test]
    fn spaces_stay_in_the_fallback_font_of_their_run() {
        let fonts = FakeFonts::new();
        let runs = validate(&fonts, "\u{05D0}\u{05D1} \u{05D2}\u{05D3}", &[]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].font_id, RTL_FONT);
        assert_eq!(runs[0].character_run, CharacterRun::new(0, 5));

        // A space opening a script run takes the requested font.
        let runs = validate(&fonts, "ab \u{05D0}\u{05D1} \u{05D2} cd", &[]);
        let fonts_of: Vec<_> = runs
            .iter()
            .map(|run| (run.character_run, run.font_id))
            .collect();
        assert_eq!(
            fonts_of,
            [
                (CharacterRun::new(0, 3), LATIN_FONT),
                (CharacterRun::new(3, 4), RTL_FONT),
                (CharacterRun::new(7, 3), LATIN_FONT),
            ]
        );
    }

    #[test]
    fn unrenderable_characters_get_default_font() {
        let fonts = FakeFonts::new();
        let runs = validate(&fonts, "a\u{1F600}b", &[]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].font_id, LATIN_FONT);
    }

    #[test]
    fn description_runs_request_other_fonts() {
        let fonts = FakeFonts::new();
        let bold = FontDescriptionRun {
            character_run: CharacterRun::new(2, 2),
            weight: Some(text_primitives::FontWeight::BOLD),
            ..Default::default()
        };
        let runs = validate(&fonts, "abcdef", &[bold]);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].character_run, CharacterRun::new(2, 2));
        assert_ne!(runs[1].font_id, LATIN_FONT);
    }
}
