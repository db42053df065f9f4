// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use icu_properties::props::LineBreak;
use icu_properties::CodePointMapData;
use icu_segmenter::options::{LineBreakOptions, WordBreakInvariantOptions};
use icu_segmenter::{LineSegmenter, WordSegmenter};

use crate::font::Hyphenator;
use crate::model::{LineBreakInfo, WordBreakInfo};
use crate::{Character, CharacterIndex, Length};

/// Returns `true` if `ch` forces a line break after itself.
pub fn is_mandatory_break(ch: Character) -> bool {
    matches!(
        CodePointMapData::<LineBreak>::new().get(ch),
        LineBreak::MandatoryBreak
            | LineBreak::CarriageReturn
            | LineBreak::LineFeed
            | LineBreak::NextLine
    )
}

/// Classifies the break opportunity after each character of `characters[start..start + count]`.
///
/// The tags are appended to `line_break_info`, which must hold exactly `start` entries. The
/// analyzed range should begin at a paragraph start. The last character of the whole buffer
/// always gets [`LineBreakInfo::MustBreak`].
pub fn set_line_break_info(
    characters: &[Character],
    start: CharacterIndex,
    count: Length,
    line_break_info: &mut Vec<LineBreakInfo>,
) {
    debug_assert_eq!(
        line_break_info.len(),
        start,
        "line break info must be truncated at the analyzed range"
    );
    let end = start + count;
    let range = &characters[start..end];
    if range.is_empty() {
        return;
    }

    let (text, char_ends) = segmenter_input(range);
    line_break_info.resize(end, LineBreakInfo::NoBreak);
    let segmenter = LineSegmenter::new_auto(LineBreakOptions::default());
    for position in segmenter.segment_str(&text) {
        if position == 0 {
            continue;
        }
        let Ok(index) = char_ends.binary_search(&position) else {
            continue;
        };
        line_break_info[start + index] = if is_mandatory_break(range[index]) {
            LineBreakInfo::MustBreak
        } else {
            LineBreakInfo::AllowBreak
        };
    }

    if end == characters.len() {
        line_break_info[end - 1] = LineBreakInfo::MustBreak;
    }
}

/// Marks the characters of `characters[start..start + count]` that end a word.
///
/// Follows the same contract as [`set_line_break_info`]: `word_break_info` holds exactly `start`
/// entries and the last character of the buffer always ends a word.
pub fn set_word_break_info(
    characters: &[Character],
    start: CharacterIndex,
    count: Length,
    word_break_info: &mut Vec<WordBreakInfo>,
) {
    debug_assert_eq!(
        word_break_info.len(),
        start,
        "word break info must be truncated at the analyzed range"
    );
    let end = start + count;
    let range = &characters[start..end];
    if range.is_empty() {
        return;
    }

    let (text, char_ends) = segmenter_input(range);
    word_break_info.resize(end, WordBreakInfo::NoBreak);
    let segmenter = WordSegmenter::new_auto(WordBreakInvariantOptions::default());
    for position in segmenter.segment_str(&text) {
        if let Ok(index) = char_ends.binary_search(&position) {
            word_break_info[start + index] = WordBreakInfo::Break;
        }
    }

    if end == characters.len() {
        word_break_info[end - 1] = WordBreakInfo::Break;
    }
}

/// The UTF-8 text of `range` and the byte offset one past each of its characters, used to map
/// segmenter positions back to characters.
fn segmenter_input(range: &[Character]) -> (String, Vec<usize>) {
    let text: String = range.iter().collect();
    let char_ends = text
        .char_indices()
        .map(|(offset, ch)| offset + ch.len_utf8())
        .collect();
    (text, char_ends)
}

/// Upgrades hyphenation points inside words of `characters[start..start + count]` to
/// [`LineBreakInfo::HyphenationBreak`].
///
/// A word is a run of characters up to the next allow or must break; the final character of
/// the range is always part of the last word.
pub fn set_hyphenation_info(
    hyphenator: &dyn Hyphenator,
    characters: &[Character],
    start: CharacterIndex,
    count: Length,
    line_break_info: &mut [LineBreakInfo],
) {
    let end = start + count;
    let mut index = start;
    while index < end {
        let mut word_length = 0;
        while index + word_length < end
            && !matches!(
                line_break_info[index + word_length],
                LineBreakInfo::AllowBreak | LineBreakInfo::MustBreak
            )
        {
            word_length += 1;
        }
        if index + word_length + 1 == end {
            word_length += 1;
        }

        if word_length > 1 {
            let word = &characters[index..index + word_length];
            let hyphens = hyphenator.word_hyphens(word);
            for (offset, _) in hyphens
                .iter()
                .take(word_length - 1)
                .enumerate()
                .filter(|(_, &allowed)| allowed)
            {
                let info = &mut line_break_info[index + offset];
                if *info == LineBreakInfo::NoBreak {
                    *info = LineBreakInfo::HyphenationBreak;
                }
            }
        }
        index += word_length + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LineBreakInfo::{AllowBreak as A, HyphenationBreak as H, MustBreak as M, NoBreak as N};

    fn analyze(text: &str) -> Vec<LineBreakInfo> {
        let characters: Vec<char> = text.chars().collect();
        let mut info = Vec::new();
        set_line_break_info(&characters, 0, characters.len(), &mut info);
        info
    }

    #[test]
    fn words_and_paragraphs() {
        assert_eq!(analyze("ab cd"), [N, N, A, N, M]);
        assert_eq!(analyze("ab\ncd"), [N, N, M, N, M]);
        assert_eq!(analyze("ab\r\ncd"), [N, N, N, M, N, M]);
    }

    #[test]
    fn last_character_always_breaks() {
        assert_eq!(analyze("a"), [M]);
        assert_eq!(analyze("a "), [N, M]);
    }

    #[test]
    fn partial_analysis_matches_full() {
        let characters: Vec<char> = "one\ntwo three".chars().collect();
        let full = analyze("one\ntwo three");
        let mut info = full[..4].to_vec();
        set_line_break_info(&characters, 4, characters.len() - 4, &mut info);
        assert_eq!(info, full);
    }

    fn words(text: &str) -> Vec<WordBreakInfo> {
        let characters: Vec<char> = text.chars().collect();
        let mut info = Vec::new();
        set_word_break_info(&characters, 0, characters.len(), &mut info);
        info
    }

    #[test]
    fn words_end_before_spaces_and_punctuation() {
        use WordBreakInfo::{Break as B, NoBreak as W};
        assert_eq!(words("ab cd"), [W, B, B, W, B]);
        assert_eq!(words("ab  cd."), [W, B, W, B, W, B, B]);
        assert_eq!(words("\u{05D0}\u{05D1} x"), [W, B, B, B]);

        let characters: Vec<char> = "one\ntwo three".chars().collect();
        let full = words("one\ntwo three");
        let mut info = full[..4].to_vec();
        set_word_break_info(&characters, 4, characters.len() - 4, &mut info);
        assert_eq!(info, full);
    }

    struct EverySecond;

    impl Hyphenator for EverySecond {
        fn word_hyphens(&self, word: &[Character]) -> Vec<bool> {
            (0..word.len()).map(|i| i % 2 == 1).collect()
        }
    }

    #[test]
    fn hyphenation_upgrades_inner_positions_only() {
        let characters: Vec<char> = "abcd efgh".chars().collect();
        let mut info = analyze("abcd efgh");
        set_hyphenation_info(&EverySecond, &characters, 0, characters.len(), &mut info);
        // The last character of each word keeps its own break.
        assert_eq!(info, [N, H, N, N, A, N, H, N, M]);
    }

    #[derive(Default)]
    struct Recording {
        words: core::cell::RefCell<Vec<String>>,
    }

    impl Hyphenator for Recording {
        fn word_hyphens(&self, word: &[Character]) -> Vec<bool> {
            self.words.borrow_mut().push(word.iter().collect());
            vec![false; word.len()]
        }
    }

    #[test]
    fn last_word_is_hyphenated_whole() {
        let characters: Vec<char> = "abcd efgh".chars().collect();
        let mut info = analyze("abcd efgh");
        let recording = Recording::default();
        set_hyphenation_info(&recording, &characters, 0, characters.len(), &mut info);
        // The final character carries a must break but still belongs to the word.
        assert_eq!(*recording.words.borrow(), ["abcd", "efgh"]);

        let characters: Vec<char> = "ab\ncd".chars().collect();
        let mut info = analyze("ab\ncd");
        let recording = Recording::default();
        set_hyphenation_info(&recording, &characters, 3, 2, &mut info);
        assert_eq!(*recording.words.borrow(), ["cd"]);
    }
}
