// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use icu_properties::props::Script;

use super::runs::{find_run, truncate_runs};
use super::{
    BidirectionalLineInfoRun, BidirectionalParagraphInfoRun, CharacterRun, FontRun,
    LineBreakInfo, ScriptRun, WordBreakInfo,
};
use crate::analysis::is_new_paragraph;
use crate::inputs::{
    Anchor, ColorRun, EmbeddedItem, FontDescriptionRun, MarkupRuns, StrikethroughCharacterRun,
    UnderlinedCharacterRun,
};
use crate::{Character, CharacterDirection, CharacterIndex, FontId, Length};

/// Characters and everything the analysis stages derived from them.
///
/// Per character buffers (`line_break_info`, `word_break_info`, `character_directions`) have
/// one entry per character once the corresponding stage ran; run buffers are sorted and cover
/// the text without gaps.
#[derive(Clone, Debug, Default)]
pub struct LogicalModel {
    pub(crate) text: Vec<Character>,
    pub(crate) markup: MarkupRuns,
    pub(crate) line_break_info: Vec<LineBreakInfo>,
    pub(crate) word_break_info: Vec<WordBreakInfo>,
    pub(crate) script_runs: Vec<ScriptRun>,
    pub(crate) font_runs: Vec<FontRun>,
    pub(crate) bidirectional_paragraph_info: Vec<BidirectionalParagraphInfoRun>,
    pub(crate) character_directions: Vec<CharacterDirection>,
    pub(crate) bidirectional_line_info: Vec<BidirectionalLineInfoRun>,
}

impl LogicalModel {
    /// The UTF-32 characters.
    pub fn text(&self) -> &[Character] {
        &self.text
    }

    /// Number of characters.
    pub fn number_of_characters(&self) -> Length {
        self.text.len()
    }

    /// Break opportunity after each character.
    pub fn line_break_info(&self) -> &[LineBreakInfo] {
        &self.line_break_info
    }

    /// Word boundary after each character.
    pub fn word_break_info(&self) -> &[WordBreakInfo] {
        &self.word_break_info
    }

    /// Script runs.
    pub fn script_runs(&self) -> &[ScriptRun] {
        &self.script_runs
    }

    /// Font runs.
    pub fn font_runs(&self) -> &[FontRun] {
        &self.font_runs
    }

    /// Font overrides from markup.
    pub fn font_description_runs(&self) -> &[FontDescriptionRun] {
        &self.markup.font_description_runs
    }

    /// Colors from markup.
    pub fn color_runs(&self) -> &[ColorRun] {
        &self.markup.color_runs
    }

    /// Underlines from markup.
    pub fn underlined_runs(&self) -> &[UnderlinedCharacterRun] {
        &self.markup.underlined_runs
    }

    /// Strike-throughs from markup.
    pub fn strikethrough_runs(&self) -> &[StrikethroughCharacterRun] {
        &self.markup.strikethrough_runs
    }

    /// Inline objects.
    pub fn embedded_items(&self) -> &[EmbeddedItem] {
        &self.markup.embedded_items
    }

    /// Hyperlinks.
    pub fn anchors(&self) -> &[Anchor] {
        &self.markup.anchors
    }

    /// Bidirectional info of the paragraphs containing right-to-left text.
    pub fn bidirectional_paragraph_info(&self) -> &[BidirectionalParagraphInfoRun] {
        &self.bidirectional_paragraph_info
    }

    /// Direction of every character; empty when the text is entirely left to right.
    pub fn character_directions(&self) -> &[CharacterDirection] {
        &self.character_directions
    }

    /// Visual order of the laid out lines of bidirectional paragraphs.
    pub fn bidirectional_line_info(&self) -> &[BidirectionalLineInfoRun] {
        &self.bidirectional_line_info
    }

    /// The script of the character at `index`.
    pub fn script(&self, index: CharacterIndex) -> Option<Script> {
        find_run(&self.script_runs, index).map(|run| run.script)
    }

    /// The font of the character at `index`.
    pub fn font(&self, index: CharacterIndex) -> Option<FontId> {
        find_run(&self.font_runs, index).map(|run| run.font_id)
    }

    /// Whether the character at `index` is right to left.
    pub fn character_direction(&self, index: CharacterIndex) -> CharacterDirection {
        self.character_directions
            .get(index)
            .copied()
            .unwrap_or(false)
    }

    /// The paragraph containing the character at `index`, separator included.
    ///
    /// An index at or past the end yields the last paragraph.
    pub fn paragraph_range(&self, index: CharacterIndex) -> CharacterRun {
        let len = self.text.len();
        if len == 0 {
            return CharacterRun::default();
        }
        let index = index.min(len - 1);
        let start = (0..index)
            .rev()
            .find(|&i| is_new_paragraph(&self.text, i))
            .map_or(0, |i| i + 1);
        let end = (index..len)
            .find(|&i| is_new_paragraph(&self.text, i))
            .map_or(len, |i| i + 1);
        CharacterRun::new(start, end - start)
    }

    /// Whether the paragraph containing `index` is right to left.
    pub fn is_right_to_left_paragraph(&self, index: CharacterIndex) -> bool {
        find_run(&self.bidirectional_paragraph_info, index).is_some_and(|run| run.direction)
    }

    /// The visual position inside its line of the character at logical `index`.
    pub fn logical_to_visual(&self, index: CharacterIndex) -> CharacterIndex {
        match find_run(&self.bidirectional_line_info, index) {
            Some(line) => line
                .visual_to_logical_map
                .iter()
                .position(|&logical| logical == index)
                .map_or(index, |visual| line.character_run.character_index + visual),
            None => index,
        }
    }

    /// The logical character shown at visual `index`.
    pub fn visual_to_logical(&self, index: CharacterIndex) -> CharacterIndex {
        match find_run(&self.bidirectional_line_info, index) {
            Some(line) => line.visual_to_logical_map[index - line.character_run.character_index],
            None => index,
        }
    }

    /// The hyperlink covering the character at `index`.
    pub fn anchor_at(&self, index: CharacterIndex) -> Option<&Anchor> {
        self.markup
            .anchors
            .iter()
            .find(|anchor| anchor.character_run.contains(index))
    }

    /// Drops analysis results from `index` onward. `index` must start a paragraph.
    pub(crate) fn truncate_analysis(&mut self, index: CharacterIndex) {
        self.line_break_info.truncate(index);
        self.word_break_info.truncate(index);
        truncate_runs(&mut self.script_runs, index);
        truncate_runs(&mut self.font_runs, index);
        self.bidirectional_paragraph_info
            .retain(|paragraph| paragraph.character_run.end() <= index);
        if self.bidirectional_paragraph_info.is_empty() {
            self.character_directions.clear();
        } else {
            self.character_directions.truncate(index);
        }
        self.bidirectional_line_info.clear();
    }

    /// Drops every analysis result, keeping the text and markup.
    pub(crate) fn clear_analysis(&mut self) {
        self.truncate_analysis(0);
    }
}
