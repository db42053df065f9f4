// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The logical and visual halves of a text model.

mod logical;
pub(crate) mod runs;
mod visual;

pub use logical::LogicalModel;
pub use runs::{
    BidirectionalLineInfoRun, BidirectionalParagraphInfoRun, CharacterRun, FontRun, GlyphRun,
    ScriptRun,
};
pub use visual::{
    EllipsisInfo, HyphenInfo, LineRun, Presentation, StrikethroughGlyphRun, UnderlinedGlyphRun,
    VisualModel,
};

/// Line break opportunity after a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LineBreakInfo {
    /// The line cannot break after this character.
    #[default]
    NoBreak,
    /// The line may break after this character.
    AllowBreak,
    /// The line must break after this character; it ends a paragraph.
    MustBreak,
    /// The line may break after this character if a hyphen is drawn.
    HyphenationBreak,
}

/// Word boundary after a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WordBreakInfo {
    /// The character does not end a word.
    #[default]
    NoBreak,
    /// A word, or a run of white space, ends after the character.
    Break,
}

impl LineBreakInfo {
    /// Returns `true` if a soft wrap may happen after the character.
    pub fn is_wrap_opportunity(self) -> bool {
        matches!(self, Self::AllowBreak | Self::HyphenationBreak)
    }
}
