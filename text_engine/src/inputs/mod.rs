// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inputs to the text model: font descriptions, markup runs and layout options.

mod options;

pub use options::{EllipsisPosition, ExceedPolicy, LayoutOptions, LayoutPolicy, MultiLinePolicy};

use peniko::Color;
use text_primitives::{FontSlant, FontWeight, FontWidth};

use crate::model::runs::RunRange;
use crate::model::CharacterRun;
use crate::{CharacterIndex, PointSize26Dot6, Size};

/// A requested font.
///
/// An empty family name requests the font client's default family.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontDescription {
    /// Family name.
    pub family: String,
    /// Requested weight.
    pub weight: FontWeight,
    /// Requested width.
    pub width: FontWidth,
    /// Requested slant.
    pub slant: FontSlant,
}

impl FontDescription {
    /// Creates a description for `family` with normal weight, width and slant.
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..Default::default()
        }
    }
}

/// Font overrides applied to a range of characters.
///
/// Unset fields inherit from the default description. When runs overlap, later runs win.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontDescriptionRun {
    /// The characters the overrides apply to.
    pub character_run: CharacterRun,
    /// Overrides the family name.
    pub family: Option<String>,
    /// Overrides the weight.
    pub weight: Option<FontWeight>,
    /// Overrides the width.
    pub width: Option<FontWidth>,
    /// Overrides the slant.
    pub slant: Option<FontSlant>,
    /// Overrides the point size.
    pub size: Option<PointSize26Dot6>,
}

/// The fonts a text asks for before coverage is checked: a default overridden by markup.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RequestedFonts<'a> {
    pub(crate) default_description: &'a FontDescription,
    pub(crate) default_point_size: PointSize26Dot6,
    pub(crate) runs: &'a [FontDescriptionRun],
}

impl RequestedFonts<'_> {
    /// Description and point size at `index`. Later runs override earlier ones.
    pub(crate) fn at(&self, index: CharacterIndex) -> (FontDescription, PointSize26Dot6) {
        let mut description = self.default_description.clone();
        let mut size = self.default_point_size;
        for run in self.runs {
            if run.character_run.contains(index) {
                run.apply(&mut description, &mut size);
            }
        }
        (description, size)
    }
}

impl FontDescriptionRun {
    pub(crate) fn apply(&self, description: &mut FontDescription, size: &mut PointSize26Dot6) {
        if let Some(family) = &self.family {
            description.family.clone_from(family);
        }
        if let Some(weight) = self.weight {
            description.weight = weight;
        }
        if let Some(width) = self.width {
            description.width = width;
        }
        if let Some(slant) = self.slant {
            description.slant = slant;
        }
        if let Some(point_size) = self.size {
            *size = point_size;
        }
    }
}

/// A text color applied to a range of characters.
#[derive(Clone, Copy, Debug)]
pub struct ColorRun {
    /// The colored characters.
    pub character_run: CharacterRun,
    /// The color.
    pub color: Color,
}

/// Shape of an underline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnderlineType {
    /// A continuous line.
    #[default]
    Solid,
    /// A dashed line.
    Dashed,
    /// Two continuous lines.
    Double,
}

/// Underline overrides for a range of characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnderlineProperties {
    /// Shape of the line.
    pub kind: UnderlineType,
    /// Color of the line; the text color when unset.
    pub color: Option<Color>,
    /// Thickness in pixels; the font's underline thickness when unset.
    pub height: Option<f32>,
}

/// Underlined characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnderlinedCharacterRun {
    /// The underlined characters.
    pub character_run: CharacterRun,
    /// How the underline is drawn.
    pub properties: UnderlineProperties,
}

/// Struck through characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrikethroughCharacterRun {
    /// The struck through characters.
    pub character_run: CharacterRun,
    /// Color of the line; the text color when unset.
    pub color: Option<Color>,
    /// Thickness in pixels; the font's strikeout thickness when unset.
    pub height: Option<f32>,
}

/// An inline object occupying one object replacement character (U+FFFC).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmbeddedItem {
    /// Index of the replacement character.
    pub character_index: CharacterIndex,
    /// Size the item occupies in the line.
    pub size: Size,
}

/// A hyperlink over a range of characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor {
    /// The linked characters.
    pub character_run: CharacterRun,
    /// Link target.
    pub href: String,
}

/// Everything a markup processor extracts from rich text besides the plain characters.
///
/// All indices refer to characters of the plain text.
#[derive(Clone, Debug, Default)]
pub struct MarkupRuns {
    /// Text colors.
    pub color_runs: Vec<ColorRun>,
    /// Font overrides.
    pub font_description_runs: Vec<FontDescriptionRun>,
    /// Underlines.
    pub underlined_runs: Vec<UnderlinedCharacterRun>,
    /// Strike-throughs.
    pub strikethrough_runs: Vec<StrikethroughCharacterRun>,
    /// Inline objects.
    pub embedded_items: Vec<EmbeddedItem>,
    /// Hyperlinks.
    pub anchors: Vec<Anchor>,
}

impl MarkupRuns {
    /// Returns the first run reaching past `len` characters, as `(start, end)`.
    pub(crate) fn out_of_bounds(&self, len: usize) -> Option<(usize, usize)> {
        let ranges = self
            .color_runs
            .iter()
            .map(|r| r.character_run)
            .chain(self.font_description_runs.iter().map(|r| r.character_run))
            .chain(self.underlined_runs.iter().map(|r| r.character_run))
            .chain(self.strikethrough_runs.iter().map(|r| r.character_run))
            .chain(self.anchors.iter().map(|r| r.character_run))
            .chain(
                self.embedded_items
                    .iter()
                    .map(|item| CharacterRun::new(item.character_index, 1)),
            );
        for run in ranges {
            if run.end() > len {
                return Some((run.character_index, run.end()));
            }
        }
        None
    }
}

macro_rules! impl_markup_run_range {
    ($($ty:ty),*) => {
        $(
            impl RunRange for $ty {
                fn character_run(&self) -> &CharacterRun {
                    &self.character_run
                }
                fn character_run_mut(&mut self) -> &mut CharacterRun {
                    &mut self.character_run
                }
            }
        )*
    };
}

impl_markup_run_range!(
    FontDescriptionRun,
    ColorRun,
    UnderlinedCharacterRun,
    StrikethroughCharacterRun,
    Anchor
);
