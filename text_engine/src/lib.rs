// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text model construction and line layout.
//!
//! A [`Controller`] owns one text. Its [`LogicalModel`] holds the characters and what is known
//! about them: line break opportunities, scripts, fonts and bidirectional levels. Its
//! [`VisualModel`] holds the shaped glyphs and, after [`Controller::relayout`], the lines and
//! glyph positions for a box of a given size under the chosen [`LayoutPolicy`].
//!
//! Fonts, shaping and hyphenation come from collaborators passed in through [`TextServices`].
//! The `font-backend` feature provides [`FontCollection`], which loads fonts with skrifa and
//! shapes with harfrust.
//!
//! ## Features
//!
//! - `font-backend` (enabled by default): [`FontCollection`] and its dependencies.
//! - `hyphenation` (enabled by default): [`HypherHyphenator`] with English patterns.
//!
//! ## Example
//!
//! ```no_run
//! # #[cfg(feature = "font-backend")]
//! # fn main() {
//! use text_engine::{Controller, FontCollection, Size, TextServices};
//! use text_engine::{ExceedPolicy, FontDescription, MultiLinePolicy};
//!
//! let fonts = FontCollection::new();
//! let data = std::fs::read("MyFont.ttf").unwrap();
//! fonts.register(data, 0, FontDescription::new("My Font")).unwrap();
//! let services = TextServices::new(&fonts, &fonts);
//!
//! let mut controller = Controller::new();
//! controller.set_text("Hello, world!");
//! controller
//!     .set_layout_policy(
//!         MultiLinePolicy::SplitByWord,
//!         ExceedPolicy::Original,
//!         ExceedPolicy::Original,
//!     )
//!     .unwrap();
//! controller.relayout(&services, Size::new(100.0, 50.0));
//!
//! for line in controller.visual_model().lines() {
//!     println!("{:?}", line.glyph_run);
//! }
//! # }
//! # #[cfg(not(feature = "font-backend"))]
//! # fn main() {}
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub use icu_properties::props::Script;
pub use peniko::Color;
pub use text_primitives::{
    BaseDirection, FontSlant, FontWeight, FontWidth, HorizontalAlignment, VerticalAlignment,
};

mod controller;
mod error;
mod inputs;
mod layout;
mod types;

pub mod analysis;
pub mod bidi;
pub mod convert;
pub mod font;
pub mod model;
pub mod shape;

#[cfg(test)]
mod tests;

pub use controller::{Controller, CursorInfo, Operations};
pub use error::{Error, ErrorKind};
pub use font::{FontClient, FontMetrics, GlyphInfo, Hyphenator, ShapedRun, Shaper, TextServices};
pub use inputs::{
    Anchor, ColorRun, EllipsisPosition, EmbeddedItem, ExceedPolicy, FontDescription,
    FontDescriptionRun, LayoutOptions, LayoutPolicy, MarkupRuns, MultiLinePolicy,
    StrikethroughCharacterRun, UnderlineProperties, UnderlineType, UnderlinedCharacterRun,
};
pub use model::{
    BidirectionalLineInfoRun, BidirectionalParagraphInfoRun, CharacterRun, EllipsisInfo, FontRun,
    GlyphRun, HyphenInfo, LineBreakInfo, LineRun, LogicalModel, Presentation, ScriptRun,
    StrikethroughGlyphRun, UnderlinedGlyphRun, VisualModel, WordBreakInfo,
};
pub use types::{
    Character, CharacterDirection, CharacterIndex, ColorIndex, FontId, GlyphId, GlyphIndex,
    Length, LineIndex, PointSize26Dot6, Size, Vector2, DEFAULT_POINT_SIZE,
};

#[cfg(feature = "font-backend")]
pub use font::FontCollection;
#[cfg(feature = "hyphenation")]
pub use font::HypherHyphenator;
