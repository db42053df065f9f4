// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font and paragraph property types.
//!
//! This crate is a small, `no_std` vocabulary layer shared between the text engine and the font
//! providers that plug into it. It holds the "leaf" properties used to describe a requested font
//! (weight, width, slant) and the paragraph-level settings (base direction, alignment).
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use text_primitives::{FontSlant, FontWeight, FontWidth};
//!
//! assert_eq!(FontWeight::parse("bold"), Some(FontWeight::BOLD));
//! assert_eq!(FontWidth::parse("condensed"), Some(FontWidth::CONDENSED));
//! assert_eq!(FontSlant::parse("italic"), Some(FontSlant::Italic));
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
#![no_std]

mod font;
mod text;

pub use font::{FontSlant, FontWeight, FontWidth};
pub use text::{BaseDirection, HorizontalAlignment, VerticalAlignment};
