// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character analysis: line and word breaks, hyphenation, scripts and fonts.

mod fonts;
mod line_break;
mod script;

pub use fonts::validate_fonts;
pub use line_break::{
    is_mandatory_break, set_hyphenation_info, set_line_break_info, set_word_break_info,
};
pub use script::{is_right_to_left_script, set_scripts};

pub(crate) use script::is_new_paragraph;
