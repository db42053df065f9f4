// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod asserts;
mod fake_fonts;

pub(crate) use asserts::{assert_runs_cover, assert_same_models};
pub(crate) use fake_fonts::{
    EveryThirdHyphenator, FakeFonts, ADVANCE, LATIN_BOLD_FONT, LATIN_FONT, LIGATURE_FI,
    LINE_HEIGHT, RTL_FONT,
};

use crate::{
    Controller, ExceedPolicy, LayoutOptions, LayoutPolicy, MultiLinePolicy, Size, TextServices,
};

pub(crate) fn services(fonts: &FakeFonts) -> TextServices<'_> {
    TextServices::new(fonts, fonts)
}

pub(crate) fn policy(
    multi_line: MultiLinePolicy,
    width: ExceedPolicy,
    height: ExceedPolicy,
) -> LayoutPolicy {
    LayoutPolicy::new(multi_line, width, height).unwrap()
}

/// A controller holding `text`, laid out in `box_size`.
pub(crate) fn laid_out(
    fonts: &FakeFonts,
    text: &str,
    options: LayoutOptions,
    box_size: Size,
) -> Controller {
    let mut controller = Controller::new();
    controller.set_text(text);
    controller.set_layout_options(options).unwrap();
    controller.relayout(&services(fonts), box_size);
    controller
}

/// Glyph indices of each line, in placement order from left to right.
pub(crate) fn glyphs_left_to_right(controller: &Controller, line: usize) -> Vec<usize> {
    let visual = controller.visual_model();
    let run = visual.lines()[line].glyph_run;
    let mut glyphs: Vec<usize> = run.range().collect();
    glyphs.sort_by(|&a, &b| {
        visual.glyph_positions()[a]
            .x
            .total_cmp(&visual.glyph_positions()[b].x)
    });
    glyphs
}
