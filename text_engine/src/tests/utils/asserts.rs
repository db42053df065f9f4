// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helper functions to assert truths about the models during testing.

use crate::model::runs::covers;
use crate::Controller;

/// Assert that the script and font runs partition the whole text and the conversion tables
/// agree with each other.
pub(crate) fn assert_runs_cover(controller: &Controller, case: &str) {
    let logical = controller.logical_model();
    let visual = controller.visual_model();
    let len = logical.number_of_characters();

    assert_eq!(logical.line_break_info().len(), len, "{case} line break info length");
    assert!(covers(logical.script_runs(), len), "{case} script runs must cover the text");
    assert!(covers(logical.font_runs(), len), "{case} font runs must cover the text");
    assert_eq!(visual.characters_to_glyph().len(), len, "{case} characters to glyph length");
    assert_eq!(visual.glyphs_per_character().len(), len, "{case} glyphs per character length");
    assert!(
        crate::shape::tables_are_consistent(
            visual.glyphs_to_characters(),
            visual.characters_per_glyph(),
            visual.characters_to_glyph(),
            visual.glyphs_per_character(),
        ),
        "{case} conversion tables disagree"
    );
    if !logical.bidirectional_paragraph_info().is_empty() {
        assert_eq!(
            logical.character_directions().len(),
            len,
            "{case} character directions length"
        );
    }
}

/// Assert that two controllers hold the same models.
pub(crate) fn assert_same_models(a: &Controller, b: &Controller, case: &str) {
    let (la, lb) = (a.logical_model(), b.logical_model());
    assert_eq!(la.text(), lb.text(), "{case} text mismatch");
    assert_eq!(la.line_break_info(), lb.line_break_info(), "{case} line break info mismatch");
    assert_eq!(la.word_break_info(), lb.word_break_info(), "{case} word break info mismatch");
    assert_eq!(la.script_runs(), lb.script_runs(), "{case} script runs mismatch");
    assert_eq!(la.font_runs(), lb.font_runs(), "{case} font runs mismatch");
    assert_eq!(
        la.bidirectional_paragraph_info(),
        lb.bidirectional_paragraph_info(),
        "{case} bidirectional paragraph info mismatch"
    );
    assert_eq!(
        la.character_directions(),
        lb.character_directions(),
        "{case} character directions mismatch"
    );
    assert_eq!(
        la.bidirectional_line_info(),
        lb.bidirectional_line_info(),
        "{case} bidirectional line info mismatch"
    );

    let (va, vb) = (a.visual_model(), b.visual_model());
    assert_eq!(va.glyphs(), vb.glyphs(), "{case} glyphs mismatch");
    assert_eq!(
        va.glyphs_to_characters(),
        vb.glyphs_to_characters(),
        "{case} glyphs to characters mismatch"
    );
    assert_eq!(
        va.characters_per_glyph(),
        vb.characters_per_glyph(),
        "{case} characters per glyph mismatch"
    );
    assert_eq!(
        va.characters_to_glyph(),
        vb.characters_to_glyph(),
        "{case} characters to glyph mismatch"
    );
    assert_eq!(
        va.glyphs_per_character(),
        vb.glyphs_per_character(),
        "{case} glyphs per character mismatch"
    );
    assert_eq!(
        va.new_paragraph_glyphs(),
        vb.new_paragraph_glyphs(),
        "{case} new paragraph glyphs mismatch"
    );
    assert_eq!(va.glyph_positions(), vb.glyph_positions(), "{case} positions mismatch");
    assert_eq!(va.lines(), vb.lines(), "{case} lines mismatch");
    assert_eq!(va.hyphen(), vb.hyphen(), "{case} hyphens mismatch");
    assert_eq!(va.ellipsis(), vb.ellipsis(), "{case} ellipsis mismatch");
    assert_eq!(va.color_indices(), vb.color_indices(), "{case} color indices mismatch");
    assert_eq!(va.layout_size(), vb.layout_size(), "{case} layout size mismatch");
    assert_eq!(va.text_scale(), vb.text_scale(), "{case} text scale mismatch");
}
