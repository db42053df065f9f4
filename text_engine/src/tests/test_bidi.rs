// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::Cow;

use super::utils::{glyphs_left_to_right, laid_out, FakeFonts, RTL_FONT};
use crate::bidi::mirrored_text;
use crate::{CharacterRun, LayoutOptions, Size};

const BOX: Size = Size::new(100.0, 100.0);

#[test]
fn right_to_left_paragraph_gets_directions_and_mirroring() {
    let fonts = FakeFonts::new();
    let controller = laid_out(
        &fonts,
        "abc\n\u{05D0}(\u{05D1})",
        LayoutOptions::default(),
        BOX,
    );
    let logical = controller.logical_model();
    let len = logical.number_of_characters();

    assert_eq!(logical.bidirectional_paragraph_info().len(), 1);
    let paragraph = &logical.bidirectional_paragraph_info()[0];
    assert_eq!(paragraph.character_run, CharacterRun::new(4, 4));
    assert!(paragraph.direction);
    assert_eq!(logical.character_directions().len(), len);
    assert_eq!(
        logical.character_directions(),
        [false, false, false, false, true, true, true, true]
    );
    assert!(!logical.is_right_to_left_paragraph(1));
    assert!(logical.is_right_to_left_paragraph(5));

    let mirrored = mirrored_text(
        logical.text(),
        logical.character_directions(),
        logical.bidirectional_paragraph_info(),
        0,
        len,
    );
    assert!(matches!(mirrored, Cow::Owned(_)), "brackets must be mirrored");
    assert_eq!(mirrored[5], ')');
    assert_eq!(mirrored[7], '(');
    assert_eq!(mirrored[1], 'b');

    // Shaping saw the mirrored brackets.
    assert_eq!(controller.visual_model().glyphs()[5].index, u32::from(')'));
}

#[test]
fn right_to_left_line_is_placed_reversed_and_right_aligned() {
    let fonts = FakeFonts::new();
    let controller = laid_out(
        &fonts,
        "\u{05D0}\u{05D1}\u{05D2}",
        LayoutOptions::default(),
        BOX,
    );
    let visual = controller.visual_model();
    let line = visual.lines()[0];

    assert!(line.direction);
    assert_eq!(glyphs_left_to_right(&controller, 0), [2, 1, 0]);
    assert_eq!(visual.glyph_positions()[2].x, 1.0);
    assert_eq!(visual.glyph_positions()[0].x, 21.0);
    assert_eq!(line.alignment_offset, 70.0);
    assert!(visual.glyphs().iter().all(|glyph| glyph.font_id == RTL_FONT));

    let logical = controller.logical_model();
    assert_eq!(logical.bidirectional_line_info().len(), 1);
    assert_eq!(logical.logical_to_visual(0), 2);
    assert_eq!(logical.visual_to_logical(0), 2);
}

#[test]
fn mixed_line_reverses_only_the_right_to_left_run() {
    let fonts = FakeFonts::new();
    let controller = laid_out(
        &fonts,
        "abc \u{05D0}\u{05D1}\u{05D2}",
        LayoutOptions::default(),
        BOX,
    );
    let visual = controller.visual_model();

    assert!(!visual.lines()[0].direction);
    assert_eq!(glyphs_left_to_right(&controller, 0), [0, 1, 2, 3, 6, 5, 4]);
    assert_eq!(visual.glyph_positions()[6].x, 41.0);
    assert_eq!(visual.lines()[0].alignment_offset, 0.0);

    let logical = controller.logical_model();
    assert_eq!(logical.logical_to_visual(4), 6);
    assert_eq!(logical.visual_to_logical(4), 6);
    assert_eq!(logical.logical_to_visual(1), 1);
    let info = &logical.bidirectional_line_info()[0];
    assert!(!info.is_identity);
    assert_eq!(info.visual_to_logical_map, [0, 1, 2, 3, 6, 5, 4]);
}

#[test]
fn trailing_space_of_right_to_left_line_hangs_on_the_left() {
    let fonts = FakeFonts::new();
    let controller = laid_out(
        &fonts,
        "\u{05D0}\u{05D1} \u{05D2}\u{05D3}",
        LayoutOptions::default(),
        Size::new(35.0, 100.0),
    );
    let visual = controller.visual_model();
    let lines = visual.lines();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].character_run, CharacterRun::new(0, 3));
    assert_eq!(lines[0].width, 20.0);
    assert_eq!(glyphs_left_to_right(&controller, 0), [2, 1, 0]);
    // Free space of 15 minus the 10 pixels of the hanging space.
    assert_eq!(lines[0].alignment_offset, 5.0);
    assert_eq!(controller.logical_model().bidirectional_line_info().len(), 2);
}
