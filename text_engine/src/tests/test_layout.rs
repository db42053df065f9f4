// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{laid_out, policy, services, FakeFonts, ADVANCE, LINE_HEIGHT};
use crate::{
    CharacterRun, Controller, EmbeddedItem, ExceedPolicy, GlyphRun, HorizontalAlignment,
    LayoutOptions, MarkupRuns, MultiLinePolicy, Size, Vector2, VerticalAlignment,
};

#[test]
fn words_wrap_with_hanging_spaces() {
    let fonts = FakeFonts::new();
    let controller = laid_out(
        &fonts,
        "Hello world",
        LayoutOptions::default(),
        Size::new(60.0, 100.0),
    );
    let visual = controller.visual_model();
    let lines = visual.lines();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].glyph_run, GlyphRun::new(0, 6));
    assert_eq!(lines[0].character_run, CharacterRun::new(0, 6));
    assert_eq!(lines[0].width, 50.0, "the space hangs");
    assert_eq!(lines[1].glyph_run, GlyphRun::new(6, 5));
    assert_eq!(lines[0].ascender, 8.0);
    assert_eq!(lines[0].descender, -2.0);

    // Glyph boxes start one pixel after the pen and reach up to the ascender.
    assert_eq!(visual.glyph_positions()[0], Vector2::new(1.0, 0.0));
    assert_eq!(visual.glyph_positions()[4], Vector2::new(41.0, 0.0));
    assert_eq!(visual.glyph_positions()[6], Vector2::new(1.0, LINE_HEIGHT));
    assert_eq!(visual.layout_size(), Size::new(50.0, 2.0 * LINE_HEIGHT));
    assert_eq!(visual.line_of_glyph(7), Some(1));
    assert_eq!(visual.number_of_lines(GlyphRun::new(3, 5)), (0, 2));
}

#[test]
fn no_wrap_keeps_one_line() {
    let fonts = FakeFonts::new();
    let options = LayoutOptions::default().with_policy(policy(
        MultiLinePolicy::NoWrap,
        ExceedPolicy::Original,
        ExceedPolicy::Original,
    ));
    let controller = laid_out(&fonts, "Hello world", options, Size::new(30.0, 10.0));
    let lines = controller.visual_model().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].width, 110.0);
    assert!(!controller.visual_model().is_text_elided());
}

#[test]
fn split_policy_breaks_long_words() {
    let fonts = FakeFonts::new();
    let options = LayoutOptions::default().with_policy(policy(
        MultiLinePolicy::SplitByWord,
        ExceedPolicy::Split,
        ExceedPolicy::Original,
    ));
    let controller = laid_out(&fonts, "abcdefgh", options, Size::new(35.0, 100.0));
    let runs: Vec<GlyphRun> = controller
        .visual_model()
        .lines()
        .iter()
        .map(|line| line.glyph_run)
        .collect();
    assert_eq!(
        runs,
        [GlyphRun::new(0, 3), GlyphRun::new(3, 3), GlyphRun::new(6, 2)]
    );
}

#[test]
fn split_by_char_fills_lines() {
    let fonts = FakeFonts::new();
    let options = LayoutOptions::default().with_policy(policy(
        MultiLinePolicy::SplitByChar,
        ExceedPolicy::Original,
        ExceedPolicy::Original,
    ));
    let controller = laid_out(&fonts, "ab cd", options, Size::new(40.0, 100.0));
    let lines = controller.visual_model().lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].character_run, CharacterRun::new(0, 4));
    assert_eq!(lines[1].character_run, CharacterRun::new(4, 1));
}

#[test]
fn horizontal_alignment_offsets_lines() {
    let fonts = FakeFonts::new();
    let box_size = Size::new(100.0, 100.0);
    let cases = [
        (HorizontalAlignment::Begin, 0.0),
        (HorizontalAlignment::Center, 25.0),
        (HorizontalAlignment::End, 50.0),
    ];
    for (alignment, expected) in cases {
        let options = LayoutOptions::default().with_horizontal_alignment(alignment);
        let controller = laid_out(&fonts, "Hello", options, box_size);
        assert_eq!(
            controller.visual_model().lines()[0].alignment_offset,
            expected,
            "{alignment:?}"
        );
    }
}

#[test]
fn vertical_alignment_offsets_the_block() {
    let fonts = FakeFonts::new();
    let box_size = Size::new(100.0, 100.0);
    let cases = [
        (VerticalAlignment::Top, 0.0),
        (VerticalAlignment::Center, 40.0),
        (VerticalAlignment::Bottom, 80.0),
    ];
    for (alignment, expected) in cases {
        let options = LayoutOptions::default().with_vertical_alignment(alignment);
        let controller = laid_out(&fonts, "one\ntwo", options, box_size);
        assert_eq!(
            controller.visual_model().vertical_offset(),
            expected,
            "{alignment:?}"
        );
    }

    // Text taller than the box is not moved up.
    let options = LayoutOptions::default().with_vertical_alignment(VerticalAlignment::Bottom);
    let controller = laid_out(&fonts, "one\ntwo", options, Size::new(100.0, 5.0));
    assert_eq!(controller.visual_model().vertical_offset(), 0.0);
}

#[test]
fn justification_spreads_free_space_over_gaps() {
    let fonts = FakeFonts::new();
    let options = LayoutOptions::default().with_justify(true);
    let controller = laid_out(&fonts, "a b c dddd", options, Size::new(70.0, 100.0));
    let visual = controller.visual_model();
    let lines = visual.lines();

    // "a b c " breaks before "dddd"; its visible width is 50 and two inner gaps stretch.
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].character_run, CharacterRun::new(0, 6));
    assert_eq!(lines[0].width, 70.0);
    assert_eq!(lines[0].alignment_offset, 0.0);
    assert_eq!(visual.glyph_positions()[0].x, 1.0);
    assert_eq!(visual.glyph_positions()[2].x, 31.0);
    assert_eq!(visual.glyph_positions()[4].x, 61.0);

    // The last line of the paragraph is not justified.
    assert_eq!(lines[1].width, 40.0);
    assert_eq!(visual.glyph_positions()[6].x, 1.0);
}

#[test]
fn line_spacing_adds_to_every_line() {
    let fonts = FakeFonts::new();
    let options = LayoutOptions::default().with_line_spacing(5.0);
    let controller = laid_out(&fonts, "one\ntwo", options, Size::new(100.0, 100.0));
    let visual = controller.visual_model();
    assert_eq!(visual.lines()[0].height(), 15.0);
    assert_eq!(visual.glyph_positions()[4].y, 15.0);
    assert_eq!(visual.layout_size().height, 30.0);
}

#[test]
fn natural_size_and_height_for_width() {
    let fonts = FakeFonts::new();
    let mut controller = Controller::new();
    controller.set_text("Hello world\nab");
    let services = services(&fonts);

    let natural = controller.natural_size(&services);
    assert_eq!(natural, Size::new(11.0 * ADVANCE, 2.0 * LINE_HEIGHT));
    assert_eq!(controller.visual_model().natural_size(), natural);

    assert_eq!(controller.height_for_width(&services, 60.0), 3.0 * LINE_HEIGHT);
    assert_eq!(controller.height_for_width(&services, 1000.0), 2.0 * LINE_HEIGHT);
    assert!(controller.visual_model().lines().is_empty(), "measuring lays nothing out");
}

#[test]
fn embedded_items_take_their_size() {
    let fonts = FakeFonts::new();
    let mut controller = Controller::new();
    let markup = MarkupRuns {
        embedded_items: vec![EmbeddedItem {
            character_index: 1,
            size: Size::new(30.0, 20.0),
        }],
        ..MarkupRuns::default()
    };
    controller.set_markup("a\u{FFFC}b", markup).unwrap();
    controller.relayout(&services(&fonts), Size::new(100.0, 100.0));
    let visual = controller.visual_model();

    assert_eq!(visual.glyphs()[1].advance, 30.0);
    assert_eq!(visual.lines()[0].ascender, 20.0);
    assert_eq!(visual.glyph_positions()[0], Vector2::new(1.0, 12.0));
    assert_eq!(visual.glyph_positions()[1], Vector2::new(10.0, 0.0));
    assert_eq!(visual.glyph_positions()[2], Vector2::new(41.0, 12.0));
    assert_eq!(visual.layout_size(), Size::new(50.0, 22.0));
}
