// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{laid_out, policy, FakeFonts};
use crate::{
    ExceedPolicy, LayoutOptions, MultiLinePolicy, Size, Vector2, VerticalAlignment,
};

#[test]
fn single_line_scales_to_the_box_width() {
    let fonts = FakeFonts::new();
    let options = LayoutOptions::default()
        .with_policy(policy(
            MultiLinePolicy::NoWrap,
            ExceedPolicy::ShrinkToFit,
            ExceedPolicy::Original,
        ))
        .with_vertical_alignment(VerticalAlignment::Center);
    let controller = laid_out(&fonts, "Hello", options, Size::new(25.0, 20.0));
    let visual = controller.visual_model();

    assert_eq!(visual.text_scale(), 0.5);
    let line = visual.lines()[0];
    assert_eq!(line.width, 25.0);
    assert_eq!(line.ascender, 4.0);
    assert_eq!(line.descender, -1.0);
    assert_eq!(visual.glyph_positions()[1], Vector2::new(5.5, 0.0));
    assert_eq!(visual.layout_size(), Size::new(25.0, 5.0));
    assert_eq!(visual.vertical_offset(), 7.5);
}

#[test]
fn fitting_text_keeps_its_size() {
    let fonts = FakeFonts::new();
    let options = LayoutOptions::default().with_policy(policy(
        MultiLinePolicy::SplitByWord,
        ExceedPolicy::ShrinkToFit,
        ExceedPolicy::ShrinkToFit,
    ));
    let controller = laid_out(&fonts, "aaa bbb", options, Size::new(100.0, 100.0));
    assert_eq!(controller.visual_model().text_scale(), 1.0);
    assert_eq!(controller.visual_model().lines().len(), 1);
}

#[test]
fn wrapped_text_shrinks_until_it_fits_both_axes() {
    let fonts = FakeFonts::new();
    let options = LayoutOptions::default().with_policy(policy(
        MultiLinePolicy::SplitByWord,
        ExceedPolicy::ShrinkToFit,
        ExceedPolicy::ShrinkToFit,
    ));
    // Two lines of "aaa" are too tall; one line of "aaa bbb" needs half the size.
    let controller = laid_out(&fonts, "aaa bbb", options, Size::new(35.0, 10.0));
    let visual = controller.visual_model();
    let scale = visual.text_scale();

    assert!(scale <= 0.5 && scale > 0.49, "scale {scale}");
    assert_eq!(visual.lines().len(), 1);
    assert!(visual.layout_size().width <= 35.0);
    assert!(visual.layout_size().height <= 10.0);
}

#[test]
fn shrinking_never_goes_below_the_minimum() {
    let fonts = FakeFonts::new();
    let options = LayoutOptions::default().with_policy(policy(
        MultiLinePolicy::NoWrap,
        ExceedPolicy::ShrinkToFit,
        ExceedPolicy::ShrinkToFit,
    ));
    let controller = laid_out(&fonts, "Hello", options, Size::new(0.1, 0.1));
    assert_eq!(controller.visual_model().text_scale(), 0.01);
}
