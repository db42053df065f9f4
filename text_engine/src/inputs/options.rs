// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_primitives::{BaseDirection, HorizontalAlignment, VerticalAlignment};

use crate::Error;

/// How text is split into lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MultiLinePolicy {
    /// Everything on a single line.
    NoWrap,
    /// A new line only after paragraph separators.
    SplitByNewLineChar,
    /// Wrap at word boundaries.
    #[default]
    SplitByWord,
    /// Wrap between any two glyphs.
    SplitByChar,
}

/// What happens when laid out text does not fit the layout box along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExceedPolicy {
    /// Overflow the box.
    #[default]
    Original,
    /// Overflow the box; the renderer fades the overflowing part.
    Fade,
    /// Split overlong content onto more lines. Width only.
    Split,
    /// Scale the text down until it fits.
    ShrinkToFit,
    /// Cut the text and draw an ellipsis.
    EllipsizeEnd,
}

/// A validated multi-line policy with its width and height exceed policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutPolicy {
    multi_line: MultiLinePolicy,
    width: ExceedPolicy,
    height: ExceedPolicy,
}

impl LayoutPolicy {
    /// Combines the three policies, rejecting combinations the layout engine does not implement.
    ///
    /// ```
    /// use text_engine::{ErrorKind, ExceedPolicy, LayoutPolicy, MultiLinePolicy};
    ///
    /// assert!(LayoutPolicy::new(
    ///     MultiLinePolicy::SplitByWord,
    ///     ExceedPolicy::EllipsizeEnd,
    ///     ExceedPolicy::EllipsizeEnd,
    /// )
    /// .is_ok());
    ///
    /// let err = LayoutPolicy::new(
    ///     MultiLinePolicy::SplitByChar,
    ///     ExceedPolicy::Original,
    ///     ExceedPolicy::ShrinkToFit,
    /// )
    /// .unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::UnsupportedPolicy);
    /// ```
    pub fn new(
        multi_line: MultiLinePolicy,
        width: ExceedPolicy,
        height: ExceedPolicy,
    ) -> Result<Self, Error> {
        if is_supported(multi_line, width, height) {
            Ok(Self {
                multi_line,
                width,
                height,
            })
        } else {
            Err(Error::unsupported_policy(multi_line, width, height))
        }
    }

    /// The line splitting policy.
    pub fn multi_line(&self) -> MultiLinePolicy {
        self.multi_line
    }

    /// The horizontal exceed policy.
    pub fn width(&self) -> ExceedPolicy {
        self.width
    }

    /// The vertical exceed policy.
    pub fn height(&self) -> ExceedPolicy {
        self.height
    }

    /// Returns `true` if either axis ellipsizes.
    pub fn ellipsizes(&self) -> bool {
        self.width == ExceedPolicy::EllipsizeEnd || self.height == ExceedPolicy::EllipsizeEnd
    }

    /// Returns `true` if either axis shrinks the text.
    pub fn shrinks(&self) -> bool {
        self.width == ExceedPolicy::ShrinkToFit || self.height == ExceedPolicy::ShrinkToFit
    }
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            multi_line: MultiLinePolicy::SplitByWord,
            width: ExceedPolicy::Original,
            height: ExceedPolicy::Original,
        }
    }
}

fn is_supported(multi_line: MultiLinePolicy, width: ExceedPolicy, height: ExceedPolicy) -> bool {
    use ExceedPolicy::*;
    use MultiLinePolicy::*;

    match (multi_line, height) {
        (_, Split) => false,
        (NoWrap, Original | Fade) => matches!(width, Original | Fade | ShrinkToFit | EllipsizeEnd),
        (NoWrap, ShrinkToFit) => width == ShrinkToFit,
        (NoWrap, EllipsizeEnd) => width == EllipsizeEnd,
        (SplitByNewLineChar | SplitByWord, Original) => true,
        (SplitByNewLineChar | SplitByWord, Fade) => matches!(width, Original | Fade | Split),
        (SplitByNewLineChar | SplitByWord, ShrinkToFit) => width == ShrinkToFit,
        (SplitByNewLineChar | SplitByWord, EllipsizeEnd) => matches!(width, Split | EllipsizeEnd),
        (SplitByChar, Original | Fade) => matches!(width, Original | Fade),
        (SplitByChar, ShrinkToFit | EllipsizeEnd) => false,
    }
}

/// Where the ellipsis goes when text is elided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EllipsisPosition {
    /// After the last displayed glyph.
    #[default]
    End,
    /// Before the first displayed glyph. Single line only.
    Start,
    /// Between the two displayed halves. Single line only.
    Middle,
}

/// Layout configuration of a text model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Line splitting and exceed policies.
    pub policy: LayoutPolicy,
    /// Ellipsis placement for elided text.
    pub ellipsis_position: EllipsisPosition,
    /// Horizontal alignment of each line.
    pub horizontal_alignment: HorizontalAlignment,
    /// Vertical alignment of the text block.
    pub vertical_alignment: VerticalAlignment,
    /// Stretch every line but the last of each paragraph to the box width.
    pub justify: bool,
    /// Extra space in pixels added below every line.
    pub line_spacing: f32,
    /// Insert hyphenation opportunities inside words.
    pub hyphenation: bool,
    /// Direction of paragraphs whose direction is not set by their content.
    pub base_direction: BaseDirection,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            policy: LayoutPolicy::default(),
            ellipsis_position: EllipsisPosition::End,
            horizontal_alignment: HorizontalAlignment::Begin,
            vertical_alignment: VerticalAlignment::Top,
            justify: false,
            line_spacing: 0.0,
            hyphenation: false,
            base_direction: BaseDirection::Auto,
        }
    }
}

impl LayoutOptions {
    /// Sets the policies.
    pub fn with_policy(mut self, policy: LayoutPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the ellipsis position.
    pub fn with_ellipsis_position(mut self, position: EllipsisPosition) -> Self {
        self.ellipsis_position = position;
        self
    }

    /// Sets the horizontal alignment.
    pub fn with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    /// Sets the vertical alignment.
    pub fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    /// Enables or disables justification.
    pub fn with_justify(mut self, justify: bool) -> Self {
        self.justify = justify;
        self
    }

    /// Sets the extra line spacing in pixels.
    pub fn with_line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    /// Enables or disables hyphenation.
    pub fn with_hyphenation(mut self, hyphenation: bool) -> Self {
        self.hyphenation = hyphenation;
        self
    }

    /// Sets the base direction.
    pub fn with_base_direction(mut self, direction: BaseDirection) -> Self {
        self.base_direction = direction;
        self
    }

    /// Checks the settings that depend on each other.
    pub fn validate(&self) -> Result<(), Error> {
        if self.ellipsis_position != EllipsisPosition::End
            && self.policy.multi_line() != MultiLinePolicy::NoWrap
        {
            return Err(Error::unsupported_ellipsis(
                "start and middle ellipsis require a single line",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    const MULTI_LINE: [MultiLinePolicy; 4] = [
        MultiLinePolicy::NoWrap,
        MultiLinePolicy::SplitByNewLineChar,
        MultiLinePolicy::SplitByWord,
        MultiLinePolicy::SplitByChar,
    ];
    const EXCEED: [ExceedPolicy; 5] = [
        ExceedPolicy::Original,
        ExceedPolicy::Fade,
        ExceedPolicy::Split,
        ExceedPolicy::ShrinkToFit,
        ExceedPolicy::EllipsizeEnd,
    ];

    #[test]
    fn split_is_never_a_height_policy() {
        for multi_line in MULTI_LINE {
            for width in EXCEED {
                let err = LayoutPolicy::new(multi_line, width, ExceedPolicy::Split).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::UnsupportedPolicy);
            }
        }
    }

    #[test]
    fn split_by_char_only_overflows() {
        let supported: Vec<_> = EXCEED
            .iter()
            .flat_map(|&w| EXCEED.iter().map(move |&h| (w, h)))
            .filter(|&(w, h)| LayoutPolicy::new(MultiLinePolicy::SplitByChar, w, h).is_ok())
            .collect();
        assert_eq!(
            supported,
            vec![
                (ExceedPolicy::Original, ExceedPolicy::Original),
                (ExceedPolicy::Original, ExceedPolicy::Fade),
                (ExceedPolicy::Fade, ExceedPolicy::Original),
                (ExceedPolicy::Fade, ExceedPolicy::Fade),
            ]
        );
    }

    #[test]
    fn word_wrap_table() {
        let ok = |w, h| LayoutPolicy::new(MultiLinePolicy::SplitByWord, w, h).is_ok();
        for width in EXCEED {
            assert!(ok(width, ExceedPolicy::Original), "{width:?}");
        }
        assert!(ok(ExceedPolicy::Split, ExceedPolicy::Fade));
        assert!(!ok(ExceedPolicy::ShrinkToFit, ExceedPolicy::Fade));
        assert!(ok(ExceedPolicy::ShrinkToFit, ExceedPolicy::ShrinkToFit));
        assert!(!ok(ExceedPolicy::Original, ExceedPolicy::ShrinkToFit));
        assert!(ok(ExceedPolicy::Split, ExceedPolicy::EllipsizeEnd));
        assert!(ok(ExceedPolicy::EllipsizeEnd, ExceedPolicy::EllipsizeEnd));
        assert!(!ok(ExceedPolicy::Fade, ExceedPolicy::EllipsizeEnd));
    }

    #[test]
    fn no_wrap_cannot_split() {
        let err = LayoutPolicy::new(
            MultiLinePolicy::NoWrap,
            ExceedPolicy::Split,
            ExceedPolicy::Original,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedPolicy);
    }

    #[test]
    fn middle_ellipsis_needs_single_line() {
        let options = LayoutOptions::default().with_ellipsis_position(EllipsisPosition::Middle);
        assert!(options.validate().is_err());

        let policy = LayoutPolicy::new(
            MultiLinePolicy::NoWrap,
            ExceedPolicy::EllipsizeEnd,
            ExceedPolicy::Original,
        )
        .unwrap();
        assert!(options.with_policy(policy).validate().is_ok());
    }
}
