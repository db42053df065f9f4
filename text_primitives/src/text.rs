// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The paragraph's base direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum BaseDirection {
    /// Choose direction automatically from the first strong character.
    #[default]
    Auto,
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Horizontal placement of a line inside the layout box.
///
/// `Begin` and `End` follow the direction of each line: `Begin` is the left edge of a
/// left-to-right line and the right edge of a right-to-left one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    /// Align to the start edge of the line.
    #[default]
    Begin,
    /// Center the line.
    Center,
    /// Align to the end edge of the line.
    End,
}

/// Vertical placement of the laid out text inside the layout box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    /// First line touches the top edge.
    #[default]
    Top,
    /// Text block is centered.
    Center,
    /// Last line touches the bottom edge.
    Bottom,
}

impl HorizontalAlignment {
    /// Resolves the alignment to a fraction of the free space that goes before the line.
    ///
    /// ```
    /// use text_primitives::HorizontalAlignment;
    ///
    /// assert_eq!(HorizontalAlignment::Begin.free_space_factor(false), 0.0);
    /// assert_eq!(HorizontalAlignment::Begin.free_space_factor(true), 1.0);
    /// assert_eq!(HorizontalAlignment::Center.free_space_factor(true), 0.5);
    /// ```
    pub fn free_space_factor(self, is_rtl: bool) -> f32 {
        match (self, is_rtl) {
            (Self::Center, _) => 0.5,
            (Self::Begin, false) | (Self::End, true) => 0.0,
            (Self::Begin, true) | (Self::End, false) => 1.0,
        }
    }
}

impl VerticalAlignment {
    /// Resolves the alignment to a fraction of the free vertical space that goes above the text.
    pub fn free_space_factor(self) -> f32 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }
}
