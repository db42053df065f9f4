// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::inputs::{ExceedPolicy, MultiLinePolicy};

/// Error type for text model configuration and editing.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the context needed to explain the failure.
/// Degraded input, such as malformed UTF-8 or characters no font can render, never produces an
/// error; the engine lays out what it can.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    detail: Detail,
}

#[derive(Debug, Clone, PartialEq)]
enum Detail {
    Policy {
        multi_line: MultiLinePolicy,
        width: ExceedPolicy,
        height: ExceedPolicy,
    },
    Range {
        start: usize,
        end: usize,
        len: usize,
    },
    Message(&'static str),
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub(crate) fn unsupported_policy(
        multi_line: MultiLinePolicy,
        width: ExceedPolicy,
        height: ExceedPolicy,
    ) -> Self {
        Self {
            kind: ErrorKind::UnsupportedPolicy,
            detail: Detail::Policy {
                multi_line,
                width,
                height,
            },
        }
    }

    pub(crate) fn unsupported_ellipsis(reason: &'static str) -> Self {
        Self {
            kind: ErrorKind::UnsupportedPolicy,
            detail: Detail::Message(reason),
        }
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            detail: Detail::Range { start, end, len },
        }
    }

    #[cfg_attr(
        not(feature = "font-backend"),
        expect(dead_code, reason = "only the font backend loads font data")
    )]
    pub(crate) fn font_load(reason: &'static str) -> Self {
        Self {
            kind: ErrorKind::FontLoad,
            detail: Detail::Message(reason),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.detail {
            Detail::Policy {
                multi_line,
                width,
                height,
            } => write!(
                f,
                "unsupported layout policy: {multi_line:?} with width {width:?} and height {height:?}"
            ),
            Detail::Range { start, end, len } => {
                write!(f, "range {start}..{end} out of bounds for {len} characters")
            }
            Detail::Message(reason) => match self.kind {
                ErrorKind::FontLoad => write!(f, "failed to load font: {reason}"),
                _ => f.write_str(reason),
            },
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The multi-line, width and height policies cannot be combined.
    UnsupportedPolicy,

    /// An edit or run range lies outside the character buffer.
    InvalidRange,

    /// A font blob could not be parsed.
    FontLoad,
}
