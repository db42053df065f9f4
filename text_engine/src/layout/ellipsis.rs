// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Truncation of the last displayed line around an ellipsis.

use core::ops::Range;

use super::cluster::Cluster;

/// The ellipsis character.
pub(crate) const ELLIPSIS: char = '\u{2026}';

/// How an elided line is cut.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Elision {
    /// The visible clusters are the start of the line.
    End,
    /// The visible clusters are the end of the line.
    Start,
    /// The line shows its start and its end around the ellipsis.
    Middle { back: Range<usize>, back_width: f32 },
}

fn advance(clusters: &[Cluster]) -> f32 {
    clusters.iter().map(|cluster| cluster.advance).sum()
}

/// Drops clusters from the end of `line` until the rest and the ellipsis fit `max_width`.
///
/// Returns the kept clusters, without trailing white space, and their width.
pub(crate) fn elide_end(
    clusters: &[Cluster],
    line: Range<usize>,
    max_width: f32,
    ellipsis_advance: f32,
) -> (Range<usize>, f32) {
    let mut end = line.end;
    let mut width = advance(&clusters[line.clone()]);
    loop {
        while end > line.start && clusters[end - 1].is_whitespace {
            end -= 1;
            width -= clusters[end].advance;
        }
        if end == line.start || width + ellipsis_advance <= max_width {
            break;
        }
        end -= 1;
        width -= clusters[end].advance;
    }
    (line.start..end, width.max(0.0))
}

/// Keeps as many clusters from the end of `line` as fit `max_width` after the ellipsis.
///
/// White space ending the line hangs and costs nothing.
pub(crate) fn elide_start(
    clusters: &[Cluster],
    line: Range<usize>,
    max_width: f32,
    ellipsis_advance: f32,
) -> (Range<usize>, f32) {
    let mut start = line.end;
    while start > line.start && clusters[start - 1].is_whitespace {
        start -= 1;
    }
    let mut width = 0.0;
    while start > line.start {
        let next = width + clusters[start - 1].advance;
        if next + ellipsis_advance > max_width {
            break;
        }
        width = next;
        start -= 1;
    }
    (start..line.end, width)
}

/// Splits `line` into a start and an end that fit `max_width` together with the ellipsis
/// between them. The start gets at most half of the space.
///
/// Returns the start clusters and their width, and the [`Elision`] describing the end.
pub(crate) fn elide_middle(
    clusters: &[Cluster],
    line: Range<usize>,
    max_width: f32,
    ellipsis_advance: f32,
) -> (Range<usize>, f32, Elision) {
    let available = (max_width - ellipsis_advance).max(0.0);

    let mut front_end = line.start;
    let mut front_width = 0.0;
    while front_end < line.end {
        let next = front_width + clusters[front_end].advance;
        if next > available * 0.5 {
            break;
        }
        front_width = next;
        front_end += 1;
    }

    let mut back_start = line.end;
    while back_start > front_end && clusters[back_start - 1].is_whitespace {
        back_start -= 1;
    }
    let mut back_width = 0.0;
    while back_start > front_end {
        let next = back_width + clusters[back_start - 1].advance;
        if front_width + next > available {
            break;
        }
        back_width = next;
        back_start -= 1;
    }

    (
        line.start..front_end,
        front_width,
        Elision::Middle {
            back: back_start..line.end,
            back_width,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CharacterRun, GlyphRun, LineBreakInfo};

    fn clusters(text: &str) -> Vec<Cluster> {
        text.chars()
            .enumerate()
            .map(|(i, ch)| Cluster {
                characters: CharacterRun::new(i, 1),
                glyphs: GlyphRun::new(i, 1),
                advance: 10.0,
                is_whitespace: ch.is_whitespace(),
                break_info: LineBreakInfo::NoBreak,
                is_right_to_left: false,
                font_id: 1,
            })
            .collect()
    }

    #[test]
    fn end_drops_trailing_space_before_the_ellipsis() {
        let clusters = clusters("abc defgh");
        assert_eq!(elide_end(&clusters, 0..9, 50.0, 10.0), (0..3, 30.0));
        assert_eq!(elide_end(&clusters, 0..9, 75.0, 10.0), (0..6, 60.0));
        assert_eq!(elide_end(&clusters, 0..9, 5.0, 10.0), (0..0, 0.0));
    }

    #[test]
    fn start_keeps_the_tail() {
        let clusters = clusters("abcdefgh ");
        assert_eq!(elide_start(&clusters, 0..9, 45.0, 10.0), (5..9, 30.0));
    }

    #[test]
    fn middle_keeps_both_ends() {
        let clusters = clusters("abcdefghij");
        let (front, front_width, elision) = elide_middle(&clusters, 0..10, 60.0, 10.0);
        assert_eq!(front, 0..2);
        assert_eq!(front_width, 20.0);
        assert_eq!(
            elision,
            Elision::Middle {
                back: 7..10,
                back_width: 30.0
            }
        );
    }
}
