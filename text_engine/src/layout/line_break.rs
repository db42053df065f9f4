// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use core::ops::Range;

use super::cluster::Cluster;
use crate::inputs::{ExceedPolicy, LayoutPolicy, MultiLinePolicy};
use crate::model::LineBreakInfo;

/// Why a line ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BreakReason {
    /// The text ended.
    None,
    /// A paragraph separator.
    Explicit,
    /// A word boundary or, when splitting by character, any boundary.
    Regular,
    /// A hyphenation point; a hyphen is drawn.
    Hyphen,
    /// An overlong word split between two characters.
    Emergency,
}

/// Where lines may end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct WrapMode {
    new_lines: bool,
    words: bool,
    characters: bool,
    emergency: bool,
}

impl WrapMode {
    /// Lines end at paragraph separators only.
    pub(crate) const NEW_LINES: Self = Self {
        new_lines: true,
        words: false,
        characters: false,
        emergency: false,
    };

    pub(crate) fn new(policy: LayoutPolicy) -> Self {
        let split = policy.width() == ExceedPolicy::Split;
        match policy.multi_line() {
            MultiLinePolicy::NoWrap => Self::default(),
            MultiLinePolicy::SplitByNewLineChar => Self {
                new_lines: true,
                words: split,
                characters: false,
                emergency: split,
            },
            MultiLinePolicy::SplitByWord => Self {
                new_lines: true,
                words: true,
                characters: false,
                emergency: split,
            },
            MultiLinePolicy::SplitByChar => Self {
                new_lines: true,
                words: false,
                characters: true,
                emergency: false,
            },
        }
    }

    /// Whether any line may end before the text does.
    pub(crate) fn wraps(self) -> bool {
        self.words || self.characters
    }
}

/// A line found by [`BreakLines`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LineData {
    pub(crate) clusters: Range<usize>,
    /// Advance up to the end of the last cluster that is not white space.
    pub(crate) width: f32,
    /// Advance of every cluster, hanging white space included.
    pub(crate) advance: f32,
    pub(crate) break_reason: BreakReason,
}

#[derive(Clone, Default)]
struct LineState {
    clusters: Range<usize>,
    x: f32,
    width: f32,
}

#[derive(Clone)]
struct PrevBoundaryState {
    cluster_idx: usize,
    state: LineState,
    reason: BreakReason,
}

#[derive(Clone, Default)]
struct BreakerState {
    cluster_idx: usize,
    line: LineState,
    prev_boundary: Option<PrevBoundaryState>,
    emergency_boundary: Option<PrevBoundaryState>,
}

impl BreakerState {
    fn append_cluster_to_line(&mut self, cluster: &Cluster) {
        self.line.x += cluster.advance;
        if !cluster.is_whitespace {
            self.line.width = self.line.x;
        }
        self.cluster_idx += 1;
        self.line.clusters.end = self.cluster_idx;
    }

    /// Store the current iteration state so that we can revert to it if we later want to take
    /// the line breaking opportunity at this point.
    fn mark_line_break_opportunity(&mut self, reason: BreakReason) {
        self.prev_boundary = Some(PrevBoundaryState {
            cluster_idx: self.cluster_idx,
            state: self.line.clone(),
            reason,
        });
    }

    fn mark_emergency_break_opportunity(&mut self) {
        self.emergency_boundary = Some(PrevBoundaryState {
            cluster_idx: self.cluster_idx,
            state: self.line.clone(),
            reason: BreakReason::Emergency,
        });
    }

    fn revert_to(&mut self, boundary: PrevBoundaryState) -> BreakReason {
        self.line = boundary.state;
        self.cluster_idx = boundary.cluster_idx;
        boundary.reason
    }
}

/// Line breaking over the clusters of a text.
pub(crate) struct BreakLines<'a> {
    clusters: &'a [Cluster],
    mode: WrapMode,
    state: BreakerState,
    done: bool,
}

impl<'a> BreakLines<'a> {
    pub(crate) fn new(clusters: &'a [Cluster], mode: WrapMode) -> Self {
        Self {
            clusters,
            mode,
            state: BreakerState::default(),
            done: clusters.is_empty(),
        }
    }

    /// Computes the next line no wider than `max_advance`, unless a single unbreakable piece is.
    ///
    /// `hyphen_advance` gives the width of the hyphen drawn after a cluster.
    pub(crate) fn break_next(
        &mut self,
        max_advance: f32,
        hyphen_advance: &mut dyn FnMut(&Cluster) -> f32,
    ) -> Option<LineData> {
        if self.done {
            return None;
        }
        let start = self.state.cluster_idx;
        self.state.line = LineState {
            clusters: start..start,
            ..LineState::default()
        };
        self.state.prev_boundary = None;
        self.state.emergency_boundary = None;

        while let Some(cluster) = self.clusters.get(self.state.cluster_idx) {
            let next_x = self.state.line.x + cluster.advance;
            // White space hangs; everything else must fit unless the line is still empty.
            if !cluster.is_whitespace
                && next_x > max_advance
                && !self.state.line.clusters.is_empty()
            {
                if let Some(prev) = self.state.prev_boundary.take() {
                    let reason = self.state.revert_to(prev);
                    return Some(self.commit_line(reason));
                }
                if let Some(prev) = self.state.emergency_boundary.take() {
                    let reason = self.state.revert_to(prev);
                    return Some(self.commit_line(reason));
                }
            }

            self.state.append_cluster_to_line(cluster);
            let at_end = self.state.cluster_idx == self.clusters.len();
            match cluster.break_info {
                LineBreakInfo::MustBreak if self.mode.new_lines && !at_end => {
                    return Some(self.commit_line(BreakReason::Explicit));
                }
                LineBreakInfo::AllowBreak if self.mode.words => {
                    self.state
                        .mark_line_break_opportunity(BreakReason::Regular);
                }
                LineBreakInfo::HyphenationBreak if self.mode.words => {
                    if self.state.line.width + hyphen_advance(cluster) <= max_advance {
                        self.state.mark_line_break_opportunity(BreakReason::Hyphen);
                    } else if self.mode.emergency {
                        self.state.mark_emergency_break_opportunity();
                    }
                }
                _ if self.mode.characters => {
                    self.state
                        .mark_line_break_opportunity(BreakReason::Regular);
                }
                _ if self.mode.emergency => {
                    self.state.mark_emergency_break_opportunity();
                }
                _ => {}
            }
        }

        self.done = true;
        Some(self.commit_line(BreakReason::None))
    }

    fn commit_line(&mut self, break_reason: BreakReason) -> LineData {
        if self.state.cluster_idx == self.clusters.len() {
            self.done = true;
        }
        let line = &self.state.line;
        LineData {
            clusters: line.clusters.clone(),
            width: line.width,
            advance: line.x,
            break_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CharacterRun, GlyphRun};

    /// One cluster per character, ten pixels each.
    fn clusters(text: &str, breaks: &str) -> Vec<Cluster> {
        text.chars()
            .zip(breaks.chars())
            .enumerate()
            .map(|(i, (ch, info))| Cluster {
                characters: CharacterRun::new(i, 1),
                glyphs: GlyphRun::new(i, 1),
                advance: if ch == '\n' { 0.0 } else { 10.0 },
                is_whitespace: ch.is_whitespace(),
                break_info: match info {
                    'a' => LineBreakInfo::AllowBreak,
                    'm' => LineBreakInfo::MustBreak,
                    'h' => LineBreakInfo::HyphenationBreak,
                    _ => LineBreakInfo::NoBreak,
                },
                is_right_to_left: false,
                font_id: 1,
            })
            .collect()
    }

    fn break_all(clusters: &[Cluster], policy: LayoutPolicy, max_advance: f32) -> Vec<LineData> {
        let mut breaker = BreakLines::new(clusters, WrapMode::new(policy));
        let mut lines = Vec::new();
        while let Some(line) = breaker.break_next(max_advance, &mut |_| 10.0) {
            lines.push(line);
        }
        lines
    }

    fn policy(multi_line: MultiLinePolicy, width: ExceedPolicy) -> LayoutPolicy {
        LayoutPolicy::new(multi_line, width, ExceedPolicy::Original).unwrap()
    }

    fn ranges(lines: &[LineData]) -> Vec<Range<usize>> {
        lines.iter().map(|line| line.clusters.clone()).collect()
    }

    #[test]
    fn words_wrap_and_spaces_hang() {
        let clusters = clusters("aaa bbb ccc", "___a___a__m");
        let lines = break_all(
            &clusters,
            policy(MultiLinePolicy::SplitByWord, ExceedPolicy::Original),
            65.0,
        );
        assert_eq!(ranges(&lines), [0..4, 4..8, 8..11]);
        assert_eq!(lines[0].width, 30.0);
        assert_eq!(lines[0].advance, 40.0);
        assert_eq!(lines[0].break_reason, BreakReason::Regular);
        assert_eq!(lines[2].break_reason, BreakReason::None);
    }

    #[test]
    fn long_words_overflow_unless_split() {
        let clusters = clusters("aaaaaa b", "______am");
        let lines = break_all(
            &clusters,
            policy(MultiLinePolicy::SplitByWord, ExceedPolicy::Original),
            35.0,
        );
        assert_eq!(ranges(&lines), [0..7, 7..8]);
        assert_eq!(lines[0].width, 60.0);

        let lines = break_all(
            &clusters,
            policy(MultiLinePolicy::SplitByWord, ExceedPolicy::Split),
            35.0,
        );
        assert_eq!(ranges(&lines), [0..3, 3..7, 7..8]);
        assert_eq!(lines[0].break_reason, BreakReason::Emergency);
    }

    #[test]
    fn new_line_policy_only_breaks_at_separators() {
        let clusters = clusters("aa bb\ncc", "__a__m_m");
        let lines = break_all(
            &clusters,
            policy(MultiLinePolicy::SplitByNewLineChar, ExceedPolicy::Original),
            20.0,
        );
        assert_eq!(ranges(&lines), [0..6, 6..8]);
        assert_eq!(lines[0].break_reason, BreakReason::Explicit);

        let lines = break_all(
            &clusters,
            policy(MultiLinePolicy::NoWrap, ExceedPolicy::Original),
            20.0,
        );
        assert_eq!(ranges(&lines), [0..8]);
    }

    #[test]
    fn split_by_char_breaks_anywhere() {
        let clusters = clusters("abcdefg", "______m");
        let lines = break_all(
            &clusters,
            policy(MultiLinePolicy::SplitByChar, ExceedPolicy::Original),
            30.0,
        );
        assert_eq!(ranges(&lines), [0..3, 3..6, 6..7]);
    }

    #[test]
    fn hyphenation_points_are_taken_when_the_hyphen_fits() {
        let clusters = clusters("abcdef", "__h__m");
        let lines = break_all(
            &clusters,
            policy(MultiLinePolicy::SplitByWord, ExceedPolicy::Original),
            45.0,
        );
        assert_eq!(ranges(&lines), [0..3, 3..6]);
        assert_eq!(lines[0].break_reason, BreakReason::Hyphen);

        // "abc" plus a hyphen needs 40 pixels.
        let lines = break_all(
            &clusters,
            policy(MultiLinePolicy::SplitByWord, ExceedPolicy::Original),
            35.0,
        );
        assert_eq!(ranges(&lines), [0..6]);
    }

    #[test]
    fn trailing_separator_adds_no_line() {
        let clusters = clusters("ab\n", "__m");
        let lines = break_all(
            &clusters,
            policy(MultiLinePolicy::SplitByWord, ExceedPolicy::Original),
            100.0,
        );
        assert_eq!(ranges(&lines), [0..3]);
    }
}
