// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line layout: breaking, glyph positioning, elision, shrinking and alignment.

mod alignment;
mod cluster;
mod ellipsis;
mod line_break;

use core::ops::Range;

use hashbrown::HashMap;
use icu_properties::props::Script;

use self::alignment::{align, LineAlignmentInfo};
use self::cluster::{build_clusters, cluster_of_character, Cluster};
use self::ellipsis::{elide_end, elide_middle, elide_start, Elision, ELLIPSIS};
use self::line_break::{BreakLines, BreakReason, LineData, WrapMode};
use crate::bidi::reorder_line;
use crate::font::{FontMetrics, GlyphInfo, TextServices};
use crate::inputs::{
    EllipsisPosition, EmbeddedItem, ExceedPolicy, FontDescription, LayoutOptions, RequestedFonts,
};
use crate::model::runs::find_run;
use crate::model::{
    BidirectionalLineInfoRun, BidirectionalParagraphInfoRun, CharacterRun, EllipsisInfo,
    GlyphRun, HyphenInfo, LineRun, LogicalModel, VisualModel,
};
use crate::{Character, FontId, GlyphIndex, PointSize26Dot6, Size, Vector2};

const HYPHEN: char = '-';
const MIN_TEXT_SCALE: f32 = 0.01;
const SHRINK_ITERATIONS: usize = 16;

/// Font queries made while laying out, cached for the duration of one layout.
struct LayoutContext<'a> {
    services: TextServices<'a>,
    requested: RequestedFonts<'a>,
    metrics: HashMap<FontId, FontMetrics>,
    marks: HashMap<(FontId, Character), GlyphInfo>,
}

impl<'a> LayoutContext<'a> {
    fn new(services: TextServices<'a>, requested: RequestedFonts<'a>) -> Self {
        Self {
            services,
            requested,
            metrics: HashMap::new(),
            marks: HashMap::new(),
        }
    }

    fn font_metrics(&mut self, font_id: FontId) -> FontMetrics {
        let fonts = self.services.fonts;
        *self
            .metrics
            .entry(font_id)
            .or_insert_with(|| fonts.font_metrics(font_id))
    }

    /// The glyph of `character` drawn after `cluster`: in the cluster's font, or in a fallback
    /// for the description the cluster's text requested.
    fn mark_glyph(&mut self, character: Character, cluster: &Cluster) -> GlyphInfo {
        let services = self.services;
        let requested = self.requested;
        let font_id = cluster.font_id;
        *self.marks.entry((font_id, character)).or_insert_with(|| {
            let fonts = services.fonts;
            let font_id = if fonts.has_glyph(font_id, character) {
                font_id
            } else {
                let (description, point_size) = requested.at(cluster.characters.character_index);
                fonts
                    .find_fallback_font(character, &description, point_size)
                    .unwrap_or(font_id)
            };
            let run = services
                .shaper
                .shape(&[character], font_id, Script::Common, false);
            let mut glyph = run
                .glyphs
                .first()
                .copied()
                .unwrap_or_else(|| GlyphInfo::new(font_id, 0));
            fonts.glyph_metrics(core::slice::from_mut(&mut glyph));
            glyph
        })
    }

    /// Ascender and descender of a line: the extremes of its fonts and inline objects.
    fn line_extent(&mut self, source: &Source<'_>, clusters: Range<usize>) -> (f32, f32) {
        let mut ascender = 0.0_f32;
        let mut descender = 0.0_f32;
        for cluster in &source.clusters[clusters] {
            for glyph in &source.glyphs[cluster.glyphs.range()] {
                let metrics = self.font_metrics(glyph.font_id);
                ascender = ascender.max(metrics.ascender);
                descender = descender.min(metrics.descender);
            }
            if let Some(item) = source.embedded_item(cluster) {
                ascender = ascender.max(item.size.height);
            }
        }
        (ascender, descender)
    }
}

/// The shaped text being laid out.
struct Source<'a> {
    text: &'a [Character],
    glyphs: &'a [GlyphInfo],
    clusters: &'a [Cluster],
    embedded_items: &'a [EmbeddedItem],
}

impl Source<'_> {
    fn embedded_item(&self, cluster: &Cluster) -> Option<&EmbeddedItem> {
        self.embedded_items
            .iter()
            .find(|item| cluster.characters.contains(item.character_index))
    }

    fn glyph_run(&self, clusters: &Range<usize>) -> GlyphRun {
        match (self.clusters.get(clusters.start), clusters.is_empty()) {
            (Some(first), false) => {
                let last = &self.clusters[clusters.end - 1];
                GlyphRun::new(first.glyphs.glyph_index, last.glyphs.end() - first.glyphs.glyph_index)
            }
            (Some(first), true) => GlyphRun::new(first.glyphs.glyph_index, 0),
            (None, _) => GlyphRun::new(self.glyphs.len(), 0),
        }
    }

    fn character_run(&self, clusters: &Range<usize>) -> CharacterRun {
        match (self.clusters.get(clusters.start), clusters.is_empty()) {
            (Some(first), false) => {
                let last = &self.clusters[clusters.end - 1];
                let start = first.characters.character_index;
                CharacterRun::new(start, last.characters.end() - start)
            }
            (Some(first), true) => CharacterRun::new(first.characters.character_index, 0),
            (None, _) => CharacterRun::new(self.text.len(), 0),
        }
    }
}

/// Breaks the lines without positioning anything, returning the size they occupy.
fn measure(
    ctx: &mut LayoutContext<'_>,
    source: &Source<'_>,
    mode: WrapMode,
    max_width: f32,
    line_spacing: f32,
) -> Size {
    let mut breaker = BreakLines::new(source.clusters, mode);
    let mut size = Size::ZERO;
    loop {
        let Some(line) =
            breaker.break_next(max_width, &mut |c| ctx.mark_glyph(HYPHEN, c).advance)
        else {
            break;
        };
        let (ascender, descender) = ctx.line_extent(source, line.clusters.clone());
        let hyphen = match line.break_reason {
            BreakReason::Hyphen => {
                ctx.mark_glyph(HYPHEN, &source.clusters[line.clusters.end - 1])
                    .advance
            }
            _ => 0.0,
        };
        size.width = size.width.max(line.width + hyphen);
        size.height += ascender - descender + line_spacing;
    }
    size
}

/// Finds the largest scale in `(0, 1]` at which the text fits the box along the axes whose
/// exceed policy is shrink-to-fit.
fn text_scale(
    ctx: &mut LayoutContext<'_>,
    source: &Source<'_>,
    options: &LayoutOptions,
    box_size: Size,
) -> f32 {
    let policy = options.policy;
    let mode = WrapMode::new(policy);
    let shrink_width = policy.width() == ExceedPolicy::ShrinkToFit;
    let shrink_height = policy.height() == ExceedPolicy::ShrinkToFit;
    let fits = |size: Size, scale: f32| {
        (!shrink_width || size.width * scale <= box_size.width)
            && (!shrink_height || size.height * scale <= box_size.height)
    };

    let natural = measure(ctx, source, mode, box_size.width, options.line_spacing);
    if fits(natural, 1.0) {
        return 1.0;
    }

    if !mode.wraps() {
        // Without wrapping, lines keep their content and the size scales linearly.
        let mut scale = 1.0_f32;
        if shrink_width && natural.width > 0.0 {
            scale = scale.min(box_size.width / natural.width);
        }
        if shrink_height && natural.height > 0.0 {
            scale = scale.min(box_size.height / natural.height);
        }
        return scale.max(MIN_TEXT_SCALE);
    }

    // Narrower text wraps into more lines, so bisect.
    let mut low = MIN_TEXT_SCALE;
    let mut high = 1.0_f32;
    for _ in 0..SHRINK_ITERATIONS {
        let scale = (low + high) * 0.5;
        let size = measure(
            ctx,
            source,
            mode,
            box_size.width / scale,
            options.line_spacing,
        );
        if fits(size, scale) {
            low = scale;
        } else {
            high = scale;
        }
    }
    log::debug!("shrink to fit scale {low}");
    low
}

/// A line found by the breaker, with its vertical metrics and elision.
struct PlacedLine {
    data: LineData,
    first_character: usize,
    ascender: f32,
    descender: f32,
    top: f32,
    elision: Option<Elision>,
    /// Hyphen or ellipsis drawn at the cut.
    mark: Option<GlyphInfo>,
}

#[derive(Clone, Copy, Debug, Default)]
struct ElidedGlyphs {
    start: GlyphIndex,
    end: GlyphIndex,
    first_middle: GlyphIndex,
    second_middle: GlyphIndex,
}

/// Everything one layout pass produces.
#[derive(Default)]
struct LaidOut {
    lines: Vec<LineRun>,
    alignment: Vec<LineAlignmentInfo>,
    positions: Vec<Vector2>,
    hyphen: HyphenInfo,
    ellipsis: Option<EllipsisInfo>,
    elided: Option<ElidedGlyphs>,
    bidi_lines: Vec<BidirectionalLineInfoRun>,
    size: Size,
}

impl LaidOut {
    fn scale(&mut self, scale: f32) {
        let scale_point = |point: &mut Vector2| *point = Vector2::new(point.x * scale, point.y * scale);
        self.positions.iter_mut().for_each(scale_point);
        self.hyphen.positions.iter_mut().for_each(scale_point);
        if let Some(ellipsis) = &mut self.ellipsis {
            scale_point(&mut ellipsis.position);
        }
        for line in &mut self.lines {
            line.width *= scale;
            line.ascender *= scale;
            line.descender *= scale;
            line.extra_length *= scale;
            line.line_spacing *= scale;
        }
        for info in &mut self.alignment {
            info.trailing_whitespace *= scale;
        }
        self.size = Size::new(self.size.width * scale, self.size.height * scale);
    }
}

/// Writes glyph positions of one line, left to right.
struct Placer<'a, 'b> {
    source: &'b Source<'a>,
    paragraphs: &'b [BidirectionalParagraphInfoRun],
    positions: &'b mut [Vector2],
    bidi_lines: &'b mut Vec<BidirectionalLineInfoRun>,
    baseline: f32,
    pen: f32,
}

impl Placer<'_, '_> {
    /// Places the clusters of `range` in visual order.
    fn clusters(&mut self, range: Range<usize>) {
        // A single line may span paragraphs when lines don't split at separators.
        let mut start = range.start;
        while start < range.end {
            let first = self.source.clusters[start].characters.character_index;
            let paragraph = find_run(self.paragraphs, first);
            let end = match paragraph {
                Some(paragraph) => {
                    let paragraph_end = paragraph.character_run.end();
                    start
                        + self.source.clusters[start..range.end]
                            .partition_point(|c| c.characters.end() <= paragraph_end)
                }
                None => {
                    let next = self.source.clusters[start..range.end].iter().position(|c| {
                        find_run(self.paragraphs, c.characters.character_index).is_some()
                    });
                    next.map_or(range.end, |offset| start + offset)
                }
            };
            let end = end.max(start + 1);
            match paragraph {
                Some(paragraph) => self.reordered(paragraph, start..end),
                None => (start..end).for_each(|index| self.cluster(index)),
            }
            start = end;
        }
    }

    fn reordered(&mut self, paragraph: &BidirectionalParagraphInfoRun, range: Range<usize>) {
        let line = self.source.character_run(&range);
        let info = reorder_line(self.source.text, paragraph, line);
        let mut placed = vec![false; range.len()];
        for &logical in &info.visual_to_logical_map {
            let index = cluster_of_character(self.source.clusters, logical);
            if !core::mem::replace(&mut placed[index - range.start], true) {
                self.cluster(index);
            }
        }
        self.bidi_lines.push(info);
    }

    fn cluster(&mut self, index: usize) {
        let cluster = self.source.clusters[index];
        if cluster.is_right_to_left {
            cluster.glyphs.range().rev().for_each(|glyph| self.glyph(glyph));
        } else {
            cluster.glyphs.range().for_each(|glyph| self.glyph(glyph));
        }
    }

    fn glyph(&mut self, index: GlyphIndex) {
        let glyph = &self.source.glyphs[index];
        self.positions[index] =
            Vector2::new(self.pen + glyph.x_bearing, self.baseline - glyph.y_bearing);
        self.pen += glyph.advance;
    }

    fn mark(&mut self, glyph: Option<GlyphInfo>) -> Option<Vector2> {
        let glyph = glyph?;
        let position = Vector2::new(self.pen + glyph.x_bearing, self.baseline - glyph.y_bearing);
        self.pen += glyph.advance;
        Some(position)
    }
}

/// Breaks the text into lines no wider than `box_size` allows, elides the last one if needed
/// and positions every displayed glyph.
fn lay_out(
    ctx: &mut LayoutContext<'_>,
    source: &Source<'_>,
    paragraphs: &[BidirectionalParagraphInfoRun],
    options: &LayoutOptions,
    box_size: Size,
) -> LaidOut {
    let policy = options.policy;
    let ellipsize_width = policy.width() == ExceedPolicy::EllipsizeEnd;
    let ellipsize_height = policy.height() == ExceedPolicy::EllipsizeEnd;

    let mut placed: Vec<PlacedLine> = Vec::new();
    let mut top = 0.0;
    let mut elided = false;
    let mut breaker = BreakLines::new(source.clusters, WrapMode::new(policy));
    loop {
        let Some(line) =
            breaker.break_next(box_size.width, &mut |c| ctx.mark_glyph(HYPHEN, c).advance)
        else {
            break;
        };
        let (ascender, descender) = ctx.line_extent(source, line.clusters.clone());
        if ellipsize_height && !placed.is_empty() && top + ascender - descender > box_size.height {
            log::debug!("line {} exceeds the box height", placed.len());
            elided = true;
            break;
        }
        let last_cluster = &source.clusters[line.clusters.end - 1];
        let mark = (line.break_reason == BreakReason::Hyphen)
            .then(|| ctx.mark_glyph(HYPHEN, last_cluster));
        let overflows = line.width > box_size.width;
        placed.push(PlacedLine {
            first_character: source.clusters[line.clusters.start].characters.character_index,
            data: line,
            ascender,
            descender,
            top,
            elision: None,
            mark,
        });
        top += ascender - descender + options.line_spacing;
        if ellipsize_width && overflows {
            log::debug!("line {} exceeds the box width", placed.len() - 1);
            elided = true;
            break;
        }
    }

    if let Some(last) = placed.last_mut().filter(|_| elided) {
        let ellipsis = ctx.mark_glyph(ELLIPSIS, &source.clusters[last.data.clusters.end - 1]);
        let range = last.data.clusters.clone();
        let (kept, width, elision) = match options.ellipsis_position {
            EllipsisPosition::End => {
                let (kept, width) = elide_end(source.clusters, range, box_size.width, ellipsis.advance);
                (kept, width, Elision::End)
            }
            EllipsisPosition::Start => {
                let (kept, width) =
                    elide_start(source.clusters, range, box_size.width, ellipsis.advance);
                (kept, width, Elision::Start)
            }
            EllipsisPosition::Middle => {
                elide_middle(source.clusters, range, box_size.width, ellipsis.advance)
            }
        };
        last.data.clusters = kept;
        last.data.width = width;
        last.data.advance = width;
        last.elision = Some(elision);
        last.mark = Some(ellipsis);
    }

    let mut out = LaidOut {
        positions: vec![Vector2::ZERO; source.glyphs.len()],
        ..LaidOut::default()
    };
    for (line_index, line) in placed.iter().enumerate() {
        let is_rtl = find_run(paragraphs, line.first_character).is_some_and(|p| p.direction);
        let mut placer = Placer {
            source,
            paragraphs,
            positions: &mut out.positions,
            bidi_lines: &mut out.bidi_lines,
            baseline: line.top + line.ascender,
            pen: 0.0,
        };
        let front = line.data.clusters.clone();
        let mark_position = match (&line.elision, is_rtl) {
            (Some(Elision::Start), false) => {
                let position = placer.mark(line.mark);
                placer.clusters(front.clone());
                position
            }
            (Some(Elision::Middle { back, .. }), false) => {
                placer.clusters(front.clone());
                let position = placer.mark(line.mark);
                placer.clusters(back.clone());
                position
            }
            (Some(Elision::Middle { back, .. }), true) => {
                placer.clusters(back.clone());
                let position = placer.mark(line.mark);
                placer.clusters(front.clone());
                position
            }
            (Some(Elision::Start), true) | (_, false) => {
                placer.clusters(front.clone());
                placer.mark(line.mark)
            }
            (_, true) => {
                let position = placer.mark(line.mark);
                placer.clusters(front.clone());
                position
            }
        };

        let glyph_run = source.glyph_run(&front);
        let mark_advance = line.mark.map_or(0.0, |glyph| glyph.advance);
        let (second_half, second_width) = match &line.elision {
            Some(Elision::Middle { back, back_width }) => (Some(back.clone()), *back_width),
            _ => (None, 0.0),
        };
        let extra_length = match line.mark {
            Some(glyph) => glyph.x_bearing + glyph.width - glyph.advance,
            None => source.clusters[front.clone()]
                .iter()
                .rev()
                .find(|cluster| !cluster.is_whitespace)
                .map_or(0.0, |cluster| {
                    let glyph = &source.glyphs[cluster.glyphs.end() - 1];
                    glyph.x_bearing + glyph.width - glyph.advance
                }),
        };
        let line_run = LineRun {
            glyph_run,
            character_run: source.character_run(&front),
            width: line.data.width + second_width + mark_advance,
            ascender: line.ascender,
            descender: line.descender,
            extra_length: extra_length.max(0.0),
            alignment_offset: 0.0,
            direction: is_rtl,
            ellipsis: line.elision.is_some(),
            is_split_to_two_halves: second_half.is_some(),
            glyph_run_second_half: second_half
                .as_ref()
                .map_or(GlyphRun::default(), |back| source.glyph_run(back)),
            character_run_second_half: second_half
                .as_ref()
                .map_or(CharacterRun::default(), |back| source.character_run(back)),
            line_spacing: options.line_spacing,
        };

        match (&line.elision, line.mark, mark_position) {
            (None, Some(glyph), Some(position)) => {
                out.hyphen.glyphs.push(glyph);
                out.hyphen.positions.push(position);
                out.hyphen.indices.push(glyph_run.end().saturating_sub(1));
            }
            (Some(elision), Some(glyph), Some(position)) => {
                out.ellipsis = Some(EllipsisInfo {
                    glyph,
                    position,
                    line_index,
                });
                let last_glyph = source.glyphs.len().saturating_sub(1);
                out.elided = Some(match elision {
                    Elision::End => ElidedGlyphs {
                        start: 0,
                        end: glyph_run.end().saturating_sub(1),
                        ..ElidedGlyphs::default()
                    },
                    Elision::Start => ElidedGlyphs {
                        start: glyph_run.glyph_index,
                        end: last_glyph,
                        ..ElidedGlyphs::default()
                    },
                    Elision::Middle { .. } => ElidedGlyphs {
                        start: 0,
                        end: last_glyph,
                        first_middle: glyph_run.end().saturating_sub(1),
                        second_middle: line_run.glyph_run_second_half.glyph_index,
                    },
                });
            }
            _ => {}
        }

        out.alignment.push(LineAlignmentInfo {
            break_reason: line.data.break_reason,
            trailing_whitespace: if line.mark.is_some() {
                0.0
            } else {
                line.data.advance - line.data.width
            },
        });
        out.size.width = out.size.width.max(line_run.width);
        out.size.height += line_run.height();
        out.lines.push(line_run);
    }
    out.bidi_lines
        .sort_by_key(|info| info.character_run.character_index);
    out
}

/// Lays out the shaped text of the models in a box of `box_size`.
///
/// Replaces every layout result of the visual model and the bidirectional line info of the
/// logical model. A box without area produces no line.
pub(crate) fn layout_text(
    services: TextServices<'_>,
    default_font: &FontDescription,
    default_point_size: PointSize26Dot6,
    logical: &mut LogicalModel,
    visual: &mut VisualModel,
    options: &LayoutOptions,
    box_size: Size,
) {
    visual.clear_layout();
    logical.bidirectional_line_info.clear();
    if visual.shaped.glyphs.is_empty() || box_size.is_empty() {
        log::debug!("nothing to lay out in {box_size:?}");
        return;
    }

    let clusters = build_clusters(
        &logical.text,
        &logical.line_break_info,
        &logical.character_directions,
        &visual.shaped,
    );
    let source = Source {
        text: &logical.text,
        glyphs: &visual.shaped.glyphs,
        clusters: &clusters,
        embedded_items: &logical.markup.embedded_items,
    };
    let requested = RequestedFonts {
        default_description: default_font,
        default_point_size,
        runs: &logical.markup.font_description_runs,
    };
    let mut ctx = LayoutContext::new(services, requested);

    let scale = if options.policy.shrinks() {
        text_scale(&mut ctx, &source, options, box_size)
    } else {
        1.0
    };
    let mut out = lay_out(
        &mut ctx,
        &source,
        &logical.bidirectional_paragraph_info,
        options,
        Size::new(box_size.width / scale, box_size.height / scale),
    );
    if scale < 1.0 {
        out.scale(scale);
    }
    log::trace!("laid out {} lines, {:?}", out.lines.len(), out.size);

    visual.glyph_positions = out.positions;
    visual.lines = out.lines;
    visual.hyphen = out.hyphen;
    visual.ellipsis = out.ellipsis;
    visual.text_elided = out.elided.is_some();
    if let Some(elided) = out.elided {
        visual.start_index_of_elided_glyphs = elided.start;
        visual.end_index_of_elided_glyphs = elided.end;
        visual.first_middle_index_of_elided_glyphs = elided.first_middle;
        visual.second_middle_index_of_elided_glyphs = elided.second_middle;
    }
    visual.text_scale = scale;
    visual.layout_size = out.size;
    logical.bidirectional_line_info = out.bidi_lines;

    align(&logical.text, visual, &out.alignment, options, box_size);
}

fn measure_with(
    services: TextServices<'_>,
    requested: RequestedFonts<'_>,
    logical: &LogicalModel,
    visual: &VisualModel,
    mode: WrapMode,
    width: f32,
    line_spacing: f32,
) -> Size {
    if visual.shaped.glyphs.is_empty() {
        return Size::ZERO;
    }
    let clusters = build_clusters(
        &logical.text,
        &logical.line_break_info,
        &logical.character_directions,
        &visual.shaped,
    );
    let source = Source {
        text: &logical.text,
        glyphs: &visual.shaped.glyphs,
        clusters: &clusters,
        embedded_items: &logical.markup.embedded_items,
    };
    measure(
        &mut LayoutContext::new(services, requested),
        &source,
        mode,
        width,
        line_spacing,
    )
}

/// Size of the text when lines only end at paragraph separators.
pub(crate) fn natural_size(
    services: TextServices<'_>,
    default_font: &FontDescription,
    default_point_size: PointSize26Dot6,
    logical: &LogicalModel,
    visual: &VisualModel,
    options: &LayoutOptions,
) -> Size {
    measure_with(
        services,
        RequestedFonts {
            default_description: default_font,
            default_point_size,
            runs: &logical.markup.font_description_runs,
        },
        logical,
        visual,
        WrapMode::NEW_LINES,
        f32::INFINITY,
        options.line_spacing,
    )
}

/// Height of the text wrapped at `width` with the configured multi-line policy.
pub(crate) fn height_for_width(
    services: TextServices<'_>,
    default_font: &FontDescription,
    default_point_size: PointSize26Dot6,
    logical: &LogicalModel,
    visual: &VisualModel,
    options: &LayoutOptions,
    width: f32,
) -> f32 {
    measure_with(
        services,
        RequestedFonts {
            default_description: default_font,
            default_point_size,
            runs: &logical.markup.font_description_runs,
        },
        logical,
        visual,
        WrapMode::new(options.policy),
        width,
        options.line_spacing,
    )
    .height
}
