// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A font collection built from registered font blobs.

use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use icu_properties::props::Script;
use parking_lot::RwLock;
use skrifa::instance::{LocationRef, Size};
use skrifa::MetadataProvider;

use super::{FontClient, FontMetrics, GlyphInfo, ShapedRun, Shaper};
use crate::inputs::FontDescription;
use crate::{Character, Error, FontId, PointSize26Dot6};

const DEFAULT_DPI: u32 = 96;

/// Fonts registered from memory, matched by description and rendered through `skrifa` and
/// `harfrust`.
///
/// A [`FontId`] names one face at one point size. Ids are interned on first request and stay
/// valid for the lifetime of the collection.
pub struct FontCollection {
    state: RwLock<State>,
    shaper_data: RwLock<HashMap<usize, Arc<harfrust::ShaperData>>>,
}

struct Face {
    data: Arc<[u8]>,
    index: u32,
    description: FontDescription,
}

#[derive(Clone, Copy)]
struct Instance {
    face: usize,
    point_size: PointSize26Dot6,
}

struct State {
    faces: Vec<Face>,
    instances: Vec<Instance>,
    instance_ids: HashMap<(usize, PointSize26Dot6), FontId>,
    default_family: String,
    dpi: (u32, u32),
}

impl FontCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                faces: Vec::new(),
                instances: Vec::new(),
                instance_ids: HashMap::new(),
                default_family: String::new(),
                dpi: (DEFAULT_DPI, DEFAULT_DPI),
            }),
            shaper_data: RwLock::new(HashMap::new()),
        }
    }

    /// Registers the face at `index` of a font file, matched by `description`.
    ///
    /// The first registered family becomes the default family.
    pub fn register(
        &self,
        data: impl Into<Arc<[u8]>>,
        index: u32,
        description: FontDescription,
    ) -> Result<(), Error> {
        let data = data.into();
        skrifa::FontRef::from_index(&data, index).map_err(|_| Error::font_load("unreadable font"))?;
        let mut state = self.state.write();
        if state.default_family.is_empty() {
            state.default_family.clone_from(&description.family);
        }
        log::debug!("registered font face {:?}", description.family);
        state.faces.push(Face {
            data,
            index,
            description,
        });
        Ok(())
    }

    /// Sets the family used for descriptions without a family name.
    pub fn set_default_family(&self, family: impl Into<String>) {
        self.state.write().default_family = family.into();
    }

    /// Number of registered faces.
    pub fn face_count(&self) -> usize {
        self.state.read().faces.len()
    }

    fn intern(&self, face: usize, point_size: PointSize26Dot6) -> FontId {
        if let Some(id) = self.state.read().instance_ids.get(&(face, point_size)) {
            return *id;
        }
        let mut state = self.state.write();
        if let Some(id) = state.instance_ids.get(&(face, point_size)) {
            return *id;
        }
        state.instances.push(Instance { face, point_size });
        let id = FontId::try_from(state.instances.len()).unwrap_or(FontId::MAX);
        state.instance_ids.insert((face, point_size), id);
        id
    }

    /// Shaping tables of a face, built on first use.
    fn shaper_data(&self, face: usize, font: &harfrust::FontRef<'_>) -> Arc<harfrust::ShaperData> {
        if let Some(data) = self.shaper_data.read().get(&face) {
            return data.clone();
        }
        self.shaper_data
            .write()
            .entry(face)
            .or_insert_with(|| Arc::new(harfrust::ShaperData::new(font)))
            .clone()
    }
}

impl Default for FontCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FontCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("FontCollection")
            .field("faces", &state.faces.len())
            .field("instances", &state.instances.len())
            .field("default_family", &state.default_family)
            .field("dpi", &state.dpi)
            .field("shaped_faces", &self.shaper_data.read().len())
            .finish_non_exhaustive()
    }
}

impl State {
    fn instance(&self, font_id: FontId) -> Option<(Instance, &Face)> {
        let instance = *self.instances.get((font_id as usize).checked_sub(1)?)?;
        Some((instance, self.faces.get(instance.face)?))
    }

    fn pixel_size(&self, point_size: PointSize26Dot6) -> f32 {
        point_size as f32 / 64.0 * self.dpi.1 as f32 / 72.0
    }

    /// Faces ordered from best to worst match for `description`.
    fn ranked_faces(&self, description: &FontDescription) -> Vec<usize> {
        let family = if description.family.is_empty() {
            self.default_family.as_str()
        } else {
            description.family.as_str()
        };
        let penalty = |face: &Face| {
            let mut penalty = 0.0;
            if !face.description.family.eq_ignore_ascii_case(family) {
                penalty += 1_000_000.0;
            }
            penalty += description.slant.distance(face.description.slant) * 10_000.0;
            penalty += description.width.distance(face.description.width) * 100.0;
            penalty + description.weight.distance(face.description.weight)
        };
        let mut ranked: Vec<(f32, usize)> = self
            .faces
            .iter()
            .enumerate()
            .map(|(index, face)| (penalty(face), index))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        ranked.into_iter().map(|(_, index)| index).collect()
    }
}

impl Face {
    fn font_ref(&self) -> Option<skrifa::FontRef<'_>> {
        skrifa::FontRef::from_index(&self.data, self.index).ok()
    }

    fn covers(&self, character: Character) -> bool {
        self.font_ref()
            .is_some_and(|font| font.charmap().map(character).is_some())
    }
}

impl FontClient for FontCollection {
    fn font_id(&self, description: &FontDescription, point_size: PointSize26Dot6) -> FontId {
        let best = self.state.read().ranked_faces(description).first().copied();
        match best {
            Some(face) => self.intern(face, point_size),
            None => {
                log::warn!("font collection is empty");
                0
            }
        }
    }

    fn has_glyph(&self, font_id: FontId, character: Character) -> bool {
        let state = self.state.read();
        state
            .instance(font_id)
            .is_some_and(|(_, face)| face.covers(character))
    }

    fn find_fallback_font(
        &self,
        character: Character,
        preferred: &FontDescription,
        point_size: PointSize26Dot6,
    ) -> Option<FontId> {
        let face = {
            let state = self.state.read();
            state
                .ranked_faces(preferred)
                .into_iter()
                .find(|&index| state.faces[index].covers(character))?
        };
        Some(self.intern(face, point_size))
    }

    fn font_metrics(&self, font_id: FontId) -> FontMetrics {
        let state = self.state.read();
        let Some((instance, face)) = state.instance(font_id) else {
            return FontMetrics::default();
        };
        let Some(font) = face.font_ref() else {
            return FontMetrics::default();
        };
        let metrics = font.metrics(
            Size::new(state.pixel_size(instance.point_size)),
            LocationRef::default(),
        );
        let (underline_position, underline_thickness) = metrics
            .underline
            .map(|decoration| (-decoration.offset, decoration.thickness))
            .unwrap_or((0.0, 0.0));
        FontMetrics {
            ascender: metrics.ascent,
            descender: metrics.descent,
            height: metrics.ascent - metrics.descent + metrics.leading,
            underline_position,
            underline_thickness,
        }
    }

    fn glyph_metrics(&self, glyphs: &mut [GlyphInfo]) {
        let state = self.state.read();
        for glyph in glyphs {
            let Some((instance, face)) = state.instance(glyph.font_id) else {
                continue;
            };
            let Some(font) = face.font_ref() else {
                continue;
            };
            let metrics = font.glyph_metrics(
                Size::new(state.pixel_size(instance.point_size)),
                LocationRef::default(),
            );
            // Bearings add to the offsets the shaper stored.
            if let Some(bounds) = metrics.bounds(skrifa::GlyphId::new(glyph.index)) {
                glyph.width = bounds.x_max - bounds.x_min;
                glyph.height = bounds.y_max - bounds.y_min;
                glyph.x_bearing += bounds.x_min;
                glyph.y_bearing += bounds.y_max;
            }
        }
    }

    fn set_dpi(&self, horizontal: u32, vertical: u32) {
        self.state.write().dpi = (horizontal, vertical);
    }
}

impl Shaper for FontCollection {
    fn shape(
        &self,
        text: &[Character],
        font_id: FontId,
        _script: Script,
        is_right_to_left: bool,
    ) -> ShapedRun {
        let state = self.state.read();
        let Some((instance, face)) = state.instance(font_id) else {
            return ShapedRun::default();
        };
        let Ok(font_ref) = harfrust::FontRef::from_index(&face.data, face.index) else {
            return ShapedRun::default();
        };
        let pixel_size = state.pixel_size(instance.point_size);
        let units_per_em = face
            .font_ref()
            .map(|font| font.metrics(Size::unscaled(), LocationRef::default()).units_per_em)
            .unwrap_or(1000);
        let scale = pixel_size / f32::from(units_per_em.max(1));

        let shaper_data = self.shaper_data(instance.face, &font_ref);
        let shaper = shaper_data
            .shaper(&font_ref)
            .point_size(Some(pixel_size))
            .build();

        let mut buffer = harfrust::UnicodeBuffer::new();
        buffer.reserve(text.len());
        for (cluster, &ch) in text.iter().enumerate() {
            buffer.add(ch, u32::try_from(cluster).unwrap_or(u32::MAX));
        }
        buffer.set_direction(if is_right_to_left {
            harfrust::Direction::RightToLeft
        } else {
            harfrust::Direction::LeftToRight
        });
        buffer.guess_segment_properties();

        let output = shaper.shape(buffer, &[]);
        let mut run = ShapedRun {
            glyphs: Vec::with_capacity(output.len()),
            clusters: Vec::with_capacity(output.len()),
        };
        for (info, position) in output.glyph_infos().iter().zip(output.glyph_positions()) {
            let mut glyph = GlyphInfo::new(font_id, info.glyph_id);
            glyph.advance = position.x_advance as f32 * scale;
            glyph.x_bearing = position.x_offset as f32 * scale;
            glyph.y_bearing = position.y_offset as f32 * scale;
            run.glyphs.push(glyph);
            run.clusters.push(info.cluster as usize);
        }
        // Right-to-left output comes in visual order.
        if is_right_to_left {
            run.glyphs.reverse();
            run.clusters.reverse();
        }
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEJAVU_SANS: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

    fn dejavu() -> (FontCollection, FontId) {
        let fonts = FontCollection::new();
        fonts
            .register(DEJAVU_SANS, 0, FontDescription::new("DejaVu Sans"))
            .unwrap();
        let font_id = fonts.font_id(&FontDescription::default(), crate::DEFAULT_POINT_SIZE);
        (fonts, font_id)
    }

    #[test]
    fn empty_collection_degrades() {
        let fonts = FontCollection::new();
        let id = fonts.font_id(&FontDescription::default(), crate::DEFAULT_POINT_SIZE);
        assert_eq!(id, 0);
        assert!(!fonts.has_glyph(id, 'a'));
        assert_eq!(fonts.font_metrics(id), FontMetrics::default());
        assert!(fonts.shape(&['a'], id, Script::Latin, false).glyphs.is_empty());
    }

    #[test]
    fn garbage_is_rejected() {
        let fonts = FontCollection::new();
        let err = fonts
            .register(vec![0_u8; 16], 0, FontDescription::new("Broken"))
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::FontLoad);
        assert_eq!(fonts.face_count(), 0);
    }

    #[test]
    fn marks_keep_their_attachment_offset() {
        let (fonts, font_id) = dejavu();
        let mut run = fonts.shape(&['x', '\u{0301}'], font_id, Script::Latin, false);
        assert_eq!(run.glyphs.len(), 2);
        let mark = run.glyphs[1];
        assert_eq!(mark.advance, 0.0, "a mark does not move the pen");
        assert!(mark.x_bearing < 0.0, "the mark is pulled back over its base");

        let mut unshaped = GlyphInfo::new(font_id, mark.index);
        fonts.glyph_metrics(core::slice::from_mut(&mut unshaped));
        fonts.glyph_metrics(&mut run.glyphs);
        let placed = run.glyphs[1];
        assert_eq!(placed.advance, 0.0);
        assert_eq!(placed.x_bearing, mark.x_bearing + unshaped.x_bearing);
        assert_eq!(placed.y_bearing, mark.y_bearing + unshaped.y_bearing);
    }

    #[test]
    fn shaping_tables_are_built_once_per_face() {
        let (fonts, font_id) = dejavu();
        let bigger = fonts.font_id(&FontDescription::default(), crate::DEFAULT_POINT_SIZE * 2);
        assert_ne!(font_id, bigger);

        let first = fonts.shape(&['a', 'b'], font_id, Script::Latin, false);
        let again = fonts.shape(&['a', 'b'], font_id, Script::Latin, false);
        fonts.shape(&['a', 'b'], bigger, Script::Latin, false);
        assert_eq!(first, again);
        assert_eq!(fonts.shaper_data.read().len(), 1);
    }
}
