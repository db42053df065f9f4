// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owner of one text's models: edits, model updates and layout.

mod cursor;
mod updater;

pub use cursor::CursorInfo;
pub use updater::Operations;

use crate::convert::{utf32_to_utf8, utf8_to_utf32};
use crate::font::TextServices;
use crate::inputs::{
    ExceedPolicy, FontDescription, LayoutOptions, LayoutPolicy, MarkupRuns, MultiLinePolicy,
};
use crate::model::runs::{shift_for_insert, shift_for_remove};
use crate::model::{LogicalModel, Presentation, VisualModel};
use crate::{layout, CharacterIndex, Error, Length, PointSize26Dot6, Size, DEFAULT_POINT_SIZE};
use updater::{update, UpdateContext};

/// The models of one text and the settings they are built with.
///
/// Edits only record which part of the text is stale; the models are rebuilt from the start of
/// the first edited paragraph by [`update_model`](Self::update_model), which
/// [`relayout`](Self::relayout) calls first.
///
/// ```
/// use text_engine::{Controller, Operations};
///
/// let mut controller = Controller::new();
/// controller.set_text("Hello");
/// assert_eq!(controller.logical_model().number_of_characters(), 5);
/// assert_eq!(controller.pending_operations(), Operations::ALL);
/// ```
#[derive(Clone, Debug)]
pub struct Controller {
    logical: LogicalModel,
    visual: VisualModel,
    options: LayoutOptions,
    default_font: FontDescription,
    default_point_size: PointSize26Dot6,
    pending_start: CharacterIndex,
    pending: Operations,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            logical: LogicalModel::default(),
            visual: VisualModel::default(),
            options: LayoutOptions::default(),
            default_font: FontDescription::default(),
            default_point_size: DEFAULT_POINT_SIZE,
            pending_start: 0,
            pending: Operations::empty(),
        }
    }
}

impl Controller {
    /// Creates a controller without text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters and analysis results.
    pub fn logical_model(&self) -> &LogicalModel {
        &self.logical
    }

    /// Glyphs and layout results.
    pub fn visual_model(&self) -> &VisualModel {
        &self.visual
    }

    /// Rendering attributes stored with the visual model.
    pub fn presentation_mut(&mut self) -> &mut Presentation {
        &mut self.visual.presentation
    }

    /// Current layout options.
    pub fn layout_options(&self) -> &LayoutOptions {
        &self.options
    }

    /// The text as UTF-8.
    pub fn text(&self) -> String {
        utf32_to_utf8(&self.logical.text)
    }

    /// Stages that still have to run before the models match the text.
    pub fn pending_operations(&self) -> Operations {
        self.pending
    }

    /// Replaces the text and drops every markup run. Malformed UTF-8 is skipped.
    pub fn set_text(&mut self, text: impl AsRef<[u8]>) {
        let mut characters = Vec::new();
        utf8_to_utf32(text.as_ref(), &mut characters);
        self.replace(characters, MarkupRuns::default());
    }

    /// Replaces the text with the plain text and runs a markup processor produced.
    ///
    /// Fails with [`ErrorKind::InvalidRange`](crate::ErrorKind::InvalidRange) when a run reaches
    /// past the text.
    pub fn set_markup(&mut self, text: impl AsRef<[u8]>, markup: MarkupRuns) -> Result<(), Error> {
        let mut characters = Vec::new();
        let len = utf8_to_utf32(text.as_ref(), &mut characters);
        if let Some((start, end)) = markup.out_of_bounds(len) {
            return Err(Error::invalid_range(start, end, len));
        }
        self.replace(characters, markup);
        Ok(())
    }

    fn replace(&mut self, characters: Vec<char>, markup: MarkupRuns) {
        self.logical.text = characters;
        self.logical.markup = markup;
        self.invalidate(0);
    }

    /// Inserts `text` before the character at `index`.
    pub fn insert_text(&mut self, index: CharacterIndex, text: &str) -> Result<(), Error> {
        let len = self.logical.text.len();
        if index > len {
            return Err(Error::invalid_range(index, index, len));
        }
        let mut characters = Vec::new();
        let count = utf8_to_utf32(text.as_bytes(), &mut characters);
        if count == 0 {
            return Ok(());
        }

        let dirty = self.logical.paragraph_range(index.saturating_sub(1));
        let tail = self.logical.text.split_off(index);
        self.logical.text.extend(characters);
        self.logical.text.extend(tail);

        let markup = &mut self.logical.markup;
        shift_for_insert(&mut markup.color_runs, index, count);
        shift_for_insert(&mut markup.font_description_runs, index, count);
        shift_for_insert(&mut markup.underlined_runs, index, count);
        shift_for_insert(&mut markup.strikethrough_runs, index, count);
        shift_for_insert(&mut markup.anchors, index, count);
        for item in &mut markup.embedded_items {
            if item.character_index >= index {
                item.character_index += count;
            }
        }
        self.invalidate(dirty.character_index);
        Ok(())
    }

    /// Removes `count` characters starting at `index`.
    pub fn remove_text(&mut self, index: CharacterIndex, count: Length) -> Result<(), Error> {
        let len = self.logical.text.len();
        let end = index
            .checked_add(count)
            .filter(|&end| end <= len)
            .ok_or_else(|| Error::invalid_range(index, index.saturating_add(count), len))?;
        if count == 0 {
            return Ok(());
        }

        let dirty = self.logical.paragraph_range(index.saturating_sub(1));
        self.logical.text.drain(index..end);

        let markup = &mut self.logical.markup;
        shift_for_remove(&mut markup.color_runs, index..end);
        shift_for_remove(&mut markup.font_description_runs, index..end);
        shift_for_remove(&mut markup.underlined_runs, index..end);
        shift_for_remove(&mut markup.strikethrough_runs, index..end);
        shift_for_remove(&mut markup.anchors, index..end);
        markup
            .embedded_items
            .retain(|item| !(index..end).contains(&item.character_index));
        for item in &mut markup.embedded_items {
            if item.character_index >= end {
                item.character_index -= count;
            }
        }
        self.invalidate(dirty.character_index);
        Ok(())
    }

    /// Installs new layout options.
    ///
    /// Changing hyphenation or the base direction invalidates the whole model; anything else
    /// only takes effect at the next [`relayout`](Self::relayout).
    pub fn set_layout_options(&mut self, options: LayoutOptions) -> Result<(), Error> {
        options.validate()?;
        let reanalyze = options.hyphenation != self.options.hyphenation
            || options.base_direction != self.options.base_direction;
        self.options = options;
        if reanalyze {
            self.invalidate(0);
        }
        Ok(())
    }

    /// Installs a new policy combination, rejecting the unsupported ones.
    pub fn set_layout_policy(
        &mut self,
        multi_line: MultiLinePolicy,
        width: ExceedPolicy,
        height: ExceedPolicy,
    ) -> Result<(), Error> {
        let policy = LayoutPolicy::new(multi_line, width, height)?;
        self.set_layout_options(self.options.with_policy(policy))
    }

    /// Sets the font used where no font description run applies.
    pub fn set_default_font(&mut self, description: FontDescription, point_size: PointSize26Dot6) {
        self.default_font = description;
        self.default_point_size = point_size;
        self.invalidate(0);
    }

    /// Drops every derived buffer, keeping the text, markup and settings.
    pub fn clear_model_data(&mut self) {
        self.logical.clear_analysis();
        self.visual.clear();
        self.pending_start = 0;
        self.pending = Operations::ALL;
    }

    /// Marks the models stale from `start`, which must begin a paragraph of the current text.
    fn invalidate(&mut self, start: CharacterIndex) {
        let start = if self.pending.is_empty() {
            start
        } else {
            start.min(self.pending_start)
        };
        let start_glyph = self
            .visual
            .characters_to_glyph
            .get(start)
            .copied()
            .unwrap_or(self.visual.shaped.glyphs.len());
        self.logical.truncate_analysis(start);
        self.visual.truncate(start_glyph, start);
        self.visual.natural_size = Size::ZERO;
        self.pending_start = start;
        self.pending = Operations::ALL;
    }

    /// Runs the pending stages among `operations`.
    ///
    /// Empty text clears the models without querying any collaborator.
    pub fn update_model(&mut self, services: &TextServices<'_>, operations: Operations) {
        if self.pending.is_empty() {
            return;
        }
        if self.logical.text.is_empty() {
            log::debug!("empty text, clearing the models");
            self.logical.clear_analysis();
            self.visual.clear();
            self.pending = Operations::empty();
            return;
        }
        log::debug!(
            "updating {:?} from character {}",
            operations & self.pending,
            self.pending_start
        );
        let ctx = UpdateContext {
            services: *services,
            options: &self.options,
            default_font: &self.default_font,
            default_point_size: self.default_point_size,
        };
        let done = update(
            &ctx,
            &mut self.logical,
            &mut self.visual,
            self.pending_start,
            operations,
            self.pending,
        );
        self.pending.remove(done);
    }

    /// Brings the models up to date and lays the text out in a box of `box_size`.
    pub fn relayout(&mut self, services: &TextServices<'_>, box_size: Size) {
        self.update_model(services, Operations::ALL);
        layout::layout_text(
            *services,
            &self.default_font,
            self.default_point_size,
            &mut self.logical,
            &mut self.visual,
            &self.options,
            box_size,
        );
    }

    /// Size of the text when lines only end at paragraph separators.
    pub fn natural_size(&mut self, services: &TextServices<'_>) -> Size {
        self.update_model(services, Operations::ALL);
        let size = layout::natural_size(
            *services,
            &self.default_font,
            self.default_point_size,
            &self.logical,
            &self.visual,
            &self.options,
        );
        self.visual.natural_size = size;
        size
    }

    /// Height of the text wrapped at `width` with the current multi-line policy.
    pub fn height_for_width(&mut self, services: &TextServices<'_>, width: f32) -> f32 {
        self.update_model(services, Operations::ALL);
        layout::height_for_width(
            *services,
            &self.default_font,
            self.default_point_size,
            &self.logical,
            &self.visual,
            &self.options,
            width,
        )
    }
}
