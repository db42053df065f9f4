// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::Hyphenator;
use crate::Character;

/// Pattern-based hyphenation through `hypher`.
#[derive(Clone, Copy, Debug)]
pub struct HypherHyphenator {
    lang: hypher::Lang,
}

impl HypherHyphenator {
    /// Hyphenates with the patterns of `lang`.
    pub fn new(lang: hypher::Lang) -> Self {
        Self { lang }
    }
}

impl Default for HypherHyphenator {
    fn default() -> Self {
        Self::new(hypher::Lang::English)
    }
}

impl Hyphenator for HypherHyphenator {
    fn word_hyphens(&self, word: &[Character]) -> Vec<bool> {
        let mut hyphens = vec![false; word.len()];
        let lowercase: String = word.iter().flat_map(|c| c.to_lowercase()).collect();
        // Patterns index the lowercase form; give up if lowercasing changed the length.
        if lowercase.chars().count() != word.len() {
            return hyphens;
        }
        let mut offset = 0;
        let syllables: Vec<&str> = hypher::hyphenate(&lowercase, self.lang).collect();
        if let Some((_, init)) = syllables.split_last() {
            for syllable in init {
                offset += syllable.chars().count();
                if let Some(flag) = offset.checked_sub(1).and_then(|i| hyphens.get_mut(i)) {
                    *flag = true;
                }
            }
        }
        hyphens
    }
}
