//! Per-language label dictionaries.
//!
//! A [`FieldDictionary`] maps a language code to the label strings a field
//! may be captioned with on pages in that language. The tables themselves
//! live in [`tables`].
//!
//! Lookups fall back to English when a language has no table at all. A
//! language that has a table but no labels for one key yields an empty
//! slice: the field is simply not extracted for that language.

pub mod tables;

use std::collections::BTreeMap;

use crate::document::Language;
use crate::text;

pub use tables::{ArtistField, AlbumField, SectionField, TrackColumn};

/// Language the dictionaries fall back to.
pub const FALLBACK_LANGUAGE: &str = Language::ENGLISH;

type Labels<K> = BTreeMap<K, Vec<&'static str>>;

/// Two-level label table: language code, then field key.
#[derive(Debug, Clone)]
pub struct FieldDictionary<K> {
    languages: BTreeMap<&'static str, Labels<K>>,
}

impl<K: Ord + Copy> FieldDictionary<K> {
    pub fn new() -> Self {
        Self {
            languages: BTreeMap::new(),
        }
    }

    /// Add the labels of one language.
    pub fn language(mut self, code: &'static str, entries: &[(K, &[&'static str])]) -> Self {
        let table = self.languages.entry(code).or_default();
        for (key, labels) in entries {
            table.entry(*key).or_default().extend_from_slice(labels);
        }
        self
    }

    /// Labels for `key` in `language`, falling back to English.
    pub fn lookup(&self, language: &Language, key: K) -> &[&'static str] {
        self.labels(language)
            .and_then(|table| table.get(&key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The whole table for `language`, falling back to English.
    pub fn labels(&self, language: &Language) -> Option<&BTreeMap<K, Vec<&'static str>>> {
        self.languages
            .get(language.code())
            .or_else(|| self.languages.get(FALLBACK_LANGUAGE))
    }

    /// True if the language has its own table.
    pub fn has_language(&self, language: &Language) -> bool {
        self.languages.contains_key(language.code())
    }

    /// The first key, in key order, that lists `label` among its labels.
    pub fn key_for(&self, language: &Language, label: &str) -> Option<K> {
        let label = text::normalize_label(label);
        self.labels(language)?
            .iter()
            .find(|(_, labels)| labels.iter().any(|l| text::normalize_label(l) == label))
            .map(|(key, _)| *key)
    }
}

impl<K: Ord + Copy> Default for FieldDictionary<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// True if `candidate` equals any of `labels` after label normalization.
pub fn matches_label(candidate: &str, labels: &[&str]) -> bool {
    let candidate = text::normalize_label(candidate);
    !candidate.is_empty() && labels.iter().any(|l| text::normalize_label(l) == candidate)
}
