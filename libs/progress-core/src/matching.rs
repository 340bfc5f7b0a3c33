//! Vocabulary normalization and cross-store matching.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::VocabularyEntry;

/// Marker characters Pleco embeds in headwords (e.g. `@` tone markers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers(Vec<char>);

impl Default for Markers {
    fn default() -> Self {
        Self(vec!['@'])
    }
}

impl From<&str> for Markers {
    fn from(chars: &str) -> Self {
        Self(chars.chars().collect())
    }
}

impl Markers {
    /// Remove every marker character from a written form.
    pub fn normalize(&self, written: &str) -> String {
        written.chars().filter(|c| !self.0.contains(c)).collect()
    }

    /// Build an entry keeping the stored form next to its normalized form.
    pub fn entry(&self, id: i64, written: impl Into<String>) -> VocabularyEntry {
        let written = written.into();
        let normalized = self.normalize(&written);
        VocabularyEntry {
            id,
            written,
            normalized,
        }
    }
}

/// Entries of one store keyed by normalized form.
#[derive(Debug, Clone, Default)]
pub struct VocabularyIndex {
    entries: BTreeMap<String, VocabularyEntry>,
    duplicates: usize,
}

impl VocabularyIndex {
    /// Index entries in order; a later entry replaces an earlier one with the
    /// same normalized form.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = VocabularyEntry>,
    {
        let mut index = Self::default();
        for entry in entries {
            if index.entries.insert(entry.normalized.clone(), entry).is_some() {
                index.duplicates += 1;
            }
        }
        index
    }

    pub fn get(&self, normalized: &str) -> Option<&VocabularyEntry> {
        self.entries.get(normalized)
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.entries.contains_key(normalized)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries dropped because a later one shared their normalized form.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    fn forms(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

/// A word present in both stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedWord {
    pub source: VocabularyEntry,
    pub target: VocabularyEntry,
}

/// Coverage of the two vocabularies, all lists sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub matched: Vec<String>,
    pub missing_from_target: Vec<String>,
    pub missing_from_source: Vec<String>,
    pub source_duplicates: usize,
    pub target_duplicates: usize,
}

/// Result of joining the two vocabularies.
#[derive(Debug, Clone)]
pub struct VocabularyMatch {
    pub words: Vec<MatchedWord>,
    pub coverage: CoverageReport,
}

/// Join source and target vocabularies on exact normalized form.
pub fn match_vocabulary(source: &VocabularyIndex, target: &VocabularyIndex) -> VocabularyMatch {
    let mut words = Vec::new();
    let mut coverage = CoverageReport {
        source_duplicates: source.duplicates(),
        target_duplicates: target.duplicates(),
        ..Default::default()
    };

    for (form, source_entry) in &source.entries {
        match target.get(form) {
            Some(target_entry) => {
                coverage.matched.push(form.clone());
                words.push(MatchedWord {
                    source: source_entry.clone(),
                    target: target_entry.clone(),
                });
            }
            None => coverage.missing_from_target.push(form.clone()),
        }
    }

    coverage.missing_from_source = target
        .forms()
        .filter(|form| !source.contains(form))
        .cloned()
        .collect();

    VocabularyMatch { words, coverage }
}
