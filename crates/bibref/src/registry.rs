//! Citation registry.
//!
//! Holds the bibliography for one build together with the citation number
//! each entry received. A number is assigned the first time an entry is
//! cited and never changes afterwards; an entry counts as used exactly when
//! it has a number.

use crate::{Bibliography, Entry};

/// A bibliography entry and the number it was assigned, if cited.
#[derive(Clone, Debug)]
pub struct Citation {
    entry: Entry,
    /// Upper-cased key used for lookups.
    match_key: String,
    number: Option<u32>,
}

impl Citation {
    #[must_use]
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Citation number, set on first reference.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    #[must_use]
    pub fn is_used(&self) -> bool {
        self.number.is_some()
    }
}

/// Per-build citation state shared by the `cite` and `references` directives.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    citations: Vec<Citation>,
    used: u32,
}

impl Registry {
    /// Create a registry with no citations assigned.
    #[must_use]
    pub fn new(bibliography: Bibliography) -> Self {
        let citations = bibliography
            .into_entries()
            .into_iter()
            .map(|entry| Citation {
                match_key: entry.key.to_uppercase(),
                entry,
                number: None,
            })
            .collect();

        Self { citations, used: 0 }
    }

    /// Cite `key`, returning its citation number.
    ///
    /// The first entry whose key equals `key` ignoring case is used. On the
    /// first citation of that entry it gets the next number; later calls
    /// return the same number. Returns `None` for unknown keys without
    /// touching any state.
    pub fn cite(&mut self, key: &str) -> Option<u32> {
        let wanted = key.to_uppercase();
        let citation = self
            .citations
            .iter_mut()
            .find(|c| c.match_key == wanted)?;

        if let Some(number) = citation.number {
            return Some(number);
        }

        self.used += 1;
        citation.number = Some(self.used);
        tracing::debug!(key = %citation.entry.key, number = self.used, "Assigned citation number");

        Some(self.used)
    }

    /// Number assigned to `key`, without citing it.
    #[must_use]
    pub fn number_of(&self, key: &str) -> Option<u32> {
        let wanted = key.to_uppercase();
        self.citations
            .iter()
            .find(|c| c.match_key == wanted)
            .and_then(Citation::number)
    }

    /// Number of distinct entries cited so far.
    #[must_use]
    pub fn used_count(&self) -> u32 {
        self.used
    }

    /// Cited entries in ascending citation-number order.
    #[must_use]
    pub fn cited(&self) -> Vec<&Citation> {
        let mut cited: Vec<&Citation> = self.citations.iter().filter(|c| c.is_used()).collect();
        cited.sort_by_key(|c| c.number);
        cited
    }

    /// All entries in bibliography order.
    pub fn iter(&self) -> impl Iterator<Item = &Citation> {
        self.citations.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.citations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.citations.is_empty()
    }
}
