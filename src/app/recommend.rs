use crate::app::generators::GeneratorKind;
use crate::app::models::{RecommendationEntry, RecommendationResponse};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Recommendations at or above this confidence are applied without asking.
/// One policy value shared by every caller; sessions may override it.
pub const AUTO_ACCEPT_THRESHOLD: u8 = 90;

/// Generator id the recommendation service uses when it has no suggestion.
pub const NOT_KNOWN: &str = "not known";

/// User-owned column -> generator id assignments for one scan session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorSelections {
    by_column: BTreeMap<String, String>,
}

impl GeneratorSelections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.by_column
            .get(column)
            .map(String::as_str)
            .filter(|g| !g.is_empty())
    }

    pub fn is_set(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn select(&mut self, column: impl Into<String>, generator: GeneratorKind) {
        self.by_column.insert(column.into(), generator.id().to_string());
    }

    pub fn clear(&mut self, column: &str) -> Option<String> {
        self.by_column.remove(column)
    }

    pub fn reset(&mut self) {
        self.by_column.clear();
    }

    pub fn len(&self) -> usize {
        self.by_column.values().filter(|g| !g.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_column
            .iter()
            .filter(|(_, g)| !g.is_empty())
            .map(|(c, g)| (c.as_str(), g.as_str()))
    }

    fn insert_raw(&mut self, column: &str, generator: &str) {
        self.by_column.insert(column.to_string(), generator.to_string());
    }
}

impl<C: Into<String>, G: Into<String>> FromIterator<(C, G)> for GeneratorSelections {
    fn from_iter<I: IntoIterator<Item = (C, G)>>(iter: I) -> Self {
        Self {
            by_column: iter.into_iter().map(|(c, g)| (c.into(), g.into())).collect(),
        }
    }
}

/// Overlays high-confidence suggestions onto `existing` without touching any
/// column the user already assigned.
///
/// Only the first entry seen for a column is considered; later duplicates in
/// the same batch are ignored whatever their confidence. Entries naming
/// [`NOT_KNOWN`] or scoring under `threshold` are skipped. Nothing is ever
/// removed from the selections.
pub fn merge_entries<'a, I>(
    existing: &GeneratorSelections,
    entries: I,
    threshold: u8,
) -> GeneratorSelections
where
    I: IntoIterator<Item = &'a RecommendationEntry>,
{
    let mut updated = existing.clone();
    let mut seen = HashSet::new();

    for entry in entries {
        if !seen.insert(entry.column_name.as_str()) {
            continue;
        }
        if existing.is_set(&entry.column_name) {
            continue;
        }
        if entry.generator == NOT_KNOWN || entry.generator.is_empty() {
            continue;
        }
        if entry.confidence.value() < threshold {
            continue;
        }
        updated.insert_raw(&entry.column_name, &entry.generator);
    }

    debug!(
        before = existing.len(),
        after = updated.len(),
        threshold,
        "merged recommendations into selections"
    );
    updated
}

/// [`merge_entries`] over every table role of a recommendation response.
pub fn merge(
    existing: &GeneratorSelections,
    recommendations: &RecommendationResponse,
    threshold: u8,
) -> GeneratorSelections {
    merge_entries(existing, recommendations.entries().map(|(_, e)| e), threshold)
}
