//! Conflict filtering for suggestion groups.
//!
//! A candidate is dropped when its scope-qualified key is already bound by
//! the user or is reserved by the terminal. Groups left without candidates
//! are dropped. Group order and candidate order are preserved.
//!
//! Two groups may still offer the same key. [`dedupe_across_groups`] is a
//! separate pass for callers that want every key offered at most once.

use crate::data::SuggestionGroup;
use std::collections::{BTreeSet, HashSet};

/// Universal terminal control sequences (interrupt, EOF, suspend, flow
/// control, clear screen) plus the common alternative prefix.
pub const TERMINAL_CONTROL_KEYS: &[&str] = &["C-c", "C-d", "C-z", "C-s", "C-q", "C-l", "C-a"];

/// Rootless triggers that must never be suggested.
///
/// Built once at startup from configuration and handed to the
/// [`ConflictFilter`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedKeySet {
    keys: BTreeSet<String>,
}

impl Default for ReservedKeySet {
    fn default() -> Self {
        Self::new(TERMINAL_CONTROL_KEYS)
    }
}

impl ReservedKeySet {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keys }
    }

    /// Rootless keys qualify to themselves, so this takes a qualified key.
    pub fn contains(&self, qualified_key: &str) -> bool {
        self.keys.contains(qualified_key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConflictFilter {
    reserved: ReservedKeySet,
}

impl ConflictFilter {
    pub fn new(reserved: ReservedKeySet) -> Self {
        Self { reserved }
    }

    pub fn reserved(&self) -> &ReservedKeySet {
        &self.reserved
    }

    /// Remove conflicting candidates, then empty groups.
    ///
    /// Applying this twice gives the same result as applying it once.
    pub fn filter_groups(
        &self,
        groups: Vec<SuggestionGroup>,
        existing_keys: &BTreeSet<String>,
    ) -> Vec<SuggestionGroup> {
        groups
            .into_iter()
            .filter_map(|mut group| {
                group.candidates.retain(|candidate| {
                    let key = candidate.qualified_key();
                    if existing_keys.contains(&key) {
                        tracing::debug!("Suggestion {} is already bound", key);
                        false
                    } else if self.reserved.contains(&key) {
                        tracing::debug!("Suggestion {} is reserved", key);
                        false
                    } else {
                        true
                    }
                });
                non_empty(group)
            })
            .collect()
    }
}

/// Keep only the first candidate for each qualified key across all groups.
///
/// Groups emptied by this pass are dropped. Order is preserved and the pass
/// is idempotent.
pub fn dedupe_across_groups(groups: Vec<SuggestionGroup>) -> Vec<SuggestionGroup> {
    let mut claimed: HashSet<String> = HashSet::new();

    groups
        .into_iter()
        .filter_map(|mut group| {
            group.candidates.retain(|candidate| {
                let key = candidate.qualified_key();
                if claimed.contains(&key) {
                    tracing::debug!("Suggestion {} duplicates an earlier suggestion", key);
                    false
                } else {
                    claimed.insert(key);
                    true
                }
            });
            non_empty(group)
        })
        .collect()
}

fn non_empty(group: SuggestionGroup) -> Option<SuggestionGroup> {
    if group.candidates.is_empty() {
        tracing::debug!("Dropping empty suggestion group {:?}", group.name);
        None
    } else {
        Some(group)
    }
}

/// One-shot form of [`ConflictFilter::filter_groups`].
pub fn filter_groups(
    groups: Vec<SuggestionGroup>,
    existing_keys: &BTreeSet<String>,
    reserved: &ReservedKeySet,
) -> Vec<SuggestionGroup> {
    ConflictFilter::new(reserved.clone()).filter_groups(groups, existing_keys)
}
