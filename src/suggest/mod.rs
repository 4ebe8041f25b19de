//! Suggestion pipeline: decode -> sanitize -> filter conflicts.

pub mod curated;
pub mod filter;
pub mod generator;
pub mod sanitize;

pub use curated::curated_groups;
pub use filter::{dedupe_across_groups, filter_groups, ConflictFilter, ReservedKeySet};
pub use generator::parse_response;
pub use sanitize::{sanitize_and_validate, Sanitizer};

use crate::config::SuggestionConfig;
use crate::data::{CorpusBinding, SuggestionCandidate, SuggestionGroup};
use std::collections::BTreeSet;

pub const CORPUS_GROUP_NAME: &str = "Community configs";

/// Sanitizer and conflict filter wired together
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    sanitizer: Sanitizer,
    filter: ConflictFilter,
    dedupe: bool,
}

impl SuggestionEngine {
    pub fn new(sanitizer: Sanitizer, filter: ConflictFilter) -> Self {
        Self {
            sanitizer,
            filter,
            dedupe: false,
        }
    }

    pub fn from_config(config: &SuggestionConfig) -> Self {
        Self::new(
            Sanitizer::default().with_extra_verbs(&config.extra_verbs),
            ConflictFilter::new(ReservedKeySet::new(&config.reserved_keys)),
        )
        .with_cross_group_dedupe(config.dedupe_across_groups)
    }

    /// Also offer each key at most once across all groups (first wins).
    pub fn with_cross_group_dedupe(mut self, enabled: bool) -> Self {
        self.dedupe = enabled;
        self
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    pub fn filter(&self) -> &ConflictFilter {
        &self.filter
    }

    /// Produce the final, non-conflicting groups for the given user keys.
    pub fn prepare(
        &self,
        groups: Vec<SuggestionGroup>,
        existing_keys: &BTreeSet<String>,
    ) -> Vec<SuggestionGroup> {
        let offered: usize = groups.iter().map(|g| g.candidates.len()).sum();

        let sanitized = self.sanitizer.sanitize_groups(groups);
        let mut filtered = self.filter.filter_groups(sanitized, existing_keys);
        if self.dedupe {
            filtered = dedupe_across_groups(filtered);
        }

        let kept: usize = filtered.iter().map(|g| g.candidates.len()).sum();
        tracing::info!(
            "Kept {} of {} suggestions in {} groups",
            kept,
            offered,
            filtered.len()
        );
        filtered
    }
}

/// Relabel scraped bindings as one implicit suggestion group.
///
/// Each candidate keeps the scope it was bound with in its source config.
pub fn corpus_group(bindings: &[CorpusBinding]) -> SuggestionGroup {
    let candidates = bindings
        .iter()
        .map(|cb| {
            let description = match &cb.context {
                Some(context) => format!("{}: {}", cb.source, context),
                None => cb.source.clone(),
            };
            SuggestionCandidate::new(&cb.binding.trigger, &cb.binding.action, description)
                .with_scope(cb.binding.scope)
        })
        .collect();

    SuggestionGroup {
        description: "Bindings found in popular tmux configs".to_string(),
        reasoning: "Widely shared by other tmux users".to_string(),
        ..SuggestionGroup::new(CORPUS_GROUP_NAME, candidates)
    }
}

/// Render a group as a commented block ready to append to a tmux config.
pub fn render_group(group: &SuggestionGroup) -> String {
    let mut lines = vec![format!("# {}", group.name)];
    if !group.description.is_empty() {
        lines.push(format!("# {}", group.description));
    }

    for candidate in &group.candidates {
        if !candidate.description.is_empty() {
            lines.push(format!("# {}", candidate.description));
        }
        lines.push(candidate.to_binding().to_line());
    }

    lines.join("\n")
}
