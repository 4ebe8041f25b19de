//! Best-effort fetching of community tmux configs.
//!
//! Every source is attempted concurrently. Within a source, candidate
//! locations are tried in order and the first successful response wins. A
//! source whose locations all fail contributes nothing; it never fails the
//! whole corpus.

use crate::data::CorpusBinding;
use crate::integrations::HTTP_CLIENT;
use crate::parser;
use crate::util::{report_status, StatusSender};
use anyhow::{Context, Result};
use std::future::Future;
use std::time::Duration;

/// One external config, e.g. a GitHub repo, and where to look for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusSource {
    pub id: String, // e.g., "tony/tmux-config"
    /// Locations in the order they should be tried
    pub locations: Vec<String>,
}

impl CorpusSource {
    pub fn new(id: impl Into<String>, locations: Vec<String>) -> Self {
        Self {
            id: id.into(),
            locations,
        }
    }
}

/// Fetch the corpus over HTTP.
pub async fn fetch_corpus(
    sources: &[CorpusSource],
    timeout: Duration,
    status: Option<&StatusSender>,
) -> Vec<CorpusBinding> {
    fetch_corpus_with(sources, |url| http_get(url, timeout), status).await
}

/// Fetch the corpus with a caller-supplied retrieval function.
///
/// Results are returned in source-declaration order regardless of which
/// source finishes first.
pub async fn fetch_corpus_with<F, Fut>(
    sources: &[CorpusSource],
    fetch: F,
    status: Option<&StatusSender>,
) -> Vec<CorpusBinding>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let fetch = &fetch;
    let attempts = sources.iter().map(|source| async move {
        report_status(status, format!("Fetching {}...", source.id));
        (source, fetch_first(source, fetch).await)
    });

    let outcomes = futures::future::join_all(attempts).await;

    let mut corpus = Vec::new();
    for (source, text) in outcomes {
        match text {
            Some(text) => {
                let bindings = parse_source(&source.id, &text);
                report_status(
                    status,
                    format!("{}: {} bindings", source.id, bindings.len()),
                );
                corpus.extend(bindings);
            }
            None => report_status(status, format!("{}: unavailable", source.id)),
        }
    }

    tracing::info!(
        "Corpus: {} bindings from {} sources",
        corpus.len(),
        sources.len()
    );
    corpus
}

async fn fetch_first<F, Fut>(source: &CorpusSource, fetch: &F) -> Option<String>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    for location in &source.locations {
        match fetch(location.clone()).await {
            Ok(text) => return Some(text),
            Err(e) => tracing::debug!("{}: {} failed: {}", source.id, location, e),
        }
    }
    None
}

/// GET a location, treating any non-2xx status as a failure.
pub async fn http_get(url: String, timeout: Duration) -> Result<String> {
    let response = HTTP_CLIENT
        .get(&url)
        .timeout(timeout)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?;

    if !response.status().is_success() {
        anyhow::bail!("{} returned status {}", url, response.status());
    }

    response
        .text()
        .await
        .with_context(|| format!("Failed to read body from {}", url))
}

/// Parse one source's text and tag every binding with the source id.
pub fn parse_source(source_id: &str, text: &str) -> Vec<CorpusBinding> {
    parser::parse_annotated(text)
        .into_iter()
        .map(|(binding, context)| CorpusBinding {
            binding,
            source: source_id.to_string(),
            context,
        })
        .collect()
}

/// Render corpus bindings grouped by source, at most `per_source_limit` each.
pub fn format_corpus(bindings: &[CorpusBinding], per_source_limit: usize) -> String {
    if bindings.is_empty() {
        return "No community configs available.".to_string();
    }

    let mut by_source: Vec<(&str, Vec<String>)> = Vec::new();
    for cb in bindings {
        let idx = match by_source.iter().position(|(s, _)| *s == cb.source) {
            Some(idx) => idx,
            None => {
                by_source.push((cb.source.as_str(), Vec::new()));
                by_source.len() - 1
            }
        };

        let lines = &mut by_source[idx].1;
        if lines.len() < per_source_limit {
            let line = match &cb.context {
                Some(context) => format!("  {} ({})", cb.binding.to_line(), context),
                None => format!("  {}", cb.binding.to_line()),
            };
            lines.push(line);
        }
    }

    by_source
        .into_iter()
        .map(|(source, lines)| format!("## From {}:\n{}", source, lines.join("\n")))
        .collect::<Vec<_>>()
        .join("\n\n")
}
