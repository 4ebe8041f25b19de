//! Normalization and validation of untrusted suggestion candidates.
//!
//! Candidates come from a text generator or from scraped configs, so they may
//! carry stray punctuation, broken quoting or hallucinated commands. Nothing
//! here fails: a candidate is either normalized and kept, or dropped.

use crate::data::{SuggestionCandidate, SuggestionGroup};

/// The only trigger allowed to be spelled with more than one word-ish token
pub const SPACE_KEY: &str = "Space";

/// Escaped statement separator inside an action
pub const SEPARATOR: &str = "\\;";

/// Recognized command-verb prefixes. Matched against the first word of an
/// action with `starts_with`, so `select-` covers select-pane/window/layout.
pub const DEFAULT_VERBS: &[&str] = &[
    // panes
    "select-",
    "split-window",
    "resize-",
    "swap-",
    "join-pane",
    "break-pane",
    "kill-",
    "respawn-",
    "capture-pane",
    "pipe-pane",
    "clear-history",
    // windows
    "new-",
    "next-",
    "previous-",
    "last-",
    "rotate-window",
    "move-",
    "link-window",
    "unlink-window",
    "rename-",
    "find-window",
    // sessions and clients
    "switch-client",
    "choose-",
    "detach-client",
    "attach-session",
    "has-session",
    "refresh-client",
    "suspend-client",
    "lock-",
    // copy / paste
    "copy-mode",
    "paste-buffer",
    "save-buffer",
    "load-buffer",
    "delete-buffer",
    "send-",
    // display
    "display",
    "clock-mode",
    "list-",
    "show-",
    // config and scripting
    "source-file",
    "run-shell",
    "if-shell",
    "command-prompt",
    "confirm-before",
    "wait-for",
    "set",
    // binding management
    "bind",
    "unbind",
];

/// Why a candidate was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyTrigger,
    EmptyAction,
    WhitespaceInTrigger,
    UnknownVerb,
}

impl Rejection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmptyTrigger => "empty trigger",
            Self::EmptyAction => "empty action",
            Self::WhitespaceInTrigger => "whitespace in trigger",
            Self::UnknownVerb => "unrecognized command",
        }
    }
}

/// Sanitizer with a configurable verb allow-list
#[derive(Debug, Clone)]
pub struct Sanitizer {
    verbs: Vec<String>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            verbs: DEFAULT_VERBS.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl Sanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the allow-list. Blank entries are ignored.
    pub fn with_extra_verbs<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for verb in extra {
            let verb = verb.as_ref().trim();
            if !verb.is_empty() && !self.verbs.iter().any(|v| v == verb) {
                self.verbs.push(verb.to_string());
            }
        }
        self
    }

    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }

    /// Normalize every candidate and keep only the valid ones, in order.
    pub fn sanitize_and_validate(
        &self,
        candidates: Vec<SuggestionCandidate>,
    ) -> Vec<SuggestionCandidate> {
        candidates
            .into_iter()
            .filter_map(|candidate| {
                let candidate = normalize(candidate);
                match self.validate(&candidate) {
                    Ok(()) => Some(candidate),
                    Err(reason) => {
                        tracing::debug!(
                            "Dropping suggestion {:?} -> {:?}: {}",
                            candidate.trigger,
                            candidate.action,
                            reason.label()
                        );
                        None
                    }
                }
            })
            .collect()
    }

    /// Sanitize the candidates of each group. Groups are kept even when they
    /// end up empty; the conflict filter removes those.
    pub fn sanitize_groups(&self, groups: Vec<SuggestionGroup>) -> Vec<SuggestionGroup> {
        groups
            .into_iter()
            .map(|mut group| {
                group.candidates = self.sanitize_and_validate(group.candidates);
                group
            })
            .collect()
    }

    /// Check an already-normalized candidate.
    pub fn validate(&self, candidate: &SuggestionCandidate) -> Result<(), Rejection> {
        if candidate.trigger.is_empty() {
            return Err(Rejection::EmptyTrigger);
        }
        if candidate.action.is_empty() {
            return Err(Rejection::EmptyAction);
        }
        if candidate.trigger != SPACE_KEY && candidate.trigger.chars().any(char::is_whitespace) {
            return Err(Rejection::WhitespaceInTrigger);
        }
        if !self.is_recognized(&candidate.action) {
            return Err(Rejection::UnknownVerb);
        }
        Ok(())
    }

    fn is_recognized(&self, action: &str) -> bool {
        let Some(verb) = action.split_whitespace().next() else {
            return false;
        };
        self.verbs.iter().any(|prefix| verb.starts_with(prefix.as_str()))
    }
}

/// Sanitize with the built-in allow-list.
pub fn sanitize_and_validate(candidates: Vec<SuggestionCandidate>) -> Vec<SuggestionCandidate> {
    Sanitizer::default().sanitize_and_validate(candidates)
}

fn normalize(candidate: SuggestionCandidate) -> SuggestionCandidate {
    SuggestionCandidate {
        trigger: normalize_trigger(&candidate.trigger),
        action: normalize_action(&candidate.action),
        description: candidate.description.trim().to_string(),
        scope: candidate.scope,
    }
}

/// `" M-h: "` -> `"M-h"`
pub fn normalize_trigger(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| c == ':' || c.is_whitespace())
        .to_string()
}

/// Clean up an action string.
///
/// Strips one layer of wrapping quotes, trims whitespace just inside quoted
/// segments, pads `\;` with single spaces and collapses whitespace runs.
pub fn normalize_action(raw: &str) -> String {
    let action = strip_wrapping_quotes(raw.trim());
    let action = trim_quoted_segments(action);
    let action = action.replace(SEPARATOR, &format!(" {} ", SEPARATOR));
    action.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// `"run-shell true"` -> `run-shell true`. Exactly one matched outer pair is
/// removed, whatever the inner text holds.
fn strip_wrapping_quotes(s: &str) -> &str {
    let mut chars = s.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && is_quote(first) => &s[1..s.len() - 1],
        _ => s,
    }
}

/// `run-shell " true "` -> `run-shell "true"`. Whitespace-only segments such
/// as `send-keys " "` and unterminated quotes are copied through untouched.
fn trim_quoted_segments(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find(is_quote) {
        let quote = &rest[start..start + 1];
        let after = &rest[start + 1..];
        out.push_str(&rest[..start]);

        match after.find(quote) {
            Some(end) => {
                let segment = &after[..end];
                let trimmed = segment.trim();
                out.push_str(quote);
                out.push_str(if trimmed.is_empty() { segment } else { trimmed });
                out.push_str(quote);
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
