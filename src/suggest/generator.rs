//! Decoding of suggestion payloads produced by an external text generator.
//!
//! The generator is asked for JSON shaped like
//!
//! ```json
//! {"groups": [{"name": "...", "description": "...", "reasoning": "...",
//!   "keybinds": [{"keybind": "M-H", "command": "resize-pane -L 5", "description": "..."}]}]}
//! ```
//!
//! but nothing about that shape is trusted. Fields are read one by one with
//! defaults, and output that cannot be decoded at all becomes a single
//! low-confidence group with no candidates.

use crate::data::{Confidence, Scope, SuggestionCandidate, SuggestionGroup};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const FALLBACK_GROUP_NAME: &str = "AI Suggestions";
const DEFAULT_GROUP_NAME: &str = "Suggestions";

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").expect("fenced block pattern is valid")
});

/// Decode a raw generator response into suggestion groups.
///
/// Candidates are returned as-is; run them through the sanitizer before use.
pub fn parse_response(text: &str) -> Vec<SuggestionGroup> {
    let payload = FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
        .trim();

    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Generator output is not valid JSON: {}", e);
            return vec![fallback_group(text)];
        }
    };

    let items = match &value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("groups").and_then(Value::as_array) {
            Some(items) => items,
            None => {
                tracing::warn!("Generator output has no \"groups\" list");
                return vec![fallback_group(text)];
            }
        },
        _ => {
            tracing::warn!("Generator output is neither an object nor a list");
            return vec![fallback_group(text)];
        }
    };

    items.iter().filter_map(group_from_value).collect()
}

/// The degenerate group used when the response cannot be decoded.
pub fn fallback_group(raw: &str) -> SuggestionGroup {
    SuggestionGroup {
        name: FALLBACK_GROUP_NAME.to_string(),
        description: "Unstructured generator output".to_string(),
        reasoning: raw.trim().to_string(),
        candidates: Vec::new(),
        confidence: Confidence::Low,
    }
}

fn group_from_value(value: &Value) -> Option<SuggestionGroup> {
    if !value.is_object() {
        return None;
    }

    let candidates: Vec<SuggestionCandidate> = ["keybinds", "candidates", "bindings"]
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_array))
        .map(|items| items.iter().filter_map(candidate_from_value).collect())
        .unwrap_or_default();

    Some(SuggestionGroup {
        name: text_field(value, &["name", "title"])
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GROUP_NAME.to_string()),
        description: text_field(value, &["description"]).unwrap_or_default(),
        reasoning: text_field(value, &["reasoning"]).unwrap_or_default(),
        candidates,
        confidence: Confidence::Normal,
    })
}

fn candidate_from_value(value: &Value) -> Option<SuggestionCandidate> {
    if !value.is_object() {
        return None;
    }

    Some(SuggestionCandidate {
        trigger: text_field(value, &["keybind", "trigger", "key"]).unwrap_or_default(),
        action: text_field(value, &["command", "action"]).unwrap_or_default(),
        description: text_field(value, &["description"]).unwrap_or_default(),
        scope: text_field(value, &["scope", "mode"]).and_then(|s| Scope::from_label(&s)),
    })
}

/// First of `fields` holding a string (or a number, e.g. `"keybind": 1`).
fn text_field(value: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match value.get(*field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
