//! Parser for the tmux binding grammar.
//!
//! Only binding statements are interpreted:
//!
//! ```text
//! bind[-key] [-n] [-r] [-T <table>] <trigger> <action...>
//! ```
//!
//! Everything else (options, hooks, plugin lines) is skipped. Parsing never
//! fails; a line that cannot be read as a binding is dropped and the rest of
//! the text is still parsed.

use crate::data::{Binding, Scope};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Accepted spellings of the bind verb
const BIND_VERBS: &[&str] = &["bind", "bind-key"];

/// Triggers that must be quoted when written back out
const QUOTED_TRIGGERS: &[&str] = &["\"", "'", "#"];

static SET_OPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:set-option|set|setw|set-window-option)\s+(?:-[a-zA-Z]+\s+)*(\S+)\s+(.+)$")
        .expect("set-option pattern is valid")
});

/// Bindings and options read from one config text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfig {
    pub bindings: Vec<Binding>,
    /// `set` options, name -> value with surrounding quotes removed
    pub options: BTreeMap<String, String>,
}

/// Parse config text into bindings, in input order.
pub fn parse(text: &str) -> Vec<Binding> {
    parse_annotated(text).into_iter().map(|(binding, _)| binding).collect()
}

/// Parse config text, pairing each binding with the comment directly above it.
///
/// A blank line or a non-binding statement between the comment and the
/// binding breaks the association.
pub fn parse_annotated(text: &str) -> Vec<(Binding, Option<String>)> {
    let mut bindings = Vec::new();
    let mut last_comment: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            last_comment = None;
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            last_comment = (!comment.is_empty()).then(|| comment.to_string());
            continue;
        }

        match parse_line(line) {
            Some(binding) => bindings.push((binding, last_comment.take())),
            None => last_comment = None,
        }
    }

    bindings
}

/// Parse both bindings and `set` options.
pub fn parse_config(text: &str) -> ParsedConfig {
    ParsedConfig {
        bindings: parse(text),
        options: parse_options(text),
    }
}

/// Collect `set`/`set-option`/`setw` values. Later lines win.
pub fn parse_options(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| SET_OPTION.captures(line))
        .map(|caps| {
            let value = caps[2].trim().trim_matches(|c| c == '"' || c == '\'');
            (caps[1].to_string(), value.to_string())
        })
        .collect()
}

/// Interpret a single trimmed, non-comment line.
fn parse_line(line: &str) -> Option<Binding> {
    let mut tokens = line.split_whitespace();
    let verb = tokens.next()?;
    if !BIND_VERBS.contains(&verb) {
        return None;
    }

    let mut rest: Vec<&str> = tokens.collect();
    let mut scope = Scope::Prefixed;

    // Leading flags. -T takes the table name with it; neither -T nor -r
    // affects scope, trigger or action.
    let mut skip = 0;
    loop {
        match rest.get(skip).copied() {
            Some("-n") => {
                scope = Scope::Rootless;
                skip += 1;
            }
            Some("-r") => skip += 1,
            Some("-T") => skip += 2,
            _ => break,
        }
    }
    if skip >= rest.len() {
        return None;
    }
    rest.drain(..skip);

    if rest.len() < 2 {
        return None;
    }

    let trigger = unquote_trigger(rest[0]);
    let action = rest[1..].join(" ");
    if trigger.is_empty() || action.is_empty() {
        return None;
    }

    Some(Binding {
        trigger: trigger.to_string(),
        scope,
        action,
        source_line: line.to_string(),
    })
}

/// `'"'` -> `"`, `"#"` -> `#`; anything else is returned as-is.
fn unquote_trigger(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() >= 3 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &token[1..token.len() - 1];
        }
    }
    token
}

/// A trigger that would read back as a flag (`-n`, `-T`, ...) is quoted too.
/// A lone `-` is unambiguous and stays bare.
fn quote_trigger(trigger: &str) -> String {
    let flag_like = trigger.len() > 1 && trigger.starts_with('-');
    if !flag_like && !QUOTED_TRIGGERS.contains(&trigger) {
        return trigger.to_string();
    }
    if trigger == "\"" {
        format!("'{}'", trigger)
    } else {
        format!("\"{}\"", trigger)
    }
}

/// Write a single binding back out as a config line.
pub fn format_binding(binding: &Binding) -> String {
    let trigger = quote_trigger(&binding.trigger);
    match binding.scope {
        Scope::Rootless => format!("bind -n {} {}", trigger, binding.action),
        Scope::Prefixed => format!("bind {} {}", trigger, binding.action),
    }
}

/// Write bindings back out, one statement per line.
pub fn serialize(bindings: &[Binding]) -> String {
    bindings
        .iter()
        .map(format_binding)
        .collect::<Vec<_>>()
        .join("\n")
}
