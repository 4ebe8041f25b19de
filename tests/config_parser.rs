//! Tests for the tmux binding grammar parser.

use pretty_assertions::assert_eq;
use tmux_learn::data::Scope;
use tmux_learn::parser::{parse, parse_annotated, parse_config, serialize};

mod test_utils;
use test_utils::*;

fn fields(text: &str) -> Vec<(String, Scope, String)> {
    parse(text)
        .into_iter()
        .map(|b| (b.trigger, b.scope, b.action))
        .collect()
}

// ============================================================================
// Statement Recognition
// ============================================================================

#[test]
fn test_rootless_binding() {
    let bindings = parse("bind -n M-h select-pane -L");

    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].trigger, "M-h");
    assert_eq!(bindings[0].scope, Scope::Rootless);
    assert_eq!(bindings[0].action, "select-pane -L");
    assert_eq!(bindings[0].source_line, "bind -n M-h select-pane -L");
}

#[test]
fn test_both_verb_spellings() {
    let bindings = parse("bind x kill-pane\nbind-key X kill-window");
    assert_eq!(bindings.len(), 2);
    assert!(bindings.iter().all(|b| b.scope == Scope::Prefixed));
}

#[test]
fn test_table_flag_is_ignored() {
    let bindings = parse("bind -T copy-mode-vi v send-keys -X begin-selection");

    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].trigger, "v");
    assert_eq!(bindings[0].scope, Scope::Prefixed);
    assert_eq!(bindings[0].action, "send-keys -X begin-selection");
}

#[test]
fn test_rootless_flag_before_table_flag() {
    let bindings = parse("bind -n -T root M-Left select-pane -L");
    assert_eq!(bindings[0].trigger, "M-Left");
    assert_eq!(bindings[0].scope, Scope::Rootless);
}

#[test]
fn test_action_whitespace_is_rejoined() {
    let bindings = parse("   bind   r    source-file   ~/.tmux.conf   ");
    assert_eq!(bindings[0].action, "source-file ~/.tmux.conf");
    assert_eq!(bindings[0].source_line, "bind   r    source-file   ~/.tmux.conf");
}

// ============================================================================
// Degenerate Input
// ============================================================================

#[test]
fn test_empty_and_comment_only_text() {
    assert!(parse("").is_empty());
    assert!(parse("\n\n   \n").is_empty());
    assert!(parse("# just a comment\n   # another").is_empty());
}

#[test]
fn test_malformed_lines_do_not_stop_parsing() {
    let text = "bind\nbind -n\nbind x\nbind -n M-x\nbind y kill-pane";
    let bindings = parse(text);

    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].trigger, "y");
}

#[test]
fn test_non_binding_lines_skipped() {
    let text = "set -g mouse on\nunbind C-b\nrun '~/.tmux/plugins/tpm/tpm'\nbind c new-window";
    assert_eq!(parse(text).len(), 1);
}

// ============================================================================
// Realistic Config
// ============================================================================

#[test]
fn test_realistic_config_order_and_content() {
    let triggers: Vec<String> = parse(VIM_ALT_CONFIG)
        .into_iter()
        .map(|b| b.trigger)
        .collect();

    assert_eq!(
        triggers,
        vec!["C-a", "M-h", "M-j", "M-k", "M-l", "|", "-", "r", "v"]
    );
}

#[test]
fn test_escaped_separator_kept_in_action() {
    let bindings = parse(VIM_ALT_CONFIG);
    let reload = bindings.iter().find(|b| b.trigger == "r").unwrap();
    assert_eq!(
        reload.action,
        "source-file ~/.tmux.conf \\; display \"Config reloaded!\""
    );
}

#[test]
fn test_parse_config_reads_options() {
    let parsed = parse_config(VIM_ALT_CONFIG);
    assert_eq!(parsed.bindings.len(), 9);
    assert_eq!(parsed.options.get("prefix").map(String::as_str), Some("C-a"));
    assert_eq!(parsed.options.get("mouse").map(String::as_str), Some("on"));
}

#[test]
fn test_comment_context() {
    let annotated = parse_annotated(VIM_ALT_CONFIG);
    let context_of = |trigger: &str| {
        annotated
            .iter()
            .find(|(b, _)| b.trigger == trigger)
            .and_then(|(_, c)| c.clone())
    };

    assert_eq!(context_of("M-h").as_deref(), Some("Pane navigation without prefix"));
    assert_eq!(context_of("M-j"), None);
    assert_eq!(context_of("|").as_deref(), Some("Splits"));
    assert_eq!(context_of("C-a"), None);
}

// ============================================================================
// Re-serialization
// ============================================================================

#[test]
fn test_reparse_is_idempotent() {
    let texts = [
        VIM_ALT_CONFIG,
        ARROW_CONFIG,
        "bind -n M-h select-pane -L\nbind-key -r H resize-pane -L 5",
        "bind '\"' split-window -v\nbind \"#\" list-buffers",
        "bind \"-n\" x foo\nbind -n \"-T\" kill-pane\nbind - split-window -v",
    ];

    for text in texts {
        let reparsed = fields(&serialize(&parse(text)));
        assert_eq!(reparsed, fields(text));
    }
}

#[test]
fn test_flag_like_trigger_round_trips() {
    let bindings = parse("bind \"-n\" x foo");
    assert_eq!(bindings[0].trigger, "-n");
    assert_eq!(bindings[0].scope, Scope::Prefixed);

    let reparsed = parse(&serialize(&bindings));
    assert_eq!(reparsed[0].trigger, "-n");
    assert_eq!(reparsed[0].scope, Scope::Prefixed);
    assert_eq!(reparsed[0].action, "x foo");
}

#[test]
fn test_serialize_format() {
    let bindings = parse("bind-key -n M-h select-pane -L\nbind -T copy-mode-vi y send-keys -X copy-selection");
    assert_eq!(
        serialize(&bindings),
        "bind -n M-h select-pane -L\nbind y send-keys -X copy-selection"
    );
}
