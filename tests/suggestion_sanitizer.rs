//! Tests for suggestion sanitizing and validation.
//!
//! Candidates are treated as hostile: stray punctuation, broken quoting and
//! invented commands must be cleaned up or dropped, never raised.

use pretty_assertions::assert_eq;
use tmux_learn::data::SuggestionCandidate;
use tmux_learn::suggest::sanitize::{sanitize_and_validate, Rejection, Sanitizer, SPACE_KEY};

mod test_utils;
use test_utils::*;

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_stray_inner_quote_spacing_is_normalized() {
    let result = sanitize_and_validate(vec![candidate("r", "run-shell \" true \"")]);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].trigger, "r");
    assert_eq!(result[0].action, "run-shell \"true\"");
}

#[test]
fn test_trigger_punctuation_is_stripped() {
    let result = sanitize_and_validate(vec![
        candidate("M-h:", "select-pane -L"),
        candidate("  M-j ::  ", "select-pane -D"),
    ]);

    let triggers: Vec<&str> = result.iter().map(|c| c.trigger.as_str()).collect();
    assert_eq!(triggers, vec!["M-h", "M-j"]);
}

#[test]
fn test_wrapped_action_is_unwrapped_and_collapsed() {
    let result = sanitize_and_validate(vec![candidate(
        "M-H",
        "  \"resize-pane   -L    5\"  ",
    )]);
    assert_eq!(result[0].action, "resize-pane -L 5");
}

#[test]
fn test_separator_gets_single_spaces() {
    let result = sanitize_and_validate(vec![candidate(
        "r",
        "source-file ~/.tmux.conf\\;display 'Reloaded'",
    )]);
    assert_eq!(
        result[0].action,
        "source-file ~/.tmux.conf \\; display 'Reloaded'"
    );
}

#[test]
fn test_wrapped_action_with_inner_quotes_is_kept() {
    let result = sanitize_and_validate(vec![candidate(
        "M-r",
        "\"display-message \"reloaded\"\"",
    )]);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].action, "display-message \"reloaded\"");
}

#[test]
fn test_wrapped_action_is_unwrapped_before_separator_padding() {
    let result = sanitize_and_validate(vec![candidate("r", "\"source-file x\\;display y\"")]);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].action, "source-file x \\; display y");
}

#[test]
fn test_whitespace_only_argument_is_preserved() {
    let result = sanitize_and_validate(vec![candidate("M-s", "send-keys \" \"")]);
    assert_eq!(result[0].action, "send-keys \" \"");
}

#[test]
fn test_description_and_scope_survive() {
    let input = SuggestionCandidate::new("z", "resize-pane -Z", "  Zoom pane  ")
        .with_scope(tmux_learn::data::Scope::Prefixed);
    let result = sanitize_and_validate(vec![input]);

    assert_eq!(result[0].description, "Zoom pane");
    assert_eq!(result[0].scope, Some(tmux_learn::data::Scope::Prefixed));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_empty_fields_are_dropped() {
    let result = sanitize_and_validate(vec![
        candidate("", "select-pane -L"),
        candidate(" : ", "select-pane -L"),
        candidate("M-h", ""),
        candidate("M-h", "\"\""),
    ]);
    assert!(result.is_empty());
}

#[test]
fn test_multi_word_triggers_are_dropped() {
    let result = sanitize_and_validate(vec![
        candidate("prefix + r", "source-file ~/.tmux.conf"),
        candidate("M-1..9", "select-window -t :=N"),
        candidate("v (in copy)", "send-keys -X begin-selection"),
    ]);

    // Only the single-token trigger survives
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].trigger, "M-1..9");
}

#[test]
fn test_space_key_is_allowed() {
    let result = sanitize_and_validate(vec![candidate(SPACE_KEY, "next-layout")]);
    assert_eq!(result.len(), 1);
}

#[test]
fn test_no_surviving_trigger_contains_whitespace() {
    let inputs = vec![
        candidate("a b", "kill-pane"),
        candidate("\tM-x", "kill-pane"),
        candidate("M-y\n", "kill-pane"),
        candidate("C- x", "kill-pane"),
        candidate(SPACE_KEY, "kill-pane"),
    ];

    for c in sanitize_and_validate(inputs) {
        assert!(
            c.trigger == SPACE_KEY || !c.trigger.chars().any(char::is_whitespace),
            "trigger {:?} contains whitespace",
            c.trigger
        );
    }
}

#[test]
fn test_unknown_verbs_are_dropped() {
    let result = sanitize_and_validate(vec![
        candidate("M-p", "open-popup-menu --fancy"),
        candidate("M-q", "tmux kill-server"),
        candidate("M-w", "choose-tree -Zw"),
    ]);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].action, "choose-tree -Zw");
}

#[test]
fn test_validate_reports_reason() {
    let sanitizer = Sanitizer::default();
    assert_eq!(
        sanitizer.validate(&candidate("M-h", "hallucinate-pane")),
        Err(Rejection::UnknownVerb)
    );
    assert_eq!(
        sanitizer.validate(&candidate("a b", "kill-pane")),
        Err(Rejection::WhitespaceInTrigger)
    );
    assert_eq!(sanitizer.validate(&candidate("M-h", "select-pane -L")), Ok(()));
}

#[test]
fn test_extra_verbs_from_config() {
    let sanitizer = Sanitizer::default().with_extra_verbs(["customize-mode"]);
    let result = sanitizer.sanitize_and_validate(vec![candidate("C", "customize-mode -Z")]);
    assert_eq!(result.len(), 1);

    assert!(sanitize_and_validate(vec![candidate("C", "customize-mode -Z")]).is_empty());
}

// ============================================================================
// Groups
// ============================================================================

#[test]
fn test_sanitize_groups_preserves_order_and_keeps_empty_groups() {
    let groups = vec![
        group("bad", vec![candidate("x y", "kill-pane")]),
        group(
            "good",
            vec![
                candidate("M-H:", "resize-pane -L 5"),
                candidate("M-J", "resize-pane -D 5"),
            ],
        ),
    ];

    let result = Sanitizer::default().sanitize_groups(groups);

    assert_eq!(result.len(), 2);
    assert!(result[0].candidates.is_empty());
    assert_eq!(triggers(&result), vec!["M-H", "M-J"]);
}
