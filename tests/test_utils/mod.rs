//! Test utilities and fixtures for tmux-learn tests

#![allow(dead_code)]

use std::collections::BTreeSet;
use tmux_learn::data::{SuggestionCandidate, SuggestionGroup};

/// A realistic config from someone who navigates with Alt+hjkl
pub const VIM_ALT_CONFIG: &str = r##"
# ~/.tmux.conf
set-option -g prefix C-a
unbind C-b
bind C-a send-prefix

set -g mouse on
set -g base-index 1

# Pane navigation without prefix
bind -n M-h select-pane -L
bind -n M-j select-pane -D
bind -n M-k select-pane -U
bind -n M-l select-pane -R

# Splits
bind | split-window -h -c "#{pane_current_path}"
bind - split-window -v -c "#{pane_current_path}"

bind-key r source-file ~/.tmux.conf \; display "Config reloaded!"
bind -T copy-mode-vi v send-keys -X begin-selection
"##;

/// A config that sticks to tmux defaults plus arrow keys
pub const ARROW_CONFIG: &str = "\
bind Left select-pane -L
bind Right select-pane -R
bind Up select-pane -U
bind Down select-pane -D
bind c new-window
";

pub fn candidate(trigger: &str, action: &str) -> SuggestionCandidate {
    SuggestionCandidate::new(trigger, action, "")
}

pub fn group(name: &str, candidates: Vec<SuggestionCandidate>) -> SuggestionGroup {
    SuggestionGroup::new(name, candidates)
}

pub fn keys(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Triggers of every candidate, flattened in output order
pub fn triggers(groups: &[SuggestionGroup]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|g| g.candidates.iter().map(|c| c.trigger.clone()))
        .collect()
}
