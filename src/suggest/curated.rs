//! Built-in catalog of well-known tmux bindings, picked and ranked offline.
//!
//! Tips are chosen from the user's own config: bindings that complement the
//! navigation habit they already have, plus a handful of essentials most
//! configs end up with. The picks are then ordered by how well they match the
//! [`StyleProfile`].
//!
//! | Signal | Score |
//! |--------|-------|
//! | vim navigation and a vim-style tip | +10 |
//! | rootless habit (no-prefix or Alt) and a tip without prefix | +5 |
//! | fewer than 20 bindings and a beginner tip | +3 |
//! | fewer than 10 bindings and an advanced tip | -5 |

use crate::data::{
    Binding, ModifierPreference, NavigationStyle, PrefixPreference, Scope, StyleProfile,
    SuggestionCandidate, SuggestionGroup,
};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// One catalog entry: a named set of bindings meant to be adopted together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuratedTip {
    pub id: &'static str,       // e.g., "resize-meta-hjkl"
    pub category: &'static str, // e.g., "resize"
    pub name: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub vim_style: bool,
    pub requires_prefix: bool,
    /// `(trigger, action)` pairs, all in [`CuratedTip::scope`]
    pub bindings: &'static [(&'static str, &'static str)],
    pub related_to: &'static [&'static str],
}

impl CuratedTip {
    pub fn scope(&self) -> Scope {
        if self.requires_prefix {
            Scope::Prefixed
        } else {
            Scope::Rootless
        }
    }

    pub fn candidates(&self) -> Vec<SuggestionCandidate> {
        self.bindings
            .iter()
            .map(|(trigger, action)| {
                SuggestionCandidate::new(*trigger, *action, "").with_scope(self.scope())
            })
            .collect()
    }

    pub fn to_group(&self, reasoning: impl Into<String>) -> SuggestionGroup {
        SuggestionGroup {
            description: self.description.to_string(),
            reasoning: reasoning.into(),
            ..SuggestionGroup::new(self.name, self.candidates())
        }
    }
}

const SPLIT_H: &str = "split-window -h -c '#{pane_current_path}'";
const SPLIT_V: &str = "split-window -v -c '#{pane_current_path}'";

static CATALOG: &[CuratedTip] = &[
    // navigation
    CuratedTip {
        id: "nav-pane-hjkl",
        category: "navigation",
        name: "Vim-style Pane Navigation",
        description: "Move between panes with h/j/k/l after the prefix",
        difficulty: Difficulty::Beginner,
        vim_style: true,
        requires_prefix: true,
        bindings: &[
            ("h", "select-pane -L"),
            ("j", "select-pane -D"),
            ("k", "select-pane -U"),
            ("l", "select-pane -R"),
        ],
        related_to: &[],
    },
    CuratedTip {
        id: "nav-pane-meta-hjkl",
        category: "navigation",
        name: "Alt+hjkl Pane Navigation",
        description: "Move between panes with Alt+h/j/k/l, no prefix needed",
        difficulty: Difficulty::Beginner,
        vim_style: true,
        requires_prefix: false,
        bindings: &[
            ("M-h", "select-pane -L"),
            ("M-j", "select-pane -D"),
            ("M-k", "select-pane -U"),
            ("M-l", "select-pane -R"),
        ],
        related_to: &[],
    },
    CuratedTip {
        id: "nav-window-number",
        category: "navigation",
        name: "Alt+Number Window Switch",
        description: "Jump straight to windows 1-9 with Alt+1 through Alt+9",
        difficulty: Difficulty::Beginner,
        vim_style: false,
        requires_prefix: false,
        bindings: &[
            ("M-1", "select-window -t 1"),
            ("M-2", "select-window -t 2"),
            ("M-3", "select-window -t 3"),
            ("M-4", "select-window -t 4"),
            ("M-5", "select-window -t 5"),
            ("M-6", "select-window -t 6"),
            ("M-7", "select-window -t 7"),
            ("M-8", "select-window -t 8"),
            ("M-9", "select-window -t 9"),
        ],
        related_to: &[],
    },
    CuratedTip {
        id: "nav-last-window",
        category: "navigation",
        name: "Toggle Last Window",
        description: "Flip between the two most recent windows",
        difficulty: Difficulty::Beginner,
        vim_style: false,
        requires_prefix: true,
        bindings: &[("Tab", "last-window")],
        related_to: &[],
    },
    // resize
    CuratedTip {
        id: "resize-hjkl",
        category: "resize",
        name: "Vim-style Pane Resize",
        description: "Resize panes with H/J/K/L after the prefix",
        difficulty: Difficulty::Intermediate,
        vim_style: true,
        requires_prefix: true,
        bindings: &[
            ("H", "resize-pane -L 5"),
            ("J", "resize-pane -D 5"),
            ("K", "resize-pane -U 5"),
            ("L", "resize-pane -R 5"),
        ],
        related_to: &["nav-pane-hjkl"],
    },
    CuratedTip {
        id: "resize-meta-hjkl",
        category: "resize",
        name: "Alt+Shift+hjkl Pane Resize",
        description: "Resize panes with Alt+Shift+h/j/k/l, no prefix needed",
        difficulty: Difficulty::Intermediate,
        vim_style: true,
        requires_prefix: false,
        bindings: &[
            ("M-H", "resize-pane -L 5"),
            ("M-J", "resize-pane -D 5"),
            ("M-K", "resize-pane -U 5"),
            ("M-L", "resize-pane -R 5"),
        ],
        related_to: &["nav-pane-meta-hjkl"],
    },
    // panes
    CuratedTip {
        id: "split-visual",
        category: "panes",
        name: "Visual Split Keys",
        description: "Split with | and -, opening in the current directory",
        difficulty: Difficulty::Beginner,
        vim_style: false,
        requires_prefix: true,
        bindings: &[("|", SPLIT_H), ("-", SPLIT_V)],
        related_to: &["split-current-path"],
    },
    CuratedTip {
        id: "split-current-path",
        category: "panes",
        name: "Split in Current Directory",
        description: "Keep the default split keys but open in the current directory",
        difficulty: Difficulty::Beginner,
        vim_style: false,
        requires_prefix: true,
        bindings: &[("\"", SPLIT_V), ("%", SPLIT_H)],
        related_to: &[],
    },
    // sessions
    CuratedTip {
        id: "session-picker",
        category: "session",
        name: "Interactive Session Picker",
        description: "Tree view for switching sessions and windows",
        difficulty: Difficulty::Beginner,
        vim_style: false,
        requires_prefix: true,
        bindings: &[("s", "choose-tree -s")],
        related_to: &["session-new"],
    },
    CuratedTip {
        id: "session-new",
        category: "session",
        name: "Quick New Session",
        description: "Create a named session from a prompt",
        difficulty: Difficulty::Beginner,
        vim_style: false,
        requires_prefix: true,
        bindings: &[("S", "command-prompt -p 'New session:' 'new-session -s %%'")],
        related_to: &[],
    },
    // productivity
    CuratedTip {
        id: "reload-config",
        category: "productivity",
        name: "Reload Config",
        description: "Reload tmux.conf without restarting the server",
        difficulty: Difficulty::Beginner,
        vim_style: false,
        requires_prefix: true,
        bindings: &[(
            "r",
            "source-file ~/.tmux.conf \\; display 'Config reloaded!'",
        )],
        related_to: &[],
    },
    CuratedTip {
        id: "pane-zoom",
        category: "productivity",
        name: "Zoom Pane Toggle",
        description: "Maximize a pane, press again to restore",
        difficulty: Difficulty::Beginner,
        vim_style: false,
        requires_prefix: true,
        bindings: &[("z", "resize-pane -Z")],
        related_to: &[],
    },
    CuratedTip {
        id: "pane-sync",
        category: "productivity",
        name: "Synchronize Panes",
        description: "Type into every pane of the window at once",
        difficulty: Difficulty::Advanced,
        vim_style: false,
        requires_prefix: true,
        bindings: &[("e", "setw synchronize-panes")],
        related_to: &[],
    },
    CuratedTip {
        id: "kill-pane-confirm",
        category: "productivity",
        name: "Kill Pane with Confirmation",
        description: "Close the current pane after a y/n prompt",
        difficulty: Difficulty::Beginner,
        vim_style: false,
        requires_prefix: true,
        bindings: &[("x", "confirm-before -p 'Kill pane? (y/n)' kill-pane")],
        related_to: &[],
    },
];

/// Tips every config benefits from, keyed by the action that shows the user
/// already has an equivalent.
const ESSENTIALS: &[(&str, &str)] = &[
    ("reload-config", "source-file"),
    ("pane-zoom", "resize-pane -Z"),
    ("session-picker", "choose-tree"),
];

pub fn catalog() -> &'static [CuratedTip] {
    CATALOG
}

pub fn tip_by_id(id: &str) -> Option<&'static CuratedTip> {
    CATALOG.iter().find(|tip| tip.id == id)
}

pub fn related_tips(tip: &CuratedTip) -> Vec<&'static CuratedTip> {
    tip.related_to.iter().filter_map(|id| tip_by_id(id)).collect()
}

pub fn categories() -> BTreeSet<&'static str> {
    CATALOG.iter().map(|tip| tip.category).collect()
}

pub fn tips_in_category(category: &str) -> Vec<&'static CuratedTip> {
    CATALOG
        .iter()
        .filter(|tip| tip.category.eq_ignore_ascii_case(category.trim()))
        .collect()
}

/// A catalog tip chosen for this user, with the reason it was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipPick {
    pub tip: &'static CuratedTip,
    pub reason: String,
}

impl TipPick {
    fn new(tip: &'static CuratedTip, reason: impl Into<String>) -> Self {
        Self {
            tip,
            reason: reason.into(),
        }
    }
}

fn prefers_rootless(profile: &StyleProfile) -> bool {
    profile.prefix_preference == PrefixPreference::NoPrefix
        || profile.modifier_preference == ModifierPreference::Alt
}

/// Tips that extend the navigation habits already present in `bindings`.
pub fn complementary_tips(bindings: &[Binding], profile: &StyleProfile) -> Vec<TipPick> {
    let mut picks = Vec::new();
    let mut pick = |id: &str, reason: String| {
        if let Some(tip) = tip_by_id(id) {
            picks.push(TipPick::new(tip, reason));
        }
    };

    match profile.navigation_style {
        NavigationStyle::Vim => {
            let alt_hjkl = bindings.iter().any(|b| {
                b.scope == Scope::Rootless
                    && b.modifiers().alt
                    && ["h", "j", "k", "l"].contains(&b.base_key())
            });
            if alt_hjkl && !profile.keys_in_use.contains("M-H") {
                pick(
                    "resize-meta-hjkl",
                    "You already move between panes with Alt+hjkl".to_string(),
                );
            } else if !alt_hjkl && !profile.keys_in_use.contains("prefix:H") {
                pick(
                    "resize-hjkl",
                    "You already move between panes with hjkl".to_string(),
                );
            }
        }
        NavigationStyle::Other => {
            let reason = "No pane navigation keys found in your config";
            pick("nav-pane-hjkl", reason.to_string());
            pick("nav-pane-meta-hjkl", reason.to_string());
        }
        NavigationStyle::Arrows => {}
    }

    let has_window_switch = bindings
        .iter()
        .any(|b| b.scope == Scope::Rootless && b.action.contains("select-window"));
    if !has_window_switch {
        pick(
            "nav-window-number",
            "No prefix-free window switching in your config".to_string(),
        );
    }

    picks
}

/// Essential tips whose action does not appear anywhere in `bindings`.
pub fn missing_essentials(bindings: &[Binding]) -> Vec<TipPick> {
    ESSENTIALS
        .iter()
        .filter(|(_, action)| !bindings.iter().any(|b| b.action.contains(action)))
        .filter_map(|(id, _)| tip_by_id(id))
        .map(|tip| TipPick::new(tip, "Common binding missing from your config"))
        .collect()
}

/// Relevance of a tip to this user. Higher is better.
pub fn score(tip: &CuratedTip, profile: &StyleProfile, binding_count: usize) -> i32 {
    let mut score = 0;
    if profile.navigation_style == NavigationStyle::Vim && tip.vim_style {
        score += 10;
    }
    if prefers_rootless(profile) && !tip.requires_prefix {
        score += 5;
    }
    if binding_count < 20 && tip.difficulty == Difficulty::Beginner {
        score += 3;
    }
    if binding_count < 10 && tip.difficulty == Difficulty::Advanced {
        score -= 5;
    }
    score
}

/// Order picks by [`score`], most relevant first. Ties keep their order.
pub fn rank(picks: &mut [TipPick], profile: &StyleProfile, binding_count: usize) {
    picks.sort_by_key(|pick| Reverse(score(pick.tip, profile, binding_count)));
}

/// Pick, dedupe, rank and cap catalog tips, one group per tip.
///
/// `category` adds every tip of that category on top of the automatic picks.
/// Conflicts with the user's keys are left to the conflict filter.
pub fn curated_groups(
    bindings: &[Binding],
    profile: &StyleProfile,
    category: Option<&str>,
    limit: usize,
) -> Vec<SuggestionGroup> {
    let mut picks = complementary_tips(bindings, profile);
    picks.extend(missing_essentials(bindings));
    if let Some(category) = category {
        picks.extend(
            tips_in_category(category)
                .into_iter()
                .map(|tip| TipPick::new(tip, format!("From the {} category", tip.category))),
        );
    }

    let mut seen = HashSet::new();
    picks.retain(|pick| seen.insert(pick.tip.id));

    rank(&mut picks, profile, bindings.len());
    tracing::debug!(
        "Curated picks: {:?}",
        picks.iter().map(|p| p.tip.id).collect::<Vec<_>>()
    );

    picks
        .into_iter()
        .take(limit)
        .map(|pick| pick.tip.to_group(pick.reason))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_related_ids_resolve() {
        let ids: HashSet<&str> = CATALOG.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), CATALOG.len());

        for tip in CATALOG {
            assert_eq!(related_tips(tip).len(), tip.related_to.len(), "{}", tip.id);
        }
        for (id, _) in ESSENTIALS {
            assert!(tip_by_id(id).is_some(), "{} missing", id);
        }
    }

    #[test]
    fn scope_follows_prefix_requirement() {
        let tip = tip_by_id("resize-meta-hjkl").unwrap();
        let group = tip.to_group("why");
        assert_eq!(group.candidates.len(), 4);
        assert!(group
            .candidates
            .iter()
            .all(|c| c.effective_scope() == Scope::Rootless));
        assert_eq!(group.reasoning, "why");

        let tip = tip_by_id("split-current-path").unwrap();
        assert_eq!(tip.candidates()[0].qualified_key(), "prefix:\"");
    }

    #[test]
    fn category_lookup_is_case_insensitive() {
        assert_eq!(tips_in_category(" Resize ").len(), 2);
        assert!(tips_in_category("appearance").is_empty());
        assert!(categories().contains("session"));
    }

    #[test]
    fn score_signals() {
        let vim_rootless = StyleProfile {
            prefix_preference: PrefixPreference::NoPrefix,
            navigation_style: NavigationStyle::Vim,
            ..StyleProfile::default()
        };
        let meta_resize = tip_by_id("resize-meta-hjkl").unwrap();
        assert_eq!(score(meta_resize, &vim_rootless, 50), 15);
        assert_eq!(score(meta_resize, &StyleProfile::default(), 50), 0);

        let sync = tip_by_id("pane-sync").unwrap();
        assert_eq!(score(sync, &StyleProfile::default(), 5), -5);
        assert_eq!(score(sync, &StyleProfile::default(), 15), 0);
    }
}
