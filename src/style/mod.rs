//! Binding-style classification.
//!
//! Pure functions over a parsed binding list. Each dimension of the profile
//! is decided independently:
//!
//! | Dimension | Rule (R = rootless, P = prefixed, A = Alt, C = Ctrl) |
//! |-----------|------------------------------------------------------|
//! | prefix    | R=0 -> prefix-based; P=0 -> no-prefix; R>P -> no-prefix; R<P/2 -> prefix-based; else mixed |
//! | modifier  | A>2C -> Alt/Meta; C>2A -> Ctrl; else mixed |
//! | navigation | any bare/Alt h,j,k,l -> vim; else any arrow key -> arrows; else other |

use crate::data::{
    Binding, ModifierPreference, NavigationStyle, PrefixPreference, Scope, StyleProfile,
};
use std::collections::BTreeMap;

const VIM_KEYS: &[&str] = &["h", "j", "k", "l"];
const ARROW_KEYS: &[&str] = &["Left", "Right", "Up", "Down"];

/// tmux's own default prefix
pub const DEFAULT_PREFIX: &str = "C-b";

/// Compute a fresh style profile from a binding list.
///
/// An empty list classifies to prefix-based / mixed / other with no keys.
pub fn classify(bindings: &[Binding]) -> StyleProfile {
    StyleProfile {
        prefix_preference: prefix_preference(bindings),
        modifier_preference: modifier_preference(bindings),
        navigation_style: navigation_style(bindings),
        keys_in_use: bindings.iter().map(Binding::qualified_key).collect(),
    }
}

fn prefix_preference(bindings: &[Binding]) -> PrefixPreference {
    let rootless = bindings
        .iter()
        .filter(|b| b.scope == Scope::Rootless)
        .count();
    let prefixed = bindings.len() - rootless;

    if rootless == 0 {
        PrefixPreference::PrefixBased
    } else if prefixed == 0 || rootless > prefixed {
        PrefixPreference::NoPrefix
    } else if rootless * 2 < prefixed {
        PrefixPreference::PrefixBased
    } else {
        PrefixPreference::Mixed
    }
}

fn modifier_preference(bindings: &[Binding]) -> ModifierPreference {
    let (alt, ctrl) = bindings.iter().fold((0usize, 0usize), |(alt, ctrl), b| {
        let mods = b.modifiers();
        (alt + mods.alt as usize, ctrl + mods.ctrl as usize)
    });

    if alt > 2 * ctrl {
        ModifierPreference::Alt
    } else if ctrl > 2 * alt {
        ModifierPreference::Ctrl
    } else {
        ModifierPreference::Mixed
    }
}

fn navigation_style(bindings: &[Binding]) -> NavigationStyle {
    let is_vim = |b: &Binding| {
        let mods = b.modifiers();
        VIM_KEYS.contains(&b.base_key()) && !mods.ctrl && !mods.shift
    };
    if bindings.iter().any(is_vim) {
        return NavigationStyle::Vim;
    }

    if bindings.iter().any(|b| ARROW_KEYS.contains(&b.base_key())) {
        NavigationStyle::Arrows
    } else {
        NavigationStyle::Other
    }
}

/// Prefix key from parsed `set` options, falling back to tmux's default.
pub fn prefix_key(options: &BTreeMap<String, String>) -> String {
    options
        .get("prefix")
        .filter(|p| !p.is_empty())
        .cloned()
        .unwrap_or_else(|| DEFAULT_PREFIX.to_string())
}

impl StyleProfile {
    /// One-line human description, e.g. for a status bar or a generator prompt.
    pub fn summary(&self) -> String {
        format!(
            "{} bindings, {} modifiers, {} navigation, {} keys in use",
            self.prefix_preference.label(),
            self.modifier_preference.label(),
            self.navigation_style.label(),
            self.keys_in_use.len()
        )
    }
}
