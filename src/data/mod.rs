use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tag prepended to prefixed triggers so `x` and prefix-`x` never collide.
pub const PREFIX_TAG: &str = "prefix:";

/// Whether a binding fires directly or only after the prefix key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// `bind -n`: fires without the prefix
    Rootless,
    /// Plain `bind`: fires after the prefix
    #[default]
    Prefixed,
}

impl Scope {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rootless => "rootless",
            Self::Prefixed => "prefixed",
        }
    }

    /// Lenient lookup used when decoding untrusted suggestion payloads.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "rootless" | "root" | "-n" | "no-prefix" => Some(Self::Rootless),
            "prefixed" | "prefix" => Some(Self::Prefixed),
            _ => None,
        }
    }
}

/// Build the scope-qualified key used for conflict checks.
///
/// Rootless triggers are returned verbatim; prefixed triggers get [`PREFIX_TAG`].
pub fn qualify_key(trigger: &str, scope: Scope) -> String {
    match scope {
        Scope::Rootless => trigger.to_string(),
        Scope::Prefixed => format!("{}{}", PREFIX_TAG, trigger),
    }
}

/// One `bind`/`bind-key` statement from a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub trigger: String, // e.g., "M-h"
    pub scope: Scope,
    pub action: String, // e.g., "select-pane -L"
    pub source_line: String,
}

impl Binding {
    pub fn qualified_key(&self) -> String {
        qualify_key(&self.trigger, self.scope)
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::split(&self.trigger).0
    }

    /// Base key with the modifier chain removed (`C-M-h` -> `h`)
    pub fn base_key(&self) -> &str {
        Modifiers::split(&self.trigger).1
    }

    /// Re-emit this binding as a config line.
    pub fn to_line(&self) -> String {
        crate::parser::format_binding(self)
    }
}

/// Modifier tags carried by a trigger (`C-`, `M-`, `S-`, or a leading `^`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Split a trigger into its modifier set and base key.
    ///
    /// Tags may repeat and appear in any order. A tag is only consumed when a
    /// base key follows it, so `M--` is Alt+minus and a lone `C-` is a key.
    pub fn split(trigger: &str) -> (Modifiers, &str) {
        let mut mods = Modifiers::default();
        let mut rest = trigger;

        loop {
            let bytes = rest.as_bytes();
            if bytes.len() > 2 && bytes[1] == b'-' {
                match bytes[0] {
                    b'C' => mods.ctrl = true,
                    b'M' => mods.alt = true,
                    b'S' => mods.shift = true,
                    _ => break,
                }
                rest = &rest[2..];
            } else if bytes.len() > 1 && bytes[0] == b'^' {
                mods.ctrl = true;
                rest = &rest[1..];
            } else {
                break;
            }
        }

        (mods, rest)
    }

    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }
}

/// How the user tends to reach their bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixPreference {
    NoPrefix,
    #[default]
    PrefixBased,
    Mixed,
}

impl PrefixPreference {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoPrefix => "no-prefix",
            Self::PrefixBased => "prefix-based",
            Self::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ModifierPreference {
    Alt,
    Ctrl,
    #[default]
    Mixed,
}

impl ModifierPreference {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Alt => "Alt/Meta",
            Self::Ctrl => "Ctrl",
            Self::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationStyle {
    Vim,
    Arrows,
    #[default]
    Other,
}

impl NavigationStyle {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vim => "vim (hjkl)",
            Self::Arrows => "arrow keys",
            Self::Other => "other",
        }
    }
}

/// Aggregate view of a binding list. Always recomputed, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StyleProfile {
    pub prefix_preference: PrefixPreference,
    pub modifier_preference: ModifierPreference,
    pub navigation_style: NavigationStyle,
    /// Scope-qualified triggers, see [`qualify_key`]
    pub keys_in_use: BTreeSet<String>,
}

/// One proposed binding from an untrusted source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionCandidate {
    pub trigger: String,
    pub action: String,
    #[serde(default)]
    pub description: String,
    /// Explicit scope; inferred from the trigger when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

impl SuggestionCandidate {
    pub fn new(
        trigger: impl Into<String>,
        action: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            trigger: trigger.into(),
            action: action.into(),
            description: description.into(),
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Scope this candidate would be bound in.
    ///
    /// Ctrl- or Alt-tagged triggers are rootless unless stated otherwise;
    /// bare keys go behind the prefix.
    pub fn effective_scope(&self) -> Scope {
        if let Some(scope) = self.scope {
            return scope;
        }
        let (mods, _) = Modifiers::split(&self.trigger);
        if mods.alt || mods.ctrl {
            Scope::Rootless
        } else {
            Scope::Prefixed
        }
    }

    pub fn qualified_key(&self) -> String {
        qualify_key(&self.trigger, self.effective_scope())
    }

    pub fn to_binding(&self) -> Binding {
        let mut binding = Binding {
            trigger: self.trigger.clone(),
            scope: self.effective_scope(),
            action: self.action.clone(),
            source_line: String::new(),
        };
        binding.source_line = binding.to_line();
        binding
    }
}

/// How much the producer of a group can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    Normal,
    /// Generator output that could not be decoded
    Low,
}

/// Candidates that share a rationale and are practised together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionGroup {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub candidates: Vec<SuggestionCandidate>,
    #[serde(default)]
    pub confidence: Confidence,
}

impl SuggestionGroup {
    pub fn new(name: impl Into<String>, candidates: Vec<SuggestionCandidate>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            reasoning: String::new(),
            candidates,
            confidence: Confidence::Normal,
        }
    }
}

/// A binding scraped from an external config, tagged with where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusBinding {
    pub binding: Binding,
    pub source: String, // e.g., "gpakosz/.tmux"
    /// Comment line directly above the binding, if any
    pub context: Option<String>,
}
