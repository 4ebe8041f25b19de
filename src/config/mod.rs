use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::integrations::corpus::CorpusSource;
use crate::suggest::filter::TERMINAL_CONTROL_KEYS;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmux: TmuxConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TmuxConfig {
    /// User's tmux.conf; `~/.tmux.conf` when unset
    #[serde(default)]
    pub config_path: Option<PathBuf>,
}

impl TmuxConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        match &self.config_path {
            Some(path) => Some(expand_home(path)),
            None => dirs::home_dir().map(|home| home.join(".tmux.conf")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_repos")]
    pub repos: Vec<String>,
    #[serde(default = "default_paths")]
    pub paths: Vec<String>,
    #[serde(default = "default_branches")]
    pub branches: Vec<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_per_source_limit")]
    pub per_source_limit: usize,
}

fn default_repos() -> Vec<String> {
    [
        "gpakosz/.tmux",
        "tmux-plugins/tmux-sensible",
        "samoshkin/tmux-config",
        "tony/tmux-config",
        "rothgar/awesome-tmux",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_paths() -> Vec<String> {
    [".tmux.conf", "tmux.conf", ".tmux/.tmux.conf", "tmux/.tmux.conf"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_branches() -> Vec<String> {
    vec!["master".to_string(), "main".to_string()]
}

fn default_timeout() -> u64 {
    30
}

fn default_per_source_limit() -> usize {
    15
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            repos: default_repos(),
            paths: default_paths(),
            branches: default_branches(),
            timeout_secs: default_timeout(),
            per_source_limit: default_per_source_limit(),
        }
    }
}

impl CorpusConfig {
    /// One source per repo. Candidate locations are tried path-major, so each
    /// path is looked up on every branch before moving to the next path.
    pub fn sources(&self) -> Vec<CorpusSource> {
        self.repos
            .iter()
            .map(|repo| {
                let locations = self
                    .paths
                    .iter()
                    .flat_map(|path| {
                        self.branches
                            .iter()
                            .map(move |branch| raw_github_url(repo, branch, path))
                    })
                    .collect();
                CorpusSource::new(repo.clone(), locations)
            })
            .collect()
    }
}

fn raw_github_url(repo: &str, branch: &str, path: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/{}/{}/{}",
        repo,
        branch,
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Rootless triggers that are never suggested
    #[serde(default = "default_reserved_keys")]
    pub reserved_keys: Vec<String>,
    /// Extra command-verb prefixes accepted by the sanitizer
    #[serde(default)]
    pub extra_verbs: Vec<String>,
    /// Offer each key at most once even when several groups propose it
    #[serde(default)]
    pub dedupe_across_groups: bool,
}

fn default_reserved_keys() -> Vec<String> {
    TERMINAL_CONTROL_KEYS.iter().map(|s| s.to_string()).collect()
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            reserved_keys: default_reserved_keys(),
            extra_verbs: Vec::new(),
            dedupe_across_groups: false,
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

pub fn config_dir() -> Result<PathBuf> {
    let dir = directories::ProjectDirs::from("", "", "tmux-learn")
        .context("Could not determine config directory")?
        .config_dir()
        .to_path_buf();
    Ok(dir)
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, a missing default file just
/// means defaults.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = default_config_path()?;
            if !p.exists() {
                tracing::debug!("No config at {}, using defaults", p.display());
                return Ok(Config::default());
            }
            p
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;

    Ok(config)
}

/// Read the user's own tmux config. A missing file reads as empty text.
pub fn read_tmux_config(path: &Path) -> Result<String> {
    if !path.exists() {
        tracing::info!("No tmux config at {}, starting fresh", path.display());
        return Ok(String::new());
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tmux config from {}", path.display()))
}

/// Write a default config file, asking before overwriting an existing one.
pub fn init() -> Result<()> {
    use std::io::{self, Write};

    let config_path = default_config_path()?;
    if config_path.exists() {
        print!("Config already exists at {}. Overwrite? [y/N] ", config_path.display());
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(&Config::default())?;
    std::fs::write(&config_path, content)?;

    println!("Config saved to {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_try_every_branch_per_path() {
        let corpus = CorpusConfig {
            repos: vec!["tony/tmux-config".to_string()],
            paths: vec![".tmux.conf".to_string(), "tmux.conf".to_string()],
            branches: vec!["master".to_string(), "main".to_string()],
            ..CorpusConfig::default()
        };

        let sources = corpus.sources();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].id, "tony/tmux-config");
        assert_eq!(
            sources[0].locations,
            vec![
                "https://raw.githubusercontent.com/tony/tmux-config/master/.tmux.conf",
                "https://raw.githubusercontent.com/tony/tmux-config/main/.tmux.conf",
                "https://raw.githubusercontent.com/tony/tmux-config/master/tmux.conf",
                "https://raw.githubusercontent.com/tony/tmux-config/main/tmux.conf",
            ]
        );
    }

    #[test]
    fn home_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/.tmux.conf")), home.join(".tmux.conf"));
        }
        assert_eq!(expand_home(Path::new("/etc/tmux.conf")), PathBuf::from("/etc/tmux.conf"));
    }
}
