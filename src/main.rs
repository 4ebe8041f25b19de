use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tmux_learn::config::{self, Config};
use tmux_learn::data::{Confidence, CorpusBinding};
use tmux_learn::integrations::corpus;
use tmux_learn::parser::{self, ParsedConfig};
use tmux_learn::{style, suggest};
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "tmux-learn")]
#[command(about = "Discover tmux keybindings that match your existing habits")]
#[command(version)]
struct Args {
    /// Write a default configuration file
    #[arg(long)]
    init: bool,

    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the binding style of your tmux config
    Analyze {
        /// tmux config to read instead of the configured one
        #[arg(long)]
        tmux_conf: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Fetch bindings from popular community configs
    Corpus {
        #[arg(long)]
        json: bool,
    },
    /// Validate generator suggestions against your config
    Suggest {
        /// Generator output file; read from stdin when omitted
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Suggest from the built-in tip catalog, ranked by your style.
        /// Generator output is then only read when --input is given.
        #[arg(long)]
        curated: bool,

        /// Add every curated tip of this category (e.g. resize, session)
        #[arg(long, requires = "curated")]
        category: Option<String>,

        /// Maximum number of curated tips
        #[arg(long, default_value_t = suggest::curated::DEFAULT_LIMIT)]
        limit: usize,

        /// tmux config to read instead of the configured one
        #[arg(long)]
        tmux_conf: Option<PathBuf>,

        /// Also offer bindings from the community corpus
        #[arg(long)]
        with_corpus: bool,

        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tmux_learn=info".parse()?),
        )
        .init();

    if args.init {
        config::init()?;
        return Ok(());
    }

    let config = config::load(args.config.as_deref())?;

    match args.command {
        Some(Command::Analyze { tmux_conf, json }) => analyze(&config, tmux_conf.as_deref(), json),
        Some(Command::Corpus { json }) => show_corpus(&config, json).await,
        Some(Command::Suggest {
            input,
            curated,
            category,
            limit,
            tmux_conf,
            with_corpus,
            json,
        }) => {
            let options = SuggestOptions {
                input,
                curated,
                category,
                limit,
                tmux_conf,
                with_corpus,
                json,
            };
            suggest_bindings(&config, &options).await
        }
        None => analyze(&config, None, false),
    }
}

fn load_user_config(config: &Config, override_path: Option<&Path>) -> Result<ParsedConfig> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => config
            .tmux
            .resolved_path()
            .context("Could not determine home directory for ~/.tmux.conf")?,
    };
    let text = config::read_tmux_config(&path)?;
    Ok(parser::parse_config(&text))
}

fn analyze(config: &Config, tmux_conf: Option<&Path>, json: bool) -> Result<()> {
    let user = load_user_config(config, tmux_conf)?;
    let profile = style::classify(&user.bindings);
    let prefix = style::prefix_key(&user.options);

    if json {
        let report = serde_json::json!({
            "prefix_key": prefix,
            "bindings": user.bindings.len(),
            "style": profile,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Prefix key:   {}", prefix);
    println!("Bindings:     {}", user.bindings.len());
    println!("Prefix usage: {}", profile.prefix_preference.label());
    println!("Modifiers:    {}", profile.modifier_preference.label());
    println!("Navigation:   {}", profile.navigation_style.label());
    Ok(())
}

/// Fetch the corpus, forwarding status strings to the log as they arrive.
async fn fetch_corpus_logged(config: &Config) -> Vec<CorpusBinding> {
    let (tx, mut rx) = mpsc::channel::<String>(64);
    let logger = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            tracing::info!("{}", message);
        }
    });

    let sources = config.corpus.sources();
    let timeout = Duration::from_secs(config.corpus.timeout_secs);
    let bindings = corpus::fetch_corpus(&sources, timeout, Some(&tx)).await;

    drop(tx);
    if let Err(e) = logger.await {
        tracing::warn!("Status logger stopped: {}", e);
    }
    bindings
}

async fn show_corpus(config: &Config, json: bool) -> Result<()> {
    let bindings = fetch_corpus_logged(config).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&bindings)?);
    } else {
        println!(
            "{}",
            corpus::format_corpus(&bindings, config.corpus.per_source_limit)
        );
    }
    Ok(())
}

fn read_generator_output(input: Option<&Path>) -> Result<String> {
    if let Some(path) = input {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read suggestions from {}", path.display()));
    }

    if atty::is(atty::Stream::Stdin) {
        anyhow::bail!("No --input given and stdin is a terminal. Pipe generator output in.");
    }

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read suggestions from stdin")?;
    Ok(raw)
}

struct SuggestOptions {
    input: Option<PathBuf>,
    curated: bool,
    category: Option<String>,
    limit: usize,
    tmux_conf: Option<PathBuf>,
    with_corpus: bool,
    json: bool,
}

async fn suggest_bindings(config: &Config, options: &SuggestOptions) -> Result<()> {
    let user = load_user_config(config, options.tmux_conf.as_deref())?;
    let profile = style::classify(&user.bindings);

    let mut groups = Vec::new();
    if options.curated {
        groups.extend(suggest::curated_groups(
            &user.bindings,
            &profile,
            options.category.as_deref(),
            options.limit,
        ));
    }

    if !options.curated || options.input.is_some() {
        let raw = read_generator_output(options.input.as_deref())?;
        let decoded = suggest::parse_response(&raw);
        for group in decoded.iter().filter(|g| g.confidence == Confidence::Low) {
            tracing::warn!(
                "Generator output could not be decoded; {} characters ignored",
                group.reasoning.len()
            );
        }
        groups.extend(decoded);
    }

    if options.with_corpus {
        let bindings = fetch_corpus_logged(config).await;
        if !bindings.is_empty() {
            groups.push(suggest::corpus_group(&bindings));
        }
    }

    let engine = suggest::SuggestionEngine::from_config(&config.suggestions);
    let groups = engine.prepare(groups, &profile.keys_in_use);

    if options.json {
        let output = serde_json::json!({
            "style": profile,
            "groups": groups,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("# Your style: {}", profile.summary());
    if groups.is_empty() {
        println!("# No new suggestions survived validation.");
        return Ok(());
    }
    for group in &groups {
        println!();
        println!("{}", suggest::render_group(group));
    }
    Ok(())
}
