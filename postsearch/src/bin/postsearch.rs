//! Run a fuzzy search over a JSON file of candidates.
//!
//! Usage:
//!   postsearch --posts posts.json "spring confi"
//!   postsearch --posts posts.json --sort asc --scores --config search.toml kubernetes
//!
//! Options are layered: defaults -> config file -> POSTSEARCH_* env -> flags.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use postsearch::{search_scored, Candidate, ScoringOptions, SearchDocument, SortDirection};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "postsearch", about = "Fuzzy-search blog post candidates")]
struct Cli {
    /// JSON array of {"id", "searchText", "publishedAt"} records
    #[arg(long)]
    posts: PathBuf,

    /// Tie-break direction for publication time (asc|desc)
    #[arg(long, default_value = "desc")]
    sort: SortDirection,

    /// TOML file with scoring options
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    threshold: Option<f64>,

    #[arg(long)]
    min_token_length: Option<usize>,

    #[arg(long)]
    ignore_location: bool,

    /// Pick the threshold from the longest query token
    #[arg(long)]
    adaptive: bool,

    /// Print `id<TAB>score` instead of ids only
    #[arg(long)]
    scores: bool,

    #[arg(short, long)]
    verbose: bool,

    query: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "postsearch=debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_options(cli: &Cli) -> Result<ScoringOptions> {
    let mut options = match &cli.config {
        Some(path) => ScoringOptions::load(path)?,
        None => ScoringOptions::default(),
    };
    options.apply_env_overrides()?;

    if let Some(threshold) = cli.threshold {
        options.threshold = threshold;
    }
    if let Some(min_token_length) = cli.min_token_length {
        options.min_token_length = min_token_length;
    }
    if cli.ignore_location {
        options.ignore_location = true;
    }
    if cli.adaptive {
        options = options.tuned_for_query(&cli.query);
    }
    options.validate()?;
    Ok(options)
}

fn run(cli: &Cli) -> Result<()> {
    let options = resolve_options(cli)?;

    let raw = std::fs::read_to_string(&cli.posts)
        .with_context(|| format!("read {}", cli.posts.display()))?;
    let candidates: Vec<Candidate> =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", cli.posts.display()))?;

    tracing::debug!(?options, candidates = candidates.len(), "running search");

    for scored in search_scored(&candidates, &cli.query, cli.sort, &options) {
        if cli.scores {
            println!("{}\t{:.4}", scored.candidate.id(), scored.score);
        } else {
            println!("{}", scored.candidate.id());
        }
    }
    Ok(())
}
