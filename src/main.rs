//! dectree CLI
//!
//! Reads a delimited categorical file, induces an ID3 tree for one column and
//! prints its rules to stdout.

use anyhow::{bail, Context, Result};
use clap::Parser;
use dectree::{read_path, ConfigIO, DecisionTree, ReaderConfig, TreeConfig};
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dectree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Induce an ID3 decision tree from a delimited categorical file", long_about = None)]
struct Args {
    /// Input file, one row per line
    input: PathBuf,

    /// Index of the column to predict
    target: usize,

    /// Field separator, only its first character is used
    #[arg(default_value = ";")]
    separator: String,

    /// "1" when the first line is a header, anything else when it is data
    #[arg(default_value = "1")]
    header: String,

    /// Threads used to build sibling subtrees
    #[arg(long)]
    threads: Option<usize>,

    /// JSON tree configuration; the positional target takes precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not create leaves for values missing from a branch
    #[arg(long)]
    no_guess: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    let log_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let separator = match args.separator.chars().next() {
        Some(separator) => separator,
        None => bail!("The separator must not be empty"),
    };
    let reader_cfg = ReaderConfig {
        separator,
        has_header: args.header == "1",
    };

    let mut tree_cfg = match &args.config {
        Some(path) => TreeConfig::load_config(path)
            .with_context(|| format!("Failed to load tree configuration from {}", path.display()))?,
        None => TreeConfig::default(),
    };
    tree_cfg.target = args.target;
    if args.threads.is_some() {
        tree_cfg.num_threads = args.threads;
    }
    if args.no_guess {
        tree_cfg.guess_from_parent = false;
    }
    tree_cfg.log_splits |= args.verbose;

    info!("Loading dataset from: {}", args.input.display());
    let dataset = read_path(&args.input, &reader_cfg).context("Failed to load dataset")?;
    info!(
        "Loaded {} rows with {} columns",
        dataset.enabled_rows_count(),
        dataset.n_columns()
    );

    let mut tree = DecisionTree::from_config(tree_cfg).context("Invalid tree configuration")?;
    tree.fit(&dataset).context("Failed to build the decision tree")?;

    let stdout = io::stdout();
    let mut output = stdout.lock();
    tree.print(&dataset, &mut output).context("Failed to print the rules")?;
    output.flush().context("Failed to flush stdout")?;

    Ok(())
}
