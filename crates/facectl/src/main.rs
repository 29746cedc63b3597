//! facectl CLI - manage people, groups and recognition on a face API.
//!
//! # Usage
//!
//! ```bash
//! # Register a person and enroll a folder of photos
//! facectl person create Alice family --tag vip
//! facectl person add-face Alice --image 'photos/alice/*.jpg'
//!
//! # Train the group and identify a new photo
//! facectl train identify family
//! facectl recognition identify family --image-url https://example.com/who.jpg
//!
//! # Check a training session started with --block=false
//! facectl info session 2c9f0d1e
//! ```

use clap::{Parser, Subcommand};
use facectl_core::Config;
use std::path::{Path, PathBuf};

mod cli;
mod logging;

/// facectl - command-line client for a face detection and recognition API.
#[derive(Parser, Debug)]
#[command(name = "facectl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, env = "FACECTL_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Api(ApiCommand),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

/// Commands that talk to the API.
#[derive(Subcommand, Debug)]
enum ApiCommand {
    /// Manage persons
    Person(cli::person::PersonArgs),

    /// Train the model
    Train(cli::train::TrainArgs),

    /// Recognize pictures
    Recognition(cli::recognition::RecognitionArgs),

    /// Get information
    Info(cli::info::InfoArgs),

    /// Manage groups
    Group(cli::group::GroupArgs),
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config
            .as_deref()
            .map(Config::expand_path)
            .unwrap_or_else(Config::default_path)
    }
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    logging::init(cli.verbose, cli.json_logs);
    tracing::debug!("facectl v{}", facectl_core::VERSION);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", one_line(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config_path();
    tracing::debug!("Using config file {}", config_path.display());

    match cli.command {
        Commands::Config(args) => cli::config::execute(args, &config_path),
        Commands::Api(command) => run_api_command(command, &config_path).await,
    }
}

/// The first run only writes a config template.
async fn run_api_command(command: ApiCommand, config_path: &Path) -> anyhow::Result<()> {
    let Some(ctx) = cli::ApiContext::load(config_path)? else {
        return Ok(());
    };

    match command {
        ApiCommand::Person(args) => cli::person::execute(args, &ctx).await,
        ApiCommand::Train(args) => cli::train::execute(args, &ctx).await,
        ApiCommand::Recognition(args) => cli::recognition::execute(args, &ctx).await,
        ApiCommand::Info(args) => cli::info::execute(args, &ctx).await,
        ApiCommand::Group(args) => cli::group::execute(args, &ctx).await,
    }
}

/// Render an error as a single console line.
///
/// Only the outermost message is used; sources are already part of it.
/// Multi-line messages (TOML parse errors quote the offending line) are
/// folded, dropping the source excerpt.
fn one_line(err: &anyhow::Error) -> String {
    err.to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_excerpt(line))
        .collect::<Vec<_>>()
        .join("; ")
}

/// `|`, `1 | [faceplusplus` and `|   ^` style lines.
fn is_excerpt(line: &str) -> bool {
    let rest = line
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start();
    rest.starts_with('|') || rest.starts_with('^')
}
