//! feed-digest CLI
//!
//! Each subcommand is one scheduled stage; they share only the snapshot file.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use feed_digest::{
    config::{PublishEnv, load_config},
    error::Result,
    models::Config,
    pipeline,
    storage::LocalStorage,
};

/// feed-digest - Weekly AI/ML feed digest
#[derive(Parser, Debug)]
#[command(
    name = "feed-digest",
    version,
    about = "Aggregates feeds into a weekly digest page and Dev.to post"
)]
struct Cli {
    /// Site root containing data/, content/ and the site config
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Tool configuration (default: {root}/feed-digest.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all feeds and rewrite the snapshot
    Fetch,

    /// Write this week's digest page from the snapshot
    Render,

    /// Post this week's digest to Dev.to (Mondays only unless forced)
    Publish {
        /// Publish regardless of weekday (same as FORCE_WEEKLY_POST=1)
        #[arg(long)]
        force: bool,

        /// Log the post instead of submitting it; ignores weekday and API key
        #[arg(long)]
        dry_run: bool,
    },

    /// Run full pipeline: Fetch → Render → Publish
    Pipeline,

    /// Validate configuration
    Validate,

    /// Show current snapshot info
    Info,
}

/// Initialize logging based on verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = match (verbose, quiet) {
        (true, _) => "debug",
        (_, true) => "warn",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join("feed-digest.toml"));

    let config = match cli.command {
        // Report problems instead of failing on them.
        Command::Validate => Config::load_or_default(&config_path),
        _ => load_config(&config_path)?,
    };
    log::debug!("Site root: {}", cli.root.display());

    let storage = LocalStorage::new(&cli.root, config.paths.clone());
    let now = Utc::now();

    match cli.command {
        Command::Fetch => {
            pipeline::run_fetch(&config, &storage, now).await?;
        }

        Command::Render => {
            pipeline::run_render(&config, &storage, now).await?;
        }

        Command::Publish { force, dry_run } => {
            if dry_run {
                pipeline::preview_publish(&config, &storage, &cli.root, now).await?;
            } else {
                let mut env = PublishEnv::from_env();
                env.force |= force;
                pipeline::run_publish(&config, &storage, &cli.root, &env, now).await?;
            }
        }

        Command::Pipeline => {
            let env = PublishEnv::from_env();
            pipeline::run_pipeline(&config, &storage, &cli.root, &env, now).await?;
        }

        Command::Validate => {
            pipeline::run_validate(&config)?;
            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Site root: {}", cli.root.display());
            pipeline::run_info(&config, &storage, now).await?;
        }
    }

    Ok(())
}
