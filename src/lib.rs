//! Hubmirror: mirror Hugging Face dataset repos into a git repository.
//!
//! Hubmirror downloads every file of the configured dataset repos, splits
//! them by size into two tiers (small files committed in-repo, large files
//! uploaded as release assets), and generates a sha256 manifest plus
//! download/verify helper scripts for consumers of the mirror.
//!
//! # Modules
//!
//! - [`hf`]: remote concerns (dataset refs, listing, acquisition)
//! - [`mirror`]: local tiering, manifest, and script generation
//! - [`publish`]: gh/git collaborators behind the `Publisher` seam
//! - [`pipeline`]: the orchestrator tying the stages together
//! - [`error`]: error types for hubmirror operations

pub mod config;
pub mod error;
pub mod hf;
pub mod mirror;
pub mod pipeline;
pub mod publish;

use clap::{Parser, Subcommand};

pub use config::MirrorConfig;
pub use error::MirrorError;

/// The hubmirror CLI application.
#[derive(Parser)]
#[command(name = "hubmirror")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Mirror the given datasets into the current repository.
    Mirror(MirrorArgs),
}

/// Arguments for the mirror subcommand.
#[derive(clap::Args)]
struct MirrorArgs {
    /// Dataset repo ids to mirror, in '<namespace>/<name>' form.
    datasets: Vec<String>,

    /// GitHub owner of the mirror repository.
    #[arg(long, env = "GH_OWNER")]
    owner: Option<String>,

    /// GitHub repository name (without the owner).
    #[arg(long, env = "GH_REPO")]
    repo: Option<String>,

    /// Release tag that hosts the large-file assets.
    #[arg(long, env = "RELEASE_TAG", default_value = "v1.0")]
    tag: String,

    /// Hugging Face access token (needed for private datasets).
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Concurrent downloads per dataset.
    #[arg(long, default_value_t = config::DEFAULT_FETCH_PARALLELISM)]
    jobs: usize,
}

/// Run the hubmirror CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), MirrorError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Mirror(args)) => run_mirror_command(args),
        None => {
            println!("hubmirror {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Mirror Hugging Face dataset repos into git.");
            println!();
            println!("Run 'hubmirror --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the mirror subcommand.
fn run_mirror_command(args: MirrorArgs) -> Result<(), MirrorError> {
    let config = MirrorConfig {
        gh_owner: args.owner.unwrap_or_default(),
        gh_repo: args.repo.unwrap_or_default(),
        release_tag: args.tag,
        hf_token: args.token,
        datasets: args.datasets,
        fetch_parallelism: args.jobs,
        ..Default::default()
    };

    let report = pipeline::run_mirror(&config)?;
    print!("\n{report}");
    Ok(())
}
