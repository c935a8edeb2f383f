//! Command-line interface definition.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the configuration reconciler.
#[derive(Parser, Debug)]
#[command(
    name = "idp-config",
    about = "Reconcile Identity Platform project configuration",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Provider settings file (defaults to ~/.config/idp-config/settings.toml)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Override the access scope requested for remote calls
    #[arg(long, global = true)]
    pub scope: Option<String>,

    /// Override the admin API base URL
    #[arg(long, global = true)]
    pub api_base: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure or update a project from a desired-state file
    Apply(ApplyOpts),
    /// Compare a desired-state file with the remote configuration
    Plan(PlanOpts),
    /// Refresh a state file from the remote configuration
    Refresh(StateOpts),
    /// Reset sign-in and authorized domains to empty
    Reset(StateOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the command's log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Apply(_) => "apply",
            Self::Plan(_) => "plan",
            Self::Refresh(_) => "refresh",
            Self::Reset(_) => "reset",
            Self::Version => "version",
        }
    }
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Desired-state TOML file
    #[arg(long)]
    pub desired: PathBuf,

    /// State file to read the identity from and write the observation to
    #[arg(long)]
    pub state: PathBuf,

    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,
}

/// Options for the `plan` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct PlanOpts {
    /// Desired-state TOML file
    #[arg(long)]
    pub desired: PathBuf,
}

/// Options for subcommands that operate on an existing state file.
#[derive(Parser, Debug, Clone)]
pub struct StateOpts {
    /// State file
    #[arg(long)]
    pub state: PathBuf,
}
