//! `idp-config` binary entry point.
use anyhow::Result;
use clap::Parser;

use identity_platform_config::cancel::CancelToken;
use identity_platform_config::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    if matches!(args.command, cli::Command::Version) {
        commands::version::run();
        return Ok(());
    }

    logging::init_subscriber(args.verbose, args.command.name());

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        tracing::warn!("interrupted; cancelling outstanding requests");
        handler_token.cancel();
    }) {
        tracing::warn!("could not install Ctrl-C handler: {e}");
    }

    let result = match &args.command {
        cli::Command::Apply(opts) => commands::apply::run(&args.global, opts, &cancel),
        cli::Command::Plan(opts) => commands::plan::run(&args.global, opts, &cancel),
        cli::Command::Refresh(opts) => commands::refresh::run(&args.global, opts, &cancel),
        cli::Command::Reset(opts) => commands::reset::run(&args.global, opts, &cancel),
        cli::Command::Version => Ok(()),
    };

    if let Err(e) = &result {
        tracing::error!("{e:#}");
    }
    result
}
