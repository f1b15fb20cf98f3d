//! `SparseOrder` CLI - Command-line interface for ordered collections
//!
//! Provides commands for creating a layout, listing folders and their items,
//! appending items, moving and copying items between positions and folders,
//! removing items from a folder, and renumbering a collection.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use sparseorder_core::tracing::{TracingLevel, init_tracing};

use crate::error::CliError;
use crate::util::Context;

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    if let Err(e) = run(cli) {
        if !quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = util::resolve_settings(cli.settings.as_deref())?;

    let level = if cli.quiet {
        TracingLevel::Error
    } else {
        TracingLevel::from_verbosity(settings.logging.level, cli.verbose)
    };
    let tracing_config = settings.logging.to_tracing_config().with_level(level);
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let ctx = Context {
        layout_path: util::resolve_layout_path(cli.layout.as_deref())?,
        settings,
        quiet: cli.quiet,
    };
    tracing::debug!(layout = %ctx.layout_path.display(), step = ctx.settings.step, "Starting");

    commands::dispatch(&ctx, cli.command)
}
