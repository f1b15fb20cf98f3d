//! Command handler modules for the CLI.

mod add;
mod cleanup;
mod copy;
mod init;
mod list;
mod move_item;
mod remove;

use crate::cli::Commands;
use crate::error::CliError;
use crate::util::Context;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(ctx: &Context, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Init { force } => init::cmd_init(ctx, force),
        Commands::List {
            collection,
            include_root,
            format,
        } => list::cmd_list(ctx, collection, include_root, format),
        Commands::Add {
            collection,
            item,
            folder,
        } => add::cmd_add(ctx, collection, item, folder),
        Commands::Move {
            item,
            from,
            to,
            placement,
        } => {
            let (anchor, side) = placement.anchor();
            move_item::cmd_move(ctx, item, from, to.unwrap_or(from), anchor, side)
        }
        Commands::Copy {
            item,
            to,
            placement,
        } => {
            let (anchor, side) = placement.anchor();
            copy::cmd_copy(ctx, item, to, anchor, side)
        }
        Commands::Remove { item, from } => remove::cmd_remove(ctx, item, from),
        Commands::Cleanup { collection } => cleanup::cmd_cleanup(ctx, collection),
    }
}
