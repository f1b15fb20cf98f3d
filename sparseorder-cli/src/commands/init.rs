//! Initialize layout command.

use sparseorder_core::Layout;

use crate::error::CliError;
use crate::util::{Context, save_layout};

/// Init command handler
pub fn cmd_init(ctx: &Context, force: bool) -> Result<(), CliError> {
    if ctx.layout_path.exists() && !force {
        return Err(CliError::Layout(format!(
            "Layout already exists at {}; use --force to overwrite",
            ctx.layout_path.display()
        )));
    }

    save_layout(&ctx.layout_path, &Layout::with_root())?;
    ctx.say(&format!("Created layout at {}", ctx.layout_path.display()));
    Ok(())
}
