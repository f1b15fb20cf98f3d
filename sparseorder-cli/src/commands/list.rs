//! List command.

use std::fmt::Write as _;

use serde::Serialize;
use sparseorder_core::{CollectionId, FolderSummary, Position, SiblingEntry, SnapshotReader};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{Context, open_store, runtime};

/// List command handler
///
/// Without a collection, lists the folders of the root collection together
/// with the position the next item appended to each would receive;
/// `include_root` adds the root collection itself as the first row.
pub fn cmd_list(
    ctx: &Context,
    collection: Option<CollectionId>,
    include_root: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    let store = open_store(ctx)?;
    let reader = SnapshotReader::new(store, ctx.settings.step);
    let rt = runtime()?;

    let output = match collection {
        Some(collection) => {
            let snapshot = rt.block_on(reader.read(&collection))?;
            match format {
                OutputFormat::Table => format_entries_table(snapshot.entries()),
                OutputFormat::Json => format_json(&snapshot.into_entries())?,
            }
        }
        None => {
            let folders = rt.block_on(reader.folder_overview(None, include_root))?;
            match format {
                OutputFormat::Table => format_folders_table(&folders),
                OutputFormat::Json => {
                    let output: Vec<FolderOutput> =
                        folders.iter().map(FolderOutput::from).collect();
                    format_json(&output)?
                }
            }
        }
    };

    println!("{output}");
    Ok(())
}

/// Format collection entries as a table string
#[must_use]
pub fn format_entries_table(entries: &[SiblingEntry]) -> String {
    if entries.is_empty() {
        return "No items found.".to_string();
    }

    let position_width = entries
        .iter()
        .map(|e| e.position.get().to_string().len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    let _ = writeln!(output, "{:<position_width$}  ID", "POSITION");
    let _ = writeln!(output, "{:-<position_width$}  {:-<36}", "", "");
    for entry in entries {
        let _ = writeln!(
            output,
            "{:<position_width$}  {}",
            entry.position.get(),
            entry.id
        );
    }

    output.trim_end().to_string()
}

/// Format folder summaries as a table string
#[must_use]
pub fn format_folders_table(folders: &[FolderSummary]) -> String {
    if folders.is_empty() {
        return "No folders found.".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(output, "{:<36}  {:<10}  NEXT", "FOLDER", "POSITION");
    let _ = writeln!(output, "{:-<36}  {:-<10}  {:-<10}", "", "", "");
    for folder in folders {
        let name = folder.collection.to_string();
        let position = folder
            .position
            .map_or_else(|| "-".to_string(), |p| p.get().to_string());
        let _ = writeln!(
            output,
            "{name:<36}  {position:<10}  {}",
            folder.next_position
        );
    }

    output.trim_end().to_string()
}

/// Format any serializable value as pretty JSON
///
/// # Errors
///
/// Returns `CliError::Layout` if JSON serialization fails.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Layout(format!("Failed to serialize to JSON: {e}")))
}

/// Folder summary output for CLI
#[derive(Debug, Clone, Serialize)]
pub struct FolderOutput {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
    pub next_position: u64,
}

impl From<&FolderSummary> for FolderOutput {
    fn from(folder: &FolderSummary) -> Self {
        Self {
            id: folder.collection.to_string(),
            position: folder.position.map(Position::get),
            next_position: folder.next_position.get(),
        }
    }
}
