//! Shared utility functions used across command modules.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sparseorder_core::{
    Layout, ListRefresher, MemoryStore, MoveExecutor, OrderSettings, RecordingRefresher,
    load_settings,
};

use crate::error::CliError;

/// File name of the layout inside the data directory
const LAYOUT_FILE_NAME: &str = "layout.json";

/// Values every command needs, resolved from the global flags
#[derive(Debug, Clone)]
pub struct Context {
    /// Layout file to read and write
    pub layout_path: PathBuf,
    /// Loaded settings
    pub settings: OrderSettings,
    /// Suppress informational output
    pub quiet: bool,
}

impl Context {
    /// Prints an informational line unless `--quiet` was given
    pub fn say(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

/// Returns the layout path from CLI args, or the default in the data directory
pub fn resolve_layout_path(layout_path: Option<&Path>) -> Result<PathBuf, CliError> {
    match layout_path {
        Some(path) => Ok(path.to_path_buf()),
        None => dirs::data_dir()
            .map(|dir| dir.join("sparseorder").join(LAYOUT_FILE_NAME))
            .ok_or_else(|| {
                CliError::Layout("Cannot determine data directory; pass --layout".to_string())
            }),
    }
}

/// Loads settings from the given file, or defaults when none is given
pub fn resolve_settings(settings_path: Option<&Path>) -> Result<OrderSettings, CliError> {
    match settings_path {
        Some(path) => load_settings(path).map_err(|e| {
            CliError::Settings(format!("Failed to load {}: {e}", path.display()))
        }),
        None => Ok(OrderSettings::default()),
    }
}

/// Reads the layout file
pub fn load_layout(path: &Path) -> Result<Layout, CliError> {
    if !path.exists() {
        return Err(CliError::Layout(format!(
            "No layout at {}; run `sparseorder-cli init` first",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::Layout(format!("Failed to parse {}: {e}", path.display())))
}

/// Writes the layout file, creating parent directories as needed
pub fn save_layout(path: &Path, layout: &Layout) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(layout)
        .map_err(|e| CliError::Layout(format!("Failed to serialize layout: {e}")))?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "Layout saved");
    Ok(())
}

/// Loads the layout into a store using the configured step
pub fn open_store(ctx: &Context) -> Result<Arc<MemoryStore>, CliError> {
    let layout = load_layout(&ctx.layout_path)?;
    Ok(Arc::new(MemoryStore::from_layout(layout, ctx.settings.step)))
}

/// Builds an executor over `store` that records which lists changed
pub fn executor_for(
    ctx: &Context,
    store: &Arc<MemoryStore>,
) -> (MoveExecutor, Arc<RecordingRefresher>) {
    let refresher = Arc::new(RecordingRefresher::new());
    let listener: Arc<dyn ListRefresher> = refresher.clone();
    let executor = MoveExecutor::new(store.clone(), listener, ctx.settings.step);
    (executor, refresher)
}

/// Writes the store back to the layout file and reports the changed lists
pub async fn commit(
    ctx: &Context,
    store: &MemoryStore,
    refresher: &RecordingRefresher,
) -> Result<(), CliError> {
    save_layout(&ctx.layout_path, &store.layout().await)?;
    for collection in refresher.reloads() {
        ctx.say(&format!("Updated {collection}"));
    }
    Ok(())
}

/// Creates the async runtime used to drive the core
pub fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Io)
}
