//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sparseorder_core::{Anchor, CollectionId, ItemId, Side};

/// `SparseOrder` command-line interface for ordered folders and sources
#[derive(Parser)]
#[command(name = "sparseorder-cli")]
#[command(author, version, about = "SparseOrder command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the JSON layout file
    #[arg(short, long, global = true, env = "SPARSEORDER_LAYOUT")]
    pub layout: Option<PathBuf>,

    /// Path to the TOML settings file
    #[arg(short, long, global = true, env = "SPARSEORDER_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty layout
    #[command(about = "Create an empty layout holding only the root collection")]
    Init {
        /// Overwrite an existing layout
        #[arg(long)]
        force: bool,
    },

    /// List a collection in display order
    #[command(about = "List folders, or the items of one collection")]
    List {
        /// Collection to list (`root` or a folder UUID); folders when omitted
        #[arg(short, long)]
        collection: Option<CollectionId>,

        /// Also show the root collection in the folder overview
        #[arg(long, conflicts_with = "collection")]
        include_root: bool,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Append a new item to a collection
    #[command(about = "Append an item at the end of a collection")]
    Add {
        /// Collection receiving the item (`root` or a folder UUID)
        collection: CollectionId,

        /// Id for the new item; generated when omitted
        #[arg(short, long)]
        item: Option<ItemId>,

        /// Also create the item's own collection (root items only)
        #[arg(long)]
        folder: bool,
    },

    /// Move an item next to a sibling
    #[command(about = "Move an item within or between collections")]
    Move {
        /// Item to move
        item: ItemId,

        /// Collection currently holding the item
        #[arg(long)]
        from: CollectionId,

        /// Destination collection; defaults to `--from`
        #[arg(long)]
        to: Option<CollectionId>,

        #[command(flatten)]
        placement: PlacementArgs,
    },

    /// Add an item to another collection, keeping it where it is
    #[command(about = "Copy an item into another collection")]
    Copy {
        /// Item to copy
        item: ItemId,

        /// Destination collection
        #[arg(long)]
        to: CollectionId,

        #[command(flatten)]
        placement: PlacementArgs,
    },

    /// Take an item out of a collection
    #[command(about = "Remove an item from one collection, keeping its other entries")]
    Remove {
        /// Item to remove
        item: ItemId,

        /// Collection to remove the item from
        #[arg(long)]
        from: CollectionId,
    },

    /// Renumber a collection
    #[command(about = "Respace a collection's positions evenly, keeping order")]
    Cleanup {
        /// Collection to renumber (`root` or a folder UUID)
        collection: CollectionId,
    },
}

/// Where to place an item relative to its new siblings
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct PlacementArgs {
    /// Place directly before this sibling
    #[arg(long, value_name = "ID")]
    pub before: Option<ItemId>,

    /// Place directly after this sibling
    #[arg(long, value_name = "ID")]
    pub after: Option<ItemId>,

    /// Place first
    #[arg(long)]
    pub start: bool,

    /// Place last
    #[arg(long)]
    pub end: bool,
}

impl PlacementArgs {
    /// Anchor and side selected by the flags
    #[must_use]
    pub const fn anchor(&self) -> (Anchor, Side) {
        match (self.before, self.after) {
            (Some(id), _) => (Anchor::Item(id), Side::Before),
            (None, Some(id)) => (Anchor::Item(id), Side::After),
            (None, None) if self.start => (Anchor::Start, Side::Before),
            (None, None) => (Anchor::End, Side::After),
        }
    }
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for scripting
    Json,
}
