//! Configuration for `SparseOrder`
//!
//! Settings are read from a TOML file. Every field has a default, so an empty
//! or partial file is valid.

mod settings;

pub use settings::{LoggingSettings, MIN_STEP, OrderSettings, load_settings};
