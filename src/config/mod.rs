//! Configuration for texture generation
//!
//! Provides types and parsing for `areatex.toml`.

pub mod loader;
pub mod schema;

pub use loader::{
    default_config, find_config, find_config_from, load_config, merge_cli_overrides,
    project_root, resolve_path, CliOverrides, ConfigError, CONFIG_FILE,
};
pub use schema::*;
