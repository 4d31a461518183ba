//! Configuration loading
//!
//! Layers `.env`, an optional TOML/JSON file and environment variables over
//! the defaults defined in `pausecal-domain`.

pub mod loader;

pub use loader::{apply_env_overrides, load, load_from_file, probe_config_paths};
