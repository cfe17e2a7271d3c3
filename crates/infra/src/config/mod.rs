//! Configuration loading
//!
//! Settings come from an optional `wastetrack.{json,toml}` file, then the
//! process environment (and `.env`), with the domain defaults underneath.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
