// src/config/mod.rs

//! Plan file loading and validation.
//!
//! - [`model`] maps the TOML plan file onto Rust types.
//! - [`loader`] reads and parses a plan from disk.
//! - [`validate`] runs semantic checks (dates, durations, dependency graph).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigFile, ProjectSection, TaskConfig};
pub use validate::validate_config;
