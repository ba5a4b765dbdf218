// src/errors.rs

//! Crate-wide error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpmError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("A task named '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid duration for task '{name}': {days} days (must be non-negative)")]
    InvalidDuration { name: String, days: i64 },

    #[error("Task '{0}' cannot depend on itself")]
    SelfDependency(String),

    #[error("Dependency '{pred}' -> '{succ}' already exists")]
    DuplicateEdge { pred: String, succ: String },

    #[error("Dependency '{pred}' -> '{succ}' would close a cycle")]
    CyclicDependency { pred: String, succ: String },

    #[error("Cycle detected in task graph involving task '{0}'")]
    CyclicGraph(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CpmError>;
