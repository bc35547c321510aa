//! Error types for character rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of artifact inventory operations. Neither variant mutates the
/// inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ArtifactError {
    #[error("artifact slot {0} is out of range or empty")]
    InvalidSlot(usize),

    #[error("no free artifact slot")]
    NoCapacity,
}

/// Failures while loading static content.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("catalog section '{0}' is empty")]
    EmptySection(&'static str),

    #[error("catalog contains an empty entry in '{0}'")]
    EmptyEntry(&'static str),

    #[error("question {question} has no options")]
    NoOptions { question: usize },

    #[error("question {question} option {option} has weight {weight}, expected 1 to 4")]
    InvalidWeight {
        question: usize,
        option: usize,
        weight: u32,
    },

    #[error("artifact '{0}' needs a positive bonus and duration")]
    InvalidArtifact(String),

    #[error("duplicate artifact id '{0}'")]
    DuplicateArtifact(String),

    #[error("unknown artifact '{0}'")]
    UnknownArtifact(String),

    #[error("featured character '{name}' uses slot {slot}, which does not exist")]
    InvalidSlot { name: String, slot: usize },
}
