//! Error types for the narrative layer.

use cosmic_rules::ArtifactError;
use thiserror::Error;

/// A rejected engine or quiz operation. Rejections never change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NarrativeError {
    #[error("option {index} is out of range ({available} available)")]
    OutOfRangeSelection { index: usize, available: usize },

    #[error("a reveal is still in progress")]
    RevealInProgress,

    #[error("already completed")]
    AlreadyCompleted,

    #[error("no reveal is pending")]
    NoPendingReveal,

    #[error("reveal ticket {0} does not match the pending reveal")]
    StaleReveal(u64),

    #[error("step {0} does not exist in this story")]
    InvalidStep(usize),
}

/// Failures while building or loading a story.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("failed to read story: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse story: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("story has no steps")]
    Empty,

    #[error("step {step} has no options")]
    NoOptions { step: usize },

    #[error("step {step} option {option} points to missing step {target}")]
    DanglingStep {
        step: usize,
        option: usize,
        target: usize,
    },

    #[error("step {step} option {option} rewards unknown artifact '{artifact}'")]
    UnknownArtifact {
        step: usize,
        option: usize,
        artifact: String,
    },
}

/// Failures of session-level operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("an adventure needs a character; create one first")]
    MissingCharacter,

    #[error("an adventure needs a story")]
    MissingStory,

    #[error("the story is not complete yet")]
    StoryNotComplete,

    #[error("the quiz is not finished yet")]
    QuizNotFinished,

    #[error("a character was already created from this quiz")]
    CharacterAlreadyCreated,

    #[error("reveal timer was cancelled before it fired")]
    RevealCancelled,

    #[error("reveal timers need a running tokio runtime")]
    NoRuntime,

    #[error(transparent)]
    Narrative(#[from] NarrativeError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Invalid session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} must be greater than zero")]
    ZeroRevealDelay(&'static str),
}
