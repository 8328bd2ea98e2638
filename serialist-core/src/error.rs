//! Error types for pattern parsing, row generation and score assembly
//!
//! Only conditions the caller has to act on are errors. Per-item parse
//! problems, impossible beam groupings and short sequences are handled
//! locally with a logged fallback.

use crate::pattern::Axis;
use thiserror::Error;

/// Pattern-language failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// No block of the program could be parsed
    #[error("empty {axis} program: no blocks found in '{input}'")]
    EmptyProgram { axis: Axis, input: String },
}

/// Row generation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A row must have at least one note
    #[error("row length must be at least 1")]
    InvalidLength,

    /// Every restart ran out of attempts without completing a row
    #[error("failed to generate a row of length {length} after {retries} retries ({attempts} attempts each)")]
    Exhausted {
        length: usize,
        retries: usize,
        attempts: usize,
    },
}

/// Invalid rows supplied from outside the generator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("a row needs at least one pitch class")]
    Empty,

    #[error("pitch class {0} is out of range (0-11)")]
    PitchOutOfRange(i64),
}

/// Anything that can stop a score from being assembled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Row(#[from] RowError),
}
