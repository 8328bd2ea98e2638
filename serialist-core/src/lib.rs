//! # Serialist Core
//!
//! Constrained twelve-tone row generation and a small pattern language for
//! durations, noteheads and articulations. Rows and expanded patterns are
//! zipped into note events and grouped into staves for a renderer. No I/O:
//! every random choice goes through a caller-supplied `rand::Rng`.
//!
//! ## Features
//!
//! - **serde**: Serialize configs, rows, patterns and scores
//! - **colored**: Colored terminal `Display` for staves
//!
//! ## Example
//!
//! ```ignore
//! use serialist_core::{config::seeded_rng, GenerationConfig, RowGenerator};
//! use serialist_core::pattern::{Axis, PatternProgram};
//!
//! let mut rng = seeded_rng(7);
//! let row = RowGenerator::new(&GenerationConfig::default()).generate(12, &mut rng)?;
//! let program = PatternProgram::parse("[fixed=[8]x2, rotate=[(1,2),(1,1)]x2]", Axis::Duration)?;
//! let durations = program.durations(row.len(), 0, &mut rng);
//! ```

pub mod analysis;
pub mod beaming;
pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod pattern;
pub mod score;
pub mod types;

// Re-export commonly used types
pub use beaming::{BeamGrouping, BeamGroupingSelector};
pub use builder::{DurationSource, NoteEventBuilder, NoteheadSource};
pub use config::{AcceptancePolicy, GenerationConfig};
pub use error::{GenerationError, PatternError, RowError, ScoreError};
pub use generator::{RowGenerator, RowSource};
pub use pattern::{Axis, PatternProgram};
pub use score::{OutputMode, Score, ScoreAssembler, Staff};
pub use types::{Articulation, Duration, DurationSlot, NoteEvent, Notehead, Row};
