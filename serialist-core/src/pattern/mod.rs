//! Pattern language for durations, noteheads and articulations
//!
//! Programs such as `"[fixed=[8]x2, random=[rest=(1,4),16]x3, rotate=[rest,4]x2]"`
//! are parsed once per axis and expanded once per staff into sequences of
//! exactly the staff's length.

mod parser;
mod program;
mod sequencer;
mod token;


// Re-export public types
pub use program::PatternProgram;
pub use sequencer::expand;
pub use token::{Axis, Mode, PatternBlock, RestDuration, Token};
