//! # Serialist
//!
//! Interactive front end for `serialist-core`. A session holds a seed, a row
//! length, the prime row and one pattern per attribute axis; commands typed
//! at the prompt generate rows, expand patterns and print rotation or serial
//! staves.
//!
//! ## Modules
//!
//! - `commands`: The command registry and the session context it mutates.
//! - `display`: Colored terminal output for rows, patterns and scores.
//! - `repl`: The Read-Eval-Print Loop built on `rustyline`.

pub mod commands;
pub mod display;
pub mod repl;

pub use crate::commands::{create_registry, CommandContext, CommandResult};
