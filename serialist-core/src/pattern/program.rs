//! Parsed pattern programs.

use super::parser::parse_program;
use super::sequencer::expand;
use super::token::{Axis, PatternBlock, Token};
use crate::config::DEFAULT_NOTEHEAD_SHAPES;
use crate::error::PatternError;
use crate::types::{Articulation, DurationSlot, Notehead};
use rand::Rng;
use std::fmt;

/// An ordered list of blocks for one axis
///
/// Immutable once parsed. The same program is expanded once per staff since
/// `rotate` blocks depend on the rotation index supplied at expansion time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternProgram {
    axis: Axis,
    blocks: Vec<PatternBlock>,
}

impl PatternProgram {
    /// Parse a program, accepting the default notehead shapes
    pub fn parse(input: &str, axis: Axis) -> Result<Self, PatternError> {
        parse_program(input, axis, &DEFAULT_NOTEHEAD_SHAPES)
    }

    /// Parse a program, accepting only `shapes` on the notehead axis
    pub fn parse_with_shapes(
        input: &str,
        axis: Axis,
        shapes: &[Notehead],
    ) -> Result<Self, PatternError> {
        parse_program(input, axis, shapes)
    }

    /// Build a program directly from blocks
    pub fn from_blocks(axis: Axis, blocks: Vec<PatternBlock>) -> Self {
        PatternProgram { axis, blocks }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn blocks(&self) -> &[PatternBlock] {
        &self.blocks
    }

    /// True when every block is degenerate, so expansion yields nothing
    pub fn is_degenerate(&self) -> bool {
        self.blocks.iter().all(PatternBlock::is_degenerate)
    }

    /// Expand into exactly `total_notes` tokens (see [`expand`])
    pub fn expand<R: Rng + ?Sized>(
        &self,
        total_notes: usize,
        rotation_index: usize,
        rng: &mut R,
    ) -> Vec<Token> {
        expand(self, total_notes, rotation_index, rng)
    }

    /// Expanded duration slots (empty unless this is a duration program)
    pub fn durations<R: Rng + ?Sized>(
        &self,
        total_notes: usize,
        rotation_index: usize,
        rng: &mut R,
    ) -> Vec<DurationSlot> {
        self.expand(total_notes, rotation_index, rng)
            .iter()
            .filter_map(Token::as_duration_slot)
            .collect()
    }

    /// Expanded noteheads (empty unless this is a notehead program)
    pub fn noteheads<R: Rng + ?Sized>(
        &self,
        total_notes: usize,
        rotation_index: usize,
        rng: &mut R,
    ) -> Vec<Notehead> {
        self.expand(total_notes, rotation_index, rng)
            .iter()
            .filter_map(Token::as_notehead)
            .collect()
    }

    /// Expanded articulations (empty unless this is an articulation program)
    pub fn articulations<R: Rng + ?Sized>(
        &self,
        total_notes: usize,
        rotation_index: usize,
        rng: &mut R,
    ) -> Vec<Articulation> {
        self.expand(total_notes, rotation_index, rng)
            .iter()
            .filter_map(|t| t.as_articulation().cloned())
            .collect()
    }
}

impl fmt::Display for PatternProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks: Vec<String> = self.blocks.iter().map(|b| b.to_string()).collect();
        write!(f, "[{}]", blocks.join(", "))
    }
}
