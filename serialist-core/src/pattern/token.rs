//! Tokens and blocks of the pattern language.

use crate::types::duration::{quarter, to_pattern_string, Duration};
use crate::types::{Articulation, DurationSlot, Notehead};
use std::fmt;

/// The attribute stream a program drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Duration,
    Notehead,
    Articulation,
}

impl Axis {
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Duration => "duration",
            Axis::Notehead => "notehead",
            Axis::Articulation => "articulation",
        }
    }

    /// Parse an axis name (plural forms accepted)
    pub fn from_name(s: &str) -> Option<Axis> {
        match s.to_lowercase().as_str() {
            "duration" | "durations" | "d" => Some(Axis::Duration),
            "notehead" | "noteheads" | "n" => Some(Axis::Notehead),
            "articulation" | "articulations" | "a" => Some(Axis::Articulation),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a block turns its items into a sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Items in order; cycled when a repeat count is given
    Fixed,
    /// Independent uniform choice per emitted token
    Random,
    /// Items rotated by the rotation index, then as `Fixed`
    Rotate,
    /// Only the axis's neutral token
    None,
}

impl Mode {
    pub fn from_name(s: &str) -> Option<Mode> {
        match s {
            "fixed" => Some(Mode::Fixed),
            "random" => Some(Mode::Random),
            "rotate" => Some(Mode::Rotate),
            "none" => Some(Mode::None),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Fixed => "fixed",
            Mode::Random => "random",
            Mode::Rotate => "rotate",
            Mode::None => "none",
        }
    }
}

/// Length of a rest as written
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestDuration {
    /// `rest=(1,4)`, `rest=8` or `r16`
    Explicit(Duration),
    /// Bare `rest`: reuse the previous item's length in the same block
    Previous,
}

/// A single parsed item
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    Duration(Duration),
    Rest(RestDuration),
    Notehead(Notehead),
    Articulation(Articulation),
}

impl Token {
    /// The duration slot for duration-axis tokens
    ///
    /// A `Rest(Previous)` that was never resolved falls back to a quarter.
    pub fn as_duration_slot(&self) -> Option<DurationSlot> {
        match self {
            Token::Duration(d) => Some(DurationSlot::Note(*d)),
            Token::Rest(RestDuration::Explicit(d)) => Some(DurationSlot::Rest(*d)),
            Token::Rest(RestDuration::Previous) => Some(DurationSlot::Rest(quarter())),
            _ => None,
        }
    }

    pub fn as_notehead(&self) -> Option<Notehead> {
        match self {
            Token::Notehead(head) => Some(*head),
            _ => None,
        }
    }

    pub fn as_articulation(&self) -> Option<&Articulation> {
        match self {
            Token::Articulation(a) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Duration(d) => write!(f, "{}", to_pattern_string(d)),
            Token::Rest(RestDuration::Explicit(d)) => write!(f, "rest={}", to_pattern_string(d)),
            Token::Rest(RestDuration::Previous) => write!(f, "rest"),
            Token::Notehead(head) => write!(f, "{}", head),
            Token::Articulation(a) => write!(f, "{}", a),
        }
    }
}

/// One `mode=[items]xN` clause
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternBlock {
    pub mode: Mode,
    /// Items after inline `xK` expansion; may be empty (a degenerate block)
    pub items: Vec<Token>,
    /// Block repeat count (`xN`), always positive when present
    pub repeat: Option<usize>,
}

impl PatternBlock {
    pub fn new(mode: Mode, items: Vec<Token>, repeat: Option<usize>) -> Self {
        PatternBlock {
            mode,
            items,
            repeat,
        }
    }

    /// True when the block contributes nothing on expansion
    pub fn is_degenerate(&self) -> bool {
        self.items.is_empty()
    }

    /// Items with every bare `rest` replaced by the length of the item
    /// before it in this block (a quarter when it opens the block)
    pub fn resolved_items(&self) -> Vec<Token> {
        let mut previous = quarter();
        self.items
            .iter()
            .map(|token| match token {
                Token::Duration(d) | Token::Rest(RestDuration::Explicit(d)) => {
                    previous = *d;
                    token.clone()
                }
                Token::Rest(RestDuration::Previous) => {
                    Token::Rest(RestDuration::Explicit(previous))
                }
                other => other.clone(),
            })
            .collect()
    }
}

impl fmt::Display for PatternBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.items.iter().map(|t| t.to_string()).collect();
        write!(f, "{}=[{}]", self.mode.name(), items.join(","))?;
        if let Some(n) = self.repeat {
            write!(f, "x{}", n)?;
        }
        Ok(())
    }
}
