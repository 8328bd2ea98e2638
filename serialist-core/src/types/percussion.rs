//! Percussion voices for the drum-kit rendering of a row
//!
//! Folds the twelve pitch classes onto a small kit. Several classes share a
//! drum, so percussion staves repeat sounds where the pitched staves do not.

use std::fmt;

/// A drum in the percussion mapping
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PercussionVoice {
    BassDrum,
    Snare,
    HighTom,
    MidTom,
    FloorTom,
    Ride,
    Crash,
}

impl PercussionVoice {
    /// The drum a pitch class is played on
    pub fn for_pitch_class(pc: u8) -> Self {
        match pc % 12 {
            0 => PercussionVoice::BassDrum,
            1 => PercussionVoice::Snare,
            2 | 5 | 10 => PercussionVoice::HighTom,
            3 | 6 | 11 => PercussionVoice::MidTom,
            4 | 7 => PercussionVoice::FloorTom,
            8 => PercussionVoice::Ride,
            _ => PercussionVoice::Crash,
        }
    }

    /// Where the voice sits on a five-line percussion staff
    pub fn staff_position(&self) -> &'static str {
        match self {
            PercussionVoice::BassDrum => "g",
            PercussionVoice::Snare => "d'",
            PercussionVoice::HighTom => "f'",
            PercussionVoice::MidTom => "e'",
            PercussionVoice::FloorTom => "b",
            PercussionVoice::Ride => "g'",
            PercussionVoice::Crash => "b'",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            PercussionVoice::BassDrum => "bd",
            PercussionVoice::Snare => "snare",
            PercussionVoice::HighTom => "ht",
            PercussionVoice::MidTom => "mt",
            PercussionVoice::FloorTom => "ft",
            PercussionVoice::Ride => "ride",
            PercussionVoice::Crash => "crash",
        }
    }
}

impl fmt::Display for PercussionVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_mapping() {
        assert_eq!(PercussionVoice::for_pitch_class(0), PercussionVoice::BassDrum);
        assert_eq!(PercussionVoice::for_pitch_class(1), PercussionVoice::Snare);
        assert_eq!(PercussionVoice::for_pitch_class(5), PercussionVoice::HighTom);
        assert_eq!(PercussionVoice::for_pitch_class(7), PercussionVoice::FloorTom);
        assert_eq!(PercussionVoice::for_pitch_class(8), PercussionVoice::Ride);
        assert_eq!(PercussionVoice::for_pitch_class(9), PercussionVoice::Crash);
        assert_eq!(PercussionVoice::for_pitch_class(11), PercussionVoice::MidTom);
    }

    #[test]
    fn test_staff_positions() {
        assert_eq!(PercussionVoice::for_pitch_class(0).staff_position(), "g");
        assert_eq!(PercussionVoice::for_pitch_class(10).staff_position(), "f'");
        assert_eq!(PercussionVoice::Crash.staff_position(), "b'");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PercussionVoice::Crash), "crash");
    }
}
