//! Pitch classes and their spellings

use super::percussion::PercussionVoice;

/// One of the twelve equal-tempered tones, octave-agnostic (0 = C)
pub type PitchClass = u8;

/// Number of pitch classes in the octave
pub const PITCH_CLASSES: u8 = 12;

/// Note names with a mix of sharps and flats, indexed by pitch class
const NOTE_NAMES: [&str; 12] = [
    "c", "db", "d", "eb", "e", "f", "f#", "g", "ab", "a", "bb", "b",
];

/// Note names with the octave mark used on a treble staff
const STAFF_NAMES: [&str; 12] = [
    "c'", "db'", "d'", "eb'", "e'", "f'", "f#'", "g'", "ab'", "a'", "bb'", "b'",
];

/// Bare note name for a pitch class (`"f#"`)
pub fn note_name(pc: PitchClass) -> &'static str {
    NOTE_NAMES[(pc % PITCH_CLASSES) as usize]
}

/// Interval from `from` up to `to`, mod 12
#[inline]
pub fn interval_between(from: PitchClass, to: PitchClass) -> u8 {
    ((to as i16 - from as i16).rem_euclid(PITCH_CLASSES as i16)) as u8
}

/// The complementary interval (`12 - i`, with 0 mapping to 0)
#[inline]
pub fn complement(interval: u8) -> u8 {
    (PITCH_CLASSES - interval % PITCH_CLASSES) % PITCH_CLASSES
}

/// How pitch classes are placed on a staff
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PitchMap {
    /// One staff position per pitch class around middle C
    #[default]
    Chromatic,
    /// Pitch classes folded onto a drum kit
    Percussion,
}

impl PitchMap {
    /// Staff spelling for a pitch class under this map
    pub fn spell(&self, pc: PitchClass) -> &'static str {
        match self {
            PitchMap::Chromatic => STAFF_NAMES[(pc % PITCH_CLASSES) as usize],
            PitchMap::Percussion => PercussionVoice::for_pitch_class(pc).staff_position(),
        }
    }
}
