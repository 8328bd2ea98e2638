//! Note events and the attributes attached to them.

use super::duration::{to_pattern_string, Duration};
use super::pitch::PitchClass;
use std::fmt;

/// Notehead shapes a renderer can draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notehead {
    /// The ordinary notehead (no override)
    Default,
    Cross,
    Triangle,
    Diamond,
    Slash,
    Rectangle,
    Circle,
    XCircle,
    Harmonic,
    HarmonicBlack,
}

impl Notehead {
    /// Every known shape, in display order
    pub const ALL: [Notehead; 10] = [
        Notehead::Default,
        Notehead::Cross,
        Notehead::Triangle,
        Notehead::Diamond,
        Notehead::Slash,
        Notehead::Rectangle,
        Notehead::Circle,
        Notehead::XCircle,
        Notehead::Harmonic,
        Notehead::HarmonicBlack,
    ];

    /// Parse a shape from its name (case-insensitive)
    pub fn from_name(s: &str) -> Option<Notehead> {
        match s.to_lowercase().as_str() {
            "default" => Some(Notehead::Default),
            "cross" => Some(Notehead::Cross),
            "triangle" => Some(Notehead::Triangle),
            "diamond" => Some(Notehead::Diamond),
            "slash" => Some(Notehead::Slash),
            "rectangle" => Some(Notehead::Rectangle),
            "circle" => Some(Notehead::Circle),
            "xcircle" => Some(Notehead::XCircle),
            "harmonic" => Some(Notehead::Harmonic),
            "harmonic-black" => Some(Notehead::HarmonicBlack),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Notehead::Default => "default",
            Notehead::Cross => "cross",
            Notehead::Triangle => "triangle",
            Notehead::Diamond => "diamond",
            Notehead::Slash => "slash",
            Notehead::Rectangle => "rectangle",
            Notehead::Circle => "circle",
            Notehead::XCircle => "xcircle",
            Notehead::Harmonic => "harmonic",
            Notehead::HarmonicBlack => "harmonic-black",
        }
    }

    /// `None` for the default shape, which needs no override
    pub fn as_override(self) -> Option<Notehead> {
        match self {
            Notehead::Default => None,
            other => Some(other),
        }
    }
}

impl fmt::Display for Notehead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An articulation mark, or the explicit "no articulation" sentinel
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Articulation {
    None,
    Named(String),
}

impl Articulation {
    /// Parse an articulation item. Leading backslashes are stripped and
    /// `none` is the sentinel; blank text gives `None` (no item at all).
    pub fn parse(s: &str) -> Option<Articulation> {
        let name = s.trim().trim_start_matches('\\').trim();
        if name.is_empty() {
            return None;
        }
        if name.eq_ignore_ascii_case("none") {
            return Some(Articulation::None);
        }
        Some(Articulation::Named(name.to_string()))
    }

    /// The mark to attach, if any
    pub fn mark(&self) -> Option<&str> {
        match self {
            Articulation::None => None,
            Articulation::Named(name) => Some(name.as_str()),
        }
    }
}

impl fmt::Display for Articulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Articulation::None => write!(f, "none"),
            Articulation::Named(name) => write!(f, "{}", name),
        }
    }
}

/// One position of an expanded duration sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DurationSlot {
    Note(Duration),
    Rest(Duration),
}

impl DurationSlot {
    pub fn duration(&self) -> Duration {
        match self {
            DurationSlot::Note(d) | DurationSlot::Rest(d) => *d,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, DurationSlot::Rest(_))
    }
}

impl fmt::Display for DurationSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationSlot::Note(d) => write!(f, "{}", to_pattern_string(d)),
            DurationSlot::Rest(d) => write!(f, "r{}", to_pattern_string(d)),
        }
    }
}

/// A single note or rest handed to the renderer
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteEvent {
    /// Pitch class of the note (`None` for a rest)
    pub pitch: Option<PitchClass>,
    /// Exact length as a fraction of a whole note
    pub duration: Duration,
    /// Shape override (`None` draws the ordinary notehead)
    pub notehead: Option<Notehead>,
    /// Articulation mark, if any
    pub articulation: Option<String>,
}

impl NoteEvent {
    pub fn note(pitch: PitchClass, duration: Duration) -> Self {
        NoteEvent {
            pitch: Some(pitch),
            duration,
            notehead: None,
            articulation: None,
        }
    }

    pub fn rest(duration: Duration) -> Self {
        NoteEvent {
            pitch: None,
            duration,
            notehead: None,
            articulation: None,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.pitch.is_none()
    }
}

impl fmt::Display for NoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let length = to_pattern_string(&self.duration);
        match self.pitch {
            None => write!(f, "r{}", length),
            Some(pc) => {
                write!(f, "{}:{}", pc, length)?;
                if let Some(head) = self.notehead {
                    write!(f, "<{}>", head)?;
                }
                if let Some(mark) = &self.articulation {
                    write!(f, "-{}", mark)?;
                }
                Ok(())
            }
        }
    }
}

/// A stack of pitch classes sounding together (serial chord staff)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordEvent {
    pub pitches: Vec<PitchClass>,
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::duration::duration;

    #[test]
    fn test_notehead_names_roundtrip() {
        for head in Notehead::ALL {
            assert_eq!(Notehead::from_name(head.name()), Some(head));
        }
        assert_eq!(Notehead::from_name("HARMONIC-BLACK"), Some(Notehead::HarmonicBlack));
        assert_eq!(Notehead::from_name("blob"), None);
    }

    #[test]
    fn test_default_notehead_has_no_override() {
        assert_eq!(Notehead::Default.as_override(), None);
        assert_eq!(Notehead::Cross.as_override(), Some(Notehead::Cross));
    }

    #[test]
    fn test_articulation_parse() {
        assert_eq!(
            Articulation::parse("\\staccato"),
            Some(Articulation::Named("staccato".to_string()))
        );
        assert_eq!(Articulation::parse("\\none"), Some(Articulation::None));
        assert_eq!(Articulation::parse(" none "), Some(Articulation::None));
        assert_eq!(Articulation::parse("  "), None);
        assert_eq!(Articulation::None.mark(), None);
    }

    #[test]
    fn test_event_display() {
        let mut e = NoteEvent::note(7, duration(1, 8));
        e.notehead = Some(Notehead::Diamond);
        e.articulation = Some("accent".to_string());
        assert_eq!(format!("{}", e), "7:8<diamond>-accent");
        assert_eq!(format!("{}", NoteEvent::rest(duration(3, 16))), "r(3, 16)");
    }

    #[test]
    fn test_duration_slot() {
        let slot = DurationSlot::Rest(duration(1, 16));
        assert!(slot.is_rest());
        assert_eq!(slot.duration(), duration(1, 16));
        assert_eq!(format!("{}", slot), "r16");
    }
}
