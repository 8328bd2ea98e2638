// serialist-core/src/types/mod.rs

pub mod duration;
pub mod event;
pub mod percussion;
pub mod pitch;
pub mod row;

pub use duration::Duration;
pub use event::{Articulation, ChordEvent, DurationSlot, NoteEvent, Notehead};
pub use percussion::PercussionVoice;
pub use pitch::{PitchClass, PitchMap};
pub use row::Row;
