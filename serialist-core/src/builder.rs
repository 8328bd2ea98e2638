//! Turning rows into note events
//!
//! A row supplies pitches; the three attribute axes supply a duration slot,
//! a notehead and an articulation for each position. The axes are expanded
//! once per staff so that `rotate` blocks follow the staff's rotation index.

use crate::config::GenerationConfig;
use crate::pattern::PatternProgram;
use crate::types::duration::Duration;
use crate::types::{Articulation, DurationSlot, NoteEvent, Notehead, Row};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// How each note's notehead is chosen
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum NoteheadSource {
    /// Ordinary noteheads throughout
    #[default]
    Standard,
    /// Noteheads from a pattern program
    Pattern(PatternProgram),
    /// Shape fixed per pitch by its position in the prime row
    Serial,
    /// Uniform choice over the configured shapes
    Random,
}

/// How each note's length is chosen
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DurationSource {
    /// The configured default duration for every note
    #[default]
    Fixed,
    /// Uniform choice over the configured duration palette
    Random,
    /// Duration slots (notes and rests) from a pattern program
    Pattern(PatternProgram),
}

/// Zip a row with already expanded attribute sequences.
///
/// Position `i` takes the row's i-th pitch, the i-th duration slot, the
/// i-th notehead (cycled) and the i-th articulation. A rest slot wins over
/// everything else: the event gets no pitch, notehead or articulation.
/// Missing duration slots fall back to `default_duration` and missing
/// articulations mean no mark.
pub fn zip_events(
    row: &Row,
    durations: &[DurationSlot],
    noteheads: &[Notehead],
    articulations: &[Articulation],
    default_duration: Duration,
) -> Vec<NoteEvent> {
    row.pitches()
        .iter()
        .enumerate()
        .map(|(i, &pitch)| {
            let slot = durations
                .get(i)
                .copied()
                .unwrap_or(DurationSlot::Note(default_duration));

            if slot.is_rest() {
                return NoteEvent::rest(slot.duration());
            }

            let mut event = NoteEvent::note(pitch, slot.duration());
            if !noteheads.is_empty() {
                event.notehead = noteheads[i % noteheads.len()].as_override();
            }
            event.articulation = articulations
                .get(i)
                .and_then(Articulation::mark)
                .map(str::to_string);
            event
        })
        .collect()
}

/// Builds the events of one staff from a row and the run's attribute sources
#[derive(Clone, Debug)]
pub struct NoteEventBuilder {
    durations: DurationSource,
    noteheads: NoteheadSource,
    articulations: Option<PatternProgram>,
    shapes: Vec<Notehead>,
    palette: Vec<Duration>,
    default_duration: Duration,
}

impl NoteEventBuilder {
    pub fn new(config: &GenerationConfig) -> Self {
        NoteEventBuilder {
            durations: DurationSource::Fixed,
            noteheads: NoteheadSource::Standard,
            articulations: None,
            shapes: config.notehead_shapes.clone(),
            palette: config.allowed_durations.clone(),
            default_duration: config.default_duration,
        }
    }

    pub fn with_durations(mut self, source: DurationSource) -> Self {
        self.durations = source;
        self
    }

    pub fn with_noteheads(mut self, source: NoteheadSource) -> Self {
        self.noteheads = source;
        self
    }

    pub fn with_articulations(mut self, program: PatternProgram) -> Self {
        self.articulations = Some(program);
        self
    }

    /// Events for `row`, the staff at `rotation_index` derived from `prime`
    pub fn build<R: Rng + ?Sized>(
        &self,
        row: &Row,
        prime: &Row,
        rotation_index: usize,
        rng: &mut R,
    ) -> Vec<NoteEvent> {
        let n = row.len();
        let durations = self.duration_slots(n, rotation_index, rng);
        let noteheads = self.notehead_sequence(row, prime, rotation_index, rng);
        let articulations = match &self.articulations {
            Some(program) => program.articulations(n, rotation_index, rng),
            None => Vec::new(),
        };

        debug!(
            "Staff {}: {} durations, {} noteheads, {} articulations",
            rotation_index,
            durations.len(),
            noteheads.len(),
            articulations.len()
        );

        zip_events(row, &durations, &noteheads, &articulations, self.default_duration)
    }

    /// Length used for chords and other events outside a row
    pub fn first_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        self.duration_slots(1, 0, rng)
            .first()
            .map_or(self.default_duration, DurationSlot::duration)
    }

    fn duration_slots<R: Rng + ?Sized>(
        &self,
        n: usize,
        rotation_index: usize,
        rng: &mut R,
    ) -> Vec<DurationSlot> {
        match &self.durations {
            DurationSource::Fixed => vec![DurationSlot::Note(self.default_duration); n],
            DurationSource::Random => (0..n)
                .map(|_| {
                    let d = self
                        .palette
                        .choose(rng)
                        .copied()
                        .unwrap_or(self.default_duration);
                    DurationSlot::Note(d)
                })
                .collect(),
            DurationSource::Pattern(program) => program.durations(n, rotation_index, rng),
        }
    }

    fn notehead_sequence<R: Rng + ?Sized>(
        &self,
        row: &Row,
        prime: &Row,
        rotation_index: usize,
        rng: &mut R,
    ) -> Vec<Notehead> {
        if self.shapes.is_empty() && !matches!(self.noteheads, NoteheadSource::Pattern(_)) {
            return Vec::new();
        }

        match &self.noteheads {
            NoteheadSource::Standard => Vec::new(),
            NoteheadSource::Pattern(program) => program.noteheads(row.len(), rotation_index, rng),
            NoteheadSource::Serial => row
                .pitches()
                .iter()
                .enumerate()
                .map(|(i, &pc)| {
                    // Pitches foreign to the prime fall back to their position
                    let index = prime.position(pc).unwrap_or(i);
                    self.shapes[index % self.shapes.len()]
                })
                .collect(),
            NoteheadSource::Random => (0..row.len())
                .filter_map(|_| self.shapes.choose(rng).copied())
                .collect(),
        }
    }
}
