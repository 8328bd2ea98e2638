//! Score assembly for the output modes
//!
//! A score is an ordered list of staves. Rotation modes produce one staff
//! per rotation of the prime row, each transposed back to the prime's first
//! pitch; the serial mode produces the prime, its inversion and its
//! retrograde-inversion plus a staff of tetrachord chords. All staves of a
//! score draw their beam groupings from one shared selector.

use crate::beaming::{BeamGrouping, BeamGroupingSelector};
use crate::builder::NoteEventBuilder;
use crate::config::GenerationConfig;
use crate::error::{GenerationError, ScoreError};
use crate::generator::{RowGenerator, RowSource};
use crate::types::{ChordEvent, NoteEvent, PitchMap, Row};
use log::info;
use rand::Rng;
use std::fmt;

#[cfg(feature = "colored")]
use colored::*;

/// Which staves a score contains
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputMode {
    /// Rotation staves on a treble staff
    #[default]
    Pitches,
    /// Rotation staves mapped onto a drum kit
    Percussion,
    /// Pitched rotations followed by percussion rotations
    Both,
    /// Prime, inversion, retrograde-inversion and tetrachord chords
    Serial,
}

impl OutputMode {
    pub fn from_name(s: &str) -> Option<OutputMode> {
        match s.to_lowercase().as_str() {
            "pitches" | "pitch" => Some(OutputMode::Pitches),
            "percussion" | "drums" => Some(OutputMode::Percussion),
            "both" => Some(OutputMode::Both),
            "serial" => Some(OutputMode::Serial),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputMode::Pitches => "pitches",
            OutputMode::Percussion => "percussion",
            OutputMode::Both => "both",
            OutputMode::Serial => "serial",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Clef {
    Treble,
    Percussion,
}

/// One line of notes with its beaming
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Staff {
    pub label: String,
    pub clef: Clef,
    /// (beats, beat unit): the row length over 4, or over 8 for percussion
    pub time_signature: (usize, usize),
    pub pitch_map: PitchMap,
    /// The row the staff was built from
    pub row: Row,
    pub events: Vec<NoteEvent>,
    pub beaming: BeamGrouping,
}

impl Staff {
    /// Spelled notes of the staff, `r` for rests
    pub fn spelled(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| match e.pitch {
                Some(pc) => self.pitch_map.spell(pc).to_string(),
                None => "r".to_string(),
            })
            .collect()
    }

    /// Events split by the beam grouping
    pub fn beamed_groups(&self) -> Vec<&[NoteEvent]> {
        crate::beaming::spans(&self.beaming)
            .into_iter()
            .filter(|span| span.end <= self.events.len())
            .map(|span| &self.events[span])
            .collect()
    }
}

/// The serial mode's chord line
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordStaff {
    pub chords: Vec<ChordEvent>,
    pub beaming: BeamGrouping,
}

/// Everything a renderer needs for one run
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    pub mode: OutputMode,
    /// The prime row every staff derives from
    pub row: Row,
    pub staves: Vec<Staff>,
    pub chords: Option<ChordStaff>,
}

/// The rotation staves' rows: rotation `i` transposed to start on the
/// prime's first pitch class
pub fn rotation_rows(row: &Row) -> Vec<Row> {
    (0..row.len())
        .map(|i| row.rotate(i as i64).transpose_to_start(row.first()))
        .collect()
}

/// Assembles scores for one run
pub struct ScoreAssembler<'a> {
    builder: &'a NoteEventBuilder,
    selector: BeamGroupingSelector,
}

impl<'a> ScoreAssembler<'a> {
    pub fn new(config: &GenerationConfig, builder: &'a NoteEventBuilder) -> Self {
        ScoreAssembler {
            builder,
            selector: BeamGroupingSelector::new(config.min_beam_groups, config.max_beam_groups),
        }
    }

    /// Build the score of `mode` for a prime row
    pub fn assemble<R: Rng + ?Sized>(&mut self, row: &Row, mode: OutputMode, rng: &mut R) -> Score {
        let mut staves = Vec::new();
        let mut chords = None;

        match mode {
            OutputMode::Pitches => self.push_rotations(&mut staves, row, false, rng),
            OutputMode::Percussion => self.push_rotations(&mut staves, row, true, rng),
            OutputMode::Both => {
                self.push_rotations(&mut staves, row, false, rng);
                self.push_rotations(&mut staves, row, true, rng);
            }
            OutputMode::Serial => {
                let forms = [
                    ("P", row.clone()),
                    ("I", row.invert()),
                    ("RI", row.retrograde_inversion()),
                ];
                for (label, form) in forms {
                    staves.push(self.staff(label.to_string(), form, row, 0, false, rng));
                }
                chords = Some(self.chord_staff(row, rng));
            }
        }

        info!("Assembled {} score with {} staves", mode.name(), staves.len());
        Score {
            mode,
            row: row.clone(),
            staves,
            chords,
        }
    }

    fn push_rotations<R: Rng + ?Sized>(
        &mut self,
        staves: &mut Vec<Staff>,
        row: &Row,
        percussion: bool,
        rng: &mut R,
    ) {
        for (i, rotated) in rotation_rows(row).into_iter().enumerate() {
            let label = if percussion {
                format!("Perc {}", i)
            } else {
                format!("Rot {}", i)
            };
            staves.push(self.staff(label, rotated, row, i, percussion, rng));
        }
    }

    fn staff<R: Rng + ?Sized>(
        &mut self,
        label: String,
        staff_row: Row,
        prime: &Row,
        rotation_index: usize,
        percussion: bool,
        rng: &mut R,
    ) -> Staff {
        let events = self.builder.build(&staff_row, prime, rotation_index, rng);
        let beaming = self.selector.select(events.len(), rng);
        let (clef, unit, pitch_map) = if percussion {
            (Clef::Percussion, 8, PitchMap::Percussion)
        } else {
            (Clef::Treble, 4, PitchMap::Chromatic)
        };

        Staff {
            label,
            clef,
            time_signature: (staff_row.len(), unit),
            pitch_map,
            row: staff_row,
            events,
            beaming,
        }
    }

    fn chord_staff<R: Rng + ?Sized>(&mut self, row: &Row, rng: &mut R) -> ChordStaff {
        let duration = self.builder.first_duration(rng);
        let chords: Vec<ChordEvent> = row
            .tetrachords()
            .into_iter()
            .chain(row.invert().tetrachords())
            .map(|pitches| ChordEvent { pitches, duration })
            .collect();
        let beaming = self.selector.select(chords.len(), rng);
        ChordStaff { chords, beaming }
    }
}

/// Resolve the prime row and assemble a score in one step.
///
/// A fixed row longer than `row_length` is cut to `row_length`.
pub fn generate_score<R: Rng + ?Sized>(
    config: &GenerationConfig,
    source: &RowSource,
    row_length: usize,
    mode: OutputMode,
    builder: &NoteEventBuilder,
    rng: &mut R,
) -> Result<Score, ScoreError> {
    if row_length == 0 {
        return Err(GenerationError::InvalidLength.into());
    }
    let row = RowGenerator::new(config).resolve(source, row_length, rng)?;
    let row = row.truncate(row_length);
    Ok(ScoreAssembler::new(config, builder).assemble(&row, mode, rng))
}

#[cfg(feature = "colored")]
impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self
            .beamed_groups()
            .iter()
            .map(|group| {
                let notes: Vec<String> = group
                    .iter()
                    .map(|e| {
                        if e.is_rest() {
                            e.to_string().bright_black().to_string()
                        } else {
                            e.to_string().cyan().to_string()
                        }
                    })
                    .collect();
                format!("[{}]", notes.join(" "))
            })
            .collect();
        write!(
            f,
            "{} {} {}",
            format!("{:>8}", self.label).yellow().bold(),
            format!("{}/{}", self.time_signature.0, self.time_signature.1).bright_black(),
            groups.join(" ")
        )
    }
}

#[cfg(not(feature = "colored"))]
impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self
            .beamed_groups()
            .iter()
            .map(|group| {
                let notes: Vec<String> = group.iter().map(|e| e.to_string()).collect();
                format!("[{}]", notes.join(" "))
            })
            .collect();
        write!(
            f,
            "{:>8} {}/{} {}",
            self.label,
            self.time_signature.0,
            self.time_signature.1,
            groups.join(" ")
        )
    }
}

impl fmt::Display for ChordStaff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chords: Vec<String> = self
            .chords
            .iter()
            .map(|c| {
                let pcs: Vec<String> = c.pitches.iter().map(|p| p.to_string()).collect();
                format!("<{}>", pcs.join(" "))
            })
            .collect();
        write!(f, "{:>8} {}", "Chords", chords.join(" "))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.mode.name(), self.row)?;
        for staff in &self.staves {
            writeln!(f, "{}", staff)?;
        }
        if let Some(chords) = &self.chords {
            writeln!(f, "{}", chords)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::seeded_rng;
    use crate::types::duration::quarter;

    fn reference_row() -> Row {
        Row::new([4u8, 3, 7, 5, 11, 0, 9, 6, 10, 8, 1, 2]).unwrap()
    }

    #[test]
    fn test_rotation_rows_start_on_prime() {
        let row = reference_row();
        let rows = rotation_rows(&row);
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0], row);
        assert!(rows.iter().all(|r| r.first() == 4));
    }

    #[test]
    fn test_pitches_mode() {
        let config = GenerationConfig::default();
        let builder = NoteEventBuilder::new(&config);
        let mut rng = seeded_rng(1);
        let score = ScoreAssembler::new(&config, &builder).assemble(
            &reference_row(),
            OutputMode::Pitches,
            &mut rng,
        );

        assert_eq!(score.staves.len(), 12);
        assert!(score.chords.is_none());
        for staff in &score.staves {
            assert_eq!(staff.clef, Clef::Treble);
            assert_eq!(staff.time_signature, (12, 4));
            assert_eq!(staff.events.len(), 12);
            assert_eq!(staff.beaming.iter().sum::<usize>(), 12);
            assert!(staff.events.iter().all(|e| e.duration == quarter()));
        }
    }

    #[test]
    fn test_both_mode_orders_pitched_first() {
        let config = GenerationConfig::default();
        let builder = NoteEventBuilder::new(&config);
        let mut rng = seeded_rng(2);
        let row = Row::new([0u8, 1, 3, 6]).unwrap();
        let score = ScoreAssembler::new(&config, &builder).assemble(&row, OutputMode::Both, &mut rng);

        assert_eq!(score.staves.len(), 8);
        assert!(score.staves[..4].iter().all(|s| s.clef == Clef::Treble));
        assert!(score.staves[4..].iter().all(|s| s.clef == Clef::Percussion));
        assert_eq!(score.staves[4].time_signature, (4, 8));
        assert_eq!(score.staves[4].spelled()[0], "g");
    }

    #[test]
    fn test_serial_mode() {
        let config = GenerationConfig::default();
        let builder = NoteEventBuilder::new(&config);
        let mut rng = seeded_rng(3);
        let row = reference_row();
        let score = ScoreAssembler::new(&config, &builder).assemble(&row, OutputMode::Serial, &mut rng);

        let labels: Vec<&str> = score.staves.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["P", "I", "RI"]);
        assert_eq!(score.staves[1].row, row.invert());
        assert_eq!(score.staves[2].row, row.retrograde_inversion());

        let chords = score.chords.unwrap();
        // Four tetrachords from each of prime and inversion
        assert_eq!(chords.chords.len(), 8);
        assert_eq!(chords.chords[0].pitches, vec![4, 3, 7, 5]);
        assert_eq!(chords.chords[0].duration, quarter());
    }

    #[test]
    fn test_generate_score_truncates_fixed_rows() {
        let config = GenerationConfig::default();
        let builder = NoteEventBuilder::new(&config);
        let mut rng = seeded_rng(4);
        let score = generate_score(
            &config,
            &RowSource::Fixed(reference_row()),
            5,
            OutputMode::Pitches,
            &builder,
            &mut rng,
        )
        .unwrap();
        assert_eq!(score.row.pitches(), &[4, 3, 7, 5, 11]);
        assert_eq!(score.staves.len(), 5);
    }

    #[test]
    fn test_generate_score_rejects_zero_length() {
        let config = GenerationConfig::default();
        let builder = NoteEventBuilder::new(&config);
        let mut rng = seeded_rng(5);
        let result = generate_score(
            &config,
            &RowSource::Random,
            0,
            OutputMode::Pitches,
            &builder,
            &mut rng,
        );
        assert_eq!(result, Err(ScoreError::Generation(GenerationError::InvalidLength)));
    }
}
