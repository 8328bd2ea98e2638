use serialist_core::analysis::analyze_rotations;
use serialist_core::config::seeded_rng;
use serialist_core::generator::satisfies_interval_rules;
use serialist_core::score::{generate_score, Clef};
use serialist_core::types::duration::duration;
use serialist_core::{
    Axis, DurationSource, GenerationConfig, GenerationError, NoteEventBuilder, NoteheadSource,
    OutputMode, PatternProgram, Row, RowGenerator, RowSource, ScoreError,
};

fn reference_row() -> Row {
    Row::new([4u8, 3, 7, 5, 11, 0, 9, 6, 10, 8, 1, 2]).unwrap()
}

#[test]
fn test_generated_rows_obey_rules_for_every_length() {
    let config = GenerationConfig::default();
    let generator = RowGenerator::new(&config);
    let mut rng = seeded_rng(2024);

    for length in 1..=12 {
        match generator.generate(length, &mut rng) {
            Ok(row) => {
                assert_eq!(row.len(), length);
                assert!(satisfies_interval_rules(&row, &config.allowed_intervals));
                assert_eq!(row.pitch_class_set().len(), length);
            }
            Err(e) => assert!(matches!(e, GenerationError::Exhausted { .. })),
        }
    }
}

#[test]
fn test_row_transforms() {
    let row = Row::new([0u8, 2, 4]).unwrap();
    assert_eq!(row.invert().pitches(), &[0, 10, 8]);
    assert_eq!(row.invert().invert(), row);

    let row = reference_row();
    let mut reversed_inversion = row.invert().pitches().to_vec();
    reversed_inversion.reverse();
    assert_eq!(row.retrograde_inversion().pitches(), reversed_inversion.as_slice());

    for n in -5..15 {
        assert_eq!(row.rotate(n).transpose_to_start(row.first()).first(), row.first());
        assert_eq!(row.rotate(n).rotate(3), row.rotate(n + 3));
    }
}

#[test]
fn test_rotation_score_with_patterns() {
    let config = GenerationConfig::default();
    let durations = PatternProgram::parse("[fixed=[8]x2, rotate=[rest,4,16]]", Axis::Duration)
        .unwrap();
    let noteheads = PatternProgram::parse("[rotate=[cross, diamond, default]]", Axis::Notehead)
        .unwrap();
    let articulations =
        PatternProgram::parse("[fixed=[accent], none=[]x2]", Axis::Articulation).unwrap();
    let builder = NoteEventBuilder::new(&config)
        .with_durations(DurationSource::Pattern(durations))
        .with_noteheads(NoteheadSource::Pattern(noteheads))
        .with_articulations(articulations);

    let mut rng = seeded_rng(9);
    let score = generate_score(
        &config,
        &RowSource::Fixed(reference_row()),
        6,
        OutputMode::Pitches,
        &builder,
        &mut rng,
    )
    .unwrap();

    assert_eq!(score.staves.len(), 6);
    for staff in &score.staves {
        assert_eq!(staff.events.len(), 6);
        assert_eq!(staff.row.first(), 4);
        assert_eq!(staff.beaming.iter().sum::<usize>(), 6);
        assert!(staff.beaming.iter().all(|&g| g >= 2));
        // Rests carry nothing but their length
        for event in staff.events.iter().filter(|e| e.is_rest()) {
            assert!(event.notehead.is_none() && event.articulation.is_none());
        }
    }

    // Rotation 0: [8, 8, r4, 4, 16, 8]; a bare rest opening a block is a quarter
    let first = &score.staves[0].events;
    assert_eq!(first[0].duration, duration(1, 8));
    assert!(first[2].is_rest());
    assert_eq!(first[2].duration, duration(1, 4));
    assert_eq!(first[4].duration, duration(1, 16));
    assert_eq!(first[0].articulation.as_deref(), Some("accent"));
    assert_eq!(first[1].articulation, None);
}

#[test]
fn test_percussion_and_serial_modes() {
    let config = GenerationConfig::default();
    let builder = NoteEventBuilder::new(&config).with_noteheads(NoteheadSource::Serial);
    let mut rng = seeded_rng(10);

    let percussion = generate_score(
        &config,
        &RowSource::Fixed(reference_row()),
        12,
        OutputMode::Percussion,
        &builder,
        &mut rng,
    )
    .unwrap();
    assert!(percussion.staves.iter().all(|s| s.clef == Clef::Percussion));
    assert_eq!(percussion.staves[0].time_signature, (12, 8));

    let serial = generate_score(
        &config,
        &RowSource::Fixed(reference_row()),
        12,
        OutputMode::Serial,
        &builder,
        &mut rng,
    )
    .unwrap();
    assert_eq!(serial.staves.len(), 3);
    assert_eq!(serial.chords.map(|c| c.chords.len()), Some(8));
}

#[test]
fn test_staves_of_equal_length_are_beamed_differently() {
    let config = GenerationConfig::default();
    let builder = NoteEventBuilder::new(&config);
    let mut rng = seeded_rng(5);
    let row = Row::new([0u8, 1, 3, 2, 11, 9, 10, 6]).unwrap();
    let score = generate_score(
        &config,
        &RowSource::Fixed(row),
        8,
        OutputMode::Pitches,
        &builder,
        &mut rng,
    )
    .unwrap();

    // Eight notes in 3..=5 groups allow seven groupings: the first seven
    // staves use each once
    let groupings: std::collections::HashSet<_> =
        score.staves.iter().take(7).map(|s| s.beaming.clone()).collect();
    assert_eq!(groupings.len(), 7);
}

#[test]
fn test_random_row_score_is_replayable() {
    let config = GenerationConfig::default();
    let builder = NoteEventBuilder::new(&config)
        .with_durations(DurationSource::Random)
        .with_noteheads(NoteheadSource::Random);

    let run = |seed| {
        generate_score(
            &config,
            &RowSource::Random,
            7,
            OutputMode::Both,
            &builder,
            &mut seeded_rng(seed),
        )
    };
    assert_eq!(run(31), run(31));
}

#[test]
fn test_exhausted_generation_surfaces_as_score_error() {
    let config = GenerationConfig::default()
        .with_allowed_intervals(Vec::<u8>::new())
        .with_budget(1, 10);
    let builder = NoteEventBuilder::new(&config);
    let result = generate_score(
        &config,
        &RowSource::Random,
        4,
        OutputMode::Pitches,
        &builder,
        &mut seeded_rng(1),
    );
    assert!(matches!(
        result,
        Err(ScoreError::Generation(GenerationError::Exhausted { .. }))
    ));
}

#[test]
fn test_rotation_analysis_of_reference_row() {
    let report = analyze_rotations(&reference_row());
    assert_eq!(report.len(), 11);
    assert!(report.iter().all(|r| r.pitch_class_overlap == 12));
}
