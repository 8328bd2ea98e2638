//! Row, pattern and output commands

use crate::commands::{CommandContext, CommandResult};
use crate::display;
use colored::*;
use serialist_core::analysis::analyze_rotations;
use serialist_core::{
    Axis, DurationSource, NoteheadSource, OutputMode, Row, RowSource, ScoreAssembler,
};

/// Handle `row random` command
pub fn cmd_row_random(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.row_source = RowSource::Random;
    ctx.row = None;
    match ctx.prime_row() {
        Ok(row) => CommandResult::Message(format!("Row: {}", row.to_string().cyan())),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `row fixed <pcs..>` command
pub fn cmd_row_fixed(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let values: Result<Vec<i64>, _> = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|s| s.trim_matches(|c| c == '[' || c == ']'))
        .filter(|s| !s.is_empty())
        .map(str::parse::<i64>)
        .collect();

    let values = match values {
        Ok(values) => values,
        Err(_) => return CommandResult::Error("Usage: row fixed <pitch classes 0-11..>".to_string()),
    };

    match Row::new(values) {
        Ok(row) => {
            ctx.row_length = row.len();
            ctx.row_source = RowSource::Fixed(row.clone());
            ctx.row = Some(row.clone());
            CommandResult::Message(format!("Row: {}", row.to_string().cyan()))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `row` / `row show` command
pub fn cmd_row_show(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if !args.is_empty() {
        return CommandResult::Error("Usage: row <random|fixed <pcs..>|show>".to_string());
    }
    match ctx.prime_row() {
        Ok(row) => {
            display::print_row_forms(&row);
            CommandResult::Success
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `durations <pattern|fixed|random>` command
pub fn cmd_durations(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let source = match args {
        "" => return CommandResult::Message(format!("Durations: {}", describe_durations(ctx))),
        "fixed" => DurationSource::Fixed,
        "random" => DurationSource::Random,
        pattern => match ctx.parse_pattern(pattern, Axis::Duration) {
            Ok(program) => DurationSource::Pattern(program),
            Err(e) => return CommandResult::Error(e.to_string()),
        },
    };
    ctx.durations = source;
    CommandResult::Message(format!("Durations: {}", describe_durations(ctx).bright_green()))
}

/// Handle `noteheads <pattern|standard|serial|random>` command
pub fn cmd_noteheads(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let source = match args {
        "" => return CommandResult::Message(format!("Noteheads: {}", describe_noteheads(ctx))),
        "standard" => NoteheadSource::Standard,
        "serial" => NoteheadSource::Serial,
        "random" => NoteheadSource::Random,
        pattern => match ctx.parse_pattern(pattern, Axis::Notehead) {
            Ok(program) => NoteheadSource::Pattern(program),
            Err(e) => return CommandResult::Error(e.to_string()),
        },
    };
    ctx.noteheads = source;
    CommandResult::Message(format!("Noteheads: {}", describe_noteheads(ctx).bright_green()))
}

/// Handle `articulations <pattern|off>` command
pub fn cmd_articulations(args: &str, ctx: &mut CommandContext) -> CommandResult {
    match args {
        "" => {}
        "off" => ctx.articulations = None,
        pattern => match ctx.parse_pattern(pattern, Axis::Articulation) {
            Ok(program) => ctx.articulations = Some(program),
            Err(e) => return CommandResult::Error(e.to_string()),
        },
    }
    let current = match &ctx.articulations {
        Some(program) => program.to_string(),
        None => "off".to_string(),
    };
    CommandResult::Message(format!("Articulations: {}", current))
}

/// Handle `expand <axis> <pattern> [n] [rotation]` command
pub fn cmd_expand(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let usage = "Usage: expand <duration|notehead|articulation> <pattern> [n] [rotation]";
    let Some((axis_name, rest)) = args.split_once(char::is_whitespace) else {
        return CommandResult::Error(usage.to_string());
    };
    let Some(axis) = Axis::from_name(axis_name) else {
        return CommandResult::Error(format!("Unknown axis '{}'. {}", axis_name, usage));
    };

    let (pattern, numbers) = split_trailing_numbers(rest.trim());
    let total = numbers.first().copied().unwrap_or(ctx.row_length);
    let rotation = numbers.get(1).copied().unwrap_or(0);

    let program = match ctx.parse_pattern(pattern, axis) {
        Ok(program) => program,
        Err(e) => return CommandResult::Error(e.to_string()),
    };
    let tokens = program.expand(total, rotation, &mut ctx.rng);
    display::print_tokens(&program, &tokens, rotation);
    CommandResult::Success
}

/// Handle `rotations [pitches|percussion|both]` command
pub fn cmd_rotations(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let mode = match args {
        "" => OutputMode::Pitches,
        name => match OutputMode::from_name(name) {
            Some(OutputMode::Serial) | None => {
                return CommandResult::Error(
                    "Usage: rotations [pitches|percussion|both]".to_string(),
                )
            }
            Some(mode) => mode,
        },
    };
    print_score(ctx, mode)
}

/// Handle `serial` command
pub fn cmd_serial(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    print_score(ctx, OutputMode::Serial)
}

/// Handle `analyze` command
pub fn cmd_analyze(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.prime_row() {
        Ok(row) => {
            display::print_analysis(&row, &analyze_rotations(&row));
            CommandResult::Success
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn print_score(ctx: &mut CommandContext, mode: OutputMode) -> CommandResult {
    let row = match ctx.prime_row() {
        Ok(row) => row,
        Err(e) => return CommandResult::Error(e.to_string()),
    };
    let builder = ctx.event_builder();
    let score = ScoreAssembler::new(&ctx.config, &builder).assemble(&row, mode, &mut ctx.rng);
    display::print_score(&score);
    CommandResult::Success
}

fn describe_durations(ctx: &CommandContext) -> String {
    match &ctx.durations {
        DurationSource::Fixed => format!(
            "fixed {}",
            serialist_core::types::duration::to_pair_string(&ctx.config.default_duration)
        ),
        DurationSource::Random => "random".to_string(),
        DurationSource::Pattern(program) => program.to_string(),
    }
}

fn describe_noteheads(ctx: &CommandContext) -> String {
    match &ctx.noteheads {
        NoteheadSource::Standard => "standard".to_string(),
        NoteheadSource::Serial => "serial".to_string(),
        NoteheadSource::Random => "random".to_string(),
        NoteheadSource::Pattern(program) => program.to_string(),
    }
}

/// Split up to two whitespace-separated counts off the end of `input`
fn split_trailing_numbers(input: &str) -> (&str, Vec<usize>) {
    let mut rest = input;
    let mut numbers = Vec::new();
    for _ in 0..2 {
        let Some((head, last)) = rest.rsplit_once(char::is_whitespace) else {
            break;
        };
        match last.parse::<usize>() {
            Ok(n) => {
                numbers.push(n);
                rest = head.trim_end();
            }
            Err(_) => break,
        }
    }
    numbers.reverse();
    (rest, numbers)
}
