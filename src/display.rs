//! Terminal output for rows, expanded patterns, scores and analyses

use colored::*;
use serialist_core::analysis::{interval_set, RotationComparison};
use serialist_core::pattern::Token;
use serialist_core::score::Score;
use serialist_core::types::duration::to_pair_string;
use serialist_core::types::pitch::note_name;
use serialist_core::{GenerationConfig, PatternProgram, Row};

/// Print a row with its inversion, retrograde-inversion and intervals
pub fn print_row_forms(row: &Row) {
    let names: Vec<&str> = row.pitches().iter().map(|&pc| note_name(pc)).collect();
    println!("{} {}  {}", "P: ".green(), row.to_string().cyan(), names.join(" ").bright_black());
    println!("{} {}", "I: ".green(), row.invert().to_string().cyan());
    println!("{} {}", "RI:".green(), row.retrograde_inversion().to_string().cyan());
    println!("{} {:?}", "intervals:".bright_black(), row.intervals());
}

/// Print one expansion of a pattern program
pub fn print_tokens(program: &PatternProgram, tokens: &[Token], rotation: usize) {
    println!(
        "{} {} (rotation {})",
        program.axis().to_string().green(),
        program.to_string().bright_black(),
        rotation
    );
    if tokens.is_empty() {
        println!("  {}", "(empty)".bright_black());
        return;
    }
    let items: Vec<String> = tokens
        .iter()
        .map(|t| match t.as_duration_slot() {
            Some(slot) if slot.is_rest() => format!("r{}", to_pair_string(&slot.duration()))
                .bright_black()
                .to_string(),
            Some(slot) => to_pair_string(&slot.duration()).cyan().to_string(),
            None => t.to_string().cyan().to_string(),
        })
        .collect();
    println!("  [{}]", items.join(", "));
}

/// Print every staff of a score, then the chord staff if present
pub fn print_score(score: &Score) {
    println!(
        "{} {} {}",
        "Score".bold(),
        score.mode.name().green(),
        score.row.to_string().cyan()
    );
    for staff in &score.staves {
        println!("{}", staff);
    }
    if let Some(chords) = &score.chords {
        println!("{}", chords.to_string().magenta());
    }
}

/// Print a rotation analysis report
pub fn print_analysis(row: &Row, report: &[RotationComparison]) {
    println!(
        "{} {}  interval set {:?}",
        "Rotation 0:".bold(),
        row.to_string().cyan(),
        interval_set(row)
    );
    if report.is_empty() {
        println!("  {}", "(no other rotations)".bright_black());
    }
    for comparison in report {
        let line = comparison.to_string();
        if comparison.interval_similarity >= 1.0 {
            println!("  {}", line.green());
        } else {
            println!("  {}", line);
        }
    }
}

/// Print the generation settings
pub fn print_config(config: &GenerationConfig) {
    println!("{}", "Settings".bold());
    println!("  {:<20} {:?}", "policy", config.acceptance);
    println!("  {:<20} {:?}", "allowed intervals", config.allowed_intervals);
    println!("  {:<20} {:?}", "forbidden intervals", config.forbidden_intervals);
    println!(
        "  {:<20} {} retries x {} attempts",
        "budget", config.max_retries, config.max_attempts
    );
    let shapes: Vec<&str> = config.notehead_shapes.iter().map(|h| h.name()).collect();
    println!("  {:<20} {}", "notehead shapes", shapes.join(", "));
    println!(
        "  {:<20} {}",
        "default duration",
        to_pair_string(&config.default_duration)
    );
    println!(
        "  {:<20} {}..={}",
        "beam groups", config.min_beam_groups, config.max_beam_groups
    );
}
