//! General REPL commands (help, quit, seed, length, config)

use crate::commands::{
    create_registry, CommandContext, CommandGroup, CommandRegistry, CommandResult,
};
use crate::display;
use colored::*;
use serialist_core::AcceptancePolicy;

/// Longest row the REPL will try to generate
const MAX_ROW_LENGTH: usize = 48;

/// Handle `help [command]` command
pub fn cmd_help(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    let registry = create_registry();
    if args.is_empty() {
        print_help(&registry);
        return CommandResult::Success;
    }
    match registry.lookup(args) {
        Some((entry, _)) => CommandResult::Message(format!(
            "{}  - {}",
            entry.usage.cyan(),
            entry.summary
        )),
        None => CommandResult::Error(format!("No command named '{}'", args)),
    }
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `seed [n]` command
pub fn cmd_seed(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Current seed: {}", ctx.seed));
    }

    match args.parse::<u64>() {
        Ok(seed) => {
            ctx.reseed(seed);
            CommandResult::Message(format!("Seed set to {}", seed).bright_green().to_string())
        }
        Err(_) => CommandResult::Error(format!("Invalid seed '{}'", args)),
    }
}

/// Handle `length [n]` command
pub fn cmd_length(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Current row length: {}", ctx.row_length));
    }

    match args.parse::<usize>() {
        Ok(n) if (1..=MAX_ROW_LENGTH).contains(&n) => {
            ctx.row_length = n;
            // A random row is regenerated at the new length; a fixed one is cut
            if let Some(row) = &ctx.row {
                if row.len() < n {
                    ctx.row = None;
                }
            }
            CommandResult::Message(
                format!("Row length set to {}", n).bright_green().to_string(),
            )
        }
        _ => CommandResult::Error(format!(
            "Invalid length. Use a value between 1-{}",
            MAX_ROW_LENGTH
        )),
    }
}

/// Handle `config [key value..]` command
///
/// Without arguments prints the current settings. Keys: `policy`,
/// `intervals`, `forbidden`, `budget`, `beams`, `noteheads`.
pub fn cmd_config(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let mut parts = args.split_whitespace();
    let Some(key) = parts.next() else {
        display::print_config(&ctx.config);
        return CommandResult::Success;
    };
    let values: Vec<&str> = parts.collect();

    let config = ctx.config.clone();
    let updated = match key {
        "policy" => match values.first().copied() {
            Some("strict") => Ok(config.with_acceptance(AcceptancePolicy::Strict)),
            Some("lenient") => Ok(config.with_acceptance(AcceptancePolicy::Lenient)),
            _ => Err("Usage: config policy <strict|lenient>".to_string()),
        },
        "intervals" => parse_numbers::<u8>(&values)
            .map(|ivs| config.with_allowed_intervals(ivs))
            .ok_or_else(|| "Usage: config intervals <n..>".to_string()),
        "forbidden" => parse_numbers::<u8>(&values)
            .map(|ivs| config.with_forbidden_intervals(ivs))
            .ok_or_else(|| "Usage: config forbidden <n..>".to_string()),
        "budget" => match parse_numbers::<usize>(&values).as_deref() {
            Some([retries, attempts]) if *retries > 0 && *attempts > 0 => {
                Ok(config.with_budget(*retries, *attempts))
            }
            _ => Err("Usage: config budget <retries> <attempts>".to_string()),
        },
        "beams" => match parse_numbers::<usize>(&values).as_deref() {
            Some([min, max]) => Ok(config.with_beam_groups(*min, *max)),
            _ => Err("Usage: config beams <min> <max>".to_string()),
        },
        "noteheads" => {
            let shapes: Option<Vec<_>> = values
                .iter()
                .map(|v| serialist_core::Notehead::from_name(v.trim_matches(',')))
                .collect();
            match shapes {
                Some(shapes) if !shapes.is_empty() => Ok(config.with_notehead_shapes(shapes)),
                _ => Err("Usage: config noteheads <shape..>".to_string()),
            }
        }
        other => Err(format!("Unknown config key '{}'", other)),
    };

    match updated {
        Ok(config) => {
            ctx.config = config;
            CommandResult::Message(format!("Updated {}", key).bright_green().to_string())
        }
        Err(e) => CommandResult::Error(e),
    }
}

/// Parse every value as a number; `None` if any fails or none are given
fn parse_numbers<T: std::str::FromStr>(values: &[&str]) -> Option<Vec<T>> {
    if values.is_empty() {
        return None;
    }
    values
        .iter()
        .map(|v| v.trim_matches(',').parse().ok())
        .collect()
}

/// Print help information
fn print_help(registry: &CommandRegistry) {
    println!("{}", "Serialist Help".bold());
    println!("{}", "==============".bold());
    println!();
    for group in CommandGroup::ALL {
        let entries = registry.group_entries(group);
        if entries.is_empty() {
            continue;
        }
        println!("{}", format!("{}:", group.title()).green());
        let width = entries.iter().map(|e| e.usage.len()).max().unwrap_or(0);
        for entry in entries {
            println!(
                "  {}  - {}",
                format!("{:<width$}", entry.usage).cyan(),
                entry.summary
            );
        }
        match group {
            CommandGroup::Patterns => {
                println!(
                    "  syntax: {}",
                    "[fixed=[8]x2, random=[rest=(1,4),16]x3, rotate=[rest,4]x2]".cyan()
                );
                println!(
                    "  modes: fixed, random, rotate, none    \
                     items: 8, (3,16), rest, rest=8, r16, itemxK"
                );
            }
            CommandGroup::Settings => {
                println!("  keys: policy <strict|lenient>, intervals <n..>, forbidden <n..>,");
                println!("        budget <retries> <attempts>, beams <min> <max>, noteheads <shape..>");
            }
            _ => {}
        }
        println!();
    }
}
