//! Expansion of a parsed program into a sequence of exactly N tokens.

use super::program::PatternProgram;
use super::token::{Mode, PatternBlock, Token};
use log::trace;
use rand::Rng;

/// Expand `program` into `total_notes` tokens for the staff at
/// `rotation_index`.
///
/// Blocks are expanded in order and concatenated into a plan. A plan shorter
/// than `total_notes` is cycled, a longer one truncated, so the result always
/// has exactly `total_notes` entries unless the plan is empty (every block
/// degenerate) or `total_notes` is zero, in which case it is empty.
pub fn expand<R: Rng + ?Sized>(
    program: &PatternProgram,
    total_notes: usize,
    rotation_index: usize,
    rng: &mut R,
) -> Vec<Token> {
    if total_notes == 0 {
        return Vec::new();
    }

    let mut plan = Vec::new();
    for block in program.blocks() {
        let start = plan.len();
        plan.extend(expand_block(block, total_notes, rotation_index, rng));
        trace!(
            "{} block {} added items {}..{}",
            program.axis(),
            block.mode.name(),
            start,
            plan.len()
        );
    }

    if plan.is_empty() {
        return plan;
    }

    plan.iter().cycle().take(total_notes).cloned().collect()
}

/// Expand a single block. Bare rests are resolved against the block's own
/// raw items before any cycling. Output is capped at `total_notes`, the most
/// any block can contribute before the plan is truncated.
fn expand_block<R: Rng + ?Sized>(
    block: &PatternBlock,
    total_notes: usize,
    rotation_index: usize,
    rng: &mut R,
) -> Vec<Token> {
    let mut items = block.resolved_items();
    if items.is_empty() {
        return items;
    }

    match block.mode {
        Mode::Random => {
            let count = block.repeat.unwrap_or(total_notes).min(total_notes);
            (0..count)
                .map(|_| items[rng.gen_range(0..items.len())].clone())
                .collect()
        }
        Mode::Rotate => {
            let offset = rotation_index % items.len();
            items.rotate_left(offset);
            cycle_items(&items, block.repeat, total_notes)
        }
        Mode::Fixed | Mode::None => cycle_items(&items, block.repeat, total_notes),
    }
}

/// With a repeat count N: N full passes. Without one: a single pass.
fn cycle_items(items: &[Token], repeat: Option<usize>, limit: usize) -> Vec<Token> {
    let count = match repeat {
        Some(n) => n.saturating_mul(items.len()),
        None => items.len(),
    };
    items.iter().cycle().take(count.min(limit)).cloned().collect()
}
