//! Recursive-descent parser for the pattern language.
//!
//! ```text
//! program := "["? block ("," block)* "]"?
//! block   := mode "=" ( "[" items? "]" | item ) ( "x" count )?
//! items   := item ("," item)*
//! item    := base ( "x" K )?
//! ```
//!
//! Parsing is lenient below the program level: a malformed block is skipped
//! and a malformed duration item becomes a quarter note, both with a warning.
//! Only a program with no usable block at all is an error.

use super::program::PatternProgram;
use super::token::{Axis, Mode, PatternBlock, RestDuration, Token};
use crate::error::PatternError;
use crate::types::duration::{note_value, quarter, try_duration, Duration};
use crate::types::{Articulation, Notehead};
use log::{debug, warn};
use std::iter::Peekable;
use std::str::Chars;

type Cursor<'a> = Peekable<Chars<'a>>;

/// Upper bound on inline `xK` copies of a single item
pub const MAX_ITEM_COPIES: usize = 1024;

/// Parse a whole program for one axis.
///
/// `shapes` is the set of noteheads the notehead axis accepts; other axes
/// ignore it.
pub fn parse_program(
    input: &str,
    axis: Axis,
    shapes: &[Notehead],
) -> Result<PatternProgram, PatternError> {
    let body = strip_outer_brackets(input.trim());
    let mut blocks = Vec::new();

    for segment in split_top_level(body) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match parse_block(segment, axis, shapes) {
            Ok(Some(block)) => blocks.push(block),
            Ok(None) => {}
            Err(reason) => warn!("Skipping malformed {} block '{}': {}", axis, segment, reason),
        }
    }

    if blocks.is_empty() {
        return Err(PatternError::EmptyProgram {
            axis,
            input: input.to_string(),
        });
    }

    debug!("Parsed {} program with {} block(s)", axis, blocks.len());
    Ok(PatternProgram::from_blocks(axis, blocks))
}

/// Parse one `mode=[items]xN` segment. `Ok(None)` means the block is valid
/// but carries nothing for this axis.
fn parse_block(
    segment: &str,
    axis: Axis,
    shapes: &[Notehead],
) -> Result<Option<PatternBlock>, String> {
    let mut chars = segment.chars().peekable();

    let mode_name = take_word(&mut chars);
    let mode =
        Mode::from_name(&mode_name).ok_or_else(|| format!("unknown mode '{}'", mode_name))?;

    skip_whitespace(&mut chars);
    if chars.next() != Some('=') {
        return Err(format!("expected '=' after '{}'", mode_name));
    }
    skip_whitespace(&mut chars);

    let (raw_items, repeat) = if chars.peek() == Some(&'[') {
        chars.next(); // consume '['
        let content = take_until_bracket(&mut chars)?;
        let repeat = parse_repeat(&mut chars)?;
        skip_whitespace(&mut chars);
        if let Some(c) = chars.next() {
            return Err(format!("unexpected '{}' after block", c));
        }
        (content, repeat)
    } else {
        // Shorthand: `fixed=staccato`
        let single: String = chars.collect();
        if single.trim().is_empty() {
            return Err("missing items".to_string());
        }
        (single, None)
    };

    if mode == Mode::None {
        let sentinel = match axis {
            Axis::Articulation => Token::Articulation(Articulation::None),
            Axis::Notehead => Token::Notehead(Notehead::Default),
            Axis::Duration => {
                warn!("'none' block has no meaning for durations, skipping");
                return Ok(None);
            }
        };
        return Ok(Some(PatternBlock::new(mode, vec![sentinel], repeat)));
    }

    let mut items = Vec::new();
    for raw in split_top_level(&raw_items) {
        parse_item(raw, axis, shapes, &mut items);
    }
    if items.is_empty() {
        debug!("{} block '{}' has no usable items", axis, segment);
    }

    Ok(Some(PatternBlock::new(mode, items, repeat)))
}

/// Optional `xN` suffix after a closing bracket
fn parse_repeat(chars: &mut Cursor) -> Result<Option<usize>, String> {
    skip_whitespace(chars);
    if chars.peek() != Some(&'x') {
        return Ok(None);
    }
    chars.next(); // consume 'x'

    let digits = take_digits(chars);
    if digits.is_empty() {
        return Err("expected number after 'x'".to_string());
    }
    let count: usize = digits
        .parse()
        .map_err(|_| format!("repeat count '{}' is too large", digits))?;
    if count == 0 {
        return Err("repeat count x0 is not allowed".to_string());
    }
    Ok(Some(count))
}

/// Parse one item (with its inline `xK`) and push its copies onto `out`
fn parse_item(raw: &str, axis: Axis, shapes: &[Notehead], out: &mut Vec<Token>) {
    let raw = raw.trim();
    if raw.is_empty() {
        return;
    }

    let (base, copies) = split_repetition(raw);
    let token = match axis {
        Axis::Duration => Some(parse_duration_item(base)),
        Axis::Notehead => parse_notehead_item(base, shapes),
        Axis::Articulation => Articulation::parse(base).map(Token::Articulation),
    };

    if copies == 0 {
        warn!("Item '{}' repeated x0, dropping it", raw);
        return;
    }
    let copies = if copies > MAX_ITEM_COPIES {
        warn!("Item '{}' repeated x{}, capping at {}", raw, copies, MAX_ITEM_COPIES);
        MAX_ITEM_COPIES
    } else {
        copies
    };
    if let Some(token) = token {
        out.extend(std::iter::repeat(token).take(copies));
    }
}

/// Split `base xK` into the base text and its copy count (1 when absent)
fn split_repetition(raw: &str) -> (&str, usize) {
    if let Some(pos) = raw.rfind('x') {
        let base = raw[..pos].trim_end();
        let count = &raw[pos + 1..];
        if !base.is_empty() && is_digits(count) {
            if let Ok(n) = count.parse() {
                return (base, n);
            }
        }
    }
    (raw, 1)
}

fn parse_duration_item(text: &str) -> Token {
    match try_parse_duration_item(text) {
        Some(token) => token,
        None => {
            warn!("Unrecognized duration item '{}', using (1, 4)", text);
            Token::Duration(quarter())
        }
    }
}

fn try_parse_duration_item(text: &str) -> Option<Token> {
    if let Some((key, value)) = text.split_once('=') {
        if key.trim() != "rest" {
            return None;
        }
        return parse_length(value.trim()).map(|d| Token::Rest(RestDuration::Explicit(d)));
    }
    if text == "rest" {
        return Some(Token::Rest(RestDuration::Previous));
    }
    // LilyPond-style rest: r4, r16
    if let Some(denominator) = text.strip_prefix('r') {
        if is_digits(denominator) {
            let d = note_value(denominator.parse().ok()?)?;
            return Some(Token::Rest(RestDuration::Explicit(d)));
        }
    }
    parse_length(text).map(Token::Duration)
}

/// `(n, d)` or a bare denominator
fn parse_length(text: &str) -> Option<Duration> {
    if text.starts_with('(') {
        let inner = text.strip_prefix('(')?.strip_suffix(')')?;
        let (n, d) = inner.split_once(',')?;
        try_duration(n.trim().parse().ok()?, d.trim().parse().ok()?)
    } else if is_digits(text) {
        note_value(text.parse().ok()?)
    } else {
        None
    }
}

fn parse_notehead_item(text: &str, shapes: &[Notehead]) -> Option<Token> {
    match Notehead::from_name(text) {
        Some(head) if shapes.contains(&head) => Some(Token::Notehead(head)),
        _ => {
            warn!("Dropping notehead '{}': not an allowed shape", text);
            None
        }
    }
}

/// Remove one pair of brackets wrapping the whole program
fn strip_outer_brackets(s: &str) -> &str {
    if !s.starts_with('[') || !s.ends_with(']') {
        return s;
    }
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    // Only strip when the opening bracket closes at the very end
                    return if i == s.len() - 1 { &s[1..i] } else { s };
                }
            }
            _ => {}
        }
    }
    s
}

/// Split on commas that are not nested in brackets or parentheses
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            // A stray closer must not hide later top-level commas
            ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Take content until the matching ']', handling nested brackets
fn take_until_bracket(chars: &mut Cursor) -> Result<String, String> {
    let mut content = String::new();
    let mut depth = 1;

    for c in chars.by_ref() {
        match c {
            '[' => {
                depth += 1;
                content.push(c);
            }
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(content);
                }
                content.push(c);
            }
            _ => content.push(c),
        }
    }

    Err("unclosed bracket".to_string())
}

fn take_word(chars: &mut Cursor) -> String {
    skip_whitespace(chars);
    let mut word = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphabetic() {
            word.push(c);
            chars.next();
        } else {
            break;
        }
    }
    word
}

fn take_digits(chars: &mut Cursor) -> String {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(c);
            chars.next();
        } else {
            break;
        }
    }
    digits
}

fn skip_whitespace(chars: &mut Cursor) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
