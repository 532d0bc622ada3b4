//! Blank-line suppression around statement-only template lines
//!
//! A line holding nothing but whitespace and one statement unit would
//! otherwise leave its padding in the literal output. For each such unit the
//! preceding literal is cut at the first newline of its trailing whitespace
//! and the following literal is cut back to the last newline of its leading
//! whitespace, so exactly one newline survives after the unit.
//!
//! Matches never overlap: whitespace consumed by one match is not available
//! to the next, so adjacent statement lines are trimmed independently.

use super::lexer::Unit;
use crate::source::ast::Spanned;

/// Whitespace as recognised between a newline and a code unit
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Offset of the first newline in the trailing whitespace of `text[region]`
fn leading_cut(source: &str, region: std::ops::Range<usize>) -> Option<usize> {
    let text = source.get(region.clone())?;
    let body = text.trim_end_matches(is_space);
    let run = &text[body.len()..];
    run.find('\n').map(|nl| region.start + body.len() + nl)
}

/// Offset of the last newline in the leading whitespace of `text[region]`
fn trailing_cut(source: &str, region: std::ops::Range<usize>) -> Option<usize> {
    let text = source.get(region.clone())?;
    let rest = text.trim_start_matches(is_space);
    let run = &text[..text.len() - rest.len()];
    run.rfind('\n').map(|nl| region.start + nl)
}

/// Collapse the padding around statement-only lines and drop emptied literals
pub fn suppress_blank_lines(source: &str, mut units: Vec<Spanned<Unit>>) -> Vec<Spanned<Unit>> {
    // Text before this offset has been consumed by an earlier match
    let mut floor = 0;

    for k in 1..units.len().saturating_sub(1) {
        if !matches!(units[k].node, Unit::Code { output: false, .. }) {
            continue;
        }
        if units[k - 1].node != Unit::Text || units[k + 1].node != Unit::Text {
            continue;
        }

        let before = &units[k - 1].span;
        let after = &units[k + 1].span;
        let Some(cut) = leading_cut(source, before.start.max(floor)..before.end) else {
            continue;
        };
        let Some(keep) = trailing_cut(source, after.clone()) else {
            continue;
        };

        units[k - 1].span.end = cut;
        units[k + 1].span.start = keep;
        floor = keep + 1;
    }

    units.retain(|unit| unit.node != Unit::Text || !unit.span.is_empty());
    units
}
