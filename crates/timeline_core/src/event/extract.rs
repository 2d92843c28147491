//! Single-line event grammar: `[Start [- End] -] Name`.
//!
//! # Responsibility
//! - Split one outline line into optional date tokens and a name.
//! - Turn date-like tokens into `CalendarDate` values.
//!
//! # Invariants
//! - Name capture is unconditional; an empty line yields an empty name.
//! - A token is a date candidate only when its year part has at least four
//!   characters, so outline numbering such as `01 - Peace` is never a date.
//! - A candidate that fails to parse leaves that end without a date.

use crate::event::tree::{Event, ExplicitDates};
use crate::model::date::CalendarDate;
use crate::outline::node::OutlineNode;
use log::debug;

const MAX_TOKEN_CHARS: usize = 15;
const MIN_YEAR_CHARS: usize = 4;

/// Raw pieces of one event line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParts<'a> {
    pub start_token: Option<&'a str>,
    pub end_token: Option<&'a str>,
    pub name: &'a str,
}

/// Splits a line into date tokens and name.
///
/// Returns `None` only when the line spans several lines (embedded line
/// break), since a node line must be a single line of text.
pub fn split_line(line: &str) -> Option<LineParts<'_>> {
    let line = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line);
    if line.contains(['\n', '\r']) {
        return None;
    }
    let rest = line.trim_start();

    if let Some((start, after_start)) = scan_token(rest) {
        if let Some(after_separator) = scan_separator(after_start) {
            if let Some((end, after_end)) = scan_token(after_separator) {
                if let Some(name) = scan_separator(after_end) {
                    return Some(LineParts {
                        start_token: Some(start),
                        end_token: Some(end),
                        name,
                    });
                }
            }
            return Some(LineParts {
                start_token: Some(start),
                end_token: None,
                name: after_separator,
            });
        }
    }

    Some(LineParts {
        start_token: None,
        end_token: None,
        name: rest,
    })
}

/// Reads one outline node into a childless event.
///
/// Children of `node` are not visited; see `event::tree::read_event`.
pub fn extract(node: &OutlineNode) -> Option<Event> {
    let parts = split_line(node.content())?;
    let dates = ExplicitDates {
        start: parts.start_token.and_then(candidate_date),
        end: parts.end_token.and_then(candidate_date),
    };
    Some(Event::new(parts.name, dates, Vec::new()).with_notes(node.notes.as_str()))
}

/// Parses a token as a date when its year part is long enough.
pub fn candidate_date(token: &str) -> Option<CalendarDate> {
    let year_chars = token.find('.').unwrap_or(token.len());
    if year_chars < MIN_YEAR_CHARS {
        return None;
    }
    match CalendarDate::try_parse(token) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!("event=date_parse module=event status=skipped token={token} reason={err}");
            None
        }
    }
}

// Token: optional leading minus, then digits, dots and parentheses.
fn scan_token(input: &str) -> Option<(&str, &str)> {
    let sign = usize::from(input.starts_with('-'));
    let body = input[sign..]
        .find(|c: char| !is_token_char(c))
        .unwrap_or(input.len() - sign);
    if body == 0 || sign + body > MAX_TOKEN_CHARS {
        return None;
    }
    Some(input.split_at(sign + body))
}

// Separator: a hyphen padded by optional spaces, tabs or underscores.
fn scan_separator(input: &str) -> Option<&str> {
    input
        .trim_start_matches(is_padding)
        .strip_prefix('-')
        .map(|rest| rest.trim_start_matches(is_padding))
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '(' | ')')
}

fn is_padding(c: char) -> bool {
    matches!(c, ' ' | '\t' | '_')
}
