//! Text notation shared with move providers.
//!
//! Agents see the grid as one labelled line per row and answer in free
//! form; [`parse_move`] digs a `(row, col)` pair out of whatever they say.

use super::action::Move;
use super::types::{Grid, Square};
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// Renders the grid for a prompt.
///
/// One line per row, each cell as `(row,col) <mark-or-blank>`, cells
/// separated by `|`:
///
/// ```text
/// Row 0: (0,0) X | (0,1)   | (0,2) O
/// ```
pub fn describe_board(grid: &Grid) -> String {
    grid.rows()
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(c, sq)| {
                    let symbol = match sq {
                        Square::Empty => " ".to_string(),
                        Square::Occupied(mark) => mark.to_string(),
                    };
                    format!("({},{}) {}", r, c, symbol)
                })
                .collect();
            format!("Row {}: {}", r, cells.join(" | "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A response with no recognisable move in it.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Could not find a move in response: {response:?}")]
pub struct ParseFailure {
    /// The raw response text.
    pub response: String,
}

/// Extracts a move from free-form text.
///
/// Takes the first `digit , digit` pair (whitespace allowed around the
/// comma). Failing that, takes the first two runs of digits anywhere in the
/// text. Indices are not range-checked here; that is the referee's job.
///
/// Only ASCII `0-9` count as digits. Other Unicode decimal digits, such as
/// Arabic-Indic or full-width ones, are plain text here.
///
/// # Errors
///
/// Returns [`ParseFailure`] when the text holds fewer than two numbers.
#[instrument]
pub fn parse_move(response: &str) -> Result<Move, ParseFailure> {
    let text = response.trim();

    if let Some(mv) = comma_pair(text) {
        debug!(%mv, "Parsed comma-separated move");
        return Ok(mv);
    }

    let mut numbers = digit_runs(text);
    match (numbers.next(), numbers.next()) {
        (Some(row), Some(col)) => {
            let mv = Move::new(row, col);
            debug!(%mv, "Parsed move from loose numbers");
            Ok(mv)
        }
        _ => Err(ParseFailure {
            response: response.to_string(),
        }),
    }
}

/// Finds the first single digit, optional spaces, comma, optional spaces,
/// single digit.
fn comma_pair(text: &str) -> Option<Move> {
    let chars: Vec<char> = text.chars().collect();
    for (start, first) in chars.iter().enumerate() {
        let Some(row) = first.to_digit(10) else {
            continue;
        };
        let mut i = start + 1;
        while chars.get(i).is_some_and(|c| c.is_whitespace()) {
            i += 1;
        }
        if chars.get(i) != Some(&',') {
            continue;
        }
        i += 1;
        while chars.get(i).is_some_and(|c| c.is_whitespace()) {
            i += 1;
        }
        if let Some(col) = chars.get(i).and_then(|c| c.to_digit(10)) {
            return Some(Move::new(row as usize, col as usize));
        }
    }
    None
}

/// Yields every maximal run of ASCII digits as a number.
///
/// Runs too long for `usize` saturate, which still lands out of bounds.
fn digit_runs(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<usize>().unwrap_or(usize::MAX))
}
