//! Text-to-board parser (§6: input parser).
//!
//! Walks the input byte by byte, advancing a cursor over interior
//! coordinates: a recognized piece character places a shape and steps the
//! column, a space steps the column without placing anything, and a newline
//! resets the column and steps the row. Everything else is either skipped
//! (permissive, the default) or rejected (`--strict`).

use crate::board::{Board, MAX_AXIS};
use crate::error::ParseError;
use crate::shape::{self, ShapeCode};

/// Maximum legal interior coordinate along either axis (`MAX_AXIS - 2`).
const MAX_INTERIOR: usize = MAX_AXIS - 2;

fn classify(ch: char) -> Option<ShapeCode> {
    match ch {
        '1' => Some(shape::DEAD_END),
        'C' => Some(shape::CORNER),
        'S' => Some(shape::STRAIGHT),
        '3' => Some(shape::T_JUNCTION),
        '4' => Some(shape::CROSS),
        _ => None,
    }
}

/// Parses `text` into a [`Board`], permissively: any character outside the
/// recognized piece set and the two cursor-control characters (space,
/// newline) is silently skipped, contributing nothing to the cursor.
pub fn parse(text: &str) -> Result<Board, ParseError> {
    parse_with(text, false)
}

/// Parses `text` into a [`Board`] in strict mode: any character outside the
/// recognized piece set, space, and newline is rejected as
/// [`ParseError::UnrecognizedChar`].
pub fn parse_strict(text: &str) -> Result<Board, ParseError> {
    parse_with(text, true)
}

fn parse_with(text: &str, strict: bool) -> Result<Board, ParseError> {
    let mut row = 1usize;
    let mut col = 1usize;
    let mut placements = Vec::new();
    let mut max_row = 1usize;
    let mut max_col = 1usize;

    for ch in text.chars() {
        match ch {
            '\n' => {
                row += 1;
                col = 1;
                continue;
            }
            ' ' | '\t' | '\r' => {
                col += 1;
                continue;
            }
            _ => {}
        }

        match classify(ch) {
            Some(shape) => {
                if row > MAX_INTERIOR || col > MAX_INTERIOR {
                    return Err(ParseError::Oversized {
                        row,
                        col,
                        max: MAX_INTERIOR,
                    });
                }
                placements.push((row, col, shape));
                max_row = max_row.max(row);
                max_col = max_col.max(col);
                col += 1;
            }
            None => {
                if strict {
                    return Err(ParseError::UnrecognizedChar(ch));
                }
                // Permissive mode: truly ignored, not even a cursor step.
            }
        }
    }

    if placements.is_empty() {
        return Ok(Board::EMPTY);
    }

    let mut board = Board::blank(max_row + 2, max_col + 2);
    for (row, col, shape) in placements {
        board.set_interior(row, col, shape);
    }
    Ok(board)
}
