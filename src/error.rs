//! Typed errors for the external-facing parser and renderer boundaries.
//!
//! Propagation failures inside the solver are not represented here: a
//! contradiction is a local, silent pruning signal (see `solver::Contradiction`)
//! and never crosses the public API.

use thiserror::Error;

/// Failure to parse puzzle input text into a [`crate::board::Board`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A piece would land outside the `MAX_AXIS - 2` interior square.
    #[error("piece at row {row}, column {col} falls outside the {max}x{max} interior")]
    Oversized { row: usize, col: usize, max: usize },
    /// Strict mode only: a character outside the recognized set was found.
    #[error("unrecognized character {0:?} in strict mode")]
    UnrecognizedChar(char),
}

/// The rendered solution would not fit in the renderer's bounded buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rendered output needs {needed} bytes but the buffer holds {capacity}")]
pub struct RenderOverflow {
    pub needed: usize,
    pub capacity: usize,
}
