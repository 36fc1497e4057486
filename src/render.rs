//! Solution-to-text renderer (§6: renderer).
//!
//! Each interior cell's stub mask selects one of sixteen Unicode
//! box-drawing characters; cells are separated by the edge character that
//! joins them (`─` horizontally, `│` vertically) when a pipe crosses that
//! edge, or a space otherwise. Output is bounded: [`render_into`] writes into
//! a caller-supplied buffer and reports [`RenderOverflow`] rather than
//! growing without limit.

use crate::board::Solution;
use crate::error::RenderOverflow;
use crate::shape;

/// Maps a 4-bit stub mask to its box-drawing glyph. Index is
/// `north | east<<1 | south<<2 | west<<3`, matching [`shape::ShapeCode`].
const GLYPHS: [char; 16] = [
    ' ', '╵', '╶', '╰', '╷', '│', '╭', '├', '╴', '╯', '─', '┴', '╮', '┤', '┬', '┼',
];

fn glyph(mask: shape::ShapeCode) -> char {
    GLYPHS[(mask & 0xf) as usize]
}

/// Renders `solution` as a multi-line string of box-drawing characters.
///
/// Horizontal neighbours are joined by a single column (`─` if the edge
/// carries a pipe, space otherwise); vertical neighbours by a single row
/// (`│` or space). Trailing whitespace is trimmed from every line, and
/// wholly blank trailing lines are dropped, so an all-empty solution renders
/// as the empty string.
pub fn render(solution: &Solution) -> String {
    let rows = solution.interior_rows();
    let cols = solution.interior_cols();
    let mut lines = Vec::with_capacity(rows);

    for row in 0..rows {
        let mut line = String::new();
        for col in 0..cols {
            line.push(glyph(solution.stub_mask(row, col)));
            if col + 1 < cols {
                line.push(if solution.horizontal_edge(row, col) {
                    '─'
                } else {
                    ' '
                });
            }
        }
        lines.push(line.trim_end().to_string());

        if row + 1 < rows {
            let mut connector = String::new();
            for col in 0..cols {
                connector.push(if solution.vertical_edge(row, col) {
                    '│'
                } else {
                    ' '
                });
                if col + 1 < cols {
                    connector.push(' ');
                }
            }
            lines.push(connector.trim_end().to_string());
        }
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Renders `solution` into `buffer`, returning the number of bytes written.
///
/// Fails with [`RenderOverflow`] instead of growing past `buffer`'s capacity,
/// for callers that render into a fixed-size or memory-mapped destination.
pub fn render_into(solution: &Solution, buffer: &mut [u8]) -> Result<usize, RenderOverflow> {
    let rendered = render(solution);
    let needed = rendered.len();
    if needed > buffer.len() {
        return Err(RenderOverflow {
            needed,
            capacity: buffer.len(),
        });
    }
    buffer[..needed].copy_from_slice(rendered.as_bytes());
    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::solver::solve_all;

    #[test]
    fn empty_board_renders_to_the_empty_string() {
        let solutions = solve_all(&Board::EMPTY, None);
        assert_eq!(render(&solutions[0]), "");
    }

    #[test]
    fn a_single_dead_end_pair_renders_its_connecting_stub() {
        let mut board = Board::blank(4, 3);
        board.set_interior(1, 1, shape::DEAD_END);
        board.set_interior(2, 1, shape::DEAD_END);
        let solutions = solve_all(&board, None);
        assert_eq!(solutions.len(), 1);
        let rendered = render(&solutions[0]);
        assert_eq!(rendered, "╷\n│\n╵");
    }

    #[test]
    fn render_into_reports_overflow_for_a_too_small_buffer() {
        let mut board = Board::blank(4, 3);
        board.set_interior(1, 1, shape::DEAD_END);
        board.set_interior(2, 1, shape::DEAD_END);
        let solutions = solve_all(&board, None);
        let mut tiny = [0u8; 1];
        let err = render_into(&solutions[0], &mut tiny).unwrap_err();
        assert_eq!(err.capacity, 1);
        assert!(err.needed > 1);
    }

    #[test]
    fn render_into_succeeds_with_a_sufficiently_large_buffer() {
        let mut board = Board::blank(4, 3);
        board.set_interior(1, 1, shape::DEAD_END);
        board.set_interior(2, 1, shape::DEAD_END);
        let solutions = solve_all(&board, None);
        let mut buffer = [0u8; 64];
        let written = render_into(&solutions[0], &mut buffer).unwrap();
        assert_eq!(&buffer[..written], render(&solutions[0]).as_bytes());
    }

    #[test]
    fn a_tight_2x2_corner_loop_renders_as_a_single_closed_box() {
        // Each corner's only orientation that avoids pointing a stub at the
        // empty border is forced by propagation alone, with no branching:
        // the four corners close into one loop.
        let mut board = Board::blank(4, 4);
        board.set_interior(1, 1, shape::CORNER);
        board.set_interior(1, 2, shape::CORNER);
        board.set_interior(2, 1, shape::CORNER);
        board.set_interior(2, 2, shape::CORNER);
        let solutions = solve_all(&board, None);
        assert_eq!(solutions.len(), 1);
        insta::assert_snapshot!(render(&solutions[0]), @"╭─╮\n│ │\n╰─╯");
    }

    #[test]
    fn glyph_table_agrees_with_the_named_shape_constants() {
        assert_eq!(glyph(shape::EMPTY), ' ');
        assert_eq!(glyph(shape::DEAD_END), '╵');
        assert_eq!(glyph(shape::CORNER), '╰');
        assert_eq!(glyph(shape::STRAIGHT), '│');
        assert_eq!(glyph(shape::T_JUNCTION), '├');
        assert_eq!(glyph(shape::CROSS), '┼');
    }
}
