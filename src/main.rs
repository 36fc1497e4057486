//! Infinite Loop Solver
//!
//! Reads a puzzle from standard input, solves it by constraint propagation
//! and backtracking search, and prints the rendered solution(s).

use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use infinity_loop::board::{Solution, MAX_AXIS};
use infinity_loop::{parser, render, solver};

/// Upper bound on a rendered solution's byte length for any board the
/// parser can produce: the widest/tallest possible interior (`MAX_AXIS - 2`
/// on each axis) fully rendered, with every glyph and connector column at
/// its full 3-byte UTF-8 width, plus one newline per line.
const RENDER_BUFFER_CAPACITY: usize = {
    let max_interior = MAX_AXIS - 2;
    let max_line_len = 2 * max_interior - 1;
    let max_lines = 2 * max_interior - 1;
    max_lines * (max_line_len * 3 + 1)
};

/// Solves the infinite-loop pipe-rotation puzzle read from standard input.
#[derive(Parser)]
#[command(name = "infinity-loop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Reject any character outside the recognized piece set instead of
    /// skipping it.
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print every solution found, separated by blank lines.
    Solve {
        /// Stop after collecting at most this many solutions.
        #[arg(long)]
        max: Option<usize>,
    },
    /// Print every solution found, then a trailing solution count.
    SolveCount {
        /// Stop after collecting at most this many solutions.
        #[arg(long)]
        max: Option<usize>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        eprintln!("failed to read standard input: {err}");
        return ExitCode::FAILURE;
    }

    let board = if cli.strict {
        parser::parse_strict(&input)
    } else {
        parser::parse(&input)
    };
    let board = match board {
        Ok(board) => board,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Command::Solve { max: Some(1) }) {
        Command::Solve { max } => {
            let solutions = solver::solve_all(&board, max);
            log::info!("found {} solution(s)", solutions.len());
            if print_solutions(&solutions) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Command::SolveCount { max } => {
            let solutions = solver::solve_all(&board, max);
            log::info!("found {} solution(s)", solutions.len());
            if !print_solutions(&solutions) {
                return ExitCode::FAILURE;
            }
            println!("Found {} solution(s)", solutions.len());
            ExitCode::SUCCESS
        }
    }
}

/// Prints every solution, separated by blank lines, routing each through
/// the bounded `render_into` so a render-buffer overflow is a real,
/// testable exit-code-1 path rather than the infallible `render::render`.
/// Returns `false` (render overflow reported on stderr) instead of an
/// `ExitCode` directly, since `ExitCode` has no equality comparison.
fn print_solutions(solutions: &[Solution]) -> bool {
    let mut buffer = [0u8; RENDER_BUFFER_CAPACITY];
    for (i, solution) in solutions.iter().enumerate() {
        match render::render_into(solution, &mut buffer) {
            Ok(len) => {
                if i > 0 {
                    println!();
                }
                let text = std::str::from_utf8(&buffer[..len])
                    .expect("render_into only ever writes the bytes of a valid UTF-8 string");
                println!("{text}");
            }
            Err(err) => {
                eprintln!("{err}");
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The spec's own 6x6 "three sub-loops" board is uniquely solvable; this
    /// checks the solver reaches the single fully-determined solution the
    /// CLI would print.
    #[test]
    fn solving_the_canonical_three_loop_board_yields_exactly_one_solution() {
        let board = parser::parse(
            "11  11 \nCC11CC \nC4SS4C \n 1  1 \nC3333C \n11CC11",
        )
        .unwrap();
        let solutions = solver::solve_all(&board, None);
        assert_eq!(solutions.len(), 1);
        assert!(!render::render(&solutions[0]).is_empty());
    }

    /// A 6x12 board built from six independent dead-end columns, one per
    /// even interior column, separated by empty odd columns. Every dead-end
    /// cell's east/west neighbour is a fixed-empty column, so it can only
    /// ever point north or south, and each column is then exactly the path
    /// graph on six vertices (with the border as the unmatched ends) — a
    /// path graph's perfect matching is unique, so every column resolves to
    /// the same top-down pairing (row 1 with row 2, row 3 with row 4, row 5
    /// with row 6) with no branching, and the whole board has exactly one
    /// solution.
    #[test]
    fn solving_a_6x12_board_of_independent_dead_end_columns_yields_exactly_one_solution() {
        let row = " 1 1 1 1 1 1";
        let input = [row; 6].join("\n");
        let board = parser::parse(&input).unwrap();
        assert_eq!(board.interior_rows(), 6);
        assert_eq!(board.interior_cols(), 12);

        let solutions = solver::solve_all(&board, None);
        assert_eq!(solutions.len(), 1);

        // Each dead-end column renders as south-stub / bar / north-stub,
        // repeated for the three independent pairs, with a blank line
        // between pairs (no vertical edge crosses a pair boundary).
        let pair = "  ╷   ╷   ╷   ╷   ╷   ╷\n  │   │   │   │   │   │\n  ╵   ╵   ╵   ╵   ╵   ╵";
        let expected = [pair; 3].join("\n\n");
        assert_eq!(render::render(&solutions[0]), expected);
        insta::assert_snapshot!(render::render(&solutions[0]), @"  ╷   ╷   ╷   ╷   ╷   ╷\n  │   │   │   │   │   │\n  ╵   ╵   ╵   ╵   ╵   ╵\n\n  ╷   ╷   ╷   ╷   ╷   ╷\n  │   │   │   │   │   │\n  ╵   ╵   ╵   ╵   ╵   ╵\n\n  ╷   ╷   ╷   ╷   ╷   ╷\n  │   │   │   │   │   │\n  ╵   ╵   ╵   ╵   ╵   ╵");
    }
}
