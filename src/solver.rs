//! Constraint-propagation solver: the propagator, the brancher, and the
//! combined propagate/branch recursion node that ties them together.
//!
//! Deliberately recursive, unlike the teacher's iterative stack-based
//! backtracking search — the spec calls the combined propagate/branch step
//! "the recursion node" and its return value threads a stop signal up
//! through exactly that recursion, which is the most direct reading of the
//! control flow described. The copy-on-branch discipline that makes the
//! teacher's iterative approach allocation-free carries over unchanged: the
//! options grid is `Copy`, so every branch still costs one stack copy and
//! no heap traffic.

use std::ops::ControlFlow;

use crate::board::{extract_solution, Board, OptionsGrid, Solution};
use crate::shape;

/// Propagation found a cell with zero remaining options.
///
/// Purely internal: it prunes the current branch and never surfaces past
/// this module's boundary (see `error` for the errors that do).
struct Contradiction;

/// Runs the propagator to a fixed point (§4.2).
///
/// Sweeps the interior row-major, repeating until a sweep changes nothing.
/// Cells read already-updated neighbours within the same sweep, which only
/// affects how many sweeps are needed, not the fixed point reached (the
/// reduction is monotone — options only shrink).
fn propagate(board: &Board, opts: &mut OptionsGrid) -> Result<(), Contradiction> {
    let rows = opts.rows();
    let cols = opts.cols();
    let mut sweeps = 0usize;

    loop {
        let mut changed = false;
        for row in 1..rows - 1 {
            for col in 1..cols - 1 {
                let new_mask = narrow_cell(board, opts, row, col)?;
                if new_mask != opts.get(row, col) {
                    opts.set(row, col, new_mask);
                    changed = true;
                }
            }
        }
        sweeps += 1;
        log::trace!("propagation sweep {sweeps} complete, changed={changed}");
        if !changed {
            return Ok(());
        }
    }
}

/// Computes the narrowed options mask for one interior cell by
/// cross-checking its four neighbours' fanouts (§4.2).
fn narrow_cell(
    board: &Board,
    opts: &OptionsGrid,
    row: usize,
    col: usize,
) -> Result<shape::OptionsMask, Contradiction> {
    let neighbor = |nrow: usize, ncol: usize| -> (shape::ShapeCode, shape::OptionsMask) {
        (board.get(nrow, ncol), opts.get(nrow, ncol))
    };

    let (n_shape, n_opts) = neighbor(row - 1, col);
    let (e_shape, e_opts) = neighbor(row, col + 1);
    let (s_shape, s_opts) = neighbor(row + 1, col);
    let (w_shape, w_opts) = neighbor(row, col - 1);

    // may_be_set/may_be_clear are expressed in *this* cell's frame: bit i
    // says "this cell's direction-i stub is permitted/required to be
    // present/absent, given what the neighbour in that direction can do".
    // A neighbour's fanout is reflected into our frame via rotate2, which
    // swaps opposite bit pairs (its south bit becomes our north bit, etc.);
    // only the single relevant bit from each reflection is kept.
    let may_be_set = (shape::rotate2(shape::fanout(n_shape, n_opts)) & shape::NORTH)
        | (shape::rotate2(shape::fanout(e_shape, e_opts)) & shape::EAST)
        | (shape::rotate2(shape::fanout(s_shape, s_opts)) & shape::SOUTH)
        | (shape::rotate2(shape::fanout(w_shape, w_opts)) & shape::WEST);

    let may_be_clear = (shape::rotate2(shape::fanout(n_shape ^ 0xf, n_opts)) & shape::NORTH)
        | (shape::rotate2(shape::fanout(e_shape ^ 0xf, e_opts)) & shape::EAST)
        | (shape::rotate2(shape::fanout(s_shape ^ 0xf, s_opts)) & shape::SOUTH)
        | (shape::rotate2(shape::fanout(w_shape ^ 0xf, w_opts)) & shape::WEST);

    let cell_shape = board.get(row, col);
    let mut new_mask = 0u8;
    let mut remaining = opts.get(row, col);
    while remaining != 0 {
        let bit = remaining & remaining.wrapping_neg();
        let candidate = shape::rotate(cell_shape, bit);
        if (candidate & !may_be_set) == 0 && (candidate | may_be_clear) == 0xf {
            new_mask |= bit;
        }
        remaining &= remaining - 1;
    }

    if new_mask == 0 {
        Err(Contradiction)
    } else {
        Ok(new_mask)
    }
}

/// The combined propagate/branch recursion node (§4.4).
///
/// Returns `ControlFlow::Break(())` once the consumer asks to stop;
/// `ControlFlow::Continue(())` otherwise, whether because this subtree was
/// exhausted or because propagation found a contradiction and pruned it.
fn search<F>(board: &Board, opts: &mut OptionsGrid, consumer: &mut F) -> ControlFlow<()>
where
    F: FnMut(&Solution) -> ControlFlow<()>,
{
    if propagate(board, opts).is_err() {
        return ControlFlow::Continue(());
    }

    match extract_solution(board, opts) {
        Some(solution) => consumer(&solution),
        None => branch(board, opts, consumer),
    }
}

/// Picks the first unresolved cell and recurses on each remaining
/// orientation in turn (§4.3).
fn branch<F>(board: &Board, opts: &OptionsGrid, consumer: &mut F) -> ControlFlow<()>
where
    F: FnMut(&Solution) -> ControlFlow<()>,
{
    let (row, col) = opts
        .first_unresolved()
        .expect("branch is only called when some interior cell is unresolved");

    let mut remaining = opts.get(row, col);
    while remaining != 0 {
        let bit = remaining & remaining.wrapping_neg();
        remaining &= remaining - 1;

        log::trace!("branching at ({row}, {col}) trying orientation bit {bit:#x}");
        let mut branch_opts = *opts;
        branch_opts.set(row, col, bit);
        search(board, &mut branch_opts, consumer)?;
    }
    ControlFlow::Continue(())
}

/// Enumerates every solution to `board`, delivering each to `consumer` in
/// turn. Stops early — without enumerating further solutions — as soon as
/// `consumer` returns `ControlFlow::Break(())` (§4.6).
pub fn solve<F>(board: &Board, mut consumer: F)
where
    F: FnMut(&Solution) -> ControlFlow<()>,
{
    let mut opts = board.initial_options();
    log::debug!(
        "starting search over a {}x{} interior",
        board.interior_rows(),
        board.interior_cols()
    );
    let _ = search(board, &mut opts, &mut consumer);
}

/// Convenience wrapper collecting every solution into a `Vec`, optionally
/// capped at `max_solutions` (mirrors the teacher's
/// `Puzzle::solve(&self, max_solutions: Option<usize>) -> Vec<...>`).
pub fn solve_all(board: &Board, max_solutions: Option<usize>) -> Vec<Solution> {
    let mut solutions = Vec::new();
    solve(board, |solution| {
        solutions.push(*solution);
        if max_solutions.is_some_and(|max| solutions.len() >= max) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    solutions
}
