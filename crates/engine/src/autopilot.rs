//! Greedy one-piece placement search used by the headless runner.
//!
//! Every rotation and column is dropped on a scratch copy of the board and scored
//! by rows cleared, holes left and stack height.

use blockfall_core::board::Board;
use blockfall_core::game_state::GameState;
use blockfall_core::pieces::Tetromino;
use blockfall_core::types::{Rotation, BOARD_HEIGHT, BOARD_WIDTH, MAX_MASK_SIZE};

const LINE_WEIGHT: i32 = 40;
const HOLE_WEIGHT: i32 = 8;
const HEIGHT_WEIGHT: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i8,
    pub rotation: Rotation,
    pub score: i32,
}

/// Empty cells with a filled cell somewhere above them in the same column
pub fn hole_count(board: &Board) -> u32 {
    let mut holes = 0;
    for x in 0..BOARD_WIDTH as i8 {
        let mut covered = false;
        for y in 0..BOARD_HEIGHT as i8 {
            if board.is_occupied(x, y) {
                covered = true;
            } else if covered {
                holes += 1;
            }
        }
    }
    holes
}

fn evaluate(board: &Board, piece: Tetromino) -> i32 {
    let mut scratch = board.clone();
    let mut landed = piece;
    scratch.hard_drop(&mut landed);
    scratch.commit(&landed);
    let lines = scratch.clear_full_rows();

    lines as i32 * LINE_WEIGHT
        - hole_count(&scratch) as i32 * HOLE_WEIGHT
        - scratch.stack_height() as i32 * HEIGHT_WEIGHT
}

/// Best landing spot for the active piece, or None when the session cannot move.
///
/// Candidates are tried at the piece's current row; ties keep the first found
/// (rotation order, then left to right).
pub fn best_placement(state: &GameState) -> Option<Placement> {
    if !state.playable() {
        return None;
    }
    let active = state.active()?;
    let board = state.board();
    let mut best: Option<Placement> = None;

    for rotation in Rotation::ALL {
        for x in -(MAX_MASK_SIZE as i8)..BOARD_WIDTH as i8 {
            let candidate = Tetromino {
                rotation,
                x,
                ..active
            };
            if !board.is_legal(&candidate) {
                continue;
            }
            let score = evaluate(board, candidate);
            if best.map_or(true, |b| score > b.score) {
                best = Some(Placement { x, rotation, score });
            }
        }
    }
    best
}
