use arrayvec::ArrayVec;

use crate::board::Grid;
use crate::pieces::Tetromino;
use crate::types::{
    Difficulty, Rgb, Rotation, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_PIECE_CELLS, MAX_PREVIEW,
};

/// Active piece as seen by a renderer: placement plus its absolute cells
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub color: Rgb,
    pub cells: ArrayVec<(i8, i8), MAX_PIECE_CELLS>,
}

impl From<Tetromino> for PieceSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            color: value.color(),
            cells: value.cells().collect(),
        }
    }
}

/// Read-only view of one session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub board: Grid,
    pub active: Option<PieceSnapshot>,
    /// Landing cells of the active piece; empty when the difficulty hides the ghost
    pub ghost: ArrayVec<(i8, i8), MAX_PIECE_CELLS>,
    pub next: Option<ShapeKind>,
    pub previews: ArrayVec<ShapeKind, MAX_PREVIEW>,
    pub difficulty: Difficulty,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost.clear();
        self.next = None;
        self.previews.clear();
        self.difficulty = Difficulty::default();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.paused = false;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Settled cells on the board
    pub fn filled_cells(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: ArrayVec::new(),
            next: None,
            previews: ArrayVec::new(),
            difficulty: Difficulty::default(),
            score: 0,
            level: 1,
            lines: 0,
            paused: false,
            game_over: false,
        }
    }
}
