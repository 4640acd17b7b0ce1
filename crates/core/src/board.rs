//! Board module - the playfield grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the shape kind that settled there.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Pieces may hang above the field (y < 0); those cells are never written.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{Cell, Rgb, BOARD_HEIGHT, BOARD_WIDTH, MAX_PIECE_CELLS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row-major copy of the grid, as handed to snapshots
pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    /// Rows removed since creation or the last reset
    lines_cleared: u32,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            lines_cleared: 0,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Color of the block at (x, y), or None when empty or out of bounds
    pub fn color_at(&self, x: i8, y: i8) -> Option<Rgb> {
        self.get(x, y).flatten().map(|kind| kind.color())
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Whether a piece may occupy its current position.
    ///
    /// Every occupied cell must be inside the side walls and above the floor. Cells
    /// at y >= 0 must also be empty; cells above the field are exempt so pieces can
    /// spawn partially hidden.
    pub fn is_legal(&self, piece: &Tetromino) -> bool {
        piece.cells().all(|(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Write the piece's color into every occupied cell on the field.
    ///
    /// Does not validate; callers check [`Board::is_legal`] first.
    pub fn commit(&mut self, piece: &Tetromino) {
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Some(piece.kind));
            }
        }
    }

    /// Remove every full row, shifting the rows above down and inserting empty rows at the top.
    ///
    /// Uses a two-pointer scan from the bottom with zero allocation.
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut cleared = 0u32;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        self.lines_cleared += cleared;
        cleared
    }

    /// Lowest y the piece can reach by falling straight down.
    ///
    /// Works on a copy; the caller's piece is untouched. A piece that is already
    /// illegal reports its own y.
    pub fn drop_target(&self, piece: &Tetromino) -> i8 {
        let mut probe = *piece;
        while self.is_legal(&probe.shifted(0, 1)) {
            probe.y += 1;
        }
        probe.y
    }

    /// Rows between the piece and its drop target
    pub fn hard_drop_distance(&self, piece: &Tetromino) -> u32 {
        (self.drop_target(piece) - piece.y) as u32
    }

    /// Move the piece to its drop target, returning the rows traveled
    pub fn hard_drop(&self, piece: &mut Tetromino) -> u32 {
        let distance = self.hard_drop_distance(piece);
        piece.y += distance as i8;
        distance
    }

    /// The piece as it would land if hard-dropped now
    pub fn ghost(&self, piece: &Tetromino) -> Tetromino {
        Tetromino {
            y: self.drop_target(piece),
            ..*piece
        }
    }

    /// Occupied cells of the ghost piece, for preview rendering
    pub fn ghost_cells(&self, piece: &Tetromino) -> ArrayVec<(i8, i8), MAX_PIECE_CELLS> {
        self.ghost(piece).cells().collect()
    }

    /// Rows from the floor up to the highest filled cell (0 when empty)
    pub fn stack_height(&self) -> u8 {
        let width = BOARD_WIDTH as usize;
        self.cells
            .chunks(width)
            .position(|row| row.iter().any(|cell| cell.is_some()))
            .map_or(0, |top| BOARD_HEIGHT - top as u8)
    }

    /// Rows removed since creation or the last reset
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array
    pub fn write_grid(&self, out: &mut Grid) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    /// Empty the grid and zero the lines counter
    pub fn reset(&mut self) {
        self.cells = [None; BOARD_SIZE];
        self.lines_cleared = 0;
    }

    /// Fill row `y` completely (test and benchmark setup)
    pub fn fill_row(&mut self, y: i8, cell: Cell) {
        for x in 0..BOARD_WIDTH as i8 {
            self.set(x, y, cell);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
