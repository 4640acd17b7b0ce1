//! Pieces module - shape catalog and rotation engine
//!
//! Every shape is defined once by its canonical mask. The other three rotation
//! states are derived by rotating that mask 90° clockwise, and the resulting
//! table is built at compile time. There is no wall-kick table: a piece that
//! cannot rotate in place simply does not rotate.

use crate::types::{Direction, Rgb, Rotation, ShapeKind, MAX_MASK_SIZE, SPAWN_X, SPAWN_Y};

/// Offset of a single occupied cell relative to the mask origin, as (column, row)
pub type CellOffset = (i8, i8);

/// A rows x cols boolean mask of at most 4x4 cells, packed row-major into 16 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMask {
    rows: u8,
    cols: u8,
    bits: u16,
}

impl ShapeMask {
    pub const EMPTY: ShapeMask = ShapeMask {
        rows: 0,
        cols: 0,
        bits: 0,
    };

    /// Build a mask from text rows where `#` marks an occupied cell.
    ///
    /// All rows must have the same width and fit in 4x4.
    pub const fn parse(pattern: &[&str]) -> Self {
        let rows = pattern.len();
        let cols = if rows == 0 { 0 } else { pattern[0].len() };
        assert!(rows <= MAX_MASK_SIZE && cols <= MAX_MASK_SIZE);

        let mut bits = 0u16;
        let mut r = 0;
        while r < rows {
            let line = pattern[r].as_bytes();
            assert!(line.len() == cols);
            let mut c = 0;
            while c < cols {
                if line[c] == b'#' {
                    bits |= 1u16 << (r * MAX_MASK_SIZE + c);
                }
                c += 1;
            }
            r += 1;
        }

        Self {
            rows: rows as u8,
            cols: cols as u8,
            bits,
        }
    }

    pub const fn rows(&self) -> u8 {
        self.rows
    }

    pub const fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether (row, col) is occupied; out-of-mask coordinates are empty
    pub const fn is_set(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize
            && col < self.cols as usize
            && self.bits & (1u16 << (row * MAX_MASK_SIZE + col)) != 0
    }

    /// Number of occupied cells
    pub const fn cell_count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Rotate 90° clockwise.
    ///
    /// An R x C mask becomes C x R with `new[c][R - 1 - r] = old[r][c]`.
    pub const fn rotate_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;

        let mut bits = 0u16;
        let mut r = 0;
        while r < rows {
            let mut c = 0;
            while c < cols {
                if self.is_set(r, c) {
                    bits |= 1u16 << (c * MAX_MASK_SIZE + (rows - 1 - r));
                }
                c += 1;
            }
            r += 1;
        }

        Self {
            rows: cols as u8,
            cols: rows as u8,
            bits,
        }
    }

    /// Occupied cells in row-major order, as (column, row) offsets
    pub fn cells(&self) -> impl Iterator<Item = CellOffset> {
        let mask = *self;
        (0..mask.rows).flat_map(move |r| {
            (0..mask.cols)
                .filter(move |&c| mask.is_set(r as usize, c as usize))
                .map(move |c| (c as i8, r as i8))
        })
    }
}

/// Canonical orientation of each shape
const fn canonical_mask(kind: ShapeKind) -> ShapeMask {
    match kind {
        ShapeKind::I => ShapeMask::parse(&["....", "####", "....", "...."]),
        ShapeKind::O => ShapeMask::parse(&["##", "##"]),
        ShapeKind::T => ShapeMask::parse(&[".#.", "###", "..."]),
        ShapeKind::S => ShapeMask::parse(&[".##", "##.", "..."]),
        ShapeKind::Z => ShapeMask::parse(&["##.", ".##", "..."]),
        ShapeKind::J => ShapeMask::parse(&["#..", "###", "..."]),
        ShapeKind::L => ShapeMask::parse(&["..#", "###", "..."]),
        ShapeKind::U => ShapeMask::parse(&["#.#", "###", "..."]),
        ShapeKind::X => ShapeMask::parse(&["#.#", ".#.", "#.#"]),
        ShapeKind::W => ShapeMask::parse(&["#..", "##.", ".##"]),
        ShapeKind::F => ShapeMask::parse(&[".##", "##.", ".#."]),
        ShapeKind::P => ShapeMask::parse(&["##.", "##.", ".#."]),
        ShapeKind::N => ShapeMask::parse(&["#..", "###", "..#"]),
        ShapeKind::Y => ShapeMask::parse(&["#..", "###", ".#."]),
        ShapeKind::V => ShapeMask::parse(&["#..", "#..", "###"]),
        ShapeKind::C => ShapeMask::parse(&["###", "#..", "###"]),
        ShapeKind::H => ShapeMask::parse(&["#.#", "###", "#.#"]),
    }
}

const fn build_rotations(kind: ShapeKind) -> [ShapeMask; 4] {
    let r0 = canonical_mask(kind);
    let r90 = r0.rotate_cw();
    let r180 = r90.rotate_cw();
    let r270 = r180.rotate_cw();
    [r0, r90, r180, r270]
}

const fn build_table() -> [[ShapeMask; 4]; ShapeKind::ALL.len()] {
    let mut table = [[ShapeMask::EMPTY; 4]; ShapeKind::ALL.len()];
    let mut i = 0;
    while i < ShapeKind::ALL.len() {
        table[i] = build_rotations(ShapeKind::ALL[i]);
        i += 1;
    }
    table
}

static ROTATIONS: [[ShapeMask; 4]; ShapeKind::ALL.len()] = build_table();

/// All four rotation states of a shape; index 0 is the canonical orientation
pub fn rotations_for(kind: ShapeKind) -> &'static [ShapeMask; 4] {
    &ROTATIONS[kind.index()]
}

/// Mask for a shape in the given rotation state
pub fn get_mask(kind: ShapeKind, rotation: Rotation) -> ShapeMask {
    ROTATIONS[kind.index()][rotation.index()]
}

/// An active piece: shape, rotation state and the board position of its mask origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: ShapeKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new piece at the spawn position in its canonical orientation
    pub fn new(kind: ShapeKind) -> Self {
        Self::at(kind, SPAWN_X, SPAWN_Y)
    }

    pub fn at(kind: ShapeKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::R0,
            x,
            y,
        }
    }

    pub fn mask(&self) -> ShapeMask {
        get_mask(self.kind, self.rotation)
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    /// Absolute board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.mask().cells().map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Copy moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy turned one quarter in place (no kick)
    pub fn rotated(&self, direction: Direction) -> Self {
        Self {
            rotation: self.rotation.turn(direction),
            ..*self
        }
    }
}
