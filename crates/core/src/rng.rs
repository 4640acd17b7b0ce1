//! RNG module - seeded piece generation
//!
//! Pieces are drawn independently per spawn: uniformly from the standard set, or in
//! Expert/Insane from the extended set 30% of the time. A small LCG keeps every
//! stream reproducible from its seed.
//!
//! Sessions never pick pieces themselves. They pull from a [`PieceSource`], which is
//! a [`RandomSource`] for single-player games and a shared-queue cursor in matches.

use crate::types::{Difficulty, ShapeKind, EXTENDED_DRAW_PERCENT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Pick one element uniformly
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.next_range(items.len() as u32) as usize]
    }

    /// Current state (reseeding with it continues the same stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Draw one shape for the given difficulty
pub fn random_shape(rng: &mut SimpleRng, difficulty: Difficulty) -> ShapeKind {
    if difficulty.uses_extended_shapes() && rng.next_range(100) < EXTENDED_DRAW_PERCENT {
        rng.choose(&ShapeKind::EXTENDED)
    } else {
        rng.choose(&ShapeKind::STANDARD)
    }
}

/// Where a session's next pieces come from
pub trait PieceSource {
    /// Produce the next shape in the stream
    fn next_shape(&mut self, difficulty: Difficulty) -> ShapeKind;
}

impl<S: PieceSource + ?Sized> PieceSource for &mut S {
    fn next_shape(&mut self, difficulty: Difficulty) -> ShapeKind {
        (**self).next_shape(difficulty)
    }
}

/// Independent random draws, seeded
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: SimpleRng,
}

impl RandomSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for RandomSource {
    fn next_shape(&mut self, difficulty: Difficulty) -> ShapeKind {
        random_shape(&mut self.rng, difficulty)
    }
}

/// Replays a fixed list of shapes, cycling at the end.
///
/// Useful for scripted scenarios where the piece order must be known.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    shapes: Vec<ShapeKind>,
    index: usize,
}

impl SequenceSource {
    /// Cycle through `shapes` in order.
    ///
    /// # Panics
    ///
    /// Panics if `shapes` is empty.
    pub fn new(shapes: impl Into<Vec<ShapeKind>>) -> Self {
        let shapes = shapes.into();
        assert!(!shapes.is_empty(), "sequence source needs at least one shape");
        Self { shapes, index: 0 }
    }

    /// Shapes handed out so far
    pub fn drawn(&self) -> usize {
        self.index
    }
}

impl PieceSource for SequenceSource {
    fn next_shape(&mut self, _difficulty: Difficulty) -> ShapeKind {
        let kind = self.shapes[self.index % self.shapes.len()];
        self.index += 1;
        kind
    }
}
