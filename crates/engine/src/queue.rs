//! Shared piece queue for matches
//!
//! One append-only sequence of shapes serves every player. Each player keeps their
//! own read position, so a player's k-th spawned piece is always entry k no matter
//! how fast they play. The sequence grows in batches whenever any reader runs past
//! its end.
//!
//! Entries are kept for the whole match, including those behind the slowest reader,
//! so positions stay stable and `peek` works for any index handed out. Each entry is
//! one byte; `reset` clears them.

use blockfall_core::rng::{random_shape, PieceSource, SimpleRng};
use blockfall_core::types::{Difficulty, ShapeKind, SHARED_QUEUE_BATCH};

#[derive(Debug, Clone)]
pub struct SharedPieceQueue {
    rng: SimpleRng,
    difficulty: Difficulty,
    pieces: Vec<ShapeKind>,
}

impl SharedPieceQueue {
    pub fn new(seed: u32, difficulty: Difficulty) -> Self {
        let mut queue = Self {
            rng: SimpleRng::new(seed),
            difficulty,
            pieces: Vec::with_capacity(SHARED_QUEUE_BATCH),
        };
        queue.extend_batch();
        queue
    }

    fn extend_batch(&mut self) {
        self.pieces.reserve(SHARED_QUEUE_BATCH);
        for _ in 0..SHARED_QUEUE_BATCH {
            self.pieces.push(random_shape(&mut self.rng, self.difficulty));
        }
    }

    /// Entry `index`, generating further batches if needed
    pub fn shape_at(&mut self, index: usize) -> ShapeKind {
        while index >= self.pieces.len() {
            self.extend_batch();
        }
        self.pieces[index]
    }

    /// Entry `index` if it has been generated already
    pub fn peek(&self, index: usize) -> Option<ShapeKind> {
        self.pieces.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Affects batches generated from now on; existing entries are kept so readers
    /// that are behind still see the same pieces as readers that are ahead.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Drop every entry and start a fresh sequence.
    ///
    /// The generator continues from its current state, so a rematch does not replay
    /// the previous pieces.
    pub fn reset(&mut self) {
        self.pieces.clear();
        self.extend_batch();
    }

    /// Borrow the queue as a piece source reading at `position`
    pub fn cursor<'a>(&'a mut self, position: &'a mut usize) -> QueueCursor<'a> {
        QueueCursor {
            queue: self,
            position,
        }
    }
}

/// One reader's view into a [`SharedPieceQueue`]; drawing advances its position
#[derive(Debug)]
pub struct QueueCursor<'a> {
    queue: &'a mut SharedPieceQueue,
    position: &'a mut usize,
}

impl QueueCursor<'_> {
    pub fn position(&self) -> usize {
        *self.position
    }
}

impl PieceSource for QueueCursor<'_> {
    /// The queue's own difficulty decides the mix, not the caller's
    fn next_shape(&mut self, _difficulty: Difficulty) -> ShapeKind {
        let kind = self.queue.shape_at(*self.position);
        *self.position += 1;
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_batch() {
        let queue = SharedPieceQueue::new(1, Difficulty::Normal);
        assert_eq!(queue.len(), SHARED_QUEUE_BATCH);
        assert!(queue.peek(SHARED_QUEUE_BATCH).is_none());
    }

    #[test]
    fn test_extends_past_end() {
        let mut queue = SharedPieceQueue::new(1, Difficulty::Normal);
        let before: Vec<_> = (0..SHARED_QUEUE_BATCH).map(|i| queue.shape_at(i)).collect();

        queue.shape_at(SHARED_QUEUE_BATCH * 2 + 3);
        assert_eq!(queue.len(), SHARED_QUEUE_BATCH * 3);

        // Growing never rewrites earlier entries
        for (i, kind) in before.into_iter().enumerate() {
            assert_eq!(queue.peek(i), Some(kind));
        }
    }

    #[test]
    fn test_cursors_read_same_sequence() {
        let mut queue = SharedPieceQueue::new(77, Difficulty::Insane);
        let mut a = 0usize;
        let mut b = 0usize;

        let first: Vec<_> = {
            let mut cursor = queue.cursor(&mut a);
            (0..120).map(|_| cursor.next_shape(Difficulty::Easy)).collect()
        };
        let second: Vec<_> = {
            let mut cursor = queue.cursor(&mut b);
            (0..120).map(|_| cursor.next_shape(Difficulty::Easy)).collect()
        };

        assert_eq!(first, second);
        assert_eq!(a, 120);
        assert_eq!(b, 120);
    }

    #[test]
    fn test_same_seed_same_queue() {
        let mut q1 = SharedPieceQueue::new(9, Difficulty::Expert);
        let mut q2 = SharedPieceQueue::new(9, Difficulty::Expert);
        for i in 0..200 {
            assert_eq!(q1.shape_at(i), q2.shape_at(i));
        }
    }

    #[test]
    fn test_difficulty_applies_to_new_batches() {
        let mut queue = SharedPieceQueue::new(3, Difficulty::Insane);
        queue.set_difficulty(Difficulty::Normal);
        for i in SHARED_QUEUE_BATCH..SHARED_QUEUE_BATCH * 4 {
            assert!(!queue.shape_at(i).is_extended());
        }
    }

    #[test]
    fn test_reset_starts_fresh_batch() {
        let mut queue = SharedPieceQueue::new(3, Difficulty::Normal);
        queue.shape_at(175);
        queue.reset();
        assert_eq!(queue.len(), SHARED_QUEUE_BATCH);
    }
}
