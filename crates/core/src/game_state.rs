//! Game state module - the single-player state machine
//!
//! This module ties together the board, the piece stream, scoring and the gravity
//! clock. It is source-agnostic: every operation that may spawn a piece takes the
//! [`PieceSource`] to draw from, so the same engine runs standalone (see
//! [`crate::game::Game`]) or inside a match that shares one piece sequence.
//!
//! # Phases
//!
//! - **Active**: a piece is falling and commands are accepted
//! - **Paused**: everything except unpause and reset is rejected
//! - **GameOver**: terminal; only reset is accepted
//!
//! The game ends as soon as a freshly spawned piece overlaps the stack.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::difficulty::DifficultyConfig;
use crate::pieces::Tetromino;
use crate::rng::PieceSource;
use crate::scoring::{calculate_drop_score, calculate_line_score};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{
    Difficulty, Direction, GameAction, ShapeKind, MAX_PIECE_CELLS, MAX_PREVIEW,
};

/// Upcoming pieces: the next piece followed by the previews
type Lookahead = ArrayVec<ShapeKind, { MAX_PREVIEW + 1 }>;

/// Lifecycle phase derived from the paused / game-over flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Active,
    Paused,
    GameOver,
}

/// Outcome of the most recent lock, for presentation layers (sounds, flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    pub level_up: bool,
    pub game_over: bool,
}

/// Complete single-player game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    config: DifficultyConfig,
    active: Option<Tetromino>,
    upcoming: Lookahead,
    score: u32,
    level: u32,
    lines: u32,
    fall_interval_ms: u32,
    /// Time of the last gravity step; `None` until the first tick anchors the clock
    last_fall_ms: Option<u64>,
    paused: bool,
    game_over: bool,
    /// Monotonic count of spawned pieces (never reset by difficulty changes)
    pieces_spawned: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a session and spawn its first piece
    pub fn new<S: PieceSource + ?Sized>(difficulty: Difficulty, source: &mut S) -> Self {
        let config = DifficultyConfig::from(difficulty);
        let mut state = Self {
            board: Board::new(),
            config,
            active: None,
            upcoming: Lookahead::new(),
            score: 0,
            level: 1,
            lines: 0,
            fall_interval_ms: config.base_fall_ms,
            last_fall_ms: None,
            paused: false,
            game_over: false,
            pieces_spawned: 0,
            last_event: None,
        };
        state.spawn_piece(source);
        state
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Active
        }
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether movement commands are currently accepted
    pub fn playable(&self) -> bool {
        !self.paused && !self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scripted setups (tests, puzzles)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The piece that spawns after the active one
    pub fn next_piece(&self) -> Option<ShapeKind> {
        self.upcoming.first().copied()
    }

    /// Pieces after the next one, as many as the difficulty shows
    pub fn preview_pieces(&self) -> &[ShapeKind] {
        let end = (1 + self.config.preview_pieces).min(self.upcoming.len());
        self.upcoming.get(1..end).unwrap_or(&[])
    }

    /// Where the active piece would land, regardless of whether the difficulty shows it
    pub fn ghost_cells(&self) -> Option<ArrayVec<(i8, i8), MAX_PIECE_CELLS>> {
        self.active.map(|piece| self.board.ghost_cells(&piece))
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active.map(PieceSnapshot::from);
        out.ghost = match self.active {
            Some(piece) if self.config.ghost_piece => self.board.ghost_cells(&piece),
            _ => ArrayVec::new(),
        };
        out.next = self.next_piece();
        out.previews = self.preview_pieces().iter().copied().collect();
        out.difficulty = self.config.difficulty;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Top up the lookahead to the next piece plus the difficulty's previews
    fn fill_lookahead<S: PieceSource + ?Sized>(&mut self, source: &mut S) {
        let wanted = 1 + self.config.preview_pieces;
        while self.upcoming.len() < wanted {
            self.upcoming.push(source.next_shape(self.config.difficulty));
        }
    }

    /// Promote the next piece to active and refill the lookahead.
    ///
    /// Returns false (and ends the game) when the new piece does not fit.
    fn spawn_piece<S: PieceSource + ?Sized>(&mut self, source: &mut S) -> bool {
        self.fill_lookahead(source);
        let Some(kind) = self.upcoming.pop_at(0) else {
            return false;
        };
        self.fill_lookahead(source);

        let piece = Tetromino::new(kind);
        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        if !self.board.is_legal(&piece) {
            self.game_over = true;
            return false;
        }
        true
    }

    /// Replace the active piece if the candidate position is legal
    fn try_place(&mut self, candidate: Tetromino) -> bool {
        if self.board.is_legal(&candidate) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Move the active piece one column; `dx` is clamped to ±1
    pub fn shift(&mut self, dx: i8) -> bool {
        if !self.playable() || dx == 0 {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        self.try_place(active.shifted(dx.signum(), 0))
    }

    /// Rotate the active piece one quarter turn in place (no wall kicks)
    pub fn rotate(&mut self, direction: Direction) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        self.try_place(active.rotated(direction))
    }

    /// Move down one row for a small bonus, or lock the piece if it is resting
    pub fn soft_drop<S: PieceSource + ?Sized>(&mut self, source: &mut S) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if self.try_place(active.shifted(0, 1)) {
            self.score += calculate_drop_score(1, self.config.score_percent);
        } else {
            self.lock_piece(source);
        }
        true
    }

    /// Drop straight to the landing row, score the distance, and lock
    pub fn hard_drop<S: PieceSource + ?Sized>(&mut self, source: &mut S) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(mut active) = self.active else {
            return false;
        };

        let distance = self.board.hard_drop(&mut active);
        self.active = Some(active);
        self.score += calculate_drop_score(distance, self.config.score_percent);
        self.lock_piece(source);
        true
    }

    /// Commit the active piece, clear rows, score, level up, and spawn the next piece
    fn lock_piece<S: PieceSource + ?Sized>(&mut self, source: &mut S) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.commit(&active);
        let lines_cleared = self.board.clear_full_rows();

        let mut line_clear_score = 0;
        let mut level_up = false;
        if lines_cleared > 0 {
            line_clear_score = calculate_line_score(lines_cleared, self.config.score_percent);
            self.score += line_clear_score;
            self.lines += lines_cleared;

            let new_level = self.config.level_for_lines(self.lines);
            if new_level > self.level {
                self.level = new_level;
                self.fall_interval_ms = self.config.fall_interval_ms(self.level);
                level_up = true;
            }
        }

        let spawned = self.spawn_piece(source);

        self.last_event = Some(LockEvent {
            lines_cleared,
            line_clear_score,
            level_up,
            game_over: !spawned,
        });
    }

    /// Advance the gravity clock to `now_ms` (caller's monotonic milliseconds).
    ///
    /// When at least one fall interval has elapsed since the last step, the piece
    /// moves down one row or locks if it cannot. The clock restarts from `now_ms`
    /// either way, so each call advances gravity by at most one row. The first tick
    /// after creation or reset only anchors the clock.
    ///
    /// Returns true when a gravity step happened.
    pub fn tick<S: PieceSource + ?Sized>(&mut self, now_ms: u64, source: &mut S) -> bool {
        if !self.playable() {
            return false;
        }

        let Some(last) = self.last_fall_ms else {
            self.last_fall_ms = Some(now_ms);
            return false;
        };
        if now_ms.saturating_sub(last) < self.fall_interval_ms as u64 {
            return false;
        }
        self.last_fall_ms = Some(now_ms);

        let Some(active) = self.active else {
            return false;
        };
        if !self.try_place(active.shifted(0, 1)) {
            self.lock_piece(source);
        }
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.game_over || self.paused {
            return false;
        }
        self.paused = true;
        true
    }

    pub fn unpause(&mut self) -> bool {
        if self.game_over || !self.paused {
            return false;
        }
        self.paused = false;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.unpause()
        } else {
            self.pause()
        }
    }

    /// Start over: empty board, zero score and lines, level 1, fresh pieces
    pub fn reset<S: PieceSource + ?Sized>(&mut self, source: &mut S) {
        self.board.reset();
        self.active = None;
        self.upcoming.clear();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.fall_interval_ms = self.config.base_fall_ms;
        self.last_fall_ms = None;
        self.paused = false;
        self.game_over = false;
        self.last_event = None;
        self.spawn_piece(source);
    }

    /// Switch tiers mid-game.
    ///
    /// The fall interval restarts from the new base and the current piece is
    /// abandoned for the next one. Score, level and board are kept. A finished game
    /// takes the new tier without spawning.
    pub fn set_difficulty<S: PieceSource + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        source: &mut S,
    ) -> bool {
        self.config = DifficultyConfig::from(difficulty);
        self.fall_interval_ms = self.config.base_fall_ms;
        if !self.game_over {
            self.spawn_piece(source);
        }
        true
    }

    /// Apply a game action
    pub fn apply_action<S: PieceSource + ?Sized>(
        &mut self,
        action: GameAction,
        source: &mut S,
    ) -> bool {
        match action {
            GameAction::MoveLeft => self.shift(-1),
            GameAction::MoveRight => self.shift(1),
            GameAction::SoftDrop => self.soft_drop(source),
            GameAction::HardDrop => self.hard_drop(source),
            GameAction::RotateCw => self.rotate(Direction::Cw),
            GameAction::RotateCcw => self.rotate(Direction::Ccw),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.reset(source);
                true
            }
        }
    }

    /// Check if the active piece could move by (dx, dy)
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        self.active
            .is_some_and(|piece| self.board.is_legal(&piece.shifted(dx, dy)))
    }
}
