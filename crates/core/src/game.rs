//! Single-player session: a [`GameState`] paired with its own seeded piece stream.

use crate::game_state::{GameState, LockEvent, Phase};
use crate::rng::RandomSource;
use crate::snapshot::GameSnapshot;
use crate::types::{Difficulty, Direction, GameAction};

#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    source: RandomSource,
}

impl Game {
    pub fn new(difficulty: Difficulty, seed: u32) -> Self {
        let mut source = RandomSource::new(seed);
        let state = GameState::new(difficulty, &mut source);
        Self { state, source }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn move_left(&mut self) -> bool {
        self.state.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.state.shift(1)
    }

    pub fn rotate(&mut self, direction: Direction) -> bool {
        self.state.rotate(direction)
    }

    pub fn soft_drop(&mut self) -> bool {
        self.state.soft_drop(&mut self.source)
    }

    pub fn hard_drop(&mut self) -> bool {
        self.state.hard_drop(&mut self.source)
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.state.tick(now_ms, &mut self.source)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.toggle_pause()
    }

    /// Restart with the same difficulty; the piece stream continues from where it was
    pub fn reset(&mut self) {
        self.state.reset(&mut self.source);
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        self.state.set_difficulty(difficulty, &mut self.source)
    }

    pub fn apply_action(&mut self, action: GameAction) -> bool {
        self.state.apply_action(action, &mut self.source)
    }

    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.state.take_last_event()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }
}
