//! Local multiplayer: 2-4 sessions fed from one shared piece sequence
//!
//! Every player runs an independent [`GameState`]. Spawns draw from a
//! [`SharedPieceQueue`] through the player's own cursor, which the match lends to
//! the engine for the duration of a single command.
//!
//! The match ends once at most one player is still in play. The survivor wins; if
//! everyone topped out, the highest score wins and ties go to the lowest player id.

use std::cmp::Reverse;

use blockfall_core::game_state::GameState;
use blockfall_core::snapshot::GameSnapshot;
use blockfall_core::types::{
    ConfigError, Difficulty, Direction, GameAction, PlayerId, Rotation, MAX_PLAYERS, MIN_PLAYERS,
};

use crate::place::{apply_place, PlaceError};
use crate::queue::{QueueCursor, SharedPieceQueue};

#[derive(Debug, Clone)]
struct PlayerSlot {
    id: PlayerId,
    name: String,
    state: GameState,
    /// Read position in the shared queue
    cursor: usize,
}

/// One player's view, tagged with who they are
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub game: GameSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaderboardEntry {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Match {
    players: Vec<PlayerSlot>,
    queue: SharedPieceQueue,
    difficulty: Difficulty,
    over: bool,
    winner: Option<PlayerId>,
}

impl Match {
    /// Start a match; player ids are 1-based and names default to `"Player N"`
    pub fn new(
        num_players: usize,
        difficulty: Difficulty,
        seed: u32,
    ) -> Result<Self, ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(ConfigError::PlayerCount(num_players));
        }

        let mut queue = SharedPieceQueue::new(seed, difficulty);
        let players = (1..=num_players as PlayerId)
            .map(|id| {
                let mut cursor = 0;
                let state = GameState::new(difficulty, &mut queue.cursor(&mut cursor));
                PlayerSlot {
                    id,
                    name: format!("Player {id}"),
                    state,
                    cursor,
                }
            })
            .collect();

        let mut game = Self {
            players,
            queue,
            difficulty,
            over: false,
            winner: None,
        };
        game.refresh_outcome();
        Ok(game)
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    fn slot_index(&self, id: PlayerId) -> Option<usize> {
        let index = (id as usize).checked_sub(1)?;
        (index < self.players.len()).then_some(index)
    }

    /// Engine of player `id`
    pub fn player(&self, id: PlayerId) -> Option<&GameState> {
        self.slot_index(id).map(|i| &self.players[i].state)
    }

    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.slot_index(id).map(|i| self.players[i].name.as_str())
    }

    /// How far player `id` has read into the shared queue
    pub fn queue_position(&self, id: PlayerId) -> Option<usize> {
        self.slot_index(id).map(|i| self.players[i].cursor)
    }

    /// Entries generated so far in the shared queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Run a command against one player's engine with their queue cursor.
    ///
    /// Returns None for unknown ids and once the match is over.
    fn with_player<R>(
        &mut self,
        id: PlayerId,
        command: impl FnOnce(&mut GameState, &mut QueueCursor<'_>) -> R,
    ) -> Option<R> {
        if self.over {
            return None;
        }
        let index = self.slot_index(id)?;
        let slot = &mut self.players[index];
        let mut cursor = self.queue.cursor(&mut slot.cursor);
        Some(command(&mut slot.state, &mut cursor))
    }

    pub fn shift(&mut self, id: PlayerId, dx: i8) -> bool {
        self.with_player(id, |state, _| state.shift(dx)).unwrap_or(false)
    }

    pub fn rotate(&mut self, id: PlayerId, direction: Direction) -> bool {
        self.with_player(id, |state, _| state.rotate(direction)).unwrap_or(false)
    }

    pub fn soft_drop(&mut self, id: PlayerId) -> bool {
        let moved = self
            .with_player(id, |state, cursor| state.soft_drop(cursor))
            .unwrap_or(false);
        self.refresh_outcome();
        moved
    }

    pub fn hard_drop(&mut self, id: PlayerId) -> bool {
        let dropped = self
            .with_player(id, |state, cursor| state.hard_drop(cursor))
            .unwrap_or(false);
        self.refresh_outcome();
        dropped
    }

    /// Rotate, shift and hard drop in one step for player `id`
    pub fn place(&mut self, id: PlayerId, x: i8, rotation: Rotation) -> Result<(), PlaceError> {
        if self.slot_index(id).is_none() {
            return Err(PlaceError::UnknownPlayer);
        }
        let result = self
            .with_player(id, |state, cursor| apply_place(state, cursor, x, rotation))
            .unwrap_or(Err(PlaceError::NotPlayable));
        self.refresh_outcome();
        result
    }

    /// Toggle pause for one player; the others keep playing
    pub fn toggle_pause(&mut self, id: PlayerId) -> bool {
        self.with_player(id, |state, _| state.toggle_pause()).unwrap_or(false)
    }

    /// Route a [`GameAction`] to one player.
    ///
    /// `Restart` is rejected: individual players cannot reset mid-match, use
    /// [`Match::reset_match`].
    pub fn apply_action(&mut self, id: PlayerId, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.shift(id, -1),
            GameAction::MoveRight => self.shift(id, 1),
            GameAction::SoftDrop => self.soft_drop(id),
            GameAction::HardDrop => self.hard_drop(id),
            GameAction::RotateCw => self.rotate(id, Direction::Cw),
            GameAction::RotateCcw => self.rotate(id, Direction::Ccw),
            GameAction::Pause => self.toggle_pause(id),
            GameAction::Restart => false,
        }
    }

    /// Advance gravity for every player still in play, then judge the match.
    ///
    /// Returns true if any player's piece moved or locked.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.over {
            return false;
        }

        let mut stepped = false;
        for slot in &mut self.players {
            if slot.state.game_over() {
                continue;
            }
            let mut cursor = self.queue.cursor(&mut slot.cursor);
            stepped |= slot.state.tick(now_ms, &mut cursor);
        }

        self.refresh_outcome();
        stepped
    }

    /// Fresh boards, scores and queue for everyone; names are kept
    pub fn reset_match(&mut self) {
        self.queue.reset();
        for slot in &mut self.players {
            slot.cursor = 0;
            let mut cursor = self.queue.cursor(&mut slot.cursor);
            slot.state.reset(&mut cursor);
        }
        self.over = false;
        self.winner = None;
    }

    /// Switch every player and future queue batches to `difficulty`
    /// Switch every player and future queue batches to `difficulty`.
    ///
    /// Rejected once the match is over.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.over {
            return false;
        }
        self.difficulty = difficulty;
        self.queue.set_difficulty(difficulty);
        for slot in &mut self.players {
            let mut cursor = self.queue.cursor(&mut slot.cursor);
            slot.state.set_difficulty(difficulty, &mut cursor);
        }
        self.refresh_outcome();
        true
    }

    pub fn set_player_name(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        match self.slot_index(id) {
            Some(index) => {
                self.players[index].name = name.into();
                true
            }
            None => false,
        }
    }

    /// Decide whether the match has ended and who won
    fn refresh_outcome(&mut self) {
        if self.over {
            return;
        }

        let mut in_play = self.players.iter().filter(|p| !p.state.game_over());
        let survivor = in_play.next();
        if in_play.next().is_some() {
            return;
        }

        self.over = true;
        self.winner = match survivor {
            Some(slot) => Some(slot.id),
            None => self
                .players
                .iter()
                .min_by_key(|p| (Reverse(p.state.score()), p.id))
                .map(|p| p.id),
        };
    }

    pub fn snapshot(&self, id: PlayerId) -> Option<PlayerSnapshot> {
        self.slot_index(id).map(|i| {
            let slot = &self.players[i];
            PlayerSnapshot {
                id: slot.id,
                name: slot.name.clone(),
                game: slot.state.snapshot(),
            }
        })
    }

    /// Every player's view, in id order
    pub fn snapshots(&self) -> Vec<PlayerSnapshot> {
        self.players
            .iter()
            .map(|slot| PlayerSnapshot {
                id: slot.id,
                name: slot.name.clone(),
                game: slot.state.snapshot(),
            })
            .collect()
    }

    /// Players by score, highest first; equal scores keep id order
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<_> = self
            .players
            .iter()
            .map(|slot| LeaderboardEntry {
                id: slot.id,
                name: slot.name.clone(),
                score: slot.state.score(),
                lines: slot.state.lines(),
                level: slot.state.level(),
                game_over: slot.state.game_over(),
            })
            .collect();
        entries.sort_by_key(|entry| Reverse(entry.score));
        entries
    }

    /// Mutable engine access for scripted scenarios; bypasses the match rules
    #[cfg(test)]
    fn player_mut(&mut self, id: PlayerId) -> Option<&mut GameState> {
        let index = self.slot_index(id)?;
        Some(&mut self.players[index].state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::types::{ShapeKind, BOARD_WIDTH};

    /// Fill everything below the spawn rows so the next lock tops the player out
    fn bury(game: &mut Match, id: PlayerId) {
        let state = game.player_mut(id).unwrap();
        for y in 2..20i8 {
            for x in 0..BOARD_WIDTH as i8 {
                // One gap per row so nothing clears
                let cell = (x != y % BOARD_WIDTH as i8).then_some(ShapeKind::Z);
                state.board_mut().set(x, y, cell);
            }
        }
    }

    #[test]
    fn test_player_count_bounds() {
        assert_eq!(
            Match::new(1, Difficulty::Normal, 1).unwrap_err(),
            ConfigError::PlayerCount(1)
        );
        assert_eq!(
            Match::new(5, Difficulty::Normal, 1).unwrap_err(),
            ConfigError::PlayerCount(5)
        );
        for n in 2..=4 {
            let game = Match::new(n, Difficulty::Normal, 1).unwrap();
            assert_eq!(game.num_players(), n);
            assert!(!game.is_over());
        }
    }

    #[test]
    fn test_default_names() {
        let mut game = Match::new(3, Difficulty::Normal, 1).unwrap();
        assert_eq!(game.player_name(1), Some("Player 1"));
        assert_eq!(game.player_name(3), Some("Player 3"));
        assert_eq!(game.player_name(0), None);
        assert_eq!(game.player_name(4), None);

        assert!(game.set_player_name(2, "Ada"));
        assert!(!game.set_player_name(9, "Nobody"));
        assert_eq!(game.player_name(2), Some("Ada"));
    }

    #[test]
    fn test_unknown_player_rejected() {
        let mut game = Match::new(2, Difficulty::Normal, 1).unwrap();
        assert!(!game.shift(0, 1));
        assert!(!game.hard_drop(3));
        assert!(!game.apply_action(7, GameAction::RotateCw));
    }

    #[test]
    fn test_pause_is_per_player() {
        let mut game = Match::new(2, Difficulty::Normal, 1).unwrap();
        assert!(game.toggle_pause(1));
        assert!(game.player(1).unwrap().paused());
        assert!(!game.player(2).unwrap().paused());

        game.tick(0);
        game.tick(5_000);
        assert_eq!(game.player(1).unwrap().active().unwrap().y, 0);
        assert_eq!(game.player(2).unwrap().active().unwrap().y, 1);
    }

    #[test]
    fn test_restart_action_rejected() {
        let mut game = Match::new(2, Difficulty::Normal, 1).unwrap();
        game.hard_drop(1);
        assert!(!game.apply_action(1, GameAction::Restart));
        assert!(game.player(1).unwrap().score() > 0);
    }

    #[test]
    fn test_set_difficulty_rejected_after_match_over() {
        let mut game = Match::new(2, Difficulty::Normal, 12).unwrap();
        bury(&mut game, 1);
        game.hard_drop(1);
        assert!(game.is_over());

        let survivor = game.player(2).unwrap();
        let (spawned, active) = (survivor.pieces_spawned(), survivor.active());

        assert!(!game.set_difficulty(Difficulty::Insane));
        assert_eq!(game.difficulty(), Difficulty::Normal);
        assert_eq!(game.player(2).unwrap().pieces_spawned(), spawned);
        assert_eq!(game.player(2).unwrap().active(), active);
        assert_eq!(game.winner(), Some(2));
    }

    #[test]
    fn test_survivor_wins() {
        let mut game = Match::new(2, Difficulty::Normal, 1).unwrap();
        bury(&mut game, 1);
        game.hard_drop(1);

        assert!(game.player(1).unwrap().game_over());
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(2));
        assert!(!game.hard_drop(2));
    }

    #[test]
    fn test_three_players_continue_after_first_loss() {
        let mut game = Match::new(3, Difficulty::Normal, 1).unwrap();
        bury(&mut game, 2);
        game.hard_drop(2);

        assert!(game.player(2).unwrap().game_over());
        assert!(!game.is_over());
        assert_eq!(game.winner(), None);
        assert!(game.hard_drop(1));
    }

    #[test]
    fn test_simultaneous_loss_highest_score_wins() {
        let mut game = Match::new(2, Difficulty::Normal, 1).unwrap();
        assert!(game.hard_drop(2));
        bury(&mut game, 1);
        bury(&mut game, 2);

        // Both lock on the same gravity step
        game.tick(0);
        game.tick(1_000);

        assert!(game.is_over());
        assert!(game.player(1).unwrap().game_over());
        assert!(game.player(2).unwrap().game_over());
        assert_eq!(game.winner(), Some(2));
    }

    #[test]
    fn test_simultaneous_loss_tie_goes_to_lowest_id() {
        let mut game = Match::new(3, Difficulty::Normal, 1).unwrap();
        for id in 1..=3 {
            bury(&mut game, id);
        }

        game.tick(0);
        game.tick(1_000);
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(1));
    }

    #[test]
    fn test_leaderboard_sorted_and_stable() {
        let mut game = Match::new(3, Difficulty::Normal, 1).unwrap();
        game.hard_drop(2);

        let board = game.leaderboard();
        assert_eq!(board[0].id, 2);
        assert_eq!(board[1].id, 1);
        assert_eq!(board[2].id, 3);
        assert!(board[0].score > board[1].score);
    }

    #[test]
    fn test_reset_match() {
        let mut game = Match::new(2, Difficulty::Normal, 1).unwrap();
        game.set_player_name(1, "Ada");
        bury(&mut game, 1);
        game.hard_drop(1);
        assert!(game.is_over());

        game.reset_match();
        assert!(!game.is_over());
        assert_eq!(game.winner(), None);
        assert_eq!(game.player_name(1), Some("Ada"));
        for id in 1..=2 {
            let state = game.player(id).unwrap();
            assert_eq!(state.score(), 0);
            assert!(!state.game_over());
            assert!(state.board().cells().iter().all(|c| c.is_none()));
        }
        assert_eq!(game.queue_position(1), game.queue_position(2));
    }

    #[test]
    fn test_place_routes_to_player() {
        let mut game = Match::new(2, Difficulty::Normal, 1).unwrap();
        let active = game.player(2).unwrap().active().unwrap();

        game.place(2, 0, active.rotation).unwrap();
        assert_eq!(game.player(2).unwrap().pieces_spawned(), 2);
        assert_eq!(game.player(1).unwrap().pieces_spawned(), 1);
        assert_eq!(game.place(3, 0, Rotation::R0), Err(PlaceError::UnknownPlayer));
    }

    #[test]
    fn test_set_difficulty_applies_to_all() {
        let mut game = Match::new(2, Difficulty::Normal, 1).unwrap();
        assert!(game.set_difficulty(Difficulty::Insane));
        assert_eq!(game.difficulty(), Difficulty::Insane);
        for id in 1..=2 {
            assert_eq!(game.player(id).unwrap().fall_interval_ms(), 300);
        }
    }

    #[test]
    fn test_snapshots_in_id_order() {
        let game = Match::new(4, Difficulty::Easy, 1).unwrap();
        let snapshots = game.snapshots();
        let ids: Vec<_> = snapshots.iter().map(|s| s.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
        assert_eq!(snapshots[3].name, "Player 4");
        assert_eq!(snapshots[0].game.previews.len(), 3);
        assert_eq!(game.snapshot(2).unwrap(), snapshots[1]);
        assert!(game.snapshot(5).is_none());
    }
}
