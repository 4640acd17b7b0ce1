//! Multiplayer tests - shared queue fairness, routing and match outcome

use blockfall::core::DifficultyConfig;
use blockfall::engine::{best_placement, Match};
use blockfall::types::{
    ConfigError, Difficulty, Direction, GameAction, PlayerId, ShapeKind, SHARED_QUEUE_BATCH,
    TICK_MS,
};

/// Shapes player `id` has seen so far: every spawned piece plus the lookahead
fn seen(game: &Match, id: PlayerId) -> Vec<ShapeKind> {
    let state = game.player(id).unwrap();
    let mut out = vec![state.active().unwrap().kind];
    out.extend(state.next_piece());
    out
}

#[test]
fn test_construction_rejects_bad_counts() {
    for n in [0, 1, 5, 8] {
        assert_eq!(
            Match::new(n, Difficulty::Normal, 1).unwrap_err(),
            ConfigError::PlayerCount(n)
        );
    }
}

/// Let the autopilot place player `id`'s piece, falling back to a plain drop
fn autoplace(game: &mut Match, id: PlayerId) {
    let Some(target) = game.player(id).and_then(best_placement) else {
        return;
    };
    if game.place(id, target.x, target.rotation).is_err() {
        game.hard_drop(id);
    }
}

#[test]
fn test_nth_piece_identical_across_players() {
    let mut game = Match::new(2, Difficulty::Normal, 2024).unwrap();
    let mut spawned_a = Vec::new();
    let mut spawned_b = Vec::new();

    // Player 1 plays three times as fast as player 2
    while !game.is_over() {
        for _ in 0..3 {
            spawned_a.push(game.player(1).unwrap().active().unwrap().kind);
            autoplace(&mut game, 1);
        }
        spawned_b.push(game.player(2).unwrap().active().unwrap().kind);
        game.hard_drop(2);
    }

    // Player 2 stacks in the middle and tops out after at least ten pieces
    assert_eq!(game.winner(), Some(1));
    assert!(spawned_b.len() >= 10);
    assert_eq!(spawned_a[..spawned_b.len()], spawned_b[..]);
}

#[test]
fn test_queue_extends_transparently() {
    let mut game = Match::new(2, Difficulty::Normal, 9).unwrap();

    // Well past the first batch
    for _ in 0..SHARED_QUEUE_BATCH + 10 {
        autoplace(&mut game, 1);
    }

    assert!(!game.is_over());
    assert!(game.queue_len() > SHARED_QUEUE_BATCH);
    assert!(game.queue_position(1).unwrap() > SHARED_QUEUE_BATCH);

    // The idle player has only drawn the active piece, next piece and previews
    let lookahead = 1 + 1 + DifficultyConfig::from(Difficulty::Normal).preview_pieces;
    assert_eq!(game.queue_position(2), Some(lookahead));
}

#[test]
fn test_commands_only_affect_their_player() {
    let mut game = Match::new(3, Difficulty::Normal, 4).unwrap();
    let before: Vec<_> = (1..=3).map(|id| game.player(id).unwrap().active()).collect();

    game.apply_action(2, GameAction::RotateCw);
    game.apply_action(2, GameAction::MoveLeft);

    assert_eq!(game.player(1).unwrap().active(), before[0]);
    assert_ne!(game.player(2).unwrap().active(), before[1]);
    assert_eq!(game.player(3).unwrap().active(), before[2]);
}

#[test]
fn test_rotate_ccw_routed() {
    let mut game = Match::new(2, Difficulty::Normal, 4).unwrap();
    let start = game.player(1).unwrap().active().unwrap();
    if game.rotate(1, Direction::Ccw) {
        let now = game.player(1).unwrap().active().unwrap();
        assert_eq!(now.rotation, start.rotation.rotate_ccw());
    }
}

#[test]
fn test_topped_out_player_loses_to_survivor() {
    let mut game = Match::new(2, Difficulty::Normal, 12).unwrap();

    // Player 1 stacks at the spawn column until out
    while !game.player(1).unwrap().game_over() {
        assert!(game.hard_drop(1));
    }

    assert!(game.is_over());
    assert_eq!(game.winner(), Some(2));
    assert!(!game.player(2).unwrap().game_over());
    assert!(!game.tick(1_000_000));
}

#[test]
fn test_gravity_advances_all_players() {
    let mut game = Match::new(4, Difficulty::Normal, 6).unwrap();
    let mut now = 0u64;
    game.tick(now);
    for _ in 0..(1_000 / TICK_MS as u64) + 1 {
        now += TICK_MS as u64;
        game.tick(now);
    }

    for id in 1..=4 {
        assert_eq!(game.player(id).unwrap().active().unwrap().y, 1);
    }
}

#[test]
fn test_leaderboard_after_play() {
    let mut game = Match::new(3, Difficulty::Hard, 8).unwrap();
    game.set_player_name(3, "Cy");
    game.hard_drop(3);
    game.hard_drop(3);
    game.hard_drop(1);

    let board = game.leaderboard();
    assert_eq!(board[0].name, "Cy");
    assert_eq!(board[1].id, 1);
    assert_eq!(board[2].id, 2);
    assert!(board.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_reset_match_restarts_queue() {
    let mut game = Match::new(2, Difficulty::Normal, 5).unwrap();
    for _ in 0..10 {
        game.hard_drop(1);
    }
    game.reset_match();

    assert_eq!(game.queue_position(1), game.queue_position(2));
    assert_eq!(seen(&game, 1), seen(&game, 2));
    assert_eq!(game.player(1).unwrap().score(), 0);
}
