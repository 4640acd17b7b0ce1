//! Integration tests for the single-player engine

use blockfall::core::{Game, GameState, Phase, SequenceSource};
use blockfall::types::{Difficulty, Direction, GameAction, ShapeKind, BOARD_WIDTH};

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(Difficulty::Normal, 12345);
    assert_eq!(game.phase(), Phase::Active);
    assert!(game.state().active().is_some());
    assert!(game.state().next_piece().is_some());

    assert!(game.apply_action(GameAction::Pause));
    assert_eq!(game.phase(), Phase::Paused);
    assert!(!game.apply_action(GameAction::HardDrop));

    assert!(game.apply_action(GameAction::Pause));
    assert!(game.apply_action(GameAction::HardDrop));
}

#[test]
fn test_first_hard_drop_scores_only_drop_bonus() {
    let mut source = SequenceSource::new([ShapeKind::O]);
    let mut state = GameState::new(Difficulty::Normal, &mut source);

    assert!(state.hard_drop(&mut source));
    assert_eq!(state.score(), 18 * 5);
    assert_eq!(state.lines(), 0);
}

#[test]
fn test_tetris_at_normal_scores_800() {
    let mut source = SequenceSource::new([ShapeKind::I]);
    let mut state = GameState::new(Difficulty::Normal, &mut source);

    // Four rows full except column 0
    for y in 16..20 {
        for x in 1..BOARD_WIDTH as i8 {
            state.board_mut().set(x, y, Some(ShapeKind::Z));
        }
    }

    // Vertical I in column 0: x + 2 = 0
    assert!(state.rotate(Direction::Cw));
    while state.shift(-1) {}
    let before = state.score();
    state.hard_drop(&mut source);

    // 16 rows of hard drop + tetris
    assert_eq!(state.score() - before, 16 * 5 + 800);
    assert_eq!(state.lines(), 4);
    assert!(state.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_single_at_expert_scores_200() {
    let mut source = SequenceSource::new([ShapeKind::O]);
    let mut state = GameState::new(Difficulty::Expert, &mut source);

    for x in 2..BOARD_WIDTH as i8 {
        state.board_mut().set(x, 19, Some(ShapeKind::Z));
    }
    while state.shift(-1) {}
    state.hard_drop(&mut source);

    // 18 rows × 5 × 2.0 + single × 2.0
    assert_eq!(state.score(), 180 + 200);
    assert_eq!(state.lines(), 1);
}

#[test]
fn test_level_rises_at_multiples_of_lines_per_level() {
    let mut source = SequenceSource::new([ShapeKind::I]);
    let mut state = GameState::new(Difficulty::Insane, &mut source);
    let mut last_level = state.level();

    for round in 1..=12u32 {
        // Bottom row open only where the horizontal I lands
        for x in 0..BOARD_WIDTH as i8 {
            let cell = (!(4..8).contains(&x)).then_some(ShapeKind::Z);
            state.board_mut().set(x, 19, cell);
        }
        state.hard_drop(&mut source);

        assert_eq!(state.lines(), round);
        assert_eq!(state.level(), round / 5 + 1);
        assert!(state.level() >= last_level);
        last_level = state.level();
    }
    assert_eq!(state.fall_interval_ms(), 168);
}

#[test]
fn test_gravity_tick_sequence() {
    let mut game = Game::new(Difficulty::Hard, 3);
    assert!(!game.tick(10_000));
    assert!(!game.tick(10_699));
    assert!(game.tick(10_700));

    let y = game.state().active().unwrap().y;
    assert!(!game.tick(10_700));
    assert_eq!(game.state().active().unwrap().y, y);
}

#[test]
fn test_reset_restores_initial_state() {
    let mut game = Game::new(Difficulty::Insane, 77);
    while !game.state().game_over() {
        game.hard_drop();
    }
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(!game.move_left());
    assert!(!game.toggle_pause());

    game.reset();
    let state = game.state();
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.lines(), 0);
    assert!(!state.game_over());
    assert!(!state.paused());
    assert!(state.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_difficulty_change_mid_game() {
    let mut game = Game::new(Difficulty::Easy, 5);
    game.hard_drop();
    let score = game.state().score();

    assert!(game.set_difficulty(Difficulty::Insane));
    assert_eq!(game.state().difficulty(), Difficulty::Insane);
    assert_eq!(game.state().fall_interval_ms(), 300);
    assert_eq!(game.state().score(), score);
    assert!(game.state().preview_pieces().is_empty());

    let snapshot = game.snapshot();
    assert!(snapshot.ghost.is_empty());
    assert_eq!(snapshot.difficulty, Difficulty::Insane);
}

#[test]
fn test_snapshot_reflects_state() {
    let mut game = Game::new(Difficulty::Easy, 11);
    game.hard_drop();
    let snapshot = game.snapshot();

    assert_eq!(snapshot.score, game.state().score());
    assert_eq!(snapshot.previews.len(), 3);
    assert_eq!(snapshot.next, game.state().next_piece());
    assert_eq!(snapshot.ghost.len(), snapshot.active.as_ref().unwrap().cells.len());
    assert!(snapshot.filled_cells() >= 4);
    assert!(snapshot.playable());
}

#[test]
fn test_lock_event_reports_clear() {
    let mut source = SequenceSource::new([ShapeKind::O]);
    let mut state = GameState::new(Difficulty::Normal, &mut source);
    for x in 2..BOARD_WIDTH as i8 {
        state.board_mut().set(x, 19, Some(ShapeKind::T));
        state.board_mut().set(x, 18, Some(ShapeKind::T));
    }
    while state.shift(-1) {}
    state.hard_drop(&mut source);

    let event = state.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 2);
    assert_eq!(event.line_clear_score, 300);
    assert!(!event.level_up);
}
