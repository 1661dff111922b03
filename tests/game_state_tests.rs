//! Game state tests - session lifecycle, scoring and level progression

use blockfall::core::scoring::{calculate_level, get_fall_interval_ms};
use blockfall::core::{GameError, GameState, Progress, SequencePieces};
use blockfall::types::{GameAction, GameStatus, PieceKind, StepOutcome, BOARD_WIDTH};

fn started(kinds: &[PieceKind]) -> GameState<SequencePieces> {
    let mut game = GameState::with_source(SequencePieces::new(kinds.to_vec()));
    game.reset();
    game
}

/// Fill rows `from..20` except the columns in `gaps`.
fn fill_rows_except(game: &mut GameState<SequencePieces>, from: i8, gaps: &[i8]) {
    for y in from..20 {
        for x in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&x) {
                game.board_mut().set(x, y, Some(PieceKind::J));
            }
        }
    }
}

// ============== Lifecycle ==============

#[test]
fn test_commands_require_reset() {
    let mut game = GameState::new(7);
    assert!(!game.started());
    assert_eq!(game.tick(), Err(GameError::NotStarted));
    assert_eq!(game.hard_drop(), Err(GameError::NotStarted));
    assert_eq!(game.apply_action(GameAction::MoveLeft), Err(GameError::NotStarted));
    assert_eq!(
        GameError::NotStarted.to_string(),
        "game not initialized: call reset() first"
    );

    game.reset();
    assert!(game.started());
    assert_eq!(game.status(), GameStatus::Running);
    assert!(game.active().is_some());
    assert!(game.next_piece().is_some());
}

#[test]
fn test_i_piece_spawns_at_column_three() {
    let game = started(&[PieceKind::I]);
    let active = game.active().unwrap();
    assert_eq!(active.kind, PieceKind::I);
    assert_eq!((active.x, active.y), (3, 0));
    let cells: Vec<_> = active.cells().collect();
    assert_eq!(cells, vec![(3, 0), (4, 0), (5, 0), (6, 0)]);
}

#[test]
fn test_reset_clears_session() {
    let mut game = started(&[PieceKind::O]);
    game.hard_drop().unwrap();
    game.toggle_pause().unwrap();
    assert!(game.score() > 0);

    game.reset();
    assert_eq!(game.session_id(), 2);
    assert_eq!(game.piece_id(), 1);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.board().filled_count(), 0);
    assert!(game.take_last_event().is_none());
}

#[test]
fn test_same_seed_same_pieces() {
    let mut a = GameState::new(2024);
    let mut b = GameState::new(2024);
    a.reset();
    b.reset();

    for _ in 0..30 {
        assert_eq!(a.active().map(|p| p.kind), b.active().map(|p| p.kind));
        assert_eq!(a.next_piece(), b.next_piece());
        if a.game_over() {
            break;
        }
        a.hard_drop().unwrap();
        b.hard_drop().unwrap();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

// ============== Drops and scoring ==============

#[test]
fn test_hard_drop_five_rows_scores_ten() {
    let mut game = started(&[PieceKind::O]);
    for _ in 0..13 {
        game.tick().unwrap();
    }
    // O now sits at y = 13 and can fall five more rows.
    assert_eq!(game.active().unwrap().y, 13);
    assert_eq!(game.hard_drop(), Ok(StepOutcome::Locked));
    assert_eq!(game.score(), 10);
}

#[test]
fn test_soft_drop_point_only_when_moved() {
    let mut game = started(&[PieceKind::O]);
    for _ in 0..18 {
        assert_eq!(game.soft_drop(), Ok(StepOutcome::Moved));
    }
    assert_eq!(game.score(), 18);

    assert_eq!(game.soft_drop(), Ok(StepOutcome::Locked));
    assert_eq!(game.score(), 18);
}

#[test]
fn test_single_line_clears_at_levels_one_and_two() {
    let mut game = started(&[PieceKind::I]);
    // Eleven rows with a four-wide well where the I spawns.
    fill_rows_except(&mut game, 9, &[3, 4, 5, 6]);

    for n in 1..=10 {
        game.hard_drop().unwrap();
        let event = game.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.line_clear_score, 100, "clear {} scores at level 1", n);
    }
    assert_eq!(game.lines(), 10);
    assert_eq!(game.level(), 2);
    assert_eq!(game.fall_interval_ms(), 450);
    assert_eq!(game.score(), 10 * (38 + 100));

    game.hard_drop().unwrap();
    let event = game.take_last_event().unwrap();
    assert_eq!(event.line_clear_score, 200);
    assert_eq!(game.score(), 10 * 138 + 38 + 200);
    assert_eq!(game.board().filled_count(), 0);
}

#[test]
fn test_vertical_i_clears_four_lines() {
    let mut game = started(&[PieceKind::I]);
    fill_rows_except(&mut game, 16, &[0]);

    assert_eq!(game.rotate(), Ok(true));
    assert_eq!(game.active().unwrap().x, 3);
    for _ in 0..3 {
        assert_eq!(game.move_left(), Ok(true));
    }
    assert_eq!(game.move_left(), Ok(false));

    game.hard_drop().unwrap();
    let event = game.take_last_event().unwrap();
    assert_eq!(event.kind, PieceKind::I);
    assert_eq!(event.lines_cleared, 4);
    assert_eq!(event.line_clear_score, 800);
    assert_eq!(game.score(), 16 * 2 + 800);
    assert_eq!(game.board().filled_count(), 0);
}

#[test]
fn test_level_curve() {
    let mut progress = Progress::new();
    for _ in 0..6 {
        progress.record_line_clear(4);
    }
    progress.record_line_clear(1);
    assert_eq!(progress.lines, 25);
    assert_eq!(progress.level, 3);
    assert_eq!(progress.fall_interval_ms, 400);

    assert_eq!(calculate_level(0), 1);
    assert_eq!(calculate_level(9), 1);
    assert_eq!(calculate_level(10), 2);
    assert_eq!(get_fall_interval_ms(9), 100);
    assert_eq!(get_fall_interval_ms(50), 100);
}

// ============== Pause and game over ==============

#[test]
fn test_pause_freezes_everything_but_resume() {
    let mut game = started(&[PieceKind::T]);
    let before = game.snapshot();

    assert_eq!(game.apply_action(GameAction::Pause), Ok(true));
    assert!(game.paused());
    assert_eq!(game.tick(), Ok(StepOutcome::Idle));
    assert_eq!(game.hard_drop(), Ok(StepOutcome::Idle));
    assert_eq!(game.move_right(), Ok(false));
    assert_eq!(game.rotate(), Ok(false));
    assert_eq!(game.snapshot().active, before.active);
    assert_eq!(game.score(), 0);

    assert_eq!(game.toggle_pause(), Ok(true));
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.tick(), Ok(StepOutcome::Moved));
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut game = started(&[PieceKind::O]);
    for i in 0..9 {
        game.hard_drop().unwrap();
        assert_eq!(game.status(), GameStatus::Running, "drop {}", i);
    }
    game.hard_drop().unwrap();
    assert!(game.game_over());
    assert!(game.take_last_event().unwrap().topped_out);
    // Rows 18 - 2i for i in 0..10.
    assert_eq!(game.score(), 180);

    let board = game.board().clone();
    assert_eq!(game.tick(), Ok(StepOutcome::Idle));
    assert_eq!(game.move_left(), Ok(false));
    assert_eq!(game.toggle_pause(), Ok(false));
    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(game.board(), &board);

    assert_eq!(game.apply_action(GameAction::Restart), Ok(true));
    assert_eq!(game.status(), GameStatus::Running);
}

#[test]
fn test_blocked_spawn_is_game_over() {
    let mut game = started(&[PieceKind::T]);
    for x in 3..7 {
        game.board_mut().set(x, 0, Some(PieceKind::S));
        game.board_mut().set(x, 1, Some(PieceKind::S));
    }
    assert_eq!(game.spawn(), Ok(false));
    assert!(game.game_over());
    assert!(game.active().is_some());

    // Further spawns leave the ended session untouched.
    let snap = game.snapshot();
    assert_eq!(game.spawn(), Ok(false));
    assert_eq!(game.snapshot(), snap);
}

#[test]
fn test_spawn_before_reset_is_rejected() {
    let mut game = GameState::with_source(SequencePieces::repeat(PieceKind::T));
    assert_eq!(game.spawn(), Err(GameError::NotStarted));
    assert!(game.active().is_none());
    assert!(game.next_piece().is_none());
    assert_eq!(game.piece_id(), 0);
    assert_eq!(game.tick(), Err(GameError::NotStarted));

    game.reset();
    assert_eq!(game.spawn(), Ok(true));
    assert_eq!(game.piece_id(), 2);
}
