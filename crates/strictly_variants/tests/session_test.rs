//! Tests for the game session FSM.

use std::time::Duration;
use strictly_variants::{
    BoardView, GameError, GameResult, GameSession, MoveIntent, Phase, Player, Position,
    SessionConfig, Variant, run_match,
};

fn cell(row: usize, col: usize) -> MoveIntent {
    MoveIntent::Cell { row, col }
}

/// X wins the top row against a passive O.
fn play_x_win(session: &mut GameSession) {
    for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
        let player = session.current_player();
        session.apply_move(cell(row, col), player).unwrap();
    }
}

#[test]
fn test_win_scores_once_and_ends_game() {
    let mut session = GameSession::new(Variant::Classic, false);
    play_x_win(&mut session);

    assert_eq!(session.phase(), Phase::GameOver);
    assert_eq!(session.current_result().winner(), Some(Player::X));
    assert_eq!(*session.score().x_wins(), 1);
    assert_eq!(*session.score().o_wins(), 0);

    assert_eq!(
        session.apply_move(cell(2, 2), Player::O),
        Err(GameError::SessionNotPlaying(Phase::GameOver))
    );
    session.tick(Duration::from_secs(5)).unwrap();
    assert_eq!(*session.score().x_wins(), 1);
}

#[test]
fn test_reset_keeps_score() {
    let mut session = GameSession::new(Variant::Classic, false);
    play_x_win(&mut session);
    session.reset();

    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.current_result(), GameResult::InProgress);
    assert_eq!(*session.score().x_wins(), 1);

    session.reset_score();
    assert_eq!(*session.score().x_wins(), 0);
}

#[test]
fn test_reset_is_idempotent() {
    let mut session = GameSession::new(Variant::Ultimate, false);
    session
        .apply_move(
            MoveIntent::Meta {
                big_row: 0,
                big_col: 0,
                small_row: 1,
                small_col: 2,
            },
            Player::X,
        )
        .unwrap();
    session.reset();
    let once = session.board_state();
    session.reset();
    assert_eq!(session.board_state(), once);
    assert_eq!(session.active_constraint(), None);
    assert!(matches!(once, BoardView::Meta(_)));
}

#[test]
fn test_rejected_move_keeps_turn() {
    let mut session = GameSession::new(Variant::Classic, false);
    session.apply_move(cell(1, 1), Player::X).unwrap();
    assert!(session.apply_move(cell(1, 1), Player::O).is_err());
    assert!(session.apply_move(cell(5, 0), Player::O).is_err());
    assert_eq!(session.current_player(), Player::O);
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn test_bot_answers_after_delay() {
    let config = SessionConfig::new(Variant::Classic, true)
        .with_seed(Some(11))
        .with_bot_delay(Duration::from_millis(500));
    let mut session = GameSession::with_config(&config).unwrap();
    session.apply_move(cell(0, 0), Player::X).unwrap();

    assert_eq!(session.tick(Duration::from_millis(499)).unwrap(), Phase::WaitingForBot);
    assert_eq!(session.tick(Duration::from_millis(1)).unwrap(), Phase::Playing);

    let BoardView::Flat(board) = session.board_state() else {
        panic!("Classic uses a flat board");
    };
    assert_eq!(board.count(Player::O), 1);
}

#[test]
fn test_bot_blocks_in_session() {
    let config = SessionConfig::new(Variant::Classic, true)
        .with_seed(Some(5))
        .with_bot_delay(Duration::ZERO);
    let mut session = GameSession::with_config(&config).unwrap();

    session.apply_move(cell(0, 0), Player::X).unwrap();
    session.tick(Duration::ZERO).unwrap();
    let BoardView::Flat(board) = session.board_state() else {
        panic!("Classic uses a flat board");
    };
    // Take whichever of the top-row cells the bot left open.
    let second = if board.is_empty(Position::TopCenter) {
        (0, 1)
    } else {
        (1, 0)
    };
    session.apply_move(cell(second.0, second.1), Player::X).unwrap();
    session.tick(Duration::ZERO).unwrap();

    let threat = if second == (0, 1) {
        Position::TopRight
    } else {
        Position::BottomLeft
    };
    let BoardView::Flat(board) = session.board_state() else {
        panic!("Classic uses a flat board");
    };
    assert!(!board.is_empty(threat));
}

#[test]
fn test_match_totals_add_up() {
    let config = SessionConfig::new(Variant::Gravity, true)
        .with_seed(Some(21))
        .with_bot_delay(Duration::ZERO);
    let summary = run_match(&config, 8).unwrap();
    assert_eq!(
        summary.x_wins() + summary.o_wins() + summary.draws() + summary.unfinished(),
        8
    );
    assert!(*summary.moves() >= 8 * 5);
}
