//! Bot-vs-bot matches driven through the public session API.

use crate::bot::Bot;
use crate::config::{ConfigError, SessionConfig};
use crate::games::{BoardView, GameError, GameResult, Phase, Variant};
use crate::session::GameSession;
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Simulated frame length.
pub const FRAME: Duration = Duration::from_millis(16);

/// Moves after which a game is abandoned.
pub const MAX_MOVES_PER_GAME: u32 = 200;

/// Frames after which a game is abandoned, however few moves were made.
pub const MAX_FRAMES_PER_GAME: u32 = 100_000;

/// Why a match could not be played.
#[derive(Debug, Clone, Display, Error, From)]
pub enum MatchError {
    /// The session configuration was rejected.
    #[display("{_0}")]
    Config(ConfigError),
    /// The session refused a move.
    #[display("{_0}")]
    Game(GameError),
}

/// Totals for a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct MatchSummary {
    /// Variant played.
    variant: Variant,
    /// Games played.
    games: u32,
    /// Games won by X.
    x_wins: u32,
    /// Games won by O.
    o_wins: u32,
    /// Drawn games.
    draws: u32,
    /// Games abandoned at the move limit.
    unfinished: u32,
    /// Moves played across all games.
    moves: u32,
    /// Position at the end of the last game.
    last_board: Option<BoardView>,
}

/// Plays `games` games between the session's bot and a second bot playing the other side.
#[instrument(skip(config), fields(variant = %config.variant()))]
pub fn run_match(config: &SessionConfig, games: u32) -> Result<MatchSummary, MatchError> {
    let config = config.clone().with_vs_bot(true);
    let mut session = GameSession::with_config(&config)?;
    let challenger_side = config.bot_player().opponent();
    let mut challenger = match config.seed() {
        Some(seed) => Bot::seeded(challenger_side, seed.wrapping_add(1)),
        None => Bot::new(challenger_side),
    };

    let mut summary = MatchSummary {
        variant: *config.variant(),
        games,
        x_wins: 0,
        o_wins: 0,
        draws: 0,
        unfinished: 0,
        moves: 0,
        last_board: None,
    };

    for game in 0..games {
        let mut moves = 0;
        let mut frames = 0;
        while session.phase() != Phase::GameOver
            && moves < MAX_MOVES_PER_GAME
            && frames < MAX_FRAMES_PER_GAME
        {
            match session.phase() {
                Phase::Playing => {
                    let Some(intent) = challenger.select(session.engine()) else {
                        warn!(game, "Challenger has no legal move");
                        break;
                    };
                    session.apply_move(intent, challenger_side)?;
                    moves += 1;
                }
                Phase::WaitingForBot => {
                    frames += 1;
                    if session.tick(FRAME)? != Phase::WaitingForBot {
                        moves += 1;
                    }
                }
                Phase::AnimatingMove | Phase::GameOver => {
                    frames += 1;
                    session.tick(FRAME)?;
                }
            }
        }
        summary.moves += moves;

        match session.current_result() {
            GameResult::Win(_, _) => {}
            GameResult::Draw => summary.draws += 1,
            GameResult::InProgress => summary.unfinished += 1,
        }
        debug!(game, result = %session.current_result(), moves, frames, "Game finished");
        summary.last_board = Some(session.board_state());
        session.reset();
    }

    let score = session.score();
    summary.x_wins = *score.x_wins();
    summary.o_wins = *score.o_wins();
    info!(
        x_wins = summary.x_wins,
        o_wins = summary.o_wins,
        draws = summary.draws,
        "Match complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stalled_bot_abandons_game() {
        let config = SessionConfig::new(Variant::Classic, true)
            .with_seed(Some(4))
            .with_bot_delay(Duration::from_secs(10_000));
        let summary = run_match(&config, 2).unwrap();
        assert_eq!(*summary.unfinished(), 2);
        assert_eq!(*summary.moves(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config: SessionConfig = toml::from_str("drop_speed = -1.0\n").unwrap();
        assert!(matches!(run_match(&config, 1), Err(MatchError::Config(_))));
    }

    #[test]
    fn test_last_board_kept() {
        let config = SessionConfig::new(Variant::Ultimate, true)
            .with_seed(Some(2))
            .with_bot_delay(Duration::ZERO);
        let summary = run_match(&config, 1).unwrap();
        assert!(matches!(summary.last_board(), Some(BoardView::Meta(_))));
    }
}
