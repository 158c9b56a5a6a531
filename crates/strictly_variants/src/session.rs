//! Tick-driven game session shared by every variant.
//!
//! The session owns one engine, whose turn it is, the running score and the
//! phase machine:
//!
//! ```text
//! Playing ──move──▶ AnimatingMove ──landed──┐   (Gravity only)
//!    │                                      ▼
//!    ├──move──▶ (win/draw) ──────────────▶ GameOver ──reset──▶ Playing
//!    └──move──▶ WaitingForBot ──delay──▶ bot move
//! ```
//!
//! Nothing here blocks or schedules itself. The caller drives time through
//! [`GameSession::tick`].

use crate::bot::Bot;
use crate::config::{ConfigError, SessionConfig};
use crate::games::invariants::{BalancedMarkersInvariant, Invariant};
use crate::games::{
    BoardView, DropState, GameError, GameResult, MoveIntent, Phase, Player, Position, Score,
    Variant, VariantEngine,
};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// One game of one variant, replayable via [`GameSession::reset`].
#[derive(Debug, Clone)]
pub struct GameSession {
    engine: VariantEngine,
    current_player: Player,
    score: Score,
    phase: Phase,
    bot: Option<Bot>,
    bot_delay: Duration,
    bot_timer: Option<Duration>,
    forced_result: Option<GameResult>,
}

impl GameSession {
    /// Creates a session with default settings.
    #[instrument]
    pub fn new(variant: Variant, vs_bot: bool) -> Self {
        Self::build(&SessionConfig::new(variant, vs_bot))
    }

    /// Creates a session from a configuration.
    ///
    /// Fails when the configuration does not validate.
    #[instrument(skip(config), fields(variant = %config.variant(), vs_bot = config.vs_bot()))]
    pub fn with_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &SessionConfig) -> Self {
        let bot = config.vs_bot().then(|| match config.seed() {
            Some(seed) => Bot::seeded(*config.bot_player(), *seed),
            None => Bot::new(*config.bot_player()),
        });
        let mut session = Self {
            engine: VariantEngine::new(*config.variant(), *config.drop_speed()),
            current_player: Player::X,
            score: Score::default(),
            phase: Phase::Playing,
            bot,
            bot_delay: config.bot_delay(),
            bot_timer: None,
            forced_result: None,
        };
        session.begin_turn();
        info!(variant = %session.variant(), "Game session created");
        session
    }

    /// Applies a move for `player`.
    ///
    /// Rejected moves leave the session unchanged.
    #[instrument(skip(self), fields(variant = %self.variant(), phase = %self.phase))]
    pub fn apply_move(
        &mut self,
        intent: MoveIntent,
        player: Player,
    ) -> Result<GameResult, GameError> {
        if self.phase != Phase::Playing {
            warn!(%intent, "Move rejected, session not accepting moves");
            return Err(GameError::SessionNotPlaying(self.phase));
        }
        if player != self.current_player {
            warn!(%player, expected = %self.current_player, "Player tried to move out of turn");
            return Err(GameError::NotYourTurn(player));
        }

        self.engine.apply_move(intent, player).inspect_err(|e| {
            warn!(%intent, error = %e, "Invalid move");
        })?;

        if self.engine.pending_animation().is_some() {
            debug!("Drop in flight");
            self.phase = Phase::AnimatingMove;
            return Ok(self.current_result());
        }
        self.finish_move()
    }

    /// Advances the drop animation or the bot countdown by `delta`.
    ///
    /// Returns the phase after the tick.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn tick(&mut self, delta: Duration) -> Result<Phase, GameError> {
        match self.phase {
            Phase::AnimatingMove => {
                let landed = match &mut self.engine {
                    VariantEngine::Gravity(engine) => engine.tick(delta)?.is_some(),
                    _ => true,
                };
                if landed {
                    self.finish_move()?;
                }
            }
            Phase::WaitingForBot => {
                let remaining = self.bot_timer.unwrap_or_default().saturating_sub(delta);
                if remaining.is_zero() {
                    self.play_bot()?;
                } else {
                    self.bot_timer = Some(remaining);
                }
            }
            Phase::Playing | Phase::GameOver => {}
        }
        Ok(self.phase)
    }

    /// Starts a new game of the same variant. The score is kept.
    #[instrument(skip(self), fields(variant = %self.variant()))]
    pub fn reset(&mut self) {
        self.engine.reset();
        self.current_player = Player::X;
        self.bot_timer = None;
        self.forced_result = None;
        self.begin_turn();
        info!("Game reset");
    }

    /// Clears both win counters.
    #[instrument(skip(self))]
    pub fn reset_score(&mut self) {
        self.score = Score::default();
        info!("Score reset");
    }

    /// Snapshot of the board(s).
    pub fn board_state(&self) -> BoardView {
        self.engine.board_view()
    }

    /// Outcome of the current game.
    pub fn current_result(&self) -> GameResult {
        self.forced_result
            .clone()
            .unwrap_or_else(|| self.engine.result().clone())
    }

    /// Player to move, or whose piece is falling.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Wins so far.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Sub-board the next move must target (Ultimate only).
    pub fn active_constraint(&self) -> Option<Position> {
        self.engine.active_constraint()
    }

    /// The falling piece, if any (Gravity only).
    pub fn pending_animation(&self) -> Option<DropState> {
        self.engine.pending_animation()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Variant being played.
    pub fn variant(&self) -> Variant {
        self.engine.variant()
    }

    /// The underlying engine.
    pub fn engine(&self) -> &VariantEngine {
        &self.engine
    }

    /// Side the bot plays, if any.
    pub fn bot_player(&self) -> Option<Player> {
        self.bot.as_ref().map(Bot::player)
    }

    /// Time left before the bot moves.
    pub fn bot_countdown(&self) -> Option<Duration> {
        self.bot_timer
    }

    fn begin_turn(&mut self) {
        if self.bot_player() == Some(self.current_player) {
            self.phase = Phase::WaitingForBot;
            self.bot_timer = Some(self.bot_delay);
            debug!(delay = ?self.bot_delay, "Waiting for bot");
        } else {
            self.phase = Phase::Playing;
            self.bot_timer = None;
        }
    }

    /// Scores a finished game or hands the turn over.
    fn finish_move(&mut self) -> Result<GameResult, GameError> {
        if cfg!(debug_assertions) && !BalancedMarkersInvariant::holds(&self.engine) {
            return Err(GameError::InvariantViolation(
                <BalancedMarkersInvariant as Invariant<VariantEngine>>::description().to_string(),
            ));
        }

        let result = self.current_result();
        match &result {
            GameResult::Win(winner, _) => {
                self.score.record(*winner);
                self.phase = Phase::GameOver;
                info!(
                    %winner,
                    x_wins = self.score.x_wins(),
                    o_wins = self.score.o_wins(),
                    "Game won"
                );
            }
            GameResult::Draw => {
                self.phase = Phase::GameOver;
                info!("Game drawn");
            }
            GameResult::InProgress => {
                self.current_player = self.current_player.opponent();
                self.begin_turn();
            }
        }
        Ok(result)
    }

    fn play_bot(&mut self) -> Result<(), GameError> {
        self.bot_timer = None;
        self.phase = Phase::Playing;
        let Some(bot) = self.bot.as_mut() else {
            return Ok(());
        };
        let player = bot.player();
        match bot.select(&self.engine) {
            Some(intent) => {
                if let Err(e) = self.apply_move(intent, player) {
                    self.begin_turn();
                    return Err(e);
                }
            }
            None => {
                info!(%player, "Bot has no legal move, game drawn");
                self.forced_result = Some(GameResult::Draw);
                self.phase = Phase::GameOver;
            }
        }
        Ok(())
    }
}
