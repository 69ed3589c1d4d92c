//! Session wrapper binding a level attempt, its live round, and RNG streams.
//!
//! This is the boundary the presentation layer drives. Every command runs
//! to completion, leaves the state untouched on rejection, and exposes a
//! fresh snapshot for rendering.

use serde::Serialize;

use crate::attempt::{AttemptResult, AttemptState, LevelAttempt, RoundVerdict};
use crate::campaign::{CampaignError, level_spec};
use crate::cards::Card;
use crate::constants::{
    LOG_CARD_DESELECTED, LOG_CARD_SELECTED, LOG_DIE_SELECTED, LOG_DRAW_BUST, LOG_DRAW_LUCKY,
    LOG_LEVEL_DEFEAT, LOG_LEVEL_VICTORY, LOG_ROUND_BANKED, LOG_ROUND_STARTED,
};
use crate::rng::RngBundle;
use crate::round::{CardToggle, Round, RoundActionError, RoundPhase};
use crate::score::ScoreBreakdown;

/// Presentation-level phase combining attempt and round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Selecting,
    Playing,
    RoundEnd,
    GameOver,
}

/// Result of one accepted session command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandOutcome {
    /// Stable key the notification layer maps to user-facing text.
    pub log_key: &'static str,
    /// Terminal attempt payload; carried exactly once, on the command that
    /// settles the attempt.
    pub result: Option<AttemptResult>,
}

impl CommandOutcome {
    const fn quiet(log_key: &'static str) -> Self {
        Self {
            log_key,
            result: None,
        }
    }
}

/// Full state snapshot served to the presentation layer after every
/// command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub level_index: usize,
    pub phase: SessionPhase,
    pub dice: [u8; 2],
    pub cards: Vec<Card>,
    pub selected_die: Option<usize>,
    pub selected_cards: Vec<usize>,
    pub round_score: u32,
    pub score_breakdown: ScoreBreakdown,
    pub cumulative_score: u32,
    pub current_turn: u32,
    pub turn_budget: u32,
}

/// One live play session of a campaign level.
#[derive(Debug, Clone)]
pub struct GameSession {
    attempt: LevelAttempt,
    round: Round,
    rng: RngBundle,
}

impl GameSession {
    /// Start an attempt at a campaign level, rolling the first round.
    ///
    /// # Errors
    ///
    /// Returns `LevelNotFound` for an out-of-range level index.
    pub fn begin(level_index: usize, seed: u64) -> Result<Self, CampaignError> {
        let spec = level_spec(level_index)?;
        let rng = RngBundle::from_user_seed(seed);
        let round = Round::deal(&mut *rng.dice(), &mut *rng.cards());
        Ok(Self {
            attempt: LevelAttempt::new(level_index, spec.goal),
            round,
            rng,
        })
    }

    /// Commit to one of the rolled dice.
    ///
    /// # Errors
    ///
    /// Advisory rejection; the session is unchanged.
    pub fn select_die(&mut self, index: usize) -> Result<CommandOutcome, RoundActionError> {
        self.ensure_live()?;
        self.round.select_die(index)?;
        Ok(CommandOutcome::quiet(LOG_DIE_SELECTED))
    }

    /// Toggle a card in or out of the selection.
    ///
    /// # Errors
    ///
    /// Advisory rejection; the session is unchanged.
    pub fn toggle_card(&mut self, index: usize) -> Result<CommandOutcome, RoundActionError> {
        self.ensure_live()?;
        let toggle = self.round.toggle_card(index)?;
        Ok(CommandOutcome::quiet(match toggle {
            CardToggle::Selected => LOG_CARD_SELECTED,
            CardToggle::Deselected => LOG_CARD_DESELECTED,
        }))
    }

    /// The risk action: draw one more card. A miss zeroes the round and
    /// settles it against the attempt immediately.
    ///
    /// # Errors
    ///
    /// Advisory rejection; the session is unchanged.
    pub fn draw_extra_card(&mut self) -> Result<CommandOutcome, RoundActionError> {
        self.ensure_live()?;
        let outcome = self.round.draw_extra_card(&mut *self.rng.cards())?;
        if !outcome.busted {
            return Ok(CommandOutcome::quiet(LOG_DRAW_LUCKY));
        }
        let verdict = self.attempt.on_round_ended(0, false);
        Ok(CommandOutcome {
            log_key: match verdict {
                RoundVerdict::Lost(_) => LOG_LEVEL_DEFEAT,
                _ => LOG_DRAW_BUST,
            },
            result: verdict.result(),
        })
    }

    /// Bank the current selection and settle the round against the attempt.
    ///
    /// # Errors
    ///
    /// Advisory rejection; the session is unchanged.
    pub fn end_round(&mut self) -> Result<CommandOutcome, RoundActionError> {
        self.ensure_live()?;
        let breakdown = self.round.end_round()?;
        let verdict = self.attempt.on_round_ended(breakdown.total, true);
        Ok(CommandOutcome {
            log_key: match verdict {
                RoundVerdict::Won(_) => LOG_LEVEL_VICTORY,
                RoundVerdict::Lost(_) => LOG_LEVEL_DEFEAT,
                RoundVerdict::Continue => LOG_ROUND_BANKED,
            },
            result: verdict.result(),
        })
    }

    /// Roll dice and deal cards for the next round.
    ///
    /// # Errors
    ///
    /// Advisory rejection when the attempt is settled or a round is still
    /// in progress.
    pub fn start_next_round(&mut self) -> Result<CommandOutcome, RoundActionError> {
        match self.attempt.state {
            AttemptState::Finished => Err(RoundActionError::AttemptSettled),
            AttemptState::InRound => Err(RoundActionError::RoundInProgress),
            AttemptState::RoundEnd => {
                self.attempt.start_next_round();
                self.round = Round::deal(&mut *self.rng.dice(), &mut *self.rng.cards());
                Ok(CommandOutcome::quiet(LOG_ROUND_STARTED))
            }
        }
    }

    /// Presentation-level phase combining attempt and round state.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self.attempt.state {
            AttemptState::Finished => SessionPhase::GameOver,
            AttemptState::RoundEnd => SessionPhase::RoundEnd,
            AttemptState::InRound => match self.round.phase {
                RoundPhase::Selecting => SessionPhase::Selecting,
                RoundPhase::Playing => SessionPhase::Playing,
                RoundPhase::RoundEnd | RoundPhase::Busted => SessionPhase::RoundEnd,
            },
        }
    }

    /// Full snapshot for rendering; recomputed on demand.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let breakdown = self.round.score();
        SessionSnapshot {
            level_index: self.attempt.level_index,
            phase: self.phase(),
            dice: self.round.dice,
            cards: self.round.cards.to_vec(),
            selected_die: self.round.selected_die,
            selected_cards: self.round.selected.to_vec(),
            round_score: breakdown.total,
            score_breakdown: breakdown,
            cumulative_score: self.attempt.cumulative_score,
            current_turn: self.attempt.current_turn,
            turn_budget: self.attempt.goal.turns,
        }
    }

    /// Borrow the underlying attempt.
    #[must_use]
    pub const fn attempt(&self) -> &LevelAttempt {
        &self.attempt
    }

    /// Borrow the live round.
    #[must_use]
    pub const fn round(&self) -> &Round {
        &self.round
    }

    /// Borrow the RNG bundle, e.g. for draw-count instrumentation.
    #[must_use]
    pub const fn rng(&self) -> &RngBundle {
        &self.rng
    }

    fn ensure_live(&self) -> Result<(), RoundActionError> {
        match self.attempt.state {
            AttemptState::Finished => Err(RoundActionError::AttemptSettled),
            AttemptState::InRound | AttemptState::RoundEnd => Ok(()),
        }
    }
}
