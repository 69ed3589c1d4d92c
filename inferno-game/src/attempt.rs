//! Turn sequencing and win/loss determination for one level attempt.
use serde::{Deserialize, Serialize};

use crate::campaign::LevelGoal;
use crate::constants::SILVER_PER_POINTS;

/// Lifecycle of a level attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptState {
    /// A round is live and accepting commands.
    InRound,
    /// The last round settled without deciding the attempt; the next round
    /// has not started yet.
    RoundEnd,
    /// Terminal; the result has been produced.
    Finished,
}

/// Terminal payload produced exactly once per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub completed: bool,
    pub score: u32,
    /// Turns actually used, i.e. the turn number of the round that ended
    /// the attempt.
    pub turns: u32,
    pub silver_earned: u32,
}

/// What a settled round means for the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundVerdict {
    /// Neither goal reached nor budget exhausted; await the next round.
    Continue,
    Won(AttemptResult),
    Lost(AttemptResult),
}

impl RoundVerdict {
    /// Terminal payload, when the verdict ends the attempt.
    #[must_use]
    pub const fn result(&self) -> Option<AttemptResult> {
        match self {
            Self::Continue => None,
            Self::Won(result) | Self::Lost(result) => Some(*result),
        }
    }
}

/// One play-through of a campaign level. Lives for a single play session;
/// dropped without persistence when the player exits mid-attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelAttempt {
    pub level_index: usize,
    pub goal: LevelGoal,
    pub current_turn: u32,
    pub cumulative_score: u32,
    pub state: AttemptState,
}

impl LevelAttempt {
    #[must_use]
    pub const fn new(level_index: usize, goal: LevelGoal) -> Self {
        Self {
            level_index,
            goal,
            current_turn: 1,
            cumulative_score: 0,
            state: AttemptState::InRound,
        }
    }

    /// Fold a settled round into the attempt and decide what happens next.
    ///
    /// A successful round banks its score; both outcomes consume a turn.
    /// The win check runs before the loss check, so reaching the goal on
    /// the final budgeted turn still wins.
    pub fn on_round_ended(&mut self, round_score: u32, success: bool) -> RoundVerdict {
        if success {
            self.cumulative_score = self.cumulative_score.saturating_add(round_score);
        }
        let turns_used = self.current_turn;
        self.current_turn += 1;

        if self.cumulative_score >= self.goal.points {
            self.state = AttemptState::Finished;
            return RoundVerdict::Won(AttemptResult {
                completed: true,
                score: self.cumulative_score,
                turns: turns_used,
                silver_earned: self.cumulative_score / SILVER_PER_POINTS,
            });
        }
        if self.current_turn > self.goal.turns {
            self.state = AttemptState::Finished;
            return RoundVerdict::Lost(AttemptResult {
                completed: false,
                score: self.cumulative_score,
                turns: turns_used,
                silver_earned: 0,
            });
        }
        self.state = AttemptState::RoundEnd;
        RoundVerdict::Continue
    }

    /// Acknowledge a settled round and arm the next one. Returns false when
    /// the attempt is not waiting for a new round.
    pub fn start_next_round(&mut self) -> bool {
        if self.state == AttemptState::RoundEnd {
            self.state = AttemptState::InRound;
            true
        } else {
            false
        }
    }
}
