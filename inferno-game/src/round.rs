//! Single-round lifecycle: dice, card selection, scoring, and the risk draw.
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

use crate::cards::{Card, Rank, draw_card};
use crate::constants::{DICE_PER_ROUND, DIE_SIDES, OPENING_HAND_SIZE};
use crate::rules::{ComboRule, combo_for};
use crate::score::{ScoreBreakdown, score_selection};

/// Card buffer with inline capacity covering the opening hand plus typical
/// risk draws.
pub type CardBuf = SmallVec<[Card; 8]>;

/// Selected card indices, insertion ordered.
pub type SelectionSet = SmallVec<[usize; 8]>;

/// Lifecycle phase of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// Dice are on the table; the player must commit to one.
    Selecting,
    /// A die is locked in; cards may be toggled or risked.
    Playing,
    /// The round ended voluntarily with its score banked.
    RoundEnd,
    /// A risk draw missed; the round ended with zero score.
    Busted,
}

impl RoundPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Selecting => "selecting",
            Self::Playing => "playing",
            Self::RoundEnd => "round_end",
            Self::Busted => "busted",
        }
    }

    /// Whether the round accepts no further commands.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::RoundEnd | Self::Busted)
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory rejection for a round or session command. The game state is
/// left untouched; the caller surfaces the reason as user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundActionError {
    #[error("command is not valid while {0}")]
    WrongPhase(RoundPhase),
    #[error("no die with index {0} on the table")]
    DieOutOfRange(usize),
    #[error("no card with index {0} in this round")]
    CardOutOfRange(usize),
    #[error("rank {rank} does not combine with die value {die}")]
    RankNotAllowed { rank: Rank, die: u8 },
    #[error("at least one card must be selected to bank a round")]
    EmptySelection,
    #[error("a round is still in progress")]
    RoundInProgress,
    #[error("the attempt is already settled")]
    AttemptSettled,
}

/// Result of toggling a card in or out of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardToggle {
    Selected,
    Deselected,
}

/// Result of the risk draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskOutcome {
    /// The card that was drawn; it is already appended to the hand.
    pub card: Card,
    /// True when the draw missed the die and ended the round at zero.
    pub busted: bool,
}

/// State for one round of a level attempt. Created freshly rolled and
/// dealt; mutated only through its own commands; discarded at round end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub dice: [u8; DICE_PER_ROUND],
    pub cards: CardBuf,
    pub selected_die: Option<usize>,
    pub selected: SelectionSet,
    pub phase: RoundPhase,
}

impl Round {
    /// Roll the dice and deal the opening hand.
    #[must_use]
    pub fn deal<D: Rng, C: Rng>(dice_rng: &mut D, cards_rng: &mut C) -> Self {
        let dice = [roll_die(dice_rng), roll_die(dice_rng)];
        let cards = (0..OPENING_HAND_SIZE).map(|_| draw_card(cards_rng)).collect();
        Self {
            dice,
            cards,
            selected_die: None,
            selected: SelectionSet::new(),
            phase: RoundPhase::Selecting,
        }
    }

    /// Rebuild a round from known dice and cards (useful for tests).
    #[must_use]
    pub fn from_parts(dice: [u8; DICE_PER_ROUND], cards: CardBuf) -> Self {
        Self {
            dice,
            cards,
            selected_die: None,
            selected: SelectionSet::new(),
            phase: RoundPhase::Selecting,
        }
    }

    /// Combination rule for the committed die, if one is committed.
    #[must_use]
    pub fn active_rule(&self) -> Option<&'static ComboRule> {
        self.selected_die
            .and_then(|index| self.dice.get(index).copied())
            .and_then(combo_for)
    }

    /// Commit to one of the rolled dice. Valid once per round.
    ///
    /// # Errors
    ///
    /// Advisory rejection when not in the selecting phase or the index is
    /// out of range.
    pub fn select_die(&mut self, index: usize) -> Result<(), RoundActionError> {
        if self.phase != RoundPhase::Selecting {
            return Err(RoundActionError::WrongPhase(self.phase));
        }
        if index >= self.dice.len() {
            return Err(RoundActionError::DieOutOfRange(index));
        }
        self.selected_die = Some(index);
        self.phase = RoundPhase::Playing;
        Ok(())
    }

    /// Toggle a card in or out of the selection.
    ///
    /// # Errors
    ///
    /// Advisory rejection when no die is committed, the index is out of
    /// range, or the card's rank does not combine with the committed die.
    pub fn toggle_card(&mut self, index: usize) -> Result<CardToggle, RoundActionError> {
        if self.phase != RoundPhase::Playing {
            return Err(RoundActionError::WrongPhase(self.phase));
        }
        let card = *self
            .cards
            .get(index)
            .ok_or(RoundActionError::CardOutOfRange(index))?;
        let rule = self
            .active_rule()
            .ok_or(RoundActionError::WrongPhase(self.phase))?;
        if !rule.allows(card.rank) {
            return Err(RoundActionError::RankNotAllowed {
                rank: card.rank,
                die: rule.die,
            });
        }
        if let Some(position) = self.selected.iter().position(|&i| i == index) {
            self.selected.remove(position);
            Ok(CardToggle::Deselected)
        } else {
            self.selected.push(index);
            Ok(CardToggle::Selected)
        }
    }

    /// Current score breakdown; zero while no cards are selected.
    #[must_use]
    pub fn score(&self) -> ScoreBreakdown {
        self.active_rule().map_or(ScoreBreakdown::zero(), |rule| {
            score_selection(rule, &self.cards, &self.selected)
        })
    }

    /// The risk action: draw one more card into the hand. A rank outside
    /// the committed die's allowed set zeroes the round and ends it on the
    /// spot; a match leaves the card available for manual selection.
    ///
    /// # Errors
    ///
    /// Advisory rejection when no die is committed yet or the round is
    /// already over.
    pub fn draw_extra_card<C: Rng>(
        &mut self,
        cards_rng: &mut C,
    ) -> Result<RiskOutcome, RoundActionError> {
        if self.phase != RoundPhase::Playing {
            return Err(RoundActionError::WrongPhase(self.phase));
        }
        let rule = self
            .active_rule()
            .ok_or(RoundActionError::WrongPhase(self.phase))?;
        let card = draw_card(cards_rng);
        self.cards.push(card);
        if rule.allows(card.rank) {
            Ok(RiskOutcome { card, busted: false })
        } else {
            self.selected.clear();
            self.phase = RoundPhase::Busted;
            Ok(RiskOutcome { card, busted: true })
        }
    }

    /// Bank the current selection and end the round voluntarily.
    ///
    /// # Errors
    ///
    /// Advisory rejection when the round is not in play or nothing is
    /// selected.
    pub fn end_round(&mut self) -> Result<ScoreBreakdown, RoundActionError> {
        if self.phase != RoundPhase::Playing {
            return Err(RoundActionError::WrongPhase(self.phase));
        }
        if self.selected.is_empty() {
            return Err(RoundActionError::EmptySelection);
        }
        let breakdown = self.score();
        self.phase = RoundPhase::RoundEnd;
        Ok(breakdown)
    }
}

fn roll_die<R: Rng>(rng: &mut R) -> u8 {
    rng.random_range(1..=DIE_SIDES)
}
