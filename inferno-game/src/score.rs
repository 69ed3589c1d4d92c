//! Round score computation.
//!
//! Scoring is a pure function of the committed die and the selected cards,
//! recomputed after every selection change so the presentation layer can
//! render the live calculation panel.

use serde::Serialize;

use crate::cards::{Card, Rank};
use crate::constants::{
    ACE_MULTIPLIER, FLUSH_MIN_CARDS, FLUSH_PAIR_MULTIPLIER, FLUSH_QUAD_MULTIPLIER,
    FLUSH_TRIPLE_MULTIPLIER,
};
use crate::numbers::floor_f64_to_u32;
use crate::rules::ComboRule;

/// Multiplier breakdown behind a round score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Selected cards that resolved against the hand.
    pub cards_counted: u32,
    pub points_per_card: u32,
    pub base: u32,
    pub ace_multiplier: f64,
    pub suit_multiplier: f64,
    /// Final round score, floored after applying both multipliers.
    pub total: u32,
}

impl ScoreBreakdown {
    /// Breakdown for an empty selection.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            cards_counted: 0,
            points_per_card: 0,
            base: 0,
            ace_multiplier: 1.0,
            suit_multiplier: 1.0,
            total: 0,
        }
    }
}

/// Score a selection against a combination rule.
///
/// Out-of-range indices are skipped rather than counted; the round engine
/// never produces them.
#[must_use]
pub fn score_selection(rule: &ComboRule, cards: &[Card], selected: &[usize]) -> ScoreBreakdown {
    let picked: Vec<Card> = selected
        .iter()
        .filter_map(|&index| cards.get(index).copied())
        .collect();
    if picked.is_empty() {
        return ScoreBreakdown::zero();
    }

    let count = picked.len();
    let base = u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(rule.points_per_card);

    let ace_multiplier = if picked.iter().any(|card| card.rank == Rank::Ace) {
        ACE_MULTIPLIER
    } else {
        1.0
    };

    let suit_multiplier = if count >= FLUSH_MIN_CARDS
        && picked.iter().all(|card| card.suit == picked[0].suit)
    {
        if count >= 4 {
            FLUSH_QUAD_MULTIPLIER
        } else if count == 3 {
            FLUSH_TRIPLE_MULTIPLIER
        } else {
            FLUSH_PAIR_MULTIPLIER
        }
    } else {
        1.0
    };

    let total = floor_f64_to_u32(f64::from(base) * ace_multiplier * suit_multiplier);
    ScoreBreakdown {
        cards_counted: u32::try_from(count).unwrap_or(u32::MAX),
        points_per_card: rule.points_per_card,
        base,
        ace_multiplier,
        suit_multiplier,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use crate::rules::combo_for;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn two_card_flush_pays_base_times_one_and_a_half() {
        // Die 3 pays 200 per card; two spades trigger the pair flush bonus.
        let rule = combo_for(3).unwrap();
        let cards = [card(Rank::Three, Suit::Spades), card(Rank::Nine, Suit::Spades)];
        let breakdown = score_selection(rule, &cards, &[0, 1]);
        assert_eq!(breakdown.base, 400);
        assert!((breakdown.ace_multiplier - 1.0).abs() < f64::EPSILON);
        assert!((breakdown.suit_multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(breakdown.total, 600);
    }

    #[test]
    fn ace_and_triple_flush_multipliers_stack() {
        // Die 4 pays 250 per card; three hearts with an ace stack both bonuses.
        let rule = combo_for(4).unwrap();
        let cards = [
            card(Rank::Four, Suit::Hearts),
            card(Rank::Eight, Suit::Hearts),
            card(Rank::Ace, Suit::Hearts),
        ];
        let breakdown = score_selection(rule, &cards, &[0, 1, 2]);
        assert_eq!(breakdown.base, 750);
        assert!((breakdown.ace_multiplier - 1.25).abs() < f64::EPSILON);
        assert!((breakdown.suit_multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(breakdown.total, 1875);
    }

    #[test]
    fn single_card_never_earns_the_flush_bonus() {
        for suit in Suit::ALL {
            let rule = combo_for(6).unwrap();
            let cards = [card(Rank::Six, suit)];
            let breakdown = score_selection(rule, &cards, &[0]);
            assert!((breakdown.suit_multiplier - 1.0).abs() < f64::EPSILON);
            assert_eq!(breakdown.total, 300);
        }
    }

    #[test]
    fn four_plus_flush_triples_the_base() {
        let rule = combo_for(2).unwrap();
        let cards = [
            card(Rank::Two, Suit::Clubs),
            card(Rank::Four, Suit::Clubs),
            card(Rank::Six, Suit::Clubs),
            card(Rank::Eight, Suit::Clubs),
        ];
        let breakdown = score_selection(rule, &cards, &[0, 1, 2, 3]);
        assert_eq!(breakdown.base, 400);
        assert!((breakdown.suit_multiplier - 3.0).abs() < f64::EPSILON);
        assert_eq!(breakdown.total, 1200);
    }

    #[test]
    fn empty_selection_scores_zero() {
        let rule = combo_for(1).unwrap();
        let breakdown = score_selection(rule, &[], &[]);
        assert_eq!(breakdown, ScoreBreakdown::zero());
    }

    #[test]
    fn scoring_is_deterministic() {
        let rule = combo_for(5).unwrap();
        let cards = [
            card(Rank::Five, Suit::Diamonds),
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Ace, Suit::Diamonds),
        ];
        let first = score_selection(rule, &cards, &[0, 1, 2]);
        let second = score_selection(rule, &cards, &[0, 1, 2]);
        assert_eq!(first, second);
        // Mixed suits: only the ace bonus applies.
        assert_eq!(first.base, 750);
        assert_eq!(first.total, 937);
    }
}
