//! Die/card combination rules, fixed at compile time.
use crate::cards::Rank;

/// Allowed ranks and per-card points for one die value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboRule {
    pub die: u8,
    pub allowed_ranks: &'static [Rank],
    pub points_per_card: u32,
}

impl ComboRule {
    /// Whether a card of this rank may be played against the die.
    #[must_use]
    pub fn allows(&self, rank: Rank) -> bool {
        self.allowed_ranks.contains(&rank)
    }
}

/// The six combination rules, one per die value. Rarer matches pay more
/// per card.
pub const DICE_COMBINATIONS: [ComboRule; 6] = [
    ComboRule {
        die: 1,
        allowed_ranks: &[Rank::Seven, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace],
        points_per_card: 150,
    },
    ComboRule {
        die: 2,
        allowed_ranks: &[
            Rank::Two,
            Rank::Four,
            Rank::Six,
            Rank::Eight,
            Rank::Ten,
            Rank::Ace,
        ],
        points_per_card: 100,
    },
    ComboRule {
        die: 3,
        allowed_ranks: &[Rank::Three, Rank::Six, Rank::Nine, Rank::Ace],
        points_per_card: 200,
    },
    ComboRule {
        die: 4,
        allowed_ranks: &[Rank::Four, Rank::Eight, Rank::Ace],
        points_per_card: 250,
    },
    ComboRule {
        die: 5,
        allowed_ranks: &[Rank::Five, Rank::Ten, Rank::Ace],
        points_per_card: 250,
    },
    ComboRule {
        die: 6,
        allowed_ranks: &[Rank::Six, Rank::Ace],
        points_per_card: 300,
    },
];

/// Look up the combination rule for a die value (1-6).
#[must_use]
pub fn combo_for(die: u8) -> Option<&'static ComboRule> {
    DICE_COMBINATIONS.iter().find(|rule| rule.die == die)
}
