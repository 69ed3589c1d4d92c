//! Centralized balance and tuning constants for Inferno game logic.
//!
//! These values define the deterministic math for the round engine.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_ROUND_STARTED: &str = "log.round.started";
pub(crate) const LOG_DIE_SELECTED: &str = "log.round.die-selected";
pub(crate) const LOG_CARD_SELECTED: &str = "log.round.card-selected";
pub(crate) const LOG_CARD_DESELECTED: &str = "log.round.card-deselected";
pub(crate) const LOG_DRAW_LUCKY: &str = "log.draw.lucky";
pub(crate) const LOG_DRAW_BUST: &str = "log.draw.bust";
pub(crate) const LOG_ROUND_BANKED: &str = "log.round.banked";
pub(crate) const LOG_LEVEL_VICTORY: &str = "log.level.victory";
pub(crate) const LOG_LEVEL_DEFEAT: &str = "log.level.defeat";

// Round tuning -------------------------------------------------------------
pub(crate) const DIE_SIDES: u8 = 6;
pub(crate) const DICE_PER_ROUND: usize = 2;
pub(crate) const OPENING_HAND_SIZE: usize = 3;

// Score tuning -------------------------------------------------------------
pub(crate) const ACE_MULTIPLIER: f64 = 1.25;
pub(crate) const FLUSH_MIN_CARDS: usize = 2;
pub(crate) const FLUSH_PAIR_MULTIPLIER: f64 = 1.5;
pub(crate) const FLUSH_TRIPLE_MULTIPLIER: f64 = 2.0;
pub(crate) const FLUSH_QUAD_MULTIPLIER: f64 = 3.0;

// Reward tuning ------------------------------------------------------------
pub(crate) const SILVER_PER_POINTS: u32 = 10;
