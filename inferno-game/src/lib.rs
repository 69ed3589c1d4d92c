//! Inferno Game Engine
//!
//! Platform-agnostic core game logic for the Inferno dice-and-card
//! campaign game. This crate provides the round engine, turn controller,
//! and campaign progress tracking without UI or platform-specific
//! dependencies.

pub mod attempt;
pub mod campaign;
pub mod cards;
pub mod constants;
pub mod numbers;
pub mod profile;
pub mod rng;
pub mod round;
pub mod rules;
pub mod score;
pub mod session;

// Re-export commonly used types
pub use attempt::{AttemptResult, AttemptState, LevelAttempt, RoundVerdict};
pub use campaign::{
    CAMPAIGN_LEVEL_COUNT, CAMPAIGN_LEVELS, CampaignError, CampaignProgress, LevelGoal, LevelRecord,
    LevelSpec, LevelState, LevelStats, level_spec,
};
pub use cards::{Card, Rank, Suit, draw_card};
pub use profile::{Inventory, PlayerProfile};
pub use rng::{CountingRng, RngBundle};
pub use round::{CardToggle, RiskOutcome, Round, RoundActionError, RoundPhase};
pub use rules::{ComboRule, DICE_COMBINATIONS, combo_for};
pub use score::{ScoreBreakdown, score_selection};
pub use session::{CommandOutcome, GameSession, SessionPhase, SessionSnapshot};

/// Trait for abstracting profile persistence.
/// Platform-specific implementations should provide this; the engine only
/// needs last-write-wins get/set by identity key.
pub trait ProfileStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the profile stored under an identity key.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be saved.
    fn save_profile(&self, key: &str, profile: &PlayerProfile) -> Result<(), Self::Error>;

    /// Load the profile stored under an identity key.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be loaded.
    fn load_profile(&self, key: &str) -> Result<Option<PlayerProfile>, Self::Error>;

    /// Delete the profile stored under an identity key.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be deleted.
    fn delete_profile(&self, key: &str) -> Result<(), Self::Error>;
}

/// Main engine facade binding campaign rules to a persistence backend.
///
/// Sessions run detached from storage; a profile is touched only at the
/// attempt-completion boundary, so abandoning a session persists nothing.
pub struct GameEngine<S>
where
    S: ProfileStorage,
{
    storage: S,
}

impl<S> GameEngine<S>
where
    S: ProfileStorage,
{
    /// Create a new engine with the provided storage backend.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the profile for an identity key, or a fresh default when none
    /// is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be loaded.
    pub fn load_or_default(&self, key: &str) -> Result<PlayerProfile, S::Error> {
        Ok(self.storage.load_profile(key)?.unwrap_or_default())
    }

    /// Begin a session on an unlocked campaign level.
    ///
    /// # Errors
    ///
    /// Returns `LevelNotFound` for an unknown index and `LevelLocked` when
    /// the predecessor level is not completed.
    pub fn begin_level(
        &self,
        profile: &PlayerProfile,
        level_index: usize,
        seed: u64,
    ) -> Result<GameSession, CampaignError> {
        level_spec(level_index)?;
        if !profile.campaign.is_unlocked(level_index) {
            return Err(CampaignError::LevelLocked { index: level_index });
        }
        GameSession::begin(level_index, seed)
    }

    /// Apply a terminal attempt result to the profile and persist it.
    /// Silver is credited only for completed levels.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown level index or a storage failure.
    pub fn complete_attempt(
        &self,
        key: &str,
        profile: &mut PlayerProfile,
        result: &AttemptResult,
        level_index: usize,
    ) -> Result<(), anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        profile.campaign.record_result(
            level_index,
            result.completed,
            LevelStats {
                score: result.score,
                turns_used: result.turns,
                silver_earned: result.silver_earned,
                attempts: 1,
            },
        )?;
        if result.completed {
            profile.add_silver(result.silver_earned);
        }
        self.storage.save_profile(key, profile).map_err(Into::into)
    }
}
