//! Player profile persisted across sessions.
//!
//! The platform layer stores one profile per identity key in its
//! key-value store; the engine only hands it a serialized value at the
//! attempt-completion boundary.

use serde::{Deserialize, Serialize};

use crate::campaign::CampaignProgress;

/// Cosmetic inventory attached to a profile.
/// All fields default to empty when absent from stored JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Inventory {
    #[serde(default)]
    pub card_skins: Vec<String>,
    #[serde(default)]
    pub dice_skins: Vec<String>,
    #[serde(default)]
    pub special_cards: Vec<String>,
    #[serde(default)]
    pub special_dice: Vec<String>,
}

/// Per-identity record the platform layer persists as a single value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayerProfile {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub tutorial_completed: bool,
    #[serde(default)]
    pub lore_completed: bool,
    #[serde(default)]
    pub campaign: CampaignProgress,
    #[serde(default)]
    pub silver: u64,
    #[serde(default)]
    pub inventory: Inventory,
}

impl PlayerProfile {
    /// Fresh profile for a newly connected identity.
    #[must_use]
    pub fn with_nickname(nickname: &str) -> Self {
        Self {
            nickname: nickname.trim().to_string(),
            ..Self::default()
        }
    }

    /// Credit silver to the wallet balance.
    pub fn add_silver(&mut self, amount: u32) {
        self.silver = self.silver.saturating_add(u64::from(amount));
    }
}
