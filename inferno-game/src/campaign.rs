//! Campaign level table and persistent unlock/completion tracking.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of campaign levels; the table is fixed and ordered.
pub const CAMPAIGN_LEVEL_COUNT: usize = 10;

/// Target for one campaign level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGoal {
    pub points: u32,
    pub turns: u32,
}

/// Static definition of one campaign level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSpec {
    pub name: &'static str,
    /// Obfuscated label the campaign menu shows while the level is hidden.
    pub runic_name: &'static str,
    pub goal: LevelGoal,
}

/// The ten campaign levels, climbing out of the pit.
pub const CAMPAIGN_LEVELS: [LevelSpec; CAMPAIGN_LEVEL_COUNT] = [
    LevelSpec {
        name: "Treachery",
        runic_name: "✦✧✣✤✥",
        goal: LevelGoal { points: 1_000, turns: 5 },
    },
    LevelSpec {
        name: "Fraud",
        runic_name: "✦✧✣✤",
        goal: LevelGoal { points: 1_500, turns: 6 },
    },
    LevelSpec {
        name: "Violence",
        runic_name: "✩✪✫✬",
        goal: LevelGoal { points: 2_000, turns: 6 },
    },
    LevelSpec {
        name: "Heresy",
        runic_name: "✮✯✰",
        goal: LevelGoal { points: 2_500, turns: 7 },
    },
    LevelSpec {
        name: "Wrath",
        runic_name: "✱✲✳",
        goal: LevelGoal { points: 3_000, turns: 7 },
    },
    LevelSpec {
        name: "Greed",
        runic_name: "✴✵✶",
        goal: LevelGoal { points: 3_500, turns: 8 },
    },
    LevelSpec {
        name: "Gluttony",
        runic_name: "✷✸✹",
        goal: LevelGoal { points: 4_000, turns: 8 },
    },
    LevelSpec {
        name: "Lust",
        runic_name: "✺✻✼",
        goal: LevelGoal { points: 4_500, turns: 9 },
    },
    LevelSpec {
        name: "Limbo",
        runic_name: "✽✾✿",
        goal: LevelGoal { points: 5_000, turns: 10 },
    },
    LevelSpec {
        name: "Freedom",
        runic_name: "❀❁❂",
        goal: LevelGoal { points: 6_000, turns: 10 },
    },
];

/// Campaign query failure. Non-fatal; surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CampaignError {
    #[error("no campaign level with index {index}")]
    LevelNotFound { index: usize },
    #[error("level {index} is still locked")]
    LevelLocked { index: usize },
}

/// Look up the static definition of a campaign level.
///
/// # Errors
///
/// Returns `LevelNotFound` for an out-of-range index.
pub fn level_spec(index: usize) -> Result<&'static LevelSpec, CampaignError> {
    CAMPAIGN_LEVELS
        .get(index)
        .ok_or(CampaignError::LevelNotFound { index })
}

/// Stats recorded with a finished attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LevelStats {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub turns_used: u32,
    #[serde(default)]
    pub silver_earned: u32,
    #[serde(default)]
    pub attempts: u32,
}

/// Stored record for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LevelRecord {
    pub completed: bool,
    #[serde(default)]
    pub stats: LevelStats,
}

/// Snapshot served to the campaign menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelState {
    pub index: usize,
    /// Real name once revealed, runic placeholder otherwise.
    pub name: &'static str,
    pub unlocked: bool,
    pub revealed: bool,
    pub completed: bool,
    pub stats: Option<LevelStats>,
}

/// Persisted per-level progress across the fixed campaign.
///
/// Entries are stored sparsely: a level the player has never finished an
/// attempt on has no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CampaignProgress {
    entries: Vec<Option<LevelRecord>>,
}

impl CampaignProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, index: usize) -> Option<&LevelRecord> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    /// Level 0 is always unlocked; every other level unlocks when its
    /// predecessor is recorded completed.
    #[must_use]
    pub fn is_unlocked(&self, index: usize) -> bool {
        index == 0 || self.record(index - 1).is_some_and(|record| record.completed)
    }

    #[must_use]
    pub fn is_completed(&self, index: usize) -> bool {
        self.record(index).is_some_and(|record| record.completed)
    }

    /// Overwrite the stored entry for a level with a finished attempt.
    ///
    /// # Errors
    ///
    /// Returns `LevelNotFound` for an out-of-range index.
    pub fn record_result(
        &mut self,
        index: usize,
        completed: bool,
        stats: LevelStats,
    ) -> Result<(), CampaignError> {
        if index >= CAMPAIGN_LEVEL_COUNT {
            return Err(CampaignError::LevelNotFound { index });
        }
        if self.entries.len() <= index {
            self.entries.resize(index + 1, None);
        }
        self.entries[index] = Some(LevelRecord { completed, stats });
        Ok(())
    }

    /// Snapshot one level for display.
    ///
    /// # Errors
    ///
    /// Returns `LevelNotFound` for an out-of-range index.
    pub fn level_state(&self, index: usize) -> Result<LevelState, CampaignError> {
        let spec = level_spec(index)?;
        let unlocked = self.is_unlocked(index);
        let completed = self.is_completed(index);
        let revealed = unlocked || completed;
        Ok(LevelState {
            index,
            name: if revealed { spec.name } else { spec.runic_name },
            unlocked,
            revealed,
            completed,
            stats: self.record(index).map(|record| record.stats),
        })
    }

    /// Snapshot the whole campaign in level order.
    #[must_use]
    pub fn overview(&self) -> Vec<LevelState> {
        (0..CAMPAIGN_LEVEL_COUNT)
            .map(|index| {
                self.level_state(index)
                    .unwrap_or(LevelState {
                        index,
                        name: "",
                        unlocked: false,
                        revealed: false,
                        completed: false,
                        stats: None,
                    })
            })
            .collect()
    }
}
