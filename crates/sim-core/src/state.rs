//! The single mutable game snapshot and its starting values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::achievements::AchievementState;
use crate::boosts::BoostId;
use crate::generators::GeneratorId;

/// Snapshot format version written with every save.
pub const SAVE_VERSION: u32 = 3;
/// Brains granted to a fresh game.
pub const STARTING_BRAINS: f64 = 100.0;
/// Brains granted per manual collection before boosts.
pub const BASE_CLICK_POWER: f64 = 1.0;

/// Ownership of one generator type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorCount {
    pub owned: u64,
}

/// Static production weights fixed at initialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub global: f64,
    pub per_generator: BTreeMap<GeneratorId, f64>,
}

impl Multipliers {
    /// Weight for `id`, 1.0 when absent.
    pub fn for_generator(&self, id: GeneratorId) -> f64 {
        self.per_generator.get(&id).copied().unwrap_or(1.0)
    }
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            global: 1.0,
            per_generator: GeneratorId::ALL.iter().map(|&id| (id, 1.0)).collect(),
        }
    }
}

/// A purchased boost running until `expires_at`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveBoost {
    pub id: BoostId,
    pub expires_at: DateTime<Utc>,
}

/// Complete persisted state of a game.
///
/// `brains_per_second`, `visitor_rate` and `reputation` are derived and are
/// refreshed by the reducer after every transition that affects them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub version: u32,
    pub brains: f64,
    pub brains_per_second: f64,
    pub visitor_rate: f64,
    pub reputation: f64,
    pub click_power: f64,
    pub generators: BTreeMap<GeneratorId, GeneratorCount>,
    pub multipliers: Multipliers,
    pub money: f64,
    pub machine_level: u32,
    pub achievements: AchievementState,
    pub active_boosts: Vec<ActiveBoost>,
    /// Fractional visitors carried between ticks when carrying is enabled.
    #[serde(default)]
    pub visitor_remainder: f64,
    pub last_saved_at: DateTime<Utc>,
}

impl GameState {
    /// Owned count for `id`, 0 when the entry is missing.
    pub fn owned(&self, id: GeneratorId) -> u64 {
        self.generators.get(&id).map_or(0, |g| g.owned)
    }

    /// Sum of owned units across all types.
    pub fn total_owned(&self) -> u64 {
        self.generators.values().map(|g| g.owned).sum()
    }
}

/// Fresh state for a first run.
pub fn initial_state(now: DateTime<Utc>) -> GameState {
    GameState {
        version: SAVE_VERSION,
        brains: STARTING_BRAINS,
        brains_per_second: 0.0,
        visitor_rate: 0.0,
        reputation: 0.0,
        click_power: BASE_CLICK_POWER,
        generators: GeneratorId::ALL
            .iter()
            .map(|&id| (id, GeneratorCount::default()))
            .collect(),
        multipliers: Multipliers::default(),
        money: 0.0,
        machine_level: 0,
        achievements: AchievementState::default(),
        active_boosts: Vec::new(),
        visitor_remainder: 0.0,
        last_saved_at: now,
    }
}
