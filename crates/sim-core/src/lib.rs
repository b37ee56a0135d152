//! Core domain models and invariants for Zombie Zoo.
//!
//! This crate defines the static catalog (generators, machine upgrades,
//! achievements, synergies, boosts) and the serializable [`GameState`]
//! snapshot, with validation helpers to guarantee basic invariants.

pub mod achievements;
pub mod boosts;
pub mod generators;
pub mod machine;
pub mod state;
pub mod synergy;

pub use achievements::{
    achievement_def, AchievementCategory, AchievementDef, AchievementId, AchievementState,
    PlayerStats, ACHIEVEMENTS,
};
pub use boosts::{BoostDef, BoostEffect, BoostId, BOOSTS};
pub use generators::{validate_generator, GeneratorDef, GeneratorId, GENERATORS};
pub use machine::{
    get_next_upgrade, is_generator_unlocked, MachineUpgrade, MACHINE_UPGRADES, MAX_MACHINE_LEVEL,
};
pub use state::{
    initial_state, ActiveBoost, GameState, GeneratorCount, Multipliers, BASE_CLICK_POWER,
    SAVE_VERSION, STARTING_BRAINS,
};
pub use synergy::{Requirement, SynergyBonus, SynergyDef, SYNERGIES};

use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

/// Validation errors for catalog and snapshot invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Numeric field must be finite.
    #[error("non-finite numeric value encountered")]
    NonFinite,
    /// Amounts, costs and counts must be non-negative.
    #[error("negative amount is invalid")]
    NegativeAmount,
    /// Cost curves must grow.
    #[error("cost growth of {0} must be > 1")]
    CostGrowthTooSmall(GeneratorId),
    /// Two generators share an unlock tier.
    #[error("duplicate unlock tier {0}")]
    DuplicateTier(u32),
    /// A machine upgrade unlocks a generator of another tier.
    #[error("upgrade level {level} unlocks {generator} of a different tier")]
    TierMismatch { level: u32, generator: GeneratorId },
    /// Synergy or boost definition is unusable.
    #[error("invalid bonus definition: {0}")]
    InvalidBonus(&'static str),
    /// Machine level beyond the upgrade ladder.
    #[error("machine level {0} exceeds the upgrade ladder")]
    MachineLevelOutOfRange(u32),
    /// Pending notification refers to something not unlocked, or already unlocked twice.
    #[error("inconsistent achievement state: {0:?}")]
    InconsistentAchievements(AchievementId),
    /// Textual identifier not present in the catalog.
    #[error("unknown identifier: {0}")]
    UnknownId(String),
}

/// Validate the whole static catalog, including cross references between
/// generator tiers and machine upgrades.
pub fn validate_catalog() -> Result<(), ValidationError> {
    let mut tiers = BTreeSet::new();
    for def in &GENERATORS {
        validate_generator(def)?;
        if !tiers.insert(def.unlock_tier) {
            return Err(ValidationError::DuplicateTier(def.unlock_tier));
        }
    }
    for up in &MACHINE_UPGRADES {
        if !up.cost.is_finite() {
            return Err(ValidationError::NonFinite);
        }
        if up.unlocks.def().unlock_tier != up.level {
            return Err(ValidationError::TierMismatch {
                level: up.level,
                generator: up.unlocks,
            });
        }
    }
    for syn in &SYNERGIES {
        if syn.requires.is_empty() {
            return Err(ValidationError::InvalidBonus(syn.id));
        }
        if !(syn.multiplier.is_finite() && syn.multiplier > 0.0) {
            return Err(ValidationError::InvalidBonus(syn.id));
        }
    }
    for boost in &BOOSTS {
        if boost.duration_secs == 0 || !(boost.multiplier.is_finite() && boost.multiplier > 0.0) {
            return Err(ValidationError::InvalidBonus(boost.id.as_str()));
        }
        if boost.cost < 0.0 {
            return Err(ValidationError::NegativeAmount);
        }
    }
    Ok(())
}

/// Insert zero-owned entries for any catalog generator missing from `state`.
pub fn normalize_generators(state: &mut GameState) {
    for id in GeneratorId::ALL {
        if !state.generators.contains_key(&id) {
            debug!(%id, "filling missing generator entry");
            state.generators.insert(id, GeneratorCount::default());
        }
    }
    for id in GeneratorId::ALL {
        state.multipliers.per_generator.entry(id).or_insert(1.0);
    }
}

/// Validate a snapshot restored from storage.
pub fn validate_state(state: &GameState) -> Result<(), ValidationError> {
    let numbers = [
        state.brains,
        state.brains_per_second,
        state.visitor_rate,
        state.reputation,
        state.click_power,
        state.money,
        state.visitor_remainder,
        state.multipliers.global,
        state.achievements.stats.total_brains_earned,
    ];
    if numbers.iter().any(|v| !v.is_finite())
        || state.multipliers.per_generator.values().any(|v| !v.is_finite())
    {
        return Err(ValidationError::NonFinite);
    }
    if state.brains < 0.0 || state.money < 0.0 || state.click_power < 0.0 {
        return Err(ValidationError::NegativeAmount);
    }
    if state.machine_level > MAX_MACHINE_LEVEL {
        return Err(ValidationError::MachineLevelOutOfRange(state.machine_level));
    }
    let mut seen = BTreeSet::new();
    for &id in &state.achievements.unlocked_ids {
        if !seen.insert(id) {
            return Err(ValidationError::InconsistentAchievements(id));
        }
    }
    if let Some(pending) = state.achievements.pending_unlock {
        if !seen.contains(&pending) {
            return Err(ValidationError::InconsistentAchievements(pending));
        }
    }
    Ok(())
}
