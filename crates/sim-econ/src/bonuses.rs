//! Synergy and boost multipliers.
//!
//! Synergies are recomputed from ownership on every call; nothing records
//! that one was active. Boosts expire by wall clock and are filtered lazily
//! whenever they are read.

use chrono::{DateTime, Utc};
use sim_core::{ActiveBoost, BoostEffect, BoostId, GameState, SynergyBonus, SynergyDef, SYNERGIES};

/// Compound synergy factors per bonus type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynergyMultipliers {
    pub production: f64,
    pub visitors: f64,
    pub global: f64,
}

impl Default for SynergyMultipliers {
    fn default() -> Self {
        Self {
            production: 1.0,
            visitors: 1.0,
            global: 1.0,
        }
    }
}

/// Compound factors of every unexpired boost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoostMultipliers {
    pub production: f64,
    pub visitors: f64,
    pub clicks: f64,
}

impl Default for BoostMultipliers {
    fn default() -> Self {
        Self {
            production: 1.0,
            visitors: 1.0,
            clicks: 1.0,
        }
    }
}

/// Synergies whose every requirement is met by current ownership.
pub fn active_synergies(state: &GameState) -> Vec<&'static SynergyDef> {
    SYNERGIES
        .iter()
        .filter(|syn| {
            syn.requires
                .iter()
                .all(|r| state.owned(r.generator) >= r.min_count)
        })
        .collect()
}

pub fn synergy_multipliers(state: &GameState) -> SynergyMultipliers {
    let mut out = SynergyMultipliers::default();
    for syn in active_synergies(state) {
        match syn.bonus {
            SynergyBonus::Production => out.production *= syn.multiplier,
            SynergyBonus::Visitors => out.visitors *= syn.multiplier,
            SynergyBonus::Global => out.global *= syn.multiplier,
        }
    }
    out
}

/// Multipliers of boosts with `expires_at > now`. Stacked boosts compound.
pub fn active_boost_multipliers(boosts: &[ActiveBoost], now: DateTime<Utc>) -> BoostMultipliers {
    let mut out = BoostMultipliers::default();
    for active in boosts.iter().filter(|b| b.expires_at > now) {
        let def = active.id.def();
        match def.effect {
            BoostEffect::Production => out.production *= def.multiplier,
            BoostEffect::Visitors => out.visitors *= def.multiplier,
            BoostEffect::Clicks => out.clicks *= def.multiplier,
            BoostEffect::All => {
                out.production *= def.multiplier;
                out.visitors *= def.multiplier;
                out.clicks *= def.multiplier;
            }
        }
    }
    out
}

/// Drop entries whose expiry is at or before `now`.
pub fn purge_expired(boosts: &[ActiveBoost], now: DateTime<Utc>) -> Vec<ActiveBoost> {
    boosts
        .iter()
        .filter(|b| b.expires_at > now)
        .cloned()
        .collect()
}

pub fn is_boost_active(boosts: &[ActiveBoost], id: BoostId, now: DateTime<Utc>) -> bool {
    boosts.iter().any(|b| b.id == id && b.expires_at > now)
}

/// Whole seconds left on the first running instance of `id`, rounded up; 0 when inactive.
pub fn remaining_seconds(boosts: &[ActiveBoost], id: BoostId, now: DateTime<Utc>) -> u64 {
    boosts
        .iter()
        .find(|b| b.id == id && b.expires_at > now)
        .map_or(0, |b| {
            let millis = (b.expires_at - now).num_milliseconds().max(0) as u64;
            millis.div_ceil(1000)
        })
}
