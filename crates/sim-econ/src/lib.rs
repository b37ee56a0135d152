//! Economic models for Zombie Zoo.
//!
//! This crate provides pure helpers computed from a [`sim_core::GameState`]
//! snapshot:
//! - Geometric purchase pricing and affordability
//! - Production, visitor attraction, reputation and entry fee
//! - Synergy and boost multipliers
//! - The single-outstanding achievement scan

pub mod achievements;
pub mod bonuses;
pub mod cost;
pub mod rates;

pub use achievements::{check_for_new_achievements, record_next_unlock};
pub use bonuses::{
    active_boost_multipliers, active_synergies, is_boost_active, purge_expired,
    remaining_seconds, synergy_multipliers, BoostMultipliers, SynergyMultipliers,
};
pub use cost::{cost_for_quantity, max_affordable, next_unit_cost};
pub use rates::{
    apply_elapsed_time, effective_click_power, entry_fee, production_rate, refresh_rates,
    reputation, visitor_rate, ElapsedYield, VisitorRemainder, BASE_ENTRY_FEE,
    DEFAULT_VISITOR_REMAINDER, MAX_REPUTATION,
};
