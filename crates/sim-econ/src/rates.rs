//! Production, visitor and fee formulas, and time integration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sim_core::{GameState, GeneratorId};

use crate::bonuses::{active_boost_multipliers, synergy_multipliers};

/// Entry fee at zero reputation.
pub const BASE_ENTRY_FEE: f64 = 5.0;
/// Fee increase per reputation point.
pub const FEE_PER_REPUTATION: f64 = 0.005;
/// Reputation ceiling.
pub const MAX_REPUTATION: f64 = 100.0;
/// Visitors needed per reputation point.
pub const VISITORS_PER_REPUTATION: f64 = 10.0;

/// What happens to the fractional part of `visitor_rate * seconds` each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitorRemainder {
    /// Discard the fraction. Low visitor rates undercount over time.
    #[default]
    Drop,
    /// Keep the fraction in `GameState::visitor_remainder` for the next tick.
    Carry,
}

/// Policy used when nothing else is configured.
pub const DEFAULT_VISITOR_REMAINDER: VisitorRemainder = VisitorRemainder::Drop;

/// Brains per second from current ownership, multipliers, synergies and boosts.
pub fn production_rate(state: &GameState, now: DateTime<Utc>) -> f64 {
    let mut total = 0.0;
    for id in GeneratorId::ALL {
        let owned = state.owned(id);
        if owned == 0 {
            continue;
        }
        total += owned as f64 * id.def().base_prod * state.multipliers.for_generator(id);
    }
    let syn = synergy_multipliers(state);
    let boosts = active_boost_multipliers(&state.active_boosts, now);
    total * state.multipliers.global * syn.production * syn.global * boosts.production
}

/// Visitors per second attracted by current ownership.
pub fn visitor_rate(state: &GameState, now: DateTime<Utc>) -> f64 {
    let base: f64 = GeneratorId::ALL
        .iter()
        .map(|&id| state.owned(id) as f64 * id.def().attraction)
        .sum();
    let syn = synergy_multipliers(state);
    let boosts = active_boost_multipliers(&state.active_boosts, now);
    base * state.multipliers.global * syn.visitors * boosts.visitors
}

/// Saturating reputation from the cumulative visitor count.
pub fn reputation(total_visitors: u64) -> f64 {
    (total_visitors as f64 / VISITORS_PER_REPUTATION).min(MAX_REPUTATION)
}

pub fn entry_fee(reputation: f64) -> f64 {
    BASE_ENTRY_FEE * (1.0 + reputation * FEE_PER_REPUTATION)
}

/// Brains granted per click right now, including click boosts.
pub fn effective_click_power(state: &GameState, now: DateTime<Utc>) -> f64 {
    state.click_power * active_boost_multipliers(&state.active_boosts, now).clicks
}

/// Recompute the cached production and visitor rates in place.
pub fn refresh_rates(state: &mut GameState, now: DateTime<Utc>) {
    state.brains_per_second = production_rate(state, now);
    state.visitor_rate = visitor_rate(state, now);
}

/// Resources produced over one integration step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElapsedYield {
    pub brains: f64,
    pub visitors: u64,
    pub money: f64,
}

impl ElapsedYield {
    pub fn is_empty(&self) -> bool {
        self.brains <= 0.0 && self.visitors == 0
    }
}

/// Credit `seconds` of production using the cached rates.
///
/// Brains and money are added to `state`; statistics and reputation are left
/// to the caller. Negative or non-finite durations count as zero.
pub fn apply_elapsed_time(
    state: &mut GameState,
    seconds: f64,
    remainder: VisitorRemainder,
) -> ElapsedYield {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let brains = (state.brains_per_second * seconds).max(0.0);
    let carried = match remainder {
        VisitorRemainder::Drop => 0.0,
        VisitorRemainder::Carry => state.visitor_remainder,
    };
    let expected = (state.visitor_rate * seconds).max(0.0) + carried;
    let whole = expected.floor();
    let visitors = whole as u64;
    state.visitor_remainder = match remainder {
        VisitorRemainder::Drop => 0.0,
        VisitorRemainder::Carry => expected - whole,
    };
    let money = visitors as f64 * entry_fee(state.reputation);
    state.brains += brains;
    state.money += money;
    ElapsedYield {
        brains,
        visitors,
        money,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sim_core::{initial_state, ActiveBoost, BoostId};

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn with_owned(pairs: &[(GeneratorId, u64)]) -> GameState {
        let mut s = initial_state(now());
        for &(id, n) in pairs {
            s.generators.get_mut(&id).unwrap().owned = n;
        }
        s
    }

    #[test]
    fn production_sums_owned_types() {
        let s = with_owned(&[(GeneratorId::Monkey, 3), (GeneratorId::Giraffe, 2)]);
        assert_eq!(production_rate(&s, now()), 3.0 + 16.0);
    }

    #[test]
    fn production_applies_weights_and_boosts() {
        let mut s = with_owned(&[(GeneratorId::Monkey, 4)]);
        s.multipliers.global = 1.5;
        s.multipliers.per_generator.insert(GeneratorId::Monkey, 0.5);
        s.active_boosts.push(ActiveBoost {
            id: BoostId::BrainSurge,
            expires_at: now() + Duration::seconds(10),
        });
        assert!((production_rate(&s, now()) - 4.0 * 0.5 * 1.5 * 2.0).abs() < 1e-12);
    }

    #[test]
    fn visitor_rate_uses_attraction() {
        let s = with_owned(&[(GeneratorId::Elephant, 5)]);
        assert!((visitor_rate(&s, now()) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn reputation_saturates() {
        assert_eq!(reputation(0), 0.0);
        assert_eq!(reputation(55), 5.5);
        assert_eq!(reputation(1_000), 100.0);
        assert_eq!(reputation(2_000), 100.0);
    }

    #[test]
    fn entry_fee_scales_with_reputation() {
        assert_eq!(entry_fee(0.0), BASE_ENTRY_FEE);
        assert!((entry_fee(100.0) - BASE_ENTRY_FEE * 1.5).abs() < 1e-12);
    }

    #[test]
    fn click_power_includes_frenzy() {
        let mut s = initial_state(now());
        assert_eq!(effective_click_power(&s, now()), 1.0);
        s.active_boosts.push(ActiveBoost {
            id: BoostId::ClickFrenzy,
            expires_at: now() + Duration::seconds(30),
        });
        assert_eq!(effective_click_power(&s, now()), 5.0);
    }

    #[test]
    fn elapsed_time_drops_fraction_by_default() {
        let mut s = initial_state(now());
        s.brains_per_second = 10.0;
        s.visitor_rate = 0.4;
        let y = apply_elapsed_time(&mut s, 2.0, VisitorRemainder::Drop);
        assert_eq!(y.brains, 20.0);
        assert_eq!(y.visitors, 0);
        assert_eq!(s.brains, 120.0);
        assert_eq!(s.visitor_remainder, 0.0);
    }

    #[test]
    fn elapsed_time_carries_fraction_when_asked() {
        let mut s = initial_state(now());
        s.visitor_rate = 0.4;
        let first = apply_elapsed_time(&mut s, 2.0, VisitorRemainder::Carry);
        assert_eq!(first.visitors, 0);
        assert!((s.visitor_remainder - 0.8).abs() < 1e-12);
        let second = apply_elapsed_time(&mut s, 1.0, VisitorRemainder::Carry);
        assert_eq!(second.visitors, 1);
        assert!((s.visitor_remainder - 0.2).abs() < 1e-9);
        assert_eq!(s.money, entry_fee(0.0));
    }

    #[test]
    fn negative_duration_yields_nothing() {
        let mut s = initial_state(now());
        s.brains_per_second = 10.0;
        s.visitor_rate = 3.0;
        let y = apply_elapsed_time(&mut s, -5.0, VisitorRemainder::Drop);
        assert!(y.is_empty());
        assert_eq!(s.brains, 100.0);
    }
}
