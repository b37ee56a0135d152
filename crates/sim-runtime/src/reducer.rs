//! Pure state transitions.
//!
//! [`reduce`] never mutates its input and never fails: an action whose
//! preconditions do not hold returns a value equal to the input state.

use chrono::{DateTime, Duration, Utc};
use sim_core::{
    get_next_upgrade, is_generator_unlocked, normalize_generators, ActiveBoost, BoostId,
    GameState, GeneratorId,
};
use sim_econ::{
    apply_elapsed_time, cost_for_quantity, entry_fee, purge_expired, record_next_unlock,
    refresh_rates, reputation, VisitorRemainder,
};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Replace the state with a restored snapshot.
    Load(GameState),
    /// Advance persisted resources by `seconds` of real time.
    Tick { seconds: f64 },
    BuyGenerator { id: GeneratorId, qty: u64 },
    /// Manual collection; `None` grants the state's click power.
    Click { amount: Option<f64> },
    SpawnVisitor,
    UpgradeMachine,
    DismissAchievement,
    ActivateBoost(BoostId),
}

/// Inputs a transition needs from outside the state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReduceContext {
    pub now: DateTime<Utc>,
    pub visitor_remainder: VisitorRemainder,
}

impl ReduceContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            visitor_remainder: VisitorRemainder::default(),
        }
    }
}

/// Apply `action` to `state`, returning the next state.
pub fn reduce(state: &GameState, action: &Action, ctx: &ReduceContext) -> GameState {
    let mut next = state.clone();
    match action {
        Action::Load(loaded) => {
            next = loaded.clone();
            normalize_generators(&mut next);
            refresh_rates(&mut next, ctx.now);
            next.reputation = reputation(next.achievements.stats.total_visitors);
        }
        Action::Tick { seconds } => tick(&mut next, *seconds, ctx),
        Action::BuyGenerator { id, qty } => {
            if !buy(&mut next, *id, *qty, ctx.now) {
                return state.clone();
            }
        }
        Action::Click { amount } => {
            let requested = amount.unwrap_or(next.click_power);
            let granted = if requested.is_finite() { requested.max(0.0) } else { 0.0 };
            next.brains += granted;
            let stats = &mut next.achievements.stats;
            stats.total_clicks += 1;
            stats.total_brains_earned += granted;
            record_next_unlock(&mut next);
        }
        Action::SpawnVisitor => {
            next.money += entry_fee(next.reputation);
            next.achievements.stats.total_visitors += 1;
            next.reputation = reputation(next.achievements.stats.total_visitors);
            record_next_unlock(&mut next);
        }
        Action::UpgradeMachine => {
            let Some(upgrade) = get_next_upgrade(next.machine_level) else {
                debug!(level = next.machine_level, "machine already at max level");
                return state.clone();
            };
            if next.money < upgrade.cost {
                debug!(cost = upgrade.cost, money = next.money, "cannot afford upgrade");
                return state.clone();
            }
            next.money -= upgrade.cost;
            next.machine_level = upgrade.level;
            info!(level = upgrade.level, unlocks = %upgrade.unlocks, "machine upgraded");
            record_next_unlock(&mut next);
        }
        Action::DismissAchievement => {
            next.achievements.pending_unlock = None;
        }
        Action::ActivateBoost(id) => {
            let def = id.def();
            if next.money < def.cost {
                debug!(boost = %id, cost = def.cost, money = next.money, "cannot afford boost");
                return state.clone();
            }
            next.money -= def.cost;
            next.active_boosts.push(ActiveBoost {
                id: *id,
                expires_at: ctx.now + Duration::seconds(i64::from(def.duration_secs)),
            });
            refresh_rates(&mut next, ctx.now);
        }
    }
    next
}

// Order matters: expired boosts leave before integration so the step uses
// current multipliers, and stats are read only after integration.
fn tick(state: &mut GameState, seconds: f64, ctx: &ReduceContext) {
    let remaining = purge_expired(&state.active_boosts, ctx.now);
    if remaining.len() != state.active_boosts.len() {
        debug!(expired = state.active_boosts.len() - remaining.len(), "boosts expired");
        state.active_boosts = remaining;
        refresh_rates(state, ctx.now);
    }

    let gained = apply_elapsed_time(state, seconds, ctx.visitor_remainder);
    if gained.is_empty() {
        return;
    }

    let stats = &mut state.achievements.stats;
    stats.total_brains_earned += gained.brains;
    stats.total_visitors += gained.visitors;
    state.reputation = reputation(stats.total_visitors);
    record_next_unlock(state);
}

fn buy(state: &mut GameState, id: GeneratorId, qty: u64, now: DateTime<Utc>) -> bool {
    if qty == 0 {
        debug!(%id, "ignoring purchase of zero units");
        return false;
    }
    if !is_generator_unlocked(id, state.machine_level) {
        debug!(%id, level = state.machine_level, "generator is locked");
        return false;
    }
    let owned = state.owned(id);
    let cost = cost_for_quantity(id.def(), owned, qty);
    if !(cost.is_finite() && state.brains >= cost) {
        debug!(%id, qty, cost, brains = state.brains, "cannot afford generator");
        return false;
    }
    state.brains -= cost;
    state.generators.entry(id).or_default().owned = owned + qty;
    state.achievements.stats.total_generators_bought += qty;
    refresh_rates(state, now);
    record_next_unlock(state);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{initial_state, AchievementId, MAX_MACHINE_LEVEL};
    use sim_econ::{BASE_ENTRY_FEE, MAX_REPUTATION};

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn ctx() -> ReduceContext {
        ReduceContext::new(now())
    }

    fn run(state: &GameState, action: Action) -> GameState {
        reduce(state, &action, &ctx())
    }

    #[test]
    fn tick_integrates_cached_rate() {
        let mut s = initial_state(now());
        s.brains_per_second = 10.0;
        assert_eq!(run(&s, Action::Tick { seconds: 1.0 }).brains, 110.0);
        assert_eq!(run(&s, Action::Tick { seconds: 5.0 }).brains, 150.0);
    }

    #[test]
    fn idle_tick_changes_nothing() {
        let s = initial_state(now());
        assert_eq!(run(&s, Action::Tick { seconds: 1.0 }), s);
        assert_eq!(run(&s, Action::Tick { seconds: -3.0 }), s);
    }

    #[test]
    fn tick_updates_stats_and_reputation() {
        let mut s = initial_state(now());
        s.brains_per_second = 2.0;
        s.visitor_rate = 3.5;
        let next = run(&s, Action::Tick { seconds: 2.0 });
        assert_eq!(next.achievements.stats.total_brains_earned, 4.0);
        assert_eq!(next.achievements.stats.total_visitors, 7);
        assert_eq!(next.money, 7.0 * BASE_ENTRY_FEE);
        assert!((next.reputation - 0.7).abs() < 1e-12);
        assert_eq!(next.achievements.pending_unlock, Some(AchievementId::FirstBrain));
    }

    #[test]
    fn carry_policy_keeps_fractional_visitors() {
        let mut s = initial_state(now());
        s.visitor_rate = 0.4;
        let carry = ReduceContext {
            now: now(),
            visitor_remainder: VisitorRemainder::Carry,
        };
        let mut dropped = s.clone();
        let mut carried = s.clone();
        for _ in 0..6 {
            dropped = reduce(&dropped, &Action::Tick { seconds: 1.0 }, &ctx());
            carried = reduce(&carried, &Action::Tick { seconds: 1.0 }, &carry);
        }
        assert_eq!(dropped.achievements.stats.total_visitors, 0);
        assert_eq!(carried.achievements.stats.total_visitors, 2);
    }

    #[test]
    fn unaffordable_purchase_is_identity() {
        let mut s = initial_state(now());
        s.brains = 5.0;
        let next = run(&s, Action::BuyGenerator { id: GeneratorId::Monkey, qty: 1 });
        assert_eq!(next, s);
    }

    #[test]
    fn locked_or_empty_purchase_is_identity() {
        let mut s = initial_state(now());
        s.brains = 1e12;
        assert_eq!(run(&s, Action::BuyGenerator { id: GeneratorId::Whale, qty: 1 }), s);
        assert_eq!(run(&s, Action::BuyGenerator { id: GeneratorId::Monkey, qty: 0 }), s);
    }

    #[test]
    fn purchase_debits_and_recomputes() {
        let s = initial_state(now());
        let next = run(&s, Action::BuyGenerator { id: GeneratorId::Monkey, qty: 2 });
        assert!((next.brains - (100.0 - 21.5)).abs() < 1e-9);
        assert_eq!(next.owned(GeneratorId::Monkey), 2);
        assert_eq!(next.achievements.stats.total_generators_bought, 2);
        assert_eq!(next.brains_per_second, 2.0);
        assert!((next.visitor_rate - 0.1).abs() < 1e-12);
        assert_eq!(next.achievements.pending_unlock, Some(AchievementId::FirstZombie));
    }

    #[test]
    fn click_grants_power_and_counts() {
        let s = initial_state(now());
        let next = run(&s, Action::Click { amount: None });
        assert_eq!(next.brains, 101.0);
        assert_eq!(next.achievements.stats.total_clicks, 1);
        assert_eq!(next.achievements.stats.total_brains_earned, 1.0);

        let zero = run(&s, Action::Click { amount: Some(0.0) });
        assert_eq!(zero.brains, 100.0);
        assert_eq!(zero.achievements.stats.total_clicks, 1);
        assert_eq!(zero.achievements.pending_unlock, Some(AchievementId::FirstClick));
    }

    #[test]
    fn spawn_visitor_uses_fee_before_increment() {
        let mut s = initial_state(now());
        s.achievements.stats.total_visitors = 999;
        s.reputation = 99.9;
        let next = run(&s, Action::SpawnVisitor);
        assert!((next.money - entry_fee(99.9)).abs() < 1e-12);
        assert_eq!(next.reputation, MAX_REPUTATION);
        assert_eq!(run(&next, Action::SpawnVisitor).reputation, MAX_REPUTATION);
    }

    #[test]
    fn upgrade_requires_money_and_a_next_level() {
        let mut s = initial_state(now());
        assert_eq!(run(&s, Action::UpgradeMachine), s);

        s.money = 200.0;
        let next = run(&s, Action::UpgradeMachine);
        assert_eq!(next.machine_level, 1);
        assert_eq!(next.money, 50.0);
        assert_eq!(next.achievements.pending_unlock, Some(AchievementId::FirstUpgrade));

        s.machine_level = MAX_MACHINE_LEVEL;
        s.money = 1e15;
        assert_eq!(run(&s, Action::UpgradeMachine), s);
    }

    #[test]
    fn single_pending_achievement() {
        let s = initial_state(now());
        // First click qualifies both FirstBrain and FirstClick.
        let once = run(&s, Action::Click { amount: Some(1.0) });
        assert_eq!(once.achievements.pending_unlock, Some(AchievementId::FirstBrain));
        let twice = run(&once, Action::Click { amount: Some(1.0) });
        assert_eq!(twice.achievements.unlocked_ids, vec![AchievementId::FirstBrain]);

        let dismissed = run(&twice, Action::DismissAchievement);
        assert_eq!(dismissed.achievements.pending_unlock, None);
        assert_eq!(dismissed.brains, twice.brains);
        let third = run(&dismissed, Action::Click { amount: Some(1.0) });
        assert_eq!(third.achievements.pending_unlock, Some(AchievementId::FirstClick));
        assert_eq!(
            third.achievements.unlocked_ids,
            vec![AchievementId::FirstBrain, AchievementId::FirstClick]
        );
    }

    #[test]
    fn boost_activation_applies_immediately() {
        let mut s = initial_state(now());
        s.generators.get_mut(&GeneratorId::Monkey).unwrap().owned = 10;
        s.money = 150.0;
        s = run(&s, Action::Load(s.clone()));
        assert_eq!(s.brains_per_second, 10.0);

        let boosted = run(&s, Action::ActivateBoost(BoostId::BrainSurge));
        assert_eq!(boosted.money, 50.0);
        assert_eq!(boosted.brains_per_second, 20.0);
        assert_eq!(boosted.active_boosts[0].expires_at, now() + Duration::seconds(60));

        assert_eq!(run(&boosted, Action::ActivateBoost(BoostId::MegaBoost)), boosted);
    }

    #[test]
    fn tick_purges_expired_boosts_before_integrating() {
        let mut s = initial_state(now());
        s.generators.get_mut(&GeneratorId::Monkey).unwrap().owned = 10;
        s.active_boosts.push(ActiveBoost {
            id: BoostId::BrainSurge,
            expires_at: now() - Duration::seconds(1),
        });
        s.brains_per_second = 20.0;
        let next = run(&s, Action::Tick { seconds: 1.0 });
        assert!(next.active_boosts.is_empty());
        assert_eq!(next.brains_per_second, 10.0);
        assert_eq!(next.brains, 110.0);
    }

    #[test]
    fn load_recomputes_derived_fields_without_unlocking() {
        let mut saved = initial_state(now());
        saved.generators.get_mut(&GeneratorId::Monkey).unwrap().owned = 3;
        saved.generators.remove(&GeneratorId::Whale);
        saved.achievements.stats.total_visitors = 50;
        saved.achievements.stats.total_clicks = 10;
        let loaded = run(&initial_state(now()), Action::Load(saved));
        assert_eq!(loaded.brains_per_second, 3.0);
        assert_eq!(loaded.reputation, 5.0);
        assert_eq!(loaded.owned(GeneratorId::Whale), 0);
        assert!(loaded.achievements.pending_unlock.is_none());
    }
}
