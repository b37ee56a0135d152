//! The owning simulation object a host wires its tick timer to.

use chrono::{DateTime, Duration, Utc};
use persistence::{offline_seconds_capped, PersistenceError, SaveStore};
use sim_core::{
    get_next_upgrade, initial_state, is_generator_unlocked, validate_catalog, BoostId, GameState,
    GeneratorId, MachineUpgrade, SynergyDef, ValidationError,
};
use sim_econ::{cost_for_quantity, max_affordable, next_unit_cost, BoostMultipliers};
use std::cell::Cell;
use tracing::info;

use crate::config::RuntimeConfig;
use crate::reducer::{reduce, Action, ReduceContext};

/// Source of wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: DateTime<Utc>) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Offline progress credited on resume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResumeReport {
    pub offline_secs: u64,
    pub brains_gained: f64,
    pub money_gained: f64,
}

/// Clamp an animation frame delta to `[0, max]`.
pub fn clamp_frame_dt(dt: f64, max: f64) -> f64 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(max)
}

/// Owns the current [`GameState`] and applies actions to it with the time
/// read from its clock.
pub struct Simulation<C: Clock = SystemClock> {
    state: GameState,
    clock: C,
    config: RuntimeConfig,
}

impl<C: Clock> Simulation<C> {
    /// Start a fresh game. Fails only if the built-in catalog is inconsistent.
    pub fn new(clock: C, config: RuntimeConfig) -> Result<Self, ValidationError> {
        validate_catalog()?;
        let mut state = initial_state(clock.now());
        sim_econ::refresh_rates(&mut state, clock.now());
        Ok(Self {
            state,
            clock,
            config,
        })
    }

    /// Restore the stored game, if any, and credit the time spent away.
    pub fn resume<S: SaveStore + ?Sized>(&mut self, store: &S) -> Option<ResumeReport> {
        let saved = persistence::load(store)?;
        let last_saved_at = saved.last_saved_at;
        self.dispatch(Action::Load(saved));

        let offline_secs =
            offline_seconds_capped(last_saved_at, self.clock.now(), self.config.max_offline_secs);
        let (brains, money) = (self.state.brains, self.state.money);
        self.dispatch(Action::Tick {
            seconds: offline_secs as f64,
        });
        let report = ResumeReport {
            offline_secs,
            brains_gained: self.state.brains - brains,
            money_gained: self.state.money - money,
        };
        info!(
            offline_secs,
            brains = report.brains_gained,
            money = report.money_gained,
            "resumed saved game"
        );
        Some(report)
    }

    pub fn save<S: SaveStore + ?Sized>(&self, store: &mut S) -> Result<(), PersistenceError> {
        persistence::save(store, &self.state, self.clock.now())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn dispatch(&mut self, action: Action) -> &GameState {
        let ctx = ReduceContext {
            now: self.clock.now(),
            visitor_remainder: self.config.visitor_remainder,
        };
        self.state = reduce(&self.state, &action, &ctx);
        &self.state
    }

    /// One fixed-cadence tick of `tick_interval_ms`.
    pub fn tick(&mut self) -> &GameState {
        let seconds = self.config.tick_seconds();
        self.dispatch(Action::Tick { seconds })
    }

    /// Manual collection at the current effective click power.
    pub fn click(&mut self) -> &GameState {
        let amount = sim_econ::effective_click_power(&self.state, self.clock.now());
        self.dispatch(Action::Click {
            amount: Some(amount),
        })
    }

    pub fn buy(&mut self, id: GeneratorId, qty: u64) -> &GameState {
        self.dispatch(Action::BuyGenerator { id, qty })
    }

    // Read-only queries for hosts that disable unaffordable actions.

    pub fn next_unit_cost(&self, id: GeneratorId) -> f64 {
        next_unit_cost(id.def(), self.state.owned(id))
    }

    pub fn total_cost_for_quantity(&self, id: GeneratorId, qty: u64) -> f64 {
        cost_for_quantity(id.def(), self.state.owned(id), qty)
    }

    pub fn is_generator_unlocked(&self, id: GeneratorId) -> bool {
        is_generator_unlocked(id, self.state.machine_level)
    }

    pub fn can_buy(&self, id: GeneratorId, qty: u64) -> bool {
        qty > 0
            && self.is_generator_unlocked(id)
            && self.state.brains >= self.total_cost_for_quantity(id, qty)
    }

    /// Most units of `id` the current brains can pay for; 0 when locked.
    pub fn max_affordable(&self, id: GeneratorId) -> u64 {
        if !self.is_generator_unlocked(id) {
            return 0;
        }
        max_affordable(id.def(), self.state.owned(id), self.state.brains)
    }

    pub fn next_upgrade(&self) -> Option<&'static MachineUpgrade> {
        get_next_upgrade(self.state.machine_level)
    }

    pub fn can_upgrade(&self) -> bool {
        self.next_upgrade()
            .is_some_and(|up| self.state.money >= up.cost)
    }

    pub fn can_activate_boost(&self, id: BoostId) -> bool {
        self.state.money >= id.def().cost
    }

    pub fn active_synergies(&self) -> Vec<&'static SynergyDef> {
        sim_econ::active_synergies(&self.state)
    }

    pub fn active_boost_multipliers(&self) -> BoostMultipliers {
        sim_econ::active_boost_multipliers(&self.state.active_boosts, self.clock.now())
    }

    pub fn is_boost_active(&self, id: BoostId) -> bool {
        sim_econ::is_boost_active(&self.state.active_boosts, id, self.clock.now())
    }

    /// Seconds left on `id`, 0 when it is not running.
    pub fn boost_remaining_secs(&self, id: BoostId) -> u64 {
        sim_econ::remaining_seconds(&self.state.active_boosts, id, self.clock.now())
    }
}
