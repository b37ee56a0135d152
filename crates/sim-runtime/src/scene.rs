//! Stateful wrapper around [`crate::movement`] for an animation loop.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sim_core::GameState;
use tracing::trace;

use crate::config::{Bounds, MovementConfig, RuntimeConfig};
use crate::movement::{advance, reconcile_generators, spawn_visitor, Scene};
use crate::simulation::clamp_frame_dt;

/// The animated zoo: follows a [`GameState`] but never writes to it.
pub struct ZooScene {
    scene: Scene,
    rng: ChaCha8Rng,
    bounds: Bounds,
    movement: MovementConfig,
    max_frame_dt: f64,
    seen_visitors: Option<u64>,
}

impl ZooScene {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            scene: Scene::default(),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            bounds: config.bounds,
            movement: config.movement.clone(),
            max_frame_dt: config.max_frame_dt_secs,
            seen_visitors: None,
        }
    }

    /// Catch up with ownership and with visitors counted since the last sync.
    ///
    /// The first sync only records the visitor baseline, so a resumed game
    /// does not flood the screen with its whole history.
    pub fn sync(&mut self, state: &GameState) {
        reconcile_generators(
            &mut self.scene.generators,
            state,
            &self.bounds,
            &self.movement,
            &mut self.rng,
        );
        let total = state.achievements.stats.total_visitors;
        let arrived = match self.seen_visitors {
            Some(seen) => total.saturating_sub(seen),
            None => 0,
        };
        self.seen_visitors = Some(total);

        let room = self
            .movement
            .max_visible_visitors
            .saturating_sub(self.scene.visitors.len());
        let spawn = usize::try_from(arrived).unwrap_or(usize::MAX).min(room);
        for _ in 0..spawn {
            let v = spawn_visitor(&self.bounds, &self.movement, &mut self.rng);
            self.scene.visitors.push(v);
        }
        if spawn > 0 {
            trace!(spawn, visible = self.scene.visitors.len(), "visitors entered");
        }
    }

    /// Advance one frame; `dt` is clamped to the configured maximum.
    pub fn step(&mut self, dt: f64) {
        let dt = clamp_frame_dt(dt, self.max_frame_dt);
        if dt == 0.0 {
            return;
        }
        self.scene = advance(&self.scene, &self.bounds, &self.movement, dt, &mut self.rng);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn generator_count(&self) -> usize {
        self.scene.generators.len()
    }

    pub fn visitor_count(&self) -> usize {
        self.scene.visitors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use sim_core::{initial_state, GeneratorId};

    fn state() -> GameState {
        initial_state(DateTime::from_timestamp(0, 0).unwrap())
    }

    #[test]
    fn first_sync_sets_visitor_baseline() {
        let mut zoo = ZooScene::new(&RuntimeConfig::default());
        let mut s = state();
        s.achievements.stats.total_visitors = 500;
        zoo.sync(&s);
        assert_eq!(zoo.visitor_count(), 0);

        s.achievements.stats.total_visitors = 503;
        zoo.sync(&s);
        assert_eq!(zoo.visitor_count(), 3);
    }

    #[test]
    fn visible_visitors_are_capped() {
        let cfg = RuntimeConfig::default();
        let mut zoo = ZooScene::new(&cfg);
        let mut s = state();
        zoo.sync(&s);
        s.achievements.stats.total_visitors = 1_000;
        zoo.sync(&s);
        assert_eq!(zoo.visitor_count(), cfg.movement.max_visible_visitors);
    }

    #[test]
    fn step_follows_ownership_and_ignores_bad_dt() {
        let mut zoo = ZooScene::new(&RuntimeConfig::default());
        let mut s = state();
        s.generators.get_mut(&GeneratorId::Monkey).unwrap().owned = 4;
        zoo.sync(&s);
        assert_eq!(zoo.generator_count(), 4);

        let before = zoo.scene().clone();
        zoo.step(f64::NAN);
        assert_eq!(zoo.scene(), &before);
        zoo.step(10.0);
        assert_ne!(zoo.scene(), &before);
    }

    #[test]
    fn same_seed_same_scene() {
        let mut a = ZooScene::new(&RuntimeConfig::default());
        let mut b = ZooScene::new(&RuntimeConfig::default());
        let mut s = state();
        s.generators.get_mut(&GeneratorId::Monkey).unwrap().owned = 3;
        for zoo in [&mut a, &mut b] {
            zoo.sync(&s);
            for _ in 0..50 {
                zoo.step(1.0 / 60.0);
            }
        }
        assert_eq!(a.scene(), b.scene());
    }
}
