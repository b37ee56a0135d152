//! Frame-by-frame wandering of zoo animals and visitors.
//!
//! Nothing here touches [`GameState`]; the scene is transient and rebuilt
//! from ownership counts via [`reconcile_generators`].

use rand::Rng;
use sim_core::{GameState, GeneratorId};

use crate::config::{Bounds, MovementConfig};

/// An animal pacing its enclosure. Exactly one velocity component is nonzero.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorEntity {
    pub kind: GeneratorId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

/// A visitor strolling the grounds until its lifetime runs low, then
/// walking to the exit.
#[derive(Clone, Debug, PartialEq)]
pub struct VisitorEntity {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub lifetime: f64,
    pub leaving: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub generators: Vec<GeneratorEntity>,
    pub visitors: Vec<VisitorEntity>,
}

/// Random axis-aligned velocity of magnitude `speed`.
pub fn cardinal_velocity<R: Rng>(speed: f64, rng: &mut R) -> (f64, f64) {
    match rng.gen_range(0..4) {
        0 => (speed, 0.0),
        1 => (-speed, 0.0),
        2 => (0.0, speed),
        _ => (0.0, -speed),
    }
}

fn turn<R: Rng>(e: &mut GeneratorEntity, speed: f64, rng: &mut R) {
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    if e.vx != 0.0 {
        e.vx = 0.0;
        e.vy = sign * speed;
    } else {
        e.vx = sign * speed;
        e.vy = 0.0;
    }
}

/// Move, maybe turn, then clamp. A wall hit sends the entity straight back
/// inward along the violated axis.
pub fn advance_generator<R: Rng>(
    e: &mut GeneratorEntity,
    bounds: &Bounds,
    cfg: &MovementConfig,
    dt: f64,
    rng: &mut R,
) {
    let speed = cfg.generator_speed;
    e.x += e.vx * dt;
    e.y += e.vy * dt;

    if rng.gen::<f64>() < cfg.turn_chance_per_sec * dt {
        turn(e, speed, rng);
    }

    let (min_x, max_x, min_y, max_y) = bounds.limits(cfg.generator_size);
    if e.x < min_x {
        e.x = min_x;
        (e.vx, e.vy) = (speed, 0.0);
    } else if e.x > max_x {
        e.x = max_x;
        (e.vx, e.vy) = (-speed, 0.0);
    }
    if e.y < min_y {
        e.y = min_y;
        (e.vx, e.vy) = (0.0, speed);
    } else if e.y > max_y {
        e.y = max_y;
        (e.vx, e.vy) = (0.0, -speed);
    }
}

/// Step one visitor. Returns `false` once it has reached the exit.
pub fn advance_visitor(
    v: &mut VisitorEntity,
    bounds: &Bounds,
    cfg: &MovementConfig,
    dt: f64,
) -> bool {
    v.lifetime -= dt;
    if !v.leaving && v.lifetime < cfg.leaving_threshold_secs {
        v.leaving = true;
    }

    if v.leaving {
        let (exit_x, exit_y) = bounds.exit_point();
        let (dx, dy) = (exit_x - v.x, exit_y - v.y);
        let distance = dx.hypot(dy);
        if distance <= cfg.exit_radius {
            return false;
        }
        v.vx = dx / distance * cfg.exit_speed;
        v.vy = dy / distance * cfg.exit_speed;
        if cfg.exit_speed * dt >= distance {
            v.x = exit_x;
            v.y = exit_y;
            return false;
        }
        v.x += v.vx * dt;
        v.y += v.vy * dt;
        return (exit_x - v.x).hypot(exit_y - v.y) > cfg.exit_radius;
    }

    v.x += v.vx * dt;
    v.y += v.vy * dt;
    let (min_x, max_x, min_y, max_y) = bounds.limits(cfg.visitor_size);
    if v.x < min_x {
        v.x = min_x;
        v.vx = v.vx.abs();
    } else if v.x > max_x {
        v.x = max_x;
        v.vx = -v.vx.abs();
    }
    if v.y < min_y {
        v.y = min_y;
        v.vy = v.vy.abs();
    } else if v.y > max_y {
        v.y = max_y;
        v.vy = -v.vy.abs();
    }
    true
}

/// Pure frame step: returns the scene `dt` seconds later.
pub fn advance<R: Rng>(
    scene: &Scene,
    bounds: &Bounds,
    cfg: &MovementConfig,
    dt: f64,
    rng: &mut R,
) -> Scene {
    let mut next = scene.clone();
    for e in &mut next.generators {
        advance_generator(e, bounds, cfg, dt, rng);
    }
    next.visitors.retain_mut(|v| advance_visitor(v, bounds, cfg, dt));
    next
}

fn random_position<R: Rng>(bounds: &Bounds, size: f64, rng: &mut R) -> (f64, f64) {
    let (min_x, max_x, min_y, max_y) = bounds.limits(size);
    let x = if max_x > min_x { rng.gen_range(min_x..=max_x) } else { min_x };
    let y = if max_y > min_y { rng.gen_range(min_y..=max_y) } else { min_y };
    (x, y)
}

/// Match the on-screen animals to ownership, capped per type.
///
/// Existing entities keep their index, position and heading; only the
/// difference is spawned or dropped from the end of each type's run.
pub fn reconcile_generators<R: Rng>(
    entities: &mut Vec<GeneratorEntity>,
    state: &GameState,
    bounds: &Bounds,
    cfg: &MovementConfig,
    rng: &mut R,
) {
    let mut out = Vec::with_capacity(entities.len());
    for kind in GeneratorId::ALL {
        let target = usize::try_from(state.owned(kind))
            .unwrap_or(usize::MAX)
            .min(cfg.max_visible_per_type);
        out.extend(
            entities
                .iter()
                .filter(|e| e.kind == kind)
                .take(target)
                .cloned(),
        );
        let have = entities.iter().filter(|e| e.kind == kind).count().min(target);
        for _ in have..target {
            let (x, y) = random_position(bounds, cfg.generator_size, rng);
            let (vx, vy) = cardinal_velocity(cfg.generator_speed, rng);
            out.push(GeneratorEntity { kind, x, y, vx, vy });
        }
    }
    *entities = out;
}

/// A new visitor at a random spot heading in a random direction.
pub fn spawn_visitor<R: Rng>(
    bounds: &Bounds,
    cfg: &MovementConfig,
    rng: &mut R,
) -> VisitorEntity {
    let (x, y) = random_position(bounds, cfg.visitor_size, rng);
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let lifetime = if cfg.visitor_lifetime_max_secs > cfg.visitor_lifetime_min_secs {
        rng.gen_range(cfg.visitor_lifetime_min_secs..cfg.visitor_lifetime_max_secs)
    } else {
        cfg.visitor_lifetime_min_secs
    };
    VisitorEntity {
        x,
        y,
        vx: angle.cos() * cfg.visitor_speed,
        vy: angle.sin() * cfg.visitor_speed,
        lifetime,
        leaving: false,
    }
}
