use chrono::{DateTime, Duration};
use criterion::{criterion_group, criterion_main, Criterion};
use sim_core::GeneratorId;
use sim_runtime::{Action, ManualClock, RuntimeConfig, Simulation, ZooScene};

fn populated_sim() -> Simulation<ManualClock> {
    let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default();
    let mut sim = Simulation::new(ManualClock::new(start), RuntimeConfig::default())
        .expect("catalog is valid");
    let mut state = sim.state().clone();
    state.machine_level = sim_core::MAX_MACHINE_LEVEL;
    for g in state.generators.values_mut() {
        g.owned = 20;
    }
    sim.dispatch(Action::Load(state));
    sim
}

fn bench_ticks(c: &mut Criterion) {
    let mut sim = populated_sim();
    c.bench_function("sim_tick", |b| {
        b.iter(|| {
            sim.clock().advance(Duration::seconds(1));
            sim.tick();
        })
    });
    c.bench_function("buy_generator", |b| {
        b.iter(|| sim.buy(GeneratorId::Monkey, 1).brains)
    });
}

fn bench_frames(c: &mut Criterion) {
    let config = RuntimeConfig::default();
    let sim = populated_sim();
    let mut zoo = ZooScene::new(&config);
    zoo.sync(sim.state());
    c.bench_function("scene_step", |b| b.iter(|| zoo.step(1.0 / 60.0)));
}

criterion_group!(benches, bench_ticks, bench_frames);
criterion_main!(benches);
