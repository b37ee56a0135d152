//! Headless host: resume a saved zoo, run ticks on a manual clock, animate
//! the scene off-screen and autosave.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use persistence::{default_save_dir, FileStore};
use sim_core::{achievement_def, GeneratorId};
use sim_runtime::{Action, ManualClock, RuntimeConfig, Simulation, ZooScene};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

struct Args {
    config: Option<PathBuf>,
    save_dir: Option<PathBuf>,
    ticks: u64,
    autoplay: bool,
    frames_per_tick: u32,
    wipe: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        config: None,
        save_dir: None,
        ticks: 60,
        autoplay: false,
        frames_per_tick: 10,
        wipe: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = it.next().map(PathBuf::from),
            "--save-dir" => args.save_dir = it.next().map(PathBuf::from),
            "--ticks" => {
                if let Some(n) = it.next().and_then(|s| s.parse().ok()) {
                    args.ticks = n;
                }
            }
            "--frames-per-tick" => {
                if let Some(n) = it.next().and_then(|s| s.parse().ok()) {
                    args.frames_per_tick = n;
                }
            }
            "--autoplay" => args.autoplay = true,
            "--wipe" => args.wipe = true,
            _ => {}
        }
    }
    args
}

/// Greedy policy: click, upgrade when possible, then spend brains on the
/// best unlocked generators first.
fn autoplay(sim: &mut Simulation<ManualClock>) {
    sim.click();
    if sim.can_upgrade() {
        sim.dispatch(Action::UpgradeMachine);
    }
    for id in GeneratorId::ALL.iter().rev().copied() {
        let qty = sim.max_affordable(id);
        if qty > 0 {
            sim.buy(id, qty);
        }
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args();
    let config = match &args.config {
        Some(path) => RuntimeConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RuntimeConfig::default(),
    };
    let save_dir = args.save_dir.clone().unwrap_or_else(default_save_dir);
    info!(ticks = args.ticks, autoplay = args.autoplay, dir = %save_dir.display(), "starting CLI");

    let mut store = FileStore::new(&save_dir);
    if args.wipe {
        persistence::wipe(&mut store).context("wiping save")?;
        info!("save wiped");
    }

    let mut sim = Simulation::new(ManualClock::new(Utc::now()), config.clone())?;
    match sim.resume(&store) {
        Some(report) => println!(
            "Welcome back | away: {}s | brains: +{:.1} | money: +{:.1}",
            report.offline_secs, report.brains_gained, report.money_gained
        ),
        None => println!("New zoo | brains: {:.0}", sim.state().brains),
    }

    let mut zoo = ZooScene::new(&config);
    zoo.sync(sim.state());
    let tick = Duration::milliseconds(i64::try_from(config.tick_interval_ms).unwrap_or(1000));
    let frame_dt = config.tick_seconds() / f64::from(args.frames_per_tick.max(1));
    let mut since_save = 0.0;

    for _ in 0..args.ticks {
        sim.clock().advance(tick);
        sim.tick();
        if args.autoplay {
            autoplay(&mut sim);
        }
        if let Some(id) = sim.state().achievements.pending_unlock {
            if let Some(def) = achievement_def(id) {
                println!("Achievement | {} | {}", def.name, def.description);
            }
            sim.dispatch(Action::DismissAchievement);
        }

        zoo.sync(sim.state());
        for _ in 0..args.frames_per_tick {
            zoo.step(frame_dt);
        }

        since_save += config.tick_seconds();
        if since_save >= config.autosave_interval_secs as f64 {
            sim.save(&mut store).context("autosave")?;
            since_save = 0.0;
        }
    }
    sim.save(&mut store).context("final save")?;

    let s = sim.state();
    let synergies: Vec<_> = sim.active_synergies().iter().map(|syn| syn.name).collect();
    println!(
        "KPI | ticks: {} | brains: {:.1} | bps: {:.2} | money: {:.1} | visitors: {} | rep: {:.1} | machine: {} | owned: {} | achievements: {}",
        args.ticks,
        s.brains,
        s.brains_per_second,
        s.money,
        s.achievements.stats.total_visitors,
        s.reputation,
        s.machine_level,
        s.total_owned(),
        s.achievements.unlocked_ids.len()
    );
    println!(
        "Scene | animals: {} | visitors: {} | synergies: {:?}",
        zoo.generator_count(),
        zoo.visitor_count(),
        synergies
    );

    Ok(())
}
