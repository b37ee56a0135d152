//! Runtime for the simulation: the pure action reducer, the owning
//! [`Simulation`] object driven by a tick timer, and the per-frame movement
//! scene that animates the zoo without touching persisted state.

pub mod config;
pub mod movement;
pub mod reducer;
pub mod scene;
pub mod simulation;

pub use config::{Bounds, ConfigError, MovementConfig, RuntimeConfig};
pub use movement::{
    advance, advance_generator, advance_visitor, cardinal_velocity, reconcile_generators,
    spawn_visitor, GeneratorEntity, Scene, VisitorEntity,
};
pub use reducer::{reduce, Action, ReduceContext};
pub use scene::ZooScene;
pub use simulation::{clamp_frame_dt, Clock, ManualClock, ResumeReport, Simulation, SystemClock};
