//! Chicken Simulation Engine Library
//!
//! Adaptive agents repeatedly playing a two-move game of chicken. The
//! decision engine lives on [`Agent`]; everything else drives it.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use chicken_events::{AgentSnapshot, InvalidMove, Move, Payoff, RoundRecord};
pub use components::*;
pub use config::{ConfigError, SimConfig};
pub use output::{OutputError, ResultsLedger};
pub use setup::{IdAllocator, SeededUuids, SequentialIds};
pub use simulation::Simulation;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
