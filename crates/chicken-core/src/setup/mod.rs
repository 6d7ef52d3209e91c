//! World Setup
//!
//! Identifier allocation and population spawning.

pub mod ids;
pub mod population;

pub use ids::{IdAllocator, SeededUuids, SequentialIds};
pub use population::{spawn_population, PopulationSummary};
