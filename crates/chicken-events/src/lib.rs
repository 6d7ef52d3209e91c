//! Shared move, record and snapshot types for the chicken simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod moves;
pub mod record;
pub mod snapshot;

pub use moves::{InvalidMove, Move};
pub use record::{Payoff, RoundRecord};
pub use snapshot::{AgentSnapshot, CohortSummary, ResultsSnapshot};
