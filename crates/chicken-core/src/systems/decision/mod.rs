//! Decision Engine
//!
//! Two steps per agent per round:
//! 1. Classify whether the agent is stuck in a rut
//! 2. Exploit its memory window or fall back to a random move

pub mod generate;
pub mod rut;

pub use generate::{exploit_preference, random_move, Decision, MoveReason};
pub use rut::rut_verdict;
