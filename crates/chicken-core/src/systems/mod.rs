//! ECS Systems
//!
//! The per-agent decision engine and the round driver that schedules it.

pub mod decision;
pub mod round;

// Re-export commonly used systems
pub use decision::{exploit_preference, random_move, rut_verdict, Decision, MoveReason};
pub use round::{
    advance_round, generate_moves, pair_agents, resolve_payoffs, LedgerFaults, Pairings,
    RoundClock, RoundStats,
};
