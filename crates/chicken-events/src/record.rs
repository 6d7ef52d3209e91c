//! Round Records
//!
//! One entry in an agent's append-only history.

use serde::{Deserialize, Serialize};

use crate::Move;

/// Numeric reward for a single round
pub type Payoff = i64;

/// A completed round as seen by one agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round identifier assigned by the driver
    pub round: u64,
    /// Move the agent played
    #[serde(rename = "move")]
    pub mv: Move,
    /// Payoff the agent received
    pub payoff: Payoff,
}

impl RoundRecord {
    pub fn new(round: u64, mv: Move, payoff: Payoff) -> Self {
        Self { round, mv, payoff }
    }
}
