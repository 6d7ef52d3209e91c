//! Payoff Table
//!
//! Maps a pair of moves to the payoff each side receives.

use bevy_ecs::prelude::*;
use chicken_events::{Move, Payoff};
use serde::{Deserialize, Serialize};

/// Payoffs from the point of view of the first player
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffTable {
    pub both_swerve: Payoff,
    /// I swerve, the opponent goes straight
    pub swerve_vs_straight: Payoff,
    /// I go straight, the opponent swerves
    pub straight_vs_swerve: Payoff,
    /// Crash
    pub both_straight: Payoff,
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self {
            both_swerve: 0,
            swerve_vs_straight: -1,
            straight_vs_swerve: 1,
            both_straight: -10,
        }
    }
}

impl PayoffTable {
    pub fn payoff(&self, own: Move, opponent: Move) -> Payoff {
        match (own, opponent) {
            (Move::Swerve, Move::Swerve) => self.both_swerve,
            (Move::Swerve, Move::Straight) => self.swerve_vs_straight,
            (Move::Straight, Move::Swerve) => self.straight_vs_swerve,
            (Move::Straight, Move::Straight) => self.both_straight,
        }
    }

    /// Payoffs for both players of a match
    pub fn resolve(&self, first: Move, second: Move) -> (Payoff, Payoff) {
        (self.payoff(first, second), self.payoff(second, first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matrix_is_symmetric() {
        let table = PayoffTable::default();
        assert_eq!(table.resolve(Move::Swerve, Move::Swerve), (0, 0));
        assert_eq!(table.resolve(Move::Swerve, Move::Straight), (-1, 1));
        assert_eq!(table.resolve(Move::Straight, Move::Swerve), (1, -1));
        assert_eq!(table.resolve(Move::Straight, Move::Straight), (-10, -10));
    }

    #[test]
    fn test_partial_table_uses_defaults() {
        let table: PayoffTable = toml::from_str("both_straight = -100").unwrap();
        assert_eq!(table.both_straight, -100);
        assert_eq!(table.straight_vs_swerve, 1);
    }
}
