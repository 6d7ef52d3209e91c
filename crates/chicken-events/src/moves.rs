//! Move Types
//!
//! The two discrete choices an agent can commit to in a round.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the two moves available in a round of chicken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    /// Yield to the opponent (move A, code 0)
    Swerve,
    /// Hold course (move B, code 1)
    Straight,
}

/// A move value that is neither of the two known choices
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid move '{0}': expected swerve (0) or straight (1)")]
pub struct InvalidMove(pub String);

impl Move {
    /// Both moves, swerve first
    pub const ALL: [Move; 2] = [Move::Swerve, Move::Straight];

    /// Decode the legacy integer encoding
    pub fn from_code(code: u8) -> Result<Self, InvalidMove> {
        match code {
            0 => Ok(Move::Swerve),
            1 => Ok(Move::Straight),
            other => Err(InvalidMove(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Swerve => "swerve",
            Move::Straight => "straight",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = InvalidMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "swerve" => Ok(Move::Swerve),
            "straight" => Ok(Move::Straight),
            _ => name
                .parse::<u8>()
                .ok()
                .and_then(|code| Move::from_code(code).ok())
                .ok_or_else(|| InvalidMove(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Move::from_code(0), Ok(Move::Swerve));
        assert_eq!(Move::from_code(1), Ok(Move::Straight));
        assert!(Move::from_code(2).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Swerve".parse::<Move>(), Ok(Move::Swerve));
        assert_eq!(" straight ".parse::<Move>(), Ok(Move::Straight));
        assert_eq!("1".parse::<Move>(), Ok(Move::Straight));
        assert_eq!("0".parse::<Move>(), Ok(Move::Swerve));
        assert_eq!("2".parse::<Move>(), Err(InvalidMove("2".to_string())));

        let err = "brake".parse::<Move>().unwrap_err();
        assert_eq!(err, InvalidMove("brake".to_string()));
    }

    #[test]
    fn test_serde_rejects_unknown_move() {
        let json = serde_json::to_string(&Move::Swerve).unwrap();
        assert_eq!(json, "\"swerve\"");

        assert!(serde_json::from_str::<Move>("\"reverse\"").is_err());
        assert!(serde_json::from_str::<Move>("2").is_err());
    }
}
