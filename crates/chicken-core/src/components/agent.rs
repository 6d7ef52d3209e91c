//! Agent Components
//!
//! The adaptive player: fixed configuration, its append-only ledger of
//! completed rounds, and the running tallies the decision engine maintains.

use bevy_ecs::prelude::*;
use chicken_events::{AgentSnapshot, Move, Payoff, RoundRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier for an agent
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised while constructing an agent
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    #[error("memory must be a non-negative integer, got {0}")]
    NegativeMemory(i64),
    #[error("rut threshold must be a percentage in [0, 100], got {0}")]
    InvalidRutThreshold(f64),
}

/// Errors raised when the driver records an outcome out of protocol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("agent {agent}: round {round} recorded after round {last}")]
    RoundOutOfOrder { agent: AgentId, round: u64, last: u64 },
    #[error("agent {agent}: no pending move for round {round}")]
    NoPendingMove { agent: AgentId, round: u64 },
    #[error("agent {agent}: played {pending} but outcome reports {reported}")]
    MoveMismatch {
        agent: AgentId,
        pending: Move,
        reported: Move,
    },
}

/// Sensitivity of the rut classifier
///
/// `Percent(0.0)` is accepted and behaves exactly like `Disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RutThreshold {
    #[default]
    Disabled,
    Percent(f64),
}

impl RutThreshold {
    pub fn percent(value: f64) -> Result<Self, AgentError> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(RutThreshold::Percent(value))
        } else {
            Err(AgentError::InvalidRutThreshold(value))
        }
    }

    pub fn from_option(value: Option<f64>) -> Result<Self, AgentError> {
        value.map_or(Ok(RutThreshold::Disabled), Self::percent)
    }

    /// The percentage to compare against, or `None` when classification is off
    pub fn active(&self) -> Option<f64> {
        match *self {
            RutThreshold::Percent(p) if p > 0.0 => Some(p),
            _ => None,
        }
    }

    pub fn as_option(&self) -> Option<f64> {
        match *self {
            RutThreshold::Percent(p) => Some(p),
            RutThreshold::Disabled => None,
        }
    }
}

/// Construction-time configuration of an agent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AgentParams {
    /// Window size; 0 means always random
    pub memory: u32,
    pub rut_threshold: RutThreshold,
}

impl AgentParams {
    pub fn new(memory: u32, rut_threshold: RutThreshold) -> Self {
        Self {
            memory,
            rut_threshold,
        }
    }

    /// Validate untyped configuration values
    pub fn checked(memory: i64, rut_threshold: Option<f64>) -> Result<Self, AgentError> {
        let memory = u32::try_from(memory).map_err(|_| AgentError::NegativeMemory(memory))?;
        Ok(Self::new(memory, RutThreshold::from_option(rut_threshold)?))
    }
}

/// A single player in the population
#[derive(Component, Debug, Clone)]
pub struct Agent {
    id: AgentId,
    memory: u32,
    rut_threshold: RutThreshold,
    pub(crate) history: Vec<RoundRecord>,
    cumulative_payoff: Payoff,
    pub(crate) swerve_count: u64,
    pub(crate) straight_count: u64,
    pub(crate) in_rut: bool,
    pub(crate) pending_move: Option<Move>,
}

impl Agent {
    pub fn new(id: AgentId, params: AgentParams) -> Self {
        Self {
            id,
            memory: params.memory,
            rut_threshold: params.rut_threshold,
            history: Vec::new(),
            cumulative_payoff: 0,
            swerve_count: 0,
            straight_count: 0,
            in_rut: false,
            pending_move: None,
        }
    }

    /// Build an agent from untyped configuration, failing fast on bad values
    pub fn from_config(
        id: AgentId,
        memory: i64,
        rut_threshold: Option<f64>,
    ) -> Result<Self, AgentError> {
        Ok(Self::new(id, AgentParams::checked(memory, rut_threshold)?))
    }

    /// Rebuild an agent from previously completed rounds.
    ///
    /// Tallies and cumulative payoff are derived from the records, so the
    /// restored agent satisfies the same invariants as one that played them.
    pub fn with_history(
        id: AgentId,
        params: AgentParams,
        history: impl IntoIterator<Item = RoundRecord>,
    ) -> Result<Self, LedgerError> {
        let mut agent = Self::new(id, params);
        for record in history {
            agent.check_round_order(record.round)?;
            agent.push_record(record);
            match record.mv {
                Move::Swerve => agent.swerve_count += 1,
                Move::Straight => agent.straight_count += 1,
            }
        }
        Ok(agent)
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub fn memory(&self) -> u32 {
        self.memory
    }

    pub fn rut_threshold(&self) -> RutThreshold {
        self.rut_threshold
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// The last `n` records, or all of them if fewer exist
    pub fn recent(&self, n: usize) -> &[RoundRecord] {
        &self.history[self.history.len().saturating_sub(n)..]
    }

    pub fn cumulative_payoff(&self) -> Payoff {
        self.cumulative_payoff
    }

    pub fn swerve_count(&self) -> u64 {
        self.swerve_count
    }

    pub fn straight_count(&self) -> u64 {
        self.straight_count
    }

    pub fn in_rut(&self) -> bool {
        self.in_rut
    }

    /// Move chosen for the round in flight, if any
    pub fn pending_move(&self) -> Option<Move> {
        self.pending_move
    }

    /// Append a completed round to the ledger.
    ///
    /// Called by the driver once per round, after the move was obtained from
    /// `generate_move` and the payoff resolved.
    pub fn record_outcome(
        &mut self,
        round: u64,
        mv: Move,
        payoff: Payoff,
    ) -> Result<(), LedgerError> {
        self.check_round_order(round)?;
        match self.pending_move {
            None => {
                return Err(LedgerError::NoPendingMove {
                    agent: self.id.clone(),
                    round,
                })
            }
            Some(pending) if pending != mv => {
                return Err(LedgerError::MoveMismatch {
                    agent: self.id.clone(),
                    pending,
                    reported: mv,
                })
            }
            Some(_) => {}
        }

        self.push_record(RoundRecord::new(round, mv, payoff));
        self.pending_move = None;
        Ok(())
    }

    /// Terminal copy of everything downstream analysis needs
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            agent_id: self.id.0.clone(),
            memory: self.memory,
            rut_threshold: self.rut_threshold.as_option(),
            swerve_count: self.swerve_count,
            straight_count: self.straight_count,
            cumulative_payoff: self.cumulative_payoff,
            history: self.history.clone(),
        }
    }

    fn check_round_order(&self, round: u64) -> Result<(), LedgerError> {
        match self.history.last() {
            Some(last) if round <= last.round => Err(LedgerError::RoundOutOfOrder {
                agent: self.id.clone(),
                round,
                last: last.round,
            }),
            _ => Ok(()),
        }
    }

    fn push_record(&mut self, record: RoundRecord) {
        self.cumulative_payoff += record.payoff;
        self.history.push(record);
    }
}
