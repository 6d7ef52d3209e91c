//! Snapshot Types
//!
//! Serialization structs for the terminal results of a simulation run.
//!
//! Snapshots are taken once per agent at population teardown and are the
//! input for any downstream analysis.

use serde::{Deserialize, Serialize};

use crate::{Payoff, RoundRecord};

/// Terminal state of a single agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: String,
    pub memory: u32,
    /// Rut threshold percentage, absent when disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rut_threshold: Option<f64>,
    pub swerve_count: u64,
    pub straight_count: u64,
    pub cumulative_payoff: Payoff,
    #[serde(default)]
    pub history: Vec<RoundRecord>,
}

impl AgentSnapshot {
    pub fn rounds_played(&self) -> u64 {
        self.swerve_count + self.straight_count
    }

    /// Fraction of rounds in which the agent swerved (0.0 when it never played)
    pub fn swerve_share(&self) -> f64 {
        match self.rounds_played() {
            0 => 0.0,
            n => self.swerve_count as f64 / n as f64,
        }
    }
}

/// Aggregate over all agents sharing a memory window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub memory: u32,
    pub agent_count: usize,
    pub total_payoff: Payoff,
    pub mean_payoff: f64,
    pub swerve_share: f64,
}

/// Complete results of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsSnapshot {
    pub seed: u64,
    pub rounds: u64,
    pub agent_count: usize,
    pub total_payoff: Payoff,
    #[serde(default)]
    pub cohorts: Vec<CohortSummary>,
    #[serde(default)]
    pub agents: Vec<AgentSnapshot>,
}
