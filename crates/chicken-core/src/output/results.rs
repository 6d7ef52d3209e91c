//! Results Ledger
//!
//! Caller-owned collection of terminal agent snapshots. A fresh ledger is
//! created for every run, so results never leak between simulations.

use chicken_events::{AgentSnapshot, CohortSummary, Payoff, ResultsSnapshot};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Default results output path
pub const DEFAULT_RESULTS_PATH: &str = "output/results.json";

/// Errors that can occur while writing results
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
pub struct ResultsLedger {
    snapshots: Vec<AgentSnapshot>,
}

impl ResultsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, snapshot: AgentSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[AgentSnapshot] {
        &self.snapshots
    }

    pub fn total_payoff(&self) -> Payoff {
        self.snapshots.iter().map(|s| s.cumulative_payoff).sum()
    }

    /// Per-memory aggregates, ascending by memory. The cohort swerve share is
    /// the mean of its members' shares.
    pub fn cohort_summaries(&self) -> Vec<CohortSummary> {
        let mut groups: BTreeMap<u32, Vec<&AgentSnapshot>> = BTreeMap::new();
        for snapshot in &self.snapshots {
            groups.entry(snapshot.memory).or_default().push(snapshot);
        }

        groups
            .into_iter()
            .map(|(memory, members)| {
                let count = members.len() as f64;
                let total_payoff: Payoff = members.iter().map(|s| s.cumulative_payoff).sum();
                let share_sum: f64 = members.iter().map(|s| s.swerve_share()).sum();
                CohortSummary {
                    memory,
                    agent_count: members.len(),
                    total_payoff,
                    mean_payoff: total_payoff as f64 / count,
                    swerve_share: share_sum / count,
                }
            })
            .collect()
    }

    /// Build the complete results document
    pub fn summarize(&self, seed: u64, rounds: u64) -> ResultsSnapshot {
        ResultsSnapshot {
            seed,
            rounds,
            agent_count: self.len(),
            total_payoff: self.total_payoff(),
            cohorts: self.cohort_summaries(),
            agents: self.snapshots.clone(),
        }
    }
}

/// Write results as pretty JSON, creating parent directories as needed
pub fn write_results(
    results: &ResultsSnapshot,
    path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writer.flush()?;
    Ok(())
}
