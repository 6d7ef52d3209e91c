//! Rut Classifier
//!
//! An agent is in a rut when one move dominates the trailing window of
//! twice its memory by more than its threshold percentage.

use chicken_events::{Move, RoundRecord};
use tracing::debug;

use crate::components::agent::{Agent, RutThreshold};

/// Pure rut test over a history.
///
/// Returns `false` without looking at the history when memory is zero, the
/// threshold is disabled, or `current_round <= memory * 2`. The window is the
/// last `memory * 2` records, or fewer if that many do not exist yet.
pub fn rut_verdict(
    memory: u32,
    history: &[RoundRecord],
    current_round: u64,
    threshold: RutThreshold,
) -> bool {
    let Some(threshold) = threshold.active() else {
        return false;
    };
    if memory == 0 {
        return false;
    }

    let span = u64::from(memory) * 2;
    if current_round <= span {
        return false;
    }

    let window_len = usize::try_from(span).unwrap_or(usize::MAX);
    let window = &history[history.len().saturating_sub(window_len)..];
    if window.is_empty() {
        return false;
    }

    let swerves = window.iter().filter(|r| r.mv == Move::Swerve).count();
    let dominant = swerves.max(window.len() - swerves);
    // Multiply first so exact boundaries like 8/10 at 80% compare equal.
    let dominant_pct = dominant as f64 * 100.0 / window.len() as f64;

    dominant_pct > threshold
}

impl Agent {
    /// Refresh and return `in_rut` for the given round.
    pub fn classify_rut(&mut self, current_round: u64, threshold: RutThreshold) -> bool {
        let was_in_rut = self.in_rut;
        self.in_rut = rut_verdict(self.memory(), &self.history, current_round, threshold);

        if self.in_rut && !was_in_rut {
            debug!(agent = %self.id(), round = current_round, "agent entered a rut");
        }
        self.in_rut
    }
}
