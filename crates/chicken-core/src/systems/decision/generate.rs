//! Move Generator
//!
//! Chooses each agent's move for the round in flight. A non-rut agent with
//! enough history plays whichever move paid more over its memory window;
//! everything else (rut, warm-up, exact tie, no memory) is a coin flip.

use chicken_events::{Move, RoundRecord};
use rand::Rng;
use std::cmp::Ordering;
use tracing::trace;

use crate::components::agent::Agent;

/// Why a move was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReason {
    /// The memory window favoured this move
    Exploit,
    /// Forced exploration while in a rut
    InRut,
    /// Both moves paid the same over the window
    Tie,
    /// Not more history than the memory window yet
    WarmingUp,
    /// Memory of zero always plays randomly
    NoMemory,
}

impl MoveReason {
    pub fn is_random(&self) -> bool {
        !matches!(self, MoveReason::Exploit)
    }
}

/// Result of a single move-generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub mv: Move,
    pub reason: MoveReason,
}

/// The move with the higher summed payoff over `window`, or `None` on a tie
pub fn exploit_preference(window: &[RoundRecord]) -> Option<Move> {
    let (swerve_total, straight_total) =
        window
            .iter()
            .fold((0, 0), |(swerve, straight), record| match record.mv {
                Move::Swerve => (swerve + record.payoff, straight),
                Move::Straight => (swerve, straight + record.payoff),
            });

    match swerve_total.cmp(&straight_total) {
        Ordering::Greater => Some(Move::Swerve),
        Ordering::Less => Some(Move::Straight),
        Ordering::Equal => None,
    }
}

/// Uniform draw over both moves
pub fn random_move<R: Rng>(rng: &mut R) -> Move {
    Move::ALL[rng.gen_range(0..Move::ALL.len())]
}

impl Agent {
    /// Choose the move for `current_round` and count it in the tallies.
    ///
    /// Always returns a move. The RNG is only drawn from when no
    /// memory-driven preference exists.
    pub fn generate_move<R: Rng>(&mut self, current_round: u64, rng: &mut R) -> Move {
        self.decide(current_round, rng).mv
    }

    /// Same as [`Agent::generate_move`], also reporting why the move was chosen.
    pub fn decide<R: Rng>(&mut self, current_round: u64, rng: &mut R) -> Decision {
        self.pending_move = None;
        let threshold = self.rut_threshold();
        let in_rut = self.classify_rut(current_round, threshold);

        let memory = self.memory() as usize;
        let reason = if in_rut {
            MoveReason::InRut
        } else if memory == 0 {
            MoveReason::NoMemory
        } else if self.history.len() <= memory {
            MoveReason::WarmingUp
        } else {
            match exploit_preference(self.recent(memory)) {
                Some(mv) => {
                    self.pending_move = Some(mv);
                    MoveReason::Exploit
                }
                None => MoveReason::Tie,
            }
        };

        let mv = match self.pending_move {
            Some(mv) => mv,
            None => random_move(rng),
        };
        self.pending_move = Some(mv);

        match mv {
            Move::Swerve => self.swerve_count += 1,
            Move::Straight => self.straight_count += 1,
        }

        trace!(agent = %self.id(), round = current_round, %mv, ?reason, "move chosen");
        Decision { mv, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::{AgentId, AgentParams, RutThreshold};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const A: Move = Move::Swerve;
    const B: Move = Move::Straight;

    fn agent_with(memory: u32, rut: RutThreshold, plays: &[(Move, i64)]) -> Agent {
        let history = plays
            .iter()
            .enumerate()
            .map(|(i, &(mv, payoff))| RoundRecord::new(i as u64, mv, payoff));
        Agent::with_history(AgentId("agent_test".into()), AgentParams::new(memory, rut), history)
            .unwrap()
    }

    #[test]
    fn test_exploit_preference() {
        let window = [
            RoundRecord::new(0, A, 5),
            RoundRecord::new(1, A, 5),
            RoundRecord::new(2, B, 1),
        ];
        assert_eq!(exploit_preference(&window), Some(A));

        let window = [RoundRecord::new(0, A, -1), RoundRecord::new(1, B, 1)];
        assert_eq!(exploit_preference(&window), Some(B));

        let window = [RoundRecord::new(0, A, 3), RoundRecord::new(1, B, 3)];
        assert_eq!(exploit_preference(&window), None);
        assert_eq!(exploit_preference(&[]), None);
    }

    #[test]
    fn test_exploits_winning_swerve() {
        // Swerve must win even though it is the first move choice
        let mut agent = agent_with(3, RutThreshold::Disabled, &[(B, 0), (A, 5), (A, 5), (B, 1)]);
        let mut rng = SmallRng::seed_from_u64(1);

        let decision = agent.decide(4, &mut rng);
        assert_eq!(decision, Decision { mv: A, reason: MoveReason::Exploit });
        assert_eq!(agent.pending_move(), Some(A));
        assert_eq!(agent.swerve_count(), 3);
    }

    #[test]
    fn test_exploit_ignores_rounds_outside_window() {
        let mut agent = agent_with(2, RutThreshold::Disabled, &[(A, 100), (A, 1), (B, 2)]);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(agent.generate_move(3, &mut rng), B);
    }

    #[test]
    fn test_warm_up_needs_more_history_than_memory() {
        let mut agent = agent_with(3, RutThreshold::Disabled, &[(A, 5), (A, 5), (A, 5)]);
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(agent.decide(3, &mut rng).reason, MoveReason::WarmingUp);
    }

    #[test]
    fn test_tie_falls_back_to_random() {
        let mut seen_swerve = false;
        let mut seen_straight = false;

        for seed in 0..64 {
            let mut agent = agent_with(2, RutThreshold::Disabled, &[(B, 0), (A, 3), (B, 3)]);
            let mut rng = SmallRng::seed_from_u64(seed);
            let decision = agent.decide(3, &mut rng);
            assert_eq!(decision.reason, MoveReason::Tie);
            match decision.mv {
                Move::Swerve => seen_swerve = true,
                Move::Straight => seen_straight = true,
            }
        }

        assert!(seen_swerve && seen_straight);
    }

    #[test]
    fn test_rut_skips_exploitation() {
        // memory 2, window of 4 all swerve, swerve also pays best
        let plays = [(A, 5), (A, 5), (A, 5), (A, 5), (A, 5)];
        let mut agent = agent_with(2, RutThreshold::Percent(75.0), &plays);
        let mut rng = SmallRng::seed_from_u64(9);

        let decision = agent.decide(5, &mut rng);
        assert!(agent.in_rut());
        assert_eq!(decision.reason, MoveReason::InRut);
        assert!(decision.reason.is_random());
    }

    #[test]
    fn test_same_seed_same_moves() {
        let run = |seed: u64| {
            let mut agent = agent_with(0, RutThreshold::Disabled, &[]);
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..50).map(|round| agent.generate_move(round, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_each_call_counts_exactly_one_move() {
        let mut agent = agent_with(1, RutThreshold::Disabled, &[(A, 1), (B, 0)]);
        let mut rng = SmallRng::seed_from_u64(5);
        let before = agent.swerve_count() + agent.straight_count();
        agent.generate_move(2, &mut rng);
        assert_eq!(agent.swerve_count() + agent.straight_count(), before + 1);
    }
}
