//! Round Driver
//!
//! Systems that play one round across the whole population:
//! 1. Pair agents at random
//! 2. Each paired agent generates a move
//! 3. Payoffs are resolved and recorded in both agents' ledgers
//! 4. The round clock advances

use bevy_ecs::prelude::*;
use rand::seq::SliceRandom;
use tracing::error;

use crate::components::agent::{Agent, LedgerError};
use crate::components::game::PayoffTable;
use crate::SimRng;

use chicken_events::{Move, Payoff};

/// Global round counter, owned by the driver
///
/// `current()` is the number of completed rounds. It is passed to the rut
/// classifier and used as the id of the round in flight.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct RoundClock {
    completed: u64,
}

impl RoundClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.completed
    }

    pub fn advance(&mut self) {
        self.completed += 1;
    }
}

/// This round's matches
#[derive(Resource, Debug, Default)]
pub struct Pairings {
    pub pairs: Vec<(Entity, Entity)>,
    /// Agent left without an opponent when the population is odd
    pub idle: Option<Entity>,
}

impl Pairings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
        self.idle = None;
    }

    /// Every agent that plays this round, in pairing order
    pub fn participants(&self) -> impl Iterator<Item = Entity> + '_ {
        self.pairs.iter().flat_map(|&(a, b)| [a, b])
    }
}

/// Running counters over all rounds played
#[derive(Resource, Debug, Default, Clone)]
pub struct RoundStats {
    pub matches: u64,
    pub mutual_swerves: u64,
    pub crashes: u64,
    pub sit_outs: u64,
    pub exploited_moves: u64,
    pub random_moves: u64,
    pub ledger_errors: u64,
}

impl RoundStats {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Ledger violations raised during the current round
///
/// Any entry here is fatal: the caller drains it after every round and stops.
#[derive(Resource, Debug, Default)]
pub struct LedgerFaults {
    faults: Vec<LedgerError>,
}

impl LedgerFaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fault: LedgerError) {
        self.faults.push(fault);
    }

    pub fn drain(&mut self) -> Vec<LedgerError> {
        std::mem::take(&mut self.faults)
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }
}

/// System to pair agents for the round
///
/// Agents are ordered by id before shuffling so the pairing only depends on
/// the seed, not on entity allocation.
pub fn pair_agents(
    mut rng: ResMut<SimRng>,
    mut pairings: ResMut<Pairings>,
    mut stats: ResMut<RoundStats>,
    agents: Query<(Entity, &Agent)>,
) {
    pairings.clear();

    let mut roster: Vec<(Entity, &Agent)> = agents.iter().collect();
    roster.sort_by(|a, b| a.1.id().cmp(b.1.id()));
    let mut entities: Vec<Entity> = roster.into_iter().map(|(entity, _)| entity).collect();
    entities.shuffle(&mut rng.0);

    let mut chunks = entities.chunks_exact(2);
    for pair in &mut chunks {
        pairings.pairs.push((pair[0], pair[1]));
    }
    pairings.idle = chunks.remainder().first().copied();
    if pairings.idle.is_some() {
        stats.sit_outs += 1;
    }
}

/// System to generate a move for every paired agent
pub fn generate_moves(
    clock: Res<RoundClock>,
    pairings: Res<Pairings>,
    mut rng: ResMut<SimRng>,
    mut stats: ResMut<RoundStats>,
    mut agents: Query<&mut Agent>,
) {
    let round = clock.current();
    for entity in pairings.participants() {
        if let Ok(mut agent) = agents.get_mut(entity) {
            if agent.decide(round, &mut rng.0).reason.is_random() {
                stats.random_moves += 1;
            } else {
                stats.exploited_moves += 1;
            }
        }
    }
}

/// System to resolve payoffs and append them to both agents' histories
pub fn resolve_payoffs(
    clock: Res<RoundClock>,
    table: Res<PayoffTable>,
    pairings: Res<Pairings>,
    mut stats: ResMut<RoundStats>,
    mut faults: ResMut<LedgerFaults>,
    mut agents: Query<&mut Agent>,
) {
    let round = clock.current();

    for &(a, b) in &pairings.pairs {
        let Ok([mut first, mut second]) = agents.get_many_mut([a, b]) else {
            continue;
        };
        let (first_move, second_move) = match (first.pending_move(), second.pending_move()) {
            (Some(first_move), Some(second_move)) => (first_move, second_move),
            (None, _) => {
                report(&mut stats, &mut faults, round, no_pending_move(&first, round));
                continue;
            }
            (_, None) => {
                report(&mut stats, &mut faults, round, no_pending_move(&second, round));
                continue;
            }
        };

        let (first_payoff, second_payoff) = table.resolve(first_move, second_move);
        stats.matches += 1;
        match (first_move, second_move) {
            (Move::Swerve, Move::Swerve) => stats.mutual_swerves += 1,
            (Move::Straight, Move::Straight) => stats.crashes += 1,
            _ => {}
        }

        for result in [
            record(&mut first, round, first_move, first_payoff),
            record(&mut second, round, second_move, second_payoff),
        ] {
            if let Err(e) = result {
                report(&mut stats, &mut faults, round, e);
            }
        }
    }
}

fn record(agent: &mut Agent, round: u64, mv: Move, payoff: Payoff) -> Result<(), LedgerError> {
    agent.record_outcome(round, mv, payoff)
}

fn no_pending_move(agent: &Agent, round: u64) -> LedgerError {
    LedgerError::NoPendingMove {
        agent: agent.id().clone(),
        round,
    }
}

fn report(stats: &mut RoundStats, faults: &mut LedgerFaults, round: u64, fault: LedgerError) {
    error!(round, "ledger violation: {}", fault);
    stats.ledger_errors += 1;
    faults.push(fault);
}

/// System to close the round
pub fn advance_round(mut clock: ResMut<RoundClock>) {
    clock.advance();
}
