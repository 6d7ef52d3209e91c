//! Simulation
//!
//! Owns the ECS world and the round schedule. This is the driver the decision
//! engine is written against: it advances the round clock, pairs agents,
//! records outcomes and takes the terminal snapshots.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use crate::components::agent::{Agent, LedgerError};
use crate::config::{ConfigError, SimConfig};
use crate::output::ResultsLedger;
use crate::setup::{spawn_population, IdAllocator, PopulationSummary};
use crate::systems::{
    advance_round, generate_moves, pair_agents, resolve_payoffs, LedgerFaults, Pairings,
    RoundClock, RoundStats,
};
use crate::SimRng;

pub struct Simulation {
    world: World,
    schedule: Schedule,
    seed: u64,
    population: PopulationSummary,
}

impl Simulation {
    /// Build the world from a configuration. Fails before any round runs if
    /// the configuration is invalid.
    pub fn new<I: IdAllocator + ?Sized>(
        config: &SimConfig,
        ids: &mut I,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        world.insert_resource(SimRng(SmallRng::seed_from_u64(config.simulation.seed)));
        world.insert_resource(RoundClock::new());
        world.insert_resource(Pairings::new());
        world.insert_resource(RoundStats::new());
        world.insert_resource(LedgerFaults::new());
        world.insert_resource(config.payoffs);

        let population = spawn_population(&mut world, &config.cohorts, ids)?;

        // 1. Pair
        // 2. Decide
        // 3. Resolve and record
        // 4. Advance the clock
        let mut schedule = Schedule::default();
        schedule.add_systems((pair_agents, generate_moves, resolve_payoffs, advance_round).chain());

        Ok(Self {
            world,
            schedule,
            seed: config.simulation.seed,
            population,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn population(&self) -> &PopulationSummary {
        &self.population
    }

    /// Number of completed rounds
    pub fn current_round(&self) -> u64 {
        self.world.resource::<RoundClock>().current()
    }

    pub fn stats(&self) -> &RoundStats {
        self.world.resource::<RoundStats>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Play one round. A ledger violation is fatal and is returned once the
    /// round has finished.
    pub fn run_round(&mut self) -> Result<(), LedgerError> {
        self.schedule.run(&mut self.world);
        let mut faults = self.world.resource_mut::<LedgerFaults>().drain();
        if faults.is_empty() {
            Ok(())
        } else {
            Err(faults.swap_remove(0))
        }
    }

    /// Play `rounds` rounds, stopping at the first ledger violation.
    pub fn run(&mut self, rounds: u64) -> Result<(), LedgerError> {
        info!(
            seed = self.seed,
            agents = self.population.total_agents,
            rounds,
            "starting simulation"
        );
        for _ in 0..rounds {
            self.run_round()?;
        }

        let stats = self.stats();
        info!(
            rounds = self.current_round(),
            matches = stats.matches,
            crashes = stats.crashes,
            random_moves = stats.random_moves,
            exploited_moves = stats.exploited_moves,
            "simulation complete"
        );
        Ok(())
    }

    /// Agents ordered by id
    pub fn agents(&mut self) -> Vec<&Agent> {
        let mut query = self.world.query::<&Agent>();
        let mut agents: Vec<&Agent> = query.iter(&self.world).collect();
        agents.sort_by(|a, b| a.id().cmp(b.id()));
        agents
    }

    /// Snapshot every agent into the caller's ledger, ordered by id
    pub fn collect_results(&mut self, ledger: &mut ResultsLedger) {
        for agent in self.agents() {
            ledger.record(agent.snapshot());
        }
    }
}
