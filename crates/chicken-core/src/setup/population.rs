//! Population Spawning
//!
//! Spawns one agent entity per cohort member, identities from the injected
//! allocator.

use bevy_ecs::prelude::*;
use std::collections::BTreeMap;

use crate::components::agent::Agent;
use crate::config::{CohortConfig, ConfigError};

use super::ids::IdAllocator;

/// Summary of a spawned population
#[derive(Debug, Default)]
pub struct PopulationSummary {
    pub total_agents: usize,
    /// Agent count per memory window
    pub by_memory: BTreeMap<u32, usize>,
}

/// Spawn all cohorts in order. Nothing is spawned if any cohort is invalid.
pub fn spawn_population<I: IdAllocator + ?Sized>(
    world: &mut World,
    cohorts: &[CohortConfig],
    ids: &mut I,
) -> Result<PopulationSummary, ConfigError> {
    let params = cohorts
        .iter()
        .enumerate()
        .map(|(index, cohort)| {
            cohort
                .params()
                .map_err(|source| ConfigError::Cohort { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut summary = PopulationSummary::default();
    for (cohort, params) in cohorts.iter().zip(params) {
        for _ in 0..cohort.count {
            world.spawn(Agent::new(ids.next_id(), params));
        }
        summary.total_agents += cohort.count;
        *summary.by_memory.entry(cohort.memory).or_insert(0) += cohort.count;
    }

    if summary.total_agents == 0 {
        return Err(ConfigError::EmptyPopulation);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::RutThreshold;
    use crate::setup::ids::SequentialIds;

    #[test]
    fn test_spawn_cohorts() {
        let mut world = World::new();
        let cohorts = [CohortConfig::new(2, 0, None), CohortConfig::new(3, 4, Some(80.0))];

        let summary = spawn_population(&mut world, &cohorts, &mut SequentialIds::new()).unwrap();
        assert_eq!(summary.total_agents, 5);
        assert_eq!(summary.by_memory.get(&4), Some(&3));

        let mut query = world.query::<&Agent>();
        let mut agents: Vec<&Agent> = query.iter(&world).collect();
        agents.sort_by(|a, b| a.id().cmp(b.id()));
        assert_eq!(agents.len(), 5);
        assert_eq!(agents[0].id().as_str(), "agent_0001");
        assert_eq!(agents[0].memory(), 0);
        assert_eq!(agents[4].memory(), 4);
        assert_eq!(agents[4].rut_threshold(), RutThreshold::Percent(80.0));
    }

    #[test]
    fn test_invalid_cohort_spawns_nothing() {
        let mut world = World::new();
        let cohorts = [CohortConfig::new(2, 1, None), CohortConfig::new(2, 1, Some(-5.0))];

        let result = spawn_population(&mut world, &cohorts, &mut SequentialIds::new());
        assert!(matches!(result, Err(ConfigError::Cohort { index: 1, .. })));
        assert_eq!(world.query::<&Agent>().iter(&world).count(), 0);
    }
}
