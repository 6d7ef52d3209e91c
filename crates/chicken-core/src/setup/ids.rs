//! Identifier Allocation
//!
//! Agents receive their identity from an allocator injected at setup time.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use uuid::{Builder, Uuid};

use crate::components::agent::AgentId;

/// Source of unique agent identifiers
pub trait IdAllocator {
    fn next_id(&mut self) -> AgentId;
}

/// `agent_0001`, `agent_0002`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&mut self) -> AgentId {
        self.next += 1;
        AgentId(format!("agent_{:04}", self.next))
    }
}

/// Random v4 UUIDs drawn from a seeded generator, so runs stay reproducible
#[derive(Debug)]
pub struct SeededUuids {
    rng: SmallRng,
}

impl SeededUuids {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn next_uuid(&mut self) -> Uuid {
        Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }
}

impl IdAllocator for SeededUuids {
    fn next_id(&mut self) -> AgentId {
        AgentId(self.next_uuid().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id().as_str(), "agent_0001");
        assert_eq!(ids.next_id().as_str(), "agent_0002");
        assert_eq!(ids.next_id().as_str(), "agent_0003");
    }

    #[test]
    fn test_seeded_uuids_are_v4_and_reproducible() {
        let mut a = SeededUuids::new(7);
        let mut b = SeededUuids::new(7);

        let first = a.next_uuid();
        assert_eq!(first.get_version_num(), 4);
        assert_eq!(first, b.next_uuid());
        assert_ne!(a.next_id(), AgentId(first.to_string()));
    }
}
