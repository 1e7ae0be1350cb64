//! Agent registry
//!
//! Authoritative id → agent map. Ids are handed out monotonically and never
//! reused, so a stale id from an earlier snapshot simply misses.

use std::collections::BTreeMap;

use glam::IVec2;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::grid::Grid;
use super::species::Critter;
use super::state::{Agent, AgentId, Direction};
use crate::error::{Result, SimError};

#[derive(Debug)]
pub struct AgentRegistry {
    agents: BTreeMap<AgentId, Agent>,
    next_id: u32,
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn next_agent_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// Live agents ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Register a new agent; the caller places it on the grid
    pub fn spawn(
        &mut self,
        species: &str,
        brain: Box<dyn Critter>,
        position: IVec2,
        facing: Direction,
    ) -> AgentId {
        let id = self.next_agent_id();
        self.agents
            .insert(id, Agent::new(id, species, position, facing, brain));
        id
    }

    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        self.agents.remove(&id)
    }

    /// Place `count` new agents of one species on distinct random free cells.
    ///
    /// Nothing is placed if there are fewer free cells than `count`. New agents
    /// keep the default appearance until the first end-of-tick refresh.
    pub fn seed<F>(
        &mut self,
        grid: &mut Grid,
        rng: &mut Pcg32,
        count: usize,
        species: &str,
        mut make: F,
    ) -> Result<Vec<AgentId>>
    where
        F: FnMut(&mut Pcg32) -> Result<Box<dyn Critter>>,
    {
        let mut free = grid.free_cells();
        if count > free.len() {
            return Err(SimError::Capacity {
                requested: count,
                available: free.len(),
            });
        }

        let (chosen, _) = free.partial_shuffle(rng, count);
        let mut ids = Vec::with_capacity(count);
        for &pos in chosen.iter() {
            let facing = Direction::ALL[rng.random_range(0..4)];
            let brain = make(rng)?;
            let id = self.spawn(species, brain, pos, facing);
            grid.place(pos, id)?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Every live id in a fresh random order
    pub fn snapshot(&self, rng: &mut Pcg32) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.agents.keys().copied().collect();
        ids.shuffle(rng);
        ids
    }

    pub fn refresh_appearance(&mut self, id: AgentId) {
        if let Some(agent) = self.agents.get_mut(&id) {
            agent.refresh_appearance();
        }
    }

    pub fn refresh_all(&mut self) {
        for agent in self.agents.values_mut() {
            agent.refresh_appearance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sensor::View;
    use crate::sim::state::{Action, Color};
    use rand::SeedableRng;

    #[derive(Debug, Default)]
    struct Counter {
        refreshes: u32,
    }

    impl Critter for Counter {
        fn decide(&mut self, _view: &View) -> Action {
            Action::Hop
        }

        fn color(&mut self) -> Color {
            self.refreshes += 1;
            Color::GREEN
        }

        fn glyph(&self) -> String {
            self.refreshes.to_string()
        }
    }

    fn counter(_: &mut Pcg32) -> Result<Box<dyn Critter>> {
        Ok(Box::new(Counter::default()))
    }

    #[test]
    fn test_seed_places_on_distinct_cells() {
        let mut grid = Grid::new(4, 4);
        let mut registry = AgentRegistry::new();
        let mut rng = Pcg32::seed_from_u64(3);

        let ids = registry
            .seed(&mut grid, &mut rng, 16, "Counter", counter)
            .unwrap();
        assert_eq!(ids.len(), 16);
        assert_eq!(grid.occupied_count(), 16);
        for agent in registry.iter() {
            assert_eq!(grid.occupant_at(agent.position), Some(agent.id));
            assert_eq!(agent.appearance.color, Color::BLACK);
            assert_eq!(agent.appearance.glyph, "?");
        }
    }

    #[test]
    fn test_seeding_does_not_query_appearance() {
        let mut grid = Grid::new(2, 2);
        let mut registry = AgentRegistry::new();
        let mut rng = Pcg32::seed_from_u64(8);
        let ids = registry
            .seed(&mut grid, &mut rng, 3, "Counter", counter)
            .unwrap();

        registry.refresh_appearance(ids[0]);
        assert_eq!(registry.get(ids[0]).unwrap().appearance.glyph, "1");
        assert_eq!(registry.get(ids[1]).unwrap().appearance.glyph, "?");

        registry.refresh_all();
        assert_eq!(registry.get(ids[0]).unwrap().appearance.glyph, "2");
        for &id in &ids[1..] {
            let agent = registry.get(id).unwrap();
            assert_eq!(agent.appearance.color, Color::GREEN);
            assert_eq!(agent.appearance.glyph, "1");
        }
    }

    #[test]
    fn test_seed_over_capacity_places_nothing() {
        let mut grid = Grid::new(2, 2);
        let mut registry = AgentRegistry::new();
        let mut rng = Pcg32::seed_from_u64(3);

        let err = registry
            .seed(&mut grid, &mut rng, 5, "Counter", counter)
            .unwrap_err();
        assert_eq!(
            err,
            SimError::Capacity {
                requested: 5,
                available: 4
            }
        );
        assert!(registry.is_empty());
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_snapshot_covers_every_agent_once() {
        let mut grid = Grid::new(5, 5);
        let mut registry = AgentRegistry::new();
        let mut rng = Pcg32::seed_from_u64(11);
        registry
            .seed(&mut grid, &mut rng, 20, "Counter", counter)
            .unwrap();

        let mut first = registry.snapshot(&mut rng);
        let second = registry.snapshot(&mut rng);
        assert_ne!(first, second, "each snapshot reshuffles");

        first.sort();
        let all: Vec<AgentId> = registry.iter().map(|a| a.id).collect();
        assert_eq!(first, all);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut registry = AgentRegistry::new();
        let a = registry.spawn("Counter", Box::new(Counter::default()), IVec2::ZERO, Direction::North);
        registry.remove(a);
        let b = registry.spawn("Counter", Box::new(Counter::default()), IVec2::ZERO, Direction::North);
        assert_ne!(a, b);
        assert!(!registry.contains(a));
    }
}
