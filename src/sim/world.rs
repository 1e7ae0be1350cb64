//! The simulation world
//!
//! Owns the grid, the agent registry, the population ledger, the species
//! factories and the single RNG every random draw goes through. Only one
//! world may hold a [`WorldSlot`] at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::ledger::PopulationLedger;
use super::registry::AgentRegistry;
use super::species::SpeciesRegistry;
use super::state::{Agent, AgentId, Color, Direction};
use crate::consts::{HOP_ADVANTAGE, MAX_CELLS};
use crate::error::{Result, SimError};

/// Process-scoped "a world is live" flag.
///
/// Created once by the top-level composition and handed to every
/// [`World::new`] call; a second world on the same slot is rejected until the
/// first is dropped.
#[derive(Debug, Clone, Default)]
pub struct WorldSlot {
    active: Arc<AtomicBool>,
}

impl WorldSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_taken(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn acquire(&self) -> Result<WorldLease> {
        self.active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| SimError::configuration("only one live world is allowed"))?;
        Ok(WorldLease {
            active: Arc::clone(&self.active),
        })
    }
}

/// Releases the slot when the world is dropped
#[derive(Debug)]
struct WorldLease {
    active: Arc<AtomicBool>,
}

impl Drop for WorldLease {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

/// Engine-level parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    /// Chance that an infect attempt fails without a preceding hop
    pub hop_advantage: f64,
    /// RNG seed; drawn from the OS when absent
    pub seed: Option<u64>,
}

impl WorldConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            hop_advantage: HOP_ADVANTAGE,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_hop_advantage(mut self, hop_advantage: f64) -> Self {
        self.hop_advantage = hop_advantage;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SimError::configuration(format!(
                "world dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        match self.width.checked_mul(self.height) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return Err(SimError::configuration(format!(
                    "world of {}x{} exceeds the {} cell limit",
                    self.width, self.height, MAX_CELLS
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.hop_advantage) {
            return Err(SimError::configuration(format!(
                "hop advantage must be within [0, 1], got {}",
                self.hop_advantage
            )));
        }
        Ok(())
    }
}

/// What the display layer sees in an occupied cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupantView {
    pub id: AgentId,
    pub species: String,
    pub color: Color,
    /// Species glyph, or a facing indicator in debug mode
    pub glyph: String,
    pub facing: Direction,
}

#[derive(Debug)]
pub struct World {
    pub(crate) grid: Grid,
    pub(crate) agents: AgentRegistry,
    pub(crate) ledger: PopulationLedger,
    pub(crate) species: SpeciesRegistry,
    pub(crate) rng: Pcg32,
    pub(crate) hop_advantage: f64,
    pub(crate) tick: u64,
    seed: u64,
    debug_mode: bool,
    _lease: WorldLease,
}

impl World {
    /// Build an empty world; fails if `slot` is already held or the
    /// configuration is invalid. Nothing is created on failure.
    pub fn new(slot: &WorldSlot, config: WorldConfig, species: SpeciesRegistry) -> Result<Self> {
        config.validate()?;
        let lease = slot.acquire()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        log::info!(
            "World {}x{} initialized with seed: {}",
            config.width,
            config.height,
            seed
        );

        Ok(Self {
            grid: Grid::new(config.width, config.height),
            agents: AgentRegistry::new(),
            ledger: PopulationLedger::new(),
            species,
            rng: Pcg32::seed_from_u64(seed),
            hop_advantage: config.hop_advantage,
            tick: 0,
            seed,
            debug_mode: false,
            _lease: lease,
        })
    }

    /// Seed `count` agents of a registered species on random free cells.
    ///
    /// Only allowed before the first tick. On `Capacity` nothing is placed and
    /// earlier populations are untouched.
    pub fn add_species(&mut self, count: usize, species: &str) -> Result<()> {
        if self.tick > 0 {
            return Err(SimError::configuration(format!(
                "cannot add {species} after the simulation started"
            )));
        }
        if !self.species.contains(species) {
            return Err(SimError::UnknownSpecies(species.to_string()));
        }
        if count == 0 {
            return Ok(());
        }

        let factories = &self.species;
        let ids = self.agents.seed(
            &mut self.grid,
            &mut self.rng,
            count,
            species,
            |rng| factories.create(species, rng),
        )?;
        for _ in &ids {
            self.ledger.increment(species);
        }
        log::info!("Seeded {} {} (population {})", ids.len(), species, self.ledger.total());
        Ok(())
    }

    /// Put one agent of a registered species at an exact cell.
    ///
    /// Same rules as [`World::add_species`]; the cell must be free.
    pub fn place_agent(&mut self, species: &str, pos: IVec2, facing: Direction) -> Result<AgentId> {
        if self.tick > 0 {
            return Err(SimError::configuration(format!(
                "cannot place {species} after the simulation started"
            )));
        }
        if !self.grid.in_bounds(pos) {
            return Err(SimError::configuration(format!("{pos} is outside the grid")));
        }
        if self.grid.occupant_at(pos).is_some() {
            return Err(SimError::configuration(format!("{pos} is already occupied")));
        }

        let brain = self.species.create(species, &mut self.rng)?;
        let id = self.agents.spawn(species, brain, pos, facing);
        self.grid.place(pos, id)?;
        self.ledger.increment(species);
        Ok(id)
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ticks completed so far
    pub fn tick_number(&self) -> u64 {
        self.tick
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    /// Live agents ordered by id
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn counts(&self) -> &std::collections::BTreeMap<String, usize> {
        self.ledger.counts()
    }

    pub fn ledger(&self) -> &PopulationLedger {
        &self.ledger
    }

    pub fn total(&self) -> usize {
        self.ledger.total()
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Switch glyphs between species symbols and facing indicators
    pub fn toggle_debug(&mut self) {
        self.debug_mode = !self.debug_mode;
    }

    pub fn set_debug(&mut self, on: bool) {
        self.debug_mode = on;
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        self.grid.in_bounds(pos)
    }

    /// Display view of the cell at `pos`, if occupied
    pub fn occupant_at(&self, pos: IVec2) -> Option<OccupantView> {
        let agent = self.agents.get(self.grid.occupant_at(pos)?)?;
        let glyph = if self.debug_mode {
            agent.facing.indicator().to_string()
        } else {
            agent.appearance.glyph.clone()
        };
        Some(OccupantView {
            id: agent.id,
            species: agent.species.clone(),
            color: agent.appearance.color,
            glyph,
            facing: agent.facing,
        })
    }

    /// Verify grid, registry and ledger agree with each other
    pub fn check_invariants(&self) -> Result<()> {
        for agent in self.agents.iter() {
            if self.grid.occupant_at(agent.position) != Some(agent.id) {
                return Err(SimError::invariant(format!(
                    "agent {} records {} but the grid disagrees",
                    agent.id, agent.position
                )));
            }
        }

        let occupied = self.grid.occupied_count();
        if occupied != self.agents.len() {
            return Err(SimError::invariant(format!(
                "{} occupied cells for {} live agents",
                occupied,
                self.agents.len()
            )));
        }

        if self.ledger.total() != self.agents.len() {
            return Err(SimError::invariant(format!(
                "ledger total {} for {} live agents",
                self.ledger.total(),
                self.agents.len()
            )));
        }
        for (species, &count) in self.ledger.counts() {
            let live = self.agents.iter().filter(|a| &a.species == species).count();
            if live != count {
                return Err(SimError::invariant(format!(
                    "ledger has {count} {species}, registry has {live}"
                )));
            }
        }
        Ok(())
    }
}
