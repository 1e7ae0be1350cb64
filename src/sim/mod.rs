//! Simulation engine
//!
//! Everything that decides what happens on the grid lives here:
//! - One writer: `World::step` takes `&mut self` and runs to completion
//! - One RNG per world, seeded at construction
//! - Stable handles (`AgentId`) instead of object identity
//! - No rendering or platform dependencies

pub mod grid;
pub mod ledger;
pub mod registry;
pub mod sensor;
pub mod species;
pub mod state;
pub mod tick;
pub mod world;

pub use grid::Grid;
pub use ledger::PopulationLedger;
pub use registry::AgentRegistry;
pub use sensor::{View, sense};
pub use species::{Critter, SpeciesFactory, SpeciesRegistry};
pub use state::{Action, Agent, AgentId, Appearance, Color, Direction, NeighborKind};
pub use tick::{TickReport, step};
pub use world::{OccupantView, World, WorldConfig, WorldSlot};
