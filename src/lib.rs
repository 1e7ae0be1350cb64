//! Critters - a grid ecology of competing species
//!
//! Core modules:
//! - `sim`: Tick-resolution engine (grid, agents, sensing, infection)
//! - `species`: Built-in species behaviours
//! - `render`: Plain-text views of a world for headless runs
//! - `settings`: Run configuration loaded from JSON

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
pub mod species;

pub use error::{Result, SimError};
pub use settings::{PopulationEntry, Settings, SettingsError};
pub use sim::{Action, Critter, Direction, NeighborKind, View, World, WorldConfig, WorldSlot};

/// Simulation constants
pub mod consts {
    /// Chance an infect attempt fails when the actor did not hop on the
    /// previous tick (base success is `1 - HOP_ADVANTAGE`)
    pub const HOP_ADVANTAGE: f64 = 0.2;

    /// Largest grid a world accepts (width × height)
    pub const MAX_CELLS: i32 = 1 << 24;

    /// Default grid dimensions
    pub const DEFAULT_WIDTH: i32 = 60;
    pub const DEFAULT_HEIGHT: i32 = 50;

    /// Default ticks per headless run
    pub const DEFAULT_STEPS: u64 = 1000;

    /// Ticks between progress reports ("Next 100")
    pub const REPORT_EVERY: u64 = 100;
}
