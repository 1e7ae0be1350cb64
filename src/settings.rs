//! Run settings
//!
//! Loaded from a JSON file for headless runs; every field has a default so a
//! partial file is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_STEPS, DEFAULT_WIDTH, HOP_ADVANTAGE, REPORT_EVERY};
use crate::sim::WorldConfig;
use crate::species::{BEAR, NINJA_CAT, TIGER, WHITE_TIGER};

/// Errors while reading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How many of one species to seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationEntry {
    pub species: String,
    pub count: usize,
}

impl PopulationEntry {
    pub fn new(species: impl Into<String>, count: usize) -> Self {
        Self {
            species: species.into(),
            count,
        }
    }
}

/// Headless run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub width: i32,
    pub height: i32,
    /// Fixed seed for a repeatable run; random when absent
    pub seed: Option<u64>,
    /// Chance an infect attempt fails without a preceding hop
    pub hop_advantage: f64,

    // === Run ===
    /// Total ticks to simulate
    pub steps: u64,
    /// Ticks between count reports (0 disables)
    pub report_every: u64,
    /// Check grid/ledger consistency after every tick
    pub verify_invariants: bool,

    // === Display ===
    /// Show facing indicators instead of species glyphs
    pub debug_glyphs: bool,

    /// Initial populations, seeded in order
    pub population: Vec<PopulationEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            hop_advantage: HOP_ADVANTAGE,

            steps: DEFAULT_STEPS,
            report_every: REPORT_EVERY,
            verify_invariants: false,

            debug_glyphs: false,

            population: vec![
                PopulationEntry::new(BEAR, 30),
                PopulationEntry::new(TIGER, 30),
                PopulationEntry::new(WHITE_TIGER, 30),
                PopulationEntry::new(NINJA_CAT, 30),
            ],
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Engine parameters for [`World::new`](crate::sim::World::new)
    pub fn world_config(&self) -> WorldConfig {
        WorldConfig {
            width: self.width,
            height: self.height,
            hop_advantage: self.hop_advantage,
            seed: self.seed,
        }
    }

    /// Total agents the population list asks for
    pub fn requested_population(&self) -> usize {
        self.population.iter().map(|p| p.count).sum()
    }
}
