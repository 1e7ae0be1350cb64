//! Species contract and factory registry
//!
//! The engine only talks to a species through [`Critter`]: it hands over a
//! sensed [`View`] and applies whatever [`Action`] comes back. New instances
//! are built by name through [`SpeciesRegistry`].

use std::collections::BTreeMap;
use std::fmt;

use rand_pcg::Pcg32;

use super::sensor::View;
use super::state::{Action, Color};
use crate::error::{Result, SimError};

/// Behaviour of one critter instance.
///
/// Implementations must be total: a panic here ends the run.
pub trait Critter: fmt::Debug {
    /// Choose this tick's action from the sensed surroundings
    fn decide(&mut self, view: &View) -> Action;

    /// Display color, queried once per tick after all actions resolve
    fn color(&mut self) -> Color;

    /// Display glyph, queried alongside [`Critter::color`]
    fn glyph(&self) -> String;
}

/// Builds a fresh instance; may draw a sub-variant from the world RNG
pub type SpeciesFactory = Box<dyn Fn(&mut Pcg32) -> Box<dyn Critter>>;

/// Species tag → factory
#[derive(Default)]
pub struct SpeciesRegistry {
    factories: BTreeMap<String, SpeciesFactory>,
}

impl SpeciesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a species under `name`
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&mut Pcg32) -> Box<dyn Critter> + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build a new instance of `name`
    pub fn create(&self, name: &str, rng: &mut Pcg32) -> Result<Box<dyn Critter>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SimError::UnknownSpecies(name.to_string()))?;
        Ok(factory(rng))
    }
}

impl fmt::Debug for SpeciesRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
