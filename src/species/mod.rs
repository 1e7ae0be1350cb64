//! Built-in species
//!
//! Each is an implementation of [`Critter`]; [`builtin_registry`] makes them
//! available to [`World::add_species`](crate::sim::World::add_species) by name.

pub mod bear;
pub mod tiger;

use rand::Rng;

pub use bear::Bear;
pub use tiger::{NinjaCat, Tiger, WhiteTiger};

use crate::sim::{Critter, SpeciesRegistry};

pub const BEAR: &str = "Bear";
pub const TIGER: &str = "Tiger";
pub const WHITE_TIGER: &str = "WhiteTiger";
pub const NINJA_CAT: &str = "NinjaCat";

/// Registry with every built-in species
pub fn builtin_registry() -> SpeciesRegistry {
    let mut registry = SpeciesRegistry::new();
    registry
        .register(BEAR, |rng| -> Box<dyn Critter> { Box::new(Bear::new(rng.random_bool(0.5))) })
        .register(TIGER, |rng| -> Box<dyn Critter> { Box::new(Tiger::new(rng)) })
        .register(WHITE_TIGER, |_| -> Box<dyn Critter> { Box::new(WhiteTiger::new()) })
        .register(NINJA_CAT, |_| -> Box<dyn Critter> { Box::new(NinjaCat::new()) });
    registry
}
