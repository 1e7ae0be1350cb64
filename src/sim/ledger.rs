//! Per-species population counts
//!
//! Only moves together with agent creation and removal. Species that die out
//! stay listed with a zero count so the display keeps a stable set of rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationLedger {
    counts: BTreeMap<String, usize>,
}

impl PopulationLedger {
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    pub fn increment(&mut self, species: &str) {
        *self.counts.entry(species.to_string()).or_insert(0) += 1;
    }

    /// Errors if the count would go negative (engine bug)
    pub fn decrement(&mut self, species: &str) -> Result<()> {
        match self.counts.get_mut(species) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(SimError::invariant(format!(
                "population of {species} would go negative"
            ))),
        }
    }

    /// Counts ordered by species name
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn count(&self, species: &str) -> usize {
        self.counts.get(species).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Species with the highest count; ties go to the first name
    pub fn leader(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (name, &count) in &self.counts {
            if count > best.map(|(_, c)| c).unwrap_or(0) {
                best = Some((name.as_str(), count));
            }
        }
        best
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
