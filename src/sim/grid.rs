//! Occupancy grid
//!
//! A fixed width×height array of slots, each holding at most one agent id.
//! Row-major, origin at the top-left, y grows downward.

use glam::IVec2;

use super::state::AgentId;
use crate::error::{Result, SimError};

#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    slots: Vec<Option<AgentId>>,
}

impl Grid {
    /// Dimensions must already be validated as positive
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            slots: vec![None; width.max(0) as usize * height.max(0) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Occupant of a cell (None for empty or out-of-bounds cells)
    pub fn occupant_at(&self, pos: IVec2) -> Option<AgentId> {
        self.index(pos).and_then(|i| self.slots[i])
    }

    /// Store an id in an empty, in-bounds slot
    pub fn place(&mut self, pos: IVec2, id: AgentId) -> Result<()> {
        let i = self
            .index(pos)
            .ok_or_else(|| SimError::invariant(format!("place {id} out of bounds at {pos}")))?;
        if let Some(existing) = self.slots[i] {
            return Err(SimError::invariant(format!(
                "place {id} at {pos} already held by {existing}"
            )));
        }
        self.slots[i] = Some(id);
        Ok(())
    }

    /// Empty a slot, returning what was there
    pub fn clear(&mut self, pos: IVec2) -> Option<AgentId> {
        let i = self.index(pos)?;
        self.slots[i].take()
    }

    /// Every empty cell, in row-major order
    pub fn free_cells(&self) -> Vec<IVec2> {
        self.cells().filter(|(_, id)| id.is_none()).map(|(pos, _)| pos).collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// All cells with their occupant, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, Option<AgentId>)> + '_ {
        let width = self.width;
        self.slots
            .iter()
            .enumerate()
            .map(move |(i, id)| (IVec2::new(i as i32 % width, i as i32 / width), *id))
    }
}
