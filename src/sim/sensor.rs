//! Local perception
//!
//! Builds the [`View`] a critter decides from: the four adjacent cells,
//! scanned by rotating from the agent's facing (front, right, back, left),
//! plus a threat flag for each neighbor of another species. Rotation follows
//! [`Direction::rotate`], so for a north-facing agent "right" is the cell to
//! the south and "back" the cell to the east.

use glam::IVec2;
use serde::Serialize;

use super::grid::Grid;
use super::registry::AgentRegistry;
use super::state::{AgentId, Direction, NeighborKind};
use crate::error::{Result, SimError};

const FRONT: usize = 0;
const RIGHT: usize = 1;
const BACK: usize = 2;
const LEFT: usize = 3;

/// Immutable snapshot of an agent's surroundings, valid for one decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct View {
    facing: Direction,
    /// Indexed by rotation steps from facing: front, right, back, left
    neighbors: [NeighborKind; 4],
    threats: [bool; 4],
}

impl View {
    pub fn new(facing: Direction, neighbors: [NeighborKind; 4], threats: [bool; 4]) -> Self {
        Self {
            facing,
            neighbors,
            threats,
        }
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn front(&self) -> NeighborKind {
        self.neighbors[FRONT]
    }

    pub fn right(&self) -> NeighborKind {
        self.neighbors[RIGHT]
    }

    pub fn back(&self) -> NeighborKind {
        self.neighbors[BACK]
    }

    pub fn left(&self) -> NeighborKind {
        self.neighbors[LEFT]
    }

    pub fn front_threat(&self) -> bool {
        self.threats[FRONT]
    }

    pub fn right_threat(&self) -> bool {
        self.threats[RIGHT]
    }

    pub fn back_threat(&self) -> bool {
        self.threats[BACK]
    }

    pub fn left_threat(&self) -> bool {
        self.threats[LEFT]
    }
}

/// Sense the surroundings of agent `id`
pub fn sense(grid: &Grid, agents: &AgentRegistry, id: AgentId) -> Result<View> {
    let agent = agents
        .get(id)
        .ok_or_else(|| SimError::invariant(format!("sensing unknown agent {id}")))?;

    let mut neighbors = [NeighborKind::Wall; 4];
    let mut threats = [false; 4];

    for step in 0..4 {
        let scanned = agent.facing.rotate(step);
        let pos = agent.position + scanned.offset();
        let (kind, occupant) = classify(grid, agents, pos, &agent.species)?;
        neighbors[step] = kind;

        if let Some(other) = occupant.filter(|_| kind == NeighborKind::Other) {
            let other = agents
                .get(other)
                .ok_or_else(|| SimError::invariant(format!("grid holds dead agent {other}")))?;
            // Two half rotations compose to the identity: this compares the
            // neighbor's raw facing against the scanned direction.
            threats[step] = other.facing.rotate(2).rotate(2) == scanned;
        }
    }

    Ok(View::new(agent.facing, neighbors, threats))
}

fn classify(
    grid: &Grid,
    agents: &AgentRegistry,
    pos: IVec2,
    species: &str,
) -> Result<(NeighborKind, Option<AgentId>)> {
    if !grid.in_bounds(pos) {
        return Ok((NeighborKind::Wall, None));
    }
    let Some(id) = grid.occupant_at(pos) else {
        return Ok((NeighborKind::Empty, None));
    };
    let occupant = agents
        .get(id)
        .ok_or_else(|| SimError::invariant(format!("grid holds dead agent {id} at {pos}")))?;
    let kind = if occupant.species == species {
        NeighborKind::Same
    } else {
        NeighborKind::Other
    };
    Ok((kind, Some(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::species::Critter;
    use crate::sim::state::{Action, Color};

    #[derive(Debug)]
    struct Idle;

    impl Critter for Idle {
        fn decide(&mut self, _view: &View) -> Action {
            Action::TurnLeft
        }

        fn color(&mut self) -> Color {
            Color::BLACK
        }

        fn glyph(&self) -> String {
            "i".into()
        }
    }

    fn put(
        grid: &mut Grid,
        agents: &mut AgentRegistry,
        species: &str,
        x: i32,
        y: i32,
        facing: Direction,
    ) -> AgentId {
        let pos = IVec2::new(x, y);
        let id = agents.spawn(species, Box::new(Idle), pos, facing);
        grid.place(pos, id).unwrap();
        id
    }

    #[test]
    fn test_corner_sees_walls() {
        let mut grid = Grid::new(3, 3);
        let mut agents = AgentRegistry::new();
        let id = put(&mut grid, &mut agents, "A", 0, 0, Direction::North);

        let view = sense(&grid, &agents, id).unwrap();
        assert_eq!(view.facing(), Direction::North);
        assert_eq!(view.front(), NeighborKind::Wall);
        assert_eq!(view.right(), NeighborKind::Empty);
        assert_eq!(view.back(), NeighborKind::Empty);
        assert_eq!(view.left(), NeighborKind::Wall);
    }

    #[test]
    fn test_neighbors_rotate_with_facing() {
        let mut grid = Grid::new(3, 3);
        let mut agents = AgentRegistry::new();
        let id = put(&mut grid, &mut agents, "A", 1, 1, Direction::East);
        put(&mut grid, &mut agents, "A", 2, 1, Direction::North); // front (east)
        put(&mut grid, &mut agents, "B", 1, 0, Direction::West); // back (north)
        put(&mut grid, &mut agents, "B", 1, 2, Direction::North); // left (south)

        let view = sense(&grid, &agents, id).unwrap();
        assert_eq!(view.front(), NeighborKind::Same);
        assert_eq!(view.right(), NeighborKind::Empty);
        assert_eq!(view.back(), NeighborKind::Other);
        assert_eq!(view.left(), NeighborKind::Other);
        assert!(!view.front_threat(), "same species is never a threat");
    }

    #[test]
    fn test_north_facing_right_is_south() {
        let mut grid = Grid::new(3, 3);
        let mut agents = AgentRegistry::new();
        let id = put(&mut grid, &mut agents, "A", 1, 1, Direction::North);
        put(&mut grid, &mut agents, "B", 1, 2, Direction::North);

        let view = sense(&grid, &agents, id).unwrap();
        assert_eq!(view.front(), NeighborKind::Empty);
        assert_eq!(view.right(), NeighborKind::Other);
        assert_eq!(view.back(), NeighborKind::Empty);
        assert_eq!(view.left(), NeighborKind::Empty);
    }

    #[test]
    fn test_threat_matches_scanned_direction() {
        let mut grid = Grid::new(3, 1);
        let mut agents = AgentRegistry::new();
        let id = put(&mut grid, &mut agents, "A", 1, 0, Direction::East);
        // Front neighbor scanned while looking East, itself facing East
        put(&mut grid, &mut agents, "B", 2, 0, Direction::East);
        // Right neighbor scanned while looking West, facing East toward us
        put(&mut grid, &mut agents, "B", 0, 0, Direction::East);

        let view = sense(&grid, &agents, id).unwrap();
        assert!(view.front_threat());
        assert_eq!(view.right(), NeighborKind::Other);
        assert!(!view.right_threat());
        assert!(!view.back_threat());
        assert!(!view.left_threat());
    }

    #[test]
    fn test_dangling_grid_slot_is_invariant_violation() {
        let mut grid = Grid::new(2, 1);
        let mut agents = AgentRegistry::new();
        let id = put(&mut grid, &mut agents, "A", 0, 0, Direction::East);
        grid.place(IVec2::new(1, 0), AgentId(999)).unwrap();

        let err = sense(&grid, &agents, id).unwrap_err();
        assert!(err.is_fatal());
    }
}
