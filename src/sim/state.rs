//! Core simulation types
//!
//! Directions, sensed neighbor kinds, actions, appearance, and the per-agent
//! record the registry owns.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::species::Critter;

/// Compass facing
///
/// Rotation steps through the declaration order North, South, East, West, so
/// a "right" quarter turn from North lands on South.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions in rotation order (index = rotation steps from North)
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// Advance `steps` places through the rotation order
    pub fn rotate(self, steps: usize) -> Direction {
        Self::ALL[(self.index() + steps) % 4]
    }

    pub fn turn_left(self) -> Direction {
        self.rotate(3)
    }

    pub fn turn_right(self) -> Direction {
        self.rotate(1)
    }

    /// Grid offset of one step in this direction (y grows downward)
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::North => IVec2::new(0, -1),
            Direction::East => IVec2::new(1, 0),
            Direction::South => IVec2::new(0, 1),
            Direction::West => IVec2::new(-1, 0),
        }
    }

    /// Glyph shown in debug mode
    pub fn indicator(self) -> &'static str {
        match self {
            Direction::North => "^",
            Direction::East => ">",
            Direction::South => "v",
            Direction::West => "<",
        }
    }
}

/// What occupies an adjacent cell, relative to the observer's species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborKind {
    Wall,
    Empty,
    Same,
    Other,
}

/// The only mutations a critter may request per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Hop,
    TurnLeft,
    TurnRight,
    Infect,
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Cached display state, refreshed once at the end of every tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub color: Color,
    pub glyph: String,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            glyph: "?".to_string(),
        }
    }
}

/// Stable handle for an agent, never reused within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A live critter
#[derive(Debug)]
pub struct Agent {
    pub id: AgentId,
    /// Species tag (the name it was registered under)
    pub species: String,
    pub position: IVec2,
    pub facing: Direction,
    pub appearance: Appearance,
    /// Hopped successfully on the tick immediately before the current one
    pub hopped: bool,
    /// Species behaviour
    pub brain: Box<dyn Critter>,
}

impl Agent {
    pub fn new(
        id: AgentId,
        species: impl Into<String>,
        position: IVec2,
        facing: Direction,
        brain: Box<dyn Critter>,
    ) -> Self {
        Self {
            id,
            species: species.into(),
            position,
            facing,
            appearance: Appearance::default(),
            hopped: false,
            brain,
        }
    }

    /// Cell directly ahead of the agent
    pub fn ahead(&self) -> IVec2 {
        self.position + self.facing.offset()
    }

    /// Re-query the species for color and glyph
    pub fn refresh_appearance(&mut self) {
        self.appearance = Appearance {
            color: self.brain.color(),
            glyph: self.brain.glyph(),
        };
    }
}
