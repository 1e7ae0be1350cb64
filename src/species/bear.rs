//! Bear: charges straight ahead, converting whatever it bumps into

use crate::sim::{Action, Color, Critter, NeighborKind, View};

#[derive(Debug, Clone)]
pub struct Bear {
    /// Polar bears are white, grizzlies black
    polar: bool,
    moves: u32,
}

impl Bear {
    pub fn new(polar: bool) -> Self {
        Self { polar, moves: 0 }
    }
}

impl Critter for Bear {
    fn decide(&mut self, view: &View) -> Action {
        self.moves += 1;
        match view.front() {
            NeighborKind::Other => Action::Infect,
            NeighborKind::Empty => Action::Hop,
            _ => Action::TurnLeft,
        }
    }

    fn color(&mut self) -> Color {
        if self.polar { Color::WHITE } else { Color::BLACK }
    }

    fn glyph(&self) -> String {
        let glyph = if self.moves % 2 == 0 { "/" } else { "\\" };
        glyph.to_string()
    }
}
