//! Tigers and their variants
//!
//! All three share the same stride: infect what's ahead, turn away from
//! walls, veer off friends, otherwise hop. They differ only in looks.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Action, Color, Critter, NeighborKind, View};

const TIGER_COLORS: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

/// Shared tiger movement rule
fn stride(view: &View) -> Action {
    if view.front() == NeighborKind::Other {
        Action::Infect
    } else if view.front() == NeighborKind::Wall || view.right() == NeighborKind::Wall {
        Action::TurnLeft
    } else if view.front() == NeighborKind::Same {
        Action::TurnRight
    } else {
        Action::Hop
    }
}

/// Changes color every third move, never repeating the current one
#[derive(Debug, Clone)]
pub struct Tiger {
    moves: u32,
    color: Color,
    rng: Pcg32,
}

impl Tiger {
    /// `rng` is the world generator; the tiger forks its own stream from it
    pub fn new(rng: &mut Pcg32) -> Self {
        let mut rng = Pcg32::seed_from_u64(rng.random());
        let color = TIGER_COLORS[rng.random_range(0..TIGER_COLORS.len())];
        Self {
            moves: 0,
            color,
            rng,
        }
    }

    fn recolor(&mut self) {
        let current = self.color;
        let choices: Vec<Color> = TIGER_COLORS.into_iter().filter(|&c| c != current).collect();
        self.color = choices[self.rng.random_range(0..choices.len())];
    }
}

impl Critter for Tiger {
    fn decide(&mut self, view: &View) -> Action {
        self.moves += 1;
        stride(view)
    }

    fn color(&mut self) -> Color {
        if self.moves % 3 == 0 {
            self.recolor();
        }
        self.color
    }

    fn glyph(&self) -> String {
        "TGR".to_string()
    }
}

/// White tiger: lowercase until it has faced prey
#[derive(Debug, Clone, Default)]
pub struct WhiteTiger {
    has_infected: bool,
}

impl WhiteTiger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Critter for WhiteTiger {
    fn decide(&mut self, view: &View) -> Action {
        if view.front() == NeighborKind::Other {
            self.has_infected = true;
        }
        stride(view)
    }

    fn color(&mut self) -> Color {
        Color::WHITE
    }

    fn glyph(&self) -> String {
        let glyph = if self.has_infected { "TGR" } else { "tgr" };
        glyph.to_string()
    }
}

/// Ninja cat: orange `z`, turning magenta `Z` once it has faced prey
#[derive(Debug, Clone, Default)]
pub struct NinjaCat {
    has_infected: bool,
}

impl NinjaCat {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Critter for NinjaCat {
    fn decide(&mut self, view: &View) -> Action {
        if view.front() == NeighborKind::Other {
            self.has_infected = true;
        }
        stride(view)
    }

    fn color(&mut self) -> Color {
        if self.has_infected {
            Color::MAGENTA
        } else {
            Color::ORANGE
        }
    }

    fn glyph(&self) -> String {
        let glyph = if self.has_infected { "Z" } else { "z" };
        glyph.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Direction;

    fn view(front: NeighborKind, right: NeighborKind) -> View {
        View::new(
            Direction::East,
            [front, right, NeighborKind::Empty, NeighborKind::Empty],
            [false; 4],
        )
    }

    #[test]
    fn test_stride() {
        use NeighborKind::*;
        assert_eq!(stride(&view(Other, Wall)), Action::Infect);
        assert_eq!(stride(&view(Wall, Empty)), Action::TurnLeft);
        assert_eq!(stride(&view(Empty, Wall)), Action::TurnLeft);
        assert_eq!(stride(&view(Same, Empty)), Action::TurnRight);
        assert_eq!(stride(&view(Empty, Same)), Action::Hop);
    }

    #[test]
    fn test_tiger_recolors_every_third_move() {
        let mut world_rng = Pcg32::seed_from_u64(42);
        let mut tiger = Tiger::new(&mut world_rng);
        let empty = view(NeighborKind::Empty, NeighborKind::Empty);

        let mut previous = tiger.color;
        for _ in 0..30 {
            tiger.decide(&empty);
            let color = tiger.color();
            assert!(TIGER_COLORS.contains(&color));
            if tiger.moves % 3 == 0 {
                assert_ne!(color, previous);
            } else {
                assert_eq!(color, previous);
            }
            previous = color;
        }
        assert_eq!(tiger.glyph(), "TGR");
    }

    #[test]
    fn test_white_tiger_glyph_after_prey() {
        let mut tiger = WhiteTiger::new();
        assert_eq!(tiger.glyph(), "tgr");
        tiger.decide(&view(NeighborKind::Empty, NeighborKind::Empty));
        assert_eq!(tiger.glyph(), "tgr");
        assert_eq!(tiger.decide(&view(NeighborKind::Other, NeighborKind::Empty)), Action::Infect);
        assert_eq!(tiger.glyph(), "TGR");
        assert_eq!(tiger.color(), Color::WHITE);
    }

    #[test]
    fn test_ninja_cat_looks() {
        let mut cat = NinjaCat::new();
        assert_eq!((cat.color(), cat.glyph().as_str()), (Color::ORANGE, "z"));
        cat.decide(&view(NeighborKind::Other, NeighborKind::Empty));
        assert_eq!((cat.color(), cat.glyph().as_str()), (Color::MAGENTA, "Z"));
    }
}
