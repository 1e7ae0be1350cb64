//! Plain-text views of a world
//!
//! Used by the headless runner in place of a windowed display.

use std::fmt::Write;

use glam::IVec2;

use crate::sim::World;

/// One line per row; first glyph character per occupant, `.` for empty cells
pub fn render_grid(world: &World) -> String {
    let mut out = String::with_capacity((world.width() as usize + 1) * world.height() as usize);
    for y in 0..world.height() {
        for x in 0..world.width() {
            let ch = world
                .occupant_at(IVec2::new(x, y))
                .and_then(|cell| cell.glyph.chars().next())
                .unwrap_or('.');
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// `Name = count` per species (leader marked with `*`), then the step number
pub fn render_counts(world: &World) -> String {
    let leader = world.ledger().leader().map(|(name, _)| name);
    let mut out = String::new();
    for (name, count) in world.counts() {
        let mark = if Some(name.as_str()) == leader { '*' } else { ' ' };
        let _ = writeln!(out, "{mark} {name} = {count:4}");
    }
    let _ = writeln!(out, "  Step = {:5}", world.tick_number());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Action, Color, Critter, SpeciesRegistry, View, WorldConfig, WorldSlot};

    #[derive(Debug)]
    struct Still(&'static str);

    impl Critter for Still {
        fn decide(&mut self, _view: &View) -> Action {
            Action::TurnLeft
        }

        fn color(&mut self) -> Color {
            Color::BLACK
        }

        fn glyph(&self) -> String {
            self.0.to_string()
        }
    }

    fn world(slot: &WorldSlot) -> World {
        let mut species = SpeciesRegistry::new();
        species
            .register("Ant", |_| Box::new(Still("ant")))
            .register("Bee", |_| Box::new(Still("bee")));
        World::new(slot, WorldConfig::new(3, 2).with_seed(4), species).unwrap()
    }

    #[test]
    fn test_render_grid() {
        let slot = WorldSlot::new();
        let mut world = world(&slot);
        assert_eq!(render_grid(&world), "...\n...\n");

        world.add_species(2, "Ant").unwrap();
        world.add_species(1, "Bee").unwrap();
        assert_eq!(render_grid(&world).matches('?').count(), 3);

        world.step().unwrap();
        let grid = render_grid(&world);
        assert_eq!(grid.lines().count(), 2);
        assert_eq!(grid.matches('a').count(), 2);
        assert_eq!(grid.matches('b').count(), 1);
        assert_eq!(grid.matches('.').count(), 3);

        world.toggle_debug();
        let grid = render_grid(&world);
        assert_eq!(grid.matches(|c: char| "^>v<".contains(c)).count(), 3);
    }

    #[test]
    fn test_render_counts_marks_leader() {
        let slot = WorldSlot::new();
        let mut world = world(&slot);
        world.add_species(2, "Ant").unwrap();
        world.add_species(1, "Bee").unwrap();

        let counts = render_counts(&world);
        let lines: Vec<&str> = counts.lines().collect();
        assert_eq!(lines[0], "* Ant =    2");
        assert_eq!(lines[1], "  Bee =    1");
        assert_eq!(lines[2], "  Step =     0");
    }
}
