//! Tick resolution
//!
//! Advances the world by exactly one step: every agent alive at the start of
//! the tick acts once, in a freshly shuffled order, against the live grid.
//! Agents that hop or are created by infection are locked against being
//! infected for the rest of the tick, so conversions never chain.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use super::sensor;
use super::state::{Action, Agent, AgentId};
use super::world::World;
use crate::error::{Result, SimError};

/// Outcome counters for one tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    /// Agents that acted
    pub acted: usize,
    pub hops: usize,
    pub turns: usize,
    pub infections: usize,
    /// Hop or Infect requests that resolved as no-ops
    pub blocked: usize,
}

impl TickReport {
    fn new(tick: u64) -> Self {
        Self {
            tick,
            ..Default::default()
        }
    }
}

/// Agents that may not be infected for the rest of the tick
type LockSet = HashSet<AgentId>;

impl World {
    /// Advance the simulation by one tick
    pub fn step(&mut self) -> Result<TickReport> {
        step(self)
    }

    /// Advance `n` ticks, stopping at the first error
    pub fn step_many(&mut self, n: u64) -> Result<Vec<TickReport>> {
        (0..n).map(|_| self.step()).collect()
    }

    /// Step while the tick count is not a multiple of `n`; returns the number
    /// of ticks run (zero when already on a multiple)
    pub fn step_to_multiple(&mut self, n: u64) -> Result<u64> {
        if n == 0 {
            return Err(SimError::configuration("step multiple must be positive"));
        }
        let mut steps = 0;
        while self.tick % n != 0 {
            self.step()?;
            steps += 1;
        }
        Ok(steps)
    }
}

/// Advance the world by one tick
pub fn step(world: &mut World) -> Result<TickReport> {
    world.tick += 1;
    let mut report = TickReport::new(world.tick);

    let order = world.agents.snapshot(&mut world.rng);
    let mut locked = LockSet::new();

    for id in order {
        // Infected earlier this tick
        let Some(agent) = world.agents.get_mut(id) else {
            continue;
        };
        let was_hopped = std::mem::replace(&mut agent.hopped, false);

        let view = sensor::sense(&world.grid, &world.agents, id)?;
        let action = match world.agents.get_mut(id) {
            Some(agent) => agent.brain.decide(&view),
            None => continue,
        };
        log::trace!("tick {} agent {} {:?}", world.tick, id, action);

        report.acted += 1;
        let applied = apply_action(world, id, action, was_hopped, &mut locked)?;
        match (action, applied) {
            (Action::TurnLeft | Action::TurnRight, _) => report.turns += 1,
            (Action::Hop, true) => report.hops += 1,
            (Action::Infect, true) => report.infections += 1,
            (_, false) => report.blocked += 1,
        }
    }

    world.agents.refresh_all();
    Ok(report)
}

/// Apply one action; returns false when it resolved as a no-op
fn apply_action(
    world: &mut World,
    id: AgentId,
    action: Action,
    was_hopped: bool,
    locked: &mut LockSet,
) -> Result<bool> {
    match action {
        Action::TurnLeft => {
            let agent = agent_mut(world, id)?;
            agent.facing = agent.facing.turn_left();
            Ok(true)
        }
        Action::TurnRight => {
            let agent = agent_mut(world, id)?;
            agent.facing = agent.facing.turn_right();
            Ok(true)
        }
        Action::Hop => hop(world, id, locked),
        Action::Infect => infect(world, id, was_hopped, locked),
    }
}

fn agent_mut(world: &mut World, id: AgentId) -> Result<&mut Agent> {
    world
        .agents
        .get_mut(id)
        .ok_or_else(|| SimError::invariant(format!("agent {id} vanished mid-action")))
}

fn hop(world: &mut World, id: AgentId, locked: &mut LockSet) -> Result<bool> {
    let agent = agent_mut(world, id)?;
    let from = agent.position;
    let target = agent.ahead();

    if !world.grid.in_bounds(target) || world.grid.occupant_at(target).is_some() {
        return Ok(false);
    }

    if world.grid.clear(from) != Some(id) {
        return Err(SimError::invariant(format!(
            "agent {id} was not in its own cell {from}"
        )));
    }
    world.grid.place(target, id)?;

    let agent = agent_mut(world, id)?;
    agent.position = target;
    agent.hopped = true;
    locked.insert(id);
    Ok(true)
}

fn infect(world: &mut World, id: AgentId, was_hopped: bool, locked: &mut LockSet) -> Result<bool> {
    let agent = agent_mut(world, id)?;
    let target = agent.ahead();
    let facing = agent.facing;
    let species = agent.species.clone();

    let Some(victim_id) = world.grid.occupant_at(target) else {
        return Ok(false);
    };
    let victim_species = match world.agents.get(victim_id) {
        Some(victim) => victim.species.clone(),
        None => {
            return Err(SimError::invariant(format!(
                "grid holds dead agent {victim_id} at {target}"
            )));
        }
    };
    if victim_species == species || locked.contains(&victim_id) {
        return Ok(false);
    }
    if !was_hopped && !world.rng.random_bool(1.0 - world.hop_advantage) {
        return Ok(false);
    }

    world.ledger.decrement(&victim_species)?;
    world.agents.remove(victim_id);
    world.grid.clear(target);

    let brain = world.species.create(&species, &mut world.rng)?;
    let convert = world.agents.spawn(&species, brain, target, facing);
    world.grid.place(target, convert)?;
    locked.insert(convert);
    world.ledger.increment(&species);

    log::debug!(
        "tick {}: {} {} infected {} {} -> {}",
        world.tick,
        species,
        id,
        victim_species,
        victim_id,
        convert
    );
    Ok(true)
}
