//! Scenario definitions: hardcoded target layouts for the sandbox.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use marksman_core::types::TargetId;

use crate::components::Combatant;
use crate::world_setup::*;

/// Team the sandbox observer fights for.
pub const OBSERVER_TEAM: u32 = 1;

/// Team of every hostile combatant.
pub const ENEMY_TEAM: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Stationary enemies straight ahead plus a teammate in the line of fire.
    #[default]
    Static,
    /// Enemies strafing across the view at varying ranges.
    Crossing,
    /// Randomized mix of infantry, vehicles, teammates, occluded and dead targets.
    Mixed,
}

/// Populate `world` for `scenario`.
pub fn populate(world: &mut World, rng: &mut ChaCha8Rng, scenario: ScenarioId) {
    match scenario {
        ScenarioId::Static => build_static(world),
        ScenarioId::Crossing => build_crossing(world),
        ScenarioId::Mixed => build_mixed(world, rng),
    }
}

/// Three enemies at 40/90/160 m, the nearest closest to the crosshair; a friend dead center at 30 m.
fn build_static(world: &mut World) {
    spawn_combatant(world, TargetId(1), ENEMY_TEAM, DVec3::new(2.0, 0.0, 40.0), DVec3::ZERO);
    spawn_combatant(world, TargetId(2), ENEMY_TEAM, DVec3::new(-8.0, 0.0, 90.0), DVec3::ZERO);
    spawn_combatant(world, TargetId(3), ENEMY_TEAM, DVec3::new(12.0, 0.0, 160.0), DVec3::ZERO);
    spawn_combatant(world, TargetId(4), OBSERVER_TEAM, DVec3::new(0.0, 0.0, 30.0), DVec3::ZERO);
}

/// Four strafing enemies, alternating direction.
fn build_crossing(world: &mut World) {
    let lanes = [(60.0, 4.0), (100.0, -5.0), (150.0, 6.0), (220.0, -3.5)];
    for (i, (range, speed)) in lanes.into_iter().enumerate() {
        let x = -speed * 2.0;
        spawn_combatant(
            world,
            TargetId(i as u64 + 1),
            ENEMY_TEAM,
            DVec3::new(x, 0.0, range),
            DVec3::new(speed, 0.0, 0.0),
        );
    }
}

fn build_mixed(world: &mut World, rng: &mut ChaCha8Rng) {
    let mut next_id = 1;
    let mut id = || {
        let current = TargetId(next_id);
        next_id += 1;
        current
    };

    for _ in 0..6 {
        let pos = random_ahead(rng, 30.0, 250.0, 0.5);
        let vel = random_ground_velocity(rng, 0.0, 6.0);
        spawn_combatant(world, id(), ENEMY_TEAM, pos, vel);
    }
    for _ in 0..2 {
        let pos = random_ahead(rng, 80.0, 300.0, 0.4);
        let vel = random_ground_velocity(rng, 10.0, 20.0);
        spawn_mounted(world, id(), ENEMY_TEAM, pos, vel);
    }
    for _ in 0..2 {
        let pos = random_ahead(rng, 20.0, 120.0, 0.3);
        spawn_combatant(world, id(), OBSERVER_TEAM, pos, DVec3::ZERO);
    }

    let hidden = random_ahead(rng, 40.0, 100.0, 0.2);
    let hidden = spawn_combatant(world, id(), ENEMY_TEAM, hidden, DVec3::ZERO);
    if let Ok(mut combatant) = world.get::<&mut Combatant>(hidden) {
        combatant.occluded = true;
    }

    let corpse = DVec3::new(rng.gen_range(-2.0..2.0), 0.0, 35.0);
    let corpse = spawn_combatant(world, id(), ENEMY_TEAM, corpse, DVec3::ZERO);
    if let Ok(mut combatant) = world.get::<&mut Combatant>(corpse) {
        combatant.alive = false;
    }
}
