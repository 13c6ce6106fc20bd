//! Entity spawn factories for the sandbox world.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use marksman_core::types::TargetId;

use crate::components::*;

/// Seat offset of a vehicle passenger relative to the vehicle origin.
const PASSENGER_SEAT: DVec3 = DVec3::new(0.0, 0.8, 0.0);

/// Spawn a combatant on foot.
pub fn spawn_combatant(
    world: &mut World,
    id: TargetId,
    team: u32,
    position: DVec3,
    velocity: DVec3,
) -> hecs::Entity {
    world.spawn((
        Combatant {
            id,
            team,
            alive: true,
            occluded: false,
            pose_refreshes: 0,
        },
        Position(position),
        Velocity(velocity),
    ))
}

/// Spawn a vehicle with one passenger; returns the passenger entity.
pub fn spawn_mounted(
    world: &mut World,
    id: TargetId,
    team: u32,
    position: DVec3,
    velocity: DVec3,
) -> hecs::Entity {
    let vehicle = world.spawn((Vehicle, Position(position), Velocity(velocity)));
    world.spawn((
        Combatant {
            id,
            team,
            alive: true,
            // Vehicle hulls always report their crew as occluded.
            occluded: true,
            pose_refreshes: 0,
        },
        Position(position + PASSENGER_SEAT),
        Velocity(velocity),
        Mounted {
            vehicle,
            seat: PASSENGER_SEAT,
        },
    ))
}

/// Random point on a ring around the origin, in front of the observer (+z).
pub fn random_ahead(rng: &mut ChaCha8Rng, min_range: f64, max_range: f64, half_arc: f64) -> DVec3 {
    let range = rng.gen_range(min_range..max_range);
    let bearing = rng.gen_range(-half_arc..half_arc);
    DVec3::new(range * bearing.sin(), 0.0, range * bearing.cos())
}

/// Random horizontal velocity with speed in `[min_speed, max_speed)`.
pub fn random_ground_velocity(rng: &mut ChaCha8Rng, min_speed: f64, max_speed: f64) -> DVec3 {
    let speed = rng.gen_range(min_speed..max_speed);
    let heading = rng.gen_range(0.0..std::f64::consts::TAU);
    DVec3::new(speed * heading.sin(), 0.0, speed * heading.cos())
}
