//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick, then carries vehicle
//! passengers along with their vehicle.

use hecs::World;

use crate::components::{Mounted, Position, Velocity};

/// Run kinematic integration for all free entities with Position + Velocity.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel, mounted)) in
        world.query_mut::<(&mut Position, &Velocity, Option<&Mounted>)>()
    {
        if mounted.is_none() {
            pos.0 += vel.0 * dt;
        }
    }
    sync_passengers(world);
}

/// Snap every passenger onto its seat and match the vehicle's velocity.
pub fn sync_passengers(world: &mut World) {
    let seats: Vec<(hecs::Entity, Position, Velocity)> = world
        .query::<&Mounted>()
        .iter()
        .filter_map(|(entity, mounted)| {
            let pos = *world.get::<&Position>(mounted.vehicle).ok()?;
            let vel = *world.get::<&Velocity>(mounted.vehicle).ok()?;
            Some((entity, Position(pos.0 + mounted.seat), vel))
        })
        .collect();

    for (entity, pos, vel) in seats {
        if let Ok((p, v)) = world.query_one_mut::<(&mut Position, &mut Velocity)>(entity) {
            *p = pos;
            *v = vel;
        }
    }
}
