//! The sandbox world as seen by the engagement controller.

use glam::DVec3;
use hecs::World;
use log::debug;

use marksman_aim::WorldProvider;
use marksman_core::types::*;

use crate::components::{Combatant, Mounted, Position, Velocity};

/// Eye height above a combatant's feet (m).
pub const EYE_HEIGHT: f64 = 1.7;

/// hecs world plus the observer and its weapon.
pub struct Sandbox {
    pub world: World,
    pub observer: Observer,
    pub projectile: ProjectileProfile,
}

impl Sandbox {
    pub fn new(observer: Observer, projectile: ProjectileProfile) -> Self {
        Self {
            world: World::new(),
            observer,
            projectile,
        }
    }

    /// Position of the combatant with `id`, if it exists.
    pub fn combatant_position(&self, id: TargetId) -> Option<DVec3> {
        let mut query = self.world.query::<(&Combatant, &Position)>();
        query
            .iter()
            .find(|(_, (combatant, _))| combatant.id == id)
            .map(|(_, (_, pos))| pos.0)
    }

    fn vehicle_kinematics(&self, mounted: Option<&Mounted>) -> Option<Kinematics> {
        let vehicle = mounted?.vehicle;
        let position = self.world.get::<&Position>(vehicle).ok()?.0;
        let velocity = self.world.get::<&Velocity>(vehicle).ok()?.0;
        Some(Kinematics::new(position, velocity))
    }
}

impl WorldProvider for Sandbox {
    fn snapshot(&self) -> WorldSnapshot {
        let mut query = self
            .world
            .query::<(&Combatant, &Position, &Velocity, Option<&Mounted>)>();
        let mut candidates: Vec<Candidate> = query
            .iter()
            .map(|(_, (combatant, pos, vel, mounted))| Candidate {
                id: combatant.id,
                kinematics: Kinematics::new(pos.0, vel.0),
                team: combatant.team,
                alive: combatant.alive,
                visible: !combatant.occluded,
                vehicle: self.vehicle_kinematics(mounted),
                skeleton: Skeleton::standing(pos.0),
            })
            .collect();
        // hecs iteration order follows archetypes; keep candidate order stable by id.
        candidates.sort_by_key(|c| c.id);

        WorldSnapshot {
            observer: Some(self.observer),
            candidates,
            projectile: Some(self.projectile),
        }
    }

    fn apply_aim(&mut self, aim: AimAngles) {
        self.observer.aim = aim;
    }

    fn force_visible(&mut self, target: TargetId) {
        for (_entity, combatant) in self.world.query_mut::<&mut Combatant>() {
            if combatant.id == target {
                combatant.pose_refreshes += 1;
                debug!("forced pose refresh for {target:?}");
            }
        }
    }
}
