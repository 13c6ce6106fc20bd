//! ECS components for hecs entities.
//!
//! Components are plain data. Logic lives in systems.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use marksman_core::types::TargetId;

/// World position (m).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// World velocity (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// A targetable soldier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: TargetId,
    pub team: u32,
    pub alive: bool,
    /// Host-side occlusion report.
    pub occluded: bool,
    /// Number of forced pose refreshes requested by the controller.
    pub pose_refreshes: u32,
}

/// Marker for vehicles combatants can ride in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vehicle;

/// A combatant riding in a vehicle.
#[derive(Debug, Clone, Copy)]
pub struct Mounted {
    pub vehicle: hecs::Entity,
    /// Seat position relative to the vehicle origin.
    pub seat: DVec3,
}
