//! Snapshot system: reads the sandbox and builds a serializable frame.
//!
//! This system is read-only.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use marksman_aim::TickReport;
use marksman_core::types::{AimAngles, TargetId};

use crate::components::{Combatant, Mounted, Position, Velocity};
use crate::engine::SimTime;
use crate::sandbox::Sandbox;

/// One combatant as seen by an overlay or a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub id: TargetId,
    pub team: u32,
    pub alive: bool,
    pub occluded: bool,
    pub mounted: bool,
    pub position: DVec3,
    pub velocity: DVec3,
    pub pose_refreshes: u32,
}

/// Complete sandbox state after one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandboxSnapshot {
    pub time: SimTime,
    pub observer_aim: AimAngles,
    pub observer_sway: AimAngles,
    pub report: TickReport,
    pub targets: Vec<TargetView>,
}

pub fn build_snapshot(sandbox: &Sandbox, time: &SimTime, report: TickReport) -> SandboxSnapshot {
    SandboxSnapshot {
        time: *time,
        observer_aim: sandbox.observer.aim,
        observer_sway: sandbox.observer.sway,
        report,
        targets: build_targets(sandbox),
    }
}

/// TargetView list ordered by id.
fn build_targets(sandbox: &Sandbox) -> Vec<TargetView> {
    let mut targets: Vec<TargetView> = sandbox
        .world
        .query::<(&Combatant, &Position, &Velocity, Option<&Mounted>)>()
        .iter()
        .map(|(_, (combatant, pos, vel, mounted))| TargetView {
            id: combatant.id,
            team: combatant.team,
            alive: combatant.alive,
            occluded: combatant.occluded,
            mounted: mounted.is_some(),
            position: pos.0,
            velocity: vel.0,
            pose_refreshes: combatant.pose_refreshes,
        })
        .collect();
    targets.sort_by_key(|t| t.id);
    targets
}
