//! Fundamental value types exchanged between the engine and its host.
//!
//! World axes follow the host convention: y is up, yaw is measured in the
//! x/z plane, pitch is positive upward.

use std::ops::{Add, Sub, SubAssign};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::RELOAD_EPSILON;
use crate::enums::Bone;

/// Opaque handle identifying a candidate across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

/// Aim orientation in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AimAngles {
    pub yaw: f64,
    pub pitch: f64,
}

impl AimAngles {
    pub const ZERO: AimAngles = AimAngles { yaw: 0.0, pitch: 0.0 };

    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }
}

impl Add for AimAngles {
    type Output = AimAngles;

    fn add(self, rhs: AimAngles) -> AimAngles {
        AimAngles::new(self.yaw + rhs.yaw, self.pitch + rhs.pitch)
    }
}

impl Sub for AimAngles {
    type Output = AimAngles;

    fn sub(self, rhs: AimAngles) -> AimAngles {
        AimAngles::new(self.yaw - rhs.yaw, self.pitch - rhs.pitch)
    }
}

impl SubAssign for AimAngles {
    fn sub_assign(&mut self, rhs: AimAngles) {
        self.yaw -= rhs.yaw;
        self.pitch -= rhs.pitch;
    }
}

/// Position and velocity of a moving body (m, m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: DVec3,
    pub velocity: DVec3,
}

impl Kinematics {
    pub fn new(position: DVec3, velocity: DVec3) -> Self {
        Self { position, velocity }
    }

    /// Kinematics of a body at rest.
    pub fn at_rest(position: DVec3) -> Self {
        Self::new(position, DVec3::ZERO)
    }
}

/// The entity whose aim is being controlled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub position: DVec3,
    pub velocity: DVec3,
    pub team: u32,
    pub alive: bool,
    /// Current aim orientation.
    pub aim: AimAngles,
    /// Environmental sway currently applied on top of the aim.
    pub sway: AimAngles,
    /// Seconds left on the active weapon's reload (0 when ready).
    pub reload_timer: f64,
}

impl Observer {
    pub fn new(position: DVec3, team: u32) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            team,
            alive: true,
            aim: AimAngles::ZERO,
            sway: AimAngles::ZERO,
            reload_timer: 0.0,
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_timer >= RELOAD_EPSILON
    }
}

/// Skeletal reference points of a candidate, each of which may fail to resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    bones: [Option<DVec3>; Bone::COUNT],
}

impl Skeleton {
    /// Skeleton with every bone at the same point.
    pub fn uniform(position: DVec3) -> Self {
        Self {
            bones: [Some(position); Bone::COUNT],
        }
    }

    /// Upright humanoid skeleton standing on `feet`.
    pub fn standing(feet: DVec3) -> Self {
        let mut skeleton = Self::default();
        skeleton.set(Bone::Head, feet + DVec3::new(0.0, 1.7, 0.0));
        skeleton.set(Bone::Neck, feet + DVec3::new(0.0, 1.55, 0.0));
        skeleton.set(Bone::Spine1, feet + DVec3::new(0.0, 1.35, 0.0));
        skeleton.set(Bone::Spine2, feet + DVec3::new(0.0, 1.1, 0.0));
        skeleton.set(Bone::Hips, feet + DVec3::new(0.0, 0.95, 0.0));
        skeleton
    }

    pub fn set(&mut self, bone: Bone, position: DVec3) {
        self.bones[bone.index()] = Some(position);
    }

    pub fn clear(&mut self, bone: Bone) {
        self.bones[bone.index()] = None;
    }

    /// World position of `bone`, if the host could resolve it this tick.
    pub fn try_resolve(&self, bone: Bone) -> Option<DVec3> {
        self.bones[bone.index()]
    }
}

/// A potential target, rebuilt every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: TargetId,
    pub kinematics: Kinematics,
    pub team: u32,
    pub alive: bool,
    /// False when the host reports the candidate as occluded.
    pub visible: bool,
    /// Kinematics of the vehicle the candidate occupies, if any.
    pub vehicle: Option<Kinematics>,
    pub skeleton: Skeleton,
}

impl Candidate {
    pub fn in_vehicle(&self) -> bool {
        self.vehicle.is_some()
    }

    /// Kinematics to lead against: the vehicle's when mounted, the candidate's otherwise.
    pub fn prediction_kinematics(&self) -> Kinematics {
        self.vehicle.unwrap_or(self.kinematics)
    }
}

/// Ballistic description of the projectile about to be fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileProfile {
    /// Launch point relative to the observer position.
    pub launch_offset: DVec3,
    /// Initial projectile velocity; only its magnitude is used.
    pub initial_velocity: DVec3,
    /// Gravity acting on the projectile. The sign is ignored; gravity always points down.
    pub gravity: f64,
    /// Share of the observer's velocity the projectile inherits (0 = none).
    #[serde(default)]
    pub velocity_inheritance: f64,
}

impl ProjectileProfile {
    pub fn new(speed: f64, gravity: f64) -> Self {
        Self {
            launch_offset: DVec3::ZERO,
            initial_velocity: DVec3::new(0.0, 0.0, speed),
            gravity,
            velocity_inheritance: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.initial_velocity.length()
    }

    pub fn gravity_magnitude(&self) -> f64 {
        self.gravity.abs()
    }
}

/// Output of the ballistic intercept solver. On failure the predicted
/// position is the unpredicted target position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_position: DVec3,
    pub success: bool,
    /// Zeroing angle; always 0 since sight zeroing is not modelled.
    pub zero_angle: f64,
    /// Solved projectile flight time (s), when the solve succeeded.
    pub time_of_flight: Option<f64>,
}

impl PredictionResult {
    /// Failed prediction that falls back to the raw target position.
    pub fn unpredicted(position: DVec3) -> Self {
        Self {
            predicted_position: position,
            success: false,
            zero_angle: 0.0,
            time_of_flight: None,
        }
    }
}

/// Output of the target selector: at most one target per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub target: Option<TargetId>,
    /// Resolved aim point of the selected target.
    pub world_position: DVec3,
    pub has_target: bool,
    /// Winning score under the active selection mode.
    pub score: f64,
}

impl SelectionResult {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Everything the engine reads from the world in one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub observer: Option<Observer>,
    pub candidates: Vec<Candidate>,
    pub projectile: Option<ProjectileProfile>,
}

impl WorldSnapshot {
    pub fn candidate(&self, id: TargetId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }
}

/// Raw input signals sampled by the host for this tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    /// Virtual key codes currently held.
    pub held_keys: Vec<u32>,
    /// Analog trigger deflection in [0, 1].
    pub analog_trigger: f64,
}

impl InputState {
    pub fn holding(key: u32) -> Self {
        Self {
            held_keys: vec![key],
            analog_trigger: 0.0,
        }
    }

    pub fn is_held(&self, key: u32) -> bool {
        self.held_keys.contains(&key)
    }
}
