//! Angle conventions, normalization and easing.
//!
//! Yaw lives in (-pi, pi], pitch in (-pi/2, pi/2]. Yaw 0 looks down +z,
//! positive pitch looks up.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::{DVec2, DVec3};

use marksman_core::constants::ELEVATION_FALLOFF_DISTANCE;
use marksman_core::types::AimAngles;

/// Wrap a yaw angle into (-pi, pi].
pub fn normalize_yaw(yaw: f64) -> f64 {
    if yaw > -PI && yaw <= PI {
        return yaw;
    }
    let wrapped = yaw.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Wrap a pitch angle into (-pi/2, pi/2].
pub fn normalize_pitch(pitch: f64) -> f64 {
    if pitch > -FRAC_PI_2 && pitch <= FRAC_PI_2 {
        return pitch;
    }
    let wrapped = pitch.rem_euclid(PI);
    if wrapped > FRAC_PI_2 {
        wrapped - PI
    } else {
        wrapped
    }
}

pub fn normalize(angles: AimAngles) -> AimAngles {
    AimAngles::new(normalize_yaw(angles.yaw), normalize_pitch(angles.pitch))
}

/// Raised-cosine ease of a progress fraction in [0, 1].
pub fn ease(fraction: f64) -> f64 {
    (1.0 - (PI * fraction).cos()) / 2.0
}

/// Ease from `from` toward `to` along the shorter arc, per axis.
///
/// `progress.x` drives yaw and `progress.y` drives pitch. An axis whose
/// progress has reached 1 lands exactly on the normalized target.
pub fn cerp(from: AimAngles, to: AimAngles, progress: DVec2) -> AimAngles {
    let delta = normalize(to - from);
    let target = normalize(to);

    let yaw = if progress.x >= 1.0 {
        target.yaw
    } else {
        from.yaw + ease(progress.x) * delta.yaw
    };
    let pitch = if progress.y >= 1.0 {
        target.pitch
    } else {
        from.pitch + ease(progress.y) * delta.pitch
    };
    normalize(AimAngles::new(yaw, pitch))
}

/// Yaw and pitch looking along `direction`, or `None` for a zero vector.
pub fn direction_to_angles(direction: DVec3) -> Option<AimAngles> {
    let dir = direction.try_normalize()?;
    let horizontal = (dir.x * dir.x + dir.z * dir.z).sqrt();
    Some(AimAngles::new(-dir.x.atan2(dir.z), dir.y.atan2(horizontal)))
}

/// Aim angles from `origin` to `aim_point`, with elevation compensation.
///
/// Pitch is boosted by `pitch * (1 - e^(-distance / K))`: close targets get
/// almost no correction, distant ones approach double the raw pitch.
///
/// The result is not normalized. A steep, distant shot can exceed pi/2 here,
/// and [`normalize_pitch`] then wraps it to the opposite sign.
pub fn desired_angles(origin: DVec3, aim_point: DVec3) -> Option<AimAngles> {
    let offset = aim_point - origin;
    let raw = direction_to_angles(offset)?;
    let distance = offset.length();
    let compensation = raw.pitch * (1.0 - (-distance / ELEVATION_FALLOFF_DISTANCE).exp());
    Some(AimAngles::new(raw.yaw, raw.pitch + compensation))
}
