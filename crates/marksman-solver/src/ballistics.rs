//! Ballistic intercept solver.
//!
//! Finds the flight time `t` of a projectile of fixed speed against a target
//! moving in a straight line, then projects the target forward by that time
//! under constant acceleration `(0, -g, 0)`.
//!
//! With `d = target - origin`, relative target velocity `v` and gravity
//! magnitude `g`, the flight time is the smallest positive real root of
//!
//! ```text
//! g^2/4 t^4 + g v_y t^3 + (g d_y + |v|^2 - s^2) t^2 + 2 (d . v) t + |d|^2 = 0
//! ```
//!
//! which collapses to a quadratic when `g = 0`. The returned point is
//! `p + v t + (0, -g t^2 / 2, 0)`.

use glam::DVec3;
use log::trace;

use marksman_core::constants::{GRAVITY_EPSILON, ROOT_IMAG_TOLERANCE, ROOT_POLISH_ITERATIONS};
use marksman_core::types::{Kinematics, Observer, PredictionResult, ProjectileProfile};

use crate::roots;

/// Predict where to aim at `aim_point` on a target moving with `target`'s velocity.
///
/// The launch origin is the observer position plus the profile's launch offset.
pub fn predict(
    observer: &Observer,
    target: &Kinematics,
    aim_point: DVec3,
    projectile: &ProjectileProfile,
) -> PredictionResult {
    let origin = observer.position + projectile.launch_offset;
    solve_intercept(
        origin,
        aim_point,
        observer.velocity,
        target.velocity,
        projectile,
    )
}

/// Solve for the intercept of a target at `target_position` moving at `target_velocity`.
///
/// On failure the unpredicted target position is returned with `success = false`.
pub fn solve_intercept(
    origin: DVec3,
    target_position: DVec3,
    observer_velocity: DVec3,
    target_velocity: DVec3,
    projectile: &ProjectileProfile,
) -> PredictionResult {
    let relative_velocity = target_velocity - observer_velocity * projectile.velocity_inheritance;
    let gravity = projectile.gravity_magnitude();
    let speed = projectile.speed();

    let Some(time) = time_of_flight(
        target_position - origin,
        relative_velocity,
        speed,
        gravity,
    ) else {
        trace!("no intercept: speed {speed:.1}, gravity {gravity:.2}");
        return PredictionResult::unpredicted(target_position);
    };

    PredictionResult {
        predicted_position: aim_point_at(target_position, relative_velocity, gravity, time),
        success: true,
        zero_angle: 0.0,
        time_of_flight: Some(time),
    }
}

/// Constant-acceleration projection of `position` over `time`; gravity points down.
pub fn aim_point_at(position: DVec3, velocity: DVec3, gravity: f64, time: f64) -> DVec3 {
    let drop = DVec3::new(0.0, -0.5 * gravity * time * time, 0.0);
    position + velocity * time + drop
}

/// Coefficients of the intercept polynomial, highest degree first.
pub fn intercept_polynomial(delta: DVec3, velocity: DVec3, speed: f64, gravity: f64) -> [f64; 5] {
    [
        0.25 * gravity * gravity,
        gravity * velocity.y,
        gravity * delta.y + velocity.length_squared() - speed * speed,
        2.0 * delta.dot(velocity),
        delta.length_squared(),
    ]
}

/// Smallest strictly positive real flight time, if any.
pub fn time_of_flight(delta: DVec3, velocity: DVec3, speed: f64, gravity: f64) -> Option<f64> {
    let coeffs = intercept_polynomial(delta, velocity, speed, gravity);

    let candidates: Vec<f64> = if gravity <= GRAVITY_EPSILON {
        roots::real_quadratic_roots(coeffs[2], coeffs[3], coeffs[4])
    } else {
        let lead = coeffs[0];
        roots::solve_quartic(
            coeffs[1] / lead,
            coeffs[2] / lead,
            coeffs[3] / lead,
            coeffs[4] / lead,
        )
        .into_iter()
        .filter(|root| root.is_real(ROOT_IMAG_TOLERANCE))
        .map(|root| roots::polish(&coeffs, root.re, ROOT_POLISH_ITERATIONS))
        .collect()
    };

    candidates
        .into_iter()
        .filter(|t| t.is_finite() && *t > 0.0)
        .min_by(|a, b| a.total_cmp(b))
}
