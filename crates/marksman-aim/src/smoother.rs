//! Angle smoother: eases the aim toward a target over per-axis time windows.
//!
//! Axis `x` of every vector here is yaw, axis `y` is pitch.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use marksman_core::types::AimAngles;

use crate::angles;

/// Smoothing progress carried between ticks.
///
/// Invariant: `0 <= elapsed <= duration` on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AngleSmoother {
    elapsed: DVec2,
    duration: DVec2,
}

impl AngleSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh window with the given per-axis durations (s).
    pub fn reset_times(&mut self, durations: DVec2) {
        self.duration = durations.max(DVec2::ZERO);
        self.elapsed = DVec2::ZERO;
    }

    /// Advance both axes by `delta_time`, never past their durations.
    pub fn update(&mut self, delta_time: f64) {
        self.elapsed = (self.elapsed + DVec2::splat(delta_time))
            .max(DVec2::ZERO)
            .min(self.duration);
    }

    /// Per-axis fraction of the window that has elapsed. A zero-length window counts as done.
    pub fn progress(&self) -> DVec2 {
        let axis = |elapsed: f64, duration: f64| {
            if duration > 0.0 {
                elapsed / duration
            } else {
                1.0
            }
        };
        DVec2::new(
            axis(self.elapsed.x, self.duration.x),
            axis(self.elapsed.y, self.duration.y),
        )
    }

    /// Eased angle between `current` and `target` at the current progress.
    pub fn smooth_angles(&self, current: AimAngles, target: AimAngles) -> AimAngles {
        angles::cerp(current, target, self.progress())
    }

    /// Both axes have reached the end of their window.
    pub fn is_converged(&self) -> bool {
        self.elapsed.cmpge(self.duration).all()
    }

    pub fn elapsed(&self) -> DVec2 {
        self.elapsed
    }

    pub fn duration(&self) -> DVec2 {
        self.duration
    }
}
