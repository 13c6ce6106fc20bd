//! Aim configuration surface and its validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::{Bone, SelectionMode};
use crate::types::InputState;

/// Problems found by [`AimConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("fov must be finite and positive, got {0}")]
    InvalidFov(f64),
    #[error("fov cone must be narrower than 180 degrees, got {0}")]
    FovConeTooWide(f64),
    #[error("min smoothing duration must be finite and non-negative, got {0}")]
    InvalidMinSmooth(f64),
    #[error("max smoothing duration must be finite, got {0}")]
    InvalidMaxSmooth(f64),
    #[error("smoothing range is inverted: min {min} > max {max}")]
    InvertedSmoothRange { min: f64, max: f64 },
    #[error("analog threshold must lie in [0, 1], got {0}")]
    InvalidAnalogThreshold(f64),
}

/// Field of view limiting which candidates are eligible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FovSetting {
    /// Radius in screen pixels around the screen center.
    Pixels(f64),
    /// Full cone angle in degrees, converted against the screen height.
    Degrees(f64),
}

impl FovSetting {
    /// Screen-space radius in pixels for a screen of the given height.
    pub fn radius(self, screen_height: f64) -> f64 {
        match self {
            FovSetting::Pixels(radius) => radius,
            FovSetting::Degrees(degrees) => fov_radius_from_degrees(degrees, screen_height),
        }
    }

    fn value(self) -> f64 {
        match self {
            FovSetting::Pixels(v) | FovSetting::Degrees(v) => v,
        }
    }
}

/// Screen-space radius covered by a cone of `fov_degrees` on a screen `screen_height` pixels tall.
pub fn fov_radius_from_degrees(fov_degrees: f64, screen_height: f64) -> f64 {
    (screen_height / 2.0) * (fov_degrees.to_radians() / 2.0).tan()
}

/// Input binding that arms the engagement controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivationTrigger {
    /// Virtual key code that activates aiming while held.
    pub key: u32,
    /// When set, an analog trigger deflection above this also activates.
    pub analog_threshold: Option<f64>,
}

impl Default for ActivationTrigger {
    fn default() -> Self {
        Self {
            key: DEFAULT_ACTIVATION_KEY,
            analog_threshold: None,
        }
    }
}

impl ActivationTrigger {
    pub fn is_active(&self, input: &InputState) -> bool {
        let analog = self
            .analog_threshold
            .is_some_and(|threshold| input.analog_trigger > threshold);
        input.is_held(self.key) || analog
    }
}

/// Tunables for selection, prediction and smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AimConfig {
    pub fov: FovSetting,
    pub selection_mode: SelectionMode,
    /// When false, occluded candidates are still eligible.
    pub must_be_visible: bool,
    /// Walk [`Bone::PRIORITY`] instead of using only `preferred_bone`.
    pub auto_bone_selection: bool,
    pub preferred_bone: Bone,
    /// Lower bound of the per-axis randomized smoothing window (s).
    pub min_smooth_duration: f64,
    /// Upper bound of the smoothing window (s). Zero or negative disables aiming output.
    pub max_smooth_duration: f64,
    pub must_not_be_reloading: bool,
    pub activation_trigger: ActivationTrigger,
    /// Seed for the smoothing-window RNG.
    #[serde(default)]
    pub seed: u64,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            fov: FovSetting::Degrees(DEFAULT_FOV_DEGREES),
            selection_mode: SelectionMode::default(),
            must_be_visible: true,
            auto_bone_selection: true,
            preferred_bone: Bone::Head,
            min_smooth_duration: DEFAULT_MIN_SMOOTH_SECS,
            max_smooth_duration: DEFAULT_MAX_SMOOTH_SECS,
            must_not_be_reloading: true,
            activation_trigger: ActivationTrigger::default(),
            seed: 0,
        }
    }
}

impl AimConfig {
    /// Smoothing is switched off entirely when the max window is not positive.
    pub fn smoothing_enabled(&self) -> bool {
        self.max_smooth_duration > 0.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fov = self.fov.value();
        if !fov.is_finite() || fov <= 0.0 {
            return Err(ConfigError::InvalidFov(fov));
        }
        if let FovSetting::Degrees(degrees) = self.fov {
            // tan(fov / 2) turns negative past 180 and no candidate would fit.
            if degrees >= 180.0 {
                return Err(ConfigError::FovConeTooWide(degrees));
            }
        }
        if let Some(threshold) = self.activation_trigger.analog_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::InvalidAnalogThreshold(threshold));
            }
        }
        // A disabled smoother never samples the range.
        if !self.smoothing_enabled() {
            return Ok(());
        }
        if !self.min_smooth_duration.is_finite() || self.min_smooth_duration < 0.0 {
            return Err(ConfigError::InvalidMinSmooth(self.min_smooth_duration));
        }
        if !self.max_smooth_duration.is_finite() {
            return Err(ConfigError::InvalidMaxSmooth(self.max_smooth_duration));
        }
        if self.min_smooth_duration > self.max_smooth_duration {
            return Err(ConfigError::InvertedSmoothRange {
                min: self.min_smooth_duration,
                max: self.max_smooth_duration,
            });
        }
        Ok(())
    }
}
