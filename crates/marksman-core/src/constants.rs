//! Engine constants and tuning parameters.

/// Sandbox tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per sandbox tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Angles ---

/// Distance (m) over which elevation compensation ramps in.
/// Compensation = pitch * (1 - e^(-distance / K)).
pub const ELEVATION_FALLOFF_DISTANCE: f64 = 175.0;

// --- Ballistics ---

/// Gravity magnitudes below this are treated as zero (quadratic fallback).
pub const GRAVITY_EPSILON: f64 = 1e-9;

/// A quartic root is real when |im| <= this * max(1, |re|).
pub const ROOT_IMAG_TOLERANCE: f64 = 1e-6;

/// Newton refinement steps applied to each accepted real root.
pub const ROOT_POLISH_ITERATIONS: usize = 4;

// --- Observer ---

/// Reload timer at or above this value means the weapon is reloading (s).
pub const RELOAD_EPSILON: f64 = 0.01;

// --- Defaults from the stock tuning ---

/// Default field of view used for target eligibility (degrees).
pub const DEFAULT_FOV_DEGREES: f64 = 35.0;

/// Default lower bound of the randomized smoothing window (s).
pub const DEFAULT_MIN_SMOOTH_SECS: f64 = 0.25;

/// Default upper bound of the randomized smoothing window (s).
pub const DEFAULT_MAX_SMOOTH_SECS: f64 = 0.7;

/// Default analog trigger threshold for controller activation.
pub const DEFAULT_ANALOG_THRESHOLD: f64 = 0.5;

/// Default activation key (virtual key code for left Alt).
pub const DEFAULT_ACTIVATION_KEY: u32 = 0xA4;
