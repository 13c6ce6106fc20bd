//! Headless sandbox for the marksman engine.
//!
//! Owns a hecs world of moving combatants and one observer, projects them
//! through a pinhole camera, and drives the engagement controller at a
//! fixed tick rate. Deterministic for a given seed.

pub mod camera;
pub mod components;
pub mod engine;
pub mod sandbox;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use marksman_aim as aim;
pub use marksman_core as core;
