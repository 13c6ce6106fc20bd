//! Core types and definitions for the marksman targeting engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! observer/candidate value types, projectile profiles, enums, constants
//! and the aim configuration. It has no dependency on any host runtime.

pub mod config;
pub mod constants;
pub mod enums;
pub mod types;

pub use config::{ActivationTrigger, AimConfig, ConfigError, FovSetting};
