//! Simulation engine driving the engagement controller against the sandbox.
//!
//! `SimulationEngine` owns the sandbox world, the observer camera and the
//! controller, runs one controller tick plus movement per fixed step, and
//! produces `SandboxSnapshot`s. Completely headless, so runs are
//! reproducible from the seed.

use std::f64::consts::TAU;

use glam::{DVec2, DVec3};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use marksman_aim::EngagementController;
use marksman_core::config::{AimConfig, ConfigError};
use marksman_core::constants::DT;
use marksman_core::types::{AimAngles, InputState, Observer, ProjectileProfile};

use crate::camera::Camera;
use crate::sandbox::{Sandbox, EYE_HEIGHT};
use crate::scenario::{self, ScenarioId, OBSERVER_TEAM};
use crate::systems;
use crate::systems::snapshot::SandboxSnapshot;

/// Simulation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += DT;
    }
}

/// Configuration for starting a new sandbox run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for scenario layout. Same seed = same world.
    pub seed: u64,
    pub scenario: ScenarioId,
    pub aim: AimConfig,
    pub screen_size: DVec2,
    pub vertical_fov_degrees: f64,
    /// Peak sway (rad) on the yaw axis; pitch sways at half of it.
    pub sway_amplitude: f64,
    /// Sway frequency (Hz).
    pub sway_frequency: f64,
    pub projectile: ProjectileProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            scenario: ScenarioId::default(),
            aim: AimConfig::default(),
            screen_size: DVec2::new(1920.0, 1080.0),
            vertical_fov_degrees: 70.0,
            sway_amplitude: 0.0,
            sway_frequency: 0.4,
            projectile: ProjectileProfile::new(800.0, -9.81),
        }
    }
}

/// The simulation engine. Owns the sandbox and the controller.
pub struct SimulationEngine {
    sandbox: Sandbox,
    controller: EngagementController,
    time: SimTime,
    input: InputState,
    screen_size: DVec2,
    vertical_fov_degrees: f64,
    sway_amplitude: f64,
    sway_frequency: f64,
}

impl SimulationEngine {
    /// Build the world for `config.scenario` and arm a controller with `config.aim`.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let controller = EngagementController::new(config.aim)?;

        let observer = Observer::new(DVec3::new(0.0, EYE_HEIGHT, 0.0), OBSERVER_TEAM);
        let mut sandbox = Sandbox::new(observer, config.projectile);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        scenario::populate(&mut sandbox.world, &mut rng, config.scenario);
        info!(
            "sandbox ready: {:?}, {} entities, seed {}",
            config.scenario,
            sandbox.world.len(),
            config.seed
        );

        Ok(Self {
            sandbox,
            controller,
            time: SimTime::default(),
            input: InputState::default(),
            screen_size: config.screen_size,
            vertical_fov_degrees: config.vertical_fov_degrees,
            sway_amplitude: config.sway_amplitude,
            sway_frequency: config.sway_frequency,
        })
    }

    /// Input held from the next tick on.
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Advance the sandbox by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SandboxSnapshot {
        self.sandbox.observer.sway = self.sway_at(self.time.elapsed_secs);
        let camera = self.camera();

        let report = self
            .controller
            .run(&mut self.sandbox, &camera, &self.input, DT);

        systems::movement::run(&mut self.sandbox.world, DT);
        self.time.advance();

        systems::snapshot::build_snapshot(&self.sandbox, &self.time, report)
    }

    /// Run `ticks` ticks and return the last snapshot.
    pub fn run_for(&mut self, ticks: u32) -> Option<SandboxSnapshot> {
        (0..ticks).map(|_| self.tick()).last()
    }

    /// Camera at the observer's eye, looking along aim plus sway.
    pub fn camera(&self) -> Camera {
        let observer = &self.sandbox.observer;
        Camera {
            position: observer.position,
            view: observer.aim + observer.sway,
            screen_size: self.screen_size,
            vertical_fov_degrees: self.vertical_fov_degrees,
        }
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// Mutable observer, for scripting reloads, deaths and movement.
    pub fn observer_mut(&mut self) -> &mut Observer {
        &mut self.sandbox.observer
    }

    pub fn controller(&self) -> &EngagementController {
        &self.controller
    }

    fn sway_at(&self, t: f64) -> AimAngles {
        let phase = TAU * self.sway_frequency * t;
        AimAngles::new(
            self.sway_amplitude * phase.sin(),
            0.5 * self.sway_amplitude * (2.0 * phase).sin(),
        )
    }
}
