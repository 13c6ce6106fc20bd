//! Engagement controller: one pass from target selection to written aim per tick.
//!
//! The controller owns the only state carried between ticks: the angle
//! smoother and the identity of the previously engaged target. Every
//! precondition failure turns the tick into a no-op.

use glam::{DVec2, DVec3};
use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use marksman_core::config::{AimConfig, ConfigError};
use marksman_core::enums::EngagePhase;
use marksman_core::types::{AimAngles, InputState, PredictionResult, TargetId, WorldSnapshot};
use marksman_solver::ballistics;

use crate::angles;
use crate::selector::{self, SelectionPolicy};
use crate::smoother::AngleSmoother;
use crate::world::{ScreenProjector, WorldProvider};

/// Everything one tick reads.
pub struct TickContext<'a> {
    pub snapshot: &'a WorldSnapshot,
    pub projector: &'a dyn ScreenProjector,
    pub input: &'a InputState,
    /// Seconds since the previous tick.
    pub delta_time: f64,
}

/// What the controller decided this tick, for the host and any overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub phase: EngagePhase,
    pub target: Option<TargetId>,
    pub has_target: bool,
    /// Aim point after prediction (raw aim point when prediction failed).
    pub predicted_point: Option<DVec3>,
    pub prediction: Option<PredictionResult>,
    /// New aim orientation to write to the observer.
    pub aim: Option<AimAngles>,
}

impl TickReport {
    fn idle() -> Self {
        Self::default()
    }

    fn acquiring() -> Self {
        Self {
            phase: EngagePhase::Acquiring,
            ..Self::default()
        }
    }
}

/// Per-observer aim controller.
pub struct EngagementController {
    config: AimConfig,
    smoother: AngleSmoother,
    previous_target: Option<TargetId>,
    rng: ChaCha8Rng,
}

impl EngagementController {
    pub fn new(config: AimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            smoother: AngleSmoother::new(),
            previous_target: None,
        })
    }

    pub fn config(&self) -> &AimConfig {
        &self.config
    }

    pub fn smoother(&self) -> &AngleSmoother {
        &self.smoother
    }

    /// Target engaged on the last tick that wrote an aim.
    pub fn previous_target(&self) -> Option<TargetId> {
        self.previous_target
    }

    /// Snapshot `world`, run one tick and write the result back.
    pub fn run(
        &mut self,
        world: &mut dyn WorldProvider,
        projector: &dyn ScreenProjector,
        input: &InputState,
        delta_time: f64,
    ) -> TickReport {
        let snapshot = world.snapshot();
        let report = self.tick(&TickContext {
            snapshot: &snapshot,
            projector,
            input,
            delta_time,
        });

        if let Some(id) = report.target {
            if snapshot.candidate(id).is_some_and(|c| c.in_vehicle()) {
                world.force_visible(id);
            }
        }
        if let Some(aim) = report.aim {
            world.apply_aim(aim);
        }
        report
    }

    /// Run one tick against `ctx`.
    pub fn tick(&mut self, ctx: &TickContext<'_>) -> TickReport {
        if !self.config.activation_trigger.is_active(ctx.input) {
            return TickReport::idle();
        }

        let Some(observer) = ctx.snapshot.observer else {
            trace!("no observer");
            return TickReport::acquiring();
        };
        if !observer.alive {
            trace!("observer dead");
            return TickReport::acquiring();
        }
        if self.config.must_not_be_reloading && observer.is_reloading() {
            trace!("observer reloading ({:.2}s left)", observer.reload_timer);
            return TickReport::acquiring();
        }

        let policy = SelectionPolicy::from_config(&self.config, ctx.projector.screen_size());
        let selection = selector::select(
            &ctx.snapshot.candidates,
            &observer,
            ctx.projector,
            &policy,
        );
        let (Some(target_id), true) = (selection.target, selection.has_target) else {
            return TickReport::acquiring();
        };
        let Some(candidate) = ctx.snapshot.candidate(target_id) else {
            return TickReport::acquiring();
        };
        let Some(projectile) = ctx.snapshot.projectile else {
            trace!("no projectile profile");
            return TickReport::acquiring();
        };

        let prediction = ballistics::predict(
            &observer,
            &candidate.prediction_kinematics(),
            selection.world_position,
            &projectile,
        );
        if !prediction.success {
            trace!("prediction failed for {target_id:?}, aiming at raw point");
        }
        let aim_point = prediction.predicted_position;

        let mut report = TickReport {
            phase: EngagePhase::Tracking,
            target: Some(target_id),
            has_target: true,
            predicted_point: Some(aim_point),
            prediction: Some(prediction),
            aim: None,
        };

        if !self.config.smoothing_enabled() {
            return report;
        }

        let origin = observer.position + projectile.launch_offset;
        let Some(desired) = angles::desired_angles(origin, aim_point) else {
            trace!("aim point coincides with launch origin");
            return report;
        };

        if self.previous_target != Some(target_id) {
            let durations = self.random_durations();
            debug!(
                "engaging {target_id:?} (was {:?}), window yaw {:.3}s pitch {:.3}s",
                self.previous_target, durations.x, durations.y
            );
            self.smoother.reset_times(durations);
        }
        self.smoother.update(ctx.delta_time);

        // Smooth toward the sway-free angle; the host re-applies sway on its next read.
        let target_angles = desired - observer.sway;
        report.aim = Some(self.smoother.smooth_angles(observer.aim, target_angles));
        if self.smoother.is_converged() {
            report.phase = EngagePhase::Converged;
        }

        self.previous_target = Some(target_id);
        report
    }

    fn random_durations(&mut self) -> DVec2 {
        let (min, max) = (
            self.config.min_smooth_duration,
            self.config.max_smooth_duration,
        );
        DVec2::new(self.rng.gen_range(min..=max), self.rng.gen_range(min..=max))
    }
}
