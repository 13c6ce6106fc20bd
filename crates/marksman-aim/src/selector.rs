//! Target selector: picks at most one candidate per tick.
//!
//! Candidates are filtered by team, liveness, visibility, aim-point
//! resolution, screen bounds and field of view, then scored under the
//! configured [`SelectionMode`]. Lower score wins; ties keep the first
//! candidate in iteration order.

use glam::{DVec2, DVec3};

use marksman_core::config::AimConfig;
use marksman_core::enums::{Bone, SelectionMode};
use marksman_core::types::{Candidate, Observer, SelectionResult, Skeleton};

use crate::world::ScreenProjector;

/// Selection parameters for one tick, with the FOV resolved to pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    pub fov_radius: f64,
    pub mode: SelectionMode,
    pub must_be_visible: bool,
    pub auto_bone_selection: bool,
    pub preferred_bone: Bone,
}

impl SelectionPolicy {
    /// Policy from `config`, converting a degree FOV against the projector's screen height.
    pub fn from_config(config: &AimConfig, screen_size: DVec2) -> Self {
        Self {
            fov_radius: config.fov.radius(screen_size.y),
            mode: config.selection_mode,
            must_be_visible: config.must_be_visible,
            auto_bone_selection: config.auto_bone_selection,
            preferred_bone: config.preferred_bone,
        }
    }
}

/// Pick the best eligible candidate, or nothing.
pub fn select(
    candidates: &[Candidate],
    observer: &Observer,
    projector: &dyn ScreenProjector,
    policy: &SelectionPolicy,
) -> SelectionResult {
    let screen_size = projector.screen_size();
    let mut best = SelectionResult::none();

    for candidate in candidates {
        if candidate.team == observer.team || !candidate.alive {
            continue;
        }

        // Occlusion reports are unreliable for vehicle occupants, so they skip the check.
        if policy.must_be_visible && !candidate.visible && !candidate.in_vehicle() {
            continue;
        }

        let Some(aim_point) = resolve_aim_point(
            &candidate.skeleton,
            policy.auto_bone_selection,
            policy.preferred_bone,
        ) else {
            continue;
        };

        let Some(screen) = projector.project(aim_point) else {
            continue;
        };
        if !on_screen(screen, screen_size) {
            continue;
        }

        let screen_dist = screen_distance(screen, screen_size);
        if screen_dist > policy.fov_radius {
            continue;
        }

        let score = score(
            policy.mode,
            screen_dist,
            policy.fov_radius,
            observer.position.distance(aim_point),
        );

        if !best.has_target || score < best.score {
            best = SelectionResult {
                target: Some(candidate.id),
                world_position: aim_point,
                has_target: true,
                score,
            };
        }
    }

    best
}

/// First resolvable bone in priority order, or only `preferred` when auto selection is off.
pub fn resolve_aim_point(skeleton: &Skeleton, auto: bool, preferred: Bone) -> Option<DVec3> {
    if auto {
        Bone::PRIORITY
            .iter()
            .find_map(|&bone| skeleton.try_resolve(bone))
    } else {
        skeleton.try_resolve(preferred)
    }
}

/// Pixel distance of `screen` from the screen center.
pub fn screen_distance(screen: DVec2, screen_size: DVec2) -> f64 {
    screen.distance(screen_size / 2.0)
}

fn on_screen(screen: DVec2, screen_size: DVec2) -> bool {
    screen.cmpge(DVec2::ZERO).all() && screen.cmple(screen_size).all()
}

/// Candidate score under `mode`; lower is better.
pub fn score(mode: SelectionMode, screen_distance: f64, fov_radius: f64, world_distance: f64) -> f64 {
    match mode {
        SelectionMode::ScreenProximity => screen_distance,
        SelectionMode::WeightedDistance => {
            // 1 at the crosshair, 0 at the FOV edge; centering discounts up to half the distance.
            let weight = if fov_radius > 0.0 {
                (1.0 - screen_distance / fov_radius).clamp(0.0, 1.0)
            } else {
                0.0
            };
            world_distance * (1.0 - 0.5 * weight)
        }
    }
}
