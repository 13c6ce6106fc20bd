//! Tests for target selection and the engagement controller tick pipeline.

use approx::assert_relative_eq;
use glam::{DVec2, DVec3};

use marksman_core::config::{ActivationTrigger, AimConfig, FovSetting};
use marksman_core::enums::{Bone, EngagePhase, SelectionMode};
use marksman_core::types::*;

use crate::controller::{EngagementController, TickContext};
use crate::selector::{self, SelectionPolicy};
use crate::world::{ScreenProjector, WorldProvider};

const KEY: u32 = 0x05;
const SCREEN: DVec2 = DVec2::new(1920.0, 1080.0);

/// Projects world x/y straight onto pixel offsets from the screen center.
/// Points at or behind z = 0 do not project.
struct FlatProjector;

impl ScreenProjector for FlatProjector {
    fn screen_size(&self) -> DVec2 {
        SCREEN
    }

    fn project(&self, point: DVec3) -> Option<DVec2> {
        (point.z > 0.0).then(|| SCREEN / 2.0 + DVec2::new(point.x, point.y))
    }
}

fn candidate(id: u64, aim_point: DVec3) -> Candidate {
    Candidate {
        id: TargetId(id),
        kinematics: Kinematics::at_rest(aim_point),
        team: 2,
        alive: true,
        visible: true,
        vehicle: None,
        skeleton: Skeleton::uniform(aim_point),
    }
}

/// Candidate `screen_offset` pixels right of center, `world_distance` from the origin.
fn candidate_at(id: u64, screen_offset: f64, world_distance: f64) -> Candidate {
    let z = (world_distance * world_distance - screen_offset * screen_offset).sqrt();
    candidate(id, DVec3::new(screen_offset, 0.0, z))
}

fn observer() -> Observer {
    Observer::new(DVec3::ZERO, 1)
}

fn policy(mode: SelectionMode, fov_radius: f64) -> SelectionPolicy {
    SelectionPolicy {
        fov_radius,
        mode,
        must_be_visible: true,
        auto_bone_selection: true,
        preferred_bone: Bone::Head,
    }
}

fn config() -> AimConfig {
    AimConfig {
        fov: FovSetting::Pixels(200.0),
        min_smooth_duration: 0.2,
        max_smooth_duration: 0.4,
        activation_trigger: ActivationTrigger {
            key: KEY,
            analog_threshold: None,
        },
        seed: 7,
        ..Default::default()
    }
}

fn snapshot(candidates: Vec<Candidate>) -> WorldSnapshot {
    WorldSnapshot {
        observer: Some(observer()),
        candidates,
        projectile: Some(ProjectileProfile::new(800.0, 9.81)),
    }
}

fn tick(
    controller: &mut EngagementController,
    snapshot: &WorldSnapshot,
    input: &InputState,
    dt: f64,
) -> crate::TickReport {
    controller.tick(&TickContext {
        snapshot,
        projector: &FlatProjector,
        input,
        delta_time: dt,
    })
}

// ---- Selector ----

#[test]
fn test_mode0_picks_closest_to_crosshair_within_fov() {
    let candidates = vec![
        candidate_at(1, 50.0, 100.0),
        candidate_at(2, 10.0, 100.0),
        candidate_at(3, 90.0, 100.0),
    ];
    let result = selector::select(
        &candidates,
        &observer(),
        &FlatProjector,
        &policy(SelectionMode::ScreenProximity, 60.0),
    );
    assert!(result.has_target);
    assert_eq!(result.target, Some(TargetId(2)));
    assert_relative_eq!(result.score, 10.0);
}

#[test]
fn test_mode0_excludes_outside_fov() {
    let candidates = vec![candidate_at(3, 90.0, 100.0)];
    let result = selector::select(
        &candidates,
        &observer(),
        &FlatProjector,
        &policy(SelectionMode::ScreenProximity, 60.0),
    );
    assert!(!result.has_target);
    assert_eq!(result.target, None);
}

#[test]
fn test_mode1_weights_world_distance_by_fov_closeness() {
    let a = candidate_at(1, 5.0, 100.0);
    let b = candidate_at(2, 55.0, 60.0);
    let policy = policy(SelectionMode::WeightedDistance, 60.0);

    let score_a = selector::score(policy.mode, 5.0, 60.0, 100.0);
    let score_b = selector::score(policy.mode, 55.0, 60.0, 60.0);
    assert_relative_eq!(score_a, 54.1667, epsilon = 1e-3);
    assert_relative_eq!(score_b, 57.5, epsilon = 1e-3);

    for order in [vec![a.clone(), b.clone()], vec![b, a]] {
        let result = selector::select(&order, &observer(), &FlatProjector, &policy);
        assert_eq!(result.target, Some(TargetId(1)));
        assert_relative_eq!(result.score, score_a, epsilon = 1e-9);
    }
}

#[test]
fn test_ties_keep_first_candidate() {
    let candidates = vec![candidate_at(4, 20.0, 100.0), candidate_at(5, 20.0, 100.0)];
    let result = selector::select(
        &candidates,
        &observer(),
        &FlatProjector,
        &policy(SelectionMode::ScreenProximity, 60.0),
    );
    assert_eq!(result.target, Some(TargetId(4)));
}

#[test]
fn test_filters_team_dead_and_behind() {
    let mut teammate = candidate_at(1, 1.0, 100.0);
    teammate.team = 1;
    let mut dead = candidate_at(2, 2.0, 100.0);
    dead.alive = false;
    let behind = candidate(3, DVec3::new(3.0, 0.0, -50.0));
    let offscreen = candidate(4, DVec3::new(2_000.0, 0.0, 50.0));

    let result = selector::select(
        &[teammate, dead, behind, offscreen],
        &observer(),
        &FlatProjector,
        &policy(SelectionMode::ScreenProximity, 5_000.0),
    );
    assert!(!result.has_target);
}

#[test]
fn test_occlusion_policy_and_vehicle_bypass() {
    let mut hidden = candidate_at(1, 5.0, 100.0);
    hidden.visible = false;
    let mut mounted = candidate_at(2, 30.0, 100.0);
    mounted.visible = false;
    mounted.vehicle = Some(Kinematics::at_rest(mounted.kinematics.position));
    let candidates = vec![hidden, mounted];

    let strict = policy(SelectionMode::ScreenProximity, 60.0);
    let result = selector::select(&candidates, &observer(), &FlatProjector, &strict);
    assert_eq!(result.target, Some(TargetId(2)));

    let lenient = SelectionPolicy {
        must_be_visible: false,
        ..strict
    };
    let result = selector::select(&candidates, &observer(), &FlatProjector, &lenient);
    assert_eq!(result.target, Some(TargetId(1)));
}

#[test]
fn test_bone_priority_fallback() {
    let mut skeleton = Skeleton::standing(DVec3::new(0.0, 0.0, 50.0));
    skeleton.clear(Bone::Head);
    skeleton.clear(Bone::Neck);

    let auto = selector::resolve_aim_point(&skeleton, true, Bone::Head);
    assert_eq!(auto, skeleton.try_resolve(Bone::Spine1));

    let fixed = selector::resolve_aim_point(&skeleton, false, Bone::Head);
    assert_eq!(fixed, None);
    let fixed_hips = selector::resolve_aim_point(&skeleton, false, Bone::Hips);
    assert_eq!(fixed_hips, skeleton.try_resolve(Bone::Hips));

    let mut unresolved = candidate_at(1, 5.0, 100.0);
    unresolved.skeleton = Skeleton::default();
    let result = selector::select(
        &[unresolved],
        &observer(),
        &FlatProjector,
        &policy(SelectionMode::ScreenProximity, 60.0),
    );
    assert!(!result.has_target);
}

// ---- Controller ----

#[test]
fn test_inactive_trigger_is_noop() {
    let mut controller = EngagementController::new(config()).unwrap();
    let snap = snapshot(vec![candidate_at(1, 10.0, 100.0)]);
    let report = tick(&mut controller, &snap, &InputState::default(), 0.016);

    assert_eq!(report.phase, EngagePhase::Idle);
    assert_eq!(report.aim, None);
    assert_eq!(controller.previous_target(), None);
    assert_eq!(controller.smoother().elapsed(), DVec2::ZERO);
}

#[test]
fn test_no_target_is_acquiring() {
    let mut controller = EngagementController::new(config()).unwrap();
    let snap = snapshot(vec![]);
    let report = tick(&mut controller, &snap, &InputState::holding(KEY), 0.016);
    assert_eq!(report.phase, EngagePhase::Acquiring);
    assert!(!report.has_target);
}

#[test]
fn test_dead_or_reloading_observer_is_noop() {
    let mut controller = EngagementController::new(config()).unwrap();
    let mut snap = snapshot(vec![candidate_at(1, 10.0, 100.0)]);
    let input = InputState::holding(KEY);

    snap.observer.as_mut().unwrap().reload_timer = 1.2;
    assert_eq!(tick(&mut controller, &snap, &input, 0.016).aim, None);

    let mut relaxed = EngagementController::new(AimConfig {
        must_not_be_reloading: false,
        ..config()
    })
    .unwrap();
    assert!(tick(&mut relaxed, &snap, &input, 0.016).aim.is_some());

    snap.observer.as_mut().unwrap().alive = false;
    assert_eq!(tick(&mut relaxed, &snap, &input, 0.016).aim, None);
}

#[test]
fn test_target_change_resets_smoothing() {
    let mut controller = EngagementController::new(config()).unwrap();
    let input = InputState::holding(KEY);
    let first = snapshot(vec![candidate_at(1, 10.0, 100.0)]);

    tick(&mut controller, &first, &input, 0.05);
    tick(&mut controller, &first, &input, 0.05);
    assert!(controller.smoother().elapsed().x > 0.05);

    // Reset happens before the tick's own advance.
    let second = snapshot(vec![candidate_at(2, 12.0, 100.0)]);
    let report = tick(&mut controller, &second, &input, 0.05);
    assert_eq!(report.target, Some(TargetId(2)));
    assert_eq!(controller.previous_target(), Some(TargetId(2)));
    assert_eq!(controller.smoother().elapsed(), DVec2::splat(0.05));
}

#[test]
fn test_durations_drawn_within_range() {
    let mut controller = EngagementController::new(config()).unwrap();
    let input = InputState::holding(KEY);
    for id in 0..20 {
        let snap = snapshot(vec![candidate_at(id, 10.0, 100.0)]);
        tick(&mut controller, &snap, &input, 0.0);
        let window = controller.smoother().duration();
        assert!(window.x >= 0.2 && window.x <= 0.4, "yaw window {}", window.x);
        assert!(window.y >= 0.2 && window.y <= 0.4, "pitch window {}", window.y);
    }
}

#[test]
fn test_converges_exactly_on_target() {
    let mut controller = EngagementController::new(config()).unwrap();
    let input = InputState::holding(KEY);
    let snap = snapshot(vec![candidate_at(1, 10.0, 100.0)]);

    let mut report = tick(&mut controller, &snap, &input, 0.1);
    assert_eq!(report.phase, EngagePhase::Tracking);
    for _ in 0..10 {
        report = tick(&mut controller, &snap, &input, 0.1);
    }
    assert_eq!(report.phase, EngagePhase::Converged);

    let aim_point = report.predicted_point.unwrap();
    let desired = crate::angles::desired_angles(DVec3::ZERO, aim_point).unwrap();
    assert_eq!(report.aim, Some(crate::angles::normalize(desired)));
}

#[test]
fn test_sway_is_removed_before_smoothing() {
    let input = InputState::holding(KEY);
    let mut calm = snapshot(vec![candidate_at(1, 10.0, 100.0)]);
    let mut swaying = calm.clone();
    swaying.observer.as_mut().unwrap().sway = AimAngles::new(0.01, -0.02);
    calm.observer.as_mut().unwrap().sway = AimAngles::ZERO;

    let mut a = EngagementController::new(config()).unwrap();
    let mut b = EngagementController::new(config()).unwrap();
    let calm_aim = tick(&mut a, &calm, &input, 10.0).aim.unwrap();
    let sway_aim = tick(&mut b, &swaying, &input, 10.0).aim.unwrap();

    assert_relative_eq!(calm_aim.yaw - sway_aim.yaw, 0.01, epsilon = 1e-12);
    assert_relative_eq!(calm_aim.pitch - sway_aim.pitch, -0.02, epsilon = 1e-12);
}

#[test]
fn test_disabled_smoothing_writes_nothing() {
    let mut controller = EngagementController::new(AimConfig {
        max_smooth_duration: 0.0,
        ..config()
    })
    .unwrap();
    let snap = snapshot(vec![candidate_at(1, 10.0, 100.0)]);
    let report = tick(&mut controller, &snap, &InputState::holding(KEY), 0.016);

    assert!(report.has_target);
    assert!(report.predicted_point.is_some());
    assert_eq!(report.aim, None);
    assert_eq!(controller.previous_target(), None);
}

#[test]
fn test_release_and_reactivate_keeps_window() {
    let mut controller = EngagementController::new(config()).unwrap();
    let snap = snapshot(vec![candidate_at(1, 10.0, 100.0)]);
    let held = InputState::holding(KEY);

    tick(&mut controller, &snap, &held, 0.1);
    let window = controller.smoother().duration();
    assert_eq!(
        tick(&mut controller, &snap, &InputState::default(), 0.1).phase,
        EngagePhase::Idle
    );
    assert_eq!(controller.previous_target(), Some(TargetId(1)));

    tick(&mut controller, &snap, &held, 0.1);
    assert_eq!(controller.smoother().duration(), window);
    assert_eq!(
        controller.smoother().elapsed(),
        DVec2::splat(0.2).min(window)
    );
}

#[test]
fn test_prediction_failure_still_aims_at_raw_point() {
    let mut snap = snapshot(vec![candidate_at(1, 10.0, 2_000.0)]);
    // Far beyond the reach of a 20 m/s lob.
    snap.projectile = Some(ProjectileProfile::new(20.0, 9.81));
    let mut controller = EngagementController::new(config()).unwrap();
    let report = tick(&mut controller, &snap, &InputState::holding(KEY), 0.016);

    let prediction = report.prediction.unwrap();
    assert!(!prediction.success);
    assert_eq!(report.predicted_point, Some(snap.candidates[0].kinematics.position));
    assert!(report.aim.is_some());
}

#[test]
fn test_vehicle_occupant_is_led_by_vehicle_velocity() {
    let mut mounted = candidate_at(1, 0.0, 300.0);
    mounted.vehicle = Some(Kinematics::new(
        mounted.kinematics.position,
        DVec3::new(30.0, 0.0, 0.0),
    ));
    let mut snap = snapshot(vec![mounted]);
    snap.projectile = Some(ProjectileProfile::new(600.0, 0.0));

    let mut controller = EngagementController::new(config()).unwrap();
    let report = tick(&mut controller, &snap, &InputState::holding(KEY), 0.016);
    let predicted = report.predicted_point.unwrap();
    assert!(predicted.x > 10.0, "occupant not led: {predicted:?}");
}

#[test]
fn test_same_seed_same_trace() {
    let input = InputState::holding(KEY);
    let run = || {
        let mut controller = EngagementController::new(config()).unwrap();
        let mut trace = Vec::new();
        for id in 0..5 {
            let snap = snapshot(vec![candidate_at(id % 2, 10.0 + id as f64, 100.0)]);
            trace.push(tick(&mut controller, &snap, &input, 0.03));
        }
        serde_json::to_string(&trace).unwrap()
    };
    assert_eq!(run(), run());
}

/// Minimal host: a fixed snapshot plus a record of what the controller wrote.
struct RecordingWorld {
    snapshot: WorldSnapshot,
    written: Vec<AimAngles>,
    forced: Vec<TargetId>,
}

impl WorldProvider for RecordingWorld {
    fn snapshot(&self) -> WorldSnapshot {
        self.snapshot.clone()
    }

    fn apply_aim(&mut self, aim: AimAngles) {
        self.written.push(aim);
        if let Some(observer) = self.snapshot.observer.as_mut() {
            observer.aim = aim;
        }
    }

    fn force_visible(&mut self, target: TargetId) {
        self.forced.push(target);
    }
}

#[test_log::test]
fn test_run_writes_aim_and_forces_vehicle_visibility() {
    let mut mounted = candidate_at(9, 10.0, 100.0);
    mounted.vehicle = Some(Kinematics::at_rest(mounted.kinematics.position));
    let mut world = RecordingWorld {
        snapshot: snapshot(vec![mounted]),
        written: Vec::new(),
        forced: Vec::new(),
    };
    let mut controller = EngagementController::new(config()).unwrap();
    let input = InputState::holding(KEY);

    for _ in 0..3 {
        controller.run(&mut world, &FlatProjector, &input, 0.05);
    }
    assert_eq!(world.written.len(), 3);
    assert_eq!(world.forced, vec![TargetId(9); 3]);
    assert_eq!(world.snapshot.observer.unwrap().aim, world.written[2]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = EngagementController::new(AimConfig {
        min_smooth_duration: 2.0,
        max_smooth_duration: 1.0,
        ..config()
    });
    assert!(result.is_err());
}
