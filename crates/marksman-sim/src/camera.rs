//! Pinhole camera that stands in for the host's world-to-screen transform.

use glam::{DVec2, DVec3};

use marksman_aim::ScreenProjector;
use marksman_core::types::AimAngles;

/// Points closer than this along the view axis do not project.
const NEAR_PLANE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    /// View orientation, sway included.
    pub view: AimAngles,
    pub screen_size: DVec2,
    pub vertical_fov_degrees: f64,
}

impl Camera {
    /// Unit view direction for the current yaw and pitch.
    pub fn forward(&self) -> DVec3 {
        let (yaw, pitch) = (self.view.yaw, self.view.pitch);
        DVec3::new(
            -yaw.sin() * pitch.cos(),
            pitch.sin(),
            yaw.cos() * pitch.cos(),
        )
    }

    fn basis(&self) -> (DVec3, DVec3, DVec3) {
        let forward = self.forward();
        let right = DVec3::Y
            .cross(forward)
            .try_normalize()
            .unwrap_or(DVec3::new(self.view.yaw.cos(), 0.0, self.view.yaw.sin()));
        let up = forward.cross(right);
        (forward, right, up)
    }

    fn focal_length(&self) -> f64 {
        (self.screen_size.y / 2.0) / (self.vertical_fov_degrees.to_radians() / 2.0).tan()
    }
}

impl ScreenProjector for Camera {
    fn screen_size(&self) -> DVec2 {
        self.screen_size
    }

    fn project(&self, point: DVec3) -> Option<DVec2> {
        let (forward, right, up) = self.basis();
        let offset = point - self.position;
        let depth = offset.dot(forward);
        if depth < NEAR_PLANE {
            return None;
        }
        let focal = self.focal_length();
        let center = self.screen_size / 2.0;
        Some(DVec2::new(
            center.x + focal * offset.dot(right) / depth,
            center.y - focal * offset.dot(up) / depth,
        ))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn camera(view: AimAngles) -> Camera {
        Camera {
            position: DVec3::ZERO,
            view,
            screen_size: DVec2::new(1280.0, 720.0),
            vertical_fov_degrees: 70.0,
        }
    }

    #[test]
    fn test_point_ahead_projects_to_center() {
        let cam = camera(AimAngles::ZERO);
        let screen = cam.project(DVec3::new(0.0, 0.0, 25.0)).unwrap();
        assert_relative_eq!(screen.x, 640.0);
        assert_relative_eq!(screen.y, 360.0);
    }

    #[test]
    fn test_point_behind_does_not_project() {
        let cam = camera(AimAngles::ZERO);
        assert!(cam.project(DVec3::new(0.0, 0.0, -10.0)).is_none());
    }

    #[test]
    fn test_forward_matches_aim_angles() {
        // Aiming at a point with the engine's angle convention centers it.
        let point = DVec3::new(-30.0, 8.0, 40.0);
        let angles = marksman_aim::angles::direction_to_angles(point).unwrap();
        let cam = camera(angles);
        let screen = cam.project(point).unwrap();
        assert_relative_eq!(screen.x, 640.0, epsilon = 1e-6);
        assert_relative_eq!(screen.y, 360.0, epsilon = 1e-6);
    }

    #[test]
    fn test_up_is_up_on_screen() {
        let cam = camera(AimAngles::ZERO);
        let high = cam.project(DVec3::new(0.0, 5.0, 25.0)).unwrap();
        assert!(high.y < 360.0);
    }
}
