//! Collaborator boundary: how the engine reads the world and writes aim back.

use glam::{DVec2, DVec3};

use marksman_core::types::{AimAngles, TargetId, WorldSnapshot};

/// Maps world points to screen pixels for the current view.
pub trait ScreenProjector {
    /// Screen size in pixels.
    fn screen_size(&self) -> DVec2;

    /// Screen coordinate of `point`, or `None` when it is behind the view.
    fn project(&self, point: DVec3) -> Option<DVec2>;
}

/// Host world the controller engages in.
pub trait WorldProvider {
    /// Validated copy of everything the engine needs this tick.
    fn snapshot(&self) -> WorldSnapshot;

    /// Write the observer's new aim orientation.
    fn apply_aim(&mut self, aim: AimAngles);

    /// Ask the host to refresh pose and visibility for `target`. Hosts
    /// that keep skeletons current on their own can ignore this.
    fn force_visible(&mut self, _target: TargetId) {}
}
