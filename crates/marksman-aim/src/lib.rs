//! Target selection, angle smoothing and the per-tick engagement controller.
//!
//! The controller is driven synchronously once per host tick. World access
//! goes through the [`world`] traits so the core never touches host memory.

pub mod angles;
pub mod controller;
pub mod selector;
pub mod smoother;
pub mod world;

pub use controller::{EngagementController, TickContext, TickReport};
pub use marksman_core as core;
pub use selector::SelectionPolicy;
pub use smoother::AngleSmoother;
pub use world::{ScreenProjector, WorldProvider};

#[cfg(test)]
mod tests;
