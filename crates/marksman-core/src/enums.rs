//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

/// Skeletal reference point a candidate can be aimed at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bone {
    #[default]
    Head,
    Neck,
    /// Upper spine.
    Spine1,
    /// Lower spine.
    Spine2,
    Hips,
}

impl Bone {
    /// Number of reference points a skeleton exposes.
    pub const COUNT: usize = 5;

    /// Resolution order used when automatic bone selection is enabled.
    pub const PRIORITY: [Bone; Bone::COUNT] =
        [Bone::Head, Bone::Neck, Bone::Spine1, Bone::Spine2, Bone::Hips];

    /// Slot index of this bone in a skeleton table.
    pub fn index(self) -> usize {
        match self {
            Bone::Head => 0,
            Bone::Neck => 1,
            Bone::Spine1 => 2,
            Bone::Spine2 => 3,
            Bone::Hips => 4,
        }
    }
}

/// Scoring policy used by the target selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Mode 0: screen-space distance from the crosshair, lower wins.
    #[default]
    ScreenProximity,
    /// Mode 1: world distance discounted by up to 50% for being near the crosshair.
    WeightedDistance,
}

impl SelectionMode {
    /// Map the numeric mode used by host configuration surfaces.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(SelectionMode::ScreenProximity),
            1 => Some(SelectionMode::WeightedDistance),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            SelectionMode::ScreenProximity => 0,
            SelectionMode::WeightedDistance => 1,
        }
    }
}

/// Engagement controller phase, reported every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagePhase {
    /// Activation trigger released.
    #[default]
    Idle,
    /// Activation held but no eligible target (or observer unable to engage).
    Acquiring,
    /// Target selected, smoothing window still running on at least one axis.
    Tracking,
    /// Smoothing window elapsed on both axes.
    Converged,
}
