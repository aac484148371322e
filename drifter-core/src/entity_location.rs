use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::physics_object::{checked_normalize, LOCAL_FORWARD, LOCAL_RIGHT};

// EntityLocation is the visual transform of a controlled object: what the
// renderer draws and what the chase camera trails
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityLocation {
    pub position: DVec3,
    pub rotation: DQuat,
    pub unit_forward_direction: DVec3, // should be a normalized vector
}

impl Default for EntityLocation {
    fn default() -> Self {
        EntityLocation {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            unit_forward_direction: LOCAL_FORWARD,
        }
    }
}

/// World-space basis of a vehicle for a single tick. Recomputed from the
/// body orientation every tick and thrown away afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DerivedFrame {
    pub forward: DVec3,
    pub right: DVec3,
}

impl Default for DerivedFrame {
    fn default() -> Self {
        DerivedFrame {
            forward: LOCAL_FORWARD,
            right: LOCAL_RIGHT,
        }
    }
}

impl DerivedFrame {
    /// Rotates the local forward/right axes by `rotation`. A degenerate
    /// orientation (zero or NaN quaternion) would poison every later tick, so
    /// any axis that fails to normalize is taken from `previous` instead.
    pub fn from_rotation(rotation: DQuat, previous: &DerivedFrame) -> DerivedFrame {
        let forward = checked_normalize(rotation * LOCAL_FORWARD);
        let right = checked_normalize(rotation * LOCAL_RIGHT);

        if forward.is_none() || right.is_none() {
            warn!(?rotation, "degenerate body orientation, reusing previous frame");
        }

        DerivedFrame {
            forward: forward.unwrap_or(previous.forward),
            right: right.unwrap_or(previous.right),
        }
    }
}
