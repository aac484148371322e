/*
 * The physics engine owns every rigid body; the vehicle controller only ever
 * borrows one for the length of a tick. This is the narrow slice of a body
 * the controller is allowed to touch.
 */

use glam::{const_dvec3, DQuat, DVec3};

// Body-local axes of a vehicle. Right-handed and Y-up, so a positive yaw
// (counterclockwise seen from above) swings the nose toward -X, i.e. left.
pub const LOCAL_FORWARD: DVec3 = const_dvec3!([0.0, 0.0, -1.0]);
pub const LOCAL_RIGHT: DVec3 = DVec3::X;
pub const WORLD_UP: DVec3 = DVec3::Y;

pub trait RigidBodyHandle {
    fn linvel(&self) -> DVec3;
    fn angvel(&self) -> DVec3;
    // should be a unit quaternion
    fn rotation(&self) -> DQuat;

    fn set_linvel(&mut self, linvel: DVec3, wake_up: bool);
    fn set_angvel(&mut self, angvel: DVec3, wake_up: bool);
    fn apply_impulse(&mut self, impulse: DVec3, wake_up: bool);
}

// Squared length below which a direction is considered degenerate
pub const DEGENERATE_LENGTH_SQUARED: f64 = 1e-12;

/// Normalizes `v`, or returns `None` when it is too short or not finite to
/// have a meaningful direction.
pub fn checked_normalize(v: DVec3) -> Option<DVec3> {
    let length_squared = v.length_squared();
    if length_squared.is_finite() && length_squared > DEGENERATE_LENGTH_SQUARED {
        Some(v / length_squared.sqrt())
    } else {
        None
    }
}
