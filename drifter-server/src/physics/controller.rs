use glam::DVec3;
use tracing::{debug, warn};

use drifter_core::entity_location::DerivedFrame;
use drifter_core::physics_object::{checked_normalize, RigidBodyHandle};
use drifter_core::player::player_inputs::InputState;
use drifter_core::tuning::{ControlScheme, SpeedPolicy, VehicleConfig};

/// Removes `grip_factor` of the sideways component of `velocity`, measured
/// along `frame.right`. The vertical component always comes back untouched
/// so gravity and jumps are never fought by the correction.
pub fn apply_grip(velocity: DVec3, frame: &DerivedFrame, grip_factor: f64) -> DVec3 {
    let side_speed = velocity.dot(frame.right);
    let removed_side_speed = side_speed * grip_factor;

    let mut corrected = velocity - frame.right * removed_side_speed;
    corrected.y = velocity.y;
    corrected
}

fn horizontal(v: DVec3) -> DVec3 {
    DVec3::new(v.x, 0.0, v.z)
}

/*
 * Turns a tick's input snapshot into writes against a rigid body: yaw
 * steering, sideways grip and forward thrust. The body itself belongs to the
 * physics world and is only borrowed for the duration of `update`.
 */
pub struct VehicleController {
    config: VehicleConfig,
    frame: DerivedFrame,
}

impl VehicleController {
    pub fn new(config: VehicleConfig) -> VehicleController {
        VehicleController {
            config,
            frame: DerivedFrame::default(),
        }
    }

    pub fn forward_direction(&self) -> DVec3 {
        self.frame.forward
    }

    /// Runs one tick. Returns `None` without touching anything when the
    /// entity has no body yet. `time_step` is unused: every write is either
    /// an instantaneous velocity or an impulse, and the physics step owns
    /// integration.
    pub fn update(
        &mut self,
        body: Option<&mut dyn RigidBodyHandle>,
        input: &InputState,
        _time_step: f64,
    ) -> Option<DerivedFrame> {
        let body = match body {
            Some(body) => body,
            None => {
                debug!("no rigid body attached, skipping controller tick");
                return None;
            }
        };

        match self.config.control_scheme() {
            ControlScheme::Steering => self.drive(body, input),
            ControlScheme::WorldAxis => self.push_along_world_axes(body, input),
        }

        Some(self.frame)
    }

    fn drive(&mut self, body: &mut dyn RigidBodyHandle, input: &InputState) {
        // steering is instantaneous: the yaw rate is set, not accelerated,
        // and dropped to zero as soon as nothing is held
        let turn = input.turn();
        let mut angular_velocity = body.angvel();
        angular_velocity.y = if turn != 0.0 {
            turn * self.config.turn_rate()
        } else {
            0.0
        };
        set_angvel(body, angular_velocity);

        self.frame = DerivedFrame::from_rotation(body.rotation(), &self.frame);

        // runs even without input: collisions and slopes cause drift too
        let corrected = apply_grip(body.linvel(), &self.frame, self.config.grip_factor());
        set_linvel(body, corrected);

        let throttle = input.throttle();
        if throttle != 0.0 {
            let impulse = horizontal(self.frame.forward * self.config.thrust_acceleration() * throttle);
            if self.thrust_allowed(body.linvel(), impulse) {
                apply_impulse(body, impulse);
            }
        }
    }

    fn thrust_allowed(&self, velocity: DVec3, impulse: DVec3) -> bool {
        match self.config.speed_policy() {
            SpeedPolicy::Unlimited => true,
            SpeedPolicy::Capped => {
                let horizontal_velocity = horizontal(velocity);
                // braking or reversing is always allowed
                horizontal_velocity.length() < self.config.max_linear_speed()
                    || impulse.dot(horizontal_velocity) < 0.0
            }
        }
    }

    // The simple scheme: no steering or grip, input is a direction on the
    // world's horizontal plane and pushes only below top speed
    fn push_along_world_axes(&mut self, body: &mut dyn RigidBodyHandle, input: &InputState) {
        self.frame = DerivedFrame::from_rotation(body.rotation(), &self.frame);

        let wanted = DVec3::new(
            (input.right - input.left) as f64,
            0.0,
            (input.backward - input.forward) as f64,
        );
        let direction = match checked_normalize(wanted) {
            Some(direction) => direction,
            None => return,
        };

        if horizontal(body.linvel()).length() < self.config.max_linear_speed() {
            apply_impulse(body, direction * self.config.thrust_acceleration());
        }
    }
}

// NaN is sticky once it reaches an integrating body, so nothing non-finite
// is ever written

fn set_angvel(body: &mut dyn RigidBodyHandle, angular_velocity: DVec3) {
    if angular_velocity.is_finite() {
        body.set_angvel(angular_velocity, true);
    } else {
        warn!(?angular_velocity, "refusing to write non-finite angular velocity");
    }
}

fn set_linvel(body: &mut dyn RigidBodyHandle, linear_velocity: DVec3) {
    if linear_velocity.is_finite() {
        body.set_linvel(linear_velocity, true);
    } else {
        warn!(?linear_velocity, "refusing to write non-finite linear velocity");
    }
}

fn apply_impulse(body: &mut dyn RigidBodyHandle, impulse: DVec3) {
    if impulse.is_finite() {
        body.apply_impulse(impulse, true);
    } else {
        warn!(?impulse, "refusing to apply non-finite impulse");
    }
}
