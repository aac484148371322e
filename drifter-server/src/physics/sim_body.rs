use glam::{DQuat, DVec3};

use drifter_core::physics_object::RigidBodyHandle;

use crate::physics::constants::{
    DRAG_COEFFICIENT, ROLLING_RESISTANCE_COEFFICIENT, SLEEP_SPEED_THRESHOLD,
};

// flat world for now; a track mesh would answer this with a raycast
fn get_height_at_coordinates(_x: f64, _z: f64) -> f64 {
    return 0.0;
}

/*
 * A deliberately small rigid body: enough integration (gravity, ground
 * contact, drag, yaw/pitch/roll from angular velocity) to drive a vehicle
 * controller without a real physics engine. No collisions between bodies,
 * no inertia tensor.
 */
#[derive(Clone, Debug)]
pub struct SimBody {
    pub position: DVec3,
    pub rotation: DQuat,
    pub velocity: DVec3,
    pub angular_velocity: DVec3, // in radians per second around each world axis

    pub mass: f64,
    pub size: DVec3,
    pub gravity: f64,

    pub awake: bool,
}

impl SimBody {
    pub fn new(position: DVec3, size: DVec3, mass: f64, gravity: f64) -> SimBody {
        SimBody {
            position,
            rotation: DQuat::IDENTITY,
            velocity: DVec3::ZERO,
            angular_velocity: DVec3::ZERO,
            mass,
            size,
            gravity,
            awake: true,
        }
    }

    fn resting_height(&self) -> f64 {
        get_height_at_coordinates(self.position.x, self.position.z) + self.size.y / 2.0
    }

    pub fn is_aerial(&self) -> bool {
        self.position.y > self.resting_height()
    }

    /* Advance this body by one fixed step. Sleeping bodies are skipped until
     * something wakes them. */
    pub fn do_physics_step(&mut self, time_step: f64) {
        if !self.awake {
            return;
        }

        let acceleration = self.sum_of_forces() / self.mass;
        self.velocity += acceleration * time_step;

        let rotation_delta = DQuat::from_scaled_axis(self.angular_velocity * time_step);
        self.rotation = (rotation_delta * self.rotation).normalize();

        self.position += self.velocity * time_step;

        // ground contact: stop at the surface and kill any downward speed
        let resting_height = self.resting_height();
        if self.position.y < resting_height {
            self.position.y = resting_height;
            if self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
        }

        if !self.is_aerial()
            && self.velocity.length() < SLEEP_SPEED_THRESHOLD
            && self.angular_velocity.length() < SLEEP_SPEED_THRESHOLD
        {
            self.velocity = DVec3::ZERO;
            self.angular_velocity = DVec3::ZERO;
            self.awake = false;
        }
    }

    fn sum_of_forces(&self) -> DVec3 {
        let air_forces = self.gravitational_force() + self.air_resistance_force();

        if self.is_aerial() {
            air_forces
        } else {
            air_forces + self.rolling_resistance_force()
        }
    }

    fn gravitational_force(&self) -> DVec3 {
        DVec3::new(0.0, -1.0, 0.0) * self.mass * self.gravity
    }

    // air resistance is proportional to the square of velocity
    fn air_resistance_force(&self) -> DVec3 {
        let horizontal = DVec3::new(self.velocity.x, 0.0, self.velocity.z);
        horizontal * self.mass * -1.0 * DRAG_COEFFICIENT * horizontal.length()
    }

    fn rolling_resistance_force(&self) -> DVec3 {
        let horizontal = DVec3::new(self.velocity.x, 0.0, self.velocity.z);
        horizontal * self.mass * -1.0 * ROLLING_RESISTANCE_COEFFICIENT
    }
}

impl RigidBodyHandle for SimBody {
    fn linvel(&self) -> DVec3 {
        self.velocity
    }

    fn angvel(&self) -> DVec3 {
        self.angular_velocity
    }

    fn rotation(&self) -> DQuat {
        self.rotation
    }

    fn set_linvel(&mut self, linvel: DVec3, wake_up: bool) {
        self.velocity = linvel;
        self.awake |= wake_up;
    }

    fn set_angvel(&mut self, angvel: DVec3, wake_up: bool) {
        self.angular_velocity = angvel;
        self.awake |= wake_up;
    }

    fn apply_impulse(&mut self, impulse: DVec3, wake_up: bool) {
        self.velocity += impulse / self.mass;
        self.awake |= wake_up;
    }
}
