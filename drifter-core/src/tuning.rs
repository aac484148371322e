use serde::Deserialize;

use crate::error::TuningError;

/// What happens to throttle input once the vehicle is already at top speed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// Thrust is applied whenever there is throttle input.
    Unlimited,
    /// At or above `max_linear_speed` (horizontally) thrust is withheld,
    /// unless it points against the current velocity, so braking and
    /// reversing still work at the cap.
    Capped,
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        SpeedPolicy::Unlimited
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlScheme {
    /// Yaw steering, grip correction and thrust along the body's forward axis.
    Steering,
    /// No steering or grip: input pushes the body along fixed world axes
    /// (forward is -Z, right is +X) until it reaches top speed.
    WorldAxis,
}

impl Default for ControlScheme {
    fn default() -> Self {
        ControlScheme::Steering
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_fraction(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

// Immutable per-vehicle tuning. Only constructible through `new`, so a
// VehicleConfig in hand is always in range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VehicleConfig {
    max_linear_speed: f64,
    turn_rate: f64,   // in radians per second
    grip_factor: f64, // fraction of sideways speed removed per tick
    thrust_acceleration: f64,
    speed_policy: SpeedPolicy,
    control_scheme: ControlScheme,
}

impl VehicleConfig {
    pub fn new(
        max_linear_speed: f64,
        turn_rate: f64,
        grip_factor: f64,
        thrust_acceleration: f64,
    ) -> Result<VehicleConfig, TuningError> {
        if !is_positive(max_linear_speed) {
            return Err(TuningError::MaxLinearSpeed(max_linear_speed));
        }
        if !is_non_negative(turn_rate) {
            return Err(TuningError::TurnRate(turn_rate));
        }
        if !is_fraction(grip_factor) {
            return Err(TuningError::GripFactor(grip_factor));
        }
        if !is_positive(thrust_acceleration) {
            return Err(TuningError::ThrustAcceleration(thrust_acceleration));
        }

        Ok(VehicleConfig {
            max_linear_speed,
            turn_rate,
            grip_factor,
            thrust_acceleration,
            speed_policy: SpeedPolicy::default(),
            control_scheme: ControlScheme::default(),
        })
    }

    pub fn with_speed_policy(self, speed_policy: SpeedPolicy) -> Self {
        VehicleConfig {
            speed_policy,
            ..self
        }
    }

    pub fn with_control_scheme(self, control_scheme: ControlScheme) -> Self {
        VehicleConfig {
            control_scheme,
            ..self
        }
    }

    pub fn max_linear_speed(&self) -> f64 {
        self.max_linear_speed
    }

    pub fn turn_rate(&self) -> f64 {
        self.turn_rate
    }

    pub fn grip_factor(&self) -> f64 {
        self.grip_factor
    }

    pub fn thrust_acceleration(&self) -> f64 {
        self.thrust_acceleration
    }

    pub fn speed_policy(&self) -> SpeedPolicy {
        self.speed_policy
    }

    pub fn control_scheme(&self) -> ControlScheme {
        self.control_scheme
    }
}

// Mass and gravity the simulated body is built with. Both feed divisions and
// products every step, so they are checked up front.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyConfig {
    mass: f64,
    gravity: f64, // magnitude, pointing down
}

impl BodyConfig {
    pub fn new(mass: f64, gravity: f64) -> Result<BodyConfig, TuningError> {
        if !is_positive(mass) {
            return Err(TuningError::VehicleMass(mass));
        }
        if !is_non_negative(gravity) {
            return Err(TuningError::Gravity(gravity));
        }

        Ok(BodyConfig { mass, gravity })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChaseCameraConfig {
    distance_behind: f64,
    height_above: f64,
    // 0 snaps to the ideal position every tick, 1 never moves
    smoothing: f64,
    look_height: f64,
}

pub const DEFAULT_LOOK_HEIGHT: f64 = 1.0;

impl ChaseCameraConfig {
    pub fn new(
        distance_behind: f64,
        height_above: f64,
        smoothing: f64,
    ) -> Result<ChaseCameraConfig, TuningError> {
        if !is_positive(distance_behind) {
            return Err(TuningError::DistanceBehind(distance_behind));
        }
        if !is_non_negative(height_above) {
            return Err(TuningError::HeightAbove(height_above));
        }
        if !is_fraction(smoothing) {
            return Err(TuningError::Smoothing(smoothing));
        }

        Ok(ChaseCameraConfig {
            distance_behind,
            height_above,
            smoothing,
            look_height: DEFAULT_LOOK_HEIGHT,
        })
    }

    pub fn with_look_height(self, look_height: f64) -> Result<Self, TuningError> {
        if !is_non_negative(look_height) {
            return Err(TuningError::LookHeight(look_height));
        }
        Ok(ChaseCameraConfig {
            look_height,
            ..self
        })
    }

    pub fn distance_behind(&self) -> f64 {
        self.distance_behind
    }

    pub fn height_above(&self) -> f64 {
        self.height_above
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn look_height(&self) -> f64 {
        self.look_height
    }
}
