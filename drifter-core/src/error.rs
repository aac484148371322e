use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TuningError {
    #[error("max linear speed must be positive and finite, got {0}")]
    MaxLinearSpeed(f64),

    #[error("turn rate must be non-negative and finite, got {0}")]
    TurnRate(f64),

    #[error("grip factor must lie within [0, 1], got {0}")]
    GripFactor(f64),

    #[error("thrust acceleration must be positive and finite, got {0}")]
    ThrustAcceleration(f64),

    #[error("camera distance behind must be positive and finite, got {0}")]
    DistanceBehind(f64),

    #[error("camera height above must be non-negative and finite, got {0}")]
    HeightAbove(f64),

    #[error("camera smoothing must lie within [0, 1], got {0}")]
    Smoothing(f64),

    #[error("camera look height must be non-negative and finite, got {0}")]
    LookHeight(f64),

    #[error("vehicle mass must be positive and finite, got {0}")]
    VehicleMass(f64),

    #[error("gravity must be non-negative and finite, got {0}")]
    Gravity(f64),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid tuning: {0}")]
    Tuning(#[from] TuningError),
}
