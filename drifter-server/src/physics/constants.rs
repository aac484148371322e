// Rolling resistance dominates at low-speed regimes and is proportional to
// velocity; drag dominates at higher speeds and is proportional to the square
// of velocity, so the rolling resistance coefficient must be much larger (~30x)
// than the drag coefficient
pub const DRAG_COEFFICIENT: f64 = 0.01;
pub const ROLLING_RESISTANCE_COEFFICIENT: f64 = 0.3;

// below this speed (linear and angular) a grounded body falls asleep
pub const SLEEP_SPEED_THRESHOLD: f64 = 0.05;
