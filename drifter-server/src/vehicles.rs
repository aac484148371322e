use drifter_core::tuning::BodyConfig;
use glam::{const_dvec3, DVec3};

use crate::physics::sim_body::SimBody;

// Box the vehicle's collider is approximated with (width, height, depth)
pub const VEHICLE_SIZE: DVec3 = const_dvec3!([0.2, 0.5, 0.3]);

// Vehicles are dropped in a row slightly above the ground and settle on the
// first few ticks
pub fn get_starting_position_from_spawn_number(spawn_number: usize) -> DVec3 {
    DVec3::new(2.0 * spawn_number as f64, 1.0, 0.0)
}

// Get the initial physics properties of a vehicle (i.e. before it starts going)
pub fn get_vehicle_start_body(body_config: &BodyConfig, position: DVec3) -> SimBody {
    SimBody::new(position, VEHICLE_SIZE, body_config.mass(), body_config.gravity())
}

