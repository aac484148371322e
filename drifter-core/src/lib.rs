pub mod entity_location;
pub mod error;
pub mod logging;
pub mod physics_object;
pub mod player;
pub mod tuning;
mod settings;

pub use settings::{Settings, GLOBAL_CONFIG};

pub type EntityId = usize;
