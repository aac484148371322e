pub mod application;
pub mod camera;
pub mod client_events;
pub mod input;
pub mod scenegraph;
