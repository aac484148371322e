pub mod game;
pub mod physics;
pub mod vehicles;
