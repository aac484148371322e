use config::{Config, ConfigError, File, FileFormat};
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::error::SettingsError;
use crate::tuning::{BodyConfig, ChaseCameraConfig, ControlScheme, SpeedPolicy, VehicleConfig};

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub server_tick_ms: u64,
    pub demo_ticks: u64,

    pub max_linear_speed: f64,
    pub turn_rate: f64,
    pub grip_factor: f64,
    pub thrust_acceleration: f64,
    pub speed_policy: SpeedPolicy,
    pub control_scheme: ControlScheme,
    pub vehicle_mass: f64,
    pub gravity: f64,

    pub camera_distance_behind: f64,
    pub camera_height_above: f64,
    pub camera_smoothing: f64,
    pub camera_look_height: f64,
}

fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("server_tick_ms", 16)?
        .set_default("demo_ticks", 300)?
        .set_default("max_linear_speed", 10.0)?
        .set_default("turn_rate", 2.0)?
        .set_default("grip_factor", 0.95)?
        .set_default("thrust_acceleration", 0.5)?
        .set_default("speed_policy", "unlimited")?
        .set_default("control_scheme", "steering")?
        .set_default("vehicle_mass", 1.0)?
        .set_default("gravity", 9.81)?
        .set_default("camera_distance_behind", 8.0)?
        .set_default("camera_height_above", 3.0)?
        .set_default("camera_smoothing", 0.9)?
        .set_default("camera_look_height", 1.0)
}

impl Settings {
    pub fn new() -> Result<Settings, ConfigError> {
        let config = builder_with_defaults()?
            .add_source(File::with_name("config.yaml").required(false))
            .build()?;

        config.try_deserialize()
    }

    /// Defaults overridden by an in-memory YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Settings, ConfigError> {
        let config = builder_with_defaults()?
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?;

        config.try_deserialize()
    }

    pub fn vehicle_config(&self) -> Result<VehicleConfig, SettingsError> {
        let config = VehicleConfig::new(
            self.max_linear_speed,
            self.turn_rate,
            self.grip_factor,
            self.thrust_acceleration,
        )?
        .with_speed_policy(self.speed_policy)
        .with_control_scheme(self.control_scheme);
        Ok(config)
    }

    pub fn body_config(&self) -> Result<BodyConfig, SettingsError> {
        Ok(BodyConfig::new(self.vehicle_mass, self.gravity)?)
    }

    pub fn camera_config(&self) -> Result<ChaseCameraConfig, SettingsError> {
        let config = ChaseCameraConfig::new(
            self.camera_distance_behind,
            self.camera_height_above,
            self.camera_smoothing,
        )?
        .with_look_height(self.camera_look_height)?;
        Ok(config)
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::new().expect("failed to read config file");
}
