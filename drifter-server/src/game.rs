use std::collections::{BTreeMap, HashMap};
use std::thread;
use std::time::{Duration, Instant};

use drifter_core::entity_location::EntityLocation;
use drifter_core::error::SettingsError;
use drifter_core::physics_object::RigidBodyHandle;
use drifter_core::player::player_inputs::SharedInput;
use drifter_core::tuning::{BodyConfig, VehicleConfig};
use drifter_core::{EntityId, Settings};
use glam::DVec3;
use tracing::{debug, info, warn};

use crate::physics::controller::VehicleController;
use crate::physics::sim_body::SimBody;
use crate::vehicles::get_vehicle_start_body;

pub struct Vehicle {
    pub controller: VehicleController,
    pub input: SharedInput,
    pub location: EntityLocation,
}

/*
 * Owns the physics bodies and the vehicles driving them. Bodies live in their
 * own table keyed by entity, so a vehicle can exist before (or after) its
 * body does; the controller simply sits those ticks out.
 */
pub struct GameServer {
    settings: Settings,
    vehicle_config: VehicleConfig,
    body_config: BodyConfig,
    bodies: HashMap<EntityId, SimBody>,
    vehicles: BTreeMap<EntityId, Vehicle>,
    next_entity: EntityId,
}

impl GameServer {
    pub fn new(settings: Settings) -> Result<GameServer, SettingsError> {
        let vehicle_config = settings.vehicle_config()?;
        let body_config = settings.body_config()?;
        info!(?vehicle_config, ?body_config, "game server configured");

        Ok(GameServer {
            settings,
            vehicle_config,
            body_config,
            bodies: HashMap::new(),
            vehicles: BTreeMap::new(),
            next_entity: 0,
        })
    }

    pub fn body_config(&self) -> &BodyConfig {
        &self.body_config
    }

    /// Adds a vehicle with a fresh body at `position`.
    pub fn spawn_vehicle(&mut self, position: DVec3) -> EntityId {
        let entity = self.next_entity;
        self.next_entity += 1;

        self.bodies
            .insert(entity, get_vehicle_start_body(&self.body_config, position));
        self.vehicles.insert(
            entity,
            Vehicle {
                controller: VehicleController::new(self.vehicle_config),
                input: SharedInput::new(),
                location: EntityLocation {
                    position,
                    ..Default::default()
                },
            },
        );

        info!(entity, ?position, "spawned vehicle");
        entity
    }

    pub fn insert_body(&mut self, entity: EntityId, body: SimBody) -> Option<SimBody> {
        self.bodies.insert(entity, body)
    }

    pub fn remove_body(&mut self, entity: EntityId) -> Option<SimBody> {
        self.bodies.remove(&entity)
    }

    pub fn body(&self, entity: EntityId) -> Option<&SimBody> {
        self.bodies.get(&entity)
    }

    /// Handle the input layer writes into; the tick only ever reads a
    /// snapshot of it.
    pub fn input(&self, entity: EntityId) -> Option<SharedInput> {
        self.vehicles
            .get(&entity)
            .map(|vehicle| vehicle.input.clone())
    }

    pub fn location(&self, entity: EntityId) -> Option<EntityLocation> {
        self.vehicles.get(&entity).map(|vehicle| vehicle.location)
    }

    // Every controller write lands before the physics step, and locations
    // are only read back after it
    pub fn tick(&mut self, time_step: f64) {
        for (entity, vehicle) in self.vehicles.iter_mut() {
            let input = vehicle.input.snapshot();
            let body = self
                .bodies
                .get_mut(entity)
                .map(|body| body as &mut dyn RigidBodyHandle);

            if vehicle.controller.update(body, &input, time_step).is_none() {
                debug!(entity, "vehicle has no body this tick");
            }
        }

        for body in self.bodies.values_mut() {
            body.do_physics_step(time_step);
        }

        for (entity, vehicle) in self.vehicles.iter_mut() {
            if let Some(body) = self.bodies.get(entity) {
                vehicle.location = EntityLocation {
                    position: body.position,
                    rotation: body.rotation,
                    unit_forward_direction: vehicle.controller.forward_direction(),
                };
            }
        }
    }

    /// Runs `ticks` fixed-length ticks in real time, calling `on_tick` after
    /// each one. Inputs written from `on_tick` are picked up on the next tick.
    pub fn start_loop<F>(&mut self, ticks: u64, mut on_tick: F)
    where
        F: FnMut(u64, &GameServer),
    {
        let max_server_tick_duration = Duration::from_millis(self.settings.server_tick_ms);
        let time_step = max_server_tick_duration.as_secs_f64();

        for tick in 0..ticks {
            let start_time = Instant::now();

            self.tick(time_step);
            on_tick(tick, self);

            // wait until server tick time has elapsed
            match max_server_tick_duration.checked_sub(start_time.elapsed()) {
                Some(remaining_tick_duration) => thread::sleep(remaining_tick_duration),
                None => warn!(
                    tick,
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "server tick took longer than configured length"
                ),
            }
        }
    }
}
