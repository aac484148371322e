use drifter_core::error::SettingsError;
use drifter_core::player::player_inputs::SharedInput;
use drifter_core::{EntityId, Settings};
use drifter_server::game::GameServer;
use drifter_server::vehicles::{get_starting_position_from_spawn_number, VEHICLE_SIZE};
use tracing::info;

use crate::camera::{CameraTransform, ChaseCamera};
use crate::client_events::Watching;
use crate::input::{Key, KeyBindings};
use crate::scenegraph::Transform;

pub struct Application {
    pub game: GameServer,
    pub player: EntityId,
    input: SharedInput,
    bindings: KeyBindings,
    camera: ChaseCamera,
}

impl Watching for Application {
    fn on_key_down(&mut self, key: Key) {
        self.bindings.on_key_down(key, &self.input);
    }

    fn on_key_up(&mut self, key: Key) {
        self.bindings.on_key_up(key, &self.input);
    }
}

impl Application {
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        let camera = ChaseCamera::new(settings.camera_config()?);
        let mut game = GameServer::new(settings)?;

        let player = game.spawn_vehicle(get_starting_position_from_spawn_number(0));
        let input = game.input(player).unwrap_or_default();

        Ok(Self {
            game,
            player,
            input,
            bindings: KeyBindings::default(),
            camera,
        })
    }

    pub fn input(&self) -> &SharedInput {
        &self.input
    }

    pub fn camera(&self) -> &ChaseCamera {
        &self.camera
    }

    /// One full frame: controller and physics on the server side, then the
    /// camera catches up with wherever the player ended up.
    pub fn update(&mut self, time_step: f64) -> Option<CameraTransform> {
        self.game.tick(time_step);
        self.follow_player()
    }

    fn follow_player(&mut self) -> Option<CameraTransform> {
        let location = self.game.location(self.player)?;
        Some(
            self.camera
                .update(location.position, location.unit_forward_direction),
        )
    }

    pub fn player_transform(&self) -> Option<Transform> {
        self.game
            .location(self.player)
            .map(|location| Transform::from_entity_location(&location, VEHICLE_SIZE.as_vec3()))
    }

    /// Real-time loop. `script` is asked every tick for key transitions
    /// (key, pressed) to feed in before the next tick.
    pub fn run<F>(&mut self, ticks: u64, mut script: F)
    where
        F: FnMut(u64) -> Vec<(Key, bool)>,
    {
        let Application {
            game,
            player,
            input,
            bindings,
            camera,
        } = self;

        game.start_loop(ticks, |tick, game| {
            if let Some(location) = game.location(*player) {
                let transform = camera.update(location.position, location.unit_forward_direction);
                if tick % 30 == 0 {
                    info!(
                        tick,
                        player = ?location.position,
                        camera = ?transform.position,
                        look_at = ?transform.target,
                        "camera"
                    );
                }
            }

            for (key, pressed) in script(tick) {
                if pressed {
                    bindings.on_key_down(key, input);
                } else {
                    bindings.on_key_up(key, input);
                }
            }
        });
    }
}
