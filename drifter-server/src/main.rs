use drifter_core::logging::init_tracing;
use drifter_core::player::player_inputs::InputChannel;
use drifter_core::GLOBAL_CONFIG;
use drifter_server::game::GameServer;
use drifter_server::vehicles::get_starting_position_from_spawn_number;
use tracing::{error, info};

// Headless drive: throttle up, carve left, carve right, brake.
fn main() {
    init_tracing();

    let mut server = match GameServer::new(GLOBAL_CONFIG.clone()) {
        Ok(server) => server,
        Err(e) => {
            error!(%e, "could not start game server");
            std::process::exit(1);
        }
    };

    let entity = server.spawn_vehicle(get_starting_position_from_spawn_number(0));
    let input = match server.input(entity) {
        Some(input) => input,
        None => return,
    };
    input.set_pressed(InputChannel::Forward, true);

    let ticks = GLOBAL_CONFIG.demo_ticks;
    server.start_loop(ticks, |tick, server| {
        let phase = tick * 4 / ticks.max(1);
        input.set_pressed(InputChannel::Left, phase == 1);
        input.set_pressed(InputChannel::Right, phase == 2);
        input.set_pressed(InputChannel::Forward, phase < 3);
        input.set_pressed(InputChannel::Backward, phase == 3);

        if tick % 30 == 0 {
            if let Some(body) = server.body(entity) {
                info!(
                    tick,
                    position = ?body.position,
                    velocity = ?body.velocity,
                    "vehicle state"
                );
            }
        }
    });
}
