use drifter_client::application::Application;
use drifter_client::input::Key;
use drifter_core::logging::init_tracing;
use drifter_core::GLOBAL_CONFIG;
use tracing::error;

// Scripted lap standing in for a keyboard: (tick, key, pressed)
const KEY_SCRIPT: [(u64, Key, bool); 8] = [
    (0, Key::Up, true),
    (90, Key::Left, true),
    (150, Key::Left, false),
    (180, Key::Right, true),
    (210, Key::Right, false),
    (240, Key::Up, false),
    (240, Key::Down, true),
    (280, Key::Down, false),
];

fn main() {
    init_tracing();

    let mut application = match Application::new(GLOBAL_CONFIG.clone()) {
        Ok(application) => application,
        Err(e) => {
            error!(%e, "could not start client");
            std::process::exit(1);
        }
    };

    application.run(GLOBAL_CONFIG.demo_ticks, |tick| {
        KEY_SCRIPT
            .iter()
            .filter(|(at, _, _)| *at == tick)
            .map(|(_, key, pressed)| (*key, *pressed))
            .collect()
    });
}
