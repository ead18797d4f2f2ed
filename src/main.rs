use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use duck_hunt::prelude::*;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let args: Vec<String> = std::env::args().collect();
    let autoplay = args.iter().any(|a| a == "--autoplay");
    let runtime = args
        .iter()
        .position(|a| a == "--runtime")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse::<f32>().ok());

    let mut app = App::new();
    app.insert_resource(AutoConfig { run_duration_seconds: runtime, ..default() })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window { title: "Duck Hunt".into(), ..default() }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins(CoreSimPlugin)   // fixed tick + run limits
        .add_plugins(ConfigPlugin)    // assets/config/game.ron
        .add_plugins(RoundPlugin)     // session + round controller
        .add_plugins(TargetPlugin)    // duck motion & hit acceptance
        .add_plugins(ShootingPlugin)  // pointer -> ShotFired
        .add_plugins(ScenePlugin)     // camera & duck sprites
        .add_plugins(HudPlugin)       // score/lives text, banners, flash
        .add_plugins(GameAudioPlugin);
    if autoplay {
        app.add_plugins(AutoplayPlugin);
    }
    app.run();
}
