use bevy::prelude::*;
use bevy::app::AppExit;
use bevy::time::Fixed;

use crate::plugins::session::Session;

pub const TICK_HZ: f64 = 60.0;

// Core simulation timing & run limits.
#[derive(Resource, Default, Debug)]
pub struct SimState {
    pub tick: u64,
    pub elapsed_seconds: f32,
}
impl SimState {
    pub fn advance_fixed(&mut self) {
        self.tick += 1;
        self.elapsed_seconds = self.tick as f32 / TICK_HZ as f32;
    }
}

#[derive(Resource, Debug, Clone)]
pub struct AutoConfig {
    pub run_duration_seconds: Option<f32>, // exit after this much simulated time
    pub shot_interval_seconds: f32,
    pub miss_chance: f32,
}
impl Default for AutoConfig {
    fn default() -> Self {
        Self { run_duration_seconds: None, shot_interval_seconds: 1.5, miss_chance: 0.2 }
    }
}

#[derive(Resource, Default)]
pub struct AutoRuntime { pub next_shot_tick: u64 }
#[derive(Resource, Default)]
pub struct LogState { pub last_logged_second: u64 }

#[derive(Resource, Default)]
pub struct ExitState { pub triggered: bool }

pub struct CoreSimPlugin;
impl Plugin for CoreSimPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimState::default())
            .init_resource::<AutoConfig>() // respect pre-inserted AutoConfig (e.g. from --runtime flag)
            .insert_resource(AutoRuntime::default())
            .insert_resource(LogState::default())
            .insert_resource(ExitState::default())
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .add_systems(FixedUpdate, tick_state)
            .add_systems(Update, exit_after_runtime);
    }
}

fn tick_state(mut sim: ResMut<SimState>, session: Option<Res<Session>>) {
    if let Some(session) = session {
        if session.is_game_over() {
            return; // freeze simulation timing after game over
        }
    }
    sim.advance_fixed();
}

fn exit_after_runtime(
    sim: Res<SimState>,
    auto: Res<AutoConfig>,
    session: Option<Res<Session>>,
    mut exit_state: ResMut<ExitState>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if exit_state.triggered { return; }
    let Some(limit) = auto.run_duration_seconds else { return; };
    let game_over = session.is_some_and(|s| s.is_game_over());
    if sim.elapsed_seconds >= limit || game_over {
        info!("EXIT runtime reached seconds={} game_over={game_over}", sim.elapsed_seconds);
        exit_state.triggered = true;
        ev_exit.send(AppExit::Success);
    }
}
