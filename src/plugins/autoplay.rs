// Scripted player for unattended runs: shoots at ducks on a fixed cadence, sometimes misses.
use bevy::prelude::*;
use rand::Rng;

use crate::plugins::core_sim::{AutoConfig, AutoRuntime, LogState, SimState, TICK_HZ};
use crate::plugins::round::RoundController;
use crate::plugins::session::Session;
use crate::plugins::shooting::ShotFired;
use crate::plugins::target::{resolve_shots, Duck, DuckRng};

pub struct AutoplayPlugin;
impl Plugin for AutoplayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, (scripted_autoplay.before(resolve_shots), debug_log_each_second));
    }
}

fn scripted_autoplay(
    sim: Res<SimState>,
    session: Res<Session>,
    mut runtime: ResMut<AutoRuntime>,
    cfg: Res<AutoConfig>,
    mut rng: ResMut<DuckRng>,
    q_ducks: Query<(Entity, &Transform, &Duck)>,
    mut ev_shot: EventWriter<ShotFired>,
) {
    if session.is_game_over() || sim.tick < runtime.next_shot_tick { return; }
    let interval_ticks = ((cfg.shot_interval_seconds as f64 * TICK_HZ) as u64).max(1);
    runtime.next_shot_tick = sim.tick + interval_ticks;

    let live: Vec<(Entity, Vec2)> = q_ducks
        .iter()
        .filter(|(_, _, d)| d.is_alive())
        .map(|(e, t, _)| (e, t.translation.truncate()))
        .collect();
    if live.is_empty() { return; }

    let shot = if rng.0.gen::<f32>() < cfg.miss_chance {
        // Aim well below the play area so the point query finds nothing.
        ShotFired { position: Vec2::new(0.0, -50.0), target: None }
    } else {
        let (entity, pos) = live[rng.0.gen_range(0..live.len())];
        ShotFired { position: pos, target: Some(entity) }
    };
    info!("AUTOPLAY shot t={:.2}s tick={} pos=({:.2},{:.2}) target={:?}",
        sim.elapsed_seconds, sim.tick, shot.position.x, shot.position.y, shot.target);
    ev_shot.send(shot);
}

fn debug_log_each_second(
    sim: Res<SimState>,
    session: Res<Session>,
    controller: Option<Res<RoundController>>,
    mut log_state: ResMut<LogState>,
) {
    let per_second = TICK_HZ as u64;
    if sim.tick == 0 || sim.tick % per_second != 0 { return; }
    let current_second = sim.tick / per_second;
    if current_second == log_state.last_logged_second { return; }
    log_state.last_logged_second = current_second;
    let phase = controller.map(|c| c.phase());
    info!("T+{}s round={} phase={:?} live={} score={} hits={} lives={}",
        current_second, session.round(), phase, session.live_targets(),
        session.score(), session.hits(), session.lives());
}
