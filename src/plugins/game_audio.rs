use bevy::prelude::*;
use bevy::audio::{AudioSource, AudioBundle, PlaybackSettings, PlaybackMode, Volume};

use crate::plugins::round::{HitReport, RoundFeedback, RoundOutcome};
use crate::plugins::shooting::ShotFired;

pub struct GameAudioPlugin;

#[derive(Resource, Clone)]
struct SfxHandles {
    shot: Handle<AudioSource>,
    quack: Handle<AudioSource>,
    round_start: Handle<AudioSource>,
    round_clear: Handle<AudioSource>,
    round_fail: Handle<AudioSource>,
    game_over: Handle<AudioSource>,
}

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_audio_assets)
           .add_systems(Update, play_event_sfx);
    }
}

fn load_audio_assets(mut commands: Commands, assets: Res<AssetServer>) {
    // Expected files: assets/audio/{shot,quack,round_start,round_clear,round_fail,game_over}.mp3
    commands.insert_resource(SfxHandles {
        shot: assets.load("audio/shot.mp3"),
        quack: assets.load("audio/quack.mp3"),
        round_start: assets.load("audio/round_start.mp3"),
        round_clear: assets.load("audio/round_clear.mp3"),
        round_fail: assets.load("audio/round_fail.mp3"),
        game_over: assets.load("audio/game_over.mp3"),
    });
}

fn one_shot(commands: &mut Commands, source: &Handle<AudioSource>, volume: f32) {
    commands.spawn(AudioBundle {
        source: source.clone(),
        settings: PlaybackSettings {
            mode: PlaybackMode::Despawn,
            volume: Volume::new(volume),
            ..default()
        },
    });
}

fn play_event_sfx(
    sfx: Option<Res<SfxHandles>>,
    mut commands: Commands,
    mut ev_shot: EventReader<ShotFired>,
    mut ev_hit: EventReader<HitReport>,
    mut ev_round: EventReader<RoundFeedback>,
) {
    let Some(sfx) = sfx else { return; };

    for _ in ev_shot.read() {
        one_shot(&mut commands, &sfx.shot, 0.8);
    }
    for _ in ev_hit.read() {
        one_shot(&mut commands, &sfx.quack, 0.9);
    }
    for ev in ev_round.read() {
        match ev {
            RoundFeedback::RoundStarted { .. } => one_shot(&mut commands, &sfx.round_start, 0.6),
            RoundFeedback::Banner(Some(b)) => match b.outcome {
                RoundOutcome::Full | RoundOutcome::Partial => one_shot(&mut commands, &sfx.round_clear, 0.9),
                RoundOutcome::Failed => one_shot(&mut commands, &sfx.round_fail, 0.9),
            },
            RoundFeedback::GameOver { .. } => one_shot(&mut commands, &sfx.game_over, 1.0),
            _ => {}
        }
    }
}
