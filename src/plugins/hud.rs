use bevy::prelude::*;

use crate::plugins::round::{Flash, RoundFeedback, RoundOutcome};
use crate::plugins::session::Session;

#[derive(Component)]
pub struct Hud;

#[derive(Component)]
pub struct Banner;

pub const SKY_BLUE: Color = Color::srgb(0.36, 0.58, 0.99);
const TIMEOUT_RED: Color = Color::srgb(0.85, 0.15, 0.12);
const HIT_PULSE: Color = Color::srgb(0.55, 0.72, 1.0);

pub struct HudPlugin;
impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SKY_BLUE))
            .add_systems(Startup, spawn_hud)
            .add_systems(Update, (update_hud, apply_round_feedback));
    }
}

fn spawn_hud(mut commands: Commands, assets: Res<AssetServer>) {
    let font = assets.load("fonts/FiraSans-Bold.ttf");
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle { font: font.clone(), font_size: 24.0, color: Color::WHITE },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(8.0),
            ..default()
        }),
        Hud,
    ));
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle { font, font_size: 48.0, color: Color::srgb(1.0, 0.95, 0.4) },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Percent(40.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_text_justify(JustifyText::Center),
        Banner,
    ));
}

pub fn hud_line(session: &Session) -> String {
    format!(
        "Round: {} | Score: {} | Hits: {} | Lives: {}",
        session.round(),
        session.score(),
        session.hits(),
        session.lives()
    )
}

fn update_hud(session: Res<Session>, mut q_text: Query<&mut Text, With<Hud>>) {
    if !session.is_changed() {
        return;
    }
    if let Ok(mut text) = q_text.get_single_mut() {
        text.sections[0].value = hud_line(&session);
    }
}

fn apply_round_feedback(
    mut ev: EventReader<RoundFeedback>,
    mut clear: ResMut<ClearColor>,
    mut q_banner: Query<&mut Text, (With<Banner>, Without<Hud>)>,
) {
    for feedback in ev.read() {
        match *feedback {
            RoundFeedback::Flash(flash) => {
                clear.0 = match flash {
                    Some(Flash::Hit) => HIT_PULSE,
                    Some(Flash::Timeout) => TIMEOUT_RED,
                    None => SKY_BLUE,
                };
            }
            RoundFeedback::Banner(banner) => {
                let msg = match banner.map(|b| b.outcome) {
                    Some(RoundOutcome::Full) => "Got 'em all!".to_string(),
                    Some(RoundOutcome::Partial) => "One got away".to_string(),
                    Some(RoundOutcome::Failed) => "Missed!".to_string(),
                    None => String::new(),
                };
                if let Ok(mut text) = q_banner.get_single_mut() {
                    text.sections[0].value = msg;
                }
            }
            RoundFeedback::GameOver { round, score, hits } => {
                clear.0 = SKY_BLUE;
                if let Ok(mut text) = q_banner.get_single_mut() {
                    text.sections[0].value = format!("GAME OVER\nRound {round} | Score {score} | Hits {hits}");
                }
            }
            RoundFeedback::RoundStarted { .. } => {}
        }
    }
}
