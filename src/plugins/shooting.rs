// Shooting: pointer/touch input -> world point -> physics point query -> ShotFired.
//
// Whether a shot is a hit or a miss is decided in the fixed tick (target::resolve_shots); this
// module only reports where the player fired and which duck, if any, was under the pointer.

use bevy::prelude::*;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;

use crate::plugins::scene::GameCamera;
use crate::plugins::session::Session;
use crate::plugins::target::Duck;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ShotFired {
    pub position: Vec2,
    pub target: Option<Entity>,
}

/// Screen-space presses gathered this frame, consumed by `handle_shot_input`.
#[derive(Resource, Default, Debug)]
pub struct PointerPresses(pub Vec<Vec2>);

pub struct ShootingPlugin;
impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShotFired>()
            .init_resource::<PointerPresses>()
            .add_systems(Update, (collect_pointer_presses, handle_shot_input).chain());
    }
}

fn collect_pointer_presses(
    buttons: Res<ButtonInput<MouseButton>>,
    mut ev_touch: EventReader<TouchInput>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut presses: ResMut<PointerPresses>,
) {
    presses.0.extend(
        ev_touch
            .read()
            .filter(|ev| ev.phase == TouchPhase::Started)
            .map(|ev| ev.position),
    );
    if buttons.just_pressed(MouseButton::Left) {
        if let Some(cursor) = q_window.get_single().ok().and_then(|w| w.cursor_position()) {
            presses.0.push(cursor);
        }
    }
}

fn handle_shot_input(
    mut presses: ResMut<PointerPresses>,
    session: Res<Session>,
    q_cam: Query<(&Camera, &GlobalTransform), With<GameCamera>>,
    rapier: Option<Res<RapierContext>>,
    q_duck: Query<&Duck>,
    mut ev_shot: EventWriter<ShotFired>,
) {
    // Presses are dropped, not deferred, while there is no camera or the game is over.
    let screen_points = std::mem::take(&mut presses.0);
    let Ok((camera, cam_t)) = q_cam.get_single() else { return; };
    if session.is_game_over() || screen_points.is_empty() {
        return;
    }

    for screen in screen_points {
        let Some(world) = camera.viewport_to_world_2d(cam_t, screen) else { continue; };
        let target = rapier
            .as_deref()
            .and_then(|ctx| duck_under_point(ctx, world, &q_duck));
        ev_shot.send(ShotFired { position: world, target });
    }
}

fn duck_under_point(ctx: &RapierContext, point: Vec2, q_duck: &Query<&Duck>) -> Option<Entity> {
    let mut hits = Vec::new();
    ctx.intersections_with_point(point, QueryFilter::default(), |entity| {
        if let Ok(duck) = q_duck.get(entity) {
            hits.push((entity, duck.is_alive()));
        }
        true
    });
    pick_target(hits)
}

/// Picks the first live duck among overlapping hits, falling back to the first dying one.
pub fn pick_target(hits: impl IntoIterator<Item = (Entity, bool)>) -> Option<Entity> {
    let mut fallback = None;
    for (entity, alive) in hits {
        if alive {
            return Some(entity);
        }
        fallback.get_or_insert(entity);
    }
    fallback
}
