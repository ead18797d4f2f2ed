// World setup (camera, ground strip) and duck sprite presentation.
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use crate::plugins::target::{Duck, DuckAnim, DuckPose};

/// Marker for the gameplay camera used for pointer -> world conversion.
#[derive(Component)]
pub struct GameCamera;

#[derive(Resource, Clone)]
struct DuckSprites {
    horizontal: Handle<Image>,
    diagonal: Handle<Image>,
    vertical: Handle<Image>,
    dying: Handle<Image>,
    falling: Handle<Image>,
}

impl DuckSprites {
    fn for_anim(&self, anim: DuckAnim) -> Handle<Image> {
        match anim {
            DuckAnim::Horizontal => self.horizontal.clone(),
            DuckAnim::Diagonal => self.diagonal.clone(),
            DuckAnim::Vertical => self.vertical.clone(),
            DuckAnim::Dying => self.dying.clone(),
            DuckAnim::Falling => self.falling.clone(),
        }
    }
}

const DUCK_SPRITE_SIZE: f32 = 1.4;
const VIEW_HEIGHT: f32 = 14.0;
const VIEW_CENTER: Vec2 = Vec2::new(4.0, 1.5);

pub struct ScenePlugin;
impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_scene, load_duck_sprites))
            .add_systems(Update, (attach_duck_visuals, update_duck_sprites).chain());
    }
}

fn spawn_scene(mut commands: Commands) {
    let mut cam = Camera2dBundle::default();
    cam.projection.scaling_mode = ScalingMode::FixedVertical(VIEW_HEIGHT);
    cam.transform.translation.x = VIEW_CENTER.x;
    cam.transform.translation.y = VIEW_CENTER.y;
    commands.spawn((cam, GameCamera));

    // Grass strip in front of the ducks so spawns appear to rise out of it.
    commands.spawn(SpriteBundle {
        sprite: Sprite {
            color: Color::srgb(0.22, 0.55, 0.18),
            custom_size: Some(Vec2::new(40.0, 3.0)),
            ..default()
        },
        transform: Transform::from_xyz(VIEW_CENTER.x, -4.5, 5.0),
        ..default()
    });
}

fn load_duck_sprites(mut commands: Commands, assets: Res<AssetServer>) {
    commands.insert_resource(DuckSprites {
        horizontal: assets.load("sprites/duck_fly_horizontal.png"),
        diagonal: assets.load("sprites/duck_fly_diagonal.png"),
        vertical: assets.load("sprites/duck_fly_vertical.png"),
        dying: assets.load("sprites/duck_hit.png"),
        falling: assets.load("sprites/duck_fall.png"),
    });
}

fn attach_duck_visuals(
    mut commands: Commands,
    sprites: Option<Res<DuckSprites>>,
    q_new: Query<(Entity, &DuckPose), Added<Duck>>,
) {
    let Some(sprites) = sprites else { return; };
    for (entity, pose) in &q_new {
        commands.entity(entity).insert((
            Sprite {
                custom_size: Some(Vec2::splat(DUCK_SPRITE_SIZE)),
                flip_x: pose.facing_left,
                ..default()
            },
            sprites.for_anim(pose.anim),
        ));
    }
}

fn update_duck_sprites(
    sprites: Option<Res<DuckSprites>>,
    mut q: Query<(&DuckPose, &mut Sprite, &mut Handle<Image>), Changed<DuckPose>>,
) {
    let Some(sprites) = sprites else { return; };
    for (pose, mut sprite, mut image) in &mut q {
        sprite.flip_x = pose.facing_left;
        *image = sprites.for_anim(pose.anim);
    }
}
