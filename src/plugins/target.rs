// Duck targets: waypoint flight, flee on time-up, hit acceptance and the death sequence.
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::plugins::config::{load_config, DuckConfig, GameConfig};
use crate::plugins::round::{HitReport, MissEvent, TargetEscaped};
use crate::plugins::scheduler::seconds;
use crate::plugins::session::Session;
use crate::plugins::shooting::ShotFired;

pub const DUCK_Z: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DuckStatus {
    Alive,
    /// Hangs in the air after the hit.
    Dying { pause: Timer },
    Falling { fall: Timer },
}

#[derive(Component, Debug, Clone)]
pub struct Duck {
    pub waypoint: Vec2,
    pub speed: f32,
    pub active_time: f32,
    pub fleeing: bool,
    pub status: DuckStatus,
}

/// What the owner should do with the duck after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckStep {
    Continue,
    /// Left the escape bounds on its own while still in play.
    Escaped,
    /// Death sequence finished or flight off-screen completed.
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuckAnim {
    #[default]
    Horizontal,
    Diagonal,
    Vertical,
    Dying,
    Falling,
}

/// Animation selector handed to the renderer; derived from motion only.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DuckPose {
    pub anim: DuckAnim,
    pub facing_left: bool,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUpEvent {
    pub target: Entity,
}

#[derive(Resource)]
pub struct DuckRng(pub StdRng);
impl Default for DuckRng {
    fn default() -> Self { Self(StdRng::from_entropy()) }
}

impl Duck {
    /// The first step retargets from the spawn point.
    pub fn new(spawn: Vec2, speed: f32, cfg: &DuckConfig) -> Self {
        Self {
            waypoint: spawn,
            speed,
            active_time: cfg.active_time,
            fleeing: false,
            status: DuckStatus::Alive,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == DuckStatus::Alive
    }

    pub fn step(&mut self, pos: &mut Vec2, dt: f32, cfg: &DuckConfig, rng: &mut impl Rng) -> DuckStep {
        match &mut self.status {
            DuckStatus::Alive => {
                if pos.distance(self.waypoint) > 0.0 {
                    *pos = move_towards(*pos, self.waypoint, self.speed * dt);
                } else if self.fleeing {
                    return DuckStep::Remove;
                } else {
                    self.retarget(cfg, rng);
                }
                if self.active_time > 0.0 {
                    self.active_time -= dt;
                }
                if !self.fleeing && !cfg.escape_bounds.contains(*pos) {
                    return DuckStep::Escaped;
                }
                DuckStep::Continue
            }
            DuckStatus::Dying { pause } => {
                pause.tick(seconds(dt));
                if pause.finished() {
                    self.status = DuckStatus::Falling {
                        fall: Timer::new(seconds(cfg.fall_duration), TimerMode::Once),
                    };
                }
                DuckStep::Continue
            }
            DuckStatus::Falling { fall } => {
                fall.tick(seconds(dt));
                pos.y -= cfg.fall_speed * dt;
                if fall.finished() {
                    DuckStep::Remove
                } else {
                    DuckStep::Continue
                }
            }
        }
    }

    /// Picks the next waypoint; a duck out of active time holds where it is.
    pub fn retarget(&mut self, cfg: &DuckConfig, rng: &mut impl Rng) {
        if !self.is_alive() || self.fleeing || self.active_time <= 0.0 {
            return;
        }
        let j = cfg.retarget_jitter.max(1);
        let offset = Vec2::new(rng.gen_range(-j..j) as f32, rng.gen_range(-j..j) as f32);
        self.waypoint = cfg.waypoint_bounds.clamp(self.waypoint + offset);
    }

    pub fn time_up(&mut self, pos: Vec2, cfg: &DuckConfig) {
        if !self.is_alive() || self.fleeing {
            return;
        }
        self.speed *= 2.0;
        self.waypoint = pos + Vec2::Y * cfg.flee_rise;
        self.fleeing = true;
    }

    /// True exactly once: the first hit flips the duck to dying.
    pub fn accept_hit(&mut self, cfg: &DuckConfig) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.status = DuckStatus::Dying {
            pause: Timer::new(seconds(cfg.death_pause), TimerMode::Once),
        };
        true
    }

    pub fn pose(&self, pos: Vec2) -> DuckPose {
        let dx = pos.x - self.waypoint.x;
        let dy = pos.y - self.waypoint.y;
        let anim = match self.status {
            DuckStatus::Falling { .. } => DuckAnim::Falling,
            DuckStatus::Dying { .. } => DuckAnim::Dying,
            DuckStatus::Alive if dx.abs() < 1.0 => DuckAnim::Vertical,
            DuckStatus::Alive if dy.abs() < 1.0 => DuckAnim::Horizontal,
            DuckStatus::Alive => DuckAnim::Diagonal,
        };
        DuckPose { anim, facing_left: dx > 0.0 }
    }
}

fn move_towards(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_step || dist == 0.0 {
        to
    } else {
        from + delta / dist * max_step
    }
}

pub fn duck_bundle(pos: Vec2, speed: f32, cfg: &DuckConfig) -> impl Bundle {
    (
        Duck::new(pos, speed, cfg),
        DuckPose::default(),
        SpatialBundle::from_transform(Transform::from_translation(pos.extend(DUCK_Z))),
        RigidBody::KinematicPositionBased,
        Collider::ball(cfg.collider_radius),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
    )
}

pub struct TargetPlugin;
impl Plugin for TargetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DuckRng>()
            .add_event::<TimeUpEvent>()
            .add_event::<ShotFired>()
            .add_event::<HitReport>()
            .add_event::<MissEvent>()
            .add_event::<TargetEscaped>()
            .add_event::<CollisionEvent>()
            .add_systems(Startup, seed_duck_rng.after(load_config))
            .add_systems(FixedUpdate, (resolve_shots, apply_time_up, move_ducks, retarget_on_contact).chain());
    }
}

fn seed_duck_rng(cfg: Option<Res<GameConfig>>, mut rng: ResMut<DuckRng>) {
    if let Some(seed) = cfg.and_then(|c| c.seed) {
        rng.0 = StdRng::seed_from_u64(seed.wrapping_add(1));
    }
}

/// Turns pointer shots into hit reports (first hit on a live duck) or misses (empty space).
pub fn resolve_shots(
    session: Res<Session>,
    cfg: Option<Res<GameConfig>>,
    mut shots: EventReader<ShotFired>,
    mut q: Query<&mut Duck>,
    mut ev_hit: EventWriter<HitReport>,
    mut ev_miss: EventWriter<MissEvent>,
) {
    if session.is_game_over() {
        shots.clear();
        return;
    }
    let duck_cfg = cfg.map(|c| c.duck.clone()).unwrap_or_default();
    for shot in shots.read() {
        let Some(target) = shot.target else {
            ev_miss.send(MissEvent { position: shot.position });
            continue;
        };
        match q.get_mut(target) {
            Ok(mut duck) => {
                if duck.accept_hit(&duck_cfg) {
                    ev_hit.send(HitReport { target });
                }
                // A second shot on a dying duck is neither a hit nor a miss.
            }
            Err(_) => {
                ev_miss.send(MissEvent { position: shot.position });
            }
        }
    }
}

pub fn apply_time_up(
    cfg: Option<Res<GameConfig>>,
    mut ev: EventReader<TimeUpEvent>,
    mut q: Query<(&Transform, &mut Duck)>,
) {
    let Some(cfg) = cfg else { ev.clear(); return; };
    for e in ev.read() {
        if let Ok((t, mut duck)) = q.get_mut(e.target) {
            duck.time_up(t.translation.truncate(), &cfg.duck);
        }
    }
}

pub fn move_ducks(
    mut commands: Commands,
    fixed: Res<Time<Fixed>>,
    cfg: Option<Res<GameConfig>>,
    session: Res<Session>,
    mut rng: ResMut<DuckRng>,
    mut q: Query<(Entity, &mut Transform, &mut Duck, &mut DuckPose)>,
    mut ev_escape: EventWriter<TargetEscaped>,
) {
    if session.is_game_over() {
        return; // everything freezes in place
    }
    let Some(cfg) = cfg else { return; };
    let dt = fixed.timestep().as_secs_f32();
    for (entity, mut t, mut duck, mut pose) in &mut q {
        let mut pos = t.translation.truncate();
        let step = duck.step(&mut pos, dt, &cfg.duck, &mut rng.0);
        t.translation = pos.extend(t.translation.z);
        let next_pose = duck.pose(pos);
        if *pose != next_pose {
            *pose = next_pose;
        }
        match step {
            DuckStep::Continue => {}
            DuckStep::Escaped => {
                ev_escape.send(TargetEscaped { target: entity });
                commands.entity(entity).despawn_recursive();
            }
            DuckStep::Remove => {
                commands.entity(entity).despawn_recursive();
            }
        }
    }
}

/// Ducks bumping into each other pick a fresh waypoint.
fn retarget_on_contact(
    cfg: Option<Res<GameConfig>>,
    mut rng: ResMut<DuckRng>,
    mut collisions: EventReader<CollisionEvent>,
    mut q: Query<&mut Duck>,
) {
    let Some(cfg) = cfg else { collisions.clear(); return; };
    for ev in collisions.read() {
        let CollisionEvent::Started(a, b, _) = ev else { continue; };
        for e in [*a, *b] {
            if let Ok(mut duck) = q.get_mut(e) {
                duck.retarget(&cfg.duck, &mut rng.0);
            }
        }
    }
}
