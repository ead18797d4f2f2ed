// Game configuration (RON): round timings, duck tuning and spawn points.
use bevy::prelude::*;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;

pub const CONFIG_PATH: &str = "assets/config/game.ron";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Vec2Def { pub x: f32, pub y: f32 }
impl Vec2Def { pub fn to_vec2(self) -> Vec2 { Vec2::new(self.x, self.y) } }

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct RectDef { pub min: Vec2Def, pub max: Vec2Def }
impl RectDef {
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min.to_vec2(), self.max.to_vec2())
    }
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Round pacing and scoring. All durations are seconds of simulated time.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RoundConfig {
    pub batch_size: u32,
    pub starting_lives: u32,
    pub points_per_hit: u32,
    pub spawn_delay: f32,
    pub round_timeout: f32,
    pub timeout_flash: f32,
    pub hit_pulse: f32,
    pub resolve_delay: f32,
    pub interstitial: f32,
}
impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            batch_size: 2,
            starting_lives: 3,
            points_per_hit: 10,
            spawn_delay: 1.0,
            round_timeout: 10.0,
            timeout_flash: 0.25,
            hit_pulse: 0.15,
            resolve_delay: 1.0,
            interstitial: 2.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DuckConfig {
    pub base_speed: f32,
    pub speed_step: f32, // added per round after the first
    pub max_speed: f32,
    pub active_time: f32,
    pub retarget_jitter: i32, // waypoint offsets drawn from [-jitter, jitter)
    pub waypoint_bounds: RectDef,
    pub escape_bounds: RectDef,
    pub flee_rise: f32,
    pub death_pause: f32,
    pub fall_speed: f32,
    pub fall_duration: f32,
    pub collider_radius: f32,
}
impl Default for DuckConfig {
    fn default() -> Self {
        Self {
            base_speed: 3.0,
            speed_step: 0.5,
            max_speed: 8.0,
            active_time: 10.0,
            retarget_jitter: 12,
            waypoint_bounds: RectDef { min: Vec2Def { x: -7.0, y: -2.0 }, max: Vec2Def { x: 15.0, y: 6.0 } },
            escape_bounds: RectDef { min: Vec2Def { x: -10.0, y: -5.0 }, max: Vec2Def { x: 18.0, y: 9.0 } },
            flee_rise: 20.0,
            death_pause: 0.4,
            fall_speed: 10.0,
            fall_duration: 3.0,
            collider_radius: 0.6,
        }
    }
}
impl DuckConfig {
    pub fn speed_for_round(&self, round: u32) -> f32 {
        let extra = round.saturating_sub(1) as f32 * self.speed_step;
        (self.base_speed + extra).min(self.max_speed.max(self.base_speed))
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub round: RoundConfig,
    pub duck: DuckConfig,
    pub spawn_points: Vec<Vec2Def>,
    pub seed: Option<u64>,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round: RoundConfig::default(),
            duck: DuckConfig::default(),
            spawn_points: vec![
                Vec2Def { x: -4.0, y: -3.5 },
                Vec2Def { x: 0.0, y: -3.5 },
                Vec2Def { x: 4.0, y: -3.5 },
                Vec2Def { x: 8.0, y: -3.5 },
            ],
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str::<GameConfig>(data)
    }
}

pub struct ConfigPlugin;
impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_config);
    }
}

pub fn load_config(mut commands: Commands, existing: Option<Res<GameConfig>>) {
    if existing.is_some() {
        return; // pre-inserted config (tests, tooling) wins
    }

    #[cfg(target_arch = "wasm32")]
    {
        let data = include_str!("../../assets/config/game.ron");
        let cfg = match GameConfig::from_ron(data) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Failed to parse embedded config: {e}");
                GameConfig::default()
            }
        };
        commands.insert_resource(cfg);
        return;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let cfg = match fs::read_to_string(CONFIG_PATH) {
            Ok(data) => match GameConfig::from_ron(&data) {
                Ok(cfg) => {
                    info!("CONFIG loaded path={CONFIG_PATH} spawn_points={}", cfg.spawn_points.len());
                    cfg
                }
                Err(e) => {
                    error!("Failed to parse {CONFIG_PATH}: {e}");
                    GameConfig::default()
                }
            },
            Err(e) => {
                error!("Failed to read config file {CONFIG_PATH}: {e}");
                GameConfig::default()
            }
        };
        commands.insert_resource(cfg);
    }
}
