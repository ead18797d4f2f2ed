//! Convenience re-exports for frequently used types & plugins.
pub use crate::plugins::core_sim::{SimState, AutoConfig, AutoRuntime, LogState, CoreSimPlugin};
pub use crate::plugins::config::{ConfigPlugin, GameConfig, RoundConfig, DuckConfig, Vec2Def, RectDef};
pub use crate::plugins::scheduler::{Scheduler, TimerSlot, TimerHandle};
pub use crate::plugins::session::Session;
pub use crate::plugins::round::{
    RoundPlugin, RoundController, RoundHost, RoundPhase, RoundOutcome, RoundBanner, Flash,
    RoundFeedback, HitReport, MissEvent, TargetEscaped,
};
pub use crate::plugins::target::{TargetPlugin, Duck, DuckStatus, DuckStep, DuckPose, DuckAnim, DuckRng, TimeUpEvent};
pub use crate::plugins::shooting::{ShootingPlugin, ShotFired};
pub use crate::plugins::autoplay::AutoplayPlugin;
pub use crate::plugins::scene::{ScenePlugin, GameCamera};
pub use crate::plugins::hud::{HudPlugin, Hud};
pub use crate::plugins::game_audio::GameAudioPlugin;
