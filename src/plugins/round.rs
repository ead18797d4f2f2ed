// Round controller: spawn batch -> countdown -> resolve -> interstitial -> next round.
//
// The controller is plain data driven by `tick`; everything it needs from the engine goes through
// `RoundHost`. `RoundPlugin` wires it into the fixed tick with a Commands/EventWriter-backed host.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::plugins::config::{load_config, GameConfig, RoundConfig};
use crate::plugins::scheduler::{Scheduler, TimerHandle, TimerSlot};
use crate::plugins::session::Session;
use crate::plugins::target::{apply_time_up, duck_bundle, resolve_shots, TimeUpEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Spawning,
    CountingDown,
    Resolving,
    Interstitial,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Full,
    Partial,
    Failed,
}

impl RoundOutcome {
    pub fn classify(remaining: u32) -> Self {
        match remaining {
            0 => RoundOutcome::Full,
            1 => RoundOutcome::Partial,
            _ => RoundOutcome::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundBanner {
    pub round: u32,
    pub outcome: RoundOutcome,
    pub remaining: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Hit,
    Timeout,
}

/// Engine-side collaborators of the round controller.
pub trait RoundHost {
    fn spawn_point_count(&self) -> usize;
    /// Creates a target at the given spawn point and returns its handle.
    fn spawn_target(&mut self, spawn_point: usize, round: u32) -> Entity;
    fn despawn_target(&mut self, target: Entity);
    /// Forces every listed target into its flee behaviour.
    fn time_up(&mut self, targets: &[Entity]);
    fn flash(&mut self, flash: Option<Flash>);
    fn show_outcome(&mut self, banner: Option<RoundBanner>);
    fn game_over(&mut self, session: &Session);
}

// Events consumed by the controller (produced by targets and the shot resolver).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitReport {
    pub target: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MissEvent {
    pub position: Vec2,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetEscaped {
    pub target: Entity,
}

// Events emitted for presentation (hud, audio).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum RoundFeedback {
    RoundStarted { round: u32, targets: u32 },
    Flash(Option<Flash>),
    Banner(Option<RoundBanner>),
    GameOver { round: u32, score: u32, hits: u32 },
}

#[derive(Resource, Debug)]
pub struct RoundController {
    cfg: RoundConfig,
    phase: RoundPhase,
    scheduler: Scheduler,
    round_timeout: Option<TimerHandle>,
    registry: Vec<Entity>,
    rng: StdRng,
}

impl RoundController {
    pub fn new(cfg: RoundConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            cfg,
            phase: RoundPhase::Idle,
            scheduler: Scheduler::new(),
            round_timeout: None,
            registry: Vec::new(),
            rng,
        }
    }

    pub fn phase(&self) -> RoundPhase { self.phase }
    /// Targets spawned this round that have not been hit or escaped.
    pub fn active_targets(&self) -> &[Entity] { &self.registry }
    pub fn is_pending(&self, slot: TimerSlot) -> bool { self.scheduler.is_pending(slot) }

    pub fn start(&mut self, session: &mut Session) {
        if self.phase != RoundPhase::Idle {
            return;
        }
        if session.is_game_over() {
            self.phase = RoundPhase::GameOver;
            return;
        }
        info!("SESSION start lives={} round={}", session.lives(), session.round());
        self.enter_spawning();
    }

    /// A target accepted a hit. Returns false for handles not live in the current round.
    pub fn report_hit(&mut self, target: Entity, session: &mut Session, host: &mut impl RoundHost) -> bool {
        if session.is_game_over() || !self.unregister(target) {
            return false;
        }
        session.resolve_target();
        session.record_hit(self.cfg.points_per_hit);
        self.flash(Flash::Hit, host);
        if session.live_targets() == 0 {
            self.begin_resolve(session, "all hit");
        }
        true
    }

    /// Player clicked empty space. Only charged while the countdown runs.
    pub fn report_miss(&mut self, session: &mut Session, host: &mut impl RoundHost) -> bool {
        if self.phase != RoundPhase::CountingDown || session.is_game_over() {
            return false;
        }
        if session.lose_life() {
            self.enter_game_over(session, host);
        }
        true
    }

    /// A target left the play area on its own; counts as a miss and resolves that target.
    pub fn report_escape(&mut self, target: Entity, session: &mut Session, host: &mut impl RoundHost) -> bool {
        if session.is_game_over() || !self.unregister(target) {
            return false;
        }
        session.resolve_target();
        if session.lose_life() {
            self.enter_game_over(session, host);
            return true;
        }
        if session.live_targets() == 0 {
            self.begin_resolve(session, "escaped");
        }
        true
    }

    pub fn tick(&mut self, dt: f32, session: &mut Session, host: &mut impl RoundHost) {
        if self.phase == RoundPhase::GameOver {
            return;
        }
        self.scheduler.advance(dt);
        while let Some(slot) = self.scheduler.next_due() {
            match slot {
                TimerSlot::SpawnDelay => self.spawn_batch(session, host),
                TimerSlot::RoundTimeout => {
                    self.round_timeout = None;
                    self.on_timeout(session, host);
                }
                TimerSlot::Flash => host.flash(None),
                TimerSlot::ResolveDelay => self.show_outcome(session, host),
                TimerSlot::Interstitial => self.finish_round(session, host),
            }
            if self.phase == RoundPhase::GameOver {
                break;
            }
        }
    }

    fn unregister(&mut self, target: Entity) -> bool {
        match self.registry.iter().position(|e| *e == target) {
            Some(idx) => {
                self.registry.remove(idx);
                true
            }
            None => false,
        }
    }

    fn enter_spawning(&mut self) {
        self.phase = RoundPhase::Spawning;
        self.scheduler.schedule(TimerSlot::SpawnDelay, self.cfg.spawn_delay);
    }

    fn spawn_batch(&mut self, session: &mut Session, host: &mut impl RoundHost) {
        if session.is_game_over() {
            return;
        }
        let points = host.spawn_point_count();
        if points == 0 {
            warn!("ROUND {} spawn aborted: no spawn points configured", session.round());
            return;
        }
        for _ in 0..self.cfg.batch_size {
            let spawn_point = self.rng.gen_range(0..points);
            let target = host.spawn_target(spawn_point, session.round());
            self.registry.push(target);
            session.add_live_target();
        }
        self.phase = RoundPhase::CountingDown;
        // Only one countdown may be outstanding; `schedule` drops any previous one in the slot.
        self.round_timeout = Some(self.scheduler.schedule(TimerSlot::RoundTimeout, self.cfg.round_timeout));
        info!("ROUND start round={} targets={} lives={}", session.round(), session.live_targets(), session.lives());
    }

    fn on_timeout(&mut self, session: &mut Session, host: &mut impl RoundHost) {
        if session.is_round_over() {
            return;
        }
        host.time_up(&self.registry);
        self.flash(Flash::Timeout, host);
        if session.lose_life() {
            self.enter_game_over(session, host);
            return;
        }
        self.begin_resolve(session, "timeout");
    }

    /// Single writer for the round-end transition; the loser of a hit/timeout race is a no-op.
    fn begin_resolve(&mut self, session: &mut Session, cause: &str) {
        if !session.claim_round_end() {
            return;
        }
        if let Some(handle) = self.round_timeout.take() {
            self.scheduler.cancel(handle);
        }
        self.phase = RoundPhase::Resolving;
        self.scheduler.schedule(TimerSlot::ResolveDelay, self.cfg.resolve_delay);
        info!("ROUND resolve round={} cause={cause} remaining={}", session.round(), session.live_targets());
    }

    fn show_outcome(&mut self, session: &Session, host: &mut impl RoundHost) {
        let remaining = session.live_targets();
        let banner = RoundBanner {
            round: session.round(),
            outcome: RoundOutcome::classify(remaining),
            remaining,
        };
        info!("ROUND outcome round={} outcome={:?} remaining={}", banner.round, banner.outcome, remaining);
        host.show_outcome(Some(banner));
        self.phase = RoundPhase::Interstitial;
        self.scheduler.schedule(TimerSlot::Interstitial, self.cfg.interstitial);
    }

    fn finish_round(&mut self, session: &mut Session, host: &mut impl RoundHost) {
        host.show_outcome(None);
        for target in self.registry.drain(..) {
            host.despawn_target(target);
        }
        session.next_round();
        if session.is_game_over() {
            return;
        }
        self.enter_spawning();
    }

    fn flash(&mut self, flash: Flash, host: &mut impl RoundHost) {
        let hold = match flash {
            Flash::Hit => self.cfg.hit_pulse,
            Flash::Timeout => self.cfg.timeout_flash,
        };
        host.flash(Some(flash));
        self.scheduler.schedule(TimerSlot::Flash, hold);
    }

    fn enter_game_over(&mut self, session: &mut Session, host: &mut impl RoundHost) {
        self.phase = RoundPhase::GameOver;
        self.scheduler.cancel_all();
        self.round_timeout = None;
        host.flash(None);
        host.show_outcome(None);
        host.game_over(session);
        info!("GAME over round={} score={} hits={}", session.round(), session.score(), session.hits());
    }
}

// ---------------- Bevy wiring ----------------

pub struct RoundPlugin;
impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Session>()
            .add_event::<HitReport>()
            .add_event::<MissEvent>()
            .add_event::<TargetEscaped>()
            .add_event::<RoundFeedback>()
            .add_systems(Startup, start_session.after(load_config))
            .add_systems(FixedUpdate, run_round.after(resolve_shots).before(apply_time_up));
    }
}

fn start_session(mut commands: Commands, cfg: Option<Res<GameConfig>>, mut session: ResMut<Session>) {
    let cfg = cfg.map(|c| c.clone()).unwrap_or_default();
    *session = Session::new(cfg.round.starting_lives);
    let mut controller = RoundController::new(cfg.round.clone(), cfg.seed);
    controller.start(&mut session);
    commands.insert_resource(controller);
}

// Spawns/despawns go straight to Commands; notifications are buffered and flushed as events.
struct CommandHost<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    cfg: &'a GameConfig,
    time_up: Vec<TimeUpEvent>,
    feedback: Vec<RoundFeedback>,
}

impl RoundHost for CommandHost<'_, '_, '_> {
    fn spawn_point_count(&self) -> usize {
        self.cfg.spawn_points.len()
    }

    fn spawn_target(&mut self, spawn_point: usize, round: u32) -> Entity {
        let pos = self.cfg.spawn_points[spawn_point].to_vec2();
        let speed = self.cfg.duck.speed_for_round(round);
        self.commands.spawn(duck_bundle(pos, speed, &self.cfg.duck)).id()
    }

    fn despawn_target(&mut self, target: Entity) {
        // Hit and fled ducks may already have removed themselves.
        if let Some(entity) = self.commands.get_entity(target) {
            entity.despawn_recursive();
        }
    }

    fn time_up(&mut self, targets: &[Entity]) {
        self.time_up.extend(targets.iter().map(|&target| TimeUpEvent { target }));
    }

    fn flash(&mut self, flash: Option<Flash>) {
        self.feedback.push(RoundFeedback::Flash(flash));
    }

    fn show_outcome(&mut self, banner: Option<RoundBanner>) {
        self.feedback.push(RoundFeedback::Banner(banner));
    }

    fn game_over(&mut self, session: &Session) {
        self.feedback.push(RoundFeedback::GameOver {
            round: session.round(),
            score: session.score(),
            hits: session.hits(),
        });
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run_round(
    mut commands: Commands,
    fixed: Res<Time<Fixed>>,
    cfg: Option<Res<GameConfig>>,
    controller: Option<ResMut<RoundController>>,
    mut session: ResMut<Session>,
    mut ev_hit: EventReader<HitReport>,
    mut ev_escape: EventReader<TargetEscaped>,
    mut ev_miss: EventReader<MissEvent>,
    mut ev_time_up: EventWriter<TimeUpEvent>,
    mut ev_feedback: EventWriter<RoundFeedback>,
) {
    let (Some(mut controller), Some(cfg)) = (controller, cfg) else { return; };
    let dt = fixed.timestep().as_secs_f32();
    let phase_before = controller.phase();
    // Most ticks change nothing; only flag the session when it actually moved.
    let before = session.clone();
    let state = session.bypass_change_detection();

    let mut host = CommandHost {
        commands: &mut commands,
        cfg: &cfg,
        time_up: Vec::new(),
        feedback: Vec::new(),
    };

    // Reports are applied before timers so a same-tick hit on the last target wins the race.
    for ev in ev_hit.read() {
        controller.report_hit(ev.target, state, &mut host);
    }
    for ev in ev_escape.read() {
        if controller.report_escape(ev.target, state, &mut host) {
            info!("TARGET escaped entity={:?} lives={}", ev.target, state.lives());
        }
    }
    for ev in ev_miss.read() {
        if controller.report_miss(state, &mut host) {
            info!("SHOT miss pos=({:.2},{:.2}) lives={}", ev.position.x, ev.position.y, state.lives());
        }
    }
    controller.tick(dt, state, &mut host);

    let CommandHost { time_up, mut feedback, .. } = host;
    if phase_before == RoundPhase::Spawning && controller.phase() == RoundPhase::CountingDown {
        feedback.push(RoundFeedback::RoundStarted {
            round: state.round(),
            targets: state.live_targets(),
        });
    }
    let changed = *state != before;
    if changed {
        session.set_changed();
    }
    ev_time_up.send_batch(time_up);
    ev_feedback.send_batch(feedback);
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Default)]
    struct RecordingHost {
        spawn_points: usize,
        next_id: u32,
        spawned: Vec<(usize, u32, Entity)>,
        despawned: Vec<Entity>,
        time_up: Vec<Vec<Entity>>,
        flashes: Vec<Option<Flash>>,
        banners: Vec<RoundBanner>,
        game_overs: u32,
    }

    impl RecordingHost {
        fn with_points(spawn_points: usize) -> Self {
            Self { spawn_points, ..Default::default() }
        }
    }

    impl RoundHost for RecordingHost {
        fn spawn_point_count(&self) -> usize { self.spawn_points }
        fn spawn_target(&mut self, spawn_point: usize, round: u32) -> Entity {
            self.next_id += 1;
            let e = Entity::from_raw(self.next_id);
            self.spawned.push((spawn_point, round, e));
            e
        }
        fn despawn_target(&mut self, target: Entity) { self.despawned.push(target); }
        fn time_up(&mut self, targets: &[Entity]) { self.time_up.push(targets.to_vec()); }
        fn flash(&mut self, flash: Option<Flash>) { self.flashes.push(flash); }
        fn show_outcome(&mut self, banner: Option<RoundBanner>) {
            if let Some(b) = banner { self.banners.push(b); }
        }
        fn game_over(&mut self, _session: &Session) { self.game_overs += 1; }
    }

    struct Rig {
        ctrl: RoundController,
        session: Session,
        host: RecordingHost,
    }

    impl Rig {
        fn new() -> Self {
            let cfg = RoundConfig::default();
            let mut session = Session::new(cfg.starting_lives);
            let mut ctrl = RoundController::new(cfg, Some(7));
            ctrl.start(&mut session);
            Self { ctrl, session, host: RecordingHost::with_points(4) }
        }

        fn run(&mut self, seconds: f32) {
            let steps = (seconds / DT).round() as usize;
            for _ in 0..steps {
                self.ctrl.tick(DT, &mut self.session, &mut self.host);
            }
        }

        fn hit(&mut self, e: Entity) -> bool {
            self.ctrl.report_hit(e, &mut self.session, &mut self.host)
        }

        fn miss(&mut self) -> bool {
            self.ctrl.report_miss(&mut self.session, &mut self.host)
        }

        fn targets(&self) -> Vec<Entity> {
            self.ctrl.active_targets().to_vec()
        }
    }

    #[test]
    fn spawns_a_batch_after_the_lead_in() {
        let mut rig = Rig::new();
        assert_eq!(rig.ctrl.phase(), RoundPhase::Spawning);
        rig.run(0.5);
        assert!(rig.host.spawned.is_empty());
        rig.run(0.6);
        assert_eq!(rig.ctrl.phase(), RoundPhase::CountingDown);
        assert_eq!(rig.session.live_targets(), 2);
        assert_eq!(rig.host.spawned.len(), 2);
        assert!(rig.host.spawned.iter().all(|(p, round, _)| *p < 4 && *round == 1));
        assert!(rig.ctrl.is_pending(TimerSlot::RoundTimeout));
    }

    #[test]
    fn hitting_every_target_resolves_early_and_cancels_the_timeout() {
        let mut rig = Rig::new();
        assert_eq!((rig.session.lives(), rig.session.score(), rig.session.round()), (3, 0, 1));
        rig.run(1.1);
        for e in rig.targets() {
            assert!(rig.hit(e));
        }
        assert_eq!(rig.ctrl.phase(), RoundPhase::Resolving);
        assert!(!rig.ctrl.is_pending(TimerSlot::RoundTimeout));
        assert_eq!((rig.session.score(), rig.session.hits()), (20, 2));

        rig.run(1.1);
        assert_eq!(rig.ctrl.phase(), RoundPhase::Interstitial);
        assert_eq!(rig.host.banners, vec![RoundBanner { round: 1, outcome: RoundOutcome::Full, remaining: 0 }]);

        rig.run(2.1);
        assert_eq!(rig.session.round(), 2);
        assert_eq!(rig.ctrl.phase(), RoundPhase::Spawning);

        // Well past where round 1's timeout would have fired.
        rig.run(7.0);
        assert_eq!(rig.session.lives(), 3);
        assert_eq!(rig.ctrl.phase(), RoundPhase::CountingDown);
        assert_eq!(rig.session.live_targets(), 2);
        assert!(rig.host.time_up.is_empty());
    }

    #[test]
    fn timeout_with_both_alive_costs_one_life_and_fails_the_round() {
        let mut rig = Rig::new();
        rig.run(11.1);
        assert_eq!(rig.session.lives(), 2);
        assert_eq!(rig.host.time_up.len(), 1);
        assert_eq!(rig.host.time_up[0].len(), 2);
        assert_eq!(rig.host.flashes.first(), Some(&Some(Flash::Timeout)));
        assert_eq!(rig.ctrl.phase(), RoundPhase::Resolving);

        rig.run(1.0);
        assert_eq!(rig.host.banners[0].outcome, RoundOutcome::Failed);
        assert_eq!(rig.host.banners[0].remaining, 2);

        rig.run(2.0);
        assert_eq!(rig.session.round(), 2);
        assert_eq!(rig.session.live_targets(), 0);
        assert_eq!(rig.host.despawned.len(), 2, "leftover targets are swept");
        assert!(!rig.session.is_round_over());
    }

    #[test]
    fn timeout_with_one_left_is_partial() {
        let mut rig = Rig::new();
        rig.run(1.1);
        let first = rig.targets()[0];
        assert!(rig.hit(first));
        rig.run(11.0);
        assert_eq!(rig.session.lives(), 2);
        assert_eq!(rig.host.banners[0].outcome, RoundOutcome::Partial);
        assert_eq!(rig.host.time_up[0].len(), 1);
    }

    #[test]
    fn last_hit_before_timeout_wins_the_race() {
        let mut rig = Rig::new();
        rig.run(1.1);
        let targets = rig.targets();
        rig.hit(targets[0]);
        rig.run(9.85);
        assert!(rig.ctrl.is_pending(TimerSlot::RoundTimeout));
        // Hit lands in the tick the timeout becomes due; reports go first.
        rig.hit(targets[1]);
        rig.run(0.1);
        assert_eq!(rig.session.lives(), 3);
        assert!(rig.host.time_up.is_empty());
        rig.run(1.0);
        assert_eq!(rig.host.banners[0].outcome, RoundOutcome::Full);
    }

    #[test]
    fn timeout_before_last_hit_keeps_a_single_resolution() {
        let mut rig = Rig::new();
        rig.run(1.1);
        let targets = rig.targets();
        rig.hit(targets[0]);
        rig.run(10.0);
        assert_eq!(rig.ctrl.phase(), RoundPhase::Resolving);
        assert_eq!(rig.session.lives(), 2);

        // The fleeing target is still clickable; it scores but cannot end the round again.
        assert!(rig.hit(targets[1]));
        assert_eq!(rig.session.score(), 20);
        assert_eq!(rig.ctrl.phase(), RoundPhase::Resolving);

        rig.run(1.1);
        assert_eq!(rig.host.banners.len(), 1);
        assert_eq!(rig.host.banners[0].outcome, RoundOutcome::Full);
        assert_eq!(rig.session.lives(), 2);
    }

    #[test]
    fn second_hit_report_is_rejected() {
        let mut rig = Rig::new();
        rig.run(1.1);
        let e = rig.targets()[0];
        assert!(rig.hit(e));
        assert!(!rig.hit(e));
        assert_eq!((rig.session.score(), rig.session.hits()), (10, 1));
        assert_eq!(rig.session.live_targets(), 1);
    }

    #[test]
    fn miss_costs_a_life_without_ending_the_round() {
        let mut rig = Rig::new();
        assert!(!rig.miss(), "no charge before targets are up");
        rig.run(1.1);
        assert!(rig.miss());
        assert_eq!(rig.session.lives(), 2);
        assert_eq!(rig.ctrl.phase(), RoundPhase::CountingDown);
        assert!(rig.ctrl.is_pending(TimerSlot::RoundTimeout));
    }

    #[test]
    fn losing_the_last_life_to_a_miss_is_terminal() {
        let mut rig = Rig::new();
        rig.run(1.1);
        rig.miss();
        rig.miss();
        assert_eq!(rig.session.lives(), 1);
        assert!(rig.miss());
        assert_eq!(rig.session.lives(), 0);
        assert!(rig.session.is_game_over());
        assert_eq!(rig.ctrl.phase(), RoundPhase::GameOver);
        assert_eq!(rig.host.game_overs, 1);

        let before = rig.session.clone();
        assert!(!rig.miss());
        let e = rig.targets()[0];
        assert!(!rig.hit(e));
        rig.run(30.0);
        assert_eq!(rig.session, before);
        assert_eq!(rig.host.spawned.len(), 2);
        assert!(rig.host.time_up.is_empty());
        assert!(rig.host.banners.is_empty());
    }

    #[test]
    fn timeout_on_last_life_skips_resolution() {
        let mut rig = Rig::new();
        rig.run(1.1);
        rig.miss();
        rig.miss();
        rig.run(10.0);
        assert!(rig.session.is_game_over());
        assert_eq!(rig.host.time_up.len(), 1);
        rig.run(20.0);
        assert!(rig.host.banners.is_empty());
        assert_eq!(rig.host.spawned.len(), 2);
        assert_eq!(rig.session.round(), 1);
    }

    #[test]
    fn escape_counts_as_a_miss_and_resolves_the_target() {
        let mut rig = Rig::new();
        rig.run(1.1);
        let targets = rig.targets();
        assert!(rig.ctrl.report_escape(targets[0], &mut rig.session, &mut rig.host));
        assert_eq!((rig.session.lives(), rig.session.live_targets()), (2, 1));
        assert!(!rig.ctrl.report_escape(targets[0], &mut rig.session, &mut rig.host));

        assert!(rig.hit(targets[1]));
        assert_eq!(rig.ctrl.phase(), RoundPhase::Resolving);
        assert!(!rig.ctrl.is_pending(TimerSlot::RoundTimeout));
    }

    #[test]
    fn missing_spawn_points_stall_the_round() {
        let mut rig = Rig::new();
        rig.host.spawn_points = 0;
        rig.run(30.0);
        assert_eq!(rig.ctrl.phase(), RoundPhase::Spawning);
        assert!(rig.host.spawned.is_empty());
        assert!(!rig.ctrl.is_pending(TimerSlot::RoundTimeout));
        assert_eq!(rig.session.lives(), 3);
    }

    #[test]
    fn later_rounds_spawn_with_their_round_number() {
        let mut rig = Rig::new();
        rig.run(1.1);
        for e in rig.targets() {
            rig.hit(e);
        }
        rig.run(4.2);
        let rounds: Vec<u32> = rig.host.spawned.iter().map(|(_, r, _)| *r).collect();
        assert_eq!(rounds, vec![1, 1, 2, 2]);
    }

    #[test]
    fn hit_pulse_is_cleared_after_its_hold() {
        let mut rig = Rig::new();
        rig.run(1.1);
        let e = rig.targets()[0];
        rig.hit(e);
        assert_eq!(rig.host.flashes, vec![Some(Flash::Hit)]);
        rig.run(0.2);
        assert_eq!(rig.host.flashes, vec![Some(Flash::Hit), None]);
    }
}
