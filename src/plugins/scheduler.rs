// Cooperative deferred continuations ("wait N seconds, then resume") for the round controller.
//
// Every logical wait owns a slot holding one `TimerMode::Once` timer. Nothing here runs on its
// own: the owner ticks the timers once per fixed tick and drains finished slots one at a time, so a
// continuation cancelled by an earlier one in the same tick never fires.

use std::time::Duration;

use bevy::time::{Timer, TimerMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    SpawnDelay,
    RoundTimeout,
    Flash,
    ResolveDelay,
    Interstitial,
}

/// Cancellation handle for one scheduled continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    pub slot: TimerSlot,
    generation: u64,
}

#[derive(Debug, Clone)]
struct Pending {
    handle: TimerHandle,
    timer: Timer,
    // How far past its deadline a finished timer is; orders slots that finish in the same tick.
    overdue: Duration,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_generation: u64,
    pending: Vec<Pending>,
}

/// Seconds from config to a `Duration`. Negative and NaN become zero, values too large to
/// represent wait forever.
pub fn seconds(value: f32) -> Duration {
    if value.is_nan() || value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(value).unwrap_or(Duration::MAX)
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `slot` to fire `delay_seconds` from now, replacing whatever the slot held.
    pub fn schedule(&mut self, slot: TimerSlot, delay_seconds: f32) -> TimerHandle {
        self.pending.retain(|p| p.handle.slot != slot);
        let handle = TimerHandle { slot, generation: self.next_generation };
        self.next_generation += 1;
        self.pending.push(Pending {
            handle,
            timer: Timer::new(seconds(delay_seconds), TimerMode::Once),
            overdue: Duration::ZERO,
        });
        handle
    }

    /// Returns true if the handle was still live. Stale handles (already fired, replaced or
    /// cancelled) are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, slot: TimerSlot) -> bool {
        self.pending.iter().any(|p| p.handle.slot == slot)
    }

    #[cfg(test)]
    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn advance(&mut self, dt_seconds: f32) {
        let delta = seconds(dt_seconds);
        for p in &mut self.pending {
            if p.timer.finished() {
                p.overdue = p.overdue.saturating_add(delta);
                continue;
            }
            let remaining = p.timer.remaining();
            p.timer.tick(delta);
            if p.timer.finished() {
                p.overdue = delta.saturating_sub(remaining);
            }
        }
    }

    /// Pops the earliest due continuation. Equal deadlines fire in scheduling order.
    pub fn next_due(&mut self) -> Option<TimerSlot> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.timer.finished())
            .min_by_key(|(_, p)| (std::cmp::Reverse(p.overdue), p.handle.generation))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(idx).handle.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler) -> Vec<TimerSlot> {
        std::iter::from_fn(|| s.next_due()).collect()
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(TimerSlot::Interstitial, 2.0);
        s.schedule(TimerSlot::Flash, 0.25);
        s.schedule(TimerSlot::ResolveDelay, 1.0);
        s.advance(0.5);
        assert_eq!(drain(&mut s), vec![TimerSlot::Flash]);
        s.advance(2.0);
        assert_eq!(drain(&mut s), vec![TimerSlot::ResolveDelay, TimerSlot::Interstitial]);
        assert!(s.next_due().is_none());
    }

    #[test]
    fn rescheduling_a_slot_replaces_the_old_continuation() {
        let mut s = Scheduler::new();
        let first = s.schedule(TimerSlot::RoundTimeout, 1.0);
        let second = s.schedule(TimerSlot::RoundTimeout, 5.0);
        assert!(!s.is_live(first));
        assert!(s.is_live(second));
        s.advance(1.5);
        assert!(s.next_due().is_none(), "replaced timeout must not fire");
        s.advance(4.0);
        assert_eq!(s.next_due(), Some(TimerSlot::RoundTimeout));
    }

    #[test]
    fn stale_handle_cancel_is_a_no_op() {
        let mut s = Scheduler::new();
        let old = s.schedule(TimerSlot::Flash, 0.1);
        s.advance(0.2);
        assert_eq!(s.next_due(), Some(TimerSlot::Flash));
        let fresh = s.schedule(TimerSlot::Flash, 0.1);
        assert!(!s.cancel(old));
        assert!(s.is_live(fresh));
        assert!(s.cancel(fresh));
        assert!(!s.is_pending(TimerSlot::Flash));
    }

    #[test]
    fn cancel_between_pops_suppresses_later_due_slot() {
        let mut s = Scheduler::new();
        s.schedule(TimerSlot::ResolveDelay, 0.1);
        let timeout = s.schedule(TimerSlot::RoundTimeout, 0.2);
        s.advance(1.0);
        assert_eq!(s.next_due(), Some(TimerSlot::ResolveDelay));
        s.cancel(timeout);
        assert!(s.next_due().is_none());
    }

    #[test]
    fn equal_deadlines_keep_scheduling_order() {
        let mut s = Scheduler::new();
        s.schedule(TimerSlot::RoundTimeout, 1.0);
        s.schedule(TimerSlot::Flash, 1.0);
        s.advance(1.0);
        assert_eq!(drain(&mut s), vec![TimerSlot::RoundTimeout, TimerSlot::Flash]);
    }

    #[test]
    fn overflowing_delay_waits_instead_of_panicking() {
        let mut s = Scheduler::new();
        s.schedule(TimerSlot::RoundTimeout, f32::INFINITY);
        s.schedule(TimerSlot::Flash, f32::NAN);
        s.advance(1.0 / 60.0);
        assert_eq!(drain(&mut s), vec![TimerSlot::Flash]);
        s.advance(1.0e9);
        assert!(s.next_due().is_none());
        assert!(s.is_pending(TimerSlot::RoundTimeout));
    }

    #[test]
    fn config_seconds_are_clamped() {
        assert_eq!(seconds(-1.0), Duration::ZERO);
        assert_eq!(seconds(f32::NAN), Duration::ZERO);
        assert_eq!(seconds(f32::INFINITY), Duration::MAX);
        assert_eq!(seconds(0.25), Duration::from_millis(250));
    }
}
