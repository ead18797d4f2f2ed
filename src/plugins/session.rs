// Session state for one game run: round, score, hits, lives and the round guards.
//
// Everything outside the round controller reads this resource; only the controller mutates it.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    round: u32,
    score: u32,
    hits: u32,
    lives: u32,
    live_targets: u32,
    round_over: bool,
    game_over: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Session {
    pub fn new(lives: u32) -> Self {
        Self {
            round: 1,
            score: 0,
            hits: 0,
            lives,
            live_targets: 0,
            round_over: false,
            game_over: lives == 0,
        }
    }

    pub fn round(&self) -> u32 { self.round }
    pub fn score(&self) -> u32 { self.score }
    pub fn hits(&self) -> u32 { self.hits }
    pub fn lives(&self) -> u32 { self.lives }
    pub fn live_targets(&self) -> u32 { self.live_targets }
    pub fn is_round_over(&self) -> bool { self.round_over }
    pub fn is_game_over(&self) -> bool { self.game_over }

    pub(crate) fn add_live_target(&mut self) {
        self.live_targets += 1;
    }

    /// Resolves one target. Saturates so a late report can never wrap the count.
    pub(crate) fn resolve_target(&mut self) {
        self.live_targets = self.live_targets.saturating_sub(1);
    }

    pub(crate) fn record_hit(&mut self, points: u32) {
        self.score += points;
        self.hits += 1;
    }

    /// Returns true when this was the last life.
    pub(crate) fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.game_over = true;
        }
        self.game_over
    }

    /// Claims the round for resolution. Only the first caller per round gets `true`.
    pub(crate) fn claim_round_end(&mut self) -> bool {
        if self.round_over {
            return false;
        }
        self.round_over = true;
        true
    }

    pub(crate) fn next_round(&mut self) {
        self.round += 1;
        self.live_targets = 0;
        self.round_over = false;
    }
}
