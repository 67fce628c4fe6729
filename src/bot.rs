//! Scripted cleaner that plays a simulated session with seeded randomness.

use log::debug;
use rand::Rng;

use crate::cleaning::CleaningState;
use crate::common::CleaningError;
use crate::results::CleaningResults;
use crate::session::CleaningSession;
use crate::timer::Tick;

/// What the bot did on a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Brush(f32),
    Chip(f32),
    Defuse(usize),
    Detonate(usize),
    NextRock,
    Wait,
}

/// Per-second rates driving the bot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleaningBot {
    /// Exposure uncovered per second of brushing.
    pub brush_rate: f32,
    /// Chance per frame of a careless stroke that damages the fossil.
    pub chip_chance: f64,
    pub chip_damage: f32,
    /// Chance per frame of reaching an armed mine.
    pub mine_chance: f64,
    /// Chance that a reached mine is defused rather than set off.
    pub defuse_chance: f64,
}

impl Default for CleaningBot {
    fn default() -> Self {
        Self {
            brush_rate: 0.12,
            chip_chance: 0.02,
            chip_damage: 0.2,
            mine_chance: 0.01,
            defuse_chance: 0.8,
        }
    }
}

impl CleaningBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick an action for a frame lasting `dt` seconds.
    pub fn choose<R: Rng>(&self, session: &CleaningSession, rng: &mut R, dt: f32) -> Action {
        if session.state() == CleaningState::Won && session.timer().current_time_left() > 0.0 {
            return Action::NextRock;
        }
        if !session.is_running() {
            return Action::Wait;
        }
        if rng.random_bool(self.mine_chance) {
            let armed: Vec<usize> = session.mines().armed().map(|m| m.id).collect();
            if !armed.is_empty() {
                let id = armed[rng.random_range(0..armed.len())];
                return if rng.random_bool(self.defuse_chance) {
                    Action::Defuse(id)
                } else {
                    Action::Detonate(id)
                };
            }
        }
        if rng.random_bool(self.chip_chance) {
            return Action::Chip(self.chip_damage);
        }
        Action::Brush(self.brush_rate * dt)
    }

    /// Play one frame: act, then advance the clock.
    pub fn step<R: Rng>(
        &self,
        session: &mut CleaningSession,
        rng: &mut R,
        dt: f32,
    ) -> Result<(Action, Tick), CleaningError> {
        let action = self.choose(session, rng, dt);
        match action {
            Action::Brush(amount) => session.expose(amount),
            Action::Chip(amount) => session.damage(amount),
            Action::Defuse(id) => session.defuse_mine(id)?,
            Action::Detonate(id) => session.detonate_mine(id)?,
            Action::NextRock => session.next_rock()?,
            Action::Wait => {}
        }
        let tick = session.advance(dt);
        debug!("{:?} -> {:?}", action, tick);
        Ok((action, tick))
    }

    /// Play until the clock runs out, the fossil breaks, or `max_frames` pass.
    pub fn play<R: Rng>(
        &self,
        session: &mut CleaningSession,
        rng: &mut R,
        dt: f32,
        max_frames: usize,
    ) -> Result<CleaningResults, CleaningError> {
        session.start()?;
        for _ in 0..max_frames {
            let (_, tick) = self.step(session, rng, dt)?;
            if tick == Tick::Expired || session.state() == CleaningState::Lost {
                break;
            }
        }
        Ok(session.results())
    }
}
