//! Countdown clock with per-rock bonus time.

use log::{debug, info};

use crate::cleaning::CleaningEvent;
use crate::curve::BonusCurve;
use crate::events::{Emitter, Subscription};
use crate::fossil::ArtefactShape;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerEvent {
    /// Remaining seconds after the change.
    TimeChanged(f32),
}

/// Outcome of [`CleaningTimerManager::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Idle,
    Running,
    /// The clock just hit zero; the session must be ended.
    Expired,
}

pub struct CleaningTimerManager {
    start_time: f32,
    bonus_curve: BonusCurve,
    current_time_left: f32,
    bonus_time: f32,
    total_time: f32,
    time_taken: f32,
    prev_rock_time: f32,
    timer_active: bool,
    cleaning_events: Subscription<CleaningEvent>,
    events: Emitter<TimerEvent>,
}

impl CleaningTimerManager {
    pub fn new(cleaning: &mut Emitter<CleaningEvent>, start_time: f32, bonus_curve: BonusCurve) -> Self {
        Self {
            start_time,
            bonus_curve,
            current_time_left: 0.0,
            bonus_time: 0.0,
            total_time: start_time,
            time_taken: 0.0,
            prev_rock_time: start_time,
            timer_active: false,
            cleaning_events: cleaning.subscribe(),
            events: Emitter::new(),
        }
    }

    pub fn current_time_left(&self) -> f32 {
        self.current_time_left
    }

    /// Bonus awarded for the last completed rock.
    pub fn bonus_time(&self) -> f32 {
        self.bonus_time
    }

    /// Start time plus every bonus awarded so far.
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Seconds spent on the last completed rock.
    pub fn time_taken(&self) -> f32 {
        self.time_taken
    }

    pub fn is_active(&self) -> bool {
        self.timer_active
    }

    pub fn events_mut(&mut self) -> &mut Emitter<TimerEvent> {
        &mut self.events
    }

    fn set_time_left(&mut self, value: f32) {
        self.current_time_left = value;
        self.events.emit(TimerEvent::TimeChanged(value));
    }

    /// Handle queued cleaning notifications. Returns `true` if any were handled.
    pub fn poll<A: ArtefactShape>(&mut self, artefact: &A) -> bool {
        let mut handled = false;
        while let Some(event) = self.cleaning_events.try_next() {
            handled = true;
            match event {
                CleaningEvent::Started => self.reset_and_start_timer(),
                CleaningEvent::Ended | CleaningEvent::Paused => self.stop_timer(),
                CleaningEvent::Resumed => self.start_timer(),
                CleaningEvent::ArtefactRockCompleted => {
                    self.on_artefact_rock_completed(artefact.artefact_health())
                }
                CleaningEvent::NextArtefactRockStarted => {
                    self.time_taken = 0.0;
                    self.start_timer();
                }
                CleaningEvent::Won | CleaningEvent::Lost => {}
            }
        }
        handled
    }

    pub fn on_artefact_rock_completed(&mut self, health: f32) {
        self.bonus_time = self.bonus_curve.evaluate(health);
        self.time_taken = self.prev_rock_time - self.current_time_left;
        self.set_time_left(self.current_time_left + self.bonus_time);
        self.total_time += self.bonus_time;
        self.prev_rock_time = self.current_time_left;
        debug!(
            "rock took {:.2}s, bonus {:.2}s",
            self.time_taken, self.bonus_time
        );
    }

    /// Count down by `elapsed` seconds.
    pub fn advance(&mut self, elapsed: f32) -> Tick {
        if !self.timer_active {
            return Tick::Idle;
        }
        self.set_time_left(self.current_time_left - elapsed);
        if !(self.current_time_left <= 0.0) {
            return Tick::Running;
        }
        self.set_time_left(0.0);
        self.timer_active = false;
        info!("time is up");
        Tick::Expired
    }

    pub fn reset_timer(&mut self) {
        self.total_time = self.start_time;
        self.prev_rock_time = self.start_time;
        self.time_taken = 0.0;
        self.bonus_time = 0.0;
        self.set_time_left(self.start_time);
    }

    /// Activate unless the clock already reads zero, so a pause and resume
    /// before the first session cannot end it.
    pub fn start_timer(&mut self) {
        if self.current_time_left != 0.0 {
            self.timer_active = true;
        }
    }

    pub fn stop_timer(&mut self) {
        self.timer_active = false;
    }

    pub fn reset_and_start_timer(&mut self) {
        self.reset_timer();
        self.start_timer();
    }
}
