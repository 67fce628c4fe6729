//! Score accumulated over every rock of a session.

use log::debug;

use crate::cleaning::CleaningEvent;
use crate::events::{Emitter, Subscription};
use crate::fossil::ArtefactShape;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreEvent {
    /// New running total.
    Updated(f32),
}

pub struct CleaningScoreManager {
    required_exposure_for_scoring: f32,
    required_health_for_perfect: f32,
    score: f32,
    artefacts_cleaned: u32,
    artefacts_perfected: u32,
    total_artefacts_health: f32,
    total_artefacts_exposure: f32,
    rock_scored: bool,
    cleaning_events: Subscription<CleaningEvent>,
    events: Emitter<ScoreEvent>,
}

impl CleaningScoreManager {
    /// Listen to `cleaning` for session and rock notifications.
    pub fn new(
        cleaning: &mut Emitter<CleaningEvent>,
        required_exposure_for_scoring: f32,
        required_health_for_perfect: f32,
    ) -> Self {
        Self {
            required_exposure_for_scoring,
            required_health_for_perfect,
            score: 0.0,
            artefacts_cleaned: 0,
            artefacts_perfected: 0,
            total_artefacts_health: 0.0,
            total_artefacts_exposure: 0.0,
            rock_scored: false,
            cleaning_events: cleaning.subscribe(),
            events: Emitter::new(),
        }
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn artefacts_cleaned(&self) -> u32 {
        self.artefacts_cleaned
    }

    pub fn artefacts_perfected(&self) -> u32 {
        self.artefacts_perfected
    }

    pub fn total_artefacts_health(&self) -> f32 {
        self.total_artefacts_health
    }

    pub fn total_artefacts_exposure(&self) -> f32 {
        self.total_artefacts_exposure
    }

    /// Mean health of scored artefacts, `None` before the first one.
    pub fn average_health(&self) -> Option<f32> {
        (self.artefacts_cleaned > 0)
            .then(|| self.total_artefacts_health / self.artefacts_cleaned as f32)
    }

    pub fn average_exposure(&self) -> Option<f32> {
        (self.artefacts_cleaned > 0)
            .then(|| self.total_artefacts_exposure / self.artefacts_cleaned as f32)
    }

    pub fn events_mut(&mut self) -> &mut Emitter<ScoreEvent> {
        &mut self.events
    }

    /// Handle queued cleaning notifications. Returns `true` if any were handled.
    pub fn poll<A: ArtefactShape>(&mut self, artefact: &A) -> bool {
        let mut handled = false;
        while let Some(event) = self.cleaning_events.try_next() {
            handled = true;
            match event {
                CleaningEvent::Started => self.reset_score(),
                CleaningEvent::NextArtefactRockStarted => self.rock_scored = false,
                CleaningEvent::ArtefactRockCompleted | CleaningEvent::Ended => {
                    self.update_score(artefact)
                }
                _ => {}
            }
        }
        handled
    }

    pub fn reset_score(&mut self) {
        self.score = 0.0;
        self.artefacts_cleaned = 0;
        self.artefacts_perfected = 0;
        self.total_artefacts_health = 0.0;
        self.total_artefacts_exposure = 0.0;
        self.rock_scored = false;
    }

    /// Add the current artefact's score if it is exposed enough. A rock
    /// contributes at most once.
    pub fn update_score<A: ArtefactShape>(&mut self, artefact: &A) {
        if self.rock_scored {
            return;
        }
        let exposure = artefact.artefact_exposure();
        if !(exposure >= self.required_exposure_for_scoring) {
            return;
        }
        let health = artefact.artefact_health();
        // TODO: weight by rock difficulty once rocks carry one
        let rock_score = (artefact.artefact_score() * health * exposure).round();

        self.rock_scored = true;
        self.score += rock_score;
        self.artefacts_cleaned += 1;
        if health >= self.required_health_for_perfect {
            self.artefacts_perfected += 1;
        }
        self.total_artefacts_health += health;
        self.total_artefacts_exposure += exposure;
        debug!("scored {} (total {})", rock_score, self.score);
        self.events.emit(ScoreEvent::Updated(self.score));
    }
}
