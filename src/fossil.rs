//! Collaborator interfaces consumed by the cleaning managers, plus the
//! in-memory implementations the simulator and tests drive.

use crate::antiquity::{Antiquity, ChunkDescription, RockColor, RockShape};
use crate::events::Emitter;

/// Change notifications raised by a fossil shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FossilEvent {
    /// Exposure changed; carries the new exposure.
    Exposed(f32),
    /// Health changed; carries the new health.
    Damaged(f32),
}

/// The fossil being uncovered.
pub trait FossilShape {
    /// Remaining structural integrity in `[0, 1]`.
    fn health(&self) -> f32;
    /// Revealed fraction of the fossil surface in `[0, 1]`.
    fn exposure(&self) -> f32;
    fn initialise(&mut self, antiquity: &Antiquity);
    fn events_mut(&mut self) -> &mut Emitter<FossilEvent>;
}

/// The rock mesh surrounding the fossil.
pub trait RockDisplay {
    fn initialise(&mut self, shape: &RockShape, color: &RockColor, chunks: &ChunkDescription);
    fn hide_rock(&mut self);
}

/// Scoring view of the current artefact.
pub trait ArtefactShape {
    fn artefact_health(&self) -> f32;
    fn artefact_exposure(&self) -> f32;
    /// Base score of the antiquity being cleaned.
    fn artefact_score(&self) -> f32;
}

/// Fossil whose exposure and damage are applied directly by the caller.
pub struct SimulatedFossil {
    antiquity: Option<Antiquity>,
    exposure: f32,
    damage: f32,
    events: Emitter<FossilEvent>,
}

impl SimulatedFossil {
    pub fn new() -> Self {
        Self {
            antiquity: None,
            exposure: 0.0,
            damage: 0.0,
            events: Emitter::new(),
        }
    }

    pub fn antiquity(&self) -> Option<&Antiquity> {
        self.antiquity.as_ref()
    }

    /// Reveal more of the fossil.
    pub fn expose(&mut self, amount: f32) {
        self.exposure = (self.exposure + amount.max(0.0)).clamp(0.0, 1.0);
        self.events.emit(FossilEvent::Exposed(self.exposure));
    }

    /// Deal raw damage. Health only drops once `breaking_health` is used up.
    pub fn damage(&mut self, amount: f32) {
        self.damage += amount.max(0.0);
        let health = self.health();
        self.events.emit(FossilEvent::Damaged(health));
    }
}

impl Default for SimulatedFossil {
    fn default() -> Self {
        Self::new()
    }
}

impl FossilShape for SimulatedFossil {
    fn health(&self) -> f32 {
        match &self.antiquity {
            Some(a) if a.max_health > 0.0 => {
                let breaking = (self.damage - a.breaking_health).max(0.0);
                1.0 - (breaking / a.max_health).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    fn exposure(&self) -> f32 {
        self.exposure
    }

    fn initialise(&mut self, antiquity: &Antiquity) {
        self.antiquity = Some(antiquity.clone());
        self.exposure = 0.0;
        self.damage = 0.0;
    }

    fn events_mut(&mut self) -> &mut Emitter<FossilEvent> {
        &mut self.events
    }
}

impl ArtefactShape for SimulatedFossil {
    fn artefact_health(&self) -> f32 {
        self.health()
    }

    fn artefact_exposure(&self) -> f32 {
        self.exposure
    }

    fn artefact_score(&self) -> f32 {
        self.antiquity.as_ref().map_or(0.0, |a| a.score)
    }
}

/// Records what the session asked the rock display to show.
#[derive(Debug, Clone, Default)]
pub struct SimulatedRock {
    pub shape: Option<RockShape>,
    pub color: Option<RockColor>,
    pub chunks: Option<ChunkDescription>,
    pub visible: bool,
}

impl RockDisplay for SimulatedRock {
    fn initialise(&mut self, shape: &RockShape, color: &RockColor, chunks: &ChunkDescription) {
        self.shape = Some(shape.clone());
        self.color = Some(*color);
        self.chunks = Some(chunks.clone());
        self.visible = true;
    }

    fn hide_rock(&mut self) {
        self.visible = false;
    }
}
