//! Cleaning session state machine.

use log::info;
use rand::Rng;

use crate::antiquity::{ArtefactRock, GenerationBracket};
use crate::common::CleaningError;
use crate::events::{Emitter, Subscription};
use crate::fossil::{FossilEvent, FossilShape, RockDisplay};

/// Current status of a cleaning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum CleaningState {
    InProgress,
    Won,
    Lost,
}

/// Session lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningEvent {
    Started,
    Ended,
    Won,
    Lost,
    Paused,
    Resumed,
    /// The current rock was cleaned; raised before `Ended`.
    ArtefactRockCompleted,
    NextArtefactRockStarted,
}

/// Decides win and loss from fossil notifications.
pub struct CleaningManager {
    bracket: GenerationBracket,
    required_exposure_for_completion: f32,
    required_health_for_failure: f32,
    state: CleaningState,
    current_rock: Option<ArtefactRock>,
    fossil_events: Option<Subscription<FossilEvent>>,
    ended: bool,
    events: Emitter<CleaningEvent>,
}

impl CleaningManager {
    pub fn new(
        bracket: GenerationBracket,
        required_exposure_for_completion: f32,
        required_health_for_failure: f32,
    ) -> Self {
        Self {
            bracket,
            required_exposure_for_completion,
            required_health_for_failure,
            state: CleaningState::InProgress,
            current_rock: None,
            fossil_events: None,
            ended: true,
            events: Emitter::new(),
        }
    }

    pub fn state(&self) -> CleaningState {
        self.state
    }

    pub fn current_rock(&self) -> Option<&ArtefactRock> {
        self.current_rock.as_ref()
    }

    /// True once the common end path has run for the current rock.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// True while fossil notifications are being listened to.
    pub fn is_listening(&self) -> bool {
        self.fossil_events.is_some()
    }

    pub fn events_mut(&mut self) -> &mut Emitter<CleaningEvent> {
        &mut self.events
    }

    /// Draw a rock from the bracket without touching session state.
    pub fn generate_artefact_rock<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<ArtefactRock, CleaningError> {
        self.bracket.generate(rng)
    }

    pub fn start_cleaning<R, F, D>(
        &mut self,
        rng: &mut R,
        fossil: &mut F,
        display: &mut D,
    ) -> Result<(), CleaningError>
    where
        R: Rng,
        F: FossilShape,
        D: RockDisplay,
    {
        let rock = self.generate_artefact_rock(rng)?;
        self.start_cleaning_with(rock, fossil, display);
        Ok(())
    }

    /// Start a session on an already generated rock.
    pub fn start_cleaning_with<F, D>(
        &mut self,
        rock: ArtefactRock,
        fossil: &mut F,
        display: &mut D,
    ) where
        F: FossilShape,
        D: RockDisplay,
    {
        self.begin_rock(rock, fossil, display);
        info!("cleaning started");
        self.events.emit(CleaningEvent::Started);
    }

    /// Move on to a fresh rock after the previous one was won.
    pub fn next_artefact_rock<R, F, D>(
        &mut self,
        rng: &mut R,
        fossil: &mut F,
        display: &mut D,
    ) -> Result<(), CleaningError>
    where
        R: Rng,
        F: FossilShape,
        D: RockDisplay,
    {
        if self.state != CleaningState::Won {
            return Err(CleaningError::InvalidState);
        }
        let rock = self.generate_artefact_rock(rng)?;
        self.next_artefact_rock_with(rock, fossil, display)
    }

    pub fn next_artefact_rock_with<F, D>(
        &mut self,
        rock: ArtefactRock,
        fossil: &mut F,
        display: &mut D,
    ) -> Result<(), CleaningError>
    where
        F: FossilShape,
        D: RockDisplay,
    {
        if self.state != CleaningState::Won {
            return Err(CleaningError::InvalidState);
        }
        self.begin_rock(rock, fossil, display);
        info!("next rock started");
        self.events.emit(CleaningEvent::NextArtefactRockStarted);
        Ok(())
    }

    fn begin_rock<F, D>(&mut self, rock: ArtefactRock, fossil: &mut F, display: &mut D)
    where
        F: FossilShape,
        D: RockDisplay,
    {
        self.unlisten(fossil);
        self.state = CleaningState::InProgress;
        self.ended = false;
        self.fossil_events = Some(fossil.events_mut().subscribe());
        display.initialise(&rock.rock_shape, &rock.rock_color, &rock.chunk_description);
        fossil.initialise(&rock.antiquity);
        info!(
            "generated {} in {} ({})",
            rock.antiquity.display_name, rock.rock_shape.name, rock.chunk_description.name
        );
        self.current_rock = Some(rock);
    }

    /// Drain pending fossil notifications, running the matching checks.
    /// Returns `true` if any notification was handled.
    pub fn poll_fossil<F, D>(&mut self, fossil: &mut F, display: &mut D) -> bool
    where
        F: FossilShape,
        D: RockDisplay,
    {
        let mut handled = false;
        while let Some(event) = self.fossil_events.as_mut().and_then(|s| s.try_next()) {
            handled = true;
            match event {
                FossilEvent::Exposed(_) => self.check_if_cleaning_won(fossil, display),
                FossilEvent::Damaged(_) => self.check_if_cleaning_lost(fossil),
            }
        }
        handled
    }

    pub fn check_if_cleaning_lost<F: FossilShape>(&mut self, fossil: &mut F) {
        if fossil.health() < self.required_health_for_failure {
            self.lose_cleaning(fossil);
        }
    }

    pub fn check_if_cleaning_won<F, D>(&mut self, fossil: &mut F, display: &mut D)
    where
        F: FossilShape,
        D: RockDisplay,
    {
        if fossil.exposure() > self.required_exposure_for_completion {
            self.win_cleaning(fossil, display);
        }
    }

    pub fn lose_cleaning<F: FossilShape>(&mut self, fossil: &mut F) {
        self.state = CleaningState::Lost;
        self.end_cleaning(fossil);
        info!("cleaning lost");
        self.events.emit(CleaningEvent::Lost);
    }

    pub fn win_cleaning<F, D>(&mut self, fossil: &mut F, display: &mut D)
    where
        F: FossilShape,
        D: RockDisplay,
    {
        self.state = CleaningState::Won;
        display.hide_rock();
        self.events.emit(CleaningEvent::ArtefactRockCompleted);
        self.end_cleaning(fossil);
        info!("cleaning won");
        self.events.emit(CleaningEvent::Won);
    }

    /// Stop listening to the fossil and announce the end. Runs once per rock.
    pub fn end_cleaning<F: FossilShape>(&mut self, fossil: &mut F) {
        if self.ended {
            return;
        }
        self.ended = true;
        self.unlisten(fossil);
        self.events.emit(CleaningEvent::Ended);
    }

    pub fn pause(&mut self) {
        self.events.emit(CleaningEvent::Paused);
    }

    pub fn resume(&mut self) {
        self.events.emit(CleaningEvent::Resumed);
    }

    fn unlisten<F: FossilShape>(&mut self, fossil: &mut F) {
        if let Some(subscription) = self.fossil_events.take() {
            fossil.events_mut().unsubscribe(subscription.id());
        }
    }
}
