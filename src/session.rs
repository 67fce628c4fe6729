//! Owner of one cleaning run: managers, collaborators and the RNG.
//!
//! Every external call mutates the owned state and then pumps all
//! subscriptions until nothing is left queued, so event handling is
//! synchronous and happens in registration order.

use log::warn;
use rand::rngs::SmallRng;

use crate::cleaning::{CleaningManager, CleaningState};
use crate::common::CleaningError;
use crate::config::CleaningConfig;
use crate::events::Subscription;
use crate::fossil::{ArtefactShape, FossilShape, RockDisplay, SimulatedFossil, SimulatedRock};
use crate::geometry::Vec2;
use crate::mines::{MineEvent, MineManager};
use crate::results::CleaningResults;
use crate::score::CleaningScoreManager;
use crate::timer::{CleaningTimerManager, Tick};

pub struct CleaningSession<F = SimulatedFossil, D = SimulatedRock> {
    config: CleaningConfig,
    rng: SmallRng,
    cleaning: CleaningManager,
    score: CleaningScoreManager,
    timer: CleaningTimerManager,
    mines: MineManager,
    mine_events: Subscription<MineEvent>,
    fossil: F,
    display: D,
}

impl CleaningSession<SimulatedFossil, SimulatedRock> {
    /// Session over the in-memory fossil and rock.
    pub fn simulated(config: CleaningConfig, rng: SmallRng) -> Result<Self, CleaningError> {
        Self::new(config, rng, SimulatedFossil::new(), SimulatedRock::default())
    }

    /// Reveal more of the fossil.
    pub fn expose(&mut self, amount: f32) {
        self.fossil.expose(amount);
        self.pump();
    }

    /// Damage the fossil directly.
    pub fn damage(&mut self, amount: f32) {
        self.fossil.damage(amount);
        self.pump();
    }

    pub fn defuse_mine(&mut self, id: usize) -> Result<(), CleaningError> {
        self.mines.defuse(id)?;
        self.pump();
        Ok(())
    }

    /// Set off a mine, damaging the fossil by the configured amount.
    pub fn detonate_mine(&mut self, id: usize) -> Result<(), CleaningError> {
        self.mines.detonate(id)?;
        self.fossil.damage(self.config.mines.detonation_damage);
        self.pump();
        Ok(())
    }
}

impl<F, D> CleaningSession<F, D>
where
    F: FossilShape + ArtefactShape,
    D: RockDisplay,
{
    pub fn new(config: CleaningConfig, rng: SmallRng, fossil: F, display: D) -> Result<Self, CleaningError> {
        config.validate()?;
        let mut cleaning = CleaningManager::new(
            config.bracket.clone(),
            config.required_exposure_for_completion,
            config.required_health_for_failure,
        );
        let score = CleaningScoreManager::new(
            cleaning.events_mut(),
            config.required_exposure_for_scoring,
            config.required_health_for_perfect,
        );
        let timer = CleaningTimerManager::new(
            cleaning.events_mut(),
            config.start_time,
            config.bonus_curve.clone(),
        );
        let mut mines = MineManager::new(config.mines.clone());
        let mine_events = mines.events_mut().subscribe();
        Ok(Self {
            config,
            rng,
            cleaning,
            score,
            timer,
            mines,
            mine_events,
            fossil,
            display,
        })
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    pub fn cleaning(&self) -> &CleaningManager {
        &self.cleaning
    }

    pub fn cleaning_mut(&mut self) -> &mut CleaningManager {
        &mut self.cleaning
    }

    pub fn score(&self) -> &CleaningScoreManager {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut CleaningScoreManager {
        &mut self.score
    }

    pub fn timer(&self) -> &CleaningTimerManager {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut CleaningTimerManager {
        &mut self.timer
    }

    pub fn mines(&self) -> &MineManager {
        &self.mines
    }

    pub fn mines_mut(&mut self) -> &mut MineManager {
        &mut self.mines
    }

    pub fn fossil(&self) -> &F {
        &self.fossil
    }

    pub fn fossil_mut(&mut self) -> &mut F {
        &mut self.fossil
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn state(&self) -> CleaningState {
        self.cleaning.state()
    }

    /// True while a rock is being cleaned and the clock is running.
    pub fn is_running(&self) -> bool {
        !self.cleaning.is_ended() && self.timer.is_active()
    }

    pub fn rng_mut(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Generate a rock, bury its mines, then announce the start. Nothing is
    /// touched if generation or mine placement fails.
    pub fn start(&mut self) -> Result<(), CleaningError> {
        let rock = self.cleaning.generate_artefact_rock(&mut self.rng)?;
        self.mines
            .initialise(Vec2::default(), &rock.chunk_description, &mut self.rng)?;
        self.cleaning
            .start_cleaning_with(rock, &mut self.fossil, &mut self.display);
        self.pump();
        Ok(())
    }

    /// Start the next rock after a win, keeping score and clock.
    pub fn next_rock(&mut self) -> Result<(), CleaningError> {
        if self.state() != CleaningState::Won || self.timer.current_time_left() == 0.0 {
            return Err(CleaningError::InvalidState);
        }
        let rock = self.cleaning.generate_artefact_rock(&mut self.rng)?;
        self.mines
            .initialise(Vec2::default(), &rock.chunk_description, &mut self.rng)?;
        self.cleaning
            .next_artefact_rock_with(rock, &mut self.fossil, &mut self.display)?;
        self.pump();
        Ok(())
    }

    pub fn pause(&mut self) {
        self.cleaning.pause();
        self.pump();
    }

    pub fn resume(&mut self) {
        self.cleaning.resume();
        self.pump();
    }

    /// Advance the clock by `elapsed` seconds; the only timeout path.
    pub fn advance(&mut self, elapsed: f32) -> Tick {
        let tick = self.timer.advance(elapsed);
        if tick == Tick::Expired {
            self.cleaning.end_cleaning(&mut self.fossil);
        }
        self.pump();
        tick
    }

    /// Deliver queued notifications until every subscription is empty.
    pub fn pump(&mut self) {
        loop {
            let mut handled = self.cleaning.poll_fossil(&mut self.fossil, &mut self.display);
            handled |= self.timer.poll(&self.fossil);
            handled |= self.score.poll(&self.fossil);
            while let Some(event) = self.mine_events.try_next() {
                handled = true;
                if let MineEvent::Detonated(id) = event {
                    warn!("mine {} detonated", id);
                }
            }
            if !handled {
                break;
            }
        }
    }

    pub fn results(&self) -> CleaningResults {
        CleaningResults::collect(&self.cleaning, &self.score, &self.timer)
    }
}
