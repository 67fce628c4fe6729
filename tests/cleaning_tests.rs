use fossil_cleaning::{
    default_bracket, Antiquity, ArtefactShape, CleaningError, CleaningEvent, CleaningManager,
    CleaningState, Emitter, FossilEvent, FossilShape, SimulatedRock,
};
use rand::{rngs::SmallRng, SeedableRng};

/// Fossil whose health and exposure are set directly.
struct StubFossil {
    health: f32,
    exposure: f32,
    events: Emitter<FossilEvent>,
}

impl StubFossil {
    fn new() -> Self {
        Self {
            health: 1.0,
            exposure: 0.0,
            events: Emitter::new(),
        }
    }

    fn set_exposure(&mut self, exposure: f32) {
        self.exposure = exposure;
        self.events.emit(FossilEvent::Exposed(exposure));
    }

    fn set_health(&mut self, health: f32) {
        self.health = health;
        self.events.emit(FossilEvent::Damaged(health));
    }
}

impl FossilShape for StubFossil {
    fn health(&self) -> f32 {
        self.health
    }
    fn exposure(&self) -> f32 {
        self.exposure
    }
    fn initialise(&mut self, _antiquity: &Antiquity) {
        self.health = 1.0;
        self.exposure = 0.0;
    }
    fn events_mut(&mut self) -> &mut Emitter<FossilEvent> {
        &mut self.events
    }
}

impl ArtefactShape for StubFossil {
    fn artefact_health(&self) -> f32 {
        self.health
    }
    fn artefact_exposure(&self) -> f32 {
        self.exposure
    }
    fn artefact_score(&self) -> f32 {
        100.0
    }
}

struct Fixture {
    manager: CleaningManager,
    fossil: StubFossil,
    rock: SimulatedRock,
    rng: SmallRng,
}

impl Fixture {
    fn started() -> Self {
        let mut fixture = Self {
            manager: CleaningManager::new(default_bracket(), 0.9, 0.2),
            fossil: StubFossil::new(),
            rock: SimulatedRock::default(),
            rng: SmallRng::seed_from_u64(7),
        };
        fixture
            .manager
            .start_cleaning(&mut fixture.rng, &mut fixture.fossil, &mut fixture.rock)
            .unwrap();
        fixture
    }

    fn poll(&mut self) -> bool {
        self.manager.poll_fossil(&mut self.fossil, &mut self.rock)
    }
}

#[test]
fn start_generates_rock_and_listens() {
    let mut fixture = Fixture::started();
    let mut events = fixture.manager.events_mut().subscribe();

    assert_eq!(fixture.manager.state(), CleaningState::InProgress);
    assert!(fixture.manager.is_listening());
    assert_eq!(fixture.fossil.events_mut().subscriber_count(), 1);
    let rock = fixture.manager.current_rock().unwrap().clone();
    assert!(default_bracket().antiquities.contains(&rock.antiquity));
    assert_eq!(fixture.rock.shape.as_ref(), Some(&rock.rock_shape));
    assert!(fixture.rock.visible);
    assert!(events.drain().is_empty());
}

#[test]
fn start_emits_started() {
    let mut manager = CleaningManager::new(default_bracket(), 0.9, 0.2);
    let mut events = manager.events_mut().subscribe();
    let mut fossil = StubFossil::new();
    let mut rock = SimulatedRock::default();
    let mut rng = SmallRng::seed_from_u64(1);
    manager.start_cleaning(&mut rng, &mut fossil, &mut rock).unwrap();
    assert_eq!(events.drain(), vec![CleaningEvent::Started]);
}

#[test]
fn exposure_above_threshold_wins() {
    let mut fixture = Fixture::started();
    let mut events = fixture.manager.events_mut().subscribe();

    fixture.fossil.set_exposure(0.5);
    assert!(fixture.poll());
    assert_eq!(fixture.manager.state(), CleaningState::InProgress);

    fixture.fossil.set_exposure(0.91);
    fixture.poll();
    assert_eq!(fixture.manager.state(), CleaningState::Won);
    assert!(!fixture.rock.visible);
    assert!(!fixture.manager.is_listening());
    assert_eq!(fixture.fossil.events_mut().subscriber_count(), 0);
    assert_eq!(
        events.drain(),
        vec![
            CleaningEvent::ArtefactRockCompleted,
            CleaningEvent::Ended,
            CleaningEvent::Won
        ]
    );
}

#[test]
fn exposure_equal_to_threshold_does_not_win() {
    let mut fixture = Fixture::started();
    fixture.fossil.set_exposure(0.9);
    fixture.poll();
    assert_eq!(fixture.manager.state(), CleaningState::InProgress);
}

#[test]
fn health_below_threshold_loses() {
    let mut fixture = Fixture::started();
    let mut events = fixture.manager.events_mut().subscribe();

    fixture.fossil.set_health(0.2);
    fixture.poll();
    assert_eq!(fixture.manager.state(), CleaningState::InProgress);

    // fully exposed but broken: the damage check only ever loses
    fixture.fossil.exposure = 1.0;
    fixture.fossil.set_health(0.19);
    fixture.poll();
    assert_eq!(fixture.manager.state(), CleaningState::Lost);
    assert!(fixture.rock.visible);
    assert_eq!(
        events.drain(),
        vec![CleaningEvent::Ended, CleaningEvent::Lost]
    );
}

#[test]
fn no_checks_after_terminal_state() {
    let mut fixture = Fixture::started();
    fixture.fossil.set_health(0.0);
    fixture.poll();
    assert_eq!(fixture.manager.state(), CleaningState::Lost);

    let mut events = fixture.manager.events_mut().subscribe();
    for _ in 0..5 {
        fixture.fossil.set_exposure(1.0);
        fixture.fossil.set_health(0.0);
        assert!(!fixture.poll());
    }
    assert_eq!(fixture.manager.state(), CleaningState::Lost);
    assert!(events.drain().is_empty());
}

#[test]
fn queued_notifications_after_a_win_are_dropped() {
    let mut fixture = Fixture::started();
    fixture.fossil.set_exposure(1.0);
    fixture.fossil.set_health(0.0);
    fixture.poll();
    assert_eq!(fixture.manager.state(), CleaningState::Won);
}

#[test]
fn end_runs_once_per_rock() {
    let mut fixture = Fixture::started();
    let mut events = fixture.manager.events_mut().subscribe();
    fixture.manager.end_cleaning(&mut fixture.fossil);
    fixture.manager.end_cleaning(&mut fixture.fossil);
    assert!(fixture.manager.is_ended());
    assert_eq!(events.drain(), vec![CleaningEvent::Ended]);
    assert_eq!(fixture.manager.state(), CleaningState::InProgress);
}

#[test]
fn next_rock_requires_a_win() {
    let mut fixture = Fixture::started();
    let err = fixture
        .manager
        .next_artefact_rock(&mut fixture.rng, &mut fixture.fossil, &mut fixture.rock)
        .unwrap_err();
    assert_eq!(err, CleaningError::InvalidState);

    fixture.fossil.set_exposure(1.0);
    fixture.poll();
    let mut events = fixture.manager.events_mut().subscribe();
    fixture
        .manager
        .next_artefact_rock(&mut fixture.rng, &mut fixture.fossil, &mut fixture.rock)
        .unwrap();
    assert_eq!(fixture.manager.state(), CleaningState::InProgress);
    assert!(fixture.manager.is_listening());
    assert!(fixture.rock.visible);
    assert_eq!(fixture.fossil.exposure(), 0.0);
    assert_eq!(events.drain(), vec![CleaningEvent::NextArtefactRockStarted]);

    fixture.fossil.set_exposure(0.95);
    fixture.poll();
    assert_eq!(fixture.manager.state(), CleaningState::Won);
}

#[test]
fn empty_bracket_is_rejected_at_start() {
    let mut bracket = default_bracket();
    bracket.rock_shapes.clear();
    let mut manager = CleaningManager::new(bracket, 0.9, 0.2);
    let mut fossil = StubFossil::new();
    let mut rock = SimulatedRock::default();
    let mut rng = SmallRng::seed_from_u64(1);
    let err = manager
        .start_cleaning(&mut rng, &mut fossil, &mut rock)
        .unwrap_err();
    assert_eq!(err, CleaningError::EmptyBracket("rock shapes"));
    assert!(!manager.is_listening());
}
