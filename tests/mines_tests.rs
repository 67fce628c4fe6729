use fossil_cleaning::{
    random_point_in_rect, smallest_region, subdivide, ChunkDescription, CleaningError, MineConfig,
    MineEvent, MineManager, MineStatus, Rect, Vec2,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn chunks(layers: u32) -> ChunkDescription {
    ChunkDescription {
        name: "Test".to_string(),
        layers,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn subdivision_tiles_the_root(seed in any::<u64>(), count in 1usize..64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let root = Rect::new(-40.0, -25.0, 80.0, 50.0);
        let regions = subdivide(root, count, &mut rng).unwrap();

        prop_assert_eq!(regions.len(), count);
        let area: f32 = regions.iter().map(Rect::area).sum();
        prop_assert!((area - root.area()).abs() < 1e-2);
        for (i, a) in regions.iter().enumerate() {
            prop_assert!(a.x >= root.x && a.x_max() <= root.x_max() + 1e-4);
            prop_assert!(a.y >= root.y && a.y_max() <= root.y_max() + 1e-4);
            for b in &regions[i + 1..] {
                prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn padded_point_keeps_clear_of_edges(
        seed in any::<u64>(),
        w in 1.0f32..100.0,
        h in 1.0f32..100.0,
        px in 0.0f32..0.49,
        py in 0.0f32..0.49,
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let rect = Rect::new(3.0, -7.0, w, h);
        let padding = Vec2::new(px * w, py * h);
        let p = random_point_in_rect(&rect, padding, &mut rng).unwrap();
        let d = rect.edge_distance(p);
        prop_assert!(d.x >= padding.x - 1e-3);
        prop_assert!(d.y >= padding.y - 1e-3);
    }

    #[test]
    fn smallest_region_matches_subdivision(seed in any::<u64>(), count in 1usize..200) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let root = Rect::new(0.0, 0.0, 8.0, 6.0);
        let smallest = smallest_region(root, count);
        let regions = subdivide(root, count, &mut rng).unwrap();
        let min_width = regions.iter().map(|r| r.width).fold(f32::INFINITY, f32::min);
        let min_height = regions.iter().map(|r| r.height).fold(f32::INFINITY, f32::min);
        prop_assert_eq!(smallest.width, min_width);
        prop_assert_eq!(smallest.height, min_height);
    }
}

#[test]
fn single_region_is_the_root() {
    let mut rng = SmallRng::seed_from_u64(1);
    let root = Rect::new(1.0, 2.0, 30.0, 10.0);
    assert_eq!(subdivide(root, 1, &mut rng).unwrap(), vec![root]);
}

#[test]
fn zero_regions_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(1);
    let root = Rect::new(0.0, 0.0, 1.0, 1.0);
    assert_eq!(
        subdivide(root, 0, &mut rng).unwrap_err(),
        CleaningError::InvalidMineCount
    );
}

#[test]
fn degenerate_roots_are_rejected() {
    let mut rng = SmallRng::seed_from_u64(1);
    for root in [
        Rect::new(0.0, 0.0, f32::NAN, 10.0),
        Rect::new(0.0, 0.0, 10.0, f32::INFINITY),
        Rect::new(0.0, 0.0, 0.0, 10.0),
        Rect::new(0.0, 0.0, 10.0, -1.0),
        Rect::new(f32::NEG_INFINITY, 0.0, 10.0, 10.0),
    ] {
        assert!(matches!(
            subdivide(root, 4, &mut rng).unwrap_err(),
            CleaningError::InvalidRect { .. }
        ));
    }
}

#[test]
fn nan_padding_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(3);
    let rect = Rect::new(0.0, 0.0, 2.0, 10.0);
    for padding in [Vec2::new(f32::NAN, 1.0), Vec2::new(0.5, f32::NAN)] {
        assert!(matches!(
            random_point_in_rect(&rect, padding, &mut rng).unwrap_err(),
            CleaningError::PaddingTooLarge { .. }
        ));
    }
    let nan_rect = Rect::new(0.0, 0.0, f32::NAN, 10.0);
    assert!(random_point_in_rect(&nan_rect, Vec2::new(0.0, 0.0), &mut rng).is_err());
}

#[test]
fn smallest_region_of_one_is_the_root() {
    let root = Rect::new(0.0, 0.0, 8.0, 6.0);
    assert_eq!(smallest_region(root, 1), root);
    assert_eq!(smallest_region(root, 4), Rect::new(0.0, 0.0, 4.0, 3.0));
    assert_eq!(smallest_region(root, 5), Rect::new(0.0, 0.0, 2.0, 3.0));
}

#[test]
fn square_of_four_splits_into_quarters() {
    let mut rng = SmallRng::seed_from_u64(99);
    let root = Rect::new(0.0, 0.0, 100.0, 100.0);
    let regions = subdivide(root, 4, &mut rng).unwrap();
    assert_eq!(regions.len(), 4);
    for r in &regions {
        assert_eq!((r.width, r.height), (50.0, 50.0));
    }
    let total: f32 = regions.iter().map(Rect::area).sum();
    assert_eq!(total, 10_000.0);
}

#[test]
fn square_is_cut_vertically() {
    let (left, right) = Rect::new(0.0, 0.0, 10.0, 10.0).halve();
    assert_eq!(left, Rect::new(0.0, 0.0, 5.0, 10.0));
    assert_eq!(right, Rect::new(5.0, 0.0, 5.0, 10.0));

    let (bottom, top) = Rect::new(0.0, 0.0, 4.0, 10.0).halve();
    assert_eq!(bottom, Rect::new(0.0, 0.0, 4.0, 5.0));
    assert_eq!(top, Rect::new(0.0, 5.0, 4.0, 5.0));
}

#[test]
fn oversized_padding_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(3);
    let rect = Rect::new(0.0, 0.0, 2.0, 10.0);
    let err = random_point_in_rect(&rect, Vec2::new(1.5, 1.0), &mut rng).unwrap_err();
    assert!(matches!(err, CleaningError::PaddingTooLarge { .. }));
}

#[test]
fn padding_of_exactly_half_pins_the_centre() {
    let mut rng = SmallRng::seed_from_u64(3);
    let rect = Rect::new(0.0, 0.0, 2.0, 4.0);
    let p = random_point_in_rect(&rect, Vec2::new(1.0, 2.0), &mut rng).unwrap();
    assert_eq!(p, Vec2::new(1.0, 2.0));
}

#[test]
fn mine_manager_places_named_mines_in_layers() {
    let mut rng = SmallRng::seed_from_u64(11);
    let config = MineConfig {
        count: 6,
        min_layer: 2,
        ..MineConfig::default()
    };
    let mut manager = MineManager::new(config.clone());
    let mines = manager
        .initialise(Vec2::new(10.0, 10.0), &chunks(5), &mut rng)
        .unwrap()
        .to_vec();

    assert_eq!(mines.len(), 6);
    let root = Rect::centred(Vec2::new(10.0, 10.0), config.rect_size);
    for (i, mine) in mines.iter().enumerate() {
        assert_eq!(mine.name, format!("Mine {}", i + 1));
        assert!((2..5).contains(&mine.layer));
        assert!(mine.region.contains(mine.position));
        assert!(root.contains(mine.position));
        assert_eq!(mine.status, MineStatus::Armed);
    }
}

#[test]
fn mine_layer_range_must_be_non_empty() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut manager = MineManager::new(MineConfig {
        min_layer: 3,
        ..MineConfig::default()
    });
    let err = manager
        .initialise(Vec2::default(), &chunks(3), &mut rng)
        .unwrap_err();
    assert_eq!(
        err,
        CleaningError::InvalidLayerRange {
            min_layer: 3,
            layers: 3
        }
    );
}

#[test]
fn mines_resolve_once_and_notify() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut manager = MineManager::new(MineConfig::default());
    let mut events = manager.events_mut().subscribe();
    manager
        .initialise(Vec2::default(), &chunks(4), &mut rng)
        .unwrap();

    manager.defuse(0).unwrap();
    manager.detonate(1).unwrap();
    assert_eq!(
        manager.defuse(0).unwrap_err(),
        CleaningError::MineAlreadyResolved(0)
    );
    assert_eq!(
        manager.detonate(0).unwrap_err(),
        CleaningError::MineAlreadyResolved(0)
    );
    assert_eq!(manager.defuse(42).unwrap_err(), CleaningError::MineNotFound(42));

    assert_eq!(
        events.drain(),
        vec![MineEvent::Defused(0), MineEvent::Detonated(1)]
    );
    assert_eq!(manager.armed().count(), manager.mines().len() - 2);

    manager.clear();
    assert!(manager.mines().is_empty());
}
