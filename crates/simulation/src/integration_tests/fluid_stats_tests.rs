use crate::injection::InjectionTarget;
use crate::test_harness::TestFluid;

#[test]
fn test_stats_refresh_after_tick() {
    let mut fluid = TestFluid::new();
    fluid.inject(InjectionTarget::Center, 100.0);
    fluid.tick(1);

    let stats = fluid.stats();
    assert_eq!(stats.tick, 1);
    assert!((stats.total_volume - 100.0).abs() < 1e-9);
    assert!(stats.max_depth > 0.0 && stats.max_depth < 100.0);
    assert!(stats.wet_cells >= 5, "center plus four neighbours, got {}", stats.wet_cells);
    assert_eq!(stats.ring_volume, 0.0);
}

#[test]
fn test_stats_see_direct_edits_while_paused() {
    let mut fluid = TestFluid::new().with_water(2, 2, 5.0).paused();
    fluid.tick(1);

    let stats = fluid.stats();
    assert_eq!(stats.tick, 0);
    assert_eq!(stats.total_volume, 5.0);
    assert_eq!(stats.interior_volume, 5.0);
    assert_eq!(stats.max_depth, 5.0);
}

#[test]
fn test_stats_track_max_water_level_over_terrain() {
    let mut fluid = TestFluid::new().with_ground(4, 4, 30.0).paused();
    fluid.inject(InjectionTarget::Cell { x: 4, y: 4 }, 2.0);
    fluid.tick(1);
    assert_eq!(fluid.stats().max_water_level, 32.0);
}
