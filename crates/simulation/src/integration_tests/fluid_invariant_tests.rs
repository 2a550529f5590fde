use crate::injection::InjectionTarget;
use crate::invariant_checks::FluidInvariantViolations;
use crate::test_harness::TestFluid;

#[test]
fn test_clean_run_reports_no_violations() {
    let mut fluid = TestFluid::new();
    fluid.inject(InjectionTarget::Center, 1000.0);
    fluid.tick(100);

    assert_eq!(*fluid.violations(), FluidInvariantViolations::default());
    fluid.assert_all_finite();
    fluid.assert_non_negative();
}

#[test]
fn test_nan_volume_is_repaired() {
    let mut fluid = TestFluid::new().with_water(4, 4, 3.0).paused();
    {
        let mut f = fluid.fluid_mut();
        let idx = f.grid.index(6, 6);
        f.grid.volume[idx] = f64::NAN;
    }
    fluid.tick(1);

    let violations = *fluid.violations();
    assert_eq!(violations.volume, 1);
    assert_eq!(violations.flow, 0);
    assert_eq!(violations.repaired_passes, 1);
    assert_eq!(fluid.volume_at(6, 6), 0.0);
    assert_eq!(fluid.volume_at(4, 4), 3.0);
    fluid.assert_all_finite();
}

#[test]
fn test_infinite_flow_is_repaired() {
    let mut fluid = TestFluid::new().paused();
    fluid.fluid_mut().flow.set_flow_y(3, 3, f64::INFINITY);
    fluid.tick(1);

    assert_eq!(fluid.violations().flow, 1);
    assert_eq!(fluid.fluid().flow.flow_y_at(3, 3), 0.0);
}

#[test]
fn test_violation_counts_reset_on_next_clean_pass() {
    let mut fluid = TestFluid::new().paused();
    fluid.fluid_mut().flow.set_flow_x(2, 2, f64::NAN);
    fluid.tick(1);
    assert_eq!(fluid.violations().flow, 1);

    fluid.tick(1);
    let violations = *fluid.violations();
    assert_eq!(violations.flow, 0);
    assert_eq!(violations.repaired_passes, 1, "history is kept");
}
