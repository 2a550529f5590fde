//! Runtime invariant guards for the fluid state.
//!
//! Every `INVARIANT_INTERVAL` ticks the volume and flow buffers are scanned
//! for NaN or infinity. The tick itself never guards against numeric
//! degeneracy, so a corrupted value is logged and reset to zero here before
//! it can spread to its neighbours.

use bevy::prelude::*;

use crate::config::INVARIANT_INTERVAL;
use crate::fluid::Fluid;

/// Violations found by the last validation pass. Used by integration tests.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluidInvariantViolations {
    pub volume: u32,
    pub flow: u32,
    /// Passes that found at least one violation since startup.
    pub repaired_passes: u32,
}

/// Counts of values reset by one repair pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RepairReport {
    pub volume: u32,
    pub flow: u32,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.volume == 0 && self.flow == 0
    }
}

/// True when every volume and flow value is finite.
pub fn is_finite_state(fluid: &Fluid) -> bool {
    let flow = &fluid.flow;
    fluid.grid.volume.iter().all(|v| v.is_finite())
        && flow.flow_x.iter().all(|f| f.is_finite())
        && flow.flow_y.iter().all(|f| f.is_finite())
}

/// Zero every non-finite volume and current flow value.
pub fn repair_non_finite(fluid: &mut Fluid) -> RepairReport {
    let mut report = RepairReport::default();

    for v in fluid.grid.volume.iter_mut() {
        if !v.is_finite() {
            *v = 0.0;
            report.volume += 1;
        }
    }

    let flow = &mut fluid.flow;
    for f in flow.flow_x.iter_mut().chain(flow.flow_y.iter_mut()) {
        if !f.is_finite() {
            *f = 0.0;
            report.flow += 1;
        }
    }

    report
}

pub fn validate_fluid(
    mut fluid: ResMut<Fluid>,
    mut violations: ResMut<FluidInvariantViolations>,
) {
    if !fluid.tick_count().is_multiple_of(INVARIANT_INTERVAL) {
        return;
    }
    violations.volume = 0;
    violations.flow = 0;

    // A clean pass must not mark `Fluid` changed.
    if is_finite_state(&fluid) {
        return;
    }

    let report = repair_non_finite(&mut fluid);
    warn!(
        "Invariant violation at tick {}: reset {} non-finite volumes and {} non-finite flows to 0",
        fluid.tick_count(),
        report.volume,
        report.flow
    );
    violations.volume = report.volume;
    violations.flow = report.flow;
    violations.repaired_passes += 1;
}

pub struct InvariantChecksPlugin;

impl Plugin for InvariantChecksPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FluidInvariantViolations>().add_systems(
            FixedUpdate,
            validate_fluid
                .before(crate::stats::update_fluid_stats)
                .in_set(crate::SimulationSet::PostSim),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_state_is_finite() {
        let mut fluid = Fluid::new(6, 6);
        fluid.add(3, 3, 10.0);
        fluid.update_n(5);
        assert!(is_finite_state(&fluid));
        assert!(repair_non_finite(&mut fluid).is_clean());
    }

    #[test]
    fn test_repair_resets_nan_volume() {
        let mut fluid = Fluid::new(6, 6);
        fluid.add(2, 2, 5.0);
        let idx = fluid.grid.index(3, 3);
        fluid.grid.volume[idx] = f64::NAN;
        assert!(!is_finite_state(&fluid));

        let report = repair_non_finite(&mut fluid);
        assert_eq!(report, RepairReport { volume: 1, flow: 0 });
        assert_eq!(fluid.volume_at(3, 3), 0.0);
        assert_eq!(fluid.volume_at(2, 2), 5.0, "finite cells untouched");
    }

    #[test]
    fn test_repair_resets_infinite_flow() {
        let mut fluid = Fluid::new(6, 6);
        fluid.flow.set_flow_x(1, 1, f64::INFINITY);
        fluid.flow.set_flow_y(2, 2, f64::NEG_INFINITY);
        fluid.flow.set_flow_y(0, 0, 0.5);

        let report = repair_non_finite(&mut fluid);
        assert_eq!(report, RepairReport { volume: 0, flow: 2 });
        assert_eq!(fluid.flow.flow_x_at(1, 1), 0.0);
        assert_eq!(fluid.flow.flow_y_at(2, 2), 0.0);
        assert_eq!(fluid.flow.flow_y_at(0, 0), 0.5);
    }

    #[test]
    fn test_repaired_state_keeps_ticking_finite() {
        let mut fluid = Fluid::new(8, 8);
        fluid.add(4, 4, 50.0);
        let idx = fluid.grid.index(3, 4);
        fluid.grid.volume[idx] = f64::NAN;
        repair_non_finite(&mut fluid);
        fluid.update_n(20);
        assert!(is_finite_state(&fluid));
    }
}
