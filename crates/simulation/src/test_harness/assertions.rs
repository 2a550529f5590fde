//! Assertion helpers for `TestFluid` integration tests.

use super::TestFluid;

impl TestFluid {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Assert the total volume is within `tolerance` of `expected`.
    pub fn assert_total_volume_near(&self, expected: f64, tolerance: f64) {
        let total = self.total_volume();
        assert!(
            (total - expected).abs() <= tolerance,
            "Expected total volume {expected} ± {tolerance}, got {total}"
        );
    }

    /// Assert every volume and flow value is finite.
    pub fn assert_all_finite(&self) {
        let fluid = self.fluid();
        for (i, v) in fluid.grid.volume.iter().enumerate() {
            assert!(v.is_finite(), "volume[{i}] is {v}");
        }
        for (i, f) in fluid.flow.flow_x.iter().enumerate() {
            assert!(f.is_finite(), "flow_x[{i}] is {f}");
        }
        for (i, f) in fluid.flow.flow_y.iter().enumerate() {
            assert!(f.is_finite(), "flow_y[{i}] is {f}");
        }
    }

    /// Assert no cell holds negative volume.
    pub fn assert_non_negative(&self) {
        let grid = &self.fluid().grid;
        for y in 0..grid.height {
            for x in 0..grid.width {
                let v = grid.volume_at(x, y);
                assert!(v >= 0.0, "Expected non-negative volume at ({x}, {y}), got {v}");
            }
        }
    }

    /// Assert the fluid has advanced exactly `expected` ticks.
    pub fn assert_ticks(&self, expected: u64) {
        let ticks = self.tick_count();
        assert_eq!(ticks, expected, "Expected {expected} ticks, got {ticks}");
    }
}
