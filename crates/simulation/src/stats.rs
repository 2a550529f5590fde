use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fluid::Fluid;

/// Aggregates over the current fluid state, refreshed after every tick.
#[derive(Resource, Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluidStats {
    pub tick: u64,
    pub total_volume: f64,
    pub interior_volume: f64,
    pub ring_volume: f64,
    /// Deepest volume in any single cell.
    pub max_depth: f64,
    pub max_water_level: f64,
    /// Number of cells holding more than `WET_THRESHOLD`.
    pub wet_cells: u32,
}

/// Volume above which a cell counts as wet.
pub const WET_THRESHOLD: f64 = 0.01;

impl FluidStats {
    pub fn from_fluid(fluid: &Fluid) -> Self {
        let grid = &fluid.grid;
        let mut max_depth = f64::MIN;
        let mut max_water_level = f64::MIN;
        let mut wet_cells = 0u32;

        for (volume, ground) in grid.volume.iter().zip(&grid.ground_height) {
            max_depth = max_depth.max(*volume);
            max_water_level = max_water_level.max(ground + volume);
            if *volume > WET_THRESHOLD {
                wet_cells += 1;
            }
        }

        Self {
            tick: fluid.tick_count(),
            total_volume: grid.total_volume(),
            interior_volume: grid.interior_volume(),
            ring_volume: grid.ring_volume(),
            max_depth,
            max_water_level,
            wet_cells,
        }
    }
}

pub fn update_fluid_stats(fluid: Res<Fluid>, mut stats: ResMut<FluidStats>) {
    if !fluid.is_changed() {
        return;
    }
    *stats = FluidStats::from_fluid(&fluid);
}

pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FluidStats>().add_systems(
            FixedUpdate,
            update_fluid_stats.in_set(crate::SimulationSet::PostSim),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = FluidStats::default();
        assert_eq!(stats.tick, 0);
        assert_eq!(stats.total_volume, 0.0);
        assert_eq!(stats.wet_cells, 0);
    }

    #[test]
    fn test_stats_from_fluid() {
        let mut fluid = Fluid::new(5, 5);
        fluid.set_ground_height(1, 1, 4.0);
        fluid.add(2, 2, 10.0);
        fluid.add(0, 0, 3.0);

        let stats = FluidStats::from_fluid(&fluid);
        assert_eq!(stats.total_volume, 13.0);
        assert_eq!(stats.interior_volume, 10.0);
        assert_eq!(stats.ring_volume, 3.0);
        assert_eq!(stats.max_depth, 10.0);
        assert_eq!(stats.max_water_level, 10.0);
        assert_eq!(stats.wet_cells, 2);
    }

    #[test]
    fn test_max_water_level_includes_ground() {
        let mut fluid = Fluid::new(4, 4);
        fluid.set_ground_height(1, 2, 50.0);
        fluid.add(1, 2, 1.5);
        let stats = FluidStats::from_fluid(&fluid);
        assert_eq!(stats.max_water_level, 51.5);
        assert_eq!(stats.max_depth, 1.5);
    }

    #[test]
    fn test_stats_track_tick_count() {
        let mut fluid = Fluid::new(5, 5);
        fluid.update_n(3);
        assert_eq!(FluidStats::from_fluid(&fluid).tick, 3);
    }
}
