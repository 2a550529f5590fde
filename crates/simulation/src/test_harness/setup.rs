//! Builder methods for terrain, water and control setup in integration tests.

use crate::driver::SimulationControl;
use crate::fluid::{FlowParams, Fluid};
use crate::injection::seed_border;
use crate::terrain::{apply_terrain, TerrainSource};

use super::TestFluid;

impl TestFluid {
    // -----------------------------------------------------------------------
    // Terrain and water
    // -----------------------------------------------------------------------

    /// Apply a terrain source to the whole grid.
    ///
    /// # Panics
    /// If the source is rejected (e.g. a mismatched heightmap buffer).
    pub fn with_terrain(mut self, source: TerrainSource) -> Self {
        {
            let mut fluid = self.app.world_mut().resource_mut::<Fluid>();
            if let Err(e) = apply_terrain(&mut fluid, &source) {
                panic!("terrain rejected: {e}");
            }
        }
        self
    }

    /// Set a single cell's ground height.
    pub fn with_ground(mut self, x: usize, y: usize, height: f64) -> Self {
        self.app
            .world_mut()
            .resource_mut::<Fluid>()
            .set_ground_height(x, y, height);
        self
    }

    /// Add volume directly, bypassing the injection events.
    pub fn with_water(mut self, x: usize, y: usize, amount: f64) -> Self {
        self.app.world_mut().resource_mut::<Fluid>().add(x, y, amount);
        self
    }

    /// Seed the left column and top row with `amount` each.
    pub fn with_border_seed(mut self, amount: f64) -> Self {
        seed_border(&mut self.app.world_mut().resource_mut::<Fluid>(), amount);
        self
    }

    /// # Panics
    /// If `params` fails validation.
    pub fn with_params(mut self, params: FlowParams) -> Self {
        {
            let mut fluid = self.app.world_mut().resource_mut::<Fluid>();
            if let Err(e) = fluid.set_params(params) {
                panic!("params rejected: {e}");
            }
        }
        self
    }

    // -----------------------------------------------------------------------
    // Driver
    // -----------------------------------------------------------------------

    /// Start with auto-run off so only explicit steps advance the fluid.
    pub fn paused(mut self) -> Self {
        self.control_mut().auto_run = false;
        self
    }

    pub fn with_updates_per_second(mut self, ups: f64) -> Self {
        self.control_mut().set_updates_per_second(ups);
        self
    }

    pub(super) fn control_mut(&mut self) -> bevy::prelude::Mut<'_, SimulationControl> {
        self.app.world_mut().resource_mut::<SimulationControl>()
    }
}
