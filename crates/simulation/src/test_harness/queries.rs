//! Query, action and simulation-tick methods for `TestFluid`.

use bevy::prelude::*;

use crate::driver::SimulationControl;
use crate::fluid::Fluid;
use crate::injection::{ClearWater, InjectFluid, InjectionTarget};
use crate::invariant_checks::FluidInvariantViolations;
use crate::stats::FluidStats;

use super::TestFluid;

impl TestFluid {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule. This bypasses Bevy's time system entirely, which avoids
    /// issues with `MinimalPlugins` not advancing virtual time between
    /// updates.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Run one full frame (`Main` schedule), including `Update` systems.
    pub fn update_frame(&mut self) {
        self.app.update();
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Queue an injection; it is applied at the start of the next tick.
    pub fn inject(&mut self, target: InjectionTarget, amount: f64) {
        self.app
            .world_mut()
            .send_event(InjectFluid { target, amount });
    }

    /// Queue a clear; it is applied at the start of the next tick.
    pub fn clear_water(&mut self) {
        self.app.world_mut().send_event(ClearWater);
    }

    /// Queue a manual single step (turns auto-run off).
    pub fn request_step(&mut self) {
        self.control_mut().request_step();
    }

    pub fn set_auto_run(&mut self, on: bool) {
        self.control_mut().auto_run = on;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Access the ECS world mutably.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Get a reference to any resource.
    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn fluid(&self) -> &Fluid {
        self.resource::<Fluid>()
    }

    pub fn fluid_mut(&mut self) -> Mut<'_, Fluid> {
        self.app.world_mut().resource_mut::<Fluid>()
    }

    pub fn stats(&self) -> &FluidStats {
        self.resource::<FluidStats>()
    }

    pub fn control(&self) -> &SimulationControl {
        self.resource::<SimulationControl>()
    }

    pub fn violations(&self) -> &FluidInvariantViolations {
        self.resource::<FluidInvariantViolations>()
    }

    pub fn tick_count(&self) -> u64 {
        self.fluid().tick_count()
    }

    pub fn volume_at(&self, x: usize, y: usize) -> f64 {
        self.fluid().volume_at(x, y)
    }

    pub fn water_level_at(&self, x: usize, y: usize) -> f64 {
        self.fluid().water_level_at(x, y)
    }

    pub fn total_volume(&self) -> f64 {
        self.fluid().grid.total_volume()
    }
}
