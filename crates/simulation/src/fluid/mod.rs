//! Height-field fluid engine.
//!
//! `Fluid` owns a `FluidGrid` (terrain + volume), a double-buffered
//! `FlowField` (per-edge flow) and the `FlowSolver` that advances both by one
//! explicit tick at a time. Water level is `ground + volume`; differences in
//! water level accelerate flow along each edge, flow spreads downstream,
//! is capped at a quarter of the source cell's volume, damped, and finally
//! moved between cells. The outermost ring of cells is a closed boundary that
//! only direct injection can change.
//!
//! The engine is single-threaded and synchronous. Every mutating call takes
//! `&mut self`, so a tick can never interleave with injection or reads.

pub mod error;
pub mod flow_field;
pub mod grid;
pub mod params;
pub mod solver;


use bevy::prelude::*;

pub use error::FluidError;
pub use flow_field::FlowField;
pub use grid::FluidGrid;
pub use params::{FlowParams, NegativeVolumePolicy};
pub use solver::FlowSolver;

use crate::config::{GRID_HEIGHT, GRID_WIDTH};

/// A simulation run: grid, flow and solver with fixed dimensions.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Fluid {
    pub grid: FluidGrid,
    pub flow: FlowField,
    pub solver: FlowSolver,
    ticks: u64,
}

impl Default for Fluid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

impl Fluid {
    /// # Panics
    /// If either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_params(width, height, FlowParams::default())
    }

    pub fn try_new(width: usize, height: usize) -> Result<Self, FluidError> {
        Self::try_with_params(width, height, FlowParams::default())
    }

    /// # Panics
    /// If either dimension is zero or `params` fails validation.
    pub fn with_params(width: usize, height: usize, params: FlowParams) -> Self {
        match Self::try_with_params(width, height, params) {
            Ok(fluid) => fluid,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_with_params(
        width: usize,
        height: usize,
        params: FlowParams,
    ) -> Result<Self, FluidError> {
        params.validate()?;
        let grid = FluidGrid::try_new(width, height)?;
        Ok(Self {
            grid,
            flow: FlowField::new(width, height),
            solver: FlowSolver::new(params),
            ticks: 0,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height
    }

    #[inline]
    pub fn params(&self) -> &FlowParams {
        &self.solver.params
    }

    pub fn set_params(&mut self, params: FlowParams) -> Result<(), FluidError> {
        params.validate()?;
        self.solver.params = params;
        Ok(())
    }

    /// Enable or disable small-flow zeroing.
    pub fn set_minimum_flow(&mut self, enabled: bool) {
        self.solver.params.minimum_flow = enabled;
    }

    /// Number of `update` calls since construction.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        self.grid.in_bounds(x, y)
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Add `amount` to the volume of `(x, y)`.
    ///
    /// Under `NegativeVolumePolicy::ClampToZero` the result is clamped at zero.
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn add(&mut self, x: usize, y: usize, amount: f64) {
        let idx = self.grid.index(x, y);
        let policy = self.solver.params.negative_volume;
        self.grid.volume[idx] = policy.resolve(self.grid.volume[idx] + amount);
    }

    pub fn try_add(&mut self, x: usize, y: usize, amount: f64) -> Result<(), FluidError> {
        self.grid.checked_index(x, y)?;
        self.add(x, y, amount);
        Ok(())
    }

    /// Overwrite the terrain elevation of `(x, y)`. Takes effect on the next tick.
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn set_ground_height(&mut self, x: usize, y: usize, height: f64) {
        self.grid.set_ground_height(x, y, height);
    }

    pub fn try_set_ground_height(
        &mut self,
        x: usize,
        y: usize,
        height: f64,
    ) -> Result<(), FluidError> {
        self.grid.checked_index(x, y)?;
        self.grid.set_ground_height(x, y, height);
        Ok(())
    }

    /// Remove all fluid and flow; terrain is kept.
    pub fn reset_volume(&mut self) {
        self.grid.clear_volume();
        self.flow.clear();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// `ground + volume` at `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid.
    #[inline]
    pub fn water_level_at(&self, x: usize, y: usize) -> f64 {
        self.grid.water_level(x, y)
    }

    /// # Panics
    /// If `(x, y)` is outside the grid.
    #[inline]
    pub fn ground_level_at(&self, x: usize, y: usize) -> f64 {
        self.grid.ground_level(x, y)
    }

    /// # Panics
    /// If `(x, y)` is outside the grid.
    #[inline]
    pub fn volume_at(&self, x: usize, y: usize) -> f64 {
        self.grid.volume_at(x, y)
    }

    pub fn try_water_level_at(&self, x: usize, y: usize) -> Result<f64, FluidError> {
        let idx = self.grid.checked_index(x, y)?;
        Ok(self.grid.ground_height[idx] + self.grid.volume[idx])
    }

    pub fn try_ground_level_at(&self, x: usize, y: usize) -> Result<f64, FluidError> {
        let idx = self.grid.checked_index(x, y)?;
        Ok(self.grid.ground_height[idx])
    }

    // -------------------------------------------------------------------------
    // Stepping
    // -------------------------------------------------------------------------

    /// Advance the simulation by exactly one tick.
    pub fn update(&mut self) {
        self.solver.update(&mut self.grid, &mut self.flow);
        self.ticks += 1;
    }

    pub fn update_n(&mut self, n: u32) {
        for _ in 0..n {
            self.update();
        }
    }
}
