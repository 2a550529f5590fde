//! # TestFluid: headless integration test harness for the fluid simulation
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running integration tests without a window or renderer.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::driver::SimulationControl;
use crate::fluid::Fluid;
use crate::settings::{FluidSettings, SkipFluidInit};
use crate::SimulationPlugin;

/// Side length of the grid used by `TestFluid::new`.
pub const TEST_GRID_SIZE: usize = 16;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up terrain and water, then call `tick()` to
/// advance the simulation and query/assert on the resulting ECS state.
pub struct TestFluid {
    app: App,
}

impl TestFluid {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A flat, dry `TEST_GRID_SIZE` square grid with auto-run enabled.
    pub fn new() -> Self {
        Self::with_size(TEST_GRID_SIZE, TEST_GRID_SIZE)
    }

    /// A flat, dry grid of the given size with auto-run enabled.
    pub fn with_size(width: usize, height: usize) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Insert the marker BEFORE SimulationPlugin so init_fluid skips.
        app.insert_resource(SkipFluidInit);
        app.add_plugins(SimulationPlugin);
        app.insert_resource(Fluid::new(width, height));

        // Run one update so Startup systems execute (init_fluid will no-op).
        app.update();

        Self::running(app)
    }

    /// Build the fluid exactly as the app does, through `init_fluid`.
    pub fn from_settings(settings: FluidSettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(settings);
        app.add_plugins(SimulationPlugin);
        app.update();

        Self { app }
    }

    fn running(mut app: App) -> Self {
        if let Some(mut control) = app.world_mut().get_resource_mut::<SimulationControl>() {
            control.auto_run = true;
            control.pending_steps = 0;
        }
        Self { app }
    }
}

impl Default for TestFluid {
    fn default() -> Self {
        Self::new()
    }
}
