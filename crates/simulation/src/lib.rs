use bevy::prelude::*;

pub mod config;
pub mod driver;
pub mod fluid;
pub mod injection;
pub mod invariant_checks;
pub mod settings;
pub mod sim_rng;
pub mod simulation_sets;
pub mod stats;
pub mod terrain;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use fluid::{FlowParams, Fluid, FluidError, NegativeVolumePolicy};
pub use simulation_sets::{SimulationSet, SimulationUpdateSet};

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        )
        .configure_sets(
            Update,
            (SimulationUpdateSet::Input, SimulationUpdateSet::Visual).chain(),
        )
        .add_systems(Startup, settings::init_fluid);

        app.add_plugins((
            injection::InjectionPlugin,
            driver::DriverPlugin,
            invariant_checks::InvariantChecksPlugin,
            stats::StatsPlugin,
        ));
    }
}
