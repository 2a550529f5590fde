//! Volume injection: the only way fluid enters (or, with a negative amount,
//! leaves) the simulation apart from the solver itself.
//!
//! UI and scripts send `InjectFluid` / `ClearWater` events; `apply_injections`
//! drains them in `SimulationSet::PreSim`, before the tick, so injection is always
//! serialized with `Fluid::update`.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_INJECTION_EXPONENT, MAX_INJECTION_EXPONENT, MIN_INJECTION_EXPONENT};
use crate::fluid::{Fluid, FluidError};
use crate::sim_rng::SimRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjectionTarget {
    /// `(width / 2, height / 2)`
    Center,
    /// Uniformly random cell drawn from `SimRng`.
    Random,
    Cell { x: usize, y: usize },
}

impl InjectionTarget {
    /// Concrete cell for this target. `Cell` is returned unchecked.
    pub fn resolve<R: Rng + ?Sized>(self, width: usize, height: usize, rng: &mut R) -> (usize, usize) {
        match self {
            InjectionTarget::Center => (width / 2, height / 2),
            InjectionTarget::Random => (rng.gen_range(0..width), rng.gen_range(0..height)),
            InjectionTarget::Cell { x, y } => (x, y),
        }
    }
}

/// Request to add `amount` of fluid at `target`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct InjectFluid {
    pub target: InjectionTarget,
    pub amount: f64,
}

/// Request to remove all fluid and flow, keeping terrain.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ClearWater;

/// Injection size chosen in the UI, as a power of ten.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InjectionSettings {
    pub exponent: f64,
}

impl Default for InjectionSettings {
    fn default() -> Self {
        Self {
            exponent: DEFAULT_INJECTION_EXPONENT,
        }
    }
}

impl InjectionSettings {
    pub fn amount(&self) -> f64 {
        injection_amount(self.exponent)
    }
}

/// `10^exponent`, with the exponent clamped to the supported slider range.
pub fn injection_amount(exponent: f64) -> f64 {
    10f64.powf(exponent.clamp(MIN_INJECTION_EXPONENT, MAX_INJECTION_EXPONENT))
}

/// Add `amount` at `target`, returning the cell that received it.
pub fn inject<R: Rng + ?Sized>(
    fluid: &mut Fluid,
    target: InjectionTarget,
    amount: f64,
    rng: &mut R,
) -> Result<(usize, usize), FluidError> {
    let (x, y) = target.resolve(fluid.width(), fluid.height(), rng);
    fluid.try_add(x, y, amount)?;
    Ok((x, y))
}

/// Pour `amount` into every cell of the left column and the top row.
///
/// The bottom-left corner and the whole right/bottom edges are left dry.
/// Ring cells are never drained by the solver, so this acts as a constant
/// head along two sides of the map.
pub fn seed_border(fluid: &mut Fluid, amount: f64) {
    let (w, h) = (fluid.width(), fluid.height());
    for y in 0..h.saturating_sub(1) {
        fluid.add(0, y, amount);
    }
    for x in 1..w.saturating_sub(1) {
        fluid.add(x, 0, amount);
    }
}

/// Drain queued `ClearWater` and `InjectFluid` events into the fluid.
pub fn apply_injections(
    mut injections: EventReader<InjectFluid>,
    mut clears: EventReader<ClearWater>,
    mut fluid: ResMut<Fluid>,
    mut rng: ResMut<SimRng>,
) {
    if !clears.is_empty() {
        clears.clear();
        fluid.reset_volume();
        info!("Cleared all water");
    }

    for ev in injections.read() {
        match inject(&mut fluid, ev.target, ev.amount, &mut rng.0) {
            Ok((x, y)) => debug!("Injected {:.1} at ({}, {})", ev.amount, x, y),
            Err(e) => warn!("Injection ignored: {}", e),
        }
    }
}

pub struct InjectionPlugin;

impl Plugin for InjectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<InjectFluid>()
            .add_event::<ClearWater>()
            .init_resource::<InjectionSettings>()
            .init_resource::<SimRng>()
            .add_systems(
                FixedUpdate,
                apply_injections.in_set(crate::SimulationSet::PreSim),
            );
    }
}
