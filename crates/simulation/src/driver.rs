//! Tick scheduling: decides when `Fluid::update` runs.
//!
//! The fluid ticks inside `FixedUpdate`, whose timestep is derived from
//! `SimulationControl::updates_per_second`. A tick happens on a fixed step
//! when auto-run is on or a manual step is queued. Injection runs in
//! `SimulationSet::PreSim` and stats in `SimulationSet::PostSim`, so a tick is
//! never interleaved with anything else touching `Fluid`.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_UPDATES_PER_SECOND, MAX_UPDATES_PER_SECOND, MIN_UPDATES_PER_SECOND};
use crate::fluid::Fluid;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationControl {
    /// Tick on every fixed step.
    pub auto_run: bool,
    pub updates_per_second: f64,
    /// Manual single steps waiting for the next fixed step.
    pub pending_steps: u32,
}

impl Default for SimulationControl {
    fn default() -> Self {
        Self {
            auto_run: false,
            updates_per_second: DEFAULT_UPDATES_PER_SECOND,
            pending_steps: 0,
        }
    }
}

impl SimulationControl {
    /// Queue a single tick. Stepping manually turns auto-run off.
    pub fn request_step(&mut self) {
        self.auto_run = false;
        self.pending_steps = self.pending_steps.saturating_add(1);
    }

    pub fn set_updates_per_second(&mut self, ups: f64) {
        self.updates_per_second = clamp_ups(ups);
    }

    /// Fixed timestep for the current rate.
    pub fn timestep(&self) -> Duration {
        Duration::from_secs_f64(1.0 / clamp_ups(self.updates_per_second))
    }

    #[inline]
    pub fn wants_tick(&self) -> bool {
        self.auto_run || self.pending_steps > 0
    }

    /// Spend one queued step if there is one; auto-run ticks are free.
    pub fn consume_tick(&mut self) {
        if self.pending_steps > 0 {
            self.pending_steps -= 1;
        }
    }
}

fn clamp_ups(ups: f64) -> f64 {
    if ups.is_finite() {
        ups.clamp(MIN_UPDATES_PER_SECOND, MAX_UPDATES_PER_SECOND)
    } else {
        DEFAULT_UPDATES_PER_SECOND
    }
}

/// Advance the fluid by one tick when the control allows it.
pub fn tick_fluid(mut control: ResMut<SimulationControl>, mut fluid: ResMut<Fluid>) {
    if !control.wants_tick() {
        return;
    }
    if control.pending_steps > 0 {
        control.consume_tick();
    }
    fluid.update();
}

/// Keep the `FixedUpdate` timestep in sync with the requested rate.
pub fn sync_fixed_timestep(control: Res<SimulationControl>, mut time: ResMut<Time<Fixed>>) {
    if !control.is_changed() {
        return;
    }
    let step = control.timestep();
    if time.timestep() != step {
        time.set_timestep(step);
        debug!("Fluid timestep set to {:?}", step);
    }
}

pub struct DriverPlugin;

impl Plugin for DriverPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationControl>()
            .add_systems(
                FixedUpdate,
                tick_fluid.in_set(crate::SimulationSet::Simulation),
            )
            .add_systems(
                Update,
                sync_fixed_timestep.in_set(crate::SimulationUpdateSet::Input),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_control_is_paused() {
        let control = SimulationControl::default();
        assert!(!control.auto_run);
        assert_eq!(control.pending_steps, 0);
        assert!(!control.wants_tick());
    }

    #[test]
    fn test_request_step_disables_auto_run() {
        let mut control = SimulationControl {
            auto_run: true,
            ..Default::default()
        };
        control.request_step();
        assert!(!control.auto_run);
        assert_eq!(control.pending_steps, 1);
        assert!(control.wants_tick());

        control.consume_tick();
        assert_eq!(control.pending_steps, 0);
        assert!(!control.wants_tick());
    }

    #[test]
    fn test_auto_run_ticks_without_pending_steps() {
        let mut control = SimulationControl {
            auto_run: true,
            ..Default::default()
        };
        assert!(control.wants_tick());
        control.consume_tick();
        assert!(control.wants_tick());
    }

    #[test]
    fn test_timestep_from_ups() {
        let mut control = SimulationControl::default();
        control.set_updates_per_second(20.0);
        assert_eq!(control.timestep(), Duration::from_millis(50));
    }

    #[test]
    fn test_ups_is_clamped() {
        let mut control = SimulationControl::default();
        control.set_updates_per_second(10_000.0);
        assert_eq!(control.updates_per_second, MAX_UPDATES_PER_SECOND);
        control.set_updates_per_second(0.0);
        assert_eq!(control.updates_per_second, MIN_UPDATES_PER_SECOND);
        control.set_updates_per_second(f64::NAN);
        assert_eq!(control.updates_per_second, DEFAULT_UPDATES_PER_SECOND);
    }

    #[test]
    fn test_timestep_never_divides_by_zero() {
        let control = SimulationControl {
            updates_per_second: 0.0,
            ..Default::default()
        };
        assert_eq!(control.timestep(), Duration::from_secs(2));
    }
}
