//! Deterministic ordering of the fluid systems via `SystemSet` phases.
//!
//! # FixedUpdate phases (`SimulationSet`)
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Drains injection and clear requests into `Fluid`.
//! * **Simulation** – The single `Fluid::update` tick.
//! * **PostSim** – Invariant checks and stats. Stats only *read* the fluid,
//!   so rendering and UI can consume them on the next frame.
//!
//! # Update phases (`SimulationUpdateSet`)
//!
//! ```text
//! Input  →  Visual
//! ```
//!
//! * **Input** – Per-frame control changes (timestep sync, UI requests).
//! * **Visual** – Mesh rebuilds and other render-only work.

use bevy::prelude::*;

// ---------------------------------------------------------------------------
// FixedUpdate phases
// ---------------------------------------------------------------------------

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain by `SimulationPlugin`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Volume injection and clearing.
    PreSim,
    /// The fluid tick.
    Simulation,
    /// Invariant repair and aggregate stats.
    PostSim,
}

// ---------------------------------------------------------------------------
// Update phases
// ---------------------------------------------------------------------------

/// Ordered phases for systems running in the `Update` schedule.
///
/// Configured as a chain: `Input` → `Visual`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationUpdateSet {
    /// Per-frame input processing.
    Input,
    /// Visual-only updates.
    Visual,
}
