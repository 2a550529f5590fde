pub const GRID_WIDTH: usize = 100;
pub const GRID_HEIGHT: usize = 100;

/// World-space size of one grid cell (x and z).
pub const CELL_SIZE: f32 = 1.0;
pub const WORLD_WIDTH: f32 = GRID_WIDTH as f32 * CELL_SIZE;
pub const WORLD_HEIGHT: f32 = GRID_HEIGHT as f32 * CELL_SIZE;

/// Vertical range shown by the visualizer, matching the terrain scale.
pub const MAX_DISPLAY_LEVEL: f32 = 100.0;
pub const MIN_DISPLAY_LEVEL: f32 = -5.0;

// ---------------------------------------------------------------------------
// Flow model constants
// ---------------------------------------------------------------------------

/// Divisor applied to head differences; `inverse viscosity = 0.25 / VISCOSITY`.
pub const VISCOSITY: f64 = 3.0;
pub const SPREAD_AMOUNT: f64 = 0.2;
pub const DAMPING: f64 = 0.99;
/// An edge may discharge at most `volume / DISCHARGE_DIVISOR` of its source cell per tick.
pub const DISCHARGE_DIVISOR: f64 = 4.0;
pub const MINIMUM_FLOW_THRESHOLD: f64 = 0.1;

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

pub const TERRAIN_SEED: i32 = 42;
pub const TERRAIN_FREQUENCY: f32 = 0.03;
/// Brightness in [0,1] is raised to this power before scaling, flattening lowlands.
pub const TERRAIN_EXPONENT: f64 = 5.0;
pub const TERRAIN_HEIGHT_SCALE: f64 = 100.0;

// ---------------------------------------------------------------------------
// Driver cadence and injection
// ---------------------------------------------------------------------------

pub const DEFAULT_UPDATES_PER_SECOND: f64 = 30.0;
pub const MIN_UPDATES_PER_SECOND: f64 = 0.5;
pub const MAX_UPDATES_PER_SECOND: f64 = 240.0;

/// Injections add `10^exponent` units of volume.
pub const DEFAULT_INJECTION_EXPONENT: f64 = 3.0;
pub const MIN_INJECTION_EXPONENT: f64 = 0.0;
pub const MAX_INJECTION_EXPONENT: f64 = 6.0;

pub const DEFAULT_RNG_SEED: u64 = 42;

/// Environment variable holding an optional path to a JSON `FluidSettings` file.
pub const SETTINGS_ENV_VAR: &str = "FLUIDS_CONFIG";

/// Ticks between non-finite value scans of the fluid state.
pub const INVARIANT_INTERVAL: u64 = 10;
