// =============================================================================
// Run settings: grid size, flow parameters, terrain and cadence, optionally
// loaded from a JSON file, and the startup system that builds `Fluid` from them.
// =============================================================================

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_INJECTION_EXPONENT, DEFAULT_RNG_SEED, DEFAULT_UPDATES_PER_SECOND, GRID_HEIGHT,
    GRID_WIDTH, SETTINGS_ENV_VAR,
};
use crate::driver::SimulationControl;
use crate::fluid::{FlowParams, Fluid, FluidError};
use crate::injection::{seed_border, InjectionSettings};
use crate::sim_rng::SimRng;
use crate::terrain::{apply_terrain, TerrainSource};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidSettings {
    pub width: usize,
    pub height: usize,
    pub params: FlowParams,
    pub terrain: TerrainSource,
    pub rng_seed: u64,
    pub updates_per_second: f64,
    pub auto_run: bool,
    pub injection_exponent: f64,
    /// Pour this much along the left column and top row at startup.
    pub border_seed: Option<f64>,
}

impl Default for FluidSettings {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            params: FlowParams::default(),
            terrain: TerrainSource::default(),
            rng_seed: DEFAULT_RNG_SEED,
            updates_per_second: DEFAULT_UPDATES_PER_SECOND,
            auto_run: false,
            injection_exponent: DEFAULT_INJECTION_EXPONENT,
            border_seed: None,
        }
    }
}

impl FluidSettings {
    pub fn from_json_str(json: &str) -> Result<Self, FluidError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, FluidError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Settings from the file named by `FLUIDS_CONFIG`, or defaults when the
    /// variable is unset. A file that fails to load is reported and ignored.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(SETTINGS_ENV_VAR) else {
            return Self::default();
        };
        match Self::load_from_path(&path) {
            Ok(settings) => {
                info!("Loaded fluid settings from {}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to load fluid settings from {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), FluidError> {
        if self.width == 0 || self.height == 0 {
            return Err(FluidError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        self.params.validate()
    }

    /// Build a ready-to-run `Fluid`: grid, terrain and optional border water.
    pub fn build_fluid(&self) -> Result<Fluid, FluidError> {
        let mut fluid = Fluid::try_with_params(self.width, self.height, self.params)?;
        apply_terrain(&mut fluid, &self.terrain)?;
        if let Some(amount) = self.border_seed {
            seed_border(&mut fluid, amount);
        }
        Ok(fluid)
    }

    pub fn control(&self) -> SimulationControl {
        let mut control = SimulationControl {
            auto_run: self.auto_run,
            ..Default::default()
        };
        control.set_updates_per_second(self.updates_per_second);
        control
    }
}

/// Marker resource that, when present, causes `init_fluid` to skip building
/// the fluid from settings. Used by the test harness to start from a blank grid.
#[derive(Resource)]
pub struct SkipFluidInit;

pub fn init_fluid(
    mut commands: Commands,
    settings: Option<Res<FluidSettings>>,
    skip: Option<Res<SkipFluidInit>>,
) {
    if skip.is_some() {
        return;
    }
    let settings = settings.map(|s| FluidSettings::clone(&s)).unwrap_or_default();

    let fluid = match settings.build_fluid() {
        Ok(fluid) => fluid,
        Err(e) => {
            warn!("Invalid fluid settings: {}. Falling back to defaults.", e);
            match FluidSettings::default().build_fluid() {
                Ok(fluid) => fluid,
                Err(e) => {
                    error!("Default fluid settings failed to build: {}", e);
                    return;
                }
            }
        }
    };

    info!(
        "Fluid initialised: {}x{} grid, {} terrain",
        fluid.width(),
        fluid.height(),
        terrain_label(&settings.terrain)
    );

    commands.insert_resource(fluid);
    commands.insert_resource(SimRng::from_seed_u64(settings.rng_seed));
    commands.insert_resource(settings.control());
    commands.insert_resource(InjectionSettings {
        exponent: settings.injection_exponent,
    });
}

fn terrain_label(source: &TerrainSource) -> &'static str {
    match source {
        TerrainSource::Flat { .. } => "flat",
        TerrainSource::Noise { .. } => "noise",
        TerrainSource::Brightness { .. } => "heightmap",
        TerrainSource::Waves => "waves",
        TerrainSource::Slope => "slope",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluid::NegativeVolumePolicy;

    #[test]
    fn test_default_settings_build_full_grid() {
        let settings = FluidSettings::default();
        assert!(settings.validate().is_ok());
        let fluid = settings.build_fluid().unwrap();
        assert_eq!(fluid.width(), GRID_WIDTH);
        assert_eq!(fluid.height(), GRID_HEIGHT);
        assert_eq!(fluid.grid.total_volume(), 0.0);
    }

    #[test]
    fn test_json_roundtrip_defaults() {
        let settings = FluidSettings::default();
        let json = serde_json::to_string(&settings).expect("serialize");
        let back = FluidSettings::from_json_str(&json).expect("parse");
        assert_eq!(back, settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{
            "width": 20,
            "height": 10,
            "terrain": { "Flat": { "height": 2.0 } },
            "params": { "minimum_flow": true, "negative_volume": "ClampToZero" },
            "border_seed": 5.0
        }"#;
        let settings = FluidSettings::from_json_str(json).expect("parse");
        assert_eq!(settings.width, 20);
        assert_eq!(settings.height, 10);
        assert!(settings.params.minimum_flow);
        assert_eq!(settings.params.negative_volume, NegativeVolumePolicy::ClampToZero);
        assert_eq!(settings.params.damping, FlowParams::default().damping);
        assert_eq!(settings.rng_seed, DEFAULT_RNG_SEED);

        let fluid = settings.build_fluid().unwrap();
        assert_eq!(fluid.ground_level_at(7, 7), 2.0);
        // 9 cells down the left column + 18 along the top row.
        assert!((fluid.grid.total_volume() - 27.0 * 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let result = FluidSettings::from_json_str("{ not json");
        assert!(matches!(result, Err(FluidError::Config(_))));
    }

    #[test]
    fn test_zero_width_rejected() {
        let result = FluidSettings::from_json_str(r#"{ "width": 0 }"#);
        assert!(matches!(result, Err(FluidError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = FluidSettings::from_json_str(r#"{ "params": { "viscosity": -1.0 } }"#);
        assert!(matches!(result, Err(FluidError::InvalidParams(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = FluidSettings::load_from_path("/nonexistent/fluids.json");
        assert!(matches!(result, Err(FluidError::Config(_))));
    }

    #[test]
    fn test_control_from_settings() {
        let settings = FluidSettings {
            updates_per_second: 1000.0,
            auto_run: true,
            ..Default::default()
        };
        let control = settings.control();
        assert!(control.auto_run);
        assert_eq!(control.updates_per_second, crate::config::MAX_UPDATES_PER_SECOND);
        assert_eq!(control.pending_steps, 0);
    }
}
