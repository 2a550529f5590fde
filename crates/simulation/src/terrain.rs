//! Terrain providers: fill the fluid's ground elevation before the run starts.
//!
//! `Noise` and `Brightness` both shape a [0,1] brightness as
//! `brightness^exponent * scale`, so most of the map stays low and a few
//! bright areas rise into hills. `Waves` and `Slope` are analytic terrains
//! handy for testing flow behaviour.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::{Deserialize, Serialize};

use crate::config::{TERRAIN_EXPONENT, TERRAIN_FREQUENCY, TERRAIN_HEIGHT_SCALE, TERRAIN_SEED};
use crate::fluid::{Fluid, FluidError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TerrainSource {
    Flat {
        height: f64,
    },
    Noise {
        seed: i32,
        frequency: f32,
        exponent: f64,
        scale: f64,
    },
    /// A grayscale heightmap decoded elsewhere, `values` row-major in [0,1].
    /// Resampled nearest-neighbour onto the fluid grid.
    Brightness {
        width: usize,
        height: usize,
        values: Vec<f32>,
        exponent: f64,
        scale: f64,
    },
    /// `20 + cos(0.1x)cos(0.2y)*10 + cos(0.68x)cos(0.95y)*2`
    Waves,
    /// `20 + cos(0.2x)*10 + 0.1y`
    Slope,
}

impl Default for TerrainSource {
    fn default() -> Self {
        TerrainSource::Noise {
            seed: TERRAIN_SEED,
            frequency: TERRAIN_FREQUENCY,
            exponent: TERRAIN_EXPONENT,
            scale: TERRAIN_HEIGHT_SCALE,
        }
    }
}

/// Map a brightness in [0,1] to an elevation.
#[inline]
pub fn shape_brightness(brightness: f64, exponent: f64, scale: f64) -> f64 {
    brightness.clamp(0.0, 1.0).powf(exponent) * scale
}

/// Write every cell's ground height from `source`.
pub fn apply_terrain(fluid: &mut Fluid, source: &TerrainSource) -> Result<(), FluidError> {
    let (w, h) = (fluid.width(), fluid.height());
    match source {
        TerrainSource::Flat { height } => {
            for y in 0..h {
                for x in 0..w {
                    fluid.set_ground_height(x, y, *height);
                }
            }
        }
        TerrainSource::Noise {
            seed,
            frequency,
            exponent,
            scale,
        } => {
            let mut noise = FastNoiseLite::with_seed(*seed);
            noise.set_noise_type(Some(NoiseType::OpenSimplex2));
            noise.set_frequency(Some(*frequency));

            for y in 0..h {
                for x in 0..w {
                    let raw = noise.get_noise_2d(x as f32, y as f32);
                    let brightness = ((raw + 1.0) * 0.5) as f64; // normalize to 0..1
                    fluid.set_ground_height(x, y, shape_brightness(brightness, *exponent, *scale));
                }
            }
        }
        TerrainSource::Brightness {
            width,
            height,
            values,
            exponent,
            scale,
        } => {
            if *width == 0 || *height == 0 || values.len() != width * height {
                return Err(FluidError::Config(format!(
                    "heightmap is {}x{} but holds {} values",
                    width,
                    height,
                    values.len()
                )));
            }
            for y in 0..h {
                let sy = y * height / h;
                for x in 0..w {
                    let sx = x * width / w;
                    let brightness = values[sy * width + sx] as f64;
                    fluid.set_ground_height(x, y, shape_brightness(brightness, *exponent, *scale));
                }
            }
        }
        TerrainSource::Waves => {
            for y in 0..h {
                for x in 0..w {
                    let (fx, fy) = (x as f64, y as f64);
                    let height = 20.0
                        + (fx * 0.1).cos() * (fy * 0.2).cos() * 10.0
                        + (fx * 0.68).cos() * (fy * 0.95).cos() * 2.0;
                    fluid.set_ground_height(x, y, height);
                }
            }
        }
        TerrainSource::Slope => {
            for y in 0..h {
                for x in 0..w {
                    let height = 20.0 + (x as f64 * 0.2).cos() * 10.0 + y as f64 * 0.1;
                    fluid.set_ground_height(x, y, height);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_brightness() {
        assert_eq!(shape_brightness(0.0, 5.0, 100.0), 0.0);
        assert_eq!(shape_brightness(1.0, 5.0, 100.0), 100.0);
        assert!((shape_brightness(0.5, 5.0, 100.0) - 3.125).abs() < 1e-12);
        assert_eq!(shape_brightness(1.7, 5.0, 100.0), 100.0, "clamped above");
        assert_eq!(shape_brightness(-0.3, 5.0, 100.0), 0.0, "clamped below");
    }

    #[test]
    fn test_flat_terrain() {
        let mut fluid = Fluid::new(6, 4);
        apply_terrain(&mut fluid, &TerrainSource::Flat { height: 7.5 }).unwrap();
        assert!(fluid.grid.ground_height.iter().all(|&h| h == 7.5));
    }

    #[test]
    fn test_noise_elevation_bounds() {
        let mut fluid = Fluid::new(64, 64);
        apply_terrain(&mut fluid, &TerrainSource::default()).unwrap();
        for &h in &fluid.grid.ground_height {
            assert!(
                (0.0..=TERRAIN_HEIGHT_SCALE).contains(&h),
                "elevation {h} out of bounds"
            );
        }
        let min = fluid.grid.ground_height.iter().cloned().fold(f64::MAX, f64::min);
        let max = fluid.grid.ground_height.iter().cloned().fold(f64::MIN, f64::max);
        assert!(max > min, "noise terrain should not be flat");
    }

    #[test]
    fn test_noise_deterministic() {
        let mut a = Fluid::new(32, 32);
        let mut b = Fluid::new(32, 32);
        apply_terrain(&mut a, &TerrainSource::default()).unwrap();
        apply_terrain(&mut b, &TerrainSource::default()).unwrap();
        assert_eq!(a.grid.ground_height, b.grid.ground_height);
    }

    #[test]
    fn test_noise_seed_changes_terrain() {
        let mut a = Fluid::new(32, 32);
        let mut b = Fluid::new(32, 32);
        apply_terrain(&mut a, &TerrainSource::default()).unwrap();
        let other = TerrainSource::Noise {
            seed: 7,
            frequency: TERRAIN_FREQUENCY,
            exponent: TERRAIN_EXPONENT,
            scale: TERRAIN_HEIGHT_SCALE,
        };
        apply_terrain(&mut b, &other).unwrap();
        assert_ne!(a.grid.ground_height, b.grid.ground_height);
    }

    #[test]
    fn test_brightness_resamples_nearest() {
        let source = TerrainSource::Brightness {
            width: 2,
            height: 2,
            values: vec![0.0, 1.0, 1.0, 0.0],
            exponent: 1.0,
            scale: 10.0,
        };
        let mut fluid = Fluid::new(4, 4);
        apply_terrain(&mut fluid, &source).unwrap();
        assert_eq!(fluid.ground_level_at(0, 0), 0.0);
        assert_eq!(fluid.ground_level_at(1, 1), 0.0);
        assert_eq!(fluid.ground_level_at(3, 0), 10.0);
        assert_eq!(fluid.ground_level_at(0, 3), 10.0);
        assert_eq!(fluid.ground_level_at(3, 3), 0.0);
    }

    #[test]
    fn test_brightness_rejects_mismatched_buffer() {
        let source = TerrainSource::Brightness {
            width: 3,
            height: 3,
            values: vec![0.5; 4],
            exponent: 1.0,
            scale: 1.0,
        };
        let mut fluid = Fluid::new(4, 4);
        assert!(matches!(
            apply_terrain(&mut fluid, &source),
            Err(FluidError::Config(_))
        ));
    }

    #[test]
    fn test_analytic_terrains() {
        let mut fluid = Fluid::new(8, 8);
        apply_terrain(&mut fluid, &TerrainSource::Waves).unwrap();
        assert!((fluid.ground_level_at(0, 0) - 32.0).abs() < 1e-12);

        apply_terrain(&mut fluid, &TerrainSource::Slope).unwrap();
        assert!((fluid.ground_level_at(0, 0) - 30.0).abs() < 1e-12);
        assert!(fluid.ground_level_at(0, 7) > fluid.ground_level_at(0, 0));
    }

    #[test]
    fn test_terrain_source_serde_roundtrip() {
        let source = TerrainSource::Flat { height: 3.0 };
        let json = serde_json::to_string(&source).expect("serialize");
        let back: TerrainSource = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, source);
    }
}
