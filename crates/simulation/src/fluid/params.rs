//! Runtime parameters for the flow solver.

use serde::{Deserialize, Serialize};

use crate::config::{
    DAMPING, DISCHARGE_DIVISOR, MINIMUM_FLOW_THRESHOLD, SPREAD_AMOUNT, VISCOSITY,
};

use super::error::FluidError;

/// What happens when a cell's volume would drop below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NegativeVolumePolicy {
    /// Volume may go negative. A negative injection acts as a sink and the
    /// apply stage stays exactly conservative.
    #[default]
    Permit,
    /// `add` and the apply stage clamp the resulting volume at zero.
    ClampToZero,
}

impl NegativeVolumePolicy {
    #[inline]
    pub fn resolve(self, volume: f64) -> f64 {
        match self {
            NegativeVolumePolicy::Permit => volume,
            NegativeVolumePolicy::ClampToZero => volume.max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowParams {
    pub viscosity: f64,
    pub spread_amount: f64,
    pub damping: f64,
    pub discharge_divisor: f64,
    /// Zero any flow with magnitude below `minimum_flow_threshold` during damping.
    pub minimum_flow: bool,
    pub minimum_flow_threshold: f64,
    pub negative_volume: NegativeVolumePolicy,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            viscosity: VISCOSITY,
            spread_amount: SPREAD_AMOUNT,
            damping: DAMPING,
            discharge_divisor: DISCHARGE_DIVISOR,
            minimum_flow: false,
            minimum_flow_threshold: MINIMUM_FLOW_THRESHOLD,
            negative_volume: NegativeVolumePolicy::Permit,
        }
    }
}

impl FlowParams {
    /// Acceleration per unit of head difference.
    #[inline]
    pub fn inverse_viscosity(&self) -> f64 {
        0.25 / self.viscosity
    }

    pub fn validate(&self) -> Result<(), FluidError> {
        if !self.viscosity.is_finite() || self.viscosity <= 0.0 {
            return Err(FluidError::InvalidParams(format!(
                "viscosity must be positive and finite, got {}",
                self.viscosity
            )));
        }
        if !(0.0..=1.0).contains(&self.spread_amount) {
            return Err(FluidError::InvalidParams(format!(
                "spread_amount must be in [0, 1], got {}",
                self.spread_amount
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(FluidError::InvalidParams(format!(
                "damping must be in [0, 1], got {}",
                self.damping
            )));
        }
        if !self.discharge_divisor.is_finite() || self.discharge_divisor < 1.0 {
            return Err(FluidError::InvalidParams(format!(
                "discharge_divisor must be >= 1, got {}",
                self.discharge_divisor
            )));
        }
        if !self.minimum_flow_threshold.is_finite() || self.minimum_flow_threshold < 0.0 {
            return Err(FluidError::InvalidParams(format!(
                "minimum_flow_threshold must be >= 0, got {}",
                self.minimum_flow_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_match_model_constants() {
        let p = FlowParams::default();
        assert_eq!(p.viscosity, 3.0);
        assert_eq!(p.spread_amount, 0.2);
        assert_eq!(p.damping, 0.99);
        assert_eq!(p.discharge_divisor, 4.0);
        assert!(!p.minimum_flow, "minimum flow must be off by default");
        assert_eq!(p.minimum_flow_threshold, 0.1);
        assert_eq!(p.negative_volume, NegativeVolumePolicy::Permit);
    }

    #[test]
    fn test_inverse_viscosity() {
        let p = FlowParams::default();
        assert!((p.inverse_viscosity() - 0.25 / 3.0).abs() < 1e-12);
        assert!((p.inverse_viscosity() - 0.0833).abs() < 1e-3);
    }

    #[test]
    fn test_default_params_validate() {
        assert!(FlowParams::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            FlowParams {
                viscosity: 0.0,
                ..Default::default()
            },
            FlowParams {
                viscosity: f64::NAN,
                ..Default::default()
            },
            FlowParams {
                spread_amount: 1.5,
                ..Default::default()
            },
            FlowParams {
                damping: -0.1,
                ..Default::default()
            },
            FlowParams {
                discharge_divisor: 0.5,
                ..Default::default()
            },
            FlowParams {
                minimum_flow_threshold: -1.0,
                ..Default::default()
            },
        ];
        for params in cases {
            assert!(
                matches!(params.validate(), Err(FluidError::InvalidParams(_))),
                "expected rejection for {params:?}"
            );
        }
    }

    #[test]
    fn test_negative_volume_policy_resolve() {
        assert_eq!(NegativeVolumePolicy::Permit.resolve(-2.5), -2.5);
        assert_eq!(NegativeVolumePolicy::ClampToZero.resolve(-2.5), 0.0);
        assert_eq!(NegativeVolumePolicy::ClampToZero.resolve(3.0), 3.0);
    }

    #[test]
    fn test_params_serde_fills_missing_fields() {
        let json = r#"{ "minimum_flow": true }"#;
        let p: FlowParams = serde_json::from_str(json).expect("deserialize");
        assert!(p.minimum_flow);
        assert_eq!(p.viscosity, 3.0);
        assert_eq!(p.damping, 0.99);
    }

    #[test]
    fn test_negative_volume_policy_serde() {
        let json = serde_json::to_string(&NegativeVolumePolicy::ClampToZero).expect("serialize");
        assert_eq!(json, "\"ClampToZero\"");
    }
}
