//! Color ramps for the ground and water surfaces.
//!
//! Ramps are defined in sRGB space as evenly spaced control points and
//! interpolated linearly for intermediate values.

use bevy::prelude::*;

/// Evenly spaced sRGB control points from `t = 0` to `t = 1`.
pub struct ColorRamp {
    points: &'static [[f32; 3]],
}

impl ColorRamp {
    /// Linear sRGB blend at `t`, clamped to `[0, 1]`. NaN samples the low end.
    fn blend(&self, t: f32) -> Vec3 {
        let Some((&last, rest)) = self.points.split_last() else {
            return Vec3::ZERO;
        };
        if rest.is_empty() {
            return Vec3::from(last);
        }
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let segments = rest.len();
        let scaled = t * segments as f32;
        let seg = (scaled as usize).min(segments - 1);
        let from = Vec3::from(self.points[seg]);
        let to = Vec3::from(self.points[seg + 1]);
        from.lerp(to, scaled - seg as f32)
    }

    pub fn sample(&self, t: f32) -> Color {
        let c = self.blend(t);
        Color::srgb(c.x, c.y, c.z)
    }

    /// Vertex colour with an explicit alpha.
    pub fn sample_rgba(&self, t: f32, alpha: f32) -> [f32; 4] {
        self.blend(t).extend(alpha).to_array()
    }
}

// ---------------------------------------------------------------------------
// Ground: lowland grass, hillside earth, bare rock at the top of the range.
// ---------------------------------------------------------------------------

pub const GROUND: ColorRamp = ColorRamp {
    points: &[
        [0.30, 0.48, 0.22],
        [0.42, 0.52, 0.26],
        [0.50, 0.42, 0.28],
        [0.55, 0.50, 0.44],
        [0.86, 0.86, 0.84],
    ],
};

// ---------------------------------------------------------------------------
// Water: pale shallows to deep blue.
// ---------------------------------------------------------------------------

pub const WATER: ColorRamp = ColorRamp {
    points: &[
        [0.45, 0.78, 0.92],
        [0.20, 0.52, 0.82],
        [0.08, 0.28, 0.62],
        [0.03, 0.12, 0.40],
    ],
};
