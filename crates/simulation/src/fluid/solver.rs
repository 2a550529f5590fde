//! The four-stage per-tick flow update.
//!
//! 1. `update_flow`  - accelerate every edge by its head difference
//! 2. `spread_flow`  - rotate buffers, decay, push a share of each flow downstream
//! 3. `dampen_flow`  - cap each edge at a fraction of its source volume, then decay
//! 4. `apply_flow`   - move volume by the divergence of the flow, ring excluded
//!
//! Stages are public so tests and diagnostics can observe intermediate state;
//! `FlowSolver::update` is the only entry point the driver uses.

use super::flow_field::FlowField;
use super::grid::FluidGrid;
use super::params::FlowParams;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowSolver {
    pub params: FlowParams,
}

impl FlowSolver {
    pub fn new(params: FlowParams) -> Self {
        Self { params }
    }

    /// Advance `grid` and `flow` by exactly one tick.
    pub fn update(&self, grid: &mut FluidGrid, flow: &mut FlowField) {
        debug_assert_eq!(flow.edges_x, grid.width.saturating_sub(1));
        debug_assert_eq!(flow.edges_y, grid.height.saturating_sub(1));

        self.update_flow(grid, flow);
        self.spread_flow(flow);
        self.dampen_flow(grid, flow);
        self.apply_flow(grid, flow);
    }

    /// Accumulate head differences onto the existing flow. Flow is never
    /// recomputed from scratch, which is what carries momentum across ticks.
    pub fn update_flow(&self, grid: &FluidGrid, flow: &mut FlowField) {
        let inverse_viscosity = self.params.inverse_viscosity();
        let w = grid.width;
        let level = |i: usize| grid.ground_height[i] + grid.volume[i];

        for y in 0..flow.edges_y {
            for x in 0..flow.edges_x {
                let i = y * w + x;
                let e = y * flow.edges_x + x;
                let here = level(i);

                let delta_x = here - level(i + 1);
                flow.flow_x[e] += delta_x * inverse_viscosity;

                let delta_y = here - level(i + w);
                flow.flow_y[e] += delta_y * inverse_viscosity;
            }
        }
    }

    /// Diffuse flow along its own direction of travel.
    ///
    /// Decay covers every edge; the downstream push only reads edges in
    /// `[1, edges - 1)` on each axis, so the outermost edge rows and columns
    /// never receive spread contributions from their outer side.
    pub fn spread_flow(&self, flow: &mut FlowField) {
        let spread = self.params.spread_amount;
        let keep = 1.0 - spread;

        flow.rotate();

        let FlowField {
            edges_x,
            edges_y,
            flow_x,
            flow_y,
            flow_x_prev,
            flow_y_prev,
        } = flow;
        let ex = *edges_x;
        let ey = *edges_y;

        for (cur, prev) in flow_x.iter_mut().zip(flow_x_prev.iter()) {
            *cur = prev * keep;
        }
        for (cur, prev) in flow_y.iter_mut().zip(flow_y_prev.iter()) {
            *cur = prev * keep;
        }

        for y in 1..ey.saturating_sub(1) {
            for x in 1..ex.saturating_sub(1) {
                let e = y * ex + x;

                let fx = flow_x_prev[e];
                if fx > 0.0 {
                    flow_x[e + 1] += fx * spread;
                } else {
                    flow_x[e - 1] += fx * spread;
                }

                let fy = flow_y_prev[e];
                if fy > 0.0 {
                    flow_y[e + ex] += fy * spread;
                } else {
                    flow_y[e - ex] += fy * spread;
                }
            }
        }
    }

    /// Cap each edge so no cell discharges more than `1 / discharge_divisor`
    /// of its volume through it, then apply damping.
    pub fn dampen_flow(&self, grid: &FluidGrid, flow: &mut FlowField) {
        let w = grid.width;
        for y in 0..flow.edges_y {
            for x in 0..flow.edges_x {
                let i = y * w + x;
                let e = y * flow.edges_x + x;

                flow.flow_x[e] =
                    self.clamp_edge(flow.flow_x[e], grid.volume[i], grid.volume[i + 1]);
                flow.flow_y[e] =
                    self.clamp_edge(flow.flow_y[e], grid.volume[i], grid.volume[i + w]);
            }
        }
    }

    /// Clamp and damp a single edge flowing from `upstream` (positive
    /// direction) or `downstream` (negative direction).
    #[inline]
    fn clamp_edge(&self, f: f64, upstream: f64, downstream: f64) -> f64 {
        let p = &self.params;
        let clamped = if p.minimum_flow && f.abs() < p.minimum_flow_threshold {
            0.0
        } else if f > 0.0 {
            f.min(upstream / p.discharge_divisor)
        } else {
            -(-f).min(downstream / p.discharge_divisor)
        };
        clamped * p.damping
    }

    /// Move volume by the net flux into each interior cell. The outer ring is
    /// a closed boundary and is never written here.
    pub fn apply_flow(&self, grid: &mut FluidGrid, flow: &FlowField) {
        let policy = self.params.negative_volume;
        let w = grid.width;
        let ex = flow.edges_x;

        for y in 1..grid.height.saturating_sub(1) {
            for x in 1..w.saturating_sub(1) {
                let i = y * w + x;
                let e = y * ex + x;

                let delta_x = flow.flow_x[e - 1] - flow.flow_x[e];
                let delta_y = flow.flow_y[e - ex] - flow.flow_y[e];

                grid.volume[i] = policy.resolve(grid.volume[i] + delta_x + delta_y);
            }
        }
    }
}
