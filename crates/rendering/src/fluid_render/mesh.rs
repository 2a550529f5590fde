use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use simulation::config::{CELL_SIZE, MAX_DISPLAY_LEVEL, MIN_DISPLAY_LEVEL};
use simulation::stats::WET_THRESHOLD;
use simulation::Fluid;

use crate::color_ramps::{GROUND, WATER};

/// World units per unit of elevation or volume.
pub const VERTICAL_SCALE: f32 = 0.25;
/// Dry water vertices sit this far below the ground so the terrain shows through.
pub const DRY_SINK: f32 = 0.05;
/// Depth at which water reaches the darkest ramp color.
const DEEP_WATER: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Ground,
    Water,
}

/// One world-space Y per cell, row-major like the grid.
pub fn surface_heights(fluid: &Fluid, surface: Surface) -> Vec<f32> {
    let grid = &fluid.grid;
    grid.ground_height
        .iter()
        .zip(&grid.volume)
        .map(|(&ground, &volume)| {
            let ground_y = display_y(ground);
            match surface {
                Surface::Ground => ground_y,
                Surface::Water if volume > WET_THRESHOLD => display_y(ground + volume),
                Surface::Water => ground_y - DRY_SINK,
            }
        })
        .collect()
}

fn display_y(level: f64) -> f32 {
    let level = level as f32;
    let level = if level.is_nan() { 0.0 } else { level };
    level.clamp(MIN_DISPLAY_LEVEL, MAX_DISPLAY_LEVEL) * VERTICAL_SCALE
}

/// Triangle indices for a `width x height` vertex lattice, two per quad.
pub fn grid_indices(width: usize, height: usize) -> Vec<u32> {
    let quads = width.saturating_sub(1) * height.saturating_sub(1);
    let mut indices = Vec::with_capacity(quads * 6);
    for y in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let tl = (y * width + x) as u32;
            let tr = tl + 1;
            let bl = tl + width as u32;
            let br = bl + 1;
            // Two triangles: TL-BR-TR and TL-BL-BR
            indices.extend_from_slice(&[tl, br, tr, tl, bl, br]);
        }
    }
    indices
}

/// Smooth per-vertex normals from central differences of the heights.
pub fn vertex_normals(width: usize, height: usize, heights: &[f32]) -> Vec<[f32; 3]> {
    let h = |x: usize, y: usize| heights[y * width + x];
    let mut normals = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let (x0, x1) = (x.saturating_sub(1), (x + 1).min(width - 1));
            let (y0, y1) = (y.saturating_sub(1), (y + 1).min(height - 1));
            let dx = if x1 > x0 {
                (h(x1, y) - h(x0, y)) / ((x1 - x0) as f32 * CELL_SIZE)
            } else {
                0.0
            };
            let dz = if y1 > y0 {
                (h(x, y1) - h(x, y0)) / ((y1 - y0) as f32 * CELL_SIZE)
            } else {
                0.0
            };
            let n = Vec3::new(-dx, 1.0, -dz).normalize();
            normals.push(n.to_array());
        }
    }
    normals
}

/// Heightfield mesh with one vertex per cell at `(x, height, y)`.
pub fn surface_mesh(width: usize, height: usize, heights: &[f32], colors: Vec<[f32; 4]>) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(width * height);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(width * height);
    let u_span = width.saturating_sub(1).max(1) as f32;
    let v_span = height.saturating_sub(1).max(1) as f32;

    for y in 0..height {
        for x in 0..width {
            positions.push([
                x as f32 * CELL_SIZE,
                heights[y * width + x],
                y as f32 * CELL_SIZE,
            ]);
            uvs.push([x as f32 / u_span, y as f32 / v_span]);
        }
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vertex_normals(width, height, heights))
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(grid_indices(width, height)))
}

pub fn build_ground_mesh(fluid: &Fluid) -> Mesh {
    let heights = surface_heights(fluid, Surface::Ground);
    let colors = fluid
        .grid
        .ground_height
        .iter()
        .map(|&g| GROUND.sample_rgba(g as f32 / MAX_DISPLAY_LEVEL, 1.0))
        .collect();
    surface_mesh(fluid.width(), fluid.height(), &heights, colors)
}

pub fn build_water_mesh(fluid: &Fluid) -> Mesh {
    let heights = surface_heights(fluid, Surface::Water);
    let colors = fluid
        .grid
        .volume
        .iter()
        .map(|&v| water_color(v))
        .collect();
    surface_mesh(fluid.width(), fluid.height(), &heights, colors)
}

fn water_color(volume: f64) -> [f32; 4] {
    if volume <= WET_THRESHOLD {
        return [0.0, 0.0, 0.0, 0.0];
    }
    let t = volume as f32 / DEEP_WATER;
    WATER.sample_rgba(t, 0.45 + 0.45 * t.clamp(0.0, 1.0))
}
