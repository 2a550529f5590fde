mod mesh;
mod systems;

pub use mesh::{
    build_ground_mesh, build_water_mesh, grid_indices, surface_heights, surface_mesh,
    vertex_normals, Surface, DRY_SINK, VERTICAL_SCALE,
};
pub use systems::{spawn_surfaces, update_ground_surface, update_water_surface, GroundSurface, WaterSurface};
