use bevy::prelude::*;

use simulation::Fluid;

use super::mesh::{build_ground_mesh, build_water_mesh};

/// Terrain surface; remembers the ground revision its mesh was built from.
#[derive(Component, Debug)]
pub struct GroundSurface {
    pub revision: u64,
}

/// Water-level surface, rebuilt whenever `Fluid` changes.
#[derive(Component, Debug)]
pub struct WaterSurface;

pub fn spawn_surfaces(
    mut commands: Commands,
    fluid: Res<Fluid>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(build_ground_mesh(&fluid))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::default(),
        GroundSurface {
            revision: fluid.grid.ground_revision,
        },
    ));

    commands.spawn((
        Mesh3d(meshes.add(build_water_mesh(&fluid))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: 0.15,
            reflectance: 0.6,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
        WaterSurface,
    ));

    info!(
        "Spawned fluid surfaces for {}x{} grid",
        fluid.width(),
        fluid.height()
    );
}

pub fn update_water_surface(
    fluid: Res<Fluid>,
    query: Query<&Mesh3d, With<WaterSurface>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !fluid.is_changed() {
        return;
    }
    for mesh_handle in &query {
        meshes.insert(&mesh_handle.0, build_water_mesh(&fluid));
    }
}

pub fn update_ground_surface(
    fluid: Res<Fluid>,
    mut query: Query<(&mut GroundSurface, &Mesh3d)>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !fluid.is_changed() {
        return;
    }
    let revision = fluid.grid.ground_revision;
    for (mut surface, mesh_handle) in &mut query {
        if surface.revision == revision {
            continue;
        }
        meshes.insert(&mesh_handle.0, build_ground_mesh(&fluid));
        surface.revision = revision;
        debug!("Rebuilt ground surface at revision {}", revision);
    }
}
