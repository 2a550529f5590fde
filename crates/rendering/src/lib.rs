use bevy::prelude::*;

pub mod camera;
pub mod color_ramps;
pub mod egui_input_guard;
pub mod fluid_render;

use camera::{OrbitDrag, PanDrag};
use simulation::SimulationUpdateSet;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanDrag>()
            .init_resource::<OrbitDrag>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    fluid_render::spawn_surfaces,
                )
                    .chain()
                    .after(simulation::settings::init_fluid),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan_keyboard,
                    camera::camera_pan_drag,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::apply_orbit_camera,
                )
                    .chain()
                    .in_set(SimulationUpdateSet::Input),
            )
            .add_systems(
                Update,
                (
                    fluid_render::update_ground_surface,
                    fluid_render::update_water_surface,
                )
                    .in_set(SimulationUpdateSet::Visual),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 400.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 9000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3, // 60 degrees down
            std::f32::consts::FRAC_PI_6,  // slight rotation
            0.0,
        )),
    ));
}
