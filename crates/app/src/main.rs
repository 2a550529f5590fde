use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use rendering::camera::OrbitCamera;
use simulation::driver::SimulationControl;
use simulation::injection::{InjectFluid, InjectionTarget};
use simulation::settings::FluidSettings;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Fluids".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(FluidSettings::from_env())
    .add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    // Screenshot mode: pours water, takes preset screenshots and exits
    if std::env::var("FLUIDS_SCREENSHOTS").is_ok() {
        app.insert_resource(ScreenshotQueue {
            frame: 0,
            current: 0,
            presets: vec![
                ShotPreset { name: "01_overview", yaw: 45f32.to_radians(), pitch: 40f32.to_radians(), zoom: 1.0 },
                ShotPreset { name: "02_top_down", yaw: 0.0, pitch: 85f32.to_radians(), zoom: 1.0 },
                ShotPreset { name: "03_low_angle", yaw: -30f32.to_radians(), pitch: 15f32.to_radians(), zoom: 0.6 },
            ],
        });
        app.add_systems(Update, drive_screenshots);
    }

    app.run();
}

/// Frames to let the water spread before the first shot.
const SETTLE_FRAMES: u32 = 240;
const FRAMES_PER_SHOT: u32 = 12;

#[derive(Resource)]
struct ScreenshotQueue {
    frame: u32,
    current: usize,
    presets: Vec<ShotPreset>,
}

struct ShotPreset {
    name: &'static str,
    yaw: f32,
    pitch: f32,
    /// Multiplier on the default framing distance.
    zoom: f32,
}

fn drive_screenshots(
    mut commands: Commands,
    mut queue: ResMut<ScreenshotQueue>,
    mut orbit: ResMut<OrbitCamera>,
    mut control: ResMut<SimulationControl>,
    mut inject: EventWriter<InjectFluid>,
    mut exit: EventWriter<AppExit>,
) {
    queue.frame += 1;

    if queue.frame == 1 {
        control.auto_run = true;
        inject.send(InjectFluid {
            target: InjectionTarget::Center,
            amount: 1e5,
        });
    }
    if queue.frame < SETTLE_FRAMES {
        return;
    }

    let idx = queue.current;
    if idx >= queue.presets.len() {
        if queue.frame > SETTLE_FRAMES + queue.presets.len() as u32 * FRAMES_PER_SHOT + 20 {
            exit.send(AppExit::Success);
        }
        return;
    }

    let phase = (queue.frame - SETTLE_FRAMES) % FRAMES_PER_SHOT;

    if phase == 0 {
        let p = &queue.presets[idx];
        orbit.focus = Vec3::new(orbit.bounds.x / 2.0, orbit.focus.y, orbit.bounds.y / 2.0);
        orbit.yaw = p.yaw;
        orbit.pitch = p.pitch;
        orbit.distance = orbit.bounds.max_element() * 1.4 * p.zoom;
    } else if phase == 6 {
        let name = queue.presets[idx].name;
        let path = format!("/tmp/fluids_{}.png", name);
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(path));
        queue.current += 1;
    }
}
