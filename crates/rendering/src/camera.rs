use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use simulation::config::CELL_SIZE;
use simulation::Fluid;

use crate::egui_input_guard::egui_wants_pointer;
use crate::fluid_render::VERTICAL_SCALE;

const PAN_SPEED: f32 = 80.0;
const ZOOM_SPEED: f32 = 0.15;
const MIN_DISTANCE: f32 = 5.0;
const MAX_DISTANCE: f32 = 600.0;
const MIN_PITCH: f32 = 5.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;

/// Orbital camera model: camera orbits around a focus point above the grid.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians (clamped between MIN_PITCH and MAX_PITCH)
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
    /// World-space extent of the grid, used to keep the focus nearby.
    pub bounds: Vec2,
}

impl OrbitCamera {
    /// Frame a `width x height` grid from its south-east corner.
    pub fn for_grid(width: usize, height: usize) -> Self {
        let bounds = Vec2::new(width as f32 * CELL_SIZE, height as f32 * CELL_SIZE);
        Self {
            focus: Vec3::new(bounds.x / 2.0, 10.0 * VERTICAL_SCALE, bounds.y / 2.0),
            yaw: 45.0_f32.to_radians(),
            pitch: 40.0_f32.to_radians(),
            distance: bounds.max_element() * 1.4,
            bounds,
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::for_grid(
            simulation::config::GRID_WIDTH,
            simulation::config::GRID_HEIGHT,
        )
    }
}

/// Screen-space drag tracked from press to release of one mouse button.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Cursor position at the last update while the button is held.
    pub anchor: Option<Vec2>,
}

impl DragState {
    /// Advance the drag and return the cursor movement since the last call.
    ///
    /// A drag only starts on a press the UI did not claim, and ends on
    /// release. Frames without a cursor position keep the anchor.
    pub fn track(
        &mut self,
        pressed: bool,
        released: bool,
        blocked: bool,
        cursor: Option<Vec2>,
    ) -> Option<Vec2> {
        if released {
            self.anchor = None;
            return None;
        }
        if pressed && !blocked {
            self.anchor = cursor;
            return None;
        }
        let (anchor, pos) = (self.anchor?, cursor?);
        self.anchor = Some(pos);
        Some(pos - anchor)
    }
}

/// Middle-button pan drag.
#[derive(Resource, Debug, Default)]
pub struct PanDrag(pub DragState);

/// Right-button orbit drag.
#[derive(Resource, Debug, Default)]
pub struct OrbitDrag(pub DragState);

pub fn setup_camera(mut commands: Commands, fluid: Option<Res<Fluid>>) {
    let orbit = match fluid {
        Some(fluid) => OrbitCamera::for_grid(fluid.width(), fluid.height()),
        None => OrbitCamera::default(),
    };
    let (pos, look_at) = orbit_to_transform(&orbit);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
    commands.insert_resource(orbit);
}

fn clamp_focus(focus: &mut Vec3, bounds: Vec2) {
    let margin = bounds.max_element() * 0.5;
    focus.x = focus.x.clamp(-margin, bounds.x + margin);
    focus.z = focus.z.clamp(-margin, bounds.y + margin);
}

/// Camera position and look-at target for an orbit state.
pub fn orbit_to_transform(orbit: &OrbitCamera) -> (Vec3, Vec3) {
    let offset = Vec3::new(
        orbit.pitch.cos() * orbit.yaw.sin(),
        orbit.pitch.sin(),
        orbit.pitch.cos() * orbit.yaw.cos(),
    ) * orbit.distance;
    (orbit.focus + offset, orbit.focus)
}

/// Map a screen-relative direction (x right, y down) onto the ground plane
/// as seen from a camera at `yaw`.
fn ground_direction(screen: Vec2, yaw: f32) -> Vec2 {
    let (sin, cos) = yaw.sin_cos();
    Vec2::new(
        screen.x * cos + screen.y * sin,
        screen.y * cos - screen.x * sin,
    )
}

fn pan_focus(orbit: &mut OrbitCamera, ground: Vec2) {
    orbit.focus.x += ground.x;
    orbit.focus.z += ground.y;
    let bounds = orbit.bounds;
    clamp_focus(&mut orbit.focus, bounds);
}

pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    let (pos, look_at) = orbit_to_transform(&orbit);
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
}

const PAN_KEYS: [(KeyCode, KeyCode, Vec2); 4] = [
    (KeyCode::KeyW, KeyCode::ArrowUp, Vec2::NEG_Y),
    (KeyCode::KeyS, KeyCode::ArrowDown, Vec2::Y),
    (KeyCode::KeyA, KeyCode::ArrowLeft, Vec2::NEG_X),
    (KeyCode::KeyD, KeyCode::ArrowRight, Vec2::X),
];

/// WASD/arrows pan across the grid relative to the view; Q/E lower and raise
/// the focus.
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let dir: Vec2 = PAN_KEYS
        .iter()
        .filter(|(key, alt, _)| keys.pressed(*key) || keys.pressed(*alt))
        .map(|(_, _, d)| *d)
        .sum();
    let lift = f32::from(keys.pressed(KeyCode::KeyE)) - f32::from(keys.pressed(KeyCode::KeyQ));

    if dir == Vec2::ZERO && lift == 0.0 {
        return;
    }

    let step = PAN_SPEED * (orbit.distance / 100.0) * time.delta_secs();
    let yaw = orbit.yaw;
    pan_focus(&mut orbit, ground_direction(dir.normalize_or_zero(), yaw) * step);
    orbit.focus.y += lift * step;
}

/// Middle-mouse drag drags the grid under the cursor.
pub fn camera_pan_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<PanDrag>,
    mut orbit: ResMut<OrbitCamera>,
    mut contexts: EguiContexts,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let pressed = buttons.just_pressed(MouseButton::Middle);
    let blocked = pressed && egui_wants_pointer(&mut contexts);
    let Some(delta) = drag.0.track(
        pressed,
        buttons.just_released(MouseButton::Middle),
        blocked,
        window.cursor_position(),
    ) else {
        return;
    };

    let scale = orbit.distance / 1000.0;
    let yaw = orbit.yaw;
    pan_focus(&mut orbit, -ground_direction(delta, yaw) * scale);
}

/// Right-mouse drag orbits: horizontal movement turns, vertical tilts.
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<OrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
    mut contexts: EguiContexts,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let pressed = buttons.just_pressed(MouseButton::Right);
    let blocked = pressed && egui_wants_pointer(&mut contexts);
    let Some(delta) = drag.0.track(
        pressed,
        buttons.just_released(MouseButton::Right),
        blocked,
        window.cursor_position(),
    ) else {
        return;
    };

    orbit.yaw += delta.x * ORBIT_SENSITIVITY;
    orbit.pitch = (orbit.pitch - delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
}

/// Scroll wheel zooms towards the focus.
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    mut orbit: ResMut<OrbitCamera>,
    mut contexts: EguiContexts,
) {
    if egui_wants_pointer(&mut contexts) {
        scroll_evts.clear();
        return;
    }
    let scroll: f32 = scroll_evts
        .read()
        .map(|evt| match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        })
        .sum();
    if scroll != 0.0 {
        orbit.distance = zoomed_distance(orbit.distance, scroll);
    }
}

fn zoomed_distance(distance: f32, scroll: f32) -> f32 {
    let factor = 1.0 - scroll * ZOOM_SPEED;
    (distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_grid_centers_focus() {
        let orbit = OrbitCamera::for_grid(100, 50);
        assert_eq!(orbit.focus.x, 50.0 * CELL_SIZE);
        assert_eq!(orbit.focus.z, 25.0 * CELL_SIZE);
        assert_eq!(orbit.bounds, Vec2::new(100.0 * CELL_SIZE, 50.0 * CELL_SIZE));
    }

    #[test]
    fn test_orbit_to_transform_distance() {
        let orbit = OrbitCamera::default();
        let (pos, look_at) = orbit_to_transform(&orbit);
        assert_eq!(look_at, orbit.focus);
        assert!((pos.distance(look_at) - orbit.distance).abs() < 1e-3);
        assert!(pos.y > look_at.y, "camera sits above its focus");
    }

    #[test]
    fn test_zoom_is_clamped() {
        assert_eq!(zoomed_distance(MIN_DISTANCE, 100.0), MIN_DISTANCE);
        assert_eq!(zoomed_distance(MAX_DISTANCE, -100.0), MAX_DISTANCE);
        assert!(zoomed_distance(100.0, 1.0) < 100.0, "scrolling up zooms in");
    }

    #[test]
    fn test_clamp_focus_keeps_near_grid() {
        let mut focus = Vec3::new(-1000.0, 5.0, 1000.0);
        clamp_focus(&mut focus, Vec2::new(100.0, 100.0));
        assert_eq!(focus, Vec3::new(-50.0, 5.0, 150.0));
    }

    #[test]
    fn test_ground_direction_at_zero_yaw_is_identity() {
        let d = ground_direction(Vec2::new(1.0, -2.0), 0.0);
        assert!((d - Vec2::new(1.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn test_ground_direction_quarter_turn() {
        let d = ground_direction(Vec2::X, std::f32::consts::FRAC_PI_2);
        assert!((d - Vec2::new(0.0, -1.0)).length() < 1e-6, "got {d:?}");
    }

    #[test]
    fn test_drag_reports_movement_between_press_and_release() {
        let mut drag = DragState::default();
        assert_eq!(drag.track(true, false, false, Some(Vec2::new(10.0, 10.0))), None);
        assert_eq!(
            drag.track(false, false, false, Some(Vec2::new(13.0, 6.0))),
            Some(Vec2::new(3.0, -4.0))
        );
        assert_eq!(drag.track(false, true, false, Some(Vec2::new(20.0, 20.0))), None);
        assert_eq!(drag.track(false, false, false, Some(Vec2::new(30.0, 30.0))), None);
    }

    #[test]
    fn test_drag_blocked_press_never_starts() {
        let mut drag = DragState::default();
        drag.track(true, false, true, Some(Vec2::ZERO));
        assert_eq!(drag.anchor, None);
        assert_eq!(drag.track(false, false, false, Some(Vec2::ONE)), None);
    }
}
