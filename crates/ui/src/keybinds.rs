use bevy::prelude::*;
use bevy_egui::EguiContexts;

use simulation::driver::SimulationControl;
use simulation::injection::{ClearWater, InjectFluid, InjectionSettings, InjectionTarget};

// ---------------------------------------------------------------------------
// Simulation keybinds
// ---------------------------------------------------------------------------

/// Keyboard shortcuts mirroring the control panel:
/// - Space: toggle auto update
/// - Period: single step
/// - Enter: add water to the center
/// - R: add water at a random cell
/// - Backspace: clear water
///
/// Skipped when egui wants keyboard input.
pub fn fluid_keybinds(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut control: ResMut<SimulationControl>,
    injection: Res<InjectionSettings>,
    mut inject_events: EventWriter<InjectFluid>,
    mut clear_events: EventWriter<ClearWater>,
) {
    if contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.wants_keyboard_input())
    {
        return;
    }

    if keyboard.just_pressed(KeyCode::Space) {
        control.auto_run = !control.auto_run;
    }
    if keyboard.just_pressed(KeyCode::Period) {
        control.request_step();
    }
    if keyboard.just_pressed(KeyCode::Enter) {
        inject_events.send(InjectFluid {
            target: InjectionTarget::Center,
            amount: injection.amount(),
        });
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        inject_events.send(InjectFluid {
            target: InjectionTarget::Random,
            amount: injection.amount(),
        });
    }
    if keyboard.just_pressed(KeyCode::Backspace) {
        clear_events.send(ClearWater);
    }
}
