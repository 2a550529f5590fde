//! Egui input guard: prevents click-through from UI elements to the world.
//!
//! When egui (the control panel, its sliders) is handling pointer input,
//! camera drag and zoom systems should not react to the same gestures.

use bevy_egui::EguiContexts;

/// Returns `true` when egui wants the pointer, i.e. the cursor is over an
/// egui window or egui is actively handling a drag/click.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return false;
    };
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}
