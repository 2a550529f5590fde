use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod control_panel;
pub mod graphs;
pub mod keybinds;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<graphs::VolumeHistory>()
            .add_systems(Startup, theme::apply_theme)
            .add_systems(
                Update,
                (
                    keybinds::fluid_keybinds,
                    control_panel::control_panel_ui,
                    graphs::record_history,
                    graphs::graphs_ui,
                )
                    .in_set(simulation::SimulationUpdateSet::Input),
            );
    }
}
