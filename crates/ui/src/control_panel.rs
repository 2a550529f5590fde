//! "Fluid Controls" window: run control, injection, flow options and live stats.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::config::{
    MAX_INJECTION_EXPONENT, MAX_UPDATES_PER_SECOND, MIN_INJECTION_EXPONENT,
    MIN_UPDATES_PER_SECOND,
};
use simulation::driver::SimulationControl;
use simulation::injection::{ClearWater, InjectFluid, InjectionSettings, InjectionTarget};
use simulation::stats::FluidStats;
use simulation::Fluid;

/// Compact human-readable volume: plain below ten thousand, scientific above.
pub fn format_volume(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if v.abs() >= 1e4 {
        format!("{v:.2e}")
    } else {
        format!("{v:.1}")
    }
}

#[allow(clippy::too_many_arguments)]
pub fn control_panel_ui(
    mut contexts: EguiContexts,
    mut control: ResMut<SimulationControl>,
    mut injection: ResMut<InjectionSettings>,
    mut fluid: ResMut<Fluid>,
    stats: Res<FluidStats>,
    mut inject_events: EventWriter<InjectFluid>,
    mut clear_events: EventWriter<ClearWater>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    // Widgets edit local copies so untouched resources are not marked changed.
    let mut auto_run = control.auto_run;
    let mut ups = control.updates_per_second;
    let mut exponent = injection.exponent;
    let mut minimum_flow = fluid.params().minimum_flow;

    egui::Window::new("Fluid Controls")
        .default_pos(egui::pos2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Simulation");
            ui.horizontal(|ui| {
                ui.checkbox(&mut auto_run, "Auto Update");
                if ui.button("Step").clicked() {
                    control.request_step();
                    auto_run = false;
                }
            });
            ui.add(
                egui::Slider::new(&mut ups, MIN_UPDATES_PER_SECOND..=MAX_UPDATES_PER_SECOND)
                    .logarithmic(true)
                    .text("updates / s"),
            );

            ui.separator();
            ui.heading("Water");
            ui.add(
                egui::Slider::new(&mut exponent, MIN_INJECTION_EXPONENT..=MAX_INJECTION_EXPONENT)
                    .step_by(0.1)
                    .text("amount (10^x)"),
            );
            let amount = simulation::injection::injection_amount(exponent);
            ui.label(format!("Amount: {}", format_volume(amount)));
            ui.horizontal(|ui| {
                if ui.button("Add to Center").clicked() {
                    inject_events.send(InjectFluid {
                        target: InjectionTarget::Center,
                        amount,
                    });
                }
                if ui.button("Add at Random").clicked() {
                    inject_events.send(InjectFluid {
                        target: InjectionTarget::Random,
                        amount,
                    });
                }
            });
            if ui.button("Clear Water").clicked() {
                clear_events.send(ClearWater);
            }
            ui.checkbox(&mut minimum_flow, "Minimum flow");

            ui.separator();
            ui.heading("Stats");
            egui::Grid::new("fluid_stats").num_columns(2).show(ui, |ui| {
                ui.label("Tick");
                ui.label(stats.tick.to_string());
                ui.end_row();
                ui.label("Total volume");
                ui.label(format_volume(stats.total_volume));
                ui.end_row();
                ui.label("Interior volume");
                ui.label(format_volume(stats.interior_volume));
                ui.end_row();
                ui.label("Border volume");
                ui.label(format_volume(stats.ring_volume));
                ui.end_row();
                ui.label("Deepest cell");
                ui.label(format_volume(stats.max_depth));
                ui.end_row();
                ui.label("Highest water");
                ui.label(format_volume(stats.max_water_level));
                ui.end_row();
                ui.label("Wet cells");
                ui.label(stats.wet_cells.to_string());
                ui.end_row();
            });
        });

    if auto_run != control.auto_run {
        control.auto_run = auto_run;
    }
    if ups != control.updates_per_second {
        control.set_updates_per_second(ups);
    }
    if exponent != injection.exponent {
        injection.exponent = exponent;
    }
    if minimum_flow != fluid.params().minimum_flow {
        fluid.set_minimum_flow(minimum_flow);
        info!("Minimum flow {}", if minimum_flow { "enabled" } else { "disabled" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_volume_plain() {
        assert_eq!(format_volume(0.0), "0.0");
        assert_eq!(format_volume(123.456), "123.5");
        assert_eq!(format_volume(-2.0), "-2.0");
    }

    #[test]
    fn test_format_volume_scientific() {
        assert_eq!(format_volume(1_000_000.0), "1.00e6");
        assert_eq!(format_volume(25_000.0), "2.50e4");
    }

    #[test]
    fn test_format_volume_non_finite() {
        assert_eq!(format_volume(f64::NAN), "NaN");
        assert_eq!(format_volume(f64::INFINITY), "inf");
    }
}
