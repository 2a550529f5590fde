use bevy_egui::{egui, EguiContexts};

/// Dark slate panels with a water-blue accent.
pub fn apply_theme(mut contexts: EguiContexts) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgb(28, 34, 42);
    let inactive = egui::Color32::from_rgb(44, 54, 66);
    let hover = egui::Color32::from_rgb(58, 78, 98);
    let accent = egui::Color32::from_rgb(64, 150, 220);

    for (widget, fill) in [
        (&mut style.visuals.widgets.noninteractive, panel),
        (&mut style.visuals.widgets.inactive, inactive),
        (&mut style.visuals.widgets.hovered, hover),
        (&mut style.visuals.widgets.active, accent),
    ] {
        widget.bg_fill = fill;
        widget.weak_bg_fill = fill;
        widget.corner_radius = egui::CornerRadius::same(4);
    }

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.extreme_bg_color = egui::Color32::from_rgb(20, 24, 30);
    style.visuals.window_corner_radius = egui::CornerRadius::same(6);

    style.visuals.selection.bg_fill = accent;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, accent);

    ctx.set_style(style);
}
