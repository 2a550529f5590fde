use std::collections::VecDeque;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::stats::FluidStats;

const MAX_HISTORY: usize = 200;
/// Ticks between recorded samples.
const RECORD_STRIDE: u64 = 5;

#[derive(Resource)]
pub struct VolumeHistory {
    pub total: VecDeque<f32>,
    pub interior: VecDeque<f32>,
    pub max_depth: VecDeque<f32>,
    pub last_record_tick: Option<u64>,
}

impl Default for VolumeHistory {
    fn default() -> Self {
        Self {
            total: VecDeque::with_capacity(MAX_HISTORY),
            interior: VecDeque::with_capacity(MAX_HISTORY),
            max_depth: VecDeque::with_capacity(MAX_HISTORY),
            last_record_tick: None,
        }
    }
}

impl VolumeHistory {
    /// Append a sample if at least `RECORD_STRIDE` ticks passed since the
    /// last one. A tick count that went backwards starts a fresh history.
    pub fn record(&mut self, stats: &FluidStats) -> bool {
        if let Some(last) = self.last_record_tick {
            if stats.tick < last {
                self.clear();
            } else if stats.tick < last + RECORD_STRIDE {
                return false;
            }
        }
        self.last_record_tick = Some(stats.tick);

        self.total.push_back(stats.total_volume as f32);
        self.interior.push_back(stats.interior_volume as f32);
        self.max_depth.push_back(stats.max_depth as f32);

        // Trim old data (O(1) front removal with VecDeque)
        if self.total.len() > MAX_HISTORY {
            self.total.pop_front();
            self.interior.pop_front();
            self.max_depth.pop_front();
        }
        true
    }

    pub fn clear(&mut self) {
        self.total.clear();
        self.interior.clear();
        self.max_depth.clear();
        self.last_record_tick = None;
    }
}

pub fn record_history(stats: Res<FluidStats>, mut history: ResMut<VolumeHistory>) {
    if !stats.is_changed() {
        return;
    }
    history.record(&stats);
}

pub fn graphs_ui(mut contexts: EguiContexts, history: Res<VolumeHistory>) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    egui::Window::new("Trends")
        .default_open(false)
        .show(ctx, |ui| {
            if history.total.is_empty() {
                ui.label("No data yet...");
                return;
            }

            let total: Vec<f32> = history.total.iter().copied().collect();
            let interior: Vec<f32> = history.interior.iter().copied().collect();
            let depth: Vec<f32> = history.max_depth.iter().copied().collect();

            ui.heading("Total volume");
            draw_sparkline(ui, &total, egui::Color32::LIGHT_BLUE);

            ui.heading("Interior volume");
            draw_sparkline(ui, &interior, egui::Color32::from_rgb(60, 140, 230));

            ui.heading("Deepest cell");
            draw_sparkline(ui, &depth, egui::Color32::GOLD);
        });
}

fn draw_sparkline(ui: &mut egui::Ui, data: &[f32], color: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(180.0, 40.0), egui::Sense::hover());

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 2.0, egui::Color32::from_gray(30));

    if data.len() < 2 {
        return;
    }

    let min_val = data.iter().cloned().fold(f32::INFINITY, f32::min);
    let max_val = data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let range = (max_val - min_val).max(1.0);

    let points: Vec<egui::Pos2> = data
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = rect.min.x + (i as f32 / (data.len() - 1) as f32) * rect.width();
            let y = rect.max.y - ((v - min_val) / range) * rect.height();
            egui::pos2(x, y)
        })
        .collect();

    for window in points.windows(2) {
        painter.line_segment([window[0], window[1]], egui::Stroke::new(1.5, color));
    }

    if let Some(&last) = data.last() {
        ui.label(format!("  Latest: {:.1}", last));
    }
}
