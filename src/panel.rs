//! Control panel: one slider per knob, the pending births, and the clear button.
//!
//! Sliders are bounded by each knob's declared range, so every value the
//! simulation reads from here is already clamped.

use egui::Ui;

use crate::config::{Params, Style};
use crate::population::MAX_BIRTH_ACCUMULATOR;

/// Read-only values shown under the sliders.
pub struct PanelStats {
    pub live: usize,
    pub fps: f32,
}

/// Commands issued by the panel this frame.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelActions {
    pub clear: bool,
    pub reset: bool,
    /// The `bornCount` slider was dragged.
    pub born_count_changed: bool,
}

/// Draw the panel. Returns the buttons pressed this frame.
///
/// `born_count` is the population's birth accumulator; write it back when
/// [`PanelActions::born_count_changed`] is set.
pub fn show(
    ctx: &egui::Context,
    params: &mut Params,
    style: &mut Style,
    born_count: &mut f32,
    stats: &PanelStats,
) -> PanelActions {
    let mut actions = PanelActions::default();

    egui::Window::new("Parameters")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            render_params(ui, params);

            ui.separator();
            ui.add(
                egui::Slider::new(&mut style.particle_scale, 0.5..=20.0)
                    .text("size")
                    .logarithmic(true),
            );

            actions.born_count_changed = ui
                .add(egui::Slider::new(born_count, 0.0..=MAX_BIRTH_ACCUMULATOR).text("bornCount"))
                .changed();

            ui.separator();
            render_stats(ui, stats);

            ui.separator();
            ui.horizontal(|ui| {
                actions.clear = ui.button("clear").clicked();
                actions.reset = ui.button("reset").clicked();
            });
        });

    actions
}

/// Sliders for every knob, in panel order.
pub fn render_params(ui: &mut Ui, params: &mut Params) {
    ui.heading("Main Parameters");
    for (range, value) in params.knobs_mut() {
        ui.add(egui::Slider::new(value, range.min..=range.max).text(range.name));
    }
}

fn render_stats(ui: &mut Ui, stats: &PanelStats) {
    ui.label(format!("particles: {}", stats.live));
    ui.label(format!("fps: {:.1}", stats.fps));
}
